//! Unit tests for gt-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, NodeId, VehicleId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(EdgeId::default(), EdgeId::INVALID);
        assert!(!EdgeId::default().is_valid());
        assert!(EdgeId(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(VehicleId(7).to_string(), "VehicleId(7)");
    }
}

#[cfg(test)]
mod compass {
    use crate::{Direction, Turn};

    #[test]
    fn four_left_turns_return_home() {
        for d in Direction::ALL {
            assert_eq!(d.left().left().left().left(), d);
            assert_eq!(d.right().right().right().right(), d);
        }
    }

    #[test]
    fn left_and_right_are_inverse() {
        for d in Direction::ALL {
            assert_eq!(d.left().right(), d);
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn turn_exits_are_distinct_and_never_u_turn() {
        for d in Direction::ALL {
            let exits: Vec<_> = Turn::ALL.iter().map(|&t| d.exit(t)).collect();
            assert!(!exits.contains(&d), "{d}: a turn must not exit where it came in");
            assert_ne!(exits[0], exits[1]);
            assert_ne!(exits[1], exits[2]);
            assert_ne!(exits[0], exits[2]);
        }
    }

    #[test]
    fn turn_towards_inverts_exit() {
        for d in Direction::ALL {
            for t in Turn::ALL {
                assert_eq!(d.turn_towards(d.exit(t)), Some(t));
            }
            assert_eq!(d.turn_towards(d), None);
        }
    }

    #[test]
    fn offsets_of_opposites_cancel() {
        for d in Direction::ALL {
            let (a, b) = d.offset();
            let (c, e) = d.opposite().offset();
            assert_eq!((a + c, b + e), (0, 0));
        }
    }

    #[test]
    fn only_right_is_unsignalled() {
        assert!(Turn::Left.is_signalled());
        assert!(Turn::Straight.is_signalled());
        assert!(!Turn::Right.is_signalled());
    }
}

#[cfg(test)]
mod geo {
    use crate::{Direction, Point};

    #[test]
    fn cell_maps_col_to_x() {
        assert_eq!(Point::of_cell(2, 5), Point::new(5.0, 2.0));
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(2.0, 4.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Point::new(1.0, 2.0));
    }

    #[test]
    fn step_south_increases_y() {
        let p = Point::new(1.0, 1.0).step(Direction::S, 0.5);
        assert_eq!(p, Point::new(1.0, 1.5));
    }

    #[test]
    fn heading_east_is_zero() {
        let h = Point::new(0.0, 0.0).heading_to(Point::new(3.0, 0.0));
        assert!(h.abs() < 1e-6);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(15).since(Tick(10)), 5);
    }

    #[test]
    fn clock_runs_to_horizon() {
        let mut clock = SimClock::new(3);
        assert!(!clock.at_horizon());
        clock.advance();
        clock.advance();
        assert_eq!(clock.remaining(), 1);
        clock.advance();
        assert!(clock.at_horizon());
        assert_eq!(clock.to_string(), "T3 / T3");
    }
}

#[cfg(test)]
mod config {
    use crate::{GridConfig, QueueDiscipline};

    #[test]
    fn defaults() {
        let c = GridConfig::default();
        assert_eq!(c.release_capacity, 2);
        assert_eq!(c.phase_ticks, 30);
        assert_eq!(c.cycle_ticks(), 240);
        assert_eq!(c.horizon_ticks, 1_800);
        assert_eq!(c.queue_discipline, QueueDiscipline::Fifo);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn zero_dimension_rejected() {
        let c = GridConfig { width: 0, ..GridConfig::default() };
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("width"), "got: {err}");
    }

    #[test]
    fn zero_capacity_rejected() {
        let c = GridConfig { release_capacity: 0, ..GridConfig::default() };
        assert!(c.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        for _ in 0..16 {
            assert_eq!(a.gen_range(0..1_000u32), b.gen_range(0..1_000u32));
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = SimRng::new(3);
        let mut v: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut v);
        let mut sorted = v.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = SimRng::new(1);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.choose(&[9]), Some(&9));
    }
}
