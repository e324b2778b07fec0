//! Unit tests for gt-signal.

#[cfg(test)]
mod table {
    use gt_core::Direction::{self, E, N, S, W};
    use gt_core::Turn::{self, Left, Right, Straight};

    use crate::{PHASE_TABLE, Phase};

    fn expected(phase: u8) -> Vec<(Direction, Turn)> {
        match phase {
            0 => vec![(E, Straight), (W, Straight)],
            1 => vec![(E, Left), (W, Left)],
            2 => vec![(N, Straight), (S, Straight)],
            3 => vec![(N, Left), (S, Left)],
            4 => vec![(E, Left), (E, Straight)],
            5 => vec![(N, Left), (N, Straight)],
            6 => vec![(W, Left), (W, Straight)],
            7 => vec![(S, Left), (S, Straight)],
            _ => unreachable!(),
        }
    }

    #[test]
    fn each_phase_permits_exactly_its_movements() {
        for p in Phase::all() {
            let got: Vec<_> = PHASE_TABLE.movements(p).collect();
            assert_eq!(got, expected(p.index() as u8), "phase {p}");
        }
    }

    #[test]
    fn right_turns_always_permitted() {
        for p in Phase::all() {
            for side in Direction::ALL {
                assert!(PHASE_TABLE.permits(p, side, Right));
            }
        }
    }

    #[test]
    fn every_signalled_movement_gets_a_phase() {
        for side in Direction::ALL {
            for turn in [Left, Straight] {
                assert!(
                    Phase::all().any(|p| PHASE_TABLE.permits(p, side, turn)),
                    "{side} {turn} is never served"
                );
            }
        }
    }

    #[test]
    fn phase_bounds() {
        assert!(Phase::new(7).is_some());
        assert!(Phase::new(8).is_none());
        assert_eq!(Phase::all().count(), 8);
    }
}

#[cfg(test)]
mod schedule {
    use gt_core::{Direction, IntersectionId, Turn};

    use crate::{Phase, SignalBank, SignalController};

    #[test]
    fn phase_from_age() {
        assert_eq!(Phase::at(0, 30), Phase::new(0).unwrap());
        assert_eq!(Phase::at(29, 30), Phase::new(0).unwrap());
        assert_eq!(Phase::at(30, 30), Phase::new(1).unwrap());
        assert_eq!(Phase::at(239, 30), Phase::new(7).unwrap());
        assert_eq!(Phase::at(240, 30), Phase::new(0).unwrap());
    }

    #[test]
    fn controller_follows_its_own_age() {
        let mut c = SignalController::new(30);
        for tick in 0..500u64 {
            c.step(None);
            assert_eq!(c.phase, Phase::at(tick, 30), "tick {tick}");
            assert!(!c.overridden);
        }
        assert_eq!(c.age, 500);
    }

    #[test]
    fn override_applies_for_one_tick() {
        let mut c = SignalController::new(30);
        let p5 = Phase::new(5).unwrap();
        c.step(Some(p5));
        assert_eq!(c.phase, p5);
        assert!(c.overridden);
        assert!(c.permits(Direction::N, Turn::Left));
        c.step(None);
        assert_eq!(c.phase, Phase::at(1, 30));
        assert!(!c.overridden);
    }

    #[test]
    fn bank_skips_fringe() {
        let interior = [IntersectionId(2), IntersectionId(3)];
        let mut bank = SignalBank::new(4, &interior, 30);
        assert_eq!(bank.len(), 2);
        assert!(bank.phase(IntersectionId(0)).is_none());

        let mut asked = Vec::new();
        bank.step(|id| {
            asked.push(id);
            None
        });
        assert_eq!(asked, interior);
        // Fringe intersections never hold a movement.
        assert!(bank.permits(IntersectionId(0), Direction::N, Turn::Left));
        // Phase 0: only E/W straight.
        assert!(bank.permits(IntersectionId(2), Direction::E, Turn::Straight));
        assert!(!bank.permits(IntersectionId(2), Direction::N, Turn::Straight));
    }
}
