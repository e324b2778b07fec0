//! Unit tests for gt-traffic.
//!
//! Most cases use a single interior intersection with short transit times so
//! every tick can be followed by hand: link = 3 ticks, maneuver = 1 tick.

#[cfg(test)]
mod helpers {
    use gt_core::{Direction, NodeId, QueueDiscipline, SimRng, Tick, VehicleId};
    use gt_network::{Coord, GridTopology, MonotoneRouter, NodeKey, RouteSynthesizer, TopologyBuilder};
    use gt_signal::{Phase, SignalBank};

    use crate::{ReleaseCount, TrafficEngine, Vehicle};

    pub const LINK: u64 = 3;
    pub const TURN: u64 = 1;
    pub const CAPACITY: u32 = 2;

    pub fn grid(h: u32, l: u32) -> GridTopology {
        TopologyBuilder::new(h, l)
            .link_ticks(LINK)
            .turn_ticks(TURN)
            .build()
            .expect("grid builds")
    }

    pub fn node(g: &GridTopology, row: i32, col: i32, dir: Direction, incoming: bool) -> NodeId {
        let fringe = row == 0 || col == 0 || row == g.height as i32 + 1 || col == g.width as i32 + 1;
        g.find_node(&NodeKey { coord: Coord::new(row, col), direction: dir, incoming, fringe })
            .expect("node exists")
    }

    /// Enters the 1×1 grid from the west.
    pub fn west_origin(g: &GridTopology) -> NodeId {
        node(g, 1, 0, Direction::E, false)
    }

    pub fn straight_exit(g: &GridTopology) -> NodeId {
        node(g, 1, 2, Direction::W, true)
    }

    pub fn left_exit(g: &GridTopology) -> NodeId {
        node(g, 0, 1, Direction::S, true)
    }

    pub fn right_exit(g: &GridTopology) -> NodeId {
        node(g, 2, 1, Direction::N, true)
    }

    /// The west-side queue node of the 1×1 grid.
    pub fn west_queue(g: &GridTopology) -> NodeId {
        node(g, 1, 1, Direction::W, true)
    }

    pub fn engine(g: &GridTopology, discipline: QueueDiscipline) -> TrafficEngine {
        TrafficEngine::new(g, CAPACITY, discipline)
    }

    pub fn bank(g: &GridTopology) -> SignalBank {
        SignalBank::new(g.intersection_count(), g.interior_intersections(), 1000)
    }

    pub fn spawn(
        engine: &mut TrafficEngine,
        g:      &GridTopology,
        origin: NodeId,
        dest:   NodeId,
        at:     Tick,
    ) -> VehicleId {
        let route = MonotoneRouter
            .synthesize(g, origin, dest, &mut SimRng::new(7))
            .expect("route");
        let v = Vehicle::new(engine.next_vehicle_id(), at, route).expect("vehicle");
        engine.insert(v)
    }

    /// One tick with every intersection forced to `phase`.
    pub fn tick(
        engine: &mut TrafficEngine,
        g:      &GridTopology,
        bank:   &mut SignalBank,
        now:    u64,
        phase:  u8,
    ) -> (ReleaseCount, Vec<VehicleId>) {
        bank.step(|_| Phase::new(phase));
        let released = engine.release(g, bank).expect("release");
        let finished = engine.advance(g, Tick(now)).expect("advance");
        (released, finished)
    }
}

// ── Motion ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod motion {
    use gt_core::{QueueDiscipline, Tick, Turn, VehicleId};
    use gt_network::RouteStep;

    use super::helpers::*;
    use crate::{TrafficError, VehicleState};

    #[test]
    fn spawned_vehicle_starts_on_origin_link() {
        let g = grid(1, 1);
        let mut e = engine(&g, QueueDiscipline::Fifo);
        let id = spawn(&mut e, &g, west_origin(&g), straight_exit(&g), Tick(0));
        let v = e.vehicles.get(id).unwrap();
        assert_eq!(v.route_index, 1);
        let link = g.node(west_origin(&g)).link;
        assert_eq!(v.state, VehicleState::OnEdge { edge: link, timer: 0 });
        assert_eq!(v.current(), Some(RouteStep::Edge(link)));
        assert_eq!(v.location(&g), g.node(west_origin(&g)).location);
    }

    #[test]
    fn right_turn_never_queues() {
        let g = grid(1, 1);
        let mut e = engine(&g, QueueDiscipline::Fifo);
        let mut b = bank(&g);
        let id = spawn(&mut e, &g, west_origin(&g), right_exit(&g), Tick(0));

        // Phase 2 serves only north/south traffic, yet the right turn flows.
        let mut finished_at = None;
        for t in 0..20 {
            let (_, done) = tick(&mut e, &g, &mut b, t, 2);
            assert_eq!(e.queued_count(), 0);
            if done.contains(&id) {
                finished_at = Some(t);
                break;
            }
        }
        assert_eq!(finished_at, Some(2 * LINK + TURN - 1));
        let v = e.vehicles.get(id).unwrap();
        assert_eq!(v.travel_ticks(), Some(v.min_travel_ticks));
        assert_eq!(v.cumulative_wait, 0);
        assert_eq!(v.deviation(), Some(0));
        assert_eq!(e.vehicles.active_count(), 0);
    }

    #[test]
    fn green_straight_has_no_delay() {
        let g = grid(1, 1);
        let mut e = engine(&g, QueueDiscipline::Fifo);
        let mut b = bank(&g);
        let id = spawn(&mut e, &g, west_origin(&g), straight_exit(&g), Tick(0));

        for t in 0..LINK {
            tick(&mut e, &g, &mut b, t, 0);
        }
        let v = e.vehicles.get(id).unwrap();
        assert_eq!(v.state, VehicleState::Queued { node: west_queue(&g), turn: Turn::Straight });
        assert_eq!(v.route_index, 2);
        assert_eq!(v.location(&g), g.node(west_queue(&g)).location);

        let mut t = LINK;
        while !e.vehicles.get(id).unwrap().is_finished() {
            tick(&mut e, &g, &mut b, t, 0);
            t += 1;
        }
        let v = e.vehicles.get(id).unwrap();
        assert_eq!(v.cumulative_wait, 0);
        assert_eq!(v.travel_ticks(), Some(2 * LINK + TURN));
        assert_eq!(v.finish_tick, Some(Tick(2 * LINK + TURN)));
    }

    #[test]
    fn red_light_wait_equals_deviation() {
        let g = grid(1, 1);
        let mut e = engine(&g, QueueDiscipline::Fifo);
        let mut b = bank(&g);
        let id = spawn(&mut e, &g, west_origin(&g), left_exit(&g), Tick(0));

        // Phase 0 serves west straight only; the left turn waits until phase 1.
        for t in 0..10 {
            tick(&mut e, &g, &mut b, t, 0);
        }
        assert!(e.vehicles.get(id).unwrap().is_queued());
        assert_eq!(e.vehicles.get(id).unwrap().cumulative_wait, 10 - LINK);

        let mut t = 10;
        while !e.vehicles.get(id).unwrap().is_finished() {
            tick(&mut e, &g, &mut b, t, 1);
            t += 1;
        }
        let v = e.vehicles.get(id).unwrap();
        assert_eq!(v.cumulative_wait, 10 - LINK);
        assert_eq!(v.deviation(), Some(v.cumulative_wait as i64));
    }

    #[test]
    fn desync_is_fatal() {
        let g = grid(1, 1);
        let mut e = engine(&g, QueueDiscipline::Fifo);
        let id = spawn(&mut e, &g, west_origin(&g), straight_exit(&g), Tick(0));
        e.vehicles.get_mut(id).unwrap().route_index = 3;
        let err = e.advance(&g, Tick(0)).unwrap_err();
        assert!(matches!(
            err,
            TrafficError::RouteDesync { vehicle: VehicleId(0), index: 3, .. }
        ));
    }

    #[test]
    fn active_id_missing_from_store_is_fatal() {
        let g = grid(1, 1);
        let mut e = engine(&g, QueueDiscipline::Fifo);
        spawn(&mut e, &g, west_origin(&g), straight_exit(&g), Tick(0));
        e.vehicles.push_active(VehicleId(5));
        let err = e.advance(&g, Tick(0)).unwrap_err();
        assert!(matches!(err, TrafficError::UnknownVehicle(VehicleId(5))));
    }

    #[test]
    fn heading_follows_the_edge() {
        let g = grid(1, 1);
        let mut e = engine(&g, QueueDiscipline::Fifo);
        let id = spawn(&mut e, &g, west_origin(&g), straight_exit(&g), Tick(0));
        let v = e.vehicles.get(id).unwrap();
        assert!(v.heading(&g).abs() < 1e-6, "eastbound heading is 0");
    }

    #[test]
    fn multi_intersection_route_completes_at_minimum_on_green() {
        // Straight across a 1×3 row: three queue stops, all served by phase 0.
        let g = grid(1, 3);
        let mut e = engine(&g, QueueDiscipline::Fifo);
        let mut b = bank(&g);
        let o = node(&g, 1, 0, gt_core::Direction::E, false);
        let d = node(&g, 1, 4, gt_core::Direction::W, true);
        let id = spawn(&mut e, &g, o, d, Tick(0));
        let min = e.vehicles.get(id).unwrap().min_travel_ticks;
        assert_eq!(min, 2 * LINK + 2 * LINK + 3 * TURN);

        for t in 0..min {
            tick(&mut e, &g, &mut b, t, 0);
        }
        let v = e.vehicles.get(id).unwrap();
        assert!(v.is_finished());
        assert_eq!(v.travel_ticks(), Some(min));
    }
}

// ── Queue release ────────────────────────────────────────────────────────────

#[cfg(test)]
mod release {
    use gt_core::{QueueDiscipline, Tick, Turn, VehicleId};

    use super::helpers::*;
    use crate::{QueueStore, TrafficError};

    /// Five vehicles reach the west straight queue together at tick `LINK - 1`
    /// and sit through a red phase until tick `LINK + 1`.
    fn five_waiting(discipline: QueueDiscipline) -> (gt_network::GridTopology, crate::TrafficEngine, gt_signal::SignalBank) {
        let g = grid(1, 1);
        let mut e = engine(&g, discipline);
        let mut b = bank(&g);
        for _ in 0..5 {
            spawn(&mut e, &g, west_origin(&g), straight_exit(&g), Tick(0));
        }
        for t in 0..LINK + 2 {
            let (released, _) = tick(&mut e, &g, &mut b, t, 2);
            assert_eq!(released.total(), 0);
        }
        (g, e, b)
    }

    #[test]
    fn capacity_limits_each_tick_oldest_first() {
        let (g, mut e, mut b) = five_waiting(QueueDiscipline::Fifo);
        let q = west_queue(&g);
        assert_eq!(e.queues.depth(q, Turn::Straight), 5);
        let order: Vec<_> = e.queues.get(q).unwrap().iter(Turn::Straight).collect();
        assert_eq!(order, (0..5).map(VehicleId).collect::<Vec<_>>());

        let mut per_tick = Vec::new();
        for t in LINK + 2..LINK + 5 {
            let (released, _) = tick(&mut e, &g, &mut b, t, 0);
            per_tick.push(released.straight);
            assert_eq!(released.left, 0);
        }
        assert_eq!(per_tick, vec![2, 2, 1]);

        // Two red ticks for everyone, then one more per tick still queued.
        let waits: Vec<_> = (0..5)
            .map(|i| e.vehicles.get(VehicleId(i)).unwrap().cumulative_wait)
            .collect();
        assert_eq!(waits, vec![2, 2, 3, 3, 4]);
    }

    #[test]
    fn lifo_releases_newest_first() {
        let (g, mut e, mut b) = five_waiting(QueueDiscipline::Lifo);
        tick(&mut e, &g, &mut b, LINK + 2, 0);
        let still: Vec<_> = e.queues.get(west_queue(&g)).unwrap().iter(Turn::Straight).collect();
        assert_eq!(still, vec![VehicleId(0), VehicleId(1), VehicleId(2)]);
    }

    #[test]
    fn forbidden_phase_releases_nothing() {
        let (g, mut e, mut b) = five_waiting(QueueDiscipline::Fifo);
        // Phase 1 serves west left, not west straight.
        let (released, _) = tick(&mut e, &g, &mut b, LINK + 2, 1);
        assert_eq!(released.total(), 0);
        assert_eq!(e.queued_count(), 5);
    }

    #[test]
    fn left_and_straight_release_independently() {
        let g = grid(1, 1);
        let mut e = engine(&g, QueueDiscipline::Fifo);
        let mut b = bank(&g);
        for _ in 0..3 {
            spawn(&mut e, &g, west_origin(&g), straight_exit(&g), Tick(0));
            spawn(&mut e, &g, west_origin(&g), left_exit(&g), Tick(0));
        }
        for t in 0..LINK {
            tick(&mut e, &g, &mut b, t, 2);
        }
        // Phase 6 serves both west movements.
        let (released, _) = tick(&mut e, &g, &mut b, LINK, 6);
        assert_eq!(released.left, CAPACITY as usize);
        assert_eq!(released.straight, CAPACITY as usize);
    }

    #[test]
    fn enqueue_rejects_non_queue_nodes() {
        let g = grid(1, 1);
        let mut qs = QueueStore::new(&g, QueueDiscipline::Fifo);
        let fringe = west_origin(&g);
        assert!(matches!(
            qs.enqueue(fringe, Turn::Left, VehicleId(0)),
            Err(TrafficError::NotAQueueNode(n)) if n == fringe
        ));
        assert!(qs.enqueue(west_queue(&g), Turn::Right, VehicleId(0)).is_err());
        assert!(qs.enqueue(west_queue(&g), Turn::Left, VehicleId(0)).is_ok());
        assert_eq!(qs.total_queued(), 1);
    }
}
