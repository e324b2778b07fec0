//! One vehicle and its motion state machine.

use gt_core::{EdgeId, NodeId, Point, Tick, Turn, VehicleId};
use gt_network::{GridTopology, Route, RouteStep};

use crate::{TrafficError, TrafficResult};

/// Where a vehicle is in its trip.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleState {
    /// Traversing `edge`; `timer` ticks have elapsed on it.
    OnEdge { edge: EdgeId, timer: u64 },
    /// Waiting in the `turn` queue of interior node `node`.
    Queued { node: NodeId, turn: Turn },
    Finished,
}

impl VehicleState {
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleState::OnEdge { .. } => "on_edge",
            VehicleState::Queued { .. } => "queued",
            VehicleState::Finished      => "finished",
        }
    }
}

/// What a single motion step did, reported to the engine.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Motion {
    /// Still travelling (including an unqueued hop onto the next edge).
    Moving,
    /// Reached a signalled node and must join its `turn` queue.
    Arrived { node: NodeId, turn: Turn },
    /// Held in a queue for this tick.
    Waiting,
    /// Left the grid at its destination.
    Finished,
    /// Already finished before this tick.
    Idle,
}

#[derive(Clone, Debug)]
pub struct Vehicle {
    pub id:               VehicleId,
    pub spawn_tick:       Tick,
    pub origin:           NodeId,
    pub destination:      NodeId,
    pub route:            Route,
    /// Index into `route` of the element the vehicle currently occupies.
    pub route_index:      usize,
    pub state:            VehicleState,
    pub cumulative_wait:  u64,
    pub finish_tick:      Option<Tick>,
    pub min_travel_ticks: u64,
}

impl Vehicle {
    /// Place a new vehicle at the start of its origin link.
    ///
    /// The route's first element is the origin node; the vehicle starts on
    /// the edge after it.
    pub fn new(id: VehicleId, spawn_tick: Tick, route: Route) -> TrafficResult<Self> {
        let (Some(origin), Some(destination)) = (route.origin(), route.destination()) else {
            return Err(TrafficError::RouteOverrun { vehicle: id, index: 0 });
        };
        let edge = route
            .step(1)
            .and_then(RouteStep::edge)
            .ok_or(TrafficError::RouteOverrun { vehicle: id, index: 1 })?;
        Ok(Self {
            id,
            spawn_tick,
            origin,
            destination,
            min_travel_ticks: route.min_travel_ticks,
            route,
            route_index: 1,
            state: VehicleState::OnEdge { edge, timer: 0 },
            cumulative_wait: 0,
            finish_tick: None,
        })
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state == VehicleState::Finished
    }

    #[inline]
    pub fn is_queued(&self) -> bool {
        matches!(self.state, VehicleState::Queued { .. })
    }

    /// Realized travel time, once finished.
    pub fn travel_ticks(&self) -> Option<u64> {
        self.finish_tick.map(|f| f.since(self.spawn_tick))
    }

    /// Realized minus minimum travel time, once finished.
    pub fn deviation(&self) -> Option<i64> {
        self.travel_ticks()
            .map(|t| t as i64 - self.min_travel_ticks as i64)
    }

    /// The route element the vehicle occupies, or `None` once finished.
    pub fn current(&self) -> Option<RouteStep> {
        match self.state {
            VehicleState::OnEdge { edge, .. } => Some(RouteStep::Edge(edge)),
            VehicleState::Queued { node, .. } => Some(RouteStep::Node(node)),
            VehicleState::Finished            => None,
        }
    }

    /// Fail unless the occupied element is `route[route_index]`.
    pub fn check_sync(&self) -> TrafficResult<()> {
        let Some(found) = self.current() else { return Ok(()) };
        let expected = self.route.step(self.route_index);
        if expected != Some(found) {
            return Err(TrafficError::RouteDesync {
                vehicle: self.id,
                index: self.route_index,
                expected,
                found,
            });
        }
        Ok(())
    }

    /// Advance one tick.  `now` is the tick being simulated; a vehicle that
    /// completes its last link during it finishes at `now + 1`.
    pub fn advance(&mut self, topology: &GridTopology, now: Tick) -> TrafficResult<Motion> {
        self.check_sync()?;
        let (edge_id, timer) = match self.state {
            VehicleState::Finished => return Ok(Motion::Idle),
            VehicleState::Queued { .. } => {
                self.cumulative_wait += 1;
                return Ok(Motion::Waiting);
            }
            VehicleState::OnEdge { edge, timer } => (edge, timer + 1),
        };

        let edge = topology.edge(edge_id);
        if timer < edge.transit_ticks {
            self.state = VehicleState::OnEdge { edge: edge_id, timer };
            return Ok(Motion::Moving);
        }

        let end = topology.node(edge.end);
        if end.is_fringe() {
            if edge.end != self.destination {
                return Err(TrafficError::UnexpectedExit { vehicle: self.id, node: edge.end });
            }
            self.state = VehicleState::Finished;
            self.route_index += 1;
            self.finish_tick = Some(now + 1);
            return Ok(Motion::Finished);
        }

        let next = self
            .route
            .step(self.route_index + 2)
            .and_then(RouteStep::edge)
            .ok_or(TrafficError::RouteOverrun { vehicle: self.id, index: self.route_index + 2 })?;
        if topology.edge(next).start != edge.end {
            return Err(TrafficError::RouteDesync {
                vehicle:  self.id,
                index:    self.route_index + 2,
                expected: Some(RouteStep::Edge(next)),
                found:    RouteStep::Node(edge.end),
            });
        }

        match end.turn_of(next).filter(|t| t.is_signalled()) {
            Some(turn) => {
                self.state = VehicleState::Queued { node: edge.end, turn };
                self.route_index += 1;
                Ok(Motion::Arrived { node: edge.end, turn })
            }
            None => {
                self.state = VehicleState::OnEdge { edge: next, timer: 0 };
                self.route_index += 2;
                Ok(Motion::Moving)
            }
        }
    }

    /// Leave the queue at `node` onto the route's next edge.
    pub fn depart(&mut self, node: NodeId) -> TrafficResult<()> {
        match self.state {
            VehicleState::Queued { node: at, .. } if at == node => {}
            _ => return Err(TrafficError::NotQueuedAt { vehicle: self.id, node }),
        }
        self.check_sync()?;
        let next = self
            .route
            .step(self.route_index + 1)
            .and_then(RouteStep::edge)
            .ok_or(TrafficError::RouteOverrun { vehicle: self.id, index: self.route_index + 1 })?;
        self.state = VehicleState::OnEdge { edge: next, timer: 0 };
        self.route_index += 1;
        Ok(())
    }

    /// Render position: interpolated along the current edge, at the queue
    /// node while waiting, at the destination once finished.
    pub fn location(&self, topology: &GridTopology) -> Point {
        match self.state {
            VehicleState::OnEdge { edge, timer } => {
                let e = topology.edge(edge);
                let t = timer as f32 / e.transit_ticks as f32;
                topology.node(e.start).location.lerp(topology.node(e.end).location, t)
            }
            VehicleState::Queued { node, .. } => topology.node(node).location,
            VehicleState::Finished            => topology.node(self.destination).location,
        }
    }

    /// Heading in radians of the edge the vehicle is on or last arrived by.
    pub fn heading(&self, topology: &GridTopology) -> f32 {
        let edge = match self.state {
            VehicleState::OnEdge { edge, .. } => edge,
            VehicleState::Queued { node, .. } => topology.node(node).link,
            VehicleState::Finished            => topology.node(self.destination).link,
        };
        let e = topology.edge(edge);
        topology.node(e.start).location.heading_to(topology.node(e.end).location)
    }
}
