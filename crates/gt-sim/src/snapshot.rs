//! Read-only views of the whole simulation for renderers.

use gt_core::{EdgeId, IntersectionId, NodeId, Point, Tick, Turn, VehicleId};
use gt_network::{Coord, GridTopology};
use gt_signal::{Phase, SignalBank};
use gt_traffic::{TrafficEngine, VehicleState};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntersectionView {
    pub id:       IntersectionId,
    pub coord:    Coord,
    pub location: Point,
    /// `None` for fringe intersections.
    pub phase:    Option<Phase>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeView {
    pub id:             NodeId,
    pub location:       Point,
    pub left_queue:     usize,
    pub straight_queue: usize,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeView {
    pub id:        EdgeId,
    pub from:      Point,
    pub to:        Point,
    /// Vehicles currently travelling on the edge.
    pub occupancy: usize,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleView {
    pub id:       VehicleId,
    pub location: Point,
    /// Radians, `atan2(dy, dx)` of the current edge.
    pub heading:  f32,
    pub state:    VehicleState,
}

/// Everything a renderer needs for one frame.  Finished vehicles are omitted.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub tick:          Tick,
    pub intersections: Vec<IntersectionView>,
    pub nodes:         Vec<NodeView>,
    pub edges:         Vec<EdgeView>,
    pub vehicles:      Vec<VehicleView>,
}

impl Snapshot {
    pub fn capture(
        tick:     Tick,
        topology: &GridTopology,
        signals:  &SignalBank,
        traffic:  &TrafficEngine,
    ) -> Self {
        let intersections = topology
            .intersections
            .iter()
            .map(|i| IntersectionView {
                id:       i.id,
                coord:    i.coord,
                location: i.location,
                phase:    signals.phase(i.id),
            })
            .collect();

        let nodes = topology
            .nodes
            .iter()
            .map(|n| NodeView {
                id:             n.id,
                location:       n.location,
                left_queue:     traffic.queues.depth(n.id, Turn::Left),
                straight_queue: traffic.queues.depth(n.id, Turn::Straight),
            })
            .collect();

        let mut occupancy = vec![0usize; topology.edge_count()];
        let mut vehicles = Vec::with_capacity(traffic.vehicles.active_count());
        for &id in traffic.vehicles.active() {
            let Some(v) = traffic.vehicles.get(id) else { continue };
            if let VehicleState::OnEdge { edge, .. } = v.state {
                occupancy[edge.index()] += 1;
            }
            vehicles.push(VehicleView {
                id,
                location: v.location(topology),
                heading:  v.heading(topology),
                state:    v.state,
            });
        }

        let edges = topology
            .edges
            .iter()
            .map(|e| EdgeView {
                id:        e.id,
                from:      topology.node(e.start).location,
                to:        topology.node(e.end).location,
                occupancy: occupancy[e.id.index()],
            })
            .collect();

        Self { tick, intersections, nodes, edges, vehicles }
    }

    /// Vehicles on edges, as opposed to waiting in queues.
    pub fn moving(&self) -> usize {
        self.edges.iter().map(|e| e.occupancy).sum()
    }
}
