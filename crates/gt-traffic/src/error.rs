use gt_core::{NodeId, VehicleId};
use gt_network::RouteStep;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrafficError {
    #[error("{vehicle} at route index {index}: route holds {expected:?}, vehicle is at {found:?}")]
    RouteDesync {
        vehicle:  VehicleId,
        index:    usize,
        expected: Option<RouteStep>,
        found:    RouteStep,
    },

    #[error("{vehicle} ran past the end of its route at index {index}")]
    RouteOverrun { vehicle: VehicleId, index: usize },

    #[error("{vehicle} left the grid at {node}, not at its destination")]
    UnexpectedExit { vehicle: VehicleId, node: NodeId },

    #[error("{0} does not hold turn queues")]
    NotAQueueNode(NodeId),

    #[error("{0} is listed active but is not in the vehicle store")]
    UnknownVehicle(VehicleId),

    #[error("{vehicle} released from {node} but is not queued there")]
    NotQueuedAt { vehicle: VehicleId, node: NodeId },
}

pub type TrafficResult<T> = Result<T, TrafficError>;
