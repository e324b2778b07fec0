//! Network error types.
//!
//! Every variant here is a construction-time defect: the topology or a route
//! was built wrong.  Callers abort rather than retry.

use thiserror::Error;

use gt_core::{CoreError, Direction, EdgeId, NodeId};

use crate::NodeKey;

#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("{node} wired as {role} of {edge}, but is not that edge's {role} endpoint")]
    Miswired {
        node: NodeId,
        edge: EdgeId,
        role: &'static str,
    },

    #[error("{edge} from {start} to {end}: interior flag contradicts its endpoints' intersections")]
    InteriorFlagMismatch {
        edge:  EdgeId,
        start: NodeId,
        end:   NodeId,
    },

    #[error("no node {0}")]
    MissingNode(NodeKey),

    #[error(transparent)]
    Config(#[from] CoreError),
}

pub type TopologyResult<T> = Result<T, TopologyError>;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("{0} is not a node of this grid")]
    UnknownNode(NodeId),

    #[error("route origin {0} is not an outgoing fringe node")]
    NotOutgoingFringe(NodeId),

    #[error("route destination {0} is not an incoming fringe node")]
    NotIncomingFringe(NodeId),

    #[error("origin {origin} and destination {destination} share an intersection")]
    SameIntersection { origin: NodeId, destination: NodeId },

    #[error("{node} has no maneuver exiting towards {toward}")]
    NoTurn { node: NodeId, toward: Direction },

    #[error("route walk reached {node}, expected an outgoing node facing {expected}")]
    Misaligned { node: NodeId, expected: Direction },

    #[error("route ends at {reached}, expected {expected}")]
    WrongTerminus { expected: NodeId, reached: NodeId },
}

pub type RouteResult<T> = Result<T, RouteError>;
