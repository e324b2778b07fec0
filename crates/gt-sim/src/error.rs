use gt_core::CoreError;
use gt_network::{RouteError, TopologyError};
use gt_traffic::TrafficError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("topology error: {0}")]
    Topology(#[from] TopologyError),

    #[error("route error: {0}")]
    Route(#[from] RouteError),

    #[error("traffic consistency error: {0}")]
    Traffic(#[from] TrafficError),
}

pub type SimResult<T> = Result<T, SimError>;
