//! `gt-network`: the grid road network and route synthesis.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`topology`] | `GridTopology` arena: `Intersection`, `Node`, `Edge`, lookup |
//! | [`builder`]  | `TopologyBuilder`: constructs and wires the grid once        |
//! | [`router`]   | `RouteSynthesizer` trait, `Route`, `MonotoneRouter`          |
//! | [`error`]    | `TopologyError`, `RouteError`                                |
//!
//! The topology is read-only after [`TopologyBuilder::build`] returns.  All
//! cross-references are arena indices (`NodeId`, `EdgeId`,
//! `IntersectionId`), never pointers, so the graph can be shared freely.

pub mod builder;
pub mod error;
pub mod router;
pub mod topology;


pub use builder::TopologyBuilder;
pub use error::{RouteError, RouteResult, TopologyError, TopologyResult};
pub use router::{MonotoneRouter, Route, RouteStep, RouteSynthesizer, check_endpoints};
pub use topology::{Coord, Edge, GridTopology, Intersection, Node, NodeKey};
