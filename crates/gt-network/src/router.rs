//! Route synthesis between fringe nodes.
//!
//! # Pluggability
//!
//! `gt-sim` calls routing through the [`RouteSynthesizer`] trait, so an
//! application can swap in a different path model without touching the
//! orchestrator.  The default [`MonotoneRouter`] produces a uniformly
//! shuffled minimal Manhattan path.
//!
//! # Route shape
//!
//! A route alternates node and edge steps and always starts and ends with a
//! node:
//!
//! ```text
//! origin, link, in₁, turn₁, out₁, link, in₂, …, inₖ, turnₖ, outₖ, link, destination
//! ```

use gt_core::{Direction, EdgeId, NodeId, SimRng};

use crate::topology::GridTopology;
use crate::{RouteError, RouteResult};

// ── Route ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RouteStep {
    Node(NodeId),
    Edge(EdgeId),
}

impl RouteStep {
    pub fn edge(self) -> Option<EdgeId> {
        match self {
            RouteStep::Edge(e) => Some(e),
            RouteStep::Node(_) => None,
        }
    }

    pub fn node(self) -> Option<NodeId> {
        match self {
            RouteStep::Node(n) => Some(n),
            RouteStep::Edge(_) => None,
        }
    }
}

/// A vehicle's full path, fixed at spawn time.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub steps: Vec<RouteStep>,

    /// Heading of each link travelled: the origin's facing, the shuffled
    /// interior moves, then the heading into the destination.
    pub directions: Vec<Direction>,

    /// Sum of the transit ticks of every edge on the route.  The travel time
    /// of a vehicle that never waits.
    pub min_travel_ticks: u64,
}

impl Route {
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn step(&self, index: usize) -> Option<RouteStep> {
        self.steps.get(index).copied()
    }

    pub fn origin(&self) -> Option<NodeId> {
        self.steps.first().and_then(|s| s.node())
    }

    pub fn destination(&self) -> Option<NodeId> {
        self.steps.last().and_then(|s| s.node())
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.steps.iter().filter_map(|s| s.edge())
    }

    /// Number of links between interior intersections.
    pub fn interior_moves(&self) -> usize {
        self.directions.len().saturating_sub(2)
    }
}

// ── RouteSynthesizer trait ────────────────────────────────────────────────────

/// Pluggable route construction.
///
/// `rng` is the run's single randomness source; implementations must draw
/// from it (and nothing else) so that a seed reproduces a run.
pub trait RouteSynthesizer: Send + Sync {
    /// Build a route from an outgoing fringe `origin` to an incoming fringe
    /// `destination` on a different intersection.
    fn synthesize(
        &self,
        topology:    &GridTopology,
        origin:      NodeId,
        destination: NodeId,
        rng:         &mut SimRng,
    ) -> RouteResult<Route>;
}

/// Validate the endpoint preconditions shared by all synthesizers.
pub fn check_endpoints(
    topology:    &GridTopology,
    origin:      NodeId,
    destination: NodeId,
) -> RouteResult<()> {
    let o = topology.try_node(origin).ok_or(RouteError::UnknownNode(origin))?;
    let d = topology.try_node(destination).ok_or(RouteError::UnknownNode(destination))?;
    if !o.is_fringe() || o.is_incoming() {
        return Err(RouteError::NotOutgoingFringe(origin));
    }
    if !d.is_fringe() || !d.is_incoming() {
        return Err(RouteError::NotIncomingFringe(destination));
    }
    if o.intersection == d.intersection {
        return Err(RouteError::SameIntersection { origin, destination });
    }
    Ok(())
}

// ── MonotoneRouter ────────────────────────────────────────────────────────────

/// Random minimal-length path through the grid.
///
/// The vertical and horizontal moves needed to get from the origin's inner
/// neighbour to the destination's inner neighbour are shuffled uniformly, so
/// two vehicles with the same endpoints may turn at different intersections.
/// Moves never backtrack, so every route has length equal to the Manhattan
/// distance plus the two boundary links.
pub struct MonotoneRouter;

impl RouteSynthesizer for MonotoneRouter {
    fn synthesize(
        &self,
        topology:    &GridTopology,
        origin:      NodeId,
        destination: NodeId,
        rng:         &mut SimRng,
    ) -> RouteResult<Route> {
        check_endpoints(topology, origin, destination)?;
        let directions = route_directions(topology, origin, destination, rng);
        walk(topology, origin, destination, directions)
    }
}

/// Origin facing, shuffled interior moves, then the destination approach.
fn route_directions(
    topology:    &GridTopology,
    origin:      NodeId,
    destination: NodeId,
    rng:         &mut SimRng,
) -> Vec<Direction> {
    let start = topology.intersection(topology.inner_neighbour(origin)).coord;
    let end = topology.intersection(topology.inner_neighbour(destination)).coord;
    let (d_row, d_col) = (end.row - start.row, end.col - start.col);

    let vertical = if d_row >= 0 { Direction::S } else { Direction::N };
    let horizontal = if d_col >= 0 { Direction::E } else { Direction::W };
    let mut moves: Vec<Direction> = std::iter::repeat_n(vertical, d_row.unsigned_abs() as usize)
        .chain(std::iter::repeat_n(horizontal, d_col.unsigned_abs() as usize))
        .collect();
    rng.shuffle(&mut moves);

    let mut directions = Vec::with_capacity(moves.len() + 2);
    directions.push(topology.node(origin).direction());
    directions.extend(moves);
    directions.push(topology.node(destination).direction().opposite());
    directions
}

/// Follow `directions` link by link, choosing at each interior intersection
/// the maneuver that exits towards the next heading.
fn walk(
    topology:    &GridTopology,
    origin:      NodeId,
    destination: NodeId,
    directions:  Vec<Direction>,
) -> RouteResult<Route> {
    let mut steps = Vec::with_capacity(4 * directions.len());
    let mut min_travel_ticks = 0;
    let mut out_node = origin;
    let mut reached = origin;

    for (i, &heading) in directions.iter().enumerate() {
        let node = topology.node(out_node);
        if node.is_incoming() || node.direction() != heading {
            return Err(RouteError::Misaligned { node: out_node, expected: heading });
        }
        let link = topology.edge(node.link);
        steps.push(RouteStep::Node(out_node));
        steps.push(RouteStep::Edge(link.id));
        steps.push(RouteStep::Node(link.end));
        min_travel_ticks += link.transit_ticks;
        reached = link.end;

        let Some(&next) = directions.get(i + 1) else { break };
        let arrival = topology.node(link.end);
        let maneuver = arrival
            .key
            .direction
            .turn_towards(next)
            .and_then(|turn| arrival.turn_edge(turn))
            .ok_or(RouteError::NoTurn { node: link.end, toward: next })?;
        let maneuver = topology.edge(maneuver);
        steps.push(RouteStep::Edge(maneuver.id));
        min_travel_ticks += maneuver.transit_ticks;
        out_node = maneuver.end;
    }

    if reached != destination {
        return Err(RouteError::WrongTerminus { expected: destination, reached });
    }

    Ok(Route { steps, directions, min_travel_ticks })
}
