//! The immutable grid: intersections, directional nodes, and edges.
//!
//! # Data layout
//!
//! Three `Vec` arenas indexed by `IntersectionId`, `NodeId` and `EdgeId`.
//! Each node stores the IDs of its incident edges and each edge the IDs of
//! its endpoint nodes, so every neighbour lookup is a single index.
//!
//! ```text
//!            col 0    1 .. L    L+1
//!  row 0       ·    fringe(S)     ·
//!  1 .. H  fringe(E) interior  fringe(W)
//!  H+1         ·    fringe(N)     ·
//! ```
//!
//! Corner cells do not exist.  Fringe intersections carry one incoming and
//! one outgoing node facing the interior; interior intersections carry an
//! incoming/outgoing pair on every side.

use std::fmt;

use rustc_hash::FxHashMap;

use gt_core::{Direction, EdgeId, IntersectionId, NodeId, Point, Turn};

// ── Coord ────────────────────────────────────────────────────────────────────

/// Grid cell of an intersection: `row` from the top, `col` from the left.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    #[inline]
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The neighbouring cell on side `dir`.
    #[inline]
    pub fn step(self, dir: Direction) -> Self {
        let (dr, dc) = dir.offset();
        Self::new(self.row + dr, self.col + dc)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ── Intersection ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Intersection {
    pub id:       IntersectionId,
    pub coord:    Coord,
    pub fringe:   bool,
    pub location: Point,
}

// ── Node ─────────────────────────────────────────────────────────────────────

/// Structural identity of a node.  Unique within a topology.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeKey {
    pub coord:     Coord,
    pub direction: Direction,
    pub incoming:  bool,
    pub fringe:    bool,
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}{}",
            self.coord,
            self.direction,
            if self.incoming { "in" } else { "out" },
            if self.fringe { " (fringe)" } else { "" },
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id:           NodeId,
    pub key:          NodeKey,
    pub intersection: IntersectionId,
    pub location:     Point,

    /// The node's link to the neighbouring intersection: the approach edge
    /// ending here for incoming nodes, the one starting here for outgoing
    /// nodes.
    pub link: EdgeId,

    /// Maneuver edges out of an interior incoming node, indexed by
    /// [`Turn::index`].  `INVALID` everywhere else.
    pub turns: [EdgeId; 3],
}

impl Node {
    #[inline]
    pub fn direction(&self) -> Direction {
        self.key.direction
    }

    #[inline]
    pub fn is_incoming(&self) -> bool {
        self.key.incoming
    }

    #[inline]
    pub fn is_fringe(&self) -> bool {
        self.key.fringe
    }

    /// Interior incoming nodes are the only ones that hold turn queues.
    #[inline]
    pub fn is_signalled(&self) -> bool {
        self.key.incoming && !self.key.fringe
    }

    #[inline]
    pub fn turn_edge(&self, turn: Turn) -> Option<EdgeId> {
        let e = self.turns[turn.index()];
        e.is_valid().then_some(e)
    }

    /// Which turn `edge` is from this node, if it is one of its maneuvers.
    pub fn turn_of(&self, edge: EdgeId) -> Option<Turn> {
        Turn::ALL.into_iter().find(|t| self.turns[t.index()] == edge && edge.is_valid())
    }
}

// ── Edge ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub id:            EdgeId,
    pub start:         NodeId,
    pub end:           NodeId,
    /// `true` for a maneuver inside one intersection.
    pub interior:      bool,
    pub transit_ticks: u64,
}

// ── GridTopology ─────────────────────────────────────────────────────────────

/// The complete, immutable grid network.
///
/// Do not construct directly; use [`TopologyBuilder`](crate::TopologyBuilder).
#[derive(Clone, Debug, PartialEq)]
pub struct GridTopology {
    pub height: u32,
    pub width:  u32,

    pub intersections: Vec<Intersection>,
    pub nodes:         Vec<Node>,
    pub edges:         Vec<Edge>,

    // ── Precomputed index lists ───────────────────────────────────────────
    pub(crate) lookup:            FxHashMap<NodeKey, NodeId>,
    pub(crate) interior:          Vec<IntersectionId>,
    pub(crate) outgoing_fringe:   Vec<NodeId>,
    pub(crate) incoming_fringe:   Vec<NodeId>,
    pub(crate) signalled_nodes:   Vec<NodeId>,
}

impl GridTopology {
    // ── Element access ────────────────────────────────────────────────────

    #[inline]
    pub fn intersection(&self, id: IntersectionId) -> &Intersection {
        &self.intersections[id.index()]
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Checked lookup for IDs that did not come from this topology.
    #[inline]
    pub fn try_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    /// Find a node by its structural key.  O(1).
    #[inline]
    pub fn find_node(&self, key: &NodeKey) -> Option<NodeId> {
        self.lookup.get(key).copied()
    }

    // ── Counts ────────────────────────────────────────────────────────────

    pub fn intersection_count(&self) -> usize {
        self.intersections.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // ── Index lists ───────────────────────────────────────────────────────

    /// Interior (signalled) intersections in row-major order.
    pub fn interior_intersections(&self) -> &[IntersectionId] {
        &self.interior
    }

    /// Fringe intersections: top row, bottom row, left column, right column.
    pub fn fringe_intersections(&self) -> impl Iterator<Item = IntersectionId> + '_ {
        self.intersections.iter().filter(|i| i.fringe).map(|i| i.id)
    }

    /// Valid spawn origins.
    pub fn outgoing_fringe_nodes(&self) -> &[NodeId] {
        &self.outgoing_fringe
    }

    /// Valid trip destinations.
    pub fn incoming_fringe_nodes(&self) -> &[NodeId] {
        &self.incoming_fringe
    }

    /// Interior incoming nodes, the only nodes with turn queues.
    pub fn signalled_nodes(&self) -> &[NodeId] {
        &self.signalled_nodes
    }

    // ── Graph queries ─────────────────────────────────────────────────────

    #[inline]
    pub fn start_of(&self, edge: EdgeId) -> &Node {
        self.node(self.edge(edge).start)
    }

    #[inline]
    pub fn end_of(&self, edge: EdgeId) -> &Node {
        self.node(self.edge(edge).end)
    }

    /// The interior intersection one step inward from a fringe node.
    ///
    /// For an outgoing fringe node this is where its link leads; for an
    /// incoming fringe node, where its link comes from.
    pub fn inner_neighbour(&self, fringe_node: NodeId) -> IntersectionId {
        let node = self.node(fringe_node);
        let link = self.edge(node.link);
        let other = if node.is_incoming() { link.start } else { link.end };
        self.node(other).intersection
    }

    /// The intersection's coordinate for a node.
    #[inline]
    pub fn coord_of(&self, node: NodeId) -> Coord {
        self.node(node).key.coord
    }

    /// Sum of `transit_ticks` over a set of edges.
    pub fn transit_sum(&self, edges: impl IntoIterator<Item = EdgeId>) -> u64 {
        edges.into_iter().map(|e| self.edge(e).transit_ticks).sum()
    }
}
