//! Construct a [`GridTopology`] for an `H × L` block of signalled
//! intersections.
//!
//! Construction runs in three passes (intersections, nodes, edges) and
//! wires every node's edge references as edges are created.  Wiring and edge
//! construction are checked; any inconsistency is returned as a
//! [`TopologyError`] and the partially built graph is discarded.

use log::debug;
use rustc_hash::FxHashMap;

use gt_core::{Direction, EdgeId, GridConfig, IntersectionId, NodeId, Point, Turn};

use crate::topology::{Coord, Edge, GridTopology, Intersection, Node, NodeKey};
use crate::{TopologyError, TopologyResult};

/// Offset of a node from its intersection centre towards its own side.
const NODE_SIDE_OFFSET: f32 = 0.20;
/// Sideways offset separating a side's incoming and outgoing node.
const NODE_LANE_OFFSET: f32 = 0.08;

/// Builder for [`GridTopology`].
///
/// # Example
///
/// ```
/// use gt_network::TopologyBuilder;
///
/// let grid = TopologyBuilder::new(2, 3).build().unwrap();
/// assert_eq!(grid.interior_intersections().len(), 6);
/// assert_eq!(grid.fringe_intersections().count(), 2 * 2 + 2 * 3);
/// ```
pub struct TopologyBuilder {
    height:     u32,
    width:      u32,
    link_ticks: u64,
    turn_ticks: u64,
}

/// Mutable state threaded through the three construction passes.
struct Draft {
    height:        i32,
    width:         i32,
    intersections: Vec<Intersection>,
    by_coord:      FxHashMap<Coord, IntersectionId>,
    nodes:         Vec<Node>,
    lookup:        FxHashMap<NodeKey, NodeId>,
    edges:         Vec<Edge>,
}

impl TopologyBuilder {
    /// A builder for `height` rows and `width` columns of interior
    /// intersections, with the default transit times.
    pub fn new(height: u32, width: u32) -> Self {
        let defaults = GridConfig::default();
        Self {
            height,
            width,
            link_ticks: defaults.link_ticks,
            turn_ticks: defaults.turn_ticks,
        }
    }

    /// A builder using the dimensions and transit times of `config`.
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            height:     config.height,
            width:      config.width,
            link_ticks: config.link_ticks,
            turn_ticks: config.turn_ticks,
        }
    }

    /// Transit ticks of links between adjacent intersections.
    pub fn link_ticks(mut self, ticks: u64) -> Self {
        self.link_ticks = ticks;
        self
    }

    /// Transit ticks of maneuver edges inside an intersection.
    pub fn turn_ticks(mut self, ticks: u64) -> Self {
        self.turn_ticks = ticks;
        self
    }

    /// Consume the builder and produce the wired topology.
    ///
    /// Node and edge counts are O(H·L).
    pub fn build(self) -> TopologyResult<GridTopology> {
        GridConfig {
            height:     self.height,
            width:      self.width,
            link_ticks: self.link_ticks,
            turn_ticks: self.turn_ticks,
            ..GridConfig::default()
        }
        .validate()?;

        let mut draft = Draft {
            height:        self.height as i32,
            width:         self.width as i32,
            intersections: Vec::new(),
            by_coord:      FxHashMap::default(),
            nodes:         Vec::new(),
            lookup:        FxHashMap::default(),
            edges:         Vec::new(),
        };

        draft.add_intersections();
        draft.add_nodes();
        self.add_edges(&mut draft)?;

        let interior: Vec<IntersectionId> = draft
            .intersections
            .iter()
            .filter(|i| !i.fringe)
            .map(|i| i.id)
            .collect();
        let select = |pred: fn(&NodeKey) -> bool| -> Vec<NodeId> {
            draft.nodes.iter().filter(|n| pred(&n.key)).map(|n| n.id).collect()
        };
        let outgoing_fringe = select(|k| k.fringe && !k.incoming);
        let incoming_fringe = select(|k| k.fringe && k.incoming);
        let signalled_nodes = select(|k| !k.fringe && k.incoming);

        debug!(
            "built {}x{} grid: {} intersections, {} nodes, {} edges",
            self.height,
            self.width,
            draft.intersections.len(),
            draft.nodes.len(),
            draft.edges.len(),
        );

        Ok(GridTopology {
            height:        self.height,
            width:         self.width,
            intersections: draft.intersections,
            nodes:         draft.nodes,
            edges:         draft.edges,
            lookup:        draft.lookup,
            interior,
            outgoing_fringe,
            incoming_fringe,
            signalled_nodes,
        })
    }

    // ── Pass 3: edges ─────────────────────────────────────────────────────

    fn add_edges(&self, draft: &mut Draft) -> TopologyResult<()> {
        // Interior incoming nodes: one approach link plus three maneuvers.
        let interior_incoming: Vec<NodeId> = draft
            .nodes
            .iter()
            .filter(|n| n.key.incoming && !n.key.fringe)
            .map(|n| n.id)
            .collect();

        for node in interior_incoming {
            let key = draft.nodes[node.index()].key;
            let from_coord = key.coord.step(key.direction);
            let from = draft.require(NodeKey {
                coord:     from_coord,
                direction: key.direction.opposite(),
                incoming:  false,
                fringe:    draft.is_fringe(from_coord),
            })?;
            let approach = draft.add_edge(from, node, false, self.link_ticks)?;
            draft.wire_approach(node, approach)?;

            let mut turns = [EdgeId::INVALID; 3];
            for turn in Turn::ALL {
                let exit = draft.require(NodeKey {
                    coord:     key.coord,
                    direction: key.direction.exit(turn),
                    incoming:  false,
                    fringe:    false,
                })?;
                turns[turn.index()] = draft.add_edge(node, exit, true, self.turn_ticks)?;
            }
            draft.wire_turns(node, turns)?;
        }

        // Incoming fringe nodes: only the link from the adjacent interior
        // intersection.
        let fringe_incoming: Vec<NodeId> = draft
            .nodes
            .iter()
            .filter(|n| n.key.incoming && n.key.fringe)
            .map(|n| n.id)
            .collect();

        for node in fringe_incoming {
            let key = draft.nodes[node.index()].key;
            let from = draft.require(NodeKey {
                coord:     key.coord.step(key.direction),
                direction: key.direction.opposite(),
                incoming:  false,
                fringe:    false,
            })?;
            let approach = draft.add_edge(from, node, false, self.link_ticks)?;
            draft.wire_approach(node, approach)?;
        }

        Ok(())
    }
}

impl Draft {
    fn is_fringe(&self, c: Coord) -> bool {
        c.row == 0 || c.row == self.height + 1 || c.col == 0 || c.col == self.width + 1
    }

    // ── Pass 1: intersections ─────────────────────────────────────────────

    fn add_intersections(&mut self) {
        let (h, l) = (self.height, self.width);
        let fringe = (1..=l)
            .map(|c| Coord::new(0, c))
            .chain((1..=l).map(|c| Coord::new(h + 1, c)))
            .chain((1..=h).map(|r| Coord::new(r, 0)))
            .chain((1..=h).map(|r| Coord::new(r, l + 1)));
        let interior = (1..=h).flat_map(|r| (1..=l).map(move |c| Coord::new(r, c)));

        let coords: Vec<(Coord, bool)> = fringe
            .map(|c| (c, true))
            .chain(interior.map(|c| (c, false)))
            .collect();
        for (coord, fringe) in coords {
            let id = IntersectionId(self.intersections.len() as u32);
            self.intersections.push(Intersection {
                id,
                coord,
                fringe,
                location: Point::of_cell(coord.row, coord.col),
            });
            self.by_coord.insert(coord, id);
        }
    }

    // ── Pass 2: nodes ─────────────────────────────────────────────────────

    fn add_nodes(&mut self) {
        let (h, l) = (self.height, self.width);
        let mut keys = Vec::new();
        for inter in &self.intersections {
            let c = inter.coord;
            let sides: &[Direction] = if !inter.fringe {
                &Direction::ALL
            } else if c.row == 0 {
                &[Direction::S]
            } else if c.row == h + 1 {
                &[Direction::N]
            } else if c.col == 0 {
                &[Direction::E]
            } else {
                debug_assert_eq!(c.col, l + 1);
                &[Direction::W]
            };
            for &direction in sides {
                for incoming in [true, false] {
                    keys.push((inter.id, NodeKey { coord: c, direction, incoming, fringe: inter.fringe }));
                }
            }
        }

        for (intersection, key) in keys {
            let id = NodeId(self.nodes.len() as u32);
            let centre = self.intersections[intersection.index()].location;
            let lane_side = if key.incoming { key.direction.right() } else { key.direction.left() };
            self.nodes.push(Node {
                id,
                key,
                intersection,
                location: centre
                    .step(key.direction, NODE_SIDE_OFFSET)
                    .step(lane_side, NODE_LANE_OFFSET),
                link:  EdgeId::INVALID,
                turns: [EdgeId::INVALID; 3],
            });
            self.lookup.insert(key, id);
        }
    }

    // ── Edge creation & wiring ────────────────────────────────────────────

    fn require(&self, key: NodeKey) -> TopologyResult<NodeId> {
        self.lookup.get(&key).copied().ok_or(TopologyError::MissingNode(key))
    }

    /// Create an edge, rejecting an interior flag that contradicts whether
    /// its endpoints share an intersection.
    fn add_edge(
        &mut self,
        start:    NodeId,
        end:      NodeId,
        interior: bool,
        ticks:    u64,
    ) -> TopologyResult<EdgeId> {
        let id = EdgeId(self.edges.len() as u32);
        let same = self.nodes[start.index()].intersection == self.nodes[end.index()].intersection;
        if same != interior {
            return Err(TopologyError::InteriorFlagMismatch { edge: id, start, end });
        }
        self.edges.push(Edge { id, start, end, interior, transit_ticks: ticks });
        Ok(id)
    }

    /// Record `edge` as the link of both its endpoints.  `node` must be the
    /// edge's (incoming) end and the edge's start must be an outgoing node.
    fn wire_approach(&mut self, node: NodeId, edge: EdgeId) -> TopologyResult<()> {
        let e = &self.edges[edge.index()];
        let start = e.start;
        if e.end != node || !self.nodes[node.index()].key.incoming {
            return Err(TopologyError::Miswired { node, edge, role: "end" });
        }
        if self.nodes[start.index()].key.incoming {
            return Err(TopologyError::Miswired { node: start, edge, role: "start" });
        }
        self.nodes[node.index()].link = edge;
        self.nodes[start.index()].link = edge;
        Ok(())
    }

    /// Record the three maneuver edges of an interior incoming node.
    fn wire_turns(&mut self, node: NodeId, turns: [EdgeId; 3]) -> TopologyResult<()> {
        let n = &self.nodes[node.index()];
        for (turn, &edge) in Turn::ALL.iter().zip(&turns) {
            let e = &self.edges[edge.index()];
            let exit = &self.nodes[e.end.index()];
            let consistent = e.start == node
                && n.key.incoming
                && !n.key.fringe
                && exit.key.direction == n.key.direction.exit(*turn);
            if !consistent {
                return Err(TopologyError::Miswired { node, edge, role: "start" });
            }
        }
        self.nodes[node.index()].turns = turns;
        Ok(())
    }
}
