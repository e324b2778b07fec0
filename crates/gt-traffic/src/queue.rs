//! Left-turn and straight queues at interior incoming nodes.

use std::collections::VecDeque;

use gt_core::{NodeId, QueueDiscipline, Turn, VehicleId};
use gt_network::GridTopology;

use crate::{TrafficError, TrafficResult};

/// The two signalled queues of one node.  Vehicles join at the back.
#[derive(Clone, Debug, Default)]
pub struct TurnQueues {
    left:     VecDeque<VehicleId>,
    straight: VecDeque<VehicleId>,
}

impl TurnQueues {
    fn lane(&self, turn: Turn) -> Option<&VecDeque<VehicleId>> {
        match turn {
            Turn::Left     => Some(&self.left),
            Turn::Straight => Some(&self.straight),
            Turn::Right    => None,
        }
    }

    fn lane_mut(&mut self, turn: Turn) -> Option<&mut VecDeque<VehicleId>> {
        match turn {
            Turn::Left     => Some(&mut self.left),
            Turn::Straight => Some(&mut self.straight),
            Turn::Right    => None,
        }
    }

    pub fn len(&self, turn: Turn) -> usize {
        self.lane(turn).map_or(0, VecDeque::len)
    }

    pub fn total(&self) -> usize {
        self.left.len() + self.straight.len()
    }

    /// Vehicles in `turn`'s queue, front (oldest) first.
    pub fn iter(&self, turn: Turn) -> impl Iterator<Item = VehicleId> + '_ {
        self.lane(turn).into_iter().flatten().copied()
    }
}

/// Turn queues for every signalled node, indexed by `NodeId`.
#[derive(Clone, Debug)]
pub struct QueueStore {
    queues:     Vec<Option<TurnQueues>>,
    discipline: QueueDiscipline,
}

impl QueueStore {
    pub fn new(topology: &GridTopology, discipline: QueueDiscipline) -> Self {
        let mut queues = vec![None; topology.node_count()];
        for &n in topology.signalled_nodes() {
            queues[n.index()] = Some(TurnQueues::default());
        }
        Self { queues, discipline }
    }

    #[inline]
    pub fn discipline(&self) -> QueueDiscipline {
        self.discipline
    }

    #[inline]
    pub fn get(&self, node: NodeId) -> Option<&TurnQueues> {
        self.queues.get(node.index()).and_then(Option::as_ref)
    }

    pub fn enqueue(&mut self, node: NodeId, turn: Turn, vehicle: VehicleId) -> TrafficResult<()> {
        self.queues
            .get_mut(node.index())
            .and_then(Option::as_mut)
            .and_then(|q| q.lane_mut(turn))
            .ok_or(TrafficError::NotAQueueNode(node))?
            .push_back(vehicle);
        Ok(())
    }

    /// Take the next vehicle to release from `turn`'s queue at `node`.
    pub fn pop(&mut self, node: NodeId, turn: Turn) -> Option<VehicleId> {
        let discipline = self.discipline;
        let lane = self.queues.get_mut(node.index())?.as_mut()?.lane_mut(turn)?;
        match discipline {
            QueueDiscipline::Fifo => lane.pop_front(),
            QueueDiscipline::Lifo => lane.pop_back(),
        }
    }

    pub fn depth(&self, node: NodeId, turn: Turn) -> usize {
        self.get(node).map_or(0, |q| q.len(turn))
    }

    /// Vehicles waiting across all nodes.
    pub fn total_queued(&self) -> usize {
        self.queues.iter().flatten().map(TurnQueues::total).sum()
    }
}
