//! The `VehicleStore`: every vehicle ever spawned, indexed by `VehicleId`.

use gt_core::VehicleId;

use crate::Vehicle;

/// Vehicles are never removed; finished ones stay for statistics.  `active`
/// lists the unfinished ones in ascending ID order, which is the motion
/// order.
#[derive(Clone, Debug, Default)]
pub struct VehicleStore {
    vehicles: Vec<Vehicle>,
    active:   Vec<VehicleId>,
}

impl VehicleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// ID the next inserted vehicle must carry.
    #[inline]
    pub fn next_id(&self) -> VehicleId {
        VehicleId(self.vehicles.len() as u32)
    }

    /// Append `vehicle`.  Its ID must be [`next_id`](Self::next_id).
    pub fn insert(&mut self, vehicle: Vehicle) -> VehicleId {
        debug_assert_eq!(vehicle.id, self.next_id());
        let id = vehicle.id;
        if !vehicle.is_finished() {
            self.active.push(id);
        }
        self.vehicles.push(vehicle);
        id
    }

    #[inline]
    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: VehicleId) -> Option<&mut Vehicle> {
        self.vehicles.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter()
    }

    pub fn active(&self) -> &[VehicleId] {
        &self.active
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn finished(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter().filter(|v| v.is_finished())
    }

    /// Drop finished vehicles from the active list.
    pub(crate) fn prune_active(&mut self) {
        let vehicles = &self.vehicles;
        self.active.retain(|id| !vehicles[id.index()].is_finished());
    }

    #[cfg(test)]
    pub(crate) fn push_active(&mut self, id: VehicleId) {
        self.active.push(id);
    }
}
