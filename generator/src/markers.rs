use std::collections::BTreeMap;

use log::trace;
use slope_track::{SpawnRequest, Spawner};

/// Spawner for the offline renderer: keeps every live request so the final
/// frame can draw it.
#[derive(Debug, Default)]
pub struct MarkerSpawner {
    next: usize,
    live: BTreeMap<usize, SpawnRequest>,
    pub spawned: usize,
    pub destroyed: usize,
}

impl MarkerSpawner {
    pub fn live(&self) -> impl Iterator<Item = &SpawnRequest> {
        self.live.values()
    }
}

impl Spawner for MarkerSpawner {
    type Handle = usize;

    fn spawn(&mut self, request: &SpawnRequest) -> Option<usize> {
        let handle = self.next;
        self.next += 1;
        self.live.insert(handle, *request);
        self.spawned += 1;
        trace!("spawn #{} {:?} at {:?}", handle, request.kind, request.position);
        Some(handle)
    }

    fn destroy(&mut self, handle: usize) {
        if self.live.remove(&handle).is_some() {
            self.destroyed += 1;
        }
    }
}
