use crate::cluster::ReplicaId;
use std::collections::HashMap;
use std::sync::RwLock;
use tokio::time::Instant;

/// PeerActivity is the narrow view of the peer transport that connectivity checks need.
pub trait PeerActivity {
    /// Time since which the stream to `id` has been continuously up. `None` if the peer is
    /// unknown or not currently connected.
    fn active_since(&self, id: &ReplicaId) -> Option<Instant>;
}

impl<T: PeerActivity + ?Sized> PeerActivity for &T {
    fn active_since(&self, id: &ReplicaId) -> Option<Instant> {
        (**self).active_since(id)
    }
}

impl<T: PeerActivity + ?Sized> PeerActivity for std::sync::Arc<T> {
    fn active_since(&self, id: &ReplicaId) -> Option<Instant> {
        (**self).active_since(id)
    }
}

/// PeerActivityTable is the bookkeeping a transport does as peer streams go up and down.
#[derive(Default)]
pub struct PeerActivityTable {
    active: RwLock<HashMap<ReplicaId, Instant>>,
}

impl PeerActivityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `id` as connected at `at`. A peer that is already active keeps its original
    /// timestamp, since the connection has been up the whole time.
    pub fn activate(&self, id: ReplicaId, at: Instant) {
        self.active
            .write()
            .expect("PeerActivityTable.activate() lock poison")
            .entry(id)
            .or_insert(at);
    }

    pub fn deactivate(&self, id: &ReplicaId) {
        self.active
            .write()
            .expect("PeerActivityTable.deactivate() lock poison")
            .remove(id);
    }
}

impl PeerActivity for PeerActivityTable {
    fn active_since(&self, id: &ReplicaId) -> Option<Instant> {
        self.active
            .read()
            .expect("PeerActivityTable.active_since() lock poison")
            .get(id)
            .copied()
    }
}
