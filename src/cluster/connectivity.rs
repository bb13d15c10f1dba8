use crate::cluster::{MemberInfo, PeerActivity, ReplicaId};
use tokio::time::Instant;

/// ConnectivityOracle answers "have I been connected to enough of the cluster since T?" from the
/// transport's activity timestamps. It holds no state of its own; each answer is a snapshot that
/// may already be stale when the caller reads it.
pub struct ConnectivityOracle<T: PeerActivity> {
    my_replica_id: ReplicaId,
    transport: T,
}

impl<T: PeerActivity> ConnectivityOracle<T> {
    pub fn new(my_replica_id: ReplicaId, transport: T) -> Self {
        ConnectivityOracle {
            my_replica_id,
            transport,
        }
    }

    /// A remote counts as connected since `since` only if its stream came up strictly before it.
    pub fn is_connected_since(&self, remote: &ReplicaId, since: Instant) -> bool {
        match self.transport.active_since(remote) {
            Some(active_since) => active_since < since,
            None => false,
        }
    }

    /// Number of members (self included) we have been connected to since `since`.
    pub fn connected_since_count(&self, members: &[MemberInfo], since: Instant) -> usize {
        members
            .iter()
            .filter(|m| m.id == self.my_replica_id || self.is_connected_since(&m.id, since))
            .count()
    }

    pub fn is_connected_to_quorum_since(&self, members: &[MemberInfo], since: Instant) -> bool {
        self.connected_since_count(members, since) >= Self::quorum_size(members.len())
    }

    pub fn is_fully_connected_since(&self, members: &[MemberInfo], since: Instant) -> bool {
        self.connected_since_count(members, since) == members.len()
    }

    /// Picks the candidate whose connection has been up the longest. Disconnected candidates are
    /// skipped. Only a strictly earlier timestamp replaces the current pick, so on equal
    /// timestamps the first candidate in iteration order is kept.
    pub fn longest_connected<'a, I>(&self, candidates: I) -> Option<ReplicaId>
    where
        I: IntoIterator<Item = &'a ReplicaId>,
    {
        let mut longest: Option<(&ReplicaId, Instant)> = None;
        for id in candidates {
            let active_since = match self.transport.active_since(id) {
                Some(t) => t,
                None => continue,
            };

            match longest {
                Some((_, oldest)) if active_since >= oldest => {}
                _ => longest = Some((id, active_since)),
            }
        }

        longest.map(|(id, _)| id.clone())
    }

    fn quorum_size(num_members: usize) -> usize {
        (num_members / 2) + 1
    }
}
