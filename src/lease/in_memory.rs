use crate::lease::{Lease, LeaseError, LeaseId, Lessor};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::time::{Duration, Instant};

// Lease table kept only in memory. Good enough for a single node and for exercising the forwarding
// path; a real lessor persists grants through the replicated log.
pub struct InMemoryLessor {
    leases: Mutex<HashMap<LeaseId, LeaseEntry>>,
}

struct LeaseEntry {
    ttl: i64,
    expiry: Instant,
    keys: Vec<String>,
}

impl LeaseEntry {
    fn refresh(&mut self, now: Instant) {
        self.expiry = now + Duration::from_secs(self.ttl.max(0) as u64);
    }
}

impl InMemoryLessor {
    pub fn new() -> Self {
        InMemoryLessor {
            leases: Mutex::new(HashMap::new()),
        }
    }

    pub fn grant(&self, id: LeaseId, ttl: i64) -> Result<Lease, LeaseError> {
        let mut leases = self.lock();
        if leases.contains_key(&id) {
            return Err(LeaseError::LeaseExists);
        }

        let now = Instant::now();
        let mut entry = LeaseEntry {
            ttl,
            expiry: now,
            keys: Vec::new(),
        };
        entry.refresh(now);
        let lease = Self::snapshot(id, &entry, now);
        leases.insert(id, entry);

        Ok(lease)
    }

    pub fn revoke(&self, id: LeaseId) -> Result<(), LeaseError> {
        self.lock().remove(&id).map(|_| ()).ok_or(LeaseError::NotFound)
    }

    /// Attaches `key` to the lease. Keys keep attachment order; attaching twice is a no-op.
    pub fn attach(&self, id: LeaseId, key: impl Into<String>) -> Result<(), LeaseError> {
        let mut leases = self.lock();
        let entry = leases.get_mut(&id).ok_or(LeaseError::NotFound)?;
        let key = key.into();
        if !entry.keys.contains(&key) {
            entry.keys.push(key);
        }

        Ok(())
    }

    fn snapshot(id: LeaseId, entry: &LeaseEntry, now: Instant) -> Lease {
        Lease::new(
            id,
            entry.ttl,
            entry.expiry.saturating_duration_since(now),
            entry.keys.clone(),
        )
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<LeaseId, LeaseEntry>> {
        self.leases.lock().expect("InMemoryLessor mutex guard poison")
    }
}

impl Default for InMemoryLessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Lessor for InMemoryLessor {
    fn renew(&self, id: LeaseId) -> Result<i64, LeaseError> {
        let now = Instant::now();
        let mut leases = self.lock();
        let entry = leases.get_mut(&id).ok_or(LeaseError::NotFound)?;
        if entry.expiry <= now {
            return Err(LeaseError::Expired);
        }
        entry.refresh(now);

        Ok(entry.ttl)
    }

    fn lookup(&self, id: LeaseId) -> Option<Lease> {
        let now = Instant::now();
        self.lock().get(&id).map(|entry| Self::snapshot(id, entry, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_renew_lookup() {
        let lessor = InMemoryLessor::new();
        let id = LeaseId::new(7);

        lessor.grant(id, 30).unwrap();
        assert_eq!(lessor.grant(id, 30), Err(LeaseError::LeaseExists));

        lessor.attach(id, "a").unwrap();
        lessor.attach(id, "b").unwrap();
        lessor.attach(id, "a").unwrap();

        assert_eq!(lessor.renew(id), Ok(30));

        let lease = lessor.lookup(id).unwrap();
        assert_eq!(lease.ttl(), 30);
        assert_eq!(lease.keys(), &["a".to_string(), "b".to_string()][..]);
        assert!(lease.remaining() <= Duration::from_secs(30));
        assert!(lease.remaining() > Duration::from_secs(25));
    }

    #[test]
    fn unknown_lease() {
        let lessor = InMemoryLessor::new();
        let id = LeaseId::new(1);

        assert_eq!(lessor.renew(id), Err(LeaseError::NotFound));
        assert_eq!(lessor.lookup(id), None);
        assert_eq!(lessor.attach(id, "k"), Err(LeaseError::NotFound));
        assert_eq!(lessor.revoke(id), Err(LeaseError::NotFound));
    }

    #[test]
    fn revoked_lease_is_gone() {
        let lessor = InMemoryLessor::new();
        let id = LeaseId::new(2);
        lessor.grant(id, 10).unwrap();
        lessor.revoke(id).unwrap();

        assert_eq!(lessor.lookup(id), None);
    }

    #[test]
    fn zero_ttl_lease_cannot_be_renewed() {
        let lessor = InMemoryLessor::new();
        let id = LeaseId::new(3);
        lessor.grant(id, 0).unwrap();

        assert_eq!(lessor.renew(id), Err(LeaseError::Expired));
    }
}
