use std::fmt;
use tokio::time::Duration;

#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct LeaseId(i64);

impl LeaseId {
    pub fn new(id: i64) -> Self {
        LeaseId(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Debug for LeaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Lease is a snapshot of a lease as held by the lessor.
#[derive(Clone, Debug, PartialEq)]
pub struct Lease {
    pub(crate) id: LeaseId,
    pub(crate) ttl: i64,
    pub(crate) remaining: Duration,
    pub(crate) keys: Vec<String>,
}

impl Lease {
    pub fn new(id: LeaseId, ttl: i64, remaining: Duration, keys: Vec<String>) -> Self {
        Lease {
            id,
            ttl,
            remaining,
            keys,
        }
    }

    pub fn id(&self) -> LeaseId {
        self.id
    }

    /// Granted TTL in seconds.
    pub fn ttl(&self) -> i64 {
        self.ttl
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LeaseError {
    #[error("lease not found")]
    NotFound,
    #[error("lease already exists")]
    LeaseExists,
    #[error("lease expired")]
    Expired,
}

/// Lessor owns the lease table. Implementations do their own locking.
pub trait Lessor: Send + Sync {
    /// Renews the lease and returns its TTL in seconds.
    fn renew(&self, id: LeaseId) -> Result<i64, LeaseError>;

    fn lookup(&self, id: LeaseId) -> Option<Lease>;
}

impl<L: Lessor + ?Sized> Lessor for std::sync::Arc<L> {
    fn renew(&self, id: LeaseId) -> Result<i64, LeaseError> {
        (**self).renew(id)
    }

    fn lookup(&self, id: LeaseId) -> Option<Lease> {
        (**self).lookup(id)
    }
}
