use std::fmt;

/// ReplicaId identifies a member of the cluster. Opaque to this crate, only compared and hashed.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct ReplicaId(String);

impl ReplicaId {
    pub fn new(id: impl Into<String>) -> Self {
        ReplicaId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for ReplicaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ReplicaId {
    fn from(id: &str) -> Self {
        ReplicaId::new(id)
    }
}

#[derive(Clone, Debug)]
pub struct MemberInfo {
    pub id: ReplicaId,
    // Base URL other members use to reach this one, e.g. "http://10.0.0.1:2380".
    pub peer_url: String,
}

impl MemberInfo {
    pub fn new(id: ReplicaId, peer_url: impl Into<String>) -> Self {
        MemberInfo {
            id,
            peer_url: peer_url.into(),
        }
    }
}
