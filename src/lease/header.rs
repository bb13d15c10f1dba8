use crate::lease::ResponseHeader;
use std::sync::Arc;

/// RaftStatus exposes the bits of local consensus state that go into response headers.
pub trait RaftStatus: Send + Sync {
    fn term(&self) -> u64;
    fn revision(&self) -> i64;
}

/// HeaderFiller stamps responses with who answered and at what term/revision.
#[derive(Clone)]
pub struct HeaderFiller {
    cluster_id: u64,
    member_id: u64,
    status: Arc<dyn RaftStatus>,
}

impl HeaderFiller {
    pub fn new(cluster_id: u64, member_id: u64, status: Arc<dyn RaftStatus>) -> Self {
        HeaderFiller {
            cluster_id,
            member_id,
            status,
        }
    }

    /// Revision is only filled when the caller hasn't already set one.
    pub fn fill(&self, header: &mut ResponseHeader) {
        header.cluster_id = self.cluster_id;
        header.member_id = self.member_id;
        header.raft_term = self.status.term();
        if header.revision == 0 {
            header.revision = self.status.revision();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedStatus;

    impl RaftStatus for FixedStatus {
        fn term(&self) -> u64 {
            4
        }

        fn revision(&self) -> i64 {
            100
        }
    }

    #[test]
    fn fill_keeps_explicit_revision() {
        let filler = HeaderFiller::new(1, 2, Arc::new(FixedStatus));

        let mut fresh = ResponseHeader::default();
        filler.fill(&mut fresh);
        assert_eq!(
            fresh,
            ResponseHeader {
                cluster_id: 1,
                member_id: 2,
                revision: 100,
                raft_term: 4,
            }
        );

        let mut pinned = ResponseHeader {
            revision: 7,
            ..ResponseHeader::default()
        };
        filler.fill(&mut pinned);
        assert_eq!(pinned.revision, 7);
    }
}
