use tonic::{Code, Status};

#[derive(Debug, thiserror::Error)]
pub enum KvError {
    #[error("required revision has been compacted")]
    Compacted,
    #[error("permission denied")]
    PermissionDenied,
    #[error("invalid auth token")]
    InvalidAuthToken,
    #[error("request canceled")]
    Canceled,
    #[error("request deadline exceeded")]
    DeadlineExceeded,
    #[error("remote unavailable: {0}")]
    Unavailable(String),
    #[error("rpc error: {0}")]
    Rpc(Status),
}

/// Whether a failed call should stop the retry loop no matter what kind of operation it was.
/// Only an unreachable remote or an internal failure on its side is worth another try.
pub fn is_halt_error(status: &Status) -> bool {
    !matches!(status.code(), Code::Unavailable | Code::Internal)
}

/// Translates the wire status into what callers of `Kv` see.
pub(crate) fn to_err(status: Status) -> KvError {
    match status.code() {
        Code::OutOfRange => KvError::Compacted,
        Code::PermissionDenied => KvError::PermissionDenied,
        Code::Unauthenticated => KvError::InvalidAuthToken,
        Code::Cancelled => KvError::Canceled,
        Code::DeadlineExceeded => KvError::DeadlineExceeded,
        Code::Unavailable => KvError::Unavailable(status.message().to_string()),
        _ => KvError::Rpc(status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halting_classification_by_code() {
        let cases = vec![
            (Code::Ok, true),
            (Code::Cancelled, true),
            (Code::Unknown, true),
            (Code::InvalidArgument, true),
            (Code::DeadlineExceeded, true),
            (Code::NotFound, true),
            (Code::AlreadyExists, true),
            (Code::PermissionDenied, true),
            (Code::ResourceExhausted, true),
            (Code::FailedPrecondition, true),
            (Code::Aborted, true),
            (Code::OutOfRange, true),
            (Code::Unimplemented, true),
            (Code::Internal, false),
            (Code::Unavailable, false),
            (Code::DataLoss, true),
            (Code::Unauthenticated, true),
        ];

        for (code, halts) in cases {
            assert_eq!(is_halt_error(&Status::new(code, "x")), halts, "{:?}", code);
        }
    }

    #[test]
    fn translation() {
        assert!(matches!(to_err(Status::out_of_range("compacted")), KvError::Compacted));
        assert!(matches!(to_err(Status::permission_denied("")), KvError::PermissionDenied));
        assert!(matches!(to_err(Status::unauthenticated("")), KvError::InvalidAuthToken));
        assert!(matches!(to_err(Status::cancelled("")), KvError::Canceled));
        assert!(matches!(to_err(Status::deadline_exceeded("")), KvError::DeadlineExceeded));
        match to_err(Status::unavailable("no leader")) {
            KvError::Unavailable(msg) => assert_eq!(msg, "no leader"),
            other => panic!("unexpected {:?}", other),
        }
        match to_err(Status::invalid_argument("bad key")) {
            KvError::Rpc(status) => assert_eq!(status.code(), Code::InvalidArgument),
            other => panic!("unexpected {:?}", other),
        }
    }
}
