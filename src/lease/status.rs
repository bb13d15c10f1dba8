use http::StatusCode;

pub const LEASE_PREFIX: &str = "/leases";
pub const LEASE_INTERNAL_PREFIX: &str = "/leases/internal";

pub(crate) const CONTENT_TYPE_PROTOBUF: &str = "application/protobuf";

pub(crate) const APPLY_TIMEOUT_MESSAGE: &str = "waiting for node to catch up its applied index has timed out";

/// Every way the lease handler can finish a request. Each maps to exactly one status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ForwardOutcome {
    Success,
    MalformedRequest,
    MethodNotAllowed,
    LeaseNotFound,
    ApplyTimeout,
    ExecutionFailed,
    EncodeFailed,
    ServerStopped,
}

impl ForwardOutcome {
    pub(crate) fn status_code(self) -> StatusCode {
        match self {
            ForwardOutcome::Success => StatusCode::OK,
            ForwardOutcome::MalformedRequest => StatusCode::BAD_REQUEST,
            ForwardOutcome::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ForwardOutcome::LeaseNotFound => StatusCode::NOT_FOUND,
            ForwardOutcome::ApplyTimeout => StatusCode::REQUEST_TIMEOUT,
            // Same as malformed: the lessor refused the request for a reason of its own.
            ForwardOutcome::ExecutionFailed => StatusCode::BAD_REQUEST,
            ForwardOutcome::EncodeFailed => StatusCode::INTERNAL_SERVER_ERROR,
            ForwardOutcome::ServerStopped => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// How the forwarding client reads a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResponseClass {
    Success,
    ApplyTimeout,
    LeaseNotFound,
    /// Carries the body back to the caller as the error message.
    Failure,
}

pub(crate) fn classify(status: StatusCode) -> ResponseClass {
    match status {
        StatusCode::OK => ResponseClass::Success,
        StatusCode::REQUEST_TIMEOUT => ResponseClass::ApplyTimeout,
        StatusCode::NOT_FOUND => ResponseClass::LeaseNotFound,
        _ => ResponseClass::Failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_OUTCOMES: [ForwardOutcome; 8] = [
        ForwardOutcome::Success,
        ForwardOutcome::MalformedRequest,
        ForwardOutcome::MethodNotAllowed,
        ForwardOutcome::LeaseNotFound,
        ForwardOutcome::ApplyTimeout,
        ForwardOutcome::ExecutionFailed,
        ForwardOutcome::EncodeFailed,
        ForwardOutcome::ServerStopped,
    ];

    #[test]
    fn every_server_outcome_reads_back_as_intended() {
        for outcome in ALL_OUTCOMES.iter().copied() {
            let expected = match outcome {
                ForwardOutcome::Success => ResponseClass::Success,
                ForwardOutcome::LeaseNotFound => ResponseClass::LeaseNotFound,
                ForwardOutcome::ApplyTimeout => ResponseClass::ApplyTimeout,
                ForwardOutcome::MalformedRequest
                | ForwardOutcome::MethodNotAllowed
                | ForwardOutcome::ExecutionFailed
                | ForwardOutcome::EncodeFailed
                | ForwardOutcome::ServerStopped => ResponseClass::Failure,
            };
            assert_eq!(classify(outcome.status_code()), expected, "{:?}", outcome);
        }
    }

    #[test]
    fn only_three_statuses_are_special() {
        for code in 100..600u16 {
            let status = match StatusCode::from_u16(code) {
                Ok(s) => s,
                Err(_) => continue,
            };
            let expected = match code {
                200 => ResponseClass::Success,
                404 => ResponseClass::LeaseNotFound,
                408 => ResponseClass::ApplyTimeout,
                _ => ResponseClass::Failure,
            };
            assert_eq!(classify(status), expected, "status {}", code);
        }
    }
}
