use crate::kv::clock::{Clock, RealClock};
use crate::kv::error::{is_halt_error, to_err};
use crate::kv::retry::RetryPolicy;
use crate::kv::{
    CallOptions, CompactResponse, DeleteRangeOp, DeleteResponse, GetResponse, KvError, KvRemote, Op, OpResponse,
    PutOp, PutResponse, RangeOp, TxnOp, TxnResponse,
};
use backoff::backoff::Backoff;
use tokio::time::Duration;
use tonic::Status;

/// Kv dispatches operations to the remote key-value service.
///
/// A failed attempt is retried only when the failure is transient and `Op::is_write` says the
/// operation is a read. Writes go out once: a write whose reply was lost may still have been
/// applied. Dropping the returned future abandons the in-flight call and any further retries.
pub struct Kv<R, C = RealClock> {
    logger: slog::Logger,
    remote: R,
    retry: RetryPolicy,
    clock: C,
}

impl<R: KvRemote> Kv<R> {
    pub fn new(logger: slog::Logger, remote: R, retry: RetryPolicy) -> Self {
        Kv::with_clock(logger, remote, retry, RealClock)
    }
}

impl<R: KvRemote, C: Clock> Kv<R, C> {
    pub(crate) fn with_clock(logger: slog::Logger, remote: R, retry: RetryPolicy, clock: C) -> Self {
        Kv {
            logger,
            remote,
            retry,
            clock,
        }
    }

    pub async fn do_op(&self, op: Op) -> Result<OpResponse, KvError> {
        let mut clock = self.clock.clone();
        let mut backoff = self.retry.backoff(self.clock.clone());
        let name = op_name(&op);
        let mut attempts: u64 = 0;

        loop {
            attempts += 1;
            let status = match self.attempt(&op).await {
                Ok(response) => return Ok(response),
                Err(status) => status,
            };

            if is_halt_error(&status) {
                slog::debug!(self.logger, "ClientWire - {} halted: {:?}", name, status);
                return Err(to_err(status));
            }
            if op.is_write() {
                slog::debug!(self.logger, "ClientWire - {} not retried: {:?}", name, status);
                return Err(to_err(status));
            }

            let delay = match backoff.next_backoff() {
                Some(delay) => delay,
                None => {
                    slog::warn!(
                        self.logger,
                        "Giving up on {} after {} attempts over {:?}: {:?}",
                        name,
                        attempts,
                        self.retry.max_wait(),
                        status
                    );
                    return Err(to_err(status));
                }
            };

            slog::debug!(self.logger, "ClientWire - {} attempt {} failed, retrying: {:?}", name, attempts, status);
            if delay > Duration::from_millis(0) {
                clock.sleep(delay).await;
            } else {
                tokio::task::yield_now().await;
            }
        }
    }

    /// Reads carry no client-side deadline; writes fail fast.
    pub async fn get(&self, op: RangeOp) -> Result<GetResponse, KvError> {
        match self.do_op(Op::Range(op)).await? {
            OpResponse::Get(response) => Ok(response),
            other => Err(mismatched("range", &other)),
        }
    }

    pub async fn put(&self, op: PutOp) -> Result<PutResponse, KvError> {
        match self.do_op(Op::Put(op)).await? {
            OpResponse::Put(response) => Ok(response),
            other => Err(mismatched("put", &other)),
        }
    }

    pub async fn delete(&self, op: DeleteRangeOp) -> Result<DeleteResponse, KvError> {
        match self.do_op(Op::DeleteRange(op)).await? {
            OpResponse::Delete(response) => Ok(response),
            other => Err(mismatched("delete_range", &other)),
        }
    }

    pub async fn txn(&self, op: TxnOp) -> Result<TxnResponse, KvError> {
        match self.do_op(Op::Txn(op)).await? {
            OpResponse::Txn(response) => Ok(response),
            other => Err(mismatched("txn", &other)),
        }
    }

    /// Discards history before `revision`. Issued once, never retried.
    pub async fn compact(&self, revision: i64, physical: bool) -> Result<CompactResponse, KvError> {
        self.remote
            .compact(revision, physical, CallOptions::fail_fast())
            .await
            .map_err(to_err)
    }

    async fn attempt(&self, op: &Op) -> Result<OpResponse, Status> {
        match op {
            Op::Range(op) => self
                .remote
                .range(op, CallOptions::wait_for_ready())
                .await
                .map(OpResponse::Get),
            Op::Put(op) => self.remote.put(op, CallOptions::fail_fast()).await.map(OpResponse::Put),
            Op::DeleteRange(op) => self
                .remote
                .delete_range(op, CallOptions::fail_fast())
                .await
                .map(OpResponse::Delete),
            Op::Txn(op) => self.remote.txn(op, CallOptions::fail_fast()).await.map(OpResponse::Txn),
        }
    }
}

fn op_name(op: &Op) -> &'static str {
    match op {
        Op::Range(_) => "range",
        Op::Put(_) => "put",
        Op::DeleteRange(_) => "delete_range",
        Op::Txn(_) => "txn",
    }
}

fn mismatched(name: &str, response: &OpResponse) -> KvError {
    KvError::Rpc(Status::internal(format!("{} answered with {:?}", name, response)))
}
