use crate::lease::LeaseId;

/// Op is one key-value operation, built ahead of time and dispatched with `Kv::do_op`.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Range(RangeOp),
    Put(PutOp),
    DeleteRange(DeleteRangeOp),
    Txn(TxnOp),
}

impl Op {
    pub fn get(key: impl Into<Vec<u8>>) -> RangeOp {
        RangeOp::new(key)
    }

    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> PutOp {
        PutOp::new(key, value)
    }

    pub fn delete(key: impl Into<Vec<u8>>) -> DeleteRangeOp {
        DeleteRangeOp::new(key)
    }

    pub fn txn() -> TxnOp {
        TxnOp::default()
    }

    /// Writes are never retried after a transient failure: the first attempt may have been
    /// applied even though its reply was lost.
    pub fn is_write(&self) -> bool {
        match self {
            Op::Range(_) => false,
            Op::Put(_) | Op::DeleteRange(_) | Op::Txn(_) => true,
        }
    }
}

/// Range end meaning "every key at or after `key`".
const FROM_KEY_RANGE_END: &[u8] = &[0];

/// Smallest key greater than every key that starts with `prefix`. A prefix of only 0xff bytes has
/// no such key, so the range runs to the end of the keyspace.
pub(crate) fn prefix_range_end(prefix: &[u8]) -> Vec<u8> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < 0xff {
            end.push(last + 1);
            return end;
        }
    }

    FROM_KEY_RANGE_END.to_vec()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeOp {
    pub(crate) key: Vec<u8>,
    pub(crate) range_end: Vec<u8>,
    pub(crate) limit: i64,
    pub(crate) revision: i64,
    pub(crate) serializable: bool,
    pub(crate) keys_only: bool,
    pub(crate) count_only: bool,
}

impl RangeOp {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        RangeOp {
            key: key.into(),
            ..RangeOp::default()
        }
    }

    /// Covers `[key, end)`.
    pub fn with_range(mut self, end: impl Into<Vec<u8>>) -> Self {
        self.range_end = end.into();
        self
    }

    pub fn with_prefix(mut self) -> Self {
        self.range_end = prefix_range_end(&self.key);
        self
    }

    pub fn with_from_key(mut self) -> Self {
        self.range_end = FROM_KEY_RANGE_END.to_vec();
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Reads at a past revision. Zero means the latest.
    pub fn with_revision(mut self, revision: i64) -> Self {
        self.revision = revision;
        self
    }

    /// Lets any member answer from its local state instead of going through consensus.
    pub fn with_serializable(mut self) -> Self {
        self.serializable = true;
        self
    }

    pub fn with_keys_only(mut self) -> Self {
        self.keys_only = true;
        self
    }

    pub fn with_count_only(mut self) -> Self {
        self.count_only = true;
        self
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn range_end(&self) -> &[u8] {
        &self.range_end
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PutOp {
    pub(crate) key: Vec<u8>,
    pub(crate) value: Vec<u8>,
    pub(crate) lease: Option<LeaseId>,
    pub(crate) prev_kv: bool,
}

impl PutOp {
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        PutOp {
            key: key.into(),
            value: value.into(),
            lease: None,
            prev_kv: false,
        }
    }

    /// Attaches the key to a lease; the key is deleted when the lease expires.
    pub fn with_lease(mut self, lease: LeaseId) -> Self {
        self.lease = Some(lease);
        self
    }

    pub fn with_prev_kv(mut self) -> Self {
        self.prev_kv = true;
        self
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn lease(&self) -> Option<LeaseId> {
        self.lease
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteRangeOp {
    pub(crate) key: Vec<u8>,
    pub(crate) range_end: Vec<u8>,
    pub(crate) prev_kv: bool,
}

impl DeleteRangeOp {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        DeleteRangeOp {
            key: key.into(),
            range_end: Vec::new(),
            prev_kv: false,
        }
    }

    /// Covers `[key, end)`.
    pub fn with_range(mut self, end: impl Into<Vec<u8>>) -> Self {
        self.range_end = end.into();
        self
    }

    pub fn with_prefix(mut self) -> Self {
        self.range_end = prefix_range_end(&self.key);
        self
    }

    pub fn with_from_key(mut self) -> Self {
        self.range_end = FROM_KEY_RANGE_END.to_vec();
        self
    }

    pub fn with_prev_kv(mut self) -> Self {
        self.prev_kv = true;
        self
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn range_end(&self) -> &[u8] {
        &self.range_end
    }
}

/// An operation allowed inside a transaction branch. Transactions do not nest.
#[derive(Debug, Clone, PartialEq)]
pub enum TxnBranchOp {
    Range(RangeOp),
    Put(PutOp),
    DeleteRange(DeleteRangeOp),
}

impl From<RangeOp> for TxnBranchOp {
    fn from(op: RangeOp) -> Self {
        TxnBranchOp::Range(op)
    }
}

impl From<PutOp> for TxnBranchOp {
    fn from(op: PutOp) -> Self {
        TxnBranchOp::Put(op)
    }
}

impl From<DeleteRangeOp> for TxnBranchOp {
    fn from(op: DeleteRangeOp) -> Self {
        TxnBranchOp::DeleteRange(op)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareResult {
    Equal,
    Greater,
    Less,
    NotEqual,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompareTarget {
    Version(i64),
    CreateRevision(i64),
    ModRevision(i64),
    Value(Vec<u8>),
    Lease(LeaseId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Compare {
    pub(crate) key: Vec<u8>,
    pub(crate) result: CompareResult,
    pub(crate) target: CompareTarget,
}

impl Compare {
    pub fn new(key: impl Into<Vec<u8>>, result: CompareResult, target: CompareTarget) -> Self {
        Compare {
            key: key.into(),
            result,
            target,
        }
    }

    pub fn value(key: impl Into<Vec<u8>>, result: CompareResult, value: impl Into<Vec<u8>>) -> Self {
        Compare::new(key, result, CompareTarget::Value(value.into()))
    }

    pub fn version(key: impl Into<Vec<u8>>, result: CompareResult, version: i64) -> Self {
        Compare::new(key, result, CompareTarget::Version(version))
    }

    pub fn mod_revision(key: impl Into<Vec<u8>>, result: CompareResult, revision: i64) -> Self {
        Compare::new(key, result, CompareTarget::ModRevision(revision))
    }
}

/// If every comparison holds, the `success` branch runs; otherwise the `failure` branch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TxnOp {
    pub(crate) compare: Vec<Compare>,
    pub(crate) success: Vec<TxnBranchOp>,
    pub(crate) failure: Vec<TxnBranchOp>,
}

impl TxnOp {
    pub fn when(mut self, compare: impl IntoIterator<Item = Compare>) -> Self {
        self.compare.extend(compare);
        self
    }

    pub fn and_then<O: Into<TxnBranchOp>>(mut self, ops: impl IntoIterator<Item = O>) -> Self {
        self.success.extend(ops.into_iter().map(Into::into));
        self
    }

    pub fn or_else<O: Into<TxnBranchOp>>(mut self, ops: impl IntoIterator<Item = O>) -> Self {
        self.failure.extend(ops.into_iter().map(Into::into));
        self
    }
}

impl From<RangeOp> for Op {
    fn from(op: RangeOp) -> Self {
        Op::Range(op)
    }
}

impl From<PutOp> for Op {
    fn from(op: PutOp) -> Self {
        Op::Put(op)
    }
}

impl From<DeleteRangeOp> for Op {
    fn from(op: DeleteRangeOp) -> Self {
        Op::DeleteRange(op)
    }
}

impl From<TxnOp> for Op {
    fn from(op: TxnOp) -> Self {
        Op::Txn(op)
    }
}
