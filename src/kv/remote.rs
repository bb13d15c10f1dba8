use crate::grpc::grpc_kv_client::GrpcKvClient;
use crate::grpc::{
    proto_compare, proto_request_op, proto_response_op, ProtoCompactReq, ProtoCompare, ProtoCompareResult,
    ProtoCompareTarget, ProtoDeleteRangeReply, ProtoDeleteRangeReq, ProtoKeyValue, ProtoPutReply, ProtoPutReq,
    ProtoRangeReply, ProtoRangeReq, ProtoRequestOp, ProtoResponseOp, ProtoTxnReq,
};
use crate::kv::{
    CompactResponse, Compare, CompareResult, CompareTarget, DeleteRangeOp, DeleteResponse, GetResponse, KeyValue,
    OpResponse, PutOp, PutResponse, RangeOp, TxnBranchOp, TxnOp, TxnResponse,
};
use crate::lease::{LeaseId, ResponseHeader};
use std::future::Future;
use tokio::time::Duration;
use tonic::codegen::http::uri;
use tonic::transport::{Channel, Endpoint};
use tonic::{Response, Status};

/// Per-call transport behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallOptions {
    /// No client-side deadline. A dead channel still fails with `Unavailable`; retrying that is
    /// up to the caller.
    pub wait_for_ready: bool,
}

impl CallOptions {
    pub fn fail_fast() -> Self {
        CallOptions { wait_for_ready: false }
    }

    pub fn wait_for_ready() -> Self {
        CallOptions { wait_for_ready: true }
    }
}

/// KvRemote is the key-value service as seen from a client.
#[async_trait::async_trait]
pub trait KvRemote: Send + Sync + 'static {
    async fn range(&self, op: &RangeOp, options: CallOptions) -> Result<GetResponse, Status>;
    async fn put(&self, op: &PutOp, options: CallOptions) -> Result<PutResponse, Status>;
    async fn delete_range(&self, op: &DeleteRangeOp, options: CallOptions) -> Result<DeleteResponse, Status>;
    async fn txn(&self, op: &TxnOp, options: CallOptions) -> Result<TxnResponse, Status>;
    async fn compact(&self, revision: i64, physical: bool, options: CallOptions) -> Result<CompactResponse, Status>;
}

#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("invalid endpoint URI: {0}")]
    InvalidUri(#[from] uri::InvalidUri),
    #[error("failed to connect: {0}")]
    ConnectFailure(#[from] tonic::transport::Error),
}

/// GrpcKvRemote talks to the `GrpcKv` service over tonic.
#[derive(Clone)]
pub struct GrpcKvRemote {
    inner: GrpcKvClient<Channel>,
    request_timeout: Duration,
}

impl GrpcKvRemote {
    pub async fn connect(url: String, request_timeout: Duration) -> Result<Self, ConnectError> {
        let endpoint = Endpoint::from_shared(url)?;
        let connection = endpoint.connect().await?;

        Ok(GrpcKvRemote {
            inner: GrpcKvClient::new(connection),
            request_timeout,
        })
    }

    /// Only fail-fast calls carry a deadline. A wait-for-ready call runs until tonic resolves it or
    /// the caller drops it.
    async fn call<T, F>(&self, options: CallOptions, call: F) -> Result<T, Status>
    where
        F: Future<Output = Result<Response<T>, Status>>,
    {
        if options.wait_for_ready {
            return call.await.map(Response::into_inner);
        }

        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(result) => result.map(Response::into_inner),
            Err(_elapsed) => Err(Status::deadline_exceeded("request timed out")),
        }
    }
}

#[async_trait::async_trait]
impl KvRemote for GrpcKvRemote {
    async fn range(&self, op: &RangeOp, options: CallOptions) -> Result<GetResponse, Status> {
        let mut client = self.inner.clone();
        let reply = self.call(options, client.range(range_req(op))).await?;
        Ok(get_response(reply))
    }

    async fn put(&self, op: &PutOp, options: CallOptions) -> Result<PutResponse, Status> {
        let mut client = self.inner.clone();
        let reply = self.call(options, client.put(put_req(op))).await?;
        Ok(put_response(reply))
    }

    async fn delete_range(&self, op: &DeleteRangeOp, options: CallOptions) -> Result<DeleteResponse, Status> {
        let mut client = self.inner.clone();
        let reply = self.call(options, client.delete_range(delete_range_req(op))).await?;
        Ok(delete_response(reply))
    }

    async fn txn(&self, op: &TxnOp, options: CallOptions) -> Result<TxnResponse, Status> {
        let mut client = self.inner.clone();
        let reply = self.call(options, client.txn(txn_req(op))).await?;

        let mut responses = Vec::with_capacity(reply.responses.len());
        for response in reply.responses {
            responses.push(op_response(response)?);
        }

        Ok(TxnResponse {
            header: header(reply.header),
            succeeded: reply.succeeded,
            responses,
        })
    }

    async fn compact(&self, revision: i64, physical: bool, options: CallOptions) -> Result<CompactResponse, Status> {
        let mut client = self.inner.clone();
        let reply = self
            .call(options, client.compact(ProtoCompactReq { revision, physical }))
            .await?;
        Ok(CompactResponse {
            header: header(reply.header),
        })
    }
}

// ------- Conversions --------

fn range_req(op: &RangeOp) -> ProtoRangeReq {
    ProtoRangeReq {
        key: op.key.clone(),
        range_end: op.range_end.clone(),
        limit: op.limit,
        revision: op.revision,
        serializable: op.serializable,
        keys_only: op.keys_only,
        count_only: op.count_only,
    }
}

fn put_req(op: &PutOp) -> ProtoPutReq {
    ProtoPutReq {
        key: op.key.clone(),
        value: op.value.clone(),
        lease: op.lease.map(|id| id.as_i64()).unwrap_or(0),
        prev_kv: op.prev_kv,
    }
}

fn delete_range_req(op: &DeleteRangeOp) -> ProtoDeleteRangeReq {
    ProtoDeleteRangeReq {
        key: op.key.clone(),
        range_end: op.range_end.clone(),
        prev_kv: op.prev_kv,
    }
}

fn txn_req(op: &TxnOp) -> ProtoTxnReq {
    ProtoTxnReq {
        compare: op.compare.iter().map(compare).collect(),
        success: op.success.iter().map(request_op).collect(),
        failure: op.failure.iter().map(request_op).collect(),
    }
}

fn compare(compare: &Compare) -> ProtoCompare {
    let result = match compare.result {
        CompareResult::Equal => ProtoCompareResult::Equal,
        CompareResult::Greater => ProtoCompareResult::Greater,
        CompareResult::Less => ProtoCompareResult::Less,
        CompareResult::NotEqual => ProtoCompareResult::NotEqual,
    };
    let (target, target_union) = match &compare.target {
        CompareTarget::Version(v) => (ProtoCompareTarget::Version, proto_compare::TargetUnion::Version(*v)),
        CompareTarget::CreateRevision(r) => (
            ProtoCompareTarget::Create,
            proto_compare::TargetUnion::CreateRevision(*r),
        ),
        CompareTarget::ModRevision(r) => (ProtoCompareTarget::Mod, proto_compare::TargetUnion::ModRevision(*r)),
        CompareTarget::Value(v) => (ProtoCompareTarget::Value, proto_compare::TargetUnion::Value(v.clone())),
        CompareTarget::Lease(id) => (ProtoCompareTarget::Lease, proto_compare::TargetUnion::Lease(id.as_i64())),
    };

    ProtoCompare {
        result: result as i32,
        target: target as i32,
        key: compare.key.clone(),
        target_union: Some(target_union),
    }
}

fn request_op(op: &TxnBranchOp) -> ProtoRequestOp {
    let request = match op {
        TxnBranchOp::Range(op) => proto_request_op::Request::RequestRange(range_req(op)),
        TxnBranchOp::Put(op) => proto_request_op::Request::RequestPut(put_req(op)),
        TxnBranchOp::DeleteRange(op) => proto_request_op::Request::RequestDeleteRange(delete_range_req(op)),
    };

    ProtoRequestOp { request: Some(request) }
}

fn header(proto: Option<crate::grpc::ProtoResponseHeader>) -> ResponseHeader {
    proto.map(ResponseHeader::from).unwrap_or_default()
}

fn key_value(proto: ProtoKeyValue) -> KeyValue {
    KeyValue {
        key: proto.key,
        value: proto.value,
        create_revision: proto.create_revision,
        mod_revision: proto.mod_revision,
        version: proto.version,
        lease: match proto.lease {
            0 => None,
            id => Some(LeaseId::new(id)),
        },
    }
}

fn get_response(proto: ProtoRangeReply) -> GetResponse {
    GetResponse {
        header: header(proto.header),
        kvs: proto.kvs.into_iter().map(key_value).collect(),
        more: proto.more,
        count: proto.count,
    }
}

fn put_response(proto: ProtoPutReply) -> PutResponse {
    PutResponse {
        header: header(proto.header),
        prev_kv: proto.prev_kv.map(key_value),
    }
}

fn delete_response(proto: ProtoDeleteRangeReply) -> DeleteResponse {
    DeleteResponse {
        header: header(proto.header),
        deleted: proto.deleted,
        prev_kvs: proto.prev_kvs.into_iter().map(key_value).collect(),
    }
}

fn op_response(proto: ProtoResponseOp) -> Result<OpResponse, Status> {
    match proto.response {
        Some(proto_response_op::Response::ResponseRange(r)) => Ok(OpResponse::Get(get_response(r))),
        Some(proto_response_op::Response::ResponsePut(r)) => Ok(OpResponse::Put(put_response(r))),
        Some(proto_response_op::Response::ResponseDeleteRange(r)) => Ok(OpResponse::Delete(delete_response(r))),
        None => Err(Status::internal("txn reply carries an empty operation response")),
    }
}
