#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoResponseHeader {
    #[prost(uint64, tag = "1")]
    pub cluster_id: u64,
    #[prost(uint64, tag = "2")]
    pub member_id: u64,
    #[prost(int64, tag = "3")]
    pub revision: i64,
    #[prost(uint64, tag = "4")]
    pub raft_term: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoKeyValue {
    #[prost(bytes = "vec", tag = "1")]
    pub key: ::prost::alloc::vec::Vec<u8>,
    #[prost(int64, tag = "2")]
    pub create_revision: i64,
    #[prost(int64, tag = "3")]
    pub mod_revision: i64,
    #[prost(int64, tag = "4")]
    pub version: i64,
    #[prost(bytes = "vec", tag = "5")]
    pub value: ::prost::alloc::vec::Vec<u8>,
    #[prost(int64, tag = "6")]
    pub lease: i64,
}
// ---------- KV ----------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoRangeReq {
    #[prost(bytes = "vec", tag = "1")]
    pub key: ::prost::alloc::vec::Vec<u8>,
    /// Empty range_end means a single key lookup. "\0" means every key >= key.
    #[prost(bytes = "vec", tag = "2")]
    pub range_end: ::prost::alloc::vec::Vec<u8>,
    #[prost(int64, tag = "3")]
    pub limit: i64,
    #[prost(int64, tag = "4")]
    pub revision: i64,
    #[prost(bool, tag = "5")]
    pub serializable: bool,
    #[prost(bool, tag = "6")]
    pub keys_only: bool,
    #[prost(bool, tag = "7")]
    pub count_only: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoRangeReply {
    #[prost(message, optional, tag = "1")]
    pub header: ::core::option::Option<ProtoResponseHeader>,
    #[prost(message, repeated, tag = "2")]
    pub kvs: ::prost::alloc::vec::Vec<ProtoKeyValue>,
    #[prost(bool, tag = "3")]
    pub more: bool,
    #[prost(int64, tag = "4")]
    pub count: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPutReq {
    #[prost(bytes = "vec", tag = "1")]
    pub key: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub value: ::prost::alloc::vec::Vec<u8>,
    #[prost(int64, tag = "3")]
    pub lease: i64,
    #[prost(bool, tag = "4")]
    pub prev_kv: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPutReply {
    #[prost(message, optional, tag = "1")]
    pub header: ::core::option::Option<ProtoResponseHeader>,
    #[prost(message, optional, tag = "2")]
    pub prev_kv: ::core::option::Option<ProtoKeyValue>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoDeleteRangeReq {
    #[prost(bytes = "vec", tag = "1")]
    pub key: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub range_end: ::prost::alloc::vec::Vec<u8>,
    #[prost(bool, tag = "3")]
    pub prev_kv: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoDeleteRangeReply {
    #[prost(message, optional, tag = "1")]
    pub header: ::core::option::Option<ProtoResponseHeader>,
    #[prost(int64, tag = "2")]
    pub deleted: i64,
    #[prost(message, repeated, tag = "3")]
    pub prev_kvs: ::prost::alloc::vec::Vec<ProtoKeyValue>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoCompare {
    #[prost(enumeration = "ProtoCompareResult", tag = "1")]
    pub result: i32,
    #[prost(enumeration = "ProtoCompareTarget", tag = "2")]
    pub target: i32,
    #[prost(bytes = "vec", tag = "3")]
    pub key: ::prost::alloc::vec::Vec<u8>,
    #[prost(oneof = "proto_compare::TargetUnion", tags = "4, 5, 6, 7, 8")]
    pub target_union: ::core::option::Option<proto_compare::TargetUnion>,
}
/// Nested message and enum types in `ProtoCompare`.
pub mod proto_compare {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum TargetUnion {
        #[prost(int64, tag = "4")]
        Version(i64),
        #[prost(int64, tag = "5")]
        CreateRevision(i64),
        #[prost(int64, tag = "6")]
        ModRevision(i64),
        #[prost(bytes, tag = "7")]
        Value(::prost::alloc::vec::Vec<u8>),
        #[prost(int64, tag = "8")]
        Lease(i64),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoRequestOp {
    #[prost(oneof = "proto_request_op::Request", tags = "1, 2, 3")]
    pub request: ::core::option::Option<proto_request_op::Request>,
}
/// Nested message and enum types in `ProtoRequestOp`.
pub mod proto_request_op {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Request {
        #[prost(message, tag = "1")]
        RequestRange(super::ProtoRangeReq),
        #[prost(message, tag = "2")]
        RequestPut(super::ProtoPutReq),
        #[prost(message, tag = "3")]
        RequestDeleteRange(super::ProtoDeleteRangeReq),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoResponseOp {
    #[prost(oneof = "proto_response_op::Response", tags = "1, 2, 3")]
    pub response: ::core::option::Option<proto_response_op::Response>,
}
/// Nested message and enum types in `ProtoResponseOp`.
pub mod proto_response_op {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Response {
        #[prost(message, tag = "1")]
        ResponseRange(super::ProtoRangeReply),
        #[prost(message, tag = "2")]
        ResponsePut(super::ProtoPutReply),
        #[prost(message, tag = "3")]
        ResponseDeleteRange(super::ProtoDeleteRangeReply),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoTxnReq {
    #[prost(message, repeated, tag = "1")]
    pub compare: ::prost::alloc::vec::Vec<ProtoCompare>,
    #[prost(message, repeated, tag = "2")]
    pub success: ::prost::alloc::vec::Vec<ProtoRequestOp>,
    #[prost(message, repeated, tag = "3")]
    pub failure: ::prost::alloc::vec::Vec<ProtoRequestOp>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoTxnReply {
    #[prost(message, optional, tag = "1")]
    pub header: ::core::option::Option<ProtoResponseHeader>,
    #[prost(bool, tag = "2")]
    pub succeeded: bool,
    #[prost(message, repeated, tag = "3")]
    pub responses: ::prost::alloc::vec::Vec<ProtoResponseOp>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoCompactReq {
    #[prost(int64, tag = "1")]
    pub revision: i64,
    #[prost(bool, tag = "2")]
    pub physical: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoCompactReply {
    #[prost(message, optional, tag = "1")]
    pub header: ::core::option::Option<ProtoResponseHeader>,
}
// ---------- Lease forwarding (HTTP bodies) ----------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLeaseKeepAliveReq {
    #[prost(int64, tag = "1")]
    pub id: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLeaseKeepAliveReply {
    #[prost(message, optional, tag = "1")]
    pub header: ::core::option::Option<ProtoResponseHeader>,
    #[prost(int64, tag = "2")]
    pub id: i64,
    #[prost(int64, tag = "3")]
    pub ttl: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLeaseTimeToLiveReq {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(bool, tag = "2")]
    pub keys: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLeaseTimeToLiveReply {
    #[prost(message, optional, tag = "1")]
    pub header: ::core::option::Option<ProtoResponseHeader>,
    #[prost(int64, tag = "2")]
    pub id: i64,
    #[prost(int64, tag = "3")]
    pub ttl: i64,
    #[prost(int64, tag = "4")]
    pub granted_ttl: i64,
    #[prost(bytes = "vec", repeated, tag = "5")]
    pub keys: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLeaseInternalReq {
    #[prost(message, optional, tag = "1")]
    pub lease_time_to_live_request: ::core::option::Option<ProtoLeaseTimeToLiveReq>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLeaseInternalReply {
    #[prost(message, optional, tag = "1")]
    pub lease_time_to_live_response: ::core::option::Option<ProtoLeaseTimeToLiveReply>,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ProtoCompareResult {
    Equal = 0,
    Greater = 1,
    Less = 2,
    NotEqual = 3,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ProtoCompareTarget {
    Version = 0,
    Create = 1,
    Mod = 2,
    Value = 3,
    Lease = 4,
}
#[doc = r" Generated client implementations."]
pub mod grpc_kv_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = " Key-value service exposed by every member. Clients only consume it."]
    pub struct GrpcKvClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl GrpcKvClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> GrpcKvClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        pub async fn range(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoRangeReq>,
        ) -> Result<tonic::Response<super::ProtoRangeReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kvcoord.GrpcKv/Range");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn put(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoPutReq>,
        ) -> Result<tonic::Response<super::ProtoPutReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kvcoord.GrpcKv/Put");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn delete_range(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoDeleteRangeReq>,
        ) -> Result<tonic::Response<super::ProtoDeleteRangeReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kvcoord.GrpcKv/DeleteRange");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn txn(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoTxnReq>,
        ) -> Result<tonic::Response<super::ProtoTxnReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kvcoord.GrpcKv/Txn");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn compact(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoCompactReq>,
        ) -> Result<tonic::Response<super::ProtoCompactReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/kvcoord.GrpcKv/Compact");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
    impl<T: Clone> Clone for GrpcKvClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for GrpcKvClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "GrpcKvClient {{ ... }}")
        }
    }
}
