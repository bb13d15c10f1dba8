use crate::grpc::{
    ProtoLeaseInternalReply, ProtoLeaseInternalReq, ProtoLeaseKeepAliveReply, ProtoLeaseKeepAliveReq,
    ProtoLeaseTimeToLiveReply, ProtoLeaseTimeToLiveReq, ProtoResponseHeader,
};
use crate::lease::LeaseId;
use prost::{EncodeError, Message};

// Typed forms of the lease forwarding bodies. The protobuf structs stay private to this module so
// the handler and client deal only in lease ids and ttls.

#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error(transparent)]
    Decode(#[from] prost::DecodeError),
    #[error("missing {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenewRequest {
    pub lease_id: LeaseId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeToLiveRequest {
    pub lease_id: LeaseId,
    pub include_keys: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseHeader {
    pub cluster_id: u64,
    pub member_id: u64,
    pub revision: i64,
    pub raft_term: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenewResponse {
    pub header: ResponseHeader,
    pub lease_id: LeaseId,
    pub ttl: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeToLiveResponse {
    pub header: ResponseHeader,
    pub lease_id: LeaseId,
    /// Remaining seconds.
    pub ttl: i64,
    pub granted_ttl: i64,
    /// Only populated when the request asked for keys.
    pub keys: Vec<Vec<u8>>,
}

fn encode_message<M: Message>(message: &M) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::with_capacity(message.encoded_len());
    message.encode(&mut buf)?;
    Ok(buf)
}

impl RenewRequest {
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        encode_message(&ProtoLeaseKeepAliveReq {
            id: self.lease_id.as_i64(),
        })
    }

    pub fn decode(buf: &[u8]) -> Result<Self, MessageError> {
        let proto = ProtoLeaseKeepAliveReq::decode(buf)?;
        Ok(RenewRequest {
            lease_id: LeaseId::new(proto.id),
        })
    }
}

impl TimeToLiveRequest {
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        encode_message(&ProtoLeaseInternalReq {
            lease_time_to_live_request: Some(ProtoLeaseTimeToLiveReq {
                id: self.lease_id.as_i64(),
                keys: self.include_keys,
            }),
        })
    }

    pub fn decode(buf: &[u8]) -> Result<Self, MessageError> {
        let proto = ProtoLeaseInternalReq::decode(buf)?;
        let inner = proto
            .lease_time_to_live_request
            .ok_or(MessageError::Missing("lease_time_to_live_request"))?;

        Ok(TimeToLiveRequest {
            lease_id: LeaseId::new(inner.id),
            include_keys: inner.keys,
        })
    }
}

impl RenewResponse {
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        encode_message(&ProtoLeaseKeepAliveReply {
            header: Some(self.header.clone().into()),
            id: self.lease_id.as_i64(),
            ttl: self.ttl,
        })
    }

    pub fn decode(buf: &[u8]) -> Result<Self, MessageError> {
        let proto = ProtoLeaseKeepAliveReply::decode(buf)?;
        Ok(RenewResponse {
            header: proto.header.map(ResponseHeader::from).unwrap_or_default(),
            lease_id: LeaseId::new(proto.id),
            ttl: proto.ttl,
        })
    }
}

impl TimeToLiveResponse {
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        encode_message(&ProtoLeaseInternalReply {
            lease_time_to_live_response: Some(ProtoLeaseTimeToLiveReply {
                header: Some(self.header.clone().into()),
                id: self.lease_id.as_i64(),
                ttl: self.ttl,
                granted_ttl: self.granted_ttl,
                keys: self.keys.clone(),
            }),
        })
    }

    pub fn decode(buf: &[u8]) -> Result<Self, MessageError> {
        let proto = ProtoLeaseInternalReply::decode(buf)?;
        let inner = proto
            .lease_time_to_live_response
            .ok_or(MessageError::Missing("lease_time_to_live_response"))?;

        Ok(TimeToLiveResponse {
            header: inner.header.map(ResponseHeader::from).unwrap_or_default(),
            lease_id: LeaseId::new(inner.id),
            ttl: inner.ttl,
            granted_ttl: inner.granted_ttl,
            keys: inner.keys,
        })
    }
}

// ------- Conversions --------

impl From<ResponseHeader> for ProtoResponseHeader {
    fn from(header: ResponseHeader) -> Self {
        ProtoResponseHeader {
            cluster_id: header.cluster_id,
            member_id: header.member_id,
            revision: header.revision,
            raft_term: header.raft_term,
        }
    }
}

impl From<ProtoResponseHeader> for ResponseHeader {
    fn from(proto: ProtoResponseHeader) -> Self {
        ResponseHeader {
            cluster_id: proto.cluster_id,
            member_id: proto.member_id,
            revision: proto.revision,
            raft_term: proto.raft_term,
        }
    }
}
