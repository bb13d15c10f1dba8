use crate::lease::{LeaseId, ResponseHeader};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyValue {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
    pub create_revision: i64,
    pub mod_revision: i64,
    /// Number of writes since the key was created. Deleting the key resets it to zero.
    pub version: i64,
    pub lease: Option<LeaseId>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetResponse {
    pub header: ResponseHeader,
    pub kvs: Vec<KeyValue>,
    /// More keys matched than the limit let through.
    pub more: bool,
    pub count: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PutResponse {
    pub header: ResponseHeader,
    pub prev_kv: Option<KeyValue>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteResponse {
    pub header: ResponseHeader,
    pub deleted: i64,
    pub prev_kvs: Vec<KeyValue>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TxnResponse {
    pub header: ResponseHeader,
    pub succeeded: bool,
    /// One entry per operation of the branch that ran, in order.
    pub responses: Vec<OpResponse>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompactResponse {
    pub header: ResponseHeader,
}

/// OpResponse is the reply to whichever `Op` was dispatched.
#[derive(Debug, Clone, PartialEq)]
pub enum OpResponse {
    Get(GetResponse),
    Put(PutResponse),
    Delete(DeleteResponse),
    Txn(TxnResponse),
}

impl OpResponse {
    pub fn get(&self) -> Option<&GetResponse> {
        match self {
            OpResponse::Get(r) => Some(r),
            _ => None,
        }
    }

    pub fn put(&self) -> Option<&PutResponse> {
        match self {
            OpResponse::Put(r) => Some(r),
            _ => None,
        }
    }

    pub fn del(&self) -> Option<&DeleteResponse> {
        match self {
            OpResponse::Delete(r) => Some(r),
            _ => None,
        }
    }

    pub fn txn(&self) -> Option<&TxnResponse> {
        match self {
            OpResponse::Txn(r) => Some(r),
            _ => None,
        }
    }

    pub fn header(&self) -> &ResponseHeader {
        match self {
            OpResponse::Get(r) => &r.header,
            OpResponse::Put(r) => &r.header,
            OpResponse::Delete(r) => &r.header,
            OpResponse::Txn(r) => &r.header,
        }
    }
}
