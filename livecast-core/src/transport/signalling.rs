//! Signalling backend seam.
//!
//! Request construction, auth header injection, timeouts and retry policy
//! all belong to the implementing client; the core only names the operation
//! it wants performed and consumes the parsed JSON that comes back.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A named backend operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub method: Method,
    pub path: &'static str,
}

pub const CREATE_ROOM: Operation = Operation {
    name: "create_room",
    method: Method::Post,
    path: "/live/room/create",
};

pub const JOIN_ROOM: Operation = Operation {
    name: "join_room",
    method: Method::Post,
    path: "/live/room/join",
};

pub const LEAVE_ROOM: Operation = Operation {
    name: "leave_room",
    method: Method::Post,
    path: "/live/room/leave",
};

/// Request/response backend used for create/join/leave bookkeeping.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignallingClient: Send + Sync {
    /// Perform one named operation, single attempt. Returns the parsed JSON
    /// body or a transport error; retrying is the caller's decision.
    async fn perform(
        &self,
        op: Operation,
        headers: HashMap<String, String>,
        params: Map<String, Value>,
    ) -> Result<Value>;
}
