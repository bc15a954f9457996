//! Wire schema spoken by the graph service proxy.
//!
//! These mirror the server's RPC structures one-to-one and are what a
//! [`GraphService`](crate::service::GraphService) implementation
//! produces. They never reach callers: [`crate::decode`] translates
//! them into the client model. The tabular payload ([`DataSet`]) is
//! opaque to this layer and shared with the client model unchanged.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::DataSet;

/// Result code as published in the server IDL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Succeeded,
    EDisconnected,
    EFailToConnect,
    ERpcFailure,
    EBadUsernamePassword,
    ESessionInvalid,
    ESessionTimeout,
    ESyntaxError,
    EExecutionError,
    // The IDL misspells this name; the serialized form must match it.
    #[serde(rename = "E_STATEMENT_EMTPY")]
    EStatementEmpty,
    EUserNotFound,
    EBadPermission,
    ESemanticError,
    EUnknown,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub error_code: ErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResponse {
    pub error_code: ErrorCode,
    pub latency_in_us: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DataSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_desc: Option<PlanDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub key: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilingStats {
    pub rows: i64,
    pub exec_duration_in_us: i64,
    pub total_duration_in_us: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_stats: Option<HashMap<String, String>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanNodeBranchInfo {
    pub is_do_branch: bool,
    pub condition_node_id: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanNodeDescription {
    pub name: String,
    pub id: i64,
    pub output_var: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Vec<Pair>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profiles: Option<Vec<ProfilingStats>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_info: Option<PlanNodeBranchInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<i64>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDescription {
    pub plan_node_descs: Vec<PlanNodeDescription>,
    /// Maps a node id to its position in `plan_node_descs`.
    pub node_index_map: HashMap<i64, i64>,
    pub format: String,
}
