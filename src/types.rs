use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{ErrorCode, Value};

/// One row of a tabular result.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Row {
    pub values: Vec<Value>,
}

/// Tabular statement output: ordered column names and ordered typed
/// rows. The cell type is opaque to this layer and passed through
/// verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSet {
    pub column_names: Vec<String>,
    pub rows: Vec<Row>,
}

impl DataSet {
    pub fn new<I, S>(column_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column_names: column_names.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, values: Vec<Value>) {
        self.rows.push(Row { values });
    }

    /// Structural comparison that ignores row order. Rows carry a total
    /// order, so both sides are sorted and compared element-wise.
    pub fn eq_ignore_row_order(&self, other: &DataSet) -> bool {
        if self.column_names != other.column_names || self.rows.len() != other.rows.len() {
            return false;
        }
        let mut left = self.rows.clone();
        let mut right = other.rows.clone();
        left.sort();
        right.sort();
        left == right
    }
}

/// Outcome of an authentication call.
///
/// `session_id` is `Some` (and positive) only when `code` is
/// [`ErrorCode::Succeeded`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthResponse {
    pub code: ErrorCode,
    pub session_id: Option<i64>,
    pub error_msg: Option<String>,
}

impl AuthResponse {
    pub(crate) fn from_code(code: ErrorCode) -> Self {
        Self {
            code,
            session_id: None,
            error_msg: None,
        }
    }
}

/// Outcome of a statement execution.
///
/// `data` is present only when the statement produced tabular output;
/// `plan_desc` only for EXPLAIN-style statements. Both require
/// `code == Succeeded`.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionResponse {
    pub code: ErrorCode,
    pub latency_us: i32,
    pub data: Option<DataSet>,
    pub space_name: Option<String>,
    pub error_msg: Option<String>,
    pub plan_desc: Option<PlanDescription>,
    pub comment: Option<String>,
}

impl ExecutionResponse {
    pub(crate) fn from_code(code: ErrorCode) -> Self {
        Self {
            code,
            latency_us: 0,
            data: None,
            space_name: None,
            error_msg: None,
            plan_desc: None,
            comment: None,
        }
    }
}

/// A key/value entry of a plan node's description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pair {
    pub key: String,
    pub value: String,
}

/// Per-execution statistics of one plan node. A loop or branch node
/// that runs N times contributes N entries, in execution order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfilingStats {
    pub rows: i64,
    pub exec_duration_us: i64,
    pub total_duration_us: i64,
    pub other_stats: Option<HashMap<String, String>>,
}

/// Identifies which loop/select node a branch belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanNodeBranchInfo {
    pub is_do_branch: bool,
    pub condition_node_id: i64,
}

/// One node of an execution plan. Dependencies are parent node ids:
/// the plan is a DAG over ids, not a pointer tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanNodeDescription {
    pub name: String,
    pub id: i64,
    pub output_var: String,
    pub description: Option<Vec<Pair>>,
    pub profiles: Option<Vec<ProfilingStats>>,
    pub branch_info: Option<PlanNodeBranchInfo>,
    pub dependencies: Option<Vec<i64>>,
}

/// Execution plan of an EXPLAIN/PROFILE statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanDescription {
    pub nodes: Vec<PlanNodeDescription>,
    /// Maps a node id to its position in `nodes`.
    pub node_index_by_id: HashMap<i64, i64>,
    pub format: String,
}

impl PlanDescription {
    /// Resolves a node id to its node through the index map, without
    /// scanning `nodes`.
    pub fn node_by_id(&self, id: i64) -> Option<&PlanNodeDescription> {
        let index = *self.node_index_by_id.get(&id)?;
        self.nodes.get(usize::try_from(index).ok()?)
    }
}
