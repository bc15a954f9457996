//! Wire-to-client response translation.
//!
//! Pure structural mappings composed bottom-up: the plan-tree leaves
//! first, then nodes, then the full responses. The structures are DAGs
//! of values, so no shared state is involved anywhere.

use crate::{
    wire, AuthResponse, ErrorCode, ExecutionResponse, Pair, PlanDescription,
    PlanNodeBranchInfo, PlanNodeDescription, ProfilingStats,
};

/// Total mapping over the closed wire enumeration. No wildcard arm: a
/// wire value without a client counterpart must fail the build, not
/// degrade to `Unknown`.
pub(crate) fn error_code(code: wire::ErrorCode) -> ErrorCode {
    match code {
        wire::ErrorCode::Succeeded => ErrorCode::Succeeded,
        wire::ErrorCode::EDisconnected => ErrorCode::Disconnected,
        wire::ErrorCode::EFailToConnect => ErrorCode::FailToConnect,
        wire::ErrorCode::ERpcFailure => ErrorCode::RpcFailure,
        wire::ErrorCode::EBadUsernamePassword => ErrorCode::BadUsernamePassword,
        wire::ErrorCode::ESessionInvalid => ErrorCode::SessionInvalid,
        wire::ErrorCode::ESessionTimeout => ErrorCode::SessionTimeout,
        wire::ErrorCode::ESyntaxError => ErrorCode::SyntaxError,
        wire::ErrorCode::EExecutionError => ErrorCode::ExecutionError,
        wire::ErrorCode::EStatementEmpty => ErrorCode::StatementEmpty,
        wire::ErrorCode::EUserNotFound => ErrorCode::UserNotFound,
        wire::ErrorCode::EBadPermission => ErrorCode::BadPermission,
        wire::ErrorCode::ESemanticError => ErrorCode::SemanticError,
        wire::ErrorCode::EUnknown => ErrorCode::Unknown,
    }
}

pub(crate) fn auth_response(resp: wire::AuthResponse) -> AuthResponse {
    let code = error_code(resp.error_code);
    // A session id accompanies only a successful authentication.
    let session_id = match code {
        ErrorCode::Succeeded => resp.session_id.filter(|id| *id > 0),
        _ => None,
    };
    AuthResponse {
        code,
        session_id,
        error_msg: resp.error_msg,
    }
}

pub(crate) fn execution_response(resp: wire::ExecutionResponse) -> ExecutionResponse {
    ExecutionResponse {
        code: error_code(resp.error_code),
        latency_us: resp.latency_in_us,
        data: resp.data,
        space_name: resp.space_name,
        error_msg: resp.error_msg,
        plan_desc: resp.plan_desc.map(plan_description),
        comment: resp.comment,
    }
}

fn pair(pair: wire::Pair) -> Pair {
    Pair {
        key: pair.key,
        value: pair.value,
    }
}

fn profiling_stats(stats: wire::ProfilingStats) -> ProfilingStats {
    ProfilingStats {
        rows: stats.rows,
        exec_duration_us: stats.exec_duration_in_us,
        total_duration_us: stats.total_duration_in_us,
        other_stats: stats.other_stats,
    }
}

fn branch_info(info: wire::PlanNodeBranchInfo) -> PlanNodeBranchInfo {
    PlanNodeBranchInfo {
        is_do_branch: info.is_do_branch,
        condition_node_id: info.condition_node_id,
    }
}

fn plan_node(node: wire::PlanNodeDescription) -> PlanNodeDescription {
    PlanNodeDescription {
        name: node.name,
        id: node.id,
        output_var: node.output_var,
        description: node
            .description
            .map(|pairs| pairs.into_iter().map(pair).collect()),
        profiles: node
            .profiles
            .map(|stats| stats.into_iter().map(profiling_stats).collect()),
        branch_info: node.branch_info.map(branch_info),
        dependencies: node.dependencies,
    }
}

pub(crate) fn plan_description(plan: wire::PlanDescription) -> PlanDescription {
    PlanDescription {
        nodes: plan.plan_node_descs.into_iter().map(plan_node).collect(),
        node_index_by_id: plan.node_index_map,
        format: plan.format,
    }
}
