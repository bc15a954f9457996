//! In-process mock of the graph service proxy.
//!
//! Implements the `GraphService`/`GraphConnector` seam against a small
//! scripted server: a provisioned `root` account, a session table, and
//! canned answers for the statements the tests issue. Connect refusal
//! and mid-call RPC failures are injectable so connectivity translation
//! can be exercised without a network.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Weak};

use async_trait::async_trait;
use plexus_client::service::{GraphConnector, GraphService};
use plexus_client::{wire, Connection, ConnectionPool, DataSet, TransportError, Value};

pub const ROOT_USER: &str = "root";
pub const ROOT_PASSWORD: &str = "plexus";

pub struct MockServer {
    state: Mutex<ServerState>,
    refuse_connect: AtomicBool,
    fail_rpc: AtomicBool,
    connect_attempts: AtomicUsize,
}

struct ServerState {
    next_session_id: i64,
    live_sessions: HashSet<i64>,
}

impl MockServer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(ServerState {
                next_session_id: 1,
                live_sessions: HashSet::new(),
            }),
            refuse_connect: AtomicBool::new(false),
            fail_rpc: AtomicBool::new(false),
            connect_attempts: AtomicUsize::new(0),
        })
    }

    pub fn set_refuse_connect(&self, refuse: bool) {
        self.refuse_connect.store(refuse, Ordering::SeqCst);
    }

    pub fn set_fail_rpc(&self, fail: bool) {
        self.fail_rpc.store(fail, Ordering::SeqCst);
    }

    pub fn connect_attempts(&self) -> usize {
        self.connect_attempts.load(Ordering::SeqCst)
    }

    pub fn session_alive(&self, session_id: i64) -> bool {
        self.state
            .lock()
            .unwrap()
            .live_sessions
            .contains(&session_id)
    }

    fn authenticate(&self, username: &str, password: &str) -> wire::AuthResponse {
        if username == ROOT_USER && password == ROOT_PASSWORD {
            let mut state = self.state.lock().unwrap();
            let session_id = state.next_session_id;
            state.next_session_id += 1;
            state.live_sessions.insert(session_id);
            wire::AuthResponse {
                error_code: wire::ErrorCode::Succeeded,
                error_msg: None,
                session_id: Some(session_id),
            }
        } else {
            wire::AuthResponse {
                error_code: wire::ErrorCode::EBadUsernamePassword,
                error_msg: Some("invalid username or password".to_owned()),
                session_id: None,
            }
        }
    }

    fn respond(&self, session_id: i64, statement: &str) -> wire::ExecutionResponse {
        if !self.session_alive(session_id) {
            return error_response(wire::ErrorCode::ESessionInvalid, "session not found");
        }
        if statement.trim().is_empty() {
            return error_response(wire::ErrorCode::EStatementEmpty, "statement is empty");
        }
        match statement {
            "YIELD 1" => {
                let mut data = DataSet::new(["1"]);
                data.push_row(vec![Value::from(1i64)]);
                ok_response(Some(data), None)
            }
            "SHOW SPACES" => {
                let mut data = DataSet::new(["Name"]);
                data.push_row(vec![Value::from("molecules")]);
                data.push_row(vec![Value::from("socialnet")]);
                ok_response(Some(data), None)
            }
            stmt if stmt.starts_with("EXPLAIN") || stmt.starts_with("PROFILE") => {
                ok_response(None, Some(explain_plan()))
            }
            _ => error_response(wire::ErrorCode::ESyntaxError, "syntax error near start"),
        }
    }

    fn signout(&self, session_id: i64) {
        self.state.lock().unwrap().live_sessions.remove(&session_id);
    }
}

fn ok_response(
    data: Option<DataSet>,
    plan_desc: Option<wire::PlanDescription>,
) -> wire::ExecutionResponse {
    wire::ExecutionResponse {
        error_code: wire::ErrorCode::Succeeded,
        latency_in_us: 128,
        data,
        space_name: None,
        error_msg: None,
        plan_desc,
        comment: None,
    }
}

fn error_response(code: wire::ErrorCode, msg: &str) -> wire::ExecutionResponse {
    wire::ExecutionResponse {
        error_code: code,
        latency_in_us: 0,
        data: None,
        space_name: None,
        error_msg: Some(msg.to_owned()),
        plan_desc: None,
        comment: None,
    }
}

/// Start -> Loop -> Project, with the loop body profiled once per
/// execution.
fn explain_plan() -> wire::PlanDescription {
    let stats = |rows: i64, exec: i64| wire::ProfilingStats {
        rows,
        exec_duration_in_us: exec,
        total_duration_in_us: exec + 3,
        other_stats: None,
    };
    wire::PlanDescription {
        plan_node_descs: vec![
            wire::PlanNodeDescription {
                name: "Start".to_owned(),
                id: 0,
                output_var: "__Start_0".to_owned(),
                description: None,
                profiles: None,
                branch_info: None,
                dependencies: None,
            },
            wire::PlanNodeDescription {
                name: "Loop".to_owned(),
                id: 1,
                output_var: "__Loop_1".to_owned(),
                description: Some(vec![wire::Pair {
                    key: "loopBody".to_owned(),
                    value: "2".to_owned(),
                }]),
                profiles: Some(vec![stats(1, 15), stats(4, 11)]),
                branch_info: None,
                dependencies: Some(vec![0]),
            },
            wire::PlanNodeDescription {
                name: "Project".to_owned(),
                id: 2,
                output_var: "__Project_2".to_owned(),
                description: None,
                profiles: None,
                branch_info: Some(wire::PlanNodeBranchInfo {
                    is_do_branch: true,
                    condition_node_id: 1,
                }),
                dependencies: Some(vec![1]),
            },
        ],
        node_index_map: std::collections::HashMap::from([(0, 0), (1, 1), (2, 2)]),
        format: "row".to_owned(),
    }
}

/// The live proxy handed out per successful connect.
struct MockChannel {
    server: Arc<MockServer>,
    closed: AtomicBool,
}

impl MockChannel {
    fn check(&self) -> Result<(), TransportError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(TransportError::ChannelClosed);
        }
        if self.server.fail_rpc.load(Ordering::SeqCst) {
            return Err(TransportError::Rpc("injected rpc failure".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl GraphService for MockChannel {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<wire::AuthResponse, TransportError> {
        self.check()?;
        Ok(self.server.authenticate(username, password))
    }

    async fn execute(
        &self,
        session_id: i64,
        statement: &str,
    ) -> Result<wire::ExecutionResponse, TransportError> {
        self.check()?;
        Ok(self.server.respond(session_id, statement))
    }

    async fn execute_json(
        &self,
        session_id: i64,
        statement: &str,
    ) -> Result<String, TransportError> {
        self.check()?;
        let resp = self.server.respond(session_id, statement);
        Ok(serde_json::to_string(&resp).expect("wire response serializes"))
    }

    async fn signout(&self, session_id: i64) -> Result<(), TransportError> {
        self.check()?;
        self.server.signout(session_id);
        Ok(())
    }

    fn close_now(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

pub struct MockConnector {
    server: Arc<MockServer>,
}

#[async_trait]
impl GraphConnector for MockConnector {
    async fn connect(
        &self,
        address: &str,
        port: u16,
        _timeout_ms: u64,
    ) -> Result<Arc<dyn GraphService>, TransportError> {
        self.server.connect_attempts.fetch_add(1, Ordering::SeqCst);
        if self.server.refuse_connect.load(Ordering::SeqCst) {
            return Err(TransportError::Connect {
                address: address.to_owned(),
                port,
                reason: "connection refused".to_owned(),
            });
        }
        Ok(Arc::new(MockChannel {
            server: Arc::clone(&self.server),
            closed: AtomicBool::new(false),
        }))
    }
}

pub fn new_connection(server: &Arc<MockServer>) -> Connection {
    Connection::new(Arc::new(MockConnector {
        server: Arc::clone(server),
    }))
}

/// Pool collaborator that records every reclaimed connection.
pub struct RecordingPool {
    given_back: Mutex<Vec<Connection>>,
}

impl RecordingPool {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            given_back: Mutex::new(Vec::new()),
        })
    }

    pub fn returned_count(&self) -> usize {
        self.given_back.lock().unwrap().len()
    }

    pub fn take_connection(&self) -> Option<Connection> {
        self.given_back.lock().unwrap().pop()
    }
}

impl ConnectionPool for RecordingPool {
    fn give_back(&self, connection: Connection) {
        self.given_back.lock().unwrap().push(connection);
    }
}

pub fn pool_handle(pool: &Arc<RecordingPool>) -> Weak<dyn ConnectionPool> {
    let as_dyn: Arc<dyn ConnectionPool> = Arc::clone(pool) as Arc<dyn ConnectionPool>;
    Arc::downgrade(&as_dyn)
}
