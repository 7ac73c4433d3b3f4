//! Test doubles: an in-memory task service and a hand-cranked scheduler

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::api::{ApiClient, ApiRequest, ApiResponse, Method, Transport, TransportError};
use crate::domain::{Task, TaskId};
use crate::tasks::{Scheduler, TimerHandle};
use crate::token::{MemoryCookieJar, TokenStore};

pub const TEST_TOKEN: &str = "abc123";
pub const CREATED_AT: &str = "2026-10-18 08:00:00";

enum Failure {
    Status(u16, String),
    Transport(String),
}

#[derive(Default)]
struct ServiceState {
    tasks: Vec<Task>,
    next_id: TaskId,
    users: HashMap<String, String>,
    requests: Vec<ApiRequest>,
    failures: VecDeque<Failure>,
}

/// Behaves like the remote task service for a single user
pub struct FakeTaskService {
    state: RefCell<ServiceState>,
}

impl FakeTaskService {
    pub fn new() -> Self {
        let mut users = HashMap::new();
        users.insert("karel".to_string(), "secret1".to_string());
        Self {
            state: RefCell::new(ServiceState {
                next_id: 1,
                users,
                ..Default::default()
            }),
        }
    }

    /// Pre-populate the server side
    pub fn seed(&self, id: TaskId, title: &str, is_finished: bool) {
        let mut state = self.state.borrow_mut();
        state.tasks.push(Task {
            id,
            title: title.to_string(),
            description: None,
            is_finished,
            created_at: Some(CREATED_AT.to_string()),
        });
        state.next_id = state.next_id.max(id + 1);
    }

    pub fn server_task(&self, id: TaskId) -> Option<Task> {
        self.state.borrow().tasks.iter().find(|t| t.id == id).cloned()
    }

    /// Answer the next request with `status` and `body`
    pub fn fail_next(&self, status: u16, body: &str) {
        self.state
            .borrow_mut()
            .failures
            .push_back(Failure::Status(status, body.to_string()));
    }

    /// The next request never gets a response
    pub fn drop_next(&self) {
        self.state
            .borrow_mut()
            .failures
            .push_back(Failure::Transport("connection refused".to_string()));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.borrow().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.borrow().requests.len()
    }

    fn route(&self, request: &ApiRequest) -> (u16, Value) {
        let segments: Vec<&str> = request.path.trim_matches('/').split('/').collect();
        match (request.method, segments.as_slice()) {
            (Method::Post, ["login"]) => return self.login(request),
            (Method::Post, ["register"]) => return self.register(request),
            _ => {}
        }

        if request.bearer.as_deref() != Some(TEST_TOKEN) {
            return (401, json!({"message": "Unauthorized"}));
        }

        let mut state = self.state.borrow_mut();
        match (request.method, segments.as_slice()) {
            (Method::Get, ["task", "get"]) => (200, json!({"tasks": state.tasks})),
            (Method::Get, ["task", "get", id]) => match find(&state.tasks, id) {
                Some(index) => (200, json!({"tasks": vec![state.tasks[index].clone()]})),
                None => (404, json!({"error": "Task not found"})),
            },
            (Method::Post, ["task", "new"]) => {
                let body = request.body.clone().unwrap_or_default();
                let task = Task {
                    id: state.next_id,
                    title: body["title"].as_str().unwrap_or_default().to_string(),
                    description: body["description"].as_str().map(str::to_string),
                    is_finished: body["isFinished"].as_bool().unwrap_or_default(),
                    created_at: Some(CREATED_AT.to_string()),
                };
                state.next_id += 1;
                state.tasks.push(task.clone());
                (201, json!({"task": task}))
            }
            (Method::Patch, ["task", "update", "status", id]) => {
                let Some(index) = find(&state.tasks, id) else {
                    return (404, json!({"error": "Task not found"}));
                };
                let body = request.body.clone().unwrap_or_default();
                let task = &mut state.tasks[index];
                task.is_finished = body["isFinished"].as_bool().unwrap_or_default();
                (200, json!({"updatedTask": task}))
            }
            (Method::Patch, ["task", "update", id]) => {
                let Some(index) = find(&state.tasks, id) else {
                    return (404, json!({"error": "Task not found"}));
                };
                let body = request.body.clone().unwrap_or_default();
                let task = &mut state.tasks[index];
                if let Some(title) = body["title"].as_str() {
                    task.title = title.to_string();
                }
                if let Some(description) = body["description"].as_str() {
                    task.description = Some(description.to_string());
                }
                (200, json!({"updatedTask": task}))
            }
            (Method::Delete, ["task", "delete", id]) => match find(&state.tasks, id) {
                Some(index) => {
                    state.tasks.remove(index);
                    (200, json!({"message": "Task deleted"}))
                }
                None => (404, json!({"error": "Task not found"})),
            },
            _ => (404, json!({"error": "Not found"})),
        }
    }

    fn login(&self, request: &ApiRequest) -> (u16, Value) {
        let (username, password) = credentials(request);
        let state = self.state.borrow();
        if state.users.get(&username) == Some(&password) {
            (200, json!({"token": TEST_TOKEN}))
        } else {
            (401, json!({"message": "Invalid credentials"}))
        }
    }

    fn register(&self, request: &ApiRequest) -> (u16, Value) {
        let (username, password) = credentials(request);
        let mut state = self.state.borrow_mut();
        if state.users.contains_key(&username) {
            return (409, json!({"message": "User already exists"}));
        }
        state.users.insert(username, password);
        (201, json!({"token": TEST_TOKEN}))
    }
}

fn credentials(request: &ApiRequest) -> (String, String) {
    let body = request.body.clone().unwrap_or_default();
    (
        body["username"].as_str().unwrap_or_default().to_string(),
        body["password"].as_str().unwrap_or_default().to_string(),
    )
}

fn find(tasks: &[Task], id: &str) -> Option<usize> {
    let id: TaskId = id.parse().ok()?;
    tasks.iter().position(|t| t.id == id)
}

#[async_trait(?Send)]
impl Transport for FakeTaskService {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.state.borrow_mut().requests.push(request.clone());

        // Suspend once so concurrent callers can interleave
        tokio::task::yield_now().await;

        let failure = self.state.borrow_mut().failures.pop_front();
        match failure {
            Some(Failure::Transport(reason)) => Err(TransportError(reason)),
            Some(Failure::Status(status, body)) => Ok(ApiResponse { status, body }),
            None => {
                let (status, body) = self.route(&request);
                Ok(ApiResponse {
                    status,
                    body: body.to_string(),
                })
            }
        }
    }
}

/// Everything a scenario needs, wired over the fake service
pub struct Harness {
    pub service: Rc<FakeTaskService>,
    pub jar: Rc<MemoryCookieJar>,
    pub tokens: TokenStore,
    pub client: ApiClient,
}

impl Harness {
    pub fn new() -> Self {
        let service = Rc::new(FakeTaskService::new());
        let jar = Rc::new(MemoryCookieJar::new());
        let tokens = TokenStore::new(jar.clone());
        let client = ApiClient::new(service.clone(), tokens.clone());
        Self {
            service,
            jar,
            tokens,
            client,
        }
    }

    /// Same as `new`, with a valid credential already stored
    pub fn signed_in() -> Self {
        let harness = Self::new();
        harness.tokens.write(TEST_TOKEN, crate::token::TOKEN_TTL_SECS);
        harness
    }
}

type Pending = Rc<RefCell<Vec<(u64, Box<dyn FnOnce()>)>>>;

/// Scheduler whose timers only run when the test says so
#[derive(Default)]
pub struct ManualScheduler {
    pending: Pending,
    next_id: RefCell<u64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Run every scheduled callback as if its delay elapsed
    pub fn fire_all(&self) {
        let due: Vec<_> = self.pending.borrow_mut().drain(..).collect();
        for (_, callback) in due {
            callback();
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, _delay: Duration, callback: Box<dyn FnOnce()>) -> Box<dyn TimerHandle> {
        let id = {
            let mut next_id = self.next_id.borrow_mut();
            *next_id += 1;
            *next_id
        };
        self.pending.borrow_mut().push((id, callback));
        Box::new(ManualTimer {
            id,
            pending: Rc::clone(&self.pending),
        })
    }
}

struct ManualTimer {
    id: u64,
    pending: Pending,
}

impl TimerHandle for ManualTimer {
    fn cancel(self: Box<Self>) {
        self.pending.borrow_mut().retain(|(id, _)| *id != self.id);
    }
}
