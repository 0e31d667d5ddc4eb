//! Scripted transport shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use cmccloud_task::{ApiErrorBody, ApiRequest, RawResponse, TaskHandle, Transport};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Replays canned responses per action and per task id, and records every call
#[derive(Default)]
pub struct ScriptedTransport {
    actions: Mutex<HashMap<String, VecDeque<RawResponse>>>,
    tasks: Mutex<HashMap<String, VecDeque<RawResponse>>>,
    log: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next call to `action`
    pub fn on(self, action: &str, response: RawResponse) -> Self {
        self.actions
            .lock()
            .unwrap()
            .entry(action.to_string())
            .or_default()
            .push_back(response);
        self
    }

    /// Queue a successful submission returning `task_id`
    pub fn submits(self, action: &str, task_id: &str) -> Self {
        self.on(action, RawResponse::ok(format!(r#"{{"jobid": "{}"}}"#, task_id)))
    }

    /// Queue a failed submission
    pub fn rejects(self, action: &str, status: u16, text: &str) -> Self {
        self.on(action, RawResponse::failed(status, ApiErrorBody::new(0, text), ""))
    }

    /// Script the states a task reports; the last one repeats
    pub fn task_states(self, task_id: &str, states: &[&str]) -> Self {
        {
            let mut tasks = self.tasks.lock().unwrap();
            let queue = tasks.entry(task_id.to_string()).or_default();
            for state in states {
                queue.push_back(RawResponse::ok(format!(
                    r#"{{"id": "{}", "status": "{}", "progress": 0}}"#,
                    task_id, state
                )));
            }
        }
        self
    }

    /// Queue a raw status response for `task_id`
    pub fn on_task(self, task_id: &str, response: RawResponse) -> Self {
        self.tasks
            .lock()
            .unwrap()
            .entry(task_id.to_string())
            .or_default()
            .push_back(response);
        self
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    /// Number of status queries made for `task_id`
    pub fn queries(&self, task_id: &str) -> usize {
        let entry = format!("task {}", task_id);
        self.log().iter().filter(|l| **l == entry).count()
    }

    /// Number of submissions made to `action`
    pub fn submissions(&self, action: &str) -> usize {
        self.log()
            .iter()
            .filter(|l| l.split(' ').nth(1) == Some(action))
            .count()
    }

    fn next(queue: Option<&mut VecDeque<RawResponse>>) -> RawResponse {
        match queue {
            Some(q) if q.len() > 1 => q.pop_front().unwrap_or_default(),
            Some(q) => q
                .front()
                .cloned()
                .unwrap_or_else(|| RawResponse::transport_failure("no scripted response")),
            None => RawResponse::transport_failure("no scripted response"),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &ApiRequest) -> RawResponse {
        self.log
            .lock()
            .unwrap()
            .push(format!("{} {} {}", request.method, request.action, request.params));

        let mut actions = self.actions.lock().unwrap();
        match actions.get_mut(&request.action) {
            Some(q) if !q.is_empty() => q.pop_front().unwrap_or_default(),
            _ => RawResponse::transport_failure(format!(
                "no scripted response for {}",
                request.action
            )),
        }
    }

    async fn query_task_status(&self, task: &TaskHandle) -> RawResponse {
        self.log.lock().unwrap().push(format!("task {}", task));
        let mut tasks = self.tasks.lock().unwrap();
        Self::next(tasks.get_mut(task.as_str()))
    }
}
