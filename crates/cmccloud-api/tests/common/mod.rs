//! In-memory provider used by the service tests

#![allow(dead_code)]

use async_trait::async_trait;
use cmccloud_task::{ApiRequest, RawResponse, TaskHandle, Transport};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Answers requests from per-action queues; every task reports `DONE`
/// unless scripted otherwise
#[derive(Default)]
pub struct FakeProvider {
    responses: Mutex<HashMap<String, VecDeque<String>>>,
    task_states: Mutex<HashMap<String, String>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, action: &str, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(action.to_string())
            .or_default()
            .push_back(body.to_string());
        self
    }

    pub fn task_state(self, task_id: &str, state: &str) -> Self {
        self.task_states
            .lock()
            .unwrap()
            .insert(task_id.to_string(), state.to_string());
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn actions(&self) -> Vec<String> {
        self.requests().iter().map(|r| r.to_string()).collect()
    }
}

#[async_trait]
impl Transport for FakeProvider {
    async fn send(&self, request: &ApiRequest) -> RawResponse {
        self.requests.lock().unwrap().push(request.clone());
        let next = self
            .responses
            .lock()
            .unwrap()
            .get_mut(&request.action)
            .and_then(|q| q.pop_front());
        match next {
            Some(body) => RawResponse::ok(body),
            None => RawResponse::transport_failure(format!("unscripted {}", request)),
        }
    }

    async fn query_task_status(&self, task: &TaskHandle) -> RawResponse {
        let state = self
            .task_states
            .lock()
            .unwrap()
            .get(task.as_str())
            .cloned()
            .unwrap_or_else(|| "DONE".to_string());
        RawResponse::ok(format!(r#"{{"id": "{}", "status": "{}"}}"#, task, state))
    }
}
