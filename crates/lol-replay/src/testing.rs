//! In-memory stand-ins for the Replay API and the desktop.

use async_trait::async_trait;
use lol_http::{Method, RawResponse, Request, RequestClient, Transport, TransportFailure};
use lol_input::{AutomationError, LogicalKey, WindowAutomation};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::ReplaySession;

type Step = Result<RawResponse, TransportFailure>;

/// Answers by `METHOD path`. Each route replays its script and then keeps
/// repeating the final step; unknown routes answer 404.
#[derive(Default)]
pub struct FakeReplayApi {
    routes: Mutex<HashMap<String, (VecDeque<Step>, Option<Step>)>>,
    seen: Mutex<Vec<Request>>,
}

impl FakeReplayApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn route(&self, method: Method, path: &str, steps: Vec<Step>) {
        let last = steps.last().cloned();
        self.routes
            .lock()
            .unwrap()
            .insert(format!("{method} {path}"), (steps.into(), last));
    }

    pub fn json(&self, method: Method, path: &str, bodies: Vec<Value>) {
        let steps = bodies
            .iter()
            .map(|body| Ok(RawResponse::json(200, body)))
            .collect();
        self.route(method, path, steps);
    }

    pub fn seen(&self) -> Vec<Request> {
        self.seen.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.seen()
            .iter()
            .filter(|r| *r.method() == method && r.url().ends_with(path))
            .count()
    }

    pub fn session(self: &Arc<Self>) -> ReplaySession {
        let http = RequestClient::with_transport(self.clone()).with_base_delay(Duration::ZERO);
        ReplaySession::new(http)
    }
}

#[async_trait]
impl Transport for FakeReplayApi {
    async fn execute(&self, request: &Request) -> Result<RawResponse, TransportFailure> {
        self.seen.lock().unwrap().push(request.clone());
        let path = request
            .url()
            .splitn(4, '/')
            .nth(3)
            .map(|p| format!("/{p}"))
            .unwrap_or_default();
        let mut routes = self.routes.lock().unwrap();
        match routes.get_mut(&format!("{} {}", request.method(), path)) {
            Some((steps, last)) => steps
                .pop_front()
                .or_else(|| last.clone())
                .unwrap_or_else(|| Ok(RawResponse::new(404, ""))),
            None => Ok(RawResponse::new(404, "")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Focus(String),
    Press(LogicalKey),
    Move(i32, i32),
    Click,
}

/// Records every call; `window_present` decides what focusing reports.
pub struct FakeAutomation {
    pub window_present: bool,
    pub actions: Mutex<Vec<Action>>,
}

impl FakeAutomation {
    pub fn new(window_present: bool) -> Self {
        Self {
            window_present,
            actions: Mutex::new(Vec::new()),
        }
    }

    pub fn presses(&self) -> Vec<LogicalKey> {
        self.actions
            .lock()
            .unwrap()
            .iter()
            .filter_map(|a| match a {
                Action::Press(k) => Some(*k),
                _ => None,
            })
            .collect()
    }

    pub fn focus_calls(&self) -> usize {
        self.actions
            .lock()
            .unwrap()
            .iter()
            .filter(|a| matches!(a, Action::Focus(_)))
            .count()
    }
}

#[async_trait]
impl WindowAutomation for FakeAutomation {
    async fn focus_window(&self, title: &str) -> Result<bool, AutomationError> {
        self.actions
            .lock()
            .unwrap()
            .push(Action::Focus(title.to_string()));
        Ok(self.window_present)
    }

    async fn press_key(&self, key: LogicalKey) -> Result<(), AutomationError> {
        self.actions.lock().unwrap().push(Action::Press(key));
        Ok(())
    }

    async fn move_pointer(&self, x: i32, y: i32) -> Result<(), AutomationError> {
        self.actions.lock().unwrap().push(Action::Move(x, y));
        Ok(())
    }

    async fn click(&self) -> Result<(), AutomationError> {
        self.actions.lock().unwrap().push(Action::Click);
        Ok(())
    }
}
