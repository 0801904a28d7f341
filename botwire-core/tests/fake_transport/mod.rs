use botwire_core::serde_json::Value;
use botwire_core::transport::{Transport, TransportError};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

// An in-memory transport replaying scripted response bodies per method.
// Requests are recorded so tests can assert on the encoded bodies.
#[derive(Clone, Default)]
pub struct FakeTransport {
    responses: Arc<Mutex<HashMap<String, VecDeque<Value>>>>,
    requests: Arc<Mutex<Vec<(String, Value)>>>,
}

impl FakeTransport {
    pub fn respond(&self, method: &str, body: Value) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_default()
            .push_back(body);
        self
    }

    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    async fn send(&self, method: &str, body: Value) -> Result<Value, TransportError> {
        self.requests
            .lock()
            .unwrap()
            .push((method.to_string(), body));

        self.responses
            .lock()
            .unwrap()
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| TransportError::new(format!("connection refused for '{method}'")))
    }
}
