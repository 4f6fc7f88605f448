//! In-memory [`Backend`] that records every call.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::api::{ApiError, Backend, ListEnvelope, Params};
use crate::entity::Status;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List { resource: String, params: Params },
    Delete { resource: String, id: String },
    SetStatus { resource: String, id: String, status: Status },
    Create { resource: String, body: Value },
    Update { resource: String, id: String, body: Value },
}

/// Canned responses keyed by resource; mutations succeed unless a failure is
/// queued with [`FakeBackend::fail_next`].
#[derive(Default)]
pub struct FakeBackend {
    lists: Mutex<HashMap<String, Result<ListEnvelope, ApiError>>>,
    failure: Mutex<Option<ApiError>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(self, resource: &str, data: Vec<Value>, total: Option<usize>) -> Self {
        self.lists
            .lock()
            .unwrap()
            .insert(resource.to_string(), Ok(ListEnvelope { data, total }));
        self
    }

    pub fn with_list_error(self, resource: &str, err: ApiError) -> Self {
        self.lists.lock().unwrap().insert(resource.to_string(), Err(err));
        self
    }

    pub fn fail_next(&self, err: ApiError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self, resource: &str) -> Vec<Params> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::List { resource: r, params } if r == resource => Some(params),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match self.failure.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn list(&self, resource: &str, params: &Params) -> Result<ListEnvelope, ApiError> {
        self.record(Call::List {
            resource: resource.to_string(),
            params: params.clone(),
        })?;
        self.lists
            .lock()
            .unwrap()
            .get(resource)
            .cloned()
            .unwrap_or_else(|| Ok(ListEnvelope::default()))
    }

    async fn delete(&self, resource: &str, id: &str) -> Result<(), ApiError> {
        self.record(Call::Delete {
            resource: resource.to_string(),
            id: id.to_string(),
        })
    }

    async fn set_status(&self, resource: &str, id: &str, status: Status) -> Result<(), ApiError> {
        self.record(Call::SetStatus {
            resource: resource.to_string(),
            id: id.to_string(),
            status,
        })
    }

    async fn create(&self, resource: &str, body: &Value) -> Result<(), ApiError> {
        self.record(Call::Create {
            resource: resource.to_string(),
            body: body.clone(),
        })
    }

    async fn update(&self, resource: &str, id: &str, body: &Value) -> Result<(), ApiError> {
        self.record(Call::Update {
            resource: resource.to_string(),
            id: id.to_string(),
            body: body.clone(),
        })
    }
}
