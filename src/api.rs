//! Backend REST contract.
//!
//! The list machinery only talks to the [`Backend`] trait. [`ApiClient`] is
//! the HTTP implementation; tests use an in-memory fake.

mod client;
mod envelope;
mod error;
#[cfg(test)]
pub mod fake;

use async_trait::async_trait;
use serde_json::Value;

pub use client::ApiClient;
pub use envelope::{ListEnvelope, extract_id};
pub use error::ApiError;

use crate::entity::Status;

/// Query parameters of a list call, in insertion order.
pub type Params = Vec<(String, String)>;

/// Capability set the console needs from the platform's REST API.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /{resource}/getall?{params}`
    async fn list(&self, resource: &str, params: &Params) -> Result<ListEnvelope, ApiError>;

    /// `DELETE /{resource}/delete/{id}`
    async fn delete(&self, resource: &str, id: &str) -> Result<(), ApiError>;

    /// `PUT /{resource}/status/{id}` with body `{"status": "Y"|"N"}`
    async fn set_status(&self, resource: &str, id: &str, status: Status) -> Result<(), ApiError>;

    /// `POST /{resource}/add`
    async fn create(&self, resource: &str, body: &Value) -> Result<(), ApiError>;

    /// `PUT /{resource}/edit/{id}`
    async fn update(&self, resource: &str, id: &str, body: &Value) -> Result<(), ApiError>;
}
