//! Action dispatcher: confirm, mutate, then ask the controller to refresh.

use serde_json::{Value, json};
use tracing::{info, warn};

use crate::api::{ApiError, Backend};
use crate::entity::{Entity, Status};

/// A mutation of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Delete { id: String, label: String },
    SetStatus { id: String, label: String, status: Status },
    Create { body: Value },
    Update { id: String, body: Value },
}

impl Mutation {
    /// Toast text shown once the mutation went through.
    pub fn success_message(&self, noun: &str) -> String {
        match self {
            Self::Delete { label, .. } => format!("Deleted {noun} {label}"),
            Self::SetStatus { label, status, .. } => {
                format!("Marked {noun} {label} as {}", status.label().to_lowercase())
            }
            Self::Create { .. } => format!("Created {noun}"),
            Self::Update { .. } => format!("Updated {noun}"),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Delete { .. } => "delete",
            Self::SetStatus { .. } => "status",
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
        }
    }
}

/// Prompt shown before a destructive or state-changing mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub title: String,
    pub message: String,
    pub danger: bool,
}

/// What the page should do after a mutation finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Succeeded; refresh the list and show the message.
    Refresh(String),
    /// Rejected; show the backend message and leave the list alone.
    Failed(String),
}

/// Holds the mutation awaiting confirmation and tracks whether one is running.
#[derive(Debug, Default)]
pub struct ActionDispatcher {
    pending: Option<Mutation>,
    in_flight: bool,
}

impl ActionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn is_busy(&self) -> bool {
        self.in_flight
    }

    pub const fn pending(&self) -> Option<&Mutation> {
        self.pending.as_ref()
    }

    pub fn request_delete<E: Entity>(&mut self, item: &E) -> Confirmation {
        let label = item.label();
        self.pending = Some(Mutation::Delete {
            id: item.id().to_string(),
            label: label.clone(),
        });
        Confirmation {
            title: format!("Delete {}", E::NOUN),
            message: format!("Delete {} \"{label}\"? This cannot be undone.", E::NOUN),
            danger: true,
        }
    }

    /// Ask to flip the record's status. `None` when the entity has no binary
    /// status.
    pub fn request_toggle<E: Entity>(&mut self, item: &E) -> Option<Confirmation> {
        let next = item.status()?.toggled();
        let label = item.label();
        self.pending = Some(Mutation::SetStatus {
            id: item.id().to_string(),
            label: label.clone(),
            status: next,
        });
        Some(Confirmation {
            title: "Change status".to_string(),
            message: format!("Mark {} \"{label}\" as {}?", E::NOUN, next.label().to_lowercase()),
            danger: next == Status::Inactive,
        })
    }

    /// The user accepted the prompt.
    pub fn confirm(&mut self) -> Option<Mutation> {
        let mutation = self.pending.take()?;
        self.in_flight = true;
        Some(mutation)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Create or rename through the entity's editable field. Submitting the
    /// prompt is the confirmation, so the mutation starts right away.
    pub fn submit<E: Entity>(&mut self, existing: Option<&E>, value: &str) -> Option<Mutation> {
        let field = E::editable_field()?;
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let body = json!({ field.key: value });
        let mutation = match existing {
            Some(item) => Mutation::Update {
                id: item.id().to_string(),
                body,
            },
            None => Mutation::Create { body },
        };
        self.in_flight = true;
        Some(mutation)
    }

    pub fn on_complete<E: Entity>(
        &mut self,
        mutation: &Mutation,
        result: Result<(), ApiError>,
    ) -> DispatchOutcome {
        self.in_flight = false;
        match result {
            Ok(()) => {
                info!(resource = E::RESOURCE, kind = mutation.kind(), "mutation succeeded");
                DispatchOutcome::Refresh(mutation.success_message(E::NOUN))
            }
            Err(err) => {
                warn!(resource = E::RESOURCE, kind = mutation.kind(), %err, "mutation failed");
                DispatchOutcome::Failed(err.to_string())
            }
        }
    }
}

/// Send `mutation` to the backend.
pub async fn execute(
    backend: &dyn Backend,
    resource: &str,
    mutation: &Mutation,
) -> Result<(), ApiError> {
    match mutation {
        Mutation::Delete { id, .. } => backend.delete(resource, id).await,
        Mutation::SetStatus { id, status, .. } => backend.set_status(resource, id, *status).await,
        Mutation::Create { body } => backend.create(resource, body).await,
        Mutation::Update { id, body } => backend.update(resource, id, body).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{Call, FakeBackend};
    use crate::entity::{Attendance, Course};

    fn course(status: &str) -> Course {
        serde_json::from_value(json!({"_id": "c1", "name": "Rust 101", "status": status})).unwrap()
    }

    #[test]
    fn test_toggle_flips_status() {
        let mut dispatcher = ActionDispatcher::new();
        let prompt = dispatcher.request_toggle(&course("Y")).unwrap();
        assert!(prompt.message.contains("inactive"));
        assert_eq!(
            dispatcher.confirm(),
            Some(Mutation::SetStatus {
                id: "c1".to_string(),
                label: "Rust 101".to_string(),
                status: Status::Inactive
            })
        );
        assert!(dispatcher.is_busy());
    }

    #[test]
    fn test_toggle_without_binary_status() {
        let record: Attendance =
            serde_json::from_value(json!({"_id": "a1", "status": "Present"})).unwrap();
        assert!(ActionDispatcher::new().request_toggle(&record).is_none());
    }

    #[test]
    fn test_cancel_drops_pending_mutation() {
        let mut dispatcher = ActionDispatcher::new();
        dispatcher.request_delete(&course("Y"));
        dispatcher.cancel();
        assert_eq!(dispatcher.confirm(), None);
        assert!(!dispatcher.is_busy());
    }

    #[test]
    fn test_submit_builds_body_from_editable_field() {
        let mut dispatcher = ActionDispatcher::new();
        assert_eq!(
            dispatcher.submit::<Course>(None, "  Go 201 "),
            Some(Mutation::Create {
                body: json!({"name": "Go 201"})
            })
        );
        assert_eq!(
            dispatcher.submit(Some(&course("Y")), "Rust 102"),
            Some(Mutation::Update {
                id: "c1".to_string(),
                body: json!({"name": "Rust 102"})
            })
        );
        assert_eq!(dispatcher.submit::<Course>(None, "   "), None);
    }

    #[tokio::test]
    async fn test_conflict_is_surfaced_verbatim() {
        let backend = FakeBackend::new();
        backend.fail_next(ApiError::Conflict("Course has enrolled students".to_string()));
        let mut dispatcher = ActionDispatcher::new();
        dispatcher.request_delete(&course("Y"));
        let mutation = dispatcher.confirm().unwrap();

        let result = execute(&backend, Course::RESOURCE, &mutation).await;
        let outcome = dispatcher.on_complete::<Course>(&mutation, result);

        assert_eq!(
            outcome,
            DispatchOutcome::Failed("Course has enrolled students".to_string())
        );
        assert!(!dispatcher.is_busy());
        assert_eq!(
            backend.calls(),
            vec![Call::Delete {
                resource: "course".to_string(),
                id: "c1".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_success_requests_refresh() {
        let backend = FakeBackend::new();
        let mut dispatcher = ActionDispatcher::new();
        dispatcher.request_toggle(&course("N"));
        let mutation = dispatcher.confirm().unwrap();

        let result = execute(&backend, Course::RESOURCE, &mutation).await;

        assert_eq!(
            dispatcher.on_complete::<Course>(&mutation, result),
            DispatchOutcome::Refresh("Marked course Rust 101 as active".to_string())
        );
        assert_eq!(
            backend.calls(),
            vec![Call::SetStatus {
                resource: "course".to_string(),
                id: "c1".to_string(),
                status: Status::Active
            }]
        );
    }
}
