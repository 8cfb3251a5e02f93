//! Request and response bodies of the HTTP API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// An active event in the unified listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventSummary {
    /// Public identifier of the event
    pub uuid: Uuid,
    /// Event title as last reported by its provider
    pub title: String,
}

impl From<entity::event::Model> for EventSummary {
    fn from(event: entity::event::Model) -> Self {
        Self {
            uuid: event.uuid,
            title: event.title,
        }
    }
}
