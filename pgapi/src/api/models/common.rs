//! Payloads shared across resources.

use serde::{Deserialize, Deserializer, Serialize, de};
use utoipa::ToSchema;

/// Deserializer for optional request fields that may be omitted but not sent as `null`.
///
/// Pair with `#[serde(default)]` so an absent field still becomes `None`.
pub fn present_or_absent<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)?
        .map(Some)
        .ok_or_else(|| de::Error::custom("field must not be null; omit it instead"))
}

/// Plain confirmation payload, e.g. after a delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Body of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message in the negotiated locale
    pub message: String,
    /// Parser output for rejected requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Liveness payload served at `/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
