//! Status payloads and static contact information.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Status code for successful creation.
pub const STATUS_201: &str = "201";
/// Message for successful creation.
pub const MESSAGE_201: &str = "Account created successfully";
/// Status code for a processed request.
pub const STATUS_200: &str = "200";
/// Message for a processed request.
pub const MESSAGE_200: &str = "Request processed successfully";
/// Status code for a failed expectation.
pub const STATUS_417: &str = "417";
/// Message for a failed update.
pub const MESSAGE_417_UPDATE: &str =
    "Update operation failed. Please try again or contact Dev team";
/// Message for a failed delete.
pub const MESSAGE_417_DELETE: &str =
    "Delete operation failed. Please try again or contact Dev team";

/// Status payload returned by the create, update, and delete operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusDto {
    /// Status code as a string.
    #[schema(example = "200")]
    pub status_code: String,
    /// Human-readable status message.
    #[schema(example = "Request processed successfully")]
    pub status_msg: String,
}

impl StatusDto {
    fn new(status_code: &str, status_msg: &str) -> Self {
        Self {
            status_code: status_code.to_owned(),
            status_msg: status_msg.to_owned(),
        }
    }

    /// Payload for a successful create.
    pub fn created() -> Self {
        Self::new(STATUS_201, MESSAGE_201)
    }

    /// Payload for a successfully processed request.
    pub fn ok() -> Self {
        Self::new(STATUS_200, MESSAGE_200)
    }

    /// Payload for a failed update.
    pub fn update_failed() -> Self {
        Self::new(STATUS_417, MESSAGE_417_UPDATE)
    }

    /// Payload for a failed delete.
    pub fn delete_failed() -> Self {
        Self::new(STATUS_417, MESSAGE_417_DELETE)
    }
}

/// Contact person inside [`ContactInfoDto`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetailsDto {
    /// Contact name.
    #[schema(example = "Aria Byrne")]
    pub name: String,
    /// Contact email address.
    #[schema(example = "aria@example.com")]
    pub email: String,
}

/// Static contact information served by the contact-info endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfoDto {
    /// Welcome message.
    #[schema(example = "Welcome to the accounts microservice")]
    pub message: String,
    /// Primary contact person.
    pub contact_details: ContactDetailsDto,
    /// On-call support numbers.
    pub on_call_support: Vec<String>,
}
