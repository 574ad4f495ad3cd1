//! REST API handlers.
//!
//! Pure translation layer: each handler validates its inputs by
//! constructing the domain's newtypes, delegates to a service, and maps the
//! outcome onto a status code and payload. No business logic lives here.

pub mod accounts;
pub mod customers;
pub mod info;

use serde::Deserialize;

use crate::domain::MobileNumber;
use crate::models::Error;

/// Query parameters carrying the target mobile number.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileNumberQuery {
    /// Ten-digit mobile number.
    pub mobile_number: String,
}

/// Validate the mobile number at the handler boundary.
pub(crate) fn parse_mobile(raw: &str, api_path: &str) -> Result<MobileNumber, Error> {
    MobileNumber::new(raw)
        .map_err(|err| Error::invalid_request(api_path, format!("mobileNumber: {err}")))
}
