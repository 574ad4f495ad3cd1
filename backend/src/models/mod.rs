//! Wire payloads for the REST API.
//!
//! Purpose: define the JSON request and response shapes exchanged with
//! clients, separate from the domain entities they are built from. Keep the
//! serde contracts documented on each type.
//!
//! Public surface:
//! - `CustomerDto` / `AccountDto` — CRUD request and response payloads.
//! - `CustomerDetailsDto` — aggregated customer view.
//! - `StatusDto` — status payloads for create/update/delete outcomes.
//! - `ContactInfoDto` / `ContactDetailsDto` — static contact information.
//! - `Error` / `ErrorCode` — structured error payload.

pub mod customer;
pub mod error;
pub mod response;

pub use customer::{AccountDto, CustomerDetailsDto, CustomerDto};
pub use error::{Error, ErrorCode};
pub use response::{ContactDetailsDto, ContactInfoDto, StatusDto};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
