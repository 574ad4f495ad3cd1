//! Customer identity and validated input types.

use std::fmt;

use thiserror::Error;

use super::audit::AuditInfo;

/// Maximum accepted length for a customer name.
const NAME_MAX_LEN: usize = 100;

/// Database-generated customer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CustomerId(i64);

impl CustomerId {
    /// Wrap a raw identifier produced by the store.
    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    /// Raw identifier for persistence adapters.
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation failure raised when constructing a [`MobileNumber`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MobileNumberError {
    /// The value is not exactly ten ASCII digits.
    #[error("mobile number must be exactly 10 digits")]
    Malformed,
}

/// Ten-digit mobile number identifying a customer.
///
/// The empty string is rejected along with every other malformed value;
/// there is no blank escape hatch in this contract.
///
/// # Examples
/// ```
/// use backend::domain::MobileNumber;
///
/// let mobile: MobileNumber = "9876543210".parse().expect("valid number");
/// assert_eq!(mobile.as_str(), "9876543210");
/// assert!("98765abcde".parse::<MobileNumber>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MobileNumber(String);

impl MobileNumber {
    /// Validate and wrap a ten-digit mobile number.
    pub fn new(value: impl Into<String>) -> Result<Self, MobileNumberError> {
        let raw = value.into();
        if raw.len() != 10 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MobileNumberError::Malformed);
        }
        Ok(Self(raw))
    }

    /// Borrow the number as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MobileNumber {
    type Err = MobileNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for MobileNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Validation failures raised when constructing [`NewCustomer`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomerValidationError {
    /// Name is empty or exceeds the accepted length.
    #[error("name must be between 1 and 100 characters")]
    InvalidName,
    /// Email is empty or structurally invalid.
    #[error("email must be a valid address")]
    InvalidEmail,
    /// Mobile number failed validation.
    #[error(transparent)]
    InvalidMobileNumber(#[from] MobileNumberError),
}

/// Validated input for creating or updating a customer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    /// Customer display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Unique ten-digit mobile number.
    pub mobile_number: MobileNumber,
}

impl NewCustomer {
    /// Validate the caller-supplied fields and build the input record.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        mobile_number: MobileNumber,
    ) -> Result<Self, CustomerValidationError> {
        let name = name.into();
        if name.trim().is_empty() || name.chars().count() > NAME_MAX_LEN {
            return Err(CustomerValidationError::InvalidName);
        }
        let email = email.into();
        if email.trim().is_empty() || !email.contains('@') {
            return Err(CustomerValidationError::InvalidEmail);
        }
        Ok(Self {
            name,
            email,
            mobile_number,
        })
    }
}

/// Persisted customer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Store-generated identifier.
    pub id: CustomerId,
    /// Customer display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Unique ten-digit mobile number.
    pub mobile_number: MobileNumber,
    /// Audit metadata stamped by the store.
    pub audit: AuditInfo,
}
