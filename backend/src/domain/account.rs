//! Account entity and account-number generation.

use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use super::audit::AuditInfo;
use super::customer::CustomerId;

/// Account type assigned to newly created accounts.
pub const DEFAULT_ACCOUNT_TYPE: &str = "Savings";

/// Branch address assigned to newly created accounts.
pub const DEFAULT_BRANCH_ADDRESS: &str = "123 Main Street, New York";

const ACCOUNT_NUMBER_MIN: i64 = 1_000_000_000;
const ACCOUNT_NUMBER_MAX: i64 = 9_999_999_999;

/// Validation failure raised when constructing an [`AccountNumber`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountNumberError {
    /// The value is outside the ten-digit range.
    #[error("account number must be 10 digits")]
    OutOfRange,
}

/// Unique ten-digit account identifier.
///
/// Immutable once assigned: update operations address rows by this value but
/// never change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountNumber(i64);

impl AccountNumber {
    /// Validate and wrap a ten-digit account number.
    pub fn new(value: i64) -> Result<Self, AccountNumberError> {
        if !(ACCOUNT_NUMBER_MIN..=ACCOUNT_NUMBER_MAX).contains(&value) {
            return Err(AccountNumberError::OutOfRange);
        }
        Ok(Self(value))
    }

    /// Draw a fresh random number from the ten-digit range.
    ///
    /// Uniqueness is enforced by the store's primary key, not here; the
    /// range is large enough that collisions on insert are vanishingly rare
    /// and surface as a store error when they do happen.
    pub fn generate() -> Self {
        let mut rng = SmallRng::from_entropy();
        Self(rng.gen_range(ACCOUNT_NUMBER_MIN..=ACCOUNT_NUMBER_MAX))
    }

    /// Raw number for persistence adapters and wire payloads.
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation failures raised for caller-supplied account fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountFieldsError {
    /// Account type is empty.
    #[error("account type cannot be empty")]
    EmptyAccountType,
    /// Branch address is empty.
    #[error("branch address cannot be empty")]
    EmptyBranchAddress,
}

/// Validated account fields supplied when opening or updating an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountOpening {
    /// Account category, e.g. `"Savings"`.
    pub account_type: String,
    /// Branch address of the holding branch.
    pub branch_address: String,
}

impl AccountOpening {
    /// Validate the caller-supplied fields.
    pub fn new(
        account_type: impl Into<String>,
        branch_address: impl Into<String>,
    ) -> Result<Self, AccountFieldsError> {
        let account_type = account_type.into();
        if account_type.trim().is_empty() {
            return Err(AccountFieldsError::EmptyAccountType);
        }
        let branch_address = branch_address.into();
        if branch_address.trim().is_empty() {
            return Err(AccountFieldsError::EmptyBranchAddress);
        }
        Ok(Self {
            account_type,
            branch_address,
        })
    }
}

impl Default for AccountOpening {
    fn default() -> Self {
        Self {
            account_type: DEFAULT_ACCOUNT_TYPE.to_owned(),
            branch_address: DEFAULT_BRANCH_ADDRESS.to_owned(),
        }
    }
}

/// Validated input for creating an account record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Generated ten-digit account number.
    pub account_number: AccountNumber,
    /// Account category, e.g. `"Savings"`.
    pub account_type: String,
    /// Branch address of the holding branch.
    pub branch_address: String,
}

impl NewAccount {
    /// Combine a generated account number with the opening fields.
    pub fn new(account_number: AccountNumber, opening: AccountOpening) -> Self {
        Self {
            account_number,
            account_type: opening.account_type,
            branch_address: opening.branch_address,
        }
    }
}

/// Persisted account record linked to its owning customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Unique ten-digit account number.
    pub account_number: AccountNumber,
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Account category, e.g. `"Savings"`.
    pub account_type: String,
    /// Branch address of the holding branch.
    pub branch_address: String,
    /// Audit metadata stamped by the store.
    pub audit: AuditInfo,
}
