//! Driven ports for the accounts domain.
//!
//! Ports describe how the domain expects to interact with the record store
//! and the downstream card/loan services. Each trait exposes strongly typed
//! errors so adapters map their failures into predictable variants instead
//! of returning `anyhow::Result`.

use async_trait::async_trait;
use thiserror::Error;

use super::account::{Account, AccountNumber, NewAccount};
use super::customer::{Customer, CustomerId, MobileNumber, NewCustomer};
use super::details::{CardsDetails, LoansDetails};

/// Errors raised by record store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A connection could not be obtained or was lost.
    #[error("record store connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },

    /// A query or mutation failed during execution.
    #[error("record store query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },

    /// An insert collided with the unique mobile-number constraint.
    #[error("customer already registered with mobile number {mobile_number}")]
    DuplicateMobile {
        /// The conflicting mobile number.
        mobile_number: String,
    },
}

impl StoreError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a duplicate-mobile error for the given number.
    pub fn duplicate_mobile(mobile_number: impl Into<String>) -> Self {
        Self::DuplicateMobile {
            mobile_number: mobile_number.into(),
        }
    }
}

/// Single-row record store for customers and their linked accounts.
///
/// All operations are transactional: the single-row finds and updates touch
/// one row each, and the paired create/delete operations run both writes in
/// one transaction so partial success cannot occur. "Not found" is a
/// distinguishable outcome (`None` / `false`), never an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Look up a customer by unique mobile number.
    async fn find_customer_by_mobile(
        &self,
        mobile_number: &MobileNumber,
    ) -> Result<Option<Customer>, StoreError>;

    /// Look up a customer by identifier.
    async fn find_customer(&self, id: CustomerId) -> Result<Option<Customer>, StoreError>;

    /// Look up an account by its unique account number.
    async fn find_account(
        &self,
        account_number: AccountNumber,
    ) -> Result<Option<Account>, StoreError>;

    /// Look up the account linked to a customer.
    async fn find_account_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<Account>, StoreError>;

    /// Insert a customer and their derived account in one transaction.
    ///
    /// Fails with [`StoreError::DuplicateMobile`] when the mobile number is
    /// already registered; in that case neither row is written.
    async fn create_customer_with_account(
        &self,
        customer: &NewCustomer,
        account: &NewAccount,
    ) -> Result<(Customer, Account), StoreError>;

    /// Update a customer row, returning whether a row matched.
    async fn update_customer(&self, customer: &Customer) -> Result<bool, StoreError>;

    /// Update an account row, returning whether a row matched.
    ///
    /// The account number is immutable; it addresses the row and is never
    /// rewritten.
    async fn update_account(&self, account: &Account) -> Result<bool, StoreError>;

    /// Delete a customer and any linked account in one transaction.
    ///
    /// Returns whether the customer row existed.
    async fn delete_customer_with_account(
        &self,
        customer_id: CustomerId,
    ) -> Result<bool, StoreError>;
}

/// Errors raised by downstream service adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownstreamError {
    /// The downstream service could not be reached or answered with a
    /// server error.
    #[error("downstream request failed: {message}")]
    Request {
        /// Adapter-provided failure description.
        message: String,
    },

    /// The downstream answered but the payload could not be decoded.
    #[error("downstream payload could not be decoded: {message}")]
    Decode {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl DownstreamError {
    /// Create a request error with the given message.
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }

    /// Create a decode error with the given message.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Downstream card and loan sources aggregated into customer details.
///
/// Implementations must propagate `correlation_id` unchanged on every
/// outgoing request so the distributed trace stays intact.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DownstreamSources: Send + Sync {
    /// Fetch card details for a mobile number, `None` when the customer has
    /// no cards.
    async fn fetch_cards(
        &self,
        mobile_number: &MobileNumber,
        correlation_id: &str,
    ) -> Result<Option<CardsDetails>, DownstreamError>;

    /// Fetch loan details for a mobile number, `None` when the customer has
    /// no loans.
    async fn fetch_loans(
        &self,
        mobile_number: &MobileNumber,
        correlation_id: &str,
    ) -> Result<Option<LoansDetails>, DownstreamError>;
}
