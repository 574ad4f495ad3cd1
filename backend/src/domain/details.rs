//! Aggregated customer detail views, including downstream card and loan data.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::account::Account;
use super::customer::Customer;

/// Card details fetched from the cards service.
///
/// The payload is passed through to the caller unchanged; this service does
/// not interpret it beyond deserialisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardsDetails {
    /// Mobile number the card is registered against.
    #[schema(example = "9876543210")]
    pub mobile_number: String,
    /// Card number.
    #[schema(example = "100646930341")]
    pub card_number: String,
    /// Card category, e.g. `"Credit Card"`.
    #[schema(example = "Credit Card")]
    pub card_type: String,
    /// Total limit on the card.
    pub total_limit: i64,
    /// Amount already drawn.
    pub amount_used: i64,
    /// Remaining available amount.
    pub available_amount: i64,
}

/// Loan details fetched from the loans service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoansDetails {
    /// Mobile number the loan is registered against.
    #[schema(example = "9876543210")]
    pub mobile_number: String,
    /// Loan number.
    #[schema(example = "548732457654")]
    pub loan_number: String,
    /// Loan category, e.g. `"Home Loan"`.
    #[schema(example = "Home Loan")]
    pub loan_type: String,
    /// Total sanctioned loan amount.
    pub total_loan: i64,
    /// Amount repaid so far.
    pub amount_paid: i64,
    /// Outstanding amount.
    pub outstanding_amount: i64,
}

/// Combined customer view assembled by the detail lookup service.
///
/// The customer and account sections always reflect this service's own
/// store; the cards and loans sections are best-effort aggregations and are
/// absent when the downstream source has nothing or is unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    /// Customer record owned by this service.
    pub customer: Customer,
    /// Account record owned by this service.
    pub account: Account,
    /// Card details from the cards service, when available.
    pub cards: Option<CardsDetails>,
    /// Loan details from the loans service, when available.
    pub loans: Option<LoansDetails>,
}
