//! Customer and account payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Account, CardsDetails, Customer, CustomerDetails, LoansDetails};

/// Account details carried inside [`CustomerDto`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    /// Ten-digit account number; absent on create requests, where the
    /// service generates it.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 1_234_567_890_i64)]
    pub account_number: Option<i64>,
    /// Account category.
    #[schema(example = "Savings")]
    pub account_type: String,
    /// Branch address of the holding branch.
    #[schema(example = "123 Main Street, New York")]
    pub branch_address: String,
}

/// Customer payload for create, fetch, and update operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    /// Customer display name.
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Contact email address.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Ten-digit mobile number.
    #[schema(example = "9876543210")]
    pub mobile_number: String,
    /// Linked account details. Optional on create requests; always present
    /// in fetch responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountDto>,
}

impl CustomerDto {
    /// Build the fetch response payload from persisted records.
    pub fn from_records(customer: &Customer, account: &Account) -> Self {
        Self {
            name: customer.name.clone(),
            email: customer.email.clone(),
            mobile_number: customer.mobile_number.to_string(),
            account: Some(AccountDto {
                account_number: Some(account.account_number.as_i64()),
                account_type: account.account_type.clone(),
                branch_address: account.branch_address.clone(),
            }),
        }
    }
}

/// Aggregated customer view returned by the detail lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetailsDto {
    /// Customer display name.
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Contact email address.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Ten-digit mobile number.
    #[schema(example = "9876543210")]
    pub mobile_number: String,
    /// Linked account details.
    pub account: AccountDto,
    /// Card details from the cards service, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards: Option<CardsDetails>,
    /// Loan details from the loans service, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loans: Option<LoansDetails>,
}

impl From<CustomerDetails> for CustomerDetailsDto {
    fn from(details: CustomerDetails) -> Self {
        let CustomerDetails {
            customer,
            account,
            cards,
            loans,
        } = details;

        Self {
            name: customer.name,
            email: customer.email,
            mobile_number: customer.mobile_number.to_string(),
            account: AccountDto {
                account_number: Some(account.account_number.as_i64()),
                account_type: account.account_type,
                branch_address: account.branch_address,
            },
            cards,
            loans,
        }
    }
}
