//! Customer detail lookup aggregating downstream card and loan data.

use std::sync::Arc;

use tracing::{debug, warn};

use super::customer::MobileNumber;
use super::details::{CardsDetails, CustomerDetails, LoansDetails};
use super::error::DomainError;
use super::ports::{AccountStore, DownstreamSources, StoreError};

/// Service assembling the combined customer view.
///
/// The customer and account come from this service's own store; cards and
/// loans are aggregated from downstream services with the caller's
/// correlation identifier propagated unchanged. Downstream failures degrade
/// to an absent section instead of failing the lookup.
#[derive(Clone)]
pub struct CustomerDetailsService {
    store: Arc<dyn AccountStore>,
    downstream: Arc<dyn DownstreamSources>,
}

impl CustomerDetailsService {
    /// Create a new service over the record store and downstream sources.
    pub fn new(store: Arc<dyn AccountStore>, downstream: Arc<dyn DownstreamSources>) -> Self {
        Self { store, downstream }
    }

    fn map_store_error(error: StoreError) -> DomainError {
        match error {
            StoreError::Connection { message } => {
                DomainError::unavailable(format!("record store unavailable: {message}"))
            }
            other => DomainError::internal(format!("record store error: {other}")),
        }
    }

    async fn cards_section(
        &self,
        mobile_number: &MobileNumber,
        correlation_id: &str,
    ) -> Option<CardsDetails> {
        match self.downstream.fetch_cards(mobile_number, correlation_id).await {
            Ok(cards) => cards,
            Err(error) => {
                warn!(%error, correlation_id, "cards lookup failed, omitting section");
                None
            }
        }
    }

    async fn loans_section(
        &self,
        mobile_number: &MobileNumber,
        correlation_id: &str,
    ) -> Option<LoansDetails> {
        match self.downstream.fetch_loans(mobile_number, correlation_id).await {
            Ok(loans) => loans,
            Err(error) => {
                warn!(%error, correlation_id, "loans lookup failed, omitting section");
                None
            }
        }
    }

    /// Fetch the combined customer, account, cards, and loans view.
    pub async fn fetch_customer_details(
        &self,
        mobile_number: &MobileNumber,
        correlation_id: &str,
    ) -> Result<CustomerDetails, DomainError> {
        debug!(correlation_id, "customer details lookup started");

        let customer = self
            .store
            .find_customer_by_mobile(mobile_number)
            .await
            .map_err(Self::map_store_error)?
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "customer not found for mobile number {mobile_number}"
                ))
            })?;

        let account = self
            .store
            .find_account_by_customer(customer.id)
            .await
            .map_err(Self::map_store_error)?
            .ok_or_else(|| {
                DomainError::not_found(format!("account not found for customer {}", customer.id))
            })?;

        let cards = self.cards_section(mobile_number, correlation_id).await;
        let loans = self.loans_section(mobile_number, correlation_id).await;

        debug!(correlation_id, "customer details lookup finished");
        Ok(CustomerDetails {
            customer,
            account,
            cards,
            loans,
        })
    }
}
