//! Accounts service: create, fetch, update, and delete orchestration.
//!
//! A stateless orchestrator over the record store. It owns the business
//! rules (duplicate-mobile rejection, account-number generation, update and
//! delete outcomes) while the store owns row-level persistence.

use std::sync::Arc;

use tracing::debug;

use super::account::{Account, AccountFieldsError, AccountNumber, AccountOpening, NewAccount};
use super::customer::{Customer, MobileNumber, NewCustomer};
use super::error::DomainError;
use super::ports::{AccountStore, StoreError};

/// Validated input for updating an account and its owning customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountUpdate {
    /// Number of the account to update.
    pub account_number: AccountNumber,
    /// Replacement customer fields.
    pub customer: NewCustomer,
    /// Replacement account category.
    pub account_type: String,
    /// Replacement branch address.
    pub branch_address: String,
}

impl AccountUpdate {
    /// Validate the caller-supplied account fields and build the input.
    pub fn new(
        account_number: AccountNumber,
        customer: NewCustomer,
        account_type: impl Into<String>,
        branch_address: impl Into<String>,
    ) -> Result<Self, AccountFieldsError> {
        let fields = AccountOpening::new(account_type, branch_address)?;
        Ok(Self {
            account_number,
            customer,
            account_type: fields.account_type,
            branch_address: fields.branch_address,
        })
    }
}

/// Service coordinating customer and account records.
#[derive(Clone)]
pub struct AccountsService {
    store: Arc<dyn AccountStore>,
}

impl AccountsService {
    /// Create a new service over the given record store.
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    fn map_store_error(error: StoreError) -> DomainError {
        match error {
            StoreError::Connection { message } => {
                DomainError::unavailable(format!("record store unavailable: {message}"))
            }
            StoreError::Query { message } => {
                DomainError::internal(format!("record store error: {message}"))
            }
            StoreError::DuplicateMobile { mobile_number } => DomainError::conflict(format!(
                "customer already registered with mobile number {mobile_number}"
            )),
        }
    }

    /// Create a customer and a derived account.
    ///
    /// The account number is generated here; the submitted opening fields
    /// are persisted as-is. Fails with a conflict when the mobile number is
    /// already registered; in that case nothing is written. Both inserts
    /// run in one store transaction.
    pub async fn create_account(
        &self,
        customer: NewCustomer,
        opening: AccountOpening,
    ) -> Result<(Customer, Account), DomainError> {
        let existing = self
            .store
            .find_customer_by_mobile(&customer.mobile_number)
            .await
            .map_err(Self::map_store_error)?;
        if existing.is_some() {
            return Err(DomainError::conflict(format!(
                "customer already registered with mobile number {}",
                customer.mobile_number
            )));
        }

        let account = NewAccount::new(AccountNumber::generate(), opening);
        let (customer, account) = self
            .store
            .create_customer_with_account(&customer, &account)
            .await
            .map_err(Self::map_store_error)?;

        debug!(
            customer_id = %customer.id,
            account_number = %account.account_number,
            "account created"
        );
        Ok((customer, account))
    }

    /// Fetch the customer and linked account for a mobile number.
    pub async fn fetch_account(
        &self,
        mobile_number: &MobileNumber,
    ) -> Result<(Customer, Account), DomainError> {
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

        Ok((customer, account))
    }

    /// Update an account and its owning customer.
    ///
    /// Returns `Ok(false)` when the account or its customer cannot be
    /// found; the handler maps this to the failed-expectation response.
    pub async fn update_account(&self, update: AccountUpdate) -> Result<bool, DomainError> {
        let Some(account) = self
            .store
            .find_account(update.account_number)
            .await
            .map_err(Self::map_store_error)?
        else {
            return Ok(false);
        };

        let changed = Account {
            account_type: update.account_type,
            branch_address: update.branch_address,
            ..account.clone()
        };
        if !self
            .store
            .update_account(&changed)
            .await
            .map_err(Self::map_store_error)?
        {
            return Ok(false);
        }

        let Some(customer) = self
            .store
            .find_customer(account.customer_id)
            .await
            .map_err(Self::map_store_error)?
        else {
            return Ok(false);
        };

        let changed = Customer {
            name: update.customer.name,
            email: update.customer.email,
            mobile_number: update.customer.mobile_number,
            ..customer
        };
        self.store
            .update_customer(&changed)
            .await
            .map_err(Self::map_store_error)
    }

    /// Delete the customer and linked account for a mobile number.
    ///
    /// Returns `Ok(false)` when no customer matches. Both deletes run in
    /// one store transaction.
    pub async fn delete_account(&self, mobile_number: &MobileNumber) -> Result<bool, DomainError> {
        let Some(customer) = self
            .store
            .find_customer_by_mobile(mobile_number)
            .await
            .map_err(Self::map_store_error)?
        else {
            return Ok(false);
        };

        let deleted = self
            .store
            .delete_customer_with_account(customer.id)
            .await
            .map_err(Self::map_store_error)?;
        if deleted {
            debug!(customer_id = %customer.id, "customer and account deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::AuditInfo;
    use crate::domain::customer::CustomerId;
    use crate::domain::error::ErrorKind;
    use crate::domain::ports::MockAccountStore;
    use chrono::Utc;
    use rstest::rstest;

    const MOBILE: &str = "9876543210";

    fn mobile() -> MobileNumber {
        MobileNumber::new(MOBILE).expect("valid number")
    }

    fn customer() -> Customer {
        Customer {
            id: CustomerId::from_i64(7),
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            mobile_number: mobile(),
            audit: AuditInfo::on_insert(Utc::now()),
        }
    }

    fn account() -> Account {
        Account {
            account_number: AccountNumber::new(1_234_567_890).expect("in range"),
            customer_id: CustomerId::from_i64(7),
            account_type: "Savings".into(),
            branch_address: "123 Main Street, New York".into(),
            audit: AuditInfo::on_insert(Utc::now()),
        }
    }

    fn new_customer() -> NewCustomer {
        NewCustomer::new("Ada Lovelace", "ada@example.com", mobile()).expect("valid input")
    }

    #[rstest]
    #[tokio::test]
    async fn create_persists_the_submitted_opening_fields() {
        let mut store = MockAccountStore::new();
        store
            .expect_find_customer_by_mobile()
            .returning(|_| Ok(None));
        store
            .expect_create_customer_with_account()
            .withf(|_, new_account| {
                new_account.account_type == "Savings"
                    && new_account.branch_address == "123 Main St"
                    && AccountNumber::new(new_account.account_number.as_i64()).is_ok()
            })
            .returning(|_, _| Ok((customer(), account())));

        let service = AccountsService::new(Arc::new(store));
        let opening = AccountOpening::new("Savings", "123 Main St").expect("valid fields");
        let (created_customer, created_account) = service
            .create_account(new_customer(), opening)
            .await
            .expect("create succeeds");

        assert_eq!(created_customer.mobile_number, mobile());
        assert_eq!(created_account.customer_id, created_customer.id);
    }

    #[rstest]
    #[tokio::test]
    async fn create_without_opening_fields_uses_the_defaults() {
        let mut store = MockAccountStore::new();
        store
            .expect_find_customer_by_mobile()
            .returning(|_| Ok(None));
        store
            .expect_create_customer_with_account()
            .withf(|_, new_account| {
                new_account.account_type == crate::domain::account::DEFAULT_ACCOUNT_TYPE
                    && new_account.branch_address == crate::domain::account::DEFAULT_BRANCH_ADDRESS
            })
            .returning(|_, _| Ok((customer(), account())));

        let service = AccountsService::new(Arc::new(store));
        service
            .create_account(new_customer(), AccountOpening::default())
            .await
            .expect("create succeeds");
    }

    #[rstest]
    #[tokio::test]
    async fn create_rejects_registered_mobile_without_writing() {
        let mut store = MockAccountStore::new();
        store
            .expect_find_customer_by_mobile()
            .returning(|_| Ok(Some(customer())));
        store.expect_create_customer_with_account().never();

        let service = AccountsService::new(Arc::new(store));
        let err = service
            .create_account(new_customer(), AccountOpening::default())
            .await
            .expect_err("duplicate mobile must conflict");

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(err.message().contains(MOBILE));
    }

    #[rstest]
    #[tokio::test]
    async fn create_surfaces_store_level_duplicate_as_conflict() {
        let mut store = MockAccountStore::new();
        store
            .expect_find_customer_by_mobile()
            .returning(|_| Ok(None));
        store
            .expect_create_customer_with_account()
            .returning(|_, _| Err(StoreError::duplicate_mobile(MOBILE)));

        let service = AccountsService::new(Arc::new(store));
        let err = service
            .create_account(new_customer(), AccountOpening::default())
            .await
            .expect_err("race on insert must conflict");

        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn fetch_returns_customer_with_linked_account() {
        let mut store = MockAccountStore::new();
        store
            .expect_find_customer_by_mobile()
            .returning(|_| Ok(Some(customer())));
        store
            .expect_find_account_by_customer()
            .returning(|_| Ok(Some(account())));

        let service = AccountsService::new(Arc::new(store));
        let (fetched_customer, fetched_account) = service
            .fetch_account(&mobile())
            .await
            .expect("fetch succeeds");

        assert_eq!(fetched_customer.name, "Ada Lovelace");
        assert_eq!(fetched_account.account_type, "Savings");
    }

    #[rstest]
    #[tokio::test]
    async fn fetch_unknown_mobile_is_not_found() {
        let mut store = MockAccountStore::new();
        store
            .expect_find_customer_by_mobile()
            .returning(|_| Ok(None));

        let service = AccountsService::new(Arc::new(store));
        let err = service
            .fetch_account(&mobile())
            .await
            .expect_err("missing customer");

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn fetch_customer_without_account_is_not_found() {
        let mut store = MockAccountStore::new();
        store
            .expect_find_customer_by_mobile()
            .returning(|_| Ok(Some(customer())));
        store
            .expect_find_account_by_customer()
            .returning(|_| Ok(None));

        let service = AccountsService::new(Arc::new(store));
        let err = service
            .fetch_account(&mobile())
            .await
            .expect_err("missing account");

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    fn update_input() -> AccountUpdate {
        AccountUpdate::new(
            AccountNumber::new(1_234_567_890).expect("in range"),
            new_customer(),
            "Current",
            "42 New Street, London",
        )
        .expect("valid update input")
    }

    #[rstest]
    #[tokio::test]
    async fn update_unknown_account_returns_false_without_writing() {
        let mut store = MockAccountStore::new();
        store.expect_find_account().returning(|_| Ok(None));
        store.expect_update_account().never();
        store.expect_update_customer().never();

        let service = AccountsService::new(Arc::new(store));
        let updated = service
            .update_account(update_input())
            .await
            .expect("lookup succeeds");

        assert!(!updated);
    }

    #[rstest]
    #[tokio::test]
    async fn update_rewrites_account_and_customer_fields() {
        let mut store = MockAccountStore::new();
        store.expect_find_account().returning(|_| Ok(Some(account())));
        store
            .expect_update_account()
            .withf(|changed| {
                changed.account_type == "Current"
                    && changed.branch_address == "42 New Street, London"
            })
            .returning(|_| Ok(true));
        store
            .expect_find_customer()
            .returning(|_| Ok(Some(customer())));
        store
            .expect_update_customer()
            .withf(|changed| changed.name == "Ada Lovelace")
            .returning(|_| Ok(true));

        let service = AccountsService::new(Arc::new(store));
        let updated = service
            .update_account(update_input())
            .await
            .expect("update succeeds");

        assert!(updated);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_unknown_mobile_returns_false() {
        let mut store = MockAccountStore::new();
        store
            .expect_find_customer_by_mobile()
            .returning(|_| Ok(None));
        store.expect_delete_customer_with_account().never();

        let service = AccountsService::new(Arc::new(store));
        let deleted = service
            .delete_account(&mobile())
            .await
            .expect("lookup succeeds");

        assert!(!deleted);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_the_pair() {
        let mut store = MockAccountStore::new();
        store
            .expect_find_customer_by_mobile()
            .returning(|_| Ok(Some(customer())));
        store
            .expect_delete_customer_with_account()
            .withf(|id| id.as_i64() == 7)
            .returning(|_| Ok(true));

        let service = AccountsService::new(Arc::new(store));
        let deleted = service
            .delete_account(&mobile())
            .await
            .expect("delete succeeds");

        assert!(deleted);
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failures_surface_as_unavailable() {
        let mut store = MockAccountStore::new();
        store
            .expect_find_customer_by_mobile()
            .returning(|_| Err(StoreError::connection("refused")));

        let service = AccountsService::new(Arc::new(store));
        let err = service
            .fetch_account(&mobile())
            .await
            .expect_err("store is down");

        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }

    #[rstest]
    fn update_input_rejects_empty_account_fields() {
        let number = AccountNumber::new(1_234_567_890).expect("in range");
        assert_eq!(
            AccountUpdate::new(number, new_customer(), " ", "somewhere"),
            Err(AccountFieldsError::EmptyAccountType)
        );
        assert_eq!(
            AccountUpdate::new(number, new_customer(), "Savings", ""),
            Err(AccountFieldsError::EmptyBranchAddress)
        );
    }
}
