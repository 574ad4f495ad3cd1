//! PostgreSQL-backed [`AccountStore`] implementation using Diesel.
//!
//! The adapter owns the transaction boundaries: the paired customer and
//! account writes issued by `create_customer_with_account` and
//! `delete_customer_with_account` run inside a single transaction, so a
//! partial pair can never be observed. Audit columns are stamped here and
//! nowhere else.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::audit::{AuditInfo, SERVICE_AUDITOR};
use crate::domain::ports::{AccountStore, StoreError};
use crate::domain::{Account, AccountNumber, Customer, CustomerId, MobileNumber, NewAccount, NewCustomer};

use super::models::{
    AccountChangeset, AccountRow, CustomerChangeset, CustomerRow, NewAccountRow, NewCustomerRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{accounts, customers};

/// Diesel-backed implementation of the [`AccountStore`] port.
#[derive(Clone)]
pub struct DieselAccountStore {
    pool: DbPool,
}

impl DieselAccountStore {
    /// Create a new store over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to store errors.
fn map_pool_error(error: PoolError) -> StoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            StoreError::connection(message)
        }
    }
}

/// Map Diesel errors to store errors.
fn map_diesel_error(error: diesel::result::Error) -> StoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => StoreError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreError::connection("database connection error")
        }
        _ => StoreError::query("database error"),
    }
}

/// Map Diesel errors on writes that may collide with the unique mobile
/// number constraint.
fn map_write_error(error: diesel::result::Error, mobile_number: &str) -> StoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
            if info
                .constraint_name()
                .is_some_and(|name| name.contains("mobile")) =>
        {
            StoreError::duplicate_mobile(mobile_number)
        }
        _ => map_diesel_error(error),
    }
}

/// Convert a database row to a domain customer.
fn row_to_customer(row: CustomerRow) -> Result<Customer, StoreError> {
    let CustomerRow {
        customer_id,
        name,
        email,
        mobile_number,
        created_at,
        created_by,
        updated_at,
        updated_by,
    } = row;

    let mobile_number = MobileNumber::new(mobile_number)
        .map_err(|_| StoreError::query("stored mobile number is malformed"))?;

    Ok(Customer {
        id: CustomerId::from_i64(customer_id),
        name,
        email,
        mobile_number,
        audit: AuditInfo {
            created_at,
            created_by,
            updated_at,
            updated_by,
        },
    })
}

/// Convert a database row to a domain account.
fn row_to_account(row: AccountRow) -> Result<Account, StoreError> {
    let AccountRow {
        account_number,
        customer_id,
        account_type,
        branch_address,
        created_at,
        created_by,
        updated_at,
        updated_by,
    } = row;

    let account_number = AccountNumber::new(account_number)
        .map_err(|_| StoreError::query("stored account number is out of range"))?;

    Ok(Account {
        account_number,
        customer_id: CustomerId::from_i64(customer_id),
        account_type,
        branch_address,
        audit: AuditInfo {
            created_at,
            created_by,
            updated_at,
            updated_by,
        },
    })
}

#[async_trait]
impl AccountStore for DieselAccountStore {
    async fn find_customer_by_mobile(
        &self,
        mobile_number: &MobileNumber,
    ) -> Result<Option<Customer>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CustomerRow> = customers::table
            .filter(customers::mobile_number.eq(mobile_number.as_str()))
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_customer).transpose()
    }

    async fn find_customer(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CustomerRow> = customers::table
            .filter(customers::customer_id.eq(id.as_i64()))
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_customer).transpose()
    }

    async fn find_account(
        &self,
        account_number: AccountNumber,
    ) -> Result<Option<Account>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<AccountRow> = accounts::table
            .filter(accounts::account_number.eq(account_number.as_i64()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn find_account_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<Account>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<AccountRow> = accounts::table
            .filter(accounts::customer_id.eq(customer_id.as_i64()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn create_customer_with_account(
        &self,
        customer: &NewCustomer,
        account: &NewAccount,
    ) -> Result<(Customer, Account), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let now = Utc::now();

        let new_customer = NewCustomerRow {
            name: &customer.name,
            email: &customer.email,
            mobile_number: customer.mobile_number.as_str(),
            created_at: now,
            created_by: SERVICE_AUDITOR,
        };

        let (customer_row, account_row) = conn
            .transaction::<(CustomerRow, AccountRow), diesel::result::Error, _>(|conn| {
                async move {
                    let customer_row: CustomerRow = diesel::insert_into(customers::table)
                        .values(&new_customer)
                        .returning(CustomerRow::as_returning())
                        .get_result(conn)
                        .await?;

                    let new_account = NewAccountRow {
                        account_number: account.account_number.as_i64(),
                        customer_id: customer_row.customer_id,
                        account_type: &account.account_type,
                        branch_address: &account.branch_address,
                        created_at: now,
                        created_by: SERVICE_AUDITOR,
                    };
                    let account_row: AccountRow = diesel::insert_into(accounts::table)
                        .values(&new_account)
                        .returning(AccountRow::as_returning())
                        .get_result(conn)
                        .await?;

                    Ok((customer_row, account_row))
                }
                .scope_boxed()
            })
            .await
            .map_err(|error| map_write_error(error, customer.mobile_number.as_str()))?;

        Ok((row_to_customer(customer_row)?, row_to_account(account_row)?))
    }

    async fn update_customer(&self, customer: &Customer) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = CustomerChangeset {
            name: &customer.name,
            email: &customer.email,
            mobile_number: customer.mobile_number.as_str(),
            updated_at: Utc::now(),
            updated_by: SERVICE_AUDITOR,
        };

        let updated = diesel::update(
            customers::table.filter(customers::customer_id.eq(customer.id.as_i64())),
        )
        .set(&changeset)
        .execute(&mut conn)
        .await
        .map_err(|error| map_write_error(error, customer.mobile_number.as_str()))?;

        Ok(updated > 0)
    }

    async fn update_account(&self, account: &Account) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = AccountChangeset {
            account_type: &account.account_type,
            branch_address: &account.branch_address,
            updated_at: Utc::now(),
            updated_by: SERVICE_AUDITOR,
        };

        let updated = diesel::update(
            accounts::table.filter(accounts::account_number.eq(account.account_number.as_i64())),
        )
        .set(&changeset)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }

    async fn delete_customer_with_account(
        &self,
        customer_id: CustomerId,
    ) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = customer_id.as_i64();

        let deleted = conn
            .transaction::<usize, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::delete(accounts::table.filter(accounts::customer_id.eq(id)))
                        .execute(conn)
                        .await?;
                    diesel::delete(customers::table.filter(customers::customer_id.eq(id)))
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
