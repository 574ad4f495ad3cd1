//! Diesel row structs for the customers and accounts tables.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{accounts, customers};

/// Queryable customer row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CustomerRow {
    pub customer_id: i64,
    pub name: String,
    pub email: String,
    pub mobile_number: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

/// Insertable customer row; the key and update columns stay with the
/// database.
#[derive(Debug, Insertable)]
#[diesel(table_name = customers)]
pub(crate) struct NewCustomerRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub mobile_number: &'a str,
    pub created_at: DateTime<Utc>,
    pub created_by: &'a str,
}

/// Changeset applied when updating a customer row.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = customers)]
pub(crate) struct CustomerChangeset<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub mobile_number: &'a str,
    pub updated_at: DateTime<Utc>,
    pub updated_by: &'a str,
}

/// Queryable account row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub account_number: i64,
    pub customer_id: i64,
    pub account_type: String,
    pub branch_address: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

/// Insertable account row.
#[derive(Debug, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub account_number: i64,
    pub customer_id: i64,
    pub account_type: &'a str,
    pub branch_address: &'a str,
    pub created_at: DateTime<Utc>,
    pub created_by: &'a str,
}

/// Changeset applied when updating an account row.
///
/// The account number is the immutable key and is never part of the
/// changeset.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = accounts)]
pub(crate) struct AccountChangeset<'a> {
    pub account_type: &'a str,
    pub branch_address: &'a str,
    pub updated_at: DateTime<Utc>,
    pub updated_by: &'a str,
}
