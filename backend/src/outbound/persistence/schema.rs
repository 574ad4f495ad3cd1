//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`
//! exactly. They are used by Diesel for type-safe SQL generation; regenerate
//! or update them whenever a migration changes the schema.

diesel::table! {
    /// Customer records.
    ///
    /// One row per registered customer; `mobile_number` carries a unique
    /// constraint.
    customers (customer_id) {
        /// Primary key, generated by the database.
        customer_id -> Int8,
        /// Customer display name.
        name -> Varchar,
        /// Contact email address.
        email -> Varchar,
        /// Unique ten-digit mobile number.
        mobile_number -> Varchar,
        /// Row creation timestamp.
        created_at -> Timestamptz,
        /// Principal that created the row.
        created_by -> Varchar,
        /// Last modification timestamp.
        updated_at -> Nullable<Timestamptz>,
        /// Principal that last modified the row.
        updated_by -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Account records, one per customer.
    accounts (account_number) {
        /// Primary key: ten-digit account number.
        account_number -> Int8,
        /// Owning customer.
        customer_id -> Int8,
        /// Account category, e.g. "Savings".
        account_type -> Varchar,
        /// Branch address of the holding branch.
        branch_address -> Varchar,
        /// Row creation timestamp.
        created_at -> Timestamptz,
        /// Principal that created the row.
        created_by -> Varchar,
        /// Last modification timestamp.
        updated_at -> Nullable<Timestamptz>,
        /// Principal that last modified the row.
        updated_by -> Nullable<Varchar>,
    }
}

diesel::joinable!(accounts -> customers (customer_id));
diesel::allow_tables_to_appear_in_same_query!(accounts, customers);
