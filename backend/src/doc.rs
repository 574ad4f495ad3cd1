//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: the CRUD, customer-details, and informational endpoints
//! - **Schemas**: the wire payloads from `models` and the downstream
//!   detail sections
//! - **Tags**: one per handler module
//!
//! The generated specification backs Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::{CardsDetails, LoansDetails};
use crate::models::{
    AccountDto, ContactDetailsDto, ContactInfoDto, CustomerDetailsDto, CustomerDto, Error,
    ErrorCode, StatusDto,
};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Accounts microservice REST API documentation",
        description = "CRUD REST API managing bank customers and their accounts.",
        contact(name = "Accounts platform team", email = "accounts-platform@example.com"),
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::api::accounts::create_account,
        crate::api::accounts::fetch_account,
        crate::api::accounts::update_account,
        crate::api::accounts::delete_account,
        crate::api::customers::fetch_customer_details,
        crate::api::info::build_info,
        crate::api::info::java_version,
        crate::api::info::contact_info,
    ),
    components(schemas(
        CustomerDto,
        AccountDto,
        CustomerDetailsDto,
        CardsDetails,
        LoansDetails,
        StatusDto,
        ContactInfoDto,
        ContactDetailsDto,
        Error,
        ErrorCode
    )),
    tags(
        (name = "accounts", description = "CRUD operations for customers and accounts"),
        (name = "customers", description = "Aggregated customer details"),
        (name = "info", description = "Build, runtime, and contact information")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_registers_every_api_path() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/api/create",
            "/api/fetch",
            "/api/update",
            "/api/delete",
            "/api/fetchCustomerDetails",
            "/api/build-info",
            "/api/java-version",
            "/api/contact-info",
        ] {
            assert!(paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn openapi_registers_the_error_schema() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;

        assert!(schemas.contains_key("Error"));
        assert!(schemas.contains_key("CustomerDto"));
        assert!(schemas.contains_key("StatusDto"));
    }
}
