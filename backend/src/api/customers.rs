//! Customer detail lookup handler.

use actix_web::{get, web, HttpResponse};

use crate::domain::CustomerDetailsService;
use crate::middleware::correlation::CorrelationId;
use crate::models::{ApiResult, CustomerDetailsDto, Error};

use super::{parse_mobile, MobileNumberQuery};

const PATH_FETCH_CUSTOMER_DETAILS: &str = "/api/fetchCustomerDetails";

/// Fetch the aggregated customer, account, cards, and loans view.
#[utoipa::path(
    get,
    path = "/api/fetchCustomerDetails",
    params(
        ("mobileNumber" = String, Query, description = "Ten-digit mobile number"),
        ("correlation-id" = Option<String>, Header, description = "Opaque correlation identifier, generated when absent")
    ),
    responses(
        (status = 200, description = "Customer details fetched successfully", body = CustomerDetailsDto),
        (status = 400, description = "Validation failure", body = Error),
        (status = 404, description = "No matching customer or account", body = Error)
    ),
    tags = ["customers"],
    operation_id = "fetchCustomerDetails"
)]
#[get("/fetchCustomerDetails")]
pub async fn fetch_customer_details(
    service: web::Data<CustomerDetailsService>,
    query: web::Query<MobileNumberQuery>,
) -> ApiResult<HttpResponse> {
    let mobile_number = parse_mobile(&query.mobile_number, PATH_FETCH_CUSTOMER_DETAILS)?;
    let correlation_id = CorrelationId::current().map_or_else(String::new, |id| id.to_string());

    let details = service
        .fetch_customer_details(&mobile_number, &correlation_id)
        .await
        .map_err(|error| Error::from_domain(error, PATH_FETCH_CUSTOMER_DETAILS))?;
    Ok(HttpResponse::Ok().json(CustomerDetailsDto::from(details)))
}
