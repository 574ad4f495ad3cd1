//! Accounts CRUD handlers.

use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::domain::{AccountNumber, AccountOpening, AccountUpdate, AccountsService, NewCustomer};
use crate::models::{ApiResult, CustomerDto, Error, StatusDto};

use super::{parse_mobile, MobileNumberQuery};

const PATH_CREATE: &str = "/api/create";
const PATH_FETCH: &str = "/api/fetch";
const PATH_UPDATE: &str = "/api/update";
const PATH_DELETE: &str = "/api/delete";

fn parse_new_customer(dto: &CustomerDto, api_path: &str) -> Result<NewCustomer, Error> {
    let mobile_number = parse_mobile(&dto.mobile_number, api_path)?;
    NewCustomer::new(dto.name.clone(), dto.email.clone(), mobile_number)
        .map_err(|err| Error::invalid_request(api_path, err.to_string()))
}

fn parse_opening(dto: &CustomerDto, api_path: &str) -> Result<AccountOpening, Error> {
    match &dto.account {
        Some(account) => {
            AccountOpening::new(account.account_type.as_str(), account.branch_address.as_str())
                .map_err(|err| Error::invalid_request(api_path, err.to_string()))
        }
        None => Ok(AccountOpening::default()),
    }
}

/// Create a new customer and account.
#[utoipa::path(
    post,
    path = "/api/create",
    request_body = CustomerDto,
    responses(
        (status = 201, description = "Account created successfully", body = StatusDto),
        (status = 400, description = "Validation failure", body = Error),
        (status = 409, description = "Mobile number already registered", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "createAccount"
)]
#[post("/create")]
pub async fn create_account(
    service: web::Data<AccountsService>,
    payload: web::Json<CustomerDto>,
) -> ApiResult<HttpResponse> {
    let customer = parse_new_customer(&payload, PATH_CREATE)?;
    let opening = parse_opening(&payload, PATH_CREATE)?;
    service
        .create_account(customer, opening)
        .await
        .map_err(|error| Error::from_domain(error, PATH_CREATE))?;
    Ok(HttpResponse::Created().json(StatusDto::created()))
}

/// Fetch the customer and account for a mobile number.
#[utoipa::path(
    get,
    path = "/api/fetch",
    params(
        ("mobileNumber" = String, Query, description = "Ten-digit mobile number")
    ),
    responses(
        (status = 200, description = "Account fetched successfully", body = CustomerDto),
        (status = 400, description = "Validation failure", body = Error),
        (status = 404, description = "No matching customer or account", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "fetchAccount"
)]
#[get("/fetch")]
pub async fn fetch_account(
    service: web::Data<AccountsService>,
    query: web::Query<MobileNumberQuery>,
) -> ApiResult<HttpResponse> {
    let mobile_number = parse_mobile(&query.mobile_number, PATH_FETCH)?;
    let (customer, account) = service
        .fetch_account(&mobile_number)
        .await
        .map_err(|error| Error::from_domain(error, PATH_FETCH))?;
    Ok(HttpResponse::Ok().json(CustomerDto::from_records(&customer, &account)))
}

/// Update account and customer details.
#[utoipa::path(
    put,
    path = "/api/update",
    request_body = CustomerDto,
    responses(
        (status = 200, description = "Account updated successfully", body = StatusDto),
        (status = 400, description = "Validation failure", body = Error),
        (status = 417, description = "Update could not be applied", body = StatusDto)
    ),
    tags = ["accounts"],
    operation_id = "updateAccount"
)]
#[put("/update")]
pub async fn update_account(
    service: web::Data<AccountsService>,
    payload: web::Json<CustomerDto>,
) -> ApiResult<HttpResponse> {
    let customer = parse_new_customer(&payload, PATH_UPDATE)?;
    let account = payload
        .account
        .as_ref()
        .ok_or_else(|| Error::invalid_request(PATH_UPDATE, "account: account details are required"))?;
    let account_number = account.account_number.ok_or_else(|| {
        Error::invalid_request(PATH_UPDATE, "accountNumber: account number is required")
    })?;
    let account_number = AccountNumber::new(account_number)
        .map_err(|err| Error::invalid_request(PATH_UPDATE, format!("accountNumber: {err}")))?;
    let update = AccountUpdate::new(
        account_number,
        customer,
        account.account_type.as_str(),
        account.branch_address.as_str(),
    )
    .map_err(|err| Error::invalid_request(PATH_UPDATE, err.to_string()))?;

    let updated = service
        .update_account(update)
        .await
        .map_err(|error| Error::from_domain(error, PATH_UPDATE))?;
    if updated {
        Ok(HttpResponse::Ok().json(StatusDto::ok()))
    } else {
        Ok(HttpResponse::ExpectationFailed().json(StatusDto::update_failed()))
    }
}

/// Delete the customer and account for a mobile number.
#[utoipa::path(
    delete,
    path = "/api/delete",
    params(
        ("mobileNumber" = String, Query, description = "Ten-digit mobile number")
    ),
    responses(
        (status = 200, description = "Account deleted successfully", body = StatusDto),
        (status = 400, description = "Validation failure", body = Error),
        (status = 417, description = "Delete could not be applied", body = StatusDto)
    ),
    tags = ["accounts"],
    operation_id = "deleteAccount"
)]
#[delete("/delete")]
pub async fn delete_account(
    service: web::Data<AccountsService>,
    query: web::Query<MobileNumberQuery>,
) -> ApiResult<HttpResponse> {
    let mobile_number = parse_mobile(&query.mobile_number, PATH_DELETE)?;
    let deleted = service
        .delete_account(&mobile_number)
        .await
        .map_err(|error| Error::from_domain(error, PATH_DELETE))?;
    if deleted {
        Ok(HttpResponse::Ok().json(StatusDto::ok()))
    } else {
        Ok(HttpResponse::ExpectationFailed().json(StatusDto::delete_failed()))
    }
}
