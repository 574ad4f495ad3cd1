//! Accounts service entry-point: wires REST endpoints and OpenAPI docs.

use std::io;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::api::accounts::{create_account, delete_account, fetch_account, update_account};
use backend::api::customers::fetch_customer_details;
use backend::api::info::{build_info, contact_info, java_version, InfoState};
use backend::domain::{AccountsService, CustomerDetailsService};
use backend::outbound::http::{DownstreamSettings, HttpDownstreamSources};
use backend::outbound::persistence::{
    run_migrations, DbPool, DieselAccountStore, PoolSettings,
};
use backend::server::AppConfig;
#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::Correlation;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env().map_err(io::Error::other)?;

    run_migrations(&config.database_url)
        .await
        .map_err(io::Error::other)?;
    let pool = DbPool::new(
        PoolSettings::new(&config.database_url).with_max_size(config.db_pool_max_size),
    )
    .await
    .map_err(io::Error::other)?;

    let store = Arc::new(DieselAccountStore::new(pool));
    let downstream = Arc::new(
        HttpDownstreamSources::new(DownstreamSettings::new(
            &config.cards_base_url,
            &config.loans_base_url,
        ))
        .map_err(io::Error::other)?,
    );

    let accounts_service = web::Data::new(AccountsService::new(store.clone()));
    let details_service = web::Data::new(CustomerDetailsService::new(store, downstream));
    let info_state = web::Data::new(InfoState::new(
        config.build_version.clone(),
        config.java_home.clone(),
        config.contact.clone(),
    ));

    info!(bind_addr = %config.bind_addr, "starting accounts service");
    HttpServer::new(move || {
        let api = web::scope("/api")
            .service(create_account)
            .service(fetch_account)
            .service(update_account)
            .service(delete_account)
            .service(fetch_customer_details)
            .service(build_info)
            .service(java_version)
            .service(contact_info);

        let app = App::new()
            .app_data(accounts_service.clone())
            .app_data(details_service.clone())
            .app_data(info_state.clone())
            .wrap(Correlation)
            .service(api);

        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );

        app
    })
    .bind(config.bind_addr)?
    .run()
    .await
}
