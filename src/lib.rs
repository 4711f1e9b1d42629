use actix_web::middleware::Compress;
use actix_web::{web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod catalog;
pub mod config;
pub mod delivery;
pub mod invoice;
pub mod order;
pub mod routes;
pub mod shaping;
pub mod state;
pub mod storage;

pub use crate::config::AppConfig;
pub use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::api::get_catalog,
        crate::routes::api::quote_order,
        crate::routes::api::create_invoice
    ),
    components(
        schemas(
            catalog::CatalogEntry,
            catalog::ServiceLevel,
            catalog::ItemId,
            order::RawItemInput,
            order::RawInputs,
            order::Order,
            order::OrderLine,
            invoice::DeliveryStatus,
            routes::api::CatalogResponse,
            routes::api::QuoteRequest,
            routes::api::InvoiceRequest,
            routes::api::InvoiceResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Catalog", description = "Billable items and service levels."),
        (name = "Orders", description = "Order pricing."),
        (name = "Invoices", description = "Invoice rendering, publishing and WhatsApp delivery.")
    ),
    servers(
        (url = "http://127.0.0.1:8080", description = "Localhost")
    )
)]
pub struct ApiDoc;

/// Register every route of the service. `invoice_dir` is served under
/// `/invoices` after the form route of the same prefix.
pub fn configure_app(cfg: &mut web::ServiceConfig, invoice_dir: &std::path::Path) {
    cfg.configure(crate::routes::config)
        .service(actix_files::Files::new(storage::PUBLIC_PREFIX, invoice_dir))
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
        );
}

pub async fn run() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = match AppState::from_config(&config) {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!("Failed to initialise application state: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = std::fs::create_dir_all(&config.invoice_dir) {
        log::error!(
            "Failed to create invoice directory {}: {}",
            config.invoice_dir.display(),
            e
        );
        std::process::exit(1);
    }

    let prometheus = PrometheusMetricsBuilder::new("laundry_invoice_server")
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");

    log::info!(
        "Starting server at http://{}:{}",
        config.bind_address,
        config.port
    );

    let invoice_dir = config.invoice_dir.clone();
    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .app_data(app_state)
            .configure(|cfg| configure_app(cfg, &invoice_dir))
    })
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind((config.bind_address.as_str(), config.port))
    .map_err(|e| {
        log::error!(
            "Failed to bind {}:{}: {}",
            config.bind_address,
            config.port,
            e
        );
        e
    })?
    .run()
    .await
}
