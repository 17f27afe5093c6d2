//! HTTP front end over the two orchestrators.
//!
//! - `POST /scrape-list` with `{"search_url": ...}` returns a [`ListingResult`]
//! - `POST /scrape-product` with `{"product_url": ...}` returns a [`ProductRecord`]
//! - `GET /health`
//!
//! Scrape failures are reported inside the record with a 200 response; only
//! malformed requests get a 4xx.
//!
//! [`ListingResult`]: crate::domain::ListingResult
//! [`ProductRecord`]: crate::domain::ProductRecord

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::app::{AppContext, Result};
use crate::browser::SessionLauncher;
use crate::domain::{ListingResult, ProductRecord, Status};

pub const ENDPOINTS: &[&str] = &["POST /scrape-list", "POST /scrape-product", "GET /health"];

#[derive(Debug, Deserialize)]
struct ListRequest {
    search_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProductRequest {
    product_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
    message: String,
    version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    status: Status,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    available_endpoints: Option<&'static [&'static str]>,
    #[serde(skip)]
    code: StatusCode,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            available_endpoints: None,
            code: StatusCode::BAD_REQUEST,
        }
    }

    fn not_found() -> Self {
        Self {
            status: Status::Error,
            message: "Endpoint not found".to_string(),
            available_endpoints: Some(ENDPOINTS),
            code: StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code, Json(self)).into_response()
    }
}

/// Non-empty value of a required body parameter.
fn required(
    value: std::result::Result<Option<String>, JsonRejection>,
    param: &str,
) -> std::result::Result<String, ApiError> {
    match value {
        Ok(Some(url)) if !url.trim().is_empty() => Ok(url.trim().to_string()),
        Ok(_) => Err(ApiError::bad_request(format!("{} parameter is required", param))),
        Err(rejection) => {
            warn!(error = %rejection, "Rejected request body");
            Err(ApiError::bad_request("Bad request"))
        }
    }
}

async fn scrape_list<L: SessionLauncher + 'static>(
    State(ctx): State<Arc<AppContext<L>>>,
    body: std::result::Result<Json<ListRequest>, JsonRejection>,
) -> std::result::Result<Json<ListingResult>, ApiError> {
    let url = required(body.map(|Json(req)| req.search_url), "search_url")?;
    info!(url = %url, "List scraper requested");
    Ok(Json(ctx.listings.extract_listing(&url).await))
}

async fn scrape_product<L: SessionLauncher + 'static>(
    State(ctx): State<Arc<AppContext<L>>>,
    body: std::result::Result<Json<ProductRequest>, JsonRejection>,
) -> std::result::Result<Json<ProductRecord>, ApiError> {
    let url = required(body.map(|Json(req)| req.product_url), "product_url")?;
    info!(url = %url, "Product scraper requested");
    Ok(Json(ctx.products.extract_product(&url).await))
}

async fn health<L: SessionLauncher + 'static>(State(ctx): State<Arc<AppContext<L>>>) -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        message: format!("{} Scraper Server is running", ctx.config.site.name),
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn fallback() -> ApiError {
    ApiError::not_found()
}

pub fn router<L: SessionLauncher + 'static>(ctx: Arc<AppContext<L>>) -> Router {
    Router::new()
        .route("/scrape-list", post(scrape_list::<L>))
        .route("/scrape-product", post(scrape_product::<L>))
        .route("/health", get(health::<L>))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal, stopping server");
}

/// Serve until ctrl-c.
pub async fn serve<L: SessionLauncher + 'static>(ctx: AppContext<L>, bind: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(bind, "Server listening");
    for endpoint in ENDPOINTS {
        info!("  {}", endpoint);
    }

    axum::serve(listener, router(Arc::new(ctx)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
