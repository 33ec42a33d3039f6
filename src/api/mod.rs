mod convert;
mod error;
mod handlers;
mod types;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use log::info;
use tower_http::trace::TraceLayer;

use crate::core::DashError;
use crate::service::SalaryService;

pub use convert::ARROW_IPC_CONTENT_TYPE;
pub use error::ApiError;

pub struct SalaryApi {
    service: Arc<SalaryService>,
}

impl SalaryApi {
    pub fn new(service: SalaryService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/v1/dashboard", get(handlers::dashboard))
            .route("/api/v1/records", get(handlers::records))
            .route("/api/v1/summary", get(handlers::summary))
            .layer(TraceLayer::new_for_http())
            .with_state(self.service.clone())
    }

    pub async fn serve(self, addr: &str) -> Result<(), DashError> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| DashError::IoError(format!("binding to {addr}: {e}")))?;
        info!("Listening on {addr}");
        axum::serve(listener, self.router())
            .await
            .map_err(|e| DashError::IoError(format!("serving: {e}")))?;
        Ok(())
    }
}
