//! Status handler
//!
//! The single route of the boilerplate: a static JSON payload proving the
//! service is wired up end to end.

use axum::Json;
use serde::{Deserialize, Serialize};

/// Static status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub msg: String,
}

/// `GET /glue/` - confirm the service is initialized
pub async fn index() -> Json<StatusResponse> {
    Json(StatusResponse {
        msg: "Glue Initialized".to_string(),
    })
}
