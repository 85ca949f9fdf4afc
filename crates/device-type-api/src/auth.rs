//! Caller role extraction.
//!
//! Credentials are verified upstream; the gateway forwards the verified role
//! in a trusted header and this layer only parses it.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use domain::Role;
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Role of the authenticated caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerRole(pub Role);

impl FromRequestParts<Arc<AppState>> for CallerRole {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(&state.role_header)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::MissingRole(state.role_header.to_string()))?;

        raw.parse::<Role>().map(CallerRole).map_err(|e| {
            warn!(role = raw, "Rejected unknown caller role");
            ApiError::from(e)
        })
    }
}
