use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

/// Authenticated marketplace user attached to the request by the bearer-key
/// middleware.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub key_id: String,
    pub user_id: String,
    pub key_prefix: String,
}

pub async fn api_key_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("missing authorization header".to_string()))?;

    let token = parse_bearer(header_value)?;
    let hash = hash_key(token);

    let record = adboard_db::queries::api_keys::find_active_by_hash(&state.db, &hash).await?;

    let record = match record {
        Some(record) => record,
        None => return Err(ApiError::Unauthorized("invalid api key".to_string())),
    };

    if let Some(expires_at) = record.expires_at {
        if expires_at < chrono::Utc::now() {
            return Err(ApiError::Unauthorized("api key expired".to_string()));
        }
    }

    adboard_db::queries::api_keys::touch_last_used(&state.db, &record.id).await?;

    req.extensions_mut().insert(AuthContext {
        key_id: record.id,
        user_id: record.user_id,
        key_prefix: record.key_prefix,
    });

    Ok(next.run(req).await)
}

fn parse_bearer(value: &HeaderValue) -> ApiResult<&str> {
    let value = value
        .to_str()
        .map_err(|_| ApiError::Unauthorized("invalid authorization header".to_string()))?;
    let mut parts = value.splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().unwrap_or_default();
    if scheme != "Bearer" || token.is_empty() {
        return Err(ApiError::Unauthorized("invalid authorization header".to_string()));
    }
    Ok(token)
}

fn hash_key(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    format!("{:x}", hasher.finalize())
}
