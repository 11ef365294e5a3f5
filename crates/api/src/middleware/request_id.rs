use axum::http::HeaderValue;
use axum::{body::Body, http::Request, middleware::Next, response::Response};
use nanoid::nanoid;
use tracing::error;

use crate::state::RequestId;

/// Tags every request with a `req_`-prefixed id, echoes it back in the
/// `X-Request-Id` response header, and logs it when a handler blows up
/// so 5xx responses can be matched against server logs.
pub async fn request_id(mut req: Request<Body>, next: Next) -> Response {
    let id = format!("req_{}", nanoid!(16));
    req.extensions_mut().insert(RequestId(id.clone()));

    let mut resp = next.run(req).await;

    if resp.status().is_server_error() {
        error!(
            request_id = %id,
            status = resp.status().as_u16(),
            "request failed"
        );
    }

    if let Ok(value) = HeaderValue::from_str(&id) {
        resp.headers_mut().insert("X-Request-Id", value);
    }
    resp
}
