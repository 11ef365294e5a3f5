use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use adboard_core::{pricing, signature};
use adboard_db::ledger::Activation;

use crate::{
    error::{ApiError, ApiResult},
    middleware::auth::AuthContext,
    state::AppState,
};

pub fn catalog_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/ad-placements", get(list_placements))
        .with_state(state)
}

pub fn purchase_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/ad-placements/order", post(create_order))
        .route("/v1/ad-placements/verify", post(verify_payment))
        .with_state(state)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlacementListResponse {
    items: Vec<PlacementItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlacementItem {
    id: String,
    name: String,
    slug: String,
    position: String,
    description: Option<String>,
    base_price: i64,
    premium_price: Option<i64>,
    elite_price: Option<i64>,
    billing_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrderRequest {
    placement_id: String,
    plan_type: Option<pricing::PlanType>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrderResponse {
    order_id: String,
    amount: i64,
    currency: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyPaymentRequest {
    gateway_order_id: String,
    gateway_payment_id: String,
    gateway_signature: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyPaymentResponse {
    status: &'static str,
    subscription_id: Option<String>,
}

pub async fn list_placements(
    State(state): State<AppState>,
) -> ApiResult<Json<PlacementListResponse>> {
    let placements = state.ledger.list_active_placements().await?;

    let items = placements
        .into_iter()
        .map(|placement| PlacementItem {
            id: placement.id,
            name: placement.name,
            slug: placement.slug,
            position: placement.position,
            description: placement.description,
            base_price: placement.base_price,
            premium_price: placement.premium_price,
            elite_price: placement.elite_price,
            billing_type: placement.billing_type,
        })
        .collect();

    Ok(Json(PlacementListResponse { items }))
}

pub async fn create_order(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<CreateOrderRequest>,
) -> ApiResult<Json<CreateOrderResponse>> {
    if payload.placement_id.trim().is_empty() {
        return Err(ApiError::BadRequest("placementId required".to_string()));
    }

    let placement = state
        .ledger
        .get_active_placement(&payload.placement_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("placement not found".to_string()))?;

    let plan = payload.plan_type.unwrap_or_default();
    let price = pricing::quote(&placement.pricing(), plan);
    let amount_minor = price * 100;

    // Receipt ids are display labels for the gateway dashboard, not a
    // uniqueness guarantee, so a timestamp is enough.
    let receipt = format!("rcpt_{}", Utc::now().timestamp_millis());

    // Gateway first, persist second: an unpaid gateway order is inert,
    // while a local row pointing at a gateway order that was never opened
    // would be unpayable.
    let gateway_order = state
        .gateway
        .create_order(amount_minor, &state.settings.currency, &receipt)
        .await?;

    let id = format!("ord_{}", nanoid::nanoid!(12));
    state
        .ledger
        .create_pending_order(
            &id,
            &auth.user_id,
            &placement.id,
            plan.as_str(),
            price,
            &gateway_order.id,
        )
        .await?;

    info!(
        order_id = %id,
        gateway_order_id = %gateway_order.id,
        user_id = %auth.user_id,
        plan_type = plan.as_str(),
        amount = price,
        "ad placement order created"
    );

    Ok(Json(CreateOrderResponse {
        order_id: gateway_order.id,
        amount: amount_minor,
        currency: state.settings.currency.clone(),
    }))
}

pub async fn verify_payment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<VerifyPaymentRequest>,
) -> ApiResult<Json<VerifyPaymentResponse>> {
    let order = state
        .ledger
        .find_order_for_user(&payload.gateway_order_id, &auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("order not found".to_string()))?;

    if !signature::verify_payment(
        &state.settings.gateway_key_secret,
        &payload.gateway_order_id,
        &payload.gateway_payment_id,
        &payload.gateway_signature,
    ) {
        warn!(
            gateway_order_id = %payload.gateway_order_id,
            user_id = %auth.user_id,
            "payment signature mismatch"
        );
        return Err(ApiError::InvalidSignature);
    }

    let subscription_id = format!("sub_{}", nanoid::nanoid!(12));

    match state
        .ledger
        .complete_and_activate(
            &order,
            &payload.gateway_payment_id,
            &payload.gateway_signature,
            &subscription_id,
            Utc::now(),
        )
        .await?
    {
        Activation::Activated { subscription_id } => {
            info!(
                order_id = %order.id,
                subscription_id = %subscription_id,
                user_id = %auth.user_id,
                "payment verified, subscription activated"
            );
            Ok(Json(VerifyPaymentResponse {
                status: "ok",
                subscription_id: Some(subscription_id),
            }))
        }
        Activation::AlreadyCompleted => {
            // A repeated verification of the same payment is acknowledged
            // without minting a second subscription.
            info!(order_id = %order.id, "order already completed, verify is a no-op");
            Ok(Json(VerifyPaymentResponse {
                status: "ok",
                subscription_id: None,
            }))
        }
        Activation::PlacementMissing => {
            warn!(
                order_id = %order.id,
                ad_placement_id = %order.ad_placement_id,
                "placement missing at activation, completion rolled back"
            );
            Err(ApiError::NotFound("placement not found".to_string()))
        }
    }
}
