use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing::info;

mod error;
mod gateway;
mod middleware;
mod routes;
mod state;

use adboard_core::config::Settings;
use adboard_db::ledger::{Ledger, PgLedger};
use crate::gateway::{PaymentGateway, RazorpayClient};
use crate::middleware::auth::api_key_auth;
use crate::middleware::request_id::request_id;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .init();

    let settings = Settings::from_env().context("missing required environment variables")?;

    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(&settings.database_url)
        .await?;

    sqlx::migrate!("../db/migrations").run(&db).await?;

    let gateway: Arc<dyn PaymentGateway> = Arc::new(RazorpayClient::new(
        settings.gateway_key_id.clone(),
        settings.gateway_key_secret.clone(),
        settings.gateway_base_url.clone(),
    ));

    let ledger: Arc<dyn Ledger> = Arc::new(PgLedger::new(db.clone()));

    let state = AppState {
        db,
        ledger,
        gateway,
        settings: settings.clone(),
    };

    // Catalog and health stay public; order creation and payment
    // verification require a bearer key.
    let purchase = routes::purchase_router(state.clone())
        .layer(from_fn_with_state(state.clone(), api_key_auth));

    let app = Router::new()
        .merge(routes::health_router(state.clone()))
        .merge(routes::catalog_router(state.clone()))
        .merge(purchase)
        .layer(from_fn(request_id));

    let addr: SocketAddr = settings.api_bind.parse()?;

    info!(%addr, "starting api");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
