use std::sync::Arc;

use adboard_core::config::Settings;
use adboard_db::ledger::Ledger;
use sqlx::PgPool;

use crate::gateway::PaymentGateway;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub ledger: Arc<dyn Ledger>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub settings: Settings,
}

#[derive(Debug, Clone)]
pub struct RequestId(pub String);
