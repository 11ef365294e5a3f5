use adboard_core::billing;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::{AdPlacement, AdPlacementOrder};
use crate::queries;

/// Outcome of the atomic complete-and-activate step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Activated { subscription_id: String },
    /// The order had already left the pending state; nothing was changed
    /// and no second subscription exists.
    AlreadyCompleted,
    /// The placement vanished between order creation and activation; the
    /// completion was rolled back and the order is still pending.
    PlacementMissing,
}

/// Persistence capability for the purchase workflow. Handlers talk to this
/// seam instead of the pool directly, so the stateful verify branches can
/// be exercised against an in-memory implementation.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn list_active_placements(&self) -> Result<Vec<AdPlacement>, sqlx::Error>;

    async fn get_active_placement(&self, id: &str)
        -> Result<Option<AdPlacement>, sqlx::Error>;

    async fn create_pending_order(
        &self,
        id: &str,
        user_id: &str,
        ad_placement_id: &str,
        plan_type: &str,
        amount: i64,
        gateway_order_id: &str,
    ) -> Result<AdPlacementOrder, sqlx::Error>;

    async fn find_order_for_user(
        &self,
        gateway_order_id: &str,
        user_id: &str,
    ) -> Result<Option<AdPlacementOrder>, sqlx::Error>;

    /// Complete `order` and insert its subscription as one transaction.
    /// The conditional status transition makes a repeated call a no-op.
    async fn complete_and_activate(
        &self,
        order: &AdPlacementOrder,
        gateway_payment_id: &str,
        gateway_signature: &str,
        subscription_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Activation, sqlx::Error>;
}

pub struct PgLedger {
    pool: PgPool,
}

impl PgLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Ledger for PgLedger {
    async fn list_active_placements(&self) -> Result<Vec<AdPlacement>, sqlx::Error> {
        queries::placements::list_active(&self.pool).await
    }

    async fn get_active_placement(
        &self,
        id: &str,
    ) -> Result<Option<AdPlacement>, sqlx::Error> {
        queries::placements::get_active_by_id(&self.pool, id).await
    }

    async fn create_pending_order(
        &self,
        id: &str,
        user_id: &str,
        ad_placement_id: &str,
        plan_type: &str,
        amount: i64,
        gateway_order_id: &str,
    ) -> Result<AdPlacementOrder, sqlx::Error> {
        queries::orders::create_pending(
            &self.pool,
            id,
            user_id,
            ad_placement_id,
            plan_type,
            amount,
            gateway_order_id,
        )
        .await
    }

    async fn find_order_for_user(
        &self,
        gateway_order_id: &str,
        user_id: &str,
    ) -> Result<Option<AdPlacementOrder>, sqlx::Error> {
        queries::orders::find_by_gateway_order_for_user(&self.pool, gateway_order_id, user_id)
            .await
    }

    async fn complete_and_activate(
        &self,
        order: &AdPlacementOrder,
        gateway_payment_id: &str,
        gateway_signature: &str,
        subscription_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Activation, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let applied = queries::orders::complete_if_pending(
            &mut *tx,
            &order.id,
            gateway_payment_id,
            gateway_signature,
        )
        .await?;

        if !applied {
            return Ok(Activation::AlreadyCompleted);
        }

        let placement = match queries::placements::get_by_id(&mut *tx, &order.ad_placement_id)
            .await?
        {
            Some(placement) => placement,
            // Dropping the transaction rolls the completion back.
            None => return Ok(Activation::PlacementMissing),
        };

        let (start_date, end_date) = billing::subscription_window(placement.billing(), now);

        queries::subscriptions::create_active(
            &mut *tx,
            subscription_id,
            &order.user_id,
            &placement.id,
            &order.id,
            &order.plan_type,
            start_date,
            end_date,
        )
        .await?;

        tx.commit().await?;

        Ok(Activation::Activated {
            subscription_id: subscription_id.to_string(),
        })
    }
}
