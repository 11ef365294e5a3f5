use adboard_core::billing::BillingType;
use adboard_core::pricing::PlacementPricing;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A purchasable advertising slot. Rows are managed by admin tooling and are
/// read-only to this service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdPlacement {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub position: String,
    pub description: Option<String>,
    pub base_price: i64,
    pub premium_price: Option<i64>,
    pub elite_price: Option<i64>,
    pub billing_type: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdPlacement {
    pub fn pricing(&self) -> PlacementPricing {
        PlacementPricing {
            base_price: self.base_price,
            premium_price: self.premium_price,
            elite_price: self.elite_price,
        }
    }

    /// Billing types other than monthly all get the one-time window.
    pub fn billing(&self) -> BillingType {
        BillingType::from_db(&self.billing_type).unwrap_or(BillingType::OneTime)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdPlacementOrder {
    pub id: String,
    pub user_id: String,
    pub ad_placement_id: String,
    pub plan_type: String,
    pub amount: i64,
    pub gateway_order_id: String,
    pub gateway_payment_id: Option<String>,
    pub gateway_signature: Option<String>,
    pub status: String,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdPlacementSubscription {
    pub id: String,
    pub user_id: String,
    pub ad_placement_id: String,
    pub order_id: String,
    pub plan_type: String,
    pub status: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
