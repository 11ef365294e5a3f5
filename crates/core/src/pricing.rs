use serde::{Deserialize, Serialize};

/// Pricing tier selected when purchasing a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    #[default]
    Standard,
    Premium,
    Elite,
}

impl PlanType {
    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "standard" => Some(PlanType::Standard),
            "premium" => Some(PlanType::Premium),
            "elite" => Some(PlanType::Elite),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Standard => "standard",
            PlanType::Premium => "premium",
            PlanType::Elite => "elite",
        }
    }
}

/// Tiered price fields of a placement, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementPricing {
    pub base_price: i64,
    pub premium_price: Option<i64>,
    pub elite_price: Option<i64>,
}

/// Price for a (placement, plan type) pair, in whole currency units.
///
/// The quote is always computed server-side from the placement row; client
/// supplied amounts are never trusted. Tiers without an explicit override
/// fall back to a multiple of the base price.
pub fn quote(pricing: &PlacementPricing, plan: PlanType) -> i64 {
    match plan {
        PlanType::Standard => pricing.base_price,
        PlanType::Premium => pricing.premium_price.unwrap_or(pricing.base_price * 2),
        PlanType::Elite => pricing.elite_price.unwrap_or(pricing.base_price * 3),
    }
}
