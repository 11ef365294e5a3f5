use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

/// Recurrence class of a placement, driving the subscription window length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingType {
    Monthly,
    OneTime,
}

impl BillingType {
    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "monthly" => Some(BillingType::Monthly),
            "one_time" => Some(BillingType::OneTime),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BillingType::Monthly => "monthly",
            BillingType::OneTime => "one_time",
        }
    }
}

/// Validity window for a subscription activated at `now`: one calendar month
/// for monthly placements, three for everything else.
///
/// Month addition follows chrono's calendar rule: the day of month is kept
/// and clamped to the last day of the target month, so an activation on
/// 2024-01-31 with monthly billing ends on 2024-02-29.
pub fn subscription_window(
    billing: BillingType,
    now: DateTime<Utc>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let months = match billing {
        BillingType::Monthly => Months::new(1),
        BillingType::OneTime => Months::new(3),
    };
    let end = now
        .checked_add_months(months)
        .expect("subscription end date within chrono's representable range");
    (now, end)
}
