use chrono::{DateTime, Utc};
use sqlx::PgConnection;

use crate::models::AdPlacementSubscription;

/// Insert the entitlement for a just-completed order. Runs inside the same
/// transaction as the order's status transition; the unique constraint on
/// order_id backs the one-subscription-per-order invariant.
#[allow(clippy::too_many_arguments)]
pub async fn create_active(
    conn: &mut PgConnection,
    id: &str,
    user_id: &str,
    ad_placement_id: &str,
    order_id: &str,
    plan_type: &str,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Result<AdPlacementSubscription, sqlx::Error> {
    sqlx::query_as::<_, AdPlacementSubscription>(
        r#"
        INSERT INTO ad_placement_subscriptions
            (id, user_id, ad_placement_id, order_id, plan_type, status, start_date, end_date)
        VALUES ($1, $2, $3, $4, $5::plan_type, 'active', $6, $7)
        RETURNING id, user_id, ad_placement_id, order_id, plan_type::text as plan_type,
                  status::text as status, start_date, end_date, created_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(ad_placement_id)
    .bind(order_id)
    .bind(plan_type)
    .bind(start_date)
    .bind(end_date)
    .fetch_one(&mut *conn)
    .await
}
