use sqlx::{PgConnection, PgPool};

use crate::models::AdPlacementOrder;

const ORDER_COLUMNS: &str = r#"
    id, user_id, ad_placement_id, plan_type::text as plan_type, amount,
    gateway_order_id, gateway_payment_id, gateway_signature,
    status::text as status, paid_at, created_at
"#;

/// Persist a pending order. The gateway order must already exist; this runs
/// second so a storage failure never leaves a row pointing at a gateway
/// order that was never opened.
#[allow(clippy::too_many_arguments)]
pub async fn create_pending(
    pool: &PgPool,
    id: &str,
    user_id: &str,
    ad_placement_id: &str,
    plan_type: &str,
    amount: i64,
    gateway_order_id: &str,
) -> Result<AdPlacementOrder, sqlx::Error> {
    let sql = format!(
        r#"
        INSERT INTO ad_placement_orders
            (id, user_id, ad_placement_id, plan_type, amount, gateway_order_id)
        VALUES ($1, $2, $3, $4::plan_type, $5, $6)
        RETURNING {ORDER_COLUMNS}
        "#
    );

    sqlx::query_as::<_, AdPlacementOrder>(&sql)
        .bind(id)
        .bind(user_id)
        .bind(ad_placement_id)
        .bind(plan_type)
        .bind(amount)
        .bind(gateway_order_id)
        .fetch_one(pool)
        .await
}

/// Look up an order by gateway order id, scoped to the claiming user so one
/// user cannot verify payments against another user's orders.
pub async fn find_by_gateway_order_for_user(
    pool: &PgPool,
    gateway_order_id: &str,
    user_id: &str,
) -> Result<Option<AdPlacementOrder>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {ORDER_COLUMNS}
        FROM ad_placement_orders
        WHERE gateway_order_id = $1 AND user_id = $2
        "#
    );

    sqlx::query_as::<_, AdPlacementOrder>(&sql)
        .bind(gateway_order_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Conditional pending -> completed transition. Returns whether the update
/// applied; a false result means the order was already completed and the
/// caller must skip subscription activation.
pub async fn complete_if_pending(
    conn: &mut PgConnection,
    id: &str,
    gateway_payment_id: &str,
    gateway_signature: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE ad_placement_orders
        SET status = 'completed',
            gateway_payment_id = $2,
            gateway_signature = $3,
            paid_at = now()
        WHERE id = $1 AND status = 'pending'
        "#,
    )
    .bind(id)
    .bind(gateway_payment_id)
    .bind(gateway_signature)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() == 1)
}
