use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("gateway rejected request: status={status} body={body}")]
    Api { status: u16, body: String },
    #[error("invalid gateway response: {0}")]
    InvalidResponse(String),
}

/// Order object opened with the payment processor before any money moves.
/// `amount` is in the gateway's minor units (paise for INR).
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, GatewayError>;
}

#[derive(Debug, Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

/// Razorpay Orders API client. Authenticates with HTTP basic auth using the
/// merchant key id/secret pair.
pub struct RazorpayClient {
    http: reqwest::Client,
    key_id: String,
    key_secret: String,
    base_url: String,
}

impl RazorpayClient {
    pub fn new(key_id: String, key_secret: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            key_id,
            key_secret,
            base_url,
        }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, GatewayError> {
        let resp = self
            .http
            .post(format!("{}/v1/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&CreateOrderBody {
                amount,
                currency,
                receipt,
            })
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(GatewayError::Api {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str::<GatewayOrder>(&body)
            .map_err(|err| GatewayError::InvalidResponse(format!("{err}; body={body}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_order_deserializes_razorpay_shape() {
        // Razorpay returns more fields; only the ones we use are kept.
        let order: GatewayOrder = serde_json::from_str(
            r#"{
                "id": "order_EKwxwAgItmmXdp",
                "entity": "order",
                "amount": 200000,
                "amount_paid": 0,
                "currency": "INR",
                "receipt": "rcpt_1707379800000",
                "status": "created"
            }"#,
        )
        .unwrap();

        assert_eq!(order.id, "order_EKwxwAgItmmXdp");
        assert_eq!(order.amount, 200000);
        assert_eq!(order.currency, "INR");
    }

    #[test]
    fn test_api_error_display_includes_status_and_body() {
        let err = GatewayError::Api {
            status: 401,
            body: "{\"error\":\"unauthorized\"}".to_string(),
        };

        let message = err.to_string();
        assert!(message.contains("status=401"));
        assert!(message.contains("unauthorized"));
    }
}
