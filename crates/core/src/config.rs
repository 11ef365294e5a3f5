use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub adboard_env: String,
    pub api_bind: String,
    pub gateway_key_id: String,
    pub gateway_key_secret: String,
    pub gateway_base_url: String,
    pub currency: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let database_url =
            std::env::var("DATABASE_URL").or_else(|_| std::env::var("ADBOARD_DATABASE_URL"))?;
        let adboard_env =
            std::env::var("ADBOARD_ENV").unwrap_or_else(|_| "development".to_string());
        let api_bind =
            std::env::var("ADBOARD_API_BIND").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let gateway_key_id = std::env::var("ADBOARD_GATEWAY_KEY_ID")
            .or_else(|_| std::env::var("RAZORPAY_KEY_ID"))?;
        let gateway_key_secret = std::env::var("ADBOARD_GATEWAY_KEY_SECRET")
            .or_else(|_| std::env::var("RAZORPAY_KEY_SECRET"))?;
        let gateway_base_url = std::env::var("ADBOARD_GATEWAY_BASE_URL")
            .unwrap_or_else(|_| "https://api.razorpay.com".to_string());
        let currency = std::env::var("ADBOARD_CURRENCY").unwrap_or_else(|_| "INR".to_string());

        Ok(Self {
            database_url,
            adboard_env,
            api_bind,
            gateway_key_id,
            gateway_key_secret,
            gateway_base_url,
            currency,
        })
    }
}
