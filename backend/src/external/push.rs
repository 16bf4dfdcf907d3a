//! Web push delivery client
//!
//! Sends VAPID-authorized (RFC 8292) delivery requests to browser push
//! services. Requests carry no encrypted payload; a woken service worker
//! fetches the latest notification content from the API. Endpoints the push
//! service reports as 404/410 are surfaced as gone so callers can prune the
//! subscription.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;

use crate::config::PushConfig;
use crate::error::{AppError, AppResult};

/// Lifetime of a signed VAPID token
const TOKEN_LIFETIME_HOURS: i64 = 12;

/// How long the push service may hold an undelivered message
const DEFAULT_TTL_SECONDS: u32 = 86400;

/// Web push client
#[derive(Clone)]
pub struct WebPushClient {
    client: Client,
    vapid_public_key: String,
    vapid_private_key_pem: String,
    contact: String,
}

/// Outcome of a single delivery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered,
    /// The push service no longer knows this endpoint
    Gone,
}

/// VAPID JWT claims (RFC 8292 §2)
#[derive(Debug, Serialize)]
struct VapidClaims {
    aud: String,
    exp: i64,
    sub: String,
}

impl WebPushClient {
    /// Create a new WebPushClient
    pub fn new(config: &PushConfig) -> Self {
        Self {
            client: Client::new(),
            vapid_public_key: config.vapid_public_key.clone(),
            vapid_private_key_pem: config.vapid_private_key_pem.clone(),
            contact: format!("mailto:{}", config.contact_email),
        }
    }

    /// Public key handed to subscribing browsers
    pub fn public_key(&self) -> &str {
        &self.vapid_public_key
    }

    /// Request delivery of a push message to one endpoint
    pub async fn send(&self, endpoint: &str) -> AppResult<DeliveryStatus> {
        let url = Url::parse(endpoint)
            .map_err(|_| AppError::PushDelivery(format!("invalid endpoint: {}", endpoint)))?;
        let authorization = self.vapid_header(&url)?;

        let response = self
            .client
            .post(url)
            .header("Authorization", authorization)
            .header("TTL", DEFAULT_TTL_SECONDS.to_string())
            .send()
            .await
            .map_err(|e| AppError::PushDelivery(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(DeliveryStatus::Delivered),
            StatusCode::NOT_FOUND | StatusCode::GONE => Ok(DeliveryStatus::Gone),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(AppError::PushDelivery(format!(
                    "push service returned {}: {}",
                    status, body
                )))
            }
        }
    }

    /// Build the `vapid t=..., k=...` Authorization header for an endpoint
    fn vapid_header(&self, endpoint: &Url) -> AppResult<String> {
        let audience = endpoint.origin().ascii_serialization();
        let claims = VapidClaims {
            aud: audience,
            exp: (Utc::now() + Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp(),
            sub: self.contact.clone(),
        };

        let key = EncodingKey::from_ec_pem(self.vapid_private_key_pem.as_bytes())
            .map_err(|e| AppError::Configuration(format!("Invalid VAPID private key: {}", e)))?;

        let token = encode(&Header::new(Algorithm::ES256), &claims, &key)
            .map_err(|e| AppError::Internal(format!("VAPID token signing failed: {}", e)))?;

        Ok(format!("vapid t={}, k={}", token, self.vapid_public_key))
    }
}
