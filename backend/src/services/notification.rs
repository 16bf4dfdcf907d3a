//! Push notification service
//!
//! Subscriptions live in the database, keyed by endpoint, so they survive
//! restarts. A broadcast wakes every subscribed browser for the user and
//! records what was sent; delivery is best-effort with no retry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::external::push::{DeliveryStatus, WebPushClient};

/// Notification service for managing push subscriptions and broadcasts
#[derive(Clone)]
pub struct NotificationService {
    db: PgPool,
    push: WebPushClient,
}

/// A stored browser push subscription
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PushSubscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
    pub created_at: DateTime<Utc>,
}

/// Key material from the browser's PushSubscription
#[derive(Debug, Deserialize)]
pub struct SubscriptionKeys {
    pub p256dh: String,
    pub auth: String,
}

/// Input for registering a subscription
#[derive(Debug, Deserialize)]
pub struct SubscribeInput {
    pub endpoint: String,
    pub keys: SubscriptionKeys,
}

/// Input for removing subscriptions; without an endpoint, all of the
/// user's subscriptions are removed
#[derive(Debug, Deserialize)]
pub struct UnsubscribeInput {
    pub endpoint: Option<String>,
}

/// Input for broadcasting a notification
#[derive(Debug, Deserialize)]
pub struct BroadcastInput {
    pub title: String,
    pub message: String,
}

/// Result of a broadcast
#[derive(Debug, Serialize)]
pub struct BroadcastOutcome {
    pub total_sent: usize,
    pub total_failed: usize,
    /// Subscriptions removed because the push service reported them gone
    pub pruned: usize,
}

impl NotificationService {
    /// Create a new NotificationService instance
    pub fn new(db: PgPool, push: WebPushClient) -> Self {
        Self { db, push }
    }

    /// VAPID public key for the browser's `applicationServerKey`
    pub fn vapid_public_key(&self) -> &str {
        self.push.public_key()
    }

    /// Register (or re-register) a subscription endpoint
    pub async fn subscribe(
        &self,
        user_id: Uuid,
        input: SubscribeInput,
    ) -> AppResult<PushSubscription> {
        let subscription = sqlx::query_as::<_, PushSubscription>(
            r#"
            INSERT INTO push_subscriptions (user_id, endpoint, p256dh, auth)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (endpoint)
            DO UPDATE SET user_id = $1, p256dh = $3, auth = $4
            RETURNING id, user_id, endpoint, p256dh, auth, created_at
            "#,
        )
        .bind(user_id)
        .bind(&input.endpoint)
        .bind(&input.keys.p256dh)
        .bind(&input.keys.auth)
        .fetch_one(&self.db)
        .await?;

        tracing::info!("User subscribed: {}", subscription.endpoint);
        Ok(subscription)
    }

    /// Remove one subscription, or all of the user's subscriptions
    pub async fn unsubscribe(&self, user_id: Uuid, input: UnsubscribeInput) -> AppResult<u64> {
        let result = match input.endpoint {
            Some(endpoint) => {
                sqlx::query(
                    "DELETE FROM push_subscriptions WHERE user_id = $1 AND endpoint = $2",
                )
                .bind(user_id)
                .bind(&endpoint)
                .execute(&self.db)
                .await?
            }
            None => {
                sqlx::query("DELETE FROM push_subscriptions WHERE user_id = $1")
                    .bind(user_id)
                    .execute(&self.db)
                    .await?
            }
        };

        Ok(result.rows_affected())
    }

    /// List the user's subscriptions
    pub async fn list_subscriptions(&self, user_id: Uuid) -> AppResult<Vec<PushSubscription>> {
        let subscriptions = sqlx::query_as::<_, PushSubscription>(
            r#"
            SELECT id, user_id, endpoint, p256dh, auth, created_at
            FROM push_subscriptions
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(subscriptions)
    }

    /// Send a notification to every subscription of the user.
    ///
    /// Endpoints the push service no longer knows are pruned, matching the
    /// browser-side behavior of dropping stale registrations.
    pub async fn broadcast(
        &self,
        user_id: Uuid,
        input: BroadcastInput,
    ) -> AppResult<BroadcastOutcome> {
        let subscriptions = self.list_subscriptions(user_id).await?;
        if subscriptions.is_empty() {
            return Err(AppError::NotFound("Push subscription".to_string()));
        }

        let mut outcome = BroadcastOutcome {
            total_sent: 0,
            total_failed: 0,
            pruned: 0,
        };

        for subscription in &subscriptions {
            match self.push.send(&subscription.endpoint).await {
                Ok(DeliveryStatus::Delivered) => outcome.total_sent += 1,
                Ok(DeliveryStatus::Gone) => {
                    outcome.pruned += 1;
                    sqlx::query("DELETE FROM push_subscriptions WHERE id = $1")
                        .bind(subscription.id)
                        .execute(&self.db)
                        .await?;
                }
                Err(e) => {
                    tracing::warn!("Push delivery failed for {}: {}", subscription.endpoint, e);
                    outcome.total_failed += 1;
                }
            }
        }

        // Woken clients fetch the notification body from here
        sqlx::query(
            r#"
            INSERT INTO notification_log (user_id, title, message, total_sent, total_failed)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user_id)
        .bind(&input.title)
        .bind(&input.message)
        .bind(outcome.total_sent as i32)
        .bind(outcome.total_failed as i32)
        .execute(&self.db)
        .await?;

        Ok(outcome)
    }

    /// Most recent notification bodies for the user
    pub async fn notification_history(&self, user_id: Uuid) -> AppResult<Vec<NotificationLogEntry>> {
        let entries = sqlx::query_as::<_, NotificationLogEntry>(
            r#"
            SELECT id, user_id, title, message, total_sent, total_failed, created_at
            FROM notification_log
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT 50
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }
}

/// A recorded broadcast
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct NotificationLogEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub total_sent: i32,
    pub total_failed: i32,
    pub created_at: DateTime<Utc>,
}
