// SPDX-FileCopyrightText: 2026 anon_relay contributors
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Postgres-backed [`Store`] implementation.
//!
//! `claim_eligible_waiter` uses a `FOR UPDATE SKIP LOCKED` row-locking
//! idiom to claim a waiter without two concurrent seekers ever getting
//! the same one. Queries here use the runtime-checked `sqlx::query`/
//! `query_scalar` API rather than the `query!` macro, which needs a
//! live database (or checked-in offline metadata) at build time — see
//! DESIGN.md.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::error::StoreError;
use crate::types::{Locale, UserId};

use super::Store;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(connection_string: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPool::connect(connection_string).await?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}

#[async_trait]
impl Store for PgStore {
    async fn ensure_user(&self, id: UserId, locale: Locale) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO all_users (user_id, language) VALUES ($1, $2)
             ON CONFLICT (user_id) DO UPDATE SET language = EXCLUDED.language",
        )
        .bind(id)
        .bind(locale.to_string())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn locale_of(&self, id: UserId) -> Result<Locale, StoreError> {
        let row = sqlx::query("SELECT language FROM all_users WHERE user_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row
            .and_then(|r| r.try_get::<String, _>("language").ok())
            .and_then(|lang| lang.parse().ok())
            .unwrap_or_default())
    }

    async fn is_banned(&self, id: UserId) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT 1 AS present FROM global_bans WHERE user_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    async fn partner_of(&self, id: UserId) -> Result<Option<UserId>, StoreError> {
        let row = sqlx::query("SELECT partner_id FROM active_chats WHERE user_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get("partner_id")))
    }

    async fn is_waiting(&self, id: UserId) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT 1 AS present FROM waiting_queue WHERE user_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    async fn enqueue_if_absent(&self, id: UserId) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO waiting_queue (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn dequeue(&self, id: UserId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM waiting_queue WHERE user_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn claim_eligible_waiter(
        &self,
        seeker: UserId,
        seeker_locale: Locale,
    ) -> Result<Option<UserId>, StoreError> {
        // Single atomic claim: the subquery locks (and skips already-locked)
        // the oldest eligible waiter, and the outer DELETE removes exactly
        // the row it locked, so two concurrent seekers can never claim the
        // same waiter.
        let row = sqlx::query(
            "DELETE FROM waiting_queue
             WHERE user_id = (
                 SELECT wq.user_id
                 FROM waiting_queue wq
                 JOIN all_users u ON u.user_id = wq.user_id
                 WHERE wq.user_id <> $1
                   AND u.language = $2
                   AND NOT EXISTS (
                       SELECT 1 FROM user_blocks
                       WHERE blocker_id = $1 AND blocked_id = wq.user_id
                   )
                   AND NOT EXISTS (
                       SELECT 1 FROM user_blocks
                       WHERE blocker_id = wq.user_id AND blocked_id = $1
                   )
                   AND NOT EXISTS (
                       SELECT 1 FROM global_bans WHERE user_id = wq.user_id
                   )
                 ORDER BY wq.timestamp ASC
                 FOR UPDATE OF wq SKIP LOCKED
                 LIMIT 1
             )
             RETURNING user_id",
        )
        .bind(seeker)
        .bind(seeker_locale.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.get("user_id")))
    }

    async fn bind_pair(&self, a: UserId, b: UserId) -> Result<(), StoreError> {
        let mut txn = self.pool.begin().await?;

        sqlx::query("INSERT INTO active_chats (user_id, partner_id) VALUES ($1, $2)")
            .bind(a)
            .bind(b)
            .execute(&mut *txn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    StoreError::AlreadyPaired(a)
                } else {
                    StoreError::Database(err)
                }
            })?;

        sqlx::query("INSERT INTO active_chats (user_id, partner_id) VALUES ($1, $2)")
            .bind(b)
            .bind(a)
            .execute(&mut *txn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    StoreError::AlreadyPaired(b)
                } else {
                    StoreError::Database(err)
                }
            })?;

        txn.commit().await?;
        Ok(())
    }

    async fn end_pair(&self, id: UserId) -> Result<Option<UserId>, StoreError> {
        let mut txn = self.pool.begin().await?;

        let partner: Option<UserId> =
            sqlx::query("DELETE FROM active_chats WHERE user_id = $1 RETURNING partner_id")
                .bind(id)
                .fetch_optional(&mut *txn)
                .await?
                .map(|r| r.get("partner_id"));

        if let Some(partner) = partner {
            sqlx::query("DELETE FROM active_chats WHERE user_id = $1")
                .bind(partner)
                .execute(&mut *txn)
                .await?;
        }

        txn.commit().await?;
        Ok(partner)
    }

    async fn add_block(&self, blocker: UserId, blocked: UserId) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO user_blocks (blocker_id, blocked_id) VALUES ($1, $2)
             ON CONFLICT (blocker_id, blocked_id) DO NOTHING",
        )
        .bind(blocker)
        .bind(blocked)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn add_global_ban(&self, id: UserId) -> Result<Option<UserId>, StoreError> {
        let mut txn = self.pool.begin().await?;

        sqlx::query("INSERT INTO global_bans (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(id)
            .execute(&mut *txn)
            .await?;

        sqlx::query("DELETE FROM waiting_queue WHERE user_id = $1")
            .bind(id)
            .execute(&mut *txn)
            .await?;

        let partner: Option<UserId> =
            sqlx::query("DELETE FROM active_chats WHERE user_id = $1 RETURNING partner_id")
                .bind(id)
                .fetch_optional(&mut *txn)
                .await?
                .map(|r| r.get("partner_id"));

        if let Some(partner) = partner {
            sqlx::query("DELETE FROM active_chats WHERE user_id = $1")
                .bind(partner)
                .execute(&mut *txn)
                .await?;
        }

        txn.commit().await?;
        Ok(partner)
    }
}
