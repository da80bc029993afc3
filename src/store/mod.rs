// SPDX-FileCopyrightText: 2026 anon_relay contributors
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Durable tables and atomic primitives for users, pairs, the waiting
//! queue, blocks and bans. [`Store`] is a trait so the
//! Matcher/Relay/Dispatcher never depend on a concrete database driver;
//! [`postgres::PgStore`] is the production implementation and
//! `FakeStore` (in `tests`) backs unit tests without a database.

pub mod postgres;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{Locale, UserId};

/// Durable state operations. Every method is atomic with respect to
/// concurrent callers; implementations must give
/// `claim_eligible_waiter` + `bind_pair` serializable semantics when
/// called back to back by the Matcher.
#[async_trait]
pub trait Store: Send + Sync {
    /// Upserts a user, setting or overwriting their locale.
    async fn ensure_user(&self, id: UserId, locale: Locale) -> Result<(), StoreError>;

    /// The locale most recently recorded for `id`, or the default if
    /// the user has never been observed.
    async fn locale_of(&self, id: UserId) -> Result<Locale, StoreError>;

    async fn is_banned(&self, id: UserId) -> Result<bool, StoreError>;

    async fn partner_of(&self, id: UserId) -> Result<Option<UserId>, StoreError>;

    async fn is_waiting(&self, id: UserId) -> Result<bool, StoreError>;

    /// No-op if `id` is already enqueued.
    async fn enqueue_if_absent(&self, id: UserId) -> Result<(), StoreError>;

    /// No-op if `id` is not enqueued.
    async fn dequeue(&self, id: UserId) -> Result<(), StoreError>;

    /// Atomically selects and removes the oldest waiter eligible to be
    /// paired with `seeker`: same locale, not mutually
    /// blocked, not globally banned. Returns `None` if no row
    /// qualifies.
    async fn claim_eligible_waiter(
        &self,
        seeker: UserId,
        seeker_locale: Locale,
    ) -> Result<Option<UserId>, StoreError>;

    /// Inserts both symmetric rows of a pair. Fails with
    /// [`StoreError::AlreadyPaired`] if either side already appears in
    /// `active_chats`.
    async fn bind_pair(&self, a: UserId, b: UserId) -> Result<(), StoreError>;

    /// Deletes both symmetric rows of `id`'s pair in one transaction,
    /// returning the former partner (`None` if `id` was not paired).
    async fn end_pair(&self, id: UserId) -> Result<Option<UserId>, StoreError>;

    async fn add_block(&self, blocker: UserId, blocked: UserId) -> Result<(), StoreError>;

    /// Adds `id` to the global ban list and evicts it from the waiting
    /// queue and from any pair, cascading via `end_pair`.
    /// Returns the former partner, if any, so the caller can notify
    /// them.
    async fn add_global_ban(&self, id: UserId) -> Result<Option<UserId>, StoreError>;
}
