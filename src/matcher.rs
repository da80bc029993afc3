// SPDX-FileCopyrightText: 2026 anon_relay contributors
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Partner selection. The heart of the concurrency story:
//! `claim_eligible_waiter` and `bind_pair` run back to back so that an
//! atomic claim is either followed by a successful bind or the whole
//! attempt falls back to enqueueing — no user is ever matched twice.

use tracing::instrument;

use crate::error::StoreError;
use crate::store::Store;
use crate::types::{Locale, UserId};

/// Result of a match attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Matched(UserId),
    Waiting,
}

/// Attempts to pair `seeker` with the oldest eligible waiter of the
/// same locale. Asserts the seeker is not already paired
/// (the Dispatcher is expected to have rejected that before calling, but
/// the guard protects the invariant regardless of caller discipline).
#[instrument(skip(store))]
pub async fn try_match(
    store: &dyn Store,
    seeker: UserId,
    seeker_locale: Locale,
) -> Result<Outcome, StoreError> {
    if store.partner_of(seeker).await?.is_some() {
        return Err(StoreError::AlreadyPaired(seeker));
    }

    match store.claim_eligible_waiter(seeker, seeker_locale).await? {
        Some(peer) => {
            store.bind_pair(seeker, peer).await?;
            tracing::info!(seeker, peer, "matched");
            metrics::counter!("anon_relay_matches_total").increment(1);
            Ok(Outcome::Matched(peer))
        }
        None => {
            store.enqueue_if_absent(seeker).await?;
            tracing::info!(seeker, "enqueued");
            Ok(Outcome::Waiting)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeStore;

    #[tokio::test]
    async fn first_seeker_waits() {
        let store = FakeStore::default();
        store.ensure_user(1, Locale::En).await.unwrap();

        let outcome = try_match(&store, 1, Locale::En).await.unwrap();

        assert_eq!(outcome, Outcome::Waiting);
        assert!(store.is_waiting(1).await.unwrap());
    }

    #[tokio::test]
    async fn second_seeker_matches_oldest_same_locale_waiter() {
        let store = FakeStore::default();
        store.ensure_user(1, Locale::En).await.unwrap();
        store.ensure_user(2, Locale::Ar).await.unwrap();
        store.ensure_user(3, Locale::En).await.unwrap();
        try_match(&store, 1, Locale::En).await.unwrap();
        try_match(&store, 2, Locale::Ar).await.unwrap();

        let outcome = try_match(&store, 3, Locale::En).await.unwrap();

        assert_eq!(outcome, Outcome::Matched(1));
        assert_eq!(store.partner_of(1).await.unwrap(), Some(3));
        assert_eq!(store.partner_of(3).await.unwrap(), Some(1));
        // the Arabic-speaking waiter is untouched
        assert!(store.is_waiting(2).await.unwrap());
    }

    #[tokio::test]
    async fn mutual_block_is_never_matched() {
        let store = FakeStore::default();
        store.ensure_user(1, Locale::En).await.unwrap();
        store.ensure_user(2, Locale::En).await.unwrap();
        store.add_block(2, 1).await.unwrap();
        try_match(&store, 1, Locale::En).await.unwrap();

        let outcome = try_match(&store, 2, Locale::En).await.unwrap();

        assert_eq!(outcome, Outcome::Waiting);
    }

    #[tokio::test]
    async fn already_paired_seeker_is_rejected() {
        let store = FakeStore::default();
        store.bind_pair(1, 2).await.unwrap();

        let err = try_match(&store, 1, Locale::En).await.unwrap_err();

        assert!(matches!(err, StoreError::AlreadyPaired(1)));
    }
}
