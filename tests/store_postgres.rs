// SPDX-FileCopyrightText: 2026 anon_relay contributors
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Integration tests against a real Postgres instance,
//! exercising the SQL in `src/store/postgres.rs` directly rather than
//! through the in-memory `FakeStore` used by the crate's unit tests.

use anon_relay::store::postgres::PgStore;
use anon_relay::store::Store;
use anon_relay::types::Locale;
use sqlx::PgPool;

#[sqlx::test]
async fn fifo_match_across_locales(pool: PgPool) -> sqlx::Result<()> {
    let store = PgStore::new(pool);
    store.ensure_user(1, Locale::En).await.unwrap();
    store.ensure_user(2, Locale::Ar).await.unwrap();
    store.ensure_user(3, Locale::En).await.unwrap();
    store.ensure_user(4, Locale::En).await.unwrap();

    store.enqueue_if_absent(1).await.unwrap();
    store.enqueue_if_absent(2).await.unwrap();
    store.enqueue_if_absent(3).await.unwrap();

    // 4 is English; the only eligible waiter is 1, the oldest English
    // speaker in the queue (2 is Arabic, 3 arrived later).
    let claimed = store.claim_eligible_waiter(4, Locale::En).await.unwrap();

    assert_eq!(claimed, Some(1));
    assert!(store.is_waiting(2).await.unwrap());
    assert!(store.is_waiting(3).await.unwrap());
    Ok(())
}

#[sqlx::test]
async fn concurrent_claims_never_return_the_same_waiter(pool: PgPool) -> sqlx::Result<()> {
    let store = PgStore::new(pool);
    store.ensure_user(1, Locale::En).await.unwrap();
    store.ensure_user(2, Locale::En).await.unwrap();
    store.ensure_user(3, Locale::En).await.unwrap();
    store.enqueue_if_absent(1).await.unwrap();

    let (a, b) = tokio::join!(
        store.claim_eligible_waiter(2, Locale::En),
        store.claim_eligible_waiter(3, Locale::En),
    );
    let claims: Vec<_> = [a.unwrap(), b.unwrap()].into_iter().flatten().collect();

    assert_eq!(claims, vec![1]);
    Ok(())
}

#[sqlx::test]
async fn mutually_blocked_waiter_is_excluded(pool: PgPool) -> sqlx::Result<()> {
    let store = PgStore::new(pool);
    store.ensure_user(1, Locale::En).await.unwrap();
    store.ensure_user(2, Locale::En).await.unwrap();
    store.enqueue_if_absent(1).await.unwrap();
    store.add_block(2, 1).await.unwrap();

    let claimed = store.claim_eligible_waiter(2, Locale::En).await.unwrap();

    assert_eq!(claimed, None);
    Ok(())
}

#[sqlx::test]
async fn bind_pair_rejects_a_user_already_paired(pool: PgPool) -> sqlx::Result<()> {
    let store = PgStore::new(pool);
    store.ensure_user(1, Locale::En).await.unwrap();
    store.ensure_user(2, Locale::En).await.unwrap();
    store.ensure_user(3, Locale::En).await.unwrap();
    store.bind_pair(1, 2).await.unwrap();

    let err = store.bind_pair(1, 3).await.unwrap_err();

    assert!(matches!(err, anon_relay::error::StoreError::AlreadyPaired(1)));
    Ok(())
}

#[sqlx::test]
async fn end_pair_removes_both_symmetric_rows(pool: PgPool) -> sqlx::Result<()> {
    let store = PgStore::new(pool);
    store.ensure_user(1, Locale::En).await.unwrap();
    store.ensure_user(2, Locale::En).await.unwrap();
    store.bind_pair(1, 2).await.unwrap();

    let former_partner = store.end_pair(1).await.unwrap();

    assert_eq!(former_partner, Some(2));
    assert_eq!(store.partner_of(2).await.unwrap(), None);
    Ok(())
}

#[sqlx::test]
async fn global_ban_cascades_out_of_queue_and_pair(pool: PgPool) -> sqlx::Result<()> {
    let store = PgStore::new(pool);
    store.ensure_user(1, Locale::En).await.unwrap();
    store.ensure_user(2, Locale::En).await.unwrap();
    store.bind_pair(1, 2).await.unwrap();

    let former_partner = store.add_global_ban(1).await.unwrap();

    assert_eq!(former_partner, Some(2));
    assert!(store.is_banned(1).await.unwrap());
    assert_eq!(store.partner_of(2).await.unwrap(), None);

    // a banned user is never claimable even if somehow re-enqueued
    store.enqueue_if_absent(1).await.unwrap();
    store.ensure_user(3, Locale::En).await.unwrap();
    let claimed = store.claim_eligible_waiter(3, Locale::En).await.unwrap();
    assert_eq!(claimed, None);
    Ok(())
}
