// SPDX-FileCopyrightText: 2026 anon_relay contributors
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Error taxonomy for the matching/relay core. Each layer gets its own
//! enum; conversions compose upward but nothing crosses the Dispatcher
//! boundary.

use thiserror::Error;

/// Errors surfaced by the [`crate::store::Store`] trait. Every variant is
/// treated as a transient failure: callers report a generic failure
/// and mutate no local state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    /// `bind_pair` was asked to bind a user that already has a partner.
    #[error("user {0} is already paired")]
    AlreadyPaired(i64),
}

/// Errors from [`crate::relay::relay`]. Platform delivery failures are
/// handled inline (terminal tears down the pair, transient gets a
/// retry reply) and never reach this type.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors surfaced to the Dispatcher. Nothing above this propagates to
/// another task or another user; the Dispatcher always converts this into
/// a reply and swallows the error.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Relay(#[from] RelayError),
}
