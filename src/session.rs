// SPDX-FileCopyrightText: 2026 anon_relay contributors
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Per-user session state machine. Only `{Idle, Waiting,
//! Paired}` are materialized — they're derived from two Store reads on
//! every command rather than stored as a separate table. `Matching` is
//! a transient label that exists only inside [`crate::matcher::try_match`].

use crate::error::StoreError;
use crate::store::Store;
use crate::types::{SessionState, UserId};

/// Computes the current [`SessionState`] of `id` from Store reads.
pub async fn current_state(store: &dyn Store, id: UserId) -> Result<SessionState, StoreError> {
    if let Some(partner) = store.partner_of(id).await? {
        return Ok(SessionState::Paired(partner));
    }
    if store.is_waiting(id).await? {
        return Ok(SessionState::Waiting);
    }
    Ok(SessionState::Idle)
}
