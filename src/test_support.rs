// SPDX-FileCopyrightText: 2026 anon_relay contributors
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! In-memory fakes for [`Store`] and [`ChatPlatform`], used by unit
//! tests across the crate instead of a real database or bot client.

#![cfg(test)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::platform::{Content, Keyboard, MemberStatus, PlatformError};
use crate::platform::ChatPlatform;
use crate::store::Store;
use crate::types::{Locale, UserId};

#[derive(Default)]
struct State {
    locales: HashMap<UserId, Locale>,
    banned: HashSet<UserId>,
    waiting: VecDeque<UserId>,
    pairs: HashMap<UserId, UserId>,
    blocks: HashSet<(UserId, UserId)>,
}

/// A single-process stand-in for `PgStore`. Every method mirrors the
/// SQL in `src/store/postgres.rs` closely enough that Matcher/Relay/
/// Dispatcher tests exercise the same invariants.
#[derive(Default)]
pub struct FakeStore {
    state: Mutex<State>,
}

#[async_trait]
impl Store for FakeStore {
    async fn ensure_user(&self, id: UserId, locale: Locale) -> Result<(), StoreError> {
        self.state.lock().unwrap().locales.insert(id, locale);
        Ok(())
    }

    async fn locale_of(&self, id: UserId) -> Result<Locale, StoreError> {
        Ok(self.state.lock().unwrap().locales.get(&id).copied().unwrap_or_default())
    }

    async fn is_banned(&self, id: UserId) -> Result<bool, StoreError> {
        Ok(self.state.lock().unwrap().banned.contains(&id))
    }

    async fn partner_of(&self, id: UserId) -> Result<Option<UserId>, StoreError> {
        Ok(self.state.lock().unwrap().pairs.get(&id).copied())
    }

    async fn is_waiting(&self, id: UserId) -> Result<bool, StoreError> {
        Ok(self.state.lock().unwrap().waiting.contains(&id))
    }

    async fn enqueue_if_absent(&self, id: UserId) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        if !state.waiting.contains(&id) {
            state.waiting.push_back(id);
        }
        Ok(())
    }

    async fn dequeue(&self, id: UserId) -> Result<(), StoreError> {
        self.state.lock().unwrap().waiting.retain(|&w| w != id);
        Ok(())
    }

    async fn claim_eligible_waiter(
        &self,
        seeker: UserId,
        seeker_locale: Locale,
    ) -> Result<Option<UserId>, StoreError> {
        let mut state = self.state.lock().unwrap();
        let position = state.waiting.iter().position(|&candidate| {
            candidate != seeker
                && state.locales.get(&candidate).copied().unwrap_or_default() == seeker_locale
                && !state.blocks.contains(&(seeker, candidate))
                && !state.blocks.contains(&(candidate, seeker))
                && !state.banned.contains(&candidate)
        });
        Ok(position.map(|index| state.waiting.remove(index).unwrap()))
    }

    async fn bind_pair(&self, a: UserId, b: UserId) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        if state.pairs.contains_key(&a) {
            return Err(StoreError::AlreadyPaired(a));
        }
        if state.pairs.contains_key(&b) {
            return Err(StoreError::AlreadyPaired(b));
        }
        state.pairs.insert(a, b);
        state.pairs.insert(b, a);
        Ok(())
    }

    async fn end_pair(&self, id: UserId) -> Result<Option<UserId>, StoreError> {
        let mut state = self.state.lock().unwrap();
        let Some(partner) = state.pairs.remove(&id) else {
            return Ok(None);
        };
        state.pairs.remove(&partner);
        Ok(Some(partner))
    }

    async fn add_block(&self, blocker: UserId, blocked: UserId) -> Result<(), StoreError> {
        self.state.lock().unwrap().blocks.insert((blocker, blocked));
        Ok(())
    }

    async fn add_global_ban(&self, id: UserId) -> Result<Option<UserId>, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.banned.insert(id);
        state.waiting.retain(|&w| w != id);
        let partner = state.pairs.remove(&id);
        if let Some(partner) = partner {
            state.pairs.remove(&partner);
        }
        Ok(partner)
    }
}

/// Records every outbound send instead of talking to a real platform.
#[derive(Default)]
pub struct FakePlatform {
    pub sent: Mutex<Vec<(UserId, String)>>,
    pub subscribed: Mutex<HashSet<UserId>>,
    pub undeliverable: Mutex<HashSet<UserId>>,
}

#[async_trait]
impl ChatPlatform for FakePlatform {
    async fn send_text(
        &self,
        chat: UserId,
        text: &str,
        _protect_content: bool,
    ) -> Result<(), PlatformError> {
        if self.undeliverable.lock().unwrap().contains(&chat) {
            return Err(crate::platform::TerminalDeliveryError::BotBlocked.into());
        }
        self.sent.lock().unwrap().push((chat, text.to_string()));
        Ok(())
    }

    async fn send_keyboard(
        &self,
        chat: UserId,
        text: &str,
        _keyboard: Keyboard,
    ) -> Result<(), PlatformError> {
        self.sent.lock().unwrap().push((chat, text.to_string()));
        Ok(())
    }

    async fn send_content(
        &self,
        chat: UserId,
        content: &Content,
        _protect_content: bool,
    ) -> Result<(), PlatformError> {
        if self.undeliverable.lock().unwrap().contains(&chat) {
            return Err(crate::platform::TerminalDeliveryError::BotBlocked.into());
        }
        let label = content.filterable_text().unwrap_or("<media>").to_string();
        self.sent.lock().unwrap().push((chat, label));
        Ok(())
    }

    async fn copy_to_archive(
        &self,
        archive_chat: i64,
        caption: &str,
        _content: &Content,
    ) -> Result<(), PlatformError> {
        self.sent.lock().unwrap().push((archive_chat, caption.to_string()));
        Ok(())
    }

    async fn get_chat_member_status(
        &self,
        _channel: &str,
        user: UserId,
    ) -> Result<MemberStatus, PlatformError> {
        Ok(if self.subscribed.lock().unwrap().contains(&user) {
            MemberStatus::Member
        } else {
            MemberStatus::Left
        })
    }
}
