// SPDX-FileCopyrightText: 2026 anon_relay contributors
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The chat-platform adapter surface. Everything above this trait
//! (Matcher, Relay, Dispatcher) only ever talks to `dyn ChatPlatform`,
//! never a concrete SDK type, the same way `NetworkProvider` /
//! `PushNotificationProvider` are injected into `run()` elsewhere in
//! this codebase's lineage.

pub mod teloxide_adapter;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::UserId;

/// The typed outbound content primitives the relay forwards. Stickers
/// carry no caption; everything else may.
#[derive(Debug, Clone)]
pub enum Content {
    Text(String),
    Photo { file_id: String, caption: Option<String> },
    Video { file_id: String, caption: Option<String> },
    Document { file_id: String, caption: Option<String> },
    Voice { file_id: String, caption: Option<String> },
    Sticker { file_id: String },
}

impl Content {
    /// `true` for content that the content policy subjects to
    /// URL/mention filtering: anything carrying a text body or a caption.
    pub fn filterable_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Photo { caption, .. }
            | Content::Video { caption, .. }
            | Content::Document { caption, .. }
            | Content::Voice { caption, .. } => caption.as_deref(),
            Content::Sticker { .. } => None,
        }
    }

    /// `true` for content types that get the locale-prefixed marker
    /// prepended.
    pub fn takes_marker_prefix(&self) -> bool {
        !matches!(self, Content::Sticker { .. })
    }
}

/// One row of an inline keyboard attached to a text message.
#[derive(Debug, Clone)]
pub enum Button {
    /// Round-trips through the platform as a callback, re-entering the
    /// Dispatcher as a classified event.
    Callback { label: String, data: String },
    /// Opens an external link; never answered by the bot.
    Url { label: String, url: String },
}

pub type Keyboard = Vec<Vec<Button>>;

/// Membership status returned by the platform's `getChatMember`.
/// Only the "is a member in good standing" distinction matters to the
/// subscription gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberStatus {
    Member,
    Administrator,
    Creator,
    Left,
    Kicked,
}

impl MemberStatus {
    pub fn is_subscribed(self) -> bool {
        matches!(
            self,
            MemberStatus::Member | MemberStatus::Administrator | MemberStatus::Creator
        )
    }
}

/// Errors a send primitive can return. The `Terminal` variants are
/// exactly the delivery errors treated as "peer unreachable"; everything
/// else is `Transient` and does not tear down the pair.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("peer is unreachable: {0}")]
    Terminal(#[from] TerminalDeliveryError),
    #[error("transient send failure: {0}")]
    Transient(String),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TerminalDeliveryError {
    #[error("bot was blocked by the peer")]
    BotBlocked,
    #[error("peer account was deactivated")]
    UserDeactivated,
    #[error("chat could not be found")]
    ChatNotFound,
}

/// The platform client adapter. `Content` is opaque to
/// everything above this trait — no send primitive leaks a concrete
/// SDK type.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    async fn send_text(
        &self,
        chat: UserId,
        text: &str,
        protect_content: bool,
    ) -> Result<(), PlatformError>;

    /// Sends `text` with an inline keyboard attached.
    async fn send_keyboard(
        &self,
        chat: UserId,
        text: &str,
        keyboard: Keyboard,
    ) -> Result<(), PlatformError>;

    async fn send_content(
        &self,
        chat: UserId,
        content: &Content,
        protect_content: bool,
    ) -> Result<(), PlatformError>;

    /// Best-effort copy of `content` into the operator archive channel.
    /// Failures here are logged by the caller, not propagated as relay
    /// failures.
    async fn copy_to_archive(
        &self,
        archive_chat: i64,
        caption: &str,
        content: &Content,
    ) -> Result<(), PlatformError>;

    async fn get_chat_member_status(
        &self,
        channel: &str,
        user: UserId,
    ) -> Result<MemberStatus, PlatformError>;
}
