// SPDX-FileCopyrightText: 2026 anon_relay contributors
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! `teloxide`-backed [`ChatPlatform`] implementation.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatMemberKind, InlineKeyboardButton, InlineKeyboardMarkup, InputFile};
use teloxide::{ApiError, RequestError};

use crate::types::UserId as DomainUserId;

use super::{Button, ChatPlatform, Content, Keyboard, MemberStatus, PlatformError, TerminalDeliveryError};

fn to_markup(keyboard: Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.into_iter().map(|row| {
        row.into_iter().map(|button| match button {
            Button::Callback { label, data } => InlineKeyboardButton::callback(label, data),
            Button::Url { label, url } => InlineKeyboardButton::url(
                label,
                url.parse().expect("button url must be well-formed"),
            ),
        })
    }))
}

pub struct TeloxidePlatform {
    bot: Bot,
}

impl TeloxidePlatform {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn classify(err: RequestError) -> PlatformError {
    match err {
        RequestError::Api(ApiError::BotBlocked) => TerminalDeliveryError::BotBlocked.into(),
        RequestError::Api(ApiError::UserDeactivated) => {
            TerminalDeliveryError::UserDeactivated.into()
        }
        RequestError::Api(ApiError::ChatNotFound) => TerminalDeliveryError::ChatNotFound.into(),
        other => PlatformError::Transient(other.to_string()),
    }
}

#[async_trait]
impl ChatPlatform for TeloxidePlatform {
    async fn send_text(
        &self,
        chat: DomainUserId,
        text: &str,
        protect_content: bool,
    ) -> Result<(), PlatformError> {
        self.bot
            .send_message(ChatId(chat), text)
            .protect_content(protect_content)
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn send_keyboard(
        &self,
        chat: DomainUserId,
        text: &str,
        keyboard: Keyboard,
    ) -> Result<(), PlatformError> {
        self.bot
            .send_message(ChatId(chat), text)
            .reply_markup(to_markup(keyboard))
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn send_content(
        &self,
        chat: DomainUserId,
        content: &Content,
        protect_content: bool,
    ) -> Result<(), PlatformError> {
        let chat_id = ChatId(chat);
        match content {
            Content::Text(text) => {
                self.bot
                    .send_message(chat_id, text)
                    .protect_content(protect_content)
                    .await
                    .map_err(classify)?;
            }
            Content::Photo { file_id, caption } => {
                let mut req = self.bot.send_photo(chat_id, InputFile::file_id(file_id));
                if let Some(caption) = caption {
                    req = req.caption(caption.clone());
                }
                req.protect_content(protect_content).await.map_err(classify)?;
            }
            Content::Video { file_id, caption } => {
                let mut req = self.bot.send_video(chat_id, InputFile::file_id(file_id));
                if let Some(caption) = caption {
                    req = req.caption(caption.clone());
                }
                req.protect_content(protect_content).await.map_err(classify)?;
            }
            Content::Document { file_id, caption } => {
                let mut req = self.bot.send_document(chat_id, InputFile::file_id(file_id));
                if let Some(caption) = caption {
                    req = req.caption(caption.clone());
                }
                req.protect_content(protect_content).await.map_err(classify)?;
            }
            Content::Voice { file_id, caption } => {
                let mut req = self.bot.send_voice(chat_id, InputFile::file_id(file_id));
                if let Some(caption) = caption {
                    req = req.caption(caption.clone());
                }
                req.protect_content(protect_content).await.map_err(classify)?;
            }
            Content::Sticker { file_id } => {
                self.bot
                    .send_sticker(chat_id, InputFile::file_id(file_id))
                    .protect_content(protect_content)
                    .await
                    .map_err(classify)?;
            }
        }
        Ok(())
    }

    async fn copy_to_archive(
        &self,
        archive_chat: i64,
        caption: &str,
        content: &Content,
    ) -> Result<(), PlatformError> {
        let chat_id = ChatId(archive_chat);
        match content {
            Content::Text(text) => {
                self.bot
                    .send_message(chat_id, format!("{caption}\n\n{text}"))
                    .await
                    .map_err(classify)?;
            }
            Content::Photo { file_id, .. } => {
                self.bot
                    .send_photo(chat_id, InputFile::file_id(file_id))
                    .caption(caption.to_owned())
                    .await
                    .map_err(classify)?;
            }
            Content::Video { file_id, .. } => {
                self.bot
                    .send_video(chat_id, InputFile::file_id(file_id))
                    .caption(caption.to_owned())
                    .await
                    .map_err(classify)?;
            }
            Content::Document { file_id, .. } => {
                self.bot
                    .send_document(chat_id, InputFile::file_id(file_id))
                    .caption(caption.to_owned())
                    .await
                    .map_err(classify)?;
            }
            Content::Voice { file_id, .. } => {
                self.bot
                    .send_voice(chat_id, InputFile::file_id(file_id))
                    .caption(caption.to_owned())
                    .await
                    .map_err(classify)?;
            }
            Content::Sticker { file_id } => {
                self.bot
                    .send_sticker(chat_id, InputFile::file_id(file_id))
                    .await
                    .map_err(classify)?;
                self.bot.send_message(chat_id, caption.to_owned()).await.map_err(classify)?;
            }
        }
        Ok(())
    }

    async fn get_chat_member_status(
        &self,
        channel: &str,
        user: DomainUserId,
    ) -> Result<MemberStatus, PlatformError> {
        let channel_chat_id: ChatId = parse_channel(channel);
        let member = self
            .bot
            .get_chat_member(channel_chat_id, teloxide::types::UserId(user as u64))
            .await
            .map_err(classify)?;
        Ok(match member.kind {
            ChatMemberKind::Owner(_) => MemberStatus::Creator,
            ChatMemberKind::Administrator(_) => MemberStatus::Administrator,
            ChatMemberKind::Member { .. } => MemberStatus::Member,
            ChatMemberKind::Restricted(_) => MemberStatus::Member,
            ChatMemberKind::Left => MemberStatus::Left,
            ChatMemberKind::Banned(_) => MemberStatus::Kicked,
        })
    }
}

/// Channel ids are configured either as a numeric id (`-100123...`) or
/// a `@username`; Telegram's `getChatMember` accepts both forms as a
/// `ChatId`-like string, but `teloxide`'s `ChatId` is numeric-only, so
/// usernames are passed through `ChatId` construction is not possible —
/// this deployment therefore requires `CHANNEL_ID` to be the numeric
/// chat id.
fn parse_channel(channel: &str) -> ChatId {
    ChatId(channel.parse().expect("CHANNEL_ID must be a numeric chat id"))
}
