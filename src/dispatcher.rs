// SPDX-FileCopyrightText: 2026 anon_relay contributors
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Classifies inbound platform events and drives the Matcher/Relay/Store.
//! This is the single entry point; every command and content message
//! passes through [`dispatch`], and every error is caught here —
//! nothing propagates across event-tasks or users.

use tracing::instrument;

use crate::error::DispatchError;
use crate::matcher::{self, Outcome};
use crate::messages::{self, MessageKey};
use crate::platform::{Button, ChatPlatform, Content};
use crate::session::{self};
use crate::store::Store;
use crate::types::{Locale, SessionState, UserId};

/// The command surface, minus `start` and the onboarding-only paths
/// (out of scope here).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Search,
    Next,
    Stop,
    /// First tap of the two-step block flow.
    BlockRequest,
    Settings,
}

/// One inbound event, already classified by kind. `user` is
/// always the platform-assigned sender id.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    Command {
        user: UserId,
        command: Command,
    },
    /// Any non-command content: relayed.
    Content {
        user: UserId,
        content: Content,
    },
    /// The second tap of the block-confirmation flow. The
    /// reported party id rides along in the callback payload so the
    /// Dispatcher doesn't need to re-look-up who was being reported.
    BlockConfirm {
        user: UserId,
        reported: UserId,
        confirm: bool,
    },
    /// A locale chosen from the `/settings` picker.
    SetLocale { user: UserId, locale: Locale },
}

/// Runtime configuration the Dispatcher needs beyond Store/Platform:
/// the force-subscription channel and the archive channel.
pub struct DispatcherConfig {
    pub subscription_channel: String,
    pub log_channel_id: Option<i64>,
}

#[instrument(skip(store, platform, config, event))]
pub async fn dispatch(
    store: &dyn Store,
    platform: &dyn ChatPlatform,
    config: &DispatcherConfig,
    event: ChatEvent,
) -> Result<(), DispatchError> {
    match event {
        ChatEvent::Command { user, command } => {
            let locale = store.locale_of(user).await?;
            store.ensure_user(user, locale).await?;
            if !gate(store, platform, config, user, locale).await? {
                return Ok(());
            }
            match command {
                Command::Start => handle_start(store, platform, user, locale).await,
                Command::Search => handle_search(store, platform, user, locale).await,
                Command::Next => handle_next(store, platform, user, locale).await,
                Command::Stop => handle_stop(store, platform, user, locale).await,
                Command::BlockRequest => handle_block_request(store, platform, user, locale).await,
                Command::Settings => handle_settings(platform, user, locale).await,
            }
        }
        ChatEvent::SetLocale { user, locale } => {
            store.ensure_user(user, locale).await?;
            reply(platform, user, messages::text(locale, MessageKey::SettingsSaved)).await;
            Ok(())
        }
        ChatEvent::BlockConfirm {
            user,
            reported,
            confirm,
        } => handle_block_confirm(store, platform, config, user, reported, confirm).await,
        ChatEvent::Content { user, content } => {
            let locale = store.locale_of(user).await?;
            store.ensure_user(user, locale).await?;
            if !gate(store, platform, config, user, locale).await? {
                return Ok(());
            }
            crate::relay::relay(store, platform, config.log_channel_id, user, locale, content)
                .await?;
            Ok(())
        }
    }
}

/// Ban gate + subscription gate. Returns `false` (and has already sent
/// the appropriate reply) if the event should not proceed further.
async fn gate(
    store: &dyn Store,
    platform: &dyn ChatPlatform,
    config: &DispatcherConfig,
    user: UserId,
    locale: Locale,
) -> Result<bool, DispatchError> {
    if store.is_banned(user).await? {
        reply(platform, user, messages::text(locale, MessageKey::GloballyBanned)).await;
        return Ok(false);
    }

    let subscribed = platform
        .get_chat_member_status(&config.subscription_channel, user)
        .await
        .map(|status| status.is_subscribed())
        .unwrap_or(false);

    if !subscribed {
        reply(platform, user, messages::text(locale, MessageKey::JoinChannelMsg)).await;
        return Ok(false);
    }

    Ok(true)
}

async fn handle_start(
    store: &dyn Store,
    platform: &dyn ChatPlatform,
    user: UserId,
    locale: Locale,
) -> Result<(), DispatchError> {
    let key = match session::current_state(store, user).await? {
        SessionState::Paired(_) => MessageKey::AlreadyInChat,
        SessionState::Waiting => MessageKey::AlreadySearching,
        SessionState::Idle => MessageKey::Welcome,
    };
    reply(platform, user, messages::text(locale, key)).await;
    Ok(())
}

async fn handle_search(
    store: &dyn Store,
    platform: &dyn ChatPlatform,
    user: UserId,
    locale: Locale,
) -> Result<(), DispatchError> {
    match session::current_state(store, user).await? {
        SessionState::Paired(_) => {
            reply(platform, user, messages::text(locale, MessageKey::AlreadyInChat)).await;
            return Ok(());
        }
        SessionState::Waiting => {
            reply(platform, user, messages::text(locale, MessageKey::AlreadySearching)).await;
            return Ok(());
        }
        SessionState::Idle => {}
    }

    run_match(store, platform, user, locale).await
}

async fn handle_next(
    store: &dyn Store,
    platform: &dyn ChatPlatform,
    user: UserId,
    locale: Locale,
) -> Result<(), DispatchError> {
    if let Some(partner) = store.end_pair(user).await? {
        notify_partner_left(store, platform, partner).await;
    } else if store.is_waiting(user).await? {
        reply(platform, user, messages::text(locale, MessageKey::NextAlreadySearching)).await;
        return Ok(());
    }

    reply(platform, user, messages::text(locale, MessageKey::NextMsgUser)).await;
    run_match(store, platform, user, locale).await
}

async fn handle_stop(
    store: &dyn Store,
    platform: &dyn ChatPlatform,
    user: UserId,
    locale: Locale,
) -> Result<(), DispatchError> {
    if let Some(partner) = store.end_pair(user).await? {
        notify_partner_left(store, platform, partner).await;
        reply(platform, user, messages::text(locale, MessageKey::EndMsgUser)).await;
        return Ok(());
    }

    if store.is_waiting(user).await? {
        store.dequeue(user).await?;
        reply(platform, user, messages::text(locale, MessageKey::EndSearchCancel)).await;
        return Ok(());
    }

    reply(platform, user, messages::text(locale, MessageKey::EndNotInChat)).await;
    Ok(())
}

/// First tap of block: surfaces the confirmation prompt
/// without mutating any state. The caller is expected to present the
/// confirmation as a yes/no control and re-enter via
/// `ChatEvent::BlockConfirm`.
async fn handle_block_request(
    store: &dyn Store,
    platform: &dyn ChatPlatform,
    user: UserId,
    locale: Locale,
) -> Result<(), DispatchError> {
    let Some(partner) = store.partner_of(user).await? else {
        if store.is_waiting(user).await? {
            reply(platform, user, messages::text(locale, MessageKey::BlockWhileSearching)).await;
        } else {
            reply(platform, user, messages::text(locale, MessageKey::BlockNotInChat)).await;
        }
        return Ok(());
    };

    let keyboard = vec![vec![
        Button::Callback {
            label: "✅".to_string(),
            data: format!("block:yes:{partner}"),
        },
        Button::Callback {
            label: "❌".to_string(),
            data: format!("block:no:{partner}"),
        },
    ]];
    if let Err(err) = platform
        .send_keyboard(user, messages::text(locale, MessageKey::BlockConfirmText), keyboard)
        .await
    {
        tracing::warn!(%err, user, "failed to send block confirmation prompt");
    }
    Ok(())
}

async fn handle_block_confirm(
    store: &dyn Store,
    platform: &dyn ChatPlatform,
    config: &DispatcherConfig,
    user: UserId,
    reported: UserId,
    confirm: bool,
) -> Result<(), DispatchError> {
    let locale = store.locale_of(user).await?;

    if !confirm {
        reply(platform, user, messages::text(locale, MessageKey::BlockCancelled)).await;
        return Ok(());
    }

    store.add_block(user, reported).await?;

    if let Some(channel) = config.log_channel_id {
        let report = format!(
            "NEW REPORT: user {user} permanently blocked {reported}."
        );
        if let Err(err) = platform.send_text(channel, &report, false).await {
            tracing::warn!(%err, "failed to send block report to archive channel");
        }
    }

    let partner = store.end_pair(user).await?;
    reply(platform, user, messages::text(locale, MessageKey::BlockSuccess)).await;

    if let Some(partner) = partner {
        notify_partner_left(store, platform, partner).await;
    }

    Ok(())
}

async fn handle_settings(
    platform: &dyn ChatPlatform,
    user: UserId,
    locale: Locale,
) -> Result<(), DispatchError> {
    let keyboard = Locale::ALL
        .into_iter()
        .map(|option| {
            vec![Button::Callback {
                label: option.display_name().to_string(),
                data: format!("locale:{option}"),
            }]
        })
        .collect();
    if let Err(err) = platform
        .send_keyboard(user, messages::text(locale, MessageKey::SettingsText), keyboard)
        .await
    {
        tracing::warn!(%err, user, "failed to send locale picker");
    }
    Ok(())
}

/// Runs `tryMatch` and sends the appropriate reply.
async fn run_match(
    store: &dyn Store,
    platform: &dyn ChatPlatform,
    user: UserId,
    locale: Locale,
) -> Result<(), DispatchError> {
    match matcher::try_match(store, user, locale).await? {
        Outcome::Matched(peer) => {
            reply(platform, user, messages::text(locale, MessageKey::PartnerFound)).await;
            let peer_locale = store.locale_of(peer).await?;
            reply(platform, peer, messages::text(peer_locale, MessageKey::PartnerFound)).await;
        }
        Outcome::Waiting => {
            reply(platform, user, messages::text(locale, MessageKey::SearchWait)).await;
        }
    }
    Ok(())
}

/// Notifies a former partner that the other side left. The partner is *not*
/// re-enqueued — an explicit, preserved product decision.
async fn notify_partner_left(store: &dyn Store, platform: &dyn ChatPlatform, partner: UserId) {
    let partner_locale = store.locale_of(partner).await.unwrap_or_default();
    reply(
        platform,
        partner,
        messages::text(partner_locale, MessageKey::EndMsgPartner),
    )
    .await;
}

async fn reply(platform: &dyn ChatPlatform, to: UserId, text: &str) {
    if let Err(err) = platform.send_text(to, text, true).await {
        tracing::warn!(%err, to, "failed to deliver reply");
    }
}
