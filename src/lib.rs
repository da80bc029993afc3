// SPDX-FileCopyrightText: 2026 anon_relay contributors
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Anonymous one-to-one chat relay core: matching, pairing, the
//! bidirectional relay and the surrounding gates, wired behind a
//! [`store::Store`] and a [`platform::ChatPlatform`] so the domain logic
//! never depends on a concrete database or messaging SDK.

pub mod archive;
pub mod args;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod messages;
pub mod platform;
pub mod policy;
pub mod relay;
pub mod session;
pub mod settings;
pub mod store;
#[cfg(test)]
mod test_support;
pub mod types;

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, MediaKind, MessageKind};

use dispatcher::{ChatEvent, Command, DispatcherConfig};
use platform::{teloxide_adapter::TeloxidePlatform, ChatPlatform, Content};
use settings::Settings;
use store::{postgres::PgStore, Store};
use types::Locale;

/// Everything [`run`] needs, assembled by `main` — an explicit params
/// struct instead of a grab bag of positional arguments.
pub struct RunParams {
    pub settings: Settings,
}

/// Builds the Postgres store and Telegram bot and drives the polling
/// loop until the process is signalled to stop. Every event is handed
/// to [`dispatcher::dispatch`]; dispatch errors are logged and never
/// tear down the loop.
pub async fn run(params: RunParams) -> anyhow::Result<()> {
    let RunParams { settings } = params;

    let store: Arc<dyn Store> =
        Arc::new(PgStore::connect(&settings.database.connection_string()).await?);
    let bot = Bot::new(settings.bot.token.expose());
    let platform: Arc<dyn ChatPlatform> = Arc::new(TeloxidePlatform::new(bot.clone()));
    let config = Arc::new(DispatcherConfig {
        subscription_channel: settings.bot.channel_id.clone(),
        log_channel_id: settings.log_channel_id,
    });

    let handler = Update::filter_message()
        .endpoint({
            let store = store.clone();
            let platform = platform.clone();
            let config = config.clone();
            move |msg: Message| {
                let store = store.clone();
                let platform = platform.clone();
                let config = config.clone();
                async move {
                    if let Some(event) = classify_message(&msg) {
                        if let Err(err) =
                            dispatcher::dispatch(store.as_ref(), platform.as_ref(), &config, event)
                                .await
                        {
                            tracing::warn!(%err, "dispatch failed");
                        }
                    }
                    respond(())
                }
            }
        })
        .branch(Update::filter_callback_query().endpoint({
            let store = store.clone();
            let platform = platform.clone();
            let config = config.clone();
            move |cb: CallbackQuery| {
                let store = store.clone();
                let platform = platform.clone();
                let config = config.clone();
                async move {
                    if let Some(event) = classify_callback(&cb) {
                        if let Err(err) =
                            dispatcher::dispatch(store.as_ref(), platform.as_ref(), &config, event)
                                .await
                        {
                            tracing::warn!(%err, "dispatch failed");
                        }
                    }
                    respond(())
                }
            }
        }));

    tracing::info!("starting bot dispatcher");
    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

/// Classifies a `teloxide::Message` into a [`ChatEvent`]. `None` for update kinds the bot does not act on.
fn classify_message(msg: &Message) -> Option<ChatEvent> {
    let user = msg.from.as_ref()?.id.0 as types::UserId;

    if let Some(text) = msg.text() {
        if let Some(command) = parse_command(text) {
            return Some(ChatEvent::Command { user, command });
        }
    }

    content_of(msg).map(|content| ChatEvent::Content { user, content })
}

fn parse_command(text: &str) -> Option<Command> {
    match text.split_whitespace().next()? {
        "/start" => Some(Command::Start),
        "/search" => Some(Command::Search),
        "/next" => Some(Command::Next),
        "/stop" => Some(Command::Stop),
        "/block" => Some(Command::BlockRequest),
        "/settings" => Some(Command::Settings),
        _ => None,
    }
}

fn content_of(msg: &Message) -> Option<Content> {
    match &msg.kind {
        MessageKind::Common(common) => match &common.media_kind {
            MediaKind::Text(t) => Some(Content::Text(t.text.clone())),
            MediaKind::Photo(p) => Some(Content::Photo {
                file_id: p.photo.last()?.file.id.to_string(),
                caption: p.caption.clone(),
            }),
            MediaKind::Video(v) => Some(Content::Video {
                file_id: v.video.file.id.to_string(),
                caption: v.caption.clone(),
            }),
            MediaKind::Document(d) => Some(Content::Document {
                file_id: d.document.file.id.to_string(),
                caption: d.caption.clone(),
            }),
            MediaKind::Voice(v) => Some(Content::Voice {
                file_id: v.voice.file.id.to_string(),
                caption: v.caption.clone(),
            }),
            MediaKind::Sticker(s) => Some(Content::Sticker {
                file_id: s.sticker.file.id.to_string(),
            }),
            _ => None,
        },
        _ => None,
    }
}

/// Callback data uses a `kind:payload` convention: `locale:<code>` for
/// the `/settings` picker, `block:yes:<reported>`/`block:no:<reported>`
/// for the two-step block confirmation.
fn classify_callback(cb: &CallbackQuery) -> Option<ChatEvent> {
    let user = cb.from.id.0 as types::UserId;
    let data = cb.data.as_deref()?;
    let (kind, payload) = data.split_once(':')?;
    match kind {
        "locale" => {
            let locale: Locale = payload.parse().ok()?;
            Some(ChatEvent::SetLocale { user, locale })
        }
        "block" => {
            let (verdict, reported) = payload.split_once(':')?;
            Some(ChatEvent::BlockConfirm {
                user,
                reported: reported.parse().ok()?,
                confirm: verdict == "yes",
            })
        }
        _ => None,
    }
}
