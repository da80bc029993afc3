// SPDX-FileCopyrightText: 2026 anon_relay contributors
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Bidirectional message relay. Forwards one inbound
//! message from its sender to the sender's current partner, enforcing
//! the ban/subscription gates and the content policy, archiving a
//! pre-filter copy, and tearing the pair down if the peer turns out to
//! be unreachable.

use tracing::instrument;

use crate::archive;
use crate::error::RelayError;
use crate::messages::{self, MessageKey};
use crate::platform::{ChatPlatform, Content, PlatformError};
use crate::policy;
use crate::store::Store;
use crate::types::{Locale, UserId};

/// `true` if the subscription gate was already checked by the caller.
/// Relay only needs the ban gate and the partner lookup; the
/// Dispatcher applies the subscription gate uniformly to every command.
#[instrument(skip(store, platform, content))]
pub async fn relay(
    store: &dyn Store,
    platform: &dyn ChatPlatform,
    log_channel_id: Option<i64>,
    sender: UserId,
    sender_locale: Locale,
    content: Content,
) -> Result<(), RelayError> {
    if store.is_banned(sender).await? {
        send(platform, sender, messages::text(sender_locale, MessageKey::GloballyBanned)).await;
        return Ok(());
    }

    let Some(peer) = store.partner_of(sender).await? else {
        send(platform, sender, messages::text(sender_locale, MessageKey::NotInChatMsg)).await;
        return Ok(());
    };

    // Archive before filtering so operators can see what was blocked.
    archive::archive(platform, log_channel_id, sender, peer, &content).await;

    if let Some(text) = content.filterable_text() {
        if policy::contains_url(text) {
            metrics::counter!("anon_relay_policy_blocks_total", "reason" => "url").increment(1);
            send(platform, sender, messages::text(sender_locale, MessageKey::LinkBlocked)).await;
            return Ok(());
        }
        if policy::contains_mention(text) {
            metrics::counter!("anon_relay_policy_blocks_total", "reason" => "mention").increment(1);
            send(
                platform,
                sender,
                messages::text(sender_locale, MessageKey::UsernameBlocked),
            )
            .await;
            return Ok(());
        }
    }

    let peer_locale = store.locale_of(peer).await?;
    let outgoing = with_marker(content, peer_locale);

    match platform.send_content(peer, &outgoing, true).await {
        Ok(()) => {
            metrics::counter!("anon_relay_messages_relayed_total").increment(1);
            Ok(())
        }
        Err(PlatformError::Terminal(_)) => {
            store.end_pair(sender).await?;
            send(
                platform,
                sender,
                messages::text(sender_locale, MessageKey::UnreachablePartner),
            )
            .await;
            Ok(())
        }
        Err(PlatformError::Transient(_)) => {
            send(
                platform,
                sender,
                messages::text(sender_locale, MessageKey::FailedToSend),
            )
            .await;
            Ok(())
        }
    }
}

/// Prepends the locale-appropriate "random partner" marker for text and
/// captioned media, but never for stickers.
fn with_marker(content: Content, peer_locale: Locale) -> Content {
    if !content.takes_marker_prefix() {
        return content;
    }
    let prefix = messages::text(peer_locale, MessageKey::PartnerPrefix);
    match content {
        Content::Text(text) => Content::Text(format!("{prefix}{text}")),
        Content::Photo { file_id, caption } => Content::Photo {
            file_id,
            caption: Some(prefixed_caption(prefix, caption)),
        },
        Content::Video { file_id, caption } => Content::Video {
            file_id,
            caption: Some(prefixed_caption(prefix, caption)),
        },
        Content::Document { file_id, caption } => Content::Document {
            file_id,
            caption: Some(prefixed_caption(prefix, caption)),
        },
        Content::Voice { file_id, caption } => Content::Voice {
            file_id,
            caption: Some(prefixed_caption(prefix, caption)),
        },
        sticker @ Content::Sticker { .. } => sticker,
    }
}

fn prefixed_caption(prefix: &str, caption: Option<String>) -> String {
    match caption {
        Some(caption) => format!("{prefix}{caption}"),
        None => prefix.to_string(),
    }
}

async fn send(platform: &dyn ChatPlatform, to: UserId, text: &str) {
    if let Err(err) = platform.send_text(to, text, true).await {
        tracing::warn!(%err, to, "failed to deliver reply");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use crate::test_support::{FakePlatform, FakeStore};

    #[tokio::test]
    async fn text_is_forwarded_with_marker_prefix() {
        let store = FakeStore::default();
        let platform = FakePlatform::default();
        store.ensure_user(1, Locale::En).await.unwrap();
        store.ensure_user(2, Locale::En).await.unwrap();
        store.bind_pair(1, 2).await.unwrap();

        relay(&store, &platform, None, 1, Locale::En, Content::Text("hi".to_string()))
            .await
            .unwrap();

        let sent = platform.sent.lock().unwrap();
        let (to, text) = sent.last().unwrap();
        assert_eq!(*to, 2);
        assert!(text.contains("hi"));
    }

    #[tokio::test]
    async fn url_in_text_is_blocked_before_reaching_peer() {
        let store = FakeStore::default();
        let platform = FakePlatform::default();
        store.ensure_user(1, Locale::En).await.unwrap();
        store.ensure_user(2, Locale::En).await.unwrap();
        store.bind_pair(1, 2).await.unwrap();

        relay(
            &store,
            &platform,
            None,
            1,
            Locale::En,
            Content::Text("join https://t.me/spam".to_string()),
        )
        .await
        .unwrap();

        assert!(platform.sent.lock().unwrap().iter().all(|(to, _)| *to != 2));
    }

    #[tokio::test]
    async fn undeliverable_peer_tears_down_the_pair() {
        let store = FakeStore::default();
        let platform = FakePlatform::default();
        store.ensure_user(1, Locale::En).await.unwrap();
        store.ensure_user(2, Locale::En).await.unwrap();
        store.bind_pair(1, 2).await.unwrap();
        platform.undeliverable.lock().unwrap().insert(2);

        relay(&store, &platform, None, 1, Locale::En, Content::Text("hi".to_string()))
            .await
            .unwrap();

        assert_eq!(store.partner_of(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn sender_with_no_partner_gets_not_in_chat_reply() {
        let store = FakeStore::default();
        let platform = FakePlatform::default();
        store.ensure_user(1, Locale::En).await.unwrap();

        relay(&store, &platform, None, 1, Locale::En, Content::Text("hi".to_string()))
            .await
            .unwrap();

        assert_eq!(platform.sent.lock().unwrap().len(), 1);
    }
}
