// SPDX-FileCopyrightText: 2026 anon_relay contributors
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The operator log channel. Fire-and-forget: failures are logged but never affect the
//! relay outcome, and the copy happens before content-policy filtering
//! so operators can see what was blocked.

use crate::platform::{ChatPlatform, Content};
use crate::types::UserId;

/// Sends a best-effort copy of `content` to the configured log
/// channel, if one is configured. `None` for `log_channel_id` means the
/// archive is disabled.
pub async fn archive(
    platform: &dyn ChatPlatform,
    log_channel_id: Option<i64>,
    sender: UserId,
    partner: UserId,
    content: &Content,
) {
    let Some(channel) = log_channel_id else {
        return;
    };

    let caption = format!("sender={sender} partner={partner}");
    if let Err(err) = platform.copy_to_archive(channel, &caption, content).await {
        tracing::warn!(%err, sender, partner, "archive copy failed");
    }
}
