// SPDX-FileCopyrightText: 2026 anon_relay contributors
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! URL and mention detection. The prefix list names the concrete
//! Telegram short-link hosts alongside the generic `http(s)://`/`www.`
//! schemes.

use std::sync::LazyLock;

use regex::Regex;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(https?://|www\.|t\.me/|t\.co/|telegram\.me/|telegram\.dog/)[\w.-]+")
        .expect("URL_PATTERN is a valid regex")
});

/// True if `text` contains something that looks like a URL.
pub fn contains_url(text: &str) -> bool {
    URL_PATTERN.is_match(text)
}

/// True if `text` contains a literal `@`, treated as a username mention
///.
pub fn contains_mention(text: &str) -> bool {
    text.contains('@')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_common_url_schemes() {
        assert!(contains_url("check out https://example.com"));
        assert!(contains_url("visit www.example.com now"));
        assert!(contains_url("HTTP://EXAMPLE.COM"));
    }

    #[test]
    fn detects_telegram_short_links() {
        assert!(contains_url("join t.me/somechannel"));
        assert!(contains_url("t.co/abc123"));
        assert!(contains_url("telegram.me/somebot"));
        assert!(contains_url("telegram.dog/somebot"));
    }

    #[test]
    fn plain_text_is_not_a_url() {
        assert!(!contains_url("hello, how are you today?"));
    }

    #[test]
    fn mention_is_a_bare_at_sign() {
        assert!(contains_mention("hi @someone"));
        assert!(!contains_mention("no mentions here"));
    }
}
