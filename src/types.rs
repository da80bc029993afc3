// SPDX-FileCopyrightText: 2026 anon_relay contributors
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Shared domain types for the matching and relay core.

use std::fmt;
use std::str::FromStr;

/// Platform-assigned user identifier.
pub type UserId = i64;

/// The closed set of locales a user can select: English, Arabic, and
/// Spanish. `En` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    En,
    Ar,
    Es,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Ar, Locale::Es];

    /// Human-readable name shown on locale-picker buttons.
    pub fn display_name(self) -> &'static str {
        match self {
            Locale::En => "English 🇬🇧",
            Locale::Ar => "العربية 🇸🇦",
            Locale::Es => "Español 🇪🇸",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Locale::En => "en",
            Locale::Ar => "ar",
            Locale::Es => "es",
        })
    }
}

#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("unsupported locale code")]
pub struct ParseLocaleError;

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Locale::En),
            "ar" => Ok(Locale::Ar),
            "es" => Ok(Locale::Es),
            _ => Err(ParseLocaleError),
        }
    }
}

/// A user's derived session state. Never stored directly;
/// always computed from two Store reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Waiting,
    Paired(UserId),
}
