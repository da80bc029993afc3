// SPDX-FileCopyrightText: 2026 anon_relay contributors
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Process configuration. Loaded from a base YAML file merged with
//! environment variables via `get_configuration`.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use zeroize::Zeroize;

/// Top-level process settings.
#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub bot: BotSettings,
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    /// Absence disables the archive.
    pub log_channel_id: Option<i64>,
}

#[derive(Deserialize, Clone)]
pub struct BotSettings {
    pub token: SecretString,
    pub admin_id: i64,
    pub channel_id: String,
    pub channel_invite_link: String,
}

impl std::fmt::Debug for BotSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotSettings")
            .field("token", &"<redacted>")
            .field("admin_id", &self.admin_id)
            .field("channel_id", &self.channel_id)
            .field("channel_invite_link", &self.channel_invite_link)
            .finish()
    }
}

/// A secret value that is zeroized on drop.
#[derive(Deserialize, Clone)]
pub struct SecretString(String);

impl SecretString {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde(default = "default_metrics_listen")]
    pub metrics_listen: SocketAddr,
}

fn default_metrics_listen() -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 9090)
}

/// Configuration for the Postgres connection.
#[derive(Deserialize, Clone)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: SecretString,
    pub port: u16,
    pub host: String,
    pub name: String,
}

impl std::fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("port", &self.port)
            .field("host", &self.host)
            .field("name", &self.name)
            .finish()
    }
}

impl DatabaseSettings {
    pub fn connection_string(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username,
            self.password.expose(),
            self.host,
            self.port,
            self.name
        )
    }
}

/// Loads settings from `<base_path>/settings.yaml`, overridden by
/// `ANON_RELAY__`-prefixed environment variables (so `ANON_RELAY__BOT__TOKEN`
/// sets `bot.token`).
pub fn get_configuration(base_path: &str) -> Result<Settings, ConfigError> {
    let settings = Config::builder()
        .add_source(File::with_name(&format!("{base_path}settings")).required(false))
        .add_source(
            Environment::with_prefix("ANON_RELAY")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize()
}
