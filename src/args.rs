// SPDX-FileCopyrightText: 2026 anon_relay contributors
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "anon-relay")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Debug, Default, Subcommand)]
pub enum Command {
    /// Run the bot (default).
    #[default]
    Run,
    /// Apply pending database migrations and exit.
    Migrate,
}
