// SPDX-FileCopyrightText: 2026 anon_relay contributors
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use anon_relay::args::{Args, Command};
use anon_relay::settings::get_configuration;
use anon_relay::store::postgres::PgStore;
use anon_relay::{logging, run, RunParams};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let args = Args::parse();
    let settings = get_configuration("configuration/")?;

    match args.cmd.unwrap_or_default() {
        Command::Migrate => {
            let store = PgStore::connect(&settings.database.connection_string()).await?;
            store.migrate().await?;
            tracing::info!("migrations applied");
            Ok(())
        }
        Command::Run => run(RunParams { settings }).await,
    }
}
