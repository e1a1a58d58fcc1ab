mod config;
mod format;
mod menu;

use std::io;

use agora_store::SocialStore;
use tracing::info;

use crate::menu::Menu;

fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so the menu owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agora_cli=info,agora_store=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let config = config::from_env()?;
    let store = SocialStore::new(config)?;
    info!("Agora ready");

    let stdin = io::stdin();
    Menu::new(store, stdin.lock(), io::stdout()).run()
}
