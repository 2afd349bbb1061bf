//! Shutter Client - browse users, albums, and photos from the terminal.
//!
//! A thin stand-in for the view layer: loads configuration, opens the local
//! state file, and walks the listings once so the session wiring can be
//! exercised end to end.

use shutter_client::{ApiClient, Config, Session, TombstoneStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shutter_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("Starting Shutter against {}", config.api_base_url);

    let tombstones = TombstoneStore::open(&config.state_path)?;
    let api = ApiClient::new(config.api_base_url.clone());

    // The terminal session browses as nobody in particular; management
    // actions stay gated behind MANAGER_USER_ID.
    let capability = config.capability_for(-1);
    let mut session = Session::new(api, capability, tombstones);

    session.load_users().await;
    if let Some(message) = session.users().error() {
        tracing::warn!("{message}");
        return Ok(());
    }

    for user in session.users().items().to_vec() {
        println!("{} <{}> ({})", user.name, user.email, user.username);

        session.load_albums(user.id).await;
        if let Some(message) = session.albums().error() {
            tracing::warn!("{message}");
            continue;
        }

        for album in session.visible_albums() {
            if album.user_id == user.id {
                println!("  [{}] {}", album.id, album.title);
            }
        }
    }

    Ok(())
}
