// Draft board entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Load the player catalog and guidance table
// 4. Open the database and restore the saved draft map
// 5. Run the TUI until the user quits

use draftboard_core::catalog::load_catalog;
use draftboard_core::config;
use draftboard_core::db::Database;
use draftboard_core::guidance::load_guidance;
use draftboard_core::session::DraftSession;
use draftboard_core::store::BlobPersistence;
use draftboard_tui::tui::{self, App};

use anyhow::Context;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Draft board starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: catalog={}, {}, slot {}",
        config.catalog_path.display(),
        config.team_count,
        config.draft_slot
    );

    // 3. Load catalog and guidance
    let catalog = load_catalog(&config.catalog_path).context("failed to load player catalog")?;
    info!("Loaded {} players", catalog.len());

    let guidance = load_guidance(config.guidance_path.as_deref())
        .context("failed to load guidance")?;
    info!("Loaded {} guidance entries", guidance.len());

    // 4. Open database
    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let db_path = config.db_path.to_string_lossy();
    let db = Database::open(&db_path).context("failed to open database")?;
    info!("Database opened at {}", db_path);

    let session = DraftSession::with_league(
        Box::new(BlobPersistence::new(db, config.storage_key.clone())),
        config.team_count,
        config.draft_slot,
    );
    let summary = session.draft_summary(&catalog);
    if summary.mine + summary.taken > 0 {
        info!(
            "Draft restored: {} mine, {} taken",
            summary.mine, summary.taken
        );
    } else {
        info!("Starting fresh draft");
    }

    // 5. Run the TUI event loop (blocking until user quits)
    let app = App::new(catalog, guidance, session);
    if let Err(e) = tui::run(app).await {
        error!("TUI error: {:#}", e);
        return Err(e);
    }

    info!("Draft board shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("draftboard.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("draftboard=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
