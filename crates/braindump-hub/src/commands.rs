//! One-shot maintenance commands run from the CLI.

use anyhow::Result;
use braindump_shared::schemas::QuestionMode;

use crate::config::Configuration;
use crate::store::{Store, questions};

fn open_store(config: &Configuration) -> Result<Store> {
    Store::new(&config.db_path.to_string_lossy())
}

/// Create the database file and schema if missing.
pub fn init_db() -> Result<()> {
    let config = Configuration::create()?;
    let store = open_store(&config)?;
    drop(store);
    println!("Database ready at {}", config.db_path.display());
    Ok(())
}

/// Replace the question library with the built-in prompt sets.
pub fn seed_questions() -> Result<()> {
    let config = Configuration::create()?;
    let store = open_store(&config)?;
    let (normal, crisis) = questions::seed_questions(&store.conn())?;
    tracing::info!(normal, crisis, "question library seeded");
    println!("Seeded {normal} normal and {crisis} crisis questions");
    Ok(())
}

pub fn doctor() -> Result<()> {
    let config = Configuration::create()?;

    println!("Braindump Doctor\n");
    println!("  Version: {}", env!("CARGO_PKG_VERSION"));
    println!("  Data Dir: {}", config.data_dir.display());
    println!("  Settings File: {}", config.settings_file.display());
    println!("  Database: {}", config.db_path.display());
    println!("  Listen: {}:{}", config.listen_host, config.listen_port);
    println!("  Public URL: {}", config.public_url);
    println!("  CORS Origins: {}", config.cors_origins.join(", "));
    println!(
        "  Discord OAuth: {}",
        if config.discord.is_some() {
            "configured"
        } else {
            "not configured"
        }
    );
    println!("  Allowed IDs: {}", config.access.allowed_count());
    println!("  Admin IDs: {}", config.access.admin_count());

    match open_store(&config) {
        Ok(store) => {
            let conn = store.conn();
            let normal = questions::count_questions(&conn, QuestionMode::Normal)?;
            let crisis = questions::count_questions(&conn, QuestionMode::Crisis)?;
            println!("\n  Questions: {normal} normal, {crisis} crisis");
            if normal == 0 || crisis == 0 {
                println!("    (empty modes use the built-in fallback prompts)");
            }
        }
        Err(e) => println!("\n  Database: unavailable ({e:#})"),
    }

    Ok(())
}
