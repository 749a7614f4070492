use crate::cli::parser::Cli;
use crate::cli::commands::open_ledger;
use crate::config::Config;
use crate::core::rewards::RewardsLogic;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database with all pending migrations
///  - the welcome bonus, on an empty ledger only
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.as_deref(), cli.test)?;

    // test mode ignores the user's config file entirely
    let cfg = if cli.test {
        Config::default()
    } else {
        Config::load()?
    };

    println!("⚙️  Initializing GreenPoint…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &db_path);

    let pool = DbPool::new(&db_path)?;
    println!("✅ Database initialized at {}", &db_path);

    audit(
        &pool.conn,
        "init",
        "database",
        &format!("Database initialized at {}", &db_path),
    );

    let mut ledger = open_ledger(&pool)?;
    if let Some(tx) = RewardsLogic::earn_welcome_bonus(&mut ledger, &cfg.points)? {
        audit(&pool.conn, "earn", &tx.id.to_string(), &tx.description);
    }

    println!("🎉 GreenPoint initialization completed!");
    Ok(())
}
