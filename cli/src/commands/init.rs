use anyhow::Result;
use logret_config::Config;

pub fn handle_init(config: &Config) -> Result<()> {
    super::open_store(config)?;
    println!("Database initialized at: {}", config.store.db_path.display());
    Ok(())
}
