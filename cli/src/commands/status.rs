use anyhow::Result;
use logret_config::Config;

pub fn handle_status(config: &Config) -> Result<()> {
    let db_path = &config.store.db_path;
    println!("Database: {}", db_path.display());

    if !db_path.exists() {
        println!("Store: not created yet (run `logret init` or `logret add`)");
        return Ok(());
    }

    let store = super::open_store(config)?;
    println!(
        "Config: backend={:?}, dim={}, default_limit={}",
        config.embedding.backend, config.embedding.dim, config.search.default_limit
    );
    println!("Documents: {}", store.document_count()?);
    println!("Chunks: {}", store.chunk_count()?);
    Ok(())
}
