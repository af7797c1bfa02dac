use anyhow::Result;
use logret_config::Config;

pub fn handle_delete(config: &Config, file: &str) -> Result<()> {
    let mut store = super::open_store(config)?;

    if store.delete(file)? {
        println!("Deleted: {}", file);
        Ok(())
    } else {
        // Not-found is reported, not raised; it still exits non-zero so
        // scripts can tell it from success.
        eprintln!("Not found: {}", file);
        std::process::exit(1);
    }
}
