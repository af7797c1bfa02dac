mod commands;
mod frontmatter;

use clap::Parser;
use commands::{handle_add, handle_delete, handle_init, handle_search, handle_status, Cli, Commands};
use logret_config::Config;
use logret_core::RetrievalError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    let outcome = match cli.command {
        Commands::Init => handle_init(&config),
        Commands::Add {
            file,
            summary,
            tags,
        } => handle_add(&config, &file, &summary, &tags).await,
        Commands::Delete { file } => handle_delete(&config, &file),
        Commands::Search {
            query,
            limit,
            tag,
            r#type,
            json,
        } => handle_search(&config, &query, limit, &tag, &r#type, json).await,
        Commands::Status => handle_status(&config),
    };

    if let Err(err) = outcome {
        eprintln!("Error: {}", err);
        std::process::exit(exit_code_for(&err));
    }
}

/// Storage and gateway faults get distinct exit codes; everything else
/// (validation, not-found, IO) is the generic failure code.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<RetrievalError>() {
        Some(retrieval) => retrieval.exit_code(),
        None => 1,
    }
}
