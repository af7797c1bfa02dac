use anyhow::Result;
use console::Style;
use logret_config::Config;
use logret_pipeline::{search, SearchRequest};

pub async fn handle_search(
    config: &Config,
    query: &str,
    limit: Option<usize>,
    tag: &str,
    r#type: &str,
    json: bool,
) -> Result<()> {
    let store = super::open_store(config)?;
    let embedder = logret_context::shared_embedder(&config.embedding).await?;

    let request = SearchRequest {
        query: query.to_string(),
        limit: limit.unwrap_or(config.search.default_limit),
        tag_filter: tag.to_string(),
        type_filter: r#type.to_string(),
    };
    let results = search(&store, embedder.as_ref(), &config.search, &request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No matches found.");
        return Ok(());
    }

    let dim = Style::new().dim();
    let bold = Style::new().bold().cyan();
    println!("Found {} matches:", results.len());
    for (i, m) in results.iter().enumerate() {
        println!(
            "{} {} {}",
            dim.apply_to(format!("{}.", i + 1)),
            bold.apply_to(&m.path),
            dim.apply_to(format!("(relevance {:.4})", m.relevance)),
        );
        println!("   {}", m.summary);
        println!(
            "   {}",
            dim.apply_to(format!("[{}] {}", m.matched_section, m.matched_content))
        );
        let mut meta = Vec::new();
        if !m.tags.is_empty() {
            meta.push(format!("tags: {}", m.tags));
        }
        if let Some(date) = &m.date {
            meta.push(format!("date: {}", date));
        }
        if let Some(category) = &m.category {
            meta.push(format!("type: {}", category));
        }
        if !meta.is_empty() {
            println!("   {}", dim.apply_to(meta.join("  ")));
        }
    }
    Ok(())
}
