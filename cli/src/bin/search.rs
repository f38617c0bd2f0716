//! Search - queries the backend and prints results with preview URLs.

use shared::preview::resolve_cached;
use shared::{identity, Config, MemoraClient, PreviewCache};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let query: String = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if query.trim().is_empty() {
        eprintln!("usage: search <query>");
        std::process::exit(2);
    }

    let config = Config::from_env();
    let client = MemoraClient::new(&config)?;
    let user_id = identity::load_or_create(&identity::state_dir())?;

    let items = client.search(&query, &user_id).await?;
    if items.is_empty() {
        println!("no results for {:?}", query);
        return Ok(());
    }

    let mut previews = PreviewCache::new();
    for item in &items {
        let score = item
            .similarity_score
            .map(|s| format!("{:.2}", s))
            .unwrap_or_else(|| "-".to_string());
        println!("[{}] {}", score, item.title);
        if let Some(url) = &item.url {
            println!("    {}", url);
            if let Some(preview) = resolve_cached(&mut previews, url, item.content_type) {
                println!("    preview: {}", preview);
            }
        }
        if !item.tags.is_empty() {
            println!("    tags: {}", item.tags.join(", "));
        }
    }
    Ok(())
}
