//! Save - submits a URL for extraction, or a plain-text note.
//!
//! Usage:
//!   save <url>
//!   save --text <note text...>

use shared::{identity, Config, MemoraClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("usage: save <url> | save --text <note>");
        std::process::exit(2);
    }

    let config = Config::from_env();
    let client = MemoraClient::new(&config)?;
    let user_id = identity::load_or_create(&identity::state_dir())?;

    let outcome = if args[0] == "--text" {
        let text = args[1..].join(" ");
        if text.trim().is_empty() {
            eprintln!("usage: save --text <note>");
            std::process::exit(2);
        }
        client.save_text(&text, None, &user_id).await?
    } else {
        client.extract_and_save(&args[0], &user_id).await?
    };

    if outcome.success {
        match outcome.item {
            Some(item) => println!("saved: {} ({})", item.title, item.id),
            None => println!("saved"),
        }
    } else {
        println!(
            "save failed: {}",
            outcome.message.as_deref().unwrap_or("no detail")
        );
        std::process::exit(1);
    }
    Ok(())
}
