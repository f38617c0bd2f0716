//! Tags - prints the user's items grouped by tag, largest group first.

use shared::{group_by_tag, identity, Config, MemoraClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    let client = MemoraClient::new(&config)?;
    let user_id = identity::load_or_create(&identity::state_dir())?;

    let items = client.user_items(&user_id).await?;
    let tags = client.tags(&user_id).await?;

    let groups = group_by_tag(&items, &tags);
    if groups.is_empty() {
        println!("nothing saved yet");
        return Ok(());
    }

    for group in &groups {
        println!(
            "{} ({}) [{} {}]",
            group.tag,
            group.items.len(),
            group.color,
            group.icon
        );
        for item in &group.items {
            println!("    {}", item.title);
        }
    }
    Ok(())
}
