//! Doctor - probes every configured backend environment and prints a report.

use shared::diagnostics::{troubleshooting_tips, ErrorKind, Prober};
use shared::{Config, Environment};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    let prober = Prober::new(config.probe_timeout);
    let results = prober.test_all_environments("/health").await;

    let mut any_ok = false;
    for env in Environment::ALL {
        let Some(result) = results.get(&env) else {
            continue;
        };
        if result.success {
            any_ok = true;
            println!(
                "{:<14} ok    {:>5}ms  HTTP {}",
                env.as_str(),
                result.latency.as_millis(),
                result.status_code.unwrap_or(0)
            );
        } else {
            let kind = result.error.clone().unwrap_or(ErrorKind::Unknown);
            println!(
                "{:<14} FAIL  {:>5}ms  {} - {}",
                env.as_str(),
                result.latency.as_millis(),
                kind.label(),
                result.error_message.as_deref().unwrap_or("no detail")
            );
            for tip in troubleshooting_tips(&kind) {
                println!("    - {}", tip);
            }
        }
    }

    if !any_ok {
        println!("\nno environment reachable");
        std::process::exit(1);
    }
    Ok(())
}
