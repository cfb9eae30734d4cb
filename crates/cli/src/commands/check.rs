use std::collections::HashMap;

use pagelinks_core::{AppConfig, AppConfigTrait, ConfigSource};

use super::connect;

/// Print where each setting came from, then ping the database.
pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("Checking pagelinks setup ({} environment)...", config.environment);

    print_sources("database", config.database.config_sources());
    print_sources("resolver", config.resolver.config_sources());
    print_sources("logging", config.logging.config_sources());
    println!("✓ Configuration is valid");

    let pool = connect(&config.database).await?;
    let latency = pool.health_check().await?;
    let stats = pool.stats();
    pool.close().await?;

    println!(
        "✓ Database reachable in {:?} ({} connections, {} idle)",
        latency, stats.total_connections, stats.idle_connections
    );
    Ok(())
}

fn print_sources(section: &str, sources: HashMap<String, ConfigSource>) {
    let mut sources: Vec<_> = sources.into_iter().collect();
    sources.sort_by(|a, b| a.0.cmp(&b.0));
    for (setting, source) in sources {
        println!("  {:<28} {}", format!("{}.{}", section, setting), source);
    }
}
