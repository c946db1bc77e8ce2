//! Password Policy Store - CLI Binary
//!
//! # Usage
//!
//! ```bash
//! password-policy-store migrate
//! password-policy-store get minLength
//! password-policy-store required
//! password-policy-store latest-update
//! password-policy-store health
//! ```
//!
//! # Environment Variables
//!
//! * `PWPOLICY_DATABASE_URL` - PostgreSQL connection string
//! * `PWPOLICY_MAX_CONNECTIONS` / `PWPOLICY_MIN_CONNECTIONS` - pool bounds (default: 10 / 2)
//! * `PWPOLICY_CONNECT_TIMEOUT_SECS` - pool acquire timeout (default: 30)
//! * `PWPOLICY_LOG_LEVEL` - log filter when RUST_LOG is unset (default: info)
//! * `PWPOLICY_LOG_FORMAT` - `pretty` or `json` (default: pretty)

use anyhow::Context;
use clap::Parser;

use infra_db::{create_pool, run_migrations, PostgresPasswordPolicyAdapter};
use interface_cli::{cli, Cli, Command, StoreConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let args = Cli::parse();

    let mut config = StoreConfig::from_env().context("failed to load configuration")?;
    if let Some(url) = args.database_url.clone() {
        config.database_url = url;
    }
    config.validate()?;

    interface_cli::telemetry::init_tracing(&config.log_level, config.log_format);

    tracing::info!(
        command = ?args.command,
        max_connections = config.max_connections,
        "Starting password policy store"
    );

    let pool = create_pool(config.database_config())
        .await
        .context("failed to connect to the policy database")?;

    if args.command == Command::Migrate {
        run_migrations(&pool).await?;
        println!("{}", serde_json::json!({ "migrated": true }));
        return Ok(());
    }

    let adapter = PostgresPasswordPolicyAdapter::new(pool.clone());
    let output = cli::execute(&args.command, &adapter).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    pool.close().await;
    Ok(())
}
