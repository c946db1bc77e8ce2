//! Command line surface
//!
//! Read commands run against any `PasswordPolicyPort`, so they can be
//! exercised without a database. Absent results print `null` or `[]` and
//! are not errors.

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;

use core_kernel::PortError;
use domain_password_policy::PasswordPolicyPort;

/// Password policy store
#[derive(Debug, Parser)]
#[command(name = "password-policy-store", version, about = "Inspect the password policy store")]
pub struct Cli {
    /// Overrides PWPOLICY_DATABASE_URL
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Apply pending schema migrations
    Migrate,
    /// Print the policy with the given key
    Get {
        key: String,
    },
    /// Print required policies in priority order
    Required,
    /// Print the latest policy update timestamp
    LatestUpdate,
    /// Check database connectivity
    Health,
}

/// Runs a read command and returns the JSON to print
///
/// `Migrate` is not a read command and yields `PortError::Validation`.
pub async fn execute<P>(command: &Command, port: &P) -> Result<Value, PortError>
where
    P: PasswordPolicyPort + ?Sized,
{
    match command {
        Command::Get { key } => {
            let policy = port.find_by_key(key).await?;
            info!(key = %key, found = policy.is_some(), "Looked up password policy");
            to_json(&policy)
        }
        Command::Required => {
            let policies = port.find_required_policies_ordered_by_priority().await?;
            info!(count = policies.len(), "Listed required password policies");
            to_json(&policies)
        }
        Command::LatestUpdate => {
            let latest = port.find_latest_update_date().await?;
            info!(found = latest.is_some(), "Read latest password policy update");
            to_json(&latest)
        }
        Command::Health => {
            let health = port.health_check().await;
            to_json(&health)
        }
        Command::Migrate => Err(PortError::validation("migrate is not a read command")),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, PortError> {
    serde_json::to_value(value)
        .map_err(|e| PortError::internal_with_source("failed to encode output", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_get() {
        let cli = Cli::try_parse_from(["password-policy-store", "get", "minLength"]).unwrap();
        assert_eq!(cli.command, Command::Get { key: "minLength".to_string() });
        assert!(cli.database_url.is_none());
    }

    #[test]
    fn test_parse_global_database_url() {
        let cli = Cli::try_parse_from([
            "password-policy-store",
            "latest-update",
            "--database-url",
            "postgres://elsewhere/db",
        ])
        .unwrap();
        assert_eq!(cli.command, Command::LatestUpdate);
        assert_eq!(cli.database_url.as_deref(), Some("postgres://elsewhere/db"));
    }

    #[test]
    fn test_get_requires_key() {
        assert!(Cli::try_parse_from(["password-policy-store", "get"]).is_err());
    }
}
