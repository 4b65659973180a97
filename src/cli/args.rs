//! CLI argument definitions.

use clap::{Parser, Subcommand};

/// Procurement API - quotes, supplier offers and purchase orders
#[derive(Parser, Debug)]
#[command(name = "procurement-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Create the default roles and an administrator account
    Seed(SeedArgs),
}

/// Arguments for the serve command; unset values fall back to the
/// environment configuration
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    #[arg(long, env = "ADMIN_EMAIL")]
    pub admin_email: String,

    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: String,

    #[arg(long, env = "ADMIN_NAME", default_value = "Administrator")]
    pub admin_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_port() {
        let cli = Cli::try_parse_from(["procurement-api", "serve", "--port", "8080"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(8080));
                assert!(args.host.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_migrate_status() {
        let cli = Cli::try_parse_from(["procurement-api", "-v", "migrate", "status"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Migrate(MigrateArgs {
                action: MigrateAction::Status
            })
        ));
    }

    #[test]
    fn test_parse_seed() {
        let cli = Cli::try_parse_from([
            "procurement-api",
            "seed",
            "--admin-email",
            "admin@example.com",
            "--admin-password",
            "correct-horse",
        ])
        .unwrap();

        match cli.command {
            Commands::Seed(args) => {
                assert_eq!(args.admin_email, "admin@example.com");
                assert_eq!(args.admin_name, "Administrator");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
