use clap::Parser;

use goldhub::cli::{self, Cli, Commands};
use goldhub::db::run_pending_migrations;
use goldhub::logger::init_logger;
use goldhub::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = cli::load_settings(&cli)?;

    init_logger(&settings.logger)?;

    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
        dry_run: false,
    }) {
        Commands::Serve {
            host,
            port,
            dry_run,
        } => {
            cli::apply_serve_overrides(&mut settings, &host, port);

            if dry_run {
                settings.jwt.validate()?;
                settings.database.resolve_url()?;
                println!("Configuration is valid");
                println!("Server would bind to: {}", settings.server.address());
                return Ok(());
            }

            Server::new(settings).run().await
        }
        Commands::Migrate => {
            let applied = run_pending_migrations(&settings.database)?;
            println!("Applied {} migration(s)", applied);
            Ok(())
        }
    }
}
