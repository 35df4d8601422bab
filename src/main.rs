//! vapid-provision CLI - generate VAPID keys for a web push server.
//!
//! This is the main binary entry point. See the `vapid_provision` library
//! for the core functionality.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vapid_provision::{commands, Settings};

// CLI
#[derive(Parser)]
#[command(name = "vapid-provision")]
#[command(version)]
#[command(about = "Generate VAPID keys for web push and write the server environment file")]
struct Cli {
    /// Defaults to `generate` (print only) when omitted.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new VAPID keypair
    Generate(GenerateArgs),
    /// Validate the VAPID keypair in an existing environment file
    Check {
        /// Environment file to inspect
        #[arg(long)]
        env_file: Option<PathBuf>,
    },
}

#[derive(Args, Default)]
struct GenerateArgs {
    /// Replace the environment file with the generated configuration
    #[arg(long, short = 'w')]
    write: bool,
    /// Print the keypair as JSON instead of human-readable output
    #[arg(long, conflicts_with = "write")]
    json: bool,
    /// Environment file to write (default: .env)
    #[arg(long)]
    env_file: Option<PathBuf>,
    /// VAPID subject, a mailto: or https: contact URI
    #[arg(long)]
    subject: Option<String>,
    /// Server port written to the environment file
    #[arg(long)]
    port: Option<u16>,
}

impl GenerateArgs {
    fn apply(self, settings: &mut Settings) -> commands::generate::Options {
        if let Some(env_file) = self.env_file {
            settings.env_file = env_file;
        }
        if let Some(subject) = self.subject {
            settings.subject = subject;
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        commands::generate::Options {
            write: self.write,
            json: self.json,
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays copy-pasteable
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::load();

    match cli.command.unwrap_or_else(|| Commands::Generate(GenerateArgs::default())) {
        Commands::Generate(args) => {
            let options = args.apply(&mut settings);
            commands::generate::run(&settings, options)?;
        }
        Commands::Check { env_file } => {
            let path = env_file.unwrap_or(settings.env_file);
            commands::check::run(&path)?;
        }
    }

    Ok(())
}
