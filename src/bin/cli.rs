//! Sterling CLI Client
//!
//! Command-line interface for a Sterling key-value server.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use sterling_client::{Client, Config};

/// Sterling CLI
#[derive(Parser, Debug)]
#[command(name = "sterling-cli")]
#[command(about = "CLI for the Sterling key-value store")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Server TCP port
    #[arg(short, long, default_value = "9162")]
    port: u16,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Store a value under a key
    Set {
        /// The key to set
        key: String,

        /// The value to store
        value: String,
    },

    /// Fetch the value for a key
    Get {
        /// The key to get
        key: String,
    },

    /// Remove a key
    Del {
        /// The key to delete
        key: String,
    },

    /// Check whether a key is present
    Exists {
        /// The key to check
        key: String,
    },

    /// Set a key's time-to-live in seconds
    Expire {
        /// The key to expire
        key: String,

        /// Time-to-live in seconds
        seconds: i64,
    },

    /// Fetch a key's remaining time-to-live in seconds
    Ttl {
        /// The key to inspect
        key: String,
    },

    /// List every key in the store
    Keys,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    let config = Config::builder().host(args.host).port(args.port).build();

    let mut client = match Client::connect(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    match run(&mut client, args.command) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Execute one subcommand and render its result
fn run(client: &mut Client, command: Commands) -> sterling_client::Result<String> {
    Ok(match command {
        Commands::Set { key, value } => client.set(&key, &value)?.to_string(),
        Commands::Get { key } => match client.get(&key)? {
            Some(value) => value.to_string(),
            None => "(nil)".to_string(),
        },
        Commands::Del { key } => client.delete(&key)?.to_string(),
        Commands::Exists { key } => client.exists(&key)?.to_string(),
        Commands::Expire { key, seconds } => client.expire(&key, seconds)?.to_string(),
        Commands::Ttl { key } => client.ttl(&key)?.to_string(),
        Commands::Keys => {
            let keys = client.keys()?;
            if keys.is_empty() {
                "(empty)".to_string()
            } else {
                keys.iter()
                    .map(|key| key.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        }
    })
}
