//! AtlasRedis CLI Client
//!
//! Command-line interface for a Redis-protocol server.

use atlasredis::{Client, ClientError, Config, TcpConnector};
use bytes::Bytes;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// AtlasRedis CLI
#[derive(Parser, Debug)]
#[command(name = "atlasredis-cli")]
#[command(about = "Typed command-line client for Redis-protocol servers")]
#[command(version)]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:6379")]
    server: String,

    /// Read/write timeout in milliseconds (0 disables)
    #[arg(short, long, default_value = "5000")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ping the server
    Ping,

    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Delete one or more keys
    Del {
        /// The keys to delete
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Increment an integer value
    Incr {
        key: String,

        /// Amount to add
        #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
        by: i64,
    },

    /// List keys matching a pattern
    Keys {
        #[arg(default_value = "*")]
        pattern: String,
    },

    /// Show the type stored at a key
    Type { key: String },

    /// Show the remaining time to live of a key
    Ttl { key: String },

    /// Read a range of list elements
    Lrange {
        key: String,

        #[arg(default_value = "0", allow_hyphen_values = true)]
        from: i64,

        #[arg(default_value = "-1", allow_hyphen_values = true)]
        to: i64,
    },

    /// Show server information
    Info {
        /// Only print this field
        field: Option<String>,
    },

    /// Sort a list, set or sorted set
    Sort {
        key: String,

        /// Weight pattern
        #[arg(long)]
        by: Option<String>,

        /// Offset and count
        #[arg(long, num_args = 2, value_names = ["OFFSET", "COUNT"])]
        limit: Option<Vec<u64>>,

        /// Projection pattern (repeatable)
        #[arg(long)]
        get: Vec<String>,

        /// Descending order
        #[arg(long)]
        desc: bool,

        /// Lexicographic comparison
        #[arg(long)]
        alpha: bool,

        /// Store the result under this key instead of printing it
        #[arg(long)]
        store: Option<String>,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,atlasredis=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let config = Config::builder()
        .server_addr(&args.server)
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms)
        .build();

    if let Err(e) = run(&config, args.command) {
        tracing::error!("{} error: {}", e.kind(), e);
        std::process::exit(1);
    }
}

fn run(config: &Config, command: Commands) -> Result<(), ClientError> {
    let mut client = Client::connect(config)?;
    tracing::debug!("Connected to {}", client.connector().peer_addr());

    match command {
        Commands::Ping => {
            client.ping()?;
            println!("PONG");
        }
        Commands::Get { key } => print_bulk(client.get(&key)?),
        Commands::Set { key, value } => {
            client.set(&key, value)?;
            println!("OK");
        }
        Commands::Del { keys } => {
            let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
            println!("(integer) {}", client.del(&keys)?);
        }
        Commands::Incr { key, by } => {
            let value = if by == 1 {
                client.incr(&key)?
            } else {
                client.incrby(&key, by)?
            };
            println!("(integer) {}", value);
        }
        Commands::Keys { pattern } => {
            for (i, key) in client.keys(&pattern)?.iter().enumerate() {
                println!("{}) {}", i + 1, key);
            }
        }
        Commands::Type { key } => println!("{}", client.key_type(&key)?),
        Commands::Ttl { key } => println!("(integer) {}", client.ttl(&key)?),
        Commands::Lrange { key, from, to } => {
            for (i, item) in client.lrange(&key, from, to)?.iter().enumerate() {
                println!("{}) {}", i + 1, String::from_utf8_lossy(item));
            }
        }
        Commands::Info { field } => {
            let info = client.info()?;
            match field {
                Some(field) => println!("{}", info.get(&field).unwrap_or("")),
                None => {
                    for (name, value) in info.iter() {
                        println!("{}:{}", name, value);
                    }
                }
            }
        }
        Commands::Sort {
            key,
            by,
            limit,
            get,
            desc,
            alpha,
            store,
        } => sort(&mut client, &key, by, limit, get, desc, alpha, store)?,
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn sort(
    client: &mut Client<TcpConnector>,
    key: &str,
    by: Option<String>,
    limit: Option<Vec<u64>>,
    get: Vec<String>,
    desc: bool,
    alpha: bool,
    store: Option<String>,
) -> Result<(), ClientError> {
    let mut sort = client.sort(key)?;
    if let Some(pattern) = by {
        sort.by(&pattern)?;
    }
    if let Some([offset, count]) = limit.as_deref().and_then(|l| <[u64; 2]>::try_from(l).ok()) {
        sort.limit(offset, count)?;
    }
    for pattern in &get {
        sort.get(pattern)?;
    }
    if desc {
        sort.desc()?;
    }
    if alpha {
        sort.alpha()?;
    }

    match store {
        Some(destination) => println!("(integer) {}", sort.store(&destination)?),
        None => {
            for (i, item) in sort.exec()?.enumerate() {
                match item {
                    Some(item) => println!("{}) {}", i + 1, String::from_utf8_lossy(&item)),
                    None => println!("{}) (nil)", i + 1),
                }
            }
        }
    }
    Ok(())
}

fn print_bulk(data: Option<Bytes>) {
    match data {
        Some(data) => println!("{}", String::from_utf8_lossy(&data)),
        None => println!("(nil)"),
    }
}
