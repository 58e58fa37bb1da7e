//! SqlFS CLI
//!
//! Copy files into and out of a SQLite database as chunked tables.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sqlfs::{Config, SqlFs, SqlFsError, SqliteConnection};
use tracing_subscriber::{fmt, EnvFilter};

/// SqlFS CLI
#[derive(Parser, Debug)]
#[command(name = "sqlfs")]
#[command(about = "Store files as chunked rows in SQLite tables")]
#[command(version)]
struct Args {
    /// SQLite database file
    #[arg(short, long, default_value = "./sqlfs.db")]
    db: PathBuf,

    /// Chunk size in bytes for new files
    #[arg(short, long, default_value_t = sqlfs::config::DEFAULT_CHUNK_CAPACITY)]
    chunk_size: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Store a file (or stdin) in a new table
    Put {
        /// Target table name
        table: String,

        /// Source file; stdin when omitted
        file: Option<PathBuf>,

        /// Replace the table if it already exists
        #[arg(long)]
        replace: bool,
    },

    /// Write a stored table to a file (or stdout)
    Get {
        /// Source table name
        table: String,

        /// Destination file; stdout when omitted
        file: Option<PathBuf>,
    },

    /// Remove a stored table
    Rm {
        /// Table name
        table: String,
    },

    /// Show chunk count and size of a stored table
    Stat {
        /// Table name
        table: String,
    },

    /// Exit with status 0 if the table exists, 1 otherwise
    Exists {
        /// Table name
        table: String,
    },
}

fn main() {
    // Initialize tracing/logging (stderr, so `get` can stream to stdout)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(2);
        }
    }
}

fn run(args: Args) -> sqlfs::Result<i32> {
    let conn = SqliteConnection::open(&args.db)?;
    let config = Config::builder().chunk_capacity(args.chunk_size).build()?;
    let fs = SqlFs::new(&conn, config)?;

    match args.command {
        Commands::Put {
            table,
            file,
            replace,
        } => {
            let mut writer = if replace {
                fs.create_or_replace(&table)?
            } else {
                fs.create(&table)?
            };

            match file {
                Some(path) => io::copy(&mut BufReader::new(File::open(path)?), &mut writer)?,
                None => io::copy(&mut io::stdin().lock(), &mut writer)?,
            };
            writer.close()?;

            tracing::info!(
                "Stored {} bytes in {} chunks as {}",
                writer.bytes_written(),
                writer.chunks_written(),
                table
            );
        }

        Commands::Get { table, file } => {
            let mut reader = fs.open(&table)?;
            let copied = match file {
                Some(path) => {
                    let mut out = BufWriter::new(File::create(path)?);
                    let n = io::copy(&mut reader, &mut out)?;
                    out.flush()?;
                    n
                }
                None => {
                    let mut out = io::stdout().lock();
                    let n = io::copy(&mut reader, &mut out)?;
                    out.flush()?;
                    n
                }
            };
            reader.close()?;

            tracing::info!("Read {} bytes from {}", copied, table);
        }

        Commands::Rm { table } => {
            fs.remove(&table)?;
            tracing::info!("Removed {}", table);
        }

        Commands::Stat { table } => {
            let stat = fs.stat(&table)?;
            println!("{}\tchunks={}\tbytes={}", table, stat.chunks, stat.bytes);
        }

        Commands::Exists { table } => match fs.exists(&table) {
            Ok(true) => return Ok(0),
            Ok(false) => return Ok(1),
            Err(SqlFsError::InvalidName(msg)) => {
                tracing::warn!("Invalid table name: {}", msg);
                return Ok(1);
            }
            Err(e) => return Err(e),
        },
    }

    Ok(0)
}
