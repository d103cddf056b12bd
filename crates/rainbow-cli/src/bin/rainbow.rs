//! CLI entrypoint for the rainbow-table engine.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rainbow_engine::LookupResult;

/// Offline rainbow-table generation and seed recovery.
#[derive(Debug, Parser)]
#[command(name = "rainbow")]
#[command(about = "Generate rainbow tables and recover seeds from hash digests")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate `table_count` chain tables.
    Generate {
        chain_num: u64,
        chain_len: u64,
        table_count: u64,
        hash_name: String,
    },
    /// Look up the seed behind a digest in an existing table file.
    Search {
        table_file: PathBuf,
        target_hash_hex: String,
    },
    /// Exhaustively search the full 32-bit seed space.
    Crack {
        hash_name: String,
        target_hash_hex: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Command::Generate {
            chain_num,
            chain_len,
            table_count,
            hash_name,
        } => rainbow_cli::generate(chain_num, chain_len, table_count, &hash_name).map(|paths| {
            for path in paths {
                println!("{}", path.display());
            }
        }),
        Command::Search {
            table_file,
            target_hash_hex,
        } => rainbow_cli::search(&table_file, &target_hash_hex).map(|result| match result {
            LookupResult::Found(seed) => println!("Seed found: {seed}"),
            LookupResult::NotFound => println!("Seed not found"),
        }),
        Command::Crack {
            hash_name,
            target_hash_hex,
        } => rainbow_cli::crack(&hash_name, &target_hash_hex).map(|result| match result {
            Some(seed) => println!("Seed found: {seed}"),
            None => println!("Seed not found"),
        }),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
