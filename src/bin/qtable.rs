//! Inspection tool for persisted Q-table files.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use duelcore::{adapters::MsgPackRepository, ports::TableRepository};

#[derive(Parser)]
#[command(name = "qtable", about = "Inspect persisted duelcore Q-tables")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print shape and value statistics for a table file
    Inspect {
        /// Path to a .msgpack table file
        path: PathBuf,
    },
}

fn print_kv(key: &str, value: &str) {
    println!("  {:16} {}", format!("{key}:"), value);
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Inspect { path } => {
            let repo = MsgPackRepository::new();
            let table = repo
                .load(&path)
                .with_context(|| format!("failed to read table at {}", path.display()))?;
            let Some(table) = table else {
                bail!("no table file at {}", path.display());
            };

            let (non_zero, min, max, mean) = table.stats();
            println!("{}", path.display());
            print_kv("shape", &format!("{:?}", table.shape()));
            print_kv("cells", &table.len().to_string());
            print_kv(
                "non-zero",
                &format!(
                    "{non_zero} ({:.2}%)",
                    100.0 * non_zero as f64 / table.len().max(1) as f64
                ),
            );
            print_kv("min", &format!("{min:.6}"));
            print_kv("max", &format!("{max:.6}"));
            print_kv("mean", &format!("{mean:.6}"));
        }
    }

    Ok(())
}
