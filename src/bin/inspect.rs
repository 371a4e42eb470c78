//! recipe-inspect
//!
//! Command-line tool for looking inside recipe files without a registry.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use recipe_store::record::{RecordEntry, RecordReader};
use tracing_subscriber::{fmt, EnvFilter};

/// Recipe file inspector
#[derive(Parser, Debug)]
#[command(name = "recipe-inspect")]
#[command(about = "Inspect recipe record files")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every entry in a recipe file
    Dump {
        /// The recipe file
        file: PathBuf,

        /// Print value bytes as hex
        #[arg(long)]
        hex: bool,
    },

    /// Decode a recipe file and report whether it is well formed
    Check {
        /// The recipe file
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();
    tracing::info!("recipe-inspect v{}", recipe_store::VERSION);

    let result = match args.command {
        Commands::Dump { file, hex } => dump(&file, hex),
        Commands::Check { file } => check(&file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn dump(file: &Path, hex: bool) -> recipe_store::Result<()> {
    let mut reader = RecordReader::open(file)?;
    let mut index = 0usize;

    loop {
        let offset = reader.offset();
        let entry = match reader.next_entry()? {
            Some(entry) => entry,
            None => break,
        };
        println!("{}", describe(index, offset, &entry));
        if hex {
            println!("    {}", to_hex(&entry.value));
        }
        index += 1;
    }

    println!("{} entries, {} bytes", index, reader.offset());
    Ok(())
}

fn check(file: &Path) -> recipe_store::Result<()> {
    let entries = recipe_store::record::read_entries(file)?;
    println!("ok: {} entries", entries.len());
    Ok(())
}

fn describe(index: usize, offset: u64, entry: &RecordEntry) -> String {
    format!(
        "#{:<4} @{:<8} {:<24} {:>6} bytes{}",
        index,
        offset,
        String::from_utf8_lossy(&entry.id),
        entry.value.len(),
        if entry.is_padded() { " +pad" } else { "" }
    )
}

fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
