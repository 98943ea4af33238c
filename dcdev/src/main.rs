mod application;
mod presentation;

use application::handlers;
use clap::Parser;
use presentation::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        std::process::exit(if e.use_stderr() { 1 } else { 0 });
    });

    let result = match cli.command {
        Commands::Compress { dir, out_file } => handlers::handle_compress(dir, out_file),
        Commands::Decompress { archive, out_dir } => handlers::handle_decompress(archive, out_dir),
        Commands::List { archive } => handlers::handle_list(archive),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
