use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "dcdev CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compress a directory into a .dc archive
    #[command(visible_alias = "c")]
    Compress {
        /// Directory to compress
        dir: PathBuf,
        /// Output file; defaults to <parent>/<dirname>.dc
        out_file: Option<PathBuf>,
    },
    /// Decompress a .dc archive into a directory
    #[command(visible_alias = "d")]
    Decompress {
        /// Previously compressed archive
        archive: PathBuf,
        /// Output directory; defaults to the archive's own directory
        out_dir: Option<PathBuf>,
    },
    /// List archive contents without extracting
    List {
        archive: PathBuf,
    },
}
