//! CLI entry point for exemplar-driven terrain synthesis

use clap::Parser;
use terrasynth::io::cli::{Cli, FileProcessor};

fn main() -> terrasynth::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    let mut processor = FileProcessor::new(cli);
    processor.process()
}
