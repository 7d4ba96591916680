use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use huffzip::{output_path_for, Direction, Frequencies, HuffmanCodec, TransformReport};

#[derive(Parser)]
#[command(name = "huffzip", about = "Huffman text compression", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log progress at info level (honours RUST_LOG when set)
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all logs
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into a .bin container
    Compress {
        input: PathBuf,

        /// Output path (defaults to <input stem>.bin)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Restore a .bin container
    Decompress {
        input: PathBuf,

        /// Output path (defaults to <input stem>.txt)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Print the tree and code table a file would be compressed with
    Inspect { input: PathBuf },
}

fn init_tracing(cli: &Cli) {
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    match cli.command {
        Commands::Compress { input, output } => {
            let output = output.unwrap_or_else(|| output_path_for(&input, Direction::Compress));
            let report = huffzip::compress_file(&input, &output)
                .with_context(|| format!("compressing {}", input.display()))?;
            print_report("compressed", &output, &report);
        }
        Commands::Decompress { input, output } => {
            let output = output.unwrap_or_else(|| output_path_for(&input, Direction::Decompress));
            let report = huffzip::decompress_file(&input, &output)
                .with_context(|| format!("decompressing {}", input.display()))?;
            print_report("decompressed", &output, &report);
        }
        Commands::Inspect { input } => inspect(&input)?,
    }

    Ok(())
}

fn print_report(verb: &str, output: &std::path::Path, report: &TransformReport) {
    println!(
        "{} {} -> {} bytes ({:.1}%), wrote {}",
        verb,
        report.input_len,
        report.output_len,
        report.ratio() * 100.0,
        output.display()
    );
}

fn inspect(input: &std::path::Path) -> Result<()> {
    let data = std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let codec = HuffmanCodec::from_bytes(&data);

    let Some(tree) = codec.tree() else {
        println!("{} is empty; nothing to encode", input.display());
        return Ok(());
    };

    let table = codec.code_table();
    let bits = table.encoded_bits(Frequencies::count(&data).iter());
    let encoded = codec.encode(&data)?;
    info!(symbols = table.len(), depth = tree.depth(), "inspected");

    print!("{}", tree);
    println!();
    println!("Code table:");
    print!("{}", table);
    println!();
    println!(
        "{} bytes, {} distinct, {} encoded bits, container {} bytes",
        data.len(),
        table.len(),
        bits,
        encoded.len()
    );
    Ok(())
}
