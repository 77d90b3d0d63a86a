use std::{path::PathBuf, process::ExitCode, time::Instant};

use clap::{ArgGroup, Parser};
use huffpress::{config, Config, Mode};

#[derive(Parser, Debug)]
#[command(about = "Compress or decompress a file with static Huffman coding")]
#[command(group(ArgGroup::new("mode").required(true).args(["encode", "decode"])))]
struct Args {
    /// The file to read
    input: PathBuf,
    /// Compress the input
    #[arg(short, long)]
    encode: bool,
    /// Decompress the input
    #[arg(short, long)]
    decode: bool,
    /// Destination file (default: derived from the input name)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Write compression statistics as JSON to <output>.stats
    #[arg(long, default_value_t = false)]
    stats: bool,
    /// Write the Huffman tree in Graphviz format to this file
    #[arg(long)]
    tree_dot: Option<PathBuf>,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let mode = if args.encode { Mode::Encode } else { Mode::Decode };
        Config {
            input: args.input,
            output: args.output,
            mode,
            stats: args.stats,
            tree_dot: args.tree_dot,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::from(Args::parse());

    let time = Instant::now();
    match config::run(&config) {
        Ok(summary) => {
            let elapsed = time.elapsed().as_nanos();
            match (summary.mode, &summary.stats) {
                (Mode::Encode, Some(stats)) => println!(
                    "compressed {} bytes into {} ({:.1}%, {:.3} bits/byte) in {}ns -> {}",
                    summary.bytes_read,
                    summary.bytes_written,
                    stats.ratio() * 100.0,
                    stats.bits_per_symbol(),
                    elapsed,
                    summary.output.display()
                ),
                _ => println!(
                    "decompressed {} bytes into {} in {}ns -> {}",
                    summary.bytes_read,
                    summary.bytes_written,
                    elapsed,
                    summary.output.display()
                ),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {}", config.input.display(), e);
            ExitCode::FAILURE
        }
    }
}
