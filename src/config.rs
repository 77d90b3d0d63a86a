use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    codec::{self, CompressionStats},
    error::Result,
    huffman::HuffmanTree,
};

/// Extension appended to compressed files.
pub const COMPRESSED_SUFFIX: &str = "gprs";
/// Appended to the name of a decoded file whose input had no extension to strip.
pub const FALLBACK_SUFFIX: &str = "1";
/// Extension of the statistics side file.
pub const STATS_SUFFIX: &str = "stats";

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum Mode {
    Encode,
    Decode,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Config {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub mode: Mode,
    /// Write a JSON summary next to the output (encode only)
    pub stats: bool,
    /// Write the Huffman tree as Graphviz (encode only)
    pub tree_dot: Option<PathBuf>,
}

impl Config {
    pub fn new(input: impl Into<PathBuf>, mode: Mode) -> Self {
        Self {
            input: input.into(),
            output: None,
            mode,
            stats: false,
            tree_dot: None,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_stats(mut self, stats: bool) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_tree_dot(mut self, path: impl Into<PathBuf>) -> Self {
        self.tree_dot = Some(path.into());
        self
    }

    /// The explicit output, or one derived from the input path.
    ///
    /// Encoding appends [`COMPRESSED_SUFFIX`]. Decoding strips the last
    /// extension, and appends [`FALLBACK_SUFFIX`] when there is none.
    pub fn output_path(&self) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }

        match self.mode {
            Mode::Encode => append_to_name(&self.input, &format!(".{}", COMPRESSED_SUFFIX)),
            Mode::Decode => {
                if self.input.extension().is_some() {
                    self.input.with_extension("")
                } else {
                    append_to_name(&self.input, FALLBACK_SUFFIX)
                }
            }
        }
    }

    pub fn stats_path(&self) -> PathBuf {
        append_to_name(&self.output_path(), &format!(".{}", STATS_SUFFIX))
    }
}

fn append_to_name(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// What [`run`] read and wrote.
#[derive(Clone, PartialEq, Debug)]
pub struct RunSummary {
    pub mode: Mode,
    pub output: PathBuf,
    pub bytes_read: usize,
    pub bytes_written: usize,
    pub stats: Option<CompressionStats>,
}

/// Reads the input file, runs the codec and writes the result.
pub fn run(config: &Config) -> Result<RunSummary> {
    let input = fs::read(&config.input)?;
    let output_path = config.output_path();

    log::info!("{:?} {} -> {}", config.mode, config.input.display(), output_path.display());

    let (output, stats) = match config.mode {
        Mode::Encode => {
            if let Some(dot_path) = &config.tree_dot {
                write_tree_dot(&input, dot_path)?;
            }
            let (output, stats) = codec::encode_with_stats(&input)?;
            (output, Some(stats))
        }
        Mode::Decode => (codec::decode(&input)?, None),
    };

    fs::write(&output_path, &output)?;

    if let (true, Some(stats)) = (config.stats, &stats) {
        let stats_path = config.stats_path();
        let json = serde_json::to_string_pretty(stats).map_err(std::io::Error::from)?;
        fs::write(&stats_path, json)?;
        log::info!("Wrote statistics to {}", stats_path.display());
    }

    Ok(RunSummary {
        mode: config.mode,
        output: output_path,
        bytes_read: input.len(),
        bytes_written: output.len(),
        stats,
    })
}

fn write_tree_dot(input: &[u8], path: &Path) -> Result<()> {
    let dot = match HuffmanTree::from_bytes(input) {
        Some(tree) => tree.to_dot(),
        None => String::from("digraph Tree {\n}\n"),
    };
    fs::write(path, dot)?;
    log::info!("Wrote tree to {}", path.display());
    Ok(())
}
