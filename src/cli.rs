use std::path::PathBuf;

use clap::ValueHint;
use hedron::{de::obj::ObjOptions, ser::ply::PlyOptions};
use obj2ply::Options;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum LogFormat {
    Compact,
    Full,
    Pretty,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Compact => f.write_str("compact"),
            LogFormat::Full => f.write_str("full"),
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, clap::Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Logging output filters; comma-separated
    #[arg(short, long, default_value = "warn", env = "OBJ2PLY_LOG_FILTER")]
    pub log_filter: String,
    /// Logging output format
    #[arg(long, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
    /// Reject negative (relative) face indices instead of resolving them
    #[arg(long, env = "OBJ2PLY_NO_RELATIVE_INDICES")]
    pub no_relative_indices: bool,
    /// Extra comment line for the PLY header; may be repeated
    #[arg(short = 'c', long = "comment", value_name = "TEXT")]
    pub comments: Vec<String>,
    /// Wavefront OBJ file to read
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,
    /// PLY file to write
    #[arg(value_hint = ValueHint::FilePath)]
    pub output: PathBuf,
}

impl Cli {
    pub fn options(&self) -> Options {
        Options {
            obj: ObjOptions {
                relative_indices: !self.no_relative_indices,
            },
            ply: PlyOptions {
                comments: self.comments.clone(),
            },
        }
    }
}

/// Set up log output on stderr
pub(crate) fn initialize_tracing(log_filter: &str, log_format: LogFormat) {
    let tsub = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::OffsetTime::new(
            time::UtcOffset::current_local_offset().unwrap_or_else(|e| {
                tracing::warn!("couldn't get local time offset: {:?}", e);
                time::UtcOffset::UTC
            }),
            time::macros::format_description!("[hour]:[minute]:[second]"),
        ))
        .with_env_filter(log_filter);

    match log_format {
        LogFormat::Compact => tsub.compact().init(),
        LogFormat::Full => tsub.init(),
        LogFormat::Pretty => tsub.pretty().init(),
        LogFormat::Json => tsub.json().init(),
    }
}
