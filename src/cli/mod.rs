//! Command-line interface

pub mod output;

use crate::core::{RunConfig, DEFAULT_EXECUTABLE};
use clap::Parser;
use std::ffi::OsString;

/// Replay issue fixtures through an issue-labeling action
#[derive(Debug, Parser, Clone)]
#[command(name = "issue-harness")]
#[command(version)]
#[command(about = "Run an issue-labeling action once per CSV test case, stopping at the first ::error::", long_about = None)]
pub struct Cli {
    /// Config file (.yaml) path, passed to the action as INPUT_CONFIG_PATH
    pub config: String,

    /// Data file (.csv) path; must have 'title' and 'issue' columns
    pub data: String,

    /// Executable launched for every case
    #[arg(default_value = DEFAULT_EXECUTABLE)]
    pub executable: String,

    /// Enable RUNNER_DEBUG mode in the action
    #[arg(long)]
    pub debug: bool,

    /// Entry script passed as the executable's only argument (e.g. dist/index.js)
    #[arg(long)]
    pub script: Option<String>,

    /// Field delimiter of the data file
    #[arg(long, default_value_t = ',', value_parser = parse_delimiter)]
    pub delimiter: char,

    /// Parse the config file as YAML before running any case
    #[arg(long)]
    pub check_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }

    /// The run configuration these arguments describe
    pub fn run_config(&self) -> RunConfig {
        let mut config = RunConfig::new(&self.config, &self.data)
            .with_executable(&self.executable)
            .with_debug(self.debug)
            .with_delimiter(self.delimiter as u8)
            .with_check_config(self.check_config);
        if let Some(script) = &self.script {
            config = config.with_script(script);
        }
        config
    }
}

/// Parse a single-byte delimiter
pub fn parse_delimiter(s: &str) -> Result<char, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c),
        _ => Err(format!("Delimiter must be a single ASCII character: {}", s)),
    }
}
