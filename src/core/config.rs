//! Run configuration and the optional action config pre-flight

use anyhow::{Context, Result};
use serde_yaml::Value;
use std::path::Path;

/// Default executable used to run the action
pub const DEFAULT_EXECUTABLE: &str = "node";

/// Everything a batch run needs, fixed for the whole run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Path to the action's config file, handed to every case verbatim
    pub config_path: String,

    /// Path to the CSV file of test cases
    pub data_path: String,

    /// Executable launched once per case
    pub executable: String,

    /// Optional entry script passed as the executable's only argument
    pub script: Option<String>,

    /// Whether the action runs in debug mode
    pub debug: bool,

    /// Field delimiter of the data file
    pub delimiter: u8,

    /// Parse the action config before running anything
    pub check_config: bool,
}

impl RunConfig {
    pub fn new(config_path: impl Into<String>, data_path: impl Into<String>) -> Self {
        Self {
            config_path: config_path.into(),
            data_path: data_path.into(),
            executable: DEFAULT_EXECUTABLE.to_string(),
            script: None,
            debug: false,
            delimiter: b',',
            check_config: false,
        }
    }

    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_check_config(mut self, check_config: bool) -> Self {
        self.check_config = check_config;
        self
    }
}

/// Match modes the action understands
const MATCH_MODES: [&str; 2] = ["fuzzy", "regex"];

/// Read the action config file and run the same shape checks the action
/// performs before it matches anything.
pub fn check_action_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    check_action_config_str(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Validate action config YAML text
///
/// Settings that are absent, null, `false`, `0` or empty fall back to the
/// action's defaults, so only values that survive that fallback are checked.
pub fn check_action_config_str(yaml: &str) -> Result<()> {
    let value: Value = serde_yaml::from_str(yaml).context("Failed to parse config YAML")?;

    if !value.is_mapping() {
        anyhow::bail!("Config must be a mapping, got {}", kind_of(&value));
    }

    if let Some(mode) = setting(&value, "default.mode") {
        check_mode(mode, "Invalid default.mode")?;
    }

    if let Some(thres) = setting(&value, "default.fuzzy.thres") {
        let in_range = thres
            .as_f64()
            .is_some_and(|t| (0.0..=100.0).contains(&t));
        if !in_range {
            anyhow::bail!("Invalid default.fuzzy.threshold: {}", render(thres));
        }
    }

    if let Some(case_sensitive) = setting(&value, "default.case-sensitive") {
        if !case_sensitive.is_bool() {
            anyhow::bail!("Invalid default.case-sensitive: {}", render(case_sensitive));
        }
    }

    if let Some(label) = setting(&value, "label-nonmatch") {
        if !label.is_string() {
            anyhow::bail!("Invalid label-nonmatch: {}", render(label));
        }
    }

    let rules = match setting(&value, "rules") {
        Some(Value::Mapping(rules)) => rules,
        Some(other) => anyhow::bail!("Invalid rules: expected a mapping, got {}", kind_of(other)),
        None => return Ok(()),
    };

    for (name, rule) in rules {
        let name = render(name);
        if !rule.is_mapping() {
            anyhow::bail!("Invalid rule: {}", name);
        }

        let matches: &[Value] = match setting(rule, "match") {
            Some(Value::Sequence(matches)) => matches,
            Some(_) => anyhow::bail!("Invalid match in rule {}", name),
            None => &[],
        };

        for entry in matches {
            if !entry.is_mapping() {
                anyhow::bail!("Invalid match in rule {}", name);
            }
            match setting(entry, "keyword") {
                Some(Value::String(_)) => {}
                Some(other) => anyhow::bail!("Invalid keyword: {}", render(other)),
                None => anyhow::bail!("Invalid keyword: "),
            }
            if let Some(mode) = setting(entry, "mode") {
                check_mode(mode, "Invalid mode")?;
            }
        }
    }

    Ok(())
}

/// Look up a dotted path, treating missing keys and falsy values alike
fn setting<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for key in path.split('.') {
        current = current.as_mapping()?.get(key)?;
    }
    if is_falsy(current) {
        None
    } else {
        Some(current)
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn check_mode(mode: &Value, message: &str) -> Result<()> {
    match mode.as_str() {
        Some(m) if MATCH_MODES.contains(&m) => Ok(()),
        _ => anyhow::bail!("{}: {}", message, render(mode)),
    }
}

/// Render a value for an error message
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => kind_of(other).to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
