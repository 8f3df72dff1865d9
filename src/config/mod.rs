//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{collections::BTreeMap, path::PathBuf, str::FromStr};

use clap::{Args, Parser, ValueHint, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::application::render::{DEFAULT_ERROR_COLOR, OutputFormat};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "parsemath";
const ENV_PREFIX: &str = "PARSEMATH";

/// Command-line arguments for the `parsemath` binary.
#[derive(Debug, Default, Parser)]
#[command(
    name = "parsemath",
    version,
    about = "Render a JSON batch of TeX expressions to HTML with KaTeX"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "PARSEMATH_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub io: IoOverrides,

    #[command(flatten)]
    pub logging: LoggingOverrides,

    #[command(flatten)]
    pub render: RenderOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct IoOverrides {
    /// Read the request from a file instead of stdin (`-` means stdin).
    #[arg(long = "input", value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Write results to a file instead of stdout (`-` means stdout).
    #[arg(long = "output", value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Pretty-print the result document.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub pretty: bool,
}

#[derive(Debug, Args, Default, Clone)]
pub struct LoggingOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct RenderOverrides {
    /// Override the KaTeX output format (html|mathml|html_and_mathml).
    #[arg(id = "render_output", long = "render-output", value_name = "FORMAT")]
    pub output: Option<String>,

    /// Allow KaTeX commands gated behind `trust` (\href, \url, ...).
    #[arg(
        long = "render-trust",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub trust: Option<bool>,

    /// Override the CSS colour of fallback markup for failed expressions.
    #[arg(long = "render-error-color", value_name = "COLOR")]
    pub error_color: Option<String>,
}

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub render: RenderSettings,
    pub io: IoSettings,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub output: OutputFormat,
    pub trust: bool,
    pub error_color: String,
    pub macros: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct IoSettings {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub pretty: bool,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_cli_overrides(cli);

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    logging: RawLoggingSettings,
    render: RawRenderSettings,
    io: RawIoSettings,
}

impl RawSettings {
    fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        self.apply_io_overrides(&cli.io);
        self.apply_logging_overrides(&cli.logging);
        self.apply_render_overrides(&cli.render);
    }

    fn apply_io_overrides(&mut self, overrides: &IoOverrides) {
        if let Some(input) = overrides.input.as_ref() {
            self.io.input = Some(input.clone());
        }
        if let Some(output) = overrides.output.as_ref() {
            self.io.output = Some(output.clone());
        }
        if overrides.pretty {
            self.io.pretty = Some(true);
        }
    }

    fn apply_logging_overrides(&mut self, overrides: &LoggingOverrides) {
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }

    fn apply_render_overrides(&mut self, overrides: &RenderOverrides) {
        if let Some(output) = overrides.output.as_ref() {
            self.render.output = Some(output.clone());
        }
        if let Some(trust) = overrides.trust {
            self.render.trust = Some(trust);
        }
        if let Some(color) = overrides.error_color.as_ref() {
            self.render.error_color = Some(color.clone());
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            logging,
            render,
            io,
        } = raw;

        let logging = build_logging_settings(logging)?;
        let render = build_render_settings(render)?;
        let io = build_io_settings(io);

        Ok(Self {
            logging,
            render,
            io,
        })
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_render_settings(render: RawRenderSettings) -> Result<RenderSettings, LoadError> {
    let output = match render.output {
        Some(value) => OutputFormat::from_str(&value)
            .map_err(|reason| LoadError::invalid("render.output", reason))?,
        None => OutputFormat::default(),
    };

    let error_color = render
        .error_color
        .map(|value| value.trim().to_string())
        .unwrap_or_else(|| DEFAULT_ERROR_COLOR.to_string());
    if error_color.is_empty() {
        return Err(LoadError::invalid(
            "render.error_color",
            "colour must not be empty",
        ));
    }
    if let Some(invalid) = error_color.chars().find(|ch| !is_css_color_char(*ch)) {
        return Err(LoadError::invalid(
            "render.error_color",
            format!("unexpected character `{invalid}` in colour"),
        ));
    }

    let mut macros = BTreeMap::new();
    for RawMacro { name, definition } in render.macros {
        let name = name.trim().to_string();
        if !name.starts_with('\\') || name.len() < 2 {
            return Err(LoadError::invalid(
                "render.macros",
                format!("macro name `{name}` must be a control sequence such as `\\RR`"),
            ));
        }
        if macros.insert(name.clone(), definition).is_some() {
            return Err(LoadError::invalid(
                "render.macros",
                format!("macro `{name}` is defined more than once"),
            ));
        }
    }

    Ok(RenderSettings {
        output,
        trust: render.trust.unwrap_or(false),
        error_color,
        macros,
    })
}

fn build_io_settings(io: RawIoSettings) -> IoSettings {
    let non_empty = |path: Option<PathBuf>| path.filter(|path| !path.as_os_str().is_empty());

    IoSettings {
        input: non_empty(io.input),
        output: non_empty(io.output),
        pretty: io.pretty.unwrap_or(false),
    }
}

fn is_css_color_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '#' | '(' | ')' | ',' | '.' | '%' | ' ' | '-')
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawRenderSettings {
    output: Option<String>,
    trust: Option<bool>,
    error_color: Option<String>,
    macros: Vec<RawMacro>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawMacro {
    name: String,
    definition: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawIoSettings {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    pretty: Option<bool>,
}

/// Parse the process arguments and resolve settings from them.
pub fn load_with_cli() -> Result<Settings, LoadError> {
    let args = CliArgs::parse();
    load(&args)
}
