//! JSON stream adapter around the render pipeline.
//!
//! The whole input document is read before anything is rendered, and the
//! whole output document is written in one go.

use std::{
    fs::File,
    io::{self, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::application::render::{RenderRequest, RenderResult};

/// Failures at the process boundary. Any of these fails the whole invocation.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to read render request: {0}")]
    Read(#[source] io::Error),
    #[error("render request is not valid UTF-8: {0}")]
    Utf8(#[source] std::string::FromUtf8Error),
    #[error("malformed render request: {0}")]
    MalformedInput(#[source] serde_json::Error),
    #[error("failed to serialise render results: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write render results: {0}")]
    Write(#[source] io::Error),
}

/// Where the request document comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Source {
    #[default]
    Stdin,
    File(PathBuf),
}

/// Where the result document goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Sink {
    #[default]
    Stdout,
    File(PathBuf),
}

impl Source {
    /// `None` and `-` select standard input.
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) if path != Path::new("-") => Source::File(path.to_path_buf()),
            _ => Source::Stdin,
        }
    }

    pub fn read_request(&self) -> Result<RenderRequest, BatchError> {
        match self {
            Source::Stdin => read_request(io::stdin().lock()),
            Source::File(path) => {
                let file = File::open(path).map_err(|source| BatchError::Open {
                    path: path.display().to_string(),
                    source,
                })?;
                read_request(file)
            }
        }
    }
}

impl Sink {
    /// `None` and `-` select standard output.
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) if path != Path::new("-") => Sink::File(path.to_path_buf()),
            _ => Sink::Stdout,
        }
    }

    pub fn write_results(&self, results: &[RenderResult], pretty: bool) -> Result<(), BatchError> {
        match self {
            Sink::Stdout => write_results(io::stdout().lock(), results, pretty),
            Sink::File(path) => {
                let file = File::create(path).map_err(|source| BatchError::Open {
                    path: path.display().to_string(),
                    source,
                })?;
                write_results(BufWriter::new(file), results, pretty)
            }
        }
    }
}

/// Read and decode a complete `[[expression, display], ...]` document.
pub fn read_request<R: Read>(mut reader: R) -> Result<RenderRequest, BatchError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(BatchError::Read)?;
    let text = String::from_utf8(bytes).map_err(BatchError::Utf8)?;
    parse_request(&text)
}

pub fn parse_request(text: &str) -> Result<RenderRequest, BatchError> {
    serde_json::from_str(text).map_err(BatchError::MalformedInput)
}

/// Encode results as a JSON array and flush the writer.
pub fn write_results<W: Write>(
    mut writer: W,
    results: &[RenderResult],
    pretty: bool,
) -> Result<(), BatchError> {
    let encoded = if pretty {
        serde_json::to_vec_pretty(results)
    } else {
        serde_json::to_vec(results)
    }
    .map_err(BatchError::Serialize)?;

    writer.write_all(&encoded).map_err(BatchError::Write)?;
    writer.flush().map_err(BatchError::Write)
}
