use crate::prelude::*;
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Where a payload is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `None` and `-` both mean stdin
    pub fn from_arg(arg: Option<&Path>) -> Self {
        match arg {
            Some(path) if path != Path::new("-") => InputSource::File(path.to_path_buf()),
            _ => InputSource::Stdin,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            InputSource::Stdin => "stdin".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }
}

/// Parse raw input text into a payload
///
/// Whitespace-only input is an absent payload rather than an error.
pub fn parse_payload(raw: &str, source_name: &str) -> Result<Option<Value>, Error> {
    if raw.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str(raw)
        .map(Some)
        .map_err(|e| Error::InvalidJson {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })
}

/// Read and parse a payload from `source`
pub fn read_payload(source: &InputSource) -> Result<Option<Value>> {
    let source_name = source.describe();
    let read_error = |e: std::io::Error| Error::InputRead {
        source_name: source_name.clone(),
        message: e.to_string(),
    };

    let raw = match source {
        InputSource::Stdin => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .map_err(read_error)?;
            raw
        }
        InputSource::File(path) => std::fs::read_to_string(path).map_err(read_error)?,
    };

    log::debug!("Read {} bytes from {}", raw.len(), source_name);

    Ok(parse_payload(&raw, &source_name)?)
}
