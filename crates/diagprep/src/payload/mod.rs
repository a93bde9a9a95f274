mod input;

use crate::prelude::{eprintln, println, *};
use crate::render::render_value;
use diagprep_core::flatten::make_flat_start_case_object;
use diagprep_core::redact::{PathConvention, PathRedactor};
use serde_json::Value;
use std::path::PathBuf;

pub use input::{read_payload, InputSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConventionArg {
    /// Use the convention of the running platform (default)
    Host,
    /// `/home/user/file` style paths
    Unix,
    /// `C:\Users\file` and `\\server\share` style paths
    Windows,
}

impl From<ConventionArg> for PathConvention {
    fn from(arg: ConventionArg) -> Self {
        match arg {
            ConventionArg::Host => PathConvention::host(),
            ConventionArg::Unix => PathConvention::Posix,
            ConventionArg::Windows => PathConvention::Windows,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct PayloadOptions {
    /// JSON file to read, `-` or nothing for stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

/// Redact absolute paths and then flatten keys, the usual order before logging
pub fn sanitize_payload(value: Option<&Value>, convention: PathConvention) -> Option<Value> {
    let redacted = PathRedactor::new(convention).redact(value);
    make_flat_start_case_object(redacted.as_ref())
}

fn load(options: &PayloadOptions, global: &crate::Global) -> Result<Option<Value>> {
    let source = InputSource::from_arg(options.input.as_deref());

    if global.verbose {
        eprintln!("Reading payload from {}", source.describe());
    }

    read_payload(&source)
}

fn emit(value: Option<Value>, global: &crate::Global) -> Result<()> {
    let Some(value) = value else {
        log::info!("Payload is empty, nothing to print");
        return Ok(());
    };

    println!("{}", render_value(&value, global.format)?.trim_end());
    Ok(())
}

fn redactor(global: &crate::Global) -> PathRedactor {
    let redactor = PathRedactor::new(global.path_convention.into());

    if global.verbose {
        eprintln!("Path convention: {}", redactor.convention());
    }

    redactor
}

pub fn flatten(options: PayloadOptions, global: crate::Global) -> Result<()> {
    let payload = load(&options, &global)?;
    emit(make_flat_start_case_object(payload.as_ref()), &global)
}

pub fn redact(options: PayloadOptions, global: crate::Global) -> Result<()> {
    let payload = load(&options, &global)?;
    let redactor = redactor(&global);
    emit(redactor.redact(payload.as_ref()), &global)
}

pub fn sanitize(options: PayloadOptions, global: crate::Global) -> Result<()> {
    let payload = load(&options, &global)?;
    let convention = redactor(&global).convention();
    emit(sanitize_payload(payload.as_ref(), convention), &global)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_convention_arg_conversion() {
        assert_eq!(
            PathConvention::from(ConventionArg::Unix),
            PathConvention::Posix
        );
        assert_eq!(
            PathConvention::from(ConventionArg::Windows),
            PathConvention::Windows
        );
        assert_eq!(
            PathConvention::from(ConventionArg::Host),
            PathConvention::host()
        );
    }

    #[test]
    fn test_convention_arg_parses_cli_values() {
        use clap::ValueEnum;

        assert_eq!(
            ConventionArg::from_str("windows", false).unwrap(),
            ConventionArg::Windows
        );
        assert_eq!(
            ConventionArg::from_str("UNIX", true).unwrap(),
            ConventionArg::Unix
        );
        assert!(ConventionArg::from_str("plan9", true).is_err());
    }

    #[test]
    fn test_sanitize_payload_redacts_then_flattens() {
        let payload = json!({
            "image": { "sourcePath": "/home/john/rpi.img", "size": 2048 },
            "drive": { "devicePath": "/dev/sdb" },
            "ETCHER_DISABLE_UPDATES": true
        });

        assert_eq!(
            sanitize_payload(Some(&payload), PathConvention::Posix),
            Some(json!({
                "Image Source Path": "rpi.img",
                "Image Size": 2048,
                "Drive Device Path": "/dev/sdb",
                "ETCHER_DISABLE_UPDATES": true
            }))
        );
    }

    #[test]
    fn test_sanitize_payload_windows() {
        let payload = json!({ "imagePath": "C:\\Users\\John\\rpi.img" });
        assert_eq!(
            sanitize_payload(Some(&payload), PathConvention::Windows),
            Some(json!({ "Image Path": "rpi.img" }))
        );
    }

    #[test]
    fn test_sanitize_payload_absent_and_null() {
        assert_eq!(sanitize_payload(None, PathConvention::Posix), None);
        assert_eq!(
            sanitize_payload(Some(&Value::Null), PathConvention::Posix),
            Some(json!({ "Value": null }))
        );
    }

    #[test]
    fn test_sanitize_payload_primitive_path() {
        assert_eq!(
            sanitize_payload(Some(&json!("/home/john/rpi.img")), PathConvention::Posix),
            Some(json!({ "Value": "rpi.img" }))
        );
    }
}
