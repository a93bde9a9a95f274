use crate::prelude::{println, *};
use crate::render::OutputFormat;
use colored::{ColoredString, Colorize};
use diagprep_core::information::{
    classify_version, get_current_version, parse_version, ReleaseType, VersionError,
};

#[derive(Debug, clap::Parser)]
#[command(name = "version")]
#[command(about = "Show a build version and its release type")]
pub struct App {
    /// Version to classify (defaults to the running build)
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionReport {
    pub version: String,
    pub release_type: ReleaseType,
    #[serde(skip)]
    pub parse_error: Option<VersionError>,
}

/// Build the report for `version`, or for the running build when absent
pub fn version_report(version: Option<String>) -> VersionReport {
    let version = version.unwrap_or_else(|| get_current_version().to_string());
    let (release_type, parse_error) = match parse_version(&version) {
        Ok(parsed) => (classify_version(&parsed), None),
        Err(e) => (ReleaseType::Unknown, Some(e)),
    };

    VersionReport {
        version,
        release_type,
        parse_error,
    }
}

fn colorize(release_type: ReleaseType) -> ColoredString {
    match release_type {
        ReleaseType::Production => release_type.as_str().green().bold(),
        ReleaseType::Snapshot => release_type.as_str().yellow().bold(),
        ReleaseType::Development => release_type.as_str().cyan().bold(),
        ReleaseType::Unknown => release_type.as_str().red().bold(),
    }
}

/// Module entry point
pub fn run(app: App, global: crate::Global) -> Result<()> {
    let report = version_report(app.version);

    if let Some(e) = &report.parse_error {
        log::warn!("{e}, classifying as {}", report.release_type);
    }
    log::debug!("Classified {} as {}", report.version, report.release_type);

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize version report")?;
            println!("{json}");
        }
        OutputFormat::Table => {
            let mut table = new_table();
            table.add_row(prettytable::row!["Version", report.version]);
            table.add_row(prettytable::row![
                "Release Type",
                colorize(report.release_type)
            ]);
            println!("{}", table.to_string().trim_end());
        }
    }

    Ok(())
}
