use crate::prelude::*;
use clap::Parser;

mod error;
mod payload;
mod prelude;
mod render;
mod version;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Prepare diagnostic payloads before they are logged or sent: flatten nested keys into readable labels, hide local filesystem paths, and classify build versions"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Output format
    #[clap(
        long,
        env = "DIAGPREP_FORMAT",
        global = true,
        value_enum,
        default_value = "table"
    )]
    format: render::OutputFormat,

    /// Path syntax used to recognize absolute paths
    #[clap(
        long,
        env = "DIAGPREP_PATH_CONVENTION",
        global = true,
        value_enum,
        default_value = "host"
    )]
    path_convention: payload::ConventionArg,

    /// Whether to display additional information.
    #[clap(long, env = "DIAGPREP_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Show a build version and its release type
    Version(crate::version::App),

    /// Flatten a JSON payload into "Start Case" labels
    Flatten(crate::payload::PayloadOptions),

    /// Replace absolute paths in a JSON payload with their basename
    Redact(crate::payload::PayloadOptions),

    /// Redact paths, then flatten keys
    Sanitize(crate::payload::PayloadOptions),
}

fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();
    log::debug!("Parsed arguments: {:?}", app);

    match app.command {
        SubCommands::Version(sub_app) => crate::version::run(sub_app, app.global),
        SubCommands::Flatten(options) => crate::payload::flatten(options, app.global),
        SubCommands::Redact(options) => crate::payload::redact(options, app.global),
        SubCommands::Sanitize(options) => crate::payload::sanitize(options, app.global),
    }
}
