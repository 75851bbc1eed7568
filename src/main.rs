use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use openapi_info_sync::cli::{
    resolve_parameters, run_sync, ExplicitParameters, Prompter, TerminalPrompter,
};
use openapi_info_sync::config;
use openapi_info_sync::domain::OverrideSelection;
use openapi_info_sync::identity::local_identity;
use openapi_info_sync::manifest::{self, Manifest, MANIFEST_CANDIDATES};
use openapi_info_sync::spdx::HttpLicenseSource;
use openapi_info_sync::ui;
use openapi_info_sync::warning::SyncWarning;

#[derive(clap::Parser)]
#[command(
    name = "openapi-info-sync",
    version,
    about = "Infer the info block of an OpenAPI document from the project manifest"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short = 'f', long = "file", help = "OpenAPI document to update")]
    openapi_file: Option<PathBuf>,

    #[arg(long, help = "OpenAPI specification version for new documents")]
    openapi_version: Option<String>,

    #[arg(long, help = "Title of the API")]
    title: Option<String>,

    #[arg(long, help = "Description of the API")]
    description: Option<String>,

    #[arg(long = "api-version", help = "Version of the API")]
    api_version: Option<String>,

    #[arg(long, help = "SPDX license identifier, NONE, UNLICENSED, or license URL")]
    license: Option<String>,

    #[arg(long, help = "Point of contact as \"Name <email> (url)\"")]
    contact: Option<String>,

    #[arg(
        long = "override",
        help = "Comma-separated fields to override (title, description, version, license, contact) or 'none'"
    )]
    overrides: Option<String>,

    #[arg(long = "spdx-version", help = "SPDX license list version")]
    spdx_version: Option<String>,

    #[arg(short, long, help = "Project manifest (package.json or Cargo.toml)")]
    manifest: Option<PathBuf>,

    #[arg(short, long, help = "Accept defaults without prompting")]
    yes: bool,

    #[arg(long, help = "Preview the info block without writing the document")]
    dry_run: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

impl Args {
    fn explicit_parameters(&self) -> Result<ExplicitParameters> {
        let overrides = self
            .overrides
            .as_deref()
            .map(OverrideSelection::parse_list)
            .transpose()
            .context("Invalid --override")?;

        Ok(ExplicitParameters {
            openapi_file: self.openapi_file.clone(),
            openapi_version: self.openapi_version.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            version: self.api_version.clone(),
            license: self.license.clone(),
            contact: self.contact.clone(),
            overrides,
            spdx_license_data_version: self.spdx_version.clone(),
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(filter)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;
    let explicit = args.explicit_parameters()?;

    let mut warnings = Vec::new();

    let cwd = env::current_dir()?;
    let configured_manifest = args.manifest.as_deref().or(config.manifest.as_deref());
    let manifest = match manifest::discover(&cwd, configured_manifest) {
        Some(path) => {
            ui::display_status(&format!("Reading project manifest {}", path.display()));
            Manifest::load(&path)?
        }
        None => {
            warnings.push(SyncWarning::ManifestNotFound {
                searched: MANIFEST_CANDIDATES.iter().map(|s| s.to_string()).collect(),
            });
            Manifest::default()
        }
    };

    let interactive = !args.yes && io::stdin().is_terminal();
    let mut terminal = TerminalPrompter;
    let prompter: Option<&mut dyn Prompter> = if interactive {
        Some(&mut terminal)
    } else {
        None
    };

    let resolved = resolve_parameters(&explicit, &config, &manifest, local_identity, prompter)?;
    warnings.extend(resolved.warnings);
    let params = resolved.parameters;

    let source = HttpLicenseSource::new(&config.network.spdx_base_url, config.network.timeout())?;
    if params.license.is_some() {
        ui::display_status(&format!(
            "Fetching SPDX license list {}...",
            params.spdx_license_data_version
        ));
    }

    let outcome = run_sync(&params, &source, args.dry_run)?;
    warnings.extend(outcome.warnings.iter().cloned());

    for warning in &warnings {
        ui::display_warning(warning);
    }

    match outcome.write {
        Some(kind) => {
            ui::display_info_block("Info block written:", &outcome.rendered_info);
            ui::display_success(&ui::describe_write(kind, &outcome.path));
        }
        None => {
            ui::display_info_block("Info block (dry run):", &outcome.rendered_info);
            ui::display_status(&format!(
                "Dry run: {} left unchanged",
                outcome.path.display()
            ));
        }
    }

    Ok(())
}
