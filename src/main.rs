use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::{error, info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use remedy_guide::core::catalog::{Catalog, CatalogDocument, CatalogError, LoadOptions};
use remedy_guide::core::config::{self, CliOverrides, GuideConfig, ResolvedConfig};
use remedy_guide::core::navigator::{BackNavigation, RootSequencing};
use remedy_guide::core::state::App;
use remedy_guide::tui;

#[derive(Parser)]
#[command(
    name = "remedy-guide",
    about = "Symptom questionnaire that suggests a homeopathic remedy"
)]
struct Args {
    /// Catalog file to load instead of the bundled one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// What Back does during a questionnaire
    #[arg(long, value_enum)]
    back: Option<BackNavigation>,

    /// How a category's root questions are used
    #[arg(long, value_enum)]
    sequencing: Option<RootSequencing>,

    /// Accept catalogs with missing or empty categories, questions without
    /// options, and options that set both `next` and `remedy`
    #[arg(long)]
    lenient: bool,

    /// Load and validate the catalog, print a summary, then exit
    #[arg(long)]
    check: bool,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to remedy-guide.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("remedy-guide.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("Ignoring config file: {}", e);
        eprintln!("warning: {e}; using defaults");
        GuideConfig::default()
    });
    let cli = CliOverrides {
        catalog: args.catalog,
        back_navigation: args.back,
        root_sequencing: args.sequencing,
        lenient: args.lenient,
    };
    let resolved = config::resolve(&file_config, &cli);

    let catalog = match load_catalog(&resolved) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Catalog failed to load: {}", e);
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };

    let summary = catalog.summary();
    info!("Remedy guide starting up with catalog: {}", summary);

    if args.check {
        println!("{summary}");
        return Ok(());
    }

    let app = App::from_config(Arc::new(catalog), &resolved);
    tui::run(app)
}

fn load_catalog(resolved: &ResolvedConfig) -> Result<Catalog, CatalogError> {
    let options = if resolved.strict_catalog {
        LoadOptions::default()
    } else {
        LoadOptions::lenient()
    };
    match &resolved.catalog_path {
        Some(path) => Catalog::load_file(path, options),
        None => Catalog::from_document(CatalogDocument::bundled()?, options),
    }
}
