#![deny(clippy::all)]
#![forbid(unsafe_code)]

use clap::Parser;
use pinlib::{
    Annotator, FolderImageSource,
    annotation_store::AnnotationStore,
    cfg::{get_default_cfg_path, read_cfg},
    count_annotations,
    result::PinResult,
    tracing_setup,
};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(version, about = "Point-feature annotation of image sequences")]
struct Cli {
    /// path to the toml config with image_dir, annot_dir and cats, defaults
    /// to pinpoint_cfg.toml in the pinpoint home folder
    #[arg(long)]
    cfg: Option<PathBuf>,
    /// only sum up annotated objects and missing-marks below the annotation
    /// folder, subfolders included
    #[arg(long)]
    count: bool,
}

fn print_status(annotator: &Annotator) {
    for key in annotator.key_list() {
        let annotation = annotator.store().load(key);
        let states = annotator
            .cats()
            .iter()
            .map(|cat| format!("{cat}: {}", annotation.cat_state(cat)))
            .collect::<Vec<_>>()
            .join(", ");
        println!("{key}  {states}");
    }
}

fn run(cli: Cli) -> PinResult<()> {
    let cfg_path = cli.cfg.unwrap_or_else(get_default_cfg_path);
    let cfg = read_cfg(&cfg_path)?;
    info!(
        "annotating images from {:?} to {:?}",
        cfg.image_dir,
        cfg.annot_dir()
    );
    if cli.count {
        let counts = count_annotations(cfg.annot_dir())?;
        println!("{counts}");
        return Ok(());
    }
    let store = AnnotationStore::new(cfg.annot_dir())?;
    let source = FolderImageSource::new(&cfg.image_dir)?;
    let annotator = Annotator::new(Box::new(source), store, cfg.cats)?;
    print_status(&annotator);
    Ok(())
}

fn main() {
    let _guard_flush_to_logfile = tracing_setup::tracing_setup();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{e}");
        std::process::exit(1);
    }
}
