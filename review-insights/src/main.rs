use {
    std::{path::PathBuf, process::ExitCode},
    clap::Parser,
    tracing::{info, warn, error},
    review_insights_core::{
        config::Config,
        error::RunStatus,
        pipeline::ReviewInsightsPipeline,
        polarity::LexiconPolarityScorer,
        stopwords::StopwordSet,
    },
    crate::{
        data_loading::load_data_file,
        render::{build_renderers, prepare_all, render_all, RendererKind, View},
        utils::init_logging,
    },
};

mod data_loading;
mod render;
mod utils;

/// Customer sentiment and product performance analysis for a CSV of product reviews.
#[derive(Parser, Debug)]
#[command(name = "review-insights", version)]
struct Args {
    /// CSV file with product names and reviews
    file: Option<PathBuf>,

    /// Config file, instead of ./config.toml or /config/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Renderers to use; repeat to select several. Overrides the config file.
    #[arg(long = "renderer", value_enum)]
    renderers: Vec<RendererKind>,

    /// Directory for file artifacts. Overrides the config file.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
    init_logging();

    let args = Args::parse();
    info!("customer sentiment and product performance analysis");

    let config = Config::load(args.config.as_deref());
    let status = run(&args, &config)?;

    info!("run finished with status: {}", status.as_str());

    Ok(ExitCode::from(exit_code(status)))
}

fn exit_code(status: RunStatus) -> u8 {
    if status.is_failure() { 1 } else { 0 }
}

fn run(args: &Args, config: &Config) -> anyhow::Result<RunStatus> {
    let path = match args.file.as_ref() {
        Some(path) => path,
        None => {
            warn!("please provide a CSV file to proceed");
            return Ok(RunStatus::NoFileProvided);
        }
    };

    let output = config.output();
    let kinds = if args.renderers.is_empty() {
        RendererKind::parse_all(&output.renderers())?
    } else {
        args.renderers.clone()
    };
    let output_dir = args.output_dir.clone().unwrap_or_else(|| output.directory());

    let pipeline = ReviewInsightsPipeline::new(
        config.columns.clone(),
        LexiconPolarityScorer::english()?,
        StopwordSet::english(),
    );

    let table = load_data_file(path)?;
    let mut renderers = build_renderers(&kinds, &output_dir);

    prepare_all(&mut renderers)?;
    render_all(&mut renderers, &View::Preview(&table))?;

    let report = match pipeline.run(&table) {
        Ok(report) => report,
        Err(err) => {
            error!("{}", err);
            return Ok(err.status());
        }
    };

    for view in View::from_report(&report) {
        render_all(&mut renderers, &view)?;
    }

    for renderer in renderers.iter_mut() {
        renderer.finish()?;
    }

    info!("analysis completed successfully");

    Ok(RunStatus::Success)
}
