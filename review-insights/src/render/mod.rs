use {
    std::{fs, io, path::{Path, PathBuf}},
    anyhow::{anyhow, Context, Result},
    clap::ValueEnum,
    serde::Serialize,
    tracing::debug,
    review_insights_core::{
        entity::{InsightsReport, PopularityEntry, SentimentTally, WordCorpora, WordFrequencyEntry},
        table::RawTable,
    },
    self::{json::JsonRenderer, terminal::TerminalRenderer, word_cloud::WordCloudCorpusRenderer},
};

pub mod json;
pub mod terminal;
pub mod word_cloud;

pub const PREVIEW_ROWS: usize = 5;

/// A named view handed to renderers.
#[derive(Debug, Clone, Copy)]
pub enum View<'a> {
    Preview(&'a RawTable),
    Popularity(&'a [PopularityEntry]),
    Sentiment(&'a SentimentTally),
    Words(&'a [WordFrequencyEntry]),
    WordCorpora(&'a WordCorpora),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Artifact {
    pub view: &'static str,
    pub renderer: &'static str,
    pub location: Option<PathBuf>,
}

pub trait Renderer {
    fn name(&self) -> &'static str;

    /// Called once before the first view, so files from an earlier run never outlive this one.
    fn prepare(&mut self) -> Result<()> {
        Ok(())
    }

    /// Returns `None` when this renderer has nothing to produce for the view.
    fn render(&mut self, view: &View<'_>) -> Result<Option<Artifact>>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererKind {
    Terminal,
    Json,
    WordCloud,
}

impl<'a> View<'a> {
    pub const NAMES: [&'static str; 5] = [
        "dataset_preview",
        "best_selling_products",
        "sentiment_distribution",
        "common_words",
        "word_clouds",
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Preview(_) => "dataset_preview",
            Self::Popularity(_) => "best_selling_products",
            Self::Sentiment(_) => "sentiment_distribution",
            Self::Words(_) => "common_words",
            Self::WordCorpora(_) => "word_clouds",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Preview(_) => "Dataset Preview",
            Self::Popularity(_) => "Top 10 Best-Selling Products",
            Self::Sentiment(_) => "Sentiment Distribution",
            Self::Words(_) => "Most Frequently Used Words in Reviews",
            Self::WordCorpora(_) => "Word Clouds for Positive and Negative Reviews",
        }
    }

    pub fn from_report(report: &'a InsightsReport) -> [View<'a>; 4] {
        [
            View::Popularity(report.popularity()),
            View::Sentiment(report.sentiment()),
            View::Words(report.top_words()),
            View::WordCorpora(report.word_corpora()),
        ]
    }
}

impl RendererKind {
    pub fn parse_all(names: &[String]) -> Result<Vec<Self>> {
        names.iter()
            .map(|name| Self::from_str(name, true).map_err(|err| anyhow!("unknown renderer {:?}: {}", name, err)))
            .collect()
    }
}

pub fn build_renderers(kinds: &[RendererKind], output_dir: &Path) -> Vec<Box<dyn Renderer>> {
    kinds.iter()
        .map(|kind| -> Box<dyn Renderer> {
            match kind {
                RendererKind::Terminal => Box::new(TerminalRenderer::stdout()),
                RendererKind::Json => Box::new(JsonRenderer::new(output_dir)),
                RendererKind::WordCloud => Box::new(WordCloudCorpusRenderer::new(output_dir)),
            }
        })
        .collect()
}

pub fn prepare_all(renderers: &mut [Box<dyn Renderer>]) -> Result<()> {
    for renderer in renderers.iter_mut() {
        renderer.prepare()?;
    }
    Ok(())
}

pub fn render_all(renderers: &mut [Box<dyn Renderer>], view: &View<'_>) -> Result<Vec<Artifact>> {
    let mut artifacts = Vec::new();

    for renderer in renderers.iter_mut() {
        if let Some(artifact) = renderer.render(view)? {
            debug!("{} rendered {}", renderer.name(), artifact.view);
            artifacts.push(artifact);
        }
    }

    Ok(artifacts)
}

pub(crate) fn remove_stale_file(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("removed stale artifact {}", path.display());
            Ok(())
        },
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).with_context(|| format!("failed to remove stale artifact {}", path.display())),
    }
}
