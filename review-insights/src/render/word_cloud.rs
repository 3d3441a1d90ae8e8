use {
    std::{fs, path::{Path, PathBuf}},
    anyhow::{Context, Result},
    tracing::{info, warn},
    super::{remove_stale_file, Artifact, Renderer, View},
};

const POSITIVE_FILE: &str = "positive_words.txt";
const NEGATIVE_FILE: &str = "negative_words.txt";

/// Hands the positive and negative corpora to an external word cloud generator as text files.
pub struct WordCloudCorpusRenderer {
    directory: PathBuf,
}

impl WordCloudCorpusRenderer {
    pub fn new(directory: &Path) -> Self {
        Self {
            directory: directory.to_owned(),
        }
    }

    fn write_corpus(&self, file_name: &str, text: &str) -> Result<()> {
        if text.is_empty() {
            warn!("{} corpus is empty, word cloud generators may reject it", file_name);
        }

        let path = self.directory.join(file_name);
        fs::write(&path, text).with_context(|| format!("failed to write {}", path.display()))
    }
}

impl Renderer for WordCloudCorpusRenderer {
    fn name(&self) -> &'static str {
        "word-cloud"
    }

    fn prepare(&mut self) -> Result<()> {
        remove_stale_file(&self.directory.join(POSITIVE_FILE))?;
        remove_stale_file(&self.directory.join(NEGATIVE_FILE))
    }

    fn render(&mut self, view: &View<'_>) -> Result<Option<Artifact>> {
        let corpora = match view {
            View::WordCorpora(corpora) => corpora,
            _ => return Ok(None),
        };

        fs::create_dir_all(&self.directory)
            .with_context(|| format!("failed to create output directory {}", self.directory.display()))?;

        self.write_corpus(POSITIVE_FILE, &corpora.positive_text)?;
        self.write_corpus(NEGATIVE_FILE, &corpora.negative_text)?;

        info!("wrote word cloud corpora to {}", self.directory.display());

        Ok(Some(Artifact {
            view: view.name(),
            renderer: self.name(),
            location: Some(self.directory.clone()),
        }))
    }
}
