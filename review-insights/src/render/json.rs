use {
    std::{fs, path::{Path, PathBuf}},
    anyhow::{Context, Result},
    chrono::Utc,
    serde::Serialize,
    serde_json::{json, Map, Value},
    tracing::info,
    review_insights_core::table::RawTable,
    super::{remove_stale_file, Artifact, Renderer, View, PREVIEW_ROWS},
};

const MANIFEST_FILE: &str = "manifest.json";

/// Writes each view as `<name>.json`, plus a manifest on finish.
pub struct JsonRenderer {
    directory: PathBuf,
    artifacts: Vec<Artifact>,
}

#[derive(Serialize)]
struct Manifest<'a> {
    generated_at: String,
    artifacts: &'a [Artifact],
}

impl JsonRenderer {
    pub fn new(directory: &Path) -> Self {
        Self {
            directory: directory.to_owned(),
            artifacts: Vec::new(),
        }
    }

    fn write(&self, file_name: &str, value: &impl Serialize) -> Result<PathBuf> {
        fs::create_dir_all(&self.directory)
            .with_context(|| format!("failed to create output directory {}", self.directory.display()))?;

        let path = self.directory.join(file_name);
        fs::write(&path, serde_json::to_vec_pretty(value)?)
            .with_context(|| format!("failed to write {}", path.display()))?;

        Ok(path)
    }
}

impl Renderer for JsonRenderer {
    fn name(&self) -> &'static str {
        "json"
    }

    fn prepare(&mut self) -> Result<()> {
        for name in View::NAMES {
            remove_stale_file(&self.directory.join(format!("{}.json", name)))?;
        }
        remove_stale_file(&self.directory.join(MANIFEST_FILE))?;
        self.artifacts.clear();

        Ok(())
    }

    fn render(&mut self, view: &View<'_>) -> Result<Option<Artifact>> {
        let data = match view {
            View::Preview(table) => preview(table),
            View::Popularity(entries) => serde_json::to_value(entries)?,
            View::Sentiment(tally) => serde_json::to_value(tally)?,
            View::Words(entries) => serde_json::to_value(entries)?,
            View::WordCorpora(corpora) => serde_json::to_value(corpora)?,
        };

        let document = json!({
            "view": view.name(),
            "title": view.title(),
            "data": data,
        });

        let path = self.write(&format!("{}.json", view.name()), &document)?;

        let artifact = Artifact {
            view: view.name(),
            renderer: self.name(),
            location: Some(path),
        };
        self.artifacts.push(artifact.clone());

        Ok(Some(artifact))
    }

    fn finish(&mut self) -> Result<()> {
        let manifest = Manifest {
            generated_at: Utc::now().to_rfc3339(),
            artifacts: &self.artifacts,
        };

        let path = self.write(MANIFEST_FILE, &manifest)?;
        info!("wrote {} json artifacts, manifest at {}", self.artifacts.len(), path.display());

        Ok(())
    }
}

fn preview(table: &RawTable) -> Value {
    let rows = table.head(PREVIEW_ROWS).iter()
        .map(|row| {
            let mut object = Map::new();
            for (header, cell) in table.headers().iter().zip(row.iter()) {
                object.insert(header.clone(), cell.as_ref().map(|v| Value::String(v.clone())).unwrap_or(Value::Null));
            }
            Value::Object(object)
        })
        .collect();

    Value::Array(rows)
}
