use {
    std::{fs::read_to_string, path::{Path, PathBuf}},
    tracing::warn,
    serde::Deserialize,
};

pub const DEFAULT_PRODUCT_COLUMN: &str = "Product Names";
pub const DEFAULT_REVIEW_COLUMN: &str = "Reviews";

const DEFAULT_OUTPUT_DIRECTORY: &str = "insights";
const DEFAULT_RENDERERS: [&str; 3] = ["terminal", "json", "word-cloud"];

#[derive(Deserialize, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub columns: ColumnsConfig,
    pub output: Option<OutputConfig>,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ColumnsConfig {
    product: Option<String>,
    review: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct OutputConfig {
    directory: Option<PathBuf>,
    renderers: Option<Vec<String>>,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Self {
        let contents = match path {
            Some(path) => read_to_string(path),
            None => read_to_string("./config.toml").or_else(|_| read_to_string("/config/config.toml")),
        };

        contents
            .map_err(|err| err.to_string())
            .and_then(|v| Self::from_toml(&v))
            .unwrap_or_else(|err| {
                warn!("failed to read config: {}", err);
                Config::default()
            })
    }

    pub fn from_toml(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|err| err.to_string())
    }

    pub fn output(&self) -> OutputConfig {
        self.output.as_ref().cloned().unwrap_or_default()
    }
}

impl ColumnsConfig {
    pub fn new(product: &str, review: &str) -> Self {
        Self {
            product: Some(product.to_owned()),
            review: Some(review.to_owned()),
        }
    }

    pub fn product(&self) -> &str {
        self.product.as_deref().unwrap_or(DEFAULT_PRODUCT_COLUMN)
    }

    pub fn review(&self) -> &str {
        self.review.as_deref().unwrap_or(DEFAULT_REVIEW_COLUMN)
    }
}

impl OutputConfig {
    pub fn directory(&self) -> PathBuf {
        self.directory.as_ref().cloned().unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIRECTORY))
    }

    pub fn renderers(&self) -> Vec<String> {
        self.renderers.as_ref()
            .cloned()
            .unwrap_or_else(|| DEFAULT_RENDERERS.iter().map(|v| v.to_string()).collect())
    }
}
