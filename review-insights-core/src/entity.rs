use {
    std::{collections::BTreeMap, fmt},
    typed_builder::TypedBuilder,
    serde::Serialize,
};

#[derive(TypedBuilder, Serialize, Clone, Debug, PartialEq)]
pub struct ReviewRecord {
    #[builder(default)]
    product_name: Option<String>,
    #[builder(setter(into))]
    review_text: String,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct PopularityEntry {
    pub product_name: String,
    pub review_count: u64,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

/// Count per sentiment label. Labels that never occurred are absent, not zero.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct SentimentTally {
    counts: BTreeMap<SentimentLabel, u64>,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct WordFrequencyEntry {
    pub word: String,
    pub count: u64,
}

#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct WordCorpora {
    pub positive_text: String,
    pub negative_text: String,
}

#[derive(TypedBuilder, Serialize, Clone, Debug, PartialEq)]
pub struct InsightsReport {
    total_rows: usize,
    valid_reviews: usize,
    popularity: Vec<PopularityEntry>,
    sentiment: SentimentTally,
    top_words: Vec<WordFrequencyEntry>,
    word_corpora: WordCorpora,
}

impl ReviewRecord {
    pub fn product_name(&self) -> Option<&str> {
        self.product_name.as_deref()
    }

    pub fn review_text(&self) -> &str {
        &self.review_text
    }
}

impl SentimentLabel {
    /// Plain sign rule, no tolerance band around zero.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            Self::Positive
        } else if polarity < 0.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SentimentTally {
    pub fn get(&self, label: SentimentLabel) -> Option<u64> {
        self.counts.get(&label).copied()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Labels by count, largest first.
    pub fn entries(&self) -> Vec<(SentimentLabel, u64)> {
        let mut entries: Vec<_> = self.counts.iter().map(|(label, count)| (*label, *count)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

impl FromIterator<SentimentLabel> for SentimentTally {
    fn from_iter<I: IntoIterator<Item = SentimentLabel>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for label in iter {
            *counts.entry(label).or_insert(0) += 1;
        }
        Self { counts }
    }
}

impl InsightsReport {
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn valid_reviews(&self) -> usize {
        self.valid_reviews
    }

    pub fn popularity(&self) -> &[PopularityEntry] {
        &self.popularity
    }

    pub fn sentiment(&self) -> &SentimentTally {
        &self.sentiment
    }

    pub fn top_words(&self) -> &[WordFrequencyEntry] {
        &self.top_words
    }

    pub fn word_corpora(&self) -> &WordCorpora {
        &self.word_corpora
    }
}
