use {
    std::{collections::HashMap, io::Read},
    serde::Deserialize,
    crate::pipeline::split_words,
};

const ENGLISH_LEXICON: &str = include_str!("../resources/polarity_lexicon.csv");

const NEGATION_MULTIPLIER: f64 = -0.5;
const NEGATION_WINDOW: usize = 2;

/// Maps text to a polarity in [-1, 1]; the sign carries the tone.
pub trait PolarityScorer {
    fn polarity(&self, text: &str) -> f64;
}

impl<F: Fn(&str) -> f64> PolarityScorer for F {
    fn polarity(&self, text: &str) -> f64 {
        self(text)
    }
}

#[derive(Deserialize, Debug)]
struct LexiconEntry {
    word: String,
    polarity: f64,
    intensity: Option<f64>,
}

/// Averages word polarities from a lexicon, with intensifiers and negation
/// applied to the word that follows them.
#[derive(Debug, Clone, Default)]
pub struct LexiconPolarityScorer {
    polarities: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
}

impl LexiconPolarityScorer {
    pub fn english() -> Result<Self, csv::Error> {
        Self::from_csv(ENGLISH_LEXICON.as_bytes())
    }

    pub fn from_csv<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut scorer = Self::default();

        for entry in csv::Reader::from_reader(reader).deserialize() {
            let entry: LexiconEntry = entry?;
            let word = entry.word.to_lowercase();

            if let Some(intensity) = entry.intensity {
                scorer.intensifiers.insert(word.clone(), intensity);
            }
            if entry.polarity != 0.0 {
                scorer.polarities.insert(word, entry.polarity);
            }
        }

        Ok(scorer)
    }

    pub fn len(&self) -> usize {
        self.polarities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polarities.is_empty()
    }
}

impl PolarityScorer for LexiconPolarityScorer {
    fn polarity(&self, text: &str) -> f64 {
        let tokens: Vec<String> = split_words(text)
            .map(normalize_token)
            .filter(|token| !token.is_empty())
            .collect();

        let mut scores = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            let mut score = match self.polarities.get(token) {
                Some(polarity) => *polarity,
                None => continue,
            };

            if let Some(previous) = i.checked_sub(1).map(|j| &tokens[j]) {
                if let Some(intensity) = self.intensifiers.get(previous) {
                    score *= intensity;
                }
            }

            if tokens[i.saturating_sub(NEGATION_WINDOW)..i].iter().any(|t| is_negation(t)) {
                score *= NEGATION_MULTIPLIER;
            }

            scores.push(score);
        }

        if scores.is_empty() {
            return 0.0;
        }

        (scores.iter().sum::<f64>() / scores.len() as f64).clamp(-1.0, 1.0)
    }
}

fn normalize_token(raw: &str) -> String {
    raw.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase()
}

fn is_negation(token: &str) -> bool {
    matches!(token, "not" | "no" | "never" | "cannot" | "without")
        || token.ends_with("n't")
        || token.ends_with("n\u{2019}t")
}
