use std::collections::HashSet;

const ENGLISH_STOPWORDS: &str = include_str!("../resources/stopwords_english.txt");

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn english() -> Self {
        Self::from_list(ENGLISH_STOPWORDS)
    }

    /// One word per line; blank lines and `#` comments are skipped.
    pub fn from_list(list: &str) -> Self {
        Self::from_words(
            list.lines()
                .map(|line| line.trim())
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
        )
    }

    pub fn from_words<I, S>(words: I) -> Self where I: IntoIterator<Item = S>, S: AsRef<str> {
        Self {
            words: words.into_iter().map(|word| word.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
