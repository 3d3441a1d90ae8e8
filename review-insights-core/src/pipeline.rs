use {
    std::collections::HashMap,
    tracing::{info, debug},
    crate::{
        config::ColumnsConfig,
        entity::{
            InsightsReport,
            PopularityEntry,
            ReviewRecord,
            SentimentLabel,
            SentimentTally,
            WordCorpora,
            WordFrequencyEntry,
        },
        error::InsightsError,
        polarity::PolarityScorer,
        progress::Progress,
        stopwords::StopwordSet,
        table::RawTable,
    },
};

pub const TOP_PRODUCTS: usize = 10;
pub const TOP_WORDS: usize = 15;

/// Rows of a table that passed validation, reviews guaranteed present.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTable {
    total_rows: usize,
    records: Vec<ReviewRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledReview<'a> {
    pub record: &'a ReviewRecord,
    pub sentiment: SentimentLabel,
}

pub struct ReviewInsightsPipeline<S> {
    columns: ColumnsConfig,
    scorer: S,
    stopwords: StopwordSet,
}

impl ValidatedTable {
    pub fn new(total_rows: usize, records: Vec<ReviewRecord>) -> Self {
        Self {
            total_rows,
            records,
        }
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn records(&self) -> &[ReviewRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<S: PolarityScorer> ReviewInsightsPipeline<S> {
    pub fn new(columns: ColumnsConfig, scorer: S, stopwords: StopwordSet) -> Self {
        Self {
            columns,
            scorer,
            stopwords,
        }
    }

    pub fn validate(&self, table: &RawTable) -> Result<ValidatedTable, InsightsError> {
        let product_column = table.column_index(self.columns.product());
        let review_column = table.column_index(self.columns.review());

        let (product_column, review_column) = match (product_column, review_column) {
            (Some(product), Some(review)) => (product, review),
            (product, review) => {
                let mut missing = Vec::new();
                if product.is_none() {
                    missing.push(self.columns.product().to_owned());
                }
                if review.is_none() {
                    missing.push(self.columns.review().to_owned());
                }

                return Err(InsightsError::MissingColumns {
                    product_column: self.columns.product().to_owned(),
                    review_column: self.columns.review().to_owned(),
                    missing,
                });
            }
        };

        let records: Vec<ReviewRecord> = table.rows().iter()
            .filter_map(|row| {
                let review_text = row.get(review_column).cloned().flatten()?;
                Some(ReviewRecord::builder()
                    .product_name(row.get(product_column).cloned().flatten())
                    .review_text(review_text)
                    .build())
            })
            .collect();

        debug!("dropped {} rows without a review", table.len() - records.len());

        Ok(ValidatedTable::new(table.len(), records))
    }

    pub fn classify_sentiment(&self, review_text: &str) -> SentimentLabel {
        SentimentLabel::from_polarity(self.scorer.polarity(review_text))
    }

    pub fn label_reviews<'a>(&self, table: &'a ValidatedTable) -> Vec<LabeledReview<'a>> {
        let mut progress = Progress::new("labeling review sentiment");

        let labeled = table.records().iter()
            .map(|record| {
                let sentiment = self.classify_sentiment(record.review_text());
                progress.update();
                LabeledReview { record, sentiment }
            })
            .collect();

        progress.finish();
        labeled
    }

    /// Positive and negative texts with stopwords removed. Neutral reviews go to neither.
    pub fn build_word_corpora(&self, labeled: &[LabeledReview<'_>]) -> WordCorpora {
        WordCorpora {
            positive_text: self.corpus_for(labeled, SentimentLabel::Positive),
            negative_text: self.corpus_for(labeled, SentimentLabel::Negative),
        }
    }

    pub fn run(&self, table: &RawTable) -> Result<InsightsReport, InsightsError> {
        let table = self.validate(table)?;
        info!("analyzing {} reviews out of {} rows", table.len(), table.total_rows());

        let labeled = self.label_reviews(&table);

        Ok(InsightsReport::builder()
            .total_rows(table.total_rows())
            .valid_reviews(table.len())
            .popularity(rank_popularity(&table))
            .sentiment(tally_sentiment(&labeled))
            .top_words(top_words(table.records().iter().map(|record| record.review_text()), TOP_WORDS))
            .word_corpora(self.build_word_corpora(&labeled))
            .build())
    }

    fn corpus_for(&self, labeled: &[LabeledReview<'_>], sentiment: SentimentLabel) -> String {
        labeled.iter()
            .filter(|review| review.sentiment == sentiment)
            .map(|review| {
                review.record.review_text()
                    .to_lowercase()
                    .split(is_word_separator)
                    .filter(|word| !word.is_empty())
                    .filter(|word| !self.stopwords.contains(word))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Products by number of reviews, most reviewed first. Rows without a product name are not grouped.
pub fn rank_popularity(table: &ValidatedTable) -> Vec<PopularityEntry> {
    let products = table.records().iter().filter_map(|record| record.product_name());

    count_in_encounter_order(products)
        .into_iter()
        .take(TOP_PRODUCTS)
        .map(|(product_name, review_count)| PopularityEntry { product_name, review_count })
        .collect()
}

pub fn tally_sentiment(labeled: &[LabeledReview<'_>]) -> SentimentTally {
    labeled.iter().map(|review| review.sentiment).collect()
}

/// Splits on Unicode whitespace and the ASCII file, group, record and unit separators.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_word_separator).filter(|word| !word.is_empty())
}

fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Most frequent lowercased whitespace tokens across all texts. Punctuation stays attached.
pub fn top_words<'a, I>(review_texts: I, k: usize) -> Vec<WordFrequencyEntry> where I: IntoIterator<Item = &'a str> {
    let lowercased: Vec<String> = review_texts.into_iter().map(|text| text.to_lowercase()).collect();
    let words = lowercased.iter().flat_map(|text| split_words(text));

    count_in_encounter_order(words)
        .into_iter()
        .take(k)
        .map(|(word, count)| WordFrequencyEntry { word, count })
        .collect()
}

// Counts keys, then orders by count descending. The sort is stable, so ties keep first-seen order.
fn count_in_encounter_order<'a, I>(keys: I) -> Vec<(String, u64)> where I: IntoIterator<Item = &'a str> {
    let mut positions: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(String, u64)> = Vec::new();

    for key in keys {
        match positions.get(key) {
            Some(position) => counts[*position].1 += 1,
            None => {
                positions.insert(key, counts.len());
                counts.push((key.to_owned(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::polarity::LexiconPolarityScorer,
    };

    fn table(csv: &str) -> RawTable {
        RawTable::from_csv(csv.as_bytes()).unwrap()
    }

    fn sign_scorer(text: &str) -> f64 {
        let text = text.to_lowercase();
        if text.contains("good") && !text.contains("not") {
            0.5
        } else if text.contains("bad") || text.contains("not") {
            -0.3
        } else {
            0.0
        }
    }

    fn pipeline() -> ReviewInsightsPipeline<fn(&str) -> f64> {
        ReviewInsightsPipeline::new(ColumnsConfig::default(), sign_scorer as fn(&str) -> f64, StopwordSet::english())
    }

    const SCENARIO: &str = "Product Names,Reviews\nA,good product\nA,not good\nB,bad\n";

    #[test]
    fn validate_rejects_missing_product_column() {
        let err = pipeline().validate(&table("Products,Reviews\nA,good\n")).unwrap_err();

        assert_eq!(err, InsightsError::MissingColumns {
            product_column: "Product Names".to_owned(),
            review_column: "Reviews".to_owned(),
            missing: vec!["Product Names".to_owned()],
        });
    }

    #[test]
    fn validate_lists_every_missing_column() {
        let err = pipeline().validate(&table("Name,Text\nA,good\n")).unwrap_err();

        match err {
            InsightsError::MissingColumns { missing, .. } => assert_eq!(missing, vec!["Product Names", "Reviews"]),
        }
    }

    #[test]
    fn run_computes_nothing_when_columns_are_missing() {
        let pipeline = ReviewInsightsPipeline::new(
            ColumnsConfig::default(),
            |_: &str| -> f64 { panic!("scorer must not run") },
            StopwordSet::default(),
        );

        let result = pipeline.run(&table("Products,Reviews\nA,good\n"));
        assert_eq!(result.unwrap_err().status(), crate::error::RunStatus::MissingColumns);
    }

    #[test]
    fn validate_drops_null_reviews_and_ignores_other_columns() {
        let validated = pipeline()
            .validate(&table("Id,Product Names,Reviews\n1,A,good\n2,A,\n3,,fine\n4,B,NaN\n"))
            .unwrap();

        assert_eq!(validated.total_rows(), 4);
        assert_eq!(validated.records(), &[
            ReviewRecord::builder().product_name(Some("A".to_owned())).review_text("good").build(),
            ReviewRecord::builder().review_text("fine").build(),
        ]);
    }

    #[test]
    fn validate_uses_configured_column_names() {
        let pipeline = ReviewInsightsPipeline::new(
            ColumnsConfig::new("Item", "Comment"),
            sign_scorer as fn(&str) -> f64,
            StopwordSet::default(),
        );

        let validated = pipeline.validate(&table("Item,Comment\nA,good\n")).unwrap();
        assert_eq!(validated.len(), 1);
    }

    #[test]
    fn popularity_counts_reviews_per_product() {
        let validated = pipeline().validate(&table(SCENARIO)).unwrap();

        assert_eq!(rank_popularity(&validated), vec![
            PopularityEntry { product_name: "A".to_owned(), review_count: 2 },
            PopularityEntry { product_name: "B".to_owned(), review_count: 1 },
        ]);
    }

    #[test]
    fn popularity_is_top_ten_non_increasing_with_stable_ties() {
        let mut csv = "Product Names,Reviews\n".to_owned();
        for product in 0..14 {
            for _ in 0..(product % 3 + 1) {
                csv.push_str(&format!("P{},ok\n", product));
            }
        }

        let ranking = rank_popularity(&pipeline().validate(&table(&csv)).unwrap());

        assert_eq!(ranking.len(), 10);
        assert!(ranking.windows(2).all(|pair| pair[0].review_count >= pair[1].review_count));
        let names: Vec<&str> = ranking.iter().map(|entry| entry.product_name.as_str()).collect();
        assert_eq!(names, vec!["P2", "P5", "P8", "P11", "P1", "P4", "P7", "P10", "P13", "P0"]);
    }

    #[test]
    fn popularity_skips_rows_without_product() {
        let ranking = rank_popularity(&pipeline().validate(&table("Product Names,Reviews\n,good\nA,bad\n")).unwrap());
        assert_eq!(ranking, vec![PopularityEntry { product_name: "A".to_owned(), review_count: 1 }]);
    }

    #[test]
    fn classify_sentiment_follows_polarity_sign() {
        let pipeline = pipeline();

        assert_eq!(pipeline.classify_sentiment("good product"), SentimentLabel::Positive);
        assert_eq!(pipeline.classify_sentiment("bad"), SentimentLabel::Negative);
        assert_eq!(pipeline.classify_sentiment(""), SentimentLabel::Neutral);
        assert_eq!(pipeline.classify_sentiment("good product"), pipeline.classify_sentiment("good product"));
    }

    #[test]
    fn tally_sums_to_valid_reviews() {
        let pipeline = pipeline();
        let validated = pipeline.validate(&table("Product Names,Reviews\nA,good\nA,\nB,bad\nC,meh\nC,good\n")).unwrap();
        let tally = tally_sentiment(&pipeline.label_reviews(&validated));

        assert_eq!(tally.total(), validated.len() as u64);
        assert_eq!(tally.get(SentimentLabel::Positive), Some(2));
        assert_eq!(tally.get(SentimentLabel::Negative), Some(1));
        assert_eq!(tally.get(SentimentLabel::Neutral), Some(1));
    }

    #[test]
    fn tally_of_all_positive_has_single_label() {
        let pipeline = pipeline();
        let validated = pipeline.validate(&table("Product Names,Reviews\nA,good\nB,so good\n")).unwrap();
        let tally = tally_sentiment(&pipeline.label_reviews(&validated));

        assert_eq!(tally.entries(), vec![(SentimentLabel::Positive, 2)]);
    }

    #[test]
    fn top_words_scenario() {
        let words = top_words(vec!["good product", "not good", "bad"], 2);

        assert_eq!(words, vec![
            WordFrequencyEntry { word: "good".to_owned(), count: 2 },
            WordFrequencyEntry { word: "product".to_owned(), count: 1 },
        ]);
    }

    #[test]
    fn top_words_lowercases_without_stripping_punctuation() {
        let words = top_words(vec!["Great, GREAT great!"], 15);

        assert_eq!(words, vec![
            WordFrequencyEntry { word: "great,".to_owned(), count: 1 },
            WordFrequencyEntry { word: "great".to_owned(), count: 1 },
            WordFrequencyEntry { word: "great!".to_owned(), count: 1 },
        ]);
    }

    #[test]
    fn top_words_is_bounded_and_non_increasing() {
        let texts: Vec<String> = (0..40).map(|i| format!("w{} w{} common", i, i % 7)).collect();
        let words = top_words(texts.iter().map(|text| text.as_str()), TOP_WORDS);

        assert_eq!(words.len(), 15);
        assert_eq!(words[0], WordFrequencyEntry { word: "common".to_owned(), count: 40 });
        assert!(words.windows(2).all(|pair| pair[0].count >= pair[1].count));
        assert!(words.iter().all(|entry| entry.count >= 1));
    }

    #[test]
    fn top_words_of_nothing_is_empty() {
        assert!(top_words(Vec::<&str>::new(), TOP_WORDS).is_empty());
        assert!(top_words(vec!["   "], TOP_WORDS).is_empty());
    }

    #[test]
    fn ascii_separators_split_words() {
        assert_eq!(split_words("good\u{1f}good\u{1c}fine\u{a0}ok").collect::<Vec<_>>(), vec!["good", "good", "fine", "ok"]);
        assert_eq!(top_words(vec!["good\u{1f}good"], TOP_WORDS), vec![
            WordFrequencyEntry { word: "good".to_owned(), count: 2 },
        ]);
    }

    #[test]
    fn word_corpora_split_by_sentiment_without_stopwords() {
        let pipeline = pipeline();
        let validated = pipeline.validate(&table(
            "Product Names,Reviews\nA,The GOOD product\nB,this is bad\nC,meh\nD,good and cheap\n"
        )).unwrap();
        let corpora = pipeline.build_word_corpora(&pipeline.label_reviews(&validated));

        assert_eq!(corpora.positive_text, "good product good cheap");
        assert_eq!(corpora.negative_text, "bad");
    }

    #[test]
    fn word_corpora_are_empty_without_matching_reviews() {
        let pipeline = pipeline();
        let validated = pipeline.validate(&table("Product Names,Reviews\nA,meh\n")).unwrap();
        let corpora = pipeline.build_word_corpora(&pipeline.label_reviews(&validated));

        assert_eq!(corpora, WordCorpora::default());
    }

    #[test]
    fn end_to_end_scenario_with_lexicon_scorer() {
        let pipeline = ReviewInsightsPipeline::new(
            ColumnsConfig::default(),
            LexiconPolarityScorer::english().unwrap(),
            StopwordSet::english(),
        );

        let report = pipeline.run(&table(SCENARIO)).unwrap();

        assert_eq!(report.total_rows(), 3);
        assert_eq!(report.valid_reviews(), 3);
        assert_eq!(report.popularity()[0], PopularityEntry { product_name: "A".to_owned(), review_count: 2 });
        assert_eq!(report.sentiment().total(), 3);
        assert_eq!(report.sentiment().get(SentimentLabel::Positive), Some(1));
        assert_eq!(report.sentiment().get(SentimentLabel::Negative), Some(2));
        assert_eq!(report.top_words()[0], WordFrequencyEntry { word: "good".to_owned(), count: 2 });
        assert_eq!(report.word_corpora().positive_text, "good product");
        assert_eq!(report.word_corpora().negative_text, "good bad");
    }

    #[test]
    fn runs_are_deterministic() {
        let pipeline = ReviewInsightsPipeline::new(
            ColumnsConfig::default(),
            LexiconPolarityScorer::english().unwrap(),
            StopwordSet::english(),
        );
        let input = table("Product Names,Reviews\nA,great value\nB,awful\nC,ok\nB,works great\nC,ok ok\n");

        assert_eq!(pipeline.run(&input).unwrap(), pipeline.run(&input).unwrap());
    }
}
