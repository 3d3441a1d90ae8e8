use {
    std::io::{self, Stdout, Write},
    anyhow::Result,
    super::{Artifact, Renderer, View, PREVIEW_ROWS},
};

const BAR_WIDTH: u64 = 40;
const MAX_LABEL_WIDTH: usize = 30;

/// Plain text charts, one section per view.
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl TerminalRenderer<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn bars<'a, I>(&mut self, rows: I) -> io::Result<()> where I: IntoIterator<Item = (&'a str, u64)> {
        let rows: Vec<(String, u64)> = rows.into_iter().map(|(label, value)| (truncate(label), value)).collect();
        let label_width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
        let max = rows.iter().map(|(_, value)| *value).max().unwrap_or(0);

        for (label, value) in &rows {
            writeln!(self.out, "{:<width$} {} {}", label, bar(*value, max), value, width = label_width)?;
        }

        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn name(&self) -> &'static str {
        "terminal"
    }

    fn render(&mut self, view: &View<'_>) -> Result<Option<Artifact>> {
        writeln!(self.out, "\n== {} ==", view.title())?;

        match view {
            View::Preview(table) => {
                writeln!(self.out, "{}", table.headers().iter().map(|v| truncate(v)).collect::<Vec<_>>().join(" | "))?;
                for row in table.head(PREVIEW_ROWS) {
                    let cells: Vec<String> = row.iter().map(|cell| truncate(cell.as_deref().unwrap_or("NaN"))).collect();
                    writeln!(self.out, "{}", cells.join(" | "))?;
                }
                writeln!(self.out, "({} rows)", table.len())?;
            },
            View::Popularity(entries) => {
                self.bars(entries.iter().map(|entry| (entry.product_name.as_str(), entry.review_count)))?;
            },
            View::Sentiment(tally) => {
                let total = tally.total();
                for (label, count) in tally.entries() {
                    let percent = if total > 0 { count as f64 * 100.0 / total as f64 } else { 0.0 };
                    writeln!(self.out, "{:<8} {} {:.1}% ({})", label.as_str(), bar(count, total), percent, count)?;
                }
            },
            View::Words(entries) => {
                self.bars(entries.iter().map(|entry| (entry.word.as_str(), entry.count)))?;
            },
            View::WordCorpora(corpora) => {
                writeln!(self.out, "positive reviews: {} words", corpora.positive_text.split_whitespace().count())?;
                writeln!(self.out, "negative reviews: {} words", corpora.negative_text.split_whitespace().count())?;
            },
        }

        self.out.flush()?;

        Ok(Some(Artifact {
            view: view.name(),
            renderer: self.name(),
            location: None,
        }))
    }
}

fn bar(value: u64, max: u64) -> String {
    if max == 0 || value == 0 {
        return String::new();
    }

    let width = (value * BAR_WIDTH / max).max(1);
    "#".repeat(width as usize)
}

fn truncate(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_WIDTH {
        label.to_owned()
    } else {
        let mut truncated: String = label.chars().take(MAX_LABEL_WIDTH - 3).collect();
        truncated.push_str("...");
        truncated
    }
}
