use {
    std::{fs::File, path::Path},
    anyhow::{Context, Result},
    indicatif::{ProgressBar, ProgressStyle},
    tracing::info,
    review_insights_core::table::RawTable,
};

pub fn load_data_file(path: &Path) -> Result<RawTable> {
    info!("loading file: {}", path.display());

    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let size = file.metadata()?.len();

    let pb = ProgressBar::new(size);
    pb.set_style(ProgressStyle::with_template("loading reviews: {bytes}/{total_bytes} [{bytes_per_sec}]")?);

    let table = RawTable::from_csv(pb.wrap_read(file))
        .with_context(|| format!("failed to decode {}", path.display()))?;
    pb.finish_and_clear();

    info!("loaded {} rows with {} columns", table.len(), table.headers().len());

    Ok(table)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        std::fs,
        tempfile::tempdir,
    };

    #[test]
    fn loads_csv_from_disk() {
        let tmp = tempdir().expect("create temp dir");
        let path = tmp.path().join("reviews.csv");
        fs::write(&path, "Product Names,Reviews\nA,good product\nB,\n").unwrap();

        let table = load_data_file(&path).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1][1], None);
    }

    #[test]
    fn missing_file_is_an_error() {
        let tmp = tempdir().expect("create temp dir");
        let err = load_data_file(&tmp.path().join("absent.csv")).unwrap_err();

        assert!(err.to_string().contains("failed to open"));
    }

    #[test]
    fn malformed_csv_is_an_error() {
        let tmp = tempdir().expect("create temp dir");
        let path = tmp.path().join("broken.csv");
        fs::write(&path, "Product Names,Reviews\nA,good,extra\n").unwrap();

        assert!(load_data_file(&path).is_err());
    }
}
