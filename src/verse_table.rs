/*!
 * CSV to JSON conversion of collated verse witnesses.
 *
 * Each CSV row is one witness reading. Rows are grouped by `(ga, nkv)` in the
 * order groups first appear, and every group becomes one
 * `{ga}-{nkv}.json` file. Groups are written in parallel; when any of them
 * fails, the first failure (in group order) is returned once all groups have
 * finished, and files already written stay on disk.
 */

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::errors::ConvertError;
use crate::file_utils::FileManager;
use crate::transcription::{dictify_transcription, witness_record, TranscriptionRecord};
use crate::worker_pool;
use crate::writer;

// @const: Columns every input table must provide
pub const REQUIRED_COLUMNS: [&str; 6] = ["ga", "lection", "nkv", "witness", "text", "source"];

/// One witness reading, other columns are ignored
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerseRow {
    /// Manuscript siglum
    pub ga: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub lection: Option<String>,
    /// Verse reference
    pub nkv: String,
    pub witness: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub source: Option<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

/// All readings of one verse of one manuscript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseGroup {
    pub ga: String,
    pub nkv: String,
    pub rows: Vec<VerseRow>,
}

impl VerseGroup {
    /// Record with one witness per row, in row order
    pub fn to_record(&self) -> TranscriptionRecord {
        let witnesses = self
            .rows
            .iter()
            .map(|row| witness_record(&self.ga, row.lection.as_deref(), &row.witness, &row.text))
            .collect();
        dictify_transcription(&self.ga, &self.nkv, "", witnesses)
    }
}

/// Parse CSV rows from any reader; `origin` names the input in errors
pub fn read_rows<R: Read>(reader: R, origin: &Path) -> Result<Vec<VerseRow>, ConvertError> {
    let parse_error = |message: String| ConvertError::Parse {
        path: origin.to_path_buf(),
        message,
    };

    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = csv_reader.headers().map_err(|e| parse_error(e.to_string()))?.clone();

    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(ConvertError::Shape(format!(
            "{} has no '{}' column",
            origin.display(),
            missing
        )));
    }

    let mut rows = Vec::new();
    for result in csv_reader.deserialize::<VerseRow>() {
        rows.push(result.map_err(|e| parse_error(e.to_string()))?);
    }
    Ok(rows)
}

/// Load all rows of a CSV file
pub fn load_rows(path: &Path) -> Result<Vec<VerseRow>, ConvertError> {
    let text = FileManager::read_to_string(path)?;
    read_rows(text.as_bytes(), path)
}

/// Group rows by `(ga, nkv)`, groups in first-appearance order
pub fn group_rows(rows: Vec<VerseRow>) -> Vec<VerseGroup> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut groups: Vec<VerseGroup> = Vec::new();

    for row in rows {
        let key = (row.ga.clone(), row.nkv.clone());
        match index.get(&key) {
            Some(&position) => groups[position].rows.push(row),
            None => {
                index.insert(key, groups.len());
                groups.push(VerseGroup {
                    ga: row.ga.clone(),
                    nkv: row.nkv.clone(),
                    rows: vec![row],
                });
            }
        }
    }
    groups
}

/// Write one group to `{output_dir}/{ga}-{nkv}.json`
pub fn process_group(group: &VerseGroup, output_dir: &Path) -> Result<PathBuf, ConvertError> {
    let path = writer::csv_output_path(output_dir, &group.ga, &group.nkv)?;
    writer::save_tx(&group.to_record(), &path)?;
    Ok(path)
}

/// Write every group with up to `threads` workers, 0 meaning one per CPU.
///
/// All groups run to completion; the first error in group order is returned.
pub async fn process_in_parallel(
    groups: Vec<VerseGroup>,
    output_dir: &Path,
    threads: usize,
) -> Result<Vec<PathBuf>, ConvertError> {
    FileManager::ensure_dir(output_dir)?;

    let progress_bar = ProgressBar::new(groups.len() as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} verses {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress_bar.set_style(style.progress_chars("#>-"));
    let pb = progress_bar.clone();

    let output_dir = output_dir.to_path_buf();
    let results = worker_pool::run_blocking_units(
        groups,
        threads,
        move |group| process_group(&group, &output_dir),
        move |completed, _total| pb.set_position(completed as u64),
    )
    .await;
    progress_bar.finish_and_clear();

    results.into_iter().collect()
}

/// Read `input_file` and write one JSON file per verse group into `output_dir`
pub async fn csv_to_json(input_file: &Path, output_dir: &Path, threads: usize) -> Result<Vec<PathBuf>, ConvertError> {
    let rows = load_rows(input_file)?;
    let groups = group_rows(rows);
    debug!("{}: {} verse groups", input_file.display(), groups.len());

    let written = process_in_parallel(groups, output_dir, threads).await?;
    info!("Wrote {} files to {}", written.len(), output_dir.display());
    Ok(written)
}
