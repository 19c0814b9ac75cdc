/*!
 * TEI-XML to JSON transcription pipeline.
 *
 * Per document: load, clean up, parse, mark unclear letters, serialize, strip
 * the `unclear` tags, re-parse, resolve hands and siglum, then write one JSON
 * record per verse and finally `metadata.json`. Any error aborts the document.
 *
 * The directory walk (`process_files`) isolates documents: a failed file is
 * logged with its path and the walk goes on.
 */

pub mod document;
pub mod extract;
pub mod normalize;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::TeiConfig;
use crate::errors::ConvertError;
use crate::file_utils::FileManager;
use crate::transcription::{dictify_transcription, witness_record, ManuscriptMetadata, TranscriptionRecord};
use crate::worker_pool;
use crate::writer;

pub use document::{Element, Node};
pub use extract::{ExtractOptions, HandSet, Verse, WitnessReading};

/// Options of one TEI conversion
#[derive(Debug, Clone)]
pub struct TeiOptions {
    /// Only write the verse with this reference
    pub single_verse: Option<String>,
    /// Appended to the siglum as `{siglum}-{suffix}`
    pub siglum_suffix: Option<String>,
    pub firsthand_label: String,
    pub unclear_mark: char,
    pub siglum_strip_suffix: String,
    pub extract: ExtractOptions,
}

impl Default for TeiOptions {
    fn default() -> Self {
        Self::from_config(&TeiConfig::default())
    }
}

impl TeiOptions {
    pub fn from_config(config: &TeiConfig) -> Self {
        Self {
            single_verse: None,
            siglum_suffix: None,
            firsthand_label: config.firsthand_label.clone(),
            unclear_mark: config.unclear_mark,
            siglum_strip_suffix: config.siglum_strip_suffix.clone(),
            extract: ExtractOptions {
                ignored_elements: config.ignored_elements.clone(),
            },
        }
    }

    pub fn with_single_verse(mut self, reference: Option<String>) -> Self {
        self.single_verse = reference.filter(|r| !r.is_empty());
        self
    }

    pub fn with_siglum_suffix(mut self, suffix: Option<String>) -> Self {
        self.siglum_suffix = suffix.filter(|s| !s.is_empty());
        self
    }
}

/// Outcome of converting one document
#[derive(Debug, Clone)]
pub struct TeiConversion {
    pub siglum: String,
    pub manuscript_dir: PathBuf,
    pub verse_files: Vec<PathBuf>,
    pub metadata_file: PathBuf,
}

/// A document ready for verse extraction
#[derive(Debug, Clone)]
pub struct PreparedDocument {
    pub root: Element,
    pub hands: HandSet,
    pub siglum: String,
}

/// Read a TEI document from disk
pub fn load_document(path: &Path) -> Result<String, ConvertError> {
    FileManager::read_to_string(path)
}

/// Run both normalizer passes over raw text and return the final tree
pub fn normalize_document(text: &str, mark: char, path: &Path) -> Result<Element, ConvertError> {
    let text = normalize::pre_parse_cleanup(text);
    let root = document::parse(&text).map_err(|e| ConvertError::from_xml(path, e))?;

    let marked = normalize::add_underdot_to_unclear_letters(&root, mark);
    debug!("{}: unclear letters marked", path.display());

    let serialized = document::serialize(&marked);
    let stripped = normalize::remove_unclear_tags(&serialized);
    debug!("{}: unclear tags stripped", path.display());

    document::parse(&stripped).map_err(|e| ConvertError::from_xml(path, e))
}

/// Normalize, then resolve the hand vocabulary and the siglum once
pub fn prepare_document(text: &str, options: &TeiOptions, path: &Path) -> Result<PreparedDocument, ConvertError> {
    let root = normalize_document(text, options.unclear_mark, path)?;

    let hands = extract::get_hands(&root, &options.firsthand_label);
    debug!("{}: hands {:?}", path.display(), hands.as_slice());

    let mut siglum = extract::get_siglum(&root, &options.siglum_strip_suffix)?;
    if let Some(suffix) = &options.siglum_suffix {
        siglum = format!("{}-{}", siglum, suffix);
    }
    debug!("{}: siglum {}", path.display(), siglum);

    Ok(PreparedDocument { root, hands, siglum })
}

/// Build the record of one verse
pub fn verse_to_record(siglum: &str, verse: &Verse<'_>, hands: &HandSet, options: &ExtractOptions) -> TranscriptionRecord {
    let witnesses = verse
        .witnesses(hands, options)
        .iter()
        .map(|reading| witness_record(siglum, None, &reading.label, &reading.text))
        .collect();
    dictify_transcription(siglum, verse.reference, "", witnesses)
}

/// Verses of a prepared document, restricted to the requested verse if any.
///
/// With a target verse, every other boundary is skipped before extraction.
pub fn selected_verses<'a>(
    prepared: &'a PreparedDocument,
    options: &'a TeiOptions,
) -> impl Iterator<Item = Result<Verse<'a>, ConvertError>> + 'a {
    extract::verses(&prepared.root).filter(move |verse| match (verse, &options.single_verse) {
        (Ok(verse), Some(target)) => verse.reference == target,
        (Err(_), Some(_)) => false,
        (_, None) => true,
    })
}

/// Records of the selected verses of a prepared document
pub fn transcription_records(
    prepared: &PreparedDocument,
    options: &TeiOptions,
) -> Result<Vec<TranscriptionRecord>, ConvertError> {
    selected_verses(prepared, options)
        .map(|verse| verse.map(|v| verse_to_record(&prepared.siglum, &v, &prepared.hands, &options.extract)))
        .collect()
}

/// Convert one TEI document into `{output_dir}/{siglum}/`
pub fn tei_to_json(path: &Path, output_dir: &Path, options: &TeiOptions) -> Result<TeiConversion, ConvertError> {
    let text = load_document(path)?;
    let prepared = prepare_document(&text, options, path)?;
    let manuscript_dir = writer::manuscript_dir(output_dir, &prepared.siglum)?;

    let mut verse_files = Vec::new();
    for verse in selected_verses(&prepared, options) {
        let verse = verse?;
        let record = verse_to_record(&prepared.siglum, &verse, &prepared.hands, &options.extract);
        let verse_path = writer::tei_output_path(&manuscript_dir, verse.reference)?;
        writer::save_tx(&record, &verse_path)?;
        verse_files.push(verse_path);
    }

    if verse_files.is_empty() {
        warn!("{}: no verses written", path.display());
    }

    let metadata = ManuscriptMetadata::new(&prepared.siglum);
    let metadata_file = writer::save_metadata(&metadata, &manuscript_dir)?;

    info!("Converted {} ({} verses)", path.display(), verse_files.len());

    Ok(TeiConversion {
        siglum: prepared.siglum,
        manuscript_dir,
        verse_files,
        metadata_file,
    })
}

/// Summary of a directory walk
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<TeiConversion>,
    pub failed: Vec<(PathBuf, String)>,
}

/// Convert every `.xml` file below `{in_dir}/{suffix}` for each suffix.
///
/// Failures are logged and collected, never returned.
pub async fn process_files(
    in_dir: &Path,
    out_dir: &Path,
    siglum_suffixes: &[String],
    options: &TeiOptions,
    workers: usize,
) -> BatchReport {
    let mut jobs: Vec<(PathBuf, TeiOptions)> = Vec::new();

    for suffix in siglum_suffixes {
        let siglum_in_dir = in_dir.join(suffix);
        match FileManager::find_files(&siglum_in_dir, "xml") {
            Ok(files) => {
                debug!("{}: {} TEI files", siglum_in_dir.display(), files.len());
                let suffix_options = options.clone().with_siglum_suffix(Some(suffix.clone()));
                jobs.extend(files.into_iter().map(|file| (file, suffix_options.clone())));
            }
            Err(e) => warn!("Skipping suffix '{}': {}", suffix, e),
        }
    }

    let paths: Vec<PathBuf> = jobs.iter().map(|(path, _)| path.clone()).collect();
    let progress_bar = file_progress_bar(jobs.len() as u64);
    let pb = progress_bar.clone();
    let out_dir = out_dir.to_path_buf();

    let results = worker_pool::run_blocking_units(
        jobs,
        workers,
        move |(path, options)| tei_to_json(&path, &out_dir, &options),
        move |completed, _total| pb.set_position(completed as u64),
    )
    .await;
    progress_bar.finish_and_clear();

    let mut report = BatchReport::default();
    for (path, result) in paths.into_iter().zip(results) {
        match result {
            Ok(conversion) => report.converted.push(conversion),
            Err(e) => {
                error!("Conversion failed for {}: {}", path.display(), e);
                report.failed.push((path, e.to_string()));
            }
        }
    }

    info!(
        "Finished: {} converted, {} failed",
        report.converted.len(),
        report.failed.len()
    );
    report
}

fn file_progress_bar(len: u64) -> ProgressBar {
    let progress_bar = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress_bar.set_style(style.progress_chars("#>-"));
    progress_bar
}
