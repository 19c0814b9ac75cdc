/*!
 * Output writer for transcription records and manuscript metadata.
 *
 * Existing files are replaced, so re-running a conversion is idempotent.
 */

use log::debug;
use std::path::{Path, PathBuf};

use crate::errors::ConvertError;
use crate::file_utils::FileManager;
use crate::transcription::{ManuscriptMetadata, TranscriptionRecord};

pub const METADATA_FILE_NAME: &str = "metadata.json";

/// Reject names that would escape the output directory
fn checked_file_stem(stem: &str) -> Result<&str, ConvertError> {
    if stem.is_empty() || stem == "." || stem == ".." || stem.contains(['/', '\\']) {
        return Err(ConvertError::Shape(format!(
            "'{}' cannot be used as an output file name",
            stem
        )));
    }
    Ok(stem)
}

/// `{output_dir}/{siglum}-{ref}.json`, the layout of the CSV converter
pub fn csv_output_path(output_dir: &Path, siglum: &str, reference: &str) -> Result<PathBuf, ConvertError> {
    let stem = format!("{}-{}", siglum, reference);
    Ok(output_dir.join(format!("{}.json", checked_file_stem(&stem)?)))
}

/// `{manuscript_dir}/{ref}.json`, the layout of the TEI converter
pub fn tei_output_path(manuscript_dir: &Path, reference: &str) -> Result<PathBuf, ConvertError> {
    Ok(manuscript_dir.join(format!("{}.json", checked_file_stem(reference)?)))
}

/// Per manuscript subdirectory of the TEI converter
pub fn manuscript_dir(output_dir: &Path, siglum: &str) -> Result<PathBuf, ConvertError> {
    Ok(output_dir.join(checked_file_stem(siglum)?))
}

/// Write one verse record to `path`
pub fn save_tx(record: &TranscriptionRecord, path: &Path) -> Result<(), ConvertError> {
    FileManager::write_json(path, record)?;
    debug!("Wrote {} ({} witnesses)", path.display(), record.witnesses.len());
    Ok(())
}

/// Write `metadata.json` into the manuscript directory
pub fn save_metadata(metadata: &ManuscriptMetadata, manuscript_dir: &Path) -> Result<PathBuf, ConvertError> {
    FileManager::ensure_dir(manuscript_dir)?;
    let path = manuscript_dir.join(METADATA_FILE_NAME);
    FileManager::write_json(&path, metadata)?;
    Ok(path)
}
