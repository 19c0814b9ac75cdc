/*!
 * JSON transcription schema.
 *
 * One `TranscriptionRecord` is written per verse. Each record lists its
 * witnesses in the order they were first met, and each witness carries its
 * whitespace-split tokens with ids derived from the witness key and the
 * 1-based token position, so ids are stable across re-runs.
 */

use serde::{Deserialize, Serialize};

/// A single word of a witness
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// `{witness-key}-{position}`
    pub id: String,

    /// Surface form, exactly as it appeared in the witness text
    pub text: String,
}

/// One witness reading of a verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessRecord {
    /// `{siglum}-{lection}-{label}`, the lection may be empty
    pub id: String,

    pub tokens: Vec<Token>,
}

/// Output unit, one per verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionRecord {
    pub id: String,
    pub siglum: String,
    #[serde(rename = "ref")]
    pub reference: String,
    /// Always empty here, filled by a later enrichment step
    pub plain_tx: String,
    pub witnesses: Vec<WitnessRecord>,
}

/// Manuscript level metadata, one per converted document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManuscriptMetadata {
    pub id: String,
    pub siglum: String,
}

impl ManuscriptMetadata {
    pub fn new(siglum: &str) -> Self {
        Self {
            id: siglum.to_string(),
            siglum: siglum.to_string(),
        }
    }
}

/// Split `text` on whitespace into tokens numbered from 1
pub fn words_to_tokens(text: &str, witness_key: &str) -> Vec<Token> {
    text.split_whitespace()
        .enumerate()
        .map(|(index, word)| Token {
            id: format!("{}-{}", witness_key, index + 1),
            text: word.to_string(),
        })
        .collect()
}

/// Key used to number the tokens of a witness
pub fn witness_key(siglum: &str, label: &str) -> String {
    format!("{}-{}", siglum, label)
}

/// Build a witness entry: composite id plus tokens
pub fn witness_record(siglum: &str, lection: Option<&str>, label: &str, text: &str) -> WitnessRecord {
    WitnessRecord {
        id: format!("{}-{}-{}", siglum, lection.unwrap_or_default(), label),
        tokens: words_to_tokens(text, &witness_key(siglum, label)),
    }
}

/// Assemble the record for one verse, keeping the witness order given
pub fn dictify_transcription(
    siglum: &str,
    reference: &str,
    plain_tx: &str,
    witnesses: Vec<WitnessRecord>,
) -> TranscriptionRecord {
    TranscriptionRecord {
        id: siglum.to_string(),
        siglum: siglum.to_string(),
        reference: reference.to_string(),
        plain_tx: plain_tx.to_string(),
        witnesses,
    }
}
