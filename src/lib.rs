/*!
 * # tendon - transcription converters for textual criticism
 *
 * Converts philological transcription data into a JSON transcription schema:
 *
 * - CSV tables of collated verse witnesses, one row per witness reading
 * - TEI-XML manuscript transcriptions, one file per manuscript
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `tei`: TEI pipeline:
 *   - `tei::document`: owned XML tree, parsing and serialization
 *   - `tei::normalize`: unclear letter marking and tag stripping
 *   - `tei::extract`: siglum, hands, verses and witness texts
 * - `verse_table`: CSV pipeline
 * - `transcription`: JSON schema, tokenizer and record assembly
 * - `writer`: output layout and JSON files
 * - `worker_pool`: bounded parallel execution of independent units
 * - `app_config`: Configuration management
 * - `cli`: arguments and runners shared by the binaries
 * - `file_utils`: File system operations
 * - `logger`: stderr logger used by the binaries
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod cli;
pub mod errors;
pub mod file_utils;
pub mod logger;
pub mod tei;
pub mod transcription;
pub mod verse_table;
pub mod worker_pool;
pub mod writer;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{ConvertError, XmlError};
pub use tei::{tei_to_json, TeiOptions};
pub use transcription::{ManuscriptMetadata, Token, TranscriptionRecord, WitnessRecord};
pub use verse_table::csv_to_json;
