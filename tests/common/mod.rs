/*!
 * Common test utilities for the tendon test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Route library logs to the test output, safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A small TEI transcription with two verses, a correction and an unclear letter
pub const SAMPLE_TEI: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TEI xmlns="http://www.tei-c.org/ns/1.0">
  <teiHeader>
    <fileDesc>
      <titleStmt>
        <title type="document" n="P75-ns">Papyrus 75</title>
      </titleStmt>
    </fileDesc>
  </teiHeader>
  <text>
    <body>
      <ab n="John 1:1">en arch
        <app>
          <rdg type="orig" hand="firsthand">hn</rdg>
          <rdg type="corr" hand="corrector">ên</rdg>
        </app>
        o lo<unclear>g</unclear>os<note type="editorial">margin</note>
      </ab>
      <ab n="John 1:2">outos hn en ar<lb break="no"/>
        ch<unclear reason="damage"/> pros ton <pb n="2r"/>theon</ab>
    </body>
  </text>
</TEI>
"#;

/// A TEI transcription without any `hand` attribute
pub const PLAIN_TEI: &str = r#"<TEI><teiHeader><title n="01">Sinaiticus</title></teiHeader>
<text><body><ab n="B04K1V1">in the beginning</ab><ab n="B04K1V2">was the word</ab></body></text></TEI>"#;

/// Rows from the two-witness example plus a second verse
pub const SAMPLE_CSV: &str = "ga,lection,nkv,witness,text,source\n\
P75,,Luke.1.1,A,in the beginning,igntp\n\
P75,,Luke.1.1,B,at first,igntp\n\
P75,,Luke.1.2,A,and the word,igntp\n";
