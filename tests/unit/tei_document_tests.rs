/*!
 * Tests for the TEI tree and the annotation normalizer
 */

use anyhow::Result;
use tendon::errors::XmlError;
use tendon::tei::document::{parse, serialize, Node};
use tendon::tei::normalize::{add_underdot_to_unclear_letters, pre_parse_cleanup, remove_unclear_tags};
use tendon::tei::normalize_document;
use std::path::Path;
use crate::common;

#[test]
fn test_parse_withNamespacedDocument_shouldMatchLocalNames() -> Result<()> {
    let root = parse(r#"<tei:TEI xmlns:tei="http://www.tei-c.org/ns/1.0"><tei:ab n="1">x</tei:ab></tei:TEI>"#)?;
    assert_eq!(root.local_name(), "TEI");
    let ab = root.find_all("ab").next().expect("ab is found by local name");
    assert_eq!(ab.attr("n"), Some("1"));
    assert_eq!(ab.text_content(), "x");
    Ok(())
}

#[test]
fn test_parse_withEntities_shouldUnescapeTextAndAttributes() -> Result<()> {
    let root = parse(r#"<ab n="a&amp;b">1 &lt; 2</ab>"#)?;
    assert_eq!(root.attr("n"), Some("a&b"));
    assert_eq!(root.text_content(), "1 < 2");
    Ok(())
}

#[test]
fn test_parse_withMismatchedTags_shouldFail() {
    assert!(parse("<TEI><ab></TEI>").is_err());
    assert!(parse("<TEI><ab>").is_err());
}

#[test]
fn test_parse_withEmptyInput_shouldBeNoRoot() {
    assert!(matches!(parse(""), Err(XmlError::NoRoot)));
}

#[test]
fn test_parse_withTwoRoots_shouldBeTrailingContent() {
    assert!(matches!(parse("<a/><b/>"), Err(XmlError::TrailingContent(_))));
}

#[test]
fn test_descendants_shouldWalkInDocumentOrderWithoutSelf() -> Result<()> {
    let root = parse("<a><b><c/></b><d/></a>")?;
    let names: Vec<&str> = root.descendants().map(|e| e.local_name()).collect();
    assert_eq!(names, vec!["b", "c", "d"]);
    Ok(())
}

#[test]
fn test_serialize_withParsedTree_shouldReparseToSameTree() -> Result<()> {
    let root = parse(r#"<TEI><ab n="John 1:1">en <w>arch</w><lb/>&amp;</ab></TEI>"#)?;
    let text = serialize(&root);
    assert_eq!(parse(&text)?, root);
    Ok(())
}

#[test]
fn test_pre_parse_cleanup_withWordInternalBreaks_shouldRejoinWords() {
    let text = "<ab>ar<lb break=\"no\"/>\n   ch <cb break='no' n=\"2\"/> ê <pb n=\"3\"/>x</ab>";
    assert_eq!(pre_parse_cleanup(text), "<ab>archê <pb n=\"3\"/>x</ab>");
}

#[test]
fn test_pre_parse_cleanup_withCrLf_shouldCollapseWhitespace() {
    assert_eq!(pre_parse_cleanup("  <ab>\r\n  a \t b\r\n</ab>\n"), "<ab> a b </ab>");
}

#[test]
fn test_pre_parse_cleanup_withSpacedAttributeValue_shouldKeepTagsVerbatim() {
    let text = "<ab n=\"John  1:1\"   type='v'>en   arch</ab>";
    assert_eq!(pre_parse_cleanup(text), "<ab n=\"John  1:1\"   type='v'>en arch</ab>");
}

/// Test the first pass on its own
#[test]
fn test_add_underdot_withNestedUnclear_shouldMarkOnlyUnclearLetters() -> Result<()> {
    let root = parse("<ab>lo<unclear>g <hi>o</hi></unclear>s</ab>")?;
    let marked = add_underdot_to_unclear_letters(&root, '\u{0323}');

    assert_eq!(marked.text_content(), "log\u{0323} o\u{0323}s");
    // the input tree is left untouched
    assert_eq!(root.text_content(), "log os");
    Ok(())
}

#[test]
fn test_add_underdot_withCustomMark_shouldUseIt() -> Result<()> {
    let root = parse("<ab><unclear>ab</unclear></ab>")?;
    let marked = add_underdot_to_unclear_letters(&root, '?');
    assert_eq!(marked.text_content(), "a?b?");
    Ok(())
}

/// Test the second pass on its own
#[test]
fn test_remove_unclear_tags_shouldKeepContent() {
    let text = r#"<ab>lo<unclear reason="damage">g</unclear>os<unclear/><tei:unclear>x</tei:unclear></ab>"#;
    assert_eq!(remove_unclear_tags(text), "<ab>logosx</ab>");
}

#[test]
fn test_remove_unclear_tags_shouldNotTouchSimilarNames() {
    let text = "<ab><unclearness>x</unclearness></ab>";
    assert_eq!(remove_unclear_tags(text), text);
}

/// Test both passes together on the sample document
#[test]
fn test_normalize_document_withSampleTei_shouldLeaveNoUnclearElements() -> Result<()> {
    let root = normalize_document(common::SAMPLE_TEI, '\u{0323}', Path::new("sample.xml"))?;

    assert_eq!(root.find_all("unclear").count(), 0);
    let first = root.find_all("ab").next().expect("first verse");
    let has_marked_text = first
        .children
        .iter()
        .any(|node| matches!(node, Node::Text(text) if text.contains("g\u{0323}os")));
    assert!(has_marked_text);
    Ok(())
}
