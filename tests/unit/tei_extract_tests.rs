/*!
 * Tests for siglum, hand and verse extraction
 */

use anyhow::Result;
use std::path::Path;
use tendon::errors::ConvertError;
use tendon::tei::document::parse;
use tendon::tei::extract::{get_hands, get_siglum, verses, ExtractOptions, HandSet};
use tendon::tei::{prepare_document, transcription_records, TeiOptions};
use crate::common;

fn sample_options() -> TeiOptions {
    TeiOptions::default()
}

#[test]
fn test_get_siglum_withNsSuffix_shouldStripOnlyTheSuffix() -> Result<()> {
    let root = parse(r#"<TEI><title n="ABC-ns"/></TEI>"#)?;
    assert_eq!(get_siglum(&root, "-ns")?, "ABC");

    let root = parse(r#"<TEI><title n="X-nsY"/></TEI>"#)?;
    assert_eq!(get_siglum(&root, "-ns")?, "X-nsY");
    Ok(())
}

#[test]
fn test_get_siglum_withOnlySuffix_shouldBeShapeError() -> Result<()> {
    let root = parse(r#"<TEI><title n="-ns"/></TEI>"#)?;
    assert!(matches!(get_siglum(&root, "-ns"), Err(ConvertError::Shape(_))));
    Ok(())
}

#[test]
fn test_get_hands_withoutRdg_shouldFallBackToFirsthand() -> Result<()> {
    let root = parse(common::PLAIN_TEI)?;
    let hands = get_hands(&root, "firsthand");
    assert_eq!(hands.as_slice(), &["firsthand".to_string()]);
    Ok(())
}

#[test]
fn test_get_hands_withRepeatedHands_shouldKeepFirstSeenOrder() -> Result<()> {
    let root = parse(
        r#"<TEI>
        <ab n="1"><app><rdg hand="corrector"/><rdg hand="firsthand"/></app></ab>
        <ab n="2"><app><rdg hand="firsthand"/><rdg hand="corrector2"/><rdg/></app></ab>
        </TEI>"#,
    )?;
    let hands = get_hands(&root, "firsthand");
    assert_eq!(hands.as_slice(), &["corrector", "firsthand", "corrector2"]);
    Ok(())
}

#[test]
fn test_verses_withAbWithoutN_shouldYieldShapeError() -> Result<()> {
    let root = parse(r#"<TEI><ab n="1">a</ab><ab>b</ab></TEI>"#)?;
    let results: Vec<_> = verses(&root).collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(ConvertError::Shape(_))));
    Ok(())
}

/// Test witness order and the reading chosen inside `app`
#[test]
fn test_witnesses_withSampleTei_shouldFollowFirstEncounterOrder() -> Result<()> {
    let prepared = prepare_document(common::SAMPLE_TEI, &sample_options(), Path::new("sample.xml"))?;
    assert_eq!(prepared.siglum, "P75");
    assert_eq!(prepared.hands.as_slice(), &["firsthand", "corrector"]);

    let verse = verses(&prepared.root).next().expect("first verse")?;
    assert_eq!(verse.reference, "John 1:1");

    let witnesses = verse.witnesses(&prepared.hands, &ExtractOptions::default());
    let labels: Vec<&str> = witnesses.iter().map(|w| w.label.as_str()).collect();
    assert_eq!(labels, vec!["firsthand", "corrector"]);
    assert_eq!(witnesses[0].text, "en arch hn o log\u{0323}os");
    assert_eq!(witnesses[1].text, "en arch ên o log\u{0323}os");
    Ok(())
}

#[test]
fn test_witnesses_withBreaksAndEmptyUnclear_shouldJoinWords() -> Result<()> {
    let prepared = prepare_document(common::SAMPLE_TEI, &sample_options(), Path::new("sample.xml"))?;
    let verse = verses(&prepared.root).nth(1).expect("second verse")?;

    let witnesses = verse.witnesses(&prepared.hands, &ExtractOptions::default());
    assert_eq!(witnesses.len(), 1);
    assert_eq!(witnesses[0].label, "firsthand");
    assert_eq!(witnesses[0].text, "outos hn en arch pros ton theon");
    Ok(())
}

#[test]
fn test_witnesses_withMissingReading_shouldUseFirstHand() -> Result<()> {
    let root = parse(
        r#"<TEI>
        <ab n="1"><app><rdg hand="firsthand">a</rdg><rdg hand="corrector">b</rdg></app>
        c <app><rdg>d</rdg><rdg hand="other">e</rdg></app></ab>
        </TEI>"#,
    )?;
    let hands = HandSet::new(vec!["firsthand".into(), "corrector".into(), "other".into()], "firsthand");
    let verse = verses(&root).next().expect("verse")?;
    let witnesses = verse.witnesses(&hands, &ExtractOptions::default());

    let texts: Vec<(&str, &str)> = witnesses.iter().map(|w| (w.label.as_str(), w.text.as_str())).collect();
    assert_eq!(texts, vec![("firsthand", "a c d"), ("corrector", "b c d"), ("other", "a c e")]);
    Ok(())
}

#[test]
fn test_witnesses_withWordElements_shouldSeparateWords() -> Result<()> {
    let root = parse(r#"<TEI><ab n="1"><w>en</w><w>arch</w><fw>header</fw></ab></TEI>"#)?;
    let hands = get_hands(&root, "firsthand");
    let verse = verses(&root).next().expect("verse")?;
    let witnesses = verse.witnesses(&hands, &ExtractOptions::default());
    assert_eq!(witnesses[0].text, "en arch");
    Ok(())
}

#[test]
fn test_witnesses_withLemma_shouldGiveItToTheFirstHand() -> Result<()> {
    let root = parse(r#"<TEI><ab n="1">a <app><lem>b</lem><rdg hand="c">q</rdg></app> z</ab></TEI>"#)?;
    let hands = get_hands(&root, "firsthand");
    assert_eq!(hands.as_slice(), &["c"]);

    let verse = verses(&root).next().expect("verse")?;
    let witnesses = verse.witnesses(&hands, &ExtractOptions::default());

    let texts: Vec<(&str, &str)> = witnesses.iter().map(|w| (w.label.as_str(), w.text.as_str())).collect();
    assert_eq!(texts, vec![("firsthand", "a b z"), ("c", "a q z")]);
    Ok(())
}

#[test]
fn test_witnesses_withLemmaOfNamedHand_shouldUseThatHand() -> Result<()> {
    let root = parse(
        r#"<TEI><ab n="1"><app><lem hand="firsthand">x</lem><rdg hand="corrector">y</rdg></app></ab></TEI>"#,
    )?;
    let hands = HandSet::new(vec!["firsthand".into(), "corrector".into()], "firsthand");
    let verse = verses(&root).next().expect("verse")?;
    let witnesses = verse.witnesses(&hands, &ExtractOptions::default());

    let texts: Vec<&str> = witnesses.iter().map(|w| w.text.as_str()).collect();
    assert_eq!(texts, vec!["x", "y"]);
    Ok(())
}

/// Test the single verse filter on prepared documents
#[test]
fn test_transcription_records_withSingleVerse_shouldKeepOnlyThatVerse() -> Result<()> {
    let options = sample_options().with_single_verse(Some("John 1:2".to_string()));
    let prepared = prepare_document(common::SAMPLE_TEI, &options, Path::new("sample.xml"))?;

    let records = transcription_records(&prepared, &options)?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].reference, "John 1:2");
    assert_eq!(records[0].witnesses[0].id, "P75--firsthand");
    assert_eq!(records[0].witnesses[0].tokens.len(), 7);
    Ok(())
}

#[test]
fn test_prepare_document_withSiglumSuffix_shouldAppendIt() -> Result<()> {
    let options = sample_options().with_siglum_suffix(Some("ns".to_string()));
    let prepared = prepare_document(common::PLAIN_TEI, &options, Path::new("plain.xml"))?;
    assert_eq!(prepared.siglum, "01-ns");
    Ok(())
}
