/*!
 * Verse extraction from a normalized TEI tree.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::document::{Element, Node};
use crate::errors::ConvertError;

// @const: Runs of whitespace inside a witness text
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// @const: Elements that separate words without carrying text
const BREAK_ELEMENTS: [&str; 3] = ["lb", "cb", "pb"];

// @const: Children of `app` that carry a reading
const READING_ELEMENTS: [&str; 2] = ["lem", "rdg"];

fn is_reading(element: &Element) -> bool {
    READING_ELEMENTS.iter().any(|r| *r == element.local_name())
}

/// Hand vocabulary of a document, computed once before any verse is read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandSet {
    hands: Vec<String>,
    firsthand: String,
}

impl HandSet {
    /// Never empty: falls back to `firsthand` when `hands` is
    pub fn new(hands: Vec<String>, firsthand: &str) -> Self {
        let hands = if hands.is_empty() { vec![firsthand.to_string()] } else { hands };
        Self {
            hands,
            firsthand: firsthand.to_string(),
        }
    }

    pub fn first(&self) -> &str {
        &self.hands[0]
    }

    /// Hand of a reading, defaulting to the first declared hand
    pub fn resolve<'a>(&'a self, hand: Option<&'a str>) -> &'a str {
        match hand {
            Some(hand) if !hand.is_empty() => hand,
            _ => self.first(),
        }
    }

    /// Hand of a `rdg` or `lem`; a `lem` without `hand` is the first hand's text
    pub fn resolve_reading<'a>(&'a self, reading: &'a Element) -> &'a str {
        match reading.attr("hand") {
            Some(hand) if !hand.is_empty() => hand,
            _ if reading.local_name() == "lem" => &self.firsthand,
            _ => self.first(),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.hands
    }
}

/// Settings for turning a verse into witness texts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Local names of elements dropped together with their content
    pub ignored_elements: Vec<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            ignored_elements: vec!["note".to_string(), "fw".to_string()],
        }
    }
}

/// The text of a verse as one witness read it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WitnessReading {
    pub label: String,
    pub text: String,
}

/// A verse boundary element and its reference
#[derive(Debug, Clone, Copy)]
pub struct Verse<'a> {
    pub reference: &'a str,
    element: &'a Element,
}

/// Siglum from the first `title` with a non-empty `n`, without `strip_suffix`
pub fn get_siglum(root: &Element, strip_suffix: &str) -> Result<String, ConvertError> {
    let n = root
        .find_all("title")
        .filter_map(|title| title.attr("n"))
        .find(|n| !n.trim().is_empty())
        .ok_or_else(|| ConvertError::Shape("no title element with an 'n' attribute".to_string()))?
        .trim();

    let siglum = match n.strip_suffix(strip_suffix) {
        Some(stripped) if !strip_suffix.is_empty() => stripped,
        _ => n,
    };

    if siglum.is_empty() {
        return Err(ConvertError::Shape(format!("title 'n' attribute '{}' leaves an empty siglum", n)));
    }
    Ok(siglum.to_string())
}

/// Distinct `hand` attributes of all readings in document order
pub fn get_hands(root: &Element, firsthand: &str) -> HandSet {
    let mut hands: Vec<String> = Vec::new();
    for rdg in root.find_all("rdg") {
        if let Some(hand) = rdg.attr("hand").filter(|h| !h.is_empty()) {
            if !hands.iter().any(|h| h == hand) {
                hands.push(hand.to_string());
            }
        }
    }
    HandSet::new(hands, firsthand)
}

/// Verse boundaries (`ab` elements) in document order.
///
/// Each call walks the tree afresh. An `ab` without `n` yields a shape error.
pub fn verses(root: &Element) -> impl Iterator<Item = Result<Verse<'_>, ConvertError>> + '_ {
    root.find_all("ab").map(|element| match element.attr("n") {
        Some(reference) if !reference.trim().is_empty() => Ok(Verse {
            reference: reference.trim(),
            element,
        }),
        _ => Err(ConvertError::Shape("'ab' element without an 'n' attribute".to_string())),
    })
}

impl<'a> Verse<'a> {
    /// Witness labels in the order their readings (`rdg` or `lem`) first appear
    pub fn witness_labels(&self, hands: &HandSet) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        for reading in self.element.descendants().filter(|e| is_reading(e)) {
            let label = hands.resolve_reading(reading);
            if !labels.iter().any(|l| l == label) {
                labels.push(label.to_string());
            }
        }
        if labels.is_empty() {
            labels.push(hands.first().to_string());
        }
        labels
    }

    /// One reading per witness, in first-encounter order
    pub fn witnesses(&self, hands: &HandSet, options: &ExtractOptions) -> Vec<WitnessReading> {
        self.witness_labels(hands)
            .into_iter()
            .map(|label| {
                let mut raw = String::new();
                collect_witness_text(self.element, &label, hands, options, &mut raw);
                let text = WHITESPACE_REGEX.replace_all(&raw, " ").trim().to_string();
                WitnessReading { label, text }
            })
            .collect()
    }
}

fn collect_witness_text(
    element: &Element,
    label: &str,
    hands: &HandSet,
    options: &ExtractOptions,
    out: &mut String,
) {
    for node in &element.children {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(child) => {
                let name = child.local_name();
                if options.ignored_elements.iter().any(|ignored| ignored == name) {
                    continue;
                }
                if BREAK_ELEMENTS.iter().any(|b| *b == name) {
                    out.push(' ');
                } else if name == "app" {
                    if let Some(rdg) = select_reading(child, label, hands) {
                        collect_witness_text(rdg, label, hands, options, out);
                    }
                } else if name == "w" {
                    collect_witness_text(child, label, hands, options, out);
                    out.push(' ');
                } else {
                    collect_witness_text(child, label, hands, options, out);
                }
            }
        }
    }
}

/// Reading of `label` inside an `app`, else the first hand's, else the first one
fn select_reading<'a>(app: &'a Element, label: &str, hands: &HandSet) -> Option<&'a Element> {
    let readings: Vec<&Element> = app.child_elements().filter(|e| is_reading(e)).collect();

    readings
        .iter()
        .find(|reading| hands.resolve_reading(reading) == label)
        .or_else(|| readings.iter().find(|reading| hands.resolve_reading(reading) == hands.first()))
        .or_else(|| readings.first())
        .copied()
}
