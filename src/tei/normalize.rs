/*!
 * Annotation normalizer.
 *
 * Unclear letters are marked in two passes. The first pass works on the tree
 * and appends the unclear mark to every letter inside an `unclear` element.
 * The tree is then serialized and the second pass strips the `unclear` tags
 * from the text, after which the caller re-parses. The passes are pure so each
 * can be checked on its own.
 */

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::document::{Element, Node};

// @const: Breaks inside a word, `<lb break="no"/>` and friends, with surrounding whitespace
static WORD_INTERNAL_BREAK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\s*<(?:[\w.-]+:)?(?:lb|cb|pb)\b[^>]*\bbreak\s*=\s*["']no["'][^>]*/>\s*"#).unwrap()
});

// @const: A whole tag, or a run of whitespace between tags
static TAG_OR_WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(<[^>]*>)|\s+").unwrap());

// @const: Opening, closing and empty `unclear` tags
static UNCLEAR_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?(?:[\w.-]+:)?unclear\b[^>]*>").unwrap()
});

/// Text level cleanup applied before the first parse.
///
/// Line endings are normalized, words split by a non-breaking line, column or
/// page break are rejoined, and whitespace runs in text collapse to one space.
/// Tags, attribute values included, are copied unchanged.
pub fn pre_parse_cleanup(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let text = WORD_INTERNAL_BREAK_REGEX.replace_all(&text, "");
    TAG_OR_WHITESPACE_REGEX
        .replace_all(&text, |caps: &Captures| match caps.get(1) {
            Some(tag) => tag.as_str().to_string(),
            None => " ".to_string(),
        })
        .trim()
        .to_string()
}

/// First pass: a copy of `root` where every non-whitespace character inside
/// an `unclear` element is followed by `mark`.
pub fn add_underdot_to_unclear_letters(root: &Element, mark: char) -> Element {
    mark_element(root, mark, false)
}

fn mark_element(element: &Element, mark: char, inside_unclear: bool) -> Element {
    let inside_unclear = inside_unclear || element.local_name() == "unclear";
    let children = element
        .children
        .iter()
        .map(|node| match node {
            Node::Text(text) if inside_unclear => Node::Text(underdot(text, mark)),
            Node::Text(text) => Node::Text(text.clone()),
            Node::Element(child) => Node::Element(mark_element(child, mark, inside_unclear)),
        })
        .collect();

    Element {
        name: element.name.clone(),
        attributes: element.attributes.clone(),
        children,
    }
}

fn underdot(text: &str, mark: char) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        out.push(c);
        if !c.is_whitespace() {
            out.push(mark);
        }
    }
    out
}

/// Second pass: drop the `unclear` tags from serialized markup, keeping their content
pub fn remove_unclear_tags(text: &str) -> String {
    UNCLEAR_TAG_REGEX.replace_all(text, "").into_owned()
}
