//! Tree-query helpers shared by the extractors
//!
//! The upstream markup is positional (row N, cell M), so the extractors only
//! need a handful of selectors and a few ways of reading text back out.

use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

pub(crate) static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
pub(crate) static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
pub(crate) static LABEL_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td, th").unwrap());
pub(crate) static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());
pub(crate) static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").unwrap());
pub(crate) static IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());
pub(crate) static MODAL_BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".modal-body").unwrap());
pub(crate) static CATEGORY: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".mai").unwrap());
pub(crate) static DETAILS_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".card2").unwrap());

static LEADING_INT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*([+-]?\d+)").unwrap());
static LEADING_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").unwrap()
});

/// Concatenated text of an element and all its descendants
pub(crate) fn text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Text content with surrounding whitespace removed
pub(crate) fn trimmed_text(element: ElementRef<'_>) -> String {
    text(element).trim().to_string()
}

/// Text of the element's first child node, whatever kind of node it is
///
/// For a cell like `<td>Title<p>meta</p></td>` this is the leading `Title`
/// text node, without the nested paragraphs.
pub(crate) fn first_child_text(element: ElementRef<'_>) -> Option<String> {
    let child = element.first_child()?;
    match child.value() {
        Node::Text(t) => Some(String::from(&**t)),
        Node::Element(_) => ElementRef::wrap(child).map(text),
        _ => Some(String::new()),
    }
}

/// Whether `element` has a descendant matching `selector`
pub(crate) fn contains(element: ElementRef<'_>, selector: &Selector) -> bool {
    element.select(selector).next().is_some()
}

/// Parse the integer at the start of `s`, ignoring anything after it
pub(crate) fn parse_leading_int(s: &str) -> Option<i64> {
    LEADING_INT.captures(s)?.get(1)?.as_str().parse().ok()
}

/// Parse the decimal number at the start of `s`, ignoring anything after it
pub(crate) fn parse_leading_float(s: &str) -> Option<f64> {
    LEADING_FLOAT.captures(s)?.get(1)?.as_str().parse().ok()
}
