//! Registered events section

use super::{ProfileDocument, qualifying_blocks};
use crate::dom::{self, CELL, PARAGRAPH, ROW};
use crate::error::VibranceError;
use crate::model::EventRecord;
use scraper::ElementRef;

const EVENTS_SECTION: usize = 0;

/// Extract the user's event registrations in page order
///
/// Each qualifying block is a two-row table: the first row's first cell holds
/// the title followed by metadata paragraphs (the last one is `label:order id`),
/// the second row holds location, date, time and payment status.
///
/// # Errors
///
/// Returns `VibranceError::UnexpectedDocumentStructure` if the page has no
/// category sections.
pub fn extract_events(document: &ProfileDocument) -> Result<Vec<EventRecord>, VibranceError> {
    let section = document.category_section(EVENTS_SECTION, "events section")?;

    let events: Vec<EventRecord> = qualifying_blocks(section)
        .enumerate()
        .filter_map(|(index, block)| {
            let event = parse_event(block);
            if event.is_none() {
                tracing::warn!(index, "skipping event block with missing rows or cells");
            }
            event
        })
        .collect();

    tracing::debug!(count = events.len(), "extracted events");
    Ok(events)
}

fn parse_event(block: ElementRef<'_>) -> Option<EventRecord> {
    let mut rows = block.select(&ROW);
    let heading = rows.next()?.select(&CELL).next()?;
    let details: Vec<ElementRef<'_>> = rows.next()?.select(&CELL).take(4).collect();
    let [location, date, time, payment] = details.as_slice() else {
        return None;
    };

    Some(EventRecord {
        order_id: order_id(heading),
        title: title(heading),
        location: dom::trimmed_text(*location),
        date: dom::trimmed_text(*date),
        time: dom::trimmed_text(*time),
        is_paid: is_paid(*payment),
    })
}

/// Leading text of the heading cell, before any metadata paragraph
fn title(heading: ElementRef<'_>) -> String {
    dom::first_child_text(heading)
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

/// Order number from the last metadata paragraph, e.g. `Order ID:1042`
///
/// Zero is treated the same as an unreadable id.
fn order_id(heading: ElementRef<'_>) -> Option<i64> {
    let metadata = dom::text(heading.select(&PARAGRAPH).last()?);
    metadata
        .split(':')
        .nth(1)
        .and_then(dom::parse_leading_int)
        .filter(|id| *id != 0)
}

/// Substring match on "paid"; an "Unpaid" cell also counts as paid
fn is_paid(cell: ElementRef<'_>) -> bool {
    dom::text(cell).to_lowercase().contains("paid")
}
