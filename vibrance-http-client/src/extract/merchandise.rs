//! Purchased merchandise section

use super::{ProfileDocument, qualifying_blocks};
use crate::dom::{self, CELL, IMAGE, PARAGRAPH, ROW};
use crate::error::VibranceError;
use crate::model::MerchandiseRecord;
use reqwest::Url;
use scraper::ElementRef;

const MERCHANDISE_SECTION: usize = 1;

/// Extract the user's merchandise orders in page order
///
/// Every field of a qualifying block is read independently; a missing row,
/// cell or image only blanks that field.
///
/// # Errors
///
/// Returns `VibranceError::UnexpectedDocumentStructure` if the page has fewer
/// than two category sections.
pub fn extract_merchandise(
    document: &ProfileDocument,
) -> Result<Vec<MerchandiseRecord>, VibranceError> {
    let section = document.category_section(MERCHANDISE_SECTION, "merchandise section")?;

    let items: Vec<MerchandiseRecord> = qualifying_blocks(section)
        .map(|block| parse_item(block, document.url()))
        .collect();

    tracing::debug!(count = items.len(), "extracted merchandise");
    Ok(items)
}

fn parse_item(block: ElementRef<'_>, page_url: &Url) -> MerchandiseRecord {
    let mut rows = block.select(&ROW);
    let heading = rows.next();
    let details = rows.next();
    let detail = |n: usize| details.and_then(|row| row.select(&CELL).nth(n));

    MerchandiseRecord {
        name: heading
            .and_then(|row| row.select(&PARAGRAPH).next())
            .map(dom::trimmed_text),
        image: image_url(block, page_url),
        size: detail(0).map(dom::trimmed_text),
        quantity: detail(1)
            .and_then(|cell| dom::parse_leading_float(&dom::text(cell)))
            .unwrap_or(0.0),
        status: detail(2).map(dom::trimmed_text),
    }
}

/// The block's image, resolved against the profile page URL
fn image_url(block: ElementRef<'_>, page_url: &Url) -> Option<String> {
    let src = block.select(&IMAGE).next()?.value().attr("src")?.trim();
    match page_url.join(src) {
        Ok(url) => Some(url.into()),
        Err(e) => {
            tracing::warn!(src, error = %e, "unresolvable merchandise image");
            None
        }
    }
}
