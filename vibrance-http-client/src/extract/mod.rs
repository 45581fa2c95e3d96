//! Extraction of typed records from the profile page
//!
//! Each extractor is a free function over a borrowed [`ProfileDocument`], so
//! one fetched page can feed any number of them.

mod events;
mod merchandise;
mod profile;

pub use events::extract_events;
pub use merchandise::extract_merchandise;
pub use profile::extract_profile;

use crate::dom::{self, CATEGORY, MODAL_BODY, TABLE};
use crate::error::VibranceError;
use reqwest::Url;
use scraper::{ElementRef, Html};

/// Parsed HTML of the profile page plus the URL it was served from
pub struct ProfileDocument {
    html: Html,
    url: Url,
}

impl ProfileDocument {
    /// Parse a profile page body
    ///
    /// Parsing is lenient and never fails; missing structure is reported by
    /// the extractors instead.
    pub fn parse(body: &str, url: Url) -> Self {
        Self {
            html: Html::parse_document(body),
            url,
        }
    }

    /// The parsed tree
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// URL relative links on the page resolve against
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The `index`-th category section in document order
    fn category_section(
        &self,
        index: usize,
        what: &'static str,
    ) -> Result<ElementRef<'_>, VibranceError> {
        self.html
            .select(&CATEGORY)
            .nth(index)
            .ok_or(VibranceError::UnexpectedDocumentStructure(what))
    }
}

/// Modal-body blocks of a category section that hold an actual entry
///
/// Placeholder blocks carry no table and are skipped.
fn qualifying_blocks<'a>(section: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    section
        .select(&MODAL_BODY)
        .filter(|block| dom::contains(*block, &TABLE))
}

#[cfg(test)]
pub(crate) fn fixture(body: &str) -> ProfileDocument {
    ProfileDocument::parse(
        body,
        Url::parse("http://vitchennaievents.com/vibrance/profile/").unwrap(),
    )
}
