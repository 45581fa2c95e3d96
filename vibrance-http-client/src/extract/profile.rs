//! Personal details table

use super::ProfileDocument;
use crate::dom::{self, DETAILS_TABLE, LABEL_CELL, ROW};
use crate::error::VibranceError;
use crate::model::ProfileRecord;
use scraper::ElementRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProfileField {
    Id,
    Name,
    Email,
    Mobile,
    College,
}

/// Label fragments in match priority order; the first hit wins
const LABELS: [(&str, ProfileField); 5] = [
    ("id", ProfileField::Id),
    ("name", ProfileField::Name),
    ("email", ProfileField::Email),
    ("ph no", ProfileField::Mobile),
    ("college", ProfileField::College),
];

/// Extract the user's personal details
///
/// The upstream renders each label and its value as two consecutive rows of
/// the `.card2` table. A row whose label matches one of the known fragments
/// takes its value from the following row, and that row is consumed.
///
/// # Errors
///
/// Returns `VibranceError::UnexpectedDocumentStructure` if the page has no
/// personal details table at all.
pub fn extract_profile(document: &ProfileDocument) -> Result<ProfileRecord, VibranceError> {
    let table = document
        .html()
        .select(&DETAILS_TABLE)
        .next()
        .ok_or(VibranceError::UnexpectedDocumentStructure(
            "personal details table",
        ))?;

    let mut profile = ProfileRecord::default();
    let mut rows = table.select(&ROW);

    while let Some(row) = rows.next() {
        let Some(field) = match_label(&label(row)) else {
            continue;
        };
        let Some(value_row) = rows.next() else {
            break;
        };
        *slot(&mut profile, field) = Some(dom::trimmed_text(value_row));
    }

    Ok(profile)
}

/// Label text of a row: its first cell, or the whole row if it has none
fn label(row: ElementRef<'_>) -> String {
    row.select(&LABEL_CELL)
        .next()
        .map(dom::text)
        .unwrap_or_else(|| dom::text(row))
}

fn match_label(label: &str) -> Option<ProfileField> {
    let label = label.to_lowercase();
    LABELS
        .iter()
        .find(|(fragment, _)| label.contains(fragment))
        .map(|(_, field)| *field)
}

fn slot(profile: &mut ProfileRecord, field: ProfileField) -> &mut Option<String> {
    match field {
        ProfileField::Id => &mut profile.id,
        ProfileField::Name => &mut profile.name,
        ProfileField::Email => &mut profile.email,
        ProfileField::Mobile => &mut profile.mobile,
        ProfileField::College => &mut profile.college,
    }
}
