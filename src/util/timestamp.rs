//! Backend timestamps are naive ISO-8601, with or without microseconds.

use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

const WITH_SUBSECONDS: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");
const WITHOUT_SUBSECONDS: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const DISPLAY_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none], [year]");

pub fn parse(raw: &str) -> Option<PrimitiveDateTime> {
    let raw = raw.trim();
    if let Ok(with_offset) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(PrimitiveDateTime::new(with_offset.date(), with_offset.time()));
    }
    PrimitiveDateTime::parse(raw, WITH_SUBSECONDS)
        .or_else(|_| PrimitiveDateTime::parse(raw, WITHOUT_SUBSECONDS))
        .ok()
}

/// `Mar 1, 2024`; unparseable input is shown as-is.
pub fn display_date(raw: &str) -> String {
    parse(raw)
        .and_then(|parsed| parsed.format(DISPLAY_DATE).ok())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_python_isoformat() {
        assert_eq!(display_date("2024-03-01T10:00:00"), "Mar 1, 2024");
        assert_eq!(display_date("2024-11-23T08:15:42.123456"), "Nov 23, 2024");
        assert_eq!(display_date("2024-12-05T23:00:00Z"), "Dec 5, 2024");
    }

    #[test]
    fn unparseable_is_passed_through() {
        assert_eq!(display_date("yesterday"), "yesterday");
        assert!(parse("").is_none());
    }
}
