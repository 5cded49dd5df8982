/// Header row for the shared error log worksheet.
///
/// Row 1 must match this list exactly; anything else (including an empty
/// sheet) triggers a header insertion before the first append.
pub const SHEET_HEADER: [&str; 5] = [
    "DateTime",
    "Auditor",
    "File No",
    "Error Description",
    "Screenshot Link",
];

/// Timestamp format for appended rows (minute precision)
pub const ROW_TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Date-only format used in uploaded screenshot filenames
pub const FILENAME_DATE_FORMAT: &str = "%d-%m-%Y";
