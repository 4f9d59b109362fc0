use chrono::DateTime;

/// Whether `date` lies strictly between `start` and `end`, all RFC 3339.
///
/// Boundary-equal timestamps are outside. If any of the three fails to parse
/// the item is treated as outside rather than reported as an error.
pub fn is_within_date_range(date: &str, start: &str, end: &str) -> bool {
    let (Ok(date), Ok(start), Ok(end)) = (
        DateTime::parse_from_rfc3339(date),
        DateTime::parse_from_rfc3339(start),
        DateTime::parse_from_rfc3339(end),
    ) else {
        log::debug!("Unparsable timestamp in ({}, {}, {}), excluding item", date, start, end);
        return false;
    };

    date > start && date < end
}
