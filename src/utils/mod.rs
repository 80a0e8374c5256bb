use chrono::NaiveDate;

/// Calendar date format accepted on input and produced on output.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Helper function to format the date
///
/// This function takes a `NaiveDate` and formats it as a string in the "yyyy-mm-dd" format.
///
/// # Arguments
///
/// * `date` - A `NaiveDate` object representing the date to be formatted
///
/// # Returns
///
/// A `String` containing the formatted date
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Helper function to parse a strict `YYYY-MM-DD` date
///
/// chrono accepts unpadded month and day numbers, so the shape is checked
/// before parsing: exactly ten characters with dashes at positions 4 and 7.
///
/// # Arguments
///
/// * `text` - The raw date string taken from a request body
///
/// # Returns
///
/// `Some(NaiveDate)` for a real calendar date, `None` otherwise
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_date("2024-02-01"),
            NaiveDate::from_ymd_opt(2024, 2, 1)
        );
        assert_eq!(
            parse_date("2024-02-29"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn rejects_other_shapes() {
        for input in [
            "02-01-2024",
            "2024-2-1",
            "2024/02/01",
            "2023-02-29",
            "2024-13-01",
            "",
            "2024-02-01T00:00:00",
            " 2024-02-01",
        ] {
            assert_eq!(parse_date(input), None, "{input:?} should be rejected");
        }
    }

    #[test]
    fn formats_round_trip_shape() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(format_date(date), "2024-06-01");
    }
}
