use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::ParseError;

/// Calendar date of an ISO-8601 timestamp, as written in the timestamp's own offset.
/// Accepts timestamps with offset (`2024-03-05T10:15:00.000-04:00`), without offset,
/// and bare dates.
pub fn parse_iso8601_date(raw: &str) -> Result<NaiveDate, ParseError> {
    let content = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(content) {
        return Ok(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(content, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(timestamp.date());
    }
    NaiveDate::parse_from_str(content, "%Y-%m-%d").map_err(|_| ParseError::Date(raw.to_string()))
}

/// Exactly `dd/MM/yyyy`.
pub fn parse_day_month_year(raw: &str) -> Result<NaiveDate, ParseError> {
    let is_valid_shape = raw.len() == 10
        && raw.char_indices().all(|(index, c)| match index {
            2 | 5 => c == '/',
            _ => c.is_ascii_digit(),
        });
    if !is_valid_shape {
        return Err(ParseError::Date(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, "%d/%m/%Y").map_err(|_| ParseError::Date(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[rstest]
    #[case("2024-03-05T10:15:00.000-04:00", date(2024, 3, 5))]
    #[case("2024-03-05T23:59:59Z", date(2024, 3, 5))]
    #[case("2024-03-20T00:00:01+02:00", date(2024, 3, 20))]
    #[case("2024-03-05T10:15:00", date(2024, 3, 5))]
    #[case("2024-03-05T10:15:00.123", date(2024, 3, 5))]
    #[case("2024-03-05", date(2024, 3, 5))]
    #[case(" 2024-12-31T08:00:00Z ", date(2024, 12, 31))]
    fn iso8601(#[case] input: &str, #[case] expected: NaiveDate) {
        assert_eq!(Ok(expected), parse_iso8601_date(input));
    }

    #[rstest]
    #[case("")]
    #[case("05/03/2024")]
    #[case("2024-02-30T10:00:00Z")]
    #[case("yesterday")]
    fn iso8601_invalid(#[case] input: &str) {
        assert_eq!(
            Err(ParseError::Date(input.to_string())),
            parse_iso8601_date(input)
        );
    }

    #[rstest]
    #[case("05/03/2024", date(2024, 3, 5))]
    #[case("31/12/2023", date(2023, 12, 31))]
    #[case("29/02/2024", date(2024, 2, 29))]
    fn day_month_year(#[case] input: &str, #[case] expected: NaiveDate) {
        assert_eq!(Ok(expected), parse_day_month_year(input));
    }

    #[rstest]
    #[case("5/3/2024")]
    #[case("05/03/24")]
    #[case("2024-03-05")]
    #[case("29/02/2023")]
    #[case("32/01/2024")]
    #[case(" 05/03/2024")]
    #[case("05-03-2024")]
    fn day_month_year_invalid(#[case] input: &str) {
        assert_eq!(
            Err(ParseError::Date(input.to_string())),
            parse_day_month_year(input)
        );
    }
}
