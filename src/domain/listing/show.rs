use chrono::{DateTime, Local, NaiveDateTime};

use crate::domain::validation::ValidationError;

/// Validated booking of an artist at a venue
///
/// Duplicate (venue, artist, start_time) bookings are not rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShow {
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: NaiveDateTime,
}

impl NewShow {
    pub fn parse(venue_id: &str, artist_id: &str, start_time: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            venue_id: parse_id("venue_id", venue_id)?,
            artist_id: parse_id("artist_id", artist_id)?,
            start_time: parse_start_time(start_time)?,
        })
    }
}

fn parse_id(field: &'static str, raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::invalid(field, format!("expected an id, got {:?}", raw)))
}

const START_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parses the show start time as entered in the booking form
///
/// Accepts `YYYY-MM-DD HH:MM[:SS]`, the `T`-separated equivalents, and
/// RFC 3339, which is converted to the server's local wall time.
pub fn parse_start_time(raw: &str) -> Result<NaiveDateTime, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::missing("start_time"));
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Ok(with_offset.with_timezone(&Local).naive_local());
    }

    START_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| ValidationError::invalid("start_time", format!("unrecognized date {:?}", raw)))
}

/// Show joined with both sides of the booking
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ShowListing {
    pub show_id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

/// Shows partitioned around a reference instant
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowSplit {
    pub past: Vec<ShowListing>,
    pub upcoming: Vec<ShowListing>,
}

impl ShowSplit {
    /// Shows starting strictly after `now` are upcoming; the rest are past
    pub fn around(shows: Vec<ShowListing>, now: NaiveDateTime) -> Self {
        let (upcoming, past): (Vec<_>, Vec<_>) =
            shows.into_iter().partition(|s| s.start_time > now);
        Self { past, upcoming }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn listing(id: i64, start_time: NaiveDateTime) -> ShowListing {
        ShowListing {
            show_id: id,
            venue_id: 1,
            venue_name: "The Musical Hop".to_string(),
            venue_image_link: None,
            artist_id: 4,
            artist_name: "Guns N Petals".to_string(),
            artist_image_link: None,
            start_time,
        }
    }

    #[test]
    fn parses_form_formats() {
        assert_eq!(
            parse_start_time("2019-05-21 21:30:00"),
            Ok(at(2019, 5, 21, 21) + chrono::Duration::minutes(30))
        );
        assert_eq!(parse_start_time("2035-04-01T20:00"), Ok(at(2035, 4, 1, 20)));
    }

    #[test]
    fn offset_times_convert_to_server_local() {
        let utc = at(2035, 4, 1, 20).and_utc();
        let expected = utc.with_timezone(&Local).naive_local();

        assert_eq!(parse_start_time("2035-04-01T20:00:00Z"), Ok(expected));
        assert_eq!(parse_start_time("2035-04-01T22:00:00+02:00"), Ok(expected));
    }

    #[test]
    fn rejects_garbage_dates() {
        assert!(matches!(
            parse_start_time("next tuesday"),
            Err(ValidationError::Invalid { field: "start_time", .. })
        ));
        assert_eq!(parse_start_time(" "), Err(ValidationError::missing("start_time")));
    }

    #[test]
    fn new_show_rejects_non_numeric_ids() {
        let result = NewShow::parse("one", "4", "2035-04-01 20:00:00");
        assert!(matches!(result, Err(ValidationError::Invalid { field: "venue_id", .. })));
    }

    #[test]
    fn split_puts_future_shows_in_upcoming() {
        let now = at(2024, 1, 1, 12);
        let split = ShowSplit::around(
            vec![
                listing(1, at(2019, 5, 21, 21)),
                listing(2, at(2035, 4, 1, 20)),
                listing(3, now),
            ],
            now,
        );

        assert_eq!(split.upcoming.len(), 1);
        assert_eq!(split.upcoming[0].show_id, 2);
        assert_eq!(split.past.len(), 2);
    }
}
