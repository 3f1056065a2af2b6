use time::{macros::format_description, Date, Month, OffsetDateTime};

/// Current calendar date in UTC.
pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// First and last day of a month.
pub fn month_bounds(year: i32, month: Month) -> Result<(Date, Date), time::error::ComponentRange> {
    let first = Date::from_calendar_date(year, month, 1)?;
    let last = Date::from_calendar_date(year, month, time::util::days_in_year_month(year, month))?;
    Ok((first, last))
}

/// Month before/after `(year, month)`.
pub fn shift_month(year: i32, month: Month, forward: bool) -> (i32, Month) {
    match (forward, month) {
        (true, Month::December) => (year + 1, Month::January),
        (false, Month::January) => (year - 1, Month::December),
        (true, m) => (year, m.next()),
        (false, m) => (year, m.previous()),
    }
}

/// `YYYY-MM-DD` serde format for `time::Date`.
pub mod iso_date {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};
    use time::{macros::format_description, Date};

    pub fn serialize<S: Serializer>(date: &Date, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_iso(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).map_err(D::Error::custom)
    }

    fn parse(raw: &str) -> Result<Date, time::error::Parse> {
        Date::parse(raw, format_description!("[year]-[month]-[day]"))
    }

    pub mod option {
        use serde::{de::Error as _, Deserialize, Deserializer, Serializer};
        use time::Date;

        pub fn serialize<S: Serializer>(date: &Option<Date>, s: S) -> Result<S::Ok, S::Error> {
            match date {
                Some(d) => super::serialize(d, s),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Date>, D::Error> {
            match Option::<String>::deserialize(d)? {
                Some(raw) => super::parse(&raw).map(Some).map_err(D::Error::custom),
                None => Ok(None),
            }
        }
    }
}

pub fn format_iso(date: Date) -> String {
    let format = format_description!("[year]-[month]-[day]");
    date.format(&format).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn month_bounds_handle_leap_february() {
        let (first, last) = month_bounds(2024, Month::February).unwrap();
        assert_eq!(first, date!(2024 - 02 - 01));
        assert_eq!(last, date!(2024 - 02 - 29));

        let (_, last) = month_bounds(2023, Month::February).unwrap();
        assert_eq!(last, date!(2023 - 02 - 28));
    }

    #[test]
    fn shift_month_wraps_years() {
        assert_eq!(shift_month(2024, Month::December, true), (2025, Month::January));
        assert_eq!(shift_month(2024, Month::January, false), (2023, Month::December));
        assert_eq!(shift_month(2024, Month::June, true), (2024, Month::July));
    }

    #[derive(Debug, serde::Deserialize)]
    struct Range {
        #[serde(default, with = "iso_date::option")]
        from: Option<Date>,
    }

    #[test]
    fn optional_iso_date_parses_or_rejects() {
        let r: Range = serde_json::from_str(r#"{"from":"2024-02-29"}"#).unwrap();
        assert_eq!(r.from, Some(date!(2024 - 02 - 29)));
        let r: Range = serde_json::from_str("{}").unwrap();
        assert_eq!(r.from, None);
        assert!(serde_json::from_str::<Range>(r#"{"from":"29/02/2024"}"#).is_err());
    }

    #[test]
    fn iso_format_is_zero_padded() {
        assert_eq!(format_iso(date!(2024 - 03 - 05)), "2024-03-05");
    }
}
