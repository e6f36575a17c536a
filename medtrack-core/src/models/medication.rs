use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single prescription owned by one person.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub name: String,
    #[serde(default, deserialize_with = "lenient::frequency")]
    pub frequency_per_day: u32,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub taken: bool,
    #[serde(with = "refill_date_format", default = "unknown_refill_date")]
    pub refill_date: DateTime<Utc>,
}

impl Medication {
    /// Creates an untaken medication whose refill date is the current instant.
    pub fn new(name: impl Into<String>, frequency_per_day: u32) -> Self {
        Self {
            name: name.into(),
            frequency_per_day,
            taken: false,
            refill_date: Utc::now(),
        }
    }

    pub fn with_taken(mut self, taken: bool) -> Self {
        self.taken = taken;
        self
    }

    pub fn with_refill_date(mut self, refill_date: DateTime<Utc>) -> Self {
        self.refill_date = refill_date;
        self
    }

    /// Sets the refill date from text. Never fails; see [`parse_refill_date`].
    pub fn with_refill_date_str(mut self, refill_date: &str) -> Self {
        self.refill_date = parse_refill_date(refill_date);
        self
    }

    pub fn mark_as_taken(&mut self) {
        self.taken = true;
    }

    pub fn reset_taken_status(&mut self) {
        self.taken = false;
    }

    /// Calendar day of the refill, without a time component.
    pub fn refill_day(&self) -> NaiveDate {
        self.refill_date.date_naive()
    }
}

impl fmt::Display for Medication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}x/day - taken: {} - refill: {}",
            self.name,
            self.frequency_per_day,
            if self.taken { "yes" } else { "no" },
            self.refill_day()
        )
    }
}

/// Parses a refill date leniently.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS[.fff]` timestamps
/// (taken as UTC) and plain `YYYY-MM-DD` dates. Anything else yields the Unix
/// epoch and logs a warning instead of failing.
pub fn parse_refill_date(input: &str) -> DateTime<Utc> {
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.with_timezone(&Utc);
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return naive.and_utc();
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_time(NaiveTime::MIN).and_utc();
    }

    tracing::warn!("Unrecognized refill date '{}', using epoch", input);
    unknown_refill_date()
}

fn unknown_refill_date() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// Server records are read without rejecting odd values: one bad field must
/// not fail a whole `GET /users` response.
mod lenient {
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer};

    /// Any JSON value, narrowed to the shapes we can make use of.
    #[derive(Deserialize)]
    #[serde(untagged)]
    pub(super) enum Loose {
        Int(i64),
        Float(f64),
        Bool(bool),
        Text(String),
        Other(IgnoredAny),
    }

    pub(super) fn loose<'de, D>(deserializer: D) -> Result<Option<Loose>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Loose>::deserialize(deserializer)
    }

    /// Whole doses per day. Fractions truncate, negatives become 0, and
    /// anything that isn't a number reads as 0.
    pub fn frequency<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let frequency = match loose(deserializer)? {
            Some(Loose::Int(n)) => n.clamp(0, i64::from(u32::MAX)) as u32,
            // `as` saturates and maps NaN to 0
            Some(Loose::Float(f)) => f.trunc() as u32,
            Some(Loose::Text(s)) => s.trim().parse::<f64>().map_or(0, |f| f.trunc() as u32),
            _ => 0,
        };
        Ok(frequency)
    }

    /// Only a JSON `true` counts as taken.
    pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(matches!(loose(deserializer)?, Some(Loose::Bool(true))))
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix on the wire.
///
/// Reading also accepts epoch milliseconds. Null or any other shape yields
/// the epoch sentinel.
mod refill_date_format {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserializer, Serializer};

    use super::lenient::{loose, Loose};
    use super::{parse_refill_date, unknown_refill_date};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let date = match loose(deserializer)? {
            Some(Loose::Text(s)) => parse_refill_date(&s),
            Some(Loose::Int(millis)) => from_millis(millis),
            Some(Loose::Float(millis)) => from_millis(millis as i64),
            Some(_) => {
                tracing::warn!("Unrecognized refill date value, using epoch");
                unknown_refill_date()
            }
            None => unknown_refill_date(),
        };
        Ok(date)
    }

    fn from_millis(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap_or_else(|| {
            tracing::warn!("Refill timestamp {} out of range, using epoch", millis);
            unknown_refill_date()
        })
    }
}
