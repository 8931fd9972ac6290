//! Partial-precision calendar values: `date`, `time`, `dateTime` and `instant`.
//!
//! Values are wall-clock components exactly as they appear on the wire. No
//! normalisation happens: `2015-02` stays a month-precision date, `Z` and
//! `+00:00` stay distinct, and fractional seconds keep their digits so that
//! formatting reproduces the parsed text.
//!
//! Validation is pure and total:
//! - years range over `-9999..=9999`
//! - a month requires a year, a day requires a month (and therefore a year)
//! - day counts follow the proleptic Gregorian calendar
//! - hour, minute and second are mandatory together, hour `0..=23`
//! - fractions lie in `[0, 1)`

use crate::error::{Error, Result};
use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone as _};
use std::fmt;
use std::str::FromStr;

/// Returns true for leap years of the proleptic Gregorian calendar.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`, or 0 when the month is out of range.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DatePrecision {
    Year,
    Month,
    Day,
}

// ============================================================================
// Date
// ============================================================================

/// A date with year, year-month or year-month-day precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date {
    year: i32,
    month: Option<u8>,
    day: Option<u8>,
}

impl Date {
    pub const MIN_YEAR: i32 = -9999;
    pub const MAX_YEAR: i32 = 9999;

    pub fn new(year: i32, month: Option<i32>, day: Option<i32>) -> Result<Self> {
        Self::from_parts(Some(year), month, day)
    }

    /// Builds a date from optional components, enforcing that finer units
    /// only appear together with all coarser ones.
    pub fn from_parts(year: Option<i32>, month: Option<i32>, day: Option<i32>) -> Result<Self> {
        let Some(year) = year else {
            return Err(Error::InvalidDate("year is mandatory".into()));
        };
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) {
            return Err(Error::InvalidDate(format!(
                "year {year} outside {}..={}",
                Self::MIN_YEAR,
                Self::MAX_YEAR
            )));
        }

        let month = match month {
            None => {
                if day.is_some() {
                    return Err(Error::InvalidDate("day requires a month".into()));
                }
                return Ok(Self {
                    year,
                    month: None,
                    day: None,
                });
            }
            Some(m) if (1..=12).contains(&m) => m as u8,
            Some(m) => return Err(Error::InvalidDate(format!("month {m} outside 1..=12"))),
        };

        let day = match day {
            None => None,
            Some(d) => {
                let max = days_in_month(year, u32::from(month)) as i32;
                if !(1..=max).contains(&d) {
                    return Err(Error::InvalidDate(format!(
                        "day {d} outside 1..={max} for {year:04}-{month:02}"
                    )));
                }
                Some(d as u8)
            }
        };

        Ok(Self {
            year,
            month: Some(month),
            day,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Option<u32> {
        self.month.map(u32::from)
    }

    pub fn day(&self) -> Option<u32> {
        self.day.map(u32::from)
    }

    pub fn precision(&self) -> DatePrecision {
        match (self.month, self.day) {
            (_, Some(_)) => DatePrecision::Day,
            (Some(_), None) => DatePrecision::Month,
            _ => DatePrecision::Year,
        }
    }

    /// Converts a day-precision date into a chrono date.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month()?, self.day()?)
    }
}

impl FromStr for Date {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidDate(format!("{s:?} is not YYYY, YYYY-MM or YYYY-MM-DD"));

        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let mut parts = body.split('-');
        let year = parts
            .next()
            .and_then(|p| parse_fixed_digits(p, 4))
            .ok_or_else(invalid)?;
        if negative && year == 0 {
            return Err(invalid());
        }
        let month = match parts.next() {
            Some(p) => Some(parse_fixed_digits(p, 2).ok_or_else(invalid)?),
            None => None,
        };
        let day = match parts.next() {
            Some(p) => Some(parse_fixed_digits(p, 2).ok_or_else(invalid)?),
            None => None,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }

        let year = if negative { -year } else { year };
        Self::from_parts(Some(year), month, day)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year < 0 {
            write!(f, "-{:04}", -self.year)?;
        } else {
            write!(f, "{:04}", self.year)?;
        }
        if let Some(month) = self.month {
            write!(f, "-{month:02}")?;
        }
        if let Some(day) = self.day {
            write!(f, "-{day:02}")?;
        }
        Ok(())
    }
}

// ============================================================================
// Time
// ============================================================================

/// Fractional seconds, kept as the digits that follow the decimal point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fraction(String);

impl Fraction {
    pub fn from_digits(digits: &str) -> Result<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidTime(format!(
                "fraction {digits:?} must be one or more digits"
            )));
        }
        Ok(Self(digits.to_string()))
    }

    pub fn from_f64(value: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&value) {
            return Err(Error::InvalidTime(format!("fraction {value} outside [0, 1)")));
        }
        let text = value.to_string();
        let digits = text.strip_prefix("0.").unwrap_or("0");
        Self::from_digits(digits)
    }

    pub fn digits(&self) -> &str {
        &self.0
    }

    pub fn as_f64(&self) -> f64 {
        format!("0.{}", self.0).parse().unwrap_or(0.0)
    }

    /// Nanoseconds represented by the first nine digits.
    pub fn nanos(&self) -> u32 {
        let digits: String = self.0.chars().take(9).collect();
        let padded = format!("{digits:0<9}");
        padded.parse().unwrap_or(0)
    }
}

/// A wall-clock time with second precision and optional fractional seconds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Time {
    hour: u8,
    minute: u8,
    second: u8,
    fraction: Option<Fraction>,
}

impl Time {
    pub fn new(hour: i32, minute: i32, second: i32, fraction: Option<f64>) -> Result<Self> {
        Self::from_parts(Some(hour), Some(minute), Some(second), fraction)
    }

    pub fn from_parts(
        hour: Option<i32>,
        minute: Option<i32>,
        second: Option<i32>,
        fraction: Option<f64>,
    ) -> Result<Self> {
        let fraction = fraction.map(Fraction::from_f64).transpose()?;
        Self::build(hour, minute, second, fraction)
    }

    fn build(
        hour: Option<i32>,
        minute: Option<i32>,
        second: Option<i32>,
        fraction: Option<Fraction>,
    ) -> Result<Self> {
        let (Some(hour), Some(minute), Some(second)) = (hour, minute, second) else {
            return Err(Error::InvalidTime(
                "hour, minute and second must all be present".into(),
            ));
        };
        if !(0..=23).contains(&hour) {
            return Err(Error::InvalidTime(format!("hour {hour} outside 0..=23")));
        }
        if !(0..=59).contains(&minute) {
            return Err(Error::InvalidTime(format!("minute {minute} outside 0..=59")));
        }
        if !(0..=59).contains(&second) {
            return Err(Error::InvalidTime(format!("second {second} outside 0..=59")));
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
            second: second as u8,
            fraction,
        })
    }

    pub fn hour(&self) -> u32 {
        u32::from(self.hour)
    }

    pub fn minute(&self) -> u32 {
        u32::from(self.minute)
    }

    pub fn second(&self) -> u32 {
        u32::from(self.second)
    }

    pub fn fraction(&self) -> Option<&Fraction> {
        self.fraction.as_ref()
    }

    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        let nanos = self.fraction.as_ref().map(Fraction::nanos).unwrap_or(0);
        NaiveTime::from_hms_nano_opt(self.hour(), self.minute(), self.second(), nanos)
    }
}

impl FromStr for Time {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidTime(format!("{s:?} is not hh:mm:ss[.fff]"));

        let (main, fraction) = match s.split_once('.') {
            Some((main, digits)) => (main, Some(Fraction::from_digits(digits)?)),
            None => (s, None),
        };

        let mut parts = main.split(':');
        let mut next = || parts.next().and_then(|p| parse_fixed_digits(p, 2));
        let hour = next().ok_or_else(invalid)?;
        let minute = next();
        let second = next();
        if parts.next().is_some() {
            return Err(invalid());
        }

        Self::build(Some(hour), minute, second, fraction)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        if let Some(fraction) = &self.fraction {
            write!(f, ".{}", fraction.digits())?;
        }
        Ok(())
    }
}

// ============================================================================
// TimeZone
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeZone {
    /// The `Z` designator.
    Utc,
    /// An explicit `+hh:mm` / `-hh:mm` offset.
    Offset {
        negative: bool,
        hours: u8,
        minutes: u8,
    },
}

impl TimeZone {
    pub fn offset(negative: bool, hours: i32, minutes: i32) -> Result<Self> {
        if !(0..=14).contains(&hours) {
            return Err(Error::InvalidTimeZone(format!(
                "offset hours {hours} outside 0..=14"
            )));
        }
        if !(0..=59).contains(&minutes) || (hours == 14 && minutes != 0) {
            return Err(Error::InvalidTimeZone(format!(
                "offset minutes {minutes} not allowed with {hours} hours"
            )));
        }
        Ok(Self::Offset {
            negative,
            hours: hours as u8,
            minutes: minutes as u8,
        })
    }

    /// Signed offset from UTC in seconds.
    pub fn offset_seconds(&self) -> i32 {
        match *self {
            TimeZone::Utc => 0,
            TimeZone::Offset {
                negative,
                hours,
                minutes,
            } => {
                let secs = i32::from(hours) * 3600 + i32::from(minutes) * 60;
                if negative {
                    -secs
                } else {
                    secs
                }
            }
        }
    }

    pub fn to_fixed_offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.offset_seconds())
    }
}

impl FromStr for TimeZone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "Z" {
            return Ok(TimeZone::Utc);
        }
        let invalid = || Error::InvalidTimeZone(format!("{s:?} is not Z, +hh:mm or -hh:mm"));
        let (negative, rest) = if let Some(rest) = s.strip_prefix('+') {
            (false, rest)
        } else if let Some(rest) = s.strip_prefix('-') {
            (true, rest)
        } else {
            return Err(invalid());
        };
        let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
        let hours = parse_fixed_digits(hours, 2).ok_or_else(invalid)?;
        let minutes = parse_fixed_digits(minutes, 2).ok_or_else(invalid)?;
        Self::offset(negative, hours, minutes)
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TimeZone::Utc => f.write_str("Z"),
            TimeZone::Offset {
                negative,
                hours,
                minutes,
            } => {
                let sign = if negative { '-' } else { '+' };
                write!(f, "{sign}{hours:02}:{minutes:02}")
            }
        }
    }
}

// ============================================================================
// DateTime / Instant
// ============================================================================

/// A partial-precision date, optionally followed by a time and a timezone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateTime {
    date: Date,
    time: Option<Time>,
    timezone: Option<TimeZone>,
}

impl DateTime {
    pub fn new(date: Date, time: Option<Time>, timezone: Option<TimeZone>) -> Result<Self> {
        if time.is_some() && date.precision() != DatePrecision::Day {
            return Err(Error::InvalidDateTime(format!(
                "a time requires a full date, got {date}"
            )));
        }
        if timezone.is_some() && time.is_none() {
            return Err(Error::InvalidDateTime(
                "a timezone requires a time".into(),
            ));
        }
        Ok(Self {
            date,
            time,
            timezone,
        })
    }

    pub fn date(&self) -> &Date {
        &self.date
    }

    pub fn time(&self) -> Option<&Time> {
        self.time.as_ref()
    }

    pub fn timezone(&self) -> Option<&TimeZone> {
        self.timezone.as_ref()
    }

    /// Converts a value with date, time and timezone into a chrono timestamp.
    pub fn to_chrono(&self) -> Option<chrono::DateTime<FixedOffset>> {
        let local = NaiveDateTime::new(self.date.to_naive_date()?, self.time()?.to_naive_time()?);
        self.timezone()?
            .to_fixed_offset()?
            .from_local_datetime(&local)
            .single()
    }
}

impl From<Date> for DateTime {
    fn from(date: Date) -> Self {
        Self {
            date,
            time: None,
            timezone: None,
        }
    }
}

impl FromStr for DateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let Some((date_part, rest)) = s.split_once('T') else {
            return Ok(Self::from(s.parse::<Date>()?));
        };
        let date: Date = date_part.parse()?;

        let (time_part, timezone) = if let Some(time) = rest.strip_suffix('Z') {
            (time, Some(TimeZone::Utc))
        } else if let Some(pos) = rest.rfind(['+', '-']) {
            let (time, tz) = rest.split_at(pos);
            (time, Some(tz.parse::<TimeZone>()?))
        } else {
            (rest, None)
        };

        let time: Time = time_part.parse()?;
        Self::new(date, Some(time), timezone)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date)?;
        if let Some(time) = &self.time {
            write!(f, "T{time}")?;
        }
        if let Some(tz) = &self.timezone {
            write!(f, "{tz}")?;
        }
        Ok(())
    }
}

/// A fully specified point in time: day-precision date, time and timezone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Instant(DateTime);

impl Instant {
    pub fn new(value: DateTime) -> Result<Self> {
        if value.date.precision() != DatePrecision::Day
            || value.time.is_none()
            || value.timezone.is_none()
        {
            return Err(Error::InvalidInstant(format!(
                "{value} lacks a full date, time or timezone"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_date_time(&self) -> &DateTime {
        &self.0
    }

    pub fn to_chrono(&self) -> Option<chrono::DateTime<FixedOffset>> {
        self.0.to_chrono()
    }
}

impl FromStr for Instant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.parse()?)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn parse_fixed_digits(s: &str, width: usize) -> Option<i32> {
    if s.len() != width || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
