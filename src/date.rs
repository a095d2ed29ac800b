//! Calendar-independant date, and civil wall-clock moments built on it.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Serialize, Serializer};

/// A calendar-independant date.
///
/// Supported range begins from January 1, 4713 BC, proleptic Julian calendar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Date {
    jdn: u32,
}

impl Date {
    /// Creates a `Date` with a Julian day number (JDN).
    pub fn from_jdn(jdn: u32) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub fn jdn(&self) -> u32 {
        self.jdn
    }

    /// Creates a `Date` with a Gregorian calendar date.
    ///
    /// `year` should be an astronomical year number, i.e. 1 BC is `0`, 2
    /// BC is `-1`, etc.
    ///
    /// Returns `None` if `month` or `day` does not name a real day of that
    /// year, or if the result date is out of supported range.
    ///
    /// # Example
    ///
    /// ```
    /// use kolonaro::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// assert_eq!(None, Date::from_gregorian(2023, 2, 29));
    /// ```
    pub fn from_gregorian(year: i32, month: i32, day: i32) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        if !(1..=days_in_month(month, YearType::from_gregorian(year))).contains(&day) {
            return None;
        }
        let (y, m, d) = (year as i64, month as i64, day as i64);
        u32::try_from(
            (1461 * (y + 4800 + (m - 14) / 12)) / 4 + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
                - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
                + d
                - 32075,
        )
        .map(Self::from_jdn)
        .ok()
    }
    /// Represents the date in Gregorian calendar.
    ///
    /// Returns in `(year, month, day)` format.
    ///
    /// # Example
    ///
    /// ```
    /// use kolonaro::Date;
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, i32, i32) {
        let jdn = self.jdn as i64;
        let f = jdn + 1401 + (((4 * jdn + 274277) / 146097) * 3) / 4 - 38;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
        (year as i32, month as i32, day as i32)
    }
    /// Formats the date in ISO 8601 format.
    ///
    /// # Example
    ///
    /// ```
    /// use kolonaro::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!("2000-01-01", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        let (y, m, d) = self.gregorian();
        format!("{:04}-{:02}-{:02}", y, m, d)
    }
    /// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
    ///
    /// ```
    /// use kolonaro::Date;
    ///
    /// assert_eq!(Date::from_gregorian(1990, 5, 15), Date::parse_iso("1990-05-15"));
    /// assert_eq!(None, Date::parse_iso("1990-5"));
    /// ```
    pub fn parse_iso(s: &str) -> Option<Self> {
        let mut it = s.trim().splitn(3, '-');
        let y = it.next()?.parse().ok()?;
        let m = it.next()?.parse().ok()?;
        let d = it.next()?.parse().ok()?;
        Self::from_gregorian(y, m, d)
    }

    /// Returns the Chinese sexagenary day number of the date, numbered from 1
    /// (甲子) to 60 (癸亥).
    ///
    /// # Example
    ///
    /// ```
    /// use kolonaro::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(55, date.sexagenary()); // 戊午
    /// ```
    pub fn sexagenary(&self) -> u32 {
        (self.jdn + 49) % 60 + 1
    }
}

impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_jdn(if rhs >= 0 {
            self.jdn + rhs as u32
        } else {
            self.jdn - rhs.wrapping_neg() as u32
        })
    }
}
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        self.jdn as i32 - rhs.jdn as i32
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso_gregorian())
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.iso_gregorian())
    }
}

const SECONDS_PER_DAY: i64 = 86400;

/// A civil wall-clock instant with second precision.
///
/// No time zone is attached: birth times and the solar-term table are both
/// read on the same civil clock, and only differences between moments matter.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Moment {
    secs: i64,
}

impl Moment {
    /// Creates a `Moment` at `hour:minute:second` on `date`.
    ///
    /// Returns `None` if the clock reading is not within a single day.
    ///
    /// # Example
    ///
    /// ```
    /// use kolonaro::{Date, Moment};
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// let noon = Moment::new(date, 12, 0, 0).unwrap();
    /// let midnight = Moment::midnight(date);
    /// assert_eq!(12 * 3600, noon - midnight);
    /// assert_eq!(None, Moment::new(date, 24, 0, 0));
    /// ```
    pub fn new(date: Date, hour: u32, minute: u32, second: u32) -> Option<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        let of_day = (hour * 3600 + minute * 60 + second) as i64;
        Some(Self {
            secs: date.jdn() as i64 * SECONDS_PER_DAY + of_day,
        })
    }
    /// The first instant of `date`.
    pub fn midnight(date: Date) -> Self {
        Self {
            secs: date.jdn() as i64 * SECONDS_PER_DAY,
        }
    }
    /// Returns the civil date the moment falls on.
    pub fn date(&self) -> Date {
        Date::from_jdn(self.secs.div_euclid(SECONDS_PER_DAY) as u32)
    }
    /// Returns the clock reading as `(hour, minute, second)`.
    pub fn clock(&self) -> (u32, u32, u32) {
        let of_day = self.secs.rem_euclid(SECONDS_PER_DAY) as u32;
        (of_day / 3600, of_day / 60 % 60, of_day % 60)
    }
    /// Returns the moment `secs` seconds later (earlier if negative).
    pub fn add_seconds(self, secs: i64) -> Self {
        Self {
            secs: self.secs + secs,
        }
    }
    /// Formats the moment as `YYYY-MM-DDTHH:MM:SS`.
    ///
    /// ```
    /// use kolonaro::{Date, Moment};
    ///
    /// let date = Date::from_gregorian(1990, 5, 21).unwrap();
    /// let m = Moment::new(date, 13, 37, 5).unwrap();
    /// assert_eq!("1990-05-21T13:37:05", m.iso());
    /// ```
    pub fn iso(&self) -> String {
        let (h, mi, s) = self.clock();
        format!("{}T{:02}:{:02}:{:02}", self.date().iso_gregorian(), h, mi, s)
    }
}

impl Sub<Moment> for Moment {
    /// Difference in seconds.
    type Output = i64;
    fn sub(self, rhs: Moment) -> Self::Output {
        self.secs - rhs.secs
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso())
    }
}

impl Serialize for Moment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.iso())
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in Gregorian calendar.
    pub fn from_gregorian(year: i32) -> Self {
        if year % 4 == 0 && year % 100 != 0 || year % 400 == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

fn days_in_month(month: i32, year_type: YearType) -> i32 {
    match month {
        2 => 28 + year_type.is_leap() as i32,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
