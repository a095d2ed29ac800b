//! Precomputed calendar tables.
//!
//! Two tables feed the engine: the calendar table (萬歲曆), which gives the
//! year, month and day pillars for every civil date within its coverage, and
//! the solar-term table, which lists the solar-term (節氣) instants of each
//! year. Both are consumed read-only through [`CalendarLookup`] and
//! [`SolarTermLookup`]; this module also provides in-memory implementations
//! and loaders for the file formats they are usually distributed in.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike};
use serde::Deserialize;

use crate::config::Config;
use crate::date::{Date, Moment};
use crate::error::{Error, Result};

/// One row of the calendar table.
///
/// The pillar fields hold the sexagenary text exactly as supplied (e.g.
/// `"庚午"`); they are parsed when the row is used.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CalendarRow {
    pub date: Date,
    /// 歲次
    pub year: String,
    /// 月建
    pub month: String,
    /// 日辰
    pub day: String,
}

/// A solar-term instant.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SolarTerm {
    pub name: String,
    pub at: Moment,
}

/// Exact-date access to the calendar table.
pub trait CalendarLookup {
    /// Returns the row for `date`, or `None` outside the table's coverage.
    fn lookup(&self, date: Date) -> Option<&CalendarRow>;
}

/// Per-year access to the solar-term table.
pub trait SolarTermLookup {
    /// Returns the solar terms listed under `year`, or `None` if the year
    /// is absent. No ordering is guaranteed.
    fn terms_for_year(&self, year: i32) -> Option<&[SolarTerm]>;
}

impl<T: CalendarLookup + ?Sized> CalendarLookup for &T {
    fn lookup(&self, date: Date) -> Option<&CalendarRow> {
        (**self).lookup(date)
    }
}

impl<T: SolarTermLookup + ?Sized> SolarTermLookup for &T {
    fn terms_for_year(&self, year: i32) -> Option<&[SolarTerm]> {
        (**self).terms_for_year(year)
    }
}

/// In-memory calendar table, sorted by date.
#[derive(Debug, Clone, Default)]
pub struct CalendarTable {
    rows: Vec<CalendarRow>,
}

const CALENDAR_SOURCE: &str = "calendar";
const SOLAR_TERM_SOURCE: &str = "solar-term";

const COL_DATE: &str = "양력일자";
const COL_YEAR: &str = "歲次";
const COL_MONTH: &str = "月建";
const COL_DAY: &str = "日辰";

impl CalendarTable {
    /// Builds a table from rows. Later rows replace earlier ones with the
    /// same date.
    pub fn from_rows<I: IntoIterator<Item = CalendarRow>>(rows: I) -> Self {
        let mut rows: Vec<_> = rows.into_iter().collect();
        rows.reverse();
        rows.sort_by_key(|row| row.date);
        rows.dedup_by_key(|row| row.date);
        Self { rows }
    }

    /// Parses CSV text whose header names at least the columns `양력일자`,
    /// `歲次`, `月建` and `日辰`. Other columns are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use kolonaro::Date;
    /// use kolonaro::tables::{CalendarLookup, CalendarTable};
    ///
    /// let csv = "양력일자,요일,歲次,月建,日辰\n1990-05-15,화,庚午,辛巳,庚辰\n";
    /// let table = CalendarTable::from_csv(csv).unwrap();
    /// let row = table.lookup(Date::from_gregorian(1990, 5, 15).unwrap()).unwrap();
    /// assert_eq!("辛巳", row.month);
    /// ```
    pub fn from_csv(text: &str) -> Result<Self> {
        let mut lines = (1usize..).zip(text.lines());
        let (_, header) = lines
            .next()
            .ok_or_else(|| Error::raw_data(CALENDAR_SOURCE, "line 1", "missing header"))?;
        let header = split_csv(header.trim_start_matches('\u{feff}'));
        let column = |name: &str| {
            header
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| Error::raw_data(CALENDAR_SOURCE, "line 1", format!("no column {name}")))
        };
        let cols = [
            column(COL_DATE)?,
            column(COL_YEAR)?,
            column(COL_MONTH)?,
            column(COL_DAY)?,
        ];

        let mut rows = Vec::new();
        for (line_num, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_csv(line);
            let field = |idx: usize| {
                fields.get(cols[idx]).map(String::as_str).ok_or_else(|| {
                    Error::raw_data(
                        CALENDAR_SOURCE,
                        format!("line {line_num}, field {}", cols[idx] + 1),
                        "missing field",
                    )
                })
            };
            let date_text = field(0)?;
            // pandas writes timestamps as "YYYY-MM-DD 00:00:00"
            let date = date_text
                .split([' ', 'T'])
                .next()
                .and_then(Date::parse_iso)
                .ok_or_else(|| {
                    Error::raw_data(
                        CALENDAR_SOURCE,
                        format!("line {line_num}, field {}", cols[0] + 1),
                        format!("invalid date {date_text:?}"),
                    )
                })?;
            rows.push(CalendarRow {
                date,
                year: field(1)?.to_owned(),
                month: field(2)?.to_owned(),
                day: field(3)?.to_owned(),
            });
        }
        Ok(Self::from_rows(rows))
    }

    /// Reads and parses a CSV file, see [`from_csv`](Self::from_csv).
    pub fn load(path: &Path) -> Result<Self> {
        let table = Self::from_csv(&std::fs::read_to_string(path)?)?;
        tracing::info!(
            path = %path.display(),
            rows = table.len(),
            "loaded calendar table"
        );
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First and last covered dates.
    pub fn coverage(&self) -> Option<(Date, Date)> {
        Some((self.rows.first()?.date, self.rows.last()?.date))
    }
}

impl CalendarLookup for CalendarTable {
    fn lookup(&self, date: Date) -> Option<&CalendarRow> {
        self.rows
            .binary_search_by_key(&date, |row| row.date)
            .ok()
            .map(|i| &self.rows[i])
    }
}

/// Splits one CSV record. A field wrapped in double quotes may contain
/// commas, and `""` inside it stands for a literal quote.
fn split_csv(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut field).trim().to_owned()),
            _ => field.push(c),
        }
    }
    fields.push(field.trim().to_owned());
    fields
}

/// In-memory solar-term table keyed by year.
#[derive(Debug, Clone, Default)]
pub struct SolarTermTable {
    years: BTreeMap<i32, Vec<SolarTerm>>,
}

#[derive(Deserialize)]
struct RawTerm {
    name: String,
    datetime: String,
}

impl SolarTermTable {
    /// Builds a table from `(year, terms)` pairs.
    pub fn from_years<I: IntoIterator<Item = (i32, Vec<SolarTerm>)>>(years: I) -> Self {
        let mut years: BTreeMap<_, _> = years.into_iter().collect();
        for terms in years.values_mut() {
            terms.sort_by_key(|t| t.at);
        }
        Self { years }
    }

    /// Parses a JSON object mapping each year to its list of terms:
    ///
    /// ```
    /// use kolonaro::tables::{SolarTermLookup, SolarTermTable};
    ///
    /// let json = r#"{ "1990": [
    ///     { "name": "소만", "datetime": "1990-05-21T13:37:00" },
    ///     { "name": "입하", "datetime": "1990-05-06T00:35:00+09:00" }
    /// ] }"#;
    /// let table = SolarTermTable::from_json(json).unwrap();
    /// let terms = table.terms_for_year(1990).unwrap();
    /// assert_eq!("입하", terms[0].name);
    /// assert_eq!("1990-05-06T00:35:00", terms[0].at.iso());
    /// assert!(table.terms_for_year(1991).is_none());
    /// ```
    ///
    /// Datetimes carrying a UTC offset keep their local wall-clock reading.
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<RawTerm>> = serde_json::from_str(text)?;
        let mut years = Vec::with_capacity(raw.len());
        for (key, raw_terms) in raw {
            let year: i32 = key.trim().parse().map_err(|e| {
                Error::raw_data(SOLAR_TERM_SOURCE, format!("key {key:?}"), e)
            })?;
            let terms = (0..)
                .zip(raw_terms)
                .map(|(i, t)| {
                    let at = parse_moment(&t.datetime).ok_or_else(|| {
                        Error::raw_data(
                            SOLAR_TERM_SOURCE,
                            format!("{year}[{i}]"),
                            format!("invalid datetime {:?}", t.datetime),
                        )
                    })?;
                    Ok(SolarTerm { name: t.name, at })
                })
                .collect::<Result<Vec<_>>>()?;
            years.push((year, terms));
        }
        Ok(Self::from_years(years))
    }

    /// Reads and parses a JSON file, see [`from_json`](Self::from_json).
    pub fn load(path: &Path) -> Result<Self> {
        let table = Self::from_json(&std::fs::read_to_string(path)?)?;
        tracing::info!(
            path = %path.display(),
            years = table.years.len(),
            "loaded solar-term table"
        );
        Ok(table)
    }

    /// Years present in the table, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }
}

impl SolarTermLookup for SolarTermTable {
    fn terms_for_year(&self, year: i32) -> Option<&[SolarTerm]> {
        self.years.get(&year).map(Vec::as_slice)
    }
}

fn parse_moment(s: &str) -> Option<Moment> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    let s = s.trim();
    let naive = DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.naive_local())
        .ok()
        .or_else(|| {
            FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        })?;
    let date = Date::from_gregorian(naive.year(), naive.month() as i32, naive.day() as i32)?;
    Moment::new(date, naive.hour(), naive.minute(), naive.second())
}

/// Both tables, loaded from the paths in a [`Config`].
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub calendar: CalendarTable,
    pub solar_terms: SolarTermTable,
}

impl Tables {
    pub fn load(config: &Config) -> Result<Self> {
        Ok(Self {
            calendar: CalendarTable::load(&config.data.calendar)?,
            solar_terms: SolarTermTable::load(&config.data.solar_terms)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: i32, d: i32) -> Date {
        Date::from_gregorian(y, m, d).unwrap()
    }

    #[test]
    fn csv_rows() {
        let csv = "\u{feff}양력일자,음력일자,歲次,月建,日辰\n\
                   1990-05-15 00:00:00,1990-04-21,庚午,辛巳,庚辰\n\
                   \n\
                   \"1990-05-16\",1990-04-22,庚午,辛巳,辛巳\n";
        let table = CalendarTable::from_csv(csv).unwrap();
        assert_eq!(2, table.len());
        assert_eq!(Some((date(1990, 5, 15), date(1990, 5, 16))), table.coverage());
        assert_eq!("辛巳", table.lookup(date(1990, 5, 16)).unwrap().day);
        assert!(table.lookup(date(1990, 5, 17)).is_none());
    }

    #[test]
    fn quoted_fields() {
        for (std, line) in [
            (vec!["a", "b", "c"], "a, b ,c"),
            (vec!["1990-05-15", "음력 4월, 윤달 아님", "庚午"], "\"1990-05-15\",\"음력 4월, 윤달 아님\",庚午"),
            (vec!["say \"hi\"", ""], "\"say \"\"hi\"\"\","),
        ] {
            assert_eq!(std, split_csv(line), "{line}");
        }

        let csv = "양력일자,비고,歲次,月建,日辰\n1990-05-15,\"입하 후, 소만 전\",庚午,辛巳,庚辰\n";
        let table = CalendarTable::from_csv(csv).unwrap();
        let row = table.lookup(date(1990, 5, 15)).unwrap();
        assert_eq!(("庚午", "辛巳", "庚辰"), (row.year.as_str(), row.month.as_str(), row.day.as_str()));
    }

    #[test]
    fn csv_errors() {
        let missing_col = "양력일자,歲次,月建\n1990-05-15,庚午,辛巳\n";
        assert!(matches!(
            CalendarTable::from_csv(missing_col),
            Err(Error::RawData { .. })
        ));
        let bad_date = "양력일자,歲次,月建,日辰\n1990-02-30,庚午,戊寅,庚辰\n";
        match CalendarTable::from_csv(bad_date) {
            Err(Error::RawData { location, .. }) => assert_eq!("line 2, field 1", location),
            other => panic!("unexpected {other:?}"),
        }
        let short = "양력일자,歲次,月建,日辰\n1990-05-15,庚午\n";
        assert!(CalendarTable::from_csv(short).is_err());
        assert!(CalendarTable::from_csv("").is_err());
    }

    #[test]
    fn duplicate_rows_keep_last() {
        let row = |day: &str| CalendarRow {
            date: date(2000, 1, 1),
            year: "己卯".into(),
            month: "丙子".into(),
            day: day.into(),
        };
        let table = CalendarTable::from_rows([row("丁巳"), row("戊午")]);
        assert_eq!(1, table.len());
        assert_eq!("戊午", table.lookup(date(2000, 1, 1)).unwrap().day);
    }

    #[test]
    fn moments() {
        for (std, s) in [
            (Some("1990-05-21T13:37:00"), "1990-05-21T13:37:00"),
            (Some("1990-05-21T13:37:00"), "1990-05-21 13:37"),
            (Some("1990-05-21T13:37:42"), "1990-05-21T13:37:42.5"),
            (Some("1990-05-21T13:37:00"), "1990-05-21T13:37:00+09:00"),
            (Some("1990-05-21T13:37:00"), "1990-05-21T13:37:00Z"),
            (None, "1990-05-21"),
            (None, "yesterday"),
        ] {
            assert_eq!(std.map(str::to_owned), parse_moment(s).map(|m| m.iso()), "{s}");
        }
    }

    #[test]
    fn json_errors() {
        assert!(matches!(
            SolarTermTable::from_json(r#"{"19x0": []}"#),
            Err(Error::RawData { .. })
        ));
        match SolarTermTable::from_json(r#"{"1990": [{"name": "입하", "datetime": "soon"}]}"#) {
            Err(Error::RawData { location, .. }) => assert_eq!("1990[0]", location),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            SolarTermTable::from_json("[]"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn terms_are_sorted() {
        let json = r#"{
            "1991": [],
            "1990": [
                { "name": "망종", "datetime": "1990-06-06T04:46:00" },
                { "name": "입하", "datetime": "1990-05-06T00:35:00" },
                { "name": "소만", "datetime": "1990-05-21T13:37:00" }
            ]
        }"#;
        let table = SolarTermTable::from_json(json).unwrap();
        let names: Vec<_> = table
            .terms_for_year(1990)
            .unwrap()
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(["입하", "소만", "망종"], names.as_slice());
        assert_eq!(vec![1990, 1991], table.years().collect::<Vec<_>>());
        assert_eq!(Some(0), table.terms_for_year(1991).map(<[_]>::len));
    }
}
