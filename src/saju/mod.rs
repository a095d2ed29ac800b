//! 命盤
//!
//! 由出生日期、鐘點、性別排出四柱、大運，並對照某一年的歲運。
//!
//! 日期所屬干支查自萬歲曆（[`CalendarLookup`]），起運以節氣（[`SolarTermLookup`]）為準；
//! 兩者皆由呼叫方提供，[`Engine`] 本身不持有全域狀態。

use std::ops::RangeInclusive;

use serde::{Serialize, Serializer};

use crate::config::{Config, DEFAULT_REFERENCE_YEAR};
use crate::date::{Date, Moment};
use crate::error::{Error, Result};
use crate::tables::{CalendarLookup, CalendarTable, SolarTermLookup, SolarTermTable, Tables};

pub mod daeun;
pub mod flow;
pub mod overlay;
pub mod pillars;
pub mod report;

use daeun::LuckCycle;
use overlay::YearOverlay;
use pillars::{FourPillars, HourStatus};

/// 性別。序列化為代碼：男 1、女 2。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Gender {
    Male = 1,
    Female = 2,
}

impl Gender {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Male),
            2 => Some(Self::Female),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

impl Serialize for Gender {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// 出生鐘點（時、分）
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

/// 可接受的出生年份（公元，四位數）
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1..=9999;

/// 出生資料
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct BirthInput {
    pub date: Date,
    /// 鐘點未知時為 `None`
    pub clock: Option<ClockTime>,
    pub gender: Gender,
    pub name: String,
}

impl BirthInput {
    /// 檢查並建立出生資料。
    ///
    /// 時、分須同時提供或同時缺省；年份不在 [`SUPPORTED_YEARS`] 內、日期不存在、時分越界或
    /// 性別代碼不是 1、2 時回報 [`Error::InvalidInput`]。
    ///
    /// # 用例
    ///
    /// ```
    /// use kolonaro::saju::{BirthInput, Gender};
    ///
    /// let input = BirthInput::new(1990, 5, 15, Some(10), Some(30), 1, "홍길동").unwrap();
    /// assert_eq!(Gender::Male, input.gender);
    /// assert_eq!("1990-05-15T10:30:00", input.birth_moment().iso());
    ///
    /// let input = BirthInput::new(1990, 5, 15, None, None, 2, "").unwrap();
    /// assert_eq!("1990-05-15T00:00:00", input.birth_moment().iso());
    ///
    /// assert!(BirthInput::new(1990, 2, 30, None, None, 1, "").is_err());
    /// assert!(BirthInput::new(1990, 5, 15, Some(10), None, 1, "").is_err());
    /// assert!(BirthInput::new(1990, 5, 15, None, None, 3, "").is_err());
    /// ```
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: Option<u32>,
        minute: Option<u32>,
        gender: u8,
        name: impl Into<String>,
    ) -> Result<Self> {
        if !SUPPORTED_YEARS.contains(&year) {
            return Err(Error::InvalidInput(format!("year {year} out of range")));
        }
        let date = i32::try_from(month)
            .ok()
            .zip(i32::try_from(day).ok())
            .and_then(|(m, d)| Date::from_gregorian(year, m, d))
            .ok_or_else(|| Error::InvalidInput(format!("no such date {year}-{month}-{day}")))?;
        let clock = match (hour, minute) {
            (None, None) => None,
            (Some(hour), Some(minute)) => {
                if hour > 23 {
                    return Err(Error::InvalidInput(format!("hour {hour} out of range")));
                }
                if minute > 59 {
                    return Err(Error::InvalidInput(format!("minute {minute} out of range")));
                }
                Some(ClockTime { hour, minute })
            }
            _ => {
                return Err(Error::InvalidInput(
                    "hour and minute must be given together".into(),
                ));
            }
        };
        let gender = Gender::from_code(gender)
            .ok_or_else(|| Error::InvalidInput(format!("unknown gender code {gender}")))?;
        Ok(Self {
            date,
            clock,
            gender,
            name: name.into(),
        })
    }

    /// 出生時刻；鐘點未知時取當日零時。
    pub fn birth_moment(&self) -> Moment {
        self.clock
            .and_then(|c| Moment::new(self.date, c.hour, c.minute, 0))
            .unwrap_or_else(|| Moment::midnight(self.date))
    }
}

/// 命盤
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub input: BirthInput,
    pub pillars: FourPillars,
    pub hour_status: HourStatus,
    pub luck: LuckCycle,
    pub overlay: YearOverlay,
}

/// 排盤器
///
/// # 用例
///
/// ```
/// use kolonaro::date::Date;
/// use kolonaro::saju::{BirthInput, Engine};
/// use kolonaro::tables::{CalendarRow, CalendarTable, SolarTermTable};
///
/// let calendar = CalendarTable::from_rows([CalendarRow {
///     date: Date::from_gregorian(1990, 5, 15).unwrap(),
///     year: "庚午".into(),
///     month: "辛巳".into(),
///     day: "庚辰".into(),
/// }]);
/// let engine = Engine::new(calendar, SolarTermTable::default());
/// let input = BirthInput::new(1990, 5, 15, Some(10), Some(30), 1, "").unwrap();
/// let chart = engine.compute(&input).unwrap();
/// assert_eq!("辛巳", chart.pillars.hour.unwrap().pillar.to_string());
/// // 無節氣資料，採用固定起運歲數
/// assert_eq!(8, chart.luck.start.rounded);
/// assert_eq!("壬午", chart.luck.entries[0].pillar.to_string());
/// ```
#[derive(Debug, Clone)]
pub struct Engine<C, S> {
    calendar: C,
    solar_terms: S,
    reference_year: i32,
}

impl<C: CalendarLookup, S: SolarTermLookup> Engine<C, S> {
    pub fn new(calendar: C, solar_terms: S) -> Self {
        Self {
            calendar,
            solar_terms,
            reference_year: DEFAULT_REFERENCE_YEAR,
        }
    }

    /// 以設定中的對照年份建立。
    pub fn with_config(calendar: C, solar_terms: S, config: &Config) -> Self {
        Self::new(calendar, solar_terms).with_reference_year(config.reference_year)
    }

    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    pub fn solar_terms(&self) -> &S {
        &self.solar_terms
    }

    /// 排盤。出生日期不在萬歲曆內時回報 [`Error::DateNotCovered`]。
    pub fn compute(&self, input: &BirthInput) -> Result<Chart> {
        let pillars = pillars::resolve(&self.calendar, input.date, input.clock)?;
        let luck = daeun::luck_cycle(&self.solar_terms, input.birth_moment(), &pillars, input.gender);
        let overlay = overlay::year_overlay(&pillars, self.reference_year, input.gender);
        tracing::info!(
            date = %input.date,
            day = %pillars.day.pillar,
            direction = ?luck.direction,
            start_age = luck.start.rounded,
            "chart computed"
        );
        Ok(Chart {
            input: input.clone(),
            hour_status: pillars.hour_status(),
            pillars,
            luck,
            overlay,
        })
    }
}

impl Engine<CalendarTable, SolarTermTable> {
    /// 依設定載入曆表並建立。
    pub fn load(config: &Config) -> Result<Self> {
        let Tables {
            calendar,
            solar_terms,
        } = Tables::load(config)?;
        Ok(Self::with_config(calendar, solar_terms, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_codes() {
        assert_eq!(Some(Gender::Male), Gender::from_code(1));
        assert_eq!(Some(Gender::Female), Gender::from_code(2));
        assert_eq!(None, Gender::from_code(0));
        assert_eq!(2, Gender::Female.code());
        assert_eq!(serde_json::json!(1), serde_json::to_value(Gender::Male).unwrap());
    }

    #[test]
    fn rejects_bad_input() {
        let bad = [
            BirthInput::new(1990, 13, 1, None, None, 1, ""),
            BirthInput::new(1990, 2, 29, None, None, 1, ""),
            BirthInput::new(1990, 5, 15, Some(24), Some(0), 1, ""),
            BirthInput::new(1990, 5, 15, Some(23), Some(60), 1, ""),
            BirthInput::new(1990, 5, 15, None, Some(30), 1, ""),
            BirthInput::new(1990, 5, 15, None, None, 0, ""),
            BirthInput::new(2_000_000, 1, 1, None, None, 1, ""),
            BirthInput::new(i32::MAX, 12, 31, None, None, 1, ""),
            BirthInput::new(0, 1, 1, None, None, 1, ""),
        ];
        for result in bad {
            assert!(matches!(result, Err(Error::InvalidInput(_))), "{result:?}");
        }
        assert!(BirthInput::new(1992, 2, 29, Some(23), Some(59), 2, "").is_ok());
    }
}
