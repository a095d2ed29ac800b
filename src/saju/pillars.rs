//! 四柱
//!
//! 年、月、日三柱取自萬歲曆，時柱由鐘點推出；時刻未知時時柱整體缺省。

use serde::Serialize;

use crate::date::Date;
use crate::error::{Error, Result};
use crate::ganzhi::hour::{hour_branch, hour_stem};
use crate::ganzhi::relation::{Relation, TwelvePhase, ten_relation, twelve_phase};
use crate::ganzhi::{Pillar, Stem};
use crate::tables::CalendarLookup;

use super::ClockTime;

/// 柱位
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Year,
    Month,
    Day,
    Hour,
}

impl Position {
    pub const ALL: [Position; 4] = [Self::Year, Self::Month, Self::Day, Self::Hour];

    /// 柱名，如「년주」。
    pub fn label(self) -> &'static str {
        match self {
            Self::Year => "년주",
            Self::Month => "월주",
            Self::Day => "일주",
            Self::Hour => "시주",
        }
    }
}

/// 時柱狀態：已知鐘點為 `Observed`，否則為 `Unknown`。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HourStatus {
    Observed,
    Unknown,
}

/// 一柱及其十神、十二運星。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct PillarDetail {
    pub pillar: Pillar,
    /// 天干相對日干的十神，日柱本身為 [`Relation::SelfStem`]。
    pub relation: Relation,
    /// 天干在本柱地支的十二運星
    pub phase: TwelvePhase,
}

impl PillarDetail {
    fn new(day_stem: Stem, pillar: Pillar) -> Self {
        Self {
            pillar,
            relation: Relation::Ten(ten_relation(day_stem, pillar.stem)),
            phase: twelve_phase(pillar.stem, pillar.branch),
        }
    }
}

/// 四柱。`hour` 為 `None` 表示時刻未知，此時連同其十神、十二運星一併缺省。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct FourPillars {
    pub year: PillarDetail,
    pub month: PillarDetail,
    pub day: PillarDetail,
    pub hour: Option<PillarDetail>,
}

impl FourPillars {
    /// 日干
    pub fn day_stem(&self) -> Stem {
        self.day.pillar.stem
    }

    pub fn hour_status(&self) -> HourStatus {
        match self.hour {
            Some(_) => HourStatus::Observed,
            None => HourStatus::Unknown,
        }
    }

    /// 依柱位取柱。
    pub fn get(&self, position: Position) -> Option<&PillarDetail> {
        match position {
            Position::Year => Some(&self.year),
            Position::Month => Some(&self.month),
            Position::Day => Some(&self.day),
            Position::Hour => self.hour.as_ref(),
        }
    }

    /// 由三柱干支及鐘點組成四柱。
    ///
    /// # 用例
    ///
    /// ```
    /// use kolonaro::ganzhi::relation::{Relation, TenRelation};
    /// use kolonaro::saju::ClockTime;
    /// use kolonaro::saju::pillars::FourPillars;
    ///
    /// let [y, m, d] = ["庚午", "辛巳", "庚辰"].map(|s| s.parse().unwrap());
    /// let pillars = FourPillars::compose(y, m, d, Some(ClockTime { hour: 10, minute: 30 }));
    /// assert_eq!("辛巳", pillars.hour.unwrap().pillar.to_string());
    /// assert_eq!(Relation::SelfStem, pillars.day.relation);
    /// assert_eq!(Relation::Ten(TenRelation::RobWealth), pillars.month.relation);
    ///
    /// let pillars = FourPillars::compose(y, m, d, None);
    /// assert!(pillars.hour.is_none());
    /// ```
    pub fn compose(year: Pillar, month: Pillar, day: Pillar, clock: Option<ClockTime>) -> Self {
        let day_stem = day.stem;
        let hour = clock
            .and_then(|c| hour_branch(c.hour, c.minute))
            .map(|branch| PillarDetail::new(day_stem, Pillar::new(hour_stem(day_stem, branch), branch)));
        Self {
            year: PillarDetail::new(day_stem, year),
            month: PillarDetail::new(day_stem, month),
            day: PillarDetail {
                relation: Relation::SelfStem,
                ..PillarDetail::new(day_stem, day)
            },
            hour,
        }
    }
}

/// 查萬歲曆取得 `date` 的四柱。
///
/// 曆表無該日則回報 [`Error::DateNotCovered`]；曆表干支無法解析則回報 [`Error::InvalidSymbol`]。
pub fn resolve<C: CalendarLookup + ?Sized>(
    calendar: &C,
    date: Date,
    clock: Option<ClockTime>,
) -> Result<FourPillars> {
    let Some(row) = calendar.lookup(date) else {
        tracing::warn!(%date, "date not covered by the calendar table");
        return Err(Error::DateNotCovered(date));
    };
    let year: Pillar = row.year.parse()?;
    let month: Pillar = row.month.parse()?;
    let day: Pillar = row.day.parse()?;

    let expected = Pillar::from_sexagenary(date.sexagenary());
    if day != expected {
        tracing::warn!(%date, table = %day, expected = %expected, "calendar day pillar disagrees with day count");
    }
    tracing::debug!(%date, %year, %month, %day, observed = clock.is_some(), "resolved pillars");

    Ok(FourPillars::compose(year, month, day, clock))
}
