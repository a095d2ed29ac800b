//! 日運、月運
//!
//! 以萬歲曆查得某日的日柱或月柱，對照命主日干。月運以月建轉換之日為界，
//! 自某年元旦排至次年三月一日前，最多十三段。

use serde::Serialize;

use crate::date::Date;
use crate::error::{Error, Result};
use crate::ganzhi::relation::{TenRelation, TwelvePhase, ten_relation, twelve_phase};
use crate::ganzhi::{Pillar, Stem};
use crate::tables::{CalendarLookup, CalendarRow, SolarTermLookup};

use super::Engine;

/// 月運最多段數
pub const MAX_MONTH_SEGMENTS: usize = 13;

/// 某日的日柱或月柱對照日干的結果
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct PillarReading {
    pub date: Date,
    pub pillar: Pillar,
    /// 天干相對日干的十神
    pub relation: TenRelation,
    /// 天干在本柱地支的十二運星
    pub phase: TwelvePhase,
}

/// 一段月運：同一月建持續的日期區間（含首尾）。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct MonthSegment {
    pub pillar: Pillar,
    pub relation: TenRelation,
    pub phase: TwelvePhase,
    pub start: Date,
    pub end: Date,
}

fn reading(day_stem: Stem, date: Date, pillar: Pillar) -> PillarReading {
    PillarReading {
        date,
        pillar,
        relation: ten_relation(day_stem, pillar.stem),
        phase: twelve_phase(pillar.stem, pillar.branch),
    }
}

impl<C: CalendarLookup, S: SolarTermLookup> Engine<C, S> {
    fn row(&self, date: Date) -> Result<&CalendarRow> {
        self.calendar.lookup(date).ok_or_else(|| {
            tracing::warn!(%date, "date not covered by the calendar table");
            Error::DateNotCovered(date)
        })
    }

    /// 日運：`date` 的日柱對照日干 `day_stem`。
    pub fn day_reading(&self, day_stem: Stem, date: Date) -> Result<PillarReading> {
        let pillar = self.row(date)?.day.parse()?;
        Ok(reading(day_stem, date, pillar))
    }

    /// 月運：`date` 所在月建對照日干 `day_stem`。
    pub fn month_reading(&self, day_stem: Stem, date: Date) -> Result<PillarReading> {
        let pillar = self.row(date)?.month.parse()?;
        Ok(reading(day_stem, date, pillar))
    }

    /// 自 `year` 年元旦至次年三月一日前，按月建轉換分段排月運。
    ///
    /// 某日月建與曆表中前一筆不同（元旦前一日不在曆表內亦同）即為新段之始，缺日略過；
    /// 每段止於次段開始前一日，故只列出已知次段起點的各段。區間內無任何曆表資料則返回空表。
    pub fn monthly_readings(&self, day_stem: Stem, year: i32) -> Result<Vec<MonthSegment>> {
        let out_of_range = || Error::InvalidInput(format!("year {year} out of range"));
        let first = Date::from_gregorian(year, 1, 1).ok_or_else(out_of_range)?;
        let end = year
            .checked_add(1)
            .and_then(|next| Date::from_gregorian(next, 3, 1))
            .ok_or_else(out_of_range)?;

        let mut changes: Vec<(Date, &str)> = Vec::with_capacity(MAX_MONTH_SEGMENTS + 1);
        let mut prev = self.calendar.lookup(first + -1).map(|row| row.month.as_str());
        let mut date = first;
        while date < end && changes.len() <= MAX_MONTH_SEGMENTS {
            if let Some(row) = self.calendar.lookup(date) {
                let month = row.month.as_str();
                if prev != Some(month) {
                    changes.push((date, month));
                }
                prev = Some(month);
            }
            date = date + 1;
        }
        tracing::debug!(year, changes = changes.len(), "month pillar changes");

        changes
            .windows(2)
            .take(MAX_MONTH_SEGMENTS)
            .map(|pair| {
                let (start, month) = pair[0];
                let pillar: Pillar = month.parse()?;
                Ok(MonthSegment {
                    pillar,
                    relation: ten_relation(day_stem, pillar.stem),
                    phase: twelve_phase(pillar.stem, pillar.branch),
                    start,
                    end: pair[1].0 + -1,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ganzhi::relation::TenRelation::*;
    use crate::tables::{CalendarTable, SolarTermTable};

    /// 2026-01-01 至 2027-03-31，每月六日換月建（月柱自 戊子 起，年柱僅作填充）。
    fn engine() -> Engine<CalendarTable, SolarTermTable> {
        let first = Date::from_gregorian(2026, 1, 1).unwrap();
        let last = Date::from_gregorian(2027, 3, 31).unwrap();
        let mut month = "戊子".parse::<Pillar>().unwrap();
        let mut rows = Vec::new();
        let mut date = first;
        while date <= last {
            if date.gregorian().2 == 6 {
                month = month.step(1);
            }
            rows.push(CalendarRow {
                date,
                year: "丙午".into(),
                month: month.to_string(),
                day: Pillar::from_sexagenary(date.sexagenary()).to_string(),
            });
            date = date + 1;
        }
        Engine::new(CalendarTable::from_rows(rows), SolarTermTable::default())
    }

    #[test]
    fn day_and_month() {
        let engine = engine();
        let date = Date::from_gregorian(2026, 1, 1).unwrap();
        let day = engine.day_reading(Stem::Geng, date).unwrap();
        assert_eq!("乙亥", day.pillar.to_string());
        assert_eq!(DirectWealth, day.relation);

        let month = engine.month_reading(Stem::Geng, date).unwrap();
        assert_eq!("戊子", month.pillar.to_string());
        assert_eq!(IndirectResource, month.relation);

        let missing = Date::from_gregorian(2030, 1, 1).unwrap();
        assert!(matches!(
            engine.day_reading(Stem::Geng, missing),
            Err(Error::DateNotCovered(_))
        ));
    }

    #[test]
    fn thirteen_segments() {
        let segments = engine().monthly_readings(Stem::Geng, 2026).unwrap();
        assert_eq!(MAX_MONTH_SEGMENTS, segments.len());

        // 元旦前一日不在曆表內，元旦即為首段起點
        let first = &segments[0];
        assert_eq!("戊子", first.pillar.to_string());
        assert_eq!("2026-01-01", first.start.iso_gregorian());
        assert_eq!("2026-01-05", first.end.iso_gregorian());

        let second = &segments[1];
        assert_eq!("己丑", second.pillar.to_string());
        assert_eq!("2026-01-06", second.start.iso_gregorian());
        assert_eq!("2026-02-05", second.end.iso_gregorian());

        let last = &segments[12];
        assert_eq!("2026-12-06", last.start.iso_gregorian());
        assert_eq!("2027-01-05", last.end.iso_gregorian());
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end + 1, pair[1].start);
        }
    }

    #[test]
    fn partial_coverage() {
        // 2027-03-31 之後無資料，03-06 起的一段沒有終點；元旦與前一日同為 庚子，不另起段
        let segments = engine().monthly_readings(Stem::Geng, 2027).unwrap();
        let starts: Vec<_> = segments.iter().map(|s| s.start.iso_gregorian()).collect();
        assert_eq!(vec!["2027-01-06", "2027-02-06"], starts);
        assert_eq!("辛丑", segments[0].pillar.to_string());

        assert!(engine().monthly_readings(Stem::Geng, 2020).unwrap().is_empty());
        assert!(matches!(
            engine().monthly_readings(Stem::Geng, i32::MAX),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn gaps_are_skipped() {
        let mut rows: Vec<CalendarRow> = Vec::new();
        for (y, m, d, month) in [
            (2026, 1, 2, "戊子"),
            (2026, 1, 3, "戊子"),
            (2026, 1, 7, "戊子"),
            (2026, 1, 8, "己丑"),
            (2026, 2, 5, "己丑"),
            (2026, 2, 6, "庚寅"),
        ] {
            let date = Date::from_gregorian(y, m, d).unwrap();
            rows.push(CalendarRow {
                date,
                year: "丙午".into(),
                month: month.into(),
                day: Pillar::from_sexagenary(date.sexagenary()).to_string(),
            });
        }
        let engine = Engine::new(CalendarTable::from_rows(rows), SolarTermTable::default());
        let segments = engine.monthly_readings(Stem::Geng, 2026).unwrap();
        let spans: Vec<_> = segments
            .iter()
            .map(|s| (s.pillar.to_string(), s.start.iso_gregorian(), s.end.iso_gregorian()))
            .collect();
        assert_eq!(
            vec![
                ("戊子".to_owned(), "2026-01-02".to_owned(), "2026-01-07".to_owned()),
                ("己丑".to_owned(), "2026-01-08".to_owned(), "2026-02-05".to_owned()),
            ],
            spans
        );
    }
}
