//! 命盤摘要文本
//!
//! 只作排版，不含任何解讀。

use crate::ganzhi::fmt;
use crate::ganzhi::relation::Relation;

use super::pillars::{PillarDetail, Position};
use super::{Chart, Gender};

fn gender_label(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "남자",
        Gender::Female => "여자",
    }
}

fn relation_label(relation: Relation) -> &'static str {
    match relation {
        Relation::SelfStem => fmt::SELF_STEM,
        Relation::Ten(rel) => fmt::ten_relation(rel),
    }
}

/// 依年、月、日、時次序排出一行，時柱缺省時以「미상」代替。
fn row(chart: &Chart, title: &str, cell: impl Fn(&PillarDetail) -> String) -> String {
    let cells: Vec<String> = Position::ALL
        .iter()
        .map(|&position| {
            let value = chart
                .pillars
                .get(position)
                .map(&cell)
                .unwrap_or_else(|| fmt::UNKNOWN.to_owned());
            format!("{} {}", position.label(), value)
        })
        .collect();
    format!("{title}: {}", cells.join(" / "))
}

/// 命盤的多行摘要。
///
/// # 用例
///
/// ```
/// use kolonaro::date::Date;
/// use kolonaro::saju::{report, BirthInput, Engine};
/// use kolonaro::tables::{CalendarRow, CalendarTable, SolarTermTable};
///
/// let calendar = CalendarTable::from_rows([CalendarRow {
///     date: Date::from_gregorian(1990, 5, 15).unwrap(),
///     year: "庚午".into(),
///     month: "辛巳".into(),
///     day: "庚辰".into(),
/// }]);
/// let engine = Engine::new(calendar, SolarTermTable::default());
/// let input = BirthInput::new(1990, 5, 15, None, None, 2, "김영희").unwrap();
/// let text = report::text_block(&engine.compute(&input).unwrap());
/// assert!(text.contains("사주: 년주 庚午 / 월주 辛巳 / 일주 庚辰 / 시주 미상"));
/// assert!(text.contains("여자"));
/// ```
pub fn text_block(chart: &Chart) -> String {
    let input = &chart.input;
    let luck = &chart.luck;

    let birth = match input.clock {
        Some(c) => format!("{} {:02}:{:02}", input.date, c.hour, c.minute),
        None => format!("{} (시각 {})", input.date, fmt::UNKNOWN),
    };
    let mut lines = vec![
        format!("이름: {}", input.name),
        format!("생년월일시: {birth}"),
        format!("성별: {}", gender_label(input.gender)),
        row(chart, "사주", |d| d.pillar.to_string()),
        row(chart, "십신", |d| relation_label(d.relation).to_owned()),
        row(chart, "십이운성", |d| fmt::twelve_phase(d.phase).to_owned()),
        format!(
            "대운수: {:.2} (반올림 {}세, 전통 기준 {}년 시작)",
            luck.start.raw, luck.start.rounded, luck.start.traditional_year
        ),
        "대운:".to_owned(),
    ];
    lines.extend(luck.labels().map(|label| format!("  {label}")));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::{Date, Moment};
    use crate::saju::daeun::{Direction, LuckCycle, StartAge};
    use crate::saju::overlay::year_overlay;
    use crate::saju::pillars::FourPillars;
    use crate::saju::{BirthInput, ClockTime};

    fn chart(clock: Option<(u32, u32)>) -> Chart {
        let input = BirthInput::new(1990, 5, 15, clock.map(|c| c.0), clock.map(|c| c.1), 1, "홍길동").unwrap();
        let [y, m, d] = ["庚午", "辛巳", "庚辰"].map(|s| s.parse().unwrap());
        let pillars = FourPillars::compose(
            y,
            m,
            d,
            clock.map(|(hour, minute)| ClockTime { hour, minute }),
        );
        let birth = Moment::midnight(Date::from_gregorian(1990, 5, 15).unwrap());
        Chart {
            hour_status: pillars.hour_status(),
            luck: LuckCycle {
                direction: Direction::Forward,
                start: StartAge {
                    raw: 8827.0 / 4320.0,
                    rounded: 2,
                    traditional_year: 1991,
                    anchor: Some(birth),
                    start: birth,
                    startpoints: Vec::new(),
                },
                entries: Vec::new(),
            },
            overlay: year_overlay(&pillars, 2026, input.gender),
            pillars,
            input,
        }
    }

    #[test]
    fn observed_hour() {
        let text = text_block(&chart(Some((10, 30))));
        let std = [
            "이름: 홍길동",
            "생년월일시: 1990-05-15 10:30",
            "성별: 남자",
            "사주: 년주 庚午 / 월주 辛巳 / 일주 庚辰 / 시주 辛巳",
            "십신: 년주 비견 / 월주 겁재 / 일주 일간 / 시주 겁재",
            "십이운성: 년주 목욕 / 월주 사 / 일주 양 / 시주 사",
            "대운수: 2.04 (반올림 2세, 전통 기준 1991년 시작)",
            "대운:",
        ];
        assert_eq!(std.len(), text.lines().count());
        for (line, expected) in text.lines().zip(std) {
            assert_eq!(expected, line);
        }
    }

    #[test]
    fn unknown_hour() {
        let text = text_block(&chart(None));
        assert!(text.contains("생년월일시: 1990-05-15 (시각 미상)"));
        assert!(text.contains("시주 미상"));
        assert_eq!(4, text.matches("미상").count());
    }
}
