//! 歲運對照
//!
//! 以某一年（預設 2026 丙午）的干支為準，列出原局各天干及十干全體相對日干的十神、
//! 在該年地支的十二運星，並按十神分為財運、緣分、事業三組。

use serde::Serialize;

use crate::ganzhi::relation::{TenRelation, TwelvePhase, ten_relation, twelve_phase};
use crate::ganzhi::{Branch, Pillar, Stem};

use super::Gender;
use super::pillars::FourPillars;

/// 對照列的來源
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowSource {
    MonthStem,
    YearStem,
    HourStem,
    ReferenceStem,
}

/// 一干的十神及其在某支的十二運星
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct StemReading {
    pub stem: Stem,
    pub relation: TenRelation,
    pub phase: TwelvePhase,
}

impl StemReading {
    /// `stem` 相對日干 `day_stem` 的十神，及其在 `branch` 的十二運星。
    pub fn new(day_stem: Stem, stem: Stem, branch: Branch) -> Self {
        Self {
            stem,
            relation: ten_relation(day_stem, stem),
            phase: twelve_phase(stem, branch),
        }
    }
}

/// 對照列的內容；時刻未知時時干一列明確標為 `Unknown`。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FlowReading {
    Observed(StemReading),
    Unknown,
}

/// 對照表的一列
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct FlowRow {
    pub source: FlowSource,
    /// 如「원국_월간」「세운_천간_2026」
    pub label: String,
    pub reading: FlowReading,
}

/// 按十神分組的十干
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct DomainGroups {
    /// 財運：正財、偏財
    pub wealth: Vec<StemReading>,
    /// 緣分：男命取財星，女命取官星
    pub love: Vec<StemReading>,
    /// 事業：正官、偏官、食神、傷官
    pub career: Vec<StemReading>,
}

/// 依日干、目標地支與性別將十干分組。
///
/// # 用例
///
/// ```
/// use kolonaro::ganzhi::{Branch, Stem};
/// use kolonaro::saju::Gender;
/// use kolonaro::saju::overlay::domain_groups;
///
/// let groups = domain_groups(Stem::Jia, Branch::Wu, Gender::Female);
/// let wealth: Vec<_> = groups.wealth.iter().map(|r| r.stem).collect();
/// assert_eq!(vec![Stem::Wu, Stem::Ji], wealth);
/// let love: Vec<_> = groups.love.iter().map(|r| r.stem).collect();
/// assert_eq!(vec![Stem::Geng, Stem::Xin], love);
/// assert_eq!(4, groups.career.len());
/// ```
pub fn domain_groups(day_stem: Stem, branch: Branch, gender: Gender) -> DomainGroups {
    let readings = Stem::ALL.map(|stem| StemReading::new(day_stem, stem, branch));
    group_readings(&readings, gender)
}

fn group_readings(readings: &[StemReading], gender: Gender) -> DomainGroups {
    let select = |pred: fn(TenRelation) -> bool| -> Vec<StemReading> {
        readings
            .iter()
            .filter(|r| pred(r.relation))
            .copied()
            .collect()
    };
    DomainGroups {
        wealth: select(TenRelation::is_wealth),
        love: match gender {
            Gender::Male => select(TenRelation::is_wealth),
            Gender::Female => select(TenRelation::is_officer),
        },
        career: select(|r| r.is_officer() || r.is_output()),
    }
}

/// 歲運對照全表
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct YearOverlay {
    pub year: i32,
    pub pillar: Pillar,
    /// 原局月干、年干、時干及該年天干，依此次序。
    pub flow: Vec<FlowRow>,
    /// 十干全體，依甲至癸排序。
    pub stems: Vec<StemReading>,
    #[serde(flatten)]
    pub groups: DomainGroups,
}

/// 以 `year` 的干支對照四柱。
pub fn year_overlay(pillars: &FourPillars, year: i32, gender: Gender) -> YearOverlay {
    let pillar = Pillar::for_year(year);
    let day_stem = pillars.day_stem();
    let observed = |stem: Stem| FlowReading::Observed(StemReading::new(day_stem, stem, pillar.branch));

    let hour = match &pillars.hour {
        Some(detail) => observed(detail.pillar.stem),
        None => FlowReading::Unknown,
    };
    let flow = [
        (FlowSource::MonthStem, "원국_월간".to_owned(), observed(pillars.month.pillar.stem)),
        (FlowSource::YearStem, "원국_년간".to_owned(), observed(pillars.year.pillar.stem)),
        (FlowSource::HourStem, "원국_시간".to_owned(), hour),
        (FlowSource::ReferenceStem, format!("세운_천간_{year}"), observed(pillar.stem)),
    ]
    .into_iter()
    .map(|(source, label, reading)| FlowRow {
        source,
        label,
        reading,
    })
    .collect();

    let stems = Stem::ALL.map(|stem| StemReading::new(day_stem, stem, pillar.branch));
    YearOverlay {
        year,
        pillar,
        flow,
        groups: group_readings(&stems, gender),
        stems: stems.to_vec(),
    }
}
