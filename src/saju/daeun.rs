//! 大運
//!
//! 大運自月柱起推，陽年男命、陰年女命順行，其餘逆行。起運歲數以出生時刻至
//! 相鄰節氣的時距換算：三日折一歲，即每 4320 分鐘為一歲。
//!
//! 若節氣表無出生年資料，或該年中找不到所需方向的節氣，則按固定值起運：
//! 八歲起運、傳統起運年為出生年加七。

use serde::{Serialize, Serializer};

use crate::date::Moment;
use crate::ganzhi::relation::{TenRelation, TwelvePhase, ten_relation, twelve_phase};
use crate::ganzhi::{Pillar, Stem, fmt};
use crate::tables::{SolarTerm, SolarTermLookup};

use super::Gender;
use super::pillars::FourPillars;

/// 每一歲相當的分鐘數（三日）
pub const MINUTES_PER_YEAR: f64 = 4320.0;

/// 找不到起運節氣時採用的起運歲數
pub const FALLBACK_AGE: f64 = 8.0;

/// 大運步數
pub const LUCK_PILLAR_COUNT: usize = 10;

/// 起運後換算日期所用的年長（日）
const DAYS_PER_YEAR: f64 = 365.25;
const SECONDS_PER_DAY: f64 = 86400.0;

/// 大運方向
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// 每步推移的位數，順行 `+1`、逆行 `-1`。
    pub fn step(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.step())
    }
}

/// 依年干陰陽與性別定大運方向。
///
/// # 用例
///
/// ```
/// use kolonaro::ganzhi::Stem;
/// use kolonaro::saju::Gender;
/// use kolonaro::saju::daeun::{direction, Direction};
///
/// assert_eq!(Direction::Forward, direction(Stem::Geng, Gender::Male));
/// assert_eq!(Direction::Backward, direction(Stem::Geng, Gender::Female));
/// assert_eq!(Direction::Forward, direction(Stem::Xin, Gender::Female));
/// ```
pub fn direction(year_stem: Stem, gender: Gender) -> Direction {
    match (year_stem.is_yang(), gender) {
        (true, Gender::Male) | (false, Gender::Female) => Direction::Forward,
        _ => Direction::Backward,
    }
}

/// 起運歲數及起運時刻
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartAge {
    /// 未經取整的起運歲數
    pub raw: f64,
    /// 取整並限於 `1..=10` 的起運歲數
    pub rounded: u32,
    /// 傳統起運年（公元）
    pub traditional_year: i32,
    /// 用作起點的節氣時刻；採用固定值時為 `None`。
    pub anchor: Option<Moment>,
    /// 起運時刻，即出生時刻加 `raw` 年（每年 365.25 日）。採用固定值時即出生時刻。
    pub start: Moment,
    /// 各步大運的開始時刻，每步十年；採用固定值時為空。
    pub startpoints: Vec<Moment>,
}

impl StartAge {
    fn fallback(birth: Moment) -> Self {
        let birth_year = birth.date().gregorian().0;
        tracing::debug!(%birth, "no solar term to anchor the luck pillars; using default start age");
        Self {
            raw: FALLBACK_AGE,
            rounded: round_age(FALLBACK_AGE),
            traditional_year: birth_year + 7,
            anchor: None,
            start: birth,
            startpoints: Vec::new(),
        }
    }

    /// 是否採用了固定起運值
    pub fn is_fallback(&self) -> bool {
        self.anchor.is_none()
    }
}

/// 起運歲數四捨五入（恰為半數時進位），並限於 `1..=10`。
///
/// # 用例
///
/// ```
/// use kolonaro::saju::daeun::round_age;
///
/// assert_eq!(2, round_age(2.49));
/// assert_eq!(3, round_age(2.5));
/// assert_eq!(4, round_age(3.5));
/// assert_eq!(1, round_age(0.2));
/// assert_eq!(1, round_age(-3.0));
/// assert_eq!(10, round_age(12.7));
/// ```
pub fn round_age(raw: f64) -> u32 {
    (raw + 0.5).floor().max(1.0).min(10.0) as u32
}

/// 依取整後的起運歲數定傳統起運年。
pub fn traditional_year(birth_year: i32, rounded: u32) -> i32 {
    if rounded == 1 {
        birth_year + 1
    } else {
        birth_year + rounded as i32 - 1
    }
}

/// 依出生時刻及出生年的節氣計算起運。
///
/// 順行取出生後最早的節氣（不含出生時刻本身），逆行取出生時或之前最晚的節氣。
pub fn start_age(birth: Moment, terms: Option<&[SolarTerm]>, direction: Direction) -> StartAge {
    let Some(terms) = terms else {
        return StartAge::fallback(birth);
    };
    let mut instants: Vec<Moment> = terms.iter().map(|t| t.at).collect();
    instants.sort_unstable();

    let anchor = match direction {
        Direction::Forward => instants.iter().find(|&&at| at > birth),
        Direction::Backward => instants.iter().rev().find(|&&at| at <= birth),
    };
    let Some(&anchor) = anchor else {
        return StartAge::fallback(birth);
    };

    let delta_secs = match direction {
        Direction::Forward => anchor - birth,
        Direction::Backward => birth - anchor,
    };
    let raw = delta_secs as f64 / 60.0 / MINUTES_PER_YEAR;
    let rounded = round_age(raw);

    let year_secs = DAYS_PER_YEAR * SECONDS_PER_DAY;
    let start = birth.add_seconds((raw * year_secs).round() as i64);
    let startpoints = (0..LUCK_PILLAR_COUNT as i64)
        .map(|i| start.add_seconds(i * (10.0 * year_secs) as i64))
        .collect();

    StartAge {
        raw,
        rounded,
        traditional_year: traditional_year(birth.date().gregorian().0, rounded),
        anchor: Some(anchor),
        start,
        startpoints,
    }
}

/// 自月柱起依方向推出大運十步。第一步為月柱推一位。
///
/// # 用例
///
/// ```
/// use kolonaro::saju::daeun::{luck_pillars, Direction};
///
/// let month = "辛巳".parse().unwrap();
/// let pillars = luck_pillars(month, Direction::Forward);
/// assert_eq!("壬午", pillars[0].to_string());
/// assert_eq!("辛卯", pillars[9].to_string());
/// let pillars = luck_pillars(month, Direction::Backward);
/// assert_eq!("庚辰", pillars[0].to_string());
/// ```
pub fn luck_pillars(month: Pillar, direction: Direction) -> [Pillar; LUCK_PILLAR_COUNT] {
    let step = direction.step();
    std::array::from_fn(|i| month.step(step * (i as i32 + 1)))
}

/// 第 `index` 步大運標示的歲數。
///
/// 起運歲數大於 1 時為 `起運歲數 - 1 + 10 × index`，否則為 `1 + 10 × index`。
pub fn label_age(base_age: u32, index: usize) -> u32 {
    let step = 10 * index as u32;
    if base_age > 1 {
        base_age - 1 + step
    } else {
        1 + step
    }
}

/// 一步大運
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LuckPillar {
    pub index: usize,
    pub pillar: Pillar,
    /// 大運天干相對日干的十神
    pub relation: TenRelation,
    /// 大運天干在大運地支的十二運星
    pub phase: TwelvePhase,
    /// 標示歲數
    pub label_age: u32,
    /// 標示年份，即出生年加標示歲數
    pub year: i32,
    pub label: String,
}

/// 大運全表
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LuckCycle {
    pub direction: Direction,
    #[serde(flatten)]
    pub start: StartAge,
    pub entries: Vec<LuckPillar>,
}

impl LuckCycle {
    /// 各步大運標籤
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }
}

/// 由四柱、出生時刻與性別排大運。
pub fn luck_cycle<S: SolarTermLookup + ?Sized>(
    solar_terms: &S,
    birth: Moment,
    pillars: &FourPillars,
    gender: Gender,
) -> LuckCycle {
    let direction = direction(pillars.year.pillar.stem, gender);
    let birth_year = birth.date().gregorian().0;
    let start = start_age(birth, solar_terms.terms_for_year(birth_year), direction);

    let day_stem = pillars.day_stem();
    let entries = luck_pillars(pillars.month.pillar, direction)
        .into_iter()
        .enumerate()
        .map(|(index, pillar)| {
            let label_age = label_age(start.rounded, index);
            let year = birth_year + label_age as i32;
            LuckPillar {
                index,
                pillar,
                relation: ten_relation(day_stem, pillar.stem),
                phase: twelve_phase(pillar.stem, pillar.branch),
                label_age,
                year,
                label: fmt::luck_label(label_age, pillar, year),
            }
        })
        .collect();

    LuckCycle {
        direction,
        start,
        entries,
    }
}
