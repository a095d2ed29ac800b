//! 干支
//!
//! Note: 為方便處理諸多術語，本模塊文檔用中文。
//!
//! 十天干、十二地支及其循環運算。干支字串僅在讀入曆表時解析一次，
//! 其後一律以 [`Stem`]、[`Branch`]、[`Pillar`] 表示，故運算本身不會遇到無效符號。

use std::fmt as sfmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::Error;

pub mod fmt;
pub mod hour;
pub mod relation;

/// 天干，依甲至癸排序（序號 `0..=9`）。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Stem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

/// 地支，依子至亥排序（序號 `0..=11`）。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

/// 陰陽
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Yang,
    Yin,
}

/// 五行，依相生次序排列：木生火、火生土、土生金、金生水、水生木。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    /// 相生次序中的序號
    pub fn index(self) -> usize {
        self as usize
    }
    /// 所生之行
    pub fn generates(self) -> Element {
        Self::ALL[(self.index() + 1) % 5]
    }
    /// 所剋之行
    pub fn controls(self) -> Element {
        Self::ALL[(self.index() + 2) % 5]
    }
}

impl Stem {
    /// 全部十干，依序排列。
    pub const ALL: [Stem; 10] = {
        use Stem::*;
        [Jia, Yi, Bing, Ding, Wu, Ji, Geng, Xin, Ren, Gui]
    };

    /// 序號，甲為 0。
    pub fn index(self) -> usize {
        self as usize
    }
    /// 依序號取干，序號自動按 10 取模。
    pub fn from_index(index: usize) -> Stem {
        Self::ALL[index % 10]
    }
    /// 順（`n > 0`）或逆（`n < 0`）推 `n` 位。
    ///
    /// # 用例
    ///
    /// ```
    /// use kolonaro::ganzhi::Stem;
    ///
    /// assert_eq!(Stem::Jia, Stem::Gui.step(1));
    /// assert_eq!(Stem::Gui, Stem::Jia.step(-1));
    /// assert_eq!(Stem::Bing, Stem::Bing.step(10));
    /// ```
    pub fn step(self, n: i32) -> Stem {
        Self::ALL[(self.index() as i32 + n).rem_euclid(10) as usize]
    }
    /// 陽干為甲丙戊庚壬，陰干為乙丁己辛癸。
    pub fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }
    /// 是否陽干
    pub fn is_yang(self) -> bool {
        self.polarity() == Polarity::Yang
    }
    /// 所屬五行
    pub fn element(self) -> Element {
        Element::ALL[self.index() / 2]
    }
    /// 漢字
    pub fn symbol(self) -> char {
        fmt::STEM_SYMBOLS[self.index()]
    }
    /// 由漢字取干，非十干之一則返回 `None`。
    pub fn from_symbol(c: char) -> Option<Stem> {
        fmt::STEM_SYMBOLS
            .iter()
            .position(|&s| s == c)
            .map(Self::from_index)
    }
}

impl Branch {
    /// 全部十二支，依序排列。
    pub const ALL: [Branch; 12] = {
        use Branch::*;
        [Zi, Chou, Yin, Mao, Chen, Si, Wu, Wei, Shen, You, Xu, Hai]
    };

    /// 序號，子為 0。
    pub fn index(self) -> usize {
        self as usize
    }
    /// 依序號取支，序號自動按 12 取模。
    pub fn from_index(index: usize) -> Branch {
        Self::ALL[index % 12]
    }
    /// 順（`n > 0`）或逆（`n < 0`）推 `n` 位。
    ///
    /// # 用例
    ///
    /// ```
    /// use kolonaro::ganzhi::Branch;
    ///
    /// assert_eq!(Branch::Zi, Branch::Hai.step(1));
    /// assert_eq!(Branch::Hai, Branch::Zi.step(-1));
    /// assert_eq!(Branch::Wu, Branch::Wu.step(-12));
    /// ```
    pub fn step(self, n: i32) -> Branch {
        Self::ALL[(self.index() as i32 + n).rem_euclid(12) as usize]
    }
    /// 漢字
    pub fn symbol(self) -> char {
        fmt::BRANCH_SYMBOLS[self.index()]
    }
    /// 由漢字取支，非十二支之一則返回 `None`。
    pub fn from_symbol(c: char) -> Option<Branch> {
        fmt::BRANCH_SYMBOLS
            .iter()
            .position(|&s| s == c)
            .map(Self::from_index)
    }
}

/// 一柱，即一組干支。
///
/// # 用例
///
/// ```
/// use kolonaro::ganzhi::{Branch, Pillar, Stem};
///
/// let pillar: Pillar = "丙午".parse().unwrap();
/// assert_eq!(Pillar::new(Stem::Bing, Branch::Wu), pillar);
/// assert_eq!("丁未", pillar.step(1).to_string());
/// assert!("丙".parse::<Pillar>().is_err());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
}

impl Pillar {
    pub fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }
    /// 由干支序號取柱，1 為甲子、60 為癸亥；序號按 60 循環。
    ///
    /// # 用例
    ///
    /// ```
    /// use kolonaro::ganzhi::Pillar;
    ///
    /// assert_eq!("乙巳", Pillar::from_sexagenary(42).to_string());
    /// assert_eq!("癸亥", Pillar::from_sexagenary(60).to_string());
    /// ```
    pub fn from_sexagenary(num: u32) -> Self {
        let i = (num + 59) as usize;
        Self::new(Stem::from_index(i), Branch::from_index(i))
    }
    /// 取得所給公元年的年柱（以立春前後論年者不在此列，僅依公元年序推算）。
    ///
    /// # 用例
    ///
    /// ```
    /// use kolonaro::ganzhi::Pillar;
    ///
    /// assert_eq!("丙午", Pillar::for_year(2026).to_string());
    /// assert_eq!("庚午", Pillar::for_year(1990).to_string());
    /// ```
    pub fn for_year(year: i32) -> Self {
        Self::from_sexagenary(sexagenary_for_year(year))
    }
    /// 干支同步推 `n` 位，干按 10、支按 12 各自取模。
    pub fn step(self, n: i32) -> Self {
        Self::new(self.stem.step(n), self.branch.step(n))
    }
}

impl sfmt::Display for Pillar {
    fn fmt(&self, f: &mut sfmt::Formatter<'_>) -> sfmt::Result {
        write!(f, "{}{}", self.stem.symbol(), self.branch.symbol())
    }
}

impl FromStr for Pillar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidSymbol(s.to_owned());
        let mut chars = s.trim().chars();
        let stem = chars.next().and_then(Stem::from_symbol).ok_or_else(invalid)?;
        let branch = chars
            .next()
            .and_then(Branch::from_symbol)
            .ok_or_else(invalid)?;
        if chars.next().is_some() {
            return Err(invalid());
        }
        Ok(Self::new(stem, branch))
    }
}

impl Serialize for Stem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.symbol())
    }
}

impl Serialize for Branch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.symbol())
    }
}

impl Serialize for Pillar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 取得所給公元年的干支序號。
///
/// # 用例
///
/// ```
/// use kolonaro::ganzhi::sexagenary_for_year;
///
/// assert_eq!(1, sexagenary_for_year(-2696));
/// ```
pub fn sexagenary_for_year(year: i32) -> u32 {
    (year.rem_euclid(60) as u32 + 2696) % 60 + 1
}
