//! 十神與十二運星
//!
//! 兩者皆為固定查表：十神以 `(日干, 他干)` 查 10×10 表，十二運星以 `(天干, 地支)` 查 10×12 表。

use serde::{Serialize, Serializer};

use super::{Branch, Stem, fmt};

/// 十神，即他干相對日干的關係。
///
/// 次序按五行關係排列：同我、我生、我剋、剋我、生我，每組先同陰陽、後異陰陽。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TenRelation {
    /// 比肩
    Companion,
    /// 劫財
    RobWealth,
    /// 食神
    EatingGod,
    /// 傷官
    HurtingOfficer,
    /// 偏財
    IndirectWealth,
    /// 正財
    DirectWealth,
    /// 偏官（七殺）
    SevenKillings,
    /// 正官
    DirectOfficer,
    /// 偏印
    IndirectResource,
    /// 正印
    DirectResource,
}

/// 十二運星，即天干於某支所處的生旺階段。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TwelvePhase {
    /// 長生
    Birth,
    /// 沐浴
    Bath,
    /// 冠帶
    Crown,
    /// 建祿
    Prosperity,
    /// 帝旺
    Peak,
    /// 衰
    Decline,
    /// 病
    Sickness,
    /// 死
    Death,
    /// 墓
    Tomb,
    /// 絶
    Severance,
    /// 胎
    Womb,
    /// 養
    Nurture,
}

impl TenRelation {
    /// 財星（正財、偏財）
    pub fn is_wealth(self) -> bool {
        matches!(self, Self::IndirectWealth | Self::DirectWealth)
    }
    /// 官星（正官、偏官）
    pub fn is_officer(self) -> bool {
        matches!(self, Self::SevenKillings | Self::DirectOfficer)
    }
    /// 食傷（食神、傷官）
    pub fn is_output(self) -> bool {
        matches!(self, Self::EatingGod | Self::HurtingOfficer)
    }
}

use TenRelation::*;
use TwelvePhase::*;

/// 以 `[日干][他干]` 查十神。
#[rustfmt::skip]
static TEN_RELATION: [[TenRelation; 10]; 10] = [
    [Companion, RobWealth, EatingGod, HurtingOfficer, IndirectWealth, DirectWealth, SevenKillings, DirectOfficer, IndirectResource, DirectResource],
    [RobWealth, Companion, HurtingOfficer, EatingGod, DirectWealth, IndirectWealth, DirectOfficer, SevenKillings, DirectResource, IndirectResource],
    [IndirectResource, DirectResource, Companion, RobWealth, EatingGod, HurtingOfficer, IndirectWealth, DirectWealth, SevenKillings, DirectOfficer],
    [DirectResource, IndirectResource, RobWealth, Companion, HurtingOfficer, EatingGod, DirectWealth, IndirectWealth, DirectOfficer, SevenKillings],
    [SevenKillings, DirectOfficer, IndirectResource, DirectResource, Companion, RobWealth, EatingGod, HurtingOfficer, IndirectWealth, DirectWealth],
    [DirectOfficer, SevenKillings, DirectResource, IndirectResource, RobWealth, Companion, HurtingOfficer, EatingGod, DirectWealth, IndirectWealth],
    [IndirectWealth, DirectWealth, SevenKillings, DirectOfficer, IndirectResource, DirectResource, Companion, RobWealth, EatingGod, HurtingOfficer],
    [DirectWealth, IndirectWealth, DirectOfficer, SevenKillings, DirectResource, IndirectResource, RobWealth, Companion, HurtingOfficer, EatingGod],
    [EatingGod, HurtingOfficer, IndirectWealth, DirectWealth, SevenKillings, DirectOfficer, IndirectResource, DirectResource, Companion, RobWealth],
    [HurtingOfficer, EatingGod, DirectWealth, IndirectWealth, DirectOfficer, SevenKillings, DirectResource, IndirectResource, RobWealth, Companion],
];

/// 以 `[天干][地支]` 查十二運星。陽干順行、陰干逆行，戊從丙、己從丁。
#[rustfmt::skip]
static TWELVE_PHASE: [[TwelvePhase; 12]; 10] = [
    [Bath, Crown, Prosperity, Peak, Decline, Sickness, Death, Tomb, Severance, Womb, Nurture, Birth],
    [Sickness, Decline, Peak, Prosperity, Crown, Bath, Birth, Nurture, Womb, Severance, Tomb, Death],
    [Womb, Nurture, Birth, Bath, Crown, Prosperity, Peak, Decline, Sickness, Death, Tomb, Severance],
    [Severance, Tomb, Death, Sickness, Decline, Peak, Prosperity, Crown, Bath, Birth, Nurture, Womb],
    [Womb, Nurture, Birth, Bath, Crown, Prosperity, Peak, Decline, Sickness, Death, Tomb, Severance],
    [Severance, Tomb, Death, Sickness, Decline, Peak, Prosperity, Crown, Bath, Birth, Nurture, Womb],
    [Death, Tomb, Severance, Womb, Nurture, Birth, Bath, Crown, Prosperity, Peak, Decline, Sickness],
    [Birth, Nurture, Womb, Severance, Tomb, Death, Sickness, Decline, Peak, Prosperity, Crown, Bath],
    [Peak, Decline, Sickness, Death, Tomb, Severance, Womb, Nurture, Birth, Bath, Crown, Prosperity],
    [Prosperity, Crown, Bath, Birth, Nurture, Womb, Severance, Tomb, Death, Sickness, Decline, Peak],
];

/// 取得 `other` 相對日干 `day` 的十神。
///
/// # 用例
///
/// ```
/// use kolonaro::ganzhi::Stem;
/// use kolonaro::ganzhi::relation::{ten_relation, TenRelation};
///
/// assert_eq!(TenRelation::DirectWealth, ten_relation(Stem::Jia, Stem::Ji));
/// assert_eq!(TenRelation::Companion, ten_relation(Stem::Geng, Stem::Geng));
/// ```
pub fn ten_relation(day: Stem, other: Stem) -> TenRelation {
    TEN_RELATION[day.index()][other.index()]
}

/// 取得天干 `stem` 在地支 `branch` 的十二運星。
///
/// # 用例
///
/// ```
/// use kolonaro::ganzhi::{Branch, Stem};
/// use kolonaro::ganzhi::relation::{twelve_phase, TwelvePhase};
///
/// assert_eq!(TwelvePhase::Peak, twelve_phase(Stem::Jia, Branch::Mao));
/// assert_eq!(TwelvePhase::Birth, twelve_phase(Stem::Yi, Branch::Wu));
/// ```
pub fn twelve_phase(stem: Stem, branch: Branch) -> TwelvePhase {
    TWELVE_PHASE[stem.index()][branch.index()]
}

/// 命盤中天干的十神欄：日干本身標為「일간」，其餘為十神。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Relation {
    SelfStem,
    Ten(TenRelation),
}

impl Serialize for TenRelation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(fmt::ten_relation(*self))
    }
}

impl Serialize for TwelvePhase {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(fmt::twelve_phase(*self))
    }
}

impl Serialize for Relation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Relation::SelfStem => serializer.serialize_str(fmt::SELF_STEM),
            Relation::Ten(rel) => rel.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ganzhi::Element;

    const TEN_ORDER: [TenRelation; 10] = [
        Companion,
        RobWealth,
        EatingGod,
        HurtingOfficer,
        IndirectWealth,
        DirectWealth,
        SevenKillings,
        DirectOfficer,
        IndirectResource,
        DirectResource,
    ];

    #[test]
    fn ten_relation_follows_elements() {
        for day in Stem::ALL {
            for other in Stem::ALL {
                let (de, oe) = (day.element(), other.element());
                let group = if oe == de {
                    0
                } else if de.generates() == oe {
                    1
                } else if de.controls() == oe {
                    2
                } else if oe.controls() == de {
                    3
                } else {
                    assert_eq!(de, oe.generates());
                    4
                };
                let std = TEN_ORDER[group * 2 + (day.polarity() != other.polarity()) as usize];
                assert_eq!(std, ten_relation(day, other), "{day:?} -> {other:?}");
            }
        }
    }

    #[test]
    fn twelve_phase_follows_birth_positions() {
        use Branch::*;
        let births = [Hai, Wu, Yin, You, Yin, You, Si, Zi, Shen, Mao];
        let order = [
            Birth, Bath, Crown, Prosperity, Peak, Decline, Sickness, Death, Tomb, Severance, Womb,
            Nurture,
        ];
        for (stem, birth) in Stem::ALL.into_iter().zip(births) {
            assert_eq!(Birth, twelve_phase(stem, birth), "{stem:?}");
            let dir = if stem.is_yang() { 1 } else { -1 };
            for (n, std) in (0..).zip(order) {
                assert_eq!(std, twelve_phase(stem, birth.step(dir * n)), "{stem:?} +{n}");
            }
        }
    }

    #[test]
    fn spot_checks() {
        // 甲日見庚為七殺，庚祿在申
        assert_eq!(SevenKillings, ten_relation(Stem::Jia, Stem::Geng));
        assert_eq!(Prosperity, twelve_phase(Stem::Geng, Branch::Shen));
        // 丙午年：丙自坐帝旺
        assert_eq!(Peak, twelve_phase(Stem::Bing, Branch::Wu));
        assert_eq!(Element::Fire, Stem::Bing.element());
    }

    #[test]
    fn groups() {
        assert!(DirectWealth.is_wealth() && IndirectWealth.is_wealth());
        assert!(DirectOfficer.is_officer() && SevenKillings.is_officer());
        assert!(EatingGod.is_output() && HurtingOfficer.is_output());
        assert!(!Companion.is_wealth() && !DirectResource.is_officer());
    }
}
