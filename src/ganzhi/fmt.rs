//! 干支、十神、十二運星相關文本

use super::relation::{TenRelation, TwelvePhase};

/// 十干漢字，依甲至癸排序。
pub const STEM_SYMBOLS: [char; 10] = ['甲', '乙', '丙', '丁', '戊', '己', '庚', '辛', '壬', '癸'];

/// 十二支漢字，依子至亥排序。
pub const BRANCH_SYMBOLS: [char; 12] = [
    '子', '丑', '寅', '卯', '辰', '巳', '午', '未', '申', '酉', '戌', '亥',
];

/// 十神韓文名稱，順序同 [`TenRelation`]。
const TEN_RELATION_NAMES: [&str; 10] = [
    "비견", "겁재", "식신", "상관", "편재", "정재", "편관", "정관", "편인", "정인",
];

/// 十神漢字名稱
const TEN_RELATION_HANJA: [&str; 10] = [
    "比肩", "劫財", "食神", "傷官", "偏財", "正財", "偏官", "正官", "偏印", "正印",
];

/// 十二運星韓文名稱，順序同 [`TwelvePhase`]。
const TWELVE_PHASE_NAMES: [&str; 12] = [
    "장생", "목욕", "관대", "건록", "제왕", "쇠", "병", "사", "묘", "절", "태", "양",
];

const TWELVE_PHASE_HANJA: [&str; 12] = [
    "長生", "沐浴", "冠帶", "建祿", "帝旺", "衰", "病", "死", "墓", "絶", "胎", "養",
];

/// 日干本身的標記，代替十神名稱。
pub const SELF_STEM: &str = "일간";

/// 未知時柱的標記
pub const UNKNOWN: &str = "미상";

/// 取得十神名稱（韓文）。
///
/// # 用例
///
/// ```
/// use kolonaro::ganzhi::{fmt, relation::TenRelation};
///
/// assert_eq!("정재", fmt::ten_relation(TenRelation::DirectWealth));
/// ```
pub fn ten_relation(relation: TenRelation) -> &'static str {
    TEN_RELATION_NAMES[relation as usize]
}

/// 取得十神名稱（漢字）。
pub fn ten_relation_hanja(relation: TenRelation) -> &'static str {
    TEN_RELATION_HANJA[relation as usize]
}

/// 取得十二運星名稱（韓文）。
///
/// # 用例
///
/// ```
/// use kolonaro::ganzhi::{fmt, relation::TwelvePhase};
///
/// assert_eq!("제왕", fmt::twelve_phase(TwelvePhase::Peak));
/// ```
pub fn twelve_phase(phase: TwelvePhase) -> &'static str {
    TWELVE_PHASE_NAMES[phase as usize]
}

/// 取得十二運星名稱（漢字）。
pub fn twelve_phase_hanja(phase: TwelvePhase) -> &'static str {
    TWELVE_PHASE_HANJA[phase as usize]
}

/// 大運標籤，例如「만 2세부터 壬午 대운 시작 (1992)」。
///
/// # 用例
///
/// ```
/// use kolonaro::ganzhi::{fmt, Pillar};
///
/// let pillar: Pillar = "壬午".parse().unwrap();
/// assert_eq!("만 2세부터 壬午 대운 시작 (1992)", fmt::luck_label(2, pillar, 1992));
/// ```
pub fn luck_label(age: u32, pillar: super::Pillar, year: i32) -> String {
    format!("만 {}세부터 {} 대운 시작 ({})", age, pillar, year)
}
