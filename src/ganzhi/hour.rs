//! 時辰
//!
//! 一日分十二時辰，每時辰兩小時，子時跨越午夜（23:30 至次日 01:29）。
//! 各時辰以分鐘計、首尾皆含，故每一分鐘恰屬一個時辰。

use super::{Branch, Stem};

/// 各時辰的起訖分鐘（含首尾）。子時分為兩段，午夜前一段列於最前。
const WINDOWS: [(u32, u32, Branch); 13] = {
    use Branch::*;
    [
        (1410, 1439, Zi),
        (0, 89, Zi),
        (90, 209, Chou),
        (210, 329, Yin),
        (330, 449, Mao),
        (450, 569, Chen),
        (570, 689, Si),
        (690, 809, Wu),
        (810, 929, Wei),
        (930, 1049, Shen),
        (1050, 1169, You),
        (1170, 1289, Xu),
        (1290, 1409, Hai),
    ]
};

/// 依鐘點取得時支。
///
/// 若 `hour * 60 + minute` 不在一日之內（`0..1440`）則返回 `None`。
///
/// # 用例
///
/// ```
/// use kolonaro::ganzhi::{hour::hour_branch, Branch};
///
/// assert_eq!(Some(Branch::Zi), hour_branch(23, 30));
/// assert_eq!(Some(Branch::Zi), hour_branch(1, 29));
/// assert_eq!(Some(Branch::Chou), hour_branch(1, 30));
/// assert_eq!(None, hour_branch(24, 0));
/// ```
pub fn hour_branch(hour: u32, minute: u32) -> Option<Branch> {
    let total = hour.checked_mul(60)?.checked_add(minute)?;
    WINDOWS
        .iter()
        .find(|&&(start, end, _)| (start..=end).contains(&total))
        .map(|&(_, _, branch)| branch)
}

/// 依日干與時支取得時干（五鼠遁）。
///
/// # 用例
///
/// ```
/// use kolonaro::ganzhi::{hour::hour_stem, Branch, Stem};
///
/// assert_eq!(Stem::Jia, hour_stem(Stem::Jia, Branch::Zi));
/// assert_eq!(Stem::Bing, hour_stem(Stem::Yi, Branch::Zi));
/// assert_eq!(Stem::Gui, hour_stem(Stem::Wu, Branch::Hai));
/// ```
pub fn hour_stem(day: Stem, hour: Branch) -> Stem {
    Stem::from_index(day.index() * 2 + hour.index())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn boundaries() {
        use Branch::*;
        for (std, (h, m)) in [
            (Zi, (0, 0)),
            (Zi, (23, 59)),
            (Hai, (23, 29)),
            (Hai, (21, 30)),
            (Xu, (21, 29)),
            (Wu, (11, 30)),
            (Wu, (13, 29)),
            (Wei, (13, 30)),
            (Chou, (3, 29)),
            (Yin, (3, 30)),
        ] {
            assert_eq!(Some(std), hour_branch(h, m), "{h:02}:{m:02}");
        }
    }

    #[test]
    fn partitions_day() {
        let mut counts = [0u32; 12];
        for total in 0..1440 {
            let hits = WINDOWS
                .iter()
                .filter(|&&(start, end, _)| (start..=end).contains(&total))
                .count();
            assert_eq!(1, hits, "minute {total}");
            let branch = hour_branch(total / 60, total % 60).unwrap();
            counts[branch.index()] += 1;
        }
        assert_eq!([120; 12], counts);
        assert_eq!(None, hour_branch(0, 1440));
        assert_eq!(None, hour_branch(u32::MAX, 0));
    }

    #[test]
    fn five_rat_table() {
        // 甲己日起甲子、乙庚日起丙子、丙辛日起戊子、丁壬日起庚子、戊癸日起壬子
        let starts = [
            Stem::Jia,
            Stem::Bing,
            Stem::Wu,
            Stem::Geng,
            Stem::Ren,
            Stem::Jia,
            Stem::Bing,
            Stem::Wu,
            Stem::Geng,
            Stem::Ren,
        ];
        for (day, std) in Stem::ALL.into_iter().zip(starts) {
            assert_eq!(std, hour_stem(day, Branch::Zi), "{day:?}");
            for branch in Branch::ALL {
                assert_eq!(std.step(branch.index() as i32), hour_stem(day, branch));
            }
        }
    }

    #[test]
    fn hour_stems_cover_all() {
        let mut seen = std::collections::HashSet::new();
        for day in Stem::ALL {
            for branch in Branch::ALL {
                seen.insert(hour_stem(day, branch));
            }
        }
        assert_eq!(10, seen.len());
    }

    proptest! {
        #[test]
        fn five_day_pairing(i in 0usize..10, j in 0usize..12) {
            // 甲己、乙庚、丙辛、丁壬、戊癸 同起
            let day = Stem::from_index(i);
            let branch = Branch::from_index(j);
            prop_assert_eq!(hour_stem(day, branch), hour_stem(day.step(5), branch));
            prop_assert_eq!(branch.index() % 2, hour_stem(day, branch).index() % 2);
        }
    }
}
