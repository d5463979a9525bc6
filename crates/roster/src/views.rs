//! Record views: filtering, column sorting and report ordering

use std::cmp::Ordering;

use shared::{BattleRecord, FilterConfig, PlayerClass, SortConfig, SortOrder};

/// Records that pass every set filter field, in input order
pub fn apply_filter<'a>(records: &'a [BattleRecord], filter: &FilterConfig) -> Vec<&'a BattleRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

/// Stable sort by one column
pub fn sort_records(records: &mut [&BattleRecord], sort: SortConfig) {
    records.sort_by(|a, b| {
        let ordering = match (sort.field.metric(a), sort.field.metric(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => a.player_name.cmp(&b.player_name),
        };
        match sort.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Ordering used for per-team report sheets
///
/// Healers (素问) come first by healing, then tanks (铁衣) by control,
/// then everyone else by total damage; all descending.
pub fn report_order(a: &BattleRecord, b: &BattleRecord) -> Ordering {
    fn rank(record: &BattleRecord) -> u8 {
        match record.class {
            PlayerClass::Suwen => 0,
            PlayerClass::Tieyi => 1,
            _ => 2,
        }
    }

    rank(a).cmp(&rank(b)).then_with(|| match a.class {
        PlayerClass::Suwen => b.healing.cmp(&a.healing),
        PlayerClass::Tieyi => b.control.cmp(&a.control),
        _ => b.total_damage().cmp(&a.total_damage()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::SortField;

    fn record(name: &str, class: PlayerClass, healing: u64, control: u64, damage: u64) -> BattleRecord {
        let mut r = BattleRecord::new("青云帮", name, "老王");
        r.class = class;
        r.healing = healing;
        r.control = control;
        r.player_damage = damage;
        r.kills = damage / 100;
        r
    }

    fn names(records: &[&BattleRecord]) -> Vec<String> {
        records.iter().map(|r| r.player_name.clone()).collect()
    }

    #[test]
    fn test_report_order() {
        let mut records = vec![
            record("dps-low", PlayerClass::Xuehe, 0, 0, 100),
            record("tank-low", PlayerClass::Tieyi, 0, 5, 9_999),
            record("heal-low", PlayerClass::Suwen, 10, 0, 0),
            record("dps-high", PlayerClass::Suimeng, 0, 0, 900),
            record("heal-high", PlayerClass::Suwen, 90, 0, 0),
            record("tank-high", PlayerClass::Tieyi, 0, 50, 0),
        ];

        records.sort_by(report_order);

        let order: Vec<_> = records.iter().map(|r| r.player_name.as_str()).collect();
        assert_eq!(
            order,
            vec!["heal-high", "heal-low", "tank-high", "tank-low", "dps-high", "dps-low"]
        );
    }

    #[test]
    fn test_filter_and_sort() {
        let records = vec![
            record("a", PlayerClass::Xuehe, 0, 0, 300),
            record("b", PlayerClass::Suwen, 0, 0, 100),
            record("c", PlayerClass::Xuehe, 0, 0, 500),
        ];
        let filter = FilterConfig {
            class: Some(PlayerClass::Xuehe),
            ..Default::default()
        };

        let mut view = apply_filter(&records, &filter);
        assert_eq!(names(&view), vec!["a", "c"]);

        sort_records(
            &mut view,
            SortConfig {
                field: SortField::TotalDamage,
                order: SortOrder::Desc,
            },
        );
        assert_eq!(names(&view), vec!["c", "a"]);
    }

    #[test]
    fn test_sort_by_name_and_stability() {
        let records = vec![
            record("b", PlayerClass::Other, 0, 0, 100),
            record("a", PlayerClass::Other, 0, 0, 100),
            record("c", PlayerClass::Other, 0, 0, 200),
        ];

        let mut view: Vec<_> = records.iter().collect();
        sort_records(
            &mut view,
            SortConfig {
                field: SortField::TotalDamage,
                order: SortOrder::Asc,
            },
        );
        assert_eq!(names(&view), vec!["b", "a", "c"]);

        sort_records(
            &mut view,
            SortConfig {
                field: SortField::PlayerName,
                order: SortOrder::Asc,
            },
        );
        assert_eq!(names(&view), vec!["a", "b", "c"]);
    }
}
