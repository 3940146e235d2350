//! Record ordering
//!
//! One comparator for every display path: level-1 rank, then revenue
//! descending, then name. Used with a stable sort, so records equal on all
//! three keys keep their input order.

use std::borrow::Borrow;
use std::cmp::Ordering;

use agentmap_common::Record;

use crate::collation;
use crate::revenue::revenue_sort_value;
use crate::taxonomy::compare_level1;

/// Total order over records
pub fn compare(a: &Record, b: &Record) -> Ordering {
    compare_level1(&a.agent_tag, &b.agent_tag)
        .then_with(|| compare_revenue_desc(a, b))
        .then_with(|| collation::compare(&a.name, &b.name))
}

fn compare_revenue_desc(a: &Record, b: &Record) -> Ordering {
    let ra = revenue_sort_value(a);
    let rb = revenue_sort_value(b);
    // Sort values are always finite
    rb.partial_cmp(&ra).unwrap_or(Ordering::Equal)
}

/// Stable sort of `Record`, `Arc<Record>` or `&Record` slices
pub fn sort_records<T>(records: &mut [T])
where
    T: Borrow<Record>,
{
    records.sort_by(|a, b| compare(a.borrow(), b.borrow()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn record(id: u64, tag: &str, arr: &str, name: &str) -> Record {
        Record {
            id,
            agent_tag: tag.to_string(),
            arr: arr.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn ids(records: &[Arc<Record>]) -> Vec<u64> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_layer_rank_first() {
        let infra = record(1, "基础设施层", "$1M", "b");
        let app = record(2, "Agent应用层", "$900M", "a");
        assert_eq!(compare(&infra, &app), Ordering::Less);
    }

    #[test]
    fn test_unranked_after_ranked_then_alphabetic() {
        let ranked = record(1, "Agent应用层", "N/A", "z");
        let robotics = record(2, "robotics", "$1B", "a");
        let aerospace = record(3, "aerospace", "N/A", "a");
        assert_eq!(compare(&ranked, &robotics), Ordering::Less);
        assert_eq!(compare(&aerospace, &robotics), Ordering::Less);
    }

    #[test]
    fn test_revenue_descending_with_product_million_precedence() {
        let a = record(1, "大模型层", "$1B", "a");
        let mut b = record(2, "大模型层", "$1M", "b");
        b.arr_product_million = Some(2000.0);
        assert_eq!(compare(&b, &a), Ordering::Less);
    }

    #[test]
    fn test_missing_revenue_sorts_below_zero() {
        let zero = record(1, "大模型层", "$0", "b");
        let missing = record(2, "大模型层", "N/A", "a");
        assert_eq!(compare(&zero, &missing), Ordering::Less);
    }

    #[test]
    fn test_name_tiebreak() {
        let a = record(1, "大模型层", "$5M", "Zhipu");
        let b = record(2, "大模型层", "$5M", "智谱");
        let c = record(3, "大模型层", "$5M", "deepseek");
        assert_eq!(compare(&c, &a), Ordering::Less);
        assert_eq!(compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_totality_and_antisymmetry() {
        let records = vec![
            record(1, "大模型层", "$5M", "a"),
            record(2, "robotics", "garbage", "b"),
            record(3, "", "", ""),
            record(4, "大模型层", "$5M", "a"),
            record(5, "Agent中间层", "$800K", "c"),
        ];
        for a in &records {
            for b in &records {
                assert_eq!(compare(a, b), compare(b, a).reverse());
            }
        }
    }

    #[test]
    fn test_sort_is_stable_and_repeatable() {
        let mut records: Vec<Arc<Record>> = vec![
            record(1, "Agent应用层", "$5M", "dup"),
            record(2, "基础设施层", "N/A", "x"),
            record(3, "Agent应用层", "$5M", "dup"),
            record(4, "Agent应用层", "$50M", "y"),
            record(5, "Agent应用层", "$5M", "dup"),
        ]
        .into_iter()
        .map(Arc::new)
        .collect();

        sort_records(&mut records);
        assert_eq!(ids(&records), vec![2, 4, 1, 3, 5]);

        sort_records(&mut records);
        assert_eq!(ids(&records), vec![2, 4, 1, 3, 5]);
    }
}
