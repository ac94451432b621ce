//! Fractional sort keys for financial rows.
//!
//! Rows are displayed by `order_index` ascending. A new row placed after
//! display position `k` takes the midpoint between its neighbours, so no
//! other row has to be rewritten. Midpoints eventually collapse onto a
//! neighbour after many insertions at the same spot; `needs_renumber`
//! detects that and `renumbered` produces a fresh `0, 1, 2, …` key set.

use crate::models::financial_row::FinancialRow;
use std::cmp::Ordering;

fn display_cmp(a: &FinancialRow, b: &FinancialRow) -> Ordering {
    a.order_index
        .total_cmp(&b.order_index)
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort rows into display order (stable on equal keys by id).
pub fn sort_for_display(rows: &mut [FinancialRow]) {
    rows.sort_by(display_cmp);
}

fn display_keys(rows: &[FinancialRow]) -> Vec<f64> {
    let mut keys: Vec<f64> = rows.iter().map(|r| r.order_index).collect();
    keys.sort_by(f64::total_cmp);
    keys
}

/// Key for a row appended at the end: `max + 1`, or `0` for an empty list.
pub fn append_key(rows: &[FinancialRow]) -> f64 {
    rows.iter()
        .map(|r| r.order_index)
        .max_by(f64::total_cmp)
        .map(|max| max + 1.0)
        .unwrap_or(0.0)
}

/// Key for a row inserted right after display position `position`
/// (0-based). Positions at or past the last row append.
pub fn insert_after(rows: &[FinancialRow], position: usize) -> f64 {
    let keys = display_keys(rows);
    match (keys.get(position), keys.get(position + 1)) {
        (Some(lower), Some(upper)) => lower + (upper - lower) / 2.0,
        (Some(lower), None) => lower + 1.0,
        _ => append_key(rows),
    }
}

/// True when the key `insert_after` would return does not fall strictly
/// between the two neighbours (precision exhausted or duplicate keys).
pub fn needs_renumber(rows: &[FinancialRow], position: usize) -> bool {
    let keys = display_keys(rows);
    match (keys.get(position), keys.get(position + 1)) {
        (Some(&lower), Some(&upper)) => {
            let mid = insert_after(rows, position);
            !(mid > lower && mid < upper)
        }
        _ => false,
    }
}

/// Fresh integer keys in current display order, as `(row id, key)` pairs.
pub fn renumbered(rows: &[FinancialRow]) -> Vec<(i64, f64)> {
    let mut sorted = rows.to_vec();
    sort_for_display(&mut sorted);
    sorted
        .iter()
        .enumerate()
        .map(|(i, r)| (r.id, i as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category::Category;

    fn row(id: i64, order_index: f64) -> FinancialRow {
        FinancialRow {
            id,
            job_id: 1,
            category: Category::Other,
            description: format!("row {id}"),
            quantity: 1.0,
            unit_cost: 1.0,
            markup_percent: 0.0,
            total_cost: 1.0,
            selling_price: 1.0,
            order_index,
            notes: None,
        }
    }

    #[test]
    fn append_to_empty_and_existing() {
        assert_eq!(append_key(&[]), 0.0);
        assert_eq!(append_key(&[row(1, 0.0), row(2, 4.5), row(3, 2.0)]), 5.5);
    }

    #[test]
    fn insert_between_takes_midpoint() {
        let rows = vec![row(1, 0.0), row(2, 1.0), row(3, 2.0)];
        assert_eq!(insert_after(&rows, 0), 0.5);
        assert_eq!(insert_after(&rows, 1), 1.5);
        assert_eq!(insert_after(&rows, 2), 3.0);
        assert_eq!(insert_after(&rows, 7), 3.0);
        assert_eq!(insert_after(&[], 0), 0.0);
    }

    #[test]
    fn inserted_row_lands_after_position_k() {
        let base = vec![row(1, 0.0), row(2, 1.0), row(3, 1.5), row(4, 3.0)];
        for k in 0..=base.len() {
            let mut rows = base.clone();
            let before: Vec<i64> = rows.iter().map(|r| r.id).collect();
            let key = insert_after(&rows, k);
            rows.push(row(100, key));
            sort_for_display(&mut rows);

            let pos = rows.iter().position(|r| r.id == 100).unwrap();
            let expected = (k + 1).min(before.len());
            assert_eq!(pos, expected, "k = {k}");
            if k < before.len() {
                assert_eq!(rows[pos - 1].id, before[k]);
            }
            if k + 1 < before.len() {
                assert_eq!(rows[pos + 1].id, before[k + 1]);
            }
        }
    }

    #[test]
    fn repeated_insertions_eventually_need_renumbering() {
        let mut rows = vec![row(1, 1.0), row(2, 2.0)];
        let mut next_id = 10;
        let mut collapsed = false;
        for _ in 0..200 {
            if needs_renumber(&rows, 0) {
                collapsed = true;
                break;
            }
            let key = insert_after(&rows, 0);
            rows.push(row(next_id, key));
            next_id += 1;
        }
        assert!(collapsed);

        let fresh = renumbered(&rows);
        assert_eq!(fresh.first(), Some(&(1, 0.0)));
        assert_eq!(fresh.last(), Some(&(2, (rows.len() - 1) as f64)));
    }

    #[test]
    fn duplicate_keys_need_renumbering() {
        let rows = vec![row(1, 2.0), row(2, 2.0)];
        assert!(needs_renumber(&rows, 0));
        assert!(!needs_renumber(&rows, 1));
    }
}
