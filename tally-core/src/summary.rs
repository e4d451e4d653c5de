//! Read-only aggregates and the display-ordered view of an expense log.
//!
//! Everything here is pure: functions take a slice of records, never fail,
//! and return zero / empty for empty input. Records whose timestamp is the
//! null marker count toward [`total_spent`] but never toward a date-scoped
//! aggregate.

use chrono::{Datelike, NaiveDate};

use crate::expense::{ExpenseRecord, RecordId};

/// Sum of every amount in the log.
pub fn total_spent(records: &[ExpenseRecord]) -> f64 {
    records.iter().map(|r| r.amount).sum()
}

/// Sum of amounts whose timestamp falls on `date`.
pub fn spent_on(records: &[ExpenseRecord], date: NaiveDate) -> f64 {
    records
        .iter()
        .filter(|r| r.date() == Some(date))
        .map(|r| r.amount)
        .sum()
}

/// Sum of amounts whose timestamp falls in `month` (1-12) of `year`.
pub fn spent_in_month(records: &[ExpenseRecord], year: i32, month: u32) -> f64 {
    records
        .iter()
        .filter(|r| {
            r.date()
                .is_some_and(|d| d.year() == year && d.month() == month)
        })
        .map(|r| r.amount)
        .sum()
}

/// The three headline metrics shown above the history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub total: f64,
    pub today: f64,
    pub this_month: f64,
}

impl Summary {
    /// Compute the metrics relative to `today` (a local calendar date).
    pub fn compute(records: &[ExpenseRecord], today: NaiveDate) -> Self {
        Self {
            total: total_spent(records),
            today: spent_on(records, today),
            this_month: spent_in_month(records, today.year(), today.month()),
        }
    }
}

/// One row of the history as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRow<'a> {
    /// Position in the displayed (newest-first) list
    pub display_index: usize,
    /// Identity of the record in the stored log
    pub id: RecordId,
    pub record: &'a ExpenseRecord,
}

/// Records newest first, each paired with its stored identity.
///
/// Null timestamps sort last; equal timestamps keep insertion order. The
/// identity travels with the record through the sort, so two rows sharing a
/// timestamp still map back to distinct records.
pub fn display_view(records: &[ExpenseRecord]) -> Vec<DisplayRow<'_>> {
    let mut rows: Vec<(RecordId, &ExpenseRecord)> = records
        .iter()
        .enumerate()
        .map(|(i, r)| (RecordId(i), r))
        .collect();

    // Stable sort; Option orders None below Some, so descending puts None last.
    rows.sort_by(|(_, a), (_, b)| b.timestamp.cmp(&a.timestamp));

    rows.into_iter()
        .enumerate()
        .map(|(display_index, (id, record))| DisplayRow {
            display_index,
            id,
            record,
        })
        .collect()
}

/// Translate a displayed row number back to the stored identity.
pub fn resolve_display_index(view: &[DisplayRow<'_>], display_index: usize) -> Option<RecordId> {
    view.get(display_index).map(|row| row.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::ExpenseDraft;
    use chrono::NaiveDateTime;

    fn ts(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn rec(amount: f64, category: &str, person: &str, at: Option<NaiveDateTime>) -> ExpenseRecord {
        let mut r = ExpenseDraft::new(amount, category, person)
            .validate(None)
            .unwrap();
        r.timestamp = at;
        r
    }

    fn may_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_empty_log_is_all_zero() {
        assert_eq!(total_spent(&[]), 0.0);
        assert_eq!(spent_on(&[], may_first()), 0.0);
        assert_eq!(spent_in_month(&[], 2024, 5), 0.0);
        assert!(display_view(&[]).is_empty());
    }

    #[test]
    fn test_food_and_travel_scenario() {
        let records = vec![
            rec(250.0, "Food", "He", Some(ts(1, 10))),
            rec(100.0, "Travel", "She", Some(ts(1, 12))),
        ];
        assert_eq!(total_spent(&records), 350.0);
        assert_eq!(spent_on(&records, may_first()), 350.0);
        assert_eq!(spent_in_month(&records, 2024, 5), 350.0);

        let view = display_view(&records);
        assert_eq!(view[0].record.category, "Travel");
        assert_eq!(view[0].id, RecordId(1));
        assert_eq!(view[1].record.category, "Food");
        assert_eq!(view[1].id, RecordId(0));
    }

    #[test]
    fn test_date_scopes() {
        let records = vec![
            rec(10.0, "Food", "He", Some(ts(1, 23))),
            rec(20.0, "Food", "He", Some(ts(2, 0))),
            rec(
                40.0,
                "Food",
                "He",
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(0, 0, 0),
            ),
            rec(
                80.0,
                "Food",
                "He",
                NaiveDate::from_ymd_opt(2023, 5, 1).unwrap().and_hms_opt(0, 0, 0),
            ),
        ];
        assert_eq!(spent_on(&records, may_first()), 10.0);
        assert_eq!(spent_in_month(&records, 2024, 5), 30.0);
        assert_eq!(spent_in_month(&records, 2023, 5), 80.0);
        assert_eq!(total_spent(&records), 150.0);
    }

    #[test]
    fn test_null_timestamps_count_only_globally_and_sort_last() {
        let records = vec![
            rec(5.0, "Food", "He", None),
            rec(7.0, "Food", "She", Some(ts(1, 9))),
        ];
        assert_eq!(total_spent(&records), 12.0);
        assert_eq!(spent_on(&records, may_first()), 7.0);
        assert_eq!(spent_in_month(&records, 2024, 5), 7.0);

        let view = display_view(&records);
        assert_eq!(view[0].id, RecordId(1));
        assert_eq!(view[1].id, RecordId(0));
        assert_eq!(view[1].record.timestamp, None);
    }

    #[test]
    fn test_equal_timestamps_keep_distinct_identities() {
        let records = vec![
            rec(1.0, "Food", "He", Some(ts(1, 10))),
            rec(2.0, "Travel", "She", Some(ts(3, 10))),
            rec(3.0, "Medical", "She", Some(ts(1, 10))),
        ];
        let view = display_view(&records);
        let ids: Vec<RecordId> = view.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![RecordId(1), RecordId(0), RecordId(2)]);
        assert_eq!(
            view.iter().map(|r| r.display_index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );

        assert_eq!(resolve_display_index(&view, 2), Some(RecordId(2)));
        assert_eq!(resolve_display_index(&view, 1), Some(RecordId(0)));
        assert_eq!(resolve_display_index(&view, 3), None);
    }

    #[test]
    fn test_view_is_sorted_descending() {
        let records: Vec<ExpenseRecord> = [4, 1, 9, 2, 9, 5]
            .iter()
            .map(|d| rec(1.0, "Food", "He", Some(ts(*d, 8))))
            .collect();
        let view = display_view(&records);
        assert_eq!(view.len(), records.len());
        for pair in view.windows(2) {
            assert!(pair[0].record.timestamp >= pair[1].record.timestamp);
        }
    }

    #[test]
    fn test_summary_metrics() {
        let records = vec![
            rec(250.0, "Food", "He", Some(ts(1, 10))),
            rec(100.0, "Travel", "She", Some(ts(2, 12))),
            rec(50.0, "Food", "She", Some(ts(2, 13))),
        ];
        let summary = Summary::compute(&records, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        assert_eq!(
            summary,
            Summary {
                total: 400.0,
                today: 150.0,
                this_month: 400.0,
            }
        );
    }
}
