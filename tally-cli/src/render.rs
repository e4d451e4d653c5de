//! Plain-text rendering of the metrics and the expense history.

use tally_core::{DisplayRow, ExpenseRecord, Summary, format_amount, format_timestamp};

const NO_DATE: &str = "(no date)";

pub fn render_summary(summary: &Summary, symbol: &str) -> String {
    format!(
        "Total Spent: {}   Today: {}   This Month: {}",
        format_amount(summary.total, symbol),
        format_amount(summary.today, symbol),
        format_amount(summary.this_month, symbol),
    )
}

/// One-line description of a record, as used in confirmations.
pub fn row_label(record: &ExpenseRecord, symbol: &str) -> String {
    let when = record
        .timestamp
        .map(format_timestamp)
        .unwrap_or_else(|| NO_DATE.to_string());
    format!(
        "{} - {} by {} on {}",
        format_amount(record.amount, symbol),
        record.category,
        record.person,
        when
    )
}

/// Newest-first history. Row numbers are 1-based display positions.
pub fn render_history(view: &[DisplayRow<'_>], symbol: &str) -> String {
    let mut s = String::new();
    s.push_str(&format!(
        "{:>4}  {:<19}  {:>12}  {:<14}  {:<8}  {}\n",
        "#", "Timestamp", "Amount", "Type", "Person", "Description"
    ));
    for row in view {
        let r = row.record;
        let when = r
            .timestamp
            .map(format_timestamp)
            .unwrap_or_else(|| NO_DATE.to_string());
        s.push_str(&format!(
            "{:>4}  {:<19}  {:>12}  {:<14}  {:<8}  {}\n",
            row.display_index + 1,
            // drop sub-second digits from the table
            when.get(..19).unwrap_or(&when),
            format_amount(r.amount, symbol),
            r.category,
            r.person,
            r.description.as_deref().unwrap_or("")
        ));
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tally_core::{ExpenseDraft, display_view};

    fn records() -> Vec<ExpenseRecord> {
        let at = |h| NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(h, 0, 0);
        vec![
            ExpenseDraft::new(250.0, "Food", "He").validate(at(10)).unwrap(),
            ExpenseDraft::new(100.0, "Travel", "She")
                .with_description("cab")
                .validate(at(12))
                .unwrap(),
        ]
    }

    #[test]
    fn test_summary_line() {
        let s = Summary {
            total: 350.0,
            today: 100.0,
            this_month: 350.0,
        };
        assert_eq!(
            render_summary(&s, "₹"),
            "Total Spent: ₹350.00   Today: ₹100.00   This Month: ₹350.00"
        );
    }

    #[test]
    fn test_row_label() {
        let recs = records();
        assert_eq!(
            row_label(&recs[0], "₹"),
            "₹250.00 - Food by He on 2024-05-01 10:00:00"
        );

        let mut undated = recs[0].clone();
        undated.timestamp = None;
        assert!(row_label(&undated, "₹").ends_with("on (no date)"));
    }

    #[test]
    fn test_history_lists_newest_first() {
        let recs = records();
        let out = render_history(&display_view(&recs), "₹");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].trim_start().starts_with("1  2024-05-01 12:00:00"));
        assert!(lines[1].contains("Travel") && lines[1].ends_with("cab"));
        assert!(lines[2].contains("Food"));
    }
}
