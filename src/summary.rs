use crate::data::model::{ColumnKind, ColumnStats};

/// Figures shown in the summary bar above the exploration panels.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub title: String,
    pub column_count: usize,
    pub numeric_columns: usize,
    pub categorical_columns: usize,
    pub preview_rows: usize,
    pub selected_columns: usize,
    /// Share of missing cells over all profiled cells, in percent.
    pub missing_percentage: f64,
}

/// Aggregate missing rate over the statistics table, in percent.
///
/// Each record contributes `missing` missing cells out of `count + missing`
/// profiled cells. An empty table reports 0%.
pub fn missing_percentage(stats: &[ColumnStats]) -> f64 {
    let (missing, total) = stats.iter().fold((0u64, 0u64), |(m, t), s| {
        (m + s.missing, t + s.count + s.missing)
    });
    if total == 0 {
        return 0.0;
    }
    missing as f64 / total as f64 * 100.0
}

/// Count of columns per declared kind: `(numeric, categorical)`.
pub fn kind_counts(stats: &[ColumnStats]) -> (usize, usize) {
    stats.iter().fold((0, 0), |(n, c), s| match s.kind {
        ColumnKind::Numeric => (n + 1, c),
        ColumnKind::Categorical => (n, c + 1),
        ColumnKind::Other(_) => (n, c),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: ColumnKind, count: u64, missing: u64) -> ColumnStats {
        ColumnStats {
            column: "c".into(),
            kind,
            count,
            missing,
            unique: 0,
            min: None,
            max: None,
            mean: None,
            std: None,
        }
    }

    #[test]
    fn missing_rate_over_all_profiled_cells() {
        let stats = vec![
            record(ColumnKind::Numeric, 8, 2),
            record(ColumnKind::Categorical, 9, 1),
        ];
        assert!((missing_percentage(&stats) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn empty_table_has_no_missing() {
        assert_eq!(missing_percentage(&[]), 0.0);
        assert_eq!(missing_percentage(&[record(ColumnKind::Numeric, 0, 0)]), 0.0);
    }

    #[test]
    fn counts_by_kind() {
        let stats = vec![
            record(ColumnKind::Numeric, 1, 0),
            record(ColumnKind::Numeric, 1, 0),
            record(ColumnKind::Categorical, 1, 0),
            record(ColumnKind::Other("date".into()), 1, 0),
        ];
        assert_eq!(kind_counts(&stats), (2, 1));
    }
}
