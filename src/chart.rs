use crate::cache::DatasetVersion;
use crate::data::model::Preview;

// ---------------------------------------------------------------------------
// Series projection
// ---------------------------------------------------------------------------

/// One point of a scatter series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

/// Numeric values of `column` across the preview rows.
///
/// Non-numeric and missing cells are dropped. An unknown column yields an
/// empty series.
pub fn histogram(preview: &Preview, column: &str) -> Vec<f64> {
    let Some(idx) = preview.column_index(column) else {
        return Vec::new();
    };
    preview
        .rows
        .iter()
        .filter_map(|row| row.get(idx)?.as_number())
        .collect()
}

/// Same-row `(x, y)` pairs where both cells are numeric.
///
/// A row with only one numeric coordinate contributes nothing. An unset or
/// unknown axis yields an empty series.
pub fn scatter(preview: &Preview, x_col: Option<&str>, y_col: Option<&str>) -> Vec<ScatterPoint> {
    let (Some(x_col), Some(y_col)) = (x_col, y_col) else {
        return Vec::new();
    };
    let (Some(xi), Some(yi)) = (preview.column_index(x_col), preview.column_index(y_col)) else {
        return Vec::new();
    };
    preview
        .rows
        .iter()
        .filter_map(|row| {
            let x = row.get(xi)?.as_number()?;
            let y = row.get(yi)?.as_number()?;
            Some(ScatterPoint { x, y })
        })
        .collect()
}

/// Initial scatter axes: the first and second numeric columns, if present.
pub fn default_axes(numeric_columns: &[String]) -> (Option<String>, Option<String>) {
    let mut iter = numeric_columns.iter().cloned();
    (iter.next(), iter.next())
}

// ---------------------------------------------------------------------------
// Histogram binning (display)
// ---------------------------------------------------------------------------

/// An equal-width bucket of a histogram series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Bucket `values` into `bins` equal-width bins spanning their range.
///
/// Empty input gives no bins; a zero-width range collapses to a single bin.
pub fn bin_values(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range.abs() < f64::EPSILON {
        return vec![HistogramBin {
            start: min - 0.5,
            end: max + 0.5,
            count: values.len(),
        }];
    }

    let width = range / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        // The maximum lands in the last bin rather than one past it.
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + width * i as f64,
            end: min + width * (i + 1) as f64,
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// ChartProjector – memoised derived series
// ---------------------------------------------------------------------------

/// A derived value tagged with the inputs it was computed from.
#[derive(Debug)]
struct Memo<K, V> {
    key: Option<K>,
    value: V,
}

impl<K: PartialEq, V: Default> Memo<K, V> {
    fn new() -> Self {
        Self {
            key: None,
            value: V::default(),
        }
    }

    fn refresh(&mut self, key: K, compute: impl FnOnce() -> V) -> bool {
        if self.key.as_ref() == Some(&key) {
            return false;
        }
        self.value = compute();
        self.key = Some(key);
        true
    }
}

type HistogramKey = (DatasetVersion, Option<String>);
type ScatterKey = (DatasetVersion, Option<String>, Option<String>);

/// Holds the scatter axes and the derived histogram / scatter series.
///
/// `project` recomputes a series only when one of its inputs changed, so
/// calling it after every state update is cheap.
#[derive(Debug)]
pub struct ChartProjector {
    x_col: Option<String>,
    y_col: Option<String>,
    histogram: Memo<HistogramKey, Vec<f64>>,
    scatter: Memo<ScatterKey, Vec<ScatterPoint>>,
    computations: usize,
}

impl ChartProjector {
    /// Start with the default axes for the given numeric columns.
    pub fn new(numeric_columns: &[String]) -> Self {
        let (x_col, y_col) = default_axes(numeric_columns);
        Self {
            x_col,
            y_col,
            histogram: Memo::new(),
            scatter: Memo::new(),
            computations: 0,
        }
    }

    pub fn x_col(&self) -> Option<&str> {
        self.x_col.as_deref()
    }

    pub fn y_col(&self) -> Option<&str> {
        self.y_col.as_deref()
    }

    /// Back to the default axes for a newly loaded dataset. Memoised series
    /// are keyed on the dataset version, so they refresh on the next project.
    pub(crate) fn reset_axes(&mut self, numeric_columns: &[String]) {
        (self.x_col, self.y_col) = default_axes(numeric_columns);
    }

    /// Axis updates are not validated; a bad column projects to nothing.
    pub(crate) fn set_x_col(&mut self, col: Option<String>) {
        self.x_col = col;
    }

    pub(crate) fn set_y_col(&mut self, col: Option<String>) {
        self.y_col = col;
    }

    /// Bring both series up to date with the given inputs.
    pub(crate) fn project(
        &mut self,
        version: DatasetVersion,
        preview: &Preview,
        active_column: Option<&str>,
    ) {
        let hist_key = (version, active_column.map(str::to_string));
        if self.histogram.refresh(hist_key, || {
            active_column
                .map(|col| histogram(preview, col))
                .unwrap_or_default()
        }) {
            log::debug!("histogram recomputed for {active_column:?} ({version})");
            self.computations += 1;
        }

        let scatter_key = (version, self.x_col.clone(), self.y_col.clone());
        let (x_col, y_col) = (self.x_col.as_deref(), self.y_col.as_deref());
        if self
            .scatter
            .refresh(scatter_key, || scatter(preview, x_col, y_col))
        {
            log::debug!("scatter recomputed for {x_col:?} x {y_col:?} ({version})");
            self.computations += 1;
        }
    }

    pub fn histogram(&self) -> &[f64] {
        &self.histogram.value
    }

    pub fn scatter(&self) -> &[ScatterPoint] {
        &self.scatter.value
    }

    /// Number of series recomputations so far.
    pub fn computations(&self) -> usize {
        self.computations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue::{self, Missing, Number, Text};

    fn preview(rows: Vec<Vec<CellValue>>) -> Preview {
        Preview::new(vec!["x".into(), "y".into()], rows)
    }

    fn mixed() -> Preview {
        preview(vec![
            vec![Number(1.0), Text("a".into())],
            vec![Number(2.0), Missing],
            vec![Text("z".into()), Number(3.0)],
        ])
    }

    #[test]
    fn histogram_drops_non_numeric_cells() {
        assert_eq!(histogram(&mixed(), "x"), vec![1.0, 2.0]);
        assert_eq!(histogram(&mixed(), "y"), vec![3.0]);
    }

    #[test]
    fn scatter_requires_both_coordinates() {
        assert!(scatter(&mixed(), Some("x"), Some("y")).is_empty());

        let mut p = mixed();
        p.rows[0] = vec![Number(1.0), Number(5.0)];
        assert_eq!(
            scatter(&p, Some("x"), Some("y")),
            vec![ScatterPoint { x: 1.0, y: 5.0 }]
        );
    }

    #[test]
    fn unknown_columns_project_to_nothing() {
        assert!(histogram(&mixed(), "nonexistent").is_empty());
        assert!(scatter(&mixed(), Some("x"), Some("nonexistent")).is_empty());
        assert!(scatter(&mixed(), None, Some("y")).is_empty());
    }

    #[test]
    fn short_rows_are_tolerated() {
        let p = preview(vec![vec![Number(1.0)], vec![Number(2.0), Number(4.0)]]);
        assert_eq!(histogram(&p, "y"), vec![4.0]);
        assert_eq!(
            scatter(&p, Some("x"), Some("y")),
            vec![ScatterPoint { x: 2.0, y: 4.0 }]
        );
    }

    #[test]
    fn default_axes_follow_numeric_order() {
        let cols: Vec<String> = ["age", "income", "score"].map(String::from).to_vec();
        assert_eq!(
            default_axes(&cols),
            (Some("age".to_string()), Some("income".to_string()))
        );
        assert_eq!(default_axes(&cols[..1]), (Some("age".to_string()), None));
        assert_eq!(default_axes(&[]), (None, None));
    }

    #[test]
    fn binning_covers_range() {
        let bins = bin_values(&[0.0, 1.0, 2.0, 3.0, 4.0], 4);
        assert_eq!(bins.len(), 4);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 5);
        assert_eq!(bins[3].count, 2);
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[3].end, 4.0);
    }

    #[test]
    fn binning_degenerate_inputs() {
        assert!(bin_values(&[], 10).is_empty());
        let single = bin_values(&[7.0, 7.0], 10);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].count, 2);
        assert_eq!(single[0].center(), 7.0);
    }

    #[test]
    fn projector_recomputes_only_on_input_change() {
        let p = mixed();
        let v = DatasetVersion::initial();
        let mut projector = ChartProjector::new(&["x".to_string(), "y".to_string()]);

        projector.project(v, &p, Some("x"));
        assert_eq!(projector.histogram(), &[1.0, 2.0]);
        assert_eq!(projector.computations(), 2);

        projector.project(v, &p, Some("x"));
        assert_eq!(projector.computations(), 2);

        projector.project(v, &p, Some("y"));
        assert_eq!(projector.histogram(), &[3.0]);
        assert_eq!(projector.computations(), 3);

        projector.set_x_col(Some("y".into()));
        projector.project(v, &p, Some("y"));
        assert_eq!(projector.scatter(), &[ScatterPoint { x: 3.0, y: 3.0 }]);
        assert_eq!(projector.computations(), 4);

        projector.project(v.next(), &p, Some("y"));
        assert_eq!(projector.computations(), 6);
    }
}
