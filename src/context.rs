use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::cache::{DatasetVersion, PreviewCache};
use crate::chart::{ChartProjector, ScatterPoint};
use crate::config::ExplorerConfig;
use crate::data::model::{numeric_columns, ColumnStats, Preview, SplitPreview};
use crate::data::provider::DatasetProvider;
use crate::error::ExplorerError;
use crate::selection::{HeaderKeyEvent, SelectModifiers, SelectionModel};
use crate::summary::{kind_counts, missing_percentage, DatasetSummary};

static EMPTY_PREVIEW: Preview = Preview {
    columns: Vec::new(),
    rows: Vec::new(),
};

// ---------------------------------------------------------------------------
// Outgoing intents
// ---------------------------------------------------------------------------

/// A user-initiated intent reported to the host, e.g. a transform request.
/// The explorer forwards it without looking at the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<JsonValue>,
}

impl Action {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: JsonValue) -> Self {
        self.payload = Some(payload);
        self
    }
}

pub type ActionHandler = Box<dyn Fn(&Action)>;
pub type BackHandler = Box<dyn Fn()>;

/// Optional host callbacks. Both are fire-and-forget.
#[derive(Default)]
pub struct ExplorerHandlers {
    pub on_action: Option<ActionHandler>,
    pub on_back: Option<BackHandler>,
}

impl ExplorerHandlers {
    pub fn with_action(mut self, f: impl Fn(&Action) + 'static) -> Self {
        self.on_action = Some(Box::new(f));
        self
    }

    pub fn with_back(mut self, f: impl Fn() + 'static) -> Self {
        self.on_back = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for ExplorerHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExplorerHandlers")
            .field("on_action", &self.on_action.is_some())
            .field("on_back", &self.on_back.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Exploration context
// ---------------------------------------------------------------------------

/// Shared state of the exploration surface, independent of rendering.
///
/// Views read through the getters and change state only through the command
/// methods. Derived chart series are refreshed inside every command that can
/// affect them, so reads never observe stale values.
pub struct ExplorationContext {
    dataset: Arc<dyn DatasetProvider>,
    version: DatasetVersion,

    /// Numeric columns in statistics-table order.
    numeric_columns: Vec<String>,

    preview: PreviewCache<Preview>,
    split_preview: PreviewCache<Option<SplitPreview>>,

    selection: SelectionModel,
    active_column: Option<String>,
    projector: ChartProjector,

    /// Display density of the split panel only.
    expand_split: bool,
    collapsed_split_rows: usize,

    handlers: ExplorerHandlers,
}

impl ExplorationContext {
    pub fn new(
        dataset: Arc<dyn DatasetProvider>,
        config: &ExplorerConfig,
        handlers: ExplorerHandlers,
    ) -> Self {
        let mut ctx = Self {
            dataset,
            version: DatasetVersion::initial(),
            numeric_columns: Vec::new(),
            preview: PreviewCache::new(config.preview_rows),
            split_preview: PreviewCache::new(config.split_preview_rows),
            selection: SelectionModel::new(),
            active_column: None,
            projector: ChartProjector::new(&[]),
            expand_split: false,
            collapsed_split_rows: config.collapsed_split_rows,
            handlers,
        };
        ctx.load();
        ctx
    }

    /// Swap in another dataset. Column-bound state from the old one is reset.
    pub fn set_dataset(&mut self, dataset: Arc<dyn DatasetProvider>) {
        self.dataset = dataset;
        self.version = self.version.next();
        self.selection.clear();
        self.load();
    }

    fn load(&mut self) {
        let dataset = &self.dataset;
        self.preview.refresh(self.version, |n| dataset.preview(n));
        self.split_preview
            .refresh(self.version, |n| dataset.split_preview(n));

        self.numeric_columns = numeric_columns(dataset.stats());
        self.projector.reset_axes(&self.numeric_columns);
        self.active_column = self.numeric_columns.first().cloned();
        self.reproject();

        log::info!(
            "exploring '{}' ({}): {} columns, {} numeric, {} preview rows",
            self.title(),
            self.version,
            self.columns().len(),
            self.numeric_columns.len(),
            self.preview().len()
        );
    }

    fn reproject(&mut self) {
        let preview = self.preview.get().unwrap_or(&EMPTY_PREVIEW);
        self.projector
            .project(self.version, preview, self.active_column.as_deref());
    }

    // -- reads --

    pub fn title(&self) -> &str {
        self.dataset.title()
    }

    pub fn columns(&self) -> &[String] {
        self.dataset.columns()
    }

    pub fn stats(&self) -> &[ColumnStats] {
        self.dataset.stats()
    }

    pub fn stats_for(&self, column: &str) -> Option<&ColumnStats> {
        self.stats().iter().find(|s| s.column == column)
    }

    pub fn version(&self) -> DatasetVersion {
        self.version
    }

    pub fn preview(&self) -> &Preview {
        self.preview.get().unwrap_or(&EMPTY_PREVIEW)
    }

    /// How many times the preview accessor has run in this context.
    pub fn preview_computations(&self) -> usize {
        self.preview.computations()
    }

    pub fn split_preview(&self) -> Option<&SplitPreview> {
        self.split_preview.get().and_then(Option::as_ref)
    }

    pub fn numeric_columns(&self) -> &[String] {
        &self.numeric_columns
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn is_selected(&self, col: &str) -> bool {
        self.selection.is_selected(col)
    }

    pub fn active_column(&self) -> Option<&str> {
        self.active_column.as_deref()
    }

    pub fn x_col(&self) -> Option<&str> {
        self.projector.x_col()
    }

    pub fn y_col(&self) -> Option<&str> {
        self.projector.y_col()
    }

    /// Numeric values of the active column across the preview.
    pub fn histogram(&self) -> &[f64] {
        self.projector.histogram()
    }

    /// Numeric `(x, y)` pairs for the current scatter axes.
    pub fn scatter(&self) -> &[ScatterPoint] {
        self.projector.scatter()
    }

    /// How many times a chart series has been recomputed in this context,
    /// across dataset swaps.
    pub fn chart_computations(&self) -> usize {
        self.projector.computations()
    }

    pub fn expand_split(&self) -> bool {
        self.expand_split
    }

    /// Rows per partition the split panel should show.
    pub fn split_rows_visible(&self) -> usize {
        let max = self.split_preview.max_rows();
        if self.expand_split {
            max
        } else {
            self.collapsed_split_rows.min(max)
        }
    }

    pub fn summary(&self) -> DatasetSummary {
        let stats = self.stats();
        let (numeric_columns, categorical_columns) = kind_counts(stats);
        DatasetSummary {
            title: self.title().to_string(),
            column_count: self.columns().len(),
            numeric_columns,
            categorical_columns,
            preview_rows: self.preview().len(),
            selected_columns: self.selection.len(),
            missing_percentage: missing_percentage(stats),
        }
    }

    // -- commands --

    pub fn set_active_column(&mut self, col: Option<String>) {
        self.active_column = col;
        self.reproject();
    }

    pub fn set_x_col(&mut self, col: Option<String>) {
        self.projector.set_x_col(col);
        self.reproject();
    }

    pub fn set_y_col(&mut self, col: Option<String>) {
        self.projector.set_y_col(col);
        self.reproject();
    }

    pub fn toggle(&mut self, col: &str) {
        self.selection.toggle(col);
    }

    pub fn replace_selection<I, S>(&mut self, cols: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection.replace(cols);
    }

    pub fn select_all(&mut self) {
        let cols = self.dataset.columns().to_vec();
        self.selection.replace(cols);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn on_header_click(&mut self, col: &str, modifiers: SelectModifiers) {
        self.selection.on_header_click(col, modifiers);
    }

    /// Returns `true` when the key was handled.
    pub fn on_header_key_down(&mut self, event: &HeaderKeyEvent, col: &str) -> bool {
        self.selection.on_header_key_down(event, col)
    }

    pub fn set_expand_split(&mut self, expand: bool) {
        self.expand_split = expand;
    }

    /// Forward `action` to the host. Returns whether a handler received it.
    pub fn emit_action(&self, action: Action) -> bool {
        match &self.handlers.on_action {
            Some(handler) => {
                log::debug!("forwarding action '{}'", action.kind);
                handler(&action);
                true
            }
            None => false,
        }
    }

    /// Ask the host to navigate back. Returns whether a handler received it.
    pub fn go_back(&self) -> bool {
        match &self.handlers.on_back {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for ExplorationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExplorationContext")
            .field("title", &self.title())
            .field("version", &self.version)
            .field("selection", &self.selection)
            .field("active_column", &self.active_column)
            .field("projector", &self.projector)
            .field("expand_split", &self.expand_split)
            .field("handlers", &self.handlers)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// ExplorerSlot – where views find the active context
// ---------------------------------------------------------------------------

/// Holder for the active exploration context.
///
/// Reading through [`ExplorerSlot::get`] before a context is established is a
/// programming error and panics every time.
#[derive(Debug, Default)]
pub struct ExplorerSlot {
    context: Option<ExplorationContext>,
}

impl ExplorerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `context`, returning the one it replaces.
    pub fn establish(&mut self, context: ExplorationContext) -> Option<ExplorationContext> {
        log::info!("exploration context established for '{}'", context.title());
        self.context.replace(context)
    }

    pub fn teardown(&mut self) -> Option<ExplorationContext> {
        let previous = self.context.take();
        if previous.is_some() {
            log::info!("exploration context torn down");
        }
        previous
    }

    pub fn is_established(&self) -> bool {
        self.context.is_some()
    }

    pub fn try_get(&self) -> Result<&ExplorationContext, ExplorerError> {
        self.context.as_ref().ok_or(ExplorerError::ContextMissing)
    }

    pub fn try_get_mut(&mut self) -> Result<&mut ExplorationContext, ExplorerError> {
        self.context.as_mut().ok_or(ExplorerError::ContextMissing)
    }

    #[track_caller]
    pub fn get(&self) -> &ExplorationContext {
        match self.context.as_ref() {
            Some(ctx) => ctx,
            None => panic!("{}", ExplorerError::ContextMissing),
        }
    }

    #[track_caller]
    pub fn get_mut(&mut self) -> &mut ExplorationContext {
        match self.context.as_mut() {
            Some(ctx) => ctx,
            None => panic!("{}", ExplorerError::ContextMissing),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::json;

    use super::*;
    use crate::data::model::{CellValue, ColumnKind};
    use crate::data::provider::{InMemoryDataset, SplitPartitions};
    use crate::selection::HeaderKey;

    fn stat(column: &str, kind: ColumnKind) -> ColumnStats {
        ColumnStats {
            column: column.into(),
            kind,
            count: 2,
            missing: 0,
            unique: 2,
            min: None,
            max: None,
            mean: None,
            std: None,
        }
    }

    fn dataset() -> InMemoryDataset {
        use CellValue::{Missing, Number, Text};
        InMemoryDataset::new(
            vec!["age".into(), "city".into(), "income".into()],
            vec![
                vec![Number(30.0), Text("Oslo".into()), Number(100.0)],
                vec![Number(40.0), Text("Rome".into()), Missing],
                vec![Text("n/a".into()), Missing, Number(80.0)],
            ],
        )
        .with_title("people")
        .with_stats(vec![
            stat("age", ColumnKind::Numeric),
            stat("city", ColumnKind::Categorical),
            stat("income", ColumnKind::Numeric),
        ])
    }

    fn context() -> ExplorationContext {
        ExplorationContext::new(
            Arc::new(dataset()),
            &ExplorerConfig::default(),
            ExplorerHandlers::default(),
        )
    }

    #[test]
    fn derives_numeric_columns_and_defaults() {
        let ctx = context();
        assert_eq!(ctx.numeric_columns(), &["age".to_string(), "income".to_string()]);
        assert_eq!(ctx.x_col(), Some("age"));
        assert_eq!(ctx.y_col(), Some("income"));
        assert_eq!(ctx.active_column(), Some("age"));
        assert_eq!(ctx.histogram(), &[30.0, 40.0]);
        assert_eq!(ctx.scatter(), &[ScatterPoint { x: 30.0, y: 100.0 }]);
    }

    #[test]
    fn selection_does_not_touch_charts_or_preview() {
        let mut ctx = context();
        let charts = ctx.chart_computations();
        ctx.toggle("city");
        ctx.select_all();
        ctx.on_header_key_down(&HeaderKeyEvent::new(HeaderKey::Enter, SelectModifiers::NONE), "age");
        ctx.set_expand_split(true);
        assert_eq!(ctx.selection().to_vec(), vec!["age"]);
        assert_eq!(ctx.chart_computations(), charts);
        assert_eq!(ctx.preview_computations(), 1);
        assert_eq!(ctx.active_column(), Some("age"));
    }

    #[test]
    fn active_column_drives_histogram() {
        let mut ctx = context();
        ctx.set_active_column(Some("income".into()));
        assert_eq!(ctx.histogram(), &[100.0, 80.0]);
        ctx.set_active_column(Some("city".into()));
        assert!(ctx.histogram().is_empty());
        ctx.set_active_column(None);
        assert!(ctx.histogram().is_empty());
    }

    #[test]
    fn axis_changes_are_not_validated() {
        let mut ctx = context();
        ctx.set_y_col(Some("city".into()));
        assert_eq!(ctx.y_col(), Some("city"));
        assert!(ctx.scatter().is_empty());
        ctx.set_x_col(Some("income".into()));
        ctx.set_y_col(Some("age".into()));
        assert_eq!(ctx.scatter(), &[ScatterPoint { x: 100.0, y: 30.0 }]);
    }

    #[test]
    fn swapping_dataset_reloads_everything() {
        let mut ctx = context();
        ctx.toggle("city");
        let v1 = ctx.version();
        let charts = ctx.chart_computations();

        let other = InMemoryDataset::new(
            vec!["score".into()],
            vec![vec![CellValue::Number(1.5)]],
        )
        .with_stats(vec![stat("score", ColumnKind::Numeric)]);
        ctx.set_dataset(Arc::new(other));

        assert!(ctx.version() > v1);
        assert_eq!(ctx.preview_computations(), 2);
        assert_eq!(ctx.chart_computations(), charts + 2);
        assert!(ctx.selection().is_empty());
        assert_eq!(ctx.x_col(), Some("score"));
        assert_eq!(ctx.y_col(), None);
        assert_eq!(ctx.histogram(), &[1.5]);
        assert!(ctx.scatter().is_empty());
    }

    #[test]
    fn split_rows_follow_expand_flag() {
        let ds = dataset().with_split(SplitPartitions {
            training: vec![vec![CellValue::Missing; 3]; 12],
            validation: vec![vec![CellValue::Missing; 3]; 2],
            testing: Vec::new(),
        });
        let mut ctx = ExplorationContext::new(
            Arc::new(ds),
            &ExplorerConfig::default(),
            ExplorerHandlers::default(),
        );
        let split = ctx.split_preview().unwrap();
        assert_eq!(split.training.len(), 10);
        assert_eq!(ctx.split_rows_visible(), 3);
        ctx.set_expand_split(true);
        assert_eq!(ctx.split_rows_visible(), 10);
        assert!(context().split_preview().is_none());
    }

    #[test]
    fn actions_and_back_are_forwarded() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let backs = Rc::new(RefCell::new(0));
        let handlers = {
            let seen = Rc::clone(&seen);
            let backs = Rc::clone(&backs);
            ExplorerHandlers::default()
                .with_action(move |a| seen.borrow_mut().push(a.clone()))
                .with_back(move || *backs.borrow_mut() += 1)
        };
        let ctx = ExplorationContext::new(Arc::new(dataset()), &ExplorerConfig::default(), handlers);

        let action = Action::new("transform").with_payload(json!({"columns": ["age"]}));
        assert!(ctx.emit_action(action.clone()));
        assert!(ctx.go_back());
        assert_eq!(*seen.borrow(), vec![action]);
        assert_eq!(*backs.borrow(), 1);
    }

    #[test]
    fn missing_handlers_are_noops() {
        let ctx = context();
        assert!(!ctx.emit_action(Action::new("transform")));
        assert!(!ctx.go_back());
    }

    #[test]
    fn summary_reports_counts() {
        let mut ctx = context();
        ctx.toggle("age");
        let summary = ctx.summary();
        assert_eq!(summary.title, "people");
        assert_eq!(summary.column_count, 3);
        assert_eq!(summary.numeric_columns, 2);
        assert_eq!(summary.categorical_columns, 1);
        assert_eq!(summary.preview_rows, 3);
        assert_eq!(summary.selected_columns, 1);
        assert_eq!(summary.missing_percentage, 0.0);
    }

    #[test]
    fn slot_without_context_fails() {
        let mut slot = ExplorerSlot::new();
        assert_eq!(slot.try_get().unwrap_err(), ExplorerError::ContextMissing);
        assert!(slot.try_get_mut().is_err());
        assert!(!slot.is_established());

        slot.establish(context());
        assert_eq!(slot.get().title(), "people");
        slot.get_mut().toggle("age");
        assert!(slot.teardown().is_some());
        assert!(slot.try_get().is_err());
    }

    #[test]
    #[should_panic(expected = "no exploration context is established")]
    fn slot_get_panics_without_context() {
        ExplorerSlot::new().get();
    }

    #[test]
    fn action_serializes_with_type_tag() {
        let action = Action::new("drop").with_payload(json!(["a"]));
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"type": "drop", "payload": ["a"]})
        );
    }
}
