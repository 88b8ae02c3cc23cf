use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use panda_explorer::color::ColumnColors;
use panda_explorer::{ColumnStats, ExplorationContext, Row};

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Generic cell table
// ---------------------------------------------------------------------------

/// Render `rows` under `columns`; selected columns get their colour in the header.
pub fn cell_table<'a>(
    ui: &mut Ui,
    id: &str,
    columns: &[String],
    rows: impl Iterator<Item = &'a Row>,
    header_color: impl Fn(&str) -> Option<Color32>,
) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(false)
            .columns(Column::auto().at_least(60.0), columns.len())
            .header(ROW_HEIGHT + 2.0, |mut header| {
                for col in columns {
                    header.col(|ui: &mut Ui| {
                        let mut text = RichText::new(col).strong();
                        if let Some(color) = header_color(col) {
                            text = text.color(color);
                        }
                        ui.label(text);
                    });
                }
            })
            .body(|mut body| {
                for cells in rows {
                    body.row(ROW_HEIGHT, |mut row| {
                        for cell in cells {
                            row.col(|ui: &mut Ui| {
                                if cell.is_missing() {
                                    ui.label(RichText::new(cell.to_string()).weak());
                                } else {
                                    ui.label(cell.to_string());
                                }
                            });
                        }
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Preview grid
// ---------------------------------------------------------------------------

pub fn preview_grid(ui: &mut Ui, ctx: &ExplorationContext, colors: &ColumnColors) {
    let preview = ctx.preview();
    if preview.is_empty() {
        ui.label("The preview is empty.");
        return;
    }
    cell_table(ui, "preview_grid", &preview.columns, preview.rows.iter(), |col| {
        ctx.is_selected(col).then(|| colors.color_for(col))
    });
}

// ---------------------------------------------------------------------------
// Statistics table
// ---------------------------------------------------------------------------

pub fn stats_table(ui: &mut Ui, stats: &[ColumnStats]) {
    if stats.is_empty() {
        ui.label("No statistics were supplied with this dataset.");
        return;
    }
    let headers = ["column", "type", "count", "missing", "unique", "min", "max", "mean", "std"];
    let fmt = |v: Option<f64>| v.map(|v| format!("{v:.3}")).unwrap_or_default();

    ui.push_id("stats_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .columns(Column::auto().at_least(50.0), headers.len())
            .header(ROW_HEIGHT + 2.0, |mut header| {
                for h in headers {
                    header.col(|ui: &mut Ui| {
                        ui.strong(h);
                    });
                }
            })
            .body(|mut body| {
                for s in stats {
                    let cells = [
                        s.column.clone(),
                        s.kind.to_string(),
                        s.count.to_string(),
                        s.missing.to_string(),
                        s.unique.to_string(),
                        fmt(s.min),
                        fmt(s.max),
                        fmt(s.mean),
                        fmt(s.std),
                    ];
                    body.row(ROW_HEIGHT, |mut row| {
                        for cell in cells {
                            row.col(|ui: &mut Ui| {
                                ui.label(cell);
                            });
                        }
                    });
                }
            });
    });
}
