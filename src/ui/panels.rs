use std::path::PathBuf;

use eframe::egui::{self, Color32, Key, RichText, ScrollArea, Ui};
use serde_json::json;

use panda_explorer::color::ColumnColors;
use panda_explorer::{
    Action, ColumnKind, DatasetSummary, ExplorationContext, HeaderKey, HeaderKeyEvent,
    SelectModifiers,
};

use crate::app::ExplorerApp;

// ---------------------------------------------------------------------------
// Left side panel – column list and selection
// ---------------------------------------------------------------------------

/// Render the column panel: selection list, active column, bulk actions.
pub fn column_panel(ui: &mut Ui, ctx: &mut ExplorationContext, colors: &ColumnColors) {
    ui.heading("Columns");
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            ctx.select_all();
        }
        if ui.small_button("None").clicked() {
            ctx.clear_selection();
        }
        ui.label(format!("{} selected", ctx.selection().len()));
    });
    ui.label(RichText::new("Click selects one, Ctrl/Cmd-click adds.").small().weak());

    // Clone what we need so we can mutate the context inside the loop.
    let columns = ctx.columns().to_vec();

    ScrollArea::vertical()
        .id_salt("column_list")
        .max_height(ui.available_height() * 0.6)
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            for col in &columns {
                let kind = ctx
                    .stats_for(col)
                    .map(|s| kind_badge(&s.kind))
                    .unwrap_or("?");
                let mut text = RichText::new(format!("{col}  [{kind}]"));
                if ctx.is_selected(col) {
                    text = text.color(colors.color_for(col)).strong();
                }

                let response = ui.selectable_label(ctx.is_selected(col), text);
                if response.clicked() {
                    let (key, modifiers) = ui.input(|i| (pressed_header_key(i), i.modifiers));
                    let modifiers = select_modifiers(modifiers);
                    if response.has_focus() && key != HeaderKey::Other {
                        ctx.on_header_key_down(&HeaderKeyEvent::new(key, modifiers), col);
                    } else {
                        ctx.on_header_click(col, modifiers);
                    }
                }
            }
        });

    ui.separator();

    // ---- Active column ----
    ui.strong("Histogram column");
    let current = ctx.active_column().unwrap_or("—").to_string();
    let numeric = ctx.numeric_columns().to_vec();
    egui::ComboBox::from_id_salt("active_column")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for col in &numeric {
                if ui.selectable_label(current == *col, col).clicked() {
                    ctx.set_active_column(Some(col.clone()));
                }
            }
        });

    ui.separator();

    // ---- Actions on the selection ----
    let selected = ctx.selection().to_vec();
    ui.add_enabled_ui(!selected.is_empty(), |ui: &mut Ui| {
        ui.horizontal(|ui: &mut Ui| {
            if ui.button("Transform…").clicked() {
                ctx.emit_action(Action::new("transform").with_payload(json!({ "columns": selected })));
            }
            if ui.button("Drop").clicked() {
                ctx.emit_action(Action::new("drop_columns").with_payload(json!({ "columns": selected })));
            }
        });
    });
}

fn kind_badge(kind: &ColumnKind) -> &'static str {
    match kind {
        ColumnKind::Numeric => "num",
        ColumnKind::Categorical => "cat",
        ColumnKind::Other(_) => "other",
    }
}

fn pressed_header_key(input: &egui::InputState) -> HeaderKey {
    if input.key_pressed(Key::Enter) {
        HeaderKey::Enter
    } else if input.key_pressed(Key::Space) {
        HeaderKey::Space
    } else {
        HeaderKey::Other
    }
}

fn select_modifiers(modifiers: egui::Modifiers) -> SelectModifiers {
    SelectModifiers {
        ctrl: modifiers.ctrl,
        meta: modifiers.mac_cmd,
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, app: &mut ExplorerApp) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                ui.close_menu();
                if let Some(path) = open_file_dialog() {
                    app.open_path(&path);
                }
            }
        });

        if let Ok(ctx) = app.slot.try_get() {
            if ui.button("⬅ Back").clicked() {
                ctx.go_back();
            }
            ui.separator();
            summary_bar(ui, &ctx.summary());
        }

        if let Some(action) = app.last_action.borrow().as_ref() {
            ui.separator();
            ui.label(RichText::new(format!("requested: {}", action.kind)).italics());
        }

        if let Some(msg) = &app.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

fn summary_bar(ui: &mut Ui, summary: &DatasetSummary) {
    ui.strong(&summary.title);
    ui.label(format!(
        "{} columns ({} numeric, {} categorical) · {} preview rows · {:.1}% missing · {} selected",
        summary.column_count,
        summary.numeric_columns,
        summary.categorical_columns,
        summary.preview_rows,
        summary.missing_percentage,
        summary.selected_columns
    ));
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open dataset")
        .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
        .add_filter("Dataset bundle", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file()
}
