use eframe::egui::{self, Ui};
use egui_plot::{Bar, BarChart, Plot, PlotPoints, Points};

use panda_explorer::chart::bin_values;
use panda_explorer::color::ColumnColors;
use panda_explorer::ExplorationContext;

const PLOT_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Histogram of the active column
// ---------------------------------------------------------------------------

pub fn histogram_plot(ui: &mut Ui, ctx: &ExplorationContext, bins: usize, colors: &ColumnColors) {
    let Some(column) = ctx.active_column() else {
        ui.label("No numeric column to plot.");
        return;
    };
    ui.strong(format!("Distribution of {column}"));

    let values = ctx.histogram();
    if values.is_empty() {
        ui.label("No numeric values in the preview.");
        return;
    }

    let bars: Vec<Bar> = bin_values(values, bins)
        .iter()
        .map(|bin| Bar::new(bin.center(), bin.count as f64).width(bin.width() * 0.95))
        .collect();
    let chart = BarChart::new(bars)
        .name(column)
        .color(colors.color_for(column));

    Plot::new("histogram_plot")
        .height(PLOT_HEIGHT)
        .x_axis_label(column)
        .y_axis_label("Count")
        .allow_scroll(false)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

// ---------------------------------------------------------------------------
// Scatter of two numeric columns
// ---------------------------------------------------------------------------

pub fn scatter_plot(ui: &mut Ui, ctx: &mut ExplorationContext, colors: &ColumnColors) {
    let numeric = ctx.numeric_columns().to_vec();
    let x_current = ctx.x_col().map(str::to_string);
    let y_current = ctx.y_col().map(str::to_string);

    ui.horizontal(|ui: &mut Ui| {
        ui.label("x");
        axis_combo(ui, "scatter_x", x_current.as_deref(), &numeric, |col| ctx.set_x_col(col));
        ui.label("y");
        axis_combo(ui, "scatter_y", y_current.as_deref(), &numeric, |col| ctx.set_y_col(col));
    });

    let (Some(x_col), Some(y_col)) = (ctx.x_col(), ctx.y_col()) else {
        ui.label("Scatter needs two numeric columns.");
        return;
    };

    let points: PlotPoints = ctx.scatter().iter().map(|p| [p.x, p.y]).collect();
    let series = Points::new(points)
        .name(format!("{y_col} vs {x_col}"))
        .color(colors.color_for(y_col))
        .radius(3.0);

    Plot::new("scatter_plot")
        .height(PLOT_HEIGHT)
        .x_axis_label(x_col)
        .y_axis_label(y_col)
        .allow_scroll(false)
        .show(ui, |plot_ui| plot_ui.points(series));
}

fn axis_combo(
    ui: &mut Ui,
    id: &str,
    current: Option<&str>,
    options: &[String],
    mut on_select: impl FnMut(Option<String>),
) {
    let mut choice: Option<Option<String>> = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.unwrap_or("—"))
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_none(), "—").clicked() {
                choice = Some(None);
            }
            for col in options {
                if ui.selectable_label(current == Some(col.as_str()), col).clicked() {
                    choice = Some(Some(col.clone()));
                }
            }
        });
    if let Some(col) = choice {
        on_select(col);
    }
}
