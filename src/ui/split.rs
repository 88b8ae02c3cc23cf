use eframe::egui::{RichText, Ui};

use panda_explorer::color::partition_color;
use panda_explorer::{ExplorationContext, SplitPartition};

use super::grid::cell_table;

/// Training / validation / testing samples side by side with the dataset schema.
pub fn split_panel(ui: &mut Ui, ctx: &mut ExplorationContext) {
    let mut expand = ctx.expand_split();
    if ui.checkbox(&mut expand, "Show all sampled rows").changed() {
        ctx.set_expand_split(expand);
    }

    let Some(split) = ctx.split_preview() else {
        ui.label("This dataset has no split preview.");
        return;
    };
    let visible = ctx.split_rows_visible();

    for partition in SplitPartition::ALL {
        let rows = split.rows(partition);
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!(
                "{}  ({} of {} sampled rows)",
                partition.label(),
                rows.len().min(visible),
                rows.len()
            ))
            .strong()
            .color(partition_color(partition)),
        );
        if rows.is_empty() {
            ui.label(RichText::new("empty").weak());
            continue;
        }
        cell_table(
            ui,
            partition.label(),
            &split.columns,
            rows.iter().take(visible),
            |_| None,
        );
    }
}
