use egui::*;
use egui_extras::{Column, TableBuilder};
use inline_tweak::tweak;

use crate::ui::EditorState;

pub(super) fn show(ui: &mut Ui, state: &mut EditorState) {
    let area = state.palette.selected_area();
    if area.is_empty() {
        ui.label("Nothing selected");
    } else {
        ui.label(format!("Area: {area}"));
    }
    ui.separator();

    let tiles = state.palette.selected_tiles();
    if !tiles.is_empty() {
        ScrollArea::horizontal().id_source("selected tiles").show(ui, |ui| {
            TableBuilder::new(ui)
                .columns(Column::exact(tweak!(36.0)), tiles.width())
                .max_scroll_height(tweak!(240.0))
                .body(|body| {
                    body.rows(tweak!(18.0), tiles.height(), |mut row| {
                        let y = row.index();
                        for x in 0..tiles.width() {
                            row.col(|ui| {
                                match tiles[(x, y)] {
                                    Some(tile) => ui.monospace(format!("{:03X}", *tile.index)),
                                    None => ui.weak("-"),
                                };
                            });
                        }
                    });
                });
        });
        ui.separator();
    }

    ui.heading("Events");
    ScrollArea::vertical().id_source("event log").stick_to_bottom(true).show(ui, |ui| {
        for line in state.event_log.iter() {
            ui.label(line);
        }
    });
}
