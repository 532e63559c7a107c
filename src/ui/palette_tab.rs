use egui::*;
use egui_phosphor::regular as icons;
use inline_tweak::tweak;
use tilepal_widgets::{palette_widget::SourcePalette, source_palette::PaletteColors};

use crate::{style::EditorStyle, ui::EditorState};

pub(super) fn show(ui: &mut Ui, state: &mut EditorState) {
    ui.horizontal(|ui| {
        tileset_selector(ui, state);
        ui.separator();

        let mut zoom = state.palette.base().zoom();
        if ui.add(Slider::new(&mut zoom, 0.5..=4.).step_by(0.25).text("Zoom")).changed() {
            state.palette.base_mut().set_zoom(zoom);
        }
        ui.checkbox(&mut state.palette_enabled, "Enabled");
        ui.separator();

        if ui.button(format!("{} Select all", icons::SELECTION_ALL)).clicked() {
            state.palette.select_all();
        }
        if ui.button(format!("{} Clear", icons::X)).clicked() {
            state.palette.clear_selection();
        }
        if ui.button(format!("{} Toggle spacing", icons::ARROWS_OUT)).clicked() {
            state.toggle_spacing();
        }
    });

    ui.collapsing("Style", palette_style_editor);
    ui.add_space(tweak!(4.0));

    ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
        ui.add_enabled(state.palette_enabled, SourcePalette::new(&mut state.palette));
    });

    state.drain_palette_events();
}

fn tileset_selector(ui: &mut Ui, state: &mut EditorState) {
    let selected_text = state.active_tileset().map(|tileset| tileset.borrow().name().to_owned()).unwrap_or_default();
    let mut selected = state.active_tileset;
    ComboBox::new(ui.id().with("cb Tileset"), "Tileset").selected_text(selected_text).show_ui(ui, |ui| {
        for (index, tileset) in state.tilesets.iter().enumerate() {
            ui.selectable_value(&mut selected, index, tileset.borrow().name());
        }
    });
    if selected != state.active_tileset {
        state.select_tileset(selected);
    }
}

fn palette_style_editor(ui: &mut Ui) {
    let mut colors = PaletteColors::get_from_egui(ui.ctx(), |colors| *colors);
    let mut changed = false;
    ui.horizontal(|ui| {
        changed |= ui.color_edit_button_srgba(&mut colors.highlight).changed();
        ui.label("Highlight");
        changed |= ui.color_edit_button_srgba(&mut colors.highlight_border).changed();
        ui.label("Highlight border");
        if ui.button("Reset").clicked() {
            colors = PaletteColors::default();
            changed = true;
        }
    });
    if changed {
        PaletteColors::get_from_egui(ui.ctx(), |stored| *stored = colors);
    }
}
