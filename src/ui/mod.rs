mod palette_tab;
mod selection_tab;
mod tab_viewer;

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use eframe::{CreationContext, Frame};
use egui::*;
use egui_dock::{DockArea, DockState, NodeIndex, Style as DockStyle};
use tilepal_tileset::{Tileset, TilesetRef};
use tilepal_widgets::source_palette::{PaletteColors, PaletteEvent, SourcePaletteView};

use crate::{
    atlas::generate_atlas,
    config::{AppConfig, TilesetConfig},
    style::EditorStyle,
    ui::tab_viewer::{EditorTab, EditorTabViewer},
};

const EVENT_LOG_CAPACITY: usize = 64;

#[derive(Debug)]
pub struct EditorState {
    palette:         SourcePaletteView,
    tilesets:        Vec<TilesetRef>,
    active_tileset:  usize,
    palette_enabled: bool,
    event_log:       VecDeque<String>,
}

pub struct UiMainWindow {
    state:      EditorState,
    dock_state: DockState<EditorTab>,
}

impl UiMainWindow {
    pub fn new(config: AppConfig, cc: &CreationContext) -> Self {
        let mut fonts = FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        cc.egui_ctx.set_visuals(Visuals::dark());

        if let Some(colors) = config.palette_colors {
            PaletteColors::get_from_egui(&cc.egui_ctx, |stored| *stored = colors);
        }

        let tilesets = load_tilesets(&cc.egui_ctx, &config.tilesets);
        let mut palette = SourcePaletteView::new(tilesets.first().cloned());
        palette.base_mut().set_zoom(config.view.zoom);

        Self {
            state:      EditorState {
                palette,
                tilesets,
                active_tileset: 0,
                palette_enabled: true,
                event_log: VecDeque::with_capacity(EVENT_LOG_CAPACITY),
            },
            dock_state: default_dock_state(),
        }
    }
}

impl eframe::App for UiMainWindow {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        let colors = PaletteColors::get_from_egui(ctx, |colors| *colors);
        self.state.palette.set_colors(colors);

        self.main_menu_bar(ctx);

        CentralPanel::default().show(ctx, |ui| {
            DockArea::new(&mut self.dock_state)
                .style(DockStyle::from_egui(ctx.style().as_ref()))
                .show_inside(ui, &mut EditorTabViewer { state: &mut self.state });
        });
    }
}

impl UiMainWindow {
    fn open_tab(&mut self, tab: EditorTab) {
        if self.dock_state.find_tab(&tab).is_none() {
            log::info!("Opened {}", tab.title());
            self.dock_state.push_to_focused_leaf(tab);
        }
    }

    fn main_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("main_top_bar").show(ctx, |ui| {
            menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(ViewportCommand::Close);
                    }
                });

                ui.menu_button("Window", |ui| {
                    for tab in [EditorTab::Palette, EditorTab::Selection] {
                        if ui.button(tab.title()).clicked() {
                            self.open_tab(tab);
                            ui.close_menu();
                        }
                    }
                    ui.separator();
                    if ui.button("Reset layout").clicked() {
                        self.dock_state = default_dock_state();
                        ui.close_menu();
                    }
                });
            });
        });
    }
}

impl EditorState {
    fn active_tileset(&self) -> Option<&TilesetRef> {
        self.tilesets.get(self.active_tileset)
    }

    fn select_tileset(&mut self, index: usize) {
        if let Some(tileset) = self.tilesets.get(index) {
            log::info!("Switched to tileset '{}'", tileset.borrow().name());
            self.active_tileset = index;
            self.palette.set_tileset(Some(Rc::clone(tileset)));
        }
    }

    fn toggle_spacing(&mut self) {
        let Some(tileset) = self.active_tileset() else {
            return;
        };
        let mut layout = *tileset.borrow().layout();
        layout.spacing = if layout.spacing == Vec2::ZERO { Vec2::splat(1.) } else { Vec2::ZERO };
        let result = tileset.borrow_mut().set_layout(layout);
        match result {
            Ok(()) => self.palette.tileset_modified(),
            Err(err) => log::error!("Cannot change tileset spacing: {err}"),
        }
    }

    fn drain_palette_events(&mut self) {
        for event in self.palette.take_events() {
            let message = match event {
                PaletteEvent::SelectionChanged => {
                    let message = format!("Selection changed to {}", self.palette.selected_area());
                    log::debug!("{message}");
                    message
                }
                PaletteEvent::SelectionEditingFinished => {
                    let tiles = self.palette.selected_tiles();
                    let message = format!("Selection editing finished with {} tiles", tiles.width() * tiles.height());
                    log::info!("{message}");
                    message
                }
            };
            if self.event_log.len() == EVENT_LOG_CAPACITY {
                self.event_log.pop_front();
            }
            self.event_log.push_back(message);
        }
    }
}

fn default_dock_state() -> DockState<EditorTab> {
    let mut dock_state = DockState::new(vec![EditorTab::Palette]);
    let _ = dock_state.main_surface_mut().split_right(NodeIndex::root(), 0.65, vec![EditorTab::Selection]);
    dock_state
}

fn load_tilesets(ctx: &Context, configs: &[TilesetConfig]) -> Vec<TilesetRef> {
    configs
        .iter()
        .filter_map(|config| match Tileset::new(&config.name, config.layout) {
            Ok(tileset) => {
                let atlas = generate_atlas(&config.layout, config.seed);
                let texture = ctx.load_texture(format!("tileset {}", config.name), atlas, TextureOptions::NEAREST);
                log::info!("Loaded tileset '{}'", config.name);
                Some(Rc::new(RefCell::new(tileset.with_texture(texture))))
            }
            Err(err) => {
                log::error!("Skipping tileset '{}': {err}", config.name);
                None
            }
        })
        .collect()
}
