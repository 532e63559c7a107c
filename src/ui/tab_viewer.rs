use egui::{Ui, WidgetText};
use egui_dock::TabViewer;
use egui_phosphor::regular as icons;

use crate::ui::{palette_tab, selection_tab, EditorState};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EditorTab {
    Palette,
    Selection,
}

impl EditorTab {
    pub fn title(&self) -> String {
        match self {
            Self::Palette => format!("{} Tileset palette", icons::GRID_FOUR),
            Self::Selection => format!("{} Selection", icons::SELECTION_ALL),
        }
    }
}

pub struct EditorTabViewer<'s> {
    pub state: &'s mut EditorState,
}

impl TabViewer for EditorTabViewer<'_> {
    type Tab = EditorTab;

    fn title(&mut self, tab: &mut Self::Tab) -> WidgetText {
        tab.title().into()
    }

    fn ui(&mut self, ui: &mut Ui, tab: &mut Self::Tab) {
        match tab {
            EditorTab::Palette => palette_tab::show(ui, self.state),
            EditorTab::Selection => selection_tab::show(ui, self.state),
        }
    }

    fn on_close(&mut self, tab: &mut Self::Tab) -> bool {
        log::info!("Closed {}", tab.title());
        true
    }

    fn scroll_bars(&self, _tab: &Self::Tab) -> [bool; 2] {
        [false, false]
    }
}
