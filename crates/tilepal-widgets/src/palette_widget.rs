use egui::{Event, InputState, Key, Pos2, Response, Sense, Ui, Widget};

use crate::{
    paint::EguiSurface,
    source_palette::{PaletteEvent, PointerEvent, SourcePaletteView},
};

/// Shows a [`SourcePaletteView`] and feeds it with this frame's pointer input.
///
/// The returned [`Response`] is marked as changed whenever the selection changes.
/// The host is expected to drain [`SourcePaletteView::take_events`] after showing the widget.
pub struct SourcePalette<'v> {
    view:      &'v mut SourcePaletteView,
    shortcuts: bool,
}

impl<'v> SourcePalette<'v> {
    pub fn new(view: &'v mut SourcePaletteView) -> Self {
        Self { view, shortcuts: true }
    }

    /// Escape clears the selection, Ctrl+A (Cmd+A) selects every tile.
    pub fn keyboard_shortcuts(mut self, enabled: bool) -> Self {
        self.shortcuts = enabled;
        self
    }
}

impl Widget for SourcePalette<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let Self { view, shortcuts } = self;
        let (view_rect, mut response) = ui.allocate_exact_size(view.base().content_size(), Sense::click_and_drag());
        view.base_mut().set_origin(view_rect.min);

        let enabled = ui.is_enabled();
        let first_new_event = view.pending_events().len();
        if enabled {
            let capture_id = response.id.with("pointer_capture");
            let captured =
                view.is_selecting() || ui.data(|data| data.get_temp::<bool>(capture_id)).unwrap_or(false);

            // Only the visible part of the view, and only where no other layer covers it.
            let visible_rect = ui.clip_rect().intersect(view_rect);
            let layer_id = ui.layer_id();
            let ctx = ui.ctx().clone();
            let reachable = |pos: Pos2| visible_rect.contains(pos) && ctx.layer_id_at(pos) == Some(layer_id);

            let raw_events = ui.input(|input| input.events.clone());
            let (events, captured) = pointer_events(&raw_events, reachable, captured);
            ui.data_mut(|data| data.insert_temp(capture_id, captured));
            for event in events {
                view.handle_pointer(event);
            }

            if shortcuts && (response.hovered() || response.has_focus()) {
                ui.input(|input| {
                    kb_shortcut_unselect_all(view, input);
                    kb_shortcut_select_all(view, input);
                });
            }
        }

        if view.pending_events()[first_new_event..].contains(&PaletteEvent::SelectionChanged) {
            response.mark_changed();
        }
        if view.take_repaint_request() {
            ui.ctx().request_repaint();
        }

        if ui.is_rect_visible(view_rect) {
            let painter = ui.painter_at(view_rect);
            view.paint(&mut EguiSurface::new(&painter), enabled);
        }

        response
    }
}

/// Pointer events that concern the view, and whether the view holds the pointer afterwards.
///
/// A press on a reachable point captures the pointer until the next release, which is then delivered
/// wherever it happens, even in a later frame.
fn pointer_events(
    events: &[Event],
    reachable: impl Fn(Pos2) -> bool,
    mut captured: bool,
) -> (Vec<PointerEvent>, bool) {
    let mut pointer_events = Vec::new();
    for event in events {
        match *event {
            Event::PointerMoved(pos) if captured || reachable(pos) => {
                pointer_events.push(PointerEvent::Moved { pos });
            }
            Event::PointerMoved(_) | Event::PointerGone => pointer_events.push(PointerEvent::Left),
            Event::PointerButton { pos, button, pressed: true, .. } if !captured && reachable(pos) => {
                captured = true;
                pointer_events.push(PointerEvent::Pressed { pos, button });
            }
            Event::PointerButton { pressed: false, .. } if captured => {
                captured = false;
                pointer_events.push(PointerEvent::Released);
            }
            _ => {}
        }
    }
    (pointer_events, captured)
}

fn kb_shortcut_unselect_all(view: &mut SourcePaletteView, input: &InputState) {
    if input.key_pressed(Key::Escape) {
        view.clear_selection();
    }
}

fn kb_shortcut_select_all(view: &mut SourcePaletteView, input: &InputState) {
    if input.modifiers.command_only() && input.key_pressed(Key::A) {
        view.select_all();
    }
}
