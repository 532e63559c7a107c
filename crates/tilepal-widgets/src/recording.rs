use egui::{Color32, Rect, TextureId};

use crate::paint::{ClipRegion, PaintSurface};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Fill { rect: Rect, color: Color32 },
    Stroke { rect: Rect, color: Color32 },
    Tile { texture: Option<TextureId>, rect: Rect, uv: Rect },
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedDraw {
    pub command: DrawCommand,
    pub clip:    ClipRegion,
}

/// Surface that remembers every drawing call together with the clip region active at the time.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    clip:  ClipRegion,
    draws: Vec<RecordedDraw>,
}

impl RecordingSurface {
    pub fn new(clip: Rect) -> Self {
        Self { clip: ClipRegion::from_rect(clip), draws: Vec::new() }
    }

    pub fn draws(&self) -> &[RecordedDraw] {
        &self.draws
    }

    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.draws.iter().map(|draw| &draw.command)
    }

    fn record(&mut self, command: DrawCommand) {
        self.draws.push(RecordedDraw { command, clip: self.clip.clone() });
    }
}

impl PaintSurface for RecordingSurface {
    fn clip(&self) -> ClipRegion {
        self.clip.clone()
    }

    fn set_clip(&mut self, clip: ClipRegion) {
        self.clip = clip;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.record(DrawCommand::Fill { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color32) {
        self.record(DrawCommand::Stroke { rect, color });
    }

    fn draw_tile(&mut self, texture: Option<TextureId>, rect: Rect, uv: Rect) {
        self.record(DrawCommand::Tile { texture, rect, uv });
    }
}
