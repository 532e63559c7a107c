use egui::{util::id_type_map::SerializableAny, Context, Id};
use tilepal_widgets::source_palette::PaletteColors;

pub trait EditorStyle: Default + SerializableAny {
    fn id() -> Id;

    fn get_from_egui<R, F>(ctx: &Context, mut writer: F) -> R
    where
        F: FnMut(&mut Self) -> R,
    {
        ctx.data_mut(|data| writer(data.get_persisted_mut_or_default(Self::id())))
    }
}

impl EditorStyle for PaletteColors {
    fn id() -> Id {
        Id::new("palette_colors")
    }
}
