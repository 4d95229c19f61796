use eframe::egui::FontId;

pub fn channel_font() -> FontId {
    FontId::proportional(16.0)
}

pub fn temperature_font() -> FontId {
    FontId::monospace(22.0)
}
