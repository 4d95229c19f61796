use eframe::egui::Color32;

pub(crate) struct Colours {
    pub body: Color32,
    pub rim: Color32,
    pub focus: Color32,
    pub tick: Color32,
    pub major_tick: Color32,
    pub needle: Color32,
    pub preview: Color32,
    pub text: Color32,
}

impl Default for Colours {
    fn default() -> Self {
        Self {
            body: Color32::from_rgb(40, 40, 40),          // Charcoal - dial face
            rim: Color32::from_rgb(100, 100, 100),        // Mid gray - dial border
            focus: Color32::from_rgb(114, 159, 207),      // Steel blue - keyboard focus
            tick: Color32::from_rgb(60, 60, 60),          // Dark gray - single steps
            major_tick: Color32::from_rgb(186, 189, 182), // Silver gray - whole degrees
            needle: Color32::from_rgb(245, 121, 0),       // Burnt orange - committed value
            preview: Color32::from_rgb(237, 212, 0),      // Golden yellow - value while dragging
            text: Color32::from_rgb(238, 238, 236),       // Off-white - labels
        }
    }
}
