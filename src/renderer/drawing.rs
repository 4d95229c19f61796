use eframe::egui::{Color32, Painter, Pos2, Stroke, Vec2};

/// Point on a circle around `center`, with `angle` measured clockwise from 12 o'clock.
pub fn polar(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + Vec2::new(angle.sin(), -angle.cos()) * radius
}

pub fn face(painter: &Painter, center: Pos2, radius: f32, fill: Color32, rim: Color32) {
    painter.circle_filled(center, radius, fill);
    painter.circle_stroke(center, radius, Stroke::new(2.0, rim));
}

pub fn tick(painter: &Painter, center: Pos2, inner: f32, outer: f32, angle: f32, colour: Color32) {
    painter.line_segment(
        [polar(center, inner, angle), polar(center, outer, angle)],
        Stroke::new(1.5, colour),
    );
}

pub fn needle(painter: &Painter, center: Pos2, length: f32, angle: f32, colour: Color32) {
    painter.line_segment([center, polar(center, length, angle)], Stroke::new(3.0, colour));
    painter.circle_filled(center, 4.0, colour);
}
