use eframe::egui::{EventFilter, Key, Response, Sense, Ui, Vec2, Widget};
use std::f32::consts::PI;

use crate::models::Temperature;
use crate::renderer::colours::Colours;
use crate::renderer::drawing;

/// Angle covered between the lowest and highest value, 300°.
const SWEEP: f32 = PI * 5.0 / 3.0;

const RANGE: f32 = (Temperature::MAX_TENTHS - Temperature::MIN_TENTHS) as f32;

/// Needle angle for a dial value, clockwise from 12 o'clock.
pub fn angle_for(temperature: Temperature) -> f32 {
    let fraction = (temperature.tenths() - Temperature::MIN_TENTHS) as f32 / RANGE;
    -SWEEP / 2.0 + fraction * SWEEP
}

/// Dial value under the pointer, given its offset from the dial centre.
/// Angles in the dead zone at the bottom snap to the nearer end.
pub fn temperature_at(offset: Vec2) -> Temperature {
    let angle = offset.x.atan2(-offset.y).clamp(-SWEEP / 2.0, SWEEP / 2.0);
    let fraction = (angle + SWEEP / 2.0) / SWEEP;
    let tenths = Temperature::MIN_TENTHS as f32 + (fraction * RANGE).round();
    Temperature::from_tenths(tenths as i32)
}

/// Value held by a dial. While dragging, the pointer position is only
/// previewed; the value changes when the drag ends.
#[derive(Debug, Clone, Default)]
pub struct DialState {
    value: Temperature,
    pending: Option<Temperature>,
}

impl DialState {
    pub fn new(value: Temperature) -> Self {
        Self {
            value,
            pending: None,
        }
    }

    pub fn value(&self) -> Temperature {
        self.value
    }

    /// What the needle points at: the drag preview if any, otherwise the value.
    pub fn displayed(&self) -> Temperature {
        self.pending.unwrap_or(self.value)
    }

    pub fn is_dragging(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns true when the value actually changed.
    pub fn set_value(&mut self, value: Temperature) -> bool {
        self.pending = None;
        let changed = value != self.value;
        self.value = value;
        changed
    }

    pub fn preview(&mut self, value: Temperature) {
        self.pending = Some(value);
    }

    pub fn commit(&mut self) -> bool {
        match self.pending.take() {
            Some(value) => self.set_value(value),
            None => false,
        }
    }

    pub fn step(&mut self, delta: i32) -> bool {
        let target = Temperature::from_tenths(self.value.tenths() as i32 + delta);
        self.set_value(target)
    }
}

/// Rotary knob for a [`DialState`]. The returned response is marked
/// changed whenever the committed value moves.
pub struct Dial<'a> {
    state: &'a mut DialState,
    diameter: f32,
}

impl<'a> Dial<'a> {
    pub fn new(state: &'a mut DialState) -> Self {
        Self {
            state,
            diameter: 160.0,
        }
    }

    pub fn diameter(mut self, diameter: f32) -> Self {
        self.diameter = diameter;
        self
    }

    fn keyboard_step(ui: &Ui) -> Option<i32> {
        let single = Temperature::SINGLE_STEP as i32;
        let page = Temperature::PAGE_STEP as i32;
        let range = RANGE as i32;
        ui.input(|i| {
            if i.key_pressed(Key::ArrowUp) || i.key_pressed(Key::ArrowRight) {
                Some(single)
            } else if i.key_pressed(Key::ArrowDown) || i.key_pressed(Key::ArrowLeft) {
                Some(-single)
            } else if i.key_pressed(Key::PageUp) {
                Some(page)
            } else if i.key_pressed(Key::PageDown) {
                Some(-page)
            } else if i.key_pressed(Key::Home) {
                Some(-range)
            } else if i.key_pressed(Key::End) {
                Some(range)
            } else {
                None
            }
        })
    }

    fn wheel_step(ui: &Ui) -> Option<i32> {
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        if scroll > 0.0 {
            Some(Temperature::SINGLE_STEP as i32)
        } else if scroll < 0.0 {
            Some(-(Temperature::SINGLE_STEP as i32))
        } else {
            None
        }
    }
}

impl Widget for Dial<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let Dial { state, diameter } = self;
        let (rect, mut response) =
            ui.allocate_exact_size(Vec2::splat(diameter), Sense::click_and_drag());
        let center = rect.center();
        let mut changed = false;

        if response.clicked() || response.drag_started() {
            response.request_focus();
        }

        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                state.preview(temperature_at(pos - center));
            }
        }

        if response.drag_stopped() || response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                state.preview(temperature_at(pos - center));
            }
            changed |= state.commit();
        }

        if response.has_focus() {
            ui.memory_mut(|m| {
                m.set_focus_lock_filter(
                    response.id,
                    EventFilter {
                        horizontal_arrows: true,
                        vertical_arrows: true,
                        ..Default::default()
                    },
                )
            });
            if let Some(delta) = Self::keyboard_step(ui) {
                changed |= state.step(delta);
            }
        }

        if response.hovered() && !state.is_dragging() {
            if let Some(delta) = Self::wheel_step(ui) {
                changed |= state.step(delta);
            }
        }

        if changed {
            response.mark_changed();
        }

        if ui.is_rect_visible(rect) {
            let colours = Colours::default();
            let painter = ui.painter();
            let radius = diameter / 2.0 - 2.0;
            let rim = if response.has_focus() {
                colours.focus
            } else {
                colours.rim
            };

            drawing::face(painter, center, radius, colours.body, rim);

            for tenths in (Temperature::MIN_TENTHS..=Temperature::MAX_TENTHS)
                .step_by(Temperature::PAGE_STEP as usize)
            {
                let angle = angle_for(Temperature::from_tenths(tenths as i32));
                let (inner, colour) = if tenths % 50 == 0 {
                    (radius - 14.0, colours.major_tick)
                } else {
                    (radius - 8.0, colours.tick)
                };
                drawing::tick(painter, center, inner, radius - 3.0, angle, colour);
            }

            let needle = if state.is_dragging() {
                colours.preview
            } else {
                colours.needle
            };
            drawing::needle(
                painter,
                center,
                radius - 18.0,
                angle_for(state.displayed()),
                needle,
            );
        }

        response
    }
}
