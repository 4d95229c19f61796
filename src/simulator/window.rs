use eframe::egui::{self, RichText, Ui, ViewportId};

use crate::ipc::{IpcError, SensorFile};
use crate::models::{Reading, Temperature};
use crate::renderer::colours::Colours;
use crate::renderer::fonts;
use crate::renderer::widgets::{Dial, DialState};

/// One simulated sensor: a channel label, the live temperature and the dial.
pub struct SensorWindow {
    sensor: SensorFile,
    dial: DialState,
    label: String,
    open: bool,
}

impl SensorWindow {
    /// Creates the window and publishes the initial 20.0° reading.
    pub fn new(sensor: SensorFile) -> Result<Self, IpcError> {
        let mut window = Self {
            sensor,
            dial: DialState::new(Temperature::default()),
            label: String::new(),
            open: true,
        };
        window.value_changed()?;
        Ok(window)
    }

    pub fn channel(&self) -> u32 {
        self.sensor.channel()
    }

    pub fn sensor(&self) -> &SensorFile {
        &self.sensor
    }

    pub fn temperature(&self) -> Temperature {
        self.dial.value()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn viewport_id(&self) -> ViewportId {
        ViewportId::from_hash_of(("sensor", self.channel()))
    }

    /// Moves the dial programmatically; publishes only when the value changes.
    pub fn set_temperature(&mut self, temperature: Temperature) -> Result<(), IpcError> {
        if self.dial.set_value(temperature) {
            self.value_changed()?;
        }
        Ok(())
    }

    fn value_changed(&mut self) -> Result<(), IpcError> {
        let temperature = self.dial.value();
        self.label = temperature.label();
        self.sensor.write(&Reading::from_temperature(temperature))
    }

    pub fn show(&mut self, ui: &mut Ui) -> Result<(), IpcError> {
        let colours = Colours::default();
        let channel = format!("Channel: {}", self.channel());

        let response = ui
            .vertical_centered(|ui| {
                ui.label(
                    RichText::new(channel)
                        .font(fonts::channel_font())
                        .color(colours.text),
                );
                ui.label(
                    RichText::new(self.label.as_str())
                        .font(fonts::temperature_font())
                        .color(colours.text),
                );
                ui.add_space(8.0);
                let diameter = ui.available_width().min(ui.available_height()).clamp(80.0, 400.0);
                ui.add(Dial::new(&mut self.dial).diameter(diameter))
            })
            .inner;

        if response.changed() {
            self.value_changed()?;
        }
        Ok(())
    }

    /// Renders into a child viewport, or into a floating window when the
    /// backend cannot open another native window.
    pub fn show_viewport(
        &mut self,
        ctx: &egui::Context,
        class: egui::ViewportClass,
        title: &str,
    ) -> Result<(), IpcError> {
        match class {
            egui::ViewportClass::Embedded => egui::Window::new(title)
                .id(egui::Id::new(self.viewport_id()))
                .show(ctx, |ui| self.show(ui))
                .and_then(|r| r.inner)
                .unwrap_or(Ok(())),
            _ => egui::CentralPanel::default().show(ctx, |ui| self.show(ui)).inner,
        }
    }
}
