use anyhow::{anyhow, Context};
use eframe::egui::{self, Key, ViewportBuilder, ViewportCommand, ViewportId};
use log::{debug, error, info};
use std::cell::RefCell;
use std::rc::Rc;

use crate::channels::ChannelSet;
use crate::config::AppConfig;
use crate::ipc::{IpcError, SensorFile};

mod window;

pub use window::SensorWindow;

/// Slot the event loop uses to hand a fatal write error back to `launch`.
type FatalSlot = Rc<RefCell<Option<IpcError>>>;

/// All sensor windows of one process, driven by a single event loop.
///
/// The first (lowest) channel lives in the root viewport; every other
/// channel gets its own immediate viewport. The loop ends once every
/// window is closed or the user presses Ctrl+Q.
pub struct SimulatorApp {
    windows: Vec<SensorWindow>,
    title: String,
    size: [f32; 2],
    fatal: FatalSlot,
    exiting: bool,
}

/// Answer to a close request on the root viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootClose {
    /// Let the root close, which ends the event loop.
    Proceed,
    /// Other windows are still open: keep the loop alive with the root hidden.
    Hide,
}

impl SimulatorApp {
    pub fn new(config: &AppConfig, windows: Vec<SensorWindow>, fatal: FatalSlot) -> Self {
        Self {
            windows,
            title: config.window.title.clone(),
            size: [config.window.width, config.window.height],
            fatal,
            exiting: false,
        }
    }

    pub fn window_title(title: &str, channel: u32) -> String {
        format!("{} (Channel {})", title, channel)
    }

    fn primary_title(&self) -> String {
        let channel = self.windows.first().map(|w| w.channel()).unwrap_or_default();
        Self::window_title(&self.title, channel)
    }

    fn exit_requested(ctx: &egui::Context) -> bool {
        ctx.input(|i| i.modifiers.command && i.key_pressed(Key::Q))
    }

    /// Closes the primary window and decides whether the loop may end.
    fn root_close_requested(&mut self) -> RootClose {
        if let Some(primary) = self.windows.first_mut() {
            primary.close();
        }
        if !self.exiting && self.windows.iter().any(|w| w.is_open()) {
            RootClose::Hide
        } else {
            self.exiting = true;
            RootClose::Proceed
        }
    }

    fn all_closed(&self) -> bool {
        self.windows.iter().all(|w| !w.is_open())
    }

    fn begin_exit(&mut self, ctx: &egui::Context) {
        self.exiting = true;
        ctx.send_viewport_cmd_to(ViewportId::ROOT, ViewportCommand::Close);
    }

    fn fail(&mut self, ctx: &egui::Context, e: IpcError) {
        error!("Sensor update failed: {}", e);
        {
            let mut fatal = self.fatal.borrow_mut();
            if fatal.is_none() {
                *fatal = Some(e);
            }
        }
        self.begin_exit(ctx);
    }
}

impl eframe::App for SimulatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut errors = Vec::new();
        let mut exit = Self::exit_requested(ctx);

        if ctx.input(|i| i.viewport().close_requested()) {
            if self.root_close_requested() == RootClose::Hide {
                debug!("Primary window closed, hiding it while others stay open");
                ctx.send_viewport_cmd(ViewportCommand::CancelClose);
                // Embedded secondaries are drawn inside the root.
                if !ctx.embed_viewports() {
                    ctx.send_viewport_cmd(ViewportCommand::Visible(false));
                }
            }
        }

        let Some((primary, secondary)) = self.windows.split_first_mut() else {
            ctx.send_viewport_cmd(ViewportCommand::Close);
            return;
        };

        if primary.is_open() {
            if let Err(e) = egui::CentralPanel::default()
                .show(ctx, |ui| primary.show(ui))
                .inner
            {
                errors.push(e);
            }
        }

        for window in secondary.iter_mut().filter(|w| w.is_open()) {
            let title = Self::window_title(&self.title, window.channel());
            let builder = ViewportBuilder::default()
                .with_title(title.as_str())
                .with_inner_size(self.size);

            let result = ctx.show_viewport_immediate(window.viewport_id(), builder, |ctx, class| {
                let result = window.show_viewport(ctx, class, &title);
                if ctx.input(|i| i.viewport().close_requested()) {
                    debug!("Window for channel {} closed", window.channel());
                    window.close();
                }
                exit |= Self::exit_requested(ctx);
                result
            });

            if let Err(e) = result {
                errors.push(e);
            }
        }

        for e in errors {
            self.fail(ctx, e);
        }

        if self.exiting {
            return;
        }

        if exit {
            info!("Exit requested");
            self.begin_exit(ctx);
        } else if self.all_closed() {
            info!("Last window closed");
            self.begin_exit(ctx);
        }
    }
}

/// Opens one window per channel and blocks until the event loop ends.
///
/// Every window publishes its initial reading before the loop starts; a
/// failure there aborts start-up. A failed write inside the loop closes
/// all windows and is returned once the loop has ended.
pub fn launch(config: &AppConfig, channels: &ChannelSet) -> anyhow::Result<()> {
    let windows = channels
        .iter()
        .map(|channel| SensorWindow::new(SensorFile::for_channel(&config.ipc, channel)))
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to initialise sensor windows")?;

    for window in &windows {
        info!(
            "Channel {}: publishing to {}",
            window.channel(),
            window.sensor().path().display()
        );
    }

    let fatal: FatalSlot = Rc::new(RefCell::new(None));
    let app = SimulatorApp::new(config, windows, Rc::clone(&fatal));

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title(app.primary_title())
            .with_inner_size(app.size),
        ..Default::default()
    };

    eframe::run_native(
        &config.window.title,
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow!("Event loop failed: {}", e))?;

    let failure = fatal.borrow_mut().take();
    if let Some(e) = failure {
        return Err(e).context("Sensor update failed");
    }

    info!("All windows closed");
    Ok(())
}
