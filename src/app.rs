use std::time::Duration;

use eframe::egui;
use image::RgbImage;

use crate::capture::FrameSource;
use crate::session::CaptureSession;

/// Interval between preview updates.
const TICK_INTERVAL: Duration = Duration::from_millis(30);

/// The window: preview surface plus a save button. Each `update` pass is
/// one tick; the next is armed only once the current one completes, so
/// ticks never overlap.
pub struct CaptureApp<S: FrameSource> {
    session: CaptureSession<S>,
    preview: Option<egui::TextureHandle>,
    shut_down: bool,
}

impl<S: FrameSource> CaptureApp<S> {
    pub fn new(session: CaptureSession<S>) -> Self {
        Self {
            session,
            preview: None,
            shut_down: false,
        }
    }

    /// Upload the latest preview frame. The texture handle owns the image
    /// for as long as it is on screen; replacing it drops the old one.
    fn show_frame(&mut self, ctx: &egui::Context, frame: RgbImage) {
        let size = [frame.width() as usize, frame.height() as usize];
        let color_image = egui::ColorImage::from_rgb(size, frame.as_raw());

        match &mut self.preview {
            Some(texture) => texture.set(color_image, egui::TextureOptions::LINEAR),
            None => {
                self.preview =
                    Some(ctx.load_texture("preview", color_image, egui::TextureOptions::LINEAR));
            }
        }
    }

    fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        tracing::info!("Closing, releasing camera");
        self.session.shutdown();
    }
}

impl<S: FrameSource> eframe::App for CaptureApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) {
            self.shutdown();
            return;
        }

        if let Some(display) = self.session.tick() {
            self.show_frame(ctx, display);
        }

        let mut save_clicked = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                save_clicked = ui.button("Save").clicked();
                ui.add_space(8.0);
                match &self.preview {
                    Some(texture) => {
                        ui.image(texture);
                    }
                    None => {
                        ui.label("Waiting for camera...");
                    }
                }
            });
        });

        // The save runs synchronously inside the handler; the preview
        // pauses for one read plus one write, which is acceptable at
        // save frequency.
        if save_clicked {
            match self.session.save_current_frame() {
                Ok(path) => tracing::info!("Capture saved to {}", path.display()),
                Err(e) => tracing::error!("Capture failed: {}", e),
            }
        }

        ctx.request_repaint_after(TICK_INTERVAL);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.shutdown();
    }
}
