use crate::PaintApp;
use crate::surface::Surface;
use egui::{pos2, vec2, Color32, Rect, Sense};

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let available = ui.available_size();
        app.fit_texture_limit(ctx);
        app.ensure_surface(available);

        let [width, height] = app.canvas.surface().map_or([1, 1], |surface| surface.size());
        let (rect, _response) =
            ui.allocate_exact_size(vec2(width as f32, height as f32), Sense::drag());
        app.canvas.set_origin(rect.min);

        for event in app.input.process_input(ctx, rect, available) {
            let response = app.canvas.handle_event(&event);
            if response.prevent_default {
                log::trace!("Suppressed default for {:?}", event);
            }
        }

        if let Some(surface) = app.canvas.surface() {
            let texture = app.texture.update(ctx, surface);
            ui.painter().image(
                texture.id(),
                rect,
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        if app.canvas.is_drawing() {
            ctx.request_repaint();
        }
    });
}
