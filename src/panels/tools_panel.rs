use crate::PaintApp;
use crate::command::Command;
use egui::Slider;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("tools_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let mut brush = app.canvas.brush();

            ui.label("Color:");
            if egui::color_picker::color_edit_button_srgba(
                ui,
                &mut brush.color,
                egui::color_picker::Alpha::Opaque,
            )
            .changed()
            {
                app.canvas.set_brush(brush);
                app.color_text = crate::brush::to_hex(brush.color);
                app.color_error = None;
            }

            let text =
                ui.add(egui::TextEdit::singleline(&mut app.color_text).desired_width(80.0));
            if text.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                app.color_error = app
                    .canvas
                    .set_color(&app.color_text)
                    .err()
                    .map(|err| err.to_string());
            }

            ui.separator();

            ui.label("Width:");
            let mut width = app.canvas.brush().width;
            if ui.add(Slider::new(&mut width, 1.0..=50.0)).changed() {
                // The slider range keeps the width valid.
                if let Err(err) = app.canvas.set_brush_width(width) {
                    log::warn!("{err}");
                }
            }

            ui.separator();

            for command in [Command::Undo, Command::Redo] {
                let enabled = match command {
                    Command::Undo => app.canvas.can_undo(),
                    Command::Redo => app.canvas.can_redo(),
                };
                if ui.add_enabled(enabled, egui::Button::new(command.label())).clicked() {
                    log::info!("{} from toolbar", command.label());
                    app.canvas.execute(command);
                }
            }

            let history = app.canvas.history();
            ui.label(format!(
                "Undo stack size: {}  Redo stack size: {}",
                history.undo_len(),
                history.redo_len()
            ));
        });

        if let Some(error) = &app.color_error {
            ui.colored_label(ui.visuals().error_fg_color, error);
        }
    });
}
