#![warn(clippy::all, rust_2018_idioms)]
// hide console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use sketch_canvas::{CanvasConfig, PaintApp};

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = load_config();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Sketch Canvas",
        native_options,
        Box::new(|cc| Ok(Box::new(PaintApp::new(cc, config)))),
    )
}

/// Reads the JSON config named by `SKETCH_CANVAS_CONFIG`, falling back to defaults
#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> CanvasConfig {
    let Some(path) = std::env::var_os("SKETCH_CANVAS_CONFIG") else {
        return CanvasConfig::default();
    };
    match CanvasConfig::load(&path) {
        Ok(config) => {
            log::info!("Loaded canvas config from {}", path.to_string_lossy());
            config
        }
        Err(err) => {
            log::warn!("Ignoring canvas config {}: {err}", path.to_string_lossy());
            CanvasConfig::default()
        }
    }
}

// When compiling to web using trunk:
#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            log::error!("No document to attach to");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("the_canvas_id")
            .and_then(|element| element.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            log::error!("the_canvas_id is missing or not a HtmlCanvasElement");
            return;
        };

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(PaintApp::new(cc, CanvasConfig::default())))),
            )
            .await;

        // Remove the loading text and spinner:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p> The app has crashed. See the developer console for details. </p>",
                    );
                    log::error!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}
