mod state;
mod data;
mod processing;
mod ui;
mod app;

use std::path::PathBuf;

use app::HsvViewerApp;
use clap::Parser;
use eframe::egui;
use state::theme::Theme;

#[derive(Parser)]
#[command(name = "hsv_viewer")]
#[command(version, about = "HSV Image Viewer - View HSV values of image pixels", long_about = None)]
struct Cli {
    /// Path to the image file
    #[arg(value_name = "IMAGE")]
    image: Option<PathBuf>,

    /// Initial colour theme
    #[arg(long, value_enum, default_value_t = Theme::Dark)]
    theme: Theme,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Some(path) = &cli.image {
        tracing::info!("Opening {:?}", path);
    }
    tracing::info!("Click on any pixel to see its HSV values; U undoes, R resets, Q or Esc quits");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("HSV Image Viewer")
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "HSV Image Viewer",
        options,
        Box::new(move |cc| Ok(Box::new(HsvViewerApp::new(cc, cli.theme, cli.image)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_accepts_image_and_theme() {
        let cli = Cli::try_parse_from(["hsv_viewer", "photo.png", "--theme", "light"]).unwrap();
        assert_eq!(cli.image, Some(PathBuf::from("photo.png")));
        assert_eq!(cli.theme, Theme::Light);
    }

    #[test]
    fn cli_image_is_optional() {
        let cli = Cli::try_parse_from(["hsv_viewer"]).unwrap();
        assert!(cli.image.is_none());
        assert_eq!(cli.theme, Theme::Dark);
    }

    #[test]
    fn cli_rejects_unknown_theme() {
        assert!(Cli::try_parse_from(["hsv_viewer", "--theme", "sepia"]).is_err());
    }
}
