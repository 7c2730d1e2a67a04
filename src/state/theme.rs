use egui::{Color32, Visuals};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn visuals(&self) -> Visuals {
        match self {
            Theme::Dark => Visuals::dark(),
            Theme::Light => Visuals::light(),
        }
    }

    /// Backdrop behind the image where it does not fill the panel.
    pub fn canvas_bg(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(20, 20, 20),
            Theme::Light => Color32::from_rgb(235, 235, 235),
        }
    }

    /// Ring drawn around sampled pixels.
    pub fn marker(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(255, 255, 255),
            Theme::Light => Color32::from_rgb(20, 20, 20),
        }
    }

    /// Text colour of the channel-range hints in the info panel.
    pub fn hint_text(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(100, 255, 100),
            Theme::Light => Color32::from_rgb(20, 130, 20),
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        match self {
            Theme::Dark => "Light Mode",
            Theme::Light => "Dark Mode",
        }
    }
}
