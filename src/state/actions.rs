use crate::processing::sampler::PixelReading;
use crate::processing::statistics::Sample;

/// Everything the event layer can ask of the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    /// Left click on image pixel `(x, y)`.
    Pick { x: u32, y: u32 },
    Undo,
    Reset,
    Save,
    CopySnapshot,
    Quit,
}

/// What happened in response to a [`ViewerAction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Picked(PixelReading),
    /// Click with no image loaded, or outside it.
    Ignored,
    Undone(Sample),
    NothingToUndo,
    Reset,
    SaveUnavailable,
    /// Snapshot serialized as JSON, ready for the clipboard.
    CopyRequested(String),
    Quit,
}

impl ViewerAction {
    /// Map this frame's key presses to actions. Quit keys come first so a
    /// quit is never swallowed by another binding.
    pub fn from_keys(pressed: impl Fn(egui::Key) -> bool) -> Vec<ViewerAction> {
        let mut actions = Vec::new();
        if pressed(egui::Key::Q) || pressed(egui::Key::Escape) {
            actions.push(ViewerAction::Quit);
            return actions;
        }
        if pressed(egui::Key::R) {
            actions.push(ViewerAction::Reset);
        }
        if pressed(egui::Key::U) || pressed(egui::Key::Backspace) {
            actions.push(ViewerAction::Undo);
        }
        if pressed(egui::Key::S) {
            actions.push(ViewerAction::Save);
        }
        if pressed(egui::Key::C) {
            actions.push(ViewerAction::CopySnapshot);
        }
        actions
    }
}
