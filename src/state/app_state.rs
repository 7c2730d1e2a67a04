use crate::data::loader::ImageSource;
use crate::processing::sampler::PixelReading;
use crate::processing::statistics::{StatisticsTracker, UndoOutcome};
use crate::state::actions::{ActionOutcome, ViewerAction};
use crate::state::theme::Theme;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// All viewer state. Owned by the app; panels read it and emit actions.
pub struct ViewerState {
    pub image: Option<ImageSource>,
    pub tracker: StatisticsTracker,
    pub last_reading: Option<PixelReading>,
    /// Clicked pixels still in the history, for the on-image markers.
    pub markers: Vec<(u32, u32)>,
    pub theme: Theme,
    /// One-line feedback for the footer.
    pub status: Option<String>,
}

impl ViewerState {
    pub fn new(theme: Theme) -> Self {
        Self {
            image: None,
            tracker: StatisticsTracker::new(),
            last_reading: None,
            markers: Vec::new(),
            theme,
            status: None,
        }
    }

    /// Replace the current image. Samples from the old one are dropped.
    pub fn set_image(&mut self, image: ImageSource) {
        self.clear_samples();
        self.status = Some(format!(
            "Loaded {} ({}x{})",
            image.display_name(),
            image.dimensions().0,
            image.dimensions().1
        ));
        self.image = Some(image);
    }

    fn clear_samples(&mut self) {
        self.tracker.reset();
        self.last_reading = None;
        self.markers.clear();
    }

    /// Reading for the newest remaining marker, so the info panel never
    /// shows a click that has been undone.
    fn reread_last_marker(&self) -> Option<PixelReading> {
        let &(x, y) = self.markers.last()?;
        let reading = self.image.as_ref()?.sampler().sample(x, y);
        debug_assert_eq!(Some(reading.hsv), self.tracker.last());
        Some(reading)
    }

    pub fn apply(&mut self, action: ViewerAction) -> ActionOutcome {
        match action {
            ViewerAction::Pick { x, y } => {
                let Some(image) = self.image.as_ref().filter(|img| img.contains(x, y)) else {
                    return ActionOutcome::Ignored;
                };
                let reading = image.sampler().sample(x, y);
                let [r, g, b] = reading.rgb;
                let hsv = reading.hsv;
                tracing::info!(
                    "Position: ({x}, {y}) | RGB: ({r}, {g}, {b}) | HSV: ({}, {}, {})",
                    hsv.h,
                    hsv.s,
                    hsv.v
                );
                self.tracker.append(hsv);
                tracing::debug!("{}", self.tracker.snapshot().report());
                self.markers.push((x, y));
                self.last_reading = Some(reading);
                self.status = None;
                ActionOutcome::Picked(reading)
            }
            ViewerAction::Undo => match self.tracker.undo_last() {
                UndoOutcome::Removed(sample) => {
                    self.markers.pop();
                    self.last_reading = self.reread_last_marker();
                    tracing::info!(
                        "Removed last sample HSV: ({}, {}, {}), {} remaining",
                        sample.h,
                        sample.s,
                        sample.v,
                        self.tracker.len()
                    );
                    self.status = Some(format!("Removed last sample, {} remaining", self.tracker.len()));
                    ActionOutcome::Undone(sample)
                }
                UndoOutcome::Empty => {
                    tracing::debug!("Undo requested with no samples");
                    self.status = Some("No samples to remove".to_string());
                    ActionOutcome::NothingToUndo
                }
            },
            ViewerAction::Reset => {
                self.clear_samples();
                tracing::info!("Statistics reset");
                self.status = Some("Statistics reset".to_string());
                ActionOutcome::Reset
            }
            ViewerAction::Save => {
                tracing::warn!("Saving functionality not implemented yet");
                self.status = Some("Saving functionality not implemented yet".to_string());
                ActionOutcome::SaveUnavailable
            }
            ViewerAction::CopySnapshot => match serde_json::to_string_pretty(&self.tracker.snapshot()) {
                Ok(json) => ActionOutcome::CopyRequested(json),
                Err(e) => {
                    tracing::error!("Failed to serialize statistics: {e}");
                    self.status = Some(format!("Failed to serialize statistics: {e}"));
                    ActionOutcome::Ignored
                }
            },
            ViewerAction::Quit => ActionOutcome::Quit,
        }
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::statistics::Sample;
    use image::{Rgb, RgbImage};

    fn state_with_image() -> ViewerState {
        let mut rgb = RgbImage::new(4, 4);
        rgb.put_pixel(0, 0, Rgb([255, 0, 0]));
        rgb.put_pixel(1, 0, Rgb([0, 255, 0]));
        rgb.put_pixel(2, 0, Rgb([0, 0, 255]));
        let mut state = ViewerState::default();
        state.set_image(ImageSource::from_rgb(rgb));
        state
    }

    #[test]
    fn click_appends_to_tracker() {
        let mut state = state_with_image();
        let outcome = state.apply(ViewerAction::Pick { x: 1, y: 0 });
        match outcome {
            ActionOutcome::Picked(reading) => {
                assert_eq!(reading.rgb, [0, 255, 0]);
                assert_eq!(reading.hsv, Sample::new(60, 255, 255));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(state.tracker.len(), 1);
        assert_eq!(state.markers, vec![(1, 0)]);
        assert!(state.last_reading.is_some());
    }

    #[test]
    fn click_without_image_is_ignored() {
        let mut state = ViewerState::default();
        assert_eq!(state.apply(ViewerAction::Pick { x: 0, y: 0 }), ActionOutcome::Ignored);
        assert!(state.tracker.is_empty());
    }

    #[test]
    fn click_outside_image_is_ignored() {
        let mut state = state_with_image();
        assert_eq!(state.apply(ViewerAction::Pick { x: 4, y: 0 }), ActionOutcome::Ignored);
        assert!(state.tracker.is_empty());
    }

    #[test]
    fn undo_on_empty_reports_nothing() {
        let mut state = state_with_image();
        assert_eq!(state.apply(ViewerAction::Undo), ActionOutcome::NothingToUndo);
        assert_eq!(state.status.as_deref(), Some("No samples to remove"));
    }

    #[test]
    fn undo_pops_sample_and_marker() {
        let mut state = state_with_image();
        state.apply(ViewerAction::Pick { x: 0, y: 0 });
        state.apply(ViewerAction::Pick { x: 2, y: 0 });
        assert_eq!(
            state.apply(ViewerAction::Undo),
            ActionOutcome::Undone(Sample::new(120, 255, 255))
        );
        assert_eq!(state.markers, vec![(0, 0)]);
        assert_eq!(state.tracker.snapshot().max, Sample::new(0, 255, 255));
        let reading = state.last_reading.expect("one sample remains");
        assert_eq!((reading.x, reading.y), (0, 0));
        assert_eq!(reading.rgb, [255, 0, 0]);
        assert_eq!(Some(reading.hsv), state.tracker.last());

        state.apply(ViewerAction::Undo);
        assert!(state.last_reading.is_none());
    }

    #[test]
    fn reset_clears_everything() {
        let mut state = state_with_image();
        state.apply(ViewerAction::Pick { x: 0, y: 0 });
        assert_eq!(state.apply(ViewerAction::Reset), ActionOutcome::Reset);
        assert!(state.tracker.is_empty());
        assert!(state.markers.is_empty());
        assert!(state.last_reading.is_none());
        assert!(state.image.is_some());
    }

    #[test]
    fn new_image_resets_tracker() {
        let mut state = state_with_image();
        state.apply(ViewerAction::Pick { x: 0, y: 0 });
        state.set_image(ImageSource::from_rgb(RgbImage::new(2, 2)));
        assert!(state.tracker.is_empty());
        assert!(state.markers.is_empty());
        assert_eq!(state.image.as_ref().map(|i| i.dimensions()), Some((2, 2)));
    }

    #[test]
    fn save_stays_unavailable() {
        let mut state = state_with_image();
        assert_eq!(state.apply(ViewerAction::Save), ActionOutcome::SaveUnavailable);
        assert_eq!(
            state.status.as_deref(),
            Some("Saving functionality not implemented yet")
        );
    }

    #[test]
    fn copy_snapshot_serializes_stats() {
        let mut state = state_with_image();
        state.apply(ViewerAction::Pick { x: 0, y: 0 });
        let ActionOutcome::CopyRequested(json) = state.apply(ViewerAction::CopySnapshot) else {
            panic!("expected a copy request");
        };
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["avg"]["s"], 255);
    }

    #[test]
    fn copy_snapshot_of_empty_tracker_keeps_status_clear() {
        let mut state = ViewerState::default();
        let ActionOutcome::CopyRequested(json) = state.apply(ViewerAction::CopySnapshot) else {
            panic!("expected a copy request");
        };
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["count"], 0);
        assert_eq!(value["min"]["h"], 179);
        assert!(state.status.is_none());
    }

    #[test]
    fn quit_passes_through() {
        let mut state = ViewerState::default();
        assert_eq!(state.apply(ViewerAction::Quit), ActionOutcome::Quit);
    }
}
