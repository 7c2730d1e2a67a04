use crate::processing::statistics::{Sample, Snapshot};
use crate::state::actions::ViewerAction;
use crate::state::app_state::ViewerState;

fn triple(s: Sample) -> String {
    format!("({}, {}, {})", s.h, s.s, s.v)
}

/// Rows of the statistics grid: (label, h, s, v). Empty when there are no
/// samples, so sentinel bounds are never shown as a range.
pub fn stat_rows(snapshot: &Snapshot) -> Vec<(&'static str, Sample)> {
    if snapshot.count == 0 {
        return Vec::new();
    }
    vec![
        ("Min", snapshot.min),
        ("Max", snapshot.max),
        ("Avg", snapshot.avg),
        ("Range", snapshot.range()),
    ]
}

/// Right-hand "HSV Info" panel. Returns an action when a button is pressed.
pub fn show_info_panel(ui: &mut egui::Ui, state: &ViewerState) -> Option<ViewerAction> {
    let mut action = None;

    ui.heading("HSV Info");
    ui.add_space(8.0);

    match &state.last_reading {
        None => {
            ui.label(egui::RichText::new("Click on the image to see").weak());
            ui.label(egui::RichText::new("HSV values at that point").weak());
        }
        Some(reading) => {
            let [r, g, b] = reading.rgb;
            let hsv = reading.hsv;
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(format!("Position: ({}, {})", reading.x, reading.y));
                    ui.label(format!("RGB: ({r}, {g}, {b})"));
                    ui.label(format!("HSV: {}", triple(hsv)));
                });
                ui.add_space(12.0);
                let (swatch, _) = ui.allocate_exact_size(egui::vec2(100.0, 50.0), egui::Sense::hover());
                ui.painter().rect_filled(swatch, 4.0, egui::Color32::from_rgb(r, g, b));
                ui.painter().rect_stroke(
                    swatch,
                    4.0,
                    egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
                    egui::StrokeKind::Inside,
                );
            });
            ui.add_space(4.0);
            let hint = state.theme.hint_text();
            ui.colored_label(hint, format!("Hue: {} (0-179)", hsv.h));
            ui.colored_label(hint, format!("Saturation: {} (0-255)", hsv.s));
            ui.colored_label(hint, format!("Value: {} (0-255)", hsv.v));
        }
    }

    ui.add_space(12.0);
    ui.separator();

    let snapshot = state.tracker.snapshot();
    ui.label(egui::RichText::new(format!("Statistics ({} samples)", snapshot.count)).strong());
    ui.add_space(4.0);

    let rows = stat_rows(&snapshot);
    if rows.is_empty() {
        ui.label(egui::RichText::new("No samples yet.").weak());
    } else {
        egui::Grid::new("hsv_stats_grid")
            .num_columns(4)
            .striped(true)
            .spacing(egui::vec2(16.0, 4.0))
            .show(ui, |ui| {
                for header in ["", "H", "S", "V"] {
                    ui.label(egui::RichText::new(header).strong());
                }
                ui.end_row();
                for (label, s) in rows {
                    ui.label(label);
                    ui.monospace(s.h.to_string());
                    ui.monospace(s.s.to_string());
                    ui.monospace(s.v.to_string());
                    ui.end_row();
                }
            });
    }

    ui.add_space(12.0);
    ui.horizontal_wrapped(|ui| {
        let has_samples = !state.tracker.is_empty();
        if ui.add_enabled(has_samples, egui::Button::new("Undo (U)")).clicked() {
            action = Some(ViewerAction::Undo);
        }
        if ui.add_enabled(has_samples, egui::Button::new("Reset (R)")).clicked() {
            action = Some(ViewerAction::Reset);
        }
        if ui.button("Copy (C)").clicked() {
            action = Some(ViewerAction::CopySnapshot);
        }
    });

    if !state.tracker.is_empty() {
        ui.add_space(12.0);
        ui.separator();
        ui.label(egui::RichText::new("History").strong());
        egui::ScrollArea::vertical()
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for (i, s) in state.tracker.history().iter().enumerate().rev() {
                    ui.monospace(format!("{:>3}  {}", i + 1, triple(*s)));
                }
            });
    }

    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::statistics::StatisticsTracker;

    #[test]
    fn no_rows_for_empty_snapshot() {
        assert!(stat_rows(&StatisticsTracker::new().snapshot()).is_empty());
    }

    #[test]
    fn rows_follow_snapshot() {
        let mut tracker = StatisticsTracker::new();
        tracker.append(Sample::new(5, 10, 20));
        tracker.append(Sample::new(15, 30, 40));
        let rows = stat_rows(&tracker.snapshot());
        let labels: Vec<_> = rows.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, ["Min", "Max", "Avg", "Range"]);
        assert_eq!(rows[2].1, Sample::new(10, 20, 30));
        assert_eq!(rows[3].1, Sample::new(10, 20, 20));
    }
}
