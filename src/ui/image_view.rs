use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::state::actions::ViewerAction;
use crate::state::app_state::ViewerState;

/// Largest rect with the image's aspect ratio that fits in `available`,
/// centred in it.
pub fn fit_rect(available: egui::Rect, dims: (u32, u32)) -> egui::Rect {
    let (w, h) = (dims.0.max(1) as f32, dims.1.max(1) as f32);
    let scale = (available.width() / w).min(available.height() / h);
    egui::Rect::from_center_size(available.center(), egui::vec2(w * scale, h * scale))
}

/// Texture for the image, shrunk so neither side exceeds `max_side`.
///
/// Only the display copy is resized; sampling keeps reading the full image,
/// and clicks map through the image dimensions, not the texture's.
pub fn display_image(rgb: &RgbImage, max_side: usize) -> egui::ColorImage {
    let (w, h) = rgb.dimensions();
    let max_side = max_side.max(1) as u32;
    if w <= max_side && h <= max_side {
        return egui::ColorImage::from_rgb([w as usize, h as usize], rgb.as_raw());
    }
    let scale = max_side as f64 / w.max(h) as f64;
    let nw = ((w as f64 * scale).round() as u32).clamp(1, max_side);
    let nh = ((h as f64 * scale).round() as u32).clamp(1, max_side);
    tracing::debug!("Display texture downscaled from {w}x{h} to {nw}x{nh}");
    let resized = imageops::resize(rgb, nw, nh, FilterType::Triangle);
    egui::ColorImage::from_rgb([nw as usize, nh as usize], resized.as_raw())
}

/// Map a screen position inside `image_rect` to a pixel coordinate.
/// Positions outside the rect give `None`.
pub fn screen_to_pixel(image_rect: egui::Rect, pos: egui::Pos2, dims: (u32, u32)) -> Option<(u32, u32)> {
    if dims.0 == 0 || dims.1 == 0 || !image_rect.contains(pos) {
        return None;
    }
    let u = (pos.x - image_rect.min.x) / image_rect.width();
    let v = (pos.y - image_rect.min.y) / image_rect.height();
    // The far edge is inside the rect but maps to one past the last pixel.
    let x = ((u * dims.0 as f32) as u32).min(dims.0 - 1);
    let y = ((v * dims.1 as f32) as u32).min(dims.1 - 1);
    Some((x, y))
}

/// Screen-space centre of pixel `(x, y)`.
fn pixel_center(image_rect: egui::Rect, px: (u32, u32), dims: (u32, u32)) -> egui::Pos2 {
    egui::pos2(
        image_rect.min.x + (px.0 as f32 + 0.5) * image_rect.width() / dims.0 as f32,
        image_rect.min.y + (px.1 as f32 + 0.5) * image_rect.height() / dims.1 as f32,
    )
}

/// Draw the image fit to the panel. Returns a pick action on left click.
pub fn show_image_view(
    ui: &mut egui::Ui,
    state: &ViewerState,
    texture: Option<&egui::TextureHandle>,
) -> Option<ViewerAction> {
    let available = ui.available_rect_before_wrap();
    let (canvas, response) = ui.allocate_exact_size(available.size(), egui::Sense::click());
    let painter = ui.painter_at(canvas);
    painter.rect_filled(canvas, 0.0, state.theme.canvas_bg());

    let (Some(image), Some(texture)) = (state.image.as_ref(), texture) else {
        painter.text(
            canvas.center(),
            egui::Align2::CENTER_CENTER,
            "Open an image or drop one here",
            egui::FontId::proportional(18.0),
            ui.visuals().weak_text_color(),
        );
        return None;
    };

    let dims = image.dimensions();
    let image_rect = fit_rect(canvas, dims);
    painter.image(
        texture.id(),
        image_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );

    let marker = egui::Stroke::new(1.5, state.theme.marker());
    for &px in &state.markers {
        painter.circle_stroke(pixel_center(image_rect, px, dims), 5.0, marker);
    }

    if let Some(hover) = response.hover_pos() {
        if let Some((x, y)) = screen_to_pixel(image_rect, hover, dims) {
            response.clone().on_hover_text_at_pointer(format!("({x}, {y})"));
        }
    }

    if response.clicked_by(egui::PointerButton::Primary) {
        let (x, y) = response
            .interact_pointer_pos()
            .and_then(|pos| screen_to_pixel(image_rect, pos, dims))?;
        return Some(ViewerAction::Pick { x, y });
    }
    None
}
