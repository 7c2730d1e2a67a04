use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::processing::statistics::Sample;

/// The colour of one pixel in both spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelReading {
    pub x: u32,
    pub y: u32,
    pub rgb: [u8; 3],
    pub hsv: Sample,
}

/// Lookup into two co-registered buffers: the RGB image and its HSV
/// conversion, stored channel-wise as (h, s, v).
pub struct PixelSampler<'a> {
    rgb: &'a RgbImage,
    hsv: &'a RgbImage,
}

impl<'a> PixelSampler<'a> {
    pub fn new(rgb: &'a RgbImage, hsv: &'a RgbImage) -> Self {
        debug_assert_eq!(rgb.dimensions(), hsv.dimensions());
        Self { rgb, hsv }
    }

    /// Read the pixel at `(x, y)`. The caller keeps the coordinate in bounds.
    pub fn sample(&self, x: u32, y: u32) -> PixelReading {
        debug_assert!(
            x < self.rgb.width() && y < self.rgb.height(),
            "sample ({x}, {y}) outside {}x{}",
            self.rgb.width(),
            self.rgb.height()
        );
        let [h, s, v] = self.hsv.get_pixel(x, y).0;
        PixelReading {
            x,
            y,
            rgb: self.rgb.get_pixel(x, y).0,
            hsv: Sample::new(h, s, v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn reads_both_buffers_at_same_coordinate() {
        let mut rgb = RgbImage::new(3, 2);
        let mut hsv = RgbImage::new(3, 2);
        rgb.put_pixel(2, 1, Rgb([10, 20, 30]));
        hsv.put_pixel(2, 1, Rgb([105, 170, 30]));

        let reading = PixelSampler::new(&rgb, &hsv).sample(2, 1);
        assert_eq!(reading.x, 2);
        assert_eq!(reading.y, 1);
        assert_eq!(reading.rgb, [10, 20, 30]);
        assert_eq!(reading.hsv, Sample::new(105, 170, 30));
    }

    #[test]
    fn x_is_column_and_y_is_row() {
        let mut rgb = RgbImage::new(2, 2);
        let hsv = RgbImage::new(2, 2);
        rgb.put_pixel(1, 0, Rgb([255, 0, 0]));
        let sampler = PixelSampler::new(&rgb, &hsv);
        assert_eq!(sampler.sample(1, 0).rgb, [255, 0, 0]);
        assert_eq!(sampler.sample(0, 1).rgb, [0, 0, 0]);
    }
}
