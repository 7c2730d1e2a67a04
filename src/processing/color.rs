use crate::processing::statistics::Sample;

/// Fixed-point precision of the division tables.
const HSV_SHIFT: u32 = 12;
const HALF: i32 = 1 << (HSV_SHIFT - 1);

/// `round(a / b)` for positive operands whose quotient never lands on .5.
const fn div_round(a: i32, b: i32) -> i32 {
    (2 * a + b) / (2 * b)
}

/// `round((255 << 12) / v)`, index 0 unused.
const SDIV_TABLE: [i32; 256] = {
    let mut table = [0; 256];
    let mut i = 1;
    while i < 256 {
        table[i] = div_round(255 << HSV_SHIFT, i as i32);
        i += 1;
    }
    table
};

/// `round((180 << 12) / (6 * d))`, index 0 unused.
const HDIV_TABLE: [i32; 256] = {
    let mut table = [0; 256];
    let mut i = 1;
    while i < 256 {
        table[i] = div_round(180 << HSV_SHIFT, 6 * i as i32);
        i += 1;
    }
    table
};

/// Convert an 8-bit RGB pixel to HSV in the 8-bit "half-degree" convention:
/// H in [0, 179], S and V in [0, 255].
///
/// Uses the same 12-bit fixed-point division tables as OpenCV's
/// `COLOR_BGR2HSV`, so results agree with it bit for bit. Red wins ties for
/// the hue sector, then green.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Sample {
    let [r, g, b] = [r, g, b].map(i32::from);
    let v = r.max(g).max(b);
    let diff = v - r.min(g).min(b);

    let s = (diff * SDIV_TABLE[v as usize] + HALF) >> HSV_SHIFT;

    let sector = if v == r {
        g - b
    } else if v == g {
        (b - r) + 2 * diff
    } else {
        (r - g) + 4 * diff
    };
    // Arithmetic shift floors negative hues before the wrap.
    let h = (sector * HDIV_TABLE[diff as usize] + HALF) >> HSV_SHIFT;
    let h = if h < 0 { h + 180 } else { h };

    Sample::new(h as u8, s as u8, v as u8)
}
