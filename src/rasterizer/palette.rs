//! 256-color palette used to turn indices into RGB on presentation
//!
//! The default is the stock VGA mode 13h palette: 16 EGA colors, a 16-step
//! gray ramp, nine 24-hue rings (three intensities x three saturations) and
//! eight blacks.

/// Hue ring ramps in 6-bit DAC units, lowest to highest component.
/// Order: high/medium/low intensity, each with high/medium/low saturation.
const RING_STEPS: [[u8; 5]; 9] = [
    [0, 16, 31, 47, 63],
    [31, 39, 47, 55, 63],
    [45, 49, 54, 58, 63],
    [0, 7, 14, 21, 28],
    [14, 17, 21, 24, 28],
    [20, 22, 24, 26, 28],
    [0, 4, 8, 12, 16],
    [8, 10, 12, 14, 16],
    [11, 12, 13, 15, 16],
];

const GRAY_STEPS: [u8; 16] = [0, 5, 8, 11, 14, 17, 20, 24, 28, 32, 36, 40, 45, 50, 56, 63];

const EGA: [[u8; 3]; 16] = [
    [0, 0, 0],
    [0, 0, 42],
    [0, 42, 0],
    [0, 42, 42],
    [42, 0, 0],
    [42, 0, 42],
    [42, 21, 0],
    [42, 42, 42],
    [21, 21, 21],
    [21, 21, 63],
    [21, 63, 21],
    [21, 63, 63],
    [63, 21, 21],
    [63, 21, 63],
    [63, 63, 21],
    [63, 63, 63],
];

/// Expand a 6-bit DAC value to 8 bits
fn dac_to_u8(v: u8) -> u8 {
    (v << 2) | (v >> 4)
}

/// One of the 24 hues around a ring, blue -> magenta -> red -> yellow -> green -> cyan
fn ring_hue(steps: &[u8; 5], hue: usize) -> [u8; 3] {
    let lo = steps[0];
    let hi = steps[4];
    let k = hue % 4;
    match hue / 4 {
        0 => [steps[k], lo, hi],
        1 => [hi, lo, steps[4 - k]],
        2 => [hi, steps[k], lo],
        3 => [steps[4 - k], hi, lo],
        4 => [lo, hi, steps[k]],
        _ => [lo, steps[4 - k], hi],
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [[u8; 3]; 256],
}

impl Palette {
    /// Stock VGA palette
    pub fn vga() -> Self {
        let mut colors = [[0u8; 3]; 256];

        for (i, c) in EGA.iter().enumerate() {
            colors[i] = c.map(dac_to_u8);
        }
        for (i, g) in GRAY_STEPS.iter().enumerate() {
            let v = dac_to_u8(*g);
            colors[16 + i] = [v, v, v];
        }
        for (ring, steps) in RING_STEPS.iter().enumerate() {
            for hue in 0..24 {
                colors[32 + ring * 24 + hue] = ring_hue(steps, hue).map(dac_to_u8);
            }
        }
        // 248..=255 stay black

        Self { colors }
    }

    pub fn rgb(&self, index: u8) -> [u8; 3] {
        self.colors[index as usize]
    }

    /// Opaque RGBA for a palette index
    pub fn rgba(&self, index: u8) -> [u8; 4] {
        let [r, g, b] = self.colors[index as usize];
        [r, g, b, 255]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::vga()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vga_landmarks() {
        let p = Palette::vga();
        assert_eq!(p.rgb(0), [0, 0, 0]);
        assert_eq!(p.rgb(14), [255, 255, 85]);
        assert_eq!(p.rgb(15), [255, 255, 255]);
        assert_eq!(p.rgb(31), [255, 255, 255]);
        // ring starts on pure blue, red sits eight hues later
        assert_eq!(p.rgb(32), [0, 0, 255]);
        assert_eq!(p.rgb(0x28), [255, 0, 0]);
        assert_eq!(p.rgb(255), [0, 0, 0]);
    }

    #[test]
    fn test_rgba_is_opaque() {
        let p = Palette::default();
        assert_eq!(p.rgba(0x33)[3], 255);
    }
}
