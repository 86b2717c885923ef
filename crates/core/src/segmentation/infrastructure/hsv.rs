use crate::shared::config::SkinRange;

/// HSV triple in OpenCV 8-bit units: hue 0-179, saturation and value 0-255.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

/// Converts one RGB pixel to HSV using OpenCV's 8-bit scaling (hue halved).
pub fn rgb_to_hsv(rgb: [u8; 3]) -> Hsv {
    let [r, g, b] = rgb.map(f32::from);
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = v - min;

    let s = if v == 0.0 { 0.0 } else { 255.0 * diff / v };

    let h = if diff == 0.0 {
        0.0
    } else if v == r {
        60.0 * (g - b) / diff
    } else if v == g {
        120.0 + 60.0 * (b - r) / diff
    } else {
        240.0 + 60.0 * (r - g) / diff
    };
    let h = if h < 0.0 { h + 360.0 } else { h };

    Hsv {
        h: ((h / 2.0).round() as u16 % 180) as u8,
        s: s.round().clamp(0.0, 255.0) as u8,
        v: v as u8,
    }
}

impl SkinRange {
    pub fn contains(&self, hsv: Hsv) -> bool {
        (self.hue[0]..=self.hue[1]).contains(&hsv.h)
            && (self.saturation[0]..=self.saturation[1]).contains(&hsv.s)
            && (self.value[0]..=self.value[1]).contains(&hsv.v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::black([0, 0, 0], Hsv { h: 0, s: 0, v: 0 })]
    #[case::white([255, 255, 255], Hsv { h: 0, s: 0, v: 255 })]
    #[case::red([255, 0, 0], Hsv { h: 0, s: 255, v: 255 })]
    #[case::green([0, 255, 0], Hsv { h: 60, s: 255, v: 255 })]
    #[case::blue([0, 0, 255], Hsv { h: 120, s: 255, v: 255 })]
    #[case::yellow([255, 255, 0], Hsv { h: 30, s: 255, v: 255 })]
    fn test_primary_colors(#[case] rgb: [u8; 3], #[case] expected: Hsv) {
        assert_eq!(rgb_to_hsv(rgb), expected);
    }

    #[test]
    fn test_magenta_side_wraps_below_180() {
        // Hue just under 360 degrees must stay in 0..180
        let hsv = rgb_to_hsv([255, 0, 1]);
        assert!(hsv.h < 180);
    }

    #[test]
    fn test_typical_skin_tone_is_in_default_range() {
        let hsv = rgb_to_hsv([220, 170, 140]);
        assert_eq!(hsv.h, 11);
        assert!(SkinRange::default().contains(hsv));
    }

    #[rstest]
    #[case::dark_skin_too_dim([60, 40, 30])]
    #[case::gray_desaturated([150, 148, 147])]
    #[case::blue_shirt([40, 60, 200])]
    #[case::green_plant([50, 160, 60])]
    fn test_non_skin_colors_rejected(#[case] rgb: [u8; 3]) {
        assert!(!SkinRange::default().contains(rgb_to_hsv(rgb)));
    }
}
