/// Source-pixel rectangle cut out of a loaded bitmap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    /// Largest centered region of a `natural_width` x `natural_height` image
    /// whose height/width equals `ratio`.
    ///
    /// Images wider than the target keep their full height and lose the sides;
    /// taller (or equal) images keep their full width and lose top and bottom.
    /// Returns `None` for an empty bitmap, which is how a failed decode looks.
    pub fn centered(natural_width: f64, natural_height: f64, ratio: f64) -> Option<Self> {
        if !(natural_width > 0.0 && natural_height > 0.0 && ratio > 0.0) {
            return None;
        }
        let child_ratio = natural_height / natural_width;
        let (width, height) = if child_ratio < ratio {
            (natural_height / ratio, natural_height)
        } else {
            (natural_width, natural_width * ratio)
        };
        Some(Self {
            left: (natural_width - width) / 2.0,
            top: (natural_height - height) / 2.0,
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wide_image_crops_sides() {
        // 1000x500 into a 1.4 portrait slot: keep the 500px height.
        let crop = CropRect::centered(1000.0, 500.0, 1.4).unwrap();
        assert_eq!(crop.height, 500.0);
        assert!((crop.width - 500.0 / 1.4).abs() < 1e-9);
        assert_eq!(crop.top, 0.0);
        assert!((crop.left - (1000.0 - 500.0 / 1.4) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_tall_image_crops_top_and_bottom() {
        let crop = CropRect::centered(400.0, 1000.0, 1.4).unwrap();
        assert_eq!(crop.width, 400.0);
        assert!((crop.height - 560.0).abs() < 1e-9);
        assert_eq!(crop.left, 0.0);
        assert!((crop.top - 220.0).abs() < 1e-9);
    }

    #[test]
    fn test_exact_ratio_is_identity() {
        let crop = CropRect::centered(100.0, 140.0, 1.4).unwrap();
        assert_eq!(crop.width, 100.0);
        assert!((crop.height - 140.0).abs() < 1e-9);
        assert!(crop.left.abs() < 1e-9 && crop.top.abs() < 1e-9);
    }

    #[test]
    fn test_empty_bitmap() {
        assert!(CropRect::centered(0.0, 0.0, 1.4).is_none());
        assert!(CropRect::centered(100.0, 0.0, 1.4).is_none());
    }

    proptest! {
        #[test]
        fn taller_images_keep_full_width(w in 1.0f64..4000.0, h in 1.0f64..4000.0, ratio in 0.2f64..3.0) {
            prop_assume!(h / w >= ratio);
            let crop = CropRect::centered(w, h, ratio).unwrap();
            prop_assert_eq!(crop.width, w);
            prop_assert_eq!(crop.height, w * ratio);
            prop_assert!(crop.height <= h + 1e-9);
        }

        #[test]
        fn crop_stays_inside_bitmap(w in 1.0f64..4000.0, h in 1.0f64..4000.0, ratio in 0.2f64..3.0) {
            let crop = CropRect::centered(w, h, ratio).unwrap();
            let eps = 1e-6;
            prop_assert!(crop.left >= -eps && crop.top >= -eps);
            prop_assert!(crop.left + crop.width <= w + eps);
            prop_assert!(crop.top + crop.height <= h + eps);
            prop_assert!((crop.height / crop.width - ratio).abs() < 1e-6);
        }
    }
}
