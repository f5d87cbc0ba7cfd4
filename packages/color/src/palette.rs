//! Categorical and sequential palettes for grouping markers.

use crate::Rgb;

/// The ten-colour categorical palette used when the number of groups is
/// small enough to keep every group visually distinct.
pub const CATEGORY10: [Rgb; 10] = [
    Rgb::from_u32(0x001f_77b4),
    Rgb::from_u32(0x00ff_7f0e),
    Rgb::from_u32(0x002c_a02c),
    Rgb::from_u32(0x00d6_2728),
    Rgb::from_u32(0x0094_67bd),
    Rgb::from_u32(0x008c_564b),
    Rgb::from_u32(0x00e3_77c2),
    Rgb::from_u32(0x007f_7f7f),
    Rgb::from_u32(0x00bc_bd22),
    Rgb::from_u32(0x0017_becf),
];

/// Evenly spaced stops along the viridis ramp. Intermediate colours are
/// linearly interpolated between neighbouring stops.
const VIRIDIS_STOPS: [Rgb; 10] = [
    Rgb::from_u32(0x0044_0154),
    Rgb::from_u32(0x0048_2878),
    Rgb::from_u32(0x003e_4a89),
    Rgb::from_u32(0x0031_688e),
    Rgb::from_u32(0x0026_828e),
    Rgb::from_u32(0x001f_9e89),
    Rgb::from_u32(0x0035_b779),
    Rgb::from_u32(0x006d_cd59),
    Rgb::from_u32(0x00b4_de2c),
    Rgb::from_u32(0x00fd_e725),
];

/// Largest group count served by [`CATEGORY10`] before [`palette_for`]
/// switches to [`viridis`].
pub const CATEGORICAL_LIMIT: usize = CATEGORY10.len();

/// Returns the categorical palette.
#[must_use]
pub fn category10() -> Vec<Rgb> {
    CATEGORY10.to_vec()
}

/// Samples `n` colours from the viridis ramp, from dark purple to yellow.
///
/// The first colour is always the start of the ramp and, for `n > 1`, the
/// last colour is always its end.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn viridis(n: usize) -> Vec<Rgb> {
    match n {
        0 => Vec::new(),
        1 => vec![VIRIDIS_STOPS[0]],
        _ => {
            let span = (VIRIDIS_STOPS.len() - 1) as f64;
            (0..n)
                .map(|i| sample(&VIRIDIS_STOPS, i as f64 / (n - 1) as f64 * span))
                .collect()
        }
    }
}

/// Returns a palette with one colour per group.
///
/// Uses [`CATEGORY10`] for up to [`CATEGORICAL_LIMIT`] groups (truncated
/// to `n`) and [`viridis`] beyond that.
#[must_use]
pub fn palette_for(n: usize) -> Vec<Rgb> {
    if n <= CATEGORICAL_LIMIT {
        CATEGORY10[..n].to_vec()
    } else {
        log::debug!("{n} groups exceed the categorical palette, using viridis");
        viridis(n)
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn sample(stops: &[Rgb], position: f64) -> Rgb {
    let last = stops.len() - 1;
    let lower = (position.floor() as usize).min(last);
    let upper = (lower + 1).min(last);
    let frac = position - lower as f64;

    let lerp = |a: u8, b: u8| -> u8 {
        let a = f64::from(a);
        let b = f64::from(b);
        (b - a).mul_add(frac, a).round().clamp(0.0, 255.0) as u8
    };

    let (a, b) = (stops[lower], stops[upper]);
    Rgb::new(lerp(a.r, b.r), lerp(a.g, b.g), lerp(a.b, b.b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_group_counts_use_category10() {
        let palette = palette_for(3);
        assert_eq!(palette.len(), 3);
        assert_eq!(palette[0].to_string(), "#1f77b4");
        assert_eq!(palette[2].to_string(), "#2ca02c");
        assert_eq!(palette_for(10), category10());
    }

    #[test]
    fn large_group_counts_use_viridis() {
        let palette = palette_for(11);
        assert_eq!(palette.len(), 11);
        assert_eq!(palette[0].to_string(), "#440154");
        assert_eq!(palette[10].to_string(), "#fde725");
    }

    #[test]
    fn viridis_at_stop_count_reproduces_stops() {
        assert_eq!(viridis(10), VIRIDIS_STOPS.to_vec());
    }

    #[test]
    fn viridis_edge_sizes() {
        assert!(viridis(0).is_empty());
        assert_eq!(viridis(1), vec![Rgb::new(0x44, 0x01, 0x54)]);
        assert_eq!(
            viridis(2),
            vec![Rgb::new(0x44, 0x01, 0x54), Rgb::new(0xfd, 0xe7, 0x25)]
        );
    }

    #[test]
    fn viridis_interpolates_between_stops() {
        // With 19 samples every odd sample falls between two stops.
        let palette = viridis(19);
        let (start, next) = (VIRIDIS_STOPS[0], VIRIDIS_STOPS[1]);
        let between = palette[1];
        assert!((start.r..=next.r).contains(&between.r));
        assert!((start.g..=next.g).contains(&between.g));
        assert!((start.b..=next.b).contains(&between.b));
        assert_ne!(between, start);
        assert_ne!(between, next);
    }
}
