use indexmap::IndexMap;
use tracing::warn;

use crate::error::ChartResult;
use crate::render::Color;

/// Viridis colormap sampled at 0.0, 0.1, ..., 1.0.
const VIRIDIS_STOPS: [Color; 11] = [
    Color::rgb8(0x44, 0x01, 0x54),
    Color::rgb8(0x48, 0x24, 0x75),
    Color::rgb8(0x41, 0x44, 0x87),
    Color::rgb8(0x35, 0x5f, 0x8d),
    Color::rgb8(0x2a, 0x78, 0x8e),
    Color::rgb8(0x21, 0x91, 0x8c),
    Color::rgb8(0x22, 0xa8, 0x84),
    Color::rgb8(0x44, 0xbf, 0x70),
    Color::rgb8(0x7a, 0xd1, 0x51),
    Color::rgb8(0xbd, 0xdf, 0x26),
    Color::rgb8(0xfd, 0xe7, 0x25),
];

/// Viridis color at position `t` in 0..=1.
#[must_use]
pub fn viridis(t: f64) -> Color {
    let scaled = t.clamp(0.0, 1.0) * (VIRIDIS_STOPS.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    if lower + 1 >= VIRIDIS_STOPS.len() {
        return VIRIDIS_STOPS[VIRIDIS_STOPS.len() - 1];
    }
    VIRIDIS_STOPS[lower].lerp(VIRIDIS_STOPS[lower + 1], scaled - lower as f64)
}

/// `count` viridis colors sampled at the interior points of an even split,
/// so neither colormap end is used.
#[must_use]
pub fn default_palette(count: usize) -> Vec<Color> {
    let denominator = (count + 1) as f64;
    (1..=count)
        .map(|index| viridis(index as f64 / denominator))
        .collect()
}

/// Assigns one color per group, in the order the groups are given.
///
/// A custom palette is used cyclically when it has fewer colors than there
/// are groups.
pub fn resolve_group_colors(
    groups: &[&str],
    custom_palette: Option<&[String]>,
) -> ChartResult<IndexMap<String, Color>> {
    let colors = match custom_palette {
        Some(hex_colors) if !hex_colors.is_empty() => {
            if hex_colors.len() < groups.len() {
                warn!(
                    palette_len = hex_colors.len(),
                    group_count = groups.len(),
                    "custom palette has fewer colors than groups; colors will cycle"
                );
            }
            let parsed = hex_colors
                .iter()
                .map(|hex| Color::from_hex(hex))
                .collect::<ChartResult<Vec<_>>>()?;
            groups
                .iter()
                .enumerate()
                .map(|(index, _)| parsed[index % parsed.len()])
                .collect::<Vec<_>>()
        }
        _ => default_palette(groups.len()),
    };

    Ok(groups
        .iter()
        .zip(colors)
        .map(|(group, color)| ((*group).to_owned(), color))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{default_palette, viridis};
    use crate::render::Color;
    use approx::assert_abs_diff_eq;

    #[test]
    fn viridis_hits_stops_exactly() {
        assert_eq!(viridis(0.0), Color::rgb8(0x44, 0x01, 0x54));
        assert_eq!(viridis(1.0), Color::rgb8(0xfd, 0xe7, 0x25));
        assert_eq!(viridis(2.0), viridis(1.0));
    }

    #[test]
    fn default_palette_skips_colormap_ends() {
        let two = default_palette(2);
        assert_eq!(two.len(), 2);
        assert_ne!(two[0], viridis(0.0));
        assert_ne!(two[1], viridis(1.0));
        let midpoint = default_palette(1)[0];
        assert_abs_diff_eq!(midpoint.green, viridis(0.5).green, epsilon = 1e-12);
        assert!(default_palette(0).is_empty());
    }
}
