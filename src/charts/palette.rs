//! Color assignment for chart series.
//!
//! Colors are always a deterministic function of the series key or index,
//! so repeated renders and exported images come out identical.

use egui::Color32;

/// Accent for single-series charts.
pub const ACCENT: Color32 = Color32::from_rgb(34, 197, 94); // Green

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(34, 197, 94),  // Green
    Color32::from_rgb(59, 130, 246), // Blue
    Color32::from_rgb(234, 179, 8),  // Yellow
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(255, 87, 34),  // Deep Orange
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

/// Palette color for an ordered series.
pub fn series_color(index: usize) -> Color32 {
    PALETTE[index % PALETTE.len()]
}

/// Stable color for an arbitrary key: FNV-1a hash into the fixed palette.
/// Distinct keys may share a color; the same key never changes.
pub fn color_for(key: &str) -> Color32 {
    PALETTE[(fnv1a(key) % PALETTE.len() as u64) as usize]
}

/// Green intensity ramp for the city heat grid, scaled to the largest
/// bucket. Zero counts get a neutral grey.
pub fn heat_color(count: u64, max: u64) -> Color32 {
    if max == 0 || count == 0 {
        return Color32::from_rgb(240, 240, 240);
    }
    let intensity = (count as f32 / max as f32).min(1.0);
    Color32::from_rgb(
        (240.0 - 180.0 * intensity).round() as u8,
        (250.0 - 100.0 * intensity).round() as u8,
        (240.0 - 200.0 * intensity).round() as u8,
    )
}

fn fnv1a(s: &str) -> u64 {
    let mut hash = 0xcbf2_9ce4_8422_2325u64;
    for byte in s.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_for_is_stable() {
        assert_eq!(color_for("TESLA"), color_for("TESLA"));
        assert_eq!(color_for(""), color_for(""));
    }

    #[test]
    fn heat_color_extremes() {
        assert_eq!(heat_color(0, 100), Color32::from_rgb(240, 240, 240));
        assert_eq!(heat_color(100, 100), Color32::from_rgb(60, 150, 40));
    }
}
