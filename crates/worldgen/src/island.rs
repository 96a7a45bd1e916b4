//! Island definitions and scene modes.

use engine_core::Rgb;

/// A named cluster of parcels sharing a color palette and platform.
#[derive(Debug, Clone)]
pub struct Island {
    pub name: String,
    /// Planar placement of the island center.
    pub offset_x: f32,
    pub offset_z: f32,
    /// Parcel base colors, indexed deterministically per cell.
    pub palette: Vec<Rgb>,
    /// Color of the platform slab under the grid.
    pub platform_color: Rgb,
}

impl Island {
    pub fn new(
        name: &str,
        offset_x: f32,
        offset_z: f32,
        palette_hex: &[u32],
        platform_hex: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            offset_x,
            offset_z,
            palette: palette_hex.iter().copied().map(Rgb::from_hex).collect(),
            platform_color: Rgb::from_hex(platform_hex),
        }
    }

    /// Parcel id prefix: first three letters of the island name, uppercased.
    pub fn id_prefix(&self) -> String {
        self.name.chars().take(3).collect::<String>().to_uppercase()
    }

    /// The three-island archipelago from the marketplace catalog.
    pub fn archipelago() -> Vec<Island> {
        vec![
            Island::new(
                "TONVERSE",
                -700.0,
                0.0,
                &[0x3b82f6, 0x0a84ff, 0x06b6d4, 0x2563eb, 0x1d4ed8],
                0x1e40af,
            ),
            Island::new(
                "Notverse",
                0.0,
                0.0,
                &[0x10b981, 0x059669, 0x84cc16, 0x22c55e, 0x16a34a],
                0x065f46,
            ),
            Island::new(
                "Xverse",
                700.0,
                0.0,
                &[0x8b5cf6, 0xa855f7, 0xf59e0b, 0xd946ef, 0xc026d3],
                0x7e22ce,
            ),
        ]
    }

    /// The single showcase island: one big mixed-palette grid.
    pub fn showcase() -> Vec<Island> {
        vec![Island::new(
            "Doggverse",
            0.0,
            0.0,
            &[0x3b82f6, 0x10b981, 0xf59e0b, 0x8b5cf6, 0x06b6d4, 0x84cc16],
            0x1c1c1e,
        )]
    }
}

/// Which world the viewer builds at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneMode {
    /// One 10x10 island.
    #[default]
    Showcase,
    /// Three 5x5 islands side by side.
    Archipelago,
}

impl SceneMode {
    /// Grid edge length per island for this mode.
    pub fn grid_size(&self) -> u32 {
        match self {
            SceneMode::Showcase => 10,
            SceneMode::Archipelago => 5,
        }
    }

    pub fn islands(&self) -> Vec<Island> {
        match self {
            SceneMode::Showcase => Island::showcase(),
            SceneMode::Archipelago => Island::archipelago(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_prefix_is_first_three_letters_uppercased() {
        let islands = Island::archipelago();
        let prefixes: Vec<_> = islands.iter().map(|i| i.id_prefix()).collect();
        assert_eq!(prefixes, vec!["TON", "NOT", "XVE"]);
    }

    #[test]
    fn archipelago_offsets_are_distinct() {
        let islands = Island::archipelago();
        assert_eq!(islands.len(), 3);
        let xs: Vec<_> = islands.iter().map(|i| i.offset_x as i32).collect();
        assert_eq!(xs, vec![-700, 0, 700]);
    }

    #[test]
    fn scene_mode_grid_sizes() {
        assert_eq!(SceneMode::Showcase.grid_size(), 10);
        assert_eq!(SceneMode::Archipelago.grid_size(), 5);
    }
}
