//! Parcel records: one purchasable unit of virtual land.

use engine_core::Rgb;
use glam::Vec3;

/// Market tier of a parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParcelKind {
    Standard,
    Premium,
    Luxury,
}

impl ParcelKind {
    pub const ALL: [ParcelKind; 3] = [ParcelKind::Standard, ParcelKind::Premium, ParcelKind::Luxury];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParcelKind::Standard => "Standard",
            ParcelKind::Premium => "Premium",
            ParcelKind::Luxury => "Luxury",
        }
    }
}

/// One purchasable grid cell on an island.
///
/// Lives in a flat arena (`Vec<Parcel>`); the vector index is the parcel's
/// stable handle for the process lifetime. Render appearance (color,
/// emissive, opacity, vertical offset) is derived fresh each frame from the
/// authoritative fields here and is never written back.
#[derive(Debug, Clone)]
pub struct Parcel {
    /// Display id, e.g. `TON-A1`.
    pub id: String,
    pub grid_x: u32,
    pub grid_y: u32,
    /// Name of the owning island.
    pub island: String,
    /// Price in DOGG.
    pub price: u32,
    pub kind: ParcelKind,
    /// Flips false -> true exactly once, through the store's purchase path.
    pub owned: bool,
    pub base_color: Rgb,
    pub base_emissive: Rgb,
    /// World-space center at rest (before idle-bob offsets).
    pub position: Vec3,
    /// Set by hover picking each frame; read by the animation system.
    pub hovered: bool,
}

impl Parcel {
    /// Display id for a grid cell: island prefix, row letter, column number.
    pub fn make_id(prefix: &str, grid_x: u32, grid_y: u32) -> String {
        let row = char::from(b'A' + (grid_x % 26) as u8);
        format!("{}-{}{}", prefix, row, grid_y + 1)
    }
}

/// Availability counts for one island, derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IslandStats {
    pub total: usize,
    pub available: usize,
    pub sold: usize,
}

/// Count total/available/sold parcels belonging to `island`.
pub fn island_stats(parcels: &[Parcel], island: &str) -> IslandStats {
    let mut stats = IslandStats { total: 0, available: 0, sold: 0 };
    for p in parcels.iter().filter(|p| p.island == island) {
        stats.total += 1;
        if p.owned {
            stats.sold += 1;
        } else {
            stats.available += 1;
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_id_matches_marketplace_scheme() {
        assert_eq!(Parcel::make_id("TON", 0, 0), "TON-A1");
        assert_eq!(Parcel::make_id("XVE", 2, 4), "XVE-C5");
        assert_eq!(Parcel::make_id("DOG", 9, 9), "DOG-J10");
    }
}
