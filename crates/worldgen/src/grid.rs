//! Parcel grid builder.
//!
//! Lays out one parcel per cell per island and rolls price, tier, and the
//! initial ownership flag. Same seed and config must produce the identical
//! parcel list (replayability; the store snapshots the result as canon).

use crate::island::SceneMode;
use crate::parcel::{Parcel, ParcelKind};
use engine_core::Rgb;
use glam::Vec3;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Edge length of one grid cell in world units.
pub const CELL_SIZE: f32 = 114.0;
/// Rendered box footprint (cell minus the walkway gap).
pub const PARCEL_FOOTPRINT: f32 = CELL_SIZE - 6.0;
/// Parcel box height.
pub const PARCEL_HEIGHT: f32 = 25.0;
/// Resting center height of a parcel box (sits on the platform top).
pub const PARCEL_REST_Y: f32 = PARCEL_HEIGHT / 2.0;
/// Platform slab extends this far beyond the grid on each axis.
pub const PLATFORM_MARGIN: f32 = 300.0;
/// Platform slab thickness.
pub const PLATFORM_HEIGHT: f32 = 60.0;

/// Emissive floor shared by every freshly generated parcel.
const BASE_EMISSIVE: u32 = 0x111111;

/// Grid generation parameters.
#[derive(Debug, Clone)]
pub struct GridConfig {
    pub mode: SceneMode,
    pub seed: u64,
    /// Probability that a parcel starts out already sold.
    pub ownership_rate: f64,
    /// Price range in DOGG, inclusive low, exclusive high.
    pub price_min: u32,
    pub price_max: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            mode: SceneMode::Showcase,
            seed: 0,
            ownership_rate: 0.2,
            price_min: 500,
            price_max: 2500,
        }
    }
}

/// Generate the full parcel list for the configured scene.
///
/// Base colors are deterministic (`(x + y) % palette.len()`); price, tier,
/// and initial ownership are drawn from the seeded rng.
pub fn generate(config: &GridConfig) -> Vec<Parcel> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let islands = config.mode.islands();
    let grid = config.mode.grid_size();
    let mut parcels = Vec::with_capacity(islands.len() * (grid * grid) as usize);

    for island in &islands {
        let prefix = island.id_prefix();
        for i in 0..grid {
            for j in 0..grid {
                let color_index = ((i + j) as usize) % island.palette.len();
                let price = rng.gen_range(config.price_min..config.price_max);
                let kind = ParcelKind::ALL[rng.gen_range(0..ParcelKind::ALL.len())];
                let owned = rng.gen_bool(config.ownership_rate);

                parcels.push(Parcel {
                    id: Parcel::make_id(&prefix, i, j),
                    grid_x: i,
                    grid_y: j,
                    island: island.name.clone(),
                    price,
                    kind,
                    owned,
                    base_color: island.palette[color_index],
                    base_emissive: Rgb::from_hex(BASE_EMISSIVE),
                    position: cell_center(island.offset_x, island.offset_z, grid, i, j),
                    hovered: false,
                });
            }
        }
    }

    log::info!(
        "Generated {} parcels across {} island(s) (seed {})",
        parcels.len(),
        islands.len(),
        config.seed
    );
    parcels
}

/// World-space rest center of cell `(i, j)` on a grid of `size` cells.
pub fn cell_center(offset_x: f32, offset_z: f32, size: u32, i: u32, j: u32) -> Vec3 {
    let half = size as f32 / 2.0;
    Vec3::new(
        offset_x + (i as f32 - half + 0.5) * CELL_SIZE,
        PARCEL_REST_Y,
        offset_z + (j as f32 - half + 0.5) * CELL_SIZE,
    )
}

/// Platform slab extents for one island: (center, full size).
pub fn platform_extents(offset_x: f32, offset_z: f32, grid_size: u32) -> (Vec3, Vec3) {
    let span = grid_size as f32 * CELL_SIZE + PLATFORM_MARGIN;
    (
        Vec3::new(offset_x, -PLATFORM_HEIGHT / 2.0, offset_z),
        Vec3::new(span, PLATFORM_HEIGHT, span),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::island::SceneMode;

    /// Same seed and config must produce an identical parcel list (replayability).
    #[test]
    fn generate_deterministic_same_seed() {
        let config = GridConfig { seed: 98765, ..Default::default() };
        let a = generate(&config);
        let b = generate(&config);
        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.iter().zip(b.iter()) {
            assert_eq!(pa.id, pb.id);
            assert_eq!(pa.price, pb.price);
            assert_eq!(pa.owned, pb.owned);
            assert_eq!(pa.kind, pb.kind);
        }
    }

    #[test]
    fn generate_different_seed_different_rolls() {
        let a = generate(&GridConfig { seed: 1, ..Default::default() });
        let b = generate(&GridConfig { seed: 2, ..Default::default() });
        let prices_a: Vec<_> = a.iter().map(|p| p.price).collect();
        let prices_b: Vec<_> = b.iter().map(|p| p.price).collect();
        assert_ne!(prices_a, prices_b);
    }

    #[test]
    fn showcase_has_100_parcels_archipelago_75() {
        let showcase = generate(&GridConfig::default());
        assert_eq!(showcase.len(), 100);
        let archipelago = generate(&GridConfig {
            mode: SceneMode::Archipelago,
            ..Default::default()
        });
        assert_eq!(archipelago.len(), 75);
    }

    #[test]
    fn ids_follow_prefix_row_column_scheme() {
        let parcels = generate(&GridConfig {
            mode: SceneMode::Archipelago,
            ..Default::default()
        });
        assert_eq!(parcels[0].id, "TON-A1");
        assert_eq!(parcels[24].id, "TON-E5");
        assert_eq!(parcels[25].id, "NOT-A1");
        assert_eq!(parcels[50].id, "XVE-A1");
    }

    #[test]
    fn base_color_indexed_by_grid_coordinates() {
        let config = GridConfig { mode: SceneMode::Archipelago, ..Default::default() };
        let parcels = generate(&config);
        let islands = config.mode.islands();
        for p in &parcels {
            let island = islands.iter().find(|i| i.name == p.island).unwrap();
            let expected = island.palette[((p.grid_x + p.grid_y) as usize) % island.palette.len()];
            assert_eq!(p.base_color, expected, "parcel {}", p.id);
        }
    }

    #[test]
    fn prices_stay_in_configured_range() {
        let parcels = generate(&GridConfig { seed: 7, ..Default::default() });
        for p in &parcels {
            assert!(p.price >= 500 && p.price < 2500, "{} priced {}", p.id, p.price);
        }
    }

    #[test]
    fn ownership_rate_is_roughly_one_in_five() {
        // 100 parcels at p = 0.2; a seeded draw far outside [5, 40] would
        // indicate the flag is not independent per parcel.
        let parcels = generate(&GridConfig { seed: 4242, ..Default::default() });
        let sold = parcels.iter().filter(|p| p.owned).count();
        assert!((5..=40).contains(&sold), "sold count {}", sold);
    }

    #[test]
    fn cell_centers_are_symmetric_about_island_origin() {
        let first = cell_center(0.0, 0.0, 10, 0, 0);
        let last = cell_center(0.0, 0.0, 10, 9, 9);
        assert!((first.x + last.x).abs() < 1e-4);
        assert!((first.z + last.z).abs() < 1e-4);
        assert!((first.y - PARCEL_REST_Y).abs() < 1e-6);
    }
}
