//! Filter/highlight engine: derives parcel appearance from authoritative state.
//!
//! Pure derivation, recomputed every frame. Nothing here is written back to
//! the parcel, so the rendered look can never drift from the ownership and
//! tier data it is derived from.

use engine_core::Rgb;
use worldgen::{Parcel, ParcelKind};

/// Blend factor from a parcel's base color toward the filter accent.
const HIGHLIGHT_BLEND: f32 = 0.45;
/// Sold parcels render as a muted red regardless of their base palette.
const SOLD_COLOR: u32 = 0xef4444;
const SOLD_EMISSIVE: u32 = 0x991b1b;
/// Darkening applied to the sold tint when not highlighted.
const SOLD_MUTE: f32 = 0.6;

const SOLD_OPACITY: f32 = 0.75;
const BASE_OPACITY: f32 = 0.9;

/// Marketplace filter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Available,
    Owned,
    Premium,
}

impl Filter {
    pub const CYCLE: [Filter; 4] = [Filter::All, Filter::Available, Filter::Owned, Filter::Premium];

    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All Lands",
            Filter::Available => "Available",
            Filter::Owned => "Owned",
            Filter::Premium => "Premium",
        }
    }

    /// Next filter in display order (wraps).
    pub fn next(self) -> Filter {
        let i = Self::CYCLE.iter().position(|f| *f == self).unwrap_or(0);
        Self::CYCLE[(i + 1) % Self::CYCLE.len()]
    }

    /// Accent color and glow for highlighted parcels under this filter.
    fn accent(&self) -> Option<(Rgb, Rgb)> {
        match self {
            Filter::All => None,
            Filter::Available => Some((Rgb::from_hex(0x22c55e), Rgb::from_hex(0x00aa00))),
            Filter::Owned => Some((Rgb::from_hex(SOLD_COLOR), Rgb::from_hex(SOLD_EMISSIVE))),
            Filter::Premium => Some((Rgb::from_hex(0xf59e0b), Rgb::from_hex(0x92600a))),
        }
    }
}

/// Derived render material for one parcel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub color: Rgb,
    pub emissive: Rgb,
    pub opacity: f32,
}

/// Whether `parcel` matches the filter's highlight predicate.
pub fn highlighted(parcel: &Parcel, filter: Filter) -> bool {
    match filter {
        Filter::All => false,
        Filter::Available => !parcel.owned,
        Filter::Owned => parcel.owned,
        Filter::Premium => parcel.kind == ParcelKind::Premium,
    }
}

/// Compute the rendered material for `parcel` under `filter`.
///
/// Highlight wins over everything; otherwise the sold look takes precedence
/// over the plain base appearance.
pub fn appearance(parcel: &Parcel, filter: Filter) -> Appearance {
    if highlighted(parcel, filter) {
        if let Some((accent, glow)) = filter.accent() {
            return Appearance {
                color: parcel.base_color.lerp(accent, HIGHLIGHT_BLEND),
                emissive: glow,
                opacity: 1.0,
            };
        }
    }

    if parcel.owned {
        Appearance {
            color: Rgb::from_hex(SOLD_COLOR).scaled(SOLD_MUTE),
            emissive: Rgb::from_hex(SOLD_EMISSIVE),
            opacity: SOLD_OPACITY,
        }
    } else {
        Appearance {
            color: parcel.base_color,
            emissive: parcel.base_emissive,
            opacity: BASE_OPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::Rgb;
    use glam::Vec3;

    fn parcel(owned: bool, kind: ParcelKind) -> Parcel {
        Parcel {
            id: "TON-A1".to_string(),
            grid_x: 0,
            grid_y: 0,
            island: "TONVERSE".to_string(),
            price: 1000,
            kind,
            owned,
            base_color: Rgb::from_hex(0x3b82f6),
            base_emissive: Rgb::from_hex(0x111111),
            position: Vec3::ZERO,
            hovered: false,
        }
    }

    #[test]
    fn highlight_predicates_per_filter() {
        let free = parcel(false, ParcelKind::Standard);
        let sold = parcel(true, ParcelKind::Luxury);
        let premium = parcel(false, ParcelKind::Premium);

        assert!(!highlighted(&free, Filter::All));
        assert!(!highlighted(&sold, Filter::All));
        assert!(highlighted(&free, Filter::Available));
        assert!(!highlighted(&sold, Filter::Available));
        assert!(highlighted(&sold, Filter::Owned));
        assert!(!highlighted(&free, Filter::Owned));
        assert!(highlighted(&premium, Filter::Premium));
        assert!(!highlighted(&free, Filter::Premium));
    }

    /// Applying the same filter twice yields identical material state
    /// (the derivation is stateless).
    #[test]
    fn appearance_is_idempotent() {
        let parcels = [
            parcel(false, ParcelKind::Standard),
            parcel(true, ParcelKind::Premium),
            parcel(false, ParcelKind::Luxury),
        ];
        for filter in Filter::CYCLE {
            let first: Vec<_> = parcels.iter().map(|p| appearance(p, filter)).collect();
            let second: Vec<_> = parcels.iter().map(|p| appearance(p, filter)).collect();
            assert_eq!(first, second, "filter {:?}", filter);
        }
    }

    /// The All filter restores the exact base appearance for unsold parcels.
    #[test]
    fn all_filter_restores_base_appearance() {
        let p = parcel(false, ParcelKind::Standard);
        let a = appearance(&p, Filter::All);
        assert_eq!(a.color, p.base_color);
        assert_eq!(a.emissive, p.base_emissive);
        assert!((a.opacity - BASE_OPACITY).abs() < 1e-6);
    }

    /// Sold-but-unhighlighted parcels take the muted sold look, not their
    /// palette color.
    #[test]
    fn sold_state_takes_precedence_over_base() {
        let p = parcel(true, ParcelKind::Standard);
        let a = appearance(&p, Filter::All);
        assert_eq!(a.color, Rgb::from_hex(SOLD_COLOR).scaled(SOLD_MUTE));
        assert_eq!(a.emissive, Rgb::from_hex(SOLD_EMISSIVE));
        assert!(a.opacity < BASE_OPACITY);
    }

    /// Highlight blends toward the accent without replacing the base color.
    #[test]
    fn highlight_blends_base_toward_accent() {
        let p = parcel(false, ParcelKind::Standard);
        let a = appearance(&p, Filter::Available);
        let expected = p.base_color.lerp(Rgb::from_hex(0x22c55e), HIGHLIGHT_BLEND);
        assert_eq!(a.color, expected);
        assert!((a.opacity - 1.0).abs() < 1e-6);
        assert_ne!(a.color, p.base_color);
    }

    /// A sold parcel under the Owned filter is highlighted at full opacity.
    #[test]
    fn owned_filter_highlights_sold_parcels() {
        let p = parcel(true, ParcelKind::Standard);
        let a = appearance(&p, Filter::Owned);
        assert!((a.opacity - 1.0).abs() < 1e-6);
        assert_eq!(a.emissive, Rgb::from_hex(SOLD_EMISSIVE));
    }

    #[test]
    fn filter_cycle_wraps() {
        assert_eq!(Filter::All.next(), Filter::Available);
        assert_eq!(Filter::Premium.next(), Filter::All);
    }
}
