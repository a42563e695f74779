//! Tile codec: the mapping between raw grid codes and field-zone semantics.
//!
//! A grid cell holds a single `u16`: the low 10 bits are the tile code, the
//! high bits are overlay flags. The field-zone code space uses disjoint
//! ranges so that category, crop, land-pollution rank and density tier can
//! all be recovered from the code alone. Mature zone centres are laid out in
//! one run of codes per crop, in increasing land-pollution rank, cycling
//! through the density tiers with a stride of 9 (the 3x3 zone footprint), so
//! adjacent centre codes are adjacent tiers.

use serde::{Deserialize, Serialize};

/// Low bits of a raw cell value that form the tile code.
pub const TILE_CODE_MASK: u16 = 0x03ff;

/// Tile is a zone centre.
pub const ZONE_BIT: u16 = 0x0400;
/// Tile can be bulldozed.
pub const BULL_BIT: u16 = 0x1000;
/// Tile can catch fire.
pub const BURN_BIT: u16 = 0x2000;
/// Tile is drawn highlighted (active zone centre).
pub const HIGHLIGHT_BIT: u16 = 0x4000;

pub const DIRT: u16 = 0;
pub const ROAD_BASE: u16 = 64;
pub const LAST_ROAD: u16 = 206;

/// First of the 9 bare field-lot codes (row-major 3x3 slot order).
pub const FIELD_BASE: u16 = 240;
pub const LAST_LOT: u16 = FIELD_BASE + 8;
/// Zone-centre marker for a field zone that has collapsed to individual farms.
pub const FREE_FIELD: u16 = 249;
/// Individual farm buildings: `FARM_BASE + variant(0..=2) + rank * 3`.
pub const FARM_BASE: u16 = 250;
pub const LAST_FARM: u16 = 261;
/// Growing-crop markers, one code per crop in `Crop` order.
pub const MARKER_BASE: u16 = 262;
pub const LAST_MARKER: u16 = MARKER_BASE + 3;
/// Mature zone centres: one `MATURE_RUN`-code run per crop.
pub const MATURE_BASE: u16 = 266;
pub const LAST_MATURE: u16 = MATURE_BASE + 4 * MATURE_RUN - 1;

/// Codes per crop in the mature range: 4 ranks x 4 tiers x 9-tile footprint.
const MATURE_RUN: u16 = 144;
const TIER_STRIDE: u16 = 9;

/// Crop type chosen when the zone was placed; preserved across density
/// transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Crop {
    Corn,
    Wheat,
    Orchard,
    Potato,
}

impl Crop {
    pub const ALL: [Crop; 4] = [Crop::Corn, Crop::Wheat, Crop::Orchard, Crop::Potato];

    fn index(self) -> u16 {
        match self {
            Crop::Corn => 0,
            Crop::Wheat => 1,
            Crop::Orchard => 2,
            Crop::Potato => 3,
        }
    }

    fn from_index(index: u16) -> Option<Crop> {
        Crop::ALL.get(index as usize).copied()
    }
}

/// Semantic view of a field-relevant tile code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTile {
    /// Zoned-but-empty lot tile; `slot` is the row-major position in the 3x3
    /// zone footprint (0..=8).
    Lot { slot: u8 },
    /// Centre of a zone that holds only individual farms.
    FreeCentre,
    /// Individual farm building at a land-pollution rank (0..=3) with a
    /// cosmetic variant (0..=2).
    Farm { rank: u8, variant: u8 },
    /// Pre-growth marker for a crop.
    Marker(Crop),
    /// Mature zone centre: crop, land-pollution rank (0..=3), density tier
    /// (1..=4).
    Mature { crop: Crop, rank: u8, tier: u8 },
}

/// Decodes a tile code. Returns `None` for any code outside the field-zone
/// ranges (roads, dirt, other zone types, and the interior footprint codes of
/// mature zones, which only the zone tool writes).
pub fn classify_tile(code: u16) -> Option<FieldTile> {
    match code {
        FIELD_BASE..=LAST_LOT => Some(FieldTile::Lot {
            slot: (code - FIELD_BASE) as u8,
        }),
        FREE_FIELD => Some(FieldTile::FreeCentre),
        FARM_BASE..=LAST_FARM => {
            let offset = code - FARM_BASE;
            Some(FieldTile::Farm {
                rank: (offset / 3) as u8,
                variant: (offset % 3) as u8,
            })
        }
        MARKER_BASE..=LAST_MARKER => Crop::from_index(code - MARKER_BASE).map(FieldTile::Marker),
        MATURE_BASE..=LAST_MATURE => {
            let offset = code - MATURE_BASE;
            let crop = Crop::from_index(offset / MATURE_RUN)?;
            let within = offset % MATURE_RUN;
            if within % TIER_STRIDE != 0 {
                return None;
            }
            let block = within / TIER_STRIDE;
            Some(FieldTile::Mature {
                crop,
                rank: (block / 4) as u8,
                tier: (block % 4 + 1) as u8,
            })
        }
        _ => None,
    }
}

/// Inverse of [`classify_tile`]. Inputs outside the documented ranges are a
/// caller bug; debug builds assert, release builds saturate into range.
pub fn encode_tile(tile: FieldTile) -> u16 {
    match tile {
        FieldTile::Lot { slot } => {
            debug_assert!(slot <= 8);
            FIELD_BASE + slot.min(8) as u16
        }
        FieldTile::FreeCentre => FREE_FIELD,
        FieldTile::Farm { rank, variant } => {
            debug_assert!(rank <= 3 && variant <= 2);
            FARM_BASE + variant.min(2) as u16 + rank.min(3) as u16 * 3
        }
        FieldTile::Marker(crop) => MARKER_BASE + crop.index(),
        FieldTile::Mature { crop, rank, tier } => {
            debug_assert!(rank <= 3 && (1..=4).contains(&tier));
            let block = rank.min(3) as u16 * 4 + (tier.clamp(1, 4) as u16 - 1);
            MATURE_BASE + crop.index() * MATURE_RUN + block * TIER_STRIDE
        }
    }
}

/// Population of a mature zone centre at the given density tier.
pub fn zone_centre_population(tier: u8) -> u16 {
    tier as u16 * 8 + 16
}

/// Predicate for the map scanner: is this code a field-zone centre tile?
pub fn is_field_zone_centre(code: u16) -> bool {
    matches!(
        classify_tile(code),
        Some(FieldTile::FreeCentre) | Some(FieldTile::Marker(_)) | Some(FieldTile::Mature { .. })
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mature_roundtrip_all_codes() {
        // Every valid mature-centre code decodes, re-encodes to itself, and
        // carries a tier in 1..=4.
        let mut centres = 0;
        for code in MATURE_BASE..=LAST_MATURE {
            if let Some(tile) = classify_tile(code) {
                let FieldTile::Mature { rank, tier, .. } = tile else {
                    panic!("code {code} classified outside the mature range");
                };
                assert!((1..=4).contains(&tier));
                assert!(rank <= 3);
                assert_eq!(encode_tile(tile), code);
                centres += 1;
            }
        }
        // 4 crops x 4 ranks x 4 tiers
        assert_eq!(centres, 64);
    }

    #[test]
    fn test_roundtrip_non_centre_categories() {
        for slot in 0..=8 {
            assert_eq!(
                classify_tile(encode_tile(FieldTile::Lot { slot })),
                Some(FieldTile::Lot { slot })
            );
        }
        for rank in 0..=3 {
            for variant in 0..=2 {
                let tile = FieldTile::Farm { rank, variant };
                assert_eq!(classify_tile(encode_tile(tile)), Some(tile));
            }
        }
        for crop in Crop::ALL {
            let tile = FieldTile::Marker(crop);
            assert_eq!(classify_tile(encode_tile(tile)), Some(tile));
        }
        assert_eq!(classify_tile(FREE_FIELD), Some(FieldTile::FreeCentre));
    }

    #[test]
    fn test_adjacent_codes_are_adjacent_tiers() {
        for crop in Crop::ALL {
            for rank in 0..=3u8 {
                for tier in 1..=3u8 {
                    let a = encode_tile(FieldTile::Mature { crop, rank, tier });
                    let b = encode_tile(FieldTile::Mature {
                        crop,
                        rank,
                        tier: tier + 1,
                    });
                    assert_eq!(b - a, 9);
                }
            }
        }
    }

    #[test]
    fn test_non_field_codes_classify_to_none() {
        assert_eq!(classify_tile(DIRT), None);
        assert_eq!(classify_tile(ROAD_BASE), None);
        assert_eq!(classify_tile(LAST_ROAD), None);
        assert_eq!(classify_tile(LAST_MATURE + 1), None);
        // Interior footprint code of a mature zone (not a centre).
        assert_eq!(classify_tile(MATURE_BASE + 1), None);
    }

    #[test]
    fn test_centre_predicate() {
        assert!(is_field_zone_centre(FREE_FIELD));
        assert!(is_field_zone_centre(MARKER_BASE));
        assert!(is_field_zone_centre(encode_tile(FieldTile::Mature {
            crop: Crop::Potato,
            rank: 3,
            tier: 4,
        })));
        assert!(!is_field_zone_centre(FIELD_BASE));
        assert!(!is_field_zone_centre(FARM_BASE));
        assert!(!is_field_zone_centre(DIRT));
    }

    #[test]
    fn test_centre_population_by_tier() {
        assert_eq!(zone_centre_population(1), 24);
        assert_eq!(zone_centre_population(2), 32);
        assert_eq!(zone_centre_population(3), 40);
        assert_eq!(zone_centre_population(4), 48);
    }
}
