//! Constrained random placement of bases, actors, and walls.
//!
//! Every draw samples without replacement from a precomputed, deterministically
//! ordered set of eligible tiles, so the outcome depends only on the RNG state.

use std::{collections::BTreeSet, ops::RangeInclusive};

use ascifight_core::{geometry, Coordinates, MapSize};
use rand::{seq::SliceRandom, Rng};

use crate::SetupError;

/// Smallest board on which the four corner regions do not overlap.
pub(crate) const MIN_MAP_SIZE: u32 = 10;

/// Inset of the starting regions from the board edge.
const REGION_INSET: u32 = 1;
/// Edge length of a starting region.
const REGION_SPAN: u32 = 4;

/// Axis-aligned box in which a team's base may be placed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct StartingRegion {
    pub(crate) x: RangeInclusive<u32>,
    pub(crate) y: RangeInclusive<u32>,
}

impl StartingRegion {
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Coordinates {
        Coordinates::new(rng.gen_range(self.x.clone()), rng.gen_range(self.y.clone()))
    }
}

/// The symmetric corner regions used for initial base placement.
pub(crate) fn starting_regions(size: MapSize) -> Result<Vec<StartingRegion>, SetupError> {
    if size.get() < MIN_MAP_SIZE {
        return Err(SetupError::MapTooSmall {
            size: size.get(),
            minimum: MIN_MAP_SIZE,
        });
    }

    let near = REGION_INSET..=REGION_SPAN;
    let far_start = size.get() - REGION_SPAN - REGION_INSET;
    let far = far_start..=size.get() - REGION_INSET - 1;

    Ok(vec![
        StartingRegion {
            x: near.clone(),
            y: near.clone(),
        },
        StartingRegion {
            x: near.clone(),
            y: far.clone(),
        },
        StartingRegion {
            x: far.clone(),
            y: near,
        },
        StartingRegion {
            x: far.clone(),
            y: far,
        },
    ])
}

/// Draws one base location per team from distinct starting regions.
pub(crate) fn draw_base_locations<R: Rng + ?Sized>(
    rng: &mut R,
    size: MapSize,
    teams: usize,
) -> Result<Vec<Coordinates>, SetupError> {
    let regions = starting_regions(size)?;
    if teams > regions.len() {
        return Err(SetupError::TooManyTeams {
            teams,
            regions: regions.len(),
        });
    }

    let chosen: Vec<&StartingRegion> = regions.choose_multiple(rng, teams).collect();
    Ok(chosen.into_iter().map(|region| region.draw(rng)).collect())
}

/// Tiles in the square around `center` that `is_taken` does not reject.
pub(crate) fn free_area<F>(
    center: Coordinates,
    radius: u32,
    size: MapSize,
    is_taken: F,
) -> Vec<Coordinates>
where
    F: Fn(Coordinates) -> bool,
{
    geometry::area(center, radius, size)
        .into_iter()
        .filter(|tile| *tile != center && !is_taken(*tile))
        .collect()
}

/// Tiles outside the exclusion radius of every base that `is_taken` does not reject.
pub(crate) fn wall_candidates<F>(
    size: MapSize,
    bases: impl IntoIterator<Item = Coordinates>,
    exclusion_radius: u32,
    is_taken: F,
) -> Vec<Coordinates>
where
    F: Fn(Coordinates) -> bool,
{
    let excluded: BTreeSet<Coordinates> = bases
        .into_iter()
        .flat_map(|base| geometry::area(base, exclusion_radius, size))
        .collect();

    size.iter()
        .filter(|tile| !excluded.contains(tile) && !is_taken(*tile))
        .collect()
}

/// Picks `count` distinct tiles from `eligible`.
///
/// Returns the number of eligible tiles as the error when the request can not
/// be satisfied.
pub(crate) fn sample<R: Rng + ?Sized>(
    rng: &mut R,
    eligible: &[Coordinates],
    count: usize,
) -> Result<Vec<Coordinates>, usize> {
    if count > eligible.len() {
        return Err(eligible.len());
    }
    Ok(eligible.choose_multiple(rng, count).copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn size(tiles: u32) -> MapSize {
        MapSize::new(tiles).expect("non-empty map")
    }

    #[test]
    fn regions_sit_in_the_corners() {
        let regions = starting_regions(size(15)).expect("large enough");
        assert_eq!(regions.len(), 4);
        assert_eq!(regions[0].x, 1..=4);
        assert_eq!(regions[3].x, 10..=13);
        assert_eq!(regions[3].y, 10..=13);
    }

    #[test]
    fn small_maps_have_no_regions() {
        assert_eq!(
            starting_regions(size(9)),
            Err(SetupError::MapTooSmall {
                size: 9,
                minimum: MIN_MAP_SIZE
            })
        );
    }

    #[test]
    fn base_locations_use_distinct_regions() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let map = size(12);
        let regions = starting_regions(map).expect("large enough");
        let bases = draw_base_locations(&mut rng, map, 4).expect("four regions");

        let mut used: Vec<usize> = bases
            .iter()
            .map(|base| {
                regions
                    .iter()
                    .position(|region| region.x.contains(&base.x) && region.y.contains(&base.y))
                    .expect("base inside a region")
            })
            .collect();
        used.sort_unstable();
        used.dedup();
        assert_eq!(used.len(), 4);
    }

    #[test]
    fn too_many_teams_fail() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(
            draw_base_locations(&mut rng, size(15), 5),
            Err(SetupError::TooManyTeams {
                teams: 5,
                regions: 4
            })
        );
    }

    #[test]
    fn free_area_skips_center_and_taken_tiles() {
        let center = Coordinates::new(5, 5);
        let taken = Coordinates::new(4, 4);
        let tiles = free_area(center, 1, size(10), |tile| tile == taken);
        assert_eq!(tiles.len(), 7);
        assert!(!tiles.contains(&center));
        assert!(!tiles.contains(&taken));
    }

    #[test]
    fn wall_candidates_respect_exclusion_radius() {
        let base = Coordinates::new(2, 2);
        let candidates = wall_candidates(size(10), [base], 3, |_| false);
        assert_eq!(candidates.len(), 100 - 36);
        assert!(candidates
            .iter()
            .all(|tile| tile.x.abs_diff(base.x) > 3 || tile.y.abs_diff(base.y) > 3));
    }

    #[test]
    fn sample_is_distinct_and_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let eligible: Vec<_> = size(4).iter().collect();
        let mut drawn = sample(&mut rng, &eligible, 10).expect("enough tiles");
        drawn.sort();
        drawn.dedup();
        assert_eq!(drawn.len(), 10);
        assert_eq!(sample(&mut rng, &eligible, 17), Err(16));
    }
}
