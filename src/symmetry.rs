//! Folding equivalence under rotations and reflections.
//!
//! The seed cubes fix the direction of the first link, but a folding can
//! still be spun around that link or mirrored, so one physical shape shows
//! up several times in an all-solutions search.

use rustc_hash::FxHashSet;

use crate::geometry::{reflect_x, Position, ROTATIONS};
use crate::Folding;

/// Translates positions so the minimum x, y, z values are all zero.
fn normalize_to_origin(mut positions: Vec<Position>) -> Vec<Position> {
    let Some(first) = positions.first().copied() else {
        return positions;
    };
    let min = positions.iter().fold(first, |min, p| {
        Position::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z))
    });

    for p in &mut positions {
        *p = Position::new(p.x - min.x, p.y - min.y, p.z - min.z);
    }

    positions
}

/// Computes the canonical form of a folding under rotations and reflections.
///
/// Applies all 24 rotations to the folding and to its mirror image,
/// normalizes each so its minimum corner sits at the origin, and keeps the
/// lexicographically smallest placement sequence.
pub fn canonical_key(folding: &[Position]) -> Folding {
    let mirrored: Vec<Position> = folding.iter().map(|&p| reflect_x(p)).collect();

    [folding, mirrored.as_slice()]
        .into_iter()
        .flat_map(|image| {
            ROTATIONS.iter().map(move |rotate| {
                normalize_to_origin(image.iter().map(|&p| rotate(p)).collect())
            })
        })
        .min()
        .unwrap_or_default()
}

/// Keeps the first folding of each equivalence class, preserving order.
pub fn distinct_foldings(foldings: &[Folding]) -> Vec<Folding> {
    let mut seen: FxHashSet<Folding> = FxHashSet::default();
    foldings
        .iter()
        .filter(|folding| seen.insert(canonical_key(folding)))
        .cloned()
        .collect()
}
