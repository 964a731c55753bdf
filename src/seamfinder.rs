// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest seam through an energy map
//!
//! One dynamic program serves both orientations.  It always walks the
//! map from `y = 0` to the last row, and at every row each `x` picks
//! a parent from the row above.  For a horizontal seam the caller
//! hands it the energy of a [`Transposed`] view, so `y` is really the
//! column and `x` really the row.
//!
//! The first and last rows are never accumulated: they keep their
//! raw energy, and the last row's cells are their own parents.

use crate::cq;
use crate::energy::{calculate_energy, EnergyMap};
use crate::error::SeamError;
use crate::transpose::Transposed;
use crate::twodmap::TwoDimensionalMap;
use image::{GenericImageView, Pixel, Primitive};
use log::trace;
use std::str::FromStr;

/// One lateral index per traversal step: an x for every row of a
/// vertical seam, a y for every column of a horizontal one.
pub type Seam = Vec<u32>;

/// Which cell the left edge of the map compares against when
/// choosing between straight up and up-and-to-the-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeftEdgeRule {
    /// Compare with the right-hand neighbour one step *ahead*, still
    /// holding its raw energy.  This is what produces the reference
    /// seams.
    Lookahead,
    /// Compare with the right-hand neighbour one step behind, like
    /// every other cell does.
    Previous,
}

impl Default for LeftEdgeRule {
    fn default() -> Self {
        LeftEdgeRule::Lookahead
    }
}

impl FromStr for LeftEdgeRule {
    type Err = SeamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lookahead" => Ok(LeftEdgeRule::Lookahead),
            "previous" => Ok(LeftEdgeRule::Previous),
            _ => Err(SeamError::UnknownLeftEdgeRule(s.to_string())),
        }
    }
}

/// This trait defines how we will return seams from an image.  It's a
/// primitive interface, just enough to make room for other energy
/// functions later.
pub trait SeamFinder {
    /// A seam running from top to bottom, one x per row.
    fn find_vertical_seam(&self) -> Result<Seam, SeamError>;

    /// A seam running from left to right, one y per column.
    fn find_horizontal_seam(&self) -> Result<Seam, SeamError>;
}

// The parent of (x, y) in row y - 1.  Not a plain three-way minimum:
// the order of the comparisons decides every tie, and a strictly
// cheapest up-and-right is passed over unless up-and-left is cheaper
// still.
fn select_parent(cost: &EnergyMap, (x, y): (u32, u32), left_edge: LeftEdgeRule) -> u32 {
    let last = cost.width - 1;
    let up = cost[(x, y - 1)];

    if x == 0 {
        let right = match left_edge {
            LeftEdgeRule::Lookahead => cost[(1, y + 1)],
            LeftEdgeRule::Previous => cost[(1, y - 1)],
        };
        return cq!(right < up, 1, 0);
    }

    let left_up = cost[(x - 1, y - 1)];
    if x == last {
        return cq!(left_up < up, x - 1, x);
    }

    let right_up = cost[(x + 1, y - 1)];
    if right_up < up && left_up < right_up {
        x + 1
    } else if left_up < up && left_up < right_up {
        x - 1
    } else {
        x
    }
}

/// Given an energy map, return the list of x-coordinates that, when
/// mapped with the range (0..height), give the XY coordinates for each
/// pixel in the seam to be removed.
///
/// The map is consumed: its energies are overwritten in place with the
/// cost of the cheapest path reaching each cell.
pub fn energy_to_seam(energy: EnergyMap, left_edge: LeftEdgeRule) -> Result<Seam, SeamError> {
    let (width, height) = energy.dimensions();
    if width < 3 || height < 3 {
        return Err(SeamError::DegenerateImage { width, height });
    }

    let mut cost = energy;
    let mut parents: TwoDimensionalMap<u32> = TwoDimensionalMap::from_fn(width, height, |x, _| x);

    for y in 1..height - 1 {
        for x in 0..width {
            let parent = select_parent(&cost, (x, y), left_edge);
            parents[(x, y)] = parent;
            let inherited = cost[(parent, y - 1)];
            cost[(x, y)] += inherited;
        }
    }

    // Strict comparison: the leftmost of several equal minima wins.
    let bottom = height - 1;
    let mut seam_col =
        (0..width).fold(0, |best, x| cq!(cost[(x, bottom)] < cost[(best, bottom)], x, best));

    // Working backwards, generate a vec of x coordinates that map to
    // the seam, reverse and return.
    Ok((0..height)
        .rev()
        .fold(Vec::<u32>::with_capacity(height as usize), |mut acc, y| {
            acc.push(seam_col);
            seam_col = parents[(seam_col, y)];
            acc
        })
        .into_iter()
        .rev()
        .collect())
}

/// The gradient seam engine: an image reference and the left-edge
/// rule to run the dynamic program with.
pub struct GradientSeams<'a, I: GenericImageView> {
    image: &'a I,
    left_edge: LeftEdgeRule,
}

impl<'a, I, P, S> GradientSeams<'a, I>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    /// Takes a reference to an image, and holds onto it.
    pub fn new(image: &'a I) -> Self {
        GradientSeams {
            image,
            left_edge: LeftEdgeRule::default(),
        }
    }

    pub fn with_left_edge(image: &'a I, left_edge: LeftEdgeRule) -> Self {
        GradientSeams { image, left_edge }
    }
}

impl<'a, I, P, S> SeamFinder for GradientSeams<'a, I>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    fn find_vertical_seam(&self) -> Result<Seam, SeamError> {
        let seam = energy_to_seam(calculate_energy(self.image)?, self.left_edge)?;
        trace!("vertical seam {:?}", seam);
        Ok(seam)
    }

    fn find_horizontal_seam(&self) -> Result<Seam, SeamError> {
        let view = Transposed::new(self.image);
        let seam = energy_to_seam(calculate_energy(&view)?, self.left_edge)?;
        trace!("horizontal seam {:?}", seam);
        Ok(seam)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, RgbImage};

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const YELLOW: Rgb<u8> = Rgb([255, 255, 0]);

    // (BLACK) (BLACK)  (BLACK)  (BLACK)
    // (BLACK) (RED)    (RED)    (BLACK)
    // (BLACK) (RED)    (YELLOW) (BLACK)
    // (BLACK) (BLACK)  (BLACK)  (BLACK)
    fn red_block() -> RgbImage {
        ImageBuffer::from_fn(4, 4, |x, y| match (x, y) {
            (2, 2) => YELLOW,
            (1, 1) | (1, 2) | (2, 1) => RED,
            _ => BLACK,
        })
    }

    // Same, with the yellow in the top left of the block.
    fn red_block_inverted() -> RgbImage {
        ImageBuffer::from_fn(4, 4, |x, y| match (x, y) {
            (1, 1) => YELLOW,
            (1, 2) | (2, 1) | (2, 2) => RED,
            _ => BLACK,
        })
    }

    fn striped(width: u32, height: u32) -> RgbImage {
        ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([
                ((x * 53) ^ (y * 29)) as u8,
                ((x * x + y * 3) * 7) as u8,
                ((x + y) * 31) as u8,
            ])
        })
    }

    fn grid(width: u32, height: u32, rows: &[f64]) -> EnergyMap {
        TwoDimensionalMap::from_raw(width, height, rows.to_vec()).unwrap()
    }

    fn assert_connected(seam: &[u32], lateral: u32) {
        assert!(seam.iter().all(|&i| i < lateral));
        assert!(seam
            .windows(2)
            .all(|w| (w[0] as i64 - w[1] as i64).abs() <= 1));
    }

    #[test]
    fn vertical_seam_follows_the_red_column() {
        let image = red_block();
        let seam = GradientSeams::new(&image).find_vertical_seam().unwrap();
        assert_eq!(seam.len(), 4);
        assert_eq!(&seam[..2], &[1, 1]);
        assert_eq!(seam, vec![1, 1, 0, 0]);
    }

    #[test]
    fn horizontal_seam_follows_the_red_row() {
        let image = red_block();
        let seam = GradientSeams::new(&image).find_horizontal_seam().unwrap();
        assert_eq!(seam.len(), 4);
        assert_eq!(&seam[2..], &[0, 0]);
    }

    #[test]
    fn inverted_block_seams() {
        let image = red_block_inverted();
        let finder = GradientSeams::new(&image);
        assert_eq!(&finder.find_horizontal_seam().unwrap()[..2], &[1, 1]);
        assert_eq!(&finder.find_vertical_seam().unwrap()[..2], &[1, 1]);
    }

    #[test]
    fn seams_span_the_image_and_stay_connected() {
        let image = striped(9, 6);
        for rule in &[LeftEdgeRule::Lookahead, LeftEdgeRule::Previous] {
            let finder = GradientSeams::with_left_edge(&image, *rule);
            let vertical = finder.find_vertical_seam().unwrap();
            assert_eq!(vertical.len(), 6);
            assert_connected(&vertical, 9);
            let horizontal = finder.find_horizontal_seam().unwrap();
            assert_eq!(horizontal.len(), 9);
            assert_connected(&horizontal, 6);
        }
    }

    #[test]
    fn left_edge_rules_disagree_on_lookahead_cell() {
        // Three lanes, four steps.  The cheap cell at (1, 0) is only
        // seen from the left edge when looking behind.
        let energies = [
            5.0, 1.0, 5.0, //
            0.0, 0.0, 0.0, //
            0.0, 9.0, 0.0, //
            0.0, 0.0, 0.0,
        ];
        assert_eq!(
            energy_to_seam(grid(3, 4, &energies), LeftEdgeRule::Lookahead).unwrap(),
            vec![1, 1, 0, 0]
        );
        assert_eq!(
            energy_to_seam(grid(3, 4, &energies), LeftEdgeRule::Previous).unwrap(),
            vec![1, 0, 0, 0]
        );
    }

    #[test]
    fn interior_takes_up_right_when_up_left_is_cheapest() {
        let energies = [
            1.0, 9.0, 5.0, //
            0.0, 0.0, 0.0, //
            1.0, 0.0, 1.0,
        ];
        let seam = energy_to_seam(grid(3, 3, &energies), LeftEdgeRule::Lookahead).unwrap();
        assert_eq!(seam, vec![2, 1, 1]);
    }

    #[test]
    fn interior_keeps_straight_path_on_ties() {
        let energies = [
            4.0, 4.0, 4.0, 4.0, //
            0.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 0.0,
        ];
        let mut cost = grid(4, 3, &energies);
        assert_eq!(select_parent(&cost, (1, 1), LeftEdgeRule::Lookahead), 1);
        assert_eq!(select_parent(&cost, (2, 1), LeftEdgeRule::Lookahead), 2);
        assert_eq!(select_parent(&cost, (3, 1), LeftEdgeRule::Lookahead), 3);
        cost[(0, 0)] = 1.0;
        assert_eq!(select_parent(&cost, (1, 1), LeftEdgeRule::Lookahead), 0);
        assert_eq!(select_parent(&cost, (0, 1), LeftEdgeRule::Previous), 0);
    }

    #[test]
    fn lowest_index_wins_a_tied_bottom_row() {
        let energies = [
            1.0, 1.0, 1.0, 1.0, //
            1.0, 1.0, 1.0, 1.0, //
            7.0, 3.0, 3.0, 3.0,
        ];
        let seam = energy_to_seam(grid(4, 3, &energies), LeftEdgeRule::Lookahead).unwrap();
        assert_eq!(seam[2], 1);
    }

    #[test]
    fn too_small_to_find_a_seam() {
        let image: RgbImage = ImageBuffer::new(2, 5);
        let finder = GradientSeams::new(&image);
        assert_eq!(
            finder.find_vertical_seam(),
            Err(SeamError::DegenerateImage {
                width: 2,
                height: 5
            })
        );
        assert_eq!(
            finder.find_horizontal_seam(),
            Err(SeamError::DegenerateImage {
                width: 5,
                height: 2
            })
        );
    }

    #[test]
    fn left_edge_rule_parses() {
        assert_eq!("lookahead".parse::<LeftEdgeRule>(), Ok(LeftEdgeRule::Lookahead));
        assert_eq!("Previous".parse::<LeftEdgeRule>(), Ok(LeftEdgeRule::Previous));
        assert_eq!(
            "sideways".parse::<LeftEdgeRule>(),
            Err(SeamError::UnknownLeftEdgeRule("sideways".to_string()))
        );
    }
}
