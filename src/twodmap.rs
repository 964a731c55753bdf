// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A two-dimensional map
//!
//! Every intermediate product of seam carving is a value per pixel:
//! the RGB snapshot of the image, the energy of each pixel, the
//! cumulative cost of reaching it, and the back pointer to its parent
//! on the cheapest path.  They all live in this one structure.

use crate::error::SeamError;
use std::ops::{Index, IndexMut};
use std::slice::ChunksMut;

/// An addressable, row-major, two-dimensional field of values.  The
/// seam finder reads `x` as the lateral axis and `y` as the traversal
/// axis, whatever the orientation of the source image.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Copy> {
    pub width: u32,
    pub height: u32,
    data: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// A new map, every cell holding the content type's default.
    pub fn new(width: u32, height: u32) -> Self {
        TwoDimensionalMap {
            width,
            height,
            data: vec![P::default(); width as usize * height as usize],
        }
    }
}

impl<P: Copy> TwoDimensionalMap<P> {
    /// Wrap existing row-major storage.
    pub fn from_raw(width: u32, height: u32, data: Vec<P>) -> Result<Self, SeamError> {
        if data.len() != width as usize * height as usize {
            return Err(SeamError::BadDimensions {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(TwoDimensionalMap {
            width,
            height,
            data,
        })
    }

    /// Build a map by asking for the value at every address.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> P,
    {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        TwoDimensionalMap {
            width,
            height,
            data,
        }
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// One full row, `y` fixed.
    pub fn row(&self, y: u32) -> &[P] {
        let start = self.get_index(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// Disjoint mutable bands of `rows` complete rows each, in order.
    /// The last band may be shorter.
    pub fn bands_mut(&mut self, rows: usize) -> ChunksMut<'_, P> {
        let stride = (self.width as usize * rows).max(1);
        self.data.chunks_mut(stride)
    }

    pub fn as_slice(&self) -> &[P] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [P] {
        &mut self.data
    }
}

impl<P: Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.data[index]
    }
}

impl<P: Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.data[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addressing_is_row_major() {
        let map = TwoDimensionalMap::from_fn(3, 2, |x, y| x + 10 * y);
        assert_eq!(map.as_slice(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(map[(2, 1)], 12);
        assert_eq!(map.row(1), &[10, 11, 12]);
    }

    #[test]
    fn raw_storage_must_fill_the_map() {
        assert!(TwoDimensionalMap::from_raw(2, 2, vec![0u32; 4]).is_ok());
        assert_eq!(
            TwoDimensionalMap::from_raw(2, 2, vec![0u32; 5]),
            Err(SeamError::BadDimensions {
                width: 2,
                height: 2,
                len: 5
            })
        );
    }

    #[test]
    fn bands_cover_whole_rows() {
        let mut map: TwoDimensionalMap<u8> = TwoDimensionalMap::new(4, 5);
        let lens: Vec<usize> = map.bands_mut(2).map(|band| band.len()).collect();
        assert_eq!(lens, vec![8, 8, 4]);

        for (band, rows) in map.bands_mut(2).enumerate() {
            rows.iter_mut().for_each(|cell| *cell = band as u8);
        }
        assert_eq!(map[(3, 4)], 2);
        map[(0, 0)] = 9;
        assert_eq!(map.row(0), &[9, 0, 0, 0]);
        map.as_mut_slice()[5] = 7;
        assert_eq!(map[(1, 1)], 7);
    }
}
