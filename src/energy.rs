// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! The energy of a pixel is how much its neighbourhood changes colour:
//!
//! ```text
//!        |Δx|² = (Δrx)²+(Δgx)²+(Δbx)²
//!        |Δy|² = (Δry)²+(Δgy)²+(Δby)²
//!       e(x,y) = |Δx|²+|Δy|²
//! ```
//!
//! where each Δ is taken between the two pixels on either side of
//! `(x, y)`.  There is no square root; this is the squared gradient
//! magnitude, and seam choice depends on that exact value.  Pixels on
//! the border of the image don't have a neighbour on every side, and
//! get the maximum possible 8-bit energy instead so that the edges
//! are never preferred.

use crate::error::SeamError;
use crate::twodmap::TwoDimensionalMap;
use image::{GenericImageView, Pixel, Primitive};
use itertools::iproduct;
use num_traits::NumCast;
use std::iter::zip;

/// The energy of every border pixel: `3 × 255²`.
pub const BORDER_ENERGY: f64 = 195_075.0;

/// The energy grid, one value per pixel.
pub type EnergyMap = TwoDimensionalMap<f64>;

type Rgb64 = [f64; 3];

fn rgb_of<P, S>(pixel: &P) -> Rgb64
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let rgb = pixel.to_rgb();
    let c = rgb.channels();
    [
        <f64 as NumCast>::from(c[0]).unwrap_or(0.0),
        <f64 as NumCast>::from(c[1]).unwrap_or(0.0),
        <f64 as NumCast>::from(c[2]).unwrap_or(0.0),
    ]
}

// Takes the channels (R,G,B) from the two pixels on either side,
// maps the difference between each channel, squares it, and sums.
fn squared_difference(prev: &Rgb64, next: &Rgb64) -> f64 {
    zip(prev, next)
        .map(|(p, n)| {
            let d = n - p;
            d * d
        })
        .sum()
}

// The one energy formula, shared by the single-pixel query and the
// grid builders so that they agree to the bit.  The caller has
// already range-checked `(x, y)`.
fn energy_with<F>(width: u32, height: u32, x: u32, y: u32, color: F) -> f64
where
    F: Fn(u32, u32) -> Rgb64,
{
    if x == 0 || y == 0 || x + 1 >= width || y + 1 >= height {
        return BORDER_ENERGY;
    }
    squared_difference(&color(x - 1, y), &color(x + 1, y))
        + squared_difference(&color(x, y - 1), &color(x, y + 1))
}

/// The energy of the pixel at `(x, y)`.
pub fn pixel_energy<I, P, S>(image: &I, x: u32, y: u32) -> Result<f64, SeamError>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    if x >= width || y >= height {
        return Err(SeamError::OutOfBounds {
            x,
            y,
            width,
            height,
        });
    }
    Ok(energy_with(width, height, x, y, |x, y| {
        rgb_of(&image.get_pixel(x, y))
    }))
}

fn snapshot<I, P, S>(image: &I) -> Result<TwoDimensionalMap<Rgb64>, SeamError>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    TwoDimensionalMap::from_raw(
        width,
        height,
        iproduct!(0..height, 0..width)
            .map(|(y, x)| rgb_of(&image.get_pixel(x, y)))
            .collect(),
    )
}

// Fill one band of complete rows, the first of which is row `first`.
fn fill_band(colors: &TwoDimensionalMap<Rgb64>, first: u32, band: &mut [f64]) {
    let (width, height) = colors.dimensions();
    if width == 0 {
        return;
    }
    for (offset, row) in band.chunks_mut(width as usize).enumerate() {
        let y = first + offset as u32;
        for (x, cell) in row.iter_mut().enumerate() {
            *cell = energy_with(width, height, x as u32, y, |x, y| colors[(x, y)]);
        }
    }
}

#[cfg(not(feature = "threaded"))]
fn fill_energy(colors: &TwoDimensionalMap<Rgb64>, emap: &mut EnergyMap) -> Result<(), SeamError> {
    fill_band(colors, 0, emap.as_mut_slice());
    Ok(())
}

// Each row of energy depends only on the read-only snapshot, so the
// map is cut into bands of whole rows, one per CPU, and every band is
// filled on its own scoped thread.
#[cfg(feature = "threaded")]
fn fill_energy(colors: &TwoDimensionalMap<Rgb64>, emap: &mut EnergyMap) -> Result<(), SeamError> {
    let height = emap.height as usize;
    let workers = num_cpus::get().max(1);
    let rows = ((height + workers - 1) / workers).max(1);
    crossbeam::scope(|scope| {
        for (index, band) in emap.bands_mut(rows).enumerate() {
            let first = (index * rows) as u32;
            scope.spawn(move |_| fill_band(colors, first, band));
        }
    })
    .map_err(|_| SeamError::WorkerPanic)
}

/// Compute the energy of every pixel in an image.
pub fn calculate_energy<I, P, S>(image: &I) -> Result<EnergyMap, SeamError>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let colors = snapshot(image)?;
    let (width, height) = colors.dimensions();
    let mut emap = EnergyMap::new(width, height);
    fill_energy(&colors, &mut emap)?;
    Ok(emap)
}
