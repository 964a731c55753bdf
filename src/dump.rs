// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Render an energy map as a greyscale image, brightest where the
//! energy is highest.  Handy for seeing what the carver will avoid.

use crate::energy::EnergyMap;
use image::{GrayImage, ImageBuffer, Luma};

pub fn energy_to_image(energy: &EnergyMap) -> GrayImage {
    let factor = energy.as_slice().iter().cloned().fold(0.0, f64::max);
    ImageBuffer::from_fn(energy.width, energy.height, |x, y| {
        let e = energy[(x, y)];
        let shade = if factor > 0.0 { e / factor * 255.0 } else { 0.0 };
        Luma([shade.round().max(0.0).min(255.0) as u8])
    })
}
