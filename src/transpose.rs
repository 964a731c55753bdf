// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Transposed image view
//!
//! The seam finder's dynamic program only runs top to bottom.  This
//! view is how it finds left-to-right seams too: handed the transpose,
//! its rows are the real image's columns.

use image::{GenericImageView, Pixel, Primitive};

pub struct Transposed<'a, I: GenericImageView> {
    image: &'a I,
}

impl<'a, I, P, S> Transposed<'a, I>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    pub fn new(image: &'a I) -> Self {
        Transposed { image }
    }
}

impl<'a, I, P, S> GenericImageView for Transposed<'a, I>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    type Pixel = P;
    type InnerImageView = I;

    fn dimensions(&self) -> (u32, u32) {
        let (width, height) = self.image.dimensions();
        (height, width)
    }

    fn width(&self) -> u32 {
        self.image.height()
    }

    fn height(&self) -> u32 {
        self.image.width()
    }

    fn bounds(&self) -> (u32, u32, u32, u32) {
        let (x, y, width, height) = self.image.bounds();
        (y, x, height, width)
    }

    fn get_pixel(&self, x: u32, y: u32) -> P {
        self.image.get_pixel(y, x)
    }

    fn inner(&self) -> &Self::InnerImageView {
        self.image
    }
}
