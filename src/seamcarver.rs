// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - removing seams
//!
//! Seam removal, the `SeamCarver` that owns the image being shrunk,
//! and the carve loop that shrinks it to a target size.

use crate::cq;
use crate::error::SeamError;
use crate::seamfinder::{GradientSeams, LeftEdgeRule, Seam, SeamFinder};
use image::{GenericImageView, ImageBuffer, Pixel, Primitive};
use log::debug;

// A seam for `lines` lines of `lateral` pixels each.  Checked in full
// before anything is allocated.
fn validate_seam(seam: &[u32], lines: u32, lateral: u32) -> Result<(), SeamError> {
    if seam.len() != lines as usize {
        return Err(SeamError::malformed(format!(
            "{} entries for {} lines",
            seam.len(),
            lines
        )));
    }
    if let Some((line, index)) = seam.iter().enumerate().find(|&(_, &i)| i >= lateral) {
        return Err(SeamError::malformed(format!(
            "index {} at line {} is outside 0..{}",
            index, line, lateral
        )));
    }
    if let Some(line) = seam
        .windows(2)
        .position(|w| cq!(w[0] > w[1], w[0] - w[1], w[1] - w[0]) > 1)
    {
        return Err(SeamError::malformed(format!(
            "jumps from {} to {} between lines {} and {}",
            seam[line],
            seam[line + 1],
            line,
            line + 1
        )));
    }
    Ok(())
}

/// Remove a top-to-bottom seam, one x per row, returning an image one
/// column narrower.  The source image is not touched.
pub fn remove_vertical_seam<I, P, S>(image: &I, seam: &[u32]) -> Result<ImageBuffer<P, Vec<S>>, SeamError>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    if width < 2 {
        return Err(SeamError::DegenerateImage { width, height });
    }
    validate_seam(seam, height, width)?;

    let mut imgbuf = ImageBuffer::new(width - 1, height);
    for (y, &omit) in seam.iter().enumerate() {
        let y = y as u32;
        for x in (0..width).filter(|x| *x != omit) {
            imgbuf.put_pixel(cq!(x < omit, x, x - 1), y, image.get_pixel(x, y));
        }
    }
    Ok(imgbuf)
}

/// Remove a left-to-right seam, one y per column, returning an image
/// one row shorter.  The source image is not touched.
pub fn remove_horizontal_seam<I, P, S>(image: &I, seam: &[u32]) -> Result<ImageBuffer<P, Vec<S>>, SeamError>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    if height < 2 {
        return Err(SeamError::DegenerateImage { width, height });
    }
    validate_seam(seam, width, height)?;

    let mut imgbuf = ImageBuffer::new(width, height - 1);
    for (x, &omit) in seam.iter().enumerate() {
        let x = x as u32;
        for y in (0..height).filter(|y| *y != omit) {
            imgbuf.put_pixel(x, cq!(y < omit, y, y - 1), image.get_pixel(x, y));
        }
    }
    Ok(imgbuf)
}

// This is silly and basically a reimplementation of `bool` and `not`,
// but it makes it much clearer in the code what I'm doing.  And I
// like that.
#[derive(Debug, PartialEq, Copy, Clone)]
enum Carve {
    Width,
    Height,
}

impl Carve {
    fn turn(self) -> Self {
        cq!(self == Carve::Width, Carve::Height, Carve::Width)
    }
}

/// Owns the image being carved.  Every removal builds a whole new
/// image and only then replaces the old one, so a rejected seam leaves
/// the carver exactly as it was.
pub struct SeamCarver<P, S>
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    image: ImageBuffer<P, Vec<S>>,
    left_edge: LeftEdgeRule,
}

impl<P, S> SeamCarver<P, S>
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    /// Creates a new SeamCarver with an image to be carved.
    pub fn new(image: ImageBuffer<P, Vec<S>>) -> Self {
        Self::with_left_edge(image, LeftEdgeRule::default())
    }

    pub fn with_left_edge(image: ImageBuffer<P, Vec<S>>, left_edge: LeftEdgeRule) -> Self {
        SeamCarver { image, left_edge }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn current_image(&self) -> &ImageBuffer<P, Vec<S>> {
        &self.image
    }

    pub fn into_image(self) -> ImageBuffer<P, Vec<S>> {
        self.image
    }

    fn seams(&self) -> GradientSeams<'_, ImageBuffer<P, Vec<S>>> {
        GradientSeams::with_left_edge(&self.image, self.left_edge)
    }

    pub fn remove_vertical_seam(&mut self, seam: &[u32]) -> Result<(), SeamError> {
        self.image = remove_vertical_seam(&self.image, seam)?;
        Ok(())
    }

    pub fn remove_horizontal_seam(&mut self, seam: &[u32]) -> Result<(), SeamError> {
        self.image = remove_horizontal_seam(&self.image, seam)?;
        Ok(())
    }

    fn carve_once(&mut self, direction: Carve) -> Result<(), SeamError> {
        match direction {
            Carve::Width => {
                let seam = self.find_vertical_seam()?;
                self.remove_vertical_seam(&seam)
            }
            Carve::Height => {
                let seam = self.find_horizontal_seam()?;
                self.remove_horizontal_seam(&seam)
            }
        }
    }

    // This is absurdly inefficient, as the entire energy map and
    // seam graph are recalculated for every seam.

    /// Repeatedly carve seams out of the image until it is `new_width`
    /// by `new_height`.  While both dimensions are too large, width and
    /// height seams alternate.  The carving happens on a copy, so an
    /// error partway through leaves this carver's image as it was.
    pub fn carve(&mut self, new_width: u32, new_height: u32) -> Result<(), SeamError> {
        let (width, height) = self.image.dimensions();
        if width < new_width || height < new_height {
            return Err(SeamError::Upscale {
                width,
                height,
                new_width,
                new_height,
            });
        }

        let mut scratch = SeamCarver::with_left_edge(self.image.clone(), self.left_edge);
        scratch.carve_down(new_width, new_height)?;
        self.image = scratch.image;
        Ok(())
    }

    fn carve_down(&mut self, new_width: u32, new_height: u32) -> Result<(), SeamError> {
        let mut direction = Carve::Width;
        while self.width() > new_width && self.height() > new_height {
            self.carve_once(direction)?;
            direction = direction.turn();
            debug!("both: {}x{}", self.width(), self.height());
        }
        while self.width() > new_width {
            self.carve_once(Carve::Width)?;
            debug!("width: {}x{}", self.width(), self.height());
        }
        while self.height() > new_height {
            self.carve_once(Carve::Height)?;
            debug!("height: {}x{}", self.width(), self.height());
        }
        Ok(())
    }
}

impl<P, S> SeamFinder for SeamCarver<P, S>
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    fn find_vertical_seam(&self) -> Result<Seam, SeamError> {
        self.seams().find_vertical_seam()
    }

    fn find_horizontal_seam(&self) -> Result<Seam, SeamError> {
        self.seams().find_horizontal_seam()
    }
}

/// Given an image and a desired new width and height, return a copy of
/// the image carved down to that size.
pub fn seamcarve<I, P, S>(image: &I, new_width: u32, new_height: u32) -> Result<ImageBuffer<P, Vec<S>>, SeamError>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    let mut scratch = ImageBuffer::<P, Vec<S>>::new(width, height);
    image.pixels().for_each(|(x, y, p)| scratch.put_pixel(x, y, p));

    let mut carver = SeamCarver::new(scratch);
    carver.carve(new_width, new_height)?;
    Ok(carver.into_image())
}
