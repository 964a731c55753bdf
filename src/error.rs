// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong while finding or removing a seam.

use failure::Fail;

/// The crate's error type.  None of these are recoverable inside the
/// library; they all indicate a caller handing us something we can't
/// carve.
#[derive(Debug, Clone, PartialEq, Fail)]
pub enum SeamError {
    /// A pixel address outside the image.
    #[fail(
        display = "pixel ({}, {}) lies outside the {}x{} image",
        x, y, width, height
    )]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// A seam that doesn't fit the image it's being removed from.
    #[fail(display = "malformed seam: {}", reason)]
    MalformedSeam { reason: String },

    /// An image too small to find or remove a seam in.
    #[fail(display = "a {}x{} image is too small to carve", width, height)]
    DegenerateImage { width: u32, height: u32 },

    /// Carving only ever shrinks.
    #[fail(
        display = "seamcarve cannot upscale an image: {}x{} to {}x{}",
        width, height, new_width, new_height
    )]
    Upscale {
        width: u32,
        height: u32,
        new_width: u32,
        new_height: u32,
    },

    #[fail(display = "unknown left edge rule: {}", _0)]
    UnknownLeftEdgeRule(String),

    /// Raw map storage that doesn't match the declared dimensions.
    #[fail(
        display = "{} values cannot fill a {}x{} map",
        len, width, height
    )]
    BadDimensions { width: u32, height: u32, len: usize },

    #[fail(display = "an energy worker thread panicked")]
    WorkerPanic,
}

impl SeamError {
    pub(crate) fn malformed<S: Into<String>>(reason: S) -> Self {
        SeamError::MalformedSeam {
            reason: reason.into(),
        }
    }
}
