// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware image shrinking
//!
//! Find the lowest-energy seam of pixels running across an image, cut
//! it out, repeat.  Energy is the squared colour gradient of each
//! pixel; seams are found by dynamic programming over that energy.

pub mod ternary;

pub mod error;
pub use error::SeamError;

pub mod twodmap;
pub mod transpose;

pub mod energy;
pub use energy::{calculate_energy, pixel_energy, EnergyMap, BORDER_ENERGY};

pub mod seamfinder;
pub use seamfinder::{energy_to_seam, GradientSeams, LeftEdgeRule, Seam, SeamFinder};

pub mod seamcarver;
pub use seamcarver::{remove_horizontal_seam, remove_vertical_seam, seamcarve, SeamCarver};

pub mod dump;
pub use dump::energy_to_image;
