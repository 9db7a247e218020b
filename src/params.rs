// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The inputs to a single render, and the string parsers the command
//! line uses to build them.

use crate::error::RenderError;
use num::Complex;
use std::str::FromStr;

/// The largest width or height a frame can have.
pub const MAX_DIMENSION: usize = u32::max_value() as usize;

/// Given a string and a separator, returns the two values
/// separated by the separator.
pub fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// A specific implementation of parse_pair using a comma and expecting
/// floating point numbers.
pub fn parse_complex(s: &str) -> Option<Complex<f64>> {
    parse_pair(s, ',').map(|(re, im)| Complex { re, im })
}

/// Everything needed to render one frame.  Can only be built through
/// `new`, so a `RenderParams` in hand is always a valid one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderParams {
    center: Complex<f64>,
    width: usize,
    height: usize,
    parallelism: usize,
    max_iterations: usize,
    zoom: f64,
}

impl RenderParams {
    /// `zoom` is the distance from the center to the left and right
    /// edges of the frame; the vertical extent follows from the aspect
    /// ratio.
    pub fn new(
        center: Complex<f64>,
        width: usize,
        height: usize,
        parallelism: usize,
        max_iterations: usize,
        zoom: f64,
    ) -> Result<RenderParams, RenderError> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        if parallelism == 0 {
            return Err(RenderError::InvalidParallelism(parallelism));
        }
        if !(zoom > 0.0 && zoom.is_finite()) {
            return Err(RenderError::InvalidZoom(zoom));
        }
        Ok(RenderParams {
            center,
            width,
            height,
            parallelism,
            max_iterations,
            zoom,
        })
    }

    /// The point at the middle of the frame.
    pub fn center(&self) -> Complex<f64> {
        self.center
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of worker threads.
    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    /// Iteration limit handed to the escape-time test.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Half-width of the view on the real axis.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// The same frame with a different worker count.
    pub fn with_parallelism(&self, parallelism: usize) -> Result<RenderParams, RenderError> {
        RenderParams::new(
            self.center,
            self.width,
            self.height,
            parallelism,
            self.max_iterations,
            self.zoom,
        )
    }
}
