// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Smooth coloring.  Rather than painting each integer escape count
//! with its own color, which produces visible bands, we compute a
//! fractional escape count from how far past the bailout the final
//! iterate landed, and use it to blend between two neighbouring
//! entries of a cyclic palette.

use crate::error::RenderError;
use crate::escape::{Escape, BAILOUT};
use image::Rgba;
use std::f64::consts::LN_2;

/// The color of points that never escaped.
pub const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// How quickly the smooth count walks through the palette.
pub const DEFAULT_CONTRAST: f64 = 0.1;

const DEFAULT_COLORS: [[u8; 4]; 5] = [
    [255, 188, 66, 0],
    [101, 66, 54, 0],
    [249, 127, 139, 0],
    [33, 131, 128, 0],
    [115, 210, 222, 0],
];

/// An ordered, cyclic, non-empty list of colors.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Rgba<u8>>,
}

impl Palette {
    /// Fails if `colors` is empty.
    pub fn new(colors: Vec<Rgba<u8>>) -> Result<Palette, RenderError> {
        if colors.is_empty() {
            return Err(RenderError::EmptyPalette);
        }
        Ok(Palette { colors })
    }

    /// Number of entries before the palette wraps around.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Never true; a palette always holds at least one color.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The entry at `index`, wrapping around the end of the palette.
    pub fn get(&self, index: usize) -> Rgba<u8> {
        self.colors[index % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            colors: DEFAULT_COLORS.iter().map(|c| Rgba(*c)).collect(),
        }
    }
}

/// Per-channel linear interpolation from `a` (alpha = 0) to `b`
/// (alpha = 1).  Channels are truncated, not rounded.
pub fn blend(a: Rgba<u8>, b: Rgba<u8>, alpha: f64) -> Rgba<u8> {
    let mut c = [0u8; 4];
    for (i, channel) in c.iter_mut().enumerate() {
        let (from, to) = (f64::from(a.0[i]), f64::from(b.0[i]));
        *channel = (from + alpha * (to - from)) as u8;
    }
    Rgba(c)
}

/// Anything that can color a pixel from its escape result.  Shared by
/// every worker of a render.
pub trait Colorize: Sync {
    /// The color of a single pixel.
    fn colorize(&self, escape: &Escape) -> Rgba<u8>;
}

/// Turns escape results into colors.
#[derive(Clone, Debug)]
pub struct ColorMapper {
    palette: Palette,
    contrast: f64,
    log_offset: f64,
}

impl ColorMapper {
    /// `contrast` scales the smooth escape count before it is used as
    /// a palette position; smaller values give wider bands.
    pub fn new(palette: Palette, contrast: f64) -> ColorMapper {
        ColorMapper {
            palette,
            contrast,
            log_offset: (BAILOUT.ln() / LN_2).ln() / LN_2,
        }
    }

    /// The fractional escape count, before contrast is applied.
    /// Only meaningful for points that escaped.
    pub fn smooth_iterations(&self, escape: &Escape) -> f64 {
        let d = escape.z.norm_sqr();
        escape.iterations as f64 + self.log_offset - (d.ln() / LN_2).ln() / LN_2
    }

    /// The color at a fractional palette position.  The integer part
    /// picks the band, wrapping in both directions, and the fractional
    /// part blends it toward the next one.
    pub fn shade(&self, position: f64) -> Rgba<u8> {
        let band = position.floor();
        let alpha = position - band;
        let len = self.palette.len() as i64;
        let c1 = (band as i64).rem_euclid(len) as usize;
        blend(self.palette.get(c1), self.palette.get(c1 + 1), alpha)
    }

    /// The color of a single pixel.
    pub fn color(&self, escape: &Escape) -> Rgba<u8> {
        if !escape.escaped {
            return BACKGROUND;
        }
        self.shade(self.smooth_iterations(escape) * self.contrast)
    }
}

impl Colorize for ColorMapper {
    fn colorize(&self, escape: &Escape) -> Rgba<u8> {
        self.color(escape)
    }
}

impl Default for ColorMapper {
    fn default() -> Self {
        ColorMapper::new(Palette::default(), DEFAULT_CONTRAST)
    }
}
