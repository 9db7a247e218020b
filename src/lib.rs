#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot frame renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which repeatedly squaring `z` and adding `c` never sends `z` off
//! to infinity.  For every pixel of a frame we run that iteration a
//! bounded number of times; the points that escape are colored by how
//! quickly they escaped, smoothed so that the colors flow rather than
//! step, and the points that never escape are left as background.
//!
//! Each pixel is independent of every other, so the work is spread
//! over a pool of threads that live exactly as long as one call to
//! `render`.  Pixels are handed to whichever thread is free, one at a
//! time, and every pixel is guaranteed to be written exactly once
//! before `render` returns.  The finished frame is identical no
//! matter how many threads drew it.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
#[macro_use]
extern crate log;
extern crate num;

pub mod error;
pub mod escape;
pub mod frame;
pub mod palette;
pub mod params;
pub mod planes;
pub mod render;

pub use error::RenderError;
pub use escape::{escape_time, Escape, BAILOUT};
pub use frame::FrameBuffer;
pub use palette::{ColorMapper, Colorize, Palette, DEFAULT_CONTRAST};
pub use params::{parse_complex, parse_pair, RenderParams};
pub use render::{render, Renderer};
