// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors reported by the renderer.

/// Everything that can stop a frame from being rendered.
#[derive(Debug, Fail, PartialEq)]
pub enum RenderError {
    /// The image must be at least one pixel, and at most
    /// `u32::MAX` pixels, in each direction.
    #[fail(
        display = "image dimensions must be between 1 and 4294967295, got {}x{}",
        width, height
    )]
    InvalidDimensions {
        /// Requested width, in pixels.
        width: usize,
        /// Requested height, in pixels.
        height: usize,
    },

    /// At least one worker is needed to do any work.
    #[fail(display = "worker count must be at least 1, got {}", _0)]
    InvalidParallelism(usize),

    /// The zoom is the half-width of the view, and must be a positive
    /// finite number.
    #[fail(display = "zoom must be a positive number, got {}", _0)]
    InvalidZoom(f64),

    /// A palette needs at least one color to cycle through.
    #[fail(display = "palette must contain at least one color")]
    EmptyPalette,

    /// A worker thread died while the frame was being rendered.  The
    /// frame is abandoned.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,
}
