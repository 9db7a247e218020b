// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The grid of colors a render writes into.

use crate::error::RenderError;
use crate::planes::Pixel;
use image::{Rgba, RgbaImage};
use std::convert::TryFrom;

/// A width x height grid of colors.
#[derive(Debug)]
pub struct FrameBuffer {
    image: RgbaImage,
}

/// The right to write one cell of a frame, once.  Cells are handed
/// out by `FrameBuffer::cells`, which yields each cell exactly once,
/// so two cells never alias.
#[derive(Debug)]
pub struct Cell<'a> {
    pixel: Pixel,
    color: &'a mut Rgba<u8>,
}

impl<'a> Cell<'a> {
    /// Which cell this is.
    pub fn pixel(&self) -> Pixel {
        self.pixel
    }

    /// Write the cell, giving up the right to write it again.
    pub fn set(self, color: Rgba<u8>) {
        *self.color = color;
    }
}

impl FrameBuffer {
    /// A frame of the given size, every cell zeroed.  Fails if either
    /// dimension does not fit in a `u32`.
    pub fn new(width: usize, height: usize) -> Result<FrameBuffer, RenderError> {
        match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) => Ok(FrameBuffer {
                image: RgbaImage::new(w, h),
            }),
            _ => Err(RenderError::InvalidDimensions { width, height }),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.image.width() as usize
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.image.height() as usize
    }

    /// Every cell of the frame, in row-major order.
    pub fn cells(&mut self) -> impl Iterator<Item = Cell<'_>> {
        self.image
            .enumerate_pixels_mut()
            .map(|(x, y, color)| Cell {
                pixel: Pixel(x as usize, y as usize),
                color,
            })
    }

    /// The color at a pixel.  Panics if the pixel lies outside the frame.
    pub fn get(&self, pixel: &Pixel) -> Rgba<u8> {
        *self.image.get_pixel(pixel.0 as u32, pixel.1 as u32)
    }

    /// Hand over the finished frame.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_come_in_raster_order() {
        let mut frame = FrameBuffer::new(3, 2).unwrap();
        let pixels: Vec<Pixel> = frame.cells().map(|c| c.pixel()).collect();
        assert_eq!(
            pixels,
            vec![
                Pixel(0, 0),
                Pixel(1, 0),
                Pixel(2, 0),
                Pixel(0, 1),
                Pixel(1, 1),
                Pixel(2, 1)
            ]
        );
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn refuses_sizes_beyond_u32() {
        let too_tall = u32::max_value() as usize + 1;
        assert_eq!(
            FrameBuffer::new(1, too_tall).unwrap_err(),
            RenderError::InvalidDimensions {
                width: 1,
                height: too_tall
            }
        );
    }

    #[test]
    fn cells_write_their_own_pixel() {
        let mut frame = FrameBuffer::new(3, 2).unwrap();
        for cell in frame.cells() {
            let Pixel(x, y) = cell.pixel();
            cell.set(Rgba([x as u8, y as u8, 7, 0]));
        }
        assert_eq!(frame.width(), 3);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.get(&Pixel(2, 1)), Rgba([2, 1, 7, 0]));
        assert_eq!(frame.get(&Pixel(0, 1)), Rgba([0, 1, 7, 0]));
        let image = frame.into_image();
        assert_eq!(image.get_pixel(1, 0), &Rgba([1, 0, 7, 0]));
    }
}
