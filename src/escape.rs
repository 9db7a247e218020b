// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time test at the heart of every Mandelbrot renderer.

use num::Complex;

/// The squared magnitude beyond which an orbit is considered to have
/// escaped to infinity.
pub const BAILOUT: f64 = 50.0;

/// What happened to the orbit of a single point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Escape {
    /// The last iterate computed before the loop stopped.
    pub z: Complex<f64>,
    /// The step at which the loop stopped.
    pub iterations: usize,
    /// True if the loop stopped because the orbit escaped, false if
    /// it ran out of iterations.
    pub escaped: bool,
}

/// Iterate `z = z * z + c`, starting from `z = c`, until either the
/// orbit passes the bailout or `limit` steps have been taken.  The
/// bailout is tested first at every step, so a point that escapes on
/// the very last allowed step is still reported as escaped.
pub fn escape_time(c: Complex<f64>, limit: usize) -> Escape {
    let mut z = c;
    let mut i = 0;
    loop {
        let escaped = z.norm_sqr() > BAILOUT;
        if escaped || i >= limit {
            return Escape {
                z,
                iterations: i,
                escaped,
            };
        }
        z = z * z + c;
        i += 1;
    }
}
