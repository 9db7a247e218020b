// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The work distributor.  Every pixel of the frame becomes one work
//! item, handed directly to one of a fixed pool of scoped worker
//! threads over a zero-capacity channel.  Workers report each finished
//! pixel back over a second zero-capacity channel.  Because neither
//! channel buffers anything, a worker blocked reporting a finished
//! pixel cannot take new work, so the producer must be willing to
//! drain completions while it waits to submit; it selects over both.

use crate::error::RenderError;
use crate::escape::escape_time;
use crate::frame::{Cell, FrameBuffer};
use crate::palette::{ColorMapper, Colorize};
use crate::params::RenderParams;
use crate::planes::PlaneMapper;
use crossbeam::channel::{bounded, Receiver, Select, Sender};
use num::Complex;
use std::thread;

/// One pixel's worth of work: where it is on the complex plane, and
/// the cell its color goes into.
struct WorkItem<'a> {
    point: Complex<f64>,
    cell: Cell<'a>,
}

struct Worker<'a, 'm, M> {
    work: Receiver<WorkItem<'a>>,
    done: Sender<()>,
    quit: Receiver<()>,
    mapper: &'m M,
    limit: usize,
}

impl<'a, 'm, M: Colorize> Worker<'a, 'm, M> {
    /// Take work until told to stop.  The stop signal is only noticed
    /// between work items.
    fn run(self, id: usize) {
        loop {
            let mut sel = Select::new();
            let work = sel.recv(&self.work);
            let quit = sel.recv(&self.quit);
            let oper = sel.select();
            let item = match oper.index() {
                i if i == work => oper.recv(&self.work),
                i if i == quit => {
                    let _ = oper.recv(&self.quit);
                    break;
                }
                _ => unreachable!(),
            };
            let item = match item {
                Ok(item) => item,
                Err(_) => break,
            };
            let color = self.mapper.colorize(&escape_time(item.point, self.limit));
            item.cell.set(color);
            if self.done.send(()).is_err() {
                break;
            }
        }
        trace!("worker {} exiting", id);
    }
}

impl<'a, 'm, M> Drop for Worker<'a, 'm, M> {
    // A worker that panics mid-item still owes the producer a
    // completion, or the producer would wait for it forever.  The
    // panic itself surfaces when the scope joins.
    fn drop(&mut self) {
        if thread::panicking() {
            let _ = self.done.send(());
        }
    }
}

/// Renders frames with a fixed color mapping.
#[derive(Clone, Debug, Default)]
pub struct Renderer<M = ColorMapper> {
    mapper: M,
}

impl<M: Colorize> Renderer<M> {
    /// A renderer that colors with `mapper`.
    pub fn new(mapper: M) -> Renderer<M> {
        Renderer { mapper }
    }

    /// Render one frame.  Returns once every pixel has been written
    /// and every worker has been joined.  The result does not depend
    /// on the number of workers.
    pub fn render(&self, params: &RenderParams) -> Result<FrameBuffer, RenderError> {
        let plane = PlaneMapper::new(
            params.width(),
            params.height(),
            params.center(),
            params.zoom(),
        );
        let mut frame = FrameBuffer::new(params.width(), params.height())?;
        debug!(
            "rendering {} pixels around {} with {} workers",
            plane.pixel_count(),
            params.center(),
            params.parallelism()
        );

        let submitted = {
            let cells = frame.cells();
            let (work_tx, work_rx) = bounded::<WorkItem>(0);
            let (done_tx, done_rx) = bounded::<()>(0);
            let (quit_tx, quit_rx) = bounded::<()>(0);
            let mapper = &self.mapper;
            let limit = params.max_iterations();

            crossbeam::scope(|spawner| {
                for id in 0..params.parallelism() {
                    let worker = Worker {
                        work: work_rx.clone(),
                        done: done_tx.clone(),
                        quit: quit_rx.clone(),
                        mapper,
                        limit,
                    };
                    spawner.spawn(move |_| worker.run(id));
                }
                drop(work_rx);
                drop(done_tx);
                drop(quit_rx);

                let mut submitted = 0;
                let mut outstanding = 0;
                for cell in cells {
                    let item = WorkItem {
                        point: plane.pixel_to_point(&cell.pixel()),
                        cell,
                    };
                    loop {
                        let mut sel = Select::new();
                        let send = sel.send(&work_tx);
                        let done = sel.recv(&done_rx);
                        let oper = sel.select();
                        match oper.index() {
                            i if i == send => {
                                if oper.send(&work_tx, item).is_err() {
                                    return submitted;
                                }
                                break;
                            }
                            i if i == done => {
                                if oper.recv(&done_rx).is_err() {
                                    return submitted;
                                }
                                outstanding -= 1;
                            }
                            _ => unreachable!(),
                        }
                    }
                    outstanding += 1;
                    submitted += 1;
                }

                while outstanding > 0 {
                    if done_rx.recv().is_err() {
                        break;
                    }
                    outstanding -= 1;
                }
                drop(quit_tx);
                submitted
            })
            .map_err(|_| RenderError::WorkerPanicked)?
        };

        if submitted != plane.pixel_count() {
            return Err(RenderError::WorkerPanicked);
        }
        debug!("rendered {} pixels", submitted);
        Ok(frame)
    }
}

/// Render one frame with the default palette and contrast.
pub fn render(params: &RenderParams) -> Result<FrameBuffer, RenderError> {
    Renderer::<ColorMapper>::default().render(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escape::Escape;
    use crate::palette::{Palette, BACKGROUND};
    use crate::planes::Pixel;
    use image::Rgba;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn params(parallelism: usize) -> RenderParams {
        RenderParams::new(Complex::new(-1.0, 0.0), 4, 2, parallelism, 15, 2.0).unwrap()
    }

    fn raw(frame: FrameBuffer) -> Vec<u8> {
        frame.into_image().into_raw()
    }

    #[test]
    fn small_frame_matches_across_worker_counts() {
        let one = raw(render(&params(1)).unwrap());
        let four = raw(render(&params(4)).unwrap());
        assert_eq!(one.len(), 4 * 2 * 4);
        assert_eq!(one, four);
    }

    #[test]
    fn larger_frame_is_deterministic() {
        let p = RenderParams::new(Complex::new(-0.5, 0.1), 97, 61, 1, 200, 1.5).unwrap();
        let expected = raw(render(&p).unwrap());
        for workers in &[2, 3, 8, 64] {
            let got = raw(render(&p.with_parallelism(*workers).unwrap()).unwrap());
            assert_eq!(got, expected, "{} workers", workers);
        }
    }

    #[test]
    fn every_pixel_matches_a_sequential_evaluation() {
        let p = RenderParams::new(Complex::new(-0.75, 0.0), 33, 17, 5, 50, 1.75).unwrap();
        let mapper = ColorMapper::default();
        let plane = PlaneMapper::new(33, 17, p.center(), p.zoom());
        let frame = render(&p).unwrap();
        assert_eq!(frame.width(), 33);
        assert_eq!(frame.height(), 17);
        for y in 0..17 {
            for x in 0..33 {
                let pixel = Pixel(x, y);
                let point = plane.pixel_to_point(&pixel);
                let expected = mapper.color(&escape_time(point, 50));
                assert_eq!(frame.get(&pixel), expected, "at {:?}", pixel);
            }
        }
    }

    #[test]
    fn no_cell_is_left_unwritten() {
        // Every point this far out escapes at once, so no cell should
        // keep its initial zero color.
        let p = RenderParams::new(Complex::new(100.0, 100.0), 20, 10, 3, 15, 1.0).unwrap();
        let frame = render(&p).unwrap();
        for y in 0..10 {
            for x in 0..20 {
                let color = frame.get(&Pixel(x, y));
                assert_ne!(color, BACKGROUND, "unset cell at {},{}", x, y);
            }
        }
    }

    #[test]
    fn interior_is_background() {
        let p = RenderParams::new(Complex::new(-0.1, 0.0), 8, 8, 2, 100, 0.05).unwrap();
        let frame = render(&p).unwrap();
        for cell in frame.into_image().pixels() {
            assert_eq!(*cell, BACKGROUND);
        }
    }

    #[test]
    fn more_workers_than_pixels() {
        // The only pixel maps to the corner of the view, -0.15-0.05i,
        // which is well inside the main cardioid.
        let p = RenderParams::new(Complex::new(-0.1, 0.0), 1, 1, 16, 10, 0.05).unwrap();
        let frame = render(&p).unwrap();
        assert_eq!(frame.get(&Pixel(0, 0)), BACKGROUND);

        let p = RenderParams::new(Complex::new(0.0, 0.0), 1, 1, 16, 10, 2.0).unwrap();
        let plane = PlaneMapper::new(1, 1, p.center(), p.zoom());
        let corner = plane.pixel_to_point(&Pixel(0, 0));
        let expected = ColorMapper::default().color(&escape_time(corner, 10));
        assert_eq!(render(&p).unwrap().get(&Pixel(0, 0)), expected);
    }

    #[test]
    fn custom_mapper_is_used() {
        let red = Rgba([255, 0, 0, 0]);
        let renderer = Renderer::new(ColorMapper::new(Palette::new(vec![red]).unwrap(), 0.1));
        let p = RenderParams::new(Complex::new(50.0, 0.0), 3, 3, 2, 5, 1.0).unwrap();
        let frame = renderer.render(&p).unwrap();
        for cell in frame.into_image().pixels() {
            assert_eq!(*cell, red);
        }
    }

    struct Exploding;

    impl Colorize for Exploding {
        fn colorize(&self, _: &Escape) -> Rgba<u8> {
            panic!("colorizer failure");
        }
    }

    // Panics on the first pixel it sees, then behaves.
    struct ExplodesOnce {
        fired: AtomicBool,
    }

    impl Colorize for ExplodesOnce {
        fn colorize(&self, escape: &Escape) -> Rgba<u8> {
            if !self.fired.swap(true, Ordering::SeqCst) {
                panic!("colorizer failure");
            }
            ColorMapper::default().color(escape)
        }
    }

    #[test]
    fn all_workers_panicking_aborts_the_render() {
        let p = RenderParams::new(Complex::new(-1.0, 0.0), 8, 4, 3, 15, 2.0).unwrap();
        let result = Renderer::new(Exploding).render(&p);
        assert_eq!(result.unwrap_err(), RenderError::WorkerPanicked);
    }

    #[test]
    fn one_worker_panicking_aborts_the_render() {
        let p = RenderParams::new(Complex::new(-1.0, 0.0), 8, 4, 2, 15, 2.0).unwrap();
        let renderer = Renderer::new(ExplodesOnce {
            fired: AtomicBool::new(false),
        });
        assert_eq!(
            renderer.render(&p).unwrap_err(),
            RenderError::WorkerPanicked
        );
    }
}
