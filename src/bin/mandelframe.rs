// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate failure;
extern crate image;
#[macro_use]
extern crate log;
extern crate mandelframe;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use failure::Error;
use image::jpeg::JPEGEncoder;
use image::{ColorType, DynamicImage, RgbImage};
use mandelframe::{
    parse_complex, parse_pair, ColorMapper, FrameBuffer, Palette, RenderParams, Renderer,
};
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_at_least<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_positive(
    s: &str,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(f) if f > 0.0 && f.is_finite() => Ok(()),
        Ok(_) => Err(isnotinrange_err.to_string()),
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_resolution(s: &str) -> Result<(), String> {
    match parse_pair::<usize>(s, ',') {
        None => Err("Could not parse resolution, expected WIDTH,HEIGHT".to_string()),
        Some((0, _)) => Err("Resolution width must be positive".to_string()),
        Some((_, 0)) => Err("Resolution height must be positive".to_string()),
        Some(_) => Ok(()),
    }
}

const CENTER: &str = "center";
const OUTFILE: &str = "outfile";
const PARALLEL: &str = "parallel";
const RESOLUTION: &str = "resolution";
const STEP: &str = "step";
const ZOOM: &str = "zoom";
const CONTRAST: &str = "contrast";

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandelframe")
        .version("0.1.0")
        .about("Renders one frame of the Mandelbrot set")
        .arg(
            Arg::with_name(CENTER)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-1,0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse center point"))
                .help("The coordinates of the center of the image"),
        )
        .arg(
            Arg::with_name(OUTFILE)
                .long(OUTFILE)
                .short("o")
                .takes_value(true)
                .default_value("out.jpg")
                .help("The name of the file to write the result to"),
        )
        .arg(
            Arg::with_name(PARALLEL)
                .long(PARALLEL)
                .short("p")
                .takes_value(true)
                .default_value("2")
                .validator(|s| {
                    validate_at_least(
                        &s,
                        1usize,
                        "Could not parse worker count",
                        "Worker count must be at least 1",
                    )
                })
                .help("The number of threads to render with"),
        )
        .arg(
            Arg::with_name(RESOLUTION)
                .long(RESOLUTION)
                .short("r")
                .takes_value(true)
                .default_value("1280,720")
                .validator(|s| validate_resolution(&s))
                .help("The frame size"),
        )
        .arg(
            Arg::with_name(STEP)
                .long(STEP)
                .short("s")
                .takes_value(true)
                .default_value("15")
                .validator(|s| {
                    validate_at_least(
                        &s,
                        0usize,
                        "Could not parse iteration count",
                        "Iteration count must not be negative",
                    )
                })
                .help("The number of iterations to run to check for convergence"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .default_value("2")
                .validator(|s| {
                    validate_positive(&s, "Could not parse zoom", "Zoom must be positive")
                })
                .help("The distance from the center along the width"),
        )
        .arg(
            Arg::with_name(CONTRAST)
                .long(CONTRAST)
                .takes_value(true)
                .default_value("0.1")
                .validator(|s| {
                    validate_positive(&s, "Could not parse contrast", "Contrast must be positive")
                })
                .help("How quickly escape counts cycle through the palette"),
        )
        .get_matches()
}

// The palette's alpha channel is unused, so the frame is flattened to
// RGB before encoding.
fn write_image(outfile: &str, frame: FrameBuffer) -> Result<(), Error> {
    let rgb: RgbImage = DynamicImage::ImageRgba8(frame.into_image()).to_rgb();
    let path = Path::new(outfile);
    let is_jpeg = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false);
    if is_jpeg {
        let mut output = File::create(&path)?;
        let mut encoder = JPEGEncoder::new_with_quality(&mut output, 95);
        encoder.encode(&rgb, rgb.width(), rgb.height(), ColorType::RGB(8))?;
    } else {
        rgb.save(&path)?;
    }
    Ok(())
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    // The validators above have already vetted every value.
    let center = parse_complex(matches.value_of(CENTER).unwrap_or_default())
        .ok_or_else(|| format_err!("Error parsing center point"))?;
    let (width, height) =
        parse_pair::<usize>(matches.value_of(RESOLUTION).unwrap_or_default(), ',')
            .ok_or_else(|| format_err!("Error parsing resolution"))?;
    let parallelism = usize::from_str(matches.value_of(PARALLEL).unwrap_or_default())?;
    let step = usize::from_str(matches.value_of(STEP).unwrap_or_default())?;
    let zoom = f64::from_str(matches.value_of(ZOOM).unwrap_or_default())?;
    let contrast = f64::from_str(matches.value_of(CONTRAST).unwrap_or_default())?;
    let outfile = matches.value_of(OUTFILE).unwrap_or("out.jpg");

    let cpus = num_cpus::get();
    if parallelism > cpus {
        warn!(
            "{} workers requested but only {} CPUs are available",
            parallelism, cpus
        );
    }

    let params = RenderParams::new(center, width, height, parallelism, step, zoom)?;
    let renderer = Renderer::new(ColorMapper::new(Palette::default(), contrast));
    let frame = renderer.render(&params)?;
    write_image(outfile, frame)?;
    info!("wrote {}x{} frame to {}", width, height, outfile);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = args();
    if let Err(e) = run(&matches) {
        error!("Render failure: {}", e);
        std::process::exit(1);
    }
}
