use clap::{value_t, App, Arg, ArgMatches};
use failure::Error;
use log::info;
use seamshrink::{calculate_energy, energy_to_image, LeftEdgeRule, SeamCarver};
use std::process;

fn matches<'a>() -> ArgMatches<'a> {
    App::new("seamshrink")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware image shrinking by seam carving")
        .arg(
            Arg::with_name("input")
                .help("The image to shrink")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the shrunken image")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("width")
                .long("width")
                .takes_value(true)
                .help("Target width in pixels (default: unchanged)"),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .takes_value(true)
                .help("Target height in pixels (default: unchanged)"),
        )
        .arg(
            Arg::with_name("left-edge")
                .long("left-edge")
                .takes_value(true)
                .possible_values(&["lookahead", "previous"])
                .default_value("lookahead")
                .help("Which neighbour the left edge compares against when seam finding"),
        )
        .arg(
            Arg::with_name("energy-map")
                .long("energy-map")
                .takes_value(true)
                .help("Also write the input's energy map, as greyscale, to this file"),
        )
        .get_matches()
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let input = matches.value_of("input").unwrap_or_default();
    let output = matches.value_of("output").unwrap_or_default();

    let image = image::open(input)?.to_rgb();
    let (width, height) = image.dimensions();
    info!("loaded {} ({}x{})", input, width, height);

    if let Some(path) = matches.value_of("energy-map") {
        energy_to_image(&calculate_energy(&image)?).save(path)?;
        info!("wrote energy map to {}", path);
    }

    let new_width = dimension(matches, "width", width)?;
    let new_height = dimension(matches, "height", height)?;
    let left_edge = value_t!(matches, "left-edge", LeftEdgeRule)?;

    let mut carver = SeamCarver::with_left_edge(image, left_edge);
    carver.carve(new_width, new_height)?;
    carver.current_image().save(output)?;
    info!("wrote {} ({}x{})", output, carver.width(), carver.height());
    Ok(())
}

// A dimension flag, or the image's own size when it isn't given.
fn dimension(matches: &ArgMatches, name: &str, current: u32) -> Result<u32, Error> {
    if matches.is_present(name) {
        Ok(value_t!(matches, name, u32)?)
    } else {
        Ok(current)
    }
}

fn main() {
    env_logger::init();
    if let Err(e) = run(&matches()) {
        eprintln!("seamshrink: {}", e);
        process::exit(1);
    }
}
