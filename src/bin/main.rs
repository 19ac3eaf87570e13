use chip_8::{Emulator, Error, FRAME_BUFFER_PIXEL_HEIGHT, FRAME_BUFFER_PIXEL_WIDTH, KEY_COUNT};
use clap::{crate_authors, crate_version, value_t, App, Arg};
use log::{error, info, trace, warn};
use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

const MICROS_BETWEEN_FRAMES: u64 = 1000_000 / 60;
const DEFAULT_INSTRUCTIONS_PER_FRAME: &str = "10";

struct Options {
    rom: String,
    instructions_per_frame: usize,
    scale: Scale,
    skip_unknown: bool,
}

fn map_key(key: u8) -> Option<Key> {
    match key {
        0x1 => Some(Key::Key1),
        0x2 => Some(Key::Key2),
        0x3 => Some(Key::Key3),
        0xc => Some(Key::Key4),

        0x4 => Some(Key::Q),
        0x5 => Some(Key::W),
        0x6 => Some(Key::E),
        0xd => Some(Key::R),

        0x7 => Some(Key::A),
        0x8 => Some(Key::S),
        0x9 => Some(Key::D),
        0xe => Some(Key::F),

        0xa => Some(Key::Z),
        0x0 => Some(Key::X),
        0xb => Some(Key::C),
        0xf => Some(Key::V),
        _ => None,
    }
}

fn update_key_state(emulator: &mut Emulator, window: &Window) -> chip_8::Result<()> {
    for key in 0..KEY_COUNT as u8 {
        if let Some(key_enum) = map_key(key) {
            emulator.set_key(key, window.is_key_down(key_enum))?;
        }
    }

    Ok(())
}

fn parse_scale(value: &str) -> Option<Scale> {
    match value {
        "1" => Some(Scale::X1),
        "2" => Some(Scale::X2),
        "4" => Some(Scale::X4),
        "8" => Some(Scale::X8),
        "16" => Some(Scale::X16),
        "32" => Some(Scale::X32),
        _ => None,
    }
}

fn parse_options() -> Options {
    let matches = App::new("CHIP-8")
        .version(crate_version!())
        .author(crate_authors!())
        .about("A CHIP-8 virtual machine")
        .arg(
            Arg::with_name("ROM")
                .help("The CHIP-8 ROM to run")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("ipf")
                .long("ipf")
                .value_name("N")
                .help("Instructions executed per 60hz frame")
                .takes_value(true)
                .default_value(DEFAULT_INSTRUCTIONS_PER_FRAME),
        )
        .arg(
            Arg::with_name("scale")
                .long("scale")
                .value_name("FACTOR")
                .help("Window scale factor")
                .takes_value(true)
                .possible_values(&["1", "2", "4", "8", "16", "32"])
                .default_value("16"),
        )
        .arg(
            Arg::with_name("skip-unknown")
                .long("skip-unknown")
                .help("Skip unknown opcodes instead of halting"),
        )
        .get_matches();

    Options {
        rom: matches.value_of("ROM").unwrap_or_default().to_owned(),
        instructions_per_frame: value_t!(matches, "ipf", usize).unwrap_or_else(|e| e.exit()),
        scale: matches
            .value_of("scale")
            .and_then(parse_scale)
            .unwrap_or(Scale::X16),
        skip_unknown: matches.is_present("skip-unknown"),
    }
}

fn load_rom(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;

    Ok(buffer)
}

fn create_window(scale: Scale) -> Result<Window, Box<dyn std::error::Error>> {
    let mut opts = WindowOptions::default();

    opts.scale = scale;
    let window = Window::new(
        "CHIP-8",
        FRAME_BUFFER_PIXEL_WIDTH,
        FRAME_BUFFER_PIXEL_HEIGHT,
        opts,
    )?;

    Ok(window)
}

/// Time left to sleep so that a frame that took `elapsed` lasts 1/60s.
fn remaining_frame_time(elapsed: Duration) -> Option<Duration> {
    Duration::from_micros(MICROS_BETWEEN_FRAMES).checked_sub(elapsed)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let options = parse_options();

    let rom = load_rom(Path::new(&options.rom))?;
    let mut emulator = Emulator::new();
    emulator.load_rom(&rom)?;
    info!("Running {} at {} instructions per frame", options.rom, options.instructions_per_frame);

    let mut window = create_window(options.scale)?;
    let mut halted = false;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let frame_start = Instant::now();

        if window.is_key_pressed(Key::F1, KeyRepeat::No) && !emulator.is_initial_state() {
            emulator.reset();
            halted = false;
        }

        if !halted {
            update_key_state(&mut emulator, &window)?;

            match emulator.run_frame(options.instructions_per_frame) {
                Ok(()) => {}
                Err(err @ Error::UnknownOpcode { .. }) if options.skip_unknown => {
                    warn!("{}, skipping", err);
                    emulator.skip_instruction();
                }
                Err(err) => {
                    error!("{}, halting. Press F1 to reset", err);
                    halted = true;
                }
            }

            if emulator.sound_flag() {
                trace!("beep");
            }
        }

        if emulator.is_dirty() {
            let buffer = emulator
                .framebuffer_snapshot()
                .rgba_framebuffer()
                .into_iter()
                .map(|value| {
                    if value == 0x0 {
                        0x002C_50_66
                    } else {
                        0x00_68_BB_ED
                    }
                })
                .collect::<Vec<u32>>();

            window.update_with_buffer(&buffer)?;
            emulator.clear_dirty();
        } else {
            window.update();
        }

        if let Some(remaining) = remaining_frame_time(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }

    Ok(())
}
