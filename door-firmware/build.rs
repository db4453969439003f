//! Build script for door-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates strip.toml and turns it into compile-time constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    generate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Values pulled out of strip.toml
struct StripToml {
    num_pixels: usize,
    baudrate: u32,
    read_timeout_ms: u32,
    marker: u8,
    echo_status: bool,
    mapping: &'static str,
    idle_color: [u8; 3],
}

/// Validate strip.toml and write `strip_config.rs` into OUT_DIR
fn generate_config() {
    println!("cargo:rerun-if-changed=strip.toml");

    let config_path = Path::new("strip.toml");

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read strip.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail("Invalid TOML syntax in strip.toml", &[e.to_string()]),
    };

    let strip = match parse_config(&config) {
        Ok(strip) => strip,
        Err(errors) => fail("Invalid values in strip.toml", &errors),
    };

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("strip_config.rs")).unwrap();
    writeln!(f, "// Generated from strip.toml by build.rs").unwrap();
    writeln!(f, "pub const NUM_PIXELS: usize = {};", strip.num_pixels).unwrap();
    writeln!(f, "pub const BAUDRATE: u32 = {};", strip.baudrate).unwrap();
    writeln!(f, "pub const READ_TIMEOUT_MS: u32 = {};", strip.read_timeout_ms).unwrap();
    writeln!(f, "pub const MARKER: u8 = {:#04x};", strip.marker).unwrap();
    writeln!(f, "pub const ECHO_STATUS: bool = {};", strip.echo_status).unwrap();
    writeln!(f, "pub const MAPPING: door_core::Mapping = {};", strip.mapping).unwrap();
    writeln!(
        f,
        "pub const IDLE_COLOR: smart_leds::RGB8 = smart_leds::RGB8::new({}, {}, {});",
        strip.idle_color[0], strip.idle_color[1], strip.idle_color[2]
    )
    .unwrap();

    println!(
        "cargo:warning=strip.toml validated: {} pixels, {} baud",
        strip.num_pixels, strip.baudrate
    );
}

fn parse_config(config: &toml::Value) -> Result<StripToml, Vec<String>> {
    let mut errors = Vec::new();

    let leds_per_column = int_in(config, "strip", "leds_per_column", 1, 4096, &mut errors);
    let columns = int_in(config, "strip", "columns", 1, 256, &mut errors);
    let baudrate = int_in(config, "serial", "baudrate", 1200, 4_000_000, &mut errors);
    let read_timeout_ms = int_in(config, "serial", "read_timeout_ms", 1, 60_000, &mut errors);

    let marker = match config.get("serial").and_then(|s| s.get("marker")) {
        Some(toml::Value::String(s)) if s.len() == 1 && s.is_ascii() => s.as_bytes()[0],
        Some(_) => {
            errors.push("[serial] marker must be a single ASCII character".to_string());
            0
        }
        None => {
            errors.push("[serial] missing 'marker'".to_string());
            0
        }
    };

    let echo_status = match config.get("serial").and_then(|s| s.get("echo_status")) {
        Some(toml::Value::Boolean(b)) => *b,
        Some(_) => {
            errors.push("[serial] echo_status must be true or false".to_string());
            false
        }
        None => false,
    };

    let mapping = match config.get("render").and_then(|r| r.get("mapping")) {
        Some(toml::Value::String(name)) => match name.as_str() {
            "grayscale" => "door_core::Mapping::Grayscale",
            "rgb" => "door_core::Mapping::Ordered(door_protocol::ChannelOrder::Rgb)",
            "grb" => "door_core::Mapping::Ordered(door_protocol::ChannelOrder::Grb)",
            _ => {
                errors.push("[render] mapping must be 'grayscale', 'rgb', or 'grb'".to_string());
                ""
            }
        },
        _ => {
            errors.push("[render] missing 'mapping'".to_string());
            ""
        }
    };

    let idle_color = match config.get("render").and_then(|r| r.get("idle_color")) {
        Some(toml::Value::Array(values)) if values.len() == 3 => {
            let mut rgb = [0u8; 3];
            for (slot, value) in rgb.iter_mut().zip(values) {
                match value.as_integer().and_then(|v| u8::try_from(v).ok()) {
                    Some(v) => *slot = v,
                    None => errors.push("[render] idle_color entries must be 0-255".to_string()),
                }
            }
            rgb
        }
        _ => {
            errors.push("[render] idle_color must be [r, g, b]".to_string());
            [0; 3]
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    let num_pixels = (leds_per_column * columns) as usize;

    // 8N1: ten bit times per byte
    let payload_bits = num_pixels as i64 * 3 * 10;
    let transfer_ms = (payload_bits * 1000 + baudrate - 1) / baudrate;
    if transfer_ms > read_timeout_ms {
        return Err(vec![format!(
            "[serial] read_timeout_ms {} is shorter than one payload ({} ms)",
            read_timeout_ms, transfer_ms
        )]);
    }

    Ok(StripToml {
        num_pixels,
        baudrate: baudrate as u32,
        read_timeout_ms: read_timeout_ms as u32,
        marker,
        echo_status,
        mapping,
        idle_color,
    })
}

/// Read `[section] key` as an integer in `min..=max`
fn int_in(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> i64 {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => *v,
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer {}-{}", section, key, min, max));
            min
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            min
        }
    }
}

/// Abort the build with a boxed error message
fn fail(title: &str, details: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(details)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(details: &[String]) -> String {
    details
        .iter()
        .flat_map(|d| d.lines())
        .map(|line| {
            let truncated = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
