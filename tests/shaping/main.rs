mod arabic;
mod basic;
mod fallback;
mod font_builder;
mod hangul;
mod ignorables;
mod plans;
mod universal;

use std::ffi::OsString;
use std::str::FromStr;

use buzzshape::{BufferClusterLevel, BufferFlags, SerializeFlags, UnicodeBuffer};
use pico_args::Arguments;

/// Shapes `text` with a font built in memory and returns the result in the
/// `hb-shape` text format. `options` takes the `hb-shape` flags the tests
/// need.
pub fn shape(font_data: &[u8], text: &str, options: &str) -> String {
    let args: Vec<OsString> = options.split_whitespace().map(OsString::from).collect();
    let mut args = Arguments::from_vec(args);

    let mut face = buzzshape::Face::from_slice(font_data, 0).unwrap();
    let variations: Vec<buzzshape::Variation> = list(&mut args, "--variations");
    if !variations.is_empty() {
        face.set_variations(&variations);
    }

    let buffer = buffer_from_args(&mut args, text);
    let features: Vec<buzzshape::Feature> = list(&mut args, "--features");
    let format = serialize_flags(&mut args);

    let unused = args.finish();
    assert!(unused.is_empty(), "unexpected arguments: {:?}", unused);

    buzzshape::shape(&face, &features, buffer).serialize(&face, format)
}

/// A comma separated option value, parsed item by item.
fn list<T: FromStr>(args: &mut Arguments, key: &'static str) -> Vec<T>
where
    T::Err: std::fmt::Debug,
{
    let value: Option<String> = args.opt_value_from_str(key).unwrap();
    value
        .iter()
        .flat_map(|v| v.split(','))
        .map(|item| item.parse().unwrap())
        .collect()
}

/// `U+XXXX` code points, comma separated.
fn code_points(value: &str) -> Result<String, String> {
    value
        .split(',')
        .map(|item| {
            let hex = item.trim_start_matches("U+");
            u32::from_str_radix(hex, 16)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| format!("bad code point {item}"))
        })
        .collect()
}

fn cluster_level(value: &str) -> Result<BufferClusterLevel, String> {
    Ok(match value {
        "0" => BufferClusterLevel::MonotoneGraphemes,
        "1" => BufferClusterLevel::MonotoneCharacters,
        "2" => BufferClusterLevel::Characters,
        _ => return Err(format!("no cluster level {value}")),
    })
}

fn buffer_from_args(args: &mut Arguments, text: &str) -> UnicodeBuffer {
    let mut buffer = UnicodeBuffer::new();

    if let Some(context) = args.opt_value_from_fn("--unicodes-before", code_points).unwrap() {
        buffer.set_pre_context(&context);
    }
    buffer.push_str(text);
    if let Some(context) = args.opt_value_from_fn("--unicodes-after", code_points).unwrap() {
        buffer.set_post_context(&context);
    }

    if let Some(direction) = args.opt_value_from_str("--direction").unwrap() {
        buffer.set_direction(direction);
    }
    if let Some(script) = args.opt_value_from_str("--script").unwrap() {
        buffer.set_script(script);
    }
    if let Some(language) = args.opt_value_from_str("--language").unwrap() {
        buffer.set_language(language);
    }
    if let Some(glyph) = args.opt_value_from_str("--not-found-glyph").unwrap() {
        buffer.set_not_found_glyph(glyph);
    }
    if let Some(glyph) = args.opt_value_from_str("--invisible-glyph").unwrap() {
        buffer.set_invisible_glyph(glyph);
    }

    let switches = [
        ("--bot", BufferFlags::BEGINNING_OF_TEXT),
        ("--eot", BufferFlags::END_OF_TEXT),
        ("--remove-default-ignorables", BufferFlags::REMOVE_DEFAULT_IGNORABLES),
        ("--preserve-default-ignorables", BufferFlags::PRESERVE_DEFAULT_IGNORABLES),
    ];
    let mut flags = BufferFlags::default();
    for (key, flag) in switches {
        flags.set(flag, args.contains(key));
    }
    buffer.set_flags(flags);

    let level = args.opt_value_from_fn("--cluster-level", cluster_level).unwrap();
    buffer.set_cluster_level(level.unwrap_or_default());
    buffer.reset_clusters();

    buffer
}

fn serialize_flags(args: &mut Arguments) -> SerializeFlags {
    // `--ned` is short for no clusters and no advances.
    let ned = args.contains("--ned");
    let switches = [
        ("--no-glyph-names", SerializeFlags::NO_GLYPH_NAMES, false),
        ("--no-clusters", SerializeFlags::NO_CLUSTERS, ned),
        ("--no-positions", SerializeFlags::NO_POSITIONS, false),
        ("--no-advances", SerializeFlags::NO_ADVANCES, ned),
        ("--show-flags", SerializeFlags::GLYPH_FLAGS, false),
    ];

    let mut flags = SerializeFlags::default();
    for (key, flag, implied) in switches {
        if args.contains(key) || implied {
            flags |= flag;
        }
    }
    flags
}
