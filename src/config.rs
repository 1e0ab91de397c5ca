// Copyright (c) 2026 rezky_nightky

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::charset::{charset_from_str, Glyphs};
use crate::error::RainError;
use crate::palette::{parse_color, Palette};

#[derive(Parser, Debug, Clone)]
#[command(name = "matrix-rain", version, about)]
pub struct Args {
    #[arg(
        long = "spawn-ms",
        default_value_t = 100,
        help_heading = "TIMING",
        help = "Milliseconds between spawn attempts (min 1 max 10000)"
    )]
    pub spawn_ms: u64,

    #[arg(
        long = "fall-ms",
        default_value_t = 50,
        help_heading = "TIMING",
        help = "Milliseconds per simulation tick (min 1 max 10000)"
    )]
    pub fall_ms: u64,

    #[arg(
        short = 'l',
        long = "length",
        default_value_t = 15,
        help_heading = "TRAILS",
        help = "Base trail length (min 1 max 1000)"
    )]
    pub length: u32,

    #[arg(
        short = 'j',
        long = "jitter",
        default_value_t = 15,
        help_heading = "TRAILS",
        help = "Random extra length range, exclusive (min 0 max 1000)"
    )]
    pub jitter: u32,

    #[arg(
        long = "charset",
        default_value = "binary",
        help_heading = "APPEARANCE",
        help = "Glyph set: binary, digits, hex, english, katakana, matrix"
    )]
    pub charset: String,

    #[arg(
        short = 'c',
        long = "color",
        default_value = "green",
        help_heading = "APPEARANCE",
        help = "Glyph color: green, red, blue, cyan, yellow, magenta, white"
    )]
    pub color: String,

    #[arg(
        long = "log-file",
        help_heading = "GENERAL",
        help = "Write logs to this file instead of stderr (RUST_LOG sets the filter)"
    )]
    pub log_file: Option<PathBuf>,
}

/// Validated runtime parameters.
#[derive(Clone, Debug)]
pub struct Tunables {
    pub provide_interval: Duration,
    pub down_interval: Duration,
    pub base_length: u32,
    pub length_jitter: u32,
    pub glyphs: Glyphs,
    pub palette: Palette,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            provide_interval: Duration::from_millis(100),
            down_interval: Duration::from_millis(50),
            base_length: 15,
            length_jitter: 15,
            glyphs: Glyphs::default(),
            palette: Palette::default(),
        }
    }
}

fn require_range(name: &'static str, v: u64, min: u64, max: u64) -> Result<u64, RainError> {
    if v < min || v > max {
        return Err(RainError::OutOfRange {
            name,
            value: v,
            min,
            max,
        });
    }
    Ok(v)
}

impl Args {
    pub fn tunables(&self) -> Result<Tunables, RainError> {
        let spawn_ms = require_range("--spawn-ms", self.spawn_ms, 1, 10_000)?;
        let fall_ms = require_range("--fall-ms", self.fall_ms, 1, 10_000)?;
        let length = require_range("--length", self.length as u64, 1, 1000)?;
        let jitter = require_range("--jitter", self.jitter as u64, 0, 1000)?;

        Ok(Tunables {
            provide_interval: Duration::from_millis(spawn_ms),
            down_interval: Duration::from_millis(fall_ms),
            base_length: length as u32,
            length_jitter: jitter as u32,
            glyphs: Glyphs::new(charset_from_str(&self.charset)?),
            palette: parse_color(&self.color)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("matrix-rain").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_the_builtin_tunables() {
        let t = parse(&[]).tunables().unwrap();
        let d = Tunables::default();
        assert_eq!(t.provide_interval, d.provide_interval);
        assert_eq!(t.down_interval, d.down_interval);
        assert_eq!(t.base_length, d.base_length);
        assert_eq!(t.length_jitter, d.length_jitter);
        assert_eq!(t.glyphs, d.glyphs);
        assert_eq!(t.palette, d.palette);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = parse(&["--fall-ms", "0"]).tunables().unwrap_err();
        assert!(matches!(
            err,
            RainError::OutOfRange {
                name: "--fall-ms",
                value: 0,
                ..
            }
        ));
        assert!(parse(&["--length", "1001"]).tunables().is_err());
    }

    #[test]
    fn unknown_charset_and_color_are_rejected() {
        assert!(matches!(
            parse(&["--charset", "runes"]).tunables(),
            Err(RainError::UnknownCharset(_))
        ));
        assert!(matches!(
            parse(&["-c", "mauve"]).tunables(),
            Err(RainError::UnknownColor(_))
        ));
    }

    #[test]
    fn explicit_values_flow_through() {
        let t = parse(&["--spawn-ms", "20", "-l", "4", "-j", "0", "--charset", "hex"])
            .tunables()
            .unwrap();
        assert_eq!(t.provide_interval, Duration::from_millis(20));
        assert_eq!(t.base_length, 4);
        assert_eq!(t.length_jitter, 0);
        assert_eq!(t.glyphs.as_slice().len(), 16);
    }
}
