// Copyright (c) 2026 rezky_nightky

use rand::Rng;

use crate::error::RainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Charset {
    Binary,
    Digits,
    Hex,
    English,
    Katakana,
    Matrix,
}

pub fn charset_from_str(spec: &str) -> Result<Charset, RainError> {
    match spec.trim().to_ascii_lowercase().as_str() {
        "bin" | "binary" | "01" => Ok(Charset::Binary),
        "digits" | "dec" | "decimal" => Ok(Charset::Digits),
        "hex" | "hexadecimal" => Ok(Charset::Hex),
        "english" => Ok(Charset::English),
        "katakana" => Ok(Charset::Katakana),
        "matrix" => Ok(Charset::Matrix),
        _ => Err(RainError::UnknownCharset(spec.to_string())),
    }
}

fn push_range(out: &mut Vec<char>, start: u32, end: u32) {
    for v in start..=end {
        if let Some(ch) = char::from_u32(v) {
            out.push(ch);
        }
    }
}

/// A non-empty glyph set the head picks from uniformly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyphs(Vec<char>);

impl Glyphs {
    pub fn new(charset: Charset) -> Self {
        let mut out = Vec::new();
        match charset {
            Charset::Binary => push_range(&mut out, 0x30, 0x31),
            Charset::Digits => push_range(&mut out, 0x30, 0x39),
            Charset::Hex => {
                push_range(&mut out, 0x30, 0x39);
                push_range(&mut out, 0x41, 0x46);
            }
            Charset::English => {
                push_range(&mut out, 0x41, 0x5A);
                push_range(&mut out, 0x61, 0x7A);
            }
            Charset::Katakana => push_range(&mut out, 0xFF66, 0xFF9D),
            Charset::Matrix => {
                push_range(&mut out, 0x41, 0x5A);
                push_range(&mut out, 0x30, 0x39);
                push_range(&mut out, 0xFF66, 0xFF9D);
            }
        }
        if out.is_empty() {
            out.extend(['0', '1']);
        }
        Self(out)
    }

    #[allow(dead_code)]
    pub fn as_slice(&self) -> &[char] {
        &self.0
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        self.0[rng.random_range(0..self.0.len())]
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Self::new(Charset::Binary)
    }
}
