// Copyright (c) 2026 rezky_nightky

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RainError {
    #[error("failed to initialize terminal: {0}")]
    TerminalInit(#[source] io::Error),

    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to apply {name} {value} (min {min} max {max})")]
    OutOfRange {
        name: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    #[error("unsupported charset: {0} (allowed: binary, digits, hex, english, katakana, matrix)")]
    UnknownCharset(String),

    #[error("invalid color: {0} (allowed: green, red, blue, cyan, yellow, magenta, white)")]
    UnknownColor(String),

    #[error("failed to open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RainError>;
