use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("could not read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("terminal is {width}x{height}, the board needs at least {need_width}x{need_height}")]
    TerminalTooSmall {
        width: u16,
        height: u16,
        need_width: u16,
        need_height: u16,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
