//! Error types for the Launchkey engine.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    #[error("no Launchkey port pair found among {0:?}")]
    PortUnavailable(Vec<String>),

    #[error("failed to initialise MIDI: {0}")]
    MidiInit(String),

    #[error("MIDI port error: {0}")]
    MidiPort(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown layer \"{0}\"")]
    UnknownLayer(String),
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<midir::InitError> for Error {
    fn from(e: midir::InitError) -> Self {
        Error::MidiInit(e.to_string())
    }
}

impl From<midir::ConnectError<midir::MidiInput>> for Error {
    fn from(e: midir::ConnectError<midir::MidiInput>) -> Self {
        Error::MidiPort(e.to_string())
    }
}

impl From<midir::ConnectError<midir::MidiOutput>> for Error {
    fn from(e: midir::ConnectError<midir::MidiOutput>) -> Self {
        Error::MidiPort(e.to_string())
    }
}

impl From<midir::SendError> for Error {
    fn from(e: midir::SendError) -> Self {
        Error::MidiPort(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
