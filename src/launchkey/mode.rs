use serde::{Deserialize, Serialize};

use super::message::{MessageKind, RawMessage};
use super::tables::{INCONTROL_CHANNEL, MODE_NOTE, SUBMODE_NOTES};

/// Addressing mode of the device or of one control class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Basic,
    Extended,
}

impl Mode {
    /// Full velocity selects extended mode, anything else basic.
    pub fn from_velocity(velocity: u8) -> Self {
        if velocity == 127 {
            Mode::Extended
        } else {
            Mode::Basic
        }
    }

    pub fn velocity(self) -> u8 {
        match self {
            Mode::Basic => 0,
            Mode::Extended => 127,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Basic => "basic",
            Mode::Extended => "extended",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Mode::Basic),
            "extended" => Ok(Mode::Extended),
            other => Err(format!(
                "invalid mode {other:?} (expected \"basic\" or \"extended\")"
            )),
        }
    }
}

/// Control classes with an independently switchable submode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlClass {
    Drumpads,
    Knobs,
    Sliders,
}

/// A change applied to [`ModeState`] by an incontrol message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChanged {
    /// Top-level switch; every submode followed.
    Device(Mode),
    Submode(ControlClass, Mode),
}

/// Current device mode plus per-class submodes.
///
/// Only incontrol traffic mutates this; decoding and encoding read it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeState {
    mode: Mode,
    drumpads: Mode,
    knobs: Mode,
    sliders: Mode,
}

impl ModeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn get(&self, class: ControlClass) -> Mode {
        match class {
            ControlClass::Drumpads => self.drumpads,
            ControlClass::Knobs => self.knobs,
            ControlClass::Sliders => self.sliders,
        }
    }

    fn slot(&mut self, class: ControlClass) -> &mut Mode {
        match class {
            ControlClass::Drumpads => &mut self.drumpads,
            ControlClass::Knobs => &mut self.knobs,
            ControlClass::Sliders => &mut self.sliders,
        }
    }

    /// Apply a message received on the incontrol port.
    ///
    /// Messages that are not mode notes are ignored.
    pub fn apply_incontrol(&mut self, msg: &RawMessage) -> Option<ModeChanged> {
        if msg.kind != MessageKind::NoteOn || msg.channel != INCONTROL_CHANNEL {
            return None;
        }

        let mode = Mode::from_velocity(msg.value);

        if msg.number == MODE_NOTE {
            self.mode = mode;
            self.drumpads = mode;
            self.knobs = mode;
            self.sliders = mode;
            return Some(ModeChanged::Device(mode));
        }

        let (_, class) = SUBMODE_NOTES
            .iter()
            .find(|(note, _)| *note == msg.number)?;
        *self.slot(*class) = mode;
        Some(ModeChanged::Submode(*class, mode))
    }
}

impl std::fmt::Display for ModeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "mode: {}, submodes: drumpads={} knobs={} sliders={}",
            self.mode, self.drumpads, self.knobs, self.sliders
        )
    }
}
