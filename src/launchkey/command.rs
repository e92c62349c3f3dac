use crate::error::{Error, Result};

use super::message::RawMessage;
use super::mode::{ControlClass, Mode, ModeState};
use super::tables::{
    self, DRUMPAD_LEGACY_SLOTS, INCONTROL_CHANNEL, MODE_NOTE, MUTE_LED_CONTROL,
};

const LED_CHANNEL_FLASH: u8 = 1;
const LED_CHANNEL_PULSE: u8 = 2;

/// How a drumpad LED should be lit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrumpadLed {
    pub color: u8,
    pub flash_color: Option<u8>,
    pub pulsing: bool,
}

impl DrumpadLed {
    pub fn solid(color: u8) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn flashing(color: u8, flash_color: u8) -> Self {
        Self {
            color,
            flash_color: Some(flash_color),
            pulsing: false,
        }
    }

    pub fn pulsing(color: u8) -> Self {
        Self {
            color,
            flash_color: None,
            pulsing: true,
        }
    }
}

pub fn set_mode(mode: Mode) -> RawMessage {
    RawMessage::note_on(INCONTROL_CHANNEL, MODE_NOTE, mode.velocity())
}

pub fn reset_drumpad_leds() -> RawMessage {
    RawMessage::control_change(0, 0, 0)
}

pub fn mute_led(on: bool) -> RawMessage {
    RawMessage::control_change(INCONTROL_CHANNEL, MUTE_LED_CONTROL, if on { 127 } else { 0 })
}

/// Messages that light drumpad `index`, addressed for the current drumpad
/// submode.
pub fn drumpad_led(index: usize, led: DrumpadLed, modes: &ModeState) -> Result<Vec<RawMessage>> {
    if led.pulsing && led.flash_color.is_some() {
        return Err(Error::InvalidCommand(
            "a drumpad LED cannot both pulse and flash".into(),
        ));
    }

    let submode = modes.get(ControlClass::Drumpads);
    let number = *tables::drumpads(submode).get(index).ok_or_else(|| {
        Error::InvalidCommand(format!("drumpad index {index} is out of range"))
    })?;
    let legacy = submode == Mode::Basic && DRUMPAD_LEGACY_SLOTS.contains(&index);

    let mut out = Vec::with_capacity(4);
    let mut push = |channel: u8, value: u8| {
        if legacy {
            out.push(RawMessage::control_change(channel, number, value));
        }
        out.push(RawMessage::note_on(channel, number, value));
    };

    if led.pulsing {
        push(LED_CHANNEL_PULSE, led.color);
    } else {
        push(INCONTROL_CHANNEL, led.color);
        if let Some(flash) = led.flash_color {
            push(LED_CHANNEL_FLASH, flash);
        }
    }

    Ok(out)
}
