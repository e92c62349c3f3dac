//! Fixed Launchkey MK2 address tables.
//!
//! Each table maps a logical control index (its position) to the raw note or
//! controller number the device uses for it.

use super::mode::{ControlClass, Mode};

pub const DRUMPAD_COUNT: usize = 18;

/// The last two drumpad slots are legacy addresses that need a control change
/// alongside the note when lit in basic mode.
pub const DRUMPAD_LEGACY_SLOTS: [usize; 2] = [16, 17];

pub const DRUMPADS_BASIC: [u8; DRUMPAD_COUNT] = [
    40, 41, 42, 43, 48, 49, 50, 51, //
    36, 37, 38, 39, 44, 45, 46, 47, //
    104, 105,
];

pub const DRUMPADS_EXTENDED: [u8; DRUMPAD_COUNT] = [
    96, 97, 98, 99, 100, 101, 102, 103, //
    112, 113, 114, 115, 116, 117, 118, 119, //
    104, 120,
];

pub const KNOBS: [u8; 8] = [21, 22, 23, 24, 25, 26, 27, 28];

// Eight channel faders, then the master fader.
pub const SLIDERS: [u8; 9] = [41, 42, 43, 44, 45, 46, 47, 48, 7];

pub const SLIDER_BUTTONS: [u8; 9] = [51, 52, 53, 54, 55, 56, 57, 58, 59];

pub const TRANSPORT: [u8; 8] = [112, 113, 114, 115, 116, 117, 102, 103];

pub const INCONTROL_CHANNEL: u8 = 15;
pub const MODE_NOTE: u8 = 12;
pub const SUBMODE_NOTES: [(u8, ControlClass); 3] = [
    (13, ControlClass::Knobs),
    (14, ControlClass::Sliders),
    (15, ControlClass::Drumpads),
];

pub const MUTE_LED_CONTROL: u8 = 59;

pub fn drumpads(mode: Mode) -> &'static [u8; DRUMPAD_COUNT] {
    match mode {
        Mode::Basic => &DRUMPADS_BASIC,
        Mode::Extended => &DRUMPADS_EXTENDED,
    }
}

pub fn drumpad_channel(mode: Mode) -> u8 {
    match mode {
        Mode::Basic => 9,
        Mode::Extended => 15,
    }
}

/// Position of `number` within `table`, if present.
pub fn index_of(table: &[u8], number: u8) -> Option<usize> {
    table.iter().position(|&n| n == number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_bijective(table: &[u8]) {
        let unique: HashSet<_> = table.iter().collect();
        assert_eq!(unique.len(), table.len(), "duplicate entry in {table:?}");
        for (idx, &number) in table.iter().enumerate() {
            assert_eq!(index_of(table, number), Some(idx));
        }
    }

    #[test]
    fn tables_are_bijective() {
        assert_bijective(&DRUMPADS_BASIC);
        assert_bijective(&DRUMPADS_EXTENDED);
        assert_bijective(&KNOBS);
        assert_bijective(&SLIDERS);
        assert_bijective(&SLIDER_BUTTONS);
        assert_bijective(&TRANSPORT);
    }

    #[test]
    fn mute_led_is_master_slider_button() {
        assert_eq!(SLIDER_BUTTONS.last(), Some(&MUTE_LED_CONTROL));
    }
}
