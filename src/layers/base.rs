use tracing::{debug, info};

use crate::error::Result;
use crate::launchkey::tables::DRUMPAD_COUNT;
use crate::launchkey::{
    ControlHandle, DrumpadLed, EventCategory, Layer, MessageKind, Mode, ModeChanged,
    ModeListener, SemanticEvent,
};

const NOTE_BASIC: u8 = 48;
const NOTE_EXTENDED: u8 = 49;
const NOTE_LIGHT_PADS: u8 = 52;

/// Keyboard shortcuts for mode switching and a drumpad LED test pattern.
///
/// C3 requests basic mode, C#3 extended, E3 lights every pad.
#[derive(Debug, Default)]
pub struct BaseLayer {
    mode: Mode,
}

impl BaseLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn light_pads(&self, launchkey: &mut ControlHandle<'_>) -> Result<()> {
        for pad in 0..DRUMPAD_COUNT {
            let color = ((pad + 2) * 3) as u8;
            let flash = ((pad + 3) * 3) as u8;
            launchkey.set_drumpad_led(pad, DrumpadLed::flashing(color, flash))?;
        }
        Ok(())
    }
}

impl Layer for BaseLayer {
    fn name(&self) -> &str {
        "base"
    }

    fn categories(&self) -> &[EventCategory] {
        &[
            EventCategory::Keyboard,
            EventCategory::Drumpads,
            EventCategory::Knobs,
        ]
    }

    fn handle(&mut self, event: &SemanticEvent, launchkey: &mut ControlHandle<'_>) -> Result<()> {
        match event {
            SemanticEvent::Keyboard(msg) if msg.kind == MessageKind::NoteOn && msg.channel == 0 => {
                match msg.number {
                    NOTE_BASIC => launchkey.set_mode(Mode::Basic),
                    NOTE_EXTENDED => launchkey.set_mode(Mode::Extended),
                    NOTE_LIGHT_PADS => self.light_pads(launchkey),
                    _ => Ok(()),
                }
            }
            SemanticEvent::Drumpad(pad, msg) => {
                debug!(pad, kind = ?msg.kind, velocity = msg.value, "drumpad");
                Ok(())
            }
            SemanticEvent::Knob(knob, value, _) => {
                debug!(knob, value, "knob");
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn mode_listener(&mut self) -> Option<&mut dyn ModeListener> {
        Some(self)
    }
}

impl ModeListener for BaseLayer {
    fn mode_changed(&mut self, change: ModeChanged, launchkey: &mut ControlHandle<'_>) -> Result<()> {
        self.mode = launchkey.modes().mode();
        info!(?change, mode = %self.mode, "base layer saw mode change");
        Ok(())
    }
}
