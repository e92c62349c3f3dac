use tracing::{debug, info};

use crate::error::Result;

use super::command::{self, DrumpadLed};
use super::dispatch::{Dispatcher, Layer};
use super::event::{self, PortId, SemanticEvent};
use super::message::RawMessage;
use super::mode::{Mode, ModeState};

/// Somewhere raw messages can be sent.
pub trait OutputPort {
    fn send(&mut self, msg: &RawMessage) -> Result<()>;
}

/// Records everything sent. Useful as a stand-in for the device.
impl OutputPort for Vec<RawMessage> {
    fn send(&mut self, msg: &RawMessage) -> Result<()> {
        self.push(*msg);
        Ok(())
    }
}

/// Command access handed to layers while they handle an event.
///
/// Mode state is read-only through the handle; commands are encoded against
/// it at call time and written straight to the incontrol port.
pub struct ControlHandle<'a> {
    modes: &'a ModeState,
    port: &'a mut dyn OutputPort,
}

impl<'a> ControlHandle<'a> {
    pub fn new(modes: &'a ModeState, port: &'a mut dyn OutputPort) -> Self {
        Self { modes, port }
    }

    pub fn modes(&self) -> &ModeState {
        self.modes
    }

    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        debug!(from = %self.modes.mode(), to = %mode, "sending mode switch");
        self.port.send(&command::set_mode(mode))
    }

    pub fn reset_drumpad_leds(&mut self) -> Result<()> {
        debug!("resetting drumpad LEDs");
        self.port.send(&command::reset_drumpad_leds())
    }

    pub fn set_mute_led(&mut self, on: bool) -> Result<()> {
        self.port.send(&command::mute_led(on))
    }

    pub fn set_drumpad_led(&mut self, index: usize, led: DrumpadLed) -> Result<()> {
        debug!(index, color = led.color, "setting drumpad LED");
        for msg in command::drumpad_led(index, led, self.modes)? {
            self.port.send(&msg)?;
        }
        Ok(())
    }
}

/// High-level interface for a Launchkey MK2.
///
/// Owns the mode state and the incontrol output, decodes every received
/// message and fans the resulting events out to the registered layers.
pub struct Launchkey<P: OutputPort> {
    modes: ModeState,
    incontrol: P,
    dispatcher: Dispatcher,
}

impl<P: OutputPort> Launchkey<P> {
    /// Force the device into basic mode and attach `layers` in order.
    pub fn new(incontrol: P, layers: impl IntoIterator<Item = Box<dyn Layer>>) -> Result<Self> {
        let mut dispatcher = Dispatcher::new();
        for layer in layers {
            dispatcher.register(layer);
        }

        let mut launchkey = Self {
            modes: ModeState::new(),
            incontrol,
            dispatcher,
        };
        launchkey.set_mode(Mode::Basic)?;
        info!(layers = launchkey.dispatcher.len(), "Launchkey ready");
        Ok(launchkey)
    }

    pub fn modes(&self) -> &ModeState {
        &self.modes
    }

    pub fn port(&self) -> &P {
        &self.incontrol
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.incontrol
    }

    /// Process one message from either port to completion.
    ///
    /// Returns the decoded event, if any, after every handler has run.
    pub fn receive(&mut self, port: PortId, msg: RawMessage) -> Option<SemanticEvent> {
        debug!(?port, ?msg, "rx");

        if port == PortId::InControl {
            if let Some(change) = self.modes.apply_incontrol(&msg) {
                info!(?change, state = %self.modes, "mode changed");
                let mut handle = ControlHandle::new(&self.modes, &mut self.incontrol);
                self.dispatcher.notify_mode(change, &mut handle);
            }
        }

        let event = event::decode(port, &msg, &self.modes)?;
        let mut handle = ControlHandle::new(&self.modes, &mut self.incontrol);
        self.dispatcher.dispatch(&event, &mut handle);
        Some(event)
    }

    fn handle(&mut self) -> ControlHandle<'_> {
        ControlHandle::new(&self.modes, &mut self.incontrol)
    }

    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        self.handle().set_mode(mode)
    }

    pub fn reset_drumpad_leds(&mut self) -> Result<()> {
        self.handle().reset_drumpad_leds()
    }

    pub fn set_mute_led(&mut self, on: bool) -> Result<()> {
        self.handle().set_mute_led(on)
    }

    pub fn set_drumpad_led(&mut self, index: usize, led: DrumpadLed) -> Result<()> {
        self.handle().set_drumpad_led(index, led)
    }
}
