mod command;
mod controller;
mod dispatch;
mod event;
mod message;
mod mode;
pub mod tables;

pub use command::{drumpad_led, mute_led, reset_drumpad_leds, set_mode, DrumpadLed};
pub use controller::{ControlHandle, Launchkey, OutputPort};
pub use dispatch::{Dispatcher, Layer, ModeListener};
pub use event::{decode, ButtonState, EventCategory, PortId, SemanticEvent, TransportButton};
pub use message::{MessageKind, RawMessage};
pub use mode::{ControlClass, Mode, ModeChanged, ModeState};
