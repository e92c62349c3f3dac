use super::message::{MessageKind, RawMessage};
use super::mode::{ControlClass, Mode, ModeState};
use super::tables::{self, DRUMPADS_EXTENDED, KNOBS, SLIDERS, SLIDER_BUTTONS, TRANSPORT};

/// The two physical MIDI streams a Launchkey exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortId {
    /// Keyboard and performance data.
    Main,
    /// Mode handshake and LED control.
    InControl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonState {
    Up,
    Down,
}

impl From<u8> for ButtonState {
    fn from(value: u8) -> Self {
        if value == 0 {
            ButtonState::Up
        } else {
            ButtonState::Down
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportButton {
    Rev,
    Fwd,
    Stop,
    Play,
    Loop,
    Rec,
    TrackDown,
    TrackUp,
}

impl TransportButton {
    /// In address table order.
    pub const ALL: [TransportButton; 8] = [
        TransportButton::Rev,
        TransportButton::Fwd,
        TransportButton::Stop,
        TransportButton::Play,
        TransportButton::Loop,
        TransportButton::Rec,
        TransportButton::TrackDown,
        TransportButton::TrackUp,
    ];

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn control(self) -> u8 {
        TRANSPORT[self.index()]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransportButton::Rev => "rev",
            TransportButton::Fwd => "fwd",
            TransportButton::Stop => "stop",
            TransportButton::Play => "play",
            TransportButton::Loop => "loop",
            TransportButton::Rec => "rec",
            TransportButton::TrackDown => "trackdown",
            TransportButton::TrackUp => "trackup",
        }
    }
}

/// Subscription key for layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Keyboard,
    Drumpads,
    Knobs,
    Sliders,
    SliderButtons,
    Transport,
}

impl EventCategory {
    pub const COUNT: usize = 6;

    pub const ALL: [EventCategory; Self::COUNT] = [
        EventCategory::Keyboard,
        EventCategory::Drumpads,
        EventCategory::Knobs,
        EventCategory::Sliders,
        EventCategory::SliderButtons,
        EventCategory::Transport,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventCategory::Keyboard => "keyboard",
            EventCategory::Drumpads => "drumpads",
            EventCategory::Knobs => "knobs",
            EventCategory::Sliders => "sliders",
            EventCategory::SliderButtons => "slider_buttons",
            EventCategory::Transport => "transport",
        }
    }
}

/// A decoded control-surface event.
///
/// Every variant carries the message it was decoded from. Drumpad messages
/// are always in the extended note shape regardless of submode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticEvent {
    Keyboard(RawMessage),
    Drumpad(usize, RawMessage),
    Knob(usize, u8, RawMessage),
    Slider(usize, u8, RawMessage),
    SliderButton(usize, ButtonState, RawMessage),
    Transport(TransportButton, ButtonState, RawMessage),
}

impl SemanticEvent {
    pub fn category(&self) -> EventCategory {
        match self {
            SemanticEvent::Keyboard(_) => EventCategory::Keyboard,
            SemanticEvent::Drumpad(..) => EventCategory::Drumpads,
            SemanticEvent::Knob(..) => EventCategory::Knobs,
            SemanticEvent::Slider(..) => EventCategory::Sliders,
            SemanticEvent::SliderButton(..) => EventCategory::SliderButtons,
            SemanticEvent::Transport(..) => EventCategory::Transport,
        }
    }

    pub fn message(&self) -> &RawMessage {
        match self {
            SemanticEvent::Keyboard(msg)
            | SemanticEvent::Drumpad(_, msg)
            | SemanticEvent::Knob(_, _, msg)
            | SemanticEvent::Slider(_, _, msg)
            | SemanticEvent::SliderButton(_, _, msg)
            | SemanticEvent::Transport(_, _, msg) => msg,
        }
    }
}

/// Decode a message received on `port` against the current mode state.
///
/// Incontrol traffic never yields an event. On the main port the control
/// classes are tried in priority order and anything unmatched falls back to
/// [`SemanticEvent::Keyboard`].
pub fn decode(port: PortId, msg: &RawMessage, modes: &ModeState) -> Option<SemanticEvent> {
    if port == PortId::InControl {
        return None;
    }

    let event = decode_drumpad(msg, modes.get(ControlClass::Drumpads))
        .or_else(|| decode_knob(msg))
        .or_else(|| decode_slider(msg))
        .or_else(|| decode_transport(msg))
        .unwrap_or(SemanticEvent::Keyboard(*msg));
    Some(event)
}

fn decode_drumpad(msg: &RawMessage, submode: Mode) -> Option<SemanticEvent> {
    let table = tables::drumpads(submode);

    if submode == Mode::Basic && msg.kind == MessageKind::ControlChange && msg.channel == 0 {
        if let Some(idx) = tables::index_of(table, msg.number) {
            let kind = if msg.value == 127 {
                MessageKind::NoteOn
            } else {
                MessageKind::NoteOff
            };
            let normalized = RawMessage::new(kind, 15, DRUMPADS_EXTENDED[idx], msg.value);
            return Some(SemanticEvent::Drumpad(idx, normalized));
        }
    }

    if !msg.is_note() || msg.channel != tables::drumpad_channel(submode) {
        return None;
    }
    tables::index_of(table, msg.number).map(|idx| SemanticEvent::Drumpad(idx, *msg))
}

fn decode_knob(msg: &RawMessage) -> Option<SemanticEvent> {
    if msg.kind != MessageKind::ControlChange {
        return None;
    }
    tables::index_of(&KNOBS, msg.number).map(|idx| SemanticEvent::Knob(idx, msg.value, *msg))
}

fn decode_slider(msg: &RawMessage) -> Option<SemanticEvent> {
    if msg.kind != MessageKind::ControlChange {
        return None;
    }
    if let Some(idx) = tables::index_of(&SLIDERS, msg.number) {
        return Some(SemanticEvent::Slider(idx, msg.value, *msg));
    }
    tables::index_of(&SLIDER_BUTTONS, msg.number)
        .map(|idx| SemanticEvent::SliderButton(idx, ButtonState::from(msg.value), *msg))
}

fn decode_transport(msg: &RawMessage) -> Option<SemanticEvent> {
    if msg.kind != MessageKind::ControlChange {
        return None;
    }
    let idx = tables::index_of(&TRANSPORT, msg.number)?;
    let button = TransportButton::from_index(idx)?;
    Some(SemanticEvent::Transport(
        button,
        ButtonState::from(msg.value),
        *msg,
    ))
}
