/// Channel-voice message kinds the Launchkey speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    NoteOn,
    NoteOff,
    ControlChange,
}

impl MessageKind {
    fn status_nibble(self) -> u8 {
        match self {
            MessageKind::NoteOff => 0x80,
            MessageKind::NoteOn => 0x90,
            MessageKind::ControlChange => 0xB0,
        }
    }
}

/// A single raw message as it travels on either Launchkey port.
///
/// `number` is the note for note messages and the controller for control
/// changes; `value` is the velocity or the controller value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawMessage {
    pub kind: MessageKind,
    pub channel: u8,
    pub number: u8,
    pub value: u8,
}

impl RawMessage {
    pub fn new(kind: MessageKind, channel: u8, number: u8, value: u8) -> Self {
        Self {
            kind,
            channel: channel & 0x0F,
            number: number & 0x7F,
            value: value & 0x7F,
        }
    }

    pub fn note_on(channel: u8, note: u8, velocity: u8) -> Self {
        Self::new(MessageKind::NoteOn, channel, note, velocity)
    }

    pub fn note_off(channel: u8, note: u8, velocity: u8) -> Self {
        Self::new(MessageKind::NoteOff, channel, note, velocity)
    }

    pub fn control_change(channel: u8, control: u8, value: u8) -> Self {
        Self::new(MessageKind::ControlChange, channel, control, value)
    }

    pub fn is_note(&self) -> bool {
        matches!(self.kind, MessageKind::NoteOn | MessageKind::NoteOff)
    }

    /// Parse a 3-byte channel-voice message. Anything else is not ours.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let [status, number, value] = *bytes else {
            return None;
        };
        let kind = match status & 0xF0 {
            0x80 => MessageKind::NoteOff,
            0x90 => MessageKind::NoteOn,
            0xB0 => MessageKind::ControlChange,
            _ => return None,
        };
        Some(Self::new(kind, status & 0x0F, number, value))
    }

    pub fn to_bytes(&self) -> [u8; 3] {
        [
            self.kind.status_nibble() | self.channel,
            self.number,
            self.value,
        ]
    }
}
