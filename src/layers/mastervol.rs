use tracing::debug;

use crate::error::Result;
use crate::launchkey::{ButtonState, ControlHandle, EventCategory, Layer, SemanticEvent};

/// Index of the master fader and its button.
const MASTER: usize = 8;

/// Master volume on the ninth fader, mute toggle on its button.
#[derive(Debug, Clone)]
pub struct MasterVolLayer {
    muted: bool,
    volume: f32,
}

impl Default for MasterVolLayer {
    fn default() -> Self {
        Self {
            muted: false,
            volume: 1.0,
        }
    }
}

impl MasterVolLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }
}

impl Layer for MasterVolLayer {
    fn name(&self) -> &str {
        "mastervol"
    }

    fn categories(&self) -> &[EventCategory] {
        &[EventCategory::Sliders, EventCategory::SliderButtons]
    }

    fn handle(&mut self, event: &SemanticEvent, launchkey: &mut ControlHandle<'_>) -> Result<()> {
        match *event {
            SemanticEvent::SliderButton(MASTER, ButtonState::Up, _) => {
                self.muted = !self.muted;
                debug!(muted = self.muted, "master mute toggled");
                launchkey.set_mute_led(self.muted)
            }
            SemanticEvent::Slider(MASTER, value, _) => {
                self.volume = f32::from(value) / 127.0;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launchkey::{ModeState, RawMessage};

    fn feed(layer: &mut MasterVolLayer, event: SemanticEvent) -> Vec<RawMessage> {
        let modes = ModeState::new();
        let mut sent: Vec<RawMessage> = Vec::new();
        let mut handle = ControlHandle::new(&modes, &mut sent);
        layer.handle(&event, &mut handle).unwrap();
        sent
    }

    fn button(idx: usize, state: ButtonState) -> SemanticEvent {
        let msg = RawMessage::control_change(0, 51 + idx as u8, 0);
        SemanticEvent::SliderButton(idx, state, msg)
    }

    #[test]
    fn master_button_release_toggles_mute() {
        let mut layer = MasterVolLayer::new();

        assert!(feed(&mut layer, button(MASTER, ButtonState::Down)).is_empty());
        assert_eq!(
            feed(&mut layer, button(MASTER, ButtonState::Up)),
            vec![RawMessage::control_change(15, 59, 127)]
        );
        assert!(layer.muted());
        assert_eq!(
            feed(&mut layer, button(MASTER, ButtonState::Up)),
            vec![RawMessage::control_change(15, 59, 0)]
        );
        assert!(!layer.muted());
    }

    #[test]
    fn other_buttons_are_ignored() {
        let mut layer = MasterVolLayer::new();
        assert!(feed(&mut layer, button(0, ButtonState::Up)).is_empty());
        assert!(!layer.muted());
    }

    #[test]
    fn master_slider_sets_volume() {
        let mut layer = MasterVolLayer::new();
        let msg = RawMessage::control_change(0, 7, 0);
        feed(&mut layer, SemanticEvent::Slider(MASTER, 0, msg));
        assert_eq!(layer.volume(), 0.0);

        feed(&mut layer, SemanticEvent::Slider(3, 127, msg));
        assert_eq!(layer.volume(), 0.0);

        feed(&mut layer, SemanticEvent::Slider(MASTER, 127, msg));
        assert!((layer.volume() - 1.0).abs() < f32::EPSILON);
    }
}
