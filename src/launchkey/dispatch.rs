use tracing::{debug, warn};

use crate::error::Result;

use super::controller::ControlHandle;
use super::event::{EventCategory, SemanticEvent};
use super::mode::ModeChanged;

/// A behaviour module attached to the controller.
///
/// A layer owns its state, names the event categories it wants, and is
/// handed every event in those categories together with a handle it can use
/// to send commands back to the device.
pub trait Layer {
    fn name(&self) -> &str;

    fn categories(&self) -> &[EventCategory];

    fn handle(&mut self, event: &SemanticEvent, launchkey: &mut ControlHandle<'_>) -> Result<()>;

    /// Opt into mode change notifications. Queried once at registration.
    fn mode_listener(&mut self) -> Option<&mut dyn ModeListener> {
        None
    }
}

pub trait ModeListener {
    fn mode_changed(&mut self, change: ModeChanged, launchkey: &mut ControlHandle<'_>)
        -> Result<()>;
}

/// Per-category fan-out of events to layers, in registration order.
#[derive(Default)]
pub struct Dispatcher {
    layers: Vec<Box<dyn Layer>>,
    table: [Vec<usize>; EventCategory::COUNT],
    mode_listeners: Vec<usize>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, mut layer: Box<dyn Layer>) {
        let slot = self.layers.len();

        for category in layer.categories() {
            let handlers = &mut self.table[category.index()];
            if !handlers.contains(&slot) {
                handlers.push(slot);
            }
        }
        if layer.mode_listener().is_some() {
            self.mode_listeners.push(slot);
        }

        debug!(
            layer = layer.name(),
            categories = ?layer.categories(),
            "registered layer"
        );
        self.layers.push(layer);
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn handler_count(&self, category: EventCategory) -> usize {
        self.table[category.index()].len()
    }

    /// Run every handler subscribed to the event's category.
    ///
    /// A failing handler is logged and skipped; the rest still run.
    pub fn dispatch(&mut self, event: &SemanticEvent, launchkey: &mut ControlHandle<'_>) {
        let category = event.category();
        for &slot in &self.table[category.index()] {
            let layer = &mut self.layers[slot];
            if let Err(err) = layer.handle(event, launchkey) {
                warn!(
                    layer = layer.name(),
                    category = category.as_str(),
                    error = %err,
                    "layer handler failed"
                );
            }
        }
    }

    pub fn notify_mode(&mut self, change: ModeChanged, launchkey: &mut ControlHandle<'_>) {
        for &slot in &self.mode_listeners {
            let layer = &mut self.layers[slot];
            let name = layer.name().to_owned();
            let Some(listener) = layer.mode_listener() else {
                continue;
            };
            if let Err(err) = listener.mode_changed(change, launchkey) {
                warn!(layer = %name, error = %err, "mode listener failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::launchkey::event::ButtonState;
    use crate::launchkey::message::RawMessage;
    use crate::launchkey::mode::{Mode, ModeState};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        name: &'static str,
        categories: Vec<EventCategory>,
        fail: bool,
        log: Log,
    }

    impl Recorder {
        fn new(name: &'static str, categories: &[EventCategory], log: &Log) -> Box<Self> {
            Box::new(Self {
                name,
                categories: categories.to_vec(),
                fail: false,
                log: Rc::clone(log),
            })
        }

        fn failing(mut self: Box<Self>) -> Box<Self> {
            self.fail = true;
            self
        }
    }

    impl Layer for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        fn categories(&self) -> &[EventCategory] {
            &self.categories
        }

        fn handle(&mut self, event: &SemanticEvent, _: &mut ControlHandle<'_>) -> Result<()> {
            self.log
                .borrow_mut()
                .push(format!("{}:{}", self.name, event.category().as_str()));
            if self.fail {
                return Err(Error::InvalidCommand("boom".into()));
            }
            Ok(())
        }
    }

    struct Watcher {
        log: Log,
    }

    impl Layer for Watcher {
        fn name(&self) -> &str {
            "watcher"
        }

        fn categories(&self) -> &[EventCategory] {
            &[]
        }

        fn handle(&mut self, _: &SemanticEvent, _: &mut ControlHandle<'_>) -> Result<()> {
            Ok(())
        }

        fn mode_listener(&mut self) -> Option<&mut dyn ModeListener> {
            Some(self)
        }
    }

    impl ModeListener for Watcher {
        fn mode_changed(&mut self, change: ModeChanged, _: &mut ControlHandle<'_>) -> Result<()> {
            self.log.borrow_mut().push(format!("{change:?}"));
            Ok(())
        }
    }

    fn slider_event() -> SemanticEvent {
        let msg = RawMessage::control_change(15, 41, 64);
        SemanticEvent::Slider(0, 64, msg)
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let log = Log::default();
        let mut dispatcher = Dispatcher::new();
        dispatcher.register(Recorder::new("l1", &[EventCategory::Sliders], &log));
        dispatcher.register(Recorder::new("l2", &[EventCategory::Sliders], &log));

        let modes = ModeState::new();
        let mut sent: Vec<RawMessage> = Vec::new();
        let mut handle = ControlHandle::new(&modes, &mut sent);
        dispatcher.dispatch(&slider_event(), &mut handle);

        assert_eq!(*log.borrow(), vec!["l1:sliders", "l2:sliders"]);
    }

    #[test]
    fn failing_handler_does_not_stop_the_next() {
        let log = Log::default();
        let mut dispatcher = Dispatcher::new();
        dispatcher.register(Recorder::new("l1", &[EventCategory::Sliders], &log).failing());
        dispatcher.register(Recorder::new("l2", &[EventCategory::Sliders], &log));

        let modes = ModeState::new();
        let mut sent: Vec<RawMessage> = Vec::new();
        let mut handle = ControlHandle::new(&modes, &mut sent);
        dispatcher.dispatch(&slider_event(), &mut handle);
        dispatcher.dispatch(&slider_event(), &mut handle);

        assert_eq!(
            *log.borrow(),
            vec!["l1:sliders", "l2:sliders", "l1:sliders", "l2:sliders"]
        );
    }

    #[test]
    fn only_subscribed_categories_are_delivered() {
        let log = Log::default();
        let mut dispatcher = Dispatcher::new();
        dispatcher.register(Recorder::new("knobs", &[EventCategory::Knobs], &log));
        dispatcher.register(Recorder::new(
            "buttons",
            &[EventCategory::SliderButtons, EventCategory::Transport],
            &log,
        ));

        let modes = ModeState::new();
        let mut sent: Vec<RawMessage> = Vec::new();
        let mut handle = ControlHandle::new(&modes, &mut sent);
        let msg = RawMessage::control_change(0, 51, 127);
        dispatcher.dispatch(&slider_event(), &mut handle);
        dispatcher.dispatch(
            &SemanticEvent::SliderButton(0, ButtonState::Down, msg),
            &mut handle,
        );

        assert_eq!(*log.borrow(), vec!["buttons:slider_buttons"]);
        assert_eq!(dispatcher.handler_count(EventCategory::Knobs), 1);
        assert_eq!(dispatcher.handler_count(EventCategory::Keyboard), 0);
    }

    #[test]
    fn mode_listeners_are_resolved_at_registration() {
        let log = Log::default();
        let mut dispatcher = Dispatcher::new();
        dispatcher.register(Recorder::new("plain", &[EventCategory::Keyboard], &log));
        dispatcher.register(Box::new(Watcher {
            log: Rc::clone(&log),
        }));
        assert_eq!(dispatcher.mode_listeners, vec![1]);

        let modes = ModeState::new();
        let mut sent: Vec<RawMessage> = Vec::new();
        let mut handle = ControlHandle::new(&modes, &mut sent);
        dispatcher.notify_mode(ModeChanged::Device(Mode::Extended), &mut handle);

        assert_eq!(*log.borrow(), vec!["Device(Extended)"]);
    }
}
