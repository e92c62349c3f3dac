//! Launchkey port discovery and `midir` connections.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::OnceLock;

use midir::{Ignore, MidiInput, MidiInputConnection, MidiOutput, MidiOutputConnection};
use regex::Regex;
use tracing::{debug, info, trace, warn};

use crate::error::{Error, Result};
use crate::launchkey::{OutputPort, PortId, RawMessage};

fn launchkey_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Launchkey( MK2)?").expect("valid regex"))
}

fn port_index_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"MIDI (\d+)").expect("valid regex"))
}

fn port_index(name: &str) -> Option<u32> {
    port_index_regex()
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Every Launchkey port name in `names`, lowest `MIDI <n>` index first.
///
/// Names without an index sort after indexed ones.
pub fn locate_all<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut found = Vec::new();
    for name in names {
        let name: &str = name.as_ref();
        if launchkey_regex().is_match(name) {
            found.push(name.to_owned());
        }
    }
    found.sort_by_key(|name| (port_index(name).is_none(), port_index(name)));
    found
}

/// The `(main, incontrol)` port names, if a Launchkey is present.
pub fn locate<S: AsRef<str>>(names: &[S]) -> Option<(String, String)> {
    let mut found = locate_all(names).into_iter();
    let main = found.next()?;
    let incontrol = found.next()?;
    Some((main, incontrol))
}

/// Names of every available `(input, output)` port.
pub fn list_ports(client_name: &str) -> Result<(Vec<String>, Vec<String>)> {
    let midi_in = MidiInput::new(client_name)?;
    let midi_out = MidiOutput::new(client_name)?;

    let inputs = midi_in
        .ports()
        .iter()
        .filter_map(|port| midi_in.port_name(port).ok())
        .collect();
    let outputs = midi_out
        .ports()
        .iter()
        .filter_map(|port| midi_out.port_name(port).ok())
        .collect();
    Ok((inputs, outputs))
}

/// An open output connection to one device port.
pub struct MidiOut {
    connection: MidiOutputConnection,
    port_name: String,
}

impl MidiOut {
    pub fn open(client_name: &str, port_name: &str) -> Result<Self> {
        let midi_out = MidiOutput::new(client_name)?;
        let port = midi_out
            .ports()
            .into_iter()
            .find(|port| midi_out.port_name(port).is_ok_and(|name| name == port_name))
            .ok_or_else(|| Error::MidiPort(format!("no output port named \"{port_name}\"")))?;

        let connection = midi_out.connect(&port, &format!("{client_name}-out"))?;
        debug!(port = port_name, "opened output");
        Ok(Self {
            connection,
            port_name: port_name.to_owned(),
        })
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

impl OutputPort for MidiOut {
    fn send(&mut self, msg: &RawMessage) -> Result<()> {
        trace!(port = %self.port_name, ?msg, "tx");
        self.connection.send(&msg.to_bytes())?;
        Ok(())
    }
}

fn connect_input(
    client_name: &str,
    port_name: &str,
    id: PortId,
    tx: Sender<(PortId, RawMessage)>,
) -> Result<MidiInputConnection<()>> {
    let mut midi_in = MidiInput::new(client_name)?;
    midi_in.ignore(Ignore::All);

    let port = midi_in
        .ports()
        .into_iter()
        .find(|port| midi_in.port_name(port).is_ok_and(|name| name == port_name))
        .ok_or_else(|| Error::MidiPort(format!("no input port named \"{port_name}\"")))?;

    let label = port_name.to_owned();
    let connection = midi_in.connect(
        &port,
        &format!("{client_name}-in"),
        move |_stamp, bytes, _| match RawMessage::from_bytes(bytes) {
            Some(msg) => {
                if tx.send((id, msg)).is_err() {
                    warn!(port = %label, "receiver gone, dropping message");
                }
            }
            None => trace!(port = %label, ?bytes, "ignoring message"),
        },
        (),
    )?;
    debug!(port = port_name, ?id, "opened input");
    Ok(connection)
}

/// Both Launchkey inputs plus the incontrol output.
///
/// Input callbacks run on `midir`'s threads and only forward into a single
/// channel, so messages from both ports are consumed in arrival order by
/// whoever drains [`LaunchkeyPorts::messages`].
pub struct LaunchkeyPorts {
    _main_in: MidiInputConnection<()>,
    _incontrol_in: MidiInputConnection<()>,
    rx: Receiver<(PortId, RawMessage)>,
}

impl LaunchkeyPorts {
    pub fn open(client_name: &str) -> Result<(Self, MidiOut)> {
        let (inputs, outputs) = list_ports(client_name)?;
        debug!(?inputs, ?outputs, "found MIDI ports");

        let (main, incontrol) =
            locate(inputs.as_slice()).ok_or_else(|| Error::PortUnavailable(inputs.clone()))?;
        let (_, incontrol_out) =
            locate(outputs.as_slice()).ok_or_else(|| Error::PortUnavailable(outputs.clone()))?;
        info!(%main, %incontrol, output = %incontrol_out, "found Launchkey ports");

        let (tx, rx) = mpsc::channel();
        let main_in = connect_input(client_name, &main, PortId::Main, tx.clone())?;
        let incontrol_in = connect_input(client_name, &incontrol, PortId::InControl, tx)?;
        let out = MidiOut::open(client_name, &incontrol_out)?;

        Ok((
            Self {
                _main_in: main_in,
                _incontrol_in: incontrol_in,
                rx,
            },
            out,
        ))
    }

    /// Blocking iterator over received messages; ends when both inputs close.
    pub fn messages(&self) -> impl Iterator<Item = (PortId, RawMessage)> + '_ {
        self.rx.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locates_main_and_incontrol() {
        let names = [
            "Launchkey MK2 MIDI 1",
            "Launchkey MK2 MIDI 2",
            "Other Device",
        ];
        assert_eq!(
            locate(&names),
            Some((
                "Launchkey MK2 MIDI 1".to_owned(),
                "Launchkey MK2 MIDI 2".to_owned()
            ))
        );
    }

    #[test]
    fn sorts_by_embedded_index() {
        let names = [
            "Launchkey 61 MIDI 2",
            "Synth",
            "Launchkey 61 MIDI 1",
        ];
        assert_eq!(
            locate(&names),
            Some((
                "Launchkey 61 MIDI 1".to_owned(),
                "Launchkey 61 MIDI 2".to_owned()
            ))
        );

        let names = ["Launchkey MIDI 10", "Launchkey MIDI 9", "Launchkey Misc"];
        assert_eq!(
            locate_all(&names),
            vec!["Launchkey MIDI 9", "Launchkey MIDI 10", "Launchkey Misc"]
        );
    }

    #[test]
    fn nothing_found() {
        assert_eq!(locate(&["Other Device", "Keystation"]), None);
        assert_eq!(locate::<&str>(&[]), None);
        // A lone match cannot provide both streams.
        assert_eq!(locate(&["Launchkey MK2 MIDI 1"]), None);
    }
}
