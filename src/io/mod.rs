// Purpose - external interfaces, format conversions

pub mod converter;
pub mod midi;

pub use converter::{midi_to_synth, route_midi};
pub use midi::{CodeIndex, MidiEvent, MidiReceiver, UsbMidiPacket};
