use crate::{
    io::midi::MidiEvent,
    synth::{message::SynthMessage, poly::WavetableSynth},
};

/// Largest magnitude representable in a signed 24-bit sample.
pub const S24_MAX: i32 = 0x7F_FFFF;
pub const S24_MIN: i32 = -0x80_0000;

/// Translate a MIDI event into a synth message if it is on `channel_filter`
/// and is a kind the synth reacts to.
pub fn midi_to_synth(midi: MidiEvent, channel_filter: u8) -> Option<SynthMessage> {
    match midi {
        MidiEvent::NoteOn {
            channel,
            key,
            velocity,
        } if channel == channel_filter => Some(SynthMessage::NoteOn {
            note: key,
            velocity,
        }),
        MidiEvent::NoteOff {
            channel,
            key,
            velocity,
        } if channel == channel_filter => Some(SynthMessage::NoteOff {
            note: key,
            velocity,
        }),
        MidiEvent::PitchBend { channel, lsb, msb } if channel == channel_filter => {
            Some(SynthMessage::PitchBend { lsb, msb })
        }
        _ => None,
    }
}

/// Apply a MIDI event to the synth listening on its channel.
///
/// Returns `true` when the event changed synth state. Events for other
/// channels and kinds the synth ignores are accepted silently.
pub fn route_midi(synth: &mut WavetableSynth, event: MidiEvent) -> bool {
    match midi_to_synth(event, synth.midi_channel()) {
        Some(message) => {
            synth.handle_message(message);
            true
        }
        None => false,
    }
}

/// Saturate a value to the signed 24-bit range.
#[inline]
pub fn saturate_s24(value: i32) -> i32 {
    value.clamp(S24_MIN, S24_MAX)
}

/// Left-justified 32-bit FIFO word to a 24-bit sample (sign-preserving).
#[inline]
pub fn fifo_word_to_s24(word: i32) -> i32 {
    word / 256
}

/// 24-bit sample to a left-justified 32-bit FIFO word.
#[inline]
pub fn s24_to_fifo_word(sample: i32) -> i32 {
    saturate_s24(sample) << 8
}

/// Normalised float (-1.0..=1.0) to a 24-bit sample.
#[inline]
pub fn f32_to_s24(sample: f32) -> i32 {
    saturate_s24((sample * S24_MAX as f32) as i32)
}

/// 24-bit sample to a normalised float.
#[inline]
pub fn s24_to_f32(sample: i32) -> f32 {
    saturate_s24(sample) as f32 / S24_MAX as f32
}
