/// State changes the synth understands, already filtered to its channel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SynthMessage {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8, velocity: u8 },
    /// Raw 7-bit halves of the 14-bit bend value.
    PitchBend { lsb: u8, msb: u8 },
    AllNotesOff,
}
