#[cfg(feature = "rtrb")]
use rtrb::Consumer;

/// USB-MIDI code index number: the low nibble of a packet's first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeIndex {
    Misc,
    CableEvent,
    TwoByteCommon,
    ThreeByteCommon,
    SysExStartContinue,
    SingleByteCommon,
    SysExEndsTwoBytes,
    SysExEndsThreeBytes,
    NoteOff,
    NoteOn,
    PolyKeypress,
    ControlChange,
    ProgramChange,
    ChannelPressure,
    PitchBend,
    SingleByte,
}

impl CodeIndex {
    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0x0F {
            0x0 => CodeIndex::Misc,
            0x1 => CodeIndex::CableEvent,
            0x2 => CodeIndex::TwoByteCommon,
            0x3 => CodeIndex::ThreeByteCommon,
            0x4 => CodeIndex::SysExStartContinue,
            0x5 => CodeIndex::SingleByteCommon,
            0x6 => CodeIndex::SysExEndsTwoBytes,
            0x7 => CodeIndex::SysExEndsThreeBytes,
            0x8 => CodeIndex::NoteOff,
            0x9 => CodeIndex::NoteOn,
            0xA => CodeIndex::PolyKeypress,
            0xB => CodeIndex::ControlChange,
            0xC => CodeIndex::ProgramChange,
            0xD => CodeIndex::ChannelPressure,
            0xE => CodeIndex::PitchBend,
            _ => CodeIndex::SingleByte,
        }
    }
}

/// One 4-byte USB-MIDI event packet as delivered by the class driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UsbMidiPacket {
    /// Cable number (high nibble) and code index number (low nibble).
    pub header: u8,
    pub midi: [u8; 3],
}

impl UsbMidiPacket {
    pub fn new(header: u8, midi0: u8, midi1: u8, midi2: u8) -> Self {
        Self {
            header,
            midi: [midi0, midi1, midi2],
        }
    }

    pub fn cable(&self) -> u8 {
        self.header >> 4
    }

    pub fn code_index(&self) -> CodeIndex {
        CodeIndex::from_nibble(self.header)
    }

    /// Zero-based MIDI channel from the status byte.
    pub fn channel(&self) -> u8 {
        self.midi[0] & 0x0F
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    PolyKeypress { channel: u8, key: u8, pressure: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    ProgramChange { channel: u8, program: u8 },
    ChannelPressure { channel: u8, pressure: u8 },
    PitchBend { channel: u8, lsb: u8, msb: u8 },
    /// Anything else (system, sysex, cable events). Carried, never acted on.
    Other { channel: u8, kind: CodeIndex, data: [u8; 2] },
}

impl MidiEvent {
    /// Decode a USB-MIDI packet; the code index selects the event kind.
    pub fn from_packet(packet: UsbMidiPacket) -> Self {
        Self::decode(packet.code_index(), packet.channel(), packet.midi[1], packet.midi[2])
    }

    /// Decode a plain MIDI channel message (status byte plus two data bytes).
    pub fn from_bytes(status: u8, data1: u8, data2: u8) -> Self {
        Self::decode(CodeIndex::from_nibble(status >> 4), status & 0x0F, data1, data2)
    }

    fn decode(kind: CodeIndex, channel: u8, data1: u8, data2: u8) -> Self {
        match kind {
            CodeIndex::NoteOff => MidiEvent::NoteOff {
                channel,
                key: data1,
                velocity: data2,
            },
            CodeIndex::NoteOn => MidiEvent::NoteOn {
                channel,
                key: data1,
                velocity: data2,
            },
            CodeIndex::PolyKeypress => MidiEvent::PolyKeypress {
                channel,
                key: data1,
                pressure: data2,
            },
            CodeIndex::ControlChange => MidiEvent::ControlChange {
                channel,
                controller: data1,
                value: data2,
            },
            CodeIndex::ProgramChange => MidiEvent::ProgramChange {
                channel,
                program: data1,
            },
            CodeIndex::ChannelPressure => MidiEvent::ChannelPressure {
                channel,
                pressure: data1,
            },
            CodeIndex::PitchBend => MidiEvent::PitchBend {
                channel,
                lsb: data1,
                msb: data2,
            },
            kind => MidiEvent::Other {
                channel,
                kind,
                data: [data1, data2],
            },
        }
    }

    pub fn channel(&self) -> u8 {
        match *self {
            MidiEvent::NoteOn { channel, .. }
            | MidiEvent::NoteOff { channel, .. }
            | MidiEvent::PolyKeypress { channel, .. }
            | MidiEvent::ControlChange { channel, .. }
            | MidiEvent::ProgramChange { channel, .. }
            | MidiEvent::ChannelPressure { channel, .. }
            | MidiEvent::PitchBend { channel, .. }
            | MidiEvent::Other { channel, .. } => channel,
        }
    }
}

/// Source of pending MIDI events. Each call hands over at most one event;
/// a consumed event is never replayed.
pub trait MidiReceiver {
    fn pop(&mut self) -> Option<MidiEvent>;
}

#[cfg(feature = "rtrb")]
impl MidiReceiver for Consumer<MidiEvent> {
    fn pop(&mut self) -> Option<MidiEvent> {
        Consumer::pop(self).ok()
    }
}

/// Single-slot mailbox: a new event overwrites one that was never taken.
impl MidiReceiver for Option<MidiEvent> {
    fn pop(&mut self) -> Option<MidiEvent> {
        self.take()
    }
}
