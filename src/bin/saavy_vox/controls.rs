//! Everything that is not audio: the button, the keyboard, a stand-in MIDI source.

use std::{
    io::BufRead,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use color_eyre::eyre::Result as EyreResult;
use rtrb::Producer;
use saavy_vox::{engine::button::ButtonInput, io::MidiEvent};
use tracing::warn;

/// Debounce timer period.
const BUTTON_TICK: Duration = Duration::from_millis(1);
/// How long one Enter keypress holds the button down. Must outlast the debounce.
const PRESS_HOLD: Duration = Duration::from_millis(30);

const ARP_STEP: Duration = Duration::from_millis(180);
const ARP_VELOCITY: u8 = 100;
/// A minor, walking up and back down.
const ARP_NOTES: [u8; 8] = [45, 52, 57, 60, 64, 60, 57, 52];

/// 1 kHz timer interrupt feeding the debouncer the raw pin level.
pub fn spawn_button_timer(
    button: Arc<ButtonInput>,
    held: Arc<AtomicBool>,
    stop: Arc<AtomicBool>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            button.on_timer_tick(held.load(Ordering::Relaxed));
            thread::sleep(BUTTON_TICK);
        }
    })
}

/// Plays a looping arpeggio into the MIDI ring, one note at a time.
pub fn spawn_arpeggiator(
    mut midi: Producer<MidiEvent>,
    channel: u8,
    stop: Arc<AtomicBool>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        for &key in ARP_NOTES.iter().cycle() {
            if stop.load(Ordering::Relaxed) {
                break;
            }
            send(&mut midi, MidiEvent::NoteOn { channel, key, velocity: ARP_VELOCITY });
            thread::sleep(ARP_STEP);
            send(&mut midi, MidiEvent::NoteOff { channel, key, velocity: 0 });
        }
    })
}

fn send(midi: &mut Producer<MidiEvent>, event: MidiEvent) {
    if midi.push(event).is_err() {
        warn!(?event, "midi ring full, event dropped");
    }
}

/// Block on stdin: each line presses the button, `q` (or EOF) returns.
pub fn read_stdin(held: &AtomicBool) -> EyreResult<()> {
    for line in std::io::stdin().lock().lines() {
        if line?.trim() == "q" {
            break;
        }
        held.store(true, Ordering::Relaxed);
        thread::sleep(PRESS_HOLD);
        held.store(false, Ordering::Relaxed);
    }
    Ok(())
}
