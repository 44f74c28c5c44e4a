use crate::engine::irq::IrqGuarded;

/// Consecutive held samples required before the button reads as pressed.
pub const DEBOUNCE_TICKS: u32 = 10;

/// Counts consecutive "held" samples from a periodic timer.
#[derive(Debug, Clone)]
pub struct Debouncer {
    held_ticks: u32,
    pressed: bool,
    threshold: u32,
}

impl Debouncer {
    pub fn new(threshold: u32) -> Self {
        Self {
            held_ticks: 0,
            pressed: false,
            threshold,
        }
    }

    /// Feed one raw sample; returns the debounced state.
    pub fn sample(&mut self, held: bool) -> bool {
        self.held_ticks = if held {
            self.held_ticks.saturating_add(1)
        } else {
            0
        };
        self.pressed = self.held_ticks > self.threshold;
        self.pressed
    }

    pub fn pressed(&self) -> bool {
        self.pressed
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_TICKS)
    }
}

/// The function button, debounced from its own low-rate timer interrupt.
///
/// Level, not edge: the main loop samples [`ButtonInput::is_pressed`] and
/// does its own edge detection.
#[derive(Debug, Default)]
pub struct ButtonInput {
    state: IrqGuarded<Debouncer>,
}

impl ButtonInput {
    pub fn new(threshold: u32) -> Self {
        Self {
            state: IrqGuarded::new(Debouncer::new(threshold)),
        }
    }

    /// Timer interrupt handler: `held` is the raw pin level.
    pub fn on_timer_tick(&self, held: bool) {
        self.state.in_handler(|debouncer| {
            debouncer.sample(held);
        });
    }

    pub fn is_pressed(&self) -> bool {
        self.state.masked(|debouncer| debouncer.pressed())
    }
}
