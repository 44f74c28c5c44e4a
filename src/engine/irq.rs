use std::sync::{Mutex, MutexGuard, PoisonError};

/// State shared between one interrupt source and the main loop.
///
/// On the board the main loop masks the one interrupt that touches the state
/// while it copies in or out. Hosted, the same scope is a mutex: whichever
/// side holds it, the other waits for the (short) copy to finish. Each
/// interrupt source gets its own `IrqGuarded`, so there is no global lock.
#[derive(Debug, Default)]
pub struct IrqGuarded<T> {
    state: Mutex<T>,
}

impl<T> IrqGuarded<T> {
    pub const fn new(state: T) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Main-loop access with the interrupt source masked for the duration of `f`.
    #[inline]
    pub fn masked<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.lock())
    }

    /// Access from inside the interrupt handler.
    #[inline]
    pub fn in_handler<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.lock())
    }

    // A panic while holding the guard leaves plain-old-data behind; keep going.
    fn lock(&self) -> MutexGuard<'_, T> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
