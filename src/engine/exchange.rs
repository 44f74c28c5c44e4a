use crate::{
    engine::{irq::IrqGuarded, transport::AudioTransport},
    FRAME_WORDS,
};

/// Everything the transmit interrupt shares with the main loop.
#[derive(Debug, Default)]
struct AudioShared {
    rx: [i32; FRAME_WORDS],
    tx: [i32; FRAME_WORDS],
    frame_ready: bool,
    overruns: u64,
}

/// Double-buffered frame handoff between the audio interrupt and the main loop.
///
/// The interrupt side only moves samples between the transport and its own
/// buffers and raises `frame_ready`. The main loop copies the buffers out and
/// back in under the mask, runs the pipeline unmasked, then clears the flag.
///
/// If the main loop falls behind, the interrupt overwrites the pending input
/// instead of queueing it: the freshest frame wins and the dropped one is
/// counted in [`FrameExchange::overruns`].
#[derive(Debug, Default)]
pub struct FrameExchange {
    shared: IrqGuarded<AudioShared>,
}

impl FrameExchange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transmit-FIFO-watermark handler. O(1): no DSP happens here.
    pub fn on_transmit_request<T: AudioTransport + ?Sized>(&self, transport: &mut T) {
        self.shared.in_handler(|shared| {
            shared.rx = transport.pull_input_frame();
            transport.push_output_frame(shared.tx);
            transport.clear_status();
            if shared.frame_ready {
                shared.overruns += 1;
            }
            shared.frame_ready = true;
        });
    }

    pub fn frame_ready(&self) -> bool {
        self.shared.masked(|shared| shared.frame_ready)
    }

    /// Copy the latest input frame into main-loop storage.
    pub fn read_input(&self) -> [i32; FRAME_WORDS] {
        self.shared.masked(|shared| shared.rx)
    }

    /// Queue a frame for the next interrupt to transmit.
    pub fn write_output(&self, frame: [i32; FRAME_WORDS]) {
        self.shared.masked(|shared| shared.tx = frame);
    }

    pub fn clear_frame_ready(&self) {
        self.shared.masked(|shared| shared.frame_ready = false);
    }

    /// Frames the interrupt delivered while the previous one was unprocessed.
    pub fn overruns(&self) -> u64 {
        self.shared.masked(|shared| shared.overruns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeSai {
        next_input: [i32; FRAME_WORDS],
        sent: Vec<[i32; FRAME_WORDS]>,
        acks: usize,
    }

    impl AudioTransport for FakeSai {
        fn pull_input_frame(&mut self) -> [i32; FRAME_WORDS] {
            self.next_input
        }

        fn push_output_frame(&mut self, frame: [i32; FRAME_WORDS]) {
            self.sent.push(frame);
        }

        fn clear_status(&mut self) {
            self.acks += 1;
        }
    }

    #[test]
    fn interrupt_raises_flag_and_moves_samples() {
        let exchange = FrameExchange::new();
        let mut sai = FakeSai {
            next_input: [11, 22],
            ..FakeSai::default()
        };
        assert!(!exchange.frame_ready());

        exchange.on_transmit_request(&mut sai);
        assert!(exchange.frame_ready());
        assert_eq!(exchange.read_input(), [11, 22]);
        assert_eq!(sai.sent, vec![[0, 0]]);
        assert_eq!(sai.acks, 1);
    }

    #[test]
    fn output_goes_out_on_next_interrupt() {
        let exchange = FrameExchange::new();
        let mut sai = FakeSai::default();

        exchange.on_transmit_request(&mut sai);
        exchange.write_output([5, 5]);
        exchange.clear_frame_ready();
        exchange.on_transmit_request(&mut sai);

        assert_eq!(sai.sent, vec![[0, 0], [5, 5]]);
        assert_eq!(exchange.overruns(), 0);
    }

    #[test]
    fn unconsumed_frames_are_overwritten_and_counted() {
        let exchange = FrameExchange::new();
        let mut sai = FakeSai::default();

        sai.next_input = [1, 1];
        exchange.on_transmit_request(&mut sai);
        sai.next_input = [2, 2];
        exchange.on_transmit_request(&mut sai);

        assert_eq!(exchange.read_input(), [2, 2]);
        assert_eq!(exchange.overruns(), 1);
    }
}
