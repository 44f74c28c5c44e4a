use crate::FRAME_WORDS;

/// Hardware side of the audio frame exchange.
///
/// Only called from the transmit-request handler, i.e. inside the guarded
/// section. Samples are signed with 24 significant bits.
pub trait AudioTransport {
    /// The two newest input samples.
    fn pull_input_frame(&mut self) -> [i32; FRAME_WORDS];

    /// Queue the two output samples.
    fn push_output_frame(&mut self, frame: [i32; FRAME_WORDS]);

    /// Acknowledge the request so the hardware can raise the next one.
    fn clear_status(&mut self) {}
}

impl<T: AudioTransport + ?Sized> AudioTransport for &mut T {
    fn pull_input_frame(&mut self) -> [i32; FRAME_WORDS] {
        (**self).pull_input_frame()
    }

    fn push_output_frame(&mut self, frame: [i32; FRAME_WORDS]) {
        (**self).push_output_frame(frame)
    }

    fn clear_status(&mut self) {
        (**self).clear_status()
    }
}
