/// Audio frames per decimated analysis step.
pub const DOWNSAMPLE_RATE: usize = 6;

/// Which of the decimated stages runs on a given frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleStage {
    /// Run the analysis band-passes on the antialiased voice.
    Analysis,
    /// Run the envelope followers on the previous frame's analysis magnitudes.
    Envelope,
    /// Nothing decimated this frame; only the full-rate stages run.
    Idle,
}

/// Counter cycling `0..DOWNSAMPLE_RATE`, one step per frame.
///
/// Analysis and envelope work land on consecutive frames so no single
/// frame pays for both.
#[derive(Debug, Clone, Default)]
pub struct DownsampleSchedule {
    counter: usize,
}

impl DownsampleSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self) -> usize {
        self.counter
    }

    pub fn stage(&self) -> ScheduleStage {
        match self.counter {
            0 => ScheduleStage::Analysis,
            1 => ScheduleStage::Envelope,
            _ => ScheduleStage::Idle,
        }
    }

    /// Stage for the current frame, then step to the next frame.
    pub fn tick(&mut self) -> ScheduleStage {
        let stage = self.stage();
        self.counter = (self.counter + 1) % DOWNSAMPLE_RATE;
        stage
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }
}
