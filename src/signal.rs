/// Sample-clock state shared by the live stream and the offline render.
pub struct Signal {
    pub sample_rate: usize,
    pub position: usize,
}

impl Signal {
    pub fn new(sample_rate: usize) -> Self {
        Signal {
            sample_rate,
            position: 0,
        }
    }

    /// Seconds elapsed since the clock was last reset.
    pub fn elapsed(&self) -> f32 {
        self.position as f32 / self.sample_rate as f32
    }

    pub fn advance(&mut self) {
        self.position += 1;
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }
}
