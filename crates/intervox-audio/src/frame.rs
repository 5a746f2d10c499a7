/// One tick's worth of captured audio.
///
/// Samples are normalized floats in [-1.0, 1.0]. The frame is owned by the
/// tick driver for the duration of one tick and handed in by value; nothing
/// downstream holds onto it past feature extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioFrame {
    pub samples: Vec<f32>,
    /// Milliseconds since capture started, as stamped by the driver.
    pub timestamp_ms: u64,
}

impl AudioFrame {
    pub fn new(samples: Vec<f32>, timestamp_ms: u64) -> Self {
        Self {
            samples,
            timestamp_ms,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
