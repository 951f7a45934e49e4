/// Rolling window of frame times (seconds). Pre-allocated, overwrite-oldest.
pub struct FrameHistory {
    buf: Vec<f64>,
    head: usize,
    len: usize,
}

/// Aggregates over the current window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub fps: f64,
}

impl FrameHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec![0.0; capacity.max(1)],
            head: 0,
            len: 0,
        }
    }

    pub fn push(&mut self, dt: f64) {
        let cap = self.buf.len();
        self.buf[self.head] = dt;
        self.head = (self.head + 1) % cap;
        self.len = (self.len + 1).min(cap);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let cap = self.buf.len();
        let start = if self.len < cap { 0 } else { self.head };
        (0..self.len).map(move |i| self.buf[(start + i) % cap])
    }

    pub fn stats(&self) -> Option<FrameStats> {
        if self.len == 0 {
            return None;
        }
        let (sum, min, max) = self
            .iter()
            .fold((0.0, f64::MAX, 0.0f64), |(s, lo, hi), t| (s + t, lo.min(t), hi.max(t)));
        let avg = sum / self.len as f64;
        Some(FrameStats {
            avg,
            min,
            max,
            fps: if avg > 0.0 { 1.0 / avg } else { 0.0 },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_and_keeps_newest() {
        let mut h = FrameHistory::new(3);
        assert!(h.stats().is_none());
        for t in [0.01, 0.02, 0.03, 0.04] {
            h.push(t);
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.iter().collect::<Vec<_>>(), vec![0.02, 0.03, 0.04]);

        let s = h.stats().unwrap();
        assert_eq!(s.min, 0.02);
        assert_eq!(s.max, 0.04);
        assert!((s.avg - 0.03).abs() < 1e-12);
    }
}
