//! Tracks the largest column index ever seen nonzero in an incoming
//! coefficient vector, independent
//! of which rows have since been pivoted or eliminated.

#[derive(Default)]
pub struct LargestNonzeroTracker {
    max: Option<usize>,
}

impl LargestNonzeroTracker {
    pub fn new() -> Self {
        Self { max: None }
    }

    pub fn reset(&mut self) {
        self.max = None;
    }

    pub fn observe(&mut self, index: usize) {
        self.max = Some(self.max.map_or(index, |m| m.max(index)));
    }

    pub fn get(&self) -> Option<usize> {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_maximum_observed_index() {
        let mut t = LargestNonzeroTracker::new();
        assert_eq!(t.get(), None);
        t.observe(3);
        t.observe(1);
        t.observe(5);
        t.observe(2);
        assert_eq!(t.get(), Some(5));
    }
}
