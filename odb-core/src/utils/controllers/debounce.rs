//! Button edge detection.

/// Turns a held button into a single press event.
///
/// The event fires once, on the cycle where the button has been held for
/// `stable_cycles` consecutive samples. Releasing the button re-arms it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    stable_cycles: u8,
    held: u8,
}

impl Debouncer {
    /// A `stable_cycles` of zero behaves like one.
    pub fn new(stable_cycles: u8) -> Self {
        Self {
            stable_cycles: stable_cycles.max(1),
            held: 0,
        }
    }

    pub fn update(
        &mut self,
        pressed: bool,
    ) -> bool {
        if !pressed {
            self.held = 0;
            return false;
        }
        if self.held >= self.stable_cycles {
            return false;
        }
        self.held += 1;
        self.held == self.stable_cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_press() {
        let mut d = Debouncer::new(1);
        assert!(d.update(true));
        for _ in 0..300 {
            assert!(!d.update(true));
        }
        assert!(!d.update(false));
        assert!(d.update(true));
    }

    #[test]
    fn waits_for_stable_input() {
        let mut d = Debouncer::new(3);
        assert!(!d.update(true));
        assert!(!d.update(true));
        assert!(!d.update(false));
        assert!(!d.update(true));
        assert!(!d.update(true));
        assert!(d.update(true));
        assert!(!d.update(true));
    }

    #[test]
    fn zero_cycles_acts_as_one() {
        let mut d = Debouncer::new(0);
        assert!(d.update(true));
    }
}
