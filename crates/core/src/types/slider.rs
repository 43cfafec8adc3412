//! Hero slider position.

/// Index of the visible slide within a fixed number of slides.
///
/// Stepping past either end wraps around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroSlider {
    len: usize,
    current: usize,
}

impl HeroSlider {
    /// A slider over `len` slides showing the first one.
    ///
    /// Returns `None` when there are no slides.
    #[must_use]
    pub const fn new(len: usize) -> Option<Self> {
        if len == 0 {
            return None;
        }
        Some(Self { len, current: 0 })
    }

    /// A slider showing `current`, wrapped into range.
    #[must_use]
    pub const fn at(len: usize, current: usize) -> Option<Self> {
        if len == 0 {
            return None;
        }
        Some(Self {
            len,
            current: current % len,
        })
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Move by `direction` slides (negative moves back), wrapping around.
    pub fn step(&mut self, direction: i64) -> usize {
        let len = i128::try_from(self.len).unwrap_or(i128::MAX);
        let current = i128::try_from(self.current).unwrap_or(0);
        let next = (current + i128::from(direction)).rem_euclid(len);
        self.current = usize::try_from(next).unwrap_or(0);
        self.current
    }

    /// Jump to `index`. Out-of-range indices leave the slider where it is.
    pub const fn go_to(&mut self, index: usize) -> usize {
        if index < self.len {
            self.current = index;
        }
        self.current
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_no_slides() {
        assert!(HeroSlider::new(0).is_none());
        assert!(HeroSlider::at(0, 2).is_none());
    }

    #[test]
    fn test_step_wraps_at_both_ends() {
        let mut slider = HeroSlider::new(3).unwrap();
        assert_eq!(slider.step(-1), 2);
        assert_eq!(slider.step(1), 0);
        assert_eq!(slider.step(1), 1);
        assert_eq!(slider.step(1), 2);
        assert_eq!(slider.step(1), 0);
    }

    #[test]
    fn test_large_steps_wrap() {
        let mut slider = HeroSlider::new(4).unwrap();
        assert_eq!(slider.step(9), 1);
        assert_eq!(slider.step(-6), 3);
    }

    #[test]
    fn test_go_to() {
        let mut slider = HeroSlider::at(3, 1).unwrap();
        assert_eq!(slider.go_to(2), 2);
        assert_eq!(slider.go_to(7), 2);
        assert_eq!(slider.current(), 2);
    }

    #[test]
    fn test_at_wraps_start() {
        assert_eq!(HeroSlider::at(3, 4).unwrap().current(), 1);
    }
}
