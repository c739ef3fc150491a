//! Query windows.

use chrono::NaiveDateTime;

/// The `[after, before]` range an expansion is filtered against.
///
/// Bounds are wall-clock values in the output zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    pub after: NaiveDateTime,
    pub before: NaiveDateTime,
    /// Whether an occurrence starting exactly on a bound is included.
    pub inclusive: bool,
}

impl Window {
    /// Creates a window closed on both ends.
    #[must_use]
    pub fn new(after: NaiveDateTime, before: NaiveDateTime) -> Self {
        Self {
            after,
            before,
            inclusive: true,
        }
    }

    /// Excludes both bounds.
    #[must_use]
    pub fn exclusive(mut self) -> Self {
        self.inclusive = false;
        self
    }

    #[must_use]
    pub fn contains(&self, value: NaiveDateTime) -> bool {
        if self.inclusive {
            self.after <= value && value <= self.before
        } else {
            self.after < value && value < self.before
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn inclusive_window_contains_bounds() {
        let window = Window::new(at(9, 0), at(10, 0));
        assert!(window.contains(at(9, 0)));
        assert!(window.contains(at(9, 30)));
        assert!(window.contains(at(10, 0)));
        assert!(!window.contains(at(8, 59)));
        assert!(!window.contains(at(10, 1)));
    }

    #[test]
    fn exclusive_window_drops_bounds() {
        let window = Window::new(at(9, 0), at(10, 0)).exclusive();
        assert!(!window.inclusive);
        assert!(!window.contains(at(9, 0)));
        assert!(window.contains(at(9, 30)));
        assert!(!window.contains(at(10, 0)));
    }

    #[test]
    fn inverted_window_is_empty() {
        let window = Window::new(at(10, 0), at(9, 0));
        assert!(!window.contains(at(9, 30)));
        assert!(!window.contains(at(10, 0)));
    }
}
