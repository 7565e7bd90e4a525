//! Priority value object module
//!
//! `0` means held, `1` means system-held / released-behind-dependency.
//! Any other value is an ordinary scheduling priority, higher wins.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(u32);

impl Priority {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn is_held(&self) -> bool {
        self.0 == 0
    }

    pub fn is_system_held(&self) -> bool {
        self.0 == 1
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Priority {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_held_one_is_system_held() {
        assert!(Priority::new(0).is_held());
        assert!(Priority::new(1).is_system_held());
        assert!(!Priority::new(1).is_held());
        assert!(!Priority::new(2).is_system_held());
    }

    #[test]
    fn ordering_is_numeric() {
        assert!(Priority::new(100) > Priority::new(50));
    }
}
