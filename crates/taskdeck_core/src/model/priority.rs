//! Item/template priority.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// Urgency level shared by items and templates.
///
/// Ranked `High > Medium > Low`. Declaration order follows the menu numbering
/// (1 = high, 2 = medium, 3 = low), so `index()` is a stable bucket index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// All priorities in menu order.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Zero-based position in `ALL`.
    pub fn index(self) -> usize {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    /// One-based menu number used by prompts.
    pub fn menu_number(self) -> u8 {
        // `index()` is at most 2.
        self.index() as u8 + 1
    }

    /// Maps a one-based menu number back to a priority.
    pub fn from_menu_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::High),
            2 => Some(Self::Medium),
            3 => Some(Self::Low),
            _ => None,
        }
    }

    /// Upper-case label used in listings.
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::Priority;

    #[test]
    fn ranking_puts_high_above_low() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);

        let mut sorted = vec![Priority::Low, Priority::High, Priority::Medium];
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(sorted, Priority::ALL.to_vec());
    }

    #[test]
    fn menu_numbers_roundtrip() {
        for priority in Priority::ALL {
            assert_eq!(
                Priority::from_menu_number(priority.menu_number()),
                Some(priority)
            );
        }
        assert_eq!(Priority::from_menu_number(0), None);
        assert_eq!(Priority::from_menu_number(4), None);
    }
}
