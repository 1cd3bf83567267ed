//! Camelot-wheel harmonic compatibility.
//!
//! Pitch classes map onto a 12-slot wheel. Identical slots mix cleanly,
//! neighbouring slots nearly as well, and the A/B pair on one slot is the
//! relative major/minor.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelLetter {
    A,
    B,
}

/// A position on the Camelot wheel, number 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CamelotKey {
    pub number: u8,
    pub letter: WheelLetter,
}

impl std::fmt::Display for CamelotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self.letter {
            WheelLetter::A => 'A',
            WheelLetter::B => 'B',
        };
        write!(f, "{}{}", self.number, letter)
    }
}

const fn b(number: u8) -> CamelotKey {
    CamelotKey {
        number,
        letter: WheelLetter::B,
    }
}

/// Indexed by pitch class (0 = C).
static PITCH_CLASS_TO_CAMELOT: [CamelotKey; 12] = [
    b(8),  // C
    b(3),  // C#
    b(10), // D
    b(5),  // D#
    b(12), // E
    b(7),  // F
    b(2),  // F#
    b(9),  // G
    b(4),  // G#
    b(11), // A
    b(6),  // A#
    b(1),  // B
];

pub const SAME_KEY: f64 = 1.0;
pub const ADJACENT_KEY: f64 = 0.8;
pub const RELATIVE_KEY: f64 = 0.6;
pub const DISTANT_KEY: f64 = 0.3;
/// Returned when a pitch class falls outside 0..=11
pub const UNKNOWN_KEY: f64 = 0.5;

pub fn camelot_key(pitch_class: u8) -> Option<CamelotKey> {
    PITCH_CLASS_TO_CAMELOT.get(usize::from(pitch_class)).copied()
}

fn is_adjacent(a: CamelotKey, b: CamelotKey) -> bool {
    if a.letter != b.letter {
        return false;
    }
    let forward = (a.number % 12) + 1;
    let backward = ((a.number + 10) % 12) + 1;
    b.number == forward || b.number == backward
}

fn is_relative(a: CamelotKey, b: CamelotKey) -> bool {
    a.number == b.number && a.letter != b.letter
}

pub fn key_compatibility(key1: u8, key2: u8) -> f64 {
    let (Some(a), Some(b)) = (camelot_key(key1), camelot_key(key2)) else {
        return UNKNOWN_KEY;
    };

    if a == b {
        SAME_KEY
    } else if is_adjacent(a, b) {
        ADJACENT_KEY
    } else if is_relative(a, b) {
        RELATIVE_KEY
    } else {
        DISTANT_KEY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_labels() {
        let labels: Vec<String> = (0..12).map(|k| camelot_key(k).unwrap().to_string()).collect();
        assert_eq!(
            labels,
            vec!["8B", "3B", "10B", "5B", "12B", "7B", "2B", "9B", "4B", "11B", "6B", "1B"]
        );
        assert!(camelot_key(12).is_none());
    }

    #[test]
    fn test_identical_keys() {
        for k in 0..12 {
            assert_eq!(key_compatibility(k, k), SAME_KEY);
        }
    }

    #[test]
    fn test_adjacent_keys() {
        // C (8B) and F (7B)
        assert_eq!(key_compatibility(0, 5), ADJACENT_KEY);
        // C (8B) and G (9B)
        assert_eq!(key_compatibility(0, 7), ADJACENT_KEY);
        // B (1B) and E (12B) wrap around the wheel
        assert_eq!(key_compatibility(11, 4), ADJACENT_KEY);
        assert_eq!(key_compatibility(4, 11), ADJACENT_KEY);
    }

    #[test]
    fn test_distant_keys() {
        // C (8B) and F# (2B)
        assert_eq!(key_compatibility(0, 6), DISTANT_KEY);
        // C (8B) and D (10B) are two steps apart
        assert_eq!(key_compatibility(0, 2), DISTANT_KEY);
    }

    #[test]
    fn test_relative_pair() {
        let major = b(8);
        let minor = CamelotKey {
            number: 8,
            letter: WheelLetter::A,
        };
        assert!(is_relative(major, minor));
        assert!(!is_adjacent(major, minor));
        assert!(!is_relative(major, b(9)));
    }

    #[test]
    fn test_out_of_range_key() {
        assert_eq!(key_compatibility(0, 14), UNKNOWN_KEY);
    }
}
