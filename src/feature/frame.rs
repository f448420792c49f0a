//! Coding-region reading frame

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of leading bases of a coding region skipped before the first codon
///
/// `NotSet` reads like `One` (no skipped bases).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frame {
    #[default]
    NotSet,
    One,
    Two,
    Three,
}

/// Frame after adding `shift % 3` bases in front of the start, indexed by
/// `[old frame][shift % 3]`. A shift of 0 keeps the frame; otherwise an
/// offset of 0 is reported as `NotSet`.
const TRANSITIONS: [[Frame; 3]; 4] = [
    [Frame::NotSet, Frame::Two, Frame::Three],
    [Frame::One, Frame::Two, Frame::Three],
    [Frame::Two, Frame::Three, Frame::NotSet],
    [Frame::Three, Frame::NotSet, Frame::Two],
];

impl Frame {
    /// Leading bases to skip: 0, 1 or 2
    pub fn offset(self) -> u64 {
        match self {
            Frame::NotSet | Frame::One => 0,
            Frame::Two => 1,
            Frame::Three => 2,
        }
    }

    fn row(self) -> usize {
        match self {
            Frame::NotSet => 0,
            Frame::One => 1,
            Frame::Two => 2,
            Frame::Three => 3,
        }
    }

    /// Frame after the start moved outward by `added` bases
    pub fn after_extension(self, added: u64) -> Frame {
        TRANSITIONS[self.row()][(added % 3) as usize]
    }

    /// Frame after `removed` bases were cut from in front of the start
    pub fn after_trim(self, removed: u64) -> Frame {
        self.after_extension((3 - removed % 3) % 3)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frame::NotSet => write!(f, "not-set"),
            Frame::One => write!(f, "1"),
            Frame::Two => write!(f, "2"),
            Frame::Three => write!(f, "3"),
        }
    }
}

impl FromStr for Frame {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "not-set" | "not_set" | "notset" | "0" => Ok(Frame::NotSet),
            "1" | "one" => Ok(Frame::One),
            "2" | "two" => Ok(Frame::Two),
            "3" | "three" => Ok(Frame::Three),
            _ => Err(format!("Invalid frame: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Frame::One, 1, Frame::Two)]
    #[case(Frame::One, 2, Frame::Three)]
    #[case(Frame::One, 3, Frame::One)]
    #[case(Frame::Two, 2, Frame::NotSet)]
    #[case(Frame::Three, 1, Frame::NotSet)]
    #[case(Frame::NotSet, 2, Frame::Three)]
    #[case(Frame::NotSet, 3, Frame::NotSet)]
    #[case(Frame::Three, 5, Frame::Two)]
    fn test_after_extension(#[case] frame: Frame, #[case] added: u64, #[case] expected: Frame) {
        assert_eq!(frame.after_extension(added), expected);
    }

    #[test]
    fn test_extension_keeps_register() {
        for frame in [Frame::NotSet, Frame::One, Frame::Two, Frame::Three] {
            for added in 0..9u64 {
                let new = frame.after_extension(added);
                assert_eq!((frame.offset() + added) % 3, new.offset());
            }
        }
    }

    #[test]
    fn test_trim_undoes_extension() {
        for frame in [Frame::One, Frame::Two, Frame::Three] {
            for n in 1..7u64 {
                let extended = frame.after_extension(n);
                assert_eq!(extended.after_trim(n).offset(), frame.offset());
            }
        }
    }

    #[test]
    fn test_after_trim() {
        assert_eq!(Frame::One.after_trim(1), Frame::Three);
        assert_eq!(Frame::One.after_trim(2), Frame::Two);
        assert_eq!(Frame::Two.after_trim(1), Frame::NotSet);
        assert_eq!(Frame::Three.after_trim(3), Frame::Three);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("2".parse::<Frame>().unwrap(), Frame::Two);
        assert_eq!("not_set".parse::<Frame>().unwrap(), Frame::NotSet);
        assert!("4".parse::<Frame>().is_err());
        assert_eq!(Frame::Three.to_string(), "3");
    }
}
