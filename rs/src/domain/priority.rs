//! Priority buckets for task filtering and dashboard counts

use serde::{Deserialize, Serialize};

/// Classification of a task's numeric priority
///
/// `High` is 4 and above, `Medium` is 2 and 3, `Low` is anything below 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityBucket {
    Low,
    Medium,
    High,
}

impl PriorityBucket {
    /// Lower bound (inclusive) of the high bucket
    pub const HIGH_THRESHOLD: u32 = 4;

    /// Lower bound (inclusive) of the medium bucket
    pub const MEDIUM_THRESHOLD: u32 = 2;

    /// Bucket a numeric priority falls into
    pub fn of(priority: u32) -> Self {
        if priority >= Self::HIGH_THRESHOLD {
            Self::High
        } else if priority >= Self::MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Whether the given priority belongs to this bucket
    pub fn contains(&self, priority: u32) -> bool {
        Self::of(priority) == *self
    }
}

impl std::fmt::Display for PriorityBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for PriorityBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown priority bucket: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(PriorityBucket::of(0), PriorityBucket::Low);
        assert_eq!(PriorityBucket::of(1), PriorityBucket::Low);
        assert_eq!(PriorityBucket::of(2), PriorityBucket::Medium);
        assert_eq!(PriorityBucket::of(3), PriorityBucket::Medium);
        assert_eq!(PriorityBucket::of(4), PriorityBucket::High);
        assert_eq!(PriorityBucket::of(99), PriorityBucket::High);
    }

    #[test]
    fn test_bucket_contains() {
        assert!(PriorityBucket::Medium.contains(3));
        assert!(!PriorityBucket::Medium.contains(4));
        assert!(PriorityBucket::Low.contains(1));
    }

    #[test]
    fn test_bucket_ordering() {
        assert!(PriorityBucket::Low < PriorityBucket::Medium);
        assert!(PriorityBucket::Medium < PriorityBucket::High);
    }

    #[test]
    fn test_bucket_parse() {
        assert_eq!("high".parse::<PriorityBucket>().unwrap(), PriorityBucket::High);
        assert_eq!("MEDIUM".parse::<PriorityBucket>().unwrap(), PriorityBucket::Medium);
        assert!("urgent".parse::<PriorityBucket>().is_err());
    }

    #[test]
    fn test_bucket_display() {
        assert_eq!(PriorityBucket::Low.to_string(), "low");
        assert_eq!(PriorityBucket::High.to_string(), "high");
    }
}
