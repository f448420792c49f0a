//! Location edit policy configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What to do with the partial flag at one end of a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PartialPolicy {
    /// Leave the flag alone
    #[default]
    NoChange,
    /// Set the flag; with extension enabled an already-partial end that is
    /// not yet at a sequence boundary is set again so it gets extended
    Set,
    /// Set the flag when the end sits at a sequence terminus or gap edge
    SetAtEnd,
    /// Set the flag when the residues do not show a proper start or stop
    SetForBadEnd,
    /// Set the 5' flag of a coding region read in frame two or three
    SetForFrame,
    /// Clear the flag
    Clear,
    /// Clear the flag when the residues show a proper start or stop
    ClearForGoodEnd,
    /// Clear the flag when the end is not at a sequence terminus or gap edge
    ClearNotAtEnd,
}

impl fmt::Display for PartialPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PartialPolicy::NoChange => "no-change",
            PartialPolicy::Set => "set",
            PartialPolicy::SetAtEnd => "set-at-end",
            PartialPolicy::SetForBadEnd => "set-for-bad-end",
            PartialPolicy::SetForFrame => "set-for-frame",
            PartialPolicy::Clear => "clear",
            PartialPolicy::ClearForGoodEnd => "clear-for-good-end",
            PartialPolicy::ClearNotAtEnd => "clear-not-at-end",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for PartialPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "no-change" | "nochange" | "none" => Ok(PartialPolicy::NoChange),
            "set" => Ok(PartialPolicy::Set),
            "set-at-end" => Ok(PartialPolicy::SetAtEnd),
            "set-for-bad-end" => Ok(PartialPolicy::SetForBadEnd),
            "set-for-frame" => Ok(PartialPolicy::SetForFrame),
            "clear" => Ok(PartialPolicy::Clear),
            "clear-for-good-end" => Ok(PartialPolicy::ClearForGoodEnd),
            "clear-not-at-end" => Ok(PartialPolicy::ClearNotAtEnd),
            _ => Err(format!("Invalid partial policy: {}", s)),
        }
    }
}

/// How to reshape a multi-part location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    #[default]
    NoChange,
    /// Rewrite packed intervals and packed points as an equivalent mix
    Join,
    /// Replace a single-sequence location by one interval over its extremes
    SingleInterval,
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergePolicy::NoChange => write!(f, "no-change"),
            MergePolicy::Join => write!(f, "join"),
            MergePolicy::SingleInterval => write!(f, "single-interval"),
        }
    }
}

impl FromStr for MergePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "no-change" | "nochange" | "none" => Ok(MergePolicy::NoChange),
            "join" => Ok(MergePolicy::Join),
            "single-interval" | "single" => Ok(MergePolicy::SingleInterval),
            _ => Err(format!("Invalid merge policy: {}", s)),
        }
    }
}

/// Configuration for editing the ends of a feature's location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LocationEditPolicy {
    /// Policy for the 5' partial flag
    #[serde(default)]
    pub partial5_policy: PartialPolicy,
    /// Policy for the 3' partial flag
    #[serde(default)]
    pub partial3_policy: PartialPolicy,
    /// Extend a newly set 5' partial end to the nearest boundary
    #[serde(default)]
    pub extend5: bool,
    /// Extend a newly set 3' partial end to the nearest boundary
    #[serde(default)]
    pub extend3: bool,
    #[serde(default)]
    pub merge_policy: MergePolicy,
}

impl LocationEditPolicy {
    /// Create a policy with the given end policies and no extension or merge
    pub fn new(partial5_policy: PartialPolicy, partial3_policy: PartialPolicy) -> Self {
        Self {
            partial5_policy,
            partial3_policy,
            ..Default::default()
        }
    }

    /// Set the 5' policy
    pub fn with_partial5(mut self, policy: PartialPolicy) -> Self {
        self.partial5_policy = policy;
        self
    }

    /// Set the 3' policy
    pub fn with_partial3(mut self, policy: PartialPolicy) -> Self {
        self.partial3_policy = policy;
        self
    }

    pub fn with_extend5(mut self, extend: bool) -> Self {
        self.extend5 = extend;
        self
    }

    pub fn with_extend3(mut self, extend: bool) -> Self {
        self.extend3 = extend;
        self
    }

    pub fn with_merge(mut self, merge: MergePolicy) -> Self {
        self.merge_policy = merge;
        self
    }

    /// True when applying this policy can never change anything
    pub fn is_no_op(&self) -> bool {
        self.partial5_policy == PartialPolicy::NoChange
            && self.partial3_policy == PartialPolicy::NoChange
            && self.merge_policy == MergePolicy::NoChange
    }
}
