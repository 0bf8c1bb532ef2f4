//! Dice rolls: outcome ranges and draw resolution.
//!
//! A roll node maps an integer draw onto one of several outcomes, each
//! covering an inclusive range such as `"1-3"` or a single value `"7"`.

use std::ops::RangeInclusive;

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::document::NodeId;
use crate::error::{StoryError, StoryResult};

/// An inclusive range of draw values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OutcomeRange {
    /// Lowest matching draw.
    pub min: u32,
    /// Highest matching draw.
    pub max: u32,
}

impl OutcomeRange {
    /// Create a range, rejecting `min > max`.
    pub fn new(min: u32, max: u32) -> StoryResult<Self> {
        if min > max {
            return Err(StoryError::InvalidRange(format!("{min}-{max}")));
        }
        Ok(Self { min, max })
    }

    /// A range matching exactly one value.
    pub fn single(value: u32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Parse a range from `"4-9"` or `"7"`.
    pub fn parse(s: &str) -> StoryResult<Self> {
        let trimmed = s.trim();
        let (lo, hi) = trimmed.split_once('-').unwrap_or((trimmed, trimmed));
        let bound = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| StoryError::InvalidRange(s.to_string()))
        };
        let (min, max) = (bound(lo)?, bound(hi)?);
        if min > max {
            return Err(StoryError::InvalidRange(s.to_string()));
        }
        Ok(Self { min, max })
    }

    /// Whether the draw falls inside this range (both ends inclusive).
    pub fn contains(&self, draw: u32) -> bool {
        self.min <= draw && draw <= self.max
    }

    /// Whether the two ranges share at least one value.
    pub fn overlaps(&self, other: &OutcomeRange) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}

impl std::fmt::Display for OutcomeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

impl TryFrom<String> for OutcomeRange {
    type Error = StoryError;

    fn try_from(value: String) -> StoryResult<Self> {
        Self::parse(&value)
    }
}

impl From<OutcomeRange> for String {
    fn from(range: OutcomeRange) -> Self {
        range.to_string()
    }
}

/// One possible result of a roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Draw values that select this outcome.
    pub range: OutcomeRange,
    /// Text shown when this outcome is rolled.
    pub text: String,
    /// Node entered after this outcome.
    pub next: NodeId,
}

impl Outcome {
    /// Create an outcome.
    pub fn new(range: OutcomeRange, text: impl Into<String>, next: impl Into<NodeId>) -> Self {
        Self {
            range,
            text: text.into(),
            next: next.into(),
        }
    }
}

/// The roll attached to a roll node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollSpec {
    /// Prompt shown on the roll control.
    pub text: String,
    /// Ordered outcomes; a well-formed roll covers its domain without overlap.
    pub outcomes: Vec<Outcome>,
}

impl RollSpec {
    /// Create a roll with no outcomes.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            outcomes: Vec::new(),
        }
    }

    /// Add an outcome.
    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcomes.push(outcome);
        self
    }

    /// The legal draw domain: lowest minimum to highest maximum.
    ///
    /// Returns `None` for a roll without outcomes.
    pub fn domain(&self) -> Option<RangeInclusive<u32>> {
        let min = self.outcomes.iter().map(|o| o.range.min).min()?;
        let max = self.outcomes.iter().map(|o| o.range.max).max()?;
        Some(min..=max)
    }

    /// The first outcome whose range contains the draw.
    pub fn outcome_for(&self, draw: u32) -> Option<&Outcome> {
        self.outcomes.iter().find(|o| o.range.contains(draw))
    }

    /// Draw a value uniformly from the domain.
    pub fn draw(&self, rng: &mut StdRng) -> Option<u32> {
        self.domain().map(|domain| rng.random_range(domain))
    }
}
