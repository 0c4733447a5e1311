//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Elapsed term time in whole seconds
pub type Seconds = u32;

/// Difficulty rating of a policy card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Medium
    }
}

/// What the player did with the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

/// How the mini-game behind a decision went
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundResult {
    Win,
    Loss,
}

/// The only signal a mini-game reports back to the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniGameOutcome {
    pub approved: bool,
    pub misses: u32,
    pub rounds: u32,
}

impl MiniGameOutcome {
    pub fn new(approved: bool, misses: u32, rounds: u32) -> Self {
        Self { approved, misses, rounds }
    }

    /// A passed mini-game approves the policy
    pub fn decision(&self) -> Decision {
        if self.approved {
            Decision::Approve
        } else {
            Decision::Reject
        }
    }

    pub fn result(&self) -> RoundResult {
        if self.approved {
            RoundResult::Win
        } else {
            RoundResult::Loss
        }
    }
}

/// Signed change to the three headline stats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDelta {
    #[serde(default)]
    pub approval: i32,
    #[serde(default)]
    pub power: i32,
    #[serde(default)]
    pub standing: i32,
}

impl StatDelta {
    pub fn new(approval: i32, power: i32, standing: i32) -> Self {
        Self { approval, power, standing }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn total(&self) -> i32 {
        self.approval + self.power + self.standing
    }

    pub fn is_zero(&self) -> bool {
        self.approval == 0 && self.power == 0 && self.standing == 0
    }
}

/// Foreign political/economic groupings with an opinion of the government
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BlocKey {
    #[serde(rename = "NATO")]
    Nato,
    #[serde(rename = "EU")]
    Eu,
    #[serde(rename = "BRICS")]
    Brics,
    #[serde(rename = "OIC")]
    Oic,
    #[serde(rename = "SCO")]
    Sco,
}

impl BlocKey {
    pub const ALL: [BlocKey; 5] = [Self::Nato, Self::Eu, Self::Brics, Self::Oic, Self::Sco];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Nato => "NATO",
            Self::Eu => "EU",
            Self::Brics => "BRICS",
            Self::Oic => "OIC",
            Self::Sco => "SCO",
        }
    }
}

/// Fixed cabinet slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinisterKey {
    Defense,
    Finance,
    Justice,
    Foreign,
}

impl MinisterKey {
    pub const ALL: [MinisterKey; 4] = [Self::Defense, Self::Finance, Self::Justice, Self::Foreign];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Defense => "defense",
            Self::Finance => "finance",
            Self::Justice => "justice",
            Self::Foreign => "foreign",
        }
    }
}

/// Exit poll age buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "18_30")]
    From18To30,
    #[serde(rename = "31_60")]
    From31To60,
    #[serde(rename = "60_80")]
    From60To80,
    #[serde(rename = "80_plus")]
    Over80,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 4] = [
        Self::From18To30,
        Self::From31To60,
        Self::From60To80,
        Self::Over80,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::From18To30 => "18-30",
            Self::From31To60 => "31-60",
            Self::From60To80 => "60-80",
            Self::Over80 => "80+",
        }
    }
}

/// Exit poll gender categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Self::Male, Self::Female, Self::Other];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

/// How loudly a world event is surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

/// Clamp a float into a closed range
pub fn clamp_f64(value: f64, (min, max): (f64, f64)) -> f64 {
    value.max(min).min(max)
}
