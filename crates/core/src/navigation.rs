//! Journal step navigation.
//!
//! Defines the screens of the journal (welcome, five reflection steps,
//! summary), their numeric encoding, and the [`Navigator`] state machine
//! that moves between them.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Journal steps
// ---------------------------------------------------------------------------

/// Number of reflection steps between the welcome and summary screens.
pub const TOTAL_STEPS: u8 = 5;

/// Step number of the welcome screen.
pub const WELCOME_STEP: u8 = 0;

/// First reflection step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Last reflection step number (1-based).
pub const MAX_STEP: u8 = 5;

/// Step number of the summary screen.
pub const SUMMARY_STEP: u8 = 6;

/// The screens of the journal, in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalStep {
    #[default]
    Welcome,
    Love,
    GoodAt,
    WorldNeeds,
    PaidFor,
    Ikigai,
    Summary,
}

impl JournalStep {
    /// Convert a step number (0 = welcome, 1..5 = steps, 6 = summary).
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            0 => Ok(Self::Welcome),
            1 => Ok(Self::Love),
            2 => Ok(Self::GoodAt),
            3 => Ok(Self::WorldNeeds),
            4 => Ok(Self::PaidFor),
            5 => Ok(Self::Ikigai),
            6 => Ok(Self::Summary),
            _ => Err(CoreError::InvalidStep(n.to_string())),
        }
    }

    pub fn to_number(self) -> u8 {
        match self {
            Self::Welcome => 0,
            Self::Love => 1,
            Self::GoodAt => 2,
            Self::WorldNeeds => 3,
            Self::PaidFor => 4,
            Self::Ikigai => 5,
            Self::Summary => 6,
        }
    }

    /// Parse the persisted `currentStep` string (e.g. `"3"`).
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| CoreError::InvalidStep(s.to_string()))
            .and_then(Self::from_number)
    }

    /// Convert to the persisted `currentStep` string.
    pub fn as_db_string(self) -> String {
        self.to_number().to_string()
    }

    /// `true` for the five reflection steps.
    pub fn is_reflection_step(self) -> bool {
        (MIN_STEP..=MAX_STEP).contains(&self.to_number())
    }

    /// Human-readable label for the screen.
    pub fn label(self) -> &'static str {
        match self {
            Self::Welcome => "Find Your Ikigai",
            Self::Love => "Rediscover the things you love",
            Self::GoodAt => "Identify your natural strengths and skills",
            Self::WorldNeeds => "Align your interests and skills with what the world needs",
            Self::PaidFor => "Explore ways to get paid for what you love, skills and value",
            Self::Ikigai => "Find the overlap: Your Ikigai",
            Self::Summary => "Summary",
        }
    }

    /// Completion percentage shown in the progress bar.
    ///
    /// Welcome reports 0, step `n` reports `n / 5 * 100`, summary reports 100.
    pub fn progress_percent(self) -> u8 {
        match self {
            Self::Summary => 100,
            step => {
                let pct = u16::from(step.to_number()) * 100 / u16::from(TOTAL_STEPS);
                pct.min(100) as u8
            }
        }
    }

    /// Step counter shown as "`n` of 5"; the summary counts as the last step.
    pub fn display_step(self) -> u8 {
        match self {
            Self::Summary => TOTAL_STEPS,
            step => step.to_number(),
        }
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Tracks the current screen and applies navigation actions.
///
/// Transitions:
///
/// ```text
/// start()     Welcome -> Love (no-op elsewhere)
/// go_to(n)    any     -> step n, n in 1..=5
/// next()      step n  -> step n+1, Ikigai -> Summary, Summary stays, Welcome -> Love
/// previous()  step n  -> step n-1, Love -> Welcome, Welcome stays, Summary -> Ikigai
/// reset()     any     -> Welcome
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigator {
    current: JournalStep,
}

impl Navigator {
    /// Start on the welcome screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume at a previously persisted step.
    pub fn restore(step: JournalStep) -> Self {
        Self { current: step }
    }

    pub fn current(&self) -> JournalStep {
        self.current
    }

    pub fn start(&mut self) -> JournalStep {
        if self.current == JournalStep::Welcome {
            self.current = JournalStep::Love;
        }
        self.current
    }

    /// Jump straight to reflection step `n`.
    ///
    /// Earlier steps need not be completed. Out-of-range numbers are
    /// rejected and leave the state unchanged.
    pub fn go_to(&mut self, n: u8) -> Result<JournalStep, CoreError> {
        if !(MIN_STEP..=MAX_STEP).contains(&n) {
            return Err(CoreError::Validation(format!(
                "Cannot jump to step {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            )));
        }
        self.current = JournalStep::from_number(n)?;
        Ok(self.current)
    }

    pub fn next(&mut self) -> JournalStep {
        self.current = match self.current {
            JournalStep::Welcome => JournalStep::Love,
            JournalStep::Love => JournalStep::GoodAt,
            JournalStep::GoodAt => JournalStep::WorldNeeds,
            JournalStep::WorldNeeds => JournalStep::PaidFor,
            JournalStep::PaidFor => JournalStep::Ikigai,
            JournalStep::Ikigai | JournalStep::Summary => JournalStep::Summary,
        };
        self.current
    }

    pub fn previous(&mut self) -> JournalStep {
        self.current = match self.current {
            JournalStep::Welcome | JournalStep::Love => JournalStep::Welcome,
            JournalStep::GoodAt => JournalStep::Love,
            JournalStep::WorldNeeds => JournalStep::GoodAt,
            JournalStep::PaidFor => JournalStep::WorldNeeds,
            JournalStep::Ikigai => JournalStep::PaidFor,
            JournalStep::Summary => JournalStep::Ikigai,
        };
        self.current
    }

    pub fn reset(&mut self) -> JournalStep {
        self.current = JournalStep::Welcome;
        self.current
    }

    pub fn progress_percent(&self) -> u8 {
        self.current.progress_percent()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
