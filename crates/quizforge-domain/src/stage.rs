//! Stage module - steps of the quiz journey

/// Step in the user journey from upload to results
///
/// Stages are ordered; the index drives the progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Stage {
    /// Waiting for a document
    #[default]
    Upload,

    /// Collecting the optional profile
    Profile,

    /// Choosing formats, count and difficulty
    QuizSettings,

    /// Answering questions (or waiting for generation)
    Questions,

    /// Reviewing the score
    Results,
}

impl Stage {
    /// Every stage, in journey order
    pub const ALL: [Stage; 5] = [
        Stage::Upload,
        Stage::Profile,
        Stage::QuizSettings,
        Stage::Questions,
        Stage::Results,
    ];

    /// Zero-based position in the journey
    pub fn index(&self) -> usize {
        match self {
            Stage::Upload => 0,
            Stage::Profile => 1,
            Stage::QuizSettings => 2,
            Stage::Questions => 3,
            Stage::Results => 4,
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Upload => "Upload",
            Stage::Profile => "Profile",
            Stage::QuizSettings => "Quiz Settings",
            Stage::Questions => "Questions",
            Stage::Results => "Results",
        }
    }

    /// Progress through the journey as a percentage, `(index + 1) * 100 / 5`
    pub fn progress_percent(&self) -> f64 {
        (self.index() + 1) as f64 * 100.0 / Self::ALL.len() as f64
    }

    /// The following stage on the linear path
    pub fn next(&self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }
}
