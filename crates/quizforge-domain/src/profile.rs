//! Profile module - advisory context about the quiz taker

use serde::{Deserialize, Serialize};

/// Optional facts about the user, used to tailor prompts
///
/// All fields may be empty; an all-empty profile is a valid submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileData {
    /// Display name
    pub name: Option<String>,

    /// Occupation
    pub profession: Option<String>,

    /// Highest education level reached
    pub education_level: Option<String>,

    /// Subject area of interest
    pub subject: Option<String>,
}

impl ProfileData {
    /// Labelled fields that carry a non-blank value, in prompt order
    ///
    /// # Examples
    ///
    /// ```
    /// use quizforge_domain::ProfileData;
    ///
    /// let profile = ProfileData {
    ///     name: Some("Ada".into()),
    ///     subject: Some("  ".into()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(profile.filled_fields(), vec![("Name", "Ada")]);
    /// ```
    pub fn filled_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("Name", &self.name),
            ("Profession", &self.profession),
            ("Education Level", &self.education_level),
            ("Subject Area", &self.subject),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(|v| (label, v))
        })
        .collect()
    }

    /// True when no field carries a value
    pub fn is_empty(&self) -> bool {
        self.filled_fields().is_empty()
    }
}
