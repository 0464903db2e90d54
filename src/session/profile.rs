use crate::catalog::Mood;
use serde::{Deserialize, Serialize};

pub const MIN_AGE: u32 = 1;
pub const MAX_AGE: u32 = 120;

/// The profile form as entered so far. Starts out empty when a visit
/// begins and is filled in field by field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: Option<u32>,
    pub mood: Mood,
    pub feelings: String,
}

/// A partial form edit; only the provided fields change.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub mood: Option<Mood>,
    pub feelings: Option<String>,
}

/// A required-field or range violation, same checks the form inputs
/// enforce client-side.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileProblem {
    #[error("Name is required.")]
    MissingName,
    #[error("Age is required.")]
    MissingAge,
    #[error("Age must be between 1 and 120.")]
    AgeOutOfRange,
    #[error("Feelings are required.")]
    MissingFeelings,
}

impl UserProfile {
    pub fn update(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(age) = update.age {
            self.age = Some(age);
        }
        if let Some(mood) = update.mood {
            self.mood = mood;
        }
        if let Some(feelings) = update.feelings {
            self.feelings = feelings;
        }
    }

    pub fn problems(&self) -> Vec<ProfileProblem> {
        let mut problems = Vec::new();
        if self.name.is_empty() {
            problems.push(ProfileProblem::MissingName);
        }
        match self.age {
            None => problems.push(ProfileProblem::MissingAge),
            Some(age) if !(MIN_AGE..=MAX_AGE).contains(&age) => {
                problems.push(ProfileProblem::AgeOutOfRange)
            }
            Some(_) => {}
        }
        if self.feelings.is_empty() {
            problems.push(ProfileProblem::MissingFeelings);
        }
        problems
    }

    pub fn is_complete(&self) -> bool {
        self.problems().is_empty()
    }
}
