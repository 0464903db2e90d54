//! Per-visit state machine
//!
//! One machine models one application visit: the login gate, the profile
//! form, and the recommendations view. All mutation goes through
//! [`VisitMachine::apply`], which takes the current state plus one event
//! and either transitions or rejects without touching anything.

use super::profile::{ProfileProblem, ProfileUpdate, UserProfile};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Authenticating,
    CollectingInput,
    ShowingRecommendations,
}

/// The signed-in marker. Only the email is kept, nothing is verified
/// against a credential store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub email: String,
}

/// One user interaction.
#[derive(Clone, Debug)]
pub enum VisitEvent {
    LogIn { email: String, password: String },
    EditProfile(ProfileUpdate),
    SubmitProfile,
    StartOver,
    SignOut,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Email and password must not be empty.")]
    EmptyCredentials,
    #[error("Not signed in.")]
    NotAuthenticated,
    #[error("The input form is not active.")]
    NotCollectingInput,
    #[error("No recommendations are being shown.")]
    NotShowingRecommendations,
    #[error("Profile is incomplete.")]
    IncompleteProfile(Vec<ProfileProblem>),
}

#[derive(Debug, Default)]
pub struct VisitMachine {
    phase: Phase,
    user: Option<AuthenticatedUser>,
    profile: UserProfile,
}

impl VisitMachine {
    pub fn new() -> VisitMachine {
        VisitMachine::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn user(&self) -> Option<&AuthenticatedUser> {
        self.user.as_ref()
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Applies one event, returning the resulting phase. A rejected event
    /// leaves the machine untouched.
    pub fn apply(&mut self, event: VisitEvent) -> Result<Phase, TransitionError> {
        match event {
            VisitEvent::LogIn { email, password } => {
                if email.is_empty() || password.is_empty() {
                    return Err(TransitionError::EmptyCredentials);
                }
                // Any non-empty pair is accepted, only the email is kept.
                self.user = Some(AuthenticatedUser { email });
                if self.phase == Phase::Authenticating {
                    self.phase = Phase::CollectingInput;
                }
            }
            VisitEvent::EditProfile(update) => {
                self.require_authenticated()?;
                if self.phase != Phase::CollectingInput {
                    return Err(TransitionError::NotCollectingInput);
                }
                self.profile.update(update);
            }
            VisitEvent::SubmitProfile => {
                self.require_authenticated()?;
                if self.phase != Phase::CollectingInput {
                    return Err(TransitionError::NotCollectingInput);
                }
                let problems = self.profile.problems();
                if !problems.is_empty() {
                    return Err(TransitionError::IncompleteProfile(problems));
                }
                self.phase = Phase::ShowingRecommendations;
            }
            VisitEvent::StartOver => {
                self.require_authenticated()?;
                if self.phase != Phase::ShowingRecommendations {
                    return Err(TransitionError::NotShowingRecommendations);
                }
                // Back to the form, field values survive
                self.phase = Phase::CollectingInput;
            }
            VisitEvent::SignOut => {
                self.require_authenticated()?;
                self.user = None;
                // The profile stays in memory until the visit is pruned
                self.phase = Phase::Authenticating;
            }
        }
        Ok(self.phase)
    }

    fn require_authenticated(&self) -> Result<(), TransitionError> {
        if self.user.is_none() {
            return Err(TransitionError::NotAuthenticated);
        }
        Ok(())
    }
}
