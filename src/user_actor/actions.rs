use crate::domain::ProfileCompletion;

/// Custom actions for user records beyond upsert and patch.
#[derive(Debug, Clone)]
pub enum ProfileAction {
    /// Overwrites name, headline, bio and picture in one step.
    ///
    /// Reserved for first-time onboarding; unlike a patch it replaces all four
    /// fields even when they already hold values.
    Complete(ProfileCompletion),
}
