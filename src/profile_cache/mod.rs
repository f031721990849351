//! Per-session cache of the signed-in user's profile.
//!
//! The cache is either `Empty` or `Populated`. It fills from a profile the auth
//! provider hands over at sign-in, or failing that from one fetch through the
//! proxy. It never writes to the user service.

mod fetcher;

pub use fetcher::*;

use tracing::{debug, info, warn};

use crate::domain::UserRecord;

/// Who the auth provider says is signed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthIdentity {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl AuthIdentity {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name: None,
            email: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheState {
    Empty,
    Populated(UserRecord),
}

/// What presentation code renders for the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    Picture(String),
    Initials(String),
}

pub struct ProfileCache<F> {
    fetcher: F,
    identity: Option<AuthIdentity>,
    state: CacheState,
}

impl<F: ProfileFetcher> ProfileCache<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            identity: None,
            state: CacheState::Empty,
        }
    }

    pub fn state(&self) -> &CacheState {
        &self.state
    }

    pub fn identity(&self) -> Option<&AuthIdentity> {
        self.identity.as_ref()
    }

    /// Records a successful sign-in.
    ///
    /// A different identity than before resets the cache. A profile supplied by
    /// the auth callback populates it directly with no network call.
    pub fn sign_in(&mut self, identity: AuthIdentity, supplied: Option<UserRecord>) {
        let changed = self.identity.as_ref().map(|current| &current.uid) != Some(&identity.uid);
        if changed {
            debug!(uid = %identity.uid, "Identity changed, clearing profile");
            self.state = CacheState::Empty;
        }
        self.identity = Some(identity);

        if let Some(profile) = supplied {
            info!(identity_key = %profile.identity_key, "Profile supplied at sign-in");
            self.state = CacheState::Populated(profile);
        }
    }

    pub fn sign_out(&mut self) {
        debug!("Signed out, clearing profile");
        self.identity = None;
        self.state = CacheState::Empty;
    }

    /// Issues one fetch when empty and signed in. Failures are logged and
    /// leave the cache empty.
    pub async fn refresh(&mut self) -> &CacheState {
        let Some(identity) = &self.identity else {
            return &self.state;
        };
        if matches!(self.state, CacheState::Populated(_)) {
            return &self.state;
        }

        let uid = identity.uid.clone();
        match self.fetcher.fetch_profile(&uid).await {
            Ok(profile) => self.state = CacheState::Populated(profile),
            Err(e) => warn!(%uid, error = %e, "Error fetching user profile"),
        }
        &self.state
    }

    pub fn current(&self) -> Option<&UserRecord> {
        match &self.state {
            CacheState::Populated(profile) => Some(profile),
            CacheState::Empty => None,
        }
    }

    /// Picture when the profile has one, otherwise initials from the best
    /// available name. `None` when nobody is signed in.
    pub fn avatar(&self) -> Option<Avatar> {
        let identity = self.identity.as_ref()?;
        let profile = self.current();

        if let Some(picture) = profile.map(|p| &p.profile_picture).filter(|p| !p.is_empty()) {
            return Some(Avatar::Picture(picture.clone()));
        }

        let label = [
            profile.map(|p| p.name.as_str()),
            identity.display_name.as_deref(),
            identity.email.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find(|candidate| !candidate.is_empty())
        .unwrap_or("U");

        Some(Avatar::Initials(initials(label)))
    }
}

/// First letter of each space-separated word, upper-cased, at most two.
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split(' ')
        .filter_map(|word| word.chars().next())
        .collect::<String>()
        .to_uppercase()
        .chars()
        .take(2)
        .collect();

    if letters.is_empty() {
        "U".to_string()
    } else {
        letters
    }
}
