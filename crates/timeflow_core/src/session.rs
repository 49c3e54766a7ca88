//! Logged-in user session backed by local storage.
//!
//! # Responsibility
//! - Restore the persisted profile on startup.
//! - Log in with any non-blank credentials, log out, and merge profile edits.
//! - Hold the user's in-app notifications (seeded at startup, never persisted).
//!
//! # Invariants
//! - The profile is stored as one JSON record under `USER_STORAGE_KEY`.
//! - The in-memory user and the stored record change together: storage is
//!   written first, and memory is updated only after the write succeeds.
//! - Credentials are never logged or stored.

use crate::db::{DbError, LocalStorage};
use crate::model::notification::Notification;
use crate::model::user::{UserProfile, UserProfilePatch};
use crate::store::seed::initial_notifications;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed local storage key holding the profile record.
pub const USER_STORAGE_KEY: &str = "user";

const DEFAULT_USER_ID: &str = "user1";
const DEFAULT_COMPLETED_TASKS: u32 = 24;
const DEFAULT_TOTAL_TASKS: u32 = 30;
const FEATURED_EMAIL: &str = "sarah.mitchell@timeflow.com";

static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z0-9_])([A-Za-z0-9_]*)").expect("valid word regex"));

/// Session error for login/profile use-cases.
#[derive(Debug)]
pub enum SessionError {
    /// Email or password is blank.
    MissingCredentials,
    /// Profile update requested while logged out.
    NotLoggedIn,
    /// Local storage read/write failure.
    Storage(DbError),
    /// Profile could not be encoded for storage.
    Serialization(serde_json::Error),
    /// Stored record is not a valid profile.
    InvalidStoredProfile(serde_json::Error),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCredentials => write!(f, "Please provide both email and password"),
            Self::NotLoggedIn => write!(f, "no user is logged in"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "failed to encode user profile: {err}"),
            Self::InvalidStoredProfile(err) => write!(f, "stored user profile is invalid: {err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Serialization(err) | Self::InvalidStoredProfile(err) => Some(err),
            Self::MissingCredentials | Self::NotLoggedIn => None,
        }
    }
}

impl From<DbError> for SessionError {
    fn from(value: DbError) -> Self {
        Self::Storage(value)
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Current user plus the storage it is persisted to.
pub struct UserSession<S: LocalStorage> {
    storage: S,
    user: Option<UserProfile>,
    notifications: Vec<Notification>,
}

impl<S: LocalStorage> UserSession<S> {
    /// Restores the stored profile, if any, seeding notifications at the
    /// current time.
    ///
    /// # Errors
    /// - `Storage` when the record cannot be read.
    /// - `InvalidStoredProfile` when the record is not a valid profile.
    pub fn restore(storage: S) -> SessionResult<Self> {
        Self::restore_at(storage, Utc::now())
    }

    /// Same as `restore`, with notifications stamped `now`.
    pub fn restore_at(storage: S, now: DateTime<Utc>) -> SessionResult<Self> {
        let user = match storage.get_item(USER_STORAGE_KEY)? {
            Some(raw) => Some(
                serde_json::from_str::<UserProfile>(&raw)
                    .map_err(SessionError::InvalidStoredProfile)
                    .inspect_err(|err| {
                        warn!("event=session_restore module=session status=error error={err}");
                    })?,
            ),
            None => None,
        };
        info!(
            "event=session_restore module=session status=ok logged_in={}",
            user.is_some()
        );
        Ok(Self {
            storage,
            user,
            notifications: initial_notifications(now),
        })
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Notifications in display order.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_notification_count(&self) -> usize {
        self.notifications
            .iter()
            .filter(|notification| !notification.read)
            .count()
    }

    /// Marks notification `id` as read. Returns `false` for an unknown id.
    pub fn mark_notification_read(&mut self, id: &str) -> bool {
        let Some(notification) = self
            .notifications
            .iter_mut()
            .find(|notification| notification.id == id)
        else {
            debug!("event=notification_read module=session status=noop notification_id={id}");
            return false;
        };
        notification.read = true;
        info!("event=notification_read module=session status=ok notification_id={id}");
        true
    }

    /// Logs in with any non-blank credentials and persists the new profile.
    ///
    /// # Errors
    /// - `MissingCredentials` when either value is blank; session unchanged.
    /// - `Storage` / `Serialization` when persisting fails; session unchanged.
    pub fn login(&mut self, email: &str, password: &str) -> SessionResult<&UserProfile> {
        let email = email.trim();
        if email.is_empty() || password.trim().is_empty() {
            warn!("event=session_login module=session status=error error_code=missing_credentials");
            return Err(SessionError::MissingCredentials);
        }

        let profile = profile_for_email(email);
        self.persist(&profile)?;
        info!(
            "event=session_login module=session status=ok user_id={}",
            profile.id
        );
        Ok(&*self.user.insert(profile))
    }

    /// Clears the current user and its stored record.
    pub fn logout(&mut self) -> SessionResult<()> {
        self.storage.remove_item(USER_STORAGE_KEY)?;
        self.user = None;
        info!("event=session_logout module=session status=ok");
        Ok(())
    }

    /// Merges `patch` into the current profile and persists it.
    ///
    /// # Errors
    /// - `NotLoggedIn` when there is no current user.
    /// - `Storage` / `Serialization` when persisting fails; profile unchanged.
    pub fn update_profile(&mut self, patch: &UserProfilePatch) -> SessionResult<&UserProfile> {
        let mut updated = self.user.clone().ok_or(SessionError::NotLoggedIn)?;
        patch.apply_to(&mut updated);
        self.persist(&updated)?;
        info!(
            "event=session_update module=session status=ok user_id={}",
            updated.id
        );
        Ok(&*self.user.insert(updated))
    }

    fn persist(&self, profile: &UserProfile) -> SessionResult<()> {
        let encoded = serde_json::to_string(profile).map_err(SessionError::Serialization)?;
        self.storage.set_item(USER_STORAGE_KEY, &encoded)?;
        Ok(())
    }
}

/// Builds the demo profile for `email`.
///
/// The display name is the email local part with dots turned into spaces
/// and each word capitalized.
pub fn profile_for_email(email: &str) -> UserProfile {
    let local_part = email.split('@').next().unwrap_or(email);
    let spaced = local_part.replace('.', " ");
    let name = WORD_RE
        .replace_all(&spaced, |caps: &Captures<'_>| {
            format!("{}{}", caps[1].to_uppercase(), &caps[2])
        })
        .into_owned();

    let mut profile = UserProfile {
        id: DEFAULT_USER_ID.to_string(),
        name,
        email: email.to_string(),
        avatar: Some(format!(
            "https://ui-avatars.com/api/?name={}&background=random",
            urlencoding::encode(local_part)
        )),
        role: None,
        department: None,
        completed_tasks: Some(DEFAULT_COMPLETED_TASKS),
        total_tasks: Some(DEFAULT_TOTAL_TASKS),
    };

    if email.eq_ignore_ascii_case(FEATURED_EMAIL) {
        profile.name = "Sarah Mitchell".to_string();
        profile.avatar = Some("https://randomuser.me/api/portraits/women/44.jpg".to_string());
        profile.role = Some("UI/UX Designer".to_string());
        profile.department = Some("Design".to_string());
    }

    profile
}
