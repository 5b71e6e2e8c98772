//! Client-side state for a meeting workspace: scheduling and derived meeting
//! views, the auth session, contacts, and per-room collaborative state.
//! Everything is local to the process; the identity directory and meeting
//! lookup are mocks behind trait seams so a real backend can slot in later.

pub mod auth;
pub mod contacts;
pub mod error;
pub mod ids;
pub mod meetings;
pub mod models;
pub mod pace;
pub mod session;

use std::{path::PathBuf, sync::Arc, time::Duration};

use chrono::Utc;

use auth::{directory::MockDirectory, vault::SessionVault, SessionStore};
use error::SessionError;
use ids::{IdSource, UuidSource};
use meetings::MeetingStore;
use models::Contact;
use pace::{NetworkPace, SimulatedPace};

pub use error::SessionError as Error;

/// Top-level application scope. Owns the session store, the meeting
/// collection and the contact list; consumers receive it explicitly instead
/// of reaching for ambient global state.
pub struct AppContext {
    pub auth: SessionStore,
    pub meetings: MeetingStore,
    pub contacts: Vec<Contact>,
}

impl AppContext {
    /// Demo configuration: mock directory, simulated latency, sample data,
    /// session persisted under the platform data directory.
    pub fn bootstrap() -> Result<Self, SessionError> {
        Self::bootstrap_with(
            SessionVault::file_backed(resolve_data_dir()),
            Arc::new(SimulatedPace::new(Duration::from_millis(500))),
            Arc::new(UuidSource),
        )
    }

    pub fn bootstrap_with(
        vault: SessionVault,
        pace: Arc<dyn NetworkPace>,
        ids: Arc<dyn IdSource>,
    ) -> Result<Self, SessionError> {
        let now = Utc::now();
        let auth = SessionStore::new(
            Box::new(MockDirectory::with_seed_users()),
            vault,
            pace.clone(),
            ids.clone(),
        )?;

        Ok(Self {
            auth,
            meetings: MeetingStore::with_samples(now, ids, pace),
            contacts: contacts::sample_contacts(now),
        })
    }
}

fn resolve_data_dir() -> PathBuf {
    if let Some(dir) = dirs::data_local_dir() {
        return dir.join("meetspace");
    }

    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".meetspace")
}
