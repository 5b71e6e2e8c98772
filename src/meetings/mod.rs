use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::{
    error::SessionError,
    ids::IdSource,
    models::{Meeting, MeetingStatus, ScheduleMeetingInput},
    pace::NetworkPace,
};

pub mod query;
pub mod samples;

/// Owns the session's meeting collection. Derived views live in [`query`];
/// this type only holds the list and applies the few mutations the app
/// performs: scheduling and joining. Meetings are never transitioned to
/// `Completed` automatically; the seed data carries completed entries but no
/// time-based sweep exists.
pub struct MeetingStore {
    meetings: Vec<Meeting>,
    ids: Arc<dyn IdSource>,
    pace: Arc<dyn NetworkPace>,
}

impl MeetingStore {
    pub fn new(ids: Arc<dyn IdSource>, pace: Arc<dyn NetworkPace>) -> Self {
        Self {
            meetings: Vec::new(),
            ids,
            pace,
        }
    }

    /// Store pre-seeded with the six demo meetings laid out around `now`.
    pub fn with_samples(
        now: DateTime<Utc>,
        ids: Arc<dyn IdSource>,
        pace: Arc<dyn NetworkPace>,
    ) -> Self {
        Self {
            meetings: samples::sample_meetings(now),
            ids,
            pace,
        }
    }

    pub fn meetings(&self) -> &[Meeting] {
        &self.meetings
    }

    pub fn find(&self, id: &str) -> Option<&Meeting> {
        self.meetings.iter().find(|meeting| meeting.id == id)
    }

    /// Creates a scheduled meeting with a fresh id and meeting URL. The host
    /// is guaranteed a participant slot at creation time; later participant
    /// edits are not re-checked.
    pub fn schedule(&mut self, input: ScheduleMeetingInput) -> Meeting {
        let mut participants = input.participants;
        if !participants
            .iter()
            .any(|participant| participant.id == input.host.id)
        {
            participants.insert(0, input.host.clone());
        }

        let meeting = Meeting {
            id: self.ids.mint(),
            title: input.title,
            description: input.description,
            start_time: input.start_time,
            duration: input.duration.max(1),
            host: input.host,
            participants,
            status: MeetingStatus::Scheduled,
            meeting_url: format!("meet.company.com/{}", self.ids.mint()),
        };

        info!(meeting_id = %meeting.id, title = %meeting.title, "meeting scheduled");
        self.meetings.push(meeting.clone());
        meeting
    }

    /// Marks the meeting as ongoing and returns it. Joining an already
    /// ongoing meeting is a plain re-entry.
    pub fn join(&mut self, id: &str) -> Result<Meeting, SessionError> {
        let Some(meeting) = self.meetings.iter_mut().find(|meeting| meeting.id == id) else {
            warn!(candidate = %id, "join rejected: meeting not found");
            return Err(SessionError::MeetingNotFound);
        };

        meeting.status = MeetingStatus::Ongoing;
        info!(meeting_id = %meeting.id, "meeting joined");
        Ok(meeting.clone())
    }

    /// Join-by-id entry surface: validates a user-supplied candidate id
    /// against the known collection after the network-pace suspension point,
    /// then joins it.
    pub async fn join_by_id(&mut self, candidate: &str) -> Result<Meeting, SessionError> {
        self.pace.pause().await;
        self.join(candidate.trim())
    }
}
