use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};

use crate::{
    ids::IdSource,
    models::{
        Annotation, AnnotationKind, ChatMessage, ChatMessageKind, MeetingParticipant, Poll,
        PollOption, PresentationSlide,
    },
};

pub mod samples;

/// Fields of an annotation the author chooses; id, timestamp and author are
/// filled in by the session.
#[derive(Debug, Clone)]
pub struct AnnotationDraft {
    pub kind: AnnotationKind,
    pub x: f64,
    pub y: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub color: String,
    pub content: Option<String>,
}

/// Per-meeting collaborative state: roster, chat, the active poll, the slide
/// deck and its annotations. Created fresh when a meeting is entered and
/// dropped when it ends; nothing here is ever persisted.
pub struct RoomSession {
    meeting_id: String,
    title: String,
    participants: Vec<MeetingParticipant>,
    messages: Vec<ChatMessage>,
    active_poll: Option<Poll>,
    slides: Vec<PresentationSlide>,
    current_slide: usize,
    annotations: HashMap<usize, Vec<Annotation>>,
    elapsed_seconds: u64,
    ids: Arc<dyn IdSource>,
}

impl RoomSession {
    /// The first participant is the local user.
    pub fn new(
        meeting_id: impl Into<String>,
        title: impl Into<String>,
        participants: Vec<MeetingParticipant>,
        slides: Vec<PresentationSlide>,
        ids: Arc<dyn IdSource>,
    ) -> Self {
        Self {
            meeting_id: meeting_id.into(),
            title: title.into(),
            participants,
            messages: Vec::new(),
            active_poll: None,
            slides,
            current_slide: 0,
            annotations: HashMap::new(),
            elapsed_seconds: 0,
            ids,
        }
    }

    /// Room pre-populated with the client-presentation demo data.
    pub fn demo(
        meeting_id: impl Into<String>,
        title: impl Into<String>,
        now: DateTime<Utc>,
        ids: Arc<dyn IdSource>,
    ) -> Self {
        let participants = samples::sample_participants(now);
        let messages = samples::sample_chat(&participants, now);
        let mut session = Self::new(
            meeting_id,
            title,
            participants,
            samples::sample_slides(),
            ids,
        );
        session.messages = messages;
        session.active_poll = Some(samples::sample_poll(now));
        session
    }

    pub fn meeting_id(&self) -> &str {
        &self.meeting_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn participants(&self) -> &[MeetingParticipant] {
        &self.participants
    }

    pub fn local_participant(&self) -> Option<&MeetingParticipant> {
        self.participants.first()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn active_poll(&self) -> Option<&Poll> {
        self.active_poll.as_ref()
    }

    pub fn slides(&self) -> &[PresentationSlide] {
        &self.slides
    }

    pub fn current_slide(&self) -> usize {
        self.current_slide
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Flips the local participant's mute state and returns the new value.
    pub fn toggle_mute(&mut self) -> bool {
        match self.participants.first_mut() {
            Some(local) => {
                local.is_muted = !local.is_muted;
                local.is_muted
            }
            None => false,
        }
    }

    /// Flips the local participant's camera state and returns the new value.
    pub fn toggle_video(&mut self) -> bool {
        match self.participants.first_mut() {
            Some(local) => {
                local.is_video_on = !local.is_video_on;
                local.is_video_on
            }
            None => false,
        }
    }

    /// Appends a chat message authored by the local participant. Empty or
    /// whitespace-only text is dropped.
    pub fn send_message(&mut self, text: &str, now: DateTime<Utc>) -> Option<&ChatMessage> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let author = self.local_participant()?.user.clone();

        self.messages.push(ChatMessage {
            id: self.ids.mint(),
            author,
            message: trimmed.to_string(),
            timestamp: now,
            kind: ChatMessageKind::Message,
        });
        self.messages.last()
    }

    /// Opens a new poll, replacing any previous one.
    pub fn start_poll(
        &mut self,
        question: impl Into<String>,
        options: Vec<String>,
        now: DateTime<Utc>,
    ) -> Option<&Poll> {
        let created_by = self.local_participant()?.user.id.clone();

        self.active_poll = Some(Poll {
            id: self.ids.mint(),
            question: question.into(),
            options: options
                .into_iter()
                .map(|text| PollOption {
                    id: self.ids.mint(),
                    text,
                    votes: 0,
                    voters: Vec::new(),
                })
                .collect(),
            is_active: true,
            created_by,
            created_at: now,
        });
        self.active_poll.as_ref()
    }

    pub fn close_poll(&mut self) {
        if let Some(poll) = self.active_poll.as_mut() {
            poll.is_active = false;
        }
    }

    /// Records a vote on the active poll. One vote per voter per poll:
    /// voting again moves the prior vote to the new option. Returns false
    /// when there is no active poll or the option id is unknown.
    pub fn vote(&mut self, option_id: &str, voter_id: &str) -> bool {
        let Some(poll) = self.active_poll.as_mut() else {
            return false;
        };
        if !poll.is_active {
            return false;
        }
        let Some(target) = poll.options.iter().position(|option| option.id == option_id) else {
            return false;
        };

        for option in &mut poll.options {
            let before = option.voters.len();
            option.voters.retain(|voter| voter != voter_id);
            option.votes -= (before - option.voters.len()) as u32;
        }

        let option = &mut poll.options[target];
        option.voters.push(voter_id.to_string());
        option.votes += 1;
        true
    }

    /// Appends an overlay annotation to the given slide, authored by the
    /// local participant.
    pub fn annotate(
        &mut self,
        slide: usize,
        draft: AnnotationDraft,
        now: DateTime<Utc>,
    ) -> Option<&Annotation> {
        if slide >= self.slides.len() {
            return None;
        }
        let author = self.local_participant()?.user.id.clone();

        let entries = self.annotations.entry(slide).or_default();
        entries.push(Annotation {
            id: self.ids.mint(),
            kind: draft.kind,
            x: draft.x,
            y: draft.y,
            width: draft.width,
            height: draft.height,
            color: draft.color,
            content: draft.content,
            timestamp: now,
            author,
        });
        entries.last()
    }

    pub fn annotations_for(&self, slide: usize) -> &[Annotation] {
        self.annotations
            .get(&slide)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The eraser: drops every annotation on the slide.
    pub fn clear_annotations(&mut self, slide: usize) {
        self.annotations.remove(&slide);
    }

    /// Saturating navigation; never wraps.
    pub fn next_slide(&mut self) -> usize {
        if self.current_slide + 1 < self.slides.len() {
            self.current_slide += 1;
        }
        self.current_slide
    }

    pub fn prev_slide(&mut self) -> usize {
        self.current_slide = self.current_slide.saturating_sub(1);
        self.current_slide
    }

    pub fn go_to_slide(&mut self, index: usize) -> bool {
        if index < self.slides.len() {
            self.current_slide = index;
            true
        } else {
            false
        }
    }

    /// Advances the presentation timer by one second.
    pub fn tick(&mut self) -> u64 {
        self.elapsed_seconds += 1;
        self.elapsed_seconds
    }
}

/// "m:ss" rendering of the presentation timer.
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialSource;

    fn session() -> RoomSession {
        RoomSession::demo(
            "3",
            "Client Presentation",
            Utc::now(),
            Arc::new(SequentialSource::starting_at(10)),
        )
    }

    fn assert_poll_invariant(poll: &Poll) {
        for option in &poll.options {
            assert_eq!(option.votes as usize, option.voters.len());
        }
    }

    #[test]
    fn whitespace_messages_are_dropped() {
        let mut session = session();
        let before = session.messages().len();

        assert!(session.send_message("   ", Utc::now()).is_none());
        assert!(session.send_message("", Utc::now()).is_none());
        assert_eq!(session.messages().len(), before);
    }

    #[test]
    fn sent_messages_are_appended_in_order() {
        let mut session = session();
        let before = session.messages().len();

        let sent = session
            .send_message("  Thanks everyone! ", Utc::now())
            .expect("message accepted");
        assert_eq!(sent.message, "Thanks everyone!");
        assert_eq!(sent.kind, ChatMessageKind::Message);
        assert_eq!(session.messages().len(), before + 1);
    }

    #[test]
    fn votes_always_match_voter_lists() {
        let mut session = session();

        assert!(session.vote("2", "7"));
        assert!(session.vote("2", "7")); // same option again
        assert!(session.vote("3", "7")); // moves the vote
        assert!(session.vote("1", "8"));
        assert!(!session.vote("99", "8")); // unknown option

        let poll = session.active_poll().expect("demo poll");
        assert_poll_invariant(poll);

        // Voter 7 ended up on option 3 only.
        for option in &poll.options {
            let times = option.voters.iter().filter(|v| *v == "7").count();
            assert_eq!(times, usize::from(option.id == "3"));
        }
    }

    #[test]
    fn closed_polls_reject_votes() {
        let mut session = session();
        session.close_poll();
        assert!(!session.vote("1", "7"));
    }

    #[test]
    fn slide_navigation_saturates_at_both_ends() {
        let mut session = session();
        let last = session.slides().len() - 1;

        assert_eq!(session.prev_slide(), 0);
        for _ in 0..session.slides().len() + 3 {
            session.next_slide();
        }
        assert_eq!(session.current_slide(), last);
        assert!(session.go_to_slide(2));
        assert!(!session.go_to_slide(99));
        assert_eq!(session.current_slide(), 2);
    }

    #[test]
    fn annotations_append_and_clear_per_slide() {
        let mut session = session();
        let draft = AnnotationDraft {
            kind: AnnotationKind::Pen,
            x: 0.4,
            y: 0.6,
            width: None,
            height: None,
            color: "#ff0000".to_string(),
            content: None,
        };

        assert!(session.annotate(0, draft.clone(), Utc::now()).is_some());
        assert!(session.annotate(0, draft.clone(), Utc::now()).is_some());
        assert!(session.annotate(1, draft.clone(), Utc::now()).is_some());
        assert!(session.annotate(99, draft, Utc::now()).is_none());

        assert_eq!(session.annotations_for(0).len(), 2);
        assert_eq!(session.annotations_for(1).len(), 1);

        session.clear_annotations(0);
        assert!(session.annotations_for(0).is_empty());
        assert_eq!(session.annotations_for(1).len(), 1);
    }

    #[test]
    fn local_toggles_update_the_roster_entry() {
        let mut session = session();

        assert!(session.toggle_mute());
        assert!(session.local_participant().unwrap().is_muted);
        assert!(!session.toggle_video());
        assert!(!session.local_participant().unwrap().is_video_on);
    }

    #[test]
    fn clock_formats_minutes_and_padded_seconds() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(600), "10:00");
    }
}
