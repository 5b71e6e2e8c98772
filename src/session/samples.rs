use chrono::{DateTime, Duration, Utc};

use crate::models::{
    ChatMessage, ChatMessageKind, MeetingParticipant, Poll, PollOption, PresentationSlide,
    SlideKind, User,
};

fn avatar_url(photo_id: &str) -> String {
    format!(
        "https://images.pexels.com/photos/{photo_id}/pexels-photo-{photo_id}.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&dpr=1"
    )
}

fn slide_thumbnail(photo_id: &str) -> String {
    format!(
        "https://images.pexels.com/photos/{photo_id}/pexels-photo-{photo_id}.jpeg?auto=compress&cs=tinysrgb&w=300&h=200&dpr=1"
    )
}

#[allow(clippy::too_many_arguments)]
fn participant(
    id: &str,
    name: &str,
    email: &str,
    photo_id: &str,
    is_host: bool,
    is_muted: bool,
    is_video_on: bool,
    joined_at: DateTime<Utc>,
) -> MeetingParticipant {
    MeetingParticipant {
        user: User {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            avatar: Some(avatar_url(photo_id)),
            is_online: Some(true),
            role: None,
            department: None,
            phone: None,
            timezone: None,
            created_at: Utc::now(),
            last_login_at: None,
        },
        is_host,
        is_muted,
        is_video_on,
        joined_at,
    }
}

/// Demo roster for the client-presentation room. The first entry is the
/// local user and host.
pub fn sample_participants(now: DateTime<Utc>) -> Vec<MeetingParticipant> {
    vec![
        participant(
            "1",
            "John Doe",
            "john@company.com",
            "2379004",
            true,
            false,
            true,
            now,
        ),
        participant(
            "2",
            "Sarah Wilson",
            "sarah@client.com",
            "774909",
            false,
            false,
            true,
            now - Duration::minutes(5),
        ),
        participant(
            "3",
            "Mike Chen",
            "mike@client.com",
            "1222271",
            false,
            true,
            false,
            now - Duration::minutes(3),
        ),
        participant(
            "4",
            "Emily Rodriguez",
            "emily@client.com",
            "1130626",
            false,
            false,
            true,
            now - Duration::minutes(8),
        ),
    ]
}

pub fn sample_chat(participants: &[MeetingParticipant], now: DateTime<Utc>) -> Vec<ChatMessage> {
    if participants.len() < 4 {
        return Vec::new();
    }

    vec![
        ChatMessage {
            id: "1".to_string(),
            author: participants[1].user.clone(),
            message: "Great presentation so far! The Q4 results are impressive.".to_string(),
            timestamp: now - Duration::minutes(2),
            kind: ChatMessageKind::Message,
        },
        ChatMessage {
            id: "2".to_string(),
            author: participants[2].user.clone(),
            message: "Could you elaborate on the customer acquisition strategy?".to_string(),
            timestamp: now - Duration::minutes(1),
            kind: ChatMessageKind::Question,
        },
        ChatMessage {
            id: "3".to_string(),
            author: participants[3].user.clone(),
            message: "\u{1f44d}".to_string(),
            timestamp: now - Duration::seconds(30),
            kind: ChatMessageKind::Reaction,
        },
    ]
}

pub fn sample_poll(now: DateTime<Utc>) -> Poll {
    Poll {
        id: "1".to_string(),
        question: "Which strategic priority should we focus on first in 2025?".to_string(),
        options: vec![
            PollOption {
                id: "1".to_string(),
                text: "Product Innovation".to_string(),
                votes: 3,
                voters: vec!["2".to_string(), "3".to_string(), "4".to_string()],
            },
            PollOption {
                id: "2".to_string(),
                text: "Market Expansion".to_string(),
                votes: 1,
                voters: vec!["1".to_string()],
            },
            PollOption {
                id: "3".to_string(),
                text: "Customer Experience".to_string(),
                votes: 0,
                voters: Vec::new(),
            },
            PollOption {
                id: "4".to_string(),
                text: "Operational Excellence".to_string(),
                votes: 0,
                voters: Vec::new(),
            },
        ],
        is_active: true,
        created_by: "1".to_string(),
        created_at: now - Duration::minutes(5),
    }
}

pub fn sample_slides() -> Vec<PresentationSlide> {
    vec![
        PresentationSlide {
            id: "1".to_string(),
            title: "Q4 2024 Performance Review".to_string(),
            content: "Quarterly Business Results & Strategic Outlook".to_string(),
            kind: SlideKind::Title,
            thumbnail: slide_thumbnail("590022"),
            notes: Some(
                "Welcome everyone to our Q4 performance review. Today we'll cover key metrics, \
                 achievements, and strategic direction for 2025."
                    .to_string(),
            ),
        },
        PresentationSlide {
            id: "2".to_string(),
            title: "Key Achievements".to_string(),
            content: "• 25% Revenue Growth\n• 40% Customer Acquisition\n• 95% Client \
                      Satisfaction\n• 15 New Team Members"
                .to_string(),
            kind: SlideKind::Content,
            thumbnail: slide_thumbnail("3184291"),
            notes: Some(
                "Highlight the exceptional growth we've achieved this quarter across all key \
                 metrics."
                    .to_string(),
            ),
        },
        PresentationSlide {
            id: "3".to_string(),
            title: "Revenue Performance".to_string(),
            content: "Q4 revenue exceeded targets by 15% with strong performance across all \
                      segments"
                .to_string(),
            kind: SlideKind::Chart,
            thumbnail: slide_thumbnail("590020"),
            notes: Some(
                "Break down the revenue performance by segment and discuss the factors driving \
                 growth."
                    .to_string(),
            ),
        },
        PresentationSlide {
            id: "4".to_string(),
            title: "Customer Success Stories".to_string(),
            content: "Showcasing our impact on client businesses".to_string(),
            kind: SlideKind::Image,
            thumbnail: slide_thumbnail("3184465"),
            notes: Some(
                "Share specific customer success stories and testimonials that demonstrate our \
                 value proposition."
                    .to_string(),
            ),
        },
        PresentationSlide {
            id: "5".to_string(),
            title: "2025 Strategic Roadmap".to_string(),
            content: "Our vision and key initiatives for the upcoming year".to_string(),
            kind: SlideKind::Content,
            thumbnail: slide_thumbnail("3184339"),
            notes: Some(
                "Outline the strategic priorities and major initiatives planned for 2025."
                    .to_string(),
            ),
        },
    ]
}
