use chrono::{DateTime, Duration, Utc};

use crate::models::{Meeting, MeetingStatus, User};

fn avatar_url(photo_id: &str) -> String {
    format!(
        "https://images.pexels.com/photos/{photo_id}/pexels-photo-{photo_id}.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&dpr=1"
    )
}

fn sample_user(id: &str, name: &str, email: &str, photo_id: &str, is_online: bool) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        avatar: Some(avatar_url(photo_id)),
        is_online: Some(is_online),
        role: None,
        department: None,
        phone: None,
        timezone: None,
        created_at: Utc::now(),
        last_login_at: None,
    }
}

pub fn sample_users() -> Vec<User> {
    vec![
        sample_user("1", "John Doe", "john@company.com", "2379004", true),
        sample_user("2", "Sarah Wilson", "sarah@company.com", "774909", true),
        sample_user("3", "Mike Chen", "mike@company.com", "1222271", false),
        sample_user("4", "Emily Rodriguez", "emily@company.com", "1130626", true),
    ]
}

/// The six demo meetings, with start times laid out around the given
/// reference instant: one live right now, a mix of upcoming and past.
pub fn sample_meetings(now: DateTime<Utc>) -> Vec<Meeting> {
    let users = sample_users();

    vec![
        Meeting {
            id: "1".to_string(),
            title: "Team Standup".to_string(),
            description: "Daily team standup meeting to discuss progress and blockers".to_string(),
            start_time: now + Duration::minutes(30),
            duration: 30,
            host: users[0].clone(),
            participants: vec![users[0].clone(), users[1].clone(), users[2].clone()],
            status: MeetingStatus::Scheduled,
            meeting_url: "meet.company.com/team-standup-123".to_string(),
        },
        Meeting {
            id: "2".to_string(),
            title: "Product Review".to_string(),
            description: "Weekly product review with stakeholders and development team"
                .to_string(),
            start_time: now + Duration::hours(2),
            duration: 60,
            host: users[1].clone(),
            participants: vec![users[0].clone(), users[1].clone(), users[3].clone()],
            status: MeetingStatus::Scheduled,
            meeting_url: "meet.company.com/product-review-456".to_string(),
        },
        Meeting {
            id: "3".to_string(),
            title: "Client Presentation".to_string(),
            description: "Quarterly presentation to key client stakeholders".to_string(),
            start_time: now - Duration::minutes(30),
            duration: 90,
            host: users[0].clone(),
            participants: users.clone(),
            status: MeetingStatus::Ongoing,
            meeting_url: "meet.company.com/client-presentation-789".to_string(),
        },
        Meeting {
            id: "4".to_string(),
            title: "Design System Workshop".to_string(),
            description: "Workshop to establish design system guidelines and components"
                .to_string(),
            start_time: now - Duration::days(1),
            duration: 120,
            host: users[2].clone(),
            participants: vec![users[1].clone(), users[2].clone(), users[3].clone()],
            status: MeetingStatus::Completed,
            meeting_url: "meet.company.com/design-workshop-101".to_string(),
        },
        Meeting {
            id: "5".to_string(),
            title: "Sprint Planning".to_string(),
            description: "Planning session for the upcoming sprint with the development team"
                .to_string(),
            start_time: now + Duration::days(1),
            duration: 90,
            host: users[1].clone(),
            participants: vec![users[0].clone(), users[1].clone(), users[2].clone()],
            status: MeetingStatus::Scheduled,
            meeting_url: "meet.company.com/sprint-planning-202".to_string(),
        },
        Meeting {
            id: "6".to_string(),
            title: "All Hands Meeting".to_string(),
            description: "Monthly company-wide meeting to share updates and announcements"
                .to_string(),
            start_time: now - Duration::days(7),
            duration: 60,
            host: users[0].clone(),
            participants: users,
            status: MeetingStatus::Completed,
            meeting_url: "meet.company.com/all-hands-303".to_string(),
        },
    ]
}
