use std::sync::Arc;

use chrono::Utc;
use meetspace::{
    error::SessionError,
    ids::UuidSource,
    meetings::{
        query::{filter_and_sort, upcoming, MeetingQuery},
        MeetingStore,
    },
    models::MeetingStatus,
    pace::InstantPace,
};

fn sample_store() -> MeetingStore {
    MeetingStore::with_samples(Utc::now(), Arc::new(UuidSource), Arc::new(InstantPace))
}

#[tokio::test]
async fn join_by_id_accepts_a_known_meeting() {
    let mut store = sample_store();

    let joined = store.join_by_id("3").await.expect("meeting id 3 exists");
    assert_eq!(joined.status, MeetingStatus::Ongoing);
    assert_eq!(store.find("3").unwrap().status, MeetingStatus::Ongoing);
}

#[tokio::test]
async fn join_by_id_rejects_an_unknown_meeting() {
    let mut store = sample_store();

    let result = store.join_by_id("999").await;
    assert!(matches!(result, Err(SessionError::MeetingNotFound)));
}

#[tokio::test]
async fn join_by_id_trims_user_input() {
    let mut store = sample_store();

    let joined = store.join_by_id("  1 ").await.expect("whitespace trimmed");
    assert_eq!(joined.id, "1");
}

#[test]
fn searching_standup_finds_exactly_the_team_standup() {
    let store = sample_store();

    let found = filter_and_sort(
        store.meetings(),
        &MeetingQuery {
            search: "standup".to_string(),
            ..MeetingQuery::default()
        },
    );

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Team Standup");
}

#[test]
fn the_dashboard_sees_three_upcoming_sample_meetings() {
    let now = Utc::now();
    let store = MeetingStore::with_samples(now, Arc::new(UuidSource), Arc::new(InstantPace));

    let next = upcoming(store.meetings(), now, 3);
    assert_eq!(next.len(), 3);
    for meeting in next {
        assert_eq!(meeting.status, MeetingStatus::Scheduled);
        assert!(meeting.start_time > now);
    }
}
