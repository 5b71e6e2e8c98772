use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Contact, ContactGroup};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum PresenceFilter {
    All,
    Online,
    Favorites,
}

/// Case-insensitive substring search over name, email and department,
/// combined with the presence filter. A contact without a department never
/// matches on department.
pub fn filter_contacts<'a>(
    contacts: &'a [Contact],
    search: &str,
    presence: PresenceFilter,
) -> Vec<&'a Contact> {
    let needle = search.to_lowercase();

    contacts
        .iter()
        .filter(|contact| {
            let matches_search = needle.is_empty()
                || contact.name.to_lowercase().contains(&needle)
                || contact.email.to_lowercase().contains(&needle)
                || contact
                    .department
                    .as_ref()
                    .is_some_and(|department| department.to_lowercase().contains(&needle));

            let matches_presence = match presence {
                PresenceFilter::All => true,
                PresenceFilter::Online => contact.is_online,
                PresenceFilter::Favorites => contact.is_favorite,
            };

            matches_search && matches_presence
        })
        .collect()
}

/// Derived department membership; nothing is stored on the contact beyond
/// its own department field.
pub fn group_by_department<'a>(contacts: &'a [Contact], department: &str) -> Vec<&'a Contact> {
    contacts
        .iter()
        .filter(|contact| contact.department.as_deref() == Some(department))
        .collect()
}

/// Buckets elapsed time since a contact was last seen: "Just now" under a
/// minute, then minutes, hours, days, and a plain date past a week.
pub fn format_last_seen(last_seen: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - last_seen).num_minutes();

    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = hours / 24;
    if days < 7 {
        return format!("{days}d ago");
    }

    last_seen.format("%-m/%-d/%Y").to_string()
}

fn avatar_url(photo_id: &str) -> String {
    format!(
        "https://images.pexels.com/photos/{photo_id}/pexels-photo-{photo_id}.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&dpr=1"
    )
}

#[allow(clippy::too_many_arguments)]
fn contact(
    id: &str,
    name: &str,
    email: &str,
    photo_id: &str,
    is_online: bool,
    last_seen: Option<DateTime<Utc>>,
    department: &str,
    role: &str,
    phone: &str,
    timezone: &str,
    is_favorite: bool,
    tags: &[&str],
) -> Contact {
    Contact {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        avatar: Some(avatar_url(photo_id)),
        is_online,
        last_seen,
        department: Some(department.to_string()),
        role: Some(role.to_string()),
        phone: Some(phone.to_string()),
        timezone: Some(timezone.to_string()),
        is_favorite,
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
    }
}

pub fn sample_contacts(now: DateTime<Utc>) -> Vec<Contact> {
    vec![
        contact(
            "1",
            "Sarah Wilson",
            "sarah@company.com",
            "774909",
            true,
            None,
            "Engineering",
            "Senior Developer",
            "+1 (555) 123-4567",
            "PST",
            true,
            &["frontend", "react", "team-lead"],
        ),
        contact(
            "2",
            "Mike Chen",
            "mike@company.com",
            "1222271",
            false,
            Some(now - Duration::hours(2)),
            "Design",
            "UX Designer",
            "+1 (555) 234-5678",
            "EST",
            false,
            &["design", "ux", "prototyping"],
        ),
        contact(
            "3",
            "Emily Rodriguez",
            "emily@company.com",
            "1130626",
            true,
            None,
            "Product",
            "Product Manager",
            "+1 (555) 345-6789",
            "CST",
            true,
            &["product", "strategy", "analytics"],
        ),
        contact(
            "4",
            "David Kim",
            "david@company.com",
            "2379004",
            true,
            None,
            "Engineering",
            "Backend Developer",
            "+1 (555) 456-7890",
            "PST",
            false,
            &["backend", "api", "database"],
        ),
        contact(
            "5",
            "Lisa Thompson",
            "lisa@company.com",
            "1239291",
            false,
            Some(now - Duration::days(1)),
            "Marketing",
            "Marketing Director",
            "+1 (555) 567-8901",
            "EST",
            true,
            &["marketing", "campaigns", "analytics"],
        ),
        contact(
            "6",
            "Alex Johnson",
            "alex@company.com",
            "1043471",
            true,
            None,
            "Sales",
            "Sales Manager",
            "+1 (555) 678-9012",
            "MST",
            false,
            &["sales", "client-relations", "revenue"],
        ),
    ]
}

/// The demo groups are derived views over the flat contact list.
pub fn sample_contact_groups(contacts: &[Contact]) -> Vec<ContactGroup> {
    let group = |id: &str, name: &str, members: Vec<&Contact>, color: &str| ContactGroup {
        id: id.to_string(),
        name: name.to_string(),
        contacts: members.into_iter().cloned().collect(),
        color: color.to_string(),
    };

    vec![
        group(
            "1",
            "Engineering Team",
            group_by_department(contacts, "Engineering"),
            "blue",
        ),
        group(
            "2",
            "Design Team",
            group_by_department(contacts, "Design"),
            "purple",
        ),
        group(
            "3",
            "Product Team",
            group_by_department(contacts, "Product"),
            "green",
        ),
        group(
            "4",
            "Favorites",
            contacts.iter().filter(|c| c.is_favorite).collect(),
            "yellow",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2025-06-11T15:00:00Z".parse().expect("valid instant")
    }

    #[test]
    fn search_covers_name_email_and_department() {
        let contacts = sample_contacts(now());

        let by_name = filter_contacts(&contacts, "sarah", PresenceFilter::All);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Sarah Wilson");

        let by_department = filter_contacts(&contacts, "engineering", PresenceFilter::All);
        assert_eq!(by_department.len(), 2);

        let by_email = filter_contacts(&contacts, "alex@", PresenceFilter::All);
        assert_eq!(by_email.len(), 1);
    }

    #[test]
    fn presence_filters_narrow_the_result() {
        let contacts = sample_contacts(now());

        let online = filter_contacts(&contacts, "", PresenceFilter::Online);
        assert!(online.iter().all(|contact| contact.is_online));
        assert_eq!(online.len(), 4);

        let favorites = filter_contacts(&contacts, "", PresenceFilter::Favorites);
        assert!(favorites.iter().all(|contact| contact.is_favorite));
        assert_eq!(favorites.len(), 3);
    }

    #[test]
    fn groups_are_derived_and_contacts_may_repeat_across_them() {
        let contacts = sample_contacts(now());
        let groups = sample_contact_groups(&contacts);

        let engineering = &groups[0];
        assert_eq!(engineering.contacts.len(), 2);

        // Sarah is both in Engineering and in Favorites.
        let favorites = &groups[3];
        assert!(favorites.contacts.iter().any(|c| c.name == "Sarah Wilson"));
        assert!(engineering.contacts.iter().any(|c| c.name == "Sarah Wilson"));
    }

    #[test]
    fn last_seen_buckets() {
        let now = now();

        assert_eq!(format_last_seen(now - Duration::seconds(20), now), "Just now");
        assert_eq!(format_last_seen(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(format_last_seen(now - Duration::hours(2), now), "2h ago");
        assert_eq!(format_last_seen(now - Duration::days(3), now), "3d ago");
        assert_eq!(format_last_seen(now - Duration::days(30), now), "5/12/2025");
    }
}
