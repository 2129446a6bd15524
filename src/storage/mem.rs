//! In-memory backend. Process-lifetime only; used for development and
//! tests, seeded with the three sample events the site ships with.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;

use crate::db::models::{
    ContactSubmission, Donation, Event, InsertContactSubmission, InsertDonation, InsertEvent,
    InsertUser, User,
};
use crate::storage::Storage;

#[derive(Default)]
struct Inner {
    users: HashMap<i64, User>,
    events: HashMap<i64, Event>,
    contact_submissions: HashMap<i64, ContactSubmission>,
    donations: HashMap<i64, Donation>,
    next_user_id: i64,
    next_event_id: i64,
    next_contact_id: i64,
    next_donation_id: i64,
}

impl Inner {
    // Shared by create_event and the constructor's seeding, so seeded and
    // runtime-created events get identical id assignment.
    fn insert_event(&mut self, event: InsertEvent) -> Event {
        let id = self.next_event_id;
        self.next_event_id += 1;
        let event = Event {
            id,
            title: event.title,
            description: event.description,
            date: event.date,
            location: event.location,
            created_at: Utc::now(),
        };
        self.events.insert(id, event.clone());
        event
    }
}

pub struct MemStorage {
    inner: Mutex<Inner>,
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStorage {
    pub fn new() -> Self {
        let mut inner = Inner {
            next_user_id: 1,
            next_event_id: 1,
            next_contact_id: 1,
            next_donation_id: 1,
            ..Default::default()
        };

        for event in sample_events() {
            inner.insert_event(event);
        }

        Self {
            inner: Mutex::new(inner),
        }
    }
}

fn sample_events() -> Vec<InsertEvent> {
    vec![
        InsertEvent {
            title: "Pride History Walking Tour".to_string(),
            description: "Explore historic LGBTQ+ landmarks in downtown Atlanta with our knowledgeable guides.".to_string(),
            date: "June 15, 2024 • 2:00 PM".to_string(),
            location: "Midtown Atlanta".to_string(),
        },
        InsertEvent {
            title: "Oral History Workshop".to_string(),
            description: "Learn techniques for conducting and preserving oral histories in our community.".to_string(),
            date: "June 28, 2024 • 6:00 PM".to_string(),
            location: "Virtual Event".to_string(),
        },
        InsertEvent {
            title: "Archive Digitization Day".to_string(),
            description: "Volunteer to help digitize historical documents and photographs for online preservation.".to_string(),
            date: "July 12, 2024 • 10:00 AM".to_string(),
            location: "Project Headquarters".to_string(),
        },
    ]
}

#[async_trait]
impl Storage for MemStorage {
    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create_user(&self, user: InsertUser) -> Result<User> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_user_id;
        inner.next_user_id += 1;
        let user = User {
            id,
            username: user.username,
            password: user.password,
        };
        inner.users.insert(id, user.clone());
        Ok(user)
    }

    async fn get_events(&self) -> Result<Vec<Event>> {
        let inner = self.inner.lock().unwrap();
        let mut events: Vec<Event> = inner.events.values().cloned().collect();
        events.sort_by_key(|event| event.id);
        Ok(events)
    }

    async fn get_event(&self, id: i64) -> Result<Option<Event>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.events.get(&id).cloned())
    }

    async fn create_event(&self, event: InsertEvent) -> Result<Event> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner.insert_event(event))
    }

    async fn create_contact_submission(
        &self,
        submission: InsertContactSubmission,
    ) -> Result<ContactSubmission> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_contact_id;
        inner.next_contact_id += 1;
        let submission = ContactSubmission {
            id,
            name: submission.name,
            email: submission.email,
            subject: submission.subject,
            message: submission.message,
            created_at: Utc::now(),
        };
        inner.contact_submissions.insert(id, submission.clone());
        Ok(submission)
    }

    async fn get_contact_submissions(&self) -> Result<Vec<ContactSubmission>> {
        let inner = self.inner.lock().unwrap();
        let mut submissions: Vec<ContactSubmission> =
            inner.contact_submissions.values().cloned().collect();
        // Most recent first; ids break ties for same-millisecond inserts.
        submissions.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(submissions)
    }

    async fn create_donation(&self, donation: InsertDonation) -> Result<Donation> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_donation_id;
        inner.next_donation_id += 1;
        let donation = Donation {
            id,
            amount: donation.amount,
            donor_name: donation.donor_name,
            donor_email: donation.donor_email,
            is_recurring: donation.is_recurring,
            created_at: Utc::now(),
        };
        inner.donations.insert(id, donation.clone());
        Ok(donation)
    }

    async fn get_donations(&self) -> Result<Vec<Donation>> {
        let inner = self.inner.lock().unwrap();
        let mut donations: Vec<Donation> = inner.donations.values().cloned().collect();
        donations.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(donations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fresh_store_is_seeded_with_three_events() {
        let store = MemStorage::new();
        let events = store.get_events().await.unwrap();

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].id, 1);
        assert_eq!(events[0].title, "Pride History Walking Tour");
        assert_eq!(events[1].id, 2);
        assert_eq!(events[1].title, "Oral History Workshop");
        assert_eq!(events[2].id, 3);
        assert_eq!(events[2].title, "Archive Digitization Day");
    }

    #[tokio::test]
    async fn created_records_round_trip_by_id() {
        let store = MemStorage::new();

        let user = store
            .create_user(InsertUser {
                username: "archivist".to_string(),
                password: "hunter2".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(store.get_user(user.id).await.unwrap(), Some(user.clone()));

        let event = store
            .create_event(InsertEvent {
                title: "Board Meeting".to_string(),
                description: "Quarterly planning.".to_string(),
                date: "August 1, 2024 • 7:00 PM".to_string(),
                location: "Virtual Event".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(event.id, 4); // three seeds came first
        assert_eq!(store.get_event(event.id).await.unwrap(), Some(event));
    }

    #[tokio::test]
    async fn absent_lookups_return_none() {
        let store = MemStorage::new();

        assert_eq!(store.get_user(999).await.unwrap(), None);
        assert_eq!(store.get_event(999).await.unwrap(), None);
        assert_eq!(
            store.get_user_by_username("nonexistent").await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn user_lookup_by_username_finds_match() {
        let store = MemStorage::new();
        let created = store
            .create_user(InsertUser {
                username: "volunteer".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap();

        let found = store.get_user_by_username("volunteer").await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn contact_submissions_list_most_recent_first() {
        let store = MemStorage::new();

        let a = store
            .create_contact_submission(InsertContactSubmission {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                subject: "Volunteering".to_string(),
                message: "How can I help?".to_string(),
            })
            .await
            .unwrap();
        let b = store
            .create_contact_submission(InsertContactSubmission {
                name: "Bob".to_string(),
                email: "bob@example.com".to_string(),
                subject: "Donation question".to_string(),
                message: "Is my donation tax deductible?".to_string(),
            })
            .await
            .unwrap();

        let listed = store.get_contact_submissions().await.unwrap();
        assert_eq!(listed, vec![b, a]);
    }

    #[tokio::test]
    async fn donations_list_most_recent_first() {
        let store = MemStorage::new();

        let first = store
            .create_donation(InsertDonation {
                amount: 25.0,
                donor_name: None,
                donor_email: None,
                is_recurring: false,
            })
            .await
            .unwrap();
        let second = store
            .create_donation(InsertDonation {
                amount: 100.0,
                donor_name: Some("Carol".to_string()),
                donor_email: Some("carol@example.com".to_string()),
                is_recurring: false,
            })
            .await
            .unwrap();

        let listed = store.get_donations().await.unwrap();
        assert_eq!(listed, vec![second, first]);
    }

    #[tokio::test]
    async fn donation_fields_survive_creation() {
        let store = MemStorage::new();
        let before = Utc::now();

        let donation = store
            .create_donation(InsertDonation {
                amount: 50.0,
                donor_name: None,
                donor_email: None,
                is_recurring: true,
            })
            .await
            .unwrap();

        assert_eq!(donation.amount, 50.0);
        assert!(donation.is_recurring);
        assert_eq!(donation.donor_name, None);
        assert!(donation.created_at >= before);
    }

    #[tokio::test]
    async fn each_entity_has_its_own_id_counter() {
        let store = MemStorage::new();

        let user = store
            .create_user(InsertUser {
                username: "a".to_string(),
                password: "b".to_string(),
            })
            .await
            .unwrap();
        let donation = store
            .create_donation(InsertDonation {
                amount: 10.0,
                donor_name: None,
                donor_email: None,
                is_recurring: false,
            })
            .await
            .unwrap();
        let submission = store
            .create_contact_submission(InsertContactSubmission {
                name: "n".to_string(),
                email: "e@example.com".to_string(),
                subject: "s".to_string(),
                message: "m".to_string(),
            })
            .await
            .unwrap();
        let event = store
            .create_event(InsertEvent {
                title: "t".to_string(),
                description: "d".to_string(),
                date: "soon".to_string(),
                location: "here".to_string(),
            })
            .await
            .unwrap();

        // Interleaved creates never share or skip ids across entities.
        assert_eq!(user.id, 1);
        assert_eq!(donation.id, 1);
        assert_eq!(submission.id, 1);
        assert_eq!(event.id, 4);

        let second_user = store
            .create_user(InsertUser {
                username: "c".to_string(),
                password: "d".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(second_user.id, 2);
    }
}
