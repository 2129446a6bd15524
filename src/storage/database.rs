//! SQLite-backed storage. One query per operation; ids and creation
//! timestamps come from the database via `INSERT ... RETURNING`.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use tokio::task;

use crate::db::models::{
    ContactSubmission, Donation, Event, InsertContactSubmission, InsertDonation, InsertEvent,
    InsertUser, User,
};
use crate::db::DbPool;
use crate::storage::Storage;

pub struct DatabaseStorage {
    pool: DbPool,
}

impl DatabaseStorage {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn parse_datetime(s: String) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
    })
}

fn event_from_row(row: &Row) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        date: row.get(3)?,
        location: row.get(4)?,
        created_at: parse_datetime(row.get::<_, String>(5)?),
    })
}

fn submission_from_row(row: &Row) -> rusqlite::Result<ContactSubmission> {
    Ok(ContactSubmission {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        subject: row.get(3)?,
        message: row.get(4)?,
        created_at: parse_datetime(row.get::<_, String>(5)?),
    })
}

fn donation_from_row(row: &Row) -> rusqlite::Result<Donation> {
    Ok(Donation {
        id: row.get(0)?,
        amount: row.get(1)?,
        donor_name: row.get(2)?,
        donor_email: row.get(3)?,
        is_recurring: row.get(4)?,
        created_at: parse_datetime(row.get::<_, String>(5)?),
    })
}

#[async_trait]
impl Storage for DatabaseStorage {
    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let pool = self.pool.clone();
        task::spawn_blocking(move || -> Result<Option<User>> {
            let conn = pool.get()?;
            let result = conn.query_row(
                "SELECT id, username, password FROM users WHERE id = ?1",
                params![id],
                user_from_row,
            );
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await?
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let pool = self.pool.clone();
        let username = username.to_string();
        task::spawn_blocking(move || -> Result<Option<User>> {
            let conn = pool.get()?;
            let result = conn.query_row(
                "SELECT id, username, password FROM users WHERE username = ?1",
                params![username],
                user_from_row,
            );
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await?
    }

    async fn create_user(&self, user: InsertUser) -> Result<User> {
        let pool = self.pool.clone();
        task::spawn_blocking(move || -> Result<User> {
            let conn = pool.get()?;
            let user = conn.query_row(
                "INSERT INTO users (username, password) VALUES (?1, ?2)
                 RETURNING id, username, password",
                params![user.username, user.password],
                user_from_row,
            )?;
            Ok(user)
        })
        .await?
    }

    async fn get_events(&self) -> Result<Vec<Event>> {
        let pool = self.pool.clone();
        task::spawn_blocking(move || -> Result<Vec<Event>> {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT id, title, description, date, location, created_at
                 FROM events ORDER BY id",
            )?;
            let events = stmt
                .query_map([], event_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(events)
        })
        .await?
    }

    async fn get_event(&self, id: i64) -> Result<Option<Event>> {
        let pool = self.pool.clone();
        task::spawn_blocking(move || -> Result<Option<Event>> {
            let conn = pool.get()?;
            let result = conn.query_row(
                "SELECT id, title, description, date, location, created_at
                 FROM events WHERE id = ?1",
                params![id],
                event_from_row,
            );
            match result {
                Ok(event) => Ok(Some(event)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await?
    }

    async fn create_event(&self, event: InsertEvent) -> Result<Event> {
        let pool = self.pool.clone();
        task::spawn_blocking(move || -> Result<Event> {
            let conn = pool.get()?;
            let event = conn.query_row(
                "INSERT INTO events (title, description, date, location)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING id, title, description, date, location, created_at",
                params![event.title, event.description, event.date, event.location],
                event_from_row,
            )?;
            Ok(event)
        })
        .await?
    }

    async fn create_contact_submission(
        &self,
        submission: InsertContactSubmission,
    ) -> Result<ContactSubmission> {
        let pool = self.pool.clone();
        task::spawn_blocking(move || -> Result<ContactSubmission> {
            let conn = pool.get()?;
            let submission = conn.query_row(
                "INSERT INTO contact_submissions (name, email, subject, message)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING id, name, email, subject, message, created_at",
                params![
                    submission.name,
                    submission.email,
                    submission.subject,
                    submission.message
                ],
                submission_from_row,
            )?;
            Ok(submission)
        })
        .await?
    }

    async fn get_contact_submissions(&self) -> Result<Vec<ContactSubmission>> {
        let pool = self.pool.clone();
        task::spawn_blocking(move || -> Result<Vec<ContactSubmission>> {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT id, name, email, subject, message, created_at
                 FROM contact_submissions ORDER BY created_at DESC, id DESC",
            )?;
            let submissions = stmt
                .query_map([], submission_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(submissions)
        })
        .await?
    }

    async fn create_donation(&self, donation: InsertDonation) -> Result<Donation> {
        let pool = self.pool.clone();
        task::spawn_blocking(move || -> Result<Donation> {
            let conn = pool.get()?;
            let donation = conn.query_row(
                "INSERT INTO donations (amount, donor_name, donor_email, is_recurring)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING id, amount, donor_name, donor_email, is_recurring, created_at",
                params![
                    donation.amount,
                    donation.donor_name,
                    donation.donor_email,
                    donation.is_recurring
                ],
                donation_from_row,
            )?;
            Ok(donation)
        })
        .await?
    }

    async fn get_donations(&self) -> Result<Vec<Donation>> {
        let pool = self.pool.clone();
        task::spawn_blocking(move || -> Result<Vec<Donation>> {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT id, amount, donor_name, donor_email, is_recurring, created_at
                 FROM donations ORDER BY created_at DESC, id DESC",
            )?;
            let donations = stmt
                .query_map([], donation_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(donations)
        })
        .await?
    }
}
