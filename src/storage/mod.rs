//! Storage backends for the site's four record types.
//!
//! Everything the route handlers persist goes through the [`Storage`]
//! trait: an in-memory backend for development and tests, and a
//! SQLite-backed one for deployments. Which backend runs is decided once
//! at startup (see `main.rs`); handlers only ever see `Arc<dyn Storage>`.
//!
//! Contract notes:
//! - Point lookups return `Ok(None)` when nothing matches. Absence is a
//!   normal outcome, not an error.
//! - Creates assign the id (and `created_at` where the record has one) in
//!   the backend; callers never supply them.
//! - Events list ascending by id. Contact submissions and donations list
//!   most recent first in both backends.
//! - Input validation is the handlers' job; storage trusts its input.

use crate::db::models::{
    ContactSubmission, Donation, Event, InsertContactSubmission, InsertDonation, InsertEvent,
    InsertUser, User,
};
use anyhow::Result;
use async_trait::async_trait;

pub mod database;
pub mod mem;

pub use database::DatabaseStorage;
pub use mem::MemStorage;

#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_user(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn create_user(&self, user: InsertUser) -> Result<User>;

    async fn get_events(&self) -> Result<Vec<Event>>;
    async fn get_event(&self, id: i64) -> Result<Option<Event>>;
    async fn create_event(&self, event: InsertEvent) -> Result<Event>;

    async fn create_contact_submission(
        &self,
        submission: InsertContactSubmission,
    ) -> Result<ContactSubmission>;
    async fn get_contact_submissions(&self) -> Result<Vec<ContactSubmission>>;

    async fn create_donation(&self, donation: InsertDonation) -> Result<Donation>;
    async fn get_donations(&self) -> Result<Vec<Donation>>;
}
