pub mod contact;
pub mod donations;
pub mod events;
