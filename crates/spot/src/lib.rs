//! Client SDK for the SPOT (Student Presence and Oversight Tracker) backend.
//!
//! [`SpotClient`] is the typed HTTP transport; resource modules hang off it
//! (`client.courses()`, `client.attendance()`, ...). The remaining modules
//! hold the screen-side logic: loading state, the attendance calendar, the
//! seat grid, QR check-in and the local activity log.

pub mod analytics;
pub mod api;
pub mod calendar;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod notifications;
pub mod qr;
pub mod seat_grid;
pub mod session;
pub mod state;
pub mod store;
pub mod timetable;
pub mod viewmodel;

pub use client::SpotClient;
pub use config::ClientConfig;
pub use error::{SpotError, SpotResult};
pub use notifications::NotificationLog;
pub use session::{AuthSession, UserRole};
pub use state::{LoadState, StateCell};
pub use store::LocalStore;
