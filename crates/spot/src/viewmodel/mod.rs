//! Screen-level state holders.
//!
//! Each view-model owns a [`SpotClient`] and one [`StateCell`] per thing its
//! screen observes. Actions run a fetch through the cell, so a screen that
//! subscribes sees `Loading` followed by the outcome, and results of
//! superseded fetches are dropped.
//!
//! [`SpotClient`]: crate::client::SpotClient
//! [`StateCell`]: crate::state::StateCell

mod attendance;
mod enrollment;
mod seat;
mod sections;

pub use attendance::AttendanceViewModel;
pub use enrollment::{EnrollErrorType, EnrollmentViewModel};
pub use seat::SeatPlanViewModel;
pub use sections::SectionsViewModel;
