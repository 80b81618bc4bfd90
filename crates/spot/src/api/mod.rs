//! Typed wrappers over the backend's REST resources.
//!
//! Each resource gets a small struct borrowing the [`SpotClient`]. List
//! reads log failures and fall back to an empty list; detail reads and
//! mutations return the error. Session errors always propagate so callers
//! can send the user back to login.

mod admin;
mod analytics;
mod attendance;
mod auth;
mod course;
mod enrollment;
mod schedule;
mod seat;
mod section;
mod student;
mod teacher;

pub use admin::AdminApi;
pub use analytics::AnalyticsApi;
pub use attendance::AttendanceApi;
pub use auth::AuthApi;
pub use course::CourseApi;
pub use enrollment::EnrollmentApi;
pub use schedule::ScheduleApi;
pub use seat::SeatApi;
pub use section::SectionApi;
pub use student::StudentApi;
pub use teacher::TeacherApi;

use crate::client::SpotClient;
use crate::error::SpotResult;
use tracing::warn;

impl SpotClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn courses(&self) -> CourseApi<'_> {
        CourseApi::new(self)
    }

    pub fn sections(&self) -> SectionApi<'_> {
        SectionApi::new(self)
    }

    pub fn schedules(&self) -> ScheduleApi<'_> {
        ScheduleApi::new(self)
    }

    pub fn seats(&self) -> SeatApi<'_> {
        SeatApi::new(self)
    }

    pub fn students(&self) -> StudentApi<'_> {
        StudentApi::new(self)
    }

    pub fn teachers(&self) -> TeacherApi<'_> {
        TeacherApi::new(self)
    }

    pub fn admins(&self) -> AdminApi<'_> {
        AdminApi::new(self)
    }

    pub fn enrollments(&self) -> EnrollmentApi<'_> {
        EnrollmentApi::new(self)
    }

    pub fn attendance(&self) -> AttendanceApi<'_> {
        AttendanceApi::new(self)
    }

    pub fn analytics(&self) -> AnalyticsApi<'_> {
        AnalyticsApi::new(self)
    }
}

/// Applies the list-read policy: failures become an empty list, except
/// session failures which still propagate.
pub(crate) fn or_empty<T>(result: SpotResult<Vec<T>>, what: &str) -> SpotResult<Vec<T>> {
    or_default(result, what)
}

pub(crate) fn or_default<T: Default>(result: SpotResult<T>, what: &str) -> SpotResult<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if e.needs_reauth() => Err(e),
        Err(e) => {
            warn!(resource = what, error = %e, "Read failed, using empty result");
            Ok(T::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpotError;

    #[test]
    fn test_or_empty_swallows_api_errors() {
        let failed: SpotResult<Vec<u8>> = Err(SpotError::Network {
            message: "refused".to_string(),
        });
        assert_eq!(or_empty(failed, "courses").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_or_empty_keeps_session_errors() {
        let failed: SpotResult<Vec<u8>> = Err(SpotError::Unauthorized);
        assert!(matches!(or_empty(failed, "courses"), Err(SpotError::Unauthorized)));
    }
}
