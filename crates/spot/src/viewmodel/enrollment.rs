use crate::client::SpotClient;
use crate::error::SpotError;
use crate::models::Enrollment;
use crate::notifications::{record_activity, SharedLog};
use crate::state::{LoadState, StateCell};
use std::sync::Mutex;
use tracing::{info, warn};

/// Why an enrollment attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollErrorType {
    General,
    /// Already in this very section
    DuplicateSection,
    /// Already in another section of the same course
    DuplicateCourse,
    InvalidKey,
    ClosedEnrollment,
    NetworkError,
}

impl EnrollErrorType {
    /// Classifies a failed enroll call by transport kind and server wording.
    pub fn classify(err: &SpotError) -> Self {
        match err {
            SpotError::Network { .. } => return EnrollErrorType::NetworkError,
            SpotError::Api { status, .. } if *status >= 500 => {
                return EnrollErrorType::NetworkError
            }
            SpotError::Api { status: 404, .. } => return EnrollErrorType::InvalidKey,
            _ => {}
        }

        let message = err.to_string().to_lowercase();
        if message.contains("already enrolled") {
            if message.contains("course") {
                EnrollErrorType::DuplicateCourse
            } else {
                EnrollErrorType::DuplicateSection
            }
        } else if message.contains("invalid enrollment key") || message.contains("invalid key") {
            EnrollErrorType::InvalidKey
        } else if message.contains("closed") || message.contains("not open") {
            EnrollErrorType::ClosedEnrollment
        } else {
            EnrollErrorType::General
        }
    }
}

/// A student's enrollments and the enroll-by-key action.
pub struct EnrollmentViewModel {
    client: SpotClient,
    activity: Option<SharedLog>,
    enrollments: StateCell<Vec<Enrollment>>,
    status: StateCell<bool>,
    enroll: StateCell<Enrollment>,
    last_error: Mutex<Option<EnrollErrorType>>,
}

impl EnrollmentViewModel {
    pub fn new(client: SpotClient) -> Self {
        Self {
            client,
            activity: None,
            enrollments: StateCell::new(),
            status: StateCell::new(),
            enroll: StateCell::new(),
            last_error: Mutex::new(None),
        }
    }

    pub fn with_activity_log(mut self, log: SharedLog) -> Self {
        self.activity = Some(log);
        self
    }

    pub fn enrollments(&self) -> &StateCell<Vec<Enrollment>> {
        &self.enrollments
    }

    pub fn status(&self) -> &StateCell<bool> {
        &self.status
    }

    pub fn enroll_state(&self) -> &StateCell<Enrollment> {
        &self.enroll
    }

    /// Kind of the most recent enroll failure, cleared by a success.
    pub fn last_error(&self) -> Option<EnrollErrorType> {
        self.last_error.lock().ok().and_then(|guard| *guard)
    }

    pub async fn load_enrollments(&self) -> LoadState<Vec<Enrollment>> {
        self.enrollments
            .run(async {
                let student_id = self.client.require_user_id()?;
                self.client.enrollments().list_by_student(student_id).await
            })
            .await
    }

    /// Whether the logged-in student is enrolled in `section_id`.
    pub async fn check_status(&self, section_id: i64) -> LoadState<bool> {
        self.status
            .run(async {
                let student_id = self.client.require_user_id()?;
                self.client
                    .enrollments()
                    .is_enrolled(student_id, section_id)
                    .await
            })
            .await
    }

    /// Enrolls with a section's key. A success is logged and refreshes the
    /// enrollment list.
    pub async fn enroll(&self, enrollment_key: &str) -> LoadState<Enrollment> {
        let key = enrollment_key.trim();
        let mut failure = None;
        let state = self
            .enroll
            .run(async {
                if key.is_empty() {
                    return Err(SpotError::validation("Please enter an enrollment key"));
                }
                self.client.require_user_id()?;
                let result = self.client.enrollments().enroll(key).await;
                if let Err(e) = &result {
                    failure = Some(EnrollErrorType::classify(e));
                }
                result
            })
            .await;

        if matches!(state, LoadState::Error(_)) && failure.is_none() {
            failure = Some(EnrollErrorType::General);
        }
        match self.last_error.lock() {
            Ok(mut guard) => *guard = failure,
            Err(_) => warn!("Enrollment error lock poisoned"),
        }

        if let LoadState::Success(enrollment) = &state {
            let section = &enrollment.section;
            info!(section_id = section.id, "Enrolled in section");
            record_activity(self.activity.as_ref(), |log| {
                log.log_enrollment(&section.course.course_name, &section.section_name, section.id)
            });
            self.load_enrollments().await;
        }
        state
    }

    pub fn reset_enroll(&self) {
        self.enroll.reset();
        if let Ok(mut guard) = self.last_error.lock() {
            *guard = None;
        }
    }
}
