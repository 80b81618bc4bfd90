use crate::analytics::{summarize, AttendanceSummary};
use crate::client::SpotClient;
use crate::models::Attendance;
use crate::notifications::{record_activity, SharedLog};
use crate::state::{LoadState, StateCell};
use chrono::{Local, NaiveDate};
use tracing::info;

/// Check-in state for students and attendance history for a section.
pub struct AttendanceViewModel {
    client: SpotClient,
    activity: Option<SharedLog>,
    log: StateCell<Attendance>,
    history: StateCell<Vec<Attendance>>,
}

impl AttendanceViewModel {
    pub fn new(client: SpotClient) -> Self {
        Self {
            client,
            activity: None,
            log: StateCell::new(),
            history: StateCell::new(),
        }
    }

    pub fn with_activity_log(mut self, log: SharedLog) -> Self {
        self.activity = Some(log);
        self
    }

    pub fn log_state(&self) -> &StateCell<Attendance> {
        &self.log
    }

    pub fn history(&self) -> &StateCell<Vec<Attendance>> {
        &self.history
    }

    /// Checks the logged-in student into `section_id`.
    pub async fn log_attendance(&self, section_id: i64) -> LoadState<Attendance> {
        let state = self
            .log
            .run(async {
                self.client.require_user_id()?;
                self.client.attendance().log(section_id).await
            })
            .await;

        if let LoadState::Success(record) = &state {
            let section_name = self.section_name(section_id).await;
            info!(section_id, attendance_id = record.id, "Attendance logged");
            let today = Local::now().date_naive();
            record_activity(self.activity.as_ref(), |log| {
                log.log_attendance_recorded(&section_name, today, section_id)
            });
        }
        state
    }

    async fn section_name(&self, section_id: i64) -> String {
        match self.client.sections().get(section_id).await {
            Ok(section) if !section.section_name.is_empty() => section.section_name,
            Ok(section) => section.course.course_name,
            Err(_) => format!("Section #{section_id}"),
        }
    }

    pub async fn load_section_history(&self, section_id: i64) -> LoadState<Vec<Attendance>> {
        self.history
            .run(self.client.attendance().list_by_section(section_id))
            .await
    }

    pub async fn load_section_day(
        &self,
        section_id: i64,
        date: NaiveDate,
    ) -> LoadState<Vec<Attendance>> {
        self.history
            .run(
                self.client
                    .attendance()
                    .list_by_section_and_date(section_id, date),
            )
            .await
    }

    /// The logged-in student's own records.
    pub async fn load_student_history(&self) -> LoadState<Vec<Attendance>> {
        self.history
            .run(async {
                let student_id = self.client.require_user_id()?;
                self.client.attendance().list_by_student(student_id).await
            })
            .await
    }

    /// Summary of the loaded history, when there is one.
    pub fn summary(&self, enrolled: Option<usize>) -> Option<AttendanceSummary> {
        match self.history.get() {
            LoadState::Success(records) => Some(summarize(&records, enrolled)),
            _ => None,
        }
    }

    pub fn reset_log(&self) {
        self.log.reset();
    }

    pub fn detach(&self) {
        self.log.detach();
        self.history.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::SpotError;

    fn view_model() -> AttendanceViewModel {
        AttendanceViewModel::new(SpotClient::new(&ClientConfig::default()).unwrap())
    }

    #[tokio::test]
    async fn test_log_requires_login() {
        let vm = view_model();
        let state = vm.log_attendance(3).await;
        assert_eq!(state, LoadState::Error(SpotError::NotLoggedIn.user_message()));
    }

    #[test]
    fn test_summary_of_loaded_history() {
        let vm = view_model();
        assert!(vm.summary(None).is_none());

        vm.history().set_success(vec![Attendance {
            id: 1,
            student: None,
            section: None,
            student_id: Some(4),
            section_id: Some(3),
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            start_time: None,
            end_time: None,
        }]);
        let summary = vm.summary(Some(2)).unwrap();
        assert_eq!(summary.total_sessions, 1);
        assert_eq!(summary.by_date[0].percentage, 50.0);
    }
}
