use crate::client::SpotClient;
use crate::error::SpotResult;
use crate::models::Section;
use crate::state::{LoadState, StateCell};
use tracing::debug;

/// Section lists for the course browser, the teacher's classes and the
/// student's enrolled classes.
pub struct SectionsViewModel {
    client: SpotClient,
    sections: StateCell<Vec<Section>>,
    detail: StateCell<Section>,
}

impl SectionsViewModel {
    pub fn new(client: SpotClient) -> Self {
        Self {
            client,
            sections: StateCell::new(),
            detail: StateCell::new(),
        }
    }

    pub fn sections(&self) -> &StateCell<Vec<Section>> {
        &self.sections
    }

    pub fn detail(&self) -> &StateCell<Section> {
        &self.detail
    }

    pub async fn load_by_course(&self, course_id: i64) -> LoadState<Vec<Section>> {
        self.sections
            .run(self.client.sections().list_by_course(course_id))
            .await
    }

    pub async fn load_all(&self) -> LoadState<Vec<Section>> {
        self.sections.run(self.client.sections().list_all()).await
    }

    /// Sections taught by the logged-in teacher.
    pub async fn load_for_teacher(&self) -> LoadState<Vec<Section>> {
        self.sections
            .run(async {
                let teacher_id = self.client.require_user_id()?;
                self.client.sections().list_by_teacher(teacher_id).await
            })
            .await
    }

    /// Sections the logged-in student is enrolled in.
    pub async fn load_enrolled(&self) -> LoadState<Vec<Section>> {
        self.sections.run(self.enrolled_sections()).await
    }

    async fn enrolled_sections(&self) -> SpotResult<Vec<Section>> {
        let student_id = self.client.require_user_id()?;
        let enrollments = self.client.enrollments().list_by_student(student_id).await?;
        debug!(student_id, count = enrollments.len(), "Loaded enrolled sections");
        Ok(enrollments.into_iter().map(|e| e.section).collect())
    }

    pub async fn load_detail(&self, section_id: i64) -> LoadState<Section> {
        self.detail.run(self.client.sections().get(section_id)).await
    }

    /// Loaded sections whose course name, course code or section name
    /// contains `query`, ignoring case. An empty query matches everything.
    pub fn filter(&self, query: &str) -> Vec<Section> {
        let query = query.trim().to_lowercase();
        let LoadState::Success(sections) = self.sections.get() else {
            return Vec::new();
        };
        sections
            .into_iter()
            .filter(|s| {
                query.is_empty()
                    || s.section_name.to_lowercase().contains(&query)
                    || s.course.course_name.to_lowercase().contains(&query)
                    || s.course.course_code.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// The screen was left; in-flight results are discarded.
    pub fn detach(&self) {
        self.sections.detach();
        self.detail.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::SpotError;
    use crate::models::Course;

    fn section(id: i64, name: &str, course: &str, code: &str) -> Section {
        Section {
            id,
            course: Course {
                id: 1,
                course_name: course.to_string(),
                course_description: String::new(),
                course_code: code.to_string(),
                section_count: 1,
                schedule: None,
            },
            teacher: None,
            section_name: name.to_string(),
            enrollment_key: None,
            enrollment_open: true,
            enrollment_count: 0,
        }
    }

    fn view_model() -> SectionsViewModel {
        SectionsViewModel::new(SpotClient::new(&ClientConfig::default()).unwrap())
    }

    #[test]
    fn test_filter_matches_course_and_section() {
        let vm = view_model();
        vm.sections().set_success(vec![
            section(1, "G01", "Data Structures", "CS201"),
            section(2, "G02", "Operating Systems", "CS301"),
        ]);

        assert_eq!(vm.filter("").len(), 2);
        assert_eq!(vm.filter("cs3")[0].id, 2);
        assert_eq!(vm.filter("data")[0].id, 1);
        assert_eq!(vm.filter(" g0 ").len(), 2);
        assert!(vm.filter("physics").is_empty());
    }

    #[tokio::test]
    async fn test_teacher_sections_need_login() {
        let vm = view_model();
        let state = vm.load_for_teacher().await;
        assert_eq!(state, LoadState::Error(SpotError::NotLoggedIn.user_message()));
    }
}
