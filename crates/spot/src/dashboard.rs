//! Multi-resource overview screens.
//!
//! Every resource is fetched concurrently and lands in its own
//! [`LoadState`], so one failing fetch leaves the others intact.

use crate::client::SpotClient;
use crate::error::SpotResult;
use crate::models::{Course, Section, Student, Teacher};
use crate::state::LoadState;
use futures::join;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct AdminDashboard {
    pub courses: LoadState<Vec<Course>>,
    pub sections: LoadState<Vec<Section>>,
    pub teachers: LoadState<Vec<Teacher>>,
    pub students: LoadState<Vec<Student>>,
}

impl AdminDashboard {
    pub async fn load(client: &SpotClient) -> Self {
        let courses = client.courses();
        let sections = client.sections();
        let teachers = client.teachers();
        let students = client.students();

        let (courses, sections, teachers, students) = join!(
            courses.list(),
            sections.list_all(),
            teachers.list(),
            students.list()
        );

        let dashboard = Self {
            courses: LoadState::from_result(courses),
            sections: LoadState::from_result(sections),
            teachers: LoadState::from_result(teachers),
            students: LoadState::from_result(students),
        };
        info!(
            courses = count(&dashboard.courses),
            sections = count(&dashboard.sections),
            teachers = count(&dashboard.teachers),
            students = count(&dashboard.students),
            "Admin dashboard loaded"
        );
        dashboard
    }

    /// Sections with enrollment currently open.
    pub fn open_sections(&self) -> usize {
        self.sections
            .data()
            .map(|s| s.iter().filter(|s| s.enrollment_open).count())
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeacherDashboard {
    pub profile: LoadState<Teacher>,
    pub sections: LoadState<Vec<Section>>,
}

impl TeacherDashboard {
    /// Loads the logged-in teacher's profile and sections.
    pub async fn load(client: &SpotClient) -> SpotResult<Self> {
        let teacher_id = client.require_user_id()?;
        let teachers = client.teachers();
        let sections = client.sections();

        let (profile, sections) = join!(teachers.me(), sections.list_by_teacher(teacher_id));

        Ok(Self {
            profile: LoadState::from_result(profile),
            sections: LoadState::from_result(sections),
        })
    }

    /// Students across all of the teacher's sections.
    pub fn total_students(&self) -> u32 {
        self.sections
            .data()
            .map(|s| s.iter().map(|s| s.enrollment_count).sum())
            .unwrap_or(0)
    }
}

fn count<T>(state: &LoadState<Vec<T>>) -> usize {
    state.data().map(Vec::len).unwrap_or(0)
}
