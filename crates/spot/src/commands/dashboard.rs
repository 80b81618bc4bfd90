use super::Context;
use anyhow::bail;
use spot::dashboard::{AdminDashboard, TeacherDashboard};
use spot::state::LoadState;
use spot::UserRole;
use std::fmt::Display;

pub async fn execute(ctx: &Context) -> anyhow::Result<()> {
    let Some(session) = ctx.client.session().get() else {
        bail!("User not logged in. Please log in.");
    };
    match session.role {
        UserRole::Teacher => {
            let dashboard = TeacherDashboard::load(&ctx.client).await?;
            if let Some(teacher) = dashboard.profile.data() {
                println!("{}", teacher.name());
            }
            line("Sections", &dashboard.sections, |s| s.len());
            println!("Students: {}", dashboard.total_students());
        }
        UserRole::Admin | UserRole::SystemAdmin => {
            let dashboard = AdminDashboard::load(&ctx.client).await;
            line("Courses", &dashboard.courses, |c| c.len());
            line("Sections", &dashboard.sections, |s| s.len());
            println!("Open for enrollment: {}", dashboard.open_sections());
            line("Teachers", &dashboard.teachers, |t| t.len());
            line("Students", &dashboard.students, |s| s.len());
        }
        UserRole::Student => bail!("Dashboards are for teachers and admins"),
    }
    Ok(())
}

fn line<T, V: Display>(label: &str, state: &LoadState<T>, value: impl Fn(&T) -> V) {
    match state {
        LoadState::Success(data) => println!("{label}: {}", value(data)),
        LoadState::Error(message) => println!("{label}: unavailable ({message})"),
        _ => println!("{label}: -"),
    }
}
