use super::Context;
use clap::Args;
use spot::state::LoadState;
use spot::viewmodel::{EnrollErrorType, EnrollmentViewModel};

#[derive(Debug, Args)]
pub struct EnrollArgs {
    /// The key your teacher shared for the section
    pub key: String,
}

pub async fn execute(ctx: &Context, args: EnrollArgs) -> anyhow::Result<()> {
    let vm = EnrollmentViewModel::new(ctx.client.clone()).with_activity_log(ctx.activity.clone());
    match vm.enroll(&args.key).await {
        LoadState::Success(enrollment) => {
            let section = &enrollment.section;
            println!(
                "Enrolled in {} - {} ({})",
                section.course.course_name,
                section.section_name,
                section.schedule_text()
            );
            Ok(())
        }
        LoadState::Error(message) => {
            let hint = match vm.last_error() {
                Some(EnrollErrorType::DuplicateSection) => "You are already in this section.",
                Some(EnrollErrorType::DuplicateCourse) => {
                    "You are already in another section of this course."
                }
                Some(EnrollErrorType::InvalidKey) => "Check the enrollment key with your teacher.",
                Some(EnrollErrorType::ClosedEnrollment) => "Enrollment for this section is closed.",
                Some(EnrollErrorType::NetworkError) => "Could not reach the server.",
                _ => "",
            };
            if hint.is_empty() {
                anyhow::bail!(message);
            }
            anyhow::bail!("{message}\n{hint}");
        }
        _ => Ok(()),
    }
}
