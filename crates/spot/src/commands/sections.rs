use super::Context;
use clap::Args;
use spot::state::LoadState;
use spot::viewmodel::SectionsViewModel;
use spot::UserRole;

#[derive(Debug, Args)]
pub struct SectionsArgs {
    /// Only sections of this course
    #[arg(long)]
    pub course: Option<i64>,

    /// Only sections you teach or are enrolled in
    #[arg(long, conflicts_with = "course")]
    pub mine: bool,

    /// Filter by course name, course code or section name
    #[arg(long)]
    pub search: Option<String>,
}

pub async fn execute(ctx: &Context, args: SectionsArgs) -> anyhow::Result<()> {
    let vm = SectionsViewModel::new(ctx.client.clone());
    let state = if let Some(course_id) = args.course {
        vm.load_by_course(course_id).await
    } else if args.mine {
        let role = ctx.client.session().get().map(|s| s.role);
        match role {
            Some(UserRole::Teacher) => vm.load_for_teacher().await,
            _ => vm.load_enrolled().await,
        }
    } else {
        vm.load_all().await
    };
    if let LoadState::Error(message) = state {
        anyhow::bail!(message);
    }

    let sections = vm.filter(args.search.as_deref().unwrap_or(""));
    if sections.is_empty() {
        println!("No sections");
        return Ok(());
    }
    for section in sections {
        println!(
            "{:>5}  {:<10} {:<6} {:<24} {:>3} enrolled  {}  {}",
            section.id,
            section.course.course_code,
            section.section_name,
            section.instructor_name(),
            section.enrollment_count,
            if section.enrollment_open { "open" } else { "closed" },
            section.schedule_text()
        );
    }
    Ok(())
}
