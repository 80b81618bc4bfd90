use super::Context;
use clap::Args;

#[derive(Debug, Args)]
pub struct CoursesArgs {
    /// Show a single course by its code (e.g. CS201)
    #[arg(long)]
    pub code: Option<String>,
}

pub async fn execute(ctx: &Context, args: CoursesArgs) -> anyhow::Result<()> {
    let courses = match args.code {
        Some(code) => vec![ctx.client.courses().get_by_code(&code).await?],
        None => ctx.client.courses().list().await?,
    };
    if courses.is_empty() {
        println!("No courses");
        return Ok(());
    }
    for course in courses {
        println!(
            "{:>5}  {:<10} {} ({} sections)",
            course.id, course.course_code, course.course_name, course.section_count
        );
    }
    Ok(())
}
