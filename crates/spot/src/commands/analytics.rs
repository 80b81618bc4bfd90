use super::Context;
use chrono::NaiveDate;
use clap::Args;
use spot::analytics::summarize;

#[derive(Debug, Args)]
pub struct AnalyticsArgs {
    pub section_id: i64,

    /// Start of a date range (YYYY-MM-DD); needs --to
    #[arg(long, requires = "to")]
    pub from: Option<NaiveDate>,

    #[arg(long, requires = "from")]
    pub to: Option<NaiveDate>,

    /// Per-student breakdown computed from the raw check-ins
    #[arg(long)]
    pub students: bool,
}

pub async fn execute(ctx: &Context, args: AnalyticsArgs) -> anyhow::Result<()> {
    let analytics = ctx.client.analytics();
    let report = match (args.from, args.to) {
        (Some(from), Some(to)) => analytics.section_range(args.section_id, from, to).await?,
        _ => analytics.section(args.section_id).await?,
    };

    println!("{} ({})", report.course_name, report.section_room);
    println!(
        "{} enrolled, {} class days, {:.1}% average attendance",
        report.total_enrolled_students, report.total_class_days, report.average_attendance_rate
    );
    for day in &report.daily_attendance {
        println!(
            "  {}  {:>3}/{:<3} {:>5.1}%",
            day.date, day.present_count, day.total_students, day.attendance_rate
        );
    }

    if args.students {
        let records = ctx.client.attendance().list_by_section(args.section_id).await?;
        let enrolled = (report.total_enrolled_students > 0)
            .then_some(report.total_enrolled_students as usize);
        let summary = summarize(&records, enrolled);
        println!("Students ({} sessions):", summary.total_sessions);
        for tally in &summary.by_student {
            println!(
                "  {:>6}  {:<28} {:>3}  {:>5.1}%",
                tally.student_id,
                tally.student_name.as_deref().unwrap_or("-"),
                tally.attendance_count,
                tally.attendance_percentage
            );
        }
    }
    Ok(())
}
