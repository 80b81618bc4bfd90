use super::Context;
use chrono::Local;
use clap::Args;
use spot::calendar::{create_calendar_days, month_summary, render_calendar, YearMonth};

#[derive(Debug, Args)]
pub struct CalendarArgs {
    pub section_id: i64,

    /// Month to show as YYYY-MM; defaults to the current month
    #[arg(long)]
    pub month: Option<YearMonth>,

    /// Student to show (teachers); defaults to yourself
    #[arg(long)]
    pub student: Option<i64>,
}

pub async fn execute(ctx: &Context, args: CalendarArgs) -> anyhow::Result<()> {
    let student_id = match args.student {
        Some(id) => id,
        None => ctx.client.require_user_id()?,
    };
    let month = args
        .month
        .unwrap_or_else(|| YearMonth::of(Local::now().date_naive()));

    let stats = ctx
        .client
        .analytics()
        .student_in_section(args.section_id, student_id)
        .await?;
    let days = create_calendar_days(
        month,
        &stats.attendance_by_date,
        Some(&stats.attendance_data),
    );
    let summary = month_summary(&days);

    println!("{} - {month}", stats.student_name);
    print!("{}", render_calendar(&days));
    println!("P present   L late   A absent   . no class");
    println!(
        "{} present, {} late, {} absent ({}%)",
        summary.present,
        summary.late,
        summary.absent,
        summary.attendance_rate()
    );
    Ok(())
}
