use super::Context;
use chrono::Local;
use clap::Args;
use spot::timetable::{format_am_pm, is_within_class_schedule};

#[derive(Debug, Args)]
pub struct SchedulesArgs {
    pub section_id: i64,

    /// Also say whether a class is in session right now
    #[arg(long)]
    pub now: bool,
}

pub async fn execute(ctx: &Context, args: SchedulesArgs) -> anyhow::Result<()> {
    let schedules = ctx.client.schedules().list_by_section(args.section_id).await?;
    if schedules.is_empty() {
        println!("No schedules");
    }
    for s in &schedules {
        println!(
            "{:<10} {:>7} - {:<7} {:<12} {}",
            s.day_label(),
            format_am_pm(s.time_start),
            format_am_pm(s.time_end),
            s.room,
            s.schedule_type.label()
        );
    }
    if args.now {
        let in_session = is_within_class_schedule(&schedules, None, Local::now().naive_local());
        println!(
            "{}",
            if in_session { "Class is in session" } else { "No class right now" }
        );
    }
    Ok(())
}
