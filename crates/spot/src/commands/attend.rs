use super::Context;
use anyhow::bail;
use clap::Args;
use spot::notifications::record_activity;
use spot::qr::{AttendanceScanner, ScanFailureKind, ScanState};

#[derive(Debug, Args)]
pub struct AttendArgs {
    /// Decoded QR payload, e.g. `attend:42`
    pub payload: String,
}

#[derive(Debug, Args)]
pub struct QrArgs {
    pub section_id: i64,
}

pub async fn attend(ctx: &Context, args: AttendArgs) -> anyhow::Result<()> {
    let mut scanner = AttendanceScanner::new();
    let state = scanner.scan(&ctx.client, &args.payload).await.clone();
    match state {
        ScanState::Logged(record) => {
            let section_id = record.section_ref().unwrap_or_default();
            let section_name = record
                .section
                .as_ref()
                .map(|s| s.section_name.clone())
                .unwrap_or_else(|| format!("Section #{section_id}"));
            record_activity(Some(&ctx.activity), |log| log.log_qr_scan(&section_name, section_id));
            record_activity(Some(&ctx.activity), |log| {
                log.log_attendance_recorded(&section_name, record.date, section_id)
            });
            println!("Attendance recorded for {section_name} on {}", record.date);
            Ok(())
        }
        ScanState::Failed(message) => {
            if scanner.failure_kind() == Some(ScanFailureKind::DuplicateAttendance) {
                println!("Attendance already recorded for today");
                return Ok(());
            }
            bail!(message)
        }
        _ => Ok(()),
    }
}

pub async fn qr(ctx: &Context, args: QrArgs) -> anyhow::Result<()> {
    let code = ctx.client.attendance().generate_qr(args.section_id).await?;
    println!("Section: {} ({})", code.section_id, code.course_name);
    println!("Date:    {}", code.date);
    println!("Payload: {}", code.qr_code_url);
    if code.expires_in_seconds > 0 {
        println!("Expires in {}s", code.expires_in_seconds);
    }
    Ok(())
}
