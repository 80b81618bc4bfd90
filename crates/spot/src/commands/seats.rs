use super::Context;
use anyhow::{bail, ensure};
use clap::Args;
use spot::seat_grid::SeatGrid;
use spot::state::LoadState;
use spot::viewmodel::SeatPlanViewModel;
use spot::UserRole;

#[derive(Debug, Args)]
pub struct SeatsArgs {
    pub section_id: i64,
}

#[derive(Debug, Args)]
pub struct PickSeatArgs {
    pub section_id: i64,

    /// Row, counted from 1
    pub row: u32,

    /// Column, counted from 1
    pub column: u32,
}

const LEGEND: &str = ". free   * yours   x taken   # selected";

pub async fn show(ctx: &Context, args: SeatsArgs) -> anyhow::Result<()> {
    let role = ctx.client.session().get().map(|s| s.role);
    if role == Some(UserRole::Student) {
        let vm = open_plan(ctx, args.section_id).await?;
        print_plan(&vm);
        return Ok(());
    }

    // Staff see the section's full map with its own dimensions
    let map = ctx.client.seats().seat_map(args.section_id).await?;
    let grid = SeatGrid::derive(map.rows, map.columns, &map.seats, None);
    print!("{}", grid.render(None));
    println!("{} of {} seats free", grid.available_count(), grid.capacity());
    Ok(())
}

pub async fn pick(ctx: &Context, args: PickSeatArgs) -> anyhow::Result<()> {
    ensure!(args.row > 0 && args.column > 0, "rows and columns start at 1");
    let mut vm = open_plan(ctx, args.section_id).await?;
    if !vm.select(args.row - 1, args.column - 1) {
        bail!("Seat row {}, column {} is not available", args.row, args.column);
    }
    match vm.submit().await {
        LoadState::Success(seat) => {
            println!("Seat row {}, column {} is yours", seat.row + 1, seat.column + 1);
            print_plan(&vm);
            Ok(())
        }
        LoadState::Error(message) => bail!(message),
        _ => Ok(()),
    }
}

async fn open_plan(ctx: &Context, section_id: i64) -> anyhow::Result<SeatPlanViewModel> {
    let section = ctx.client.sections().get(section_id).await?;
    let mut vm = SeatPlanViewModel::new(ctx.client.clone()).with_activity_log(ctx.activity.clone());
    if let LoadState::Error(message) = vm.open(section).await {
        bail!(message);
    }
    Ok(vm)
}

fn print_plan(vm: &SeatPlanViewModel) {
    if let Some(section) = vm.section() {
        println!("{} {}", section.course.course_code, section.section_name);
    }
    println!("{}", vm.schedule_text());
    let grid = vm.grid();
    print!("{}", grid.render(vm.selected()));
    println!("{LEGEND}");
    match vm.my_seat() {
        Some(seat) => println!("Your seat: row {}, column {}", seat.row + 1, seat.column + 1),
        None => println!("You have no seat yet"),
    }
}
