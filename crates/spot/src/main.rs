use clap::{Parser, Subcommand};
use spot::ClientConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::Context;

#[derive(Parser)]
#[command(name = "spot")]
#[command(about = "Command-line client for the SPOT attendance system", long_about = None)]
struct Cli {
    /// Backend base URL, overriding SPOT_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with an email or a student id
    Login(commands::auth::LoginArgs),

    /// Forget the stored credentials
    Logout,

    /// Show the logged-in user
    Whoami,

    /// List courses
    Courses(commands::courses::CoursesArgs),

    /// List sections of a course, your own, or all of them
    Sections(commands::sections::SectionsArgs),

    /// Show a section's class times
    Schedules(commands::schedules::SchedulesArgs),

    /// Render a section's seat plan
    Seats(commands::seats::SeatsArgs),

    /// Claim a seat in a section
    PickSeat(commands::seats::PickSeatArgs),

    /// Enroll with a section's enrollment key
    Enroll(commands::enroll::EnrollArgs),

    /// Check in with a scanned QR payload
    Attend(commands::attend::AttendArgs),

    /// Generate a section's attendance QR code (teachers)
    Qr(commands::attend::QrArgs),

    /// Render your attendance calendar for a section
    Calendar(commands::calendar::CalendarArgs),

    /// Attendance analytics for a section
    Analytics(commands::analytics::AnalyticsArgs),

    /// Overview for the logged-in teacher or admin
    Dashboard,

    /// Local activity log
    Notifications(commands::notifications::NotificationsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
        config.validate()?;
    }

    let ctx = Context::open(&config)?;

    match cli.command {
        Commands::Login(args) => commands::auth::login(&ctx, args).await?,
        Commands::Logout => commands::auth::logout(&ctx)?,
        Commands::Whoami => commands::auth::whoami(&ctx)?,
        Commands::Courses(args) => commands::courses::execute(&ctx, args).await?,
        Commands::Sections(args) => commands::sections::execute(&ctx, args).await?,
        Commands::Schedules(args) => commands::schedules::execute(&ctx, args).await?,
        Commands::Seats(args) => commands::seats::show(&ctx, args).await?,
        Commands::PickSeat(args) => commands::seats::pick(&ctx, args).await?,
        Commands::Enroll(args) => commands::enroll::execute(&ctx, args).await?,
        Commands::Attend(args) => commands::attend::attend(&ctx, args).await?,
        Commands::Qr(args) => commands::attend::qr(&ctx, args).await?,
        Commands::Calendar(args) => commands::calendar::execute(&ctx, args).await?,
        Commands::Analytics(args) => commands::analytics::execute(&ctx, args).await?,
        Commands::Dashboard => commands::dashboard::execute(&ctx).await?,
        Commands::Notifications(args) => commands::notifications::execute(&ctx, args)?,
    }

    Ok(())
}
