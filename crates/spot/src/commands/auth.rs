use super::Context;
use anyhow::bail;
use clap::Args;
use spot::notifications::record_activity;

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email
    #[arg(short, long, conflicts_with = "student_id")]
    pub email: Option<String>,

    /// Student id card number, instead of an email
    #[arg(short, long)]
    pub student_id: Option<String>,

    #[arg(short, long, env = "SPOT_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn login(ctx: &Context, args: LoginArgs) -> anyhow::Result<()> {
    let auth = ctx.client.auth();
    let session = match (args.email, args.student_id) {
        (Some(email), None) => auth.login(&email, &args.password).await?,
        (None, Some(id)) => auth.login_with_student_id(&id, &args.password).await?,
        _ => bail!("pass either --email or --student-id"),
    };
    record_activity(Some(&ctx.activity), |log| {
        log.log_system(&format!("Logged in as {}", session.email))
    });
    println!("Logged in as {} ({}, id {})", session.name, session.role, session.user_id);
    Ok(())
}

pub fn logout(ctx: &Context) -> anyhow::Result<()> {
    if ctx.client.session().get().is_none() {
        println!("Not logged in");
        return Ok(());
    }
    ctx.client.auth().logout();
    println!("Logged out");
    Ok(())
}

pub fn whoami(ctx: &Context) -> anyhow::Result<()> {
    match ctx.client.session().get() {
        Some(session) => {
            println!("{} <{}>", session.name, session.email);
            println!("role:    {}", session.role);
            println!("user id: {}", session.user_id);
            println!("session: {}", session.key());
        }
        None => println!("Not logged in"),
    }
    Ok(())
}
