use std::path::Path;

use anyhow::bail;

use csarnet_core::domain::{AuthOutcome, LoginCredentials, ProfileUpdate, Registration, User};
use csarnet_infra::ApiClient;

use super::read_image;
use crate::cli::{LoginArgs, ProfileArgs, RegisterArgs};

pub async fn login(client: &ApiClient, args: LoginArgs) -> anyhow::Result<()> {
    let creds = LoginCredentials {
        email: args.email,
        username: args.username,
        password: args.password,
    };
    let outcome = client.login(&creds).await?;
    print_outcome(&outcome);
    Ok(())
}

pub async fn register(client: &ApiClient, args: RegisterArgs) -> anyhow::Result<()> {
    let registration = Registration {
        email: args.email,
        password2: args.confirm_password.unwrap_or_else(|| args.password.clone()),
        password1: args.password,
        first_name: args.first_name,
        last_name: args.last_name,
    };
    let outcome = client.register(&registration).await?;
    print_outcome(&outcome);
    Ok(())
}

fn print_outcome(outcome: &AuthOutcome) {
    match outcome {
        AuthOutcome::Authenticated { user, .. } => {
            println!("Signed in as {}", display_name(user));
        }
        AuthOutcome::VerificationRequired { detail } => {
            println!("{}", detail);
            println!("Check your inbox to verify your email, then run `csarnet login`.");
        }
    }
}

pub async fn logout(client: &ApiClient) -> anyhow::Result<()> {
    client.logout().await?;
    println!("Signed out");
    Ok(())
}

pub async fn whoami(client: &ApiClient) -> anyhow::Result<()> {
    if !client.is_authenticated().await? {
        bail!("Not signed in. Run `csarnet login` first.");
    }
    print_user(&client.get_current_user().await?);
    Ok(())
}

pub async fn update_profile(client: &ApiClient, args: ProfileArgs) -> anyhow::Result<()> {
    let update = ProfileUpdate {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        date_of_birth: args.date_of_birth,
    };
    if update.is_empty() {
        bail!("Nothing to update. Pass at least one of --first-name, --last-name, --email, --date-of-birth.");
    }
    print_user(&client.update_user(&update).await?);
    Ok(())
}

pub async fn avatar(client: &ApiClient, file: &Path) -> anyhow::Result<()> {
    let upload = read_image(file).await?;
    match client.update_avatar(&upload).await? {
        Some(url) => println!("Avatar updated: {}", url),
        None => println!("Avatar updated"),
    }
    Ok(())
}

pub async fn stats(client: &ApiClient) -> anyhow::Result<()> {
    let stats = client.user_stats().await;
    println!("Images processed: {}", stats.images_processed);
    println!("Total sessions:   {}", stats.total_sessions);
    println!("Member since:     {}", stats.member_since.format("%B %Y"));
    Ok(())
}

pub async fn history(client: &ApiClient) -> anyhow::Result<()> {
    let entries = client.upload_history().await?;
    if entries.is_empty() {
        println!("No uploads yet");
        return Ok(());
    }
    for entry in entries {
        println!(
            "{:>6}  {:<32} {:<12} {:<10} {}",
            entry.id,
            entry.file_name,
            entry.upload_date,
            format!("{:?}", entry.status).to_lowercase(),
            entry.file_size
        );
    }
    Ok(())
}

fn display_name(user: &User) -> String {
    let name = user.full_name();
    if name.is_empty() {
        user.email.clone()
    } else {
        format!("{} <{}>", name, user.email)
    }
}

fn print_user(user: &User) {
    println!("{}", display_name(user));
    println!("  id:            {}", user.id);
    println!("  member since:  {}", user.date_joined.format("%Y-%m-%d"));
    if let Some(dob) = user.date_of_birth {
        println!("  date of birth: {}", dob);
    }
    if let Some(avatar) = &user.avatar {
        println!("  avatar:        {}", avatar);
    }
}
