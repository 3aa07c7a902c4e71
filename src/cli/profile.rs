//! Profile CLI commands
//!
//! Identity and profile calls go through the session's `AuthSession`; on
//! failure the service's message is shown as-is.

use std::io::Write;

use clap::Subcommand;
use zeroize::Zeroizing;

use super::Session;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Profile, ProfilePatch};

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Create an account and its profile
    SignUp {
        email: String,
        #[arg(long, default_value = "")]
        first: String,
        #[arg(long, default_value = "")]
        last: String,
        /// Password (prompted for when omitted)
        #[arg(long, env = "LEDGERLY_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Sign in and load the profile
    SignIn {
        email: String,
        /// Password (prompted for when omitted)
        #[arg(long, env = "LEDGERLY_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Show the signed-in profile
    Show,
    /// Change profile fields
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Sign out and forget the cached profile
    SignOut,
}

fn prompt_password(prompt: &str) -> LedgerResult<Zeroizing<String>> {
    rpassword::prompt_password(prompt)
        .map(Zeroizing::new)
        .map_err(|e| LedgerError::Io(format!("Failed to read password: {}", e)))
}

fn password_or_prompt(password: Option<String>, confirm: bool) -> LedgerResult<Zeroizing<String>> {
    if let Some(password) = password {
        return Ok(Zeroizing::new(password));
    }
    let first = prompt_password("Password: ")?;
    if confirm {
        let second = prompt_password("Confirm password: ")?;
        if *first != *second {
            return Err(LedgerError::Validation("Passwords do not match".to_string()));
        }
    }
    Ok(first)
}

fn write_profile(profile: &Profile, out: &mut dyn Write) -> LedgerResult<()> {
    writeln!(out, "Profile: {}", profile.display_name())?;
    writeln!(out, "  Email:   {}", profile.email)?;
    writeln!(out, "  ID:      {}", profile.id)?;
    if let Some(url) = &profile.avatar_url {
        writeln!(out, "  Avatar:  {}", url)?;
    }
    writeln!(out, "  Since:   {}", profile.created_at.format("%Y-%m-%d"))?;
    Ok(())
}

pub fn handle_profile_command(
    session: &mut Session,
    cmd: ProfileCommands,
    out: &mut dyn Write,
) -> LedgerResult<()> {
    match cmd {
        ProfileCommands::SignUp {
            email,
            first,
            last,
            password,
        } => {
            if email.trim().is_empty() {
                return Err(LedgerError::Validation("Please enter an email".to_string()));
            }
            let password = password_or_prompt(password, true)?;
            let profile = session.auth.sign_up(&email, &password, &first, &last)?;
            writeln!(out, "Welcome, {}!", profile.display_name())?;
        }

        ProfileCommands::SignIn { email, password } => {
            let password = password_or_prompt(password, false)?;
            let profile = session.auth.sign_in(&email, &password)?;
            writeln!(out, "Signed in as {}", profile.display_name())?;
        }

        ProfileCommands::Show => {
            let profile = session.auth.load_profile()?;
            write_profile(profile, out)?;
        }

        ProfileCommands::Update {
            name,
            email,
            avatar,
        } => {
            let patch = ProfilePatch {
                email,
                full_name: name,
                avatar_url: avatar,
            };
            if patch.is_empty() {
                writeln!(out, "No changes specified. Use --name, --email or --avatar.")?;
                return Ok(());
            }
            session.auth.update_profile(&patch)?;
            writeln!(out, "Profile updated")?;
        }

        ProfileCommands::SignOut => {
            session.auth.sign_out()?;
            writeln!(out, "Signed out")?;
        }
    }

    Ok(())
}
