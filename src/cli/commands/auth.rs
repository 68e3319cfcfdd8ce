use std::io::Write;

use clap::Subcommand;
use serde_json::json;

use crate::api::LoginCredentials;
use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::console::Console;
use crate::session::SessionPhase;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to the console backend")]
    Login {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
        #[arg(long, help = "Captcha answer", default_value = "")]
        code: String,
        #[arg(long, help = "Captcha challenge id", default_value = "")]
        uuid: String,
    },

    #[command(about = "Logout and clear the local session")]
    Logout,

    #[command(about = "Show current session status")]
    Status,

    #[command(about = "Show the authenticated principal")]
    Whoami,
}

pub async fn handle(console: &Console, cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { username, password, code, uuid } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password: ")?,
            };

            let form = LoginCredentials { username, password, code, uuid };
            match console.login(&form).await {
                Ok(()) => output_success(&output_format, "Logged in", None),
                Err(e) => output_error(&output_format, &e.to_string(), Some("AUTHENTICATION_FAILED")),
            }
        }

        AuthCommands::Logout => {
            console.logout().await;
            output_success(&output_format, "Logged out", None)
        }

        AuthCommands::Status => {
            let phase = match console.session.phase() {
                SessionPhase::Anonymous => "anonymous",
                SessionPhase::Authenticating => "authenticating",
                SessionPhase::Authenticated => "authenticated",
                SessionPhase::Degraded => "degraded",
            };
            output_success(
                &output_format,
                &format!("Session is {}", phase),
                Some(json!({
                    "loggedIn": console.session.is_logged_in(),
                    "phase": phase,
                })),
            )
        }

        AuthCommands::Whoami => {
            if !console.session.is_logged_in() {
                return output_error(&output_format, "Not logged in", Some("NOT_AUTHENTICATED"));
            }
            if console.profile().is_none() {
                console.session.fetch_profile().await?;
            }
            match console.profile() {
                Some(info) => output_success(
                    &output_format,
                    &format!("{} ({})", info.user_name, info.nick_name),
                    Some(json!({
                        "userId": info.user_id,
                        "userName": info.user_name,
                        "nickName": info.nick_name,
                        "email": info.email,
                        "roles": info.roles,
                        "permissions": info.permissions,
                    })),
                ),
                None => output_error(&output_format, "Profile unavailable", None),
            }
        }
    }
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{}", label);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end().to_string())
}
