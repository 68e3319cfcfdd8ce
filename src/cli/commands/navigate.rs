use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::console::{Console, MenuEntry};
use crate::router::NavigationOutcome;

#[derive(Subcommand)]
pub enum NavCommands {
    #[command(about = "Run the navigation guard against a target path")]
    Go {
        #[arg(help = "Target path, e.g. /system/user")]
        path: String,
    },

    #[command(about = "Show the menu derived from the installed route tree")]
    Routes,
}

pub async fn handle(console: &Console, cmd: NavCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        NavCommands::Go { path } => {
            let outcome = console.navigate(&path).await;
            match outcome {
                NavigationOutcome::Rendered(m) => output_success(
                    &output_format,
                    &format!("Rendered {} ({})", m.path, m.name),
                    Some(json!({
                        "path": m.path,
                        "route": m.name,
                        "title": m.meta.title,
                    })),
                ),
                NavigationOutcome::NotFound(path) => {
                    output_error(&output_format, &format!("No route for {}", path), Some("NOT_FOUND"))
                }
                NavigationOutcome::Aborted(path) => output_error(
                    &output_format,
                    &format!("Navigation to {} aborted", path),
                    Some("ABORTED"),
                ),
            }
        }

        NavCommands::Routes => {
            // Populate the route tree the same way a first navigation would
            let _ = console.navigate("/").await;
            if !console.session.is_logged_in() {
                return output_error(&output_format, "Not logged in", Some("NOT_AUTHENTICATED"));
            }

            let menu = console.menu();
            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&menu)?);
                    Ok(())
                }
                OutputFormat::Text => {
                    print_menu(&menu, 0);
                    Ok(())
                }
            }
        }
    }
}

fn print_menu(entries: &[MenuEntry], depth: usize) {
    for entry in entries {
        println!("{}{} ({})", "  ".repeat(depth), entry.title, entry.path);
        print_menu(&entry.children, depth + 1);
    }
}
