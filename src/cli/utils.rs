use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Print a command result, mirroring the backend envelope shape in JSON mode
pub fn output_success(format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let body = json!({
                "code": 200,
                "msg": message,
                "data": data.unwrap_or(Value::Null),
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => println!("✓ {}", message),
    }
    Ok(())
}

/// Print a command failure without terminating the process
pub fn output_error(format: &OutputFormat, message: &str, code: Option<&str>) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let body = json!({
                "code": 500,
                "msg": message,
                "errorCode": code,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => eprintln!("Error: {}", message),
    }
    Ok(())
}
