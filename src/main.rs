//! formstate demo - replays a scripted session against the contact form
//!
//! Reads one JSON event per line from the file given as the first argument
//! (or stdin), applies each to a contact form, and prints the final form
//! state as JSON.
//!
//! ```text
//! {"event": "change", "name": "email", "input": {"text": "ana@x.com"}}
//! {"event": "blur", "name": "email"}
//! {"event": "submit"}
//! ```

use anyhow::{Context, Result};
use async_trait::async_trait;
use formstate::contact::{ContactForm, ContactMessage, ContactSchema};
use formstate::{BlurEvent, ChangeEvent, FormConfig, FormHandle, SubmitEvent, SubmitHandler};
use serde::Deserialize;
use std::io::{self, BufRead, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// One line of the script
#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Step {
    Change(ChangeEvent),
    Blur(BlurEvent),
    Submit,
    Reset,
    ClearSubmitError,
}

/// Prints submitted messages instead of sending them
struct StdoutOutbox;

#[async_trait]
impl SubmitHandler<ContactMessage> for StdoutOutbox {
    async fn submit(&self, data: ContactMessage) -> Result<()> {
        let json = serde_json::to_string(&data)?;
        println!("{json}");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formstate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = FormConfig::load().context("failed to load config")?;

    let reader: Box<dyn BufRead> = match std::env::args().nth(1) {
        Some(path) => {
            let file = std::fs::File::open(&path)
                .with_context(|| format!("failed to open script {path}"))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut form = FormHandle::with_config(ContactSchema, ContactForm::default(), config);
    let outbox = StdoutOutbox;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let step: Step = serde_json::from_str(&line)
            .with_context(|| format!("invalid event on line {}", index + 1))?;

        let applied = match step {
            Step::Change(event) => form.handle_change(&event),
            Step::Blur(event) => form.handle_blur(&event),
            Step::Submit => {
                form.handle_submit(&mut SubmitEvent::new(), &outbox).await;
                Ok(())
            }
            Step::Reset => {
                form.reset();
                Ok(())
            }
            Step::ClearSubmitError => {
                form.clear_submit_error();
                Ok(())
            }
        };

        if let Err(err) = applied {
            tracing::warn!("line {}: {err}", index + 1);
        }
    }

    let summary = serde_json::json!({
        "state": form.state(),
        "is_valid": form.is_valid(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
