use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use metabrainz_notify::config::loader;
use metabrainz_notify::notify::{build_sender, Notification};
use metabrainz_notify::utils::constants::{
    DEFAULT_CONFIG_PATH, DEFAULT_EXPIRE_AGE, DEFAULT_FROM_ADDR, DEFAULT_PROJECT,
};
use metabrainz_notify::utils::logging::{self, LogLevel};
use serde_json::{Map, Value};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send a single notification
    Send(SendArgs),
}

#[derive(clap::Args)]
struct SendArgs {
    /// MusicBrainz row id of the recipient
    #[arg(long)]
    user_id: i64,
    #[arg(long)]
    email: String,
    #[arg(long)]
    subject: Option<String>,
    #[arg(long)]
    body: Option<String>,
    #[arg(long)]
    template_id: Option<String>,
    /// JSON object with template parameters
    #[arg(long)]
    template_params: Option<String>,
    #[arg(long, default_value = DEFAULT_FROM_ADDR)]
    from: String,
    #[arg(long, default_value = DEFAULT_PROJECT)]
    project: String,
    #[arg(long)]
    no_email: bool,
    #[arg(long)]
    not_important: bool,
    #[arg(long, default_value_t = DEFAULT_EXPIRE_AGE)]
    expire_age: u32,
}

impl SendArgs {
    fn into_notification(self) -> Result<Notification> {
        let mut notification = Notification::new(self.user_id, self.email)
            .from_addr(self.from)
            .project(self.project)
            .send_email(!self.no_email)
            .important(!self.not_important)
            .expire_age(self.expire_age);

        if let Some(subject) = self.subject {
            notification = notification.subject(subject);
        }
        if let Some(body) = self.body {
            notification = notification.body(body);
        }
        if let Some(id) = self.template_id {
            notification = notification.template_id(id);
        }
        if let Some(raw) = self.template_params {
            let params: Map<String, Value> =
                serde_json::from_str(&raw).context("--template-params must be a JSON object")?;
            notification = notification.template_params(params);
        }
        Ok(notification)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load YAML config, init logging
    // -------------------------------

    let args = Args::parse();
    let service_config = loader::file_to_config(Path::new(&args.config)).await?;
    let logging_config = logging::resolve(service_config.logging.as_ref(), args.log_level);
    logging::init_logging(&logging_config);

    // -------------------------------
    // 2. Build token provider and sender
    // -------------------------------

    let sender = build_sender(&service_config)?;

    // -------------------------------
    // 3. Dispatch
    // -------------------------------

    match args.command {
        Command::Send(send_args) => {
            let notification = send_args.into_notification()?;
            let to = notification.user_email.clone();
            sender
                .try_send_notification(notification)
                .await
                .with_context(|| format!("notification to {} was not delivered", to))?;
            info!("notification to {} delivered", to);
        }
    }

    Ok(())
}
