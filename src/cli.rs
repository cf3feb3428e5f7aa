use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

use syndicate::config::{AppConfig, DEFAULT_OWNER_COOKIE, DEFAULT_PUSH_TTL_SECONDS};

#[allow(clippy::large_enum_variant)]
pub(crate) enum RunOutcome {
    Serve(AppConfig),
    Exit(i32),
}

pub(crate) fn run() -> RunOutcome {
    let cli = Cli::parse();
    if let Some(Command::Init(args)) = cli.command {
        let code = run_init(args);
        return RunOutcome::Exit(code);
    }

    match resolve_app_config(cli) {
        Ok(config) => RunOutcome::Serve(config),
        Err(err) => {
            tracing::error!("{err}");
            RunOutcome::Exit(2)
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "syndicate",
    version,
    about = "Push notification subscriptions for the beer syndicate"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    #[arg(long, env = "SYNDICATE_BIND", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
    #[arg(long, env = "SYNDICATE_STORE")]
    store: Option<PathBuf>,
    #[arg(long, env = "SYNDICATE_VAPID_PRIVATE_KEY")]
    vapid_private_key: Option<String>,
    #[arg(long, env = "SYNDICATE_VAPID_PUBLIC_KEY")]
    vapid_public_key: Option<String>,
    #[arg(long, env = "SYNDICATE_VAPID_SUBJECT")]
    vapid_subject: Option<String>,
    #[arg(long, env = "SYNDICATE_OWNER_COOKIE", default_value = DEFAULT_OWNER_COOKIE)]
    owner_cookie: String,
    /// Seconds the push service keeps an undelivered message.
    #[arg(long, env = "SYNDICATE_PUSH_TTL", default_value_t = DEFAULT_PUSH_TTL_SECONDS)]
    push_ttl: u32,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a VAPID keypair.
    Init(InitArgs),
}

#[derive(Args, Debug)]
struct InitArgs {
    #[arg(long)]
    subject: Option<String>,
}

fn run_init(args: InitArgs) -> i32 {
    let credentials = match syndicate::generate_vapid_credentials() {
        Ok(credentials) => credentials,
        Err(err) => {
            tracing::error!(error = %err, "failed to generate VAPID credentials");
            return 1;
        }
    };
    let (subject, show_subject_note) = match args.subject {
        Some(subject) => (subject, false),
        None => ("mailto:you@example.com".to_string(), true),
    };

    println!("VAPID credentials generated.");
    println!();
    println!("SYNDICATE_VAPID_PRIVATE_KEY=\"{}\"", credentials.private_key);
    println!("SYNDICATE_VAPID_PUBLIC_KEY=\"{}\"", credentials.public_key);
    println!("SYNDICATE_VAPID_SUBJECT=\"{subject}\"");
    if show_subject_note {
        println!();
        println!("Note: replace SYNDICATE_VAPID_SUBJECT with a contact URI you control.");
    }
    println!();
    println!(
        "--vapid-private-key \"{}\" --vapid-public-key \"{}\" --vapid-subject \"{subject}\"",
        credentials.private_key, credentials.public_key
    );
    0
}

fn resolve_app_config(cli: Cli) -> Result<AppConfig, String> {
    let owner_cookie = cli.owner_cookie.trim();
    if owner_cookie.is_empty() {
        return Err("owner cookie name cannot be empty".to_string());
    }
    if owner_cookie.contains(['=', ';']) {
        return Err(format!("invalid owner cookie name '{owner_cookie}'"));
    }
    if cli.push_ttl == 0 {
        return Err("push ttl must be greater than 0".to_string());
    }

    Ok(AppConfig {
        bind: cli.bind,
        store_path: cli.store,
        vapid_private_key: cli.vapid_private_key,
        vapid_public_key: cli.vapid_public_key,
        vapid_subject: cli.vapid_subject,
        owner_cookie: owner_cookie.to_string(),
        push_ttl: cli.push_ttl,
    })
}
