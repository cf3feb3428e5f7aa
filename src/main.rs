mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    syndicate::logging::init_logging()?;
    match cli::run() {
        cli::RunOutcome::Serve(config) => syndicate::serve(config).await,
        cli::RunOutcome::Exit(code) => std::process::exit(code),
    }
}
