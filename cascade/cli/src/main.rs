use clap::Parser;

mod application;
mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    dotenvy::dotenv().ok();

    let cli = cli::Cli::parse();
    application::run(cli).await
}
