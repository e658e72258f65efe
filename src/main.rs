use anyhow::Context;
use clap::Parser;
use colored::*;
use loro::actors::lookup_view::{self, LookupViewActor, LookupViewMessage};
use loro::cli::{one_shot_exit_status, Cli, SessionCommand, SESSION_HELP};
use loro::client::RepoInfoClient;
use loro::models::LookupQuery;
use loro::render::ViewBlock;
use ractor::ActorRef;
use std::process::ExitCode;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::info;
use tracing_subscriber::EnvFilter;

const CALL_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = RepoInfoClient::with_timeout(&cli.endpoint, cli.timeout_secs.map(Duration::from_secs))
        .context("Failed to configure repo info client")?;
    info!(endpoint = %client.base_url(), "Using repo info endpoint");

    let query = LookupQuery::new(cli.owner, cli.repo);
    let (view, handle) = LookupViewActor::spawn_view(client, query).await?;

    println!("{}", "Loro".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());

    let outcome = if cli.interactive {
        run_session(&view).await
    } else {
        run_once(&view).await
    };

    view.stop(None);
    let _ = handle.await;

    outcome
}

async fn run_once(view: &ActorRef<LookupViewMessage>) -> anyhow::Result<ExitCode> {
    if !lookup_view::submit(view, CALL_TIMEOUT).await? {
        eprintln!("{}", "Both owner and repo are required".red());
        return Ok(ExitCode::from(one_shot_exit_status(None)));
    }
    println!("{}", ViewBlock::LoadingIndicator);

    let state = lookup_view::wait_settled(view, None).await?;
    println!("{}", ViewBlock::from_state(&state));

    Ok(ExitCode::from(one_shot_exit_status(Some(&state))))
}

async fn run_session(view: &ActorRef<LookupViewMessage>) -> anyhow::Result<ExitCode> {
    println!("{}\n", SESSION_HELP.dimmed());
    print_view(view).await?;

    let mut printer: Option<JoinHandle<()>> = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match SessionCommand::parse(&line) {
            SessionCommand::Owner(value) => {
                send(view, LookupViewMessage::EditOwner(value))?;
                print_query(view).await?;
            }
            SessionCommand::Repo(value) => {
                send(view, LookupViewMessage::EditRepo(value))?;
                print_query(view).await?;
            }
            SessionCommand::Submit => {
                if !lookup_view::submit(view, CALL_TIMEOUT).await? {
                    println!("{}", "Both owner and repo are required".yellow());
                    continue;
                }
                println!("{}", ViewBlock::LoadingIndicator);

                // Only the latest submission prints its settled view
                if let Some(previous) = printer.take() {
                    previous.abort();
                }
                let view = view.clone();
                printer = Some(tokio::spawn(async move {
                    match lookup_view::wait_settled(&view, None).await {
                        Ok(state) => println!("{}", ViewBlock::from_state(&state)),
                        Err(e) => eprintln!("{}", e.to_string().red()),
                    }
                }));
            }
            SessionCommand::Cancel => {
                // A cancelled lookup settles, so the waiting printer shows the view
                if !lookup_view::cancel(view, CALL_TIMEOUT).await? {
                    println!("{}", "No lookup in flight".dimmed());
                }
            }
            SessionCommand::Show => print_view(view).await?,
            SessionCommand::Help => println!("{}", SESSION_HELP),
            SessionCommand::Quit => break,
            SessionCommand::Unknown(line) => {
                println!("{} {}", "Unknown command:".yellow(), line);
            }
        }
    }

    if let Some(printer) = printer {
        printer.abort();
    }

    Ok(ExitCode::SUCCESS)
}

fn send(view: &ActorRef<LookupViewMessage>, message: LookupViewMessage) -> anyhow::Result<()> {
    view.send_message(message)
        .map_err(|e| anyhow::anyhow!("Failed to reach lookup view: {}", e))
}

async fn print_view(view: &ActorRef<LookupViewMessage>) -> anyhow::Result<()> {
    let state = lookup_view::current_state(view, CALL_TIMEOUT).await?;
    println!("{}", ViewBlock::from_state(&state));
    Ok(())
}

async fn print_query(view: &ActorRef<LookupViewMessage>) -> anyhow::Result<()> {
    let query = match view.call(LookupViewMessage::GetQuery, Some(CALL_TIMEOUT)).await {
        Ok(ractor::rpc::CallResult::Success(query)) => query,
        _ => anyhow::bail!("Failed to read the current query"),
    };
    println!("{} {}/{}", "Query:".dimmed(), query.owner, query.repo);
    Ok(())
}
