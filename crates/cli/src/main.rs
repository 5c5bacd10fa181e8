//! Task board command-line client
//!
//! Every subcommand is one user intent: the board is fetched, the intent
//! is applied through the controller, and the refreshed board is printed.

mod cli;
mod render;

use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tb_core::auth::{AuthClient, LoginRequest, SignupRequest};
use tb_core::config::ClientConfig;
use tb_core::kanban::{BoardController, DragEnd, DragOutcome, DropTarget};
use tb_core::notice::Notifier;
use tb_core::route::{AuthFlow, Route};
use tb_core::session::{FileTokenStore, Session};
use tb_core::task::{HttpTaskRepository, TaskDraft};

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskboard=info,tb_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(api_url) = &cli.api_url {
        config = config.with_api_url(api_url);
    }
    if let Some(data_dir) = &cli.data_dir {
        config = config.with_data_dir(data_dir);
    }
    tracing::debug!("Using API at {}", config.api_url);

    let notifier = Notifier::new();
    let mut notices = notifier.subscribe();

    let result = run(&cli, &config, &notifier).await;

    while let Ok(notice) = notices.try_recv() {
        eprintln!("{}", render::notice(&notice));
    }
    result
}

async fn run(cli: &Cli, config: &ClientConfig, notifier: &Notifier) -> anyhow::Result<()> {
    match &cli.command {
        Command::Signup {
            name,
            email,
            password,
        } => {
            let flow = auth_flow(config, notifier).await?;
            let route = flow
                .signup(SignupRequest::new(name, email, password))
                .await?;
            print_route(route);
        }
        Command::Login { email, password } => {
            let flow = auth_flow(config, notifier).await?;
            let route = flow.login(LoginRequest::new(email, password)).await?;
            print_route(route);
        }
        Command::Logout => {
            let flow = auth_flow(config, notifier).await?;
            let route = flow.logout().await?;
            print_route(route);
        }
        Command::Status => {
            let session = open_session(config).await?;
            print!("{}", render::session(&session.state()));
        }
        Command::List { flat } => {
            let board = open_board(config, notifier).await?;
            print_board(cli, &board, *flat).await?;
        }
        Command::Add {
            title,
            description,
            assigned_to,
        } => {
            let board = open_board(config, notifier).await?;
            let mut draft = TaskDraft::new(title, description, assigned_to);
            let task = board.create(&mut draft).await?;
            println!("Created {}", task.id);
            print_board(cli, &board, false).await?;
        }
        Command::Edit {
            id,
            title,
            description,
        } => {
            if title.is_none() && description.is_none() {
                bail!("nothing to edit: pass --title and/or --description");
            }
            let board = open_board(config, notifier).await?;
            let mut edit = board.begin_edit(id).await?;
            if let Some(title) = title {
                edit.title = title.clone();
            }
            if let Some(description) = description {
                edit.description = description.clone();
            }
            board.save_edit(&edit).await?;
            print_board(cli, &board, false).await?;
        }
        Command::Done { id } => {
            let board = open_board(config, notifier).await?;
            board.mark_done(id).await?;
            print_board(cli, &board, false).await?;
        }
        Command::Move { id, status, index } => {
            let board = open_board(config, notifier).await?;
            let outcome = board
                .drag_end(DragEnd {
                    task_id: id.clone(),
                    destination: Some(DropTarget {
                        status: *status,
                        index: *index,
                    }),
                })
                .await?;
            if outcome == DragOutcome::Reordered {
                println!("Task already in {}; order is not kept by the server", status.title());
            }
            print_board(cli, &board, false).await?;
        }
        Command::Rm { id } => {
            let board = open_board(config, notifier).await?;
            board.delete(id).await?;
            print_board(cli, &board, false).await?;
        }
    }
    Ok(())
}

async fn open_session(config: &ClientConfig) -> anyhow::Result<Arc<Session>> {
    let path = config.session_file();
    let store = FileTokenStore::open(&path)
        .await
        .with_context(|| format!("opening session store {}", path.display()))?;
    Ok(Arc::new(Session::restore(Arc::new(store)).await?))
}

async fn auth_flow(config: &ClientConfig, notifier: &Notifier) -> anyhow::Result<AuthFlow> {
    let session = open_session(config).await?;
    Ok(AuthFlow::new(
        Arc::new(AuthClient::from_config(config)),
        session,
        notifier.clone(),
    ))
}

async fn open_board(config: &ClientConfig, notifier: &Notifier) -> anyhow::Result<BoardController> {
    let repo = HttpTaskRepository::from_config(config);
    let board = BoardController::with_notifier(Arc::new(repo), notifier.clone());
    board
        .fetch_all()
        .await
        .with_context(|| format!("fetching tasks from {}", config.api_url))?;
    Ok(board)
}

async fn print_board(cli: &Cli, board: &BoardController, flat: bool) -> anyhow::Result<()> {
    let state = board.snapshot().await;
    let text = match (cli.json, flat) {
        (true, true) => serde_json::to_string_pretty(&state.flat())?,
        (true, false) => serde_json::to_string_pretty(&state)?,
        (false, true) => render::flat(&state),
        (false, false) => render::board(&state),
    };
    print!("{}", text);
    if cli.json {
        println!();
    }
    Ok(())
}

fn print_route(route: Route) {
    println!("-> {}", route);
}
