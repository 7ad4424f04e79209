//! Session drivers: the interactive terminal page and the one-shot `generate` run.
//!
//! Both gate submission on `presentation::submit_enabled`, the terminal
//! counterpart of a disabled button.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::cli::{GenerateArgs, InteractiveArgs};
use crate::controller::{SessionState, SubmissionController, SubmissionStatus};
use crate::errors::ClientError;
use crate::form::CvDocument;
use crate::presentation::{render, submit_enabled, transition_line, SessionReport};

const HELP: &str = "\
Type or paste the job description; each line is appended.
  :cv <path>   attach a PDF CV (replaces the current one)
  :nocv        detach the CV
  :generate    submit the job description
  :reset       clear the description and output (keeps the CV)
  :show        redraw the page
  :help        show this help
  :quit        exit
Start a line with '::' to enter a literal ':'.";

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Text(String),
    AttachCv(PathBuf),
    DetachCv,
    Generate,
    Reset,
    Show,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_input(line: &str) -> Input {
    if let Some(literal) = line.strip_prefix("::") {
        return Input::Text(format!(":{literal}"));
    }
    let Some(command) = line.strip_prefix(':') else {
        return Input::Text(line.to_string());
    };

    let (name, arg) = match command.trim().split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command.trim(), ""),
    };

    match (name, arg) {
        ("cv", path) if !path.is_empty() => Input::AttachCv(PathBuf::from(path)),
        ("nocv", "") => Input::DetachCv,
        ("generate" | "go", "") => Input::Generate,
        ("reset", "") => Input::Reset,
        ("show", "") => Input::Show,
        ("help" | "h", "") => Input::Help,
        ("quit" | "q" | "exit", "") => Input::Quit,
        _ => Input::Unknown(line.to_string()),
    }
}

/// How a one-shot run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Generated,
    Failed,
    NothingToSubmit,
}

impl RunOutcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            RunOutcome::Generated => ExitCode::SUCCESS,
            RunOutcome::Failed => ExitCode::FAILURE,
            RunOutcome::NothingToSubmit => ExitCode::from(2),
        }
    }
}

/// Submits only when the trigger is enabled. `None` means nothing was sent.
pub async fn trigger_generate(controller: &mut SubmissionController) -> Option<SubmissionStatus> {
    if !submit_enabled(&controller.snapshot()) {
        return None;
    }
    Some(controller.submit().await)
}

/// Prints a line to stderr whenever the status or in-flight flag changes.
/// Ends when the controller is dropped.
pub fn spawn_status_watcher(mut state: watch::Receiver<SessionState>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut last = {
            let s = state.borrow_and_update();
            (s.status, s.in_flight)
        };
        while state.changed().await.is_ok() {
            let line = {
                let s = state.borrow_and_update();
                if (s.status, s.in_flight) == last {
                    continue;
                }
                last = (s.status, s.in_flight);
                transition_line(&s)
            };
            eprintln!("{line}");
        }
    })
}

async fn attach_cv(controller: &mut SubmissionController, path: &Path) -> Result<(), ClientError> {
    let document = CvDocument::from_path(path).await?;
    info!("Attached CV {} ({} bytes)", document.name, document.content.len());
    controller.select_document(Some(document));
    Ok(())
}

pub async fn run_interactive(
    mut controller: SubmissionController,
    args: InteractiveArgs,
) -> Result<ExitCode> {
    if let Some(path) = &args.cv {
        attach_cv(&mut controller, path).await?;
    }

    let watcher = spawn_status_watcher(controller.subscribe());
    println!("{}", render(&controller.snapshot()));
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        match parse_input(&line) {
            Input::Text(text) => controller.append_job_description_line(&text),
            Input::AttachCv(path) => match attach_cv(&mut controller, &path).await {
                Ok(()) => println!("{}", render(&controller.snapshot())),
                Err(e) => {
                    warn!("CV not attached: {e}");
                    eprintln!("{e}");
                }
            },
            Input::DetachCv => {
                controller.select_document(None);
                println!("{}", render(&controller.snapshot()));
            }
            Input::Generate => match trigger_generate(&mut controller).await {
                Some(_) => println!("{}", render(&controller.snapshot())),
                None => eprintln!("Nothing to submit yet: paste a job description first."),
            },
            Input::Reset => {
                controller.reset();
                println!("{}", render(&controller.snapshot()));
            }
            Input::Show => println!("{}", render(&controller.snapshot())),
            Input::Help => println!("{HELP}"),
            Input::Quit => break,
            Input::Unknown(line) => eprintln!("Unknown command '{line}'. Type :help for commands."),
        }
    }

    drop(controller);
    watcher.await.ok();
    Ok(ExitCode::SUCCESS)
}

async fn read_job_description(args: &GenerateArgs) -> Result<String> {
    if let Some(text) = &args.jd {
        return Ok(text.clone());
    }
    if let Some(path) = &args.jd_file {
        return tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read job description from {}", path.display()));
    }

    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("Failed to read job description from stdin")?;
    Ok(text)
}

/// One submission, then print the page (or a JSON report) and exit.
pub async fn run_generate(
    mut controller: SubmissionController,
    args: GenerateArgs,
) -> Result<RunOutcome> {
    controller.set_job_description(read_job_description(&args).await?);
    if let Some(path) = &args.cv {
        attach_cv(&mut controller, path).await?;
    }

    let watcher = spawn_status_watcher(controller.subscribe());
    let status = trigger_generate(&mut controller).await;
    let state = controller.snapshot();
    drop(controller);
    watcher.await.ok();

    let Some(status) = status else {
        eprintln!("Nothing to submit: the job description is empty.");
        return Ok(RunOutcome::NothingToSubmit);
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&SessionReport::from(&state))?);
    } else {
        print!("{}", render(&state));
    }

    if let (Some(path), Some(text)) = (&args.output, &state.outcome.result_text) {
        tokio::fs::write(path, text)
            .await
            .with_context(|| format!("Failed to write generated text to {}", path.display()))?;
        info!("Wrote generated text to {}", path.display());
    }

    Ok(match status {
        SubmissionStatus::Complete => RunOutcome::Generated,
        _ => RunOutcome::Failed,
    })
}
