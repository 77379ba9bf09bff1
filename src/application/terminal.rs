#[cfg(test)]
#[path = "terminal_test.rs"]
mod tests;

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncReadExt;
use tokio::io::BufReader;

use super::cli::Intent;
use super::render;
use crate::domain::models::CodeAnalysisCategory;
use crate::domain::models::Language;
use crate::domain::models::ResumeSection;
use crate::domain::models::SlashCommand;
use crate::domain::models::SlotState;
use crate::domain::services::clipboard::ClipboardService;
use crate::domain::services::CodeSession;
use crate::domain::services::Orchestrator;
use crate::domain::services::ResumeSession;

/// Result of a command that ran to completion. `Failed` means a request was
/// answered with an error the user has already been shown.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Failed,
}

impl Outcome {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Outcome::Completed => return ExitCode::SUCCESS,
            Outcome::Failed => return ExitCode::FAILURE,
        }
    }
}

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /analyze (/a) [CATEGORY?] - Runs a code analysis on the file without leaving the chat. CATEGORY is one of explanation, bugs, optimization, tests, resources. Defaults to explanation.
- /copy (/cp) - Copies the latest tutor reply or analysis, whichever came last, to the clipboard.
- /clear (/c) - Clears the conversation and starts over with the same file.
- /quit /exit (/q) - Exit the tutor.
- /help (/h) - Provides this help menu.

Anything else is sent to the tutor as a question about your code.
        "#;

    return text.trim().to_string();
}

async fn read_input(file: Option<&str>) -> Result<String> {
    if let Some(path) = file {
        if path != "-" {
            return fs::read_to_string(path)
                .await
                .with_context(|| return format!("Failed to read {path}"));
        }
    }

    let mut buf = String::new();
    tokio::io::stdin().read_to_string(&mut buf).await?;
    return Ok(buf);
}

fn resolve_language(file: &str, language: Option<Language>) -> Language {
    return language.unwrap_or_else(|| return Language::from_path(Path::new(file)));
}

async fn run_resume(
    orchestrator: &Orchestrator,
    file: Option<&str>,
    target_role: &str,
    copy: Option<ResumeSection>,
) -> Result<Outcome> {
    let resume_text = read_input(file).await?;
    if resume_text.trim().is_empty() {
        bail!("The resume is empty. Pass a file with --file or pipe the text on stdin.");
    }

    let mut session = ResumeSession::default();
    eprintln!("Analyzing resume...");

    let res = match session
        .analyze(orchestrator, &resume_text, target_role)
        .await
    {
        SlotState::Succeeded(res) => res,
        SlotState::Failed(message) => {
            eprintln!("{}", render::error(message));
            return Ok(Outcome::Failed);
        }
        _ => return Ok(Outcome::Completed),
    };

    println!("{}", render::resume(res));

    if let Some(section) = copy {
        if let Err(err) = ClipboardService::write(&res.section_text(section)) {
            tracing::error!(error = ?err, "Failed to copy resume section");
            eprintln!("{}", render::error(&format!("Failed to copy {section}: {err}")));
            return Ok(Outcome::Failed);
        }
        eprintln!("Copied {section} to clipboard.");
    }

    return Ok(Outcome::Completed);
}

async fn run_code(
    orchestrator: &Orchestrator,
    file: &str,
    language: Option<Language>,
    categories: &[CodeAnalysisCategory],
) -> Result<Outcome> {
    let code = read_input(Some(file)).await?;
    let mut session = CodeSession::new(&code, resolve_language(file, language));
    let mut outcome = Outcome::Completed;

    for category in categories {
        eprintln!("Running {}...", category.title().to_lowercase());
        let state = session.analyze(orchestrator, *category).await;
        if let SlotState::Failed(_) = state {
            outcome = Outcome::Failed;
        }
        println!("{}\n", render::category_result(*category, state));
    }

    return Ok(outcome);
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    return Ok(());
}

fn start_clipboard() {
    if let Err(err) = ClipboardService::healthcheck() {
        tracing::warn!(error = ?err, "Clipboard service is unable to start");
        return;
    }

    tokio::spawn(async {
        if let Err(err) = ClipboardService::start().await {
            tracing::error!(error = ?err, "Clipboard service stopped");
        }
    });
}

fn copy_latest(session: &CodeSession) {
    let text = match session.latest_output() {
        Some(text) => text,
        None => {
            eprintln!("{}", render::error("Nothing to copy yet."));
            return;
        }
    };

    match ClipboardService::set(text.to_string()) {
        Ok(_) => println!("Copied to clipboard."),
        Err(err) => eprintln!("{}", render::error(&format!("Failed to copy: {err}"))),
    }
}

async fn run_tutor(
    orchestrator: &Orchestrator,
    file: &str,
    language: Option<Language>,
) -> Result<Outcome> {
    let code = read_input(Some(file)).await?;
    if code.trim().is_empty() {
        bail!("{file} is empty. The tutor needs some code to talk about.");
    }

    start_clipboard();

    let mut session = CodeSession::new(&code, resolve_language(file, language));
    println!(
        "Let's talk about {file} ({}). Ask anything, or type /help for commands.",
        session.language()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };

        if let Some(command) = SlashCommand::parse(&line) {
            if command.is_quit() {
                break;
            }
            if command.is_help() {
                println!("{}", help_text());
                continue;
            }
            if command.is_clear() {
                session.clear_transcript();
                println!("Conversation cleared.");
                continue;
            }
            if command.is_copy() {
                copy_latest(&session);
                continue;
            }
            if command.is_analyze() {
                match command.category() {
                    Some(category) => {
                        let state = session.analyze(orchestrator, category).await;
                        println!("{}", render::category_result(category, state));
                    }
                    None => {
                        eprintln!(
                            "{}",
                            render::error("Unknown category. Run /help for the list.")
                        );
                    }
                }
                continue;
            }
        }

        let before = session.transcript().len();
        session.send(orchestrator, &line).await;
        if session.transcript().len() == before {
            continue;
        }

        if let SlotState::Failed(message) = session.chat_state() {
            eprintln!("{}", render::error(message));
        } else if let Some(reply) = session.transcript().messages().last() {
            println!("{}", render::chat_message(reply));
        }
    }

    return Ok(Outcome::Completed);
}

async fn run_models(orchestrator: &Orchestrator) -> Result<Outcome> {
    let gateway = orchestrator.gateway();
    gateway.health_check().await?;

    let models = gateway.list_models().await?;
    let res = models
        .iter()
        .enumerate()
        .map(|(idx, model)| {
            let n = idx + 1;
            return format!("- ({n}) {model}");
        })
        .collect::<Vec<String>>();

    println!("Models available from {}:\n{}", gateway.name(), res.join("\n"));

    return Ok(Outcome::Completed);
}

pub async fn start(intent: Intent) -> Result<Outcome> {
    let orchestrator = Orchestrator::from_config()?;

    match intent {
        Intent::Resume {
            file,
            target_role,
            copy,
        } => {
            return run_resume(&orchestrator, file.as_deref(), &target_role, copy).await;
        }
        Intent::Code {
            file,
            language,
            categories,
        } => {
            return run_code(&orchestrator, &file, language, &categories).await;
        }
        Intent::Tutor { file, language } => {
            return run_tutor(&orchestrator, &file, language).await;
        }
        Intent::Models => return run_models(&orchestrator).await,
    }
}
