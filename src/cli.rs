//! Terminal front-end — a line REPL standing in for the web page.
//!
//! Plain lines go into the email text buffer; slash commands manage files,
//! submit the batch, and show history.

use std::path::PathBuf;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::Result;
use crate::intake::FileRef;
use crate::results::{History, RenderModel, RenderedOutcome};
use crate::session::TriageSession;

pub const HELP: &str = "\
Type or paste the email text, then /submit.
  /file <path>...   add .txt or .pdf files (max 10 MB each); quote paths with spaces
  /remove <n>       remove pending file n
  /list             show pending input
  /submit           classify everything pending
  /history          show all results of this session
  /reset            clear pending input and history
  /quit             exit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Text(String),
    AddFiles(Vec<PathBuf>),
    /// 1-based, as shown by `/list`.
    Remove(usize),
    List,
    Submit,
    History,
    Reset,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if !trimmed.starts_with('/') {
            return Self::Text(line.to_string());
        }

        let (verb, rest) = trimmed.split_once(char::is_whitespace).unwrap_or((trimmed, ""));
        match verb {
            "/file" | "/files" => {
                Self::AddFiles(split_args(rest).into_iter().map(PathBuf::from).collect())
            }
            "/remove" => match rest.split_whitespace().next().and_then(|n| n.parse().ok()) {
                Some(n) => Self::Remove(n),
                None => Self::Unknown(trimmed.to_string()),
            },
            "/list" => Self::List,
            "/submit" => Self::Submit,
            "/history" => Self::History,
            "/reset" => Self::Reset,
            "/help" => Self::Help,
            "/quit" | "/exit" => Self::Quit,
            _ => Self::Unknown(trimmed.to_string()),
        }
    }
}

/// Split on whitespace, keeping double-quoted runs together.
fn split_args(rest: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in rest.chars() {
        match c {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        args.push(current);
    }
    args
}

/// Format a batch render model as plain text.
pub fn render_model(model: &RenderModel) -> String {
    let mut out = format!(
        "Processed {} item(s): {} classified, {} failed\n",
        model.total, model.succeeded, model.failed
    );

    for (i, entry) in model.entries.iter().enumerate() {
        out.push('\n');
        match entry {
            RenderedOutcome::Classified {
                source,
                category,
                justification,
                preview,
                variants,
                ..
            } => {
                out.push_str(&format!("[{}] {source} → {category}\n", i + 1));
                if !justification.is_empty() {
                    out.push_str(&format!("    Why: {justification}\n"));
                }
                if let Some(preview) = preview {
                    out.push_str(&format!("    Preview: {preview}\n"));
                }
                for variant in variants {
                    out.push_str(&format!("    Reply ({}): {}\n", variant.label, variant.text.trim_end()));
                }
            }
            RenderedOutcome::Error { source, message } => {
                out.push_str(&format!("[{}] {source} → ERROR: {message}\n", i + 1));
            }
        }
    }
    out
}

/// Format the session history as plain text.
pub fn render_history(history: &History) -> String {
    if history.is_empty() {
        return "History is empty.\n".to_string();
    }
    let mut out = String::new();
    for (i, entry) in history.entries().iter().enumerate() {
        let label = match (&entry.category, entry.is_error) {
            (_, true) => "ERROR".to_string(),
            (Some(category), false) => category.clone(),
            (None, false) => "-".to_string(),
        };
        out.push_str(&format!(
            "{:>3}. {} {} → {}: {}\n",
            i + 1,
            entry.recorded_at.format("%H:%M:%S"),
            entry.source,
            label,
            entry.summary
        ));
    }
    out
}

fn render_pending(session: &TriageSession) -> String {
    let input = session.input();
    let mut out = format!("Text: {} character(s)\n", input.char_count());
    if input.pending_files().is_empty() {
        out.push_str("Files: none\n");
    }
    for (i, file) in input.pending_files().iter().enumerate() {
        out.push_str(&format!("  {}. {} ({})\n", i + 1, file.name, file.summary()));
    }
    out
}

/// Run the REPL until EOF or `/quit`.
pub async fn run<R, W>(session: &mut TriageSession, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let reply = match Command::parse(&line) {
            Command::Text(text) => {
                session.input_mut().push_line(&text);
                continue;
            }
            Command::AddFiles(paths) if paths.is_empty() => "Usage: /file <path>...\n".to_string(),
            Command::AddFiles(paths) => add_files(session, paths).await,
            Command::Remove(n) => match n.checked_sub(1).and_then(|i| session.input_mut().remove_file(i)) {
                Some(file) => format!("Removed {}\n", file.name),
                None => format!("No pending file #{n}\n"),
            },
            Command::List => render_pending(session),
            Command::Submit => match session.submit().await {
                Ok(model) => render_model(&model),
                Err(e) => format!("{e}\n"),
            },
            Command::History => render_history(session.history()),
            Command::Reset => {
                session.reset();
                "Cleared.\n".to_string()
            }
            Command::Help => format!("{HELP}\n"),
            Command::Quit => break,
            Command::Unknown(raw) => format!("Unknown command: {raw} (try /help)\n"),
        };

        writer.write_all(reply.as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(())
}

async fn add_files(session: &mut TriageSession, paths: Vec<PathBuf>) -> String {
    let mut out = String::new();
    let mut candidates = Vec::with_capacity(paths.len());

    for path in paths {
        match FileRef::from_path(&path).await {
            Ok(file) => candidates.push(file),
            Err(e) => out.push_str(&format!("Cannot read {}: {e}\n", path.display())),
        }
    }

    let report = session.add_files(candidates);
    for name in &report.accepted {
        out.push_str(&format!("Added {name}\n"));
    }
    for rejection in &report.rejections {
        out.push_str(&format!("Rejected ({}): {}\n", rejection.code(), rejection.reason));
    }
    out
}
