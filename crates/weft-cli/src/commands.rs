use colored::Colorize;
use weft_sdk::{SessionDirectory, SessionSummary, SessionTranscript};
use weft_transcript::content_text;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Sessions(args) => cmd_sessions(args, &cli.format),
        Command::Show(args) => cmd_show(args, &cli.format),
    }
}

fn cmd_sessions(args: SessionsArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let sessions = SessionDirectory::new(&args.root).list_sessions()?;

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if sessions.is_empty() {
        println!("No sessions under {}", args.root.bold());
        return Ok(());
    }
    for session in &sessions {
        print_summary(session);
    }
    Ok(())
}

fn print_summary(session: &SessionSummary) {
    let created = session
        .created_at
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| "unknown".into());
    println!(
        "{}  {}  ({} messages)",
        session.id.yellow().bold(),
        session.name,
        session.message_count.to_string().bold(),
    );
    println!("  created: {}", created.dimmed());
    if let Some(mode) = &session.mode {
        println!("  mode: {}", mode.cyan());
    }
    if let Some(preview) = &session.last_message_preview {
        println!("  last: {}", preview.dimmed());
    }
}

fn cmd_show(args: ShowArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let transcript = SessionDirectory::new(&args.root).reconstruct(&args.session)?;

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&transcript)?);
        return Ok(());
    }

    print_transcript(&transcript, args.limit);
    Ok(())
}

fn print_transcript(transcript: &SessionTranscript, limit: usize) {
    println!(
        "Session {} — {} messages",
        transcript.id.yellow().bold(),
        transcript.messages.len().to_string().bold(),
    );

    let shown = if limit == 0 {
        transcript.messages.len()
    } else {
        limit.min(transcript.messages.len())
    };
    for message in &transcript.messages[..shown] {
        let role = message.role().unwrap_or("unknown");
        let role_colored = match role {
            "user" => role.green().bold(),
            "assistant" => role.blue().bold(),
            _ => role.normal().bold(),
        };
        let text = content_text(&message.body).unwrap_or_else(|| "<no text content>".into());
        println!("{:>4}  {}  {}", message.sequence, role_colored, text);
    }
    if shown < transcript.messages.len() {
        println!("  ... {} more", transcript.messages.len() - shown);
    }
}
