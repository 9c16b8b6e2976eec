//! Interactive pomodoro session.
//!
//! Single-task event loop: a 1-second interval drives the countdown while
//! stdin lines carry user commands. Everything mutates on this one timeline,
//! so the core state is never touched concurrently.

use std::collections::BTreeSet;
use std::io::Write;
use std::time::Duration;

use chrono::Local;
use tokio::io::AsyncBufReadExt;
use tokio::time::MissedTickBehavior;

use tomatodo_core::{
    AlarmError, AlarmSink, ColorToken, CompletedTodo, Event, NoopAlarm, RenderSink, SessionRunner,
    SystemClock, TodoItem, TodoLedger,
};

use crate::config::Config;

struct TerminalRender {
    color: bool,
}

fn paint(text: &str, token: ColorToken, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    let code = match token {
        ColorToken::Green => "32",
        ColorToken::Pink => "35",
        ColorToken::Red => "31",
    };
    format!("\x1b[{code}m{text}\x1b[0m")
}

impl RenderSink for TerminalRender {
    fn phase_label(&mut self, label: &str, color: ColorToken) {
        println!("\n== {} ==", paint(label, color, self.color));
    }

    fn countdown(&mut self, mmss: &str) {
        print!("\r  {mmss} ");
        let _ = std::io::stdout().flush();
    }

    fn checkmarks(&mut self, count: u32) {
        println!("\n  {}", "\u{2713}".repeat(count as usize));
    }

    fn todo_list(&mut self, pending: &[TodoItem], completed: &[CompletedTodo]) {
        print_todo_lists(pending, completed, self.color);
    }

    fn warning(&mut self, message: &str) {
        eprintln!("warning: {message}");
    }
}

/// Terminal bell. Failure to write is reported upward and ignored there.
struct BellAlarm;

impl AlarmSink for BellAlarm {
    fn play(&mut self) -> Result<(), AlarmError> {
        let mut out = std::io::stdout();
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }
}

fn print_todo_lists(pending: &[TodoItem], completed: &[CompletedTodo], color: bool) {
    println!();
    if pending.is_empty() && completed.is_empty() {
        println!("  no todos yet (add <text>)");
        return;
    }
    for (i, item) in pending.iter().enumerate() {
        println!("  {}. {}", i + 1, paint(&item.text, ColorToken::Red, color));
    }
    for done in completed {
        println!(
            "  {} - Started: {}, Ended: {}, Duration: {} min",
            done.text,
            done.started_at.with_timezone(&Local).format("%H:%M"),
            done.ended_at.with_timezone(&Local).format("%H:%M"),
            done.duration_minutes
        );
    }
}

fn print_help() {
    println!("commands:");
    println!("  start          start the next interval (or resume a paused one)");
    println!("  stop           pause the running interval");
    println!("  reset          back to idle, repetition count cleared");
    println!("  add <text>     add a pending todo");
    println!("  list           show pending and completed todos");
    println!("  done [n ...]   commit the open review, marking todos by number");
    println!("  status         print the session state as JSON");
    println!("  quit           exit");
}

fn prompt_review(ledger: &TodoLedger) {
    println!("\nwork interval finished -- mark completed todos:");
    if ledger.pending().is_empty() {
        println!("  (none pending)");
    }
    for (i, item) in ledger.pending().iter().enumerate() {
        println!("  {}. {}", i + 1, item.text);
    }
    println!("commit with: done [n ...]   (plain `done` commits nothing)");
}

fn handle_done(runner: &mut SessionRunner<SystemClock>, rest: &str) {
    if runner.pending_review().is_none() {
        println!("no review is open");
        return;
    }
    let mut selected = BTreeSet::new();
    for word in rest.split_whitespace() {
        let index: usize = match word.parse() {
            Ok(n) => n,
            Err(_) => {
                println!("not a number: {word}");
                return;
            }
        };
        match runner.ledger().pending().get(index.wrapping_sub(1)) {
            Some(item) => {
                selected.insert(item.text.clone());
            }
            None => {
                println!("no todo numbered {index}");
                return;
            }
        }
    }
    if let Some(events) = runner.commit_review(&selected) {
        if let Some(Event::ReviewCommitted { completed, .. }) = events.first() {
            println!("completed {completed} todo(s); next interval started");
        }
    }
}

/// Returns false when the loop should end.
fn handle_command(runner: &mut SessionRunner<SystemClock>, line: &str, color: bool) -> bool {
    let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
    match cmd {
        "" => {}
        "start" => {
            if runner.pending_review().is_some() {
                println!("finish the review first: done [n ...]");
            } else if runner.start().is_none() {
                println!("already running");
            }
        }
        "stop" => {
            if runner.stop().is_none() {
                println!("nothing to stop");
            }
        }
        "reset" => {
            runner.reset();
        }
        "add" => {
            if !runner.add_todo(rest) {
                println!("todo text must not be blank");
            }
        }
        "list" => {
            print_todo_lists(runner.ledger().pending(), runner.ledger().completed(), color);
        }
        "done" => handle_done(runner, rest.trim()),
        "status" => match serde_json::to_string_pretty(&runner.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("error: {e}"),
        },
        "help" => print_help(),
        "quit" | "exit" => return false,
        _ => println!("unknown command: {cmd} (try: help)"),
    }
    true
}

async fn session_loop(bell: bool, color: bool) -> Result<(), Box<dyn std::error::Error>> {
    let render = Box::new(TerminalRender { color });
    let alarm: Box<dyn AlarmSink> = if bell {
        Box::new(BellAlarm)
    } else {
        Box::new(NoopAlarm)
    };
    let mut runner = SessionRunner::new(SystemClock, render, alarm);

    println!("tomatodo -- type `start` to begin, `help` for commands");
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                // Token fetched fresh each second: at most one pending tick,
                // and ticks for a cancelled run go stale with their token.
                if let Some(token) = runner.tick_token() {
                    let events = runner.tick(token);
                    if events.iter().any(|e| matches!(e, Event::ReviewRequested { .. })) {
                        prompt_review(runner.ledger());
                    }
                }
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if !handle_command(&mut runner, line.trim(), color) {
                            break;
                        }
                    }
                    None => break, // stdin closed
                }
            }
        }
    }
    Ok(())
}

pub fn run(no_bell: bool, no_color: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let bell = config.bell && !no_bell;
    let color = config.color && !no_color;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(session_loop(bell, color))
}
