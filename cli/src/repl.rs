//! Interactive loop: each line is a typed query; `/listen` runs one voice session.
//!
//! Exits on EOF (Ctrl+D) or `quit`/`exit`/`/quit`. Blank lines are ignored.

use std::io::Write;

use agri::{Assistant, Query, Turn};
use agri_cli::{render_notice, render_turn};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::Output;

fn is_quit_command(s: &str) -> bool {
    let lower = s.trim().to_lowercase();
    matches!(lower.as_str(), "quit" | "exit" | "/quit")
}

fn print_turn(turn: &Turn, out: &Output) -> Result<(), Box<dyn std::error::Error>> {
    if out.json {
        out.write_json(&serde_json::to_value(turn)?)?;
    } else {
        println!("{}", render_turn(turn));
    }
    for notice in &turn.notices {
        eprintln!("{}", render_notice(notice));
    }
    Ok(())
}

pub async fn run_repl_loop(
    assistant: &mut Assistant,
    out: &Output,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = match reader.next_line().await? {
            None => break,
            Some(s) if s.trim().is_empty() => continue,
            Some(s) if is_quit_command(&s) => break,
            Some(s) => s,
        };

        if line.trim() == "/listen" {
            // stdin belongs to this reader, so the next line stands in for the transcript.
            eprint!("Listening ({})... ", assistant.locale());
            match reader.next_line().await? {
                Some(said) if !said.trim().is_empty() => {
                    let turn = assistant.handle_query(Query::spoken(said.trim())).await;
                    print_turn(&turn, out)?;
                }
                _ => eprintln!("(no speech)"),
            }
            continue;
        }

        let turn = assistant.handle_query(Query::typed(line)).await;
        print_turn(&turn, out)?;
    }

    println!("Bye.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_commands() {
        assert!(is_quit_command("quit"));
        assert!(is_quit_command("  EXIT "));
        assert!(is_quit_command("/quit"));
        assert!(!is_quit_command("weather"));
    }
}
