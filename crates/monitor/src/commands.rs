//! Operator command source
//!
//! Keys are read line by line: `p` pauses, `r` resumes, `q` quits. Every
//! recognized key on a line is delivered, in order. End of input closes
//! the channel without quitting, so a replay fed from a closed stdin
//! still runs to the end of its recording.
//!
//! Reading happens on a plain thread: a blocking stdin read inside the
//! runtime would hold up runtime shutdown until the next keypress.

use dms::Command;
use std::io::BufRead;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Map one key to a command
pub fn parse_key(key: char) -> Option<Command> {
    match key.to_ascii_lowercase() {
        'p' => Some(Command::Pause),
        'r' => Some(Command::Resume),
        'q' => Some(Command::Quit),
        _ => None,
    }
}

/// Read commands from `reader` on a background thread
pub fn spawn_command_reader<R>(reader: R) -> mpsc::UnboundedReceiver<Command>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("Command input failed: {}", e);
                    return;
                }
            };
            for command in line.chars().filter_map(parse_key) {
                debug!("Operator command {:?}", command);
                if tx.send(command).is_err() {
                    return;
                }
            }
        }
        debug!("Command input closed");
    });

    rx
}

/// Commands from the process's standard input
pub fn stdin_commands() -> mpsc::UnboundedReceiver<Command> {
    spawn_command_reader(std::io::BufReader::new(std::io::stdin()))
}
