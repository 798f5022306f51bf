//! JSON-lines bridge between the UI shell and the controller.
//!
//! One command per line on stdin, one event per line on stdout.

use anyhow::{Context, Result};
use crossbeam_channel::{never, select, Receiver, Sender};
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};
use winks_core::{OverlayCommand, OverlayEvent};

/// Parse one input line. Blank lines are skipped.
pub fn parse_command(line: &str) -> Result<Option<OverlayCommand>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

/// Forward commands read from `input` until EOF or `shutdown`.
///
/// Malformed lines are reported on `errors` and skipped. EOF is treated as a
/// shutdown request.
pub fn read_commands<R: BufRead>(
    input: R,
    commands: &Sender<OverlayCommand>,
    errors: &Sender<OverlayEvent>,
) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "Failed to read command input");
                break;
            }
        };

        match parse_command(&line) {
            Ok(Some(cmd)) => {
                let is_shutdown = cmd == OverlayCommand::Shutdown;
                if commands.send(cmd).is_err() {
                    debug!("Controller gone, stopping command reader");
                    return;
                }
                if is_shutdown {
                    return;
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "Ignoring malformed command");
                let _ = errors.send(OverlayEvent::Error {
                    message: format!("invalid command: {e}"),
                });
            }
        }
    }

    info!("Command input closed, shutting down");
    let _ = commands.send(OverlayCommand::Shutdown);
}

pub fn write_event<W: Write>(out: &mut W, event: &OverlayEvent) -> Result<()> {
    serde_json::to_writer(&mut *out, event).context("failed to encode event")?;
    out.write_all(b"\n").context("failed to write event")?;
    out.flush().context("failed to flush events")?;
    Ok(())
}

/// Write controller and transport events to `out` until the controller exits.
pub fn pump_events<W: Write>(
    mut out: W,
    events: &Receiver<OverlayEvent>,
    errors: Receiver<OverlayEvent>,
) -> Result<()> {
    let mut errors = Some(errors);

    loop {
        let error_rx = errors.clone().unwrap_or_else(never);
        select! {
            recv(events) -> msg => match msg {
                Ok(event) => write_event(&mut out, &event)?,
                // Controller thread has exited
                Err(_) => break,
            },
            recv(error_rx) -> msg => match msg {
                Ok(event) => write_event(&mut out, &event)?,
                Err(_) => errors = None,
            },
        }
    }

    // Flush reader errors that raced the shutdown.
    if let Some(errors) = errors {
        for event in errors.try_iter() {
            write_event(&mut out, &event)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use winks_core::ScrollDirection;

    #[test]
    fn test_parse_command_lines() {
        assert_eq!(parse_command("   ").unwrap(), None);
        assert_eq!(
            parse_command(r#"{"type":"scroll","direction":"up"}"#).unwrap(),
            Some(OverlayCommand::Scroll {
                direction: ScrollDirection::Up
            })
        );
        assert!(parse_command(r#"{"type":"fly"}"#).is_err());
    }

    #[test]
    fn test_reader_reports_bad_lines_and_shuts_down_on_eof() {
        let input = "{\"type\":\"startProximity\"}\nnot json\n\n{\"type\":\"relocateOverlay\"}\n";
        let (cmd_tx, cmd_rx) = unbounded();
        let (err_tx, err_rx) = unbounded();

        read_commands(input.as_bytes(), &cmd_tx, &err_tx);

        let cmds: Vec<_> = cmd_rx.try_iter().collect();
        assert_eq!(
            cmds,
            vec![
                OverlayCommand::StartProximity,
                OverlayCommand::RelocateOverlay,
                OverlayCommand::Shutdown,
            ]
        );
        let errors: Vec<_> = err_rx.try_iter().collect();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], OverlayEvent::Error { .. }));
    }

    #[test]
    fn test_reader_stops_after_shutdown_command() {
        let input = "{\"type\":\"shutdown\"}\n{\"type\":\"startProximity\"}\n";
        let (cmd_tx, cmd_rx) = unbounded();
        let (err_tx, _err_rx) = unbounded();

        read_commands(input.as_bytes(), &cmd_tx, &err_tx);

        let cmds: Vec<_> = cmd_rx.try_iter().collect();
        assert_eq!(cmds, vec![OverlayCommand::Shutdown]);
    }

    #[test]
    fn test_pump_writes_json_lines_until_disconnect() {
        let (event_tx, event_rx) = unbounded();
        let (err_tx, err_rx) = unbounded();

        event_tx.send(OverlayEvent::ProximityUpdate { is_near: true }).unwrap();
        err_tx
            .send(OverlayEvent::Error {
                message: "bad".into(),
            })
            .unwrap();
        drop(event_tx);
        drop(err_tx);

        let mut out = Vec::new();
        pump_events(&mut out, &event_rx, err_rx).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.contains(&r#"{"type":"proximityUpdate","isNear":true}"#));
        assert!(lines.contains(&r#"{"type":"error","message":"bad"}"#));
    }
}
