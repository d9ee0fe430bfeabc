//! Line loop speaking the host protocol.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use corner_rush_arena::{parse_message, ActionFrame, Arena, Message, TurnState};
use corner_rush_system_strategy::{Session, SessionConfig};

/// Reads host messages until the game ends or input closes, answering every
/// deploy turn with a build line and a deploy line.
pub(crate) fn run<R, W>(input: R, mut output: W, config: SessionConfig) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut session: Option<Session> = None;
    for (number, line) in input.lines().enumerate() {
        let line = line.context("failed to read from the host")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_message(line) {
            Ok(Message::Config(catalog)) => {
                session = Some(Session::on_game_start(config, *catalog));
            }
            Ok(Message::Turn(state)) => {
                let Some(session) = session.as_mut() else {
                    tracing::warn!(line = number + 1, "turn received before configuration");
                    continue;
                };
                play_turn(session, &state, &mut output)?;
            }
            Ok(Message::Action(frame)) => {
                if let Some(session) = session.as_mut() {
                    record_breaches(session, &frame);
                }
            }
            Ok(Message::GameOver) => {
                tracing::info!("game over");
                break;
            }
            Err(error) if session.is_none() => {
                return Err(error).context("malformed game configuration");
            }
            Err(error) => {
                tracing::warn!(line = number + 1, %error, "skipping malformed host message");
            }
        }
    }
    Ok(())
}

fn play_turn<W: Write>(session: &mut Session, state: &TurnState, output: &mut W) -> Result<()> {
    let mut arena = Arena::new(session.catalog().clone(), state);
    let report = session.on_turn(&mut arena);
    tracing::debug!(turn = state.turn, ?report, "turn decided");

    let submission = arena
        .submit_turn()
        .with_context(|| format!("failed to encode turn {}", state.turn))?;
    writeln!(output, "{}", submission.build).context("failed to write build line")?;
    writeln!(output, "{}", submission.deploy).context("failed to write deploy line")?;
    output.flush().context("failed to flush turn reply")
}

fn record_breaches(session: &mut Session, frame: &ActionFrame) {
    for breach in frame.breaches() {
        match breach {
            Ok(breach) => {
                let _ = session.on_breach(breach);
            }
            Err(error) => tracing::warn!(%error, "dropping breach event"),
        }
    }
}
