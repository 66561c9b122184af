//! The `session` command: one filter selection in, one update out, per line.
//!
//! The first event always carries the full dashboard for the default
//! selection. Each later input line is a JSON [`FilterSelection`]; its event
//! holds only the outputs that changed. Blank lines are skipped and a line
//! that fails to parse yields an error event without ending the session.

use crate::dashboard::{Dashboard, DashboardUpdate};
use bike_data::FilterSelection;
use log::warn;
use serde::Serialize;
use std::io::{BufRead, Write};

#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Update(DashboardUpdate),
    Error { message: String },
}

fn emit<W: Write>(out: &mut W, event: &SessionEvent) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, event)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

/// Drive `dashboard` from `input` until end of input. Returns the number of
/// selections applied, including the initial one.
pub fn run_session<R: BufRead, W: Write>(
    dashboard: &mut Dashboard,
    input: R,
    out: &mut W,
) -> anyhow::Result<usize> {
    let initial = dashboard.default_selection();
    emit(out, &SessionEvent::Update(dashboard.apply(&initial)?))?;
    let mut applied = 1;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event = match serde_json::from_str::<FilterSelection>(&line) {
            Ok(selection) => {
                applied += 1;
                SessionEvent::Update(dashboard.apply(&selection)?)
            }
            Err(e) => {
                warn!("session: ignoring invalid selection: {}", e);
                SessionEvent::Error {
                    message: format!("invalid selection: {}", e),
                }
            }
        };
        emit(out, &event)?;
    }
    Ok(applied)
}
