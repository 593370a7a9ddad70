//! Line-oriented driver for an editing session.
//!
//! Each input line is one gesture or menu action:
//! `press <lat> <lon>`, `tap <marker>`, `list`, `save`, `quit`.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::controller::collection_list::{CollectionDraft, CollectionListController, ControllerError};
use crate::editing::session::{LongPressOutcome, MapEditingSession};
use crate::models::coordinate::Coordinate;
use crate::storage::collection_store::CollectionStore;
use crate::surface::rendering::{MarkerHandle, RenderingSurface};
use crate::surface::terminal::PromptForm;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    Press(Coordinate),
    Tap(MarkerHandle),
    List,
    Save,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorExit {
    /// The map was added; carries its index in the list.
    Saved(usize),
    Abandoned,
}

pub fn parse_command(line: &str) -> Result<EditorCommand, String> {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or("");
    let args: Vec<&str> = parts.collect();

    match (command, args.as_slice()) {
        ("press", [lat, lon]) => {
            let latitude: f64 = lat.parse().map_err(|_| format!("bad latitude: {}", lat))?;
            let longitude: f64 = lon.parse().map_err(|_| format!("bad longitude: {}", lon))?;
            if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
                return Err(format!("out of range: {}, {}", latitude, longitude));
            }
            Ok(EditorCommand::Press(Coordinate::new(latitude, longitude)))
        }
        ("tap", [id]) => {
            let id = id.trim_start_matches('#');
            id.parse()
                .map(|id| EditorCommand::Tap(MarkerHandle::new(id)))
                .map_err(|_| format!("bad marker: {}", id))
        }
        ("list", []) => Ok(EditorCommand::List),
        ("save", []) => Ok(EditorCommand::Save),
        ("quit", []) => Ok(EditorCommand::Quit),
        _ => Err(format!(
            "unknown command: {} (try press <lat> <lon>, tap <marker>, list, save, quit)",
            line.trim()
        )),
    }
}

/// Runs gestures from `form`'s input against `session` until the map is
/// saved, the user quits, or input ends.
pub fn run_editor<S, R, I, W>(
    controller: &mut CollectionListController<S>,
    session: &mut MapEditingSession<R>,
    draft: &CollectionDraft,
    form: &mut PromptForm<I, W>,
    out: &mut impl Write,
) -> Result<EditorExit, ControllerError>
where
    S: CollectionStore,
    R: RenderingSurface,
    I: BufRead,
    W: Write,
{
    while let Some(line) = form.read_line("> ") {
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                let _ = writeln!(out, "{}", message);
                continue;
            }
        };
        debug!(?command, "editor command");

        match command {
            EditorCommand::Press(coordinate) => match session.on_long_press(coordinate, form) {
                LongPressOutcome::Added(handle) => {
                    let _ = writeln!(out, "Added marker {}", handle);
                }
                LongPressOutcome::Cancelled => {
                    let _ = writeln!(out, "Cancelled");
                }
                LongPressOutcome::Rejected(e) => {
                    let _ = writeln!(out, "{}", e);
                }
            },
            EditorCommand::Tap(handle) => match session.on_marker_info_tap(handle) {
                Some(place) => {
                    let _ = writeln!(out, "Removed \"{}\"", place.title());
                }
                None => {
                    let _ = writeln!(out, "No marker {}", handle);
                }
            },
            EditorCommand::List => {
                for (place, handle) in session.places() {
                    let _ = writeln!(out, "{} {} {}: {}", handle, place.coordinate(), place.title(), place.description());
                }
            }
            EditorCommand::Save if controller.has_unsaved_changes() => {
                // The map is already in the list; only the write is outstanding.
                match controller.persist() {
                    Ok(()) => return Ok(EditorExit::Saved(controller.collections().len() - 1)),
                    Err(e) => {
                        warn!(%e, "retrying save failed");
                        let _ = writeln!(out, "{}. Type `save` to try again.", e);
                    }
                }
            }
            EditorCommand::Save => {
                match controller.create_collection(session, &draft.title, draft.description.as_deref()) {
                    Ok(_) => return Ok(EditorExit::Saved(controller.collections().len() - 1)),
                    Err(ControllerError::Validation(e)) => {
                        let _ = writeln!(out, "{}", e);
                    }
                    Err(ControllerError::Storage(e)) => {
                        warn!(%e, "map kept in memory after failed save");
                        let _ = writeln!(out, "{}. Type `save` to try again.", e);
                    }
                    Err(e) => return Err(e),
                }
            }
            EditorCommand::Quit => return Ok(EditorExit::Abandoned),
        }
    }

    Ok(EditorExit::Abandoned)
}
