//! Text-mode stand-ins for the map widget and the marker dialog.

use std::io::{BufRead, Write};

use crate::models::coordinate::Coordinate;
use crate::surface::form::{FormResponse, PlaceForm};
use crate::surface::rendering::{MarkerHandle, RenderingSurface};
use crate::utils::bounds::BoundingBox;

/// Prints every drawing command to `out`.
pub struct TerminalSurface<W: Write> {
    out: W,
    next_id: u64,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        TerminalSurface { out, next_id: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

// Output is best effort: a closed stdout must not abort an edit.
impl<W: Write> RenderingSurface for TerminalSurface<W> {
    fn place_marker(&mut self, coordinate: Coordinate, title: &str, description: &str) -> MarkerHandle {
        self.next_id += 1;
        let handle = MarkerHandle::new(self.next_id);
        let _ = writeln!(self.out, "  marker {} at {}: {} - {}", handle, coordinate, title, description);
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        let _ = writeln!(self.out, "  removed marker {}", handle);
    }

    fn move_camera(&mut self, coordinate: Coordinate, zoom: f32) {
        let _ = writeln!(self.out, "  camera at {} zoom {}", coordinate, zoom);
    }

    fn fit_bounds(&mut self, bounds: BoundingBox, padding_px: u32) {
        let _ = writeln!(
            self.out,
            "  camera framing lat {:.5}..{:.5}, lon {:.5}..{:.5} (padding {}px)",
            bounds.south_latitude, bounds.north_latitude, bounds.west_longitude, bounds.east_longitude, padding_px
        );
    }
}

/// Reads marker details line by line. An empty title or end of input
/// cancels the dialog.
pub struct PromptForm<R: BufRead, W: Write> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> PromptForm<R, W> {
    pub fn new(input: R, out: W) -> Self {
        PromptForm { input, out }
    }

    /// Reads one trimmed line, `None` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> Option<String> {
        let _ = write!(self.out, "{}", prompt);
        let _ = self.out.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

impl<R: BufRead, W: Write> PlaceForm for PromptForm<R, W> {
    fn request_place_details(&mut self, coordinate: Coordinate) -> FormResponse {
        let _ = writeln!(self.out, "Create a marker at {}", coordinate);

        let title = match self.read_line("  title (empty to cancel): ") {
            Some(title) if !title.is_empty() => title,
            _ => return FormResponse::Cancelled,
        };
        match self.read_line("  description: ") {
            Some(description) => FormResponse::Confirmed { title, description },
            None => FormResponse::Cancelled,
        }
    }
}
