//! Running replay scripts and writing their results.

use crate::host::ReplayHost;
use crate::script::{ReplayEvent, ReplayScript};
use kurbo::{Point, Vec2};
use labelbrush_core::{BrushError, BrushSession, BrushSettings, PointerEvent, RasterSurface};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name of the exported label image.
pub const LABEL_FILE: &str = "label.png";
/// File name of the exported annotation list.
pub const ANNOTATIONS_FILE: &str = "annotations.json";

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Script error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Brush(#[from] BrushError),
    #[error("No stroke was completed, nothing to export")]
    NoLabel,
}

/// State left behind by a finished replay.
#[derive(Debug)]
pub struct ReplayOutcome {
    pub session: BrushSession,
    pub settings: BrushSettings,
    pub host: ReplayHost,
}

impl ReplayOutcome {
    /// Write `label.png` and `annotations.json` into `dir`.
    pub fn write_outputs(&self, dir: &Path) -> Result<(), ReplayError> {
        let data_url = self.host.last_label().ok_or(ReplayError::NoLabel)?;
        let png_data = RasterSurface::from_data_url(data_url)?.encode_png()?;

        fs::create_dir_all(dir)?;
        fs::write(dir.join(LABEL_FILE), png_data)?;

        let annotations = self.session.layer().annotations().sorted();
        let json = serde_json::to_string_pretty(&annotations)?;
        fs::write(dir.join(ANNOTATIONS_FILE), json)?;

        log::info!("Saved label and annotations to: {:?}", dir);
        Ok(())
    }
}

/// Replay a script in memory.
pub fn run(script: &ReplayScript) -> Result<ReplayOutcome, ReplayError> {
    let mut session = BrushSession::new(script.width, script.height);
    let mut settings = script.settings;
    let mut host = ReplayHost::new();

    for event in &script.events {
        match *event {
            ReplayEvent::Down { x, y, pointer, button } => {
                let event = PointerEvent::new(Point::new(x, y), pointer, button);
                session.pointer_down(&event, &settings, &mut host)?;
            }
            ReplayEvent::Move { x, y, pointer } => {
                let event = PointerEvent::new(Point::new(x, y), pointer, Default::default());
                session.pointer_move(&event, &settings, &mut host)?;
            }
            ReplayEvent::Up => session.pointer_up(&mut host)?,
            ReplayEvent::SelectMode { mode } => settings.select_mode(mode),
            ReplayEvent::SetSize { size } => settings.size = size,
            ReplayEvent::SetColor { color } => settings.color = color,
            ReplayEvent::Pan { dx, dy } => host.camera.pan(Vec2::new(dx, dy)),
            ReplayEvent::Zoom { x, y, factor } => host.camera.zoom_at(Point::new(x, y), factor),
            ReplayEvent::Restore => match host.last_label() {
                Some(label) => session.restore_label(label)?,
                None => log::warn!("Restore requested before any label was exported"),
            },
        }
    }

    if host.drag_suspended() {
        log::warn!("Replay ended mid-stroke; drag handling is still suspended");
    }
    Ok(ReplayOutcome { session, settings, host })
}

/// Load a script from `script_path`, replay it and write results to `out_dir`.
pub fn run_file(
    script_path: impl AsRef<Path>,
    out_dir: impl AsRef<Path>,
) -> Result<ReplayOutcome, ReplayError> {
    let text = fs::read_to_string(script_path.as_ref())?;
    let script: ReplayScript = serde_json::from_str(&text)?;
    let outcome = run(&script)?;
    outcome.write_outputs(out_dir.as_ref())?;
    Ok(outcome)
}
