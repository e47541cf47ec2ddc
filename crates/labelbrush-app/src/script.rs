//! Replay script format.

use labelbrush_core::{BrushMode, BrushSettings, PaintColor, PointerButton, PointerKind};
use serde::{Deserialize, Serialize};

/// A recorded labeling session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Brush settings at the start of the replay.
    #[serde(default)]
    pub settings: BrushSettings,
    pub events: Vec<ReplayEvent>,
}

fn default_pointer() -> PointerKind {
    PointerKind::Mouse
}

/// One step of a replay. Positions are in screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayEvent {
    Down {
        x: f64,
        y: f64,
        #[serde(default = "default_pointer")]
        pointer: PointerKind,
        #[serde(default)]
        button: PointerButton,
    },
    Move {
        x: f64,
        y: f64,
        #[serde(default = "default_pointer")]
        pointer: PointerKind,
    },
    Up,
    /// Switch tool; also resets the brush size to the tool's default.
    SelectMode { mode: BrushMode },
    SetSize { size: u32 },
    SetColor { color: PaintColor },
    Pan { dx: f64, dy: f64 },
    Zoom { x: f64, y: f64, factor: f64 },
    /// Reload the most recently exported label image.
    Restore,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let json = r##"{
            "width": 32,
            "height": 16,
            "settings": { "color": "#4caf50" },
            "events": [
                { "type": "down", "x": 1, "y": 2 },
                { "type": "move", "x": 5, "y": 2, "pointer": "touch" },
                { "type": "up" },
                { "type": "select_mode", "mode": "eraser" },
                { "type": "set_color", "color": "#ff9800" },
                { "type": "zoom", "x": 0, "y": 0, "factor": 2.0 },
                { "type": "restore" }
            ]
        }"##;
        let script: ReplayScript = serde_json::from_str(json).unwrap();
        assert_eq!(script.width, 32);
        assert_eq!(script.settings.size, 1);
        assert_eq!(script.events.len(), 7);
        assert_eq!(
            script.events[0],
            ReplayEvent::Down {
                x: 1.0,
                y: 2.0,
                pointer: PointerKind::Mouse,
                button: PointerButton::Primary
            }
        );
        assert_eq!(
            script.events[1],
            ReplayEvent::Move { x: 5.0, y: 2.0, pointer: PointerKind::Touch }
        );
        assert_eq!(script.events[3], ReplayEvent::SelectMode { mode: BrushMode::Eraser });
    }

    #[test]
    fn test_unknown_event_rejected() {
        let json = r#"{ "width": 1, "height": 1, "events": [ { "type": "jump" } ] }"#;
        assert!(serde_json::from_str::<ReplayScript>(json).is_err());
    }

    #[test]
    fn test_bad_color_rejected() {
        let json = r#"{ "width": 1, "height": 1, "events": [
            { "type": "set_color", "color": "red" }
        ] }"#;
        assert!(serde_json::from_str::<ReplayScript>(json).is_err());
    }
}
