//! Command line arguments.
//!
//! # Examples
//!
//! ```bash
//! # Open the playground window
//! ./marble
//!
//! # Run 300 frames without a window, rolling forward
//! ./marble --headless --max-frames 300 --script forward
//!
//! # Custom tuning, verbose logs
//! ./marble --config marble.ron --log-level debug
//! ```

use std::path::PathBuf;

use clap::Parser;
use marble_core::input::MoveIntent;
use marble_sim::{PlaygroundConfig, SimError};

/// Frames run in headless mode when `--max-frames` is not given.
pub const DEFAULT_HEADLESS_FRAMES: u64 = 600;

/// Scripted input for headless runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ScriptedInput {
    #[default]
    Idle,
    Forward,
    Back,
    Left,
    Right,
}

impl ScriptedInput {
    pub fn intent(self) -> MoveIntent {
        match self {
            ScriptedInput::Idle => MoveIntent::IDLE,
            ScriptedInput::Forward => MoveIntent::new(1.0, 0.0, 0.0, 0.0),
            ScriptedInput::Back => MoveIntent::new(0.0, 1.0, 0.0, 0.0),
            ScriptedInput::Left => MoveIntent::new(0.0, 0.0, 1.0, 0.0),
            ScriptedInput::Right => MoveIntent::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

/// Marble playground arguments.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "marble",
    about = "Physics marble playground",
    long_about = "Roll a marble around a physics playground of walls, signboards and link boxes.\n\n\
        Arrow keys or WASD steer the ball. Escape closes the window.\n\
        \n\
        EXAMPLES:\n\
          # Run headless test\n\
          ./marble --headless --max-frames 120 --script right",
    version
)]
pub struct MarbleArgs {
    /// Run without a window on a simulated 60 Hz clock.
    #[arg(long)]
    pub headless: bool,

    /// Exit after N frames (useful for testing).
    #[arg(long)]
    pub max_frames: Option<u64>,

    /// RON file overriding playground tuning.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Behave like a touch device (input survives focus loss).
    #[arg(long)]
    pub touch: bool,

    /// Input held for the whole headless run.
    #[arg(long, default_value = "idle", value_enum)]
    pub script: ScriptedInput,

    /// Initial window width in pixels.
    #[arg(long, default_value = "1280")]
    pub width: u32,

    /// Initial window height in pixels.
    #[arg(long, default_value = "720")]
    pub height: u32,

    /// Window title.
    #[arg(long, default_value = "Marble Playground")]
    pub title: String,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Default for MarbleArgs {
    fn default() -> Self {
        Self {
            headless: false,
            max_frames: None,
            config: None,
            touch: false,
            script: ScriptedInput::Idle,
            width: 1280,
            height: 720,
            title: "Marble Playground".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl MarbleArgs {
    /// Frame limit; headless runs always have one.
    pub fn frame_limit(&self) -> Option<u64> {
        match self.max_frames {
            Some(limit) => Some(limit),
            None if self.headless => Some(DEFAULT_HEADLESS_FRAMES),
            None => None,
        }
    }

    /// The `--config` file, or the built-in defaults.
    pub fn load_config(&self) -> Result<PlaygroundConfig, SimError> {
        match &self.config {
            Some(path) => PlaygroundConfig::load(path),
            None => Ok(PlaygroundConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_headless_run() {
        let args = MarbleArgs::try_parse_from([
            "marble",
            "--headless",
            "--max-frames",
            "42",
            "--script",
            "forward",
            "--touch",
        ])
        .unwrap();
        assert!(args.headless);
        assert!(args.touch);
        assert_eq!(args.frame_limit(), Some(42));
        assert_eq!(args.script, ScriptedInput::Forward);
    }

    #[test]
    fn defaults() {
        let args = MarbleArgs::try_parse_from(["marble"]).unwrap();
        assert!(!args.headless);
        assert_eq!(args.frame_limit(), None);
        assert_eq!(args.width, 1280);
        assert_eq!(args.log_level, "info");
        assert_eq!(args.script, ScriptedInput::Idle);
        assert_eq!(args.load_config().unwrap(), PlaygroundConfig::default());
    }

    #[test]
    fn headless_gets_default_limit() {
        let args = MarbleArgs {
            headless: true,
            ..MarbleArgs::default()
        };
        assert_eq!(args.frame_limit(), Some(DEFAULT_HEADLESS_FRAMES));
    }

    #[test]
    fn rejects_unknown_script() {
        assert!(MarbleArgs::try_parse_from(["marble", "--script", "jump"]).is_err());
    }

    #[rstest]
    #[case(ScriptedInput::Forward, 1.0, 0.0)]
    #[case(ScriptedInput::Right, 0.0, 1.0)]
    #[case(ScriptedInput::Idle, 0.0, 0.0)]
    fn script_intent(#[case] script: ScriptedInput, #[case] forward: f32, #[case] right: f32) {
        let intent = script.intent();
        assert_eq!(intent.forward, forward);
        assert_eq!(intent.right, right);
    }
}
