//! Sound cues are fire-and-forget: nothing in the session ever waits on
//! them or looks at a result, and a missing sound device must never
//! break the game.

use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Correct,
    Wrong,
    Click,
    Win,
}

pub trait SoundPlayer: Send + Sync {
    fn play(&self, sound: Sound);
}

/// Plays nothing. For headless runs and tests.
pub struct NoSound;

impl SoundPlayer for NoSound {
    fn play(&self, _sound: Sound) {}
}

/// Rings the terminal bell and logs the cue. Write errors are ignored;
/// it only adds to the experience if it works.
pub struct TerminalBell;

impl SoundPlayer for TerminalBell {
    fn play(&self, sound: Sound) {
        log::debug!("sound cue: {:?}", sound);
        let mut stdout = std::io::stdout();
        let _ = stdout.write_all(b"\x07");
        let _ = stdout.flush();
    }
}
