/// Display surface for the running score and timer. Updated once per frame
/// while the game is running.
pub trait Hud {
    fn update(&mut self, score: u64, elapsed_seconds: u64);
}

/// `Score: N`
pub fn format_score(score: u64) -> String {
    format!("Score: {score}")
}

/// `Time: MM:SS`, minutes unbounded.
pub fn format_clock(elapsed_seconds: u64) -> String {
    let minutes = elapsed_seconds / 60;
    let seconds = elapsed_seconds % 60;
    format!("Time: {minutes:02}:{seconds:02}")
}

/// HUD that keeps the formatted lines for a host to paint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudText {
    pub score: String,
    pub time: String,
}

impl Default for HudText {
    fn default() -> Self {
        Self {
            score: format_score(0),
            time: format_clock(0),
        }
    }
}

impl Hud for HudText {
    fn update(&mut self, score: u64, elapsed_seconds: u64) {
        self.score = format_score(score);
        self.time = format_clock(elapsed_seconds);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullHud;

impl Hud for NullHud {
    fn update(&mut self, _score: u64, _elapsed_seconds: u64) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pads_minutes_and_seconds() {
        assert_eq!(format_clock(0), "Time: 00:00");
        assert_eq!(format_clock(65), "Time: 01:05");
        assert_eq!(format_clock(6000), "Time: 100:00");
    }

    #[test]
    fn hud_text_tracks_updates() {
        let mut hud = HudText::default();
        assert_eq!(hud.score, "Score: 0");
        hud.update(170, 59);
        assert_eq!(hud.score, "Score: 170");
        assert_eq!(hud.time, "Time: 00:59");
    }
}
