use crate::state::Outcome;

/// Text shown around the board: the score readout and the start trigger label.
#[derive(Debug, Default)]
pub struct Hud {
    score: u32,
    started: bool,
}

impl Hud {
    pub fn new() -> Self {
        Hud::default()
    }

    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub fn mark_started(&mut self) {
        self.started = true;
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn start_label(&self) -> &'static str {
        if self.started {"Restart"} else {"Start"}
    }
}

pub fn end_message(outcome: Outcome, score: u32) -> String {
    let s = match outcome {
        Outcome::Collision => "Game over!",
        Outcome::BoardFull => "You won!",
    };

    format!("{} Final score: {}", s, score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_switches_after_first_start() {
        let mut hud = Hud::new();
        assert_eq!(hud.start_label(), "Start");
        hud.mark_started();
        assert_eq!(hud.start_label(), "Restart");
        hud.mark_started();
        assert_eq!(hud.start_label(), "Restart");
    }

    #[test]
    fn score_readout() {
        let mut hud = Hud::new();
        assert_eq!(hud.score_text(), "Score: 0");
        hud.set_score(40);
        assert_eq!(hud.score_text(), "Score: 40");
    }

    #[test]
    fn end_messages_embed_the_score() {
        assert_eq!(end_message(Outcome::Collision, 70), "Game over! Final score: 70");
        assert_eq!(end_message(Outcome::BoardFull, 3570), "You won! Final score: 3570");
    }
}
