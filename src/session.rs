use std::time::Instant;

use log::{debug, info, warn};
use rand::Rng;

use crate::clock::Ticker;
use crate::config::Config;
use crate::error::Result;
use crate::hud::{end_message, Hud};
use crate::render::render_frame;
use crate::snake::Direction;
use crate::sprite::Sprite;
use crate::state::{GameState, RunState, TickEvent};
use crate::surface::PixelCanvas;

/// Game state wired to its timer, HUD and canvas.
///
/// Time is passed in rather than read, so the whole flow runs headless.
pub struct Session<R: Rng> {
    state: GameState,
    ticker: Ticker,
    hud: Hud,
    canvas: PixelCanvas,
    food_sprite: Sprite,
    cell_size: u32,
    rng: R,
}

impl<R: Rng> Session<R> {
    pub fn new(config: &Config, rng: R) -> Result<Self> {
        let grid = config.grid()?;

        Ok(Session {
            state: GameState::new(grid),
            ticker: Ticker::new(config.tick_interval()),
            hud: Hud::new(),
            canvas: PixelCanvas::new(config.width, config.height),
            food_sprite: Sprite::food(config.cell_size),
            cell_size: config.cell_size,
            rng,
        })
    }

    pub fn start(&mut self, now: Instant) {
        self.state.start(&mut self.rng);
        self.hud.set_score(self.state.score());
        self.hud.mark_started();

        if self.state.run_state() == RunState::Running {
            self.ticker.start(now);
        } else {
            self.ticker.cancel();
        }

        info!("New game on a {:?} grid, food at {:?}", self.state.grid(), self.state.food());
        self.render();
    }

    pub fn turn(&mut self, direction: Direction) -> bool {
        let changed = self.state.turn(direction);
        if changed {
            debug!("Turning {:?}", direction);
        }
        changed
    }

    /// Runs one tick if the timer is due at `now`.
    pub fn advance(&mut self, now: Instant) -> Option<TickEvent> {
        if !self.ticker.poll(now) {
            return None;
        }

        let event = self.state.tick(&mut self.rng);

        match event {
            TickEvent::Moved => {},
            TickEvent::Ate { score } => self.hud.set_score(score),
            TickEvent::Collided { score } | TickEvent::BoardFull { score } => {
                self.hud.set_score(score);
                self.ticker.cancel();
                info!(
                    "Game ended ({:?}) with score {} and length {}",
                    self.state.run_state(), score, self.state.snake().len()
                );
            },
            TickEvent::Stalled => {
                warn!("Tick fired while the game was {:?}", self.state.run_state());
                self.ticker.cancel();
            },
        }

        // A collision leaves the last frame on screen
        if !matches!(event, TickEvent::Collided { .. } | TickEvent::Stalled) {
            self.render();
        }

        Some(event)
    }

    /// Text for the end-of-game notification, once the run is over.
    pub fn end_message(&self) -> Option<String> {
        match self.state.run_state() {
            RunState::Ended(outcome) => Some(end_message(outcome, self.state.score())),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    #[cfg(test)]
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }

    fn render(&mut self) {
        render_frame(&mut self.canvas, &self.state, &self.food_sprite, self.cell_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;
    use crate::state::Outcome;
    use crate::surface::TRANSPARENT;
    use rand::{rngs::StdRng, SeedableRng};
    use std::time::Duration;

    const TICK: Duration = Duration::from_millis(150);

    fn session() -> Session<StdRng> {
        Session::new(&Config::default(), StdRng::seed_from_u64(11)).unwrap()
    }

    fn cells(session: &Session<StdRng>) -> Vec<(i32, i32)> {
        session.state().snake().body().iter().copied().collect()
    }

    #[test]
    fn idle_until_started() {
        let mut session = session();
        let t0 = Instant::now();

        assert_eq!(session.state().run_state(), RunState::Idle);
        assert_eq!(session.hud().start_label(), "Start");
        assert!(!session.ticker().is_active());
        assert_eq!(session.advance(t0 + TICK * 10), None);
    }

    #[test]
    fn first_tick_moves_right() {
        let mut session = session();
        let t0 = Instant::now();
        session.start(t0);

        assert_eq!(session.hud().start_label(), "Restart");
        assert_eq!(session.hud().score_text(), "Score: 0");
        assert_eq!(session.advance(t0 + TICK / 2), None);

        let event = session.advance(t0 + TICK).unwrap();
        if session.state().score() == 0 {
            assert_eq!(event, TickEvent::Moved);
            assert_eq!(cells(&session), vec![(6, 5), (5, 5), (4, 5)]);
        } else {
            assert_eq!(event, TickEvent::Ate { score: 10 });
            assert_eq!(cells(&session), vec![(6, 5), (5, 5), (4, 5), (3, 5)]);
        }
    }

    #[test]
    fn double_start_leaves_one_fresh_timer() {
        let mut session = session();
        let t0 = Instant::now();
        session.start(t0);
        session.turn(Down);
        session.start(t0 + TICK / 2);

        assert!(session.ticker().is_active());
        assert_eq!(session.state().direction(), Right);
        assert_eq!(cells(&session), vec![(5, 5), (4, 5), (3, 5)]);

        // The first schedule would have fired here
        assert_eq!(session.advance(t0 + TICK), None);
        assert!(session.advance(t0 + TICK / 2 + TICK).is_some());
        assert_eq!(session.advance(t0 + TICK / 2 + TICK), None);
    }

    #[test]
    fn collision_stops_the_timer_for_good() {
        let mut session = session();
        let t0 = Instant::now();
        session.start(t0);
        session.turn(Up);

        let mut now = t0;
        let mut last = None;
        for _ in 0..6 {
            now += TICK;
            last = session.advance(now);
        }

        // From (5, 5) going up, the sixth step leaves the board
        let score = session.state().score();
        assert_eq!(last, Some(TickEvent::Collided { score }));
        assert_eq!(session.state().run_state(), RunState::Ended(Outcome::Collision));
        assert!(!session.ticker().is_active());
        assert_eq!(session.end_message().unwrap(), format!("Game over! Final score: {}", score));

        let frozen = cells(&session);
        for _ in 0..5 {
            now += TICK;
            assert_eq!(session.advance(now), None);
        }
        assert_eq!(cells(&session), frozen);
        assert!(!session.turn(Left));

        session.start(now);
        assert_eq!(session.state().run_state(), RunState::Running);
        assert_eq!(session.end_message(), None);
    }

    #[test]
    fn frames_follow_the_state() {
        let mut session = session();
        assert!(session.canvas().image().pixels().all(|p| *p == TRANSPARENT));

        session.start(Instant::now());
        let head = session.canvas().pixel(5 * 20 + 9, 5 * 20 + 9);
        assert_eq!(head[3], 255);
    }
}
