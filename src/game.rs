use std::{thread::sleep, time::{Duration, Instant}};

use log::info;
use rand::rngs::ThreadRng;

use crate::config::Config;
use crate::error::Result;
use crate::input::{command_for, is_ctrl_c, Command};
use crate::session::Session;
use crate::term::TermManager;

const POLL_INTERVAL_MS: u64 = 5;

pub struct SnakeGame {
    session: Session<ThreadRng>,
    term: TermManager,
}

impl SnakeGame {
    pub fn new(config: &Config) -> Result<Self> {
        // Fail on the terminal size before allocating the canvas
        let term = TermManager::new(config.grid()?)?;
        let session = Session::new(config, rand::thread_rng())?;

        Ok(SnakeGame { session, term })
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.term.setup()?;
        self.term.clear()?;
        self.term.draw_borders()?;
        self.present()
    }

    pub fn show_intro(&mut self) -> Result<()> {
        self.term.show_message(&[
            "Arrow keys or WASD to move",
            "Enter or Space to start",
            "q or CTRL+C to quit",
        ])
    }

    /// Runs until the player quits.
    pub fn play(&mut self) -> Result<()> {
        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));

            for key_ev in self.term.read_key_events_queue()? {
                match command_for(&key_ev) {
                    Some(Command::Quit) => return Ok(()),
                    Some(Command::Start) => self.start()?,
                    Some(Command::Turn(dir)) => {
                        self.session.turn(dir);
                    },
                    None => {},
                }
            }

            let event = match self.session.advance(Instant::now()) {
                Some(event) => event,
                None => continue,
            };

            self.present()?;

            if event.is_terminal() && !self.game_over()? {
                return Ok(());
            }
        }
    }

    pub fn restore(&mut self) -> Result<()> {
        self.term.restore()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn start(&mut self) -> Result<()> {
        self.term.hide_message()?;
        self.session.start(Instant::now());
        self.present()
    }

    fn present(&mut self) -> Result<()> {
        self.term.present(self.session.canvas())?;
        let hud = self.session.hud();
        self.term.draw_hud(&hud.score_text(), hud.start_label())
    }

    /// Blocks on the end-of-game notice. Returns false if the player asked to quit.
    fn game_over(&mut self) -> Result<bool> {
        let text = self.session.end_message().unwrap_or_default();
        info!("{}", text);

        self.term.show_message(&[text.as_str(), "", "Press any key to continue,", "or CTRL+C to quit."])?;
        let key = self.term.read_key_blocking()?;
        self.term.hide_message()?;

        Ok(!is_ctrl_c(&key))
    }
}
