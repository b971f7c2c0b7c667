use crate::assets::Sprites;
use crate::game::{Collision, Game};
use crate::input::InputSource;
use crate::render::Renderer;
use crate::ticker::Ticker;
use log::info;
use rand::Rng;
use std::io;
use std::time::Duration;

/// The fixed-tick loop that feeds input to a game and shows the results
#[derive(Clone, Debug)]
pub(crate) struct App<R> {
    game: Game<R>,
    tick_period: Duration,
}

impl<R: Rng> App<R> {
    pub(crate) fn new(game: Game<R>, tick_period: Duration) -> App<R> {
        App { game, tick_period }
    }

    /// Play until the game ends or the player quits.  Every tick, pending
    /// input is applied, the game advances, and a new frame is presented; a
    /// quit request takes effect once that tick is done.
    pub(crate) fn run<T: Renderer, I: InputSource>(
        mut self,
        renderer: &mut T,
        sprites: &Sprites,
        input: &mut I,
    ) -> io::Result<Outcome> {
        info!("Starting game with tick period {:?}", self.tick_period);
        let mut ticker = Ticker::new(self.tick_period);
        loop {
            let mut quit = false;
            for event in input.poll_events()? {
                if self.game.handle_event(event).is_break() {
                    quit = true;
                }
            }
            self.game.advance();
            self.game.render(renderer, sprites);
            renderer.present()?;
            if quit {
                info!("Player quit");
                break;
            }
            if !self.game.running() {
                break;
            }
            ticker.wait();
        }
        Ok(Outcome {
            score: self.game.score(),
            cause: self.game.collision(),
        })
    }
}

/// How a finished game ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Outcome {
    pub(crate) score: u32,
    /// What the snake hit, or `None` if the player quit
    pub(crate) cause: Option<Collision>,
}
