mod direction;
mod field;
mod snake;
pub(crate) use self::direction::Direction;
use self::field::Bounds;
use self::snake::Snake;
use crate::assets::Sprites;
use crate::consts;
use crate::input::InputEvent;
use crate::render::{draw_score, Renderer};
use crate::util::tile_rect;
use log::{debug, info};
use rand::Rng;
use ratatui::layout::{Position, Rect};
use std::fmt;
use std::ops::ControlFlow;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    score: u32,
    snake: Snake,
    /// `None` once the snake covers every tile
    food: Option<Position>,
    bounds: Bounds,
    state: GameState,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new() -> Self {
        Game::new_with_rng(rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(rng: R) -> Game<R> {
        let bounds = Bounds::from(consts::FIELD_SIZE);
        let snake = Snake::new(
            consts::SNAKE_START,
            Direction::Right,
            consts::INITIAL_BODY_LENGTH,
            bounds,
        );
        let mut game = Game {
            rng,
            score: 0,
            snake,
            food: None,
            bounds,
            state: GameState::Running,
        };
        game.spawn_food();
        game
    }

    /// Run one tick of the simulation: move the snake, check for collisions,
    /// and eat any food the head lands on
    pub(crate) fn advance(&mut self) {
        if !self.running() {
            return;
        }
        if !self.snake.advance(self.bounds) {
            // The head now shares its tile with the first body segment
            self.game_over(Collision::Wall);
            return;
        }
        if self.snake.bit_itself() {
            self.game_over(Collision::Body);
            return;
        }
        if self.food == Some(self.snake.head()) {
            self.snake.grow(self.bounds.area());
            self.score += 1;
            debug!("Ate food at {}; score is now {}", self.snake.head(), self.score);
            self.spawn_food();
        }
    }

    /// Place the food on a random tile not covered by the snake, drawing
    /// tiles until a free one turns up
    fn spawn_food(&mut self) {
        if self.snake.len() >= self.bounds.area() {
            self.food = None;
            return;
        }
        let pos = loop {
            let pos = self.bounds.random_position(&mut self.rng);
            if !self.snake.occupies(pos) {
                break pos;
            }
        };
        debug!("Spawned food at {pos}");
        self.food = Some(pos);
    }
}

impl<R> Game<R> {
    /// Handle an input event.  Returns `Break` if the player asked to quit.
    pub(crate) fn handle_event(&mut self, event: InputEvent) -> ControlFlow<()> {
        match event {
            InputEvent::Quit => return ControlFlow::Break(()),
            InputEvent::Key(key) => {
                if self.running() {
                    self.snake.turn(key.direction());
                }
            }
        }
        ControlFlow::Continue(())
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn running(&self) -> bool {
        self.state == GameState::Running
    }

    /// What ended the game, if it has ended
    pub(crate) fn collision(&self) -> Option<Collision> {
        match self.state {
            GameState::Running => None,
            GameState::GameOver(collision) => Some(collision),
        }
    }

    fn game_over(&mut self, collision: Collision) {
        info!(
            "Game over: {collision:?} collision at {}; final score {}",
            self.snake.head(),
            self.score
        );
        self.state = GameState::GameOver(collision);
    }

    /// Draw the current state of the game.  The frame is not presented.
    pub(crate) fn render<T: Renderer>(&self, renderer: &mut T, sprites: &Sprites) {
        let layout = &sprites.layout;
        renderer.clear();
        renderer.draw_background(&sprites.background);
        renderer.draw_clip(
            &sprites.snake,
            layout.head(self.snake.direction()),
            tile_rect(self.snake.head()),
        );
        for &pos in self.snake.body() {
            renderer.draw_clip(&sprites.snake, layout.body(), tile_rect(pos));
        }
        draw_score(renderer, &sprites.numbers, layout, self.score);
        if let Some(pos) = self.food {
            // Food is drawn at the sheet's own size rather than the tile size
            let size = sprites.food.size();
            let dest = Rect {
                width: size.width,
                height: size.height,
                ..tile_rect(pos)
            };
            renderer.draw_clip(&sprites.food, sprites.food.area(), dest);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GameState {
    Running,
    GameOver(Collision),
}

/// What the snake ran into
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    /// The edge of the playing field
    Wall,
    /// The snake's own body
    Body,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collision::Wall => write!(f, "hit the wall"),
            Collision::Body => write!(f, "bit itself"),
        }
    }
}
