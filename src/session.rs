use crate::assets::{AssetError, Sprites};
use crate::render::TerminalRenderer;
use log::debug;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout};
use std::path::Path;
use thiserror::Error;

/// Everything the game needs to draw on the terminal.  Dropping it gives the
/// terminal back to the shell.
#[derive(Debug)]
pub(crate) struct Session {
    sprites: Sprites,
    renderer: TerminalRenderer<CrosstermBackend<Stdout>>,
    // Must be dropped last
    _guard: TerminalGuard,
}

impl Session {
    /// Take over the terminal and load the sprite sheets from `sprites_dir`.
    /// On failure, anything already acquired is released before returning.
    pub(crate) fn open(sprites_dir: &Path) -> Result<Session, GameError> {
        let terminal = ratatui::try_init().map_err(GameError::Init)?;
        let guard = TerminalGuard;
        let renderer = TerminalRenderer::new(terminal);
        let sprites = Sprites::load(sprites_dir)?;
        Ok(Session {
            sprites,
            renderer,
            _guard: guard,
        })
    }

    pub(crate) fn split(
        &mut self,
    ) -> (&mut TerminalRenderer<CrosstermBackend<Stdout>>, &Sprites) {
        (&mut self.renderer, &self.sprites)
    }
}

/// Restores the terminal when dropped
#[derive(Debug)]
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        debug!("Restoring terminal");
        ratatui::restore();
    }
}

#[derive(Debug, Error)]
pub(crate) enum GameError {
    #[error("failed to initialize terminal")]
    Init(#[source] io::Error),
    #[error(transparent)]
    Assets(#[from] AssetError),
    #[error("terminal I/O failed")]
    Io(#[source] io::Error),
}

impl GameError {
    /// Is this a write to a closed pipe?
    pub(crate) fn is_broken_pipe(&self) -> bool {
        match self {
            GameError::Init(e) | GameError::Io(e) => e.kind() == io::ErrorKind::BrokenPipe,
            GameError::Assets(_) => false,
        }
    }
}
