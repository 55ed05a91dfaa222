/// Menu state machine.
///
/// Discrete screens gate whether gameplay updates run; while any non-playing
/// screen is up, the key channel drives navigation here instead of the ship.
/// Confirmations surface as `MenuEvent`s for the orchestrator to execute —
/// this module never touches the camera or the game state itself.

use crate::settings::DISPLAY_MODES;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Options,
    Playing,
    GameOver,
}

/// What the orchestrator should do about a confirmed selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    None,
    /// Reset entities and score, then run the round.
    StartGame,
    OpenOptions,
    /// Switch to `DISPLAY_MODES[i]`: re-derive geometry, reconfigure the camera.
    ApplyMode(usize),
    CloseOptions,
    BackToMenu,
    Quit,
}

pub const MAIN_OPTIONS: &[&str] = &["Play", "Options", "Quit"];
pub const GAME_OVER_OPTIONS: &[&str] = &["Restart", "Main menu", "Quit"];

#[derive(Clone, Debug)]
pub struct Menu {
    pub screen: Screen,
    pub selected: usize,
    /// Substate of `Playing`; pausing keeps the round alive but frozen.
    pub paused: bool,
    /// Index of the active display mode in `DISPLAY_MODES`.
    pub mode_index: usize,
}

impl Menu {
    pub fn new(mode_index: usize) -> Self {
        Self {
            screen: Screen::Menu,
            selected: 0,
            paused: false,
            mode_index,
        }
    }

    /// True only when gameplay updates (and tracker steering) should run.
    pub fn is_playing(&self) -> bool {
        self.screen == Screen::Playing && !self.paused
    }

    fn option_count(&self) -> usize {
        match self.screen {
            Screen::Menu => MAIN_OPTIONS.len(),
            Screen::Options => DISPLAY_MODES.len() + 1, // modes + Back
            Screen::GameOver => GAME_OVER_OPTIONS.len(),
            Screen::Playing => 0,
        }
    }

    /// Wrap-around navigation — the index can never leave the option list.
    pub fn select_prev(&mut self) {
        let n = self.option_count();
        if n > 0 {
            self.selected = (self.selected + n - 1) % n;
        }
    }

    pub fn select_next(&mut self) {
        let n = self.option_count();
        if n > 0 {
            self.selected = (self.selected + 1) % n;
        }
    }

    pub fn confirm(&mut self) -> MenuEvent {
        match self.screen {
            Screen::Menu => match self.selected {
                0 => {
                    self.start_game();
                    MenuEvent::StartGame
                }
                1 => {
                    self.screen = Screen::Options;
                    self.selected = self.mode_index;
                    MenuEvent::OpenOptions
                }
                _ => MenuEvent::Quit,
            },
            Screen::Options => {
                if self.selected < DISPLAY_MODES.len() {
                    self.mode_index = self.selected;
                    MenuEvent::ApplyMode(self.selected)
                } else {
                    self.screen = Screen::Menu;
                    self.selected = 0;
                    MenuEvent::CloseOptions
                }
            }
            Screen::GameOver => match self.selected {
                0 => {
                    self.start_game();
                    MenuEvent::StartGame
                }
                1 => {
                    self.screen = Screen::Menu;
                    self.selected = 0;
                    MenuEvent::BackToMenu
                }
                _ => MenuEvent::Quit,
            },
            Screen::Playing => MenuEvent::None,
        }
    }

    fn start_game(&mut self) {
        self.screen = Screen::Playing;
        self.paused = false;
        self.selected = 0;
    }

    /// Round ended; entity updates stay frozen until restart.
    pub fn game_over(&mut self) {
        self.screen = Screen::GameOver;
        self.paused = false;
        self.selected = 0;
    }

    pub fn toggle_pause(&mut self) {
        if self.screen == Screen::Playing {
            self.paused = !self.paused;
        }
    }

    /// Escape from the options screen without applying anything.
    pub fn back(&mut self) {
        if self.screen == Screen::Options {
            self.screen = Screen::Menu;
            self.selected = 0;
        }
    }

    /// Labels for the current screen's options, in selection order.
    pub fn option_labels(&self) -> Vec<String> {
        match self.screen {
            Screen::Menu => MAIN_OPTIONS.iter().map(|s| s.to_string()).collect(),
            Screen::GameOver => GAME_OVER_OPTIONS.iter().map(|s| s.to_string()).collect(),
            Screen::Options => DISPLAY_MODES
                .iter()
                .enumerate()
                .map(|(i, &(w, h))| {
                    if i == self.mode_index {
                        format!("{w}x{h}  (current)")
                    } else {
                        format!("{w}x{h}")
                    }
                })
                .chain(std::iter::once("Back".to_string()))
                .collect(),
            Screen::Playing => Vec::new(),
        }
    }
}
