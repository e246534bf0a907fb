//! Elm-style application model.
//!
//! All state lives in [`Model`] and changes only through [`Model::update`],
//! which consumes one [`Event`] and yields at most one [`Command`] for the
//! runtime to execute.

use crate::error::FetchFailure;
use crate::models::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Input,
    Loading,
    ProfileView,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Overview,
    Repositories,
    Languages,
    Activity,
    Ranking,
}

impl ActiveView {
    pub const ALL: [ActiveView; 5] = [
        ActiveView::Overview,
        ActiveView::Repositories,
        ActiveView::Languages,
        ActiveView::Activity,
        ActiveView::Ranking,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }

    /// Clamped at the last view.
    pub fn next(self) -> Self {
        Self::ALL.get(self.index() + 1).copied().unwrap_or(self)
    }

    /// Clamped at the first view.
    pub fn previous(self) -> Self {
        match self.index() {
            0 => self,
            i => Self::ALL[i - 1],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ActiveView::Overview => "Overview",
            ActiveView::Repositories => "Repositories",
            ActiveView::Languages => "Languages",
            ActiveView::Activity => "Activity",
            ActiveView::Ranking => "Ranking",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ActiveView::Overview => "[O]",
            ActiveView::Repositories => "[R]",
            ActiveView::Languages => "[L]",
            ActiveView::Activity => "[A]",
            ActiveView::Ranking => "[K]",
        }
    }
}

/// Terminal keys after translation from the input backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Backspace,
    Enter,
    Left,
    Right,
    /// Ctrl+C.
    Interrupt,
    Other,
}

#[derive(Debug)]
pub enum Event {
    Key(KeyInput),
    Resize { width: u16, height: u16 },
    Tick,
    FetchSucceeded {
        generation: u64,
        profile: Box<UserProfile>,
    },
    FetchFailed {
        generation: u64,
        error: FetchFailure,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Fetch { generation: u64, username: String },
    Quit,
}

#[derive(Debug)]
pub struct Model {
    state: AppState,
    username: String,
    active_view: ActiveView,
    error: Option<FetchFailure>,
    profile: Option<Box<UserProfile>>,
    generation: u64,
    spinner_frame: usize,
    width: u16,
    height: u16,
}

impl Model {
    /// Starts in `Loading` (with a fetch command) when a username is given,
    /// otherwise in `Input`.
    pub fn new(username: Option<String>) -> (Self, Option<Command>) {
        let mut model = Self {
            state: AppState::Input,
            username: username.unwrap_or_default().trim().to_string(),
            active_view: ActiveView::Overview,
            error: None,
            profile: None,
            generation: 0,
            spinner_frame: 0,
            width: 0,
            height: 0,
        };

        let command = if model.username.is_empty() {
            None
        } else {
            model.start_fetch()
        };
        (model, command)
    }

    pub fn update(mut self, event: Event) -> (Self, Option<Command>) {
        let command = match event {
            Event::Key(key) => self.on_key(key),
            Event::Resize { width, height } => {
                self.width = width;
                self.height = height;
                None
            }
            Event::Tick => {
                if self.state == AppState::Loading {
                    self.spinner_frame = self.spinner_frame.wrapping_add(1);
                }
                None
            }
            Event::FetchSucceeded {
                generation,
                profile,
            } => {
                if self.accepts(generation) {
                    self.profile = Some(profile);
                    self.state = AppState::ProfileView;
                }
                None
            }
            Event::FetchFailed { generation, error } => {
                if self.accepts(generation) {
                    self.error = Some(error);
                    self.state = AppState::Error;
                }
                None
            }
        };
        (self, command)
    }

    fn on_key(&mut self, key: KeyInput) -> Option<Command> {
        match (self.state, key) {
            (_, KeyInput::Interrupt) | (_, KeyInput::Char('q')) => Some(Command::Quit),

            (AppState::Input, KeyInput::Enter) => {
                if self.username.trim().is_empty() {
                    None
                } else {
                    self.start_fetch()
                }
            }
            (AppState::Input, KeyInput::Backspace) => {
                self.username.pop();
                None
            }
            (AppState::Input, KeyInput::Char(c)) if !c.is_control() => {
                self.username.push(c);
                None
            }

            (AppState::Error | AppState::ProfileView, KeyInput::Char('r')) => self.start_fetch(),

            (AppState::ProfileView, KeyInput::Left | KeyInput::Char('h')) => {
                self.active_view = self.active_view.previous();
                None
            }
            (AppState::ProfileView, KeyInput::Right | KeyInput::Char('l')) => {
                self.active_view = self.active_view.next();
                None
            }

            _ => None,
        }
    }

    fn start_fetch(&mut self) -> Option<Command> {
        self.generation += 1;
        self.state = AppState::Loading;
        self.error = None;
        self.spinner_frame = 0;
        tracing::debug!("Dispatching fetch #{} for {}", self.generation, self.username);
        Some(Command::Fetch {
            generation: self.generation,
            username: self.username.trim().to_string(),
        })
    }

    /// Only the most recently dispatched fetch may complete the load.
    fn accepts(&self, generation: u64) -> bool {
        if self.state != AppState::Loading || generation != self.generation {
            tracing::debug!(
                "Discarding stale fetch result #{} (current #{})",
                generation,
                self.generation
            );
            return false;
        }
        true
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn active_view(&self) -> ActiveView {
        self.active_view
    }

    pub fn error(&self) -> Option<&FetchFailure> {
        self.error.as_ref()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn spinner_frame(&self) -> usize {
        self.spinner_frame
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }
}
