pub mod app;
pub mod terminal;
pub mod views;

pub use app::{ActiveView, AppState, Command, Event, KeyInput, Model};
pub use terminal::run;
