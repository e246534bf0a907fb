pub mod user;
pub mod stats;
pub mod ranking;
pub mod profile;

pub use user::*;
pub use stats::*;
pub use ranking::*;
pub use profile::*;
