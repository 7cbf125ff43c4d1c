pub mod console;
pub mod runner;
pub mod shelf;
pub mod text;

pub use crate::domain::model::{CatRoster, Guest, GuestRegister};
pub use crate::domain::ports::{ConfigProvider, Exercise, Storage};
pub use crate::utils::error::Result;
