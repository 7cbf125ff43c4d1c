//! One module per journal chapter. Every exercise implements
//! [`Exercise`](crate::domain::ports::Exercise) and talks to the user only
//! through a [`Console`](crate::core::console::Console).

pub mod basics;
pub mod collatz;
pub mod debugging;
pub mod file_io;
pub mod file_sorter;
pub mod flow_control;
pub mod guests;
pub mod lists;
pub mod loops;
pub mod regex_extractor;
pub mod text_prep;

pub use basics::Basics;
pub use collatz::CollatzSession;
pub use debugging::DivisionCalculator;
pub use file_io::{FileIoSettings, FileIoStations};
pub use file_sorter::BackupUtility;
pub use flow_control::GateRiddle;
pub use guests::GuestRegisterDesk;
pub use lists::CatHaven;
pub use loops::RockPaperScissors;
pub use regex_extractor::{RegexExtractor, TextSource};
pub use text_prep::TextPrep;
