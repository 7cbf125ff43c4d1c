use crate::core::console::Console;
use crate::utils::error::Result;
use std::io::{BufRead, Write};

/// File access relative to the journal's base directory.
pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
    fn append_file(&self, path: &str, data: &[u8]) -> Result<()>;
    fn remove_file(&self, path: &str) -> Result<()>;
    fn exists(&self, path: &str) -> bool;
}

pub trait ConfigProvider {
    fn base_dir(&self) -> &str;
    fn security_dir(&self) -> &str;
    fn shelf_name(&self) -> &str;
    fn sample_size(&self) -> usize;
    fn last_update(&self) -> Option<&str>;
    fn backup_folder(&self) -> &str;
    fn archive_name(&self) -> &str;
    fn guest_export_file(&self) -> &str;
}

/// One chapter of the journal: a self-contained console program.
pub trait Exercise {
    fn chapter(&self) -> &'static str;
    fn title(&self) -> &'static str;

    /// Whether the runner closes the chapter with the "Script finished" footer.
    fn announces_finish(&self) -> bool {
        false
    }

    fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()>;
}

impl<E: Exercise + ?Sized> Exercise for &mut E {
    fn chapter(&self) -> &'static str {
        (**self).chapter()
    }

    fn title(&self) -> &'static str {
        (**self).title()
    }

    fn announces_finish(&self) -> bool {
        (**self).announces_finish()
    }

    fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        (**self).run(console)
    }
}
