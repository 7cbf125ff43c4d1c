use crate::domain::ports::ConfigProvider;
use crate::utils::error::{JournalError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASE_DIR: &str = ".";
pub const DEFAULT_SECURITY_DIR: &str = r"C:\Montressor\Security_Logs";
pub const DEFAULT_SHELF_NAME: &str = "critical_data";
pub const DEFAULT_SAMPLE_SIZE: usize = 2;
pub const DEFAULT_BACKUP_FOLDER: &str = "Backup_Test_Dir";
pub const DEFAULT_ARCHIVE_NAME: &str = "ARCHIVE_BACKUP_FULL.zip";
pub const DEFAULT_GUEST_EXPORT: &str = "guest_register.csv";

/// Number of critical events the file-I/O station can sample from.
pub const CRITICAL_EVENT_COUNT: usize = 4;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JournalConfig {
    pub journal: Option<JournalSection>,
    pub workspace: Option<WorkspaceConfig>,
    pub file_io: Option<FileIoConfig>,
    pub backup: Option<BackupConfig>,
    pub guests: Option<GuestsConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalSection {
    pub name: String,
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    pub base_dir: Option<String>,
    pub security_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileIoConfig {
    pub shelf_name: Option<String>,
    pub sample_size: Option<usize>,
    pub last_update: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackupConfig {
    pub folder: Option<String>,
    pub archive_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuestsConfig {
    pub export_file: Option<String>,
}

impl JournalConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(JournalError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| JournalError::config(format!("TOML parsing error: {}", e)))
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Command-line `--base-dir` wins over the file.
    pub fn with_base_dir(mut self, base_dir: Option<String>) -> Self {
        if let Some(dir) = base_dir {
            self.workspace.get_or_insert_with(WorkspaceConfig::default).base_dir = Some(dir);
        }
        self
    }

    pub fn journal_name(&self) -> &str {
        self.journal
            .as_ref()
            .map(|j| j.name.as_str())
            .unwrap_or("Montressor Learning Journal")
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(journal) = &self.journal {
            validation::validate_non_empty_string("journal.name", &journal.name)?;
        }

        validation::validate_path("workspace.base_dir", self.base_dir())?;
        validation::validate_path("workspace.security_dir", self.security_dir())?;
        validation::validate_file_name("file_io.shelf_name", self.shelf_name())?;
        validation::validate_range(
            "file_io.sample_size",
            self.sample_size(),
            1,
            CRITICAL_EVENT_COUNT,
        )?;

        if let Some(date) = self.last_update() {
            chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
                JournalError::InvalidConfigValueError {
                    field: "file_io.last_update".to_string(),
                    value: date.to_string(),
                    reason: format!("Expected YYYY-MM-DD: {}", e),
                }
            })?;
        }

        validation::validate_file_name("backup.folder", self.backup_folder())?;
        validation::validate_file_name("backup.archive_name", self.archive_name())?;
        validation::validate_file_extensions(
            "backup.archive_name",
            &[self.archive_name().to_string()],
            &["zip"],
        )?;

        validation::validate_file_name("guests.export_file", self.guest_export_file())?;
        validation::validate_file_extensions(
            "guests.export_file",
            &[self.guest_export_file().to_string()],
            &["csv"],
        )?;

        Ok(())
    }
}

impl ConfigProvider for JournalConfig {
    fn base_dir(&self) -> &str {
        self.workspace
            .as_ref()
            .and_then(|w| w.base_dir.as_deref())
            .unwrap_or(DEFAULT_BASE_DIR)
    }

    fn security_dir(&self) -> &str {
        self.workspace
            .as_ref()
            .and_then(|w| w.security_dir.as_deref())
            .unwrap_or(DEFAULT_SECURITY_DIR)
    }

    fn shelf_name(&self) -> &str {
        self.file_io
            .as_ref()
            .and_then(|f| f.shelf_name.as_deref())
            .unwrap_or(DEFAULT_SHELF_NAME)
    }

    fn sample_size(&self) -> usize {
        self.file_io
            .as_ref()
            .and_then(|f| f.sample_size)
            .unwrap_or(DEFAULT_SAMPLE_SIZE)
    }

    fn last_update(&self) -> Option<&str> {
        self.file_io.as_ref().and_then(|f| f.last_update.as_deref())
    }

    fn backup_folder(&self) -> &str {
        self.backup
            .as_ref()
            .and_then(|b| b.folder.as_deref())
            .unwrap_or(DEFAULT_BACKUP_FOLDER)
    }

    fn archive_name(&self) -> &str {
        self.backup
            .as_ref()
            .and_then(|b| b.archive_name.as_deref())
            .unwrap_or(DEFAULT_ARCHIVE_NAME)
    }

    fn guest_export_file(&self) -> &str {
        self.guests
            .as_ref()
            .and_then(|g| g.export_file.as_deref())
            .unwrap_or(DEFAULT_GUEST_EXPORT)
    }
}

impl Validate for JournalConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_file() {
        let config = JournalConfig::default();

        assert_eq!(config.base_dir(), ".");
        assert_eq!(config.shelf_name(), "critical_data");
        assert_eq!(config.sample_size(), 2);
        assert_eq!(config.archive_name(), "ARCHIVE_BACKUP_FULL.zip");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[journal]
name = "Spaceport Journal"

[workspace]
base_dir = "./sandbox"

[file_io]
shelf_name = "events"
sample_size = 3
last_update = "2025-11-10"

[backup]
folder = "Backups"
archive_name = "nightly.zip"

[guests]
export_file = "tankard.csv"
"#;

        let config = JournalConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.journal_name(), "Spaceport Journal");
        assert_eq!(config.base_dir(), "./sandbox");
        assert_eq!(config.shelf_name(), "events");
        assert_eq!(config.sample_size(), 3);
        assert_eq!(config.last_update(), Some("2025-11-10"));
        assert_eq!(config.backup_folder(), "Backups");
        assert_eq!(config.guest_export_file(), "tankard.csv");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("JOURNAL_TEST_BASE_DIR", "/tmp/journal-sandbox");

        let toml_content = r#"
[workspace]
base_dir = "${JOURNAL_TEST_BASE_DIR}"
"#;

        let config = JournalConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.base_dir(), "/tmp/journal-sandbox");

        std::env::remove_var("JOURNAL_TEST_BASE_DIR");
    }

    #[test]
    fn test_config_validation() {
        let bad_archive = JournalConfig::from_toml_str("[backup]\narchive_name = \"backup.tar\"\n").unwrap();
        assert!(bad_archive.validate().is_err());

        let bad_sample = JournalConfig::from_toml_str("[file_io]\nsample_size = 9\n").unwrap();
        assert!(bad_sample.validate().is_err());

        let bad_date = JournalConfig::from_toml_str("[file_io]\nlast_update = \"10/11/2025\"\n").unwrap();
        assert!(bad_date.validate().is_err());

        let nested_shelf = JournalConfig::from_toml_str("[file_io]\nshelf_name = \"a/b\"\n").unwrap();
        assert!(nested_shelf.validate().is_err());
    }

    #[test]
    fn test_base_dir_override() {
        let config = JournalConfig::from_toml_str("[workspace]\nbase_dir = \"./from-file\"\n")
            .unwrap()
            .with_base_dir(Some("./from-cli".to_string()));
        assert_eq!(config.base_dir(), "./from-cli");
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[journal]\nname = \"file-test\"\n")
            .unwrap();

        let config = JournalConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.journal_name(), "file-test");
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let result = JournalConfig::from_toml_str("[workspace\nbase_dir = 1");
        assert!(matches!(result, Err(JournalError::ConfigError { .. })));
    }
}
