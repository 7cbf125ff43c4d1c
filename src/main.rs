use anyhow::Context;
use clap::Parser;
use learning_journal::app::exercises::{
    BackupUtility, Basics, CatHaven, CollatzSession, DivisionCalculator, FileIoSettings,
    FileIoStations, GateRiddle, GuestRegisterDesk, RegexExtractor, RockPaperScissors,
    TextPrep, TextSource,
};
use learning_journal::domain::model::GuestRegister;
use learning_journal::domain::ports::{ConfigProvider, Exercise};
use learning_journal::utils::error::ErrorSeverity;
use learning_journal::utils::{logger, validation::Validate};
use learning_journal::{CliConfig, Command, Console, ExerciseRunner, JournalConfig, LocalStorage};

fn run_exercise<E: Exercise>(exercise: E) -> learning_journal::Result<()> {
    let mut console = Console::stdio();
    ExerciseRunner::new(exercise).run(&mut console)
}

fn dispatch(command: &Command, config: &JournalConfig) -> learning_journal::Result<()> {
    match command {
        Command::Basics => run_exercise(Basics),
        Command::Gate => run_exercise(GateRiddle),
        Command::Rpsls { seed } => match seed {
            Some(seed) => run_exercise(RockPaperScissors::seeded(*seed)),
            None => run_exercise(RockPaperScissors::from_entropy()),
        },
        Command::Collatz => run_exercise(CollatzSession::new()),
        Command::Divide => run_exercise(DivisionCalculator::new()),
        Command::Cathaven => run_exercise(CatHaven::default()),
        Command::Tavern => run_exercise(GuestRegisterDesk::new(
            GuestRegister::seeded(),
            LocalStorage::new(config.base_dir().to_string()),
            config.guest_export_file(),
        )),
        Command::TextPrep => run_exercise(TextPrep),
        Command::Regex { input, output } => {
            let source = match input {
                Some(path) => TextSource::File(path.clone()),
                None => TextSource::Paste,
            };
            // --input and --output are taken relative to the working directory.
            let storage = LocalStorage::new(".".to_string());
            run_exercise(RegexExtractor::new(storage, source, output.clone())?)
        }
        Command::FileIo { seed } => {
            let settings = FileIoSettings::from_config(config);
            match seed {
                Some(seed) => run_exercise(FileIoStations::seeded(settings, *seed)),
                None => run_exercise(FileIoStations::from_entropy(settings)),
            }
        }
        Command::Backup { cleanup } => run_exercise(BackupUtility::from_config(config, *cleanup)),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.load_journal_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Could not load journal configuration: {}", e);
            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(1);
    }
    tracing::info!("{} ready in {}", config.journal_name(), config.base_dir());

    if let Err(e) = dispatch(&cli.command, &config) {
        tracing::error!(
            "Exercise failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("{}", e.user_friendly_message());
        eprintln!("Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    std::io::Write::flush(&mut std::io::stdout()).context("flushing stdout")?;
    Ok(())
}
