use crate::core::console::Console;
use crate::domain::ports::Exercise;
use crate::utils::error::{JournalError, Result};
use std::io::{BufRead, Write};

pub struct ExerciseRunner<E: Exercise> {
    exercise: E,
}

impl<E: Exercise> ExerciseRunner<E> {
    pub fn new(exercise: E) -> Self {
        Self { exercise }
    }

    /// Runs the exercise to completion. Closed input ends it quietly.
    pub fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let chapter = self.exercise.chapter();
        tracing::info!("Starting {} - {}", chapter, self.exercise.title());

        match self.exercise.run(console) {
            Ok(()) => {}
            Err(JournalError::EndOfInput) => {
                tracing::info!("Input closed during {}, stopping", chapter);
                console.say("")?;
                return Ok(());
            }
            Err(e) => {
                tracing::error!("{} failed: {}", chapter, e);
                return Err(e);
            }
        }

        if self.exercise.announces_finish() {
            console.say(format!(
                "\n--- Script finished. All {} concepts showcased. ---",
                chapter
            ))?;
        }
        tracing::info!("{} completed", chapter);
        Ok(())
    }
}
