use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::model::result::Explanation;
use crate::narrative::{ExplanationContext, NarrativeError, Narrator};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs an external program per explanation. The context is written to its
/// stdin as JSON and an explanation object is read back from stdout. The
/// program is killed when it outlives the deadline.
#[derive(Debug, Clone)]
pub struct CommandNarrator {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandNarrator {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }
}

impl Narrator for CommandNarrator {
    fn name(&self) -> &str {
        "command"
    }

    fn explain(
        &self,
        ctx: &ExplanationContext,
        deadline: Instant,
    ) -> Result<Explanation, NarrativeError> {
        let started = Instant::now();
        let payload = serde_json::to_vec(ctx)?;
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take()
            && let Err(err) = stdin.write_all(&payload)
        {
            terminate(&mut child);
            return Err(err.into());
        }

        let Some(mut stdout) = child.stdout.take() else {
            terminate(&mut child);
            return Err(NarrativeError::Failed("stdout not captured".to_string()));
        };
        let reader = thread::spawn(move || {
            let mut bytes = Vec::new();
            stdout.read_to_end(&mut bytes).map(|_| bytes)
        });

        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {}
                Err(err) => {
                    terminate(&mut child);
                    return Err(err.into());
                }
            }
            if Instant::now() >= deadline {
                terminate(&mut child);
                return Err(NarrativeError::Timeout(started.elapsed().as_millis()));
            }
            thread::sleep(POLL_INTERVAL);
        };
        if !status.success() {
            return Err(NarrativeError::Failed(status.to_string()));
        }

        let bytes = reader.join().map_err(|_| NarrativeError::Panicked)??;
        let explanation: Explanation = serde_json::from_slice(&bytes)?;
        if !explanation.is_complete() {
            return Err(NarrativeError::Incomplete);
        }
        Ok(explanation)
    }
}

fn terminate(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(test)]
#[path = "../../tests/src_inline/narrative/command.rs"]
mod tests;
