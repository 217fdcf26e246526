use std::io::{self, BufRead, Stdout, StdinLock, Write};

use webloc_engine::{CommitPlan, ConfirmationGate};

/// Shows the commit plan and asks before anything is renamed or removed.
pub struct PromptGate<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptGate<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, plan: &CommitPlan) -> io::Result<bool> {
        for rename in &plan.renames {
            writeln!(
                self.output,
                "rename: '{}' -> '{}'",
                rename.from.display(),
                rename.to.display()
            )?;
        }
        for path in &plan.removals {
            writeln!(self.output, "remove duplicate: '{}'", path.display())?;
        }
        write!(self.output, "Proceed with renaming? (y/n) ")?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

impl<R: BufRead, W: Write> ConfirmationGate for PromptGate<R, W> {
    fn confirm(&mut self, plan: &CommitPlan) -> bool {
        self.ask(plan).unwrap_or(false)
    }
}

pub fn stdin_gate() -> PromptGate<StdinLock<'static>, Stdout> {
    PromptGate::new(io::stdin().lock(), io::stdout())
}

/// Asks for the simplification service key. Returns the trimmed answer.
pub fn prompt_api_key<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<String> {
    write!(output, "OpenRouter API key: ")?;
    output.flush()?;
    let mut key = String::new();
    input.read_line(&mut key)?;
    Ok(key.trim().to_string())
}
