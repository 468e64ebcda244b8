use console::Term;

/// Synchronous yes/no question.
pub trait YesNoPrompt {
    fn ask_yes_no(&mut self, question: &str) -> bool;
}

impl<F> YesNoPrompt for F
where
    F: FnMut(&str) -> bool,
{
    fn ask_yes_no(&mut self, question: &str) -> bool {
        self(question)
    }
}

/// Reads a single keystroke from the terminal, unbuffered and without echo.
///
/// Only `y` (either case) means yes. Any other key, and any terminal error,
/// means no.
pub struct TerminalPrompt {
    term: Term,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl YesNoPrompt for TerminalPrompt {
    fn ask_yes_no(&mut self, question: &str) -> bool {
        if self.term.write_str(&format!("{} [y/n]: ", question)).is_err() {
            return false;
        }
        let answer = self.term.read_char();
        let _ = self.term.write_line("");

        matches!(answer, Ok('y' | 'Y'))
    }
}
