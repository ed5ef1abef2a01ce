// UI layer: the console dialogue, kept behind the `Prompter` trait so the
// provisioning flow can be driven by a scripted prompter in tests.

use crate::error::Result;
use crossterm::style::{style, Stylize};
use dialoguer::Input;

/// Answers accepted as "yes". Anything else, including an empty line,
/// counts as "no".
pub const AFFIRMATIVE_ANSWERS: [&str; 2] = ["y", "yes"];

/// Whether an operator answer means "yes". Exact match, no trimming.
pub fn is_affirmative(answer: &str) -> bool {
    AFFIRMATIVE_ANSWERS.contains(&answer)
}

/// Blocking, line-based dialogue with the operator.
pub trait Prompter {
    /// Ask for one line of free text. Empty answers are valid.
    fn ask(&mut self, prompt: &str) -> Result<String>;

    /// Print an informational message.
    fn say(&mut self, message: &str);

    /// Print a section heading.
    fn heading(&mut self, title: &str) {
        self.say(title);
    }

    /// Ask a yes/no question and report whether the answer was a yes.
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(question)?;
        Ok(is_affirmative(&answer))
    }
}

/// Terminal prompter built on `dialoguer`.
///
/// Passwords are read with a plain text input: echo is not suppressed.
#[derive(Debug, Default)]
pub struct ConsolePrompter;

impl ConsolePrompter {
    pub fn new() -> Self {
        ConsolePrompter
    }
}

impl Prompter for ConsolePrompter {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        // `allow_empty` so an empty name or password is accepted as entered.
        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }

    fn say(&mut self, message: &str) {
        println!("{}", message);
    }

    fn heading(&mut self, title: &str) {
        println!("\n{}\n", style(title).bold());
    }
}
