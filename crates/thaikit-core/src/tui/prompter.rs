//! Terminal-backed `Prompter`

use crate::options::{Prompt, PromptKind, Prompter};
use anyhow::Result;

/// Asks each prompt with a cliclack select or confirm
#[derive(Debug, Default, Clone, Copy)]
pub struct CliclackPrompter;

impl Prompter for CliclackPrompter {
    fn ask(&mut self, prompt: &Prompt) -> Result<String> {
        match prompt.kind {
            PromptKind::Choice => {
                let mut select = cliclack::select(prompt.question);
                for (token, label) in &prompt.choices {
                    select = select.item(*token, *label, "");
                }
                let token: &str = select.initial_value(prompt.default).interact()?;
                Ok(token.to_string())
            }
            PromptKind::YesNo => {
                let yes: bool = cliclack::confirm(prompt.question)
                    .initial_value(prompt.default == "y")
                    .interact()?;
                Ok(if yes { "y" } else { "n" }.to_string())
            }
        }
    }
}
