//! Interactive option collection
//!
//! Prompts go through the `Prompter` trait so the same sequence runs against
//! the terminal or a scripted answer queue. Answers are tokens; anything
//! empty or unknown resolves to the prompt's default instead of erroring.

use super::{FormLibrary, Language, Routing, ScaffoldOptions, StateManagement};
use crate::project::ProjectProfile;
use anyhow::Result;
use std::collections::VecDeque;

/// How a prompt is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Pick one of the listed tokens
    Choice,
    /// `y` / `n`
    YesNo,
}

/// A single question
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Stable identifier, used by scripted prompters and tests
    pub key: &'static str,
    pub question: &'static str,
    pub kind: PromptKind,
    /// `(token, label)` pairs
    pub choices: Vec<(&'static str, &'static str)>,
    pub default: &'static str,
}

/// Source of answers for prompts
pub trait Prompter {
    /// Ask a question and return the raw answer token
    fn ask(&mut self, prompt: &Prompt) -> Result<String>;
}

/// Answers prompts from a fixed queue; an exhausted queue answers empty (the default)
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    /// Keys of every prompt that was asked, in order
    pub asked: Vec<&'static str>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Accept every default (non-interactive `--yes` mode)
    pub fn defaults() -> Self {
        Self::default()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, prompt: &Prompt) -> Result<String> {
        self.asked.push(prompt.key);
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}

/// Token to value lookup with a fallback entry
struct ChoiceTable<T: 'static> {
    entries: &'static [(&'static str, T, &'static str)],
    default: &'static str,
}

impl<T: Copy + 'static> ChoiceTable<T> {
    fn prompt(&self, key: &'static str, question: &'static str) -> Prompt {
        Prompt {
            key,
            question,
            kind: PromptKind::Choice,
            choices: self.entries.iter().map(|(t, _, l)| (*t, *l)).collect(),
            default: self.default,
        }
    }

    fn resolve(&self, answer: &str) -> T {
        let answer = answer.trim();
        let lookup = |token: &str| {
            self.entries
                .iter()
                .find(|(t, _, _)| *t == token)
                .map(|(_, v, _)| *v)
        };
        lookup(answer)
            .or_else(|| lookup(self.default))
            .unwrap_or(self.entries[0].1)
    }
}

const LANGUAGE: ChoiceTable<Language> = ChoiceTable {
    entries: &[
        ("1", Language::TypeScript, "TypeScript"),
        ("2", Language::JavaScript, "JavaScript"),
    ],
    default: "1",
};

const ROUTING: ChoiceTable<Routing> = ChoiceTable {
    entries: &[
        ("1", Routing::None, "None"),
        ("2", Routing::ReactRouter, "React Router"),
        ("3", Routing::TanStackRouter, "TanStack Router"),
    ],
    default: "1",
};

const STATE: ChoiceTable<StateManagement> = ChoiceTable {
    entries: &[
        ("1", StateManagement::None, "None"),
        ("2", StateManagement::Zustand, "Zustand"),
        ("3", StateManagement::ReduxToolkit, "Redux Toolkit"),
    ],
    default: "1",
};

const FORMS: ChoiceTable<FormLibrary> = ChoiceTable {
    entries: &[
        ("1", FormLibrary::None, "None"),
        ("2", FormLibrary::ReactHookForm, "React Hook Form"),
        ("3", FormLibrary::Formik, "Formik"),
    ],
    default: "1",
};

fn yes_no(key: &'static str, question: &'static str, default_yes: bool) -> Prompt {
    Prompt {
        key,
        question,
        kind: PromptKind::YesNo,
        choices: vec![("y", "Yes"), ("n", "No")],
        default: if default_yes { "y" } else { "n" },
    }
}

fn resolve_yes_no(answer: &str, default_yes: bool) -> bool {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default_yes,
    }
}

/// Run the prompt sequence. Routing is skipped for projects whose framework routes natively.
pub fn collect(profile: &ProjectProfile, prompter: &mut dyn Prompter) -> Result<ScaffoldOptions> {
    let language = LANGUAGE.resolve(&prompter.ask(&LANGUAGE.prompt("language", "Language"))?);

    let routing = if profile.kind.has_native_routing() {
        Routing::None
    } else {
        ROUTING.resolve(&prompter.ask(&ROUTING.prompt("routing", "Router"))?)
    };

    let state_management =
        STATE.resolve(&prompter.ask(&STATE.prompt("state", "State management"))?);

    let form_library = FORMS.resolve(&prompter.ask(&FORMS.prompt("forms", "Form library"))?);

    let data_fetching = resolve_yes_no(
        &prompter.ask(&yes_no(
            "data_fetching",
            "Add TanStack Query for data fetching?",
            false,
        ))?,
        false,
    );

    Ok(ScaffoldOptions {
        language,
        routing,
        state_management,
        form_library,
        data_fetching,
    })
}

/// Final consent before anything is written; defaults to yes
pub fn confirm(prompter: &mut dyn Prompter) -> Result<bool> {
    let answer = prompter.ask(&yes_no("confirm", "Proceed with these settings?", true))?;
    Ok(resolve_yes_no(&answer, true))
}
