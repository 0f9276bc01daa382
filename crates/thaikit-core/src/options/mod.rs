//! User choices that drive scaffolding
//!
//! Every field has a neutral default so a run that answers nothing still
//! produces a complete `ScaffoldOptions`.

pub mod collect;

pub use collect::{collect, confirm, Prompt, PromptKind, Prompter, ScriptedPrompter};

use std::fmt;

/// Source language of the generated files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    TypeScript,
    JavaScript,
}

impl Language {
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::TypeScript => "TypeScript",
            Language::JavaScript => "JavaScript",
        }
    }

    pub fn is_typed(&self) -> bool {
        matches!(self, Language::TypeScript)
    }

    /// Module-resolution config file name for this language
    pub fn resolution_config(&self) -> &'static str {
        match self {
            Language::TypeScript => "tsconfig.json",
            Language::JavaScript => "jsconfig.json",
        }
    }

    /// Extension for plain modules (barrels, utilities)
    pub fn module_ext(&self) -> &'static str {
        match self {
            Language::TypeScript => "ts",
            Language::JavaScript => "js",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Client-side router integration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Routing {
    #[default]
    None,
    ReactRouter,
    TanStackRouter,
}

impl Routing {
    pub fn display_name(&self) -> &'static str {
        match self {
            Routing::None => "None",
            Routing::ReactRouter => "React Router",
            Routing::TanStackRouter => "TanStack Router",
        }
    }

    /// Adapter module name under `lib/router`
    pub fn adapter(&self) -> Option<&'static str> {
        match self {
            Routing::None => None,
            Routing::ReactRouter => Some("react-router"),
            Routing::TanStackRouter => Some("tanstack-router"),
        }
    }
}

/// State management library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StateManagement {
    #[default]
    None,
    Zustand,
    ReduxToolkit,
}

impl StateManagement {
    pub fn display_name(&self) -> &'static str {
        match self {
            StateManagement::None => "None",
            StateManagement::Zustand => "Zustand",
            StateManagement::ReduxToolkit => "Redux Toolkit",
        }
    }

    /// Adapter module name under `lib/store`
    pub fn adapter(&self) -> Option<&'static str> {
        match self {
            StateManagement::None => None,
            StateManagement::Zustand => Some("zustand"),
            StateManagement::ReduxToolkit => Some("redux"),
        }
    }
}

/// Form library integration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormLibrary {
    #[default]
    None,
    ReactHookForm,
    Formik,
}

impl FormLibrary {
    pub fn display_name(&self) -> &'static str {
        match self {
            FormLibrary::None => "None",
            FormLibrary::ReactHookForm => "React Hook Form",
            FormLibrary::Formik => "Formik",
        }
    }

    /// Hook file stem under `hooks/`
    pub fn hook(&self) -> Option<&'static str> {
        match self {
            FormLibrary::None => None,
            FormLibrary::ReactHookForm => Some("useHookForm"),
            FormLibrary::Formik => Some("useFormikForm"),
        }
    }
}

/// Resolved answers for one run. Frozen once collection finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScaffoldOptions {
    pub language: Language,
    pub routing: Routing,
    pub state_management: StateManagement,
    pub form_library: FormLibrary,
    pub data_fetching: bool,
}

impl ScaffoldOptions {
    /// Summary lines shown before the confirmation prompt
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Language", self.language.display_name().to_string()),
            ("Routing", self.routing.display_name().to_string()),
            ("State", self.state_management.display_name().to_string()),
            ("Forms", self.form_library.display_name().to_string()),
            (
                "Data fetching",
                if self.data_fetching {
                    "TanStack Query".to_string()
                } else {
                    "None".to_string()
                },
            ),
        ]
    }
}
