//! Static definitions of the copyable source subtrees
//!
//! Each category carries its own inclusion predicate, so adding an adapter
//! means adding a table entry rather than touching the materializer.

use crate::options::{FormLibrary, Language, ScaffoldOptions};
use std::path::Path;

/// File names containing any of these are fixtures, never copied
pub const FIXTURE_MARKERS: &[&str] = &[".test.", ".spec.", ".stories."];

/// Which resolved project directory a category is written under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Components,
    Base,
}

/// Index file written for a category after its files are copied
#[derive(Clone, Copy)]
pub enum Barrel {
    None,
    /// Re-export these entries unconditionally
    Entries(&'static [&'static str]),
    /// Re-export only the adapter selected in the options
    SelectedAdapter(fn(&ScaffoldOptions) -> Option<&'static str>),
}

#[derive(Clone, Copy)]
pub struct AssetCategory {
    pub name: &'static str,
    /// Subtree of the kit sources
    pub source: &'static str,
    pub destination: Destination,
    /// Path under the destination root, empty for the root itself
    pub target: &'static str,
    /// Whether the category is materialized at all
    pub enabled: fn(&ScaffoldOptions) -> bool,
    /// Per-file filter, `path` relative to the category source
    pub include: fn(&ScaffoldOptions, &Path) -> bool,
    pub barrel: Barrel,
}

impl AssetCategory {
    /// Whether a file passes the fixture, extension and category filters
    pub fn accepts(&self, options: &ScaffoldOptions, path: &Path) -> bool {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        if FIXTURE_MARKERS.iter().any(|m| file_name.contains(m)) {
            return false;
        }
        if !extension_allowed(options.language, file_name) {
            return false;
        }
        (self.include)(options, path)
    }
}

fn always(_: &ScaffoldOptions) -> bool {
    true
}

fn any_file(_: &ScaffoldOptions, _: &Path) -> bool {
    true
}

/// File name up to the first dot: `react-router.tsx` -> `react-router`
fn stem(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.split('.').next())
        .unwrap_or_default()
}

/// Libraries that ship a dedicated hook file
const FORM_LIBRARIES: &[FormLibrary] = &[FormLibrary::ReactHookForm, FormLibrary::Formik];

fn include_hook(options: &ScaffoldOptions, path: &Path) -> bool {
    let name = stem(path);
    if FORM_LIBRARIES.iter().any(|library| library.hook() == Some(name)) {
        options.form_library.hook() == Some(name)
    } else {
        true
    }
}

fn router_adapter(options: &ScaffoldOptions) -> Option<&'static str> {
    options.routing.adapter()
}

fn store_adapter(options: &ScaffoldOptions) -> Option<&'static str> {
    options.state_management.adapter()
}

fn has_router(options: &ScaffoldOptions) -> bool {
    router_adapter(options).is_some()
}

fn has_store(options: &ScaffoldOptions) -> bool {
    store_adapter(options).is_some()
}

fn wants_query(options: &ScaffoldOptions) -> bool {
    options.data_fetching
}

fn include_router(options: &ScaffoldOptions, path: &Path) -> bool {
    router_adapter(options) == Some(stem(path))
}

fn include_store(options: &ScaffoldOptions, path: &Path) -> bool {
    store_adapter(options) == Some(stem(path))
}

pub const CATEGORIES: &[AssetCategory] = &[
    AssetCategory {
        name: "components",
        source: "components",
        destination: Destination::Components,
        target: "",
        enabled: always,
        include: any_file,
        barrel: Barrel::Entries(&["inputs", "data-display", "feedback", "navigation", "layout"]),
    },
    AssetCategory {
        name: "utils",
        source: "utils",
        destination: Destination::Base,
        target: "utils",
        enabled: always,
        include: any_file,
        barrel: Barrel::Entries(&["cn", "date", "number"]),
    },
    AssetCategory {
        name: "hooks",
        source: "hooks",
        destination: Destination::Base,
        target: "hooks",
        enabled: always,
        include: include_hook,
        barrel: Barrel::Entries(&["useDebounce", "useDisclosure"]),
    },
    AssetCategory {
        name: "services",
        source: "services",
        destination: Destination::Base,
        target: "services",
        enabled: always,
        include: any_file,
        barrel: Barrel::Entries(&["http"]),
    },
    AssetCategory {
        name: "router",
        source: "lib/router",
        destination: Destination::Base,
        target: "lib/router",
        enabled: has_router,
        include: include_router,
        barrel: Barrel::SelectedAdapter(router_adapter),
    },
    AssetCategory {
        name: "store",
        source: "lib/store",
        destination: Destination::Base,
        target: "lib/store",
        enabled: has_store,
        include: include_store,
        barrel: Barrel::SelectedAdapter(store_adapter),
    },
    AssetCategory {
        name: "query",
        source: "lib/query",
        destination: Destination::Base,
        target: "lib/query",
        enabled: wants_query,
        include: any_file,
        barrel: Barrel::None,
    },
];

/// Extension allow-list for the chosen language. Untyped projects accept the
/// typed sources too because they are converted on the way out.
pub fn extension_allowed(language: Language, file_name: &str) -> bool {
    let allowed: &[&str] = match language {
        Language::TypeScript => &["ts", "tsx", "css", "json"],
        Language::JavaScript => {
            if file_name.ends_with(".d.ts") {
                return false;
            }
            &["js", "jsx", "ts", "tsx", "css", "json"]
        }
    };
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| allowed.contains(&ext))
        .unwrap_or(false)
}
