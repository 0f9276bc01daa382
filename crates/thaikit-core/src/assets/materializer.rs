//! Copying kit sources into the target project

use super::category::{AssetCategory, Barrel, Destination};
use super::transform::SourceTransform;
use crate::options::ScaffoldOptions;
use crate::project::ProjectProfile;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

const BARREL_HEADER: &str = "// Generated by thaikit. Safe to edit.\n";

/// Where the kit comes from and where its categories land
#[derive(Debug, Clone)]
pub struct MaterializePlan {
    pub sources_root: PathBuf,
    pub components_dir: PathBuf,
    pub base_dir: PathBuf,
}

impl MaterializePlan {
    pub fn new(sources_root: PathBuf, profile: &ProjectProfile) -> Self {
        Self {
            sources_root,
            components_dir: profile.components_dir.clone(),
            base_dir: profile.base_dir.clone(),
        }
    }

    fn destination_root(&self, category: &AssetCategory) -> PathBuf {
        let root = match category.destination {
            Destination::Components => &self.components_dir,
            Destination::Base => &self.base_dir,
        };
        if category.target.is_empty() {
            root.clone()
        } else {
            root.join(category.target)
        }
    }
}

/// What a materialization run did
#[derive(Debug, Default, Clone)]
pub struct MaterializeReport {
    /// Files written, including barrels
    pub written: Vec<PathBuf>,
    /// Destination already existed; left untouched
    pub skipped_existing: Vec<PathBuf>,
    /// Categories whose kit subtree was missing
    pub missing_sources: Vec<&'static str>,
    /// Files whose type syntax was stripped
    pub transformed: Vec<PathBuf>,
}

/// Copy every enabled category into the project. Never overwrites an existing file.
pub async fn materialize(
    plan: &MaterializePlan,
    categories: &[AssetCategory],
    options: &ScaffoldOptions,
    transform: Option<&dyn SourceTransform>,
) -> Result<MaterializeReport> {
    let mut report = MaterializeReport::default();

    for category in categories {
        if !(category.enabled)(options) {
            continue;
        }

        let source = plan.sources_root.join(category.source);
        if !source.is_dir() {
            report.missing_sources.push(category.name);
            continue;
        }

        let dest_root = plan.destination_root(category);

        for entry in WalkDir::new(&source)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let rel = entry
                .path()
                .strip_prefix(&source)
                .context("Walked outside the category source")?;
            if !category.accepts(options, rel) {
                continue;
            }

            let transform = transform.filter(|t| t.applies_to(rel));
            let out_rel = match transform {
                Some(t) => t.output_path(rel),
                None => rel.to_path_buf(),
            };
            let target = dest_root.join(&out_rel);
            if fs::try_exists(&target).await.unwrap_or(false) {
                report.skipped_existing.push(target);
                continue;
            }

            let content = fs::read(entry.path())
                .await
                .with_context(|| format!("Failed to read {}", entry.path().display()))?;
            let content = match transform {
                Some(t) => {
                    let text = String::from_utf8(content).with_context(|| {
                        format!("{} is not valid UTF-8", entry.path().display())
                    })?;
                    report.transformed.push(target.clone());
                    t.transform(&text).into_bytes()
                }
                None => content,
            };

            write_new(&target, &content).await?;
            report.written.push(target);
        }

        if let Some(barrel) = barrel_content(category.barrel, options) {
            let path = dest_root.join(format!("index.{}", options.language.module_ext()));
            if fs::try_exists(&path).await.unwrap_or(false) {
                report.skipped_existing.push(path);
            } else {
                write_new(&path, barrel.as_bytes()).await?;
                report.written.push(path);
            }
        }
    }

    Ok(report)
}

/// Barrel source for a category, `None` when it gets no barrel
fn barrel_content(barrel: Barrel, options: &ScaffoldOptions) -> Option<String> {
    let entries: Vec<&str> = match barrel {
        Barrel::None => return None,
        Barrel::Entries(entries) => entries.to_vec(),
        Barrel::SelectedAdapter(select) => vec![select(options)?],
    };

    let mut out = String::from(BARREL_HEADER);
    for entry in entries {
        out.push_str(&format!("export * from \"./{}\";\n", entry));
    }
    Some(out)
}

async fn write_new(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::category::CATEGORIES;
    use crate::assets::transform::TypeStripper;
    use crate::options::{FormLibrary, Language, Routing, StateManagement};
    use std::fs as stdfs;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        stdfs::create_dir_all(path.parent().unwrap()).unwrap();
        stdfs::write(path, content).unwrap();
    }

    fn kit() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "components/inputs/Input.tsx", "export const Input = (p: Props) => null;\n");
        write(root, "components/inputs/Input.test.tsx", "test\n");
        write(root, "components/inputs/index.ts", "export * from \"./Input\";\n");
        write(root, "utils/date.ts", "export const y = (d: Date): number => d.getFullYear() + 543;\n");
        write(root, "utils/notes.md", "docs\n");
        write(root, "hooks/useDebounce.ts", "export {};\n");
        write(root, "hooks/useHookForm.ts", "export {};\n");
        write(root, "hooks/useFormikForm.ts", "export {};\n");
        write(root, "lib/router/react-router.tsx", "export {};\n");
        write(root, "lib/router/tanstack-router.tsx", "export {};\n");
        write(root, "lib/store/zustand.ts", "export {};\n");
        write(root, "lib/store/redux.ts", "export {};\n");
        write(root, "lib/query/query-client.tsx", "export {};\n");
        dir
    }

    fn plan(kit: &Path, project: &Path) -> MaterializePlan {
        MaterializePlan {
            sources_root: kit.to_path_buf(),
            components_dir: project.join("src/components"),
            base_dir: project.join("src"),
        }
    }

    #[tokio::test]
    async fn test_defaults_copy_core_categories_only() {
        let kit = kit();
        let project = tempfile::tempdir().unwrap();
        let plan = plan(kit.path(), project.path());

        let report = materialize(&plan, CATEGORIES, &ScaffoldOptions::default(), None)
            .await
            .unwrap();

        let src = project.path().join("src");
        assert!(src.join("components/inputs/Input.tsx").is_file());
        assert!(!src.join("components/inputs/Input.test.tsx").exists());
        assert!(src.join("components/index.ts").is_file());
        assert!(src.join("utils/date.ts").is_file());
        assert!(!src.join("utils/notes.md").exists());
        assert!(src.join("hooks/useDebounce.ts").is_file());
        assert!(!src.join("hooks/useHookForm.ts").exists());
        assert!(!src.join("hooks/useFormikForm.ts").exists());
        assert!(!src.join("lib").exists());
        // services subtree is absent from this kit
        assert_eq!(report.missing_sources, vec!["services"]);
    }

    #[tokio::test]
    async fn test_selected_adapters_and_barrels() {
        let kit = kit();
        let project = tempfile::tempdir().unwrap();
        let options = ScaffoldOptions {
            routing: Routing::ReactRouter,
            state_management: StateManagement::ReduxToolkit,
            form_library: FormLibrary::Formik,
            data_fetching: true,
            ..Default::default()
        };

        materialize(&plan(kit.path(), project.path()), CATEGORIES, &options, None)
            .await
            .unwrap();

        let lib = project.path().join("src/lib");
        assert!(lib.join("router/react-router.tsx").is_file());
        assert!(!lib.join("router/tanstack-router.tsx").exists());
        assert_eq!(
            stdfs::read_to_string(lib.join("router/index.ts")).unwrap(),
            format!("{}export * from \"./react-router\";\n", BARREL_HEADER)
        );
        assert_eq!(
            stdfs::read_to_string(lib.join("store/index.ts")).unwrap(),
            format!("{}export * from \"./redux\";\n", BARREL_HEADER)
        );
        assert!(lib.join("query/query-client.tsx").is_file());
        assert!(!lib.join("query/index.ts").exists());
        assert!(project.path().join("src/hooks/useFormikForm.ts").is_file());
    }

    #[tokio::test]
    async fn test_existing_files_never_overwritten() {
        let kit = kit();
        let project = tempfile::tempdir().unwrap();
        write(project.path(), "src/utils/date.ts", "// mine\n");
        write(project.path(), "src/components/index.ts", "// my barrel\n");

        let report = materialize(
            &plan(kit.path(), project.path()),
            CATEGORIES,
            &ScaffoldOptions::default(),
            None,
        )
        .await
        .unwrap();

        let src = project.path().join("src");
        assert_eq!(stdfs::read_to_string(src.join("utils/date.ts")).unwrap(), "// mine\n");
        assert_eq!(
            stdfs::read_to_string(src.join("components/index.ts")).unwrap(),
            "// my barrel\n"
        );
        assert!(report.skipped_existing.contains(&src.join("utils/date.ts")));
        assert!(report.skipped_existing.contains(&src.join("components/index.ts")));
    }

    #[tokio::test]
    async fn test_javascript_output_is_transformed() {
        let kit = kit();
        let project = tempfile::tempdir().unwrap();
        let options = ScaffoldOptions {
            language: Language::JavaScript,
            ..Default::default()
        };
        let stripper = TypeStripper::new().unwrap();

        let report = materialize(
            &plan(kit.path(), project.path()),
            CATEGORIES,
            &options,
            Some(&stripper),
        )
        .await
        .unwrap();

        let src = project.path().join("src");
        assert_eq!(
            stdfs::read_to_string(src.join("components/inputs/Input.jsx")).unwrap(),
            "export const Input = (p) => null;\n"
        );
        assert_eq!(
            stdfs::read_to_string(src.join("utils/date.js")).unwrap(),
            "export const y = (d) => d.getFullYear() + 543;\n"
        );
        assert!(src.join("components/index.js").is_file());
        assert!(!src.join("components/inputs/Input.tsx").exists());
        assert!(!report.transformed.is_empty());
    }
}
