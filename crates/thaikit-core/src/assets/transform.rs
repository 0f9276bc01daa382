//! TypeScript to JavaScript conversion for untyped projects
//!
//! `TypeStripper` is a heuristic: regular expressions plus a small line
//! scanner for `interface`/`type` blocks. It handles the formatting used in
//! the bundled kit; unusual formatting may leave stray syntax that needs a
//! manual touch-up. Swap in a real parser behind `SourceTransform` if that
//! ever matters.

use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};

/// Rewrites a source file before it is written to the target project
pub trait SourceTransform {
    /// Whether `path` (relative to the kit) should go through `transform`
    fn applies_to(&self, path: &Path) -> bool;

    /// Destination path for a transformed file
    fn output_path(&self, path: &Path) -> PathBuf;

    fn transform(&self, source: &str) -> String;
}

/// A type annotation: identifiers, unions, arrays, string literals and up to two levels of generics
const TYPE: &str = r#"(?:[\w$.\[\]|&'" ]|<(?:[^<>]|<[^<>]*>)*>)+?"#;

/// Best-effort type-syntax removal
pub struct TypeStripper {
    import_type: Regex,
    export_type: Regex,
    inline_type_specifier: Regex,
    return_type: Regex,
    param_annotation: Regex,
    destructured_annotation: Regex,
    variable_annotation: Regex,
    call_generics: Regex,
    as_const: Regex,
    as_type: Regex,
    satisfies: Regex,
    non_null: Regex,
    declaration_start: Regex,
    function_keyword: Regex,
}

impl TypeStripper {
    pub fn new() -> Result<Self> {
        let re = |pattern: String| {
            Regex::new(&pattern).with_context(|| format!("Invalid transform pattern: {}", pattern))
        };

        Ok(Self {
            import_type: re(r"(?m)^[ \t]*import\s+type\s[^;]*;[ \t]*\r?\n?".to_string())?,
            export_type: re(
                r"(?m)^[ \t]*export\s+type\s*\{[^}]*\}[^;\n]*;?[ \t]*\r?\n?".to_string(),
            )?,
            inline_type_specifier: re(r"([{,]\s*)type\s+[\w$]+\s*,?\s*".to_string())?,
            return_type: re(format!(r"\)\s*:\s*{}(\s*(?:\{{|=>))", TYPE))?,
            param_annotation: re(format!(
                r"([(,]\s*(?:\.\.\.)?[\w$]+)\??\s*:\s*{}(\s*[,)=])",
                TYPE
            ))?,
            destructured_annotation: re(format!(r"([}}\]])\s*:\s*{}(\s*[,)=])", TYPE))?,
            variable_annotation: re(format!(
                r"\b((?:const|let|var)\s+[\w$]+)\s*:\s*{}(\s*=[^>])",
                TYPE
            ))?,
            call_generics: re(
                r"([\w$])<[A-Za-z](?:[^<>()]|<[^<>()]*>)*>(\s*\()".to_string(),
            )?,
            as_const: re(r"\s+as\s+const\b".to_string())?,
            as_type: re(
                r"([^\s*])\s+as\s+(?:[A-Z][\w$.]*|string|number|boolean|unknown|any)(?:<(?:[^<>]|<[^<>]*>)*>)?(?:\[\])*(\s*[,;)\]}])"
                    .to_string(),
            )?,
            satisfies: re(format!(r"\s+satisfies\s+{}(\s*[,;)\]}}]|$)", TYPE))?,
            non_null: re(r"([\w$)\]])!([.)\],;])".to_string())?,
            declaration_start: re(
                r"^\s*(?:export\s+)?(?:declare\s+)?(?:interface\s+[\w$]+|type\s+[\w$]+(?:<[^=]*>)?\s*=)"
                    .to_string(),
            )?,
            function_keyword: re(r"\bfunction\b[\s\w$]*$".to_string())?,
        })
    }

    /// Drop `interface` and `type` declarations, which may span several lines
    fn strip_declarations(&self, source: &str) -> String {
        let lines: Vec<&str> = source.split_inclusive('\n').collect();
        let mut out = String::with_capacity(source.len());
        let mut i = 0;

        while i < lines.len() {
            if !self.declaration_start.is_match(lines[i]) {
                out.push_str(lines[i]);
                i += 1;
                continue;
            }

            let is_interface = lines[i].contains("interface");
            let mut depth: i32 = 0;
            let mut opened = false;
            while i < lines.len() {
                let line = lines[i];
                for c in line.chars() {
                    match c {
                        '{' | '(' | '[' | '<' => {
                            depth += 1;
                            opened = true;
                        }
                        '}' | ')' | ']' | '>' => depth -= 1,
                        _ => {}
                    }
                }
                // `=>` inside function types is not a closing bracket
                depth += line.matches("=>").count() as i32;
                i += 1;

                let trimmed = line.trim_end();
                let next_continues = lines
                    .get(i)
                    .map(|l| {
                        let t = l.trim_start();
                        t.starts_with('|') || t.starts_with('&')
                    })
                    .unwrap_or(false);
                let done = if is_interface {
                    opened && depth <= 0
                } else {
                    depth <= 0 && (trimmed.ends_with(';') || !next_continues)
                };
                if done {
                    break;
                }
            }
            // Collapse the blank line a removed block leaves behind
            let at_gap = out.is_empty() || out.ends_with("\n\n");
            if at_gap && lines.get(i).map(|l| l.trim().is_empty()).unwrap_or(false) {
                i += 1;
            }
        }

        while out.ends_with("\n\n") {
            out.pop();
        }
        out
    }

    /// Strip annotations inside parameter lists only, so object literals like
    /// `{ mode: "onBlur" }` are left alone. A `(...)` counts as a parameter
    /// list when it is followed by `=>` or preceded by `function name`.
    fn strip_parameters(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        let mut i = 0;

        while let Some(offset) = line[i..].find('(') {
            let open = i + offset;
            out.push_str(&line[i..open]);

            let is_params = matching_paren(line, open).filter(|&close| {
                line[close + 1..].trim_start().starts_with("=>")
                    || self.function_keyword.is_match(&line[..open])
            });
            match is_params {
                Some(close) => {
                    let span = &line[open..=close];
                    let span = replace_until_stable(&self.param_annotation, span, "$1$2");
                    let span = self.destructured_annotation.replace_all(&span, "$1$2");
                    out.push_str(&span);
                    i = close + 1;
                }
                None => {
                    out.push('(');
                    i = open + 1;
                }
            }
        }

        out.push_str(&line[i..]);
        out
    }

    fn strip_line(&self, line: &str) -> String {
        let trimmed = line.trim_start();
        if trimmed.starts_with("import ") || trimmed.starts_with("export {") || trimmed.starts_with("export *")
        {
            return self
                .inline_type_specifier
                .replace_all(line, "$1")
                .into_owned();
        }

        let mut cur = line.to_string();
        cur = self.return_type.replace_all(&cur, ")$1").into_owned();
        cur = replace_until_stable(&self.call_generics, &cur, "$1$2");
        cur = self.strip_parameters(&cur);
        cur = self.variable_annotation.replace_all(&cur, "$1$2").into_owned();
        cur = self.as_const.replace_all(&cur, "").into_owned();
        cur = self.as_type.replace_all(&cur, "$1$2").into_owned();
        cur = self.satisfies.replace_all(&cur, "$1").into_owned();
        cur = self.non_null.replace_all(&cur, "$1$2").into_owned();
        cur
    }
}

/// Byte index of the `)` closing the `(` at `open`, on the same line
fn matching_paren(line: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, c) in line[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + idx);
                }
            }
            _ => {}
        }
    }
    None
}

fn replace_until_stable(re: &Regex, input: &str, rep: &str) -> String {
    let mut cur = input.to_string();
    for _ in 0..8 {
        let next = re.replace_all(&cur, rep).into_owned();
        if next == cur {
            break;
        }
        cur = next;
    }
    cur
}

impl SourceTransform for TypeStripper {
    fn applies_to(&self, path: &Path) -> bool {
        matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("ts") | Some("tsx")
        )
    }

    fn output_path(&self, path: &Path) -> PathBuf {
        match path.extension().and_then(|e| e.to_str()) {
            Some("tsx") => path.with_extension("jsx"),
            Some("ts") => path.with_extension("js"),
            _ => path.to_path_buf(),
        }
    }

    fn transform(&self, source: &str) -> String {
        let without_imports = self.import_type.replace_all(source, "");
        let without_exports = self.export_type.replace_all(&without_imports, "");
        let without_decls = self.strip_declarations(&without_exports);

        without_decls
            .split_inclusive('\n')
            .map(|line| self.strip_line(line))
            .collect()
    }
}
