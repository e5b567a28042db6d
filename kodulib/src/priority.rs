//! Priority scoring for ranking mode.
//!
//! A score is taken from the first rule in an ordered list whose predicate
//! accepts the file; files no rule accepts get the default score. Scores only
//! order the output, they never filter it.
//!
//! The default rules demote generated and test files first, so that
//! `api.test.ts` ranks as a test rather than as TypeScript source.

use std::fmt;

/// Score returned when no rule matches.
pub const DEFAULT_SCORE: i32 = 0;

/// Predicate over `(relative_path, basename, dirname)`.
pub type RulePredicate = fn(&str, &str, &str) -> bool;

/// One `(score, predicate)` pair.
#[derive(Clone, Copy)]
pub struct PriorityRule {
    pub score: i32,
    pub test: RulePredicate,
}

impl fmt::Debug for PriorityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityRule")
            .field("score", &self.score)
            .finish_non_exhaustive()
    }
}

impl PriorityRule {
    pub const fn new(score: i32, test: RulePredicate) -> Self {
        Self { score, test }
    }
}

const MANIFESTS: &[&str] = &[
    "README.md",
    "package.json",
    "Cargo.toml",
    "pyproject.toml",
    "go.mod",
    "pom.xml",
    "build.gradle",
    "Gemfile",
    "Dockerfile",
    "docker-compose.yml",
    "Makefile",
];

fn ends_with_any(name: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|s| name.ends_with(s))
}

fn is_generated(_path: &str, name: &str, _dir: &str) -> bool {
    ends_with_any(name, &[".d.ts", ".min.js", ".min.css", ".bundle.js", ".map"])
}

fn is_test(_path: &str, name: &str, dir: &str) -> bool {
    name.contains(".test.")
        || name.contains(".spec.")
        || name.starts_with("test_")
        || name.ends_with("_test.go")
        || dir
            .split('/')
            .any(|seg| matches!(seg, "test" | "tests" | "__tests__" | "spec"))
}

fn is_manifest(_path: &str, name: &str, _dir: &str) -> bool {
    MANIFESTS.contains(&name)
}

fn is_docs(_path: &str, name: &str, _dir: &str) -> bool {
    name.ends_with(".md") && !name.ends_with("CHANGELOG.md")
}

fn is_web_script(_path: &str, name: &str, _dir: &str) -> bool {
    ends_with_any(name, &[".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs"])
}

fn is_compiled_source(_path: &str, name: &str, _dir: &str) -> bool {
    ends_with_any(name, &[".py", ".go", ".rs", ".java", ".kt", ".scala", ".rb", ".c", ".cpp", ".h"])
}

fn is_markup(_path: &str, name: &str, _dir: &str) -> bool {
    ends_with_any(name, &[".html", ".css", ".scss", ".sass", ".vue", ".svelte"])
}

fn is_config(_path: &str, name: &str, _dir: &str) -> bool {
    ends_with_any(name, &[".json", ".yaml", ".yml", ".toml"])
}

/// Built-in rules, highest precedence first.
pub const DEFAULT_RULES: &[PriorityRule] = &[
    PriorityRule::new(5, is_generated),
    PriorityRule::new(10, is_test),
    PriorityRule::new(100, is_manifest),
    PriorityRule::new(90, is_docs),
    PriorityRule::new(80, is_web_script),
    PriorityRule::new(70, is_compiled_source),
    PriorityRule::new(60, is_markup),
    PriorityRule::new(50, is_config),
];

/// Stateless first-match scorer.
#[derive(Debug, Clone)]
pub struct PriorityScorer {
    rules: Vec<PriorityRule>,
    default_score: i32,
}

impl Default for PriorityScorer {
    fn default() -> Self {
        Self::new(DEFAULT_RULES.to_vec(), DEFAULT_SCORE)
    }
}

impl PriorityScorer {
    pub fn new(rules: Vec<PriorityRule>, default_score: i32) -> Self {
        Self {
            rules,
            default_score,
        }
    }

    /// Score a file from its parts.
    pub fn score(&self, relative_path: &str, basename: &str, dirname: &str) -> i32 {
        self.rules
            .iter()
            .find(|rule| (rule.test)(relative_path, basename, dirname))
            .map_or(self.default_score, |rule| rule.score)
    }

    /// Score a posix relative path, splitting it into basename and dirname.
    ///
    /// Top-level files get `.` as their dirname.
    pub fn score_path(&self, relative_path: &str) -> i32 {
        let (dirname, basename) = match relative_path.rsplit_once('/') {
            Some((dir, name)) => (dir, name),
            None => (".", relative_path),
        };
        self.score(relative_path, basename, dirname)
    }
}
