//! Gitignore-style ignore rules and the rule-set chain.
//!
//! Each directory may carry a `.gitignore` whose rules are scoped to
//! that directory and its descendants. During traversal the rule sets
//! form an explicit stack, pushed on directory entry and popped on
//! return; a path's ignored status is the innermost non-neutral verdict.
//!
//! Supported syntax: `#` comments, blank lines, `!` re-includes,
//! trailing `/` for directory-only rules, leading `/` (or any inner
//! `/`) for base-anchored rules, and the `*` / `?` / `**` wildcards.

use regex::Regex;

pub const IGNORE_FILE_NAME: &str = ".gitignore";

/// What a single rule set says about a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// A non-negated rule matched last
    Ignored,
    /// A negated rule matched last
    Reincluded,
    /// No rule matched
    Neutral,
}

#[derive(Debug)]
struct Rule {
    matcher: Regex,
    negated: bool,
    dir_only: bool,
}

/// Ordered pattern rules scoped to one directory
#[derive(Debug)]
pub struct IgnoreRules {
    /// Slash-separated path of the directory holding the ignore file,
    /// relative to the traversal root; empty for the root itself
    base: String,
    rules: Vec<Rule>,
}

impl IgnoreRules {
    /// Parse ignore-file text. Unparseable patterns are dropped.
    pub fn parse(base: &str, text: &str) -> Self {
        let mut rules = Vec::new();
        for line in text.lines() {
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (negated, pattern) = match line.strip_prefix('!') {
                Some(rest) => (true, rest),
                None => (false, line),
            };
            let (dir_only, pattern) = match pattern.strip_suffix('/') {
                Some(rest) => (true, rest),
                None => (false, pattern),
            };
            // a slash anywhere in the pattern anchors it to the base
            let anchored = pattern.contains('/');
            let pattern = pattern.trim_start_matches('/');
            if pattern.is_empty() {
                continue;
            }
            if let Some(matcher) = compile_pattern(pattern, anchored) {
                rules.push(Rule {
                    matcher,
                    negated,
                    dir_only,
                });
            }
        }
        Self {
            base: base.to_string(),
            rules,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate this rule set against a root-relative path.
    ///
    /// Within a set the last matching rule wins. Paths outside the base
    /// are Neutral.
    pub fn verdict(&self, rel_path: &str, is_dir: bool) -> Verdict {
        let local = if self.base.is_empty() {
            rel_path
        } else {
            match rel_path
                .strip_prefix(self.base.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
            {
                Some(rest) => rest,
                None => return Verdict::Neutral,
            }
        };

        let mut verdict = Verdict::Neutral;
        for rule in &self.rules {
            if rule.dir_only && !is_dir {
                continue;
            }
            if rule.matcher.is_match(local) {
                verdict = if rule.negated {
                    Verdict::Reincluded
                } else {
                    Verdict::Ignored
                };
            }
        }
        verdict
    }
}

/// Translate a gitignore wildcard pattern into an anchored regex over
/// slash-separated relative paths.
fn compile_pattern(pattern: &str, anchored: bool) -> Option<Regex> {
    let mut source = String::from("^");
    if !anchored {
        // unanchored patterns match against the basename at any depth
        source.push_str("(?:.*/)?");
    }

    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    if chars.peek() == Some(&'/') {
                        chars.next();
                        // `**/` spans any number of leading directories
                        source.push_str("(?:.*/)?");
                    } else {
                        source.push_str(".*");
                    }
                } else {
                    source.push_str("[^/]*");
                }
            }
            '?' => source.push_str("[^/]"),
            other => source.push_str(&regex::escape(&other.to_string())),
        }
    }
    source.push('$');

    Regex::new(&source).ok()
}

/// Rule sets accumulated along the traversal path, outermost first
#[derive(Debug, Default)]
pub struct RuleStack {
    sets: Vec<Option<IgnoreRules>>,
}

impl RuleStack {
    /// Enter a directory; `None` means it carries no ignore file
    pub fn push(&mut self, rules: Option<IgnoreRules>) {
        self.sets.push(rules);
    }

    /// Leave the most recently entered directory
    pub fn pop(&mut self) {
        self.sets.pop();
    }

    /// Resolve a root-relative path against the chain: the innermost
    /// rule set with a non-neutral verdict decides; default unignored.
    pub fn is_ignored(&self, rel_path: &str, is_dir: bool) -> bool {
        for set in self.sets.iter().rev().flatten() {
            match set.verdict(rel_path, is_dir) {
                Verdict::Ignored => return true,
                Verdict::Reincluded => return false,
                Verdict::Neutral => {}
            }
        }
        false
    }
}
