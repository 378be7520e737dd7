//! File enumeration: depth-first traversal under ignore rules with the
//! strict text-validity check.
//!
//! The walker yields one directory level at a time and the traversal
//! recurses per subdirectory so the ignore-rule stack can be pushed on
//! entry and popped on return. Per-file read failures are logged and
//! skipped; only a missing root is fatal.

use std::path::Path;
use std::str;
use std::sync::Arc;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::cache::ContentCache;
use crate::error::{Result, ShrinkageError};
use crate::ignore::{IgnoreRules, RuleStack, IGNORE_FILE_NAME};

/// A file whose content passed every eligibility check
#[derive(Debug, Clone)]
pub struct EligibleFile {
    /// Slash-separated path relative to the traversal root
    pub path: String,
    pub content: Arc<[u8]>,
}

/// The fixed file set for one estimation run
#[derive(Debug, Default)]
pub struct Corpus {
    pub files: Vec<EligibleFile>,
    /// Sum of the byte lengths of all eligible files
    pub uncompressed_size: u64,
}

/// Strict text-validity check: valid UTF-8 with no substitutions; a
/// truncated multi-byte sequence at the end of the buffer fails.
pub fn is_valid_text(content: &[u8]) -> bool {
    str::from_utf8(content).is_ok()
}

/// Enumerate all eligible files under `root`.
pub fn collect(root: &Path, cache: &mut ContentCache) -> Result<Corpus> {
    if !root.is_dir() {
        return Err(ShrinkageError::RootNotFound {
            root: root.to_path_buf(),
        });
    }

    let mut corpus = Corpus::default();
    let mut stack = RuleStack::default();
    walk_dir(root, "", &mut stack, cache, &mut corpus);

    debug!(
        cache_hits = cache.metrics().cache_hits(),
        cache_misses = cache.metrics().cache_misses(),
        bytes_read = cache.metrics().bytes_read(),
        "enumeration cache stats"
    );
    Ok(corpus)
}

fn walk_dir(
    dir: &Path,
    prefix: &str,
    stack: &mut RuleStack,
    cache: &mut ContentCache,
    corpus: &mut Corpus,
) {
    stack.push(load_ignore_rules(dir, prefix, cache));

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };
        let Some(name) = entry.file_name().to_str() else {
            warn!(dir = %dir.display(), "skipping entry with non-UTF-8 name");
            continue;
        };
        let rel = join_rel(prefix, name);

        if entry.file_type().is_dir() {
            if stack.is_ignored(&rel, true) {
                debug!(path = %rel, "pruned ignored directory");
                continue;
            }
            walk_dir(entry.path(), &rel, stack, cache, corpus);
        } else if entry.file_type().is_file() {
            visit_file(entry.path(), rel, stack, cache, corpus);
        }
    }

    stack.pop();
}

fn visit_file(
    path: &Path,
    rel: String,
    stack: &RuleStack,
    cache: &mut ContentCache,
    corpus: &mut Corpus,
) {
    if stack.is_ignored(&rel, false) {
        debug!(path = %rel, "excluded by ignore rules");
        return;
    }

    let content = match cache.read(path, &rel) {
        Ok(content) => content,
        Err(err) => {
            warn!(path = %rel, error = %err, "skipping unreadable file");
            return;
        }
    };

    if !is_valid_text(&content) {
        debug!(path = %rel, "skipping binary file");
        return;
    }

    debug!(path = %rel, bytes = content.len(), "included");
    corpus.uncompressed_size += content.len() as u64;
    corpus.files.push(EligibleFile { path: rel, content });
}

/// Load the directory's ignore file, if any. A read failure means "no
/// additional rules here", never an abort.
fn load_ignore_rules(dir: &Path, prefix: &str, cache: &mut ContentCache) -> Option<IgnoreRules> {
    let path = dir.join(IGNORE_FILE_NAME);
    if !path.is_file() {
        return None;
    }
    let key = join_rel(prefix, IGNORE_FILE_NAME);
    match cache.read(&path, &key) {
        Ok(content) => {
            let text = String::from_utf8_lossy(&content);
            let rules = IgnoreRules::parse(prefix, &text);
            if rules.is_empty() {
                None
            } else {
                Some(rules)
            }
        }
        Err(err) => {
            debug!(path = %key, error = %err, "ignore file unreadable, no rules loaded");
            None
        }
    }
}

fn join_rel(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}
