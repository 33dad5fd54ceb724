//! Alias pattern compilation
//!
//! Turns a declared alias table (`"~/*" -> ["./src/*"]`) into an ordered list
//! of [`CompiledMatcher`]s. Malformed patterns and unusable targets are dropped
//! here, so matching and candidate resolution never see them.
//!
//! ```text
//! "~/*"   -> ["./types/*", "./src/*"]   =>  prefix "~/", suffix "", targets ["./src/*"]
//! "utils" -> ["./lib/utils.ts"]         =>  exact key "utils", targets ["./lib/utils.ts"]
//! "a/*/*" -> [...]                      =>  dropped (two wildcards)
//! ```

use crate::options::{CatchAllPolicy, EngineOptions};
use indexmap::IndexMap;
use tracing::{debug, warn};

/// The wildcard marker shared by patterns and targets
pub const WILDCARD: char = '*';

/// Alias table as declared in configuration: pattern -> ordered targets
pub type AliasTable = IndexMap<String, Vec<String>>;

/// Declaration-file suffixes that can never produce a loadable module
const DECLARATION_SUFFIXES: [&str; 3] = [".d.ts", ".d.mts", ".d.cts"];

/// Runtime form of one alias pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledMatcher {
    raw: String,
    has_wildcard: bool,
    prefix: String,
    suffix: String,
    targets: Vec<String>,
}

impl CompiledMatcher {
    /// The pattern exactly as declared
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether the pattern contains the wildcard marker
    pub fn has_wildcard(&self) -> bool {
        self.has_wildcard
    }

    /// Text before the wildcard (empty for exact patterns)
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Text after the wildcard (empty for exact patterns)
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Surviving target templates, in declared order
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// Substitute `capture` into `target` for wildcard patterns
    pub(crate) fn expand(&self, target: &str, capture: &str) -> String {
        if self.has_wildcard {
            target.replacen(WILDCARD, capture, 1)
        } else {
            target.to_string()
        }
    }
}

/// Why a pattern or one of its targets was dropped
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DropReason {
    /// The pattern contains more than one wildcard
    #[error("pattern contains more than one '*'")]
    MultipleWildcards,

    /// The pattern is the bare wildcard and the catch-all policy rejects it
    #[error("catch-all pattern '*' is rejected by configuration")]
    CatchAllRejected,

    /// Every target of the pattern was filtered out
    #[error("no usable targets remain")]
    NoTargets,

    /// The target points at a type declaration artifact
    #[error("target '{0}' points at type declarations only")]
    DeclarationTarget(String),

    /// The target contains more than one wildcard
    #[error("target '{0}' contains more than one '*'")]
    TargetMultipleWildcards(String),

    /// The target's wildcard is not a whole path segment
    #[error("target '{0}' must use '*' as a whole path segment")]
    TargetWildcardNotSegment(String),

    /// The target has a wildcard but its pattern has none to capture
    #[error("target '{0}' uses '*' but its pattern has no wildcard")]
    TargetWildcardWithoutCapture(String),
}

/// One dropped pattern or target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileDiagnostic {
    /// The pattern the drop belongs to
    pub pattern: String,
    /// Why it was dropped
    pub reason: DropReason,
}

/// Output of [`PatternCompiler::compile_with_report`]
#[derive(Debug, Clone, Default)]
pub struct CompiledTable {
    /// Surviving matchers in declaration order
    pub matchers: Vec<CompiledMatcher>,
    /// One entry per dropped pattern or target
    pub diagnostics: Vec<CompileDiagnostic>,
}

/// Compiles alias tables into matchers
#[derive(Debug, Clone)]
pub struct PatternCompiler<'a> {
    options: &'a EngineOptions,
}

impl<'a> PatternCompiler<'a> {
    pub fn new(options: &'a EngineOptions) -> Self {
        Self { options }
    }

    /// Compile `table`, preserving declaration order among surviving entries
    pub fn compile(&self, table: &AliasTable) -> Vec<CompiledMatcher> {
        self.compile_with_report(table).matchers
    }

    /// Compile `table` and also return a diagnostic for every drop
    ///
    /// Filtering is unconditional. The log level only decides whether the
    /// diagnostics are emitted as `warn!` or `debug!` events.
    pub fn compile_with_report(&self, table: &AliasTable) -> CompiledTable {
        let mut compiled = CompiledTable::default();

        for (pattern, targets) in table {
            match self.compile_entry(pattern, targets, &mut compiled.diagnostics) {
                Ok(matcher) => compiled.matchers.push(matcher),
                Err(reason) => self.drop_with(&mut compiled.diagnostics, pattern, reason),
            }
        }

        compiled
    }

    fn compile_entry(
        &self,
        pattern: &str,
        targets: &[String],
        diagnostics: &mut Vec<CompileDiagnostic>,
    ) -> Result<CompiledMatcher, DropReason> {
        let (has_wildcard, prefix, suffix) = match pattern.matches(WILDCARD).count() {
            0 => (false, String::new(), String::new()),
            1 => {
                if pattern.len() == WILDCARD.len_utf8()
                    && self.options.catch_all == CatchAllPolicy::Reject
                {
                    return Err(DropReason::CatchAllRejected);
                }
                // Exactly one marker, so the split always succeeds.
                let (prefix, suffix) = pattern.split_once(WILDCARD).unwrap_or((pattern, ""));
                (true, prefix.to_string(), suffix.to_string())
            }
            _ => return Err(DropReason::MultipleWildcards),
        };

        let mut kept = Vec::with_capacity(targets.len());
        for target in targets {
            match self.check_target(target, has_wildcard) {
                Ok(()) => kept.push(target.clone()),
                Err(reason) => self.drop_with(diagnostics, pattern, reason),
            }
        }

        if kept.is_empty() {
            return Err(DropReason::NoTargets);
        }

        Ok(CompiledMatcher {
            raw: pattern.to_string(),
            has_wildcard,
            prefix,
            suffix,
            targets: kept,
        })
    }

    fn check_target(&self, target: &str, pattern_has_wildcard: bool) -> Result<(), DropReason> {
        if is_declaration_target(target, &self.options.declaration_dirs) {
            return Err(DropReason::DeclarationTarget(target.to_string()));
        }

        match target.matches(WILDCARD).count() {
            0 => Ok(()),
            1 if !pattern_has_wildcard => {
                Err(DropReason::TargetWildcardWithoutCapture(target.to_string()))
            }
            1 if segments(target).any(|segment| segment == "*") => Ok(()),
            1 => Err(DropReason::TargetWildcardNotSegment(target.to_string())),
            _ => Err(DropReason::TargetMultipleWildcards(target.to_string())),
        }
    }

    fn drop_with(&self, diagnostics: &mut Vec<CompileDiagnostic>, pattern: &str, reason: DropReason) {
        if self.options.warns() {
            warn!("[fob-paths] Dropping alias '{}': {}", pattern, reason);
        } else {
            debug!("[fob-paths] Dropping alias '{}': {}", pattern, reason);
        }
        diagnostics.push(CompileDiagnostic {
            pattern: pattern.to_string(),
            reason,
        });
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(['/', '\\'])
}

/// Whether a target names a type-declaration-only artifact
fn is_declaration_target(target: &str, declaration_dirs: &[String]) -> bool {
    if DECLARATION_SUFFIXES
        .iter()
        .any(|suffix| target.ends_with(suffix))
    {
        return true;
    }

    let first = segments(target).find(|segment| !segment.is_empty() && *segment != ".");
    segments(target).any(|segment| {
        declaration_dirs
            .iter()
            .any(|dir| dir == segment && (dir.starts_with('@') || Some(segment) == first))
    })
}
