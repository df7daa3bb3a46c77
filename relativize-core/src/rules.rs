use crate::config::Config;
use anyhow::{Context, Result};
use regex::{NoExpand, Regex};
use std::borrow::Cow;

/// A single find/replace rule: a compiled regex and a literal replacement.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    replacement: String,
}

impl Rule {
    /// Build a rule from a raw regex pattern.
    pub fn new(find: &str, replacement: &str) -> Result<Self> {
        let pattern =
            Regex::new(find).with_context(|| format!("invalid rule pattern {find:?}"))?;
        Ok(Self {
            pattern,
            replacement: replacement.to_string(),
        })
    }

    /// Build a rule whose find side is taken literally. Path prefixes go
    /// through here so `.` and friends don't act as metacharacters.
    pub fn literal(find: &str, replacement: &str) -> Result<Self> {
        Self::new(&regex::escape(find), replacement)
    }

    /// Replace every occurrence of the pattern. Returns `Some` with the
    /// rewritten content iff the pattern matched at least once; the
    /// replacement is inserted verbatim, so `$` has no capture-group
    /// meaning.
    pub fn apply(&self, content: &str) -> Option<String> {
        match self
            .pattern
            .replace_all(content, NoExpand(&self.replacement))
        {
            Cow::Borrowed(_) => None,
            Cow::Owned(rewritten) => Some(rewritten),
        }
    }

    pub fn find_str(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

/// The ordered rule lists applied to each eligible file: the path and
/// build-setting rules first, then the identifier renames. Later rules
/// see earlier rules' output.
#[derive(Debug, Clone)]
pub struct RuleSet {
    primary: Vec<Rule>,
    renames: Vec<Rule>,
}

impl RuleSet {
    /// Build the rule set for a config, in declaration order.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut primary = vec![
            // Path prefixes first, so the setting rules below see the
            // already-relativized text.
            Rule::literal(&format!("{}/", config.core_dir), "../")?,
            Rule::literal(&format!("{}/cmake", config.core_dir), "../cmake")?,
            Rule::new("SDKROOT = .*;", "SDKROOT = auto;")?,
            Rule::new(
                r#"projectDirPath = ".*";"#,
                &format!(r#"projectDirPath = "{}";"#, config.core_lib_dir),
            )?,
            Rule::new(
                "SYMROOT = .*;",
                &format!("BUILD_DIR = {};", config.build_dir),
            )?,
            Rule::new("TARGET_TEMP_DIR = .*;", "")?,
            Rule::new("CONFIGURATION_BUILD_DIR = .*;", "")?,
        ];

        for rule in &config.extra_rules {
            primary.push(Rule::new(&rule.find, &rule.replace)?);
        }

        let renames = config
            .renames
            .iter()
            .map(|rule| Rule::new(&rule.find, &rule.replace))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { primary, renames })
    }

    /// Apply every rule in order to the cumulative output. Returns `Some`
    /// with the fully transformed content iff at least one rule matched
    /// anywhere across both lists; `None` means "leave the file alone".
    /// An empty replacement (pure deletion) still counts as a match.
    pub fn apply(&self, content: &str) -> Option<String> {
        let mut matched = false;
        let mut current = content.to_string();

        for rule in self.iter() {
            if let Some(rewritten) = rule.apply(&current) {
                current = rewritten;
                matched = true;
            }
        }

        matched.then_some(current)
    }

    /// All rules in application order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.primary.iter().chain(self.renames.iter())
    }

    pub fn len(&self) -> usize {
        self.primary.len() + self.renames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.renames.is_empty()
    }
}
