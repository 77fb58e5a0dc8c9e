//! Rule catalog
//!
//! The catalog is an immutable, validated set of rule definitions grouped by
//! claim category. The built-in catalog ships inside the binary as JSON and
//! is parsed once per process; alternative catalogs can be loaded from a
//! string or a file and go through the same validation.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_risk::{ClaimCategory, RuleCatalog};
//!
//! let catalog = RuleCatalog::builtin()?;
//! for rule in catalog.rules_for(ClaimCategory::Health) {
//!     println!("{} [{}] {}", rule.id, rule.severity, rule.description);
//! }
//! ```

use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::str::FromStr;

use crate::category::ClaimCategory;
use crate::error::RiskError;
use crate::rule::RuleDefinition;

const BUILTIN_RULES: &str = include_str!("../data/rules.json");

static BUILTIN: OnceCell<RuleCatalog> = OnceCell::new();

/// On-disk catalog layout
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    version: String,
    rules: Vec<RuleDefinition>,
}

/// Validated rule catalog
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    version: String,
    by_category: BTreeMap<ClaimCategory, Vec<RuleDefinition>>,
}

impl RuleCatalog {
    /// Returns the process-wide built-in catalog, parsing it on first use
    ///
    /// # Errors
    ///
    /// Returns `RiskError::Catalog` if the embedded document is malformed.
    pub fn builtin() -> Result<&'static RuleCatalog, RiskError> {
        BUILTIN.get_or_try_init(|| {
            let catalog = Self::from_json_str(BUILTIN_RULES)?;
            tracing::debug!(
                version = %catalog.version(),
                rules = catalog.len(),
                "Loaded built-in rule catalog"
            );
            Ok(catalog)
        })
    }

    /// Parses and validates a catalog document
    pub fn from_json_str(json: &str) -> Result<Self, RiskError> {
        let document: CatalogDocument = serde_json::from_str(json)
            .map_err(|e| RiskError::catalog(format!("Failed to parse rules: {}", e)))?;

        Self::from_rules(document.version, document.rules)
    }

    /// Loads a catalog document from a file path
    pub fn from_file(path: &Path) -> Result<Self, RiskError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RiskError::catalog(format!("Rules file {} unreadable: {}", path.display(), e))
        })?;

        let catalog = Self::from_json_str(&content)?;
        tracing::info!(
            path = %path.display(),
            version = %catalog.version(),
            rules = catalog.len(),
            "Loaded rule catalog from file"
        );
        Ok(catalog)
    }

    /// Builds a catalog from already-deserialized rules
    ///
    /// Rule order within each category is preserved.
    pub fn from_rules(version: impl Into<String>, rules: Vec<RuleDefinition>) -> Result<Self, RiskError> {
        let mut seen = HashSet::new();
        let mut by_category: BTreeMap<ClaimCategory, Vec<RuleDefinition>> = BTreeMap::new();

        for rule in rules {
            validate_rule(&rule)?;
            if !seen.insert(rule.id.clone()) {
                return Err(RiskError::catalog(format!("Duplicate rule id {}", rule.id)));
            }
            by_category.entry(rule.category).or_default().push(rule);
        }

        Ok(Self {
            version: version.into(),
            by_category,
        })
    }

    /// Catalog version string
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Rules for a category, in catalog order
    pub fn rules_for(&self, category: ClaimCategory) -> &[RuleDefinition] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Rules for a category given by name; unknown names yield no rules
    pub fn rules_for_name(&self, name: &str) -> &[RuleDefinition] {
        match ClaimCategory::from_str(name) {
            Ok(category) => self.rules_for(category),
            Err(_) => &[],
        }
    }

    /// Looks up a rule by id in any category
    pub fn find(&self, id: &str) -> Option<&RuleDefinition> {
        self.iter().find(|r| r.id.as_str() == id)
    }

    /// Looks up a rule by id within one category
    pub fn find_in(&self, category: ClaimCategory, id: &str) -> Option<&RuleDefinition> {
        self.rules_for(category).iter().find(|r| r.id.as_str() == id)
    }

    /// Categories that have at least one rule
    pub fn categories(&self) -> impl Iterator<Item = ClaimCategory> + '_ {
        self.by_category.keys().copied()
    }

    /// All rules, grouped by category
    pub fn iter(&self) -> impl Iterator<Item = &RuleDefinition> {
        self.by_category.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.by_category.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate_rule(rule: &RuleDefinition) -> Result<(), RiskError> {
    let expected_prefix = format!("{}-", rule.category.rule_prefix());
    if !rule.id.as_str().starts_with(&expected_prefix) {
        return Err(RiskError::catalog(format!(
            "Rule {} does not carry the {} prefix for category {}",
            rule.id, expected_prefix, rule.category
        )));
    }

    if rule.weight == 0 {
        return Err(RiskError::catalog(format!("Rule {} has zero weight", rule.id)));
    }

    let blank = [
        ("description", &rule.description),
        ("pass_reason", &rule.pass_reason),
        ("fail_reason", &rule.fail_reason),
    ]
    .into_iter()
    .find(|(_, text)| text.trim().is_empty());
    if let Some((field, _)) = blank {
        return Err(RiskError::catalog(format!("Rule {} has an empty {}", rule.id, field)));
    }

    rule.condition
        .validate()
        .map_err(|e| RiskError::catalog(format!("Rule {}: {}", rule.id, e)))
}
