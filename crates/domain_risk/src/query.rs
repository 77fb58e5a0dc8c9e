//! Rules browser queries

use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalog::RuleCatalog;
use crate::category::ClaimCategory;
use crate::rule::{RuleDefinition, Severity};

/// Filter over the catalog; unset criteria match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleQuery {
    pub category: Option<ClaimCategory>,
    pub severity: Option<Severity>,
    pub text: Option<String>,
}

impl RuleQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: ClaimCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Case-insensitive match against id, description and topic
    pub fn text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = if text.trim().is_empty() {
            None
        } else {
            Some(text.trim().to_lowercase())
        };
        self
    }

    pub fn matches(&self, rule: &RuleDefinition) -> bool {
        if self.category.is_some_and(|c| c != rule.category) {
            return false;
        }
        if self.severity.is_some_and(|s| s != rule.severity) {
            return false;
        }
        match &self.text {
            Some(needle) => {
                rule.id.as_str().to_lowercase().contains(needle)
                    || rule.description.to_lowercase().contains(needle)
                    || rule.topic.to_lowercase().contains(needle)
            }
            None => true,
        }
    }

    /// Matching rules in catalog order
    pub fn apply<'a>(&self, catalog: &'a RuleCatalog) -> Vec<&'a RuleDefinition> {
        catalog.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Headline numbers for the rules browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub total_rules: usize,
    pub high_severity: usize,
    pub categories: usize,
    pub per_category: BTreeMap<ClaimCategory, usize>,
}

impl CatalogSummary {
    pub fn of(catalog: &RuleCatalog) -> Self {
        let per_category: BTreeMap<ClaimCategory, usize> = catalog
            .categories()
            .map(|c| (c, catalog.rules_for(c).len()))
            .collect();

        Self {
            total_rules: catalog.len(),
            high_severity: catalog.iter().filter(|r| r.severity == Severity::High).count(),
            categories: per_category.len(),
            per_category,
        }
    }
}
