//! Rule selection for the active claim category

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::catalog::RuleCatalog;
use crate::category::ClaimCategory;
use crate::error::RiskError;
use crate::rule::{RuleDefinition, RuleId};

/// The rules chosen for evaluation
///
/// Every member id belongs to `category` in the catalog the selection was
/// built from. With no category set the selection is always empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSelection {
    category: Option<ClaimCategory>,
    ids: BTreeSet<RuleId>,
}

impl RuleSelection {
    /// A selection with no category and no rules
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every rule of the category
    pub fn default_selection(catalog: &RuleCatalog, category: ClaimCategory) -> Self {
        Self {
            category: Some(category),
            ids: catalog
                .rules_for(category)
                .iter()
                .map(|r| r.id.clone())
                .collect(),
        }
    }

    pub fn category(&self) -> Option<ClaimCategory> {
        self.category
    }

    /// Adds the rule if absent, removes it if present
    ///
    /// Returns whether the rule is selected afterwards.
    ///
    /// # Errors
    ///
    /// `InvalidRuleId` if the id is not a rule of the active category. The
    /// selection is not modified.
    pub fn toggle(&mut self, catalog: &RuleCatalog, rule_id: &str) -> Result<bool, RiskError> {
        let rule_id = rule_id.trim();
        let category = self.category.ok_or_else(|| RiskError::InvalidRuleId {
            rule_id: rule_id.to_string(),
            category: "unset".to_string(),
        })?;

        let rule = catalog
            .find_in(category, rule_id)
            .ok_or_else(|| RiskError::InvalidRuleId {
                rule_id: rule_id.to_string(),
                category: category.to_string(),
            })?;

        if self.ids.remove(rule.id.as_str()) {
            Ok(false)
        } else {
            self.ids.insert(rule.id.clone());
            Ok(true)
        }
    }

    /// Selects every rule of the active category
    pub fn select_all(&mut self, catalog: &RuleCatalog) {
        if let Some(category) = self.category {
            *self = Self::default_selection(catalog, category);
        }
    }

    /// Deselects every rule, keeping the category
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, rule_id: &str) -> bool {
        self.ids.contains(rule_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected rules in catalog order
    pub fn ordered<'a>(&self, catalog: &'a RuleCatalog) -> Vec<&'a RuleDefinition> {
        match self.category {
            Some(category) => catalog
                .rules_for(category)
                .iter()
                .filter(|r| self.ids.contains(r.id.as_str()))
                .collect(),
            None => Vec::new(),
        }
    }
}
