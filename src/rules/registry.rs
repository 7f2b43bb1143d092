use indexmap::IndexMap;
use sha2::{Digest, Sha256};

use crate::config::Config;
use crate::{AdComplianceError, Result};

use super::{Rule, RuleDescriptor, Severity, builtin_rules, enabled_by_default, ensure_known_rule};

struct Registered {
    descriptor: RuleDescriptor,
    rule: Box<dyn Rule>,
}

/// Ordered set of rules applied to every ad.
///
/// Registration order is evaluation and reporting order. The descriptor's
/// severity is fixed at registration so configuration can override it without
/// touching the rule.
#[derive(Default)]
pub struct RuleRegistry {
    rules: IndexMap<String, Registered>,
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.rules.keys())
            .finish()
    }
}

/// One built-in rule together with its effective configuration.
pub struct CatalogEntry {
    pub descriptor: RuleDescriptor,
    pub enabled: bool,
    pub rule: Box<dyn Rule>,
}

/// The built-in rule catalog with configuration overrides applied.
///
/// Disabled rules are included with `enabled = false`.
///
/// # Errors
/// Returns `UnknownRule` if an override names a rule that does not exist, or
/// `InvalidColor` for an unparseable palette entry.
pub fn catalog(config: &Config) -> Result<Vec<CatalogEntry>> {
    for id in config.rules.keys() {
        ensure_known_rule(id)?;
    }

    Ok(builtin_rules(config)?
        .into_iter()
        .map(|rule| {
            let mut descriptor = rule.descriptor();
            let overrides = config.rules.get(&descriptor.id);
            let enabled = overrides
                .and_then(|o| o.enabled)
                .unwrap_or_else(|| enabled_by_default(&descriptor.id, config));
            if let Some(severity) = overrides.and_then(|o| o.severity) {
                descriptor.severity = severity;
            }
            CatalogEntry {
                descriptor,
                enabled,
                rule,
            }
        })
        .collect())
}

impl RuleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry of every enabled built-in rule.
    ///
    /// # Errors
    /// See [`catalog`].
    pub fn standard(config: &Config) -> Result<Self> {
        let mut registry = Self::new();
        for entry in catalog(config)? {
            if entry.enabled {
                registry.insert(entry.descriptor, entry.rule)?;
            }
        }
        Ok(registry)
    }

    /// Append a rule using its own descriptor.
    ///
    /// # Errors
    /// Returns `DuplicateRule` if a rule with the same id is registered.
    pub fn register<R: Rule + 'static>(&mut self, rule: R) -> Result<()> {
        let descriptor = rule.descriptor();
        self.insert(descriptor, Box::new(rule))
    }

    /// Append a rule with a severity that replaces its default.
    ///
    /// # Errors
    /// Returns `DuplicateRule` if a rule with the same id is registered.
    pub fn register_with_severity<R: Rule + 'static>(
        &mut self,
        rule: R,
        severity: Severity,
    ) -> Result<()> {
        let mut descriptor = rule.descriptor();
        descriptor.severity = severity;
        self.insert(descriptor, Box::new(rule))
    }

    fn insert(&mut self, descriptor: RuleDescriptor, rule: Box<dyn Rule>) -> Result<()> {
        if self.rules.contains_key(&descriptor.id) {
            return Err(AdComplianceError::DuplicateRule(descriptor.id));
        }
        self.rules
            .insert(descriptor.id.clone(), Registered { descriptor, rule });
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.rules.contains_key(id)
    }

    /// Effective descriptor of a registered rule.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&RuleDescriptor> {
        self.rules.get(id).map(|r| &r.descriptor)
    }

    /// Rules in registration order with their effective descriptors.
    pub fn iter(&self) -> impl Iterator<Item = (&RuleDescriptor, &dyn Rule)> {
        self.rules
            .values()
            .map(|r| (&r.descriptor, r.rule.as_ref()))
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &RuleDescriptor> {
        self.rules.values().map(|r| &r.descriptor)
    }

    /// Stable hash of rule ids, effective severities and rule parameters.
    ///
    /// Two registries with the same fingerprint produce the same verdicts.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for (descriptor, rule) in self.iter() {
            hasher.update(descriptor.id.as_bytes());
            hasher.update([0]);
            hasher.update(descriptor.severity.as_str().as_bytes());
            hasher.update([0]);
            hasher.update(rule.parameters().as_bytes());
            hasher.update([0xff]);
        }
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
