//! Automation registry
//!
//! Owns the rule collection. Ids come from a counter that only moves
//! forward, so a deleted id is never handed out again. Mutations take the
//! write lock and reads take the read lock; every operation is atomic.

use chrono::Utc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{AutomationError, AutomationResult};
use crate::matcher::{self, RuleMatch};
use crate::model::{AutomationDraft, AutomationId, AutomationRule, TriggerKind};
use crate::seed;

/// In-memory automation registry
pub struct AutomationRegistry {
    state: RwLock<RegistryState>,
}

struct RegistryState {
    /// Rules in insertion order
    rules: Vec<AutomationRule>,
    next_id: AutomationId,
}

impl RegistryState {
    fn allocate_id(&mut self) -> AutomationId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn insert(&mut self, draft: AutomationDraft) -> AutomationRule {
        let rule = AutomationRule {
            id: self.allocate_id(),
            name: draft.name,
            triggers: draft.triggers,
            responses: draft.responses,
            created_at: draft.created_at.unwrap_or_else(Utc::now),
            is_active: draft.is_active,
        };
        self.rules.push(rule.clone());
        rule
    }

    fn position(&self, id: AutomationId) -> AutomationResult<usize> {
        self.rules
            .iter()
            .position(|rule| rule.id == id)
            .ok_or(AutomationError::NotFound(id))
    }
}

impl AutomationRegistry {
    /// Create empty registry; the first id is 1
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState { rules: Vec::new(), next_id: 1 }),
        }
    }

    /// Create registry seeded with `seed`, assigning ids from 1 in order
    pub fn with_rules(seed: Vec<AutomationDraft>) -> Self {
        let registry = Self::new();
        {
            let mut state = registry.state.write();
            for draft in seed {
                state.insert(draft);
            }
        }
        registry
    }

    /// Create registry with the built-in sample rules
    pub fn with_sample_data() -> Self {
        Self::with_rules(seed::sample_drafts())
    }

    /// All rules in insertion order
    pub fn list_all(&self) -> Vec<AutomationRule> {
        self.state.read().rules.clone()
    }

    /// Rules passing `filter`, in insertion order
    pub fn search(&self, filter: &RuleFilter) -> Vec<AutomationRule> {
        self.state
            .read()
            .rules
            .iter()
            .filter(|rule| filter.matches(rule))
            .cloned()
            .collect()
    }

    /// Lookup by id
    pub fn get(&self, id: AutomationId) -> AutomationResult<AutomationRule> {
        self.state
            .read()
            .rules
            .iter()
            .find(|rule| rule.id == id)
            .cloned()
            .ok_or(AutomationError::NotFound(id))
    }

    /// Insert an inactive placeholder rule and return its id
    pub fn create_empty(&self) -> AutomationId {
        let mut state = self.state.write();
        let rule = state.insert(seed::placeholder_draft());
        tracing::info!(
            automation_id = rule.id,
            total = state.rules.len(),
            "created empty automation"
        );
        rule.id
    }

    /// Insert caller-supplied content under a fresh id
    pub fn create(&self, draft: AutomationDraft) -> AutomationRule {
        let mut state = self.state.write();
        let rule = state.insert(draft);
        tracing::info!(automation_id = rule.id, name = %rule.name, "created automation");
        rule
    }

    /// Replace the content of rule `id`.
    ///
    /// The id is kept; everything else comes from `draft`. A draft without a
    /// creation time keeps the stored one.
    pub fn update(
        &self,
        id: AutomationId,
        draft: AutomationDraft,
    ) -> AutomationResult<AutomationRule> {
        let mut state = self.state.write();
        let index = state.position(id)?;

        let slot = &mut state.rules[index];
        *slot = AutomationRule {
            id,
            name: draft.name,
            triggers: draft.triggers,
            responses: draft.responses,
            created_at: draft.created_at.unwrap_or(slot.created_at),
            is_active: draft.is_active,
        };
        tracing::info!(automation_id = id, "updated automation");
        Ok(slot.clone())
    }

    /// Flip the active flag of rule `id`
    pub fn set_active(
        &self,
        id: AutomationId,
        is_active: bool,
    ) -> AutomationResult<AutomationRule> {
        let mut state = self.state.write();
        let index = state.position(id)?;

        let slot = &mut state.rules[index];
        slot.is_active = is_active;
        tracing::info!(automation_id = id, is_active, "changed automation status");
        Ok(slot.clone())
    }

    /// Remove rule `id`. Unknown ids are a no-op; returns whether a rule went away.
    pub fn delete(&self, id: AutomationId) -> bool {
        let mut state = self.state.write();
        match state.position(id) {
            Ok(index) => {
                state.rules.remove(index);
                tracing::info!(automation_id = id, "deleted automation");
                true
            }
            Err(_) => {
                tracing::debug!(automation_id = id, "delete of unknown automation ignored");
                false
            }
        }
    }

    /// First match for `message` on `channel`, with provenance
    pub fn find_match(&self, message: &str, channel: TriggerKind) -> Option<RuleMatch> {
        let state = self.state.read();
        let hit = matcher::find_match(&state.rules, message, channel);
        match &hit {
            Some(m) => tracing::debug!(
                %channel,
                automation_id = m.automation_id,
                keyword = %m.keyword,
                "message matched automation"
            ),
            None => tracing::debug!(%channel, "no automation matched"),
        }
        hit
    }

    /// Reply for `message` on `channel`, if any active rule matches
    pub fn evaluate(&self, message: &str, channel: TriggerKind) -> Option<String> {
        self.find_match(message, channel).map(|m| m.reply)
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.state.read().rules.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.state.read().rules.is_empty()
    }
}

impl Default for AutomationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Rule status as shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    /// `is_active == true`
    Active,
    /// `is_active == false`
    #[serde(alias = "inactive")]
    Draft,
}

impl std::str::FromStr for RuleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "draft" | "inactive" => Ok(Self::Draft),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// Listing filter
#[derive(Debug, Clone, Default)]
pub struct RuleFilter {
    /// Case-insensitive substring of the rule name
    pub search: Option<String>,
    /// Active or draft only
    pub status: Option<RuleStatus>,
}

impl RuleFilter {
    /// Whether `rule` passes the filter
    pub fn matches(&self, rule: &AutomationRule) -> bool {
        let name_ok = match self.search.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => {
                rule.name.to_lowercase().contains(&query.to_lowercase())
            }
            _ => true,
        };
        let status_ok = match self.status {
            Some(RuleStatus::Active) => rule.is_active,
            Some(RuleStatus::Draft) => !rule.is_active,
            None => true,
        };
        name_ok && status_ok
    }
}
