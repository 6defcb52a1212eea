use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Identifier for a participant, drawn from the externally supplied universe.
pub type ParticipantId = String;

/// A single shared-expense event: one payer fronts `amount` on behalf of a
/// non-empty set of participants, optionally with per-participant
/// contribution caps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    /// Unique identifier, assigned at creation and immutable thereafter.
    pub id: String,
    pub description: String,
    /// Total amount fronted by the payer; must be strictly positive.
    pub amount: Decimal,
    pub paid_by: ParticipantId,
    /// Participants sharing the cost. Ordered container so iteration is
    /// deterministic across runs.
    pub participants: BTreeSet<ParticipantId>,
    /// Optional per-participant ceilings on the owed share. Keys must be a
    /// subset of `participants`; an absent key means an equal share of the
    /// uncapped remainder.
    #[serde(default)]
    pub max_contributions: BTreeMap<ParticipantId, Decimal>,
    pub created_at: DateTime<Utc>,
}

impl Bill {
    /// Creates a bill with a generated id and no contribution caps.
    pub fn new(
        description: impl Into<String>,
        amount: Decimal,
        paid_by: impl Into<ParticipantId>,
        participants: impl IntoIterator<Item = ParticipantId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            description: description.into(),
            amount,
            paid_by: paid_by.into(),
            participants: participants.into_iter().collect(),
            max_contributions: BTreeMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Sets a contribution cap for one participant.
    pub fn with_cap(mut self, participant: impl Into<ParticipantId>, cap: Decimal) -> Self {
        self.max_contributions.insert(participant.into(), cap);
        self
    }

    /// The plain equal share, ignoring caps. Callers must ensure
    /// `participants` is non-empty first.
    pub fn equal_share(&self) -> Decimal {
        self.amount / Decimal::from(self.participants.len() as u64)
    }

    /// Validates the bill against the malformed-bill taxonomy. The payer
    /// may sit outside `participants` (paying on behalf of others) as long
    /// as the universe knows them.
    pub fn validate(&self, universe: &[ParticipantId]) -> Result<()> {
        if self.participants.is_empty() {
            return Err(AppError::malformed(&self.id, "participants must be non-empty"));
        }
        if self.amount <= Decimal::ZERO {
            return Err(AppError::malformed(
                &self.id,
                format!("amount must be positive, got {}", self.amount),
            ));
        }
        if !self.participants.contains(&self.paid_by)
            && !universe.contains(&self.paid_by)
        {
            return Err(AppError::malformed(
                &self.id,
                format!("payer {} is not a participant or universe member", self.paid_by),
            ));
        }
        for (participant, cap) in &self.max_contributions {
            if !self.participants.contains(participant) {
                return Err(AppError::malformed(
                    &self.id,
                    format!("cap for {participant} who is not a bill participant"),
                ));
            }
            if *cap < Decimal::ZERO {
                return Err(AppError::malformed(
                    &self.id,
                    format!("cap for {participant} must be non-negative, got {cap}"),
                ));
            }
        }
        Ok(())
    }
}
