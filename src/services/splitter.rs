use crate::error::{AppError, Result};
use crate::models::bill::ParticipantId;
use crate::models::Bill;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What to do when every participant on a bill is capped and the caps
/// under-cover the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortfallPolicy {
    /// Assign the shortfall to the payer, provided the payer holds no share
    /// in the split already. A payer who is themselves a capped participant
    /// still yields `UnassignedShortfall`.
    AssignToPayer,
    /// Always reject with `UnassignedShortfall`.
    Reject,
}

impl Default for ShortfallPolicy {
    fn default() -> Self {
        Self::AssignToPayer
    }
}

/// Computes each participant's owed share of a single bill, honoring
/// per-participant contribution caps.
#[derive(Debug, Clone)]
pub struct BillSplitter {
    policy: ShortfallPolicy,
    tolerance: Decimal,
}

impl Default for BillSplitter {
    fn default() -> Self {
        Self::new(ShortfallPolicy::default(), Decimal::new(1, 2))
    }
}

impl BillSplitter {
    pub fn new(policy: ShortfallPolicy, tolerance: Decimal) -> Self {
        Self { policy, tolerance }
    }

    /// Splits a bill into per-participant shares that sum to `bill.amount`.
    ///
    /// A participant counts as capped only when their cap sits strictly
    /// below the plain equal share; a cap at or above it never binds and the
    /// participant splits the remainder like anyone else. Capped shares are
    /// fixed at the cap value and the remainder is divided equally among the
    /// uncapped participants.
    pub fn split(&self, bill: &Bill) -> Result<BTreeMap<ParticipantId, Decimal>> {
        if bill.participants.is_empty() {
            return Err(AppError::malformed(&bill.id, "participants must be non-empty"));
        }
        if bill.amount <= Decimal::ZERO {
            return Err(AppError::malformed(
                &bill.id,
                format!("amount must be positive, got {}", bill.amount),
            ));
        }

        let equal_share = bill.equal_share();
        let mut shares: BTreeMap<ParticipantId, Decimal> = BTreeMap::new();
        let mut fixed_total = Decimal::ZERO;
        let mut uncapped: Vec<&ParticipantId> = Vec::new();

        for participant in &bill.participants {
            match bill.max_contributions.get(participant) {
                Some(cap) if *cap < Decimal::ZERO => {
                    return Err(AppError::malformed(
                        &bill.id,
                        format!("cap for {participant} must be non-negative, got {cap}"),
                    ));
                }
                Some(cap) if *cap < equal_share => {
                    shares.insert(participant.clone(), *cap);
                    fixed_total += *cap;
                }
                _ => uncapped.push(participant),
            }
        }

        let remaining = bill.amount - fixed_total;

        if uncapped.is_empty() {
            if remaining.abs() <= self.tolerance {
                // Caps cover the bill exactly; nothing left to assign.
                return Ok(shares);
            }
            return self.assign_shortfall(bill, shares, remaining);
        }

        // Equal split of the remainder, with the last participant taking the
        // exact residual so the shares always sum to the bill amount.
        let count = Decimal::from(uncapped.len() as u64);
        let per_head = remaining / count;
        let mut assigned = Decimal::ZERO;
        for (idx, participant) in uncapped.iter().enumerate() {
            let share = if idx + 1 == uncapped.len() {
                remaining - assigned
            } else {
                assigned += per_head;
                per_head
            };
            shares.insert((*participant).clone(), share);
        }

        Ok(shares)
    }

    fn assign_shortfall(
        &self,
        bill: &Bill,
        mut shares: BTreeMap<ParticipantId, Decimal>,
        shortfall: Decimal,
    ) -> Result<BTreeMap<ParticipantId, Decimal>> {
        match self.policy {
            ShortfallPolicy::AssignToPayer if !shares.contains_key(&bill.paid_by) => {
                tracing::debug!(
                    bill_id = %bill.id,
                    payer = %bill.paid_by,
                    %shortfall,
                    "assigning capped-bill shortfall to payer"
                );
                shares.insert(bill.paid_by.clone(), shortfall);
                Ok(shares)
            }
            _ => Err(AppError::UnassignedShortfall {
                bill_id: bill.id.clone(),
                shortfall,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn splitter() -> BillSplitter {
        BillSplitter::default()
    }

    fn share_sum(shares: &BTreeMap<ParticipantId, Decimal>) -> Decimal {
        shares.values().sum()
    }

    #[test]
    fn test_equal_split_without_caps() {
        let bill = Bill::new("dinner", dec!(90), "alice", ["alice", "bob", "carol"].map(String::from));
        let shares = splitter().split(&bill).unwrap();

        assert_eq!(shares["alice"], dec!(30));
        assert_eq!(shares["bob"], dec!(30));
        assert_eq!(shares["carol"], dec!(30));
        assert_eq!(share_sum(&shares), bill.amount);
    }

    #[test]
    fn test_cap_shifts_remainder_to_uncapped() {
        let bill = Bill::new("rent", dec!(100), "alice", ["alice", "bob"].map(String::from))
            .with_cap("bob", dec!(20));
        let shares = splitter().split(&bill).unwrap();

        assert_eq!(shares["bob"], dec!(20));
        assert_eq!(shares["alice"], dec!(80));
        assert_eq!(share_sum(&shares), bill.amount);
    }

    #[test]
    fn test_cap_at_or_above_equal_share_never_binds() {
        // Equal share is 50; a cap of 60 is a ceiling that never binds, so
        // bob splits the remainder like an uncapped participant.
        let bill = Bill::new("hotel", dec!(100), "alice", ["alice", "bob"].map(String::from))
            .with_cap("bob", dec!(60));
        let shares = splitter().split(&bill).unwrap();

        assert_eq!(shares["alice"], dec!(50));
        assert_eq!(shares["bob"], dec!(50));
    }

    #[test]
    fn test_all_capped_covering_exactly() {
        let bill = Bill::new("show", dec!(100), "alice", ["alice", "bob", "carol"].map(String::from))
            .with_cap("alice", dec!(30))
            .with_cap("bob", dec!(30))
            .with_cap("carol", dec!(60));

        // carol's cap exceeds the equal share (33.33..) and never binds, so
        // she absorbs the remainder left by the two binding caps.
        let shares = splitter().split(&bill).unwrap();
        assert_eq!(shares["alice"], dec!(30));
        assert_eq!(shares["bob"], dec!(30));
        assert_eq!(shares["carol"], dec!(40));
        assert_eq!(share_sum(&shares), bill.amount);
    }

    #[test]
    fn test_shortfall_assigned_to_uninvolved_payer() {
        // carol fronts the bill but shares no cost; both participants are
        // capped below the equal share, so carol absorbs the shortfall.
        let bill = Bill::new("supplies", dec!(100), "carol", ["alice", "bob"].map(String::from))
            .with_cap("alice", dec!(20))
            .with_cap("bob", dec!(30));
        let shares = splitter().split(&bill).unwrap();

        assert_eq!(shares["alice"], dec!(20));
        assert_eq!(shares["bob"], dec!(30));
        assert_eq!(shares["carol"], dec!(50));
        assert_eq!(share_sum(&shares), bill.amount);
    }

    #[test]
    fn test_shortfall_rejected_when_payer_already_capped() {
        let bill = Bill::new("supplies", dec!(100), "alice", ["alice", "bob"].map(String::from))
            .with_cap("alice", dec!(20))
            .with_cap("bob", dec!(30));
        let err = splitter().split(&bill).unwrap_err();

        match err {
            AppError::UnassignedShortfall { shortfall, .. } => {
                assert_eq!(shortfall, dec!(50));
            }
            other => panic!("expected UnassignedShortfall, got {other:?}"),
        }
    }

    #[test]
    fn test_reject_policy_never_assigns() {
        let splitter = BillSplitter::new(ShortfallPolicy::Reject, dec!(0.01));
        let bill = Bill::new("supplies", dec!(100), "carol", ["alice", "bob"].map(String::from))
            .with_cap("alice", dec!(20))
            .with_cap("bob", dec!(30));

        assert!(matches!(
            splitter.split(&bill),
            Err(AppError::UnassignedShortfall { .. })
        ));
    }

    #[test]
    fn test_uneven_division_still_sums_to_amount() {
        let bill = Bill::new("taxi", dec!(100), "alice", ["alice", "bob", "carol"].map(String::from));
        let shares = splitter().split(&bill).unwrap();

        assert_eq!(share_sum(&shares), dec!(100));
        for share in shares.values() {
            assert!((*share - dec!(33.33)).abs() < dec!(0.01));
        }
    }

    #[test]
    fn test_empty_participants_is_malformed() {
        let bill = Bill::new("void", dec!(10), "alice", Vec::new());
        assert!(matches!(
            splitter().split(&bill),
            Err(AppError::MalformedBill { .. })
        ));
    }

    #[test]
    fn test_zero_cap_means_zero_share() {
        let bill = Bill::new("treat", dec!(60), "alice", ["alice", "bob", "carol"].map(String::from))
            .with_cap("carol", dec!(0));
        let shares = splitter().split(&bill).unwrap();

        assert_eq!(shares["carol"], Decimal::ZERO);
        assert_eq!(shares["alice"], dec!(30));
        assert_eq!(shares["bob"], dec!(30));
    }

    #[test]
    fn test_shares_never_negative() {
        let bill = Bill::new("mixed", dec!(75), "alice", ["alice", "bob", "carol"].map(String::from))
            .with_cap("bob", dec!(5));
        let shares = splitter().split(&bill).unwrap();

        assert!(shares.values().all(|s| *s >= Decimal::ZERO));
        assert_eq!(share_sum(&shares), bill.amount);
    }
}
