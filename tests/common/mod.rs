use rust_decimal::Decimal;
use splitledger::{Bill, ParticipantId};

pub fn universe() -> Vec<ParticipantId> {
    vec!["alice".to_string(), "bob".to_string(), "carol".to_string()]
}

pub fn bill(
    description: &str,
    amount: Decimal,
    paid_by: &str,
    participants: &[&str],
) -> Bill {
    Bill::new(
        description,
        amount,
        paid_by,
        participants.iter().map(|p| p.to_string()),
    )
}
