//! Funding ledger entity: intents opened before the provider redirect and
//! reconciled once the provider confirms payment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Settlement state of a funding record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FundingStatus {
    /// Intent opened; the provider has not confirmed payment.
    Pending,
    /// Provider confirmed payment; the record is read-only from here on.
    Paid,
}

/// Amount in integer minor-currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MinorUnits(i64);

impl MinorUnits {
    /// Convert a user-supplied decimal currency amount into minor units
    /// (multiplied by 100). Rejects non-positive and non-finite amounts.
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount <= 0.0 {
            return None;
        }
        let minor = (amount * 100.0).round();
        if minor > i64::MAX as f64 {
            return None;
        }
        Some(Self(minor as i64))
    }

    /// Raw minor-unit value.
    pub fn value(self) -> i64 {
        self.0
    }
}

/// Persisted funding record.
///
/// ## Invariants
/// - `status` moves `pending → paid` at most once, and only when the
///   provider reports the external session as completed.
/// - `session_id` is stamped when the provider session is created; confirm
///   calls are cross-checked against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundingRecord {
    pub id: Uuid,
    pub contributor_name: String,
    pub amount: MinorUnits,
    pub status: FundingStatus,
    pub session_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FundingRecord {
    /// Open a new pending intent before the provider is contacted, so a
    /// local record exists even when the provider call fails.
    pub fn open(contributor_name: String, amount: MinorUnits, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            contributor_name,
            amount,
            status: FundingStatus::Pending,
            session_id: None,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(5.0, Some(500))]
    #[case(0.5, Some(50))]
    #[case(19.99, Some(1999))]
    #[case(0.0, None)]
    #[case(-3.0, None)]
    #[case(f64::NAN, None)]
    #[case(f64::INFINITY, None)]
    fn decimal_amounts_convert_to_minor_units(#[case] input: f64, #[case] expected: Option<i64>) {
        assert_eq!(
            MinorUnits::from_decimal(input).map(MinorUnits::value),
            expected
        );
    }

    #[test]
    fn open_produces_a_pending_record_without_session() {
        let amount = MinorUnits::from_decimal(5.0).expect("valid amount");
        let record = FundingRecord::open("Abdul Alo".to_owned(), amount, Utc::now());
        assert_eq!(record.status, FundingStatus::Pending);
        assert_eq!(record.amount.value(), 500);
        assert!(record.session_id.is_none());
    }
}
