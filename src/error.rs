use crate::scoring::RangeOp;

/// Errors returned by the store, the ledger and the engine.
///
/// Every variant is a plain value: a rejected operation leaves the store and
/// the ledger exactly as they were before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error<K> {
    /// Score falls outside the configured legal range.
    #[error("score {score} for {id} is outside the allowed range {min}..={max}")]
    Validation { id: K, score: i64, min: i64, max: i64 },

    /// Computed score matches the configured alert condition.
    #[error("score {score} for {id} breaches threshold '{condition}'")]
    ThresholdBreach { id: K, score: i64, condition: RangeOp },

    #[error("identity already present: {0}")]
    DuplicateIdentity(K),

    #[error("identity not found: {0}")]
    NotFound(K),

    #[error("store is empty")]
    Empty,

    #[error("nothing to undo")]
    UndoNotAvailable,
}

impl<K> Error<K> {
    /// True for the one error callers are expected to branch on
    /// (flag for review, reorder stock, ...).
    pub fn is_threshold_breach(&self) -> bool {
        matches!(self, Error::ThresholdBreach { .. })
    }

    /// True for an empty store on dequeue or peek, a normal part of
    /// operation rather than a fault.
    pub fn is_expected(&self) -> bool {
        matches!(self, Error::Empty)
    }

    /// Identity the error refers to, if any.
    pub fn id(&self) -> Option<&K> {
        match self {
            Error::Validation { id, .. }
            | Error::ThresholdBreach { id, .. }
            | Error::DuplicateIdentity(id)
            | Error::NotFound(id) => Some(id),
            Error::Empty | Error::UndoNotAvailable => None,
        }
    }
}

pub type Result<T, K> = std::result::Result<T, Error<K>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breach_is_distinguished_from_validation() {
        let breach: Error<&str> = Error::ThresholdBreach {
            id: "T1",
            score: 95,
            condition: RangeOp::GreaterThan(80),
        };
        let invalid: Error<&str> = Error::Validation {
            id: "T1",
            score: 120,
            min: 0,
            max: 100,
        };
        assert!(breach.is_threshold_breach());
        assert!(!invalid.is_threshold_breach());
    }

    #[test]
    fn test_display_messages() {
        let breach: Error<&str> = Error::ThresholdBreach {
            id: "T1",
            score: 95,
            condition: RangeOp::GreaterThan(80),
        };
        assert_eq!(breach.to_string(), "score 95 for T1 breaches threshold '>80'");
        assert_eq!(Error::<&str>::NotFound("P9").to_string(), "identity not found: P9");
        assert_eq!(Error::<&str>::Empty.to_string(), "store is empty");
    }

    #[test]
    fn test_expected_conditions() {
        assert!(Error::<u32>::Empty.is_expected());
        assert!(!Error::<u32>::UndoNotAvailable.is_expected());
        assert!(!Error::<u32>::DuplicateIdentity(1).is_expected());
    }

    #[test]
    fn test_id_accessor() {
        assert_eq!(Error::DuplicateIdentity(7u32).id(), Some(&7));
        assert_eq!(Error::<u32>::Empty.id(), None);
    }
}
