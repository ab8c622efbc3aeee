use borsh::{BorshDeserialize, BorshSerialize};

/// A persisted number-sequence record.
///
/// The encoded bytes of the entry double as its version identity: an
/// optimistic commit succeeds only if the stored bytes still match the
/// snapshot the writer last read.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, Eq, PartialEq)]
pub struct SequenceEntry {
    current_value: i64,
    increment_amount: i64,
}

impl SequenceEntry {
    pub fn new(current_value: i64, increment_amount: i64) -> Self {
        Self {
            current_value,
            increment_amount,
        }
    }

    /// The next value this sequence will issue.
    pub fn current_value(&self) -> i64 {
        self.current_value
    }

    /// Step size applied on every successful increment, expected >= 1.
    pub fn increment_amount(&self) -> i64 {
        self.increment_amount
    }

    /// Returns the entry as it should be persisted after one increment.
    ///
    /// `None` if the advance would overflow the value range.
    pub fn advanced(&self) -> Option<Self> {
        let advanced = self.current_value.checked_add(self.increment_amount)?;
        Some(Self::new(advanced, self.increment_amount))
    }
}
