//! Timestamp-derived identifier generation.
//!
//! # Responsibility
//! - Produce record ids as decimal epoch-millisecond strings.
//! - Keep ids unique within one generator and one document.
//!
//! # Invariants
//! - `IssuedId::id == IssuedId::issued_at.to_string()`.
//! - Ticks issued by one generator are strictly increasing.
//! - `next_unused` never returns an id already present in the document.

use crate::model::document::Document;
use crate::time::Clock;

/// Returns the clock's current time as an id string.
///
/// Two calls within the same millisecond return the same value; prefer
/// `IdGenerator` when uniqueness matters.
pub fn generate_id<C: Clock>(clock: &C) -> String {
    clock.now_ms().to_string()
}

/// Identifier plus the millisecond tick it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedId {
    pub id: String,
    pub issued_at: i64,
}

impl IssuedId {
    fn from_tick(tick: i64) -> Self {
        Self {
            id: tick.to_string(),
            issued_at: tick,
        }
    }
}

/// Monotonic timestamp id generator.
///
/// When the clock has not advanced past the last issued tick, the next tick
/// is `last + 1`.
#[derive(Debug)]
pub struct IdGenerator<C: Clock> {
    clock: C,
    last_issued: Option<i64>,
}

impl<C: Clock> IdGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            last_issued: None,
        }
    }

    /// Issues the next id.
    pub fn next_id(&mut self) -> IssuedId {
        let now = self.clock.now_ms();
        let tick = match self.last_issued {
            Some(last) if now <= last => last.saturating_add(1),
            _ => now,
        };
        self.last_issued = Some(tick);
        IssuedId::from_tick(tick)
    }

    /// Issues the next id that no record in `document` already uses.
    pub fn next_unused(&mut self, document: &Document) -> IssuedId {
        loop {
            let issued = self.next_id();
            if !document.contains_id(&issued.id) {
                return issued;
            }
        }
    }

    /// Current time from the generator's clock.
    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::{generate_id, IdGenerator};
    use crate::model::document::{Document, Notebook};
    use crate::time::FixedClock;

    #[test]
    fn generate_id_is_the_clock_reading() {
        assert_eq!(generate_id(&FixedClock(1_234)), "1234");
    }

    #[test]
    fn generator_bumps_when_clock_stalls() {
        let mut ids = IdGenerator::new(FixedClock(100));
        assert_eq!(ids.next_id().id, "100");
        assert_eq!(ids.next_id().id, "101");
        let third = ids.next_id();
        assert_eq!(third.id, "102");
        assert_eq!(third.issued_at, 102);
    }

    #[test]
    fn next_unused_skips_ids_present_in_document() {
        let document = Document {
            notebooks: vec![Notebook::new("100", "a"), Notebook::new("101", "b")],
            ..Document::default()
        };
        let mut ids = IdGenerator::new(FixedClock(100));
        assert_eq!(ids.next_unused(&document).id, "102");
    }
}
