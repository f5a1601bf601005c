/// "Latest request wins" guard for one response stream.
///
/// Every request takes a number from [`RequestSequence::issue`]. A response is applied
/// only if its number is newer than the last applied one, so a slow reply to an old
/// request cannot overwrite the result of a newer one.
#[derive(Debug, Default)]
pub struct RequestSequence {
    issued: u64,
    applied: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Returns `true` and records `seq` if it should be applied.
    pub fn accept(&mut self, seq: u64) -> bool {
        if seq <= self.applied || seq > self.issued {
            return false;
        }
        self.applied = seq;
        true
    }

    /// Whether a request is still waiting for its response.
    pub fn pending(&self) -> bool {
        self.issued > self.applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_order_responses_are_applied() {
        let mut seq = RequestSequence::default();
        let first = seq.issue();
        assert!(seq.accept(first));
        let second = seq.issue();
        assert!(seq.accept(second));
        assert!(!seq.pending());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut seq = RequestSequence::default();
        let old = seq.issue();
        let new = seq.issue();
        assert!(seq.pending());

        assert!(seq.accept(new));
        assert!(!seq.accept(old));
        assert!(!seq.pending());
    }

    #[test]
    fn older_but_unseen_response_still_applies() {
        let mut seq = RequestSequence::default();
        let a = seq.issue();
        let b = seq.issue();
        assert!(seq.accept(a));
        assert!(seq.pending());
        assert!(seq.accept(b));
    }

    #[test]
    fn duplicates_and_unknown_numbers_are_rejected() {
        let mut seq = RequestSequence::default();
        let a = seq.issue();
        assert!(seq.accept(a));
        assert!(!seq.accept(a));
        assert!(!seq.accept(42));
    }
}
