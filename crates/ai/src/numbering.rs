use chrono::{DateTime, Utc};
use rand::Rng;

const SUFFIX_LEN: usize = 6;
const SUFFIX_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Invoice numbers of the form `PREFIX-YYYYMMDD-XXXXXX`.
///
/// The suffix is random; uniqueness is not checked against the store; a
/// collision surfaces as a `StoreError::Conflict` from the persisting write.
#[derive(Debug, Clone)]
pub struct InvoiceNumbering {
    prefix: String,
}

impl InvoiceNumbering {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn next(&self, at: DateTime<Utc>) -> String {
        self.next_with(at, &mut rand::thread_rng())
    }

    pub fn next_with<R: Rng + ?Sized>(&self, at: DateTime<Utc>, rng: &mut R) -> String {
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
            .collect();
        format!("{}-{}-{}", self.prefix, at.format("%Y%m%d"), suffix)
    }
}

impl Default for InvoiceNumbering {
    fn default() -> Self {
        Self::new("TSI")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap()
    }

    fn assert_well_formed(number: &str, prefix: &str, date: &str) {
        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3, "{number}");
        assert_eq!(parts[0], prefix);
        assert_eq!(parts[1], date);
        assert_eq!(parts[2].len(), 6);
        assert!(
            parts[2]
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()),
            "{number}"
        );
    }

    #[test]
    fn numbers_follow_prefix_date_suffix_format() {
        let numbering = InvoiceNumbering::default();
        for _ in 0..200 {
            assert_well_formed(&numbering.next(at()), "TSI", "20261016");
        }
    }

    #[test]
    fn custom_prefix_is_used() {
        let number = InvoiceNumbering::new("TST").next(at());
        assert_well_formed(&number, "TST", "20261016");
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let numbering = InvoiceNumbering::default();
        let a = numbering.next_with(at(), &mut StdRng::seed_from_u64(7));
        let b = numbering.next_with(at(), &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
