//! Human-facing reference code generation
//!
//! Booking references and receipt numbers are short random codes shown
//! to passengers, distinct from internal UUIDs. Candidates are drawn
//! here; uniqueness is checked by the caller against the store, with
//! the UNIQUE index at the storage boundary as the concurrency
//! backstop (two concurrent callers can draw the same candidate, only
//! one insert will commit).

use rand::Rng;

/// Which kind of reference to generate; each kind has its own format
/// and its own uniqueness scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Ticket booking reference: 2 uppercase letters + 6 digits
    Ticket,
    /// Booking group reference: same format as tickets
    Booking,
    /// Receipt number: "R" + 9 digits
    Receipt,
}

/// Draw a random candidate code for the given kind.
pub fn candidate(kind: ReferenceKind) -> String {
    let mut rng = rand::thread_rng();
    match kind {
        ReferenceKind::Ticket | ReferenceKind::Booking => {
            let letters: String = (0..2)
                .map(|_| rng.gen_range(b'A'..=b'Z') as char)
                .collect();
            format!("{}{:06}", letters, rng.gen_range(0..1_000_000u32))
        }
        ReferenceKind::Receipt => {
            format!("R{}", rng.gen_range(100_000_000..1_000_000_000u64))
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_format_two_letters_six_digits() {
        for _ in 0..100 {
            let code = candidate(ReferenceKind::Ticket);
            assert_eq!(code.len(), 8);
            assert!(code[..2].chars().all(|c| c.is_ascii_uppercase()));
            assert!(code[2..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn booking_format_matches_ticket_format() {
        let code = candidate(ReferenceKind::Booking);
        assert_eq!(code.len(), 8);
        assert!(code[..2].chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn receipt_format_r_plus_nine_digits() {
        for _ in 0..100 {
            let code = candidate(ReferenceKind::Receipt);
            assert_eq!(code.len(), 10);
            assert!(code.starts_with('R'));
            assert!(code[1..].chars().all(|c| c.is_ascii_digit()));
            // no leading zero: the numeric part is always nine digits wide
            assert_ne!(code.as_bytes()[1], b'0');
        }
    }
}
