//! The locked box in the uncle's cupboard.

/// Code that opens the box.
pub const SAFE_CODE: &str = "6142";
/// Wrong attempts after which a hint is offered.
pub const HINT_THRESHOLD: i32 = 3;

/// Result of entering a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafeOutcome {
    Opened,
    /// `offer_hint` is set once enough wrong codes were entered; from then
    /// on the wrong-attempt counter stops growing.
    Wrong { offer_hint: bool },
}

/// Checks `code` against [`SAFE_CODE`], given the wrong attempts so far.
#[must_use]
pub fn check(code: &str, wrong_attempts: i32) -> SafeOutcome {
    if code.trim() == SAFE_CODE {
        SafeOutcome::Opened
    } else {
        SafeOutcome::Wrong {
            offer_hint: wrong_attempts >= HINT_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_code_opens_even_with_spaces() {
        assert_eq!(check(" 6142\n", 0), SafeOutcome::Opened);
    }

    #[test]
    fn test_hint_is_offered_after_three_wrong_codes() {
        assert_eq!(check("1234", 2), SafeOutcome::Wrong { offer_hint: false });
        assert_eq!(check("1234", 3), SafeOutcome::Wrong { offer_hint: true });
    }
}
