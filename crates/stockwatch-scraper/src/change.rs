//! Change detection against the last emitted summary.

/// `true` iff `new_summary` differs byte-for-byte from `last_summary`.
#[must_use]
pub fn has_changed(new_summary: &str, last_summary: &str) -> bool {
    new_summary != last_summary
}
