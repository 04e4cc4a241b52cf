/// Compute effective limit with precedence: local arg -> configured default.
#[must_use]
pub fn effective_limit(local: Option<u32>, configured: u32) -> usize {
    let limit = local.unwrap_or(configured).max(1);
    usize::try_from(limit).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::effective_limit;

    #[test]
    fn local_takes_precedence() {
        assert_eq!(effective_limit(Some(5), 50), 5);
    }

    #[test]
    fn configured_default_used_when_local_missing() {
        assert_eq!(effective_limit(None, 50), 50);
    }

    #[test]
    fn zero_is_raised_to_one() {
        assert_eq!(effective_limit(Some(0), 50), 1);
    }
}
