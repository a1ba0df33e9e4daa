pub const DEFAULT_LIMIT: i64 = 100;
pub const DEFAULT_OFFSET: i64 = 0;

/// Resolves optional `limit`/`offset` query parameters to concrete page
/// bounds. Negative values fall back to the defaults.
pub fn page_bounds(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    let limit = match limit {
        Some(l) if l > 0 => l,
        _ => DEFAULT_LIMIT,
    };
    let offset = match offset {
        Some(o) if o >= 0 => o,
        _ => DEFAULT_OFFSET,
    };
    (limit, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_absent() {
        assert_eq!(page_bounds(None, None), (100, 0));
    }

    #[test]
    fn explicit_bounds_pass_through() {
        assert_eq!(page_bounds(Some(25), Some(50)), (25, 50));
    }

    #[test]
    fn nonsense_bounds_fall_back() {
        assert_eq!(page_bounds(Some(0), Some(-3)), (100, 0));
        assert_eq!(page_bounds(Some(-1), None), (100, 0));
    }
}
