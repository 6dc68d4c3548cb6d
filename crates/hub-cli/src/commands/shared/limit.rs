/// Compute effective limit with precedence: global flag -> configured default.
///
/// Zero means "no limit".
#[must_use]
pub fn effective_limit(global: Option<u32>, fallback: u32) -> Option<usize> {
    let limit = global.unwrap_or(fallback);
    (limit > 0).then(|| usize::try_from(limit).unwrap_or(usize::MAX))
}
