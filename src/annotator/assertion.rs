use super::types::AssertionMatch;
use once_cell::sync::Lazy;
use regex::Regex;

// e.g. `v8::internal::PerIsolateAssertType::HEAP_ALLOCATION_ASSERT, false>`
static ASSERT_SCOPE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\w+::)+Per(\w+)AssertType::(\w+)_ASSERT, (false|true)>")
        .expect("hard-coded regular expression to be valid")
});

/// Match a raw frame signature against the assertion-scope guard pattern.
pub fn match_assertion(signature: &str) -> Option<AssertionMatch> {
    let caps = ASSERT_SCOPE_REGEX.captures(signature)?;
    Some(AssertionMatch {
        scope: caps[1].to_string(),
        category: caps[2].to_string(),
        allowed: &caps[3] == "true",
    })
}
