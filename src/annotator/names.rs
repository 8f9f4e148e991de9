use once_cell::sync::Lazy;
use regex::Regex;

static FUNC_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^(<]+)").expect("hard-coded regular expression to be valid")
});

/// Strip the parameter list and template arguments from a display signature.
///
/// `foo::bar(int)` and `foo::bar<T>(int)` both give `foo::bar`. A signature
/// that starts with `(` or `<` has no name prefix and is returned whole.
pub fn short_function_name(signature: &str) -> &str {
    FUNC_NAME_REGEX
        .captures(signature)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| signature.trim())
}
