use once_cell::sync::Lazy;
use regex::Regex;

/// One ordered pattern-substitution rule.
struct Rule {
    regex: Option<Regex>,
    rewrite: &'static str,
}

impl Rule {
    fn new(pattern: &'static str, rewrite: &'static str) -> Self {
        let regex = match Regex::new(pattern) {
            Ok(regex) => Some(regex),
            Err(err) => {
                tracing::error!("Invalid normalization pattern '{}': {}", pattern, err);
                None
            }
        };
        Self { regex, rewrite }
    }

    fn apply(&self, name: &str) -> String {
        self.regex.as_ref().map_or_else(
            || name.to_owned(),
            |regex| regex.replace(name, self.rewrite).into_owned(),
        )
    }
}

/// Applied in order; later rules see the already-rewritten name.
static RULES: Lazy<[Rule; 3]> = Lazy::new(|| {
    [
        // session.1, session.42, ... -> session.*
        Rule::new(r"\.[0-9]+$", ".*"),
        // any prefix ending in the reload token -> *_reload
        Rule::new(r".*(_reload)$", "*${1}"),
        // _BEAMER_<CATEGORY>_<per-user suffix> -> _BEAMER_<CATEGORY>_*
        Rule::new(r"^(_BEAMER_)([A-Z_]+)_.*$", "${1}${2}_*"),
    ]
});

/// Collapse per-user variants of a cookie name onto one canonical key,
/// keeping series cardinality bounded for unbounded name spaces.
///
/// Pure and idempotent: normalizing an already-normalized name returns it
/// unchanged.
#[must_use]
pub fn normalize_cookie_name(name: &str) -> String {
    RULES
        .iter()
        .fold(name.to_owned(), |current, rule| rule.apply(&current))
}
