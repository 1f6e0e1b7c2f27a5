/// One rung of a recommendation ladder.
pub struct Rule<S> {
    pub key: &'static str,
    pub applies: fn(&S) -> bool,
    pub message: &'static str,
}

/// Ordered `(predicate, message)` table; the first matching rule wins.
pub struct RecommendationLadder<S: 'static> {
    rules: &'static [Rule<S>],
    fallback: &'static str,
}

impl<S: 'static> RecommendationLadder<S> {
    pub const fn new(rules: &'static [Rule<S>], fallback: &'static str) -> Self {
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &'static [Rule<S>] {
        self.rules
    }

    /// Key of the matching rule, or `"fallback"`.
    pub fn classify(&self, signals: &S) -> &'static str {
        self.matching(signals)
            .map(|rule| rule.key)
            .unwrap_or("fallback")
    }

    pub fn recommend(&self, signals: &S) -> String {
        self.matching(signals)
            .map(|rule| rule.message)
            .unwrap_or(self.fallback)
            .to_string()
    }

    fn matching(&self, signals: &S) -> Option<&'static Rule<S>> {
        self.rules.iter().find(|rule| (rule.applies)(signals))
    }
}
