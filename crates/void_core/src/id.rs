//! Sequential name generation

/// Prefix used for generated entity names
pub const GENERATED_PREFIX: &str = "__name__";

/// Hands out `__name__0`, `__name__1`, ... for entities registered without a name
#[derive(Debug, Default)]
pub struct NameGenerator {
    next: u64,
}

impl NameGenerator {
    /// Create a new generator starting at zero
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Generate the next name
    pub fn next_name(&mut self) -> String {
        let name = format!("{}{}", GENERATED_PREFIX, self.next);
        self.next += 1;
        name
    }

    /// Number of names handed out so far
    pub fn issued(&self) -> u64 {
        self.next
    }

    /// Whether a name looks like one this generator produced
    pub fn is_generated(name: &str) -> bool {
        name.strip_prefix(GENERATED_PREFIX)
            .map(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
            .unwrap_or(false)
    }
}
