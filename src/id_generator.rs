use serde::{Deserialize, Serialize};

/// Identifier of a component in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId(usize);

impl ComponentId {
    pub fn new(raw: usize) -> Self {
        Self(raw)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic id source. One instance is created with the document and handed to the
/// component manager, which is the only place new shapes get their ids.
#[derive(Debug)]
pub struct IdGenerator {
    next: usize,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: usize) -> Self {
        Self { next: first }
    }

    pub fn generate_id(&mut self) -> ComponentId {
        let id = ComponentId(self.next);
        self.next += 1;
        id
    }
}
