// Fixture for syntax-zaz integration tests.

use std::collections::HashMap;

/// Flight plan lookup.
pub struct Tower {
    routes: HashMap<String, u32>,
}

impl Tower {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /* block comments are skipped
     * including continuation lines */
    pub fn clear(&mut self, flight: &str) -> Option<u32> {
        let id = self.routes.get(flight)?;
        Some(*id)
    }
}
