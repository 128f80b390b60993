#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum number of grapheme clusters shown in a search hit excerpt.
    pub excerpt_length: usize,
    /// Emit indented JSON from `export_snapshot`. Ordering is canonical either way.
    pub pretty_snapshots: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            excerpt_length: 80,
            pretty_snapshots: false,
        }
    }
}

impl EngineConfig {
    pub fn with_excerpt_length(mut self, excerpt_length: usize) -> Self {
        self.excerpt_length = excerpt_length;
        self
    }

    pub fn with_pretty_snapshots(mut self, pretty: bool) -> Self {
        self.pretty_snapshots = pretty;
        self
    }
}
