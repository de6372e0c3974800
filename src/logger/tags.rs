//! Log tags identifying the subsystem a message comes from

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    Cache,
    Api,
    Aggregator,
    Logos,
    Config,
    System,
}

impl LogTag {
    /// Key used by `--debug-<key>` / `--verbose-<key>` flags
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::Cache => "cache",
            LogTag::Api => "api",
            LogTag::Aggregator => "aggregator",
            LogTag::Logos => "logos",
            LogTag::Config => "config",
            LogTag::System => "system",
        }
        .to_string()
    }

    /// Uppercase label without colors, used for the tag column
    pub fn to_plain_string(&self) -> &'static str {
        match self {
            LogTag::Cache => "CACHE",
            LogTag::Api => "API",
            LogTag::Aggregator => "AGGREGATE",
            LogTag::Logos => "LOGOS",
            LogTag::Config => "CONFIG",
            LogTag::System => "SYSTEM",
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
