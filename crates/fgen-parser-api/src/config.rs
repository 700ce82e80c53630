use serde::{Deserialize, Serialize};

/// Configuration for parser behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum file size to parse (in bytes)
    /// Files larger than this are rejected before reading
    pub max_file_size: usize,

    /// Install the logging trace listener ahead of any user listener
    pub install_tracer: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024, // 10 MB
            install_tracer: true,
        }
    }
}

impl ParserConfig {
    /// Create config without the trace listener
    pub fn quiet() -> Self {
        Self {
            install_tracer: false,
            ..Default::default()
        }
    }

    /// Set maximum file size
    pub fn with_max_file_size(mut self, size: usize) -> Self {
        self.max_file_size = size;
        self
    }

    /// Disable the trace listener
    pub fn without_tracer(mut self) -> Self {
        self.install_tracer = false;
        self
    }
}
