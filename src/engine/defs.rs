//! Engine-wide error strings, settings and UCI option plumbing, following
//! the teacher's `engine::defs` shape.

pub struct ErrFatal;
impl ErrFatal {
    pub const NEW_GAME: &'static str = "Setting up new game failed.";
}

pub struct ErrNormal;
impl ErrNormal {
    pub const NOT_LEGAL: &'static str = "This is not a legal move in this position.";
    pub const NOT_INT: &'static str = "The value given was not an integer.";
    pub const FEN_FAILED: &'static str = "Setting up FEN failed. Board not changed.";
}

/// Mutable engine configuration, set up from command-line flags and
/// adjustable afterward via `setoption`.
#[derive(Debug, Clone)]
pub struct Settings {
    pub quiet: bool,
    pub tt_size_mb: usize,
    pub threads: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            quiet: false,
            tt_size_mb: EngineOptionDefaults::HASH_DEFAULT,
            threads: 1,
        }
    }
}

/// Names of the UCI options this engine advertises via `uci`.
pub struct EngineOptionName;
impl EngineOptionName {
    pub const HASH: &'static str = "Hash";
    pub const CLEAR_HASH: &'static str = "Clear Hash";
}

pub struct EngineOptionDefaults;
impl EngineOptionDefaults {
    pub const HASH_MIN: usize = 0;
    pub const HASH_MAX: usize = 65536;
    pub const HASH_DEFAULT: usize = 32;
}
