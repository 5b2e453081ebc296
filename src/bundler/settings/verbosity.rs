//! Output verbosity levels.

/// How much the bundler tells the operator.
///
/// Levels are ordered: a message tagged `Normal` is shown when the configured
/// level is `Normal` or `Debug`. `Silent` messages are always shown.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Verbosity {
    /// Only fatal errors and the final failure summary.
    Silent,
    /// Stage headers and outcomes.
    #[default]
    Normal,
    /// Everything, plus diagnostic subprocess calls.
    Debug,
}

impl Verbosity {
    /// Maps the numeric config value (0, 1, 2). Values above 2 mean debug.
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Verbosity::Silent,
            1 => Verbosity::Normal,
            _ => Verbosity::Debug,
        }
    }
}
