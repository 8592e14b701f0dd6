/// Configuration for the HumMod source compiler.
///
/// The defaults reproduce the tolerant behavior expected of module sources:
/// anything the compiler does not understand inside `<functions>` is kept as
/// an unsupported function rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Whether a `<curve>` without exactly two complete, numeric `<point>`
    /// entries is a compile error. When `false`, such curves are kept as
    /// unsupported functions.
    pub strict_curves: bool,
}

impl Config {
    /// Creates a new configuration with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strict_curves: false,
        }
    }

    /// Returns a copy of this configuration with `strict_curves` set.
    #[must_use]
    pub const fn with_strict_curves(self, strict_curves: bool) -> Self {
        Self { strict_curves }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
