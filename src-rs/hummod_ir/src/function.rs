use serde::{Deserialize, Serialize};

/// One boundary point of a curve: a position, a value, and the slope there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Position of the point
    pub x: f64,
    /// Value of the curve at `x`
    pub y: f64,
    /// Derivative of the curve at `x`
    pub slope: f64,
}

impl CurvePoint {
    /// Creates a new curve point.
    #[must_use]
    pub const fn new(x: f64, y: f64, slope: f64) -> Self {
        Self { x, y, slope }
    }
}

/// A two-point curve with clamped slopes at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    /// The first boundary point
    pub p1: CurvePoint,
    /// The second boundary point
    pub p2: CurvePoint,
}

impl Curve {
    /// Creates a new curve from its two boundary points.
    #[must_use]
    pub const fn new(p1: CurvePoint, p2: CurvePoint) -> Self {
        Self { p1, p2 }
    }
}

/// A function declared in the `<functions>` section of a module.
///
/// Only curves are evaluated. Every other function form is kept as an
/// [`Unsupported`](FunctionSpec::Unsupported) entry so that compiling a module
/// never fails because of a function body it does not understand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionSpec {
    /// A two-point boundary-slope curve
    Curve(Curve),
    /// A function form that is recognized as a declaration but not evaluated
    Unsupported {
        /// The tag the function was declared with, such as `curve` or `dfq`
        kind: String,
        /// The text content of the declaration, whitespace-normalized
        body: String,
    },
}

impl FunctionSpec {
    /// Returns the tag the function was declared with.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Curve(_) => "curve",
            Self::Unsupported { kind, .. } => kind,
        }
    }
}
