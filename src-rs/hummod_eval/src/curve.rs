//! Two-point curve functions.

use hummod_ir::Curve;

/// Evaluates the clamped cubic Hermite curve through the two control points.
///
/// The result is the unique cubic `f` with `f(p1.x) = p1.y`, `f(p2.x) = p2.y`,
/// `f'(p1.x) = p1.slope`, and `f'(p2.x) = p2.slope`. Queries outside the
/// control points extrapolate the same cubic. If both points share an `x`,
/// the curve is constant at `p1.y`.
#[must_use]
#[expect(
    clippy::suboptimal_flops,
    reason = "the basis polynomials are written out as they are usually stated"
)]
pub fn evaluate(curve: &Curve, x: f64) -> f64 {
    let (p1, p2) = (curve.p1, curve.p2);

    let h = p2.x - p1.x;
    if h == 0.0 {
        return p1.y;
    }

    let t = (x - p1.x) / h;
    let t2 = t * t;
    let t3 = t2 * t;

    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    h00 * p1.y + h10 * h * p1.slope + h01 * p2.y + h11 * h * p2.slope
}
