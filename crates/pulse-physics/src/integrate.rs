//! Fixed-step integration

use crate::body::Body;
use crate::quantity::Seconds;
use std::ops::{Add, Mul};

/// One explicit first-order step: `y + rate * h`.
///
/// The quantity operators decide what is legal, so `rk1(position, velocity, h)`
/// and `rk1(velocity, acceleration, h)` compile while mixing them up does not.
pub fn rk1<Y, R, D>(y: Y, rate: R, h: Seconds) -> Y
where
    R: Mul<Seconds, Output = D>,
    Y: Add<D, Output = Y>,
{
    y + rate * h
}

/// Advance a body by `dt` with the midpoint scheme.
///
/// Half a velocity kick, a full drift with the updated velocity, then the
/// second half kick with the same acceleration. Acceleration is left as-is;
/// the caller zeroes it once the step is over. Any `dt` is accepted,
/// including zero and negative spans.
pub fn integrate(mut body: Body, dt: Seconds) -> Body {
    let half = dt / 2.0;
    body.velocity = rk1(body.velocity, body.acceleration, half);
    body.position = rk1(body.position, body.velocity, dt);
    body.velocity = rk1(body.velocity, body.acceleration, half);
    body
}
