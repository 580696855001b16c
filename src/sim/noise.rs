//! Smooth 2D value noise for prey headings
//!
//! Hash-based lattice noise: deterministic, continuous in both inputs, no
//! table storage. Headings must be a pure function of (seed, time offset) so
//! the sim stays replayable independent of the gameplay RNG stream.

/// Integer lattice hash, mapped to [0, 1)
#[inline]
pub fn hash_2d(x: i32, y: i32) -> f32 {
    let mut h = (x as u32).wrapping_mul(0x27d4_eb2d) ^ (y as u32).wrapping_mul(0x1656_67b1);
    h ^= h >> 15;
    h = h.wrapping_mul(0x2c1b_3c6d);
    h ^= h >> 12;
    h = h.wrapping_mul(0x297a_2d39);
    h ^= h >> 15;
    (h >> 8) as f32 / (1u32 << 24) as f32
}

/// Hermite smoothstep over [0, 1]
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Smooth value noise in [0, 1), continuous in both inputs.
///
/// Small input deltas produce small output deltas; this is what turns the
/// per-entity time offset into an organic wandering heading instead of
/// random-walk jitter.
pub fn noise_2d(x: f32, y: f32) -> f32 {
    let xi = x.floor() as i32;
    let yi = y.floor() as i32;
    let xf = x - x.floor();
    let yf = y - y.floor();

    let tl = hash_2d(xi, yi);
    let tr = hash_2d(xi.wrapping_add(1), yi);
    let bl = hash_2d(xi, yi.wrapping_add(1));
    let br = hash_2d(xi.wrapping_add(1), yi.wrapping_add(1));

    let u = smoothstep(xf);
    let v = smoothstep(yf);

    let top = tl + (tr - tl) * u;
    let bottom = bl + (br - bl) * u;
    top + (bottom - top) * v
}
