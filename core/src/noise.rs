//! Gradient noise.
//!
//! Seeded 3D gradient noise in the [-1, 1] range, plus a ridged
//! multifractal variant for terrain-style height fields. The 1D and 2D
//! entry points evaluate the 3D field with the remaining coordinates at
//! zero, so mixed-dimension callers sample a consistent field.
//!
//! Only the low 8 bits of the seed select a noise variant; seeds that
//! agree modulo 256 produce identical fields.

/// Ken Perlin's reference permutation, used to hash lattice coordinates.
#[rustfmt::skip]
const PERM: [u8; 256] = [
    151, 160, 137,  91,  90,  15, 131,  13, 201,  95,  96,  53, 194, 233,   7, 225,
    140,  36, 103,  30,  69, 142,   8,  99,  37, 240,  21,  10,  23, 190,   6, 148,
    247, 120, 234,  75,   0,  26, 197,  62,  94, 252, 219, 203, 117,  35,  11,  32,
     57, 177,  33,  88, 237, 149,  56,  87, 174,  20, 125, 136, 171, 168,  68, 175,
     74, 165,  71, 134, 139,  48,  27, 166,  77, 146, 158, 231,  83, 111, 229, 122,
     60, 211, 133, 230, 220, 105,  92,  41,  55,  46, 245,  40, 244, 102, 143,  54,
     65,  25,  63, 161,   1, 216,  80,  73, 209,  76, 132, 187, 208,  89,  18, 169,
    200, 196, 135, 130, 116, 188, 159,  86, 164, 100, 109, 198, 173, 186,   3,  64,
     52, 217, 226, 250, 124, 123,   5, 202,  38, 147, 118, 126, 255,  82,  85, 212,
    207, 206,  59, 227,  47,  16,  58,  17, 182, 189,  28,  42, 223, 183, 170, 213,
    119, 248, 152,   2,  44, 154, 163,  70, 221, 153, 101, 155, 167,  43, 172,   9,
    129,  22,  39, 253,  19,  98, 108, 110,  79, 113, 224, 232, 178, 185, 112, 104,
    218, 246,  97, 228, 251,  34, 242, 193, 238, 210, 144,  12, 191, 179, 162, 241,
     81,  51, 145, 235, 249,  14, 239, 107,  49, 192, 214,  31, 181, 199, 106, 157,
    184,  84, 204, 176, 115, 121,  50,  45, 127,   4, 150, 254, 138, 236, 205,  93,
    222, 114,  67,  29,  24,  72, 243, 141, 128, 195,  78,  66, 215,  61, 156, 180,
];

fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

// Gradient dot product for the 12 edge-vector gradients (4 duplicated).
fn grad(hash: usize, x: f32, y: f32, z: f32) -> f32 {
    match hash & 15 {
        0 => x + y,
        1 => -x + y,
        2 => x - y,
        3 => -x - y,
        4 => x + z,
        5 => -x + z,
        6 => x - z,
        7 => -x - z,
        8 => y + z,
        9 => -y + z,
        10 => y - z,
        11 => -y - z,
        12 => y + x,
        13 => -y + z,
        14 => y - x,
        _ => -y - z,
    }
}

/// Sample seeded gradient noise at a 3D point.
///
/// Returns a value in [-1, 1]. The result is 0 at every integer lattice
/// point. Deterministic for identical inputs.
pub fn noise3(x: f32, y: f32, z: f32, seed: u32) -> f32 {
    let rot = (seed & 0xFF) as usize;
    let perm = |i: usize| PERM[(i + rot) & 255] as usize;

    let xi = x.floor() as i64;
    let yi = y.floor() as i64;
    let zi = z.floor() as i64;
    let xf = x - xi as f32;
    let yf = y - yi as f32;
    let zf = z - zi as f32;
    let xi = (xi & 255) as usize;
    let yi = (yi & 255) as usize;
    let zi = (zi & 255) as usize;

    let u = fade(xf);
    let v = fade(yf);
    let w = fade(zf);

    let corner = |dx: usize, dy: usize, dz: usize| {
        perm(perm(perm((xi + dx) & 255) + ((yi + dy) & 255)) + ((zi + dz) & 255))
    };

    let y0z0 = lerp(
        grad(corner(0, 0, 0), xf, yf, zf),
        grad(corner(1, 0, 0), xf - 1.0, yf, zf),
        u,
    );
    let y1z0 = lerp(
        grad(corner(0, 1, 0), xf, yf - 1.0, zf),
        grad(corner(1, 1, 0), xf - 1.0, yf - 1.0, zf),
        u,
    );
    let y0z1 = lerp(
        grad(corner(0, 0, 1), xf, yf, zf - 1.0),
        grad(corner(1, 0, 1), xf - 1.0, yf, zf - 1.0),
        u,
    );
    let y1z1 = lerp(
        grad(corner(0, 1, 1), xf, yf - 1.0, zf - 1.0),
        grad(corner(1, 1, 1), xf - 1.0, yf - 1.0, zf - 1.0),
        u,
    );

    lerp(lerp(y0z0, y1z0, v), lerp(y0z1, y1z1, v), w)
}

/// Sample seeded gradient noise along a line (y = z = 0).
pub fn noise1(x: f32, seed: u32) -> f32 {
    noise3(x, 0.0, 0.0, seed)
}

/// Sample seeded gradient noise in a plane (z = 0).
pub fn noise2(x: f32, y: f32, seed: u32) -> f32 {
    noise3(x, y, 0.0, seed)
}

/// Ridged multifractal noise.
///
/// Sums `octaves` layers of folded gradient noise, each octave scaled by
/// `lacunarity` in frequency and `gain` in amplitude, with each layer
/// modulated by the previous one. `offset` controls the ridge fold; 1.0
/// gives the classic ridge shape with a non-negative result.
pub fn fractal_noise(
    x: f32,
    y: f32,
    z: f32,
    lacunarity: f32,
    gain: f32,
    offset: f32,
    octaves: u32,
) -> f32 {
    let mut frequency = 1.0;
    let mut amplitude = 0.5;
    let mut prev = 1.0;
    let mut sum = 0.0;
    for octave in 0..octaves {
        let n = noise3(x * frequency, y * frequency, z * frequency, octave);
        let r = offset - n.abs();
        let r = r * r;
        sum += r * amplitude * prev;
        prev = r;
        frequency *= lacunarity;
        amplitude *= gain;
    }
    sum
}
