//! Partition patterns shared by UASTC, BC7 and ASTC.
//!
//! Each pattern assigns a subset to every texel in row-major order. The
//! anchor tables list, per subset, the texel whose weight is stored with one
//! bit less (its top bit is implied zero).

/// Patterns available to the two-subset modes other than mode 7.
pub const TOTAL_PATTERNS_2: usize = 30;
/// Patterns available to the three-subset modes.
pub const TOTAL_PATTERNS_3: usize = 11;
/// Patterns available to mode 7.
pub const TOTAL_PATTERNS_2_3: usize = 19;

#[rustfmt::skip]
pub(crate) static PATTERNS_2: [[u8; 16]; TOTAL_PATTERNS_2] = [
    [0,0,1,1,0,0,1,1,0,0,1,1,0,0,1,1], [0,0,0,1,0,0,0,1,0,0,0,1,0,0,0,1],
    [1,0,0,0,1,0,0,0,1,0,0,0,1,0,0,0], [0,0,0,1,0,0,1,1,0,0,1,1,0,1,1,1],
    [1,1,1,1,1,1,1,0,1,1,1,0,1,1,0,0], [0,0,1,1,0,1,1,1,0,1,1,1,1,1,1,1],
    [1,1,1,0,1,1,0,0,1,0,0,0,0,0,0,0], [1,1,1,1,1,1,1,0,1,1,0,0,1,0,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,1,0,0,1,1], [1,1,0,0,1,0,0,0,0,0,0,0,0,0,0,0],
    [0,0,0,0,0,0,0,1,0,1,1,1,1,1,1,1], [1,1,1,1,1,1,1,1,1,1,1,0,1,0,0,0],
    [1,1,1,0,1,0,0,0,0,0,0,0,0,0,0,0], [1,1,1,1,1,1,1,1,0,0,0,0,0,0,0,0],
    [0,0,0,0,1,1,1,1,1,1,1,1,1,1,1,1], [1,1,1,1,1,1,1,1,1,1,1,1,0,0,0,0],
    [1,0,0,0,1,1,1,0,1,1,1,1,1,1,1,1], [1,1,1,1,1,1,1,1,0,1,1,1,0,0,0,1],
    [0,1,1,1,0,0,1,1,0,0,0,1,0,0,0,0], [0,0,1,1,0,0,0,1,0,0,0,0,0,0,0,0],
    [0,0,0,0,1,0,0,0,1,1,0,0,1,1,1,0], [1,1,1,1,1,1,1,1,0,1,1,1,0,0,1,1],
    [1,0,0,0,1,1,0,0,1,1,0,0,1,1,1,0], [0,0,1,1,0,0,0,1,0,0,0,1,0,0,0,0],
    [1,1,1,1,0,1,1,1,0,1,1,1,0,0,1,1], [0,1,1,0,0,1,1,0,0,1,1,0,0,1,1,0],
    [1,1,1,1,0,0,0,0,0,0,0,0,1,1,1,1], [1,0,1,0,1,0,1,0,1,0,1,0,1,0,1,0],
    [1,1,1,1,0,0,0,0,1,1,1,1,0,0,0,0], [1,0,0,1,0,0,1,1,0,1,1,0,1,1,0,0],
];

#[rustfmt::skip]
pub(crate) static PATTERNS_3: [[u8; 16]; TOTAL_PATTERNS_3] = [
    [0,0,0,0,0,0,0,0,1,1,2,2,1,1,2,2], [1,1,1,1,1,1,1,1,0,0,0,0,2,2,2,2],
    [1,1,1,1,0,0,0,0,0,0,0,0,2,2,2,2], [1,1,1,1,2,2,2,2,0,0,0,0,0,0,0,0],
    [1,1,2,0,1,1,2,0,1,1,2,0,1,1,2,0], [0,1,1,2,0,1,1,2,0,1,1,2,0,1,1,2],
    [0,2,1,1,0,2,1,1,0,2,1,1,0,2,1,1], [2,0,0,0,2,0,0,0,2,1,1,1,2,1,1,1],
    [2,0,1,2,2,0,1,2,2,0,1,2,2,0,1,2], [1,1,1,1,0,0,0,0,2,2,2,2,1,1,1,1],
    [0,0,2,2,0,0,1,1,0,0,1,1,0,0,2,2],
];

#[rustfmt::skip]
pub(crate) static PATTERNS_2_3: [[u8; 16]; TOTAL_PATTERNS_2_3] = [
    [0,0,0,0,1,1,1,1,0,0,0,0,0,0,0,0], [0,0,1,0,0,0,1,0,0,0,1,0,0,0,1,0],
    [1,1,0,0,1,1,0,0,1,0,0,0,0,0,0,0], [0,0,0,0,0,0,0,1,0,0,1,1,0,0,1,1],
    [1,1,1,1,1,1,1,1,0,0,0,0,1,1,1,1], [0,1,0,0,0,1,0,0,0,1,0,0,0,1,0,0],
    [0,0,0,1,0,0,1,1,1,1,1,1,1,1,1,1], [0,1,1,1,0,0,1,1,0,0,1,1,0,0,1,1],
    [1,1,0,0,0,0,0,0,0,0,1,1,1,1,0,0], [0,1,1,1,0,1,1,1,0,0,0,0,0,0,0,0],
    [0,0,0,0,0,0,0,0,1,1,1,0,1,1,1,0], [1,1,0,0,0,0,0,0,0,0,0,0,1,1,0,0],
    [0,1,1,1,0,0,1,1,0,0,0,0,0,0,0,0], [0,0,0,0,0,0,0,1,1,1,1,1,1,1,1,1],
    [1,1,1,1,1,1,1,1,1,1,1,1,0,1,1,0], [1,1,0,0,1,1,0,0,1,1,0,0,1,0,0,0],
    [1,1,1,1,1,1,1,1,1,0,0,0,1,0,0,0], [0,0,1,1,0,1,1,0,1,1,0,0,1,0,0,0],
    [1,1,1,1,0,1,1,1,0,0,0,0,0,0,0,0],
];

#[rustfmt::skip]
pub(crate) static PATTERNS_2_ANCHORS: [[u8; 2]; TOTAL_PATTERNS_2] = [
    [0, 2], [0, 3], [1, 0], [0, 3], [7, 0], [0, 2], [3, 0],
    [7, 0], [0, 11], [2, 0], [0, 7], [11, 0], [3, 0], [8, 0],
    [0, 4], [12, 0], [1, 0], [8, 0], [0, 1], [0, 2], [0, 4],
    [8, 0], [1, 0], [0, 2], [4, 0], [0, 1], [4, 0], [1, 0],
    [4, 0], [1, 0],
];

#[rustfmt::skip]
pub(crate) static PATTERNS_3_ANCHORS: [[u8; 3]; TOTAL_PATTERNS_3] = [
    [0, 8, 10], [8, 0, 12], [4, 0, 12], [8, 0, 4], [3, 0, 2],
    [0, 1, 3], [0, 2, 1], [1, 9, 0], [1, 2, 0], [4, 0, 8], [0, 6, 2],
];

#[rustfmt::skip]
pub(crate) static PATTERNS_2_3_ANCHORS: [[u8; 2]; TOTAL_PATTERNS_2_3] = [
    [0, 4], [0, 2], [2, 0], [0, 7], [8, 0], [0, 1], [0, 3],
    [0, 1], [2, 0], [0, 1], [0, 8], [2, 0], [0, 1], [0, 7],
    [12, 0], [2, 0], [9, 0], [0, 2], [4, 0],
];

#[cfg(test)]
mod tests {
    use super::*;

    fn check_anchors<const N: usize>(patterns: &[[u8; 16]], anchors: &[[u8; N]]) {
        for (pattern, anchors) in patterns.iter().zip(anchors) {
            for (subset, &anchor) in anchors.iter().enumerate() {
                assert_eq!(pattern[anchor as usize] as usize, subset);
                // The anchor is the first texel of its subset.
                assert!(pattern[..anchor as usize].iter().all(|&s| s as usize != subset));
            }
        }
    }

    #[test]
    fn anchors_are_first_texel_of_each_subset() {
        check_anchors(&PATTERNS_2, &PATTERNS_2_ANCHORS);
        check_anchors(&PATTERNS_3, &PATTERNS_3_ANCHORS);
        check_anchors(&PATTERNS_2_3, &PATTERNS_2_3_ANCHORS);
    }
}
