//! Control chart factor tables.
//!
//! Multipliers for subgroup capacities n = 2..=25, as published in the SPC
//! reference manual, 2nd ed. Index 0 corresponds to n = 2.

/// Smallest subgroup capacity covered by the tables.
pub const MIN_CAPACITY: usize = 2;

/// Largest subgroup capacity covered by the tables.
pub const MAX_CAPACITY: usize = 25;

const TABLE_LEN: usize = MAX_CAPACITY - MIN_CAPACITY + 1;

/// A2: X-bar limits from R-bar. UCL/LCL = X-double-bar +/- A2 * R-bar.
const A2: [f64; TABLE_LEN] = [
    1.880, 1.023, 0.729, 0.577, 0.483, 0.419, 0.373, 0.337, 0.308, 0.285, 0.266, 0.249, 0.235,
    0.223, 0.212, 0.203, 0.194, 0.187, 0.180, 0.173, 0.167, 0.162, 0.157, 0.153,
];

/// D3: R chart lower limit. LCL_R = D3 * R-bar.
const D3: [f64; TABLE_LEN] = [
    0.0, 0.0, 0.0, 0.0, 0.0, 0.076, 0.136, 0.184, 0.223, 0.256, 0.283, 0.307, 0.328, 0.347,
    0.363, 0.378, 0.391, 0.403, 0.415, 0.425, 0.434, 0.443, 0.451, 0.459,
];

/// D4: R chart upper limit. UCL_R = D4 * R-bar.
const D4: [f64; TABLE_LEN] = [
    3.267, 2.574, 2.282, 2.114, 2.004, 1.924, 1.864, 1.816, 1.777, 1.744, 1.717, 1.693, 1.672,
    1.653, 1.637, 1.622, 1.608, 1.597, 1.585, 1.575, 1.566, 1.557, 1.548, 1.541,
];

/// A3: X-bar limits from S-bar. UCL/LCL = X-double-bar +/- A3 * S-bar.
const A3: [f64; TABLE_LEN] = [
    2.659, 1.954, 1.628, 1.427, 1.287, 1.182, 1.099, 1.032, 0.975, 0.927, 0.886, 0.850, 0.817,
    0.789, 0.763, 0.739, 0.718, 0.698, 0.680, 0.663, 0.647, 0.633, 0.619, 0.606,
];

/// B3: S chart lower limit. LCL_S = B3 * S-bar.
const B3: [f64; TABLE_LEN] = [
    0.0, 0.0, 0.0, 0.0, 0.030, 0.118, 0.185, 0.239, 0.284, 0.321, 0.354, 0.382, 0.406, 0.428,
    0.448, 0.466, 0.482, 0.497, 0.510, 0.523, 0.534, 0.545, 0.555, 0.565,
];

/// B4: S chart upper limit. UCL_S = B4 * S-bar.
const B4: [f64; TABLE_LEN] = [
    3.267, 2.568, 2.266, 2.089, 1.970, 1.882, 1.815, 1.761, 1.716, 1.679, 1.646, 1.618, 1.594,
    1.572, 1.552, 1.534, 1.518, 1.503, 1.490, 1.477, 1.466, 1.455, 1.445, 1.435,
];

/// The control chart multipliers for one subgroup capacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Factors {
    /// X-bar limit multiplier for R-bar.
    pub a2: f64,
    /// X-bar limit multiplier for S-bar.
    pub a3: f64,
    /// R chart lower limit multiplier.
    pub d3: f64,
    /// R chart upper limit multiplier.
    pub d4: f64,
    /// S chart lower limit multiplier.
    pub b3: f64,
    /// S chart upper limit multiplier.
    pub b4: f64,
}

/// Looks up the factors for `capacity`, or `None` outside 2..=25.
///
/// # Examples
///
/// ```
/// use u_spc::spc::factors;
///
/// let f = factors(5).unwrap();
/// assert_eq!(f.a2, 0.577);
/// assert_eq!(f.d4, 2.114);
/// assert!(factors(1).is_none());
/// assert!(factors(26).is_none());
/// ```
pub fn factors(capacity: usize) -> Option<Factors> {
    if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&capacity) {
        return None;
    }
    let idx = capacity - MIN_CAPACITY;
    Some(Factors {
        a2: A2[idx],
        a3: A3[idx],
        d3: D3[idx],
        d4: D4[idx],
        b3: B3[idx],
        b4: B4[idx],
    })
}
