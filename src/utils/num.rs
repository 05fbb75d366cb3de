use std::cmp::Ordering;

/// Threshold below which two floating point values are considered equal.
pub const TOLERANCE: f64 = 1e-5;

pub fn compare(first: f64, second: f64) -> Ordering {
    if (first - second).abs() < TOLERANCE {
        Ordering::Equal
    } else if first < second {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

pub fn is_equal(first: f64, second: f64) -> bool {
    compare(first, second) == Ordering::Equal
}

pub fn is_lower(first: f64, second: f64) -> bool {
    compare(first, second) == Ordering::Less
}

pub fn is_greater(first: f64, second: f64) -> bool {
    compare(first, second) == Ordering::Greater
}

pub fn is_lower_equal(first: f64, second: f64) -> bool {
    compare(first, second) != Ordering::Greater
}

pub fn is_greater_equal(first: f64, second: f64) -> bool {
    compare(first, second) != Ordering::Less
}
