//! Locating a span coordinate within the ordered span coordinates of a wing's sections.

use serde::{Deserialize, Serialize};

/// The direction in which a wing's section span coordinates run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanOrder {
    Descending,
    Ascending,
}

impl SpanOrder {
    /// Detect the order of a sequence of span coordinates. Repeated coordinates are allowed, but
    /// the sequence must not change direction. Returns `None` otherwise, or if any coordinate is
    /// NaN. A constant sequence is treated as descending.
    pub fn detect(coords: &[f64]) -> Option<Self> {
        if coords.windows(2).all(|w| w[0] >= w[1]) {
            Some(SpanOrder::Descending)
        } else if coords.windows(2).all(|w| w[0] <= w[1]) {
            Some(SpanOrder::Ascending)
        } else {
            None
        }
    }

    /// True if `a` comes strictly before `b` in this order.
    fn precedes(self, a: f64, b: f64) -> bool {
        match self {
            SpanOrder::Descending => a > b,
            SpanOrder::Ascending => a < b,
        }
    }
}

/// The result of locating a span coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    /// The coordinate is outside the range covered by the sequence.
    Outside,

    /// The coordinate coincides with the entry at this index, within tolerance.
    Exact(usize),

    /// The coordinate lies strictly between two entries. `lower` is the first entry that does not
    /// precede the coordinate, and so the index at which a new entry would be inserted. `upper`
    /// is the entry immediately before it, `lower - 1`.
    Between { lower: usize, upper: usize },
}

impl Bracket {
    /// The bracket as an `(lower, upper)` index pair, with an exact hit giving the same index
    /// twice and an outside coordinate giving `None`.
    pub fn indices(&self) -> Option<(usize, usize)> {
        match *self {
            Bracket::Outside => None,
            Bracket::Exact(i) => Some((i, i)),
            Bracket::Between { lower, upper } => Some((lower, upper)),
        }
    }
}

/// Find the bracket of a target span coordinate in an ordered sequence. Entries which strictly
/// precede the target in the sequence's order are skipped, and the first remaining entry is the
/// lower bound, with the entry before it as the upper bound. For a descending sequence the lower
/// bound is the first entry whose coordinate is less than or equal to the target. If either bound
/// matches the target within `tol` the result is an exact hit on that entry.
///
/// # Arguments
///
/// * `coords`: monotonic span coordinates in the direction given by `order`
/// * `order`: the direction of `coords`
/// * `target`: the span coordinate to locate
/// * `tol`: absolute tolerance for an exact hit
///
/// returns: Bracket
///
/// # Examples
///
/// ```
/// use wingloft::locator::{locate, Bracket, SpanOrder};
/// let coords = [10.0, 5.0, 0.0];
/// assert_eq!(locate(&coords, SpanOrder::Descending, 7.0, 1e-3), Bracket::Between { lower: 1, upper: 0 });
/// assert_eq!(locate(&coords, SpanOrder::Descending, 5.0, 1e-3), Bracket::Exact(1));
/// assert_eq!(locate(&coords, SpanOrder::Descending, 11.0, 1e-3), Bracket::Outside);
/// ```
pub fn locate(coords: &[f64], order: SpanOrder, target: f64, tol: f64) -> Bracket {
    let (min, max) = match order {
        SpanOrder::Descending => (coords.last(), coords.first()),
        SpanOrder::Ascending => (coords.first(), coords.last()),
    };
    let (Some(&min), Some(&max)) = (min, max) else {
        return Bracket::Outside;
    };

    if !(min..=max).contains(&target) {
        return Bracket::Outside;
    }

    let lower = coords.partition_point(|&c| order.precedes(c, target));
    if lower < coords.len() && (coords[lower] - target).abs() < tol {
        return Bracket::Exact(lower);
    }
    if lower > 0 && (coords[lower - 1] - target).abs() < tol {
        return Bracket::Exact(lower - 1);
    }

    // The range check leaves these reachable only through rounding at the boundaries
    if lower == 0 {
        Bracket::Exact(0)
    } else if lower == coords.len() {
        Bracket::Exact(lower - 1)
    } else {
        Bracket::Between {
            lower,
            upper: lower - 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const DESC: [f64; 4] = [10.0, 6.0, 2.0, -1.0];

    #[test_case(10.0, Bracket::Exact(0))]
    #[test_case(-1.0, Bracket::Exact(3))]
    #[test_case(6.0005, Bracket::Exact(1))]
    #[test_case(5.9995, Bracket::Exact(1))]
    #[test_case(8.0, Bracket::Between { lower: 1, upper: 0 })]
    #[test_case(0.0, Bracket::Between { lower: 3, upper: 2 })]
    #[test_case(10.1, Bracket::Outside)]
    #[test_case(-1.1, Bracket::Outside)]
    #[test_case(f64::NAN, Bracket::Outside)]
    fn descending(target: f64, expected: Bracket) {
        assert_eq!(locate(&DESC, SpanOrder::Descending, target, 1.0e-3), expected);
    }

    #[test_case(0.0, Bracket::Exact(0))]
    #[test_case(3.0, Bracket::Between { lower: 1, upper: 0 })]
    #[test_case(9.0, Bracket::Between { lower: 2, upper: 1 })]
    #[test_case(10.0, Bracket::Exact(2))]
    #[test_case(12.0, Bracket::Outside)]
    fn ascending(target: f64, expected: Bracket) {
        let coords = [0.0, 5.0, 10.0];
        assert_eq!(locate(&coords, SpanOrder::Ascending, target, 1.0e-3), expected);
    }

    #[test]
    fn brackets_contain_target() {
        for i in 1..110 {
            let target = -1.0 + i as f64 * 0.1;
            match locate(&DESC, SpanOrder::Descending, target, 1.0e-3) {
                Bracket::Exact(i) => assert!((DESC[i] - target).abs() < 1.0e-3),
                Bracket::Between { lower, upper } => {
                    assert!(DESC[lower] <= target && target <= DESC[upper]);
                }
                Bracket::Outside => panic!("{target} is within range"),
            }
        }
    }

    #[test]
    fn empty_sequence_is_outside() {
        assert_eq!(locate(&[], SpanOrder::Descending, 0.0, 1.0e-3), Bracket::Outside);
    }

    #[test_case(&[3.0, 2.0, 1.0], Some(SpanOrder::Descending))]
    #[test_case(&[1.0, 2.0], Some(SpanOrder::Ascending))]
    #[test_case(&[1.0], Some(SpanOrder::Descending))]
    #[test_case(&[1.0, 1.0], Some(SpanOrder::Descending))]
    #[test_case(&[10.0, 10.0, 0.0], Some(SpanOrder::Descending))]
    #[test_case(&[0.0, 4.0, 4.0], Some(SpanOrder::Ascending))]
    #[test_case(&[1.0, 3.0, 2.0], None)]
    #[test_case(&[2.0, 2.0, 3.0, 1.0], None)]
    #[test_case(&[2.0, f64::NAN], None)]
    fn detects_order(coords: &[f64], expected: Option<SpanOrder>) {
        assert_eq!(SpanOrder::detect(coords), expected);
    }

    #[test_case(10.0, Bracket::Exact(0))]
    #[test_case(7.0, Bracket::Between { lower: 2, upper: 1 })]
    #[test_case(3.0, Bracket::Exact(2))]
    fn repeated_coordinates(target: f64, expected: Bracket) {
        let coords = [10.0, 10.0, 3.0, 0.0];
        assert_eq!(locate(&coords, SpanOrder::Descending, target, 1.0e-3), expected);
    }

    #[test]
    fn indices_of_bracket() {
        assert_eq!(Bracket::Outside.indices(), None);
        assert_eq!(Bracket::Exact(2).indices(), Some((2, 2)));
        assert_eq!(Bracket::Between { lower: 2, upper: 1 }.indices(), Some((2, 1)));
    }
}
