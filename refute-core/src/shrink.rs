//! Leaf-level shrink rules.
//!
//! A shrink rule maps a value to the ordered list of smaller values to try
//! in its place. Collections get no rule of their own: their shrinking
//! falls out of composing element and length generators through `bind`.

use std::rc::Rc;

/// A shareable shrink rule for values of type `T`.
pub type Shrink<T> = Rc<dyn Fn(&T) -> Vec<T>>;

/// Shrink a bounded integer toward its range's target value.
///
/// The target is 0 when the range straddles zero, otherwise the bound
/// nearest zero: the low bound for an entirely positive range, the high
/// bound for an entirely negative one. Each step halves the remaining
/// distance to the target, and the target itself is always emitted last,
/// so repeated descent terminates at a single minimal value.
pub fn towards(low: i64, high: i64) -> Shrink<i64> {
    let target = if low > 0 {
        low
    } else if high < 0 {
        high
    } else {
        0
    };

    Rc::new(move |value: &i64| {
        let value = *value;
        if value == target {
            return Vec::new();
        }

        let mut out = Vec::new();
        let mut half = (value - target) / 2;
        let mut current = value - half;
        while half != 0 && current != target {
            out.push(current);
            half = (current - target) / 2;
            current -= half;
        }
        out.push(target);
        out
    })
}
