//! Generator combinators for property-based testing.
//!
//! A generator wraps a seed-consuming function that produces one candidate
//! tree per invocation: a random value together with every way it could
//! shrink. Generators are explicit, first-class values composed through
//! combinator functions, and shrinking needs no per-type shrinker because
//! it rides along inside the trees.

use std::cell::Cell;
use std::rc::Rc;

use crate::data::Seed;
use crate::error::{Error, Result};
use crate::shrink;
use crate::tree::Tree;

/// A generator for candidate trees of type `T`.
///
/// Each `run` call performs its own random draw; the tree's shrink
/// structure is a pure function of the drawn root value(s).
pub struct Gen<T> {
    generator: Rc<dyn Fn(Seed) -> Tree<T>>,
}

impl<T> Clone for Gen<T> {
    fn clone(&self) -> Self {
        Gen {
            generator: Rc::clone(&self.generator),
        }
    }
}

impl<T: 'static> Gen<T> {
    /// Create a new generator from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Seed) -> Tree<T> + 'static,
    {
        Gen {
            generator: Rc::new(f),
        }
    }

    /// Generate a candidate tree using the given seed.
    pub fn run(&self, seed: Seed) -> Tree<T> {
        (self.generator)(seed)
    }

    /// Create a generator that always produces the same value, with no
    /// randomness and no candidates.
    pub fn constant(value: T) -> Self
    where
        T: Clone,
    {
        Gen::new(move |_seed| Tree::leaf(value.clone()))
    }

    /// Map a function over the generated values.
    pub fn map<U, F>(&self, f: F) -> Gen<U>
    where
        F: Fn(&T) -> U + 'static,
        U: 'static,
    {
        let source = self.clone();
        let f: Rc<dyn Fn(&T) -> U> = Rc::new(f);
        Gen::new(move |seed| source.run(seed).map_shared(Rc::clone(&f)))
    }

    /// Combine two generators with a binary function.
    ///
    /// Both generators are drawn from once, left to right.
    pub fn map2<A, B, F>(f: F, left: &Gen<A>, right: &Gen<B>) -> Gen<T>
    where
        A: 'static,
        B: 'static,
        F: Fn(&A, &B) -> T + 'static,
    {
        let f: Rc<dyn Fn(&A, &B) -> T> = Rc::new(f);
        let left = left.clone();
        let right = right.clone();
        Gen::new(move |seed| {
            let (left_seed, right_seed) = seed.split();
            let left_tree = left.run(left_seed);
            let right_tree = right.run(right_seed);
            Tree::map2_shared(Rc::clone(&f), &left_tree, &right_tree)
        })
    }

    /// Combine any number of generators of the same type with an n-ary
    /// function.
    ///
    /// Every generator is drawn from once, left to right; shrink candidates
    /// perturb one position at a time.
    pub fn map_n<A, F>(f: F, gens: &[Gen<A>]) -> Gen<T>
    where
        A: 'static,
        F: Fn(&[&A]) -> T + 'static,
    {
        let f: Rc<dyn Fn(&[&A]) -> T> = Rc::new(f);
        let gens = gens.to_vec();
        Gen::new(move |seed| {
            let mut seed = seed;
            let mut trees = Vec::with_capacity(gens.len());
            for gen in &gens {
                let (draw_seed, rest) = seed.split();
                trees.push(gen.run(draw_seed));
                seed = rest;
            }
            Tree::map_n_shared(Rc::clone(&f), Rc::new(trees))
        })
    }

    /// Bind/flatmap for dependent generation.
    ///
    /// The outer generator is drawn from once per `run`. While the tree is
    /// expanded during shrinking, `f` is re-invoked at each node with a
    /// fresh seed split off per invocation, so shrink alternatives for the
    /// bound generator are independently randomized; memoization keeps
    /// repeated traversals of any node identical.
    pub fn bind<U, F>(&self, f: F) -> Gen<U>
    where
        F: Fn(&T) -> Gen<U> + 'static,
        U: Clone + 'static,
    {
        let source = self.clone();
        let f: Rc<dyn Fn(&T) -> Gen<U>> = Rc::new(f);
        Gen::new(move |seed| {
            let (outer_seed, inner_seed) = seed.split();
            let tree = source.run(outer_seed);
            let seeds = Cell::new(inner_seed);
            let f = Rc::clone(&f);
            let rebind: Rc<dyn Fn(&T) -> Tree<U>> = Rc::new(move |value| {
                let (draw_seed, rest) = seeds.get().split();
                seeds.set(rest);
                f(value).run(draw_seed)
            });
            tree.bind_shared(rebind)
        })
    }
}

impl Gen<i64> {
    /// Generate a uniform integer in the inclusive range `[low, high]`,
    /// shrinking toward the range's target value.
    ///
    /// Fails fast with [`Error::InvalidRange`] when `low > high`.
    pub fn int_between(low: i64, high: i64) -> Result<Self> {
        if low > high {
            return Err(Error::InvalidRange { low, high });
        }
        Ok(Self::int_between_unchecked(low, high))
    }

    pub(crate) fn int_between_unchecked(low: i64, high: i64) -> Self {
        let rule = shrink::towards(low, high);
        Gen::new(move |seed| {
            let (value, _) = seed.next_between(low, high);
            Tree::unfold(value, Rc::clone(&rule))
        })
    }
}

/// A generator that always produces the same value.
pub fn always<T: Clone + 'static>(value: T) -> Gen<T> {
    Gen::constant(value)
}

/// Generate a uniform integer in `[low, high]`; see [`Gen::int_between`].
pub fn int_between(low: i64, high: i64) -> Result<Gen<i64>> {
    Gen::int_between(low, high)
}

/// Generate a list of exactly `length` elements, each drawn independently.
pub fn list_of_length<T>(length: usize, gen: &Gen<T>) -> Gen<Vec<T>>
where
    T: Clone + 'static,
{
    let gens: Vec<Gen<T>> = (0..length).map(|_| gen.clone()).collect();
    Gen::map_n(
        |values: &[&T]| values.iter().map(|value| (*value).clone()).collect(),
        &gens,
    )
}

/// Generate a list of 0 to 10 elements.
///
/// The length is drawn through `bind`, so shrinking tries shorter lists
/// before shrinking individual elements; no dedicated list-shrink rule
/// exists anywhere.
pub fn list_of<T>(gen: &Gen<T>) -> Gen<Vec<T>>
where
    T: Clone + 'static,
{
    let element = gen.clone();
    Gen::int_between_unchecked(0, 10)
        .bind(move |&length| list_of_length(length as usize, &element))
}

/// Draw `count` root values from a generator, for distribution inspection.
pub fn sample<T>(gen: &Gen<T>, seed: Seed, count: usize) -> Vec<T>
where
    T: Clone + 'static,
{
    let mut seed = seed;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let (draw_seed, rest) = seed.split();
        out.push(gen.run(draw_seed).value().clone());
        seed = rest;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_constant_has_no_candidates() {
        let gen = Gen::constant(7);
        let tree = gen.run(Seed::from_u64(0));
        assert_eq!(*tree.value(), 7);
        assert!(!tree.has_candidates());
    }

    #[test]
    fn test_int_between_rejects_inverted_range() {
        match Gen::int_between(10, 5) {
            Err(Error::InvalidRange { low, high }) => assert_eq!((low, high), (10, 5)),
            Ok(_) => panic!("expected an invalid range error"),
        }
    }

    #[test]
    fn test_int_between_draws_stay_in_range() {
        let gen = Gen::int_between(-10, 10).unwrap();
        for value in sample(&gen, Seed::from_u64(3), 200) {
            assert!((-10..=10).contains(&value));
        }
    }

    #[test]
    fn test_int_between_is_reproducible() {
        let gen = Gen::int_between(-10, 10).unwrap();
        let seed = Seed::from_u64(11);
        assert_eq!(gen.run(seed).value(), gen.run(seed).value());
    }

    #[test]
    fn test_map_transforms_whole_tree() {
        let gen = Gen::int_between(0, 20).unwrap().map(|v| v * 2);
        let tree = gen.run(Seed::from_u64(5));
        assert_eq!(*tree.value() % 2, 0);
        for candidate in tree.candidates() {
            assert_eq!(*candidate.value() % 2, 0);
        }
    }

    #[test]
    fn test_map2_draws_left_to_right() {
        let pairs = Gen::map2(
            |a: &i64, b: &i64| (*a, *b),
            &Gen::int_between(0, 100).unwrap(),
            &Gen::int_between(0, 100).unwrap(),
        );
        let (a, b) = *pairs.run(Seed::from_u64(21)).value();
        assert!((0..=100).contains(&a));
        assert!((0..=100).contains(&b));
    }

    #[test]
    fn test_list_of_length_is_exact() {
        let gen = list_of_length(6, &Gen::int_between(0, 9).unwrap());
        for list in sample(&gen, Seed::from_u64(8), 20) {
            assert_eq!(list.len(), 6);
        }
    }

    #[test]
    fn test_list_of_covers_every_length() {
        let gen = list_of(&Gen::int_between(-10, 10).unwrap());
        let lengths: HashSet<usize> = sample(&gen, Seed::from_u64(13), 500)
            .into_iter()
            .map(|list| list.len())
            .collect();
        for length in 0..=10 {
            assert!(lengths.contains(&length), "no list of length {length}");
        }
    }

    #[test]
    fn test_list_shrinks_length_before_elements() {
        let gen = list_of(&Gen::int_between(-10, 10).unwrap());
        let mut seed = Seed::from_u64(17);
        // Find a draw with a non-trivial length so the length axis exists.
        let tree = loop {
            let (draw_seed, rest) = seed.split();
            let tree = gen.run(draw_seed);
            if tree.value().len() >= 2 {
                break tree;
            }
            seed = rest;
        };
        let first = &tree.candidates()[0];
        assert!(
            first.value().len() < tree.value().len(),
            "first candidate must come from rebinding a smaller length"
        );
    }
}
