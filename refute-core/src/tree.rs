//! Candidate trees for integrated shrinking of test values.
//!
//! A `Tree<T>` bundles a generated value with every way it could be made
//! smaller. Candidates are produced lazily on first traversal and cached,
//! so a tree can be walked any number of times with identical results.

use std::cell::{OnceCell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::shrink::Shrink;

type Thunk<T> = Box<dyn FnOnce() -> Vec<Tree<T>>>;

/// A value together with a lazy, memoized sequence of smaller candidate
/// trees.
///
/// Nodes are immutable after construction and cheaply shareable; cloning a
/// tree clones a reference, not the structure.
pub struct Tree<T> {
    node: Rc<Node<T>>,
}

struct Node<T> {
    value: T,
    candidates: OnceCell<Vec<Tree<T>>>,
    pending: RefCell<Option<Thunk<T>>>,
}

impl<T> Clone for Tree<T> {
    fn clone(&self) -> Self {
        Tree {
            node: Rc::clone(&self.node),
        }
    }
}

impl<T> Tree<T> {
    /// A tree with no candidates.
    pub fn leaf(value: T) -> Self {
        Tree::with_candidates(value, Vec::new())
    }

    /// A tree with an explicit, already materialized candidate list.
    pub fn with_candidates(value: T, candidates: Vec<Tree<T>>) -> Self {
        Tree {
            node: Rc::new(Node {
                value,
                candidates: OnceCell::from(candidates),
                pending: RefCell::new(None),
            }),
        }
    }

    /// The value at this node.
    pub fn value(&self) -> &T {
        &self.node.value
    }

    /// The smaller alternatives to this node, in shrink order.
    ///
    /// The first call runs the suspended producer and caches its output;
    /// every later call returns the same slice.
    pub fn candidates(&self) -> &[Tree<T>] {
        self.node
            .candidates
            .get_or_init(|| match self.node.pending.borrow_mut().take() {
                Some(thunk) => thunk(),
                None => Vec::new(),
            })
    }

    /// Whether any smaller candidate exists.
    pub fn has_candidates(&self) -> bool {
        !self.candidates().is_empty()
    }
}

impl<T: 'static> Tree<T> {
    fn suspended(value: T, thunk: impl FnOnce() -> Vec<Tree<T>> + 'static) -> Self {
        Tree {
            node: Rc::new(Node {
                value,
                candidates: OnceCell::new(),
                pending: RefCell::new(Some(Box::new(thunk))),
            }),
        }
    }

    /// Build a tree by repeatedly applying a shrink rule.
    ///
    /// The candidates of `value` are the trees unfolded from each smaller
    /// value the rule yields, in rule order. The rule must make monotonic
    /// progress toward a terminal value or traversal will not bottom out.
    pub fn unfold(value: T, shrink: Shrink<T>) -> Self
    where
        T: Clone,
    {
        let start = value.clone();
        Tree::suspended(value, move || {
            shrink(&start)
                .into_iter()
                .map(|smaller| Tree::unfold(smaller, Rc::clone(&shrink)))
                .collect()
        })
    }

    /// Map a function over every value in the tree, preserving candidate
    /// order.
    pub fn map<U: 'static>(&self, f: impl Fn(&T) -> U + 'static) -> Tree<U> {
        self.map_shared(Rc::new(f))
    }

    pub(crate) fn map_shared<U: 'static>(&self, f: Rc<dyn Fn(&T) -> U>) -> Tree<U> {
        let value = f(self.value());
        let source = self.clone();
        Tree::suspended(value, move || {
            source
                .candidates()
                .iter()
                .map(|candidate| candidate.map_shared(Rc::clone(&f)))
                .collect()
        })
    }

    /// Combine two trees with a binary function.
    ///
    /// Candidates perturb the left tree first (right held fixed), then the
    /// right tree; each candidate differs from the parent on one side only.
    pub fn map2<A: 'static, B: 'static>(
        f: impl Fn(&A, &B) -> T + 'static,
        left: &Tree<A>,
        right: &Tree<B>,
    ) -> Tree<T> {
        Tree::map2_shared(Rc::new(f), left, right)
    }

    pub(crate) fn map2_shared<A: 'static, B: 'static>(
        f: Rc<dyn Fn(&A, &B) -> T>,
        left: &Tree<A>,
        right: &Tree<B>,
    ) -> Tree<T> {
        let value = f(left.value(), right.value());
        let left = left.clone();
        let right = right.clone();
        Tree::suspended(value, move || {
            let mut out = Vec::new();
            for candidate in left.candidates() {
                out.push(Tree::map2_shared(Rc::clone(&f), candidate, &right));
            }
            for candidate in right.candidates() {
                out.push(Tree::map2_shared(Rc::clone(&f), &left, candidate));
            }
            out
        })
    }

    /// Combine any number of trees of the same type with an n-ary function.
    ///
    /// Candidates are single-axis perturbations: for each position in order,
    /// for each candidate of that position's tree in order, the combination
    /// with exactly that position replaced. Simultaneous multi-position
    /// shrinks never appear in one step.
    pub fn map_n<A: 'static>(
        f: impl Fn(&[&A]) -> T + 'static,
        trees: Vec<Tree<A>>,
    ) -> Tree<T> {
        Tree::map_n_shared(Rc::new(f), Rc::new(trees))
    }

    pub(crate) fn map_n_shared<A: 'static>(
        f: Rc<dyn Fn(&[&A]) -> T>,
        trees: Rc<Vec<Tree<A>>>,
    ) -> Tree<T> {
        let values: Vec<&A> = trees.iter().map(Tree::value).collect();
        let value = f(&values);
        Tree::suspended(value, move || {
            let mut out = Vec::new();
            for (position, tree) in trees.iter().enumerate() {
                for candidate in tree.candidates() {
                    let mut replaced = (*trees).clone();
                    replaced[position] = candidate.clone();
                    out.push(Tree::map_n_shared(Rc::clone(&f), Rc::new(replaced)));
                }
            }
            out
        })
    }

    /// Graft a dependent tree onto every node of this one.
    ///
    /// The result's value is the value of `f(self.value())`. Its candidates
    /// are the outer candidates rebound through `f`, followed by the inner
    /// tree's own candidates. The ordering matters: the shrink search prefers
    /// shrinking the bound-from value before shrinks local to the bound-to
    /// value.
    pub fn bind<U: Clone + 'static>(&self, f: impl Fn(&T) -> Tree<U> + 'static) -> Tree<U> {
        self.bind_shared(Rc::new(f))
    }

    pub(crate) fn bind_shared<U: Clone + 'static>(&self, f: Rc<dyn Fn(&T) -> Tree<U>>) -> Tree<U> {
        let inner = f(self.value());
        let value = inner.value().clone();
        let outer = self.clone();
        Tree::suspended(value, move || {
            let mut out: Vec<Tree<U>> = outer
                .candidates()
                .iter()
                .map(|candidate| candidate.bind_shared(Rc::clone(&f)))
                .collect();
            out.extend(inner.candidates().iter().cloned());
            out
        })
    }
}

impl<T: fmt::Debug> Tree<T> {
    /// Render the whole tree, one value per line, indented by depth.
    ///
    /// Forces every candidate in the tree; meant for small trees in demos
    /// and debugging.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str(&format!("{:?}\n", self.value()));
        for candidate in self.candidates() {
            candidate.render_into(out, depth + 1);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("value", self.value())
            .finish_non_exhaustive()
    }
}
