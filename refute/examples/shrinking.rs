//! A close look at candidate trees and the greedy shrink search.

use refute::*;

fn main() -> Result<()> {
    // The candidate tree for 8 in [0, 20]: each level halves the distance
    // to the range's target, and every branch bottoms out at the target.
    println!("--- candidate tree for 8 in [0, 20] ---");
    let tree = Tree::unfold(8i64, shrink::towards(0, 20));
    print!("{}", tree.render());

    // Mapping preserves the shrink structure; only the values change.
    println!();
    println!("--- the same tree, doubled ---");
    let doubled = tree.map(|v| v * 2);
    print!("{}", doubled.render());

    // A failing property over that range: the runner reports the original
    // counterexample, one line per accepted shrink, and the local minimum
    // it gave up at.
    println!();
    println!("--- shrinking `v < 4` over [0, 20] ---");
    let property = for_all(int_between(0, 20)?, |&v| v < 4);
    test_with_seed(&property, Seed::from_u64(2026));

    // Shrink rules compose through `bind` as well: a rule applied to a
    // length drives a whole dependent structure, so the repeated string
    // shrinks its length before its letter.
    println!();
    println!("--- a string tree bound from a length tree ---");
    let length = Tree::unfold(3i64, shrink::towards(0, 3));
    let repeated = length.bind(|&n| {
        let letter = Tree::unfold('c' as i64, shrink::towards('a' as i64, 'c' as i64));
        let n = n as usize;
        letter.map(move |&code| {
            std::iter::repeat(code as u8 as char)
                .take(n)
                .collect::<String>()
        })
    });
    print!("{}", repeated.render());

    Ok(())
}
