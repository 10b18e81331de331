//! Basic usage: quantified properties, nested quantifiers, and the trial
//! report printed by `test`.

use refute::*;

fn main() -> Result<()> {
    // A tautology: all 100 trials pass.
    println!("--- a passing property ---");
    let reversing_twice = for_all(list_of(&int_between(-10, 10)?), |list: &Vec<i64>| {
        let mut reversed: Vec<i64> = list.iter().rev().copied().collect();
        reversed.reverse();
        reversed == *list
    });
    test(&reversing_twice);

    // The wrong-sum claim: the coefficient should be `len`, not `len + 1`,
    // so the property fails whenever `i != 0` and shrinks toward the
    // smallest list and offset that still break it.
    println!();
    println!("--- a failing property with two quantifiers ---");
    let wrong_sum = for_all(list_of(&int_between(-10, 10)?), |list: &Vec<i64>| {
        let list = list.clone();
        for_all(int_between(-10, 10).unwrap(), move |&i| {
            let lhs: i64 = list.iter().map(|e| e + i).sum();
            let rhs: i64 = list.iter().sum::<i64>() + (list.len() as i64 + 1) * i;
            lhs == rhs
        })
    });
    test(&wrong_sum);

    Ok(())
}
