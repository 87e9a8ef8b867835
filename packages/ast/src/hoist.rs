use crate::ast::{BlockHoist, Program};
use std::cmp::Reverse;

/// Reorder top-level statements by their [`crate::BlockHoist`] priority
///
/// Nothing moves unless at least one statement asks for a non-default
/// priority. The sort is stable, so statements of equal priority keep their
/// relative order and a `Hoisted` statement at the top stays there.
pub fn hoist(program: &mut Program) {
    if program
        .body
        .iter()
        .all(|statement| statement.block_hoist == BlockHoist::Default)
    {
        return;
    }

    program
        .body
        .sort_by_key(|statement| Reverse(statement.block_hoist.priority()));
}
