//! Precedence-preserving merges.

use crate::metadata::MetaDataFlavor;
use std::collections::HashSet;

/// Merge metadata found on a less specific declaration (`higher`) into the
/// result gathered so far (`bottom`).
///
/// A datum from `higher` whose kind already occurs in `bottom` is overridden
/// and dropped, as is a second datum of a kind `higher` already contributed.
/// Everything else is appended in order. Argument order is precedence: the
/// merge is not commutative.
pub fn merge_by_hierarchy<F: MetaDataFlavor>(
    flavor: &F,
    mut bottom: Vec<F::Datum>,
    higher: Vec<F::Datum>,
) -> Vec<F::Datum> {
    if higher.is_empty() {
        return bottom;
    }

    let mut seen: HashSet<String> = bottom
        .iter()
        .map(|datum| flavor.kind_of(datum).into_owned())
        .collect();

    for datum in higher {
        let kind = flavor.kind_of(&datum).into_owned();
        if seen.insert(kind) {
            bottom.push(datum);
        } else {
            log::trace!("Overridden: {:?}", datum);
        }
    }
    bottom
}

/// Keep the first datum of each kind.
pub fn dedupe_by_kind<F: MetaDataFlavor>(flavor: &F, metadata: Vec<F::Datum>) -> Vec<F::Datum> {
    merge_by_hierarchy(flavor, Vec::new(), metadata)
}

/// Append the items of `more` not already present in `acc` (set union that
/// keeps first-seen order).
pub fn union_distinct<M: PartialEq>(acc: &mut Vec<M>, more: Vec<M>) {
    for item in more {
        if !acc.contains(&item) {
            acc.push(item);
        }
    }
}
