//! Integer bar lengths via largest-remainder (Hare-Niemeyer) apportionment.
//!
//! ### Workflow
//! 1. [`bucket_length`] scales a bucket's total against the busiest bucket to
//!    get its share `L` of the bar budget.
//! 2. [`allocate`] splits `L` across the bucket's series so the parts sum to
//!    exactly `L`.  Each series first gets the floor of its proportional
//!    share; leftover units go to the largest two-digit fractional remainders,
//!    ties resolved by declared series order.

/// `floor(budget * total / max_total)`; zero when there is nothing to scale by.
#[must_use]
pub fn bucket_length(budget: usize, total: u64, max_total: u64) -> usize {
    if max_total == 0 {
        return 0;
    }
    let scaled = wide(budget) * u128::from(total) / u128::from(max_total);
    usize::try_from(scaled).unwrap_or(budget)
}

/// Split `length` over `counts` (declared series order), summing exactly.
///
/// All-zero counts produce all-zero lengths.
#[must_use]
pub fn allocate(counts: &[u64], length: usize) -> Vec<usize> {
    let mut lengths = vec![0usize; counts.len()];
    let total: u128 = counts.iter().map(|&n| u128::from(n)).sum();
    if total == 0 || length == 0 {
        return lengths;
    }

    // (fractional remainder in hundredths, series index)
    let mut fractions: Vec<(u128, usize)> = Vec::with_capacity(counts.len());
    for (i, &n) in counts.iter().enumerate() {
        if n == 0 {
            continue;
        }
        let val = u128::from(n) * wide(length) * 100 / total;
        lengths[i] = usize::try_from(val / 100).unwrap_or(length);
        fractions.push((val % 100, i));
    }

    let assigned: usize = lengths.iter().sum();
    let remainder = length.saturating_sub(assigned);
    fractions.sort_by(|(fa, ia), (fb, ib)| fb.cmp(fa).then(ia.cmp(ib)));
    for &(_, i) in fractions.iter().cycle().take(remainder) {
        lengths[i] += 1;
    }
    lengths
}

#[inline]
fn wide(n: usize) -> u128 {
    n as u128
}
