//! CNF encodings of cardinality constraints.
//!
//! # References
//!
//! Sinz, C. (2005), "Towards an Optimal CNF Encoding of Boolean Cardinality
//! Constraints", CP 2005.

use super::oracle::SatOracle;
use super::types::Lit;

/// Adds `sum(lits) <= k` to `oracle` using the sequential counter encoding.
///
/// Auxiliary register `s[i][j]` means "at least `j + 1` of `lits[0..=i]` are
/// true". Uses `(n - 1) * k` fresh variables and `O(n * k)` clauses.
/// `k >= n` adds nothing, `k == 0` adds one unit clause per literal.
pub fn encode_at_most_k<O: SatOracle + ?Sized>(oracle: &mut O, lits: &[Lit], k: usize) {
    let n = lits.len();
    if k >= n {
        return;
    }
    if k == 0 {
        for &lit in lits {
            oracle.add_clause(&[!lit]);
        }
        return;
    }

    // Registers for prefixes 0..n-1; the last literal only needs a check.
    let registers: Vec<Vec<Lit>> = (0..n - 1)
        .map(|_| (0..k).map(|_| oracle.new_var().positive()).collect())
        .collect();

    // First literal: x0 -> s[0][0]; s[0][j] false for j >= 1.
    oracle.add_clause(&[!lits[0], registers[0][0]]);
    for &reg in &registers[0][1..] {
        oracle.add_clause(&[!reg]);
    }

    for i in 1..n - 1 {
        let (prev, cur) = (&registers[i - 1], &registers[i]);
        oracle.add_clause(&[!lits[i], cur[0]]);
        oracle.add_clause(&[!prev[0], cur[0]]);
        for j in 1..k {
            oracle.add_clause(&[!lits[i], !prev[j - 1], cur[j]]);
            oracle.add_clause(&[!prev[j], cur[j]]);
        }
        // Overflow: x_i with k already counted.
        oracle.add_clause(&[!lits[i], !prev[k - 1]]);
    }

    oracle.add_clause(&[!lits[n - 1], !registers[n - 2][k - 1]]);
}
