//! Per-encoder mapping between domain objects and SAT variables.

use super::oracle::SatOracle;
use super::types::{Model, Var};
use std::collections::HashMap;
use std::hash::Hash;

/// Bijective, stable map `key <-> Var` owned by one encoder.
///
/// Ids come from the encoder's own oracle, so two encoders never share a
/// counter and a table is never consulted after its encoder is dropped.
#[derive(Debug, Clone)]
pub struct VarTable<K> {
    vars: HashMap<K, Var>,
    keys: Vec<(K, Var)>,
}

impl<K: Clone + Eq + Hash> VarTable<K> {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
            keys: Vec::new(),
        }
    }

    /// Allocates one variable per key, in iteration order. Keys already
    /// present keep their variable.
    pub fn allocate<O, I>(oracle: &mut O, keys: I) -> Self
    where
        O: SatOracle + ?Sized,
        I: IntoIterator<Item = K>,
    {
        let mut table = Self::new();
        for key in keys {
            table.insert(oracle, key);
        }
        table
    }

    /// Returns the variable of `key`, allocating it on first use.
    pub fn insert<O: SatOracle + ?Sized>(&mut self, oracle: &mut O, key: K) -> Var {
        if let Some(&var) = self.vars.get(&key) {
            return var;
        }
        let var = oracle.new_var();
        self.vars.insert(key.clone(), var);
        self.keys.push((key, var));
        var
    }

    pub fn var(&self, key: &K) -> Option<Var> {
        self.vars.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// `(key, var)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, Var)> + '_ {
        self.keys.iter().map(|(k, v)| (k, *v))
    }

    /// Keys whose variable is true in `model`, in allocation order.
    pub fn selected<'a>(&'a self, model: &'a Model) -> impl Iterator<Item = &'a K> + 'a {
        self.keys
            .iter()
            .filter(move |(_, var)| model.value(*var))
            .map(|(k, _)| k)
    }
}

impl<K: Clone + Eq + Hash> Default for VarTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::{Lit, VarisatOracle};

    #[test]
    fn test_allocation_is_stable_and_bijective() {
        let mut oracle = VarisatOracle::new();
        let mut table = VarTable::allocate(&mut oracle, ["a", "b", "c"]);
        assert_eq!(table.len(), 3);
        let b = table.var(&"b").unwrap();
        assert_eq!(table.insert(&mut oracle, "b"), b);
        assert_eq!(table.len(), 3);
        assert_eq!(oracle.num_vars(), 3);

        let ids: Vec<u32> = table.iter().map(|(_, v)| v.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(table.var(&"z").is_none());
    }

    #[test]
    fn test_tables_are_independent() {
        let mut first = VarisatOracle::new();
        let mut second = VarisatOracle::new();
        let t1 = VarTable::allocate(&mut first, [10usize, 20]);
        let t2 = VarTable::allocate(&mut second, [20usize, 10]);
        assert_eq!(t1.var(&10).unwrap().id(), 1);
        assert_eq!(t2.var(&10).unwrap().id(), 2);
    }

    #[test]
    fn test_selected_decodes_model() {
        let mut oracle = VarisatOracle::new();
        let table = VarTable::allocate(&mut oracle, 0usize..4);
        let model = Model::from_literals(
            4,
            [1, -2, 3, -4].into_iter().map(Lit::from_dimacs),
        );
        let chosen: Vec<usize> = table.selected(&model).copied().collect();
        assert_eq!(chosen, vec![0, 2]);
    }
}
