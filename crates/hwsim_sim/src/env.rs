//! Evaluation environments: signal bindings plus a shared function catalog.
//!
//! An [`Environment`] owns the signal table of one evaluation scope. The
//! function catalog is built once for the root environment and shared by
//! reference with every call environment derived from it, so function
//! bodies see the same definitions but never the caller's signals.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use hwsim_ir::Def;

use crate::error::SimError;

/// Default limit on nested user-function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

/// The binding context for expression evaluation.
#[derive(Debug, Clone)]
pub struct Environment {
    signals: HashMap<String, bool>,
    defs: Rc<HashMap<String, Def>>,
    depth: usize,
    max_call_depth: usize,
}

impl Environment {
    /// Creates a root environment whose catalog holds `defs`.
    ///
    /// When several definitions share a name the last one wins.
    pub fn new<'a>(defs: impl IntoIterator<Item = &'a Def>) -> Self {
        let catalog = defs
            .into_iter()
            .map(|d| (d.name.clone(), d.clone()))
            .collect();
        Self {
            signals: HashMap::new(),
            defs: Rc::new(catalog),
            depth: 0,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Creates a root environment with no function definitions.
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    /// Derives a call environment from `parent`: same function catalog,
    /// empty signal table, one level deeper.
    pub fn for_call(parent: &Environment) -> Self {
        Self {
            signals: HashMap::new(),
            defs: Rc::clone(&parent.defs),
            depth: parent.depth + 1,
            max_call_depth: parent.max_call_depth,
        }
    }

    /// Sets the nesting limit for function calls made from this
    /// environment and any environment derived from it afterwards.
    pub fn with_max_call_depth(mut self, limit: usize) -> Self {
        self.set_max_call_depth(limit);
        self
    }

    /// In-place form of [`Environment::with_max_call_depth`].
    pub fn set_max_call_depth(&mut self, limit: usize) {
        self.max_call_depth = limit;
    }

    /// Binds `name` to `value`, replacing any previous binding.
    pub fn set_variable(&mut self, name: impl Into<String>, value: bool) {
        self.signals.insert(name.into(), value);
    }

    /// Returns the value bound to `name`.
    pub fn get_variable(&self, name: &str) -> Result<bool, SimError> {
        self.signals
            .get(name)
            .copied()
            .ok_or_else(|| SimError::UndefinedSignal {
                name: name.to_string(),
            })
    }

    /// Returns `true` if `name` is bound in this environment.
    pub fn has_variable(&self, name: &str) -> bool {
        self.signals.contains_key(name)
    }

    /// Looks up the definition of function `name`.
    pub fn get_def(&self, name: &str) -> Result<&Def, SimError> {
        self.defs
            .get(name)
            .ok_or_else(|| SimError::UndefinedFunction {
                name: name.to_string(),
            })
    }

    /// Returns the number of function calls between the root environment
    /// and this one.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the configured call nesting limit.
    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    /// Returns `true` if both environments share the same function catalog.
    pub fn shares_catalog_with(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.defs, &other.defs)
    }

    /// Iterates over the current signal bindings in arbitrary order.
    pub fn signals(&self) -> impl Iterator<Item = (&str, bool)> {
        self.signals.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Lists the signal bindings sorted by name, one `name\t-> value` per line.
impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.signals().collect();
        entries.sort_unstable_by_key(|(name, _)| *name);
        for (name, value) in entries {
            writeln!(f, "{name}\t-> {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use hwsim_ir::Expr;

    fn id_def() -> Def {
        Def::new("id", vec!["X".into()], Expr::signal("X"))
    }

    #[test]
    fn set_then_get() {
        let mut env = Environment::empty();
        env.set_variable("A", true);
        assert!(env.get_variable("A").unwrap());
        env.set_variable("A", false);
        assert!(!env.get_variable("A").unwrap());
    }

    #[test]
    fn get_unbound_is_lookup_error() {
        let env = Environment::empty();
        let err = env.get_variable("A").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Lookup);
        assert!(matches!(err, SimError::UndefinedSignal { ref name } if name == "A"));
    }

    #[test]
    fn has_variable_probe() {
        let mut env = Environment::empty();
        assert!(!env.has_variable("A"));
        env.set_variable("A", false);
        assert!(env.has_variable("A"));
    }

    #[test]
    fn get_def_found_and_missing() {
        let defs = [id_def()];
        let env = Environment::new(&defs);
        assert_eq!(env.get_def("id").unwrap().arity(), 1);
        assert!(matches!(
            env.get_def("xor"),
            Err(SimError::UndefinedFunction { .. })
        ));
    }

    #[test]
    fn later_definition_wins() {
        let defs = [
            id_def(),
            Def::new("id", vec!["A".into(), "B".into()], Expr::signal("A")),
        ];
        let env = Environment::new(&defs);
        assert_eq!(env.get_def("id").unwrap().arity(), 2);
    }

    #[test]
    fn call_environment_is_fresh_but_shares_catalog() {
        let defs = [id_def()];
        let mut root = Environment::new(&defs);
        root.set_variable("A", true);

        let mut child = Environment::for_call(&root);
        assert!(!child.has_variable("A"));
        assert!(child.shares_catalog_with(&root));
        assert!(child.get_def("id").is_ok());
        assert_eq!(child.depth(), 1);

        child.set_variable("X", true);
        assert!(!root.has_variable("X"));
    }

    #[test]
    fn independent_roots_do_not_share_catalog() {
        let defs = [id_def()];
        let a = Environment::new(&defs);
        let b = Environment::new(&defs);
        assert!(!a.shares_catalog_with(&b));
    }

    #[test]
    fn call_depth_limit_is_inherited() {
        let root = Environment::empty().with_max_call_depth(4);
        let child = Environment::for_call(&root);
        assert_eq!(child.max_call_depth(), 4);
    }

    #[test]
    fn display_sorted() {
        let mut env = Environment::empty();
        env.set_variable("B", false);
        env.set_variable("A", true);
        assert_eq!(env.to_string(), "A\t-> true\nB\t-> false\n");
    }
}
