//! Option registries: declared types, aliases, defaults and requirements.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use crate::error::{Error, Result};
use crate::value::Value;

/// A custom conversion function for [`TypeSpec::Custom`] and
/// [`ElementType::Custom`]. Plain function pointers keep the specs
/// comparable, which strict mode relies on.
pub type Convert = fn(&str) -> std::result::Result<Value, String>;

/// Element type of a typed list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementType {
    /// Lenient boolean ("true" or not).
    Bool,
    /// Integer.
    Int,
    /// Floating point.
    Float,
    /// Plain string.
    Str,
    /// Structured literal.
    Json,
    /// Caller-supplied conversion.
    Custom(Convert),
}

/// Declared type of an option. Options without a spec go through
/// auto-detection instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeSpec {
    /// Switch: presence alone sets it true, values coerce leniently.
    Bool,
    /// Integer.
    Int,
    /// Floating point.
    Float,
    /// Plain string.
    Str,
    /// Structured literal, decoded as JSON.
    Json,
    /// Untyped accumulation, elements auto-detected.
    List,
    /// Accumulation with per-element coercion.
    TypedList(ElementType),
    /// Caller-supplied conversion.
    Custom(Convert),
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Bool => write!(f, "bool"),
            ElementType::Int => write!(f, "int"),
            ElementType::Float => write!(f, "float"),
            ElementType::Str => write!(f, "str"),
            ElementType::Json => write!(f, "json"),
            ElementType::Custom(_) => write!(f, "custom"),
        }
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpec::Bool => write!(f, "bool"),
            TypeSpec::Int => write!(f, "int"),
            TypeSpec::Float => write!(f, "float"),
            TypeSpec::Str => write!(f, "str"),
            TypeSpec::Json => write!(f, "json"),
            TypeSpec::List => write!(f, "list"),
            TypeSpec::TypedList(element) => write!(f, "list<{element}>"),
            TypeSpec::Custom(_) => write!(f, "custom"),
        }
    }
}

/// Holds everything registered about option names: declared types,
/// aliases, defaults and the required set. Keys are canonical at rest;
/// registering an alias re-keys the tables so they stay that way.
#[derive(Debug, Default)]
pub struct Registry {
    types: HashMap<String, TypeSpec>,
    defaults: HashMap<String, Value>,
    aliases: HashMap<String, String>,
    requireds: BTreeSet<String>,
}

impl Registry {
    /// Chase the alias table to a fixed point, then normalize hyphens to
    /// underscores. Revisiting a name during one resolution is a cycle.
    pub fn resolve(&self, name: &str) -> Result<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut current = name;

        while let Some(target) = self.aliases.get(current) {
            if !seen.insert(current) {
                return Err(Error::AliasCycle(name.to_owned()));
            }
            current = target;
        }

        Ok(current.replace('-', "_"))
    }

    /// Register an alias. Re-registering the identical pair is a no-op;
    /// a different target for an already-aliased name is an error.
    pub fn add_alias(&mut self, name: &str, target: &str) -> Result<()> {
        if let Some(existing) = self.aliases.get(name) {
            if existing == target {
                return Ok(());
            }
            return Err(Error::AlreadyAliased {
                name: name.to_owned(),
                target: existing.clone(),
            });
        }

        self.aliases.insert(name.to_owned(), target.to_owned());
        self.rekey()
    }

    /// Declare an option's type. Strict mode rejects a conflicting
    /// re-declaration; otherwise the later one wins.
    pub fn set_type(&mut self, name: &str, spec: TypeSpec, strict: bool) -> Result<()> {
        let key = self.resolve(name)?;

        if strict {
            if let Some(existing) = self.types.get(&key) {
                if *existing != spec {
                    return Err(Error::TypeConflict {
                        name: key,
                        existing: existing.to_string(),
                    });
                }
            }
        }

        self.types.insert(key, spec);
        Ok(())
    }

    /// Store an unconditional fallback value for an option.
    pub fn set_default(&mut self, name: &str, value: Value) -> Result<()> {
        let key = self.resolve(name)?;
        self.defaults.insert(key, value);
        Ok(())
    }

    /// Mark an option as required; validated at the end of every scan.
    pub fn add_requirement(&mut self, name: &str) -> Result<()> {
        let key = self.resolve(name)?;
        self.requireds.insert(key);
        Ok(())
    }

    /// Declared type for a canonical name.
    pub fn type_of(&self, key: &str) -> Option<TypeSpec> {
        self.types.get(key).copied()
    }

    /// Registered default for a canonical name.
    pub fn default_of(&self, key: &str) -> Option<&Value> {
        self.defaults.get(key)
    }

    /// Whether the canonical name accumulates values.
    pub fn is_list(&self, key: &str) -> bool {
        matches!(self.type_of(key), Some(TypeSpec::List | TypeSpec::TypedList(_)))
    }

    /// Required names not present among the parsed option keys, sorted.
    pub fn missing_requireds(&self, options: &HashMap<String, Value>) -> Vec<String> {
        self.requireds
            .iter()
            .filter(|key| !options.contains_key(*key))
            .cloned()
            .collect()
    }

    // Re-resolve every table key after an alias lands. On a collision the
    // re-keyed entry wins, same as a non-strict overwrite.
    fn rekey(&mut self) -> Result<()> {
        let mut types = HashMap::with_capacity(self.types.len());
        for (key, spec) in &self.types {
            types.insert(self.resolve(key)?, *spec);
        }

        let mut defaults = HashMap::with_capacity(self.defaults.len());
        for (key, value) in &self.defaults {
            defaults.insert(self.resolve(key)?, value.clone());
        }

        let mut requireds = BTreeSet::new();
        for key in &self.requireds {
            requireds.insert(self.resolve(key)?);
        }

        self.types = types;
        self.defaults = defaults;
        self.requireds = requireds;
        Ok(())
    }
}
