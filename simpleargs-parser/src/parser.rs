//! The argument engine: a single-pass scan over the raw argument vector,
//! re-run after every registration so the parsed state never lags the
//! registries.

use std::collections::HashMap;
use std::fmt;
use std::iter;
use std::slice;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::lexer::{Token, Tokens};
use crate::registry::{ElementType, Registry, TypeSpec};
use crate::value;
use crate::value::Value;

// Names that form the engine's own read surface; aliasing one would
// shadow it.
const RESERVED: &[&str] = &[
    "add_alias",
    "add_list",
    "add_requirement",
    "add_switch",
    "add_typed_list",
    "called_with",
    "get",
    "is_empty",
    "len",
    "positional",
    "positionals",
    "set_default",
    "set_type",
    "toggle_auto_parse",
];

/// Defines the parsed view of one argument vector: named, typed options
/// plus the positional arguments, with a registration surface that
/// shapes how tokens are interpreted.
///
/// The vector is borrowed, never copied. Index 0 is the invocation name;
/// everything after it is scanned. Every registration call mutates a
/// registry and immediately re-executes the full scan, so reads always
/// observe a state consistent with every declaration made so far.
#[derive(Debug)]
pub struct Args<'a> {
    argv: &'a [&'a str],
    called_with: &'a str,
    strict: bool,
    auto_parse: bool,
    registry: Registry,
    options: HashMap<String, Value>,
    positionals: Vec<&'a str>,
}

impl<'a> Args<'a> {
    /// Parse an argument vector permissively: absent options degrade to
    /// empty values and type re-declarations overwrite.
    pub fn try_parse(argv: &'a [&'a str]) -> Result<Self> {
        Self::new(argv, false)
    }

    /// Parse an argument vector in strict mode: type re-declarations and
    /// absent-without-default reads fail instead.
    pub fn try_parse_strict(argv: &'a [&'a str]) -> Result<Self> {
        Self::new(argv, true)
    }

    fn new(argv: &'a [&'a str], strict: bool) -> Result<Self> {
        let mut args = Args {
            argv,
            called_with: argv.first().copied().unwrap_or_default(),
            strict,
            auto_parse: true,
            registry: Registry::default(),
            options: HashMap::new(),
            positionals: Vec::new(),
        };

        args.rescan()?;
        Ok(args)
    }

    /// Make two option names equivalent, e.g. `-f` and `--force`.
    pub fn add_alias(&mut self, name: &str, target: &str) -> Result<()> {
        if RESERVED.contains(&name) {
            return Err(Error::ReservedAlias(name.to_owned()));
        }

        debug!("alias {name} -> {target}");
        self.registry.add_alias(name, target)?;
        self.rescan()
    }

    /// Declare names as boolean switches: presence alone sets them true.
    pub fn add_switch(&mut self, names: &[&str]) -> Result<()> {
        for name in names {
            self.registry.set_type(name, TypeSpec::Bool, self.strict)?;
        }
        self.rescan()
    }

    /// Declare names as lists: every value token up to the next flag
    /// accumulates, and a re-occurrence of the flag appends.
    pub fn add_list(&mut self, names: &[&str]) -> Result<()> {
        for name in names {
            self.registry.set_type(name, TypeSpec::List, self.strict)?;
        }
        self.rescan()
    }

    /// Declare a name as a list whose elements coerce to one type.
    pub fn add_typed_list(&mut self, name: &str, element: ElementType) -> Result<()> {
        self.registry.set_type(name, TypeSpec::TypedList(element), self.strict)?;
        self.rescan()
    }

    /// Declare the expected type of an option.
    pub fn set_type(&mut self, name: &str, spec: TypeSpec) -> Result<()> {
        self.registry.set_type(name, spec, self.strict)?;
        self.rescan()
    }

    /// Register a fallback value for an option absent from the input.
    pub fn set_default(&mut self, name: &str, default: impl Into<Value>) -> Result<()> {
        self.registry.set_default(name, default.into())?;
        self.rescan()
    }

    /// Require an option to appear in the input. Validated at the end of
    /// every scan; all missing names are reported together.
    pub fn add_requirement(&mut self, name: &str) -> Result<()> {
        self.registry.add_requirement(name)?;
        self.rescan()
    }

    /// Flip the automatic detection of booleans and numbers for untyped
    /// options.
    pub fn toggle_auto_parse(&mut self) -> Result<()> {
        self.auto_parse = !self.auto_parse;
        self.rescan()
    }

    /// Look up an option by any of its spellings.
    ///
    /// Present options return their coerced value. Absent ones fall back
    /// to the type-appropriate empty (`false`, `""`, `[]`, `0`), then to
    /// the registered default. With nothing left to fall back on, strict
    /// mode fails and permissive mode returns `None`.
    pub fn get(&self, name: &str) -> Result<Option<Value>> {
        let key = self.registry.resolve(name)?;

        if let Some(value) = self.options.get(&key) {
            return Ok(Some(value.clone()));
        }

        match self.registry.type_of(&key) {
            Some(TypeSpec::Bool) => Ok(Some(Value::Bool(false))),
            Some(TypeSpec::Str) => Ok(Some(Value::Str(String::new()))),
            Some(TypeSpec::List | TypeSpec::TypedList(_)) => Ok(Some(Value::List(Vec::new()))),
            Some(TypeSpec::Int) => Ok(Some(Value::Int(0))),
            _ => match self.registry.default_of(&key) {
                Some(default) => Ok(Some(default.clone())),
                None if self.strict => Err(Error::MissingAttribute(key)),
                None => Ok(None),
            },
        }
    }

    /// Positional argument at `index`, or `None` past the end.
    pub fn positional(&self, index: usize) -> Option<&'a str> {
        self.positionals.get(index).copied()
    }

    /// Iterate the positional arguments in input order. Each call starts
    /// over from the first.
    pub fn positionals(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.positionals.iter().copied()
    }

    /// Number of positional arguments (options do not count).
    pub fn len(&self) -> usize {
        self.positionals.len()
    }

    /// Whether no positional arguments were found.
    pub fn is_empty(&self) -> bool {
        self.positionals.is_empty()
    }

    /// The invocation name the program was called with, or `""` for an
    /// empty vector.
    pub fn called_with(&self) -> &'a str {
        self.called_with
    }

    // Walk the token stream once, rebuilding the option and positional
    // containers from scratch. `active` holds the canonical name of a
    // flag still awaiting its value.
    fn rescan(&mut self) -> Result<()> {
        self.options.clear();
        self.positionals.clear();

        let mut active: Option<String> = None;

        for token in Tokens::new(self.argv.get(1..).unwrap_or_default()) {
            match token? {
                Token::Assign(name, raw) => {
                    self.finish_pending(active.take());

                    let key = self.registry.resolve(name)?;
                    let value = self.coerce(&key, raw)?;
                    self.options.insert(key, value);
                }
                Token::Flag(name) => {
                    // A pending non-list option followed by another flag
                    // becomes a switch on the spot.
                    self.finish_pending(active.take());

                    let key = self.registry.resolve(name)?;
                    if self.registry.type_of(&key) == Some(TypeSpec::Bool) {
                        self.options.insert(key, Value::Bool(true));
                    } else {
                        active = Some(key);
                    }
                }
                Token::Value(raw) => match active.take() {
                    Some(key) => {
                        let value = self.coerce(&key, raw)?;
                        if self.registry.is_list(&key) {
                            self.accumulate(&key, value);
                            // Lists keep consuming until the next flag.
                            active = Some(key);
                        } else {
                            self.options.insert(key, value);
                        }
                    }
                    None => self.positionals.push(raw),
                },
            }
        }

        self.finish_pending(active);

        let missing = self.registry.missing_requireds(&self.options);
        if !missing.is_empty() {
            return Err(Error::MissingRequired(missing));
        }

        trace!(
            "scanned {} option(s) and {} positional(s)",
            self.options.len(),
            self.positionals.len()
        );
        Ok(())
    }

    // An option named with no following value is a switch, unless it is
    // a list (already stored incrementally, possibly empty).
    fn finish_pending(&mut self, pending: Option<String>) {
        if let Some(key) = pending {
            if !self.registry.is_list(&key) {
                self.options.insert(key, Value::Bool(true));
            }
        }
    }

    fn coerce(&self, key: &str, raw: &str) -> Result<Value> {
        match self.registry.type_of(key) {
            Some(spec) => value::coerce(key, raw, spec, self.auto_parse),
            None => Ok(value::auto(raw, self.auto_parse)),
        }
    }

    // Coerced list values arrive as one-element lists; later elements
    // extend the stored one.
    fn accumulate(&mut self, key: &str, value: Value) {
        match self.options.get_mut(key) {
            Some(Value::List(items)) => {
                if let Value::List(mut more) = value {
                    items.append(&mut more);
                }
            }
            _ => {
                self.options.insert(key.to_owned(), value);
            }
        }
    }
}

impl fmt::Display for Args<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Args(called with: {}, arguments: {:?}, options: {:?})",
            self.called_with, self.positionals, self.options
        )
    }
}

impl<'s, 'a> IntoIterator for &'s Args<'a> {
    type Item = &'a str;
    type IntoIter = iter::Copied<slice::Iter<'s, &'a str>>;

    fn into_iter(self) -> Self::IntoIter {
        self.positionals.iter().copied()
    }
}
