//! Errors reported by the argument engine.

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Defines the possible errors that may occur while registering option
/// metadata or scanning the argument vector.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The token holds more than one `=`, or an empty name before one.
    #[error("bad parse on option `{0}`")]
    MalformedOption(String),

    /// Alias resolution visited the same name twice.
    #[error("cycle detected in aliases while resolving `{0}`")]
    AliasCycle(String),

    /// The name already maps to a different alias target.
    #[error("`{name}` has already been assigned alias `{target}`")]
    AlreadyAliased {
        /// Name the caller tried to alias.
        name: String,
        /// Target registered for it earlier.
        target: String,
    },

    /// The name is part of the engine's own accessor surface.
    #[error("`{0}` cannot be used as an alias")]
    ReservedAlias(String),

    /// A strict-mode re-declaration changed an option's type.
    #[error("`{name}` has already been assigned type {existing}")]
    TypeConflict {
        /// Canonical option name.
        name: String,
        /// Type registered for it earlier.
        existing: String,
    },

    /// A structured value failed to decode.
    #[error("failed to decode `{value}` for option `{name}`: {message}")]
    Decode {
        /// Canonical option name.
        name: String,
        /// Raw value as written on the command line.
        value: String,
        /// Decoder diagnostic.
        message: String,
    },

    /// A raw value could not be converted to the declared type.
    #[error("failed to parse `{value}` for option `{name}` as {ty}")]
    Coercion {
        /// Canonical option name.
        name: String,
        /// Raw value as written on the command line.
        value: String,
        /// Name of the attempted type.
        ty: String,
    },

    /// One or more required options never appeared in the input.
    #[error("required options [{}] were missing", .0.join(", "))]
    MissingRequired(Vec<String>),

    /// Strict-mode read of an absent option with no declared type and no
    /// default.
    #[error("no value for option `{0}` and no default is set")]
    MissingAttribute(String),
}
