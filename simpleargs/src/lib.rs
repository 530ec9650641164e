//! simpleargs, a permissive registry-driven command-line argument parser.
//!
//! Raw tokens go in, a typed option set and an ordered positional list
//! come out. Options need no up-front declaration: values auto-detect as
//! booleans, integers, floats or strings, and callers can refine the
//! picture afterwards with switches, lists, typed lists, JSON options,
//! aliases, defaults and requirements. Every registration re-runs the
//! scan, so reads always reflect everything declared so far.
#![deny(missing_docs)]

pub use simpleargs_parser as parser;

pub use parser::{Args, ElementType, TypeSpec, Value};

/// Defines the possible errors that may occur during usage of the crate.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An error comes from registering option metadata or scanning the
    /// argument vector.
    #[error(transparent)]
    Parser(#[from] parser::Error),
}

#[cfg(test)]
mod tests {
    use googletest::prelude::{assert_that, eq};

    use crate as simpleargs;

    #[test]
    fn it_should_split_options_from_positionals() {
        let args = simpleargs::Args::try_parse(&["prog", "--foo", "bar", "-a=b", "baz", "qux"])
            .unwrap();

        assert_that!(
            args.get("foo").unwrap(),
            eq(&Some(simpleargs::Value::Str("bar".into())))
        );
        assert_that!(
            args.get("a").unwrap(),
            eq(&Some(simpleargs::Value::Str("b".into())))
        );
        assert_that!(args.len(), eq(2));
        assert_that!(args.positional(0), eq(Some("baz")));
        assert_that!(args.positional(1), eq(Some("qux")));
    }

    #[test]
    fn it_should_read_equivalent_spellings_identically() {
        for argv in [
            &["prog", "--foo=bar"][..],
            &["prog", "-foo=bar"][..],
            &["prog", "--foo", "bar"][..],
        ] {
            let args = simpleargs::Args::try_parse(argv).unwrap();

            assert_that!(
                args.get("foo").unwrap(),
                eq(&Some(simpleargs::Value::Str("bar".into())))
            );
        }
    }

    #[test]
    fn it_should_accumulate_declared_lists() {
        let mut args = simpleargs::Args::try_parse(&["prog", "--nums", "4", "5", "6"]).unwrap();
        args.add_list(&["nums"]).unwrap();

        assert_that!(
            args.get("nums").unwrap(),
            eq(&Some(simpleargs::Value::List(vec![
                simpleargs::Value::Int(4),
                simpleargs::Value::Int(5),
                simpleargs::Value::Int(6),
            ])))
        );
    }

    #[test]
    fn it_should_decode_json_options() {
        let mut args =
            simpleargs::Args::try_parse(&["prog", "--info", r#"{"foo": "bar"}"#]).unwrap();
        args.set_type("info", simpleargs::TypeSpec::Json).unwrap();

        assert_that!(
            args.get("info").unwrap(),
            eq(&Some(simpleargs::Value::Json(serde_json::json!({"foo": "bar"}))))
        );
    }

    #[test]
    fn it_should_wrap_parser_errors() {
        let err = simpleargs::Args::try_parse(&["prog", "--a=b=c"]).unwrap_err();
        let wrapped = simpleargs::Error::from(err);

        assert_that!(wrapped.to_string().contains("bad parse"), eq(true));
    }
}
