//! The default provider: built-in function table, variable store, RNG.
//!
//! Built-ins dispatch directly on the [`Builtin`] enum; caller-registered
//! functions are boxed closures. The table maps case-sensitive names to
//! these tagged handlers, so unknown names are a deterministic
//! [`FunctionError::Unknown`] rather than a reflection miss. `if` is an
//! ordinary entry like any other.

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;

use super::store::{MemoryStore, VariableStore};
use super::FunctionProvider;
use crate::error::FunctionError;

/// Built-in functions, dispatched directly by variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Builtin {
    Get,
    Set,
    Eq,
    Gt,
    Lt,
    Gte,
    Lte,
    Len,
    If,
    Math,
    Rand,
    Join,
    Unicode,
    Fallback,
}

impl Builtin {
    pub const ALL: [Builtin; 14] = [
        Builtin::Get,
        Builtin::Set,
        Builtin::Eq,
        Builtin::Gt,
        Builtin::Lt,
        Builtin::Gte,
        Builtin::Lte,
        Builtin::Len,
        Builtin::If,
        Builtin::Math,
        Builtin::Rand,
        Builtin::Join,
        Builtin::Unicode,
        Builtin::Fallback,
    ];

    /// Table name of this built-in.
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Get => "get",
            Builtin::Set => "set",
            Builtin::Eq => "eq",
            Builtin::Gt => "gt",
            Builtin::Lt => "lt",
            Builtin::Gte => "gte",
            Builtin::Lte => "lte",
            Builtin::Len => "len",
            Builtin::If => "if",
            Builtin::Math => "math",
            Builtin::Rand => "rand",
            Builtin::Join => "join",
            Builtin::Unicode => "unicode",
            Builtin::Fallback => "fallback",
        }
    }
}

/// A named handler in the function table.
pub enum Handler {
    /// An engine built-in.
    Builtin(Builtin),
    /// A caller-registered function.
    Custom(Box<dyn FnMut(&[String]) -> Result<String, FunctionError>>),
}

/// The standard provider.
///
/// Generic over the RNG so tests and embedders can seed `rand`
/// deterministically; the store is a trait object so embedders can swap
/// in durable, per-tag storage.
pub struct DefaultProvider<R = StdRng> {
    functions: FxHashMap<String, Handler>,
    store: Box<dyn VariableStore>,
    rng: R,
    fallback: Option<String>,
}

impl DefaultProvider<StdRng> {
    /// Provider with an entropy-seeded RNG and in-memory store.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Provider with a deterministic RNG, for reproducible renders.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for DefaultProvider<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> DefaultProvider<R> {
    /// Provider with a caller-supplied RNG.
    pub fn with_rng(rng: R) -> Self {
        let mut functions = FxHashMap::default();
        for builtin in Builtin::ALL {
            functions.insert(builtin.name().to_string(), Handler::Builtin(builtin));
        }
        DefaultProvider {
            functions,
            store: Box::new(MemoryStore::new()),
            rng,
            fallback: None,
        }
    }

    /// Replace the variable store.
    #[must_use]
    pub fn with_store(mut self, store: Box<dyn VariableStore>) -> Self {
        self.store = store;
        self
    }

    /// Register (or override) a named function.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: FnMut(&[String]) -> Result<String, FunctionError> + 'static,
    {
        self.functions
            .insert(name.into(), Handler::Custom(Box::new(handler)));
    }

    /// Direct access to the variable store.
    pub fn store_mut(&mut self) -> &mut dyn VariableStore {
        self.store.as_mut()
    }

    fn call_builtin(&mut self, builtin: Builtin, args: &[String]) -> Result<String, FunctionError> {
        match builtin {
            Builtin::Get => self.get(args),
            Builtin::Set => self.set(args),
            Builtin::Eq => compare(builtin, args, |o| o == Ordering::Equal),
            Builtin::Gt => compare(builtin, args, |o| o == Ordering::Greater),
            Builtin::Lt => compare(builtin, args, |o| o == Ordering::Less),
            Builtin::Gte => compare(builtin, args, |o| o != Ordering::Less),
            Builtin::Lte => compare(builtin, args, |o| o != Ordering::Greater),
            Builtin::Len => len(args),
            Builtin::If => cond(args),
            Builtin::Math => math(args),
            Builtin::Rand => self.rand(args),
            Builtin::Join => join(args),
            Builtin::Unicode => unicode(args),
            Builtin::Fallback => self.set_fallback(args),
        }
    }

    /// `[get: key]` / `[get: key, default]` — a missing key renders the
    /// default (empty when omitted), never an error.
    fn get(&self, args: &[String]) -> Result<String, FunctionError> {
        match args {
            [key] => Ok(self.store.get(key).unwrap_or_default()),
            [key, default] => Ok(self.store.get(key).unwrap_or_else(|| default.clone())),
            _ => Err(arity("get", "1 or 2", args.len())),
        }
    }

    /// `[set: key, value]` — renders empty.
    fn set(&mut self, args: &[String]) -> Result<String, FunctionError> {
        match args {
            [key, value] => {
                self.store.set(key, value);
                Ok(String::new())
            }
            _ => Err(arity("set", "2", args.len())),
        }
    }

    /// `[rand: a, b, ...]` — uniform pick among the arguments.
    fn rand(&mut self, args: &[String]) -> Result<String, FunctionError> {
        match args.choose(&mut self.rng) {
            Some(choice) => Ok(choice.clone()),
            None => Err(arity("rand", "at least 1", 0)),
        }
    }

    /// `[fallback: text]` — stores the error-substitution text; an empty
    /// call clears it. Renders empty.
    fn set_fallback(&mut self, args: &[String]) -> Result<String, FunctionError> {
        match args {
            [] => {
                self.fallback = None;
                Ok(String::new())
            }
            [text] => {
                self.fallback = Some(text.clone());
                Ok(String::new())
            }
            _ => Err(arity("fallback", "0 or 1", args.len())),
        }
    }
}

impl<R: Rng> FunctionProvider for DefaultProvider<R> {
    fn invoke(&mut self, name: &str, args: &[String]) -> Result<String, FunctionError> {
        let builtin = match self.functions.get_mut(name) {
            None => return Err(FunctionError::Unknown(name.to_string())),
            Some(Handler::Custom(f)) => return f(args),
            Some(Handler::Builtin(builtin)) => *builtin,
        };
        self.call_builtin(builtin, args)
    }

    fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }
}

fn arity(name: &'static str, expected: &'static str, found: usize) -> FunctionError {
    FunctionError::WrongArity {
        name,
        expected,
        found,
    }
}

fn compare(
    builtin: Builtin,
    args: &[String],
    accept: fn(Ordering) -> bool,
) -> Result<String, FunctionError> {
    match args {
        [a, b] => Ok(bool_text(accept(ordering(a, b)))),
        _ => Err(arity(builtin.name(), "2", args.len())),
    }
}

/// Numeric comparison when both sides parse as numbers, lexicographic
/// otherwise.
fn ordering(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or_else(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

fn bool_text(value: bool) -> String {
    if value { "true" } else { "false" }.to_string()
}

/// `[len: value]` — number of Unicode scalar values.
fn len(args: &[String]) -> Result<String, FunctionError> {
    match args {
        [value] => Ok(value.chars().count().to_string()),
        _ => Err(arity("len", "1", args.len())),
    }
}

/// `[if: condition, then]` / `[if: condition, then, else]`.
fn cond(args: &[String]) -> Result<String, FunctionError> {
    match args {
        [condition, then] => Ok(if truthy(condition) {
            then.clone()
        } else {
            String::new()
        }),
        [condition, then, otherwise] => Ok(if truthy(condition) {
            then.clone()
        } else {
            otherwise.clone()
        }),
        _ => Err(arity("if", "2 or 3", args.len())),
    }
}

/// A condition is false when empty, `false`, or `0` (ASCII
/// case-insensitive); anything else is true.
fn truthy(value: &str) -> bool {
    !(value.is_empty() || value.eq_ignore_ascii_case("false") || value == "0")
}

/// `[math: expression]` — the tag lexer split the expression on commas,
/// so the fragments are rejoined before parsing.
fn math(args: &[String]) -> Result<String, FunctionError> {
    if args.is_empty() {
        return Err(arity("math", "at least 1", 0));
    }
    let source = args.join(",");
    let value = brack_math::eval_str(&source)?;
    Ok(value.to_string())
}

/// `[join: a, b, ...]` — concatenation in order.
fn join(args: &[String]) -> Result<String, FunctionError> {
    Ok(args.concat())
}

/// `[unicode: name]` — character by Unicode name.
fn unicode(args: &[String]) -> Result<String, FunctionError> {
    match args {
        [name] => match unicode_names2::character(&name.to_uppercase()) {
            Some(ch) => Ok(ch.to_string()),
            None => Err(FunctionError::Message(format!(
                "no unicode character named `{name}`"
            ))),
        },
        _ => Err(arity("unicode", "1", args.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn provider() -> DefaultProvider {
        DefaultProvider::seeded(42)
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn get_returns_default_for_missing_key() {
        let mut p = provider();
        assert_eq!(p.invoke("get", &args(&["score", "0"])), Ok("0".to_string()));
        assert_eq!(p.invoke("get", &args(&["score"])), Ok(String::new()));
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut p = provider();
        assert_eq!(p.invoke("set", &args(&["score", "42"])), Ok(String::new()));
        assert_eq!(p.invoke("get", &args(&["score", "0"])), Ok("42".to_string()));
    }

    #[test]
    fn comparisons_prefer_numeric_order() {
        let mut p = provider();
        // Lexicographically "10" < "9"; numerically it is greater.
        assert_eq!(p.invoke("gt", &args(&["10", "9"])), Ok("true".to_string()));
        assert_eq!(p.invoke("lt", &args(&["abc", "abd"])), Ok("true".to_string()));
        assert_eq!(p.invoke("eq", &args(&["1.0", "1"])), Ok("true".to_string()));
        assert_eq!(p.invoke("gte", &args(&["2", "2"])), Ok("true".to_string()));
        assert_eq!(p.invoke("lte", &args(&["3", "2"])), Ok("false".to_string()));
    }

    #[test]
    fn if_is_an_ordinary_table_entry() {
        let mut p = provider();
        assert_eq!(
            p.invoke("if", &args(&["true", "yes", "no"])),
            Ok("yes".to_string())
        );
        assert_eq!(
            p.invoke("if", &args(&["0", "yes", "no"])),
            Ok("no".to_string())
        );
        // Missing else defaults to empty.
        assert_eq!(p.invoke("if", &args(&["false", "yes"])), Ok(String::new()));
    }

    #[test]
    fn truthiness_table() {
        assert!(truthy("yes"));
        assert!(truthy("1"));
        assert!(!truthy(""));
        assert!(!truthy("0"));
        assert!(!truthy("false"));
        assert!(!truthy("FALSE"));
    }

    #[test]
    fn len_counts_chars_not_bytes() {
        let mut p = provider();
        assert_eq!(p.invoke("len", &args(&["héllo"])), Ok("5".to_string()));
    }

    #[test]
    fn join_concatenates_in_order() {
        let mut p = provider();
        assert_eq!(
            p.invoke("join", &args(&["a", "b", "c"])),
            Ok("abc".to_string())
        );
    }

    #[test]
    fn math_rejoins_comma_split_fragments() {
        let mut p = provider();
        assert_eq!(
            p.invoke("math", &args(&["gcd(8", "12)"])),
            Ok("4".to_string())
        );
    }

    #[test]
    fn rand_picks_only_from_choices() {
        let mut p = provider();
        let choices = args(&["Bob", "Sue"]);
        for _ in 0..32 {
            let pick = p.invoke("rand", &choices).map_err(|e| e.to_string());
            let pick = pick.as_deref();
            assert!(pick == Ok("Bob") || pick == Ok("Sue"), "got {pick:?}");
        }
    }

    #[test]
    fn rand_without_choices_is_an_arity_error() {
        let mut p = provider();
        assert_eq!(
            p.invoke("rand", &[]),
            Err(FunctionError::WrongArity {
                name: "rand",
                expected: "at least 1",
                found: 0,
            })
        );
    }

    #[test]
    fn unknown_function_is_reported() {
        let mut p = provider();
        assert_eq!(
            p.invoke("doesnotexist", &args(&["1"])),
            Err(FunctionError::Unknown("doesnotexist".to_string()))
        );
    }

    #[test]
    fn registered_function_overrides_and_extends() {
        let mut p = provider();
        p.register("shout", |args: &[String]| Ok(args.concat().to_uppercase()));
        assert_eq!(p.invoke("shout", &args(&["hey"])), Ok("HEY".to_string()));
        // Overriding a built-in name wins over the built-in.
        p.register("len", |_: &[String]| Ok("n/a".to_string()));
        assert_eq!(p.invoke("len", &args(&["abc"])), Ok("n/a".to_string()));
    }

    #[test]
    fn fallback_set_and_clear() {
        let mut p = provider();
        assert_eq!(p.fallback(), None);
        assert_eq!(p.invoke("fallback", &args(&["oops"])), Ok(String::new()));
        assert_eq!(p.fallback(), Some("oops"));
        assert_eq!(p.invoke("fallback", &[]), Ok(String::new()));
        assert_eq!(p.fallback(), None);
    }

    #[test]
    fn unicode_lookup_by_name() {
        let mut p = provider();
        assert_eq!(
            p.invoke("unicode", &args(&["latin small letter a"])),
            Ok("a".to_string())
        );
        assert!(p.invoke("unicode", &args(&["not a real name"])).is_err());
    }
}
