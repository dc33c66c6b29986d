//! Binding table: placeholder name -> enumerator

use std::collections::HashMap;
use std::path::PathBuf;

use super::{Builtin, Enumerator, EnumeratorSource};
use crate::error::{Result, WordlistError};
use crate::output::Encoding;

/// Enumerators visible to a pattern.
///
/// Always contains the built-in sets. User declarations add names; they
/// never replace an existing one.
#[derive(Debug, Clone)]
pub struct Bindings {
    enumerators: HashMap<String, Enumerator>,
}

impl Bindings {
    /// Table holding only the built-in sets
    pub fn new() -> Self {
        let enumerators = Builtin::ALL
            .into_iter()
            .map(|b| (b.name().to_string(), Enumerator::builtin(b)))
            .collect();
        Self { enumerators }
    }

    /// Add an already resolved enumerator
    pub fn declare(&mut self, enumerator: Enumerator) -> Result<()> {
        self.check_name(enumerator.name())?;
        self.enumerators.insert(enumerator.name().to_string(), enumerator);
        Ok(())
    }

    /// Resolve and add a declared source.
    ///
    /// The name is checked before the source is resolved, so a colliding
    /// wordlist declaration never touches the filesystem.
    pub fn declare_source(&mut self, name: &str, source: &EnumeratorSource, encoding: Encoding) -> Result<()> {
        self.check_name(name)?;
        let enumerator = Enumerator::resolve(name, source, encoding)?;
        self.enumerators.insert(name.to_string(), enumerator);
        Ok(())
    }

    /// Add a parsed command line declaration
    pub fn declare_decl(&mut self, decl: &BindingDecl, encoding: Encoding) -> Result<()> {
        self.declare_source(&decl.name, &decl.source, encoding)
    }

    pub fn get(&self, name: &str) -> Option<&Enumerator> {
        self.enumerators.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.enumerators.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.enumerators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enumerators.is_empty()
    }

    fn check_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(WordlistError::invalid_binding("enumerator name cannot be empty"));
        }
        if name.contains(')') || name.contains("%(") {
            return Err(WordlistError::invalid_binding(format!(
                "enumerator name '{}' cannot contain ')' or '%('",
                name
            )));
        }
        if self.contains(name) {
            return Err(WordlistError::duplicate_enumerator(name));
        }
        Ok(())
    }
}

impl Default for Bindings {
    fn default() -> Self {
        Self::new()
    }
}

/// Which command line flag a declaration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    /// `-e`: literal characters, `[x-y]`, `(A|B)` or `%(builtin)`
    Enumerator,
    /// `-w`: path to a wordlist file
    Wordlist,
}

/// A `name=value` declaration from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingDecl {
    pub name: String,
    pub source: EnumeratorSource,
}

impl BindingDecl {
    /// Parse one declaration.
    ///
    /// Accepted forms: `name=value`, `%(name)=value`, `%(name)` and bare
    /// `value`; the last two use the same text for name and value.
    pub fn parse(arg: &str, kind: DeclKind) -> Result<Self> {
        let (head, value) = match arg.split_once('=') {
            Some((head, value)) => (head, Some(value)),
            None => (arg, None),
        };

        let name = head
            .strip_prefix("%(")
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(head);
        let value = value.unwrap_or(name);

        if name.is_empty() {
            return Err(WordlistError::invalid_binding(format!("missing name in '{}'", arg)));
        }
        if value.is_empty() {
            return Err(WordlistError::invalid_binding(format!("missing value in '{}'", arg)));
        }

        let source = match kind {
            DeclKind::Wordlist => EnumeratorSource::File(PathBuf::from(value)),
            DeclKind::Enumerator => Self::enumerator_source(value),
        };

        Ok(Self {
            name: name.to_string(),
            source,
        })
    }

    fn enumerator_source(value: &str) -> EnumeratorSource {
        let alias = value
            .strip_prefix("%(")
            .and_then(|rest| rest.strip_suffix(')'))
            .and_then(Builtin::from_name);
        if let Some(builtin) = alias {
            return EnumeratorSource::Builtin(builtin);
        }

        EnumeratorSource::from_parts(value, value.starts_with('[') || value.starts_with('('), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_present() {
        let bindings = Bindings::new();
        assert_eq!(bindings.len(), 5);
        assert!(bindings.contains("digits"));
        assert!(bindings.contains("punctuation"));
    }

    #[test]
    fn test_declare_and_collide() {
        let mut bindings = Bindings::new();
        let src = EnumeratorSource::Literal("abc".to_string());
        bindings.declare_source("abc", &src, Encoding::Utf8).unwrap();
        assert_eq!(bindings.get("abc").unwrap().len(), 3);

        let err = bindings.declare_source("abc", &src, Encoding::Utf8).unwrap_err();
        assert_eq!(err, WordlistError::duplicate_enumerator("abc"));

        let err = bindings.declare_source("digits", &src, Encoding::Utf8).unwrap_err();
        assert_eq!(err, WordlistError::duplicate_enumerator("digits"));
    }

    #[test]
    fn test_collision_checked_before_file_read() {
        let mut bindings = Bindings::new();
        let src = EnumeratorSource::File(PathBuf::from("/no/such/file"));
        let err = bindings.declare_source("digits", &src, Encoding::Utf8).unwrap_err();
        assert!(matches!(err, WordlistError::DuplicateEnumerator { .. }));
    }

    #[test]
    fn test_bad_names() {
        let mut bindings = Bindings::new();
        let src = EnumeratorSource::Literal("x".to_string());
        assert!(bindings.declare_source("", &src, Encoding::Utf8).is_err());
        assert!(bindings.declare_source("a)b", &src, Encoding::Utf8).is_err());
    }

    #[test]
    fn test_parse_decl_forms() {
        let decl = BindingDecl::parse("a=123", DeclKind::Enumerator).unwrap();
        assert_eq!(decl.name, "a");
        assert_eq!(decl.source, EnumeratorSource::Literal("123".to_string()));

        let decl = BindingDecl::parse("123", DeclKind::Enumerator).unwrap();
        assert_eq!(decl.name, "123");
        assert_eq!(decl.source, EnumeratorSource::Literal("123".to_string()));

        let decl = BindingDecl::parse("%(x)=[1-3]", DeclKind::Enumerator).unwrap();
        assert_eq!(decl.name, "x");
        assert_eq!(decl.source, EnumeratorSource::Pattern("[1-3]".to_string()));

        let decl = BindingDecl::parse("w=(one|two)", DeclKind::Enumerator).unwrap();
        assert_eq!(decl.source, EnumeratorSource::Pattern("(one|two)".to_string()));

        let decl = BindingDecl::parse("num=%(digits)", DeclKind::Enumerator).unwrap();
        assert_eq!(decl.source, EnumeratorSource::Builtin(Builtin::Digits));

        let decl = BindingDecl::parse("b=test.txt", DeclKind::Wordlist).unwrap();
        assert_eq!(decl.name, "b");
        assert_eq!(decl.source, EnumeratorSource::File(PathBuf::from("test.txt")));
    }

    #[test]
    fn test_parse_decl_errors() {
        assert!(BindingDecl::parse("=abc", DeclKind::Enumerator).is_err());
        assert!(BindingDecl::parse("a=", DeclKind::Enumerator).is_err());
        assert!(BindingDecl::parse("", DeclKind::Wordlist).is_err());
    }

    #[test]
    fn test_alias_builtin_under_new_name() {
        let mut bindings = Bindings::new();
        let decl = BindingDecl::parse("num=%(digits)", DeclKind::Enumerator).unwrap();
        bindings.declare_decl(&decl, Encoding::Utf8).unwrap();
        assert_eq!(bindings.get("num").unwrap().values(), bindings.get("digits").unwrap().values());
    }
}
