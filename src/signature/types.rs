//! Type expressions and parameter lists.
//!
//! Types are kept as a small tree rather than raw text so that two documents
//! that differ only in whitespace or redundant parentheses render to the same
//! canonical string. The tree is otherwise taken literally: member order of
//! unions and intersections is preserved.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A parsed type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// Class, interface, alias, type variable or base type, with optional
    /// type arguments (`Hash[Symbol, untyped]`, `bool`, `T`).
    Named { name: String, args: Vec<TypeExpr> },
    /// String, symbol or integer literal, kept as written.
    Literal(String),
    /// `singleton(Foo)`
    Singleton(String),
    Union(Vec<TypeExpr>),
    Intersection(Vec<TypeExpr>),
    /// `T?`
    Optional(Box<TypeExpr>),
    Tuple(Vec<TypeExpr>),
    Record(Vec<RecordField>),
    /// `^(params) { block } -> R`
    Proc(Box<ProcType>),
}

impl TypeExpr {
    /// Shorthand for a named type without arguments.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Build a union, splicing nested unions so `(A | B) | C` and
    /// `A | (B | C)` share one shape.
    pub fn union(members: Vec<TypeExpr>) -> Self {
        Self::flatten(members, |ty| match ty {
            TypeExpr::Union(inner) => Ok(inner),
            other => Err(other),
        })
        .map_or_else(|single| single, TypeExpr::Union)
    }

    /// Build an intersection, splicing nested intersections.
    pub fn intersection(members: Vec<TypeExpr>) -> Self {
        Self::flatten(members, |ty| match ty {
            TypeExpr::Intersection(inner) => Ok(inner),
            other => Err(other),
        })
        .map_or_else(|single| single, TypeExpr::Intersection)
    }

    /// Returns `Err(member)` when only one member remains.
    fn flatten(
        members: Vec<TypeExpr>,
        split: impl Fn(TypeExpr) -> Result<Vec<TypeExpr>, TypeExpr>,
    ) -> Result<Vec<TypeExpr>, TypeExpr> {
        let mut flat = Vec::with_capacity(members.len());
        for member in members {
            match split(member) {
                Ok(inner) => flat.extend(inner),
                Err(other) => flat.push(other),
            }
        }
        if flat.len() == 1 {
            Err(flat.remove(0))
        } else {
            Ok(flat)
        }
    }

    /// Whether this type must be parenthesized when it appears as an
    /// operand of `|`, `&`, `?` or as a method return type.
    fn is_compound(&self) -> bool {
        matches!(
            self,
            TypeExpr::Union(_) | TypeExpr::Intersection(_) | TypeExpr::Proc(_)
        )
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("[")?;
                    write_joined(f, args, ", ")?;
                    f.write_str("]")?;
                }
                Ok(())
            }
            TypeExpr::Literal(text) => f.write_str(text),
            TypeExpr::Singleton(name) => write!(f, "singleton({name})"),
            TypeExpr::Union(members) => write_operands(f, members, " | ", |m| {
                matches!(m, TypeExpr::Union(_) | TypeExpr::Proc(_))
            }),
            TypeExpr::Intersection(members) => write_operands(f, members, " & ", |m| {
                m.is_compound()
            }),
            TypeExpr::Optional(inner) => {
                if inner.is_compound() {
                    write!(f, "({inner})?")
                } else {
                    write!(f, "{inner}?")
                }
            }
            TypeExpr::Tuple(members) => {
                f.write_str("[")?;
                write_joined(f, members, ", ")?;
                f.write_str("]")
            }
            TypeExpr::Record(fields) => {
                if fields.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                write_joined(f, fields, ", ")?;
                f.write_str(" }")
            }
            TypeExpr::Proc(proc_type) => write!(f, "{proc_type}"),
        }
    }
}

impl Serialize for TypeExpr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    separator: &str,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_operands(
    f: &mut fmt::Formatter<'_>,
    members: &[TypeExpr],
    separator: &str,
    needs_parens: impl Fn(&TypeExpr) -> bool,
) -> fmt::Result {
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        if needs_parens(member) {
            write!(f, "({member})")?;
        } else {
            write!(f, "{member}")?;
        }
    }
    Ok(())
}

/// Renders a type in return position, where unions and intersections are
/// always parenthesized.
#[derive(Debug, Clone, Copy)]
pub struct ReturnType<'a>(pub &'a TypeExpr);

impl fmt::Display for ReturnType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_compound() {
            write!(f, "({})", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKey {
    /// `name: T`
    Symbol(String),
    /// `"name" => T`, `:sym => T`, `1 => T`
    Literal(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordField {
    pub key: RecordKey,
    pub optional: bool,
    pub ty: TypeExpr,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            f.write_str("?")?;
        }
        match &self.key {
            RecordKey::Symbol(name) => write!(f, "{name}: {}", self.ty),
            RecordKey::Literal(literal) => write!(f, "{literal} => {}", self.ty),
        }
    }
}

/// `^(params) ?{ block } [self: T] -> R`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProcType {
    pub params: ParameterSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<Block>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_type: Option<TypeExpr>,
    pub return_type: TypeExpr,
}

impl fmt::Display for ProcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "^{}", self.params)?;
        if let Some(block) = &self.block {
            write!(f, " {block}")?;
        }
        if let Some(self_type) = &self.self_type {
            write!(f, " [self: {self_type}]")?;
        }
        write!(f, " -> {}", ReturnType(&self.return_type))
    }
}

/// Block accepted by a method or proc.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Block {
    pub required: bool,
    pub params: ParameterSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_type: Option<TypeExpr>,
    pub return_type: TypeExpr,
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.required {
            f.write_str("?")?;
        }
        write!(f, "{{ {}", self.params)?;
        if let Some(self_type) = &self.self_type {
            write!(f, " [self: {self_type}]")?;
        }
        write!(f, " -> {} }}", ReturnType(&self.return_type))
    }
}

/// One parameter slot entry. `name` is the variable name, which only
/// matters for comparison when parameter names are strict.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Param {
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Param {
    pub fn new(ty: TypeExpr) -> Self {
        Self { ty, name: None }
    }

    pub fn named(ty: TypeExpr, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: Some(name.into()),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} {name}", self.ty),
            None => write!(f, "{}", self.ty),
        }
    }
}

/// Parameters of a method, block or proc.
///
/// Keyword maps are ordered by key so that keyword order in the source never
/// affects equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ParameterSet {
    pub required_positionals: Vec<Param>,
    pub optional_positionals: Vec<Param>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_positional: Option<Param>,
    pub trailing_positionals: Vec<Param>,
    pub required_keywords: BTreeMap<String, Param>,
    pub optional_keywords: BTreeMap<String, Param>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_keywords: Option<Param>,
}

impl ParameterSet {
    pub fn is_empty(&self) -> bool {
        self.required_positionals.is_empty()
            && self.optional_positionals.is_empty()
            && self.rest_positional.is_none()
            && self.trailing_positionals.is_empty()
            && self.required_keywords.is_empty()
            && self.optional_keywords.is_empty()
            && self.rest_keywords.is_none()
    }

    /// Parameter list entries in display order.
    pub fn entries(&self) -> Vec<String> {
        let mut entries = Vec::new();
        entries.extend(self.required_positionals.iter().map(Param::to_string));
        entries.extend(self.optional_positionals.iter().map(|p| format!("?{p}")));
        if let Some(rest) = &self.rest_positional {
            entries.push(format!("*{rest}"));
        }
        entries.extend(self.trailing_positionals.iter().map(Param::to_string));
        entries.extend(
            self.required_keywords
                .iter()
                .map(|(key, p)| format!("{key}: {p}")),
        );
        entries.extend(
            self.optional_keywords
                .iter()
                .map(|(key, p)| format!("?{key}: {p}")),
        );
        if let Some(rest) = &self.rest_keywords {
            entries.push(format!("**{rest}"));
        }
        entries
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.entries().join(", "))
    }
}
