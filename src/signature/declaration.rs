//! Declarations and their members.

use super::types::{Block, ParameterSet, ReturnType, TypeExpr};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Class,
    Module,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class => f.write_str("class"),
            Self::Module => f.write_str("module"),
        }
    }
}

/// A class or module definition, identified by its fully qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,
    pub members: Vec<Member>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, kind: DeclarationKind) -> Self {
        Self {
            name: name.into(),
            kind,
            members: Vec::new(),
        }
    }

    /// Append a member. A method whose key already exists gains the new
    /// overloads instead of becoming a second entry.
    pub fn push_member(&mut self, member: Member) {
        if let Member::Method(method) = member {
            let key = method.key();
            let existing = self.members.iter_mut().find_map(|m| match m {
                Member::Method(existing) if existing.key() == key => Some(existing),
                _ => None,
            });
            match existing {
                Some(existing) => {
                    existing.overloads.extend(method.overloads);
                    existing.overloading |= method.overloading;
                }
                None => self.members.push(Member::Method(method)),
            }
        } else {
            self.members.push(member);
        }
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDefinition> {
        self.members.iter().filter_map(|m| match m {
            Member::Method(method) => Some(method),
            _ => None,
        })
    }

    pub fn method(&self, key: &str) -> Option<&MethodDefinition> {
        self.methods().find(|m| m.key() == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum Member {
    Include(Include),
    Constant(Constant),
    Method(MethodDefinition),
    Attribute(Attribute),
    InstanceVariable(InstanceVariable),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MixinKind {
    Include,
    Extend,
    Prepend,
}

impl fmt::Display for MixinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Include => f.write_str("include"),
            Self::Extend => f.write_str("extend"),
            Self::Prepend => f.write_str("prepend"),
        }
    }
}

/// Mixin reference. `module` is the rendered module type, type arguments
/// included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Include {
    pub kind: MixinKind,
    pub module: TypeExpr,
}

impl fmt::Display for Include {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.module)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constant {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Reader,
    Writer,
    Accessor,
}

impl AttributeKind {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Reader => "attr_reader",
            Self::Writer => "attr_writer",
            Self::Accessor => "attr_accessor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    pub kind: AttributeKind,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.kind.keyword(), self.name, self.ty)
    }
}

/// Instance variable, class instance variable (`self.@x`) or class
/// variable (`@@x`); the prefix is part of the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceVariable {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
}

impl fmt::Display for InstanceVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    Instance,
    Singleton,
    /// `def self?.name`, a module function defined on both sides.
    SingletonInstance,
}

impl MethodKind {
    fn prefix(self) -> &'static str {
        match self {
            Self::Instance => "",
            Self::Singleton => "self.",
            Self::SingletonInstance => "self?.",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MethodDefinition {
    pub name: String,
    pub kind: MethodKind,
    pub visibility: Visibility,
    /// Source order; the first overload is tried first.
    pub overloads: Vec<Overload>,
    /// The overload list ends with `...`, extending an earlier definition.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub overloading: bool,
}

impl MethodDefinition {
    /// Name with its kind prefix: `name`, `self.name` or `self?.name`.
    /// Tells apart same-name definitions of different kinds.
    pub fn key(&self) -> String {
        format!("{}{}", self.kind.prefix(), self.name)
    }
}

impl fmt::Display for MethodDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.visibility == Visibility::Private {
            f.write_str("private ")?;
        }
        write!(f, "def {}:", self.key())?;
        for (i, overload) in self.overloads.iter().enumerate() {
            if i > 0 {
                f.write_str(" |")?;
            }
            write!(f, " {overload}")?;
        }
        if self.overloading {
            if !self.overloads.is_empty() {
                f.write_str(" |")?;
            }
            f.write_str(" ...")?;
        }
        Ok(())
    }
}

/// One callable signature of a method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Overload {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<String>,
    pub params: ParameterSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<Block>,
    pub return_type: TypeExpr,
}

impl fmt::Display for Overload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.type_params.is_empty() {
            write!(f, "[{}] ", self.type_params.join(", "))?;
        }
        write!(f, "{}", self.params)?;
        if let Some(block) = &self.block {
            write!(f, " {block}")?;
        }
        write!(f, " -> {}", ReturnType(&self.return_type))
    }
}
