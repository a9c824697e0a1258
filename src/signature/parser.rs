//! Recursive-descent parser for signature documents.
//!
//! Only class and module definitions are returned. Interfaces, top-level
//! type aliases, constants, globals and `use` directives are parsed so that
//! malformed input is still reported, then dropped.

use super::declaration::{
    Attribute, AttributeKind, Constant, Declaration, DeclarationKind, Include, InstanceVariable,
    Member, MethodDefinition, MethodKind, MixinKind, Overload, Visibility,
};
use super::lexer::{tokenize, Token, TokenKind as K};
use super::types::{Block, Param, ParameterSet, ProcType, RecordField, RecordKey, TypeExpr};
use super::ParseError;
use std::collections::HashMap;

/// Parse a signature document into its class and module declarations.
///
/// Declarations come back in order of first appearance. A class or module
/// that is opened more than once is merged: members of later blocks are
/// appended to the first one, and `def` lines for an existing method add
/// overloads to it.
pub fn parse(source: &str) -> Result<Vec<Declaration>, ParseError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(tokens);
    let mut declarations = DeclarationSet::default();
    while !parser.peek().is(K::Eof) {
        parser.parse_top_level(&mut declarations)?;
    }
    Ok(declarations.into_vec())
}

#[derive(Default)]
struct DeclarationSet {
    declarations: Vec<Declaration>,
    index: HashMap<String, usize>,
}

impl DeclarationSet {
    fn open(&mut self, name: &str, kind: DeclarationKind) -> usize {
        if let Some(&i) = self.index.get(name) {
            return i;
        }
        self.declarations.push(Declaration::new(name, kind));
        let i = self.declarations.len() - 1;
        self.index.insert(name.to_string(), i);
        i
    }

    fn push_member(&mut self, declaration: usize, member: Member) {
        self.declarations[declaration].push_member(member);
    }

    fn into_vec(self) -> Vec<Declaration> {
        self.declarations
    }
}

/// Visibility in effect for the members that follow.
#[derive(Clone, Copy)]
struct BodyState {
    default_visibility: Visibility,
}

struct Parser<'src> {
    tokens: Vec<Token<'src>>,
    pos: usize,
}

impl<'src> Parser<'src> {
    fn new(tokens: Vec<Token<'src>>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token<'src> {
        self.peek_nth(0)
    }

    fn peek_nth(&self, n: usize) -> &Token<'src> {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    fn advance(&mut self) -> Token<'src> {
        let token = self.peek().clone();
        if !token.is(K::Eof) {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: K) -> bool {
        if self.peek().is(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.peek().is_keyword(keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: K, what: &str) -> Result<Token<'src>, ParseError> {
        if self.peek().is(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(what))
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        let found = if token.is(K::Eof) {
            "end of input".to_string()
        } else {
            format!("`{}`", token.text)
        };
        ParseError::new(
            token.line,
            token.column,
            format!("expected {expected}, found {found}"),
        )
    }

    fn error_at(token: &Token<'_>, message: impl Into<String>) -> ParseError {
        ParseError::new(token.line, token.column, message)
    }

    // ---- declarations ----------------------------------------------------

    fn parse_top_level(&mut self, declarations: &mut DeclarationSet) -> Result<(), ParseError> {
        let token = self.peek().clone();
        match token.text {
            "class" if token.is(K::Ident) => self.parse_class_or_module(None, declarations),
            "module" if token.is(K::Ident) => self.parse_class_or_module(None, declarations),
            "interface" if token.is(K::Ident) => self.parse_interface(),
            "type" if token.is(K::Ident) => self.parse_type_alias(),
            "use" if token.is(K::Ident) => self.parse_use(),
            "end" if token.is(K::Ident) => Err(Self::error_at(&token, "unexpected `end`")),
            _ if token.is(K::GlobalVar) => {
                self.advance();
                self.expect(K::Colon, "`:` after global variable")?;
                self.parse_type().map(drop)
            }
            _ if token.is_const_name() || token.is(K::ColonColon) => {
                self.parse_qualified_name()?;
                self.expect(K::Colon, "`:` after constant name")?;
                self.parse_type().map(drop)
            }
            _ => Err(Self::error_at(
                &token,
                format!("unknown top-level construct `{}`", token.text),
            )),
        }
    }

    /// `class Name[T] < Super[T] ... end`, `module Name[T] : Self ... end`,
    /// or the alias forms `class Name = Other`.
    fn parse_class_or_module(
        &mut self,
        outer: Option<&str>,
        declarations: &mut DeclarationSet,
    ) -> Result<(), ParseError> {
        let keyword = self.advance();
        let kind = if keyword.text == "class" {
            DeclarationKind::Class
        } else {
            DeclarationKind::Module
        };
        let name = self.parse_qualified_name()?;
        let full_name = qualify(outer, &name);

        if self.eat(K::Eq) {
            self.parse_qualified_name()?;
            return Ok(());
        }

        if self.peek().is(K::BracketOpen) {
            self.parse_type_params()?;
        }
        if kind == DeclarationKind::Class && self.eat(K::Lt) {
            self.parse_named_type()?;
        } else if kind == DeclarationKind::Module && self.eat(K::Colon) {
            loop {
                self.parse_named_type()?;
                if !self.eat(K::Comma) {
                    break;
                }
            }
        }

        let index = declarations.open(&full_name, kind);
        let mut state = BodyState {
            default_visibility: Visibility::Public,
        };
        loop {
            let token = self.peek().clone();
            if token.is(K::Eof) {
                return Err(Self::error_at(
                    &keyword,
                    format!("missing `end` for {kind} {full_name}"),
                ));
            }
            if token.is_keyword("end") {
                self.advance();
                return Ok(());
            }
            if token.is_keyword("class") || token.is_keyword("module") {
                self.parse_class_or_module(Some(&full_name), declarations)?;
                continue;
            }
            for member in self.parse_member(&mut state)? {
                declarations.push_member(index, member);
            }
        }
    }

    /// Interface bodies accept the same members as classes; the result is
    /// discarded.
    fn parse_interface(&mut self) -> Result<(), ParseError> {
        let keyword = self.advance();
        self.parse_qualified_name()?;
        if self.peek().is(K::BracketOpen) {
            self.parse_type_params()?;
        }
        let mut state = BodyState {
            default_visibility: Visibility::Public,
        };
        loop {
            if self.peek().is(K::Eof) {
                return Err(Self::error_at(&keyword, "missing `end` for interface"));
            }
            if self.eat_keyword("end") {
                return Ok(());
            }
            self.parse_member(&mut state)?;
        }
    }

    /// `type name[T] = T`
    fn parse_type_alias(&mut self) -> Result<(), ParseError> {
        self.advance();
        self.parse_qualified_name()?;
        if self.peek().is(K::BracketOpen) {
            self.parse_type_params()?;
        }
        self.expect(K::Eq, "`=` in type alias")?;
        self.parse_type().map(drop)
    }

    /// `use Foo::Bar, Foo::Baz as B, Foo::*`
    fn parse_use(&mut self) -> Result<(), ParseError> {
        self.advance();
        loop {
            self.eat(K::ColonColon);
            loop {
                if self.eat(K::Star) {
                    break;
                }
                self.expect(K::Ident, "name in `use` clause")?;
                if !self.eat(K::ColonColon) {
                    break;
                }
            }
            if self.eat_keyword("as") {
                self.expect(K::Ident, "alias name after `as`")?;
            }
            if !self.eat(K::Comma) {
                return Ok(());
            }
        }
    }

    // ---- members ---------------------------------------------------------

    fn parse_member(&mut self, state: &mut BodyState) -> Result<Vec<Member>, ParseError> {
        let token = self.peek().clone();
        if token.is(K::Ident) {
            match token.text {
                "def" => return Ok(vec![self.parse_method(state.default_visibility)?]),
                "attr_reader" | "attr_writer" | "attr_accessor" => {
                    return Ok(vec![self.parse_attribute()?]);
                }
                "include" | "extend" | "prepend" => return Ok(vec![self.parse_mixin()?]),
                "public" | "private" => {
                    self.advance();
                    let visibility = if token.text == "private" {
                        Visibility::Private
                    } else {
                        Visibility::Public
                    };
                    let next = self.peek().text;
                    if self.peek().is_keyword("def") {
                        return Ok(vec![self.parse_method(visibility)?]);
                    }
                    if self.peek().is(K::Ident)
                        && matches!(next, "attr_reader" | "attr_writer" | "attr_accessor")
                    {
                        return Ok(vec![self.parse_attribute()?]);
                    }
                    state.default_visibility = visibility;
                    return Ok(Vec::new());
                }
                "alias" => {
                    self.parse_alias()?;
                    return Ok(Vec::new());
                }
                "type" => {
                    self.parse_type_alias()?;
                    return Ok(Vec::new());
                }
                "interface" => {
                    self.parse_interface()?;
                    return Ok(Vec::new());
                }
                "self" if self.peek_nth(1).is(K::Dot) && self.peek_nth(2).is(K::InstanceVar) => {
                    self.advance();
                    self.advance();
                    let ivar = self.advance();
                    return Ok(vec![self.parse_variable(format!("self.{}", ivar.text))?]);
                }
                _ if token.is_const_name() && self.peek_nth(1).is(K::Colon) => {
                    self.advance();
                    self.advance();
                    let ty = self.parse_type()?;
                    return Ok(vec![Member::Constant(Constant {
                        name: token.text.to_string(),
                        ty,
                    })]);
                }
                _ => {}
            }
        }
        if token.is(K::InstanceVar) || token.is(K::ClassVar) {
            self.advance();
            return Ok(vec![self.parse_variable(token.text.to_string())?]);
        }
        Err(Self::error_at(
            &token,
            format!("unknown member `{}`", token.text),
        ))
    }

    fn parse_variable(&mut self, name: String) -> Result<Member, ParseError> {
        self.expect(K::Colon, "`:` after variable name")?;
        let ty = self.parse_type()?;
        Ok(Member::InstanceVariable(InstanceVariable { name, ty }))
    }

    /// `include Foo[T]`, `extend _Each[T]`, `prepend Bar`
    fn parse_mixin(&mut self) -> Result<Member, ParseError> {
        let keyword = self.advance();
        let kind = match keyword.text {
            "include" => MixinKind::Include,
            "extend" => MixinKind::Extend,
            _ => MixinKind::Prepend,
        };
        let module = self.parse_named_type()?;
        Ok(Member::Include(Include { kind, module }))
    }

    /// `attr_reader name: T`, `attr_accessor self.name (@ivar): T`
    fn parse_attribute(&mut self) -> Result<Member, ParseError> {
        let keyword = self.advance();
        let kind = match keyword.text {
            "attr_reader" => AttributeKind::Reader,
            "attr_writer" => AttributeKind::Writer,
            _ => AttributeKind::Accessor,
        };
        let singleton = self.peek().is_keyword("self") && self.peek_nth(1).is(K::Dot);
        if singleton {
            self.advance();
            self.advance();
        }
        let name = self.expect(K::Ident, "attribute name")?;
        if self.eat(K::ParenOpen) {
            self.eat(K::InstanceVar);
            self.expect(K::ParenClose, "`)` after attribute variable")?;
        }
        self.expect(K::Colon, "`:` after attribute name")?;
        let ty = self.parse_type()?;
        let name = if singleton {
            format!("self.{}", name.text)
        } else {
            name.text.to_string()
        };
        Ok(Member::Attribute(Attribute { name, ty, kind }))
    }

    /// `alias new old`, `alias self.new self.old`
    fn parse_alias(&mut self) -> Result<(), ParseError> {
        self.advance();
        for _ in 0..2 {
            if self.peek().is_keyword("self") && self.peek_nth(1).is(K::Dot) {
                self.advance();
                self.advance();
            }
            self.parse_method_name(false)?;
        }
        Ok(())
    }

    fn parse_method(&mut self, visibility: Visibility) -> Result<Member, ParseError> {
        self.advance();
        let kind = if self.peek().is_keyword("self") && self.peek_nth(1).is(K::Dot) {
            self.advance();
            self.advance();
            MethodKind::Singleton
        } else if self.peek().is_keyword("self")
            && self.peek_nth(1).is(K::Question)
            && self.peek_nth(2).is(K::Dot)
        {
            self.advance();
            self.advance();
            self.advance();
            MethodKind::SingletonInstance
        } else {
            MethodKind::Instance
        };
        let name = self.parse_method_name(true)?;
        self.expect(K::Colon, "`:` after method name")?;

        let mut overloads = Vec::new();
        let mut overloading = false;
        loop {
            if self.eat(K::Ellipsis) {
                overloading = true;
                break;
            }
            overloads.push(self.parse_method_type()?);
            if !self.eat(K::Pipe) {
                break;
            }
        }

        Ok(Member::Method(MethodDefinition {
            name,
            kind,
            visibility,
            overloads,
            overloading,
        }))
    }

    /// Method names are spelled by one or more adjacent tokens: `valid?`,
    /// `name=`, `[]=`, `<=>`, `-@`. With `before_colon`, the name ends at the
    /// `:` that introduces the method type.
    fn parse_method_name(&mut self, before_colon: bool) -> Result<String, ParseError> {
        let first = self.peek().clone();
        if first.is(K::Eof) || first.is(K::Colon) {
            return Err(self.unexpected("method name"));
        }
        self.advance();
        let mut name = first.text.to_string();
        let mut end = first.span.end;
        loop {
            let next = self.peek();
            let adjacent = next.span.start == end;
            let continues = match next.kind {
                K::Colon | K::Eof => false,
                K::Ident | K::Integer => !first.is(K::Ident) && adjacent,
                _ => adjacent,
            };
            if !continues || (!before_colon && next.is(K::Ident)) {
                break;
            }
            let next = self.advance();
            name.push_str(next.text);
            end = next.span.end;
        }
        Ok(name)
    }

    /// `[T] (params) ?{ block } -> R`
    fn parse_method_type(&mut self) -> Result<Overload, ParseError> {
        let type_params = if self.peek().is(K::BracketOpen) {
            self.parse_type_params()?
        } else {
            Vec::new()
        };
        let params = if self.peek().is(K::ParenOpen) {
            self.parse_params()?
        } else {
            ParameterSet::default()
        };
        let block = self.parse_optional_block()?;
        self.expect(K::Arrow, "`->` in method type")?;
        let return_type = self.parse_intersection()?;
        Ok(Overload {
            type_params,
            params,
            block,
            return_type,
        })
    }

    /// `[unchecked out T < Bound = Default, U]`, rendered back to text.
    fn parse_type_params(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect(K::BracketOpen, "`[`")?;
        let mut params = Vec::new();
        loop {
            let mut rendered = String::new();
            while self.peek().is(K::Ident)
                && matches!(self.peek().text, "unchecked" | "in" | "out")
                && self.peek_nth(1).is(K::Ident)
            {
                let modifier = self.advance();
                rendered.push_str(modifier.text);
                rendered.push(' ');
            }
            let name = self.expect(K::Ident, "type parameter name")?;
            rendered.push_str(name.text);
            if self.eat(K::Lt) {
                rendered.push_str(&format!(" < {}", self.parse_type()?));
            }
            if self.eat(K::Eq) {
                rendered.push_str(&format!(" = {}", self.parse_type()?));
            }
            params.push(rendered);
            if !self.eat(K::Comma) {
                break;
            }
        }
        self.expect(K::BracketClose, "`]` after type parameters")?;
        Ok(params)
    }

    fn parse_optional_block(&mut self) -> Result<Option<Block>, ParseError> {
        let required = if self.peek().is(K::Question) && self.peek_nth(1).is(K::BraceOpen) {
            self.advance();
            false
        } else if self.peek().is(K::BraceOpen) {
            true
        } else {
            return Ok(None);
        };
        self.expect(K::BraceOpen, "`{`")?;
        let params = if self.peek().is(K::ParenOpen) {
            self.parse_params()?
        } else {
            ParameterSet::default()
        };
        let self_type = self.parse_self_binding()?;
        self.expect(K::Arrow, "`->` in block type")?;
        let return_type = self.parse_type()?;
        self.expect(K::BraceClose, "`}` after block type")?;
        Ok(Some(Block {
            required,
            params,
            self_type,
            return_type,
        }))
    }

    /// `[self: T]`
    fn parse_self_binding(&mut self) -> Result<Option<TypeExpr>, ParseError> {
        if !(self.peek().is(K::BracketOpen) && self.peek_nth(1).is_keyword("self")) {
            return Ok(None);
        }
        self.advance();
        self.advance();
        self.expect(K::Colon, "`:` in self binding")?;
        let ty = self.parse_type()?;
        self.expect(K::BracketClose, "`]` after self binding")?;
        Ok(Some(ty))
    }

    fn parse_params(&mut self) -> Result<ParameterSet, ParseError> {
        self.expect(K::ParenOpen, "`(`")?;
        let mut params = ParameterSet::default();
        let mut after_optional_or_rest = false;
        while !self.peek().is(K::ParenClose) {
            if self.eat(K::StarStar) {
                params.rest_keywords = Some(self.parse_param()?);
            } else if self.eat(K::Star) {
                params.rest_positional = Some(self.parse_param()?);
                after_optional_or_rest = true;
            } else if self.peek().is(K::Question) {
                self.advance();
                if self.at_keyword_label() {
                    let key = self.parse_keyword_label()?;
                    params.optional_keywords.insert(key, self.parse_param()?);
                } else {
                    params.optional_positionals.push(self.parse_param()?);
                    after_optional_or_rest = true;
                }
            } else if self.at_keyword_label() {
                let key = self.parse_keyword_label()?;
                params.required_keywords.insert(key, self.parse_param()?);
            } else {
                let param = self.parse_param()?;
                if after_optional_or_rest {
                    params.trailing_positionals.push(param);
                } else {
                    params.required_positionals.push(param);
                }
            }
            if !self.eat(K::Comma) {
                break;
            }
        }
        self.expect(K::ParenClose, "`)` after parameters")?;
        Ok(params)
    }

    fn at_keyword_label(&self) -> bool {
        self.peek().is(K::Ident) && self.peek_nth(1).is(K::Colon)
    }

    fn parse_keyword_label(&mut self) -> Result<String, ParseError> {
        let key = self.expect(K::Ident, "keyword name")?;
        self.expect(K::Colon, "`:` after keyword name")?;
        Ok(key.text.to_string())
    }

    /// `Type` or `Type name`
    fn parse_param(&mut self) -> Result<Param, ParseError> {
        let ty = self.parse_type()?;
        if self.peek().is_var_name() {
            let name = self.advance();
            Ok(Param::named(ty, name.text))
        } else {
            Ok(Param::new(ty))
        }
    }

    // ---- types -----------------------------------------------------------

    /// `::Foo::Bar`, kept with its leading `::` when written.
    fn parse_qualified_name(&mut self) -> Result<String, ParseError> {
        let mut name = String::new();
        if self.eat(K::ColonColon) {
            name.push_str("::");
        }
        loop {
            let segment = self.expect(K::Ident, "name")?;
            name.push_str(segment.text);
            if self.peek().is(K::ColonColon) && self.peek_nth(1).is(K::Ident) {
                self.advance();
                name.push_str("::");
            } else {
                return Ok(name);
            }
        }
    }

    /// Class, interface or alias reference with optional type arguments.
    fn parse_named_type(&mut self) -> Result<TypeExpr, ParseError> {
        let name = self.parse_qualified_name()?;
        let args = if self.eat(K::BracketOpen) {
            let args = self.parse_type_list(K::BracketClose)?;
            self.expect(K::BracketClose, "`]` after type arguments")?;
            args
        } else {
            Vec::new()
        };
        Ok(TypeExpr::Named { name, args })
    }

    fn parse_type_list(&mut self, close: K) -> Result<Vec<TypeExpr>, ParseError> {
        let mut types = Vec::new();
        while !self.peek().is(close) {
            types.push(self.parse_type()?);
            if !self.eat(K::Comma) {
                break;
            }
        }
        Ok(types)
    }

    /// Full type. Method return types stop one level below, at
    /// intersections, because `|` separates overloads there.
    fn parse_type(&mut self) -> Result<TypeExpr, ParseError> {
        let first = self.parse_intersection()?;
        if !self.peek().is(K::Pipe) {
            return Ok(first);
        }
        let mut members = vec![first];
        while self.eat(K::Pipe) {
            members.push(self.parse_intersection()?);
        }
        Ok(TypeExpr::union(members))
    }

    fn parse_intersection(&mut self) -> Result<TypeExpr, ParseError> {
        let first = self.parse_optional_type()?;
        if !self.peek().is(K::Amp) {
            return Ok(first);
        }
        let mut members = vec![first];
        while self.eat(K::Amp) {
            members.push(self.parse_optional_type()?);
        }
        Ok(TypeExpr::intersection(members))
    }

    /// A primary type with any number of postfix `?`.
    fn parse_optional_type(&mut self) -> Result<TypeExpr, ParseError> {
        let mut ty = self.parse_primary_type()?;
        while self.peek().is(K::Question) && !self.peek_nth(1).is(K::BraceOpen) {
            self.advance();
            ty = TypeExpr::Optional(Box::new(ty));
        }
        Ok(ty)
    }

    fn parse_primary_type(&mut self) -> Result<TypeExpr, ParseError> {
        let token = self.peek().clone();
        match token.kind {
            K::ParenOpen => {
                self.advance();
                let ty = self.parse_type()?;
                self.expect(K::ParenClose, "`)` after type")?;
                Ok(ty)
            }
            K::BracketOpen => {
                self.advance();
                let members = self.parse_type_list(K::BracketClose)?;
                self.expect(K::BracketClose, "`]` after tuple")?;
                Ok(TypeExpr::Tuple(members))
            }
            K::BraceOpen => self.parse_record(),
            K::Caret => self.parse_proc(),
            K::String | K::Symbol | K::Integer => {
                self.advance();
                Ok(TypeExpr::Literal(token.text.to_string()))
            }
            K::Minus if self.peek_nth(1).is(K::Integer) => {
                self.advance();
                let digits = self.advance();
                Ok(TypeExpr::Literal(format!("-{}", digits.text)))
            }
            K::Ident if token.text == "singleton" && self.peek_nth(1).is(K::ParenOpen) => {
                self.advance();
                self.advance();
                let name = self.parse_qualified_name()?;
                self.expect(K::ParenClose, "`)` after singleton class name")?;
                Ok(TypeExpr::Singleton(name))
            }
            K::Ident | K::ColonColon => self.parse_named_type(),
            _ => Err(self.unexpected("a type")),
        }
    }

    /// `{ id: Integer, ?name: String, "key" => T }`
    fn parse_record(&mut self) -> Result<TypeExpr, ParseError> {
        self.expect(K::BraceOpen, "`{`")?;
        let mut fields = Vec::new();
        while !self.peek().is(K::BraceClose) {
            let optional = self.eat(K::Question);
            let key = if self.at_keyword_label() {
                RecordKey::Symbol(self.parse_keyword_label()?)
            } else {
                let literal = self.peek().clone();
                if !matches!(literal.kind, K::String | K::Symbol | K::Integer) {
                    return Err(self.unexpected("record key"));
                }
                self.advance();
                self.expect(K::FatArrow, "`=>` after record key")?;
                RecordKey::Literal(literal.text.to_string())
            };
            let ty = self.parse_type()?;
            fields.push(RecordField { key, optional, ty });
            if !self.eat(K::Comma) {
                break;
            }
        }
        self.expect(K::BraceClose, "`}` after record")?;
        Ok(TypeExpr::Record(fields))
    }

    /// `^(params) ?{ block } [self: T] -> R`
    fn parse_proc(&mut self) -> Result<TypeExpr, ParseError> {
        self.expect(K::Caret, "`^`")?;
        let params = if self.peek().is(K::ParenOpen) {
            self.parse_params()?
        } else {
            ParameterSet::default()
        };
        let block = self.parse_optional_block()?;
        let self_type = self.parse_self_binding()?;
        self.expect(K::Arrow, "`->` in proc type")?;
        let return_type = self.parse_optional_type()?;
        Ok(TypeExpr::Proc(Box::new(ProcType {
            params,
            block,
            self_type,
            return_type,
        })))
    }
}

fn qualify(outer: Option<&str>, name: &str) -> String {
    if let Some(absolute) = name.strip_prefix("::") {
        return absolute.to_string();
    }
    match outer {
        Some(outer) => format!("{outer}::{name}"),
        None => name.to_string(),
    }
}
