//! Tokenizer for signature documents.
//!
//! Newlines carry no meaning in the grammar, so they are dropped along with
//! comments and `%a{...}` annotations. Every token keeps its byte span so the
//! parser can tell adjacent tokens (`valid?`, `[]=`) from separated ones.

use super::ParseError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenKind {
    Ident,
    InstanceVar,
    ClassVar,
    GlobalVar,
    Symbol,
    String,
    Integer,
    Ellipsis,
    ColonColon,
    StarStar,
    Arrow,
    FatArrow,
    Colon,
    Comma,
    Dot,
    ParenOpen,
    ParenClose,
    BracketOpen,
    BracketClose,
    BraceOpen,
    BraceClose,
    Pipe,
    Amp,
    Question,
    Star,
    Caret,
    Lt,
    Gt,
    Eq,
    Bang,
    Plus,
    Minus,
    Slash,
    Percent,
    Tilde,
    Backtick,
    At,
    Eof,
}
type K = TokenKind;

/// Longest spellings first.
const PUNCTUATION: &[(&str, TokenKind)] = &[
    ("...", K::Ellipsis),
    ("::", K::ColonColon),
    ("**", K::StarStar),
    ("->", K::Arrow),
    ("=>", K::FatArrow),
    (":", K::Colon),
    (",", K::Comma),
    (".", K::Dot),
    ("(", K::ParenOpen),
    (")", K::ParenClose),
    ("[", K::BracketOpen),
    ("]", K::BracketClose),
    ("{", K::BraceOpen),
    ("}", K::BraceClose),
    ("|", K::Pipe),
    ("&", K::Amp),
    ("?", K::Question),
    ("*", K::Star),
    ("^", K::Caret),
    ("<", K::Lt),
    (">", K::Gt),
    ("=", K::Eq),
    ("!", K::Bang),
    ("+", K::Plus),
    ("-", K::Minus),
    ("/", K::Slash),
    ("%", K::Percent),
    ("~", K::Tilde),
    ("`", K::Backtick),
    ("@", K::At),
];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub span: Span,
    pub line: usize,
    pub column: usize,
}

impl Token<'_> {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == K::Ident && self.text == keyword
    }

    /// Identifier starting with an uppercase letter (class, module, constant).
    pub fn is_const_name(&self) -> bool {
        self.kind == K::Ident && self.text.starts_with(|c: char| c.is_ascii_uppercase())
    }

    /// Identifier usable as a parameter or variable name.
    pub fn is_var_name(&self) -> bool {
        self.kind == K::Ident
            && self
                .text
                .starts_with(|c: char| c.is_ascii_lowercase() || c == '_')
    }
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_ident_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// Annotation delimiters: `%a{...}`, `%a(...)`, `%a[...]`, `%a<...>`, `%a|...|`.
fn annotation_close(open: u8) -> Option<u8> {
    match open {
        b'{' => Some(b'}'),
        b'(' => Some(b')'),
        b'[' => Some(b']'),
        b'<' => Some(b'>'),
        b'|' => Some(b'|'),
        _ => None,
    }
}

struct Lexer<'src> {
    source: &'src str,
    bytes: &'src [u8],
    pos: usize,
    line: usize,
    line_start: usize,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn column(&self, pos: usize) -> usize {
        pos - self.line_start + 1
    }

    fn error(&self, pos: usize, message: impl Into<String>) -> ParseError {
        ParseError::new(self.line, self.column(pos), message)
    }

    fn bump_newline(&mut self) {
        self.line += 1;
        self.line_start = self.pos;
    }

    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        while let Some(c) = self.peek_at(0) {
            match c {
                b'\n' => {
                    self.pos += 1;
                    self.bump_newline();
                }
                c if c.is_ascii_whitespace() => self.pos += 1,
                b'#' => {
                    while self.peek_at(0).is_some_and(|c| c != b'\n') {
                        self.pos += 1;
                    }
                }
                b'%' if self.peek_at(1) == Some(b'a') => {
                    let Some(close) = self.peek_at(2).and_then(annotation_close) else {
                        return Ok(());
                    };
                    let start = self.pos;
                    self.pos += 3;
                    loop {
                        match self.peek_at(0) {
                            None => return Err(self.error(start, "unterminated annotation")),
                            Some(c) if c == close => {
                                self.pos += 1;
                                break;
                            }
                            Some(b'\n') => {
                                self.pos += 1;
                                self.bump_newline();
                            }
                            Some(_) => self.pos += 1,
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
        Ok(())
    }

    /// A `:` opens a symbol literal only where a type can start, never
    /// directly after a name (`name: T`, `valid?: () -> bool`).
    fn colon_starts_symbol(&self) -> bool {
        let next_ok = self
            .peek_at(1)
            .is_some_and(|c| is_ident_start(c) || c == b'"');
        let prev_ok = self.pos == 0
            || !matches!(
                self.bytes[self.pos - 1],
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'?' | b'!' | b'=' | b')' | b']' | b'}'
            );
        next_ok && prev_ok && self.peek_at(1) != Some(b':')
    }

    fn eat_ident_chars(&mut self) {
        while self.peek_at(0).is_some_and(is_ident_continue) {
            self.pos += 1;
        }
    }

    fn eat_quoted(&mut self, start: usize) -> Result<(), ParseError> {
        let Some(quote) = self.peek_at(0) else {
            return Err(self.error(start, "unterminated string literal"));
        };
        self.pos += 1;
        loop {
            match self.peek_at(0) {
                None | Some(b'\n') => return Err(self.error(start, "unterminated string literal")),
                Some(b'\\') => self.pos += 2,
                Some(c) if c == quote => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn next_token(&mut self) -> Result<Token<'src>, ParseError> {
        self.skip_trivia()?;
        let start = self.pos;
        let (line, column) = (self.line, self.column(start));
        let Some(c) = self.peek_at(0) else {
            return Ok(self.token(K::Eof, start, line, column));
        };

        let kind = match c {
            c if is_ident_start(c) => {
                self.eat_ident_chars();
                K::Ident
            }
            c if c.is_ascii_digit() => {
                while self.peek_at(0).is_some_and(|c| c.is_ascii_digit() || c == b'_') {
                    self.pos += 1;
                }
                K::Integer
            }
            b'"' | b'\'' => {
                self.eat_quoted(start)?;
                K::String
            }
            b'@' if self.peek_at(1) == Some(b'@') && self.peek_at(2).is_some_and(is_ident_start) => {
                self.pos += 2;
                self.eat_ident_chars();
                K::ClassVar
            }
            b'@' if self.peek_at(1).is_some_and(is_ident_start) => {
                self.pos += 1;
                self.eat_ident_chars();
                K::InstanceVar
            }
            b'$' if self.peek_at(1).is_some_and(is_ident_start) => {
                self.pos += 1;
                self.eat_ident_chars();
                K::GlobalVar
            }
            b':' if self.colon_starts_symbol() => {
                self.pos += 1;
                if self.peek_at(0) == Some(b'"') {
                    self.eat_quoted(start)?;
                } else {
                    self.eat_ident_chars();
                    if self.peek_at(0).is_some_and(|c| matches!(c, b'?' | b'!' | b'=')) {
                        self.pos += 1;
                    }
                }
                K::Symbol
            }
            _ => {
                let rest = &self.source[start..];
                let Some(&(spelling, kind)) =
                    PUNCTUATION.iter().find(|(p, _)| rest.starts_with(p))
                else {
                    let ch = rest.chars().next().unwrap_or('?');
                    return Err(self.error(start, format!("unexpected character `{ch}`")));
                };
                self.pos += spelling.len();
                kind
            }
        };
        Ok(self.token(kind, start, line, column))
    }

    fn token(&self, kind: TokenKind, start: usize, line: usize, column: usize) -> Token<'src> {
        Token {
            kind,
            text: &self.source[start..self.pos],
            span: Span {
                start,
                end: self.pos,
            },
            line,
            column,
        }
    }
}

/// Split `source` into tokens. The final token is always `Eof`.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.is(K::Eof);
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_method_line() {
        assert_eq!(
            kinds("def valid?: () -> bool"),
            vec![
                K::Ident,
                K::Ident,
                K::Question,
                K::Colon,
                K::ParenOpen,
                K::ParenClose,
                K::Arrow,
                K::Ident,
                K::Eof
            ]
        );
    }

    #[test]
    fn test_symbols_only_where_types_start() {
        assert_eq!(
            kinds("(:foo | :\"bar baz\")"),
            vec![K::ParenOpen, K::Symbol, K::Pipe, K::Symbol, K::ParenClose, K::Eof]
        );
        assert_eq!(
            kinds("name: String"),
            vec![K::Ident, K::Colon, K::Ident, K::Eof]
        );
        assert_eq!(kinds("Foo::Bar"), vec![K::Ident, K::ColonColon, K::Ident, K::Eof]);
    }

    #[test]
    fn test_comments_and_annotations_are_skipped() {
        let tokens = tokenize("# comment\n%a{pure} def x: () -> void # trailing\n").unwrap();
        assert_eq!(tokens[0].text, "def");
        assert_eq!(tokens[0].line, 2);
        assert_eq!(tokens.len(), 8);
    }

    #[test]
    fn test_variables() {
        assert_eq!(
            kinds("@name @@count $stdout"),
            vec![K::InstanceVar, K::ClassVar, K::GlobalVar, K::Eof]
        );
    }

    #[test]
    fn test_operator_spellings() {
        assert_eq!(
            kinds("<=> ** ... -> =>"),
            vec![K::Lt, K::FatArrow, K::StarStar, K::Ellipsis, K::Arrow, K::FatArrow, K::Eof]
        );
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("class A\n  def b: () -> void\nend").unwrap();
        let def = &tokens[2];
        assert_eq!((def.line, def.column), (2, 3));
        let end = tokens.iter().find(|t| t.text == "end").unwrap();
        assert_eq!((end.line, end.column), (3, 1));
    }

    #[test]
    fn test_unterminated_string_is_an_error() {
        let err = tokenize("X: \"abc\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.contains("unterminated"));
    }

    #[test]
    fn test_unknown_character_is_an_error() {
        let err = tokenize("def a: () -> void\n;").unwrap_err();
        assert_eq!((err.line, err.column), (2, 1));
    }
}
