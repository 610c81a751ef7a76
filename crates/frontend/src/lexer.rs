use colored::*;
use std::collections::{HashMap, VecDeque};
use thiserror::Error;

use tools::errors::{CodeErr, ReportCodeErr};
use tracing::debug;

// Canonical spelling of the operator tokens. Emoji drawn with a variation
// selector (U+FE0F) keep it, the others don't.
pub const DECLARE: &str = "\u{2B50}\u{FE0F}";
pub const ASSIGN: &str = "\u{1F4DD}";
pub const PRINT: &str = "\u{1F5A8}";
pub const LOOP: &str = "\u{1F501}";
pub const ADD: &str = "\u{2795}";
pub const SUB: &str = "\u{2796}";
pub const MUL: &str = "\u{2716}\u{FE0F}";
pub const DIV: &str = "\u{2797}";
pub const EQUAL: &str = "\u{1F91D}";
pub const NOT_EQUAL: &str = "\u{1F6AB}";
pub const LESS: &str = "\u{1F448}";
pub const GREATER: &str = "\u{1F449}";
pub const LESS_EQUAL: &str = "\u{1FA9C}";
pub const GREATER_EQUAL: &str = "\u{26F0}\u{FE0F}";
pub const AND: &str = "\u{1F517}";
pub const OR: &str = "\u{26D3}\u{FE0F}";

const VARIATION_SELECTOR: char = '\u{FE0F}';

#[derive(Debug, Error, PartialEq)]
pub enum LexerError {
    #[error("{} while tokenizing code, unsupported character: -{0}-.", "Error".bold().red())]
    UnrecognizedToken(char),

    #[error("{} while tokenizing number -{0}-, only digits are supported to declare a number.", "Error".bold().red())]
    AlphaCharInNumberToken(String),

    #[error("{} while tokenizing string {0}, missing closing quote before end of line.", "Error".bold().red())]
    UnterminatedString(String),
}

impl ReportCodeErr for LexerError {}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literal types
    Number,
    String,
    Identifier,

    // Keywords
    True,
    False,
    Declare,
    Assign,
    Print,
    Loop,

    // Operators
    AddOperator,
    MulOperator,
    RelOperator,
    AndOperator,
    OrOperator,

    // Grouping
    OpenParen,  // (
    CloseParen, // )
    OpenBrace,  // {
    CloseBrace, // }
    Semicolon,  // ;

    // File
    EndLine,
    EOF,
}

// We use a struct instead of enum to be able to loop only on value without to have to
// extract it from enum each time with if let syntax
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: u64,
}

// Append a white space at the end of the code to allow the window to work
// correctly. Otherwise, last character is never in its own window.
fn append_space_and_eof(mut source_code: String) -> String {
    source_code.push('\n');
    source_code.push(' ');
    source_code
}

// Skip listed char. A lonely variation selector carries no meaning.
fn is_skippable(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | VARIATION_SELECTOR)
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

// Every emoji of the language is a single code point, optionally followed by
// a variation selector that is skipped on the next window.
fn emoji_token(c: char, line: u64) -> Option<Token> {
    let (kind, value) = match c {
        '\u{2B50}' => (TokenKind::Declare, DECLARE),
        '\u{1F4DD}' => (TokenKind::Assign, ASSIGN),
        '\u{1F5A8}' => (TokenKind::Print, PRINT),
        '\u{1F501}' => (TokenKind::Loop, LOOP),
        '\u{2795}' => (TokenKind::AddOperator, ADD),
        '\u{2796}' => (TokenKind::AddOperator, SUB),
        '\u{2716}' => (TokenKind::MulOperator, MUL),
        '\u{2797}' => (TokenKind::MulOperator, DIV),
        '\u{1F91D}' => (TokenKind::RelOperator, EQUAL),
        '\u{1F6AB}' => (TokenKind::RelOperator, NOT_EQUAL),
        '\u{1F448}' => (TokenKind::RelOperator, LESS),
        '\u{1F449}' => (TokenKind::RelOperator, GREATER),
        '\u{1FA9C}' => (TokenKind::RelOperator, LESS_EQUAL),
        '\u{26F0}' => (TokenKind::RelOperator, GREATER_EQUAL),
        '\u{1F517}' => (TokenKind::AndOperator, AND),
        '\u{26D3}' => (TokenKind::OrOperator, OR),
        _ => return None,
    };

    Some(Token::new(kind, value.to_string(), line))
}

#[derive(Default)]
pub struct Lexer<'a> {
    pub tokens: VecDeque<Token>,
    reserved_keywords: HashMap<&'a str, TokenKind>,
}

impl<'a> Lexer<'a> {
    // Keywords generation
    fn generate_keywords(&mut self) {
        self.reserved_keywords.insert("true", TokenKind::True);
        self.reserved_keywords.insert("false", TokenKind::False);
    }

    pub fn tokenize(&mut self, source_code: String) -> Result<(), CodeErr<LexerError>> {
        self.generate_keywords();

        let modified_code = append_space_and_eof(source_code);
        let chars = modified_code.chars().collect::<Vec<char>>();
        let mut window = chars.windows(2);

        // We keep the count of the current line
        let mut line: u64 = 0;

        self.tokens.clear();

        while let Some(c) = window.next() {
            let first_char = c[0];

            if is_skippable(first_char) {
                continue;
            }

            if let Some(tk) = emoji_token(first_char, line) {
                self.tokens.push_back(tk);
                continue;
            }

            match first_char {
                '(' => self.tokens.push_back(Token::new(TokenKind::OpenParen, "(".into(), line)),
                ')' => self.tokens.push_back(Token::new(TokenKind::CloseParen, ")".into(), line)),
                '{' => self.tokens.push_back(Token::new(TokenKind::OpenBrace, "{".into(), line)),
                '}' => self.tokens.push_back(Token::new(TokenKind::CloseBrace, "}".into(), line)),
                ';' => self.tokens.push_back(Token::new(TokenKind::Semicolon, ";".into(), line)),
                // Comments run until the end of the line, which is still tokenized
                '/' if c[1] == '/' => {
                    while let Some(s) = window.next() {
                        if s[1] == '\n' {
                            break;
                        }
                    }
                }
                '\n' => {
                    self.tokens.push_back(Token::new(TokenKind::EndLine, "\n".into(), line));
                    line += 1;
                }
                '"' | '\'' => {
                    let mut val = String::from(first_char);

                    loop {
                        match window.next() {
                            Some(r) if r[0] == '\n' => {
                                return Err(LexerError::UnterminatedString(val).to_glob_err(line))
                            }
                            Some(r) => {
                                val.push(r[0]);

                                if r[0] == first_char {
                                    break;
                                }
                            }
                            None => {
                                return Err(LexerError::UnterminatedString(val).to_glob_err(line))
                            }
                        }
                    }

                    self.tokens.push_back(Token::new(TokenKind::String, val, line));
                }
                _ => {
                    // Multiple characters token
                    let mut next_char = c[1];

                    if first_char.is_ascii_digit() {
                        let mut val = String::from(first_char);

                        while next_char.is_ascii_digit() {
                            match window.next() {
                                Some(r) => {
                                    val.push(r[0]);
                                    next_char = r[1];
                                }
                                None => break,
                            }
                        }

                        // Things like 12abc are neither numbers nor identifiers
                        if is_identifier_char(next_char) {
                            return Err(LexerError::AlphaCharInNumberToken(val).to_glob_err(line));
                        }

                        self.tokens.push_back(Token::new(TokenKind::Number, val, line));
                    } else if first_char.is_alphabetic() || first_char == '_' {
                        let mut val = String::from(first_char);

                        while is_identifier_char(next_char) {
                            match window.next() {
                                Some(r) => {
                                    val.push(r[0]);
                                    next_char = r[1];
                                }
                                None => break,
                            }
                        }

                        // Check for reserved keywords
                        let kind = match self.reserved_keywords.get(val.as_str()) {
                            Some(kind) => kind.clone(),
                            None => TokenKind::Identifier,
                        };

                        self.tokens.push_back(Token::new(kind, val, line));
                    } else {
                        return Err(LexerError::UnrecognizedToken(first_char).to_glob_err(line));
                    }
                }
            }
        }

        // We append manualy end of file
        self.tokens.push_back(Token::new(TokenKind::EOF, String::new(), line));
        debug!(tokens = self.tokens.len(), lines = line + 1, "source tokenized");

        Ok(())
    }
}

impl Token {
    pub fn new(kind: TokenKind, value: String, line: u64) -> Self {
        Self { kind, value, line }
    }
}

impl Default for Token {
    fn default() -> Self {
        Token::new(TokenKind::EOF, String::new(), 0)
    }
}
