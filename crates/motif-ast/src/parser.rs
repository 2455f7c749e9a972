//! The parser contract and the default macro-dialect parser.

use thiserror::Error;

use motif_config::ExportConfiguration;

use crate::node::Node;

/// Errors raised while turning macro source into a tree.
///
/// Parse failures are hard errors: an export with an unparseable macro
/// cannot proceed, so these propagate to the caller undecorated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unclosed `{{% {name} %}}` block")]
    UnclosedBlock { name: String },

    #[error("`{{% end{found} %}}` does not close the open `{{% {expected} %}}` block")]
    MismatchedEnd { expected: String, found: String },

    #[error("`{{% end{found} %}}` has no matching open block")]
    StrayEnd { found: String },

    #[error("macro `{name}` is not defined in the parsed source")]
    MacroNotFound { name: String },

    #[error("no source is available for macro `{name}`")]
    MissingSource { name: String },

    #[error("malformed macro signature `{signature}`")]
    MalformedSignature { signature: String },
}

/// Turns macro source text into a [`Node`] tree.
///
/// The grammar itself is pluggable: exporters for other template dialects
/// implement this trait against their own surface syntax and the rest of the
/// pipeline never notices.
pub trait Parser: Send + Sync {
    /// Parses raw source into a tree rooted at a list node.
    fn parse_string(
        &self,
        source: &str,
        configuration: &ExportConfiguration,
    ) -> Result<Node, ParseError>;

    /// Parses the configuration's macro source and returns the tree rooted
    /// at the named macro definition.
    fn parse_macro(
        &self,
        name: &str,
        configuration: &ExportConfiguration,
    ) -> Result<Node, ParseError> {
        let makro = configuration
            .template_macro
            .as_ref()
            .filter(|makro| makro.name == name)
            .ok_or_else(|| ParseError::MissingSource {
                name: name.to_string(),
            })?;

        let tree = self.parse_string(&makro.content, configuration)?;
        tree.find_macro(name)
            .cloned()
            .ok_or_else(|| ParseError::MacroNotFound {
                name: name.to_string(),
            })
    }
}

/// The default parser for the Jinja-flavored macro dialect.
///
/// Tokenizes `{{ ... }}`, `{% ... %}` and `{# ... #}` spans, then pairs
/// block openers with their `{% end... %}` closers. A tag only opens a block
/// when a matching closer exists later in the source; otherwise it is a
/// standalone statement. Malformed inline delimiters (an unterminated `{{`,
/// say) pass through as literal text rather than failing the parse -
/// unclosed *blocks* are errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct JinjaParser;

impl JinjaParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses source without an export context; the root is a list node.
    pub fn parse_source(&self, source: &str) -> Result<Node, ParseError> {
        let tokens: Vec<Token<'_>> = Tokenizer::new(source).collect();

        let mut root: Vec<Node> = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();

        for (index, token) in tokens.iter().enumerate() {
            let node = match token {
                Token::Text(text) => Some(Node::text(*text)),
                Token::Expression(inner) => Some(Node::expression(inner.trim())),
                Token::Comment(inner) => Some(Node::comment(inner.trim())),
                Token::Tag(inner) => {
                    let (name, arguments) = split_first_word(inner.trim());
                    if name == "macro" {
                        let (macro_name, parameters) = parse_signature(arguments)?;
                        stack.push(Frame::for_macro(macro_name, parameters));
                        None
                    } else if let Some(closed) = name.strip_prefix("end") {
                        let frame = match stack.pop() {
                            Some(frame) => frame,
                            None => {
                                return Err(ParseError::StrayEnd {
                                    found: closed.to_string(),
                                })
                            }
                        };
                        if frame.closes(closed) {
                            Some(frame.into_node())
                        } else {
                            return Err(ParseError::MismatchedEnd {
                                expected: frame.open_name().to_string(),
                                found: closed.to_string(),
                            });
                        }
                    } else if has_matching_end(&tokens[index + 1..], name) {
                        stack.push(Frame::for_block(name, arguments));
                        None
                    } else {
                        Some(Node::Statement {
                            name: name.to_string(),
                            arguments: arguments.to_string(),
                        })
                    }
                }
            };

            if let Some(node) = node {
                match stack.last_mut() {
                    Some(frame) => frame.children.push(node),
                    None => root.push(node),
                }
            }
        }

        if let Some(frame) = stack.last() {
            return Err(ParseError::UnclosedBlock {
                name: frame.open_name().to_string(),
            });
        }

        Ok(Node::List { items: root })
    }
}

impl Parser for JinjaParser {
    fn parse_string(
        &self,
        source: &str,
        _configuration: &ExportConfiguration,
    ) -> Result<Node, ParseError> {
        self.parse_source(source)
    }
}

/// An open block under construction.
struct Frame {
    opener: Opener,
    children: Vec<Node>,
}

enum Opener {
    Macro {
        name: String,
        parameters: Vec<String>,
    },
    Block {
        name: String,
        arguments: String,
    },
}

impl Frame {
    fn for_macro(name: String, parameters: Vec<String>) -> Self {
        Self {
            opener: Opener::Macro { name, parameters },
            children: Vec::new(),
        }
    }

    fn for_block(name: &str, arguments: &str) -> Self {
        Self {
            opener: Opener::Block {
                name: name.to_string(),
                arguments: arguments.to_string(),
            },
            children: Vec::new(),
        }
    }

    /// The tag name that opened this frame ("macro", "if", ...).
    fn open_name(&self) -> &str {
        match &self.opener {
            Opener::Macro { .. } => "macro",
            Opener::Block { name, .. } => name,
        }
    }

    fn closes(&self, closed: &str) -> bool {
        self.open_name() == closed
    }

    fn into_node(self) -> Node {
        match self.opener {
            Opener::Macro { name, parameters } => Node::Macro {
                name,
                parameters,
                body: Box::new(Node::List {
                    items: self.children,
                }),
            },
            Opener::Block { name, arguments } => Node::Block {
                name,
                arguments,
                body: self.children,
            },
        }
    }
}

/// Whether a matching `{% end<name> %}` exists in the remaining tokens,
/// counting nested re-openers of the same name.
fn has_matching_end(tokens: &[Token<'_>], name: &str) -> bool {
    let mut depth = 1;
    for token in tokens {
        if let Token::Tag(inner) = token {
            let (tag_name, _) = split_first_word(inner.trim());
            if tag_name == name {
                depth += 1;
            } else if tag_name.strip_prefix("end") == Some(name) {
                depth -= 1;
                if depth == 0 {
                    return true;
                }
            }
        }
    }
    false
}

fn split_first_word(tag: &str) -> (&str, &str) {
    match tag.find(char::is_whitespace) {
        Some(split) => (&tag[..split], tag[split..].trim_start()),
        None => (tag, ""),
    }
}

/// Splits `name(p1, p2)` into the macro name and its raw parameter list.
/// Parameters keep default expressions verbatim (`level=2`).
fn parse_signature(raw: &str) -> Result<(String, Vec<String>), ParseError> {
    let raw = raw.trim();
    let (name, params) = match raw.find('(') {
        Some(open) => {
            let inner = raw[open + 1..].trim_end();
            (raw[..open].trim(), inner.strip_suffix(')').unwrap_or(inner))
        }
        None => (raw, ""),
    };

    if name.is_empty() {
        return Err(ParseError::MalformedSignature {
            signature: raw.to_string(),
        });
    }

    let parameters = params
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect();
    Ok((name.to_string(), parameters))
}

/// Token types produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    /// Plain template text.
    Text(&'a str),
    /// Interior of `{{ ... }}`.
    Expression(&'a str),
    /// Interior of `{# ... #}`.
    Comment(&'a str),
    /// Interior of `{% ... %}`.
    Tag(&'a str),
}

/// Tokenizer for the three delimiter pairs.
struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }
}

const DELIMITERS: &[(&str, &str)] = &[("{{", "}}"), ("{%", "%}"), ("{#", "#}")];

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }

        let remaining = &self.input[self.pos..];

        let next_open = DELIMITERS
            .iter()
            .filter_map(|(open, close)| remaining.find(open).map(|at| (at, *open, *close)))
            .min_by_key(|(at, _, _)| *at);

        match next_open {
            None => {
                // No more delimiters; the rest is text.
                self.pos = self.input.len();
                Some(Token::Text(remaining))
            }
            Some((at, _, _)) if at > 0 => {
                self.pos += at;
                Some(Token::Text(&remaining[..at]))
            }
            Some((_, open, close)) => match remaining[open.len()..].find(close) {
                Some(end) => {
                    let inner = &remaining[open.len()..open.len() + end];
                    self.pos += open.len() + end + close.len();
                    Some(match open {
                        "{{" => Token::Expression(inner),
                        "{%" => Token::Tag(inner),
                        _ => Token::Comment(inner),
                    })
                }
                None => {
                    // Unterminated delimiter; the rest passes through as text.
                    self.pos = self.input.len();
                    Some(Token::Text(remaining))
                }
            },
        }
    }
}
