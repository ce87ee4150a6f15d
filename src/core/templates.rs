//! Prompt template parsing.
//!
//! A template is literal text interleaved with directives. Each directive loads
//! one provider and runs its output through a pipeline of decoration stages.
//! Two dialects are understood and may be mixed in one template:
//!
//! - Pipe form: `{{load "git" | prefix " " | replace "^main$" "m"}}`
//! - Angle form: `<(%python%) >`, where the text around `%name%` inside the
//!   brackets becomes a `wrap` stage
//!
//! # Public API
//! - [`Template`]: parsed template, an ordered list of [`Segment`]s
//! - [`Directive`]: provider name plus its [`Stage`] pipeline
//! - [`Stage`]: one decoration step
//!
//! # Error Handling
//! Parsing never fails. A malformed fragment (unterminated block, unknown
//! function, wrong arity, bad regex) or a directive naming an unknown provider
//! is logged and left out; the rest of the template is kept.

use crate::core::error::{PromptError, Result};
use regex::Regex;
use std::iter::Peekable;
use std::str::Chars;

/// One decoration step of a directive
#[derive(Debug, Clone)]
pub enum Stage {
    Prefix(String),
    Suffix(String),
    Wrap(String, String),
    Replace(Regex, String),
}

impl Stage {
    /// Rewrite unstyled provider output; only `replace` changes it
    fn rewrite(&self, raw: String) -> String {
        match self {
            Stage::Replace(pattern, with) => pattern.replace_all(&raw, with.as_str()).into_owned(),
            _ => raw,
        }
    }

    /// Add decoration passed through `style`, only when `value` is non-empty
    fn surround(&self, value: String, style: &dyn Fn(&str) -> String) -> String {
        match self {
            _ if value.is_empty() => value,
            Stage::Prefix(prefix) => format!("{}{value}", style(prefix)),
            Stage::Suffix(suffix) => format!("{value}{}", style(suffix)),
            Stage::Wrap(prefix, suffix) => format!("{}{value}{}", style(prefix), style(suffix)),
            Stage::Replace(..) => value,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Directive {
    pub provider: String,
    pub stages: Vec<Stage>,
}

impl Directive {
    /// Build the directive's text from the provider's styled `output` and its
    /// unstyled form `raw`.
    ///
    /// `replace` stages run first, in order, on `raw`; a rewritten value is
    /// restyled with `style`. Decoration stages then wrap the result.
    pub fn decorate(&self, output: String, raw: &str, style: &dyn Fn(&str) -> String) -> String {
        let mut value = output;
        if self.stages.iter().any(|stage| matches!(stage, Stage::Replace(..))) {
            let rewritten = self
                .stages
                .iter()
                .fold(raw.to_string(), |raw, stage| stage.rewrite(raw));
            if rewritten != raw {
                value = if rewritten.is_empty() { rewritten } else { style(&rewritten) };
            }
        }

        self.stages
            .iter()
            .fold(value, |value, stage| stage.surround(value, style))
    }
}

#[derive(Debug, Clone)]
pub enum Segment {
    Literal(String),
    Directive(Directive),
}

#[derive(Debug, Clone, Default)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse `source`, keeping only directives whose provider satisfies `is_known`
    pub fn parse(source: &str, is_known: impl Fn(&str) -> bool) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while !rest.is_empty() {
            if let Some(block) = rest.strip_prefix("{{") {
                let Some(end) = find_block_end(block) else {
                    log::warn!("{}", PromptError::template_syntax(rest, "unterminated block"));
                    break;
                };
                match parse_pipeline(&block[..end]) {
                    Ok(directive) => push_directive(&mut segments, &mut literal, directive, &is_known),
                    Err(e) => log::warn!("{e}"),
                }
                rest = &block[end + 2..];
                continue;
            }

            if rest.starts_with('<') {
                if let Some((directive, consumed)) = parse_angle(rest) {
                    push_directive(&mut segments, &mut literal, directive, &is_known);
                    rest = &rest[consumed..];
                    continue;
                }
            }

            let mut chars = rest.chars();
            if let Some(ch) = chars.next() {
                literal.push(ch);
            }
            rest = chars.as_str();
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Directives with their position in [`Template::segments`]
    pub fn directives(&self) -> impl Iterator<Item = (usize, &Directive)> {
        self.segments
            .iter()
            .enumerate()
            .filter_map(|(index, segment)| match segment {
                Segment::Directive(directive) => Some((index, directive)),
                Segment::Literal(_) => None,
            })
    }
}

fn push_directive(
    segments: &mut Vec<Segment>,
    literal: &mut String,
    directive: Directive,
    is_known: &impl Fn(&str) -> bool,
) {
    if !is_known(&directive.provider) {
        log::warn!("Unknown provider '{}', directive dropped", directive.provider);
        return;
    }
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
    segments.push(Segment::Directive(directive));
}

/// Byte offset of the `}}` closing a block, ignoring braces inside strings
fn find_block_end(block: &str) -> Option<usize> {
    let mut in_string = false;
    let mut escaped = false;
    for (index, ch) in block.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
        } else if ch == '"' {
            in_string = true;
        } else if block[index..].starts_with("}}") {
            return Some(index);
        }
    }
    None
}

/// `<pre%name%post>` starting at the beginning of `text`, with the number of
/// bytes it spans
fn parse_angle(text: &str) -> Option<(Directive, usize)> {
    let close = text.find('>')?;
    let inner = &text[1..close];
    if inner.contains('<') {
        return None;
    }

    let open = inner.find('%')?;
    let name_len = inner[open + 1..].find('%')?;
    let name = &inner[open + 1..open + 1 + name_len];
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return None;
    }

    let prefix = &inner[..open];
    let suffix = &inner[open + name_len + 2..];
    let stages = if prefix.is_empty() && suffix.is_empty() {
        Vec::new()
    } else {
        vec![Stage::Wrap(prefix.to_string(), suffix.to_string())]
    };

    Some((
        Directive {
            provider: name.to_string(),
            stages,
        },
        close + 1,
    ))
}

#[derive(Debug)]
enum Token {
    Word(String),
    Text(String),
    Pipe,
}

fn parse_pipeline(body: &str) -> Result<Directive> {
    let syntax = |reason: String| PromptError::template_syntax(body.trim(), reason);

    let tokens = tokenize(body).map_err(syntax)?;
    let mut groups = tokens.split(|token| matches!(token, Token::Pipe));

    let provider = match groups.next() {
        Some([Token::Word(function), Token::Text(name)]) if function == "load" => name.clone(),
        _ => return Err(syntax("a block must start with load \"provider\"".to_string())),
    };

    let stages = groups
        .map(parse_stage)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(syntax)?;

    Ok(Directive { provider, stages })
}

fn parse_stage(group: &[Token]) -> std::result::Result<Stage, String> {
    let (function, args) = match group {
        [Token::Word(function), args @ ..] => (function.as_str(), args),
        _ => return Err("expected a function name after '|'".to_string()),
    };
    let args = args
        .iter()
        .map(|token| match token {
            Token::Text(text) => Ok(text.as_str()),
            _ => Err(format!("arguments of '{function}' must be quoted strings")),
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    match (function, args.as_slice()) {
        ("prefix", [prefix]) => Ok(Stage::Prefix(prefix.to_string())),
        ("suffix", [suffix]) => Ok(Stage::Suffix(suffix.to_string())),
        ("wrap", [prefix, suffix]) => Ok(Stage::Wrap(prefix.to_string(), suffix.to_string())),
        ("replace", [pattern, with]) => Regex::new(pattern)
            .map(|regex| Stage::Replace(regex, with.to_string()))
            .map_err(|e| format!("invalid regex: {e}")),
        ("prefix" | "suffix" | "wrap" | "replace", _) => {
            Err(format!("wrong number of arguments for '{function}'"))
        }
        _ => Err(format!("unknown function '{function}'")),
    }
}

fn tokenize(body: &str) -> std::result::Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = body.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '|' => {
                chars.next();
                tokens.push(Token::Pipe);
            }
            '"' => {
                chars.next();
                tokens.push(Token::Text(read_string(&mut chars)?));
            }
            _ => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || c == '|' || c == '"' {
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                tokens.push(Token::Word(word));
            }
        }
    }

    Ok(tokens)
}

/// Read a string literal whose opening quote was already consumed
fn read_string(chars: &mut Peekable<Chars>) -> std::result::Result<String, String> {
    let mut text = String::new();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => return Ok(text),
            '\\' => match chars.next() {
                Some('n') => text.push('\n'),
                Some('t') => text.push('\t'),
                Some('"') => text.push('"'),
                Some('\\') => text.push('\\'),
                Some(other) => return Err(format!("unknown escape '\\{other}'")),
                None => break,
            },
            _ => text.push(ch),
        }
    }
    Err("unterminated string".to_string())
}
