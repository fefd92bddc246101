//! Type spelling normalization and shape detection.

use crate::lexer::{Token, TokenKind};
use shi_confgen_core::{ScalarKind, TypeShape};

/// Containers generated code can fill with `push_back` and iterate in order.
pub(crate) const SEQUENCE_CONTAINERS: &[&str] = &["std::vector", "std::deque", "std::list"];

/// Join tokens into a normalized spelling.
///
/// A space separates two adjacent words and follows every comma; nothing
/// else is spaced, so `std :: vector < int >` becomes `std::vector<int>`.
pub(crate) fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut previous: Option<&Token> = None;
    for token in tokens {
        if let Some(prev) = previous {
            if (prev.is_word() && token.is_word()) || prev.is_punct(',') {
                out.push(' ');
            }
        }
        out.push_str(&token.text());
        previous = Some(token);
    }
    out
}

/// Compute the structured shape of a type from its tokens.
///
/// `tokens` must not contain cv-qualifiers; the caller strips them.
pub(crate) fn shape_of(tokens: &[Token]) -> TypeShape {
    if let Some(kind) = ScalarKind::from_spelling(&render(tokens)) {
        return TypeShape::Scalar(kind);
    }

    match template_parts(tokens) {
        Some((container, args)) if args.len() == 1 => {
            if SEQUENCE_CONTAINERS.contains(&container.as_str()) {
                TypeShape::Sequence {
                    container,
                    element: render(args[0]),
                }
            } else {
                TypeShape::Named
            }
        }
        _ => TypeShape::Named,
    }
}

/// Split `path<arg, arg>` into the path spelling and its top-level arguments.
///
/// Returns `None` unless the tokens are exactly a (possibly `::`-rooted)
/// qualified name followed by one template argument list.
fn template_parts(tokens: &[Token]) -> Option<(String, Vec<&[Token]>)> {
    let mut pos = 0;
    if tokens.first()?.kind == TokenKind::Scope {
        pos += 1;
    }

    let mut segments = Vec::new();
    loop {
        segments.push(tokens.get(pos)?.ident()?.to_string());
        pos += 1;
        if tokens.get(pos)?.kind == TokenKind::Scope {
            pos += 1;
        } else {
            break;
        }
    }

    if !tokens.get(pos)?.is_punct('<') || !tokens.last()?.is_punct('>') {
        return None;
    }

    let inner = &tokens[pos + 1..tokens.len() - 1];
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, token) in inner.iter().enumerate() {
        match &token.kind {
            TokenKind::Punct('<' | '(' | '[' | '{') => depth += 1,
            TokenKind::Punct('>' | ')' | ']' | '}') => {
                // A closing bracket at depth zero means the outer list ended early.
                depth = depth.checked_sub(1)?;
            }
            TokenKind::Punct(',') if depth == 0 => {
                args.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    args.push(&inner[start..]);
    if args.iter().any(|arg| arg.is_empty()) {
        return None;
    }

    Some((segments.join("::"), args))
}

#[cfg(test)]
#[path = "types/types_tests.rs"]
mod types_tests;
