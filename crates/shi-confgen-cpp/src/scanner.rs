//! Declaration scanner.
//!
//! Walks the token stream tracking namespaces and class bodies and records
//! every class or struct definition with its direct bases and data members.
//! Anything that is not a namespace, a class definition or a data member is
//! skipped as a whole declaration.

use crate::SyntaxError;
use crate::lexer::{Token, TokenKind};
use crate::types::{render, shape_of};
use shi_confgen_core::{FieldDefinition, TypeDefinition, Visibility};

/// Keywords dropped from a member's type spelling.
const DROPPED_SPECIFIERS: &[&str] = &["mutable", "volatile", "inline"];

/// Keywords that make a member immutable.
const IMMUTABLE_SPECIFIERS: &[&str] = &["const", "constexpr"];

/// Keywords that make a data member class-level rather than per instance.
const STORAGE_SPECIFIERS: &[&str] = &["static", "thread_local"];

/// Scan a whole translation unit.
pub(crate) fn scan(tokens: &[Token]) -> Result<Vec<TypeDefinition>, SyntaxError> {
    let mut scanner = Scanner {
        tokens,
        pos: 0,
        types: Vec::new(),
    };
    scanner.scope("", None)?;
    Ok(scanner.types)
}

struct Scanner<'a> {
    tokens: &'a [Token],
    pos: usize,
    types: Vec<TypeDefinition>,
}

impl<'a> Scanner<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + offset)
    }

    fn bump(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn at_punct(&self, c: char) -> bool {
        self.peek().is_some_and(|token| token.is_punct(c))
    }

    fn current_line(&self) -> usize {
        self.peek()
            .or_else(|| self.tokens.last())
            .map_or(1, |token| token.line)
    }

    /// Scan declarations until end of input, or until the `}` closing a
    /// namespace body opened on `open_line`.
    fn scope(&mut self, namespace: &str, open_line: Option<usize>) -> Result<(), SyntaxError> {
        while let Some(token) = self.peek() {
            match &token.kind {
                TokenKind::Punct('}') => {
                    if open_line.is_some() {
                        self.pos += 1;
                        return Ok(());
                    }
                    return Err(SyntaxError::new(token.line, "unbalanced `}`"));
                }
                TokenKind::Punct(';') => self.pos += 1,
                TokenKind::Ident(word) => match word.as_str() {
                    "namespace" => self.namespace(namespace)?,
                    "inline" if self.peek_at(1).is_some_and(|t| t.is_ident("namespace")) => {
                        self.pos += 1;
                    }
                    "extern"
                        if matches!(self.peek_at(1).map(|t| &t.kind), Some(TokenKind::Str(_)))
                            && self.peek_at(2).is_some_and(|t| t.is_punct('{')) =>
                    {
                        let line = token.line;
                        self.pos += 3;
                        self.scope(namespace, Some(line))?;
                    }
                    "class" | "struct" => self.class(namespace)?,
                    "template" => {
                        self.pos += 1;
                        self.skip_template_params()?;
                        self.skip_declaration()?;
                    }
                    _ => self.skip_declaration()?,
                },
                _ => self.skip_declaration()?,
            }
        }

        match open_line {
            Some(line) => Err(SyntaxError::new(
                line,
                "unexpected end of input, `{` is never closed",
            )),
            None => Ok(()),
        }
    }

    fn namespace(&mut self, enclosing: &str) -> Result<(), SyntaxError> {
        self.pos += 1;
        let mut segments = Vec::new();
        while let Some(token) = self.peek() {
            match &token.kind {
                TokenKind::Ident(word) if word == "inline" => self.pos += 1,
                TokenKind::Ident(word) => {
                    segments.push(word.clone());
                    self.pos += 1;
                }
                TokenKind::Scope => self.pos += 1,
                _ => break,
            }
        }

        if !self.at_punct('{') {
            // namespace alias
            return self.skip_declaration();
        }
        let line = self.current_line();
        self.pos += 1;
        let namespace = join_scope(enclosing, &segments.join("::"));
        self.scope(&namespace, Some(line))
    }

    /// Scan a `class`/`struct` starting at the keyword.
    ///
    /// Definitions are recorded; forward declarations, specializations and
    /// elaborated type uses are skipped.
    fn class(&mut self, namespace: &str) -> Result<(), SyntaxError> {
        let default_visibility = match self.bump() {
            Some(keyword) if keyword.is_ident("struct") => Visibility::Public,
            _ => Visibility::Private,
        };

        let mut name: Option<String> = None;
        while let Some(token) = self.peek() {
            match &token.kind {
                TokenKind::Punct('[') => self.skip_balanced('[', ']')?,
                TokenKind::Ident(word) if word == "final" => self.pos += 1,
                TokenKind::Ident(word) => {
                    self.pos += 1;
                    if self.at_punct('(') {
                        // alignas(..) or an export macro with arguments
                        self.skip_balanced('(', ')')?;
                    } else {
                        name = Some(word.clone());
                    }
                }
                TokenKind::Scope => self.pos += 1,
                _ => break,
            }
        }

        match self.peek() {
            Some(token) if token.is_punct(';') => {
                self.pos += 1;
                return Ok(());
            }
            Some(token) if token.is_punct('{') || token.is_punct(':') => {}
            _ => return self.skip_declaration(),
        }

        let mut bases = Vec::new();
        if self.at_punct(':') {
            self.pos += 1;
            bases = self.base_clause();
            if !self.at_punct('{') {
                return self.skip_declaration();
            }
        }

        let Some(name) = name else {
            self.skip_balanced('{', '}')?;
            return self.skip_declaration();
        };

        let open_line = self.current_line();
        self.pos += 1;

        let index = self.types.len();
        let mut ty = TypeDefinition::new(name, namespace);
        ty.bases = bases;
        self.class_body(&mut ty, default_visibility, open_line)?;
        tracing::trace!(
            "Found {} with {} base(s)",
            ty.qualified_name(),
            ty.bases.len()
        );
        // Nested types were pushed while scanning the body; keep the outer one first.
        self.types.insert(index, ty);

        // Trailing declarators, e.g. `struct Foo { .. } foo;`
        self.skip_declaration()
    }

    /// Read base specifiers up to the opening `{`.
    fn base_clause(&mut self) -> Vec<String> {
        let mut bases = Vec::new();
        let mut current: Vec<Token> = Vec::new();
        let mut angle = 0usize;
        while let Some(token) = self.peek() {
            match &token.kind {
                TokenKind::Punct('{') | TokenKind::Punct(';') if angle == 0 => break,
                TokenKind::Punct('<') => angle += 1,
                TokenKind::Punct('>') => angle = angle.saturating_sub(1),
                _ => {}
            }
            self.pos += 1;

            if token.is_punct(',') && angle == 0 {
                push_base(&mut bases, &current);
                current.clear();
                continue;
            }
            let keyword = ["public", "protected", "private", "virtual"]
                .iter()
                .any(|k| token.is_ident(k));
            if !(keyword && angle == 0) {
                current.push(token.clone());
            }
        }
        push_base(&mut bases, &current);
        bases
    }

    fn class_body(
        &mut self,
        ty: &mut TypeDefinition,
        mut visibility: Visibility,
        open_line: usize,
    ) -> Result<(), SyntaxError> {
        let nested_scope = ty.qualified_name();
        while let Some(token) = self.peek() {
            match &token.kind {
                TokenKind::Punct('}') => {
                    self.pos += 1;
                    return Ok(());
                }
                TokenKind::Punct(';') => self.pos += 1,
                TokenKind::Ident(word) => match word.as_str() {
                    "public" | "protected" | "private"
                        if self.peek_at(1).is_some_and(|t| t.is_punct(':')) =>
                    {
                        visibility = match word.as_str() {
                            "public" => Visibility::Public,
                            "protected" => Visibility::Protected,
                            _ => Visibility::Private,
                        };
                        self.pos += 2;
                    }
                    "class" | "struct" => self.class(&nested_scope)?,
                    "template" => {
                        self.pos += 1;
                        self.skip_template_params()?;
                        self.skip_declaration()?;
                    }
                    "enum" | "union" | "using" | "typedef" | "friend" | "static_assert" => {
                        self.skip_declaration()?;
                    }
                    _ => self.member(ty, visibility)?,
                },
                _ => self.member(ty, visibility)?,
            }
        }

        Err(SyntaxError::new(
            open_line,
            format!("unexpected end of input in body of `{}`", ty.name),
        ))
    }

    /// Scan one member declaration, recording any data members it declares.
    fn member(&mut self, ty: &mut TypeDefinition, visibility: Visibility) -> Result<(), SyntaxError> {
        if self.at_function_declaration() {
            return self.skip_declaration();
        }

        let start = self.pos;
        let mut depth = 0usize;
        loop {
            let Some(token) = self.peek() else {
                return Err(SyntaxError::new(
                    self.current_line(),
                    "unexpected end of input in member declaration",
                ));
            };
            match &token.kind {
                TokenKind::Punct('(' | '[' | '{') => depth += 1,
                TokenKind::Punct('}') if depth == 0 => break,
                TokenKind::Punct(')' | ']' | '}') => {
                    if depth == 0 {
                        return Err(SyntaxError::new(
                            token.line,
                            format!("unbalanced `{}`", token.text()),
                        ));
                    }
                    depth -= 1;
                }
                TokenKind::Punct(';') if depth == 0 => break,
                _ => {}
            }
            self.pos += 1;
        }

        let declaration = &self.tokens[start..self.pos];
        if self.at_punct(';') {
            self.pos += 1;
        }

        for field in data_members(declaration) {
            tracing::trace!("  {} {}: {}", visibility, field.name, field.type_name);
            ty.push_field(visibility, field);
        }
        Ok(())
    }

    /// Whether the declaration at the cursor declares a function.
    ///
    /// A `(` before any initializer, outside template arguments and array
    /// extents, marks a function; so does the `operator` keyword.
    fn at_function_declaration(&self) -> bool {
        let mut angle = 0usize;
        let mut bracket = 0usize;
        for token in &self.tokens[self.pos..] {
            match &token.kind {
                TokenKind::Ident(word) if word == "operator" => return true,
                TokenKind::Punct('<') => angle += 1,
                TokenKind::Punct('>') => angle = angle.saturating_sub(1),
                TokenKind::Punct('[') => bracket += 1,
                TokenKind::Punct(']') => bracket = bracket.saturating_sub(1),
                TokenKind::Punct('(') if angle == 0 && bracket == 0 => return true,
                TokenKind::Punct(';' | '{' | '=' | '}') if angle == 0 && bracket == 0 => {
                    return false;
                }
                _ => {}
            }
        }
        false
    }

    /// Skip one declaration: through its terminating `;`, or through a
    /// function body (including a constructor initializer list).
    fn skip_declaration(&mut self) -> Result<(), SyntaxError> {
        let mut function = false;
        let mut assigned = false;
        while let Some(token) = self.peek() {
            match &token.kind {
                TokenKind::Punct(';') => {
                    self.pos += 1;
                    return Ok(());
                }
                TokenKind::Punct('}') => return Ok(()),
                TokenKind::Ident(word) if word == "operator" => {
                    function = true;
                    self.pos += 1;
                    self.skip_operator_symbol();
                }
                TokenKind::Punct('=') => {
                    assigned = true;
                    self.pos += 1;
                }
                TokenKind::Punct('(') => {
                    function |= !assigned;
                    self.skip_balanced('(', ')')?;
                }
                TokenKind::Punct('[') => self.skip_balanced('[', ']')?,
                TokenKind::Punct('{') => {
                    self.skip_balanced('{', '}')?;
                    let more_initializers = self
                        .peek()
                        .is_some_and(|next| next.is_punct(',') || next.is_punct('{'));
                    if function && !more_initializers {
                        return Ok(());
                    }
                }
                TokenKind::Punct(c @ (')' | ']')) => {
                    return Err(SyntaxError::new(token.line, format!("unbalanced `{c}`")));
                }
                _ => self.pos += 1,
            }
        }
        Ok(())
    }

    /// Skip the symbol after `operator`, stopping at its parameter list.
    ///
    /// `operator()` is the one symbol that itself starts with `(`.
    fn skip_operator_symbol(&mut self) {
        if self.at_punct('(') && self.peek_at(1).is_some_and(|t| t.is_punct(')')) {
            self.pos += 2;
        }
        while let Some(token) = self.peek() {
            if let TokenKind::Punct('(' | ';' | '{' | '}') = token.kind {
                return;
            }
            self.pos += 1;
        }
    }

    /// Skip from an opening bracket through its matching close.
    fn skip_balanced(&mut self, open: char, close: char) -> Result<(), SyntaxError> {
        let line = self.current_line();
        let mut depth = 0usize;
        while let Some(token) = self.bump() {
            if token.is_punct(open) {
                depth += 1;
            } else if token.is_punct(close) {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
        }
        Err(SyntaxError::new(
            line,
            format!("unexpected end of input, `{open}` is never closed"),
        ))
    }

    /// Skip a `<...>` template parameter list if the cursor is on one.
    fn skip_template_params(&mut self) -> Result<(), SyntaxError> {
        if !self.at_punct('<') {
            return Ok(());
        }
        let line = self.current_line();
        let mut depth = 0usize;
        while let Some(token) = self.peek() {
            match &token.kind {
                TokenKind::Punct('<') => {
                    depth += 1;
                    self.pos += 1;
                }
                TokenKind::Punct('>') => {
                    depth -= 1;
                    self.pos += 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                TokenKind::Punct('(') => self.skip_balanced('(', ')')?,
                _ => self.pos += 1,
            }
        }
        Err(SyntaxError::new(
            line,
            "unexpected end of input in template parameter list",
        ))
    }
}

fn join_scope(outer: &str, inner: &str) -> String {
    match (outer.is_empty(), inner.is_empty()) {
        (_, true) => outer.to_string(),
        (true, false) => inner.to_string(),
        (false, false) => format!("{outer}::{inner}"),
    }
}

fn push_base(bases: &mut Vec<String>, tokens: &[Token]) {
    if !tokens.is_empty() {
        bases.push(render(tokens));
    }
}

/// Turn the tokens of one data member declaration (without the `;`) into
/// field definitions, one per declarator.
///
/// Class-level (`static`) members yield nothing.
pub(crate) fn data_members(tokens: &[Token]) -> Vec<FieldDefinition> {
    let tokens = strip_leading_attributes(tokens);
    if tokens
        .iter()
        .any(|t| STORAGE_SPECIFIERS.iter().any(|s| t.is_ident(s)))
    {
        tracing::trace!("Skipping static member {}", render(tokens));
        return Vec::new();
    }

    let mut fields = Vec::new();
    let mut base: Option<&[Token]> = None;
    for declarator in split_declarators(tokens) {
        let Some(parts) = Declarator::split(declarator) else {
            continue;
        };
        let (specifiers, pointer) = match base {
            None => {
                let (specifiers, pointer) = split_pointer_suffix(parts.leading);
                base = Some(specifiers);
                (specifiers, pointer)
            }
            // Later declarators only carry their own pointer operators.
            Some(specifiers) => (specifiers, parts.leading),
        };
        if specifiers.is_empty() {
            continue;
        }

        let mut angle = 0usize;
        let mut immutable = false;
        for token in specifiers.iter().chain(pointer) {
            match &token.kind {
                TokenKind::Punct('<') => angle += 1,
                TokenKind::Punct('>') => angle = angle.saturating_sub(1),
                _ => {}
            }
            if angle == 0 && IMMUTABLE_SPECIFIERS.iter().any(|k| token.is_ident(k)) {
                immutable = true;
            }
        }

        let spelled: Vec<Token> = specifiers
            .iter()
            .chain(pointer)
            .chain(parts.extents)
            .filter(|t| !DROPPED_SPECIFIERS.iter().any(|k| t.is_ident(k)))
            .cloned()
            .collect();
        let unqualified: Vec<Token> = spelled
            .iter()
            .filter(|t| !IMMUTABLE_SPECIFIERS.iter().any(|k| t.is_ident(k)))
            .cloned()
            .collect();

        let mut field = FieldDefinition::new(parts.name, render(&spelled), shape_of(&unqualified));
        field.immutable = immutable;
        field.default_value = parts.initializer.filter(|init| !init.is_empty()).map(render);
        fields.push(field);
    }
    fields
}

/// One declarator split around its name.
struct Declarator<'t> {
    /// Tokens before the name: specifiers and type for the first declarator,
    /// pointer operators only for later ones.
    leading: &'t [Token],
    name: String,
    /// Array extents following the name, kept in the type spelling.
    extents: &'t [Token],
    /// Initializer tokens after `=`, or inside `{}`.
    initializer: Option<&'t [Token]>,
}

impl<'t> Declarator<'t> {
    fn split(tokens: &'t [Token]) -> Option<Self> {
        let mut depth = 0usize;
        let mut angle = 0usize;
        let mut end = tokens.len();
        let mut initializer = None;
        for (i, token) in tokens.iter().enumerate() {
            match &token.kind {
                TokenKind::Punct('=') if depth == 0 && angle == 0 => {
                    end = end.min(i);
                    initializer = Some(&tokens[i + 1..]);
                    break;
                }
                TokenKind::Punct('{') if depth == 0 && angle == 0 => {
                    end = end.min(i);
                    let close = tokens.len() - 1;
                    initializer = tokens
                        .last()
                        .filter(|t| t.is_punct('}'))
                        .map(|_| &tokens[i + 1..close]);
                    break;
                }
                // bit-field width
                TokenKind::Punct(':') if depth == 0 && angle == 0 => end = end.min(i),
                TokenKind::Punct('(' | '[') => depth += 1,
                TokenKind::Punct(')' | ']') => depth = depth.saturating_sub(1),
                TokenKind::Punct('<') if depth == 0 => angle += 1,
                TokenKind::Punct('>') if depth == 0 => angle = angle.saturating_sub(1),
                _ => {}
            }
        }

        let head = &tokens[..end];
        let mut name_end = head.len();
        while name_end > 0 && head[name_end - 1].is_punct(']') {
            let mut depth = 0usize;
            let mut i = name_end;
            while i > 0 {
                i -= 1;
                if head[i].is_punct(']') {
                    depth += 1;
                } else if head[i].is_punct('[') {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
            }
            if depth != 0 {
                return None;
            }
            name_end = i;
        }

        let name_index = name_end.checked_sub(1)?;
        let name = head[name_index].ident()?.to_string();
        Some(Self {
            leading: &head[..name_index],
            name,
            extents: &head[name_end..],
            initializer,
        })
    }
}

/// Split the trailing pointer operators (`*`, `&`, and `const` after them)
/// off the specifier tokens.
fn split_pointer_suffix(tokens: &[Token]) -> (&[Token], &[Token]) {
    let mut split = tokens.len();
    while split > 0 {
        let token = &tokens[split - 1];
        let pointer = token.is_punct('*') || token.is_punct('&');
        let qualified_pointer = IMMUTABLE_SPECIFIERS.iter().any(|k| token.is_ident(k))
            && tokens[..split - 1]
                .last()
                .is_some_and(|prev| prev.is_punct('*') || prev.is_punct('&'));
        if pointer || qualified_pointer {
            split -= 1;
        } else {
            break;
        }
    }
    tokens.split_at(split)
}

fn strip_leading_attributes(tokens: &[Token]) -> &[Token] {
    let mut rest = tokens;
    while rest.len() >= 2 && rest[0].is_punct('[') && rest[1].is_punct('[') {
        let mut depth = 0usize;
        let mut end = None;
        for (i, token) in rest.iter().enumerate() {
            if token.is_punct('[') {
                depth += 1;
            } else if token.is_punct(']') {
                depth -= 1;
                if depth == 0 {
                    end = Some(i);
                    break;
                }
            }
        }
        match end {
            Some(end) => rest = &rest[end + 1..],
            None => break,
        }
    }
    rest
}

/// Split a member declaration at top-level commas.
///
/// Angle brackets only count before an initializer starts, where `<` and `>`
/// can only be template argument delimiters.
fn split_declarators(tokens: &[Token]) -> Vec<&[Token]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut angle = 0usize;
    let mut initializing = false;
    let mut start = 0;
    for (i, token) in tokens.iter().enumerate() {
        match &token.kind {
            TokenKind::Punct('(' | '[' | '{') => {
                if depth == 0 && angle == 0 && token.is_punct('{') {
                    initializing = true;
                }
                depth += 1;
            }
            TokenKind::Punct(')' | ']' | '}') => depth = depth.saturating_sub(1),
            TokenKind::Punct('<') if depth == 0 && !initializing => angle += 1,
            TokenKind::Punct('>') if depth == 0 && !initializing => {
                angle = angle.saturating_sub(1);
            }
            TokenKind::Punct('=') if depth == 0 && angle == 0 => initializing = true,
            TokenKind::Punct(',') if depth == 0 && angle == 0 => {
                parts.push(&tokens[start..i]);
                start = i + 1;
                initializing = false;
            }
            _ => {}
        }
    }
    parts.push(&tokens[start..]);
    parts
}
