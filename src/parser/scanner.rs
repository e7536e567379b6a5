//! Recursive-descent scanner over one selector string.
//!
//! A `Scanner` owns the cursor for a single parse call and borrows the
//! compiled capability tables. Lookahead is limited to saving and restoring
//! the cursor around namespace pipes (`ns|div` vs `[a|=b]`) and `*|*`.

use crate::ast::{
    self, AstAttribute, AstAttributeValue, AstClassName, AstFormula, AstFormulaOfSelector, AstId,
    AstNamespace, AstNamespaceName, AstPseudoArgument, AstPseudoClass, AstPseudoElement, AstRule,
    AstRuleItem, AstSelector, AstString, AstSubstitution, AstTagName, AstWildcardTag,
};
use crate::chars::{
    decode_hex, is_digit, is_hex, is_ident, is_ident_start, is_quote, is_whitespace,
    MAX_HEX_LENGTH,
};
use crate::errors::ParserError;
use crate::indexes::TokenIndex;
use crate::signatures::{PseudoAtom, PseudoKind, PseudoSignature};
use crate::syntax::pseudo_locations;

use super::CompiledSyntax;

/// Deepest allowed nesting of parenthesised pseudo arguments. Each level
/// costs several recursive frames, so the cap stays low enough for a 2 MiB
/// thread stack in unoptimised builds.
pub(crate) const MAX_NESTING_DEPTH: usize = 64;

type ParseResult<T> = Result<T, ParserError>;

pub(crate) struct Scanner<'a> {
    syntax: &'a CompiledSyntax,
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

// ============================================================================
// CURSOR
// ============================================================================

impl<'a> Scanner<'a> {
    pub fn new(syntax: &'a CompiledSyntax, input: &'a str) -> Self {
        Self {
            syntax,
            input,
            chars: input.chars().collect(),
            pos: 0,
            depth: 0,
        }
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn is(&self, c: char) -> bool {
        self.current() == Some(c)
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn current_is(&self, class: fn(char) -> bool) -> bool {
        self.current().is_some_and(class)
    }

    fn is_tag_start(&self) -> bool {
        self.is('*') || self.current_is(is_ident_start)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn read(&mut self) -> Option<char> {
        let c = self.current();
        self.pos += 1;
        c
    }

    fn rewind(&mut self, pos: usize) {
        self.pos = pos;
    }

    fn skip_whitespace(&mut self) {
        while self.current_is(is_whitespace) {
            self.advance();
        }
    }

    // One whitespace after a hex escape belongs to the escape. CRLF counts
    // as one.
    fn skip_single_whitespace(&mut self) {
        match self.current() {
            Some(' ' | '\t' | '\u{c}' | '\n') => self.advance(),
            Some('\r') => {
                self.advance();
                if self.is('\n') {
                    self.advance();
                }
            }
            _ => {}
        }
    }

    fn match_token(&mut self, index: &TokenIndex) -> Option<String> {
        let token = index.match_at(&self.chars, self.pos)?.to_string();
        self.pos += token.chars().count();
        Some(token)
    }

    // ========================================================================
    // ERRORS
    // ========================================================================

    fn fail(&self, message: impl Into<String>) -> ParserError {
        self.fail_at(message, self.pos)
    }

    fn fail_at(&self, message: impl Into<String>, pos: usize) -> ParserError {
        let position = pos.min(self.chars.len().saturating_sub(1));
        ParserError::new(message, position, self.input)
    }

    fn expect_non_eof(&self) -> ParseResult<()> {
        if self.is_eof() {
            return Err(self.fail("Unexpected end of input."));
        }
        Ok(())
    }

    fn pass(&mut self, expected: char) -> ParseResult<()> {
        match self.current() {
            None => Err(self.fail(format!(
                "Expected \"{expected}\" but end of input reached."
            ))),
            Some(c) if c != expected => Err(self.fail(format!(
                "Expected \"{expected}\" but \"{c}\" found."
            ))),
            Some(_) => {
                self.advance();
                Ok(())
            }
        }
    }

    fn lenient_eof(&self) -> bool {
        self.is_eof() && !self.syntax.strict
    }
}

// ============================================================================
// LEXICAL RULES
// ============================================================================

impl<'a> Scanner<'a> {
    /// Decodes a hex escape. The cursor is on the first hex digit.
    fn parse_hex(&mut self) -> char {
        let mut hex = String::new();
        while hex.len() < MAX_HEX_LENGTH && self.current_is(is_hex) {
            hex.extend(self.read());
        }
        self.skip_single_whitespace();
        decode_hex(&hex)
    }

    /// Quoted string; an unterminated string ends at end of input.
    fn parse_string(&mut self, quote: char) -> ParseResult<String> {
        let mut result = String::new();
        self.pass(quote)?;
        while let Some(c) = self.current() {
            if c == quote {
                self.advance();
                return Ok(result);
            }
            if c != '\\' {
                result.push(c);
                self.advance();
                continue;
            }
            self.advance();
            match self.current() {
                Some(c) if c == quote => {
                    result.push(quote);
                    self.advance();
                }
                // Escaped newlines are line continuations.
                Some('\n' | '\u{c}') => self.advance(),
                Some('\r') => {
                    self.advance();
                    if self.is('\n') {
                        self.advance();
                    }
                }
                Some(c) if is_hex(c) => result.push(self.parse_hex()),
                Some(c) => {
                    result.push(c);
                    self.advance();
                }
                None => {}
            }
        }
        Ok(result)
    }

    fn parse_identifier(&mut self) -> ParseResult<Option<String>> {
        if !self.current_is(is_ident_start) {
            return Ok(None);
        }
        let mut result = String::new();
        while self.is('-') {
            result.push('-');
            self.advance();
        }
        if result == "-" && !self.current_is(is_ident) && !self.is('\\') {
            return Err(self.fail("Identifiers cannot consist of a single hyphen."));
        }
        if self.syntax.strict && result.len() >= 2 {
            return Err(self.fail("Identifiers cannot start with two hyphens with strict mode on."));
        }
        if self.current_is(is_digit) {
            return Err(self.fail("Identifiers cannot start with hyphens followed by digits."));
        }
        while let Some(c) = self.current() {
            if is_ident(c) {
                result.push(c);
                self.advance();
            } else if c == '\\' {
                self.advance();
                self.expect_non_eof()?;
                if self.current_is(is_hex) {
                    result.push(self.parse_hex());
                } else {
                    result.extend(self.read());
                }
            } else {
                break;
            }
        }
        Ok(Some(result))
    }

    /// Raw pseudo argument text up to the closing parenthesis, trimmed.
    fn parse_pseudo_string(&mut self) -> ParseResult<String> {
        let mut result = String::new();
        while let Some(c) = self.current() {
            if c == ')' {
                break;
            }
            if c != '\\' {
                result.push(c);
                self.advance();
                continue;
            }
            self.advance();
            if self.lenient_eof() {
                result.push('\\');
                return Ok(result.trim().to_string());
            }
            self.expect_non_eof()?;
            if self.current_is(is_hex) {
                result.push(self.parse_hex());
            } else {
                result.extend(self.read());
            }
        }
        Ok(result.trim().to_string())
    }

    fn parse_substitution(&mut self) -> ParseResult<AstSubstitution> {
        self.pass('$')?;
        let name = self
            .parse_identifier()?
            .ok_or_else(|| self.fail("Expected substitute name."))?;
        Ok(AstSubstitution { name })
    }
}

// ============================================================================
// SELECTORS AND RULES
// ============================================================================

impl<'a> Scanner<'a> {
    /// Parses the whole input as one selector.
    pub fn parse(mut self) -> ParseResult<AstSelector> {
        let selector = self.parse_selector(false)?;
        if let Some(c) = self.current() {
            return Err(self.fail(format!("Expected end of input but \"{c}\" found.")));
        }
        Ok(selector)
    }

    fn parse_selector(&mut self, relative: bool) -> ParseResult<AstSelector> {
        self.skip_whitespace();
        let mut rules = vec![self.parse_rule(relative)?];
        while self.is(',') {
            self.advance();
            self.skip_whitespace();
            rules.push(self.parse_rule(relative)?);
        }
        Ok(AstSelector { rules })
    }

    /// A compound followed by any chain of combinator-linked compounds. The
    /// chain is collected iteratively and folded into `nested_rule` links.
    fn parse_rule(&mut self, relative: bool) -> ParseResult<AstRule> {
        let syntax = self.syntax;
        let mut head = self.parse_compound(relative)?;
        let mut chain = Vec::new();
        loop {
            self.skip_whitespace();
            if self.is_eof() || self.is(',') || self.is(')') {
                break;
            }
            let combinator = self.match_token(&syntax.combinators);
            self.skip_whitespace();
            let mut next = self.parse_compound(false)?;
            next.combinator = combinator;
            chain.push(next);
        }
        head.nested_rule = chain
            .into_iter()
            .rev()
            .fold(None, |nested, mut rule: AstRule| {
                rule.nested_rule = nested;
                Some(Box::new(rule))
            });
        Ok(head)
    }

    fn parse_compound(&mut self, relative: bool) -> ParseResult<AstRule> {
        let syntax = self.syntax;
        let mut rule = AstRule::default();
        if relative {
            if let Some(combinator) = self.match_token(&syntax.combinators) {
                rule.combinator = Some(combinator);
                self.skip_whitespace();
            }
        }

        while let Some(c) = self.current() {
            match c {
                '|' => {
                    let saved = self.pos;
                    self.advance();
                    let tag_follows = self.is_tag_start();
                    self.rewind(saved);
                    if !tag_follows {
                        break;
                    }
                    self.expect_leading_tag(&rule)?;
                    rule.items.push(self.parse_tag_with_namespace()?);
                }
                _ if self.is_tag_start() => {
                    self.expect_leading_tag(&rule)?;
                    rule.items.push(self.parse_tag_with_namespace()?);
                }
                '.' => {
                    if !self.syntax.class_names {
                        return Err(self.fail("Class names are not enabled."));
                    }
                    self.advance();
                    let name = self
                        .parse_identifier()?
                        .ok_or_else(|| self.fail("Expected class name."))?;
                    rule.items.push(AstRuleItem::ClassName(AstClassName { name }));
                }
                '#' => {
                    if !self.syntax.ids {
                        return Err(self.fail("IDs are not enabled."));
                    }
                    self.advance();
                    let name = self
                        .parse_identifier()?
                        .ok_or_else(|| self.fail("Expected ID name."))?;
                    rule.items.push(AstRuleItem::Id(AstId { name }));
                }
                '&' => {
                    if !self.syntax.nesting {
                        return Err(self.fail("Nesting selector is not enabled."));
                    }
                    self.advance();
                    rule.items.push(AstRuleItem::NestingSelector);
                }
                '[' => {
                    if self.syntax.attributes.is_none() {
                        return Err(self.fail("Attributes are not enabled."));
                    }
                    rule.items.push(AstRuleItem::Attribute(self.parse_attribute()?));
                }
                ':' => rule.items.push(self.parse_pseudo()?),
                _ => break,
            }
        }

        if rule.items.is_empty() {
            return Err(match self.current() {
                None => self.fail("Expected rule but end of input reached."),
                Some(c) => self.fail(format!("Expected rule but \"{c}\" found.")),
            });
        }
        Ok(rule)
    }

    fn expect_leading_tag(&self, rule: &AstRule) -> ParseResult<()> {
        if !rule.items.is_empty() {
            return Err(self.fail("Unexpected tag/namespace start."));
        }
        Ok(())
    }
}

// ============================================================================
// TAGS AND NAMESPACES
// ============================================================================

fn with_namespace(item: AstRuleItem, namespace: AstNamespace) -> AstRuleItem {
    match item {
        AstRuleItem::TagName(tag) => AstRuleItem::TagName(tag.with_namespace(namespace)),
        AstRuleItem::WildcardTag(tag) => AstRuleItem::WildcardTag(tag.with_namespace(namespace)),
        other => other,
    }
}

impl<'a> Scanner<'a> {
    fn parse_tag(&mut self) -> ParseResult<AstRuleItem> {
        if self.is('*') {
            if !self.syntax.tag_wildcard {
                return Err(self.fail("Wildcard tag name is not enabled."));
            }
            self.advance();
            return Ok(AstRuleItem::WildcardTag(AstWildcardTag::default()));
        }
        if self.current_is(is_ident_start) {
            if !self.syntax.tag {
                return Err(self.fail("Tag names are not enabled."));
            }
            let name = self
                .parse_identifier()?
                .ok_or_else(|| self.fail("Expected tag name."))?;
            return Ok(AstRuleItem::TagName(AstTagName {
                name,
                namespace: None,
            }));
        }
        Err(self.fail("Expected tag name."))
    }

    fn plain_tag(&self, name: String) -> ParseResult<AstRuleItem> {
        if !self.syntax.tag {
            return Err(self.fail("Tag names are not enabled."));
        }
        Ok(AstRuleItem::TagName(AstTagName {
            name,
            namespace: None,
        }))
    }

    fn check_namespace(&self, wildcard: bool) -> ParseResult<()> {
        if !self.syntax.namespace {
            return Err(self.fail("Namespaces are not enabled."));
        }
        if wildcard && !self.syntax.namespace_wildcard {
            return Err(self.fail("Wildcard namespace is not enabled."));
        }
        Ok(())
    }

    fn parse_tag_with_namespace(&mut self) -> ParseResult<AstRuleItem> {
        if self.is('*') {
            let saved = self.pos;
            self.advance();
            if !self.is('|') {
                self.rewind(saved);
                return self.parse_tag();
            }
            self.advance();
            if !self.is_tag_start() {
                self.rewind(saved);
                return self.parse_tag();
            }
            self.check_namespace(true)?;
            let tag = self.parse_tag()?;
            return Ok(with_namespace(tag, AstNamespace::WildcardNamespace));
        }

        if self.is('|') {
            self.check_namespace(false)?;
            self.advance();
            let tag = self.parse_tag()?;
            return Ok(with_namespace(tag, AstNamespace::NoNamespace));
        }

        if !self.current_is(is_ident_start) {
            return Err(self.fail("Expected tag name."));
        }
        let identifier = self
            .parse_identifier()?
            .ok_or_else(|| self.fail("Expected tag name."))?;
        if !self.is('|') {
            return self.plain_tag(identifier);
        }
        let saved = self.pos;
        self.advance();
        if !self.is_tag_start() {
            self.rewind(saved);
            return self.plain_tag(identifier);
        }
        self.check_namespace(false)?;
        let tag = self.parse_tag()?;
        Ok(with_namespace(
            tag,
            AstNamespace::NamespaceName(AstNamespaceName { name: identifier }),
        ))
    }
}

// ============================================================================
// ATTRIBUTES
// ============================================================================

impl<'a> Scanner<'a> {
    fn parse_attribute_name(&mut self) -> ParseResult<String> {
        self.parse_identifier()?
            .ok_or_else(|| self.fail("Expected attribute name."))
    }

    fn parse_attribute(&mut self) -> ParseResult<AstAttribute> {
        let syntax = self.syntax;
        let Some(rules) = syntax.attributes.as_ref() else {
            return Err(self.fail("Attributes are not enabled."));
        };
        self.pass('[')?;
        self.skip_whitespace();

        let mut attr = if self.is('|') {
            self.check_namespace(false)?;
            self.advance();
            ast::attribute(self.parse_attribute_name()?)
                .with_namespace(AstNamespace::NoNamespace)
        } else if self.is('*') {
            self.check_namespace(true)?;
            self.advance();
            self.pass('|')?;
            ast::attribute(self.parse_attribute_name()?)
                .with_namespace(AstNamespace::WildcardNamespace)
        } else {
            let identifier = self.parse_attribute_name()?;
            let saved = self.pos;
            if self.is('|') {
                self.advance();
            }
            if self.pos != saved && self.current_is(is_ident_start) {
                self.check_namespace(false)?;
                let name = self.parse_attribute_name()?;
                ast::attribute(name).with_namespace(AstNamespace::NamespaceName(
                    AstNamespaceName { name: identifier },
                ))
            } else {
                self.rewind(saved);
                ast::attribute(identifier)
            }
        };

        self.skip_whitespace();
        if self.lenient_eof() {
            return Ok(attr);
        }
        if self.is(']') {
            self.advance();
            return Ok(attr);
        }

        let operator = self
            .match_token(&rules.operators)
            .ok_or_else(|| self.fail("Expected a valid attribute selector operator."))?;
        self.skip_whitespace();
        self.expect_non_eof()?;
        let value = match self.current() {
            Some(quote) if is_quote(quote) => AstAttributeValue::String(AstString {
                value: self.parse_string(quote)?,
            }),
            Some('$') if syntax.substitutes => {
                AstAttributeValue::Substitution(self.parse_substitution()?)
            }
            _ => {
                let value = self
                    .parse_identifier()?
                    .ok_or_else(|| self.fail("Expected attribute value."))?;
                AstAttributeValue::String(AstString { value })
            }
        };
        attr.operator = Some(operator);
        attr.value = Some(value);

        self.skip_whitespace();
        if self.lenient_eof() {
            return Ok(attr);
        }
        if !self.is(']') {
            let modifier = self
                .parse_identifier()?
                .ok_or_else(|| self.fail("Expected end of attribute selector."))?;
            if !rules.modifiers_enabled {
                return Err(self.fail("Attribute case sensitivity modifiers are not enabled."));
            }
            if !rules.accept_unknown_modifiers && !rules.modifiers.contains(&modifier) {
                return Err(self.fail("Unknown attribute case sensitivity modifier."));
            }
            attr.case_sensitivity_modifier = Some(modifier);
            self.skip_whitespace();
            if self.lenient_eof() {
                return Ok(attr);
            }
        }
        self.pass(']')?;
        Ok(attr)
    }
}

// ============================================================================
// PSEUDO-CLASSES AND PSEUDO-ELEMENTS
// ============================================================================

fn capitalized(atom: PseudoAtom) -> &'static str {
    match atom {
        PseudoAtom::Class => "Pseudo-class",
        PseudoAtom::Element => "Pseudo-element",
    }
}

impl<'a> Scanner<'a> {
    fn unknown_pseudo(&self, atom: PseudoAtom, name: &str, start: usize) -> ParserError {
        let (mut message, locations) = match atom {
            PseudoAtom::Class => (
                format!("Unknown pseudo-class: \"{name}\""),
                pseudo_locations().pseudo_class(name),
            ),
            PseudoAtom::Element => (
                format!("Unknown pseudo-element \"{name}\""),
                pseudo_locations().pseudo_element(name),
            ),
        };
        let help = if locations.is_empty() {
            format!("set `unknown: accept` in the {atom} options to allow unlisted names")
        } else {
            message.push_str(". It is defined in: ");
            message.push_str(&locations.join(", "));
            "choose a syntax level or add a module that defines it".to_string()
        };
        message.push('.');
        self.fail_at(message, start).with_help(help)
    }

    fn parse_pseudo(&mut self) -> ParseResult<AstRuleItem> {
        let start = self.pos;
        self.pass(':')?;

        let syntax = self.syntax;
        let elements = syntax.pseudo_elements.as_ref();
        let double_colon = self.is(':');
        if double_colon {
            let Some(elements) = elements else {
                return Err(self.fail("Pseudo elements are not enabled."));
            };
            if !elements.double_colon {
                return Err(self.fail("Pseudo elements double colon notation is not enabled."));
            }
            self.advance();
        }

        let name = match self.parse_identifier()? {
            Some(name) => name,
            None if double_colon => return Err(self.fail("Expected pseudo-element name.")),
            None => return Err(self.fail("Expected pseudo-class name.")),
        };

        let element_rules = elements.filter(|rules| {
            double_colon || (rules.single_colon && rules.rules.signatures.contains_key(&name))
        });

        if let Some(rules) = element_rules {
            let signature = match rules.rules.signatures.get(&name) {
                Some(signature) => *signature,
                None if rules.rules.accept_unknown => PseudoSignature::UNKNOWN,
                None => return Err(self.unknown_pseudo(PseudoAtom::Element, &name, start)),
            };
            let argument = self.parse_pseudo_argument(&name, PseudoAtom::Element, signature)?;
            if matches!(
                argument,
                Some(AstPseudoArgument::Formula(_) | AstPseudoArgument::FormulaOfSelector(_))
            ) {
                return Err(self.fail("Pseudo-elements cannot have formula argument."));
            }
            return Ok(AstRuleItem::PseudoElement(AstPseudoElement { name, argument }));
        }

        let Some(rules) = syntax.pseudo_classes.as_ref() else {
            return Err(self.fail("Pseudo-classes are not enabled."));
        };
        let signature = match rules.signatures.get(&name) {
            Some(signature) => *signature,
            None if rules.accept_unknown => PseudoSignature::UNKNOWN,
            None => return Err(self.unknown_pseudo(PseudoAtom::Class, &name, start)),
        };
        let argument = self.parse_pseudo_argument(&name, PseudoAtom::Class, signature)?;
        Ok(AstRuleItem::PseudoClass(AstPseudoClass { name, argument }))
    }

    fn parse_pseudo_argument(
        &mut self,
        name: &str,
        atom: PseudoAtom,
        signature: PseudoSignature,
    ) -> ParseResult<Option<AstPseudoArgument>> {
        if !self.is('(') {
            if !signature.optional {
                return Err(self.fail(format!("Argument is required for {atom} \"{name}\".")));
            }
            return Ok(None);
        }
        self.advance();
        self.skip_whitespace();

        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(self.fail("Maximum selector nesting depth exceeded."));
        }
        let argument = self.parse_argument_body(name, atom, signature);
        self.depth -= 1;
        let argument = argument?;

        self.skip_whitespace();
        if self.lenient_eof() {
            return Ok(Some(argument));
        }
        self.pass(')')?;
        Ok(Some(argument))
    }

    fn parse_argument_body(
        &mut self,
        name: &str,
        atom: PseudoAtom,
        signature: PseudoSignature,
    ) -> ParseResult<AstPseudoArgument> {
        if self.syntax.substitutes && self.is('$') {
            return Ok(AstPseudoArgument::Substitution(self.parse_substitution()?));
        }
        match signature.kind {
            PseudoKind::String => {
                let value = self.parse_pseudo_string()?;
                if value.is_empty() {
                    return Err(self.fail(format!("Expected {atom} argument value.")));
                }
                Ok(AstPseudoArgument::String(AstString { value }))
            }
            PseudoKind::Selector => Ok(AstPseudoArgument::Selector(self.parse_selector(true)?)),
            PseudoKind::Formula => {
                let (a, b) = self.parse_formula()?;
                if signature.of_selector {
                    self.skip_whitespace();
                    if self.is('o') || self.is('\\') {
                        if self.parse_identifier()?.as_deref() != Some("of") {
                            return Err(self.fail("Formula of selector parse error."));
                        }
                        self.skip_whitespace();
                        let selector = self.parse_rule(false)?;
                        return Ok(AstPseudoArgument::FormulaOfSelector(AstFormulaOfSelector {
                            a,
                            b,
                            selector,
                        }));
                    }
                }
                Ok(AstPseudoArgument::Formula(AstFormula { a, b }))
            }
            PseudoKind::NoArgument => Err(self.fail(format!(
                "{} \"{name}\" does not accept an argument.",
                capitalized(atom)
            ))),
        }
    }
}

// ============================================================================
// FORMULAS
// ============================================================================

impl<'a> Scanner<'a> {
    fn parse_number(&mut self) -> ParseResult<i64> {
        let start = self.pos;
        let mut digits = String::new();
        while let Some(c) = self.current().filter(|c| is_digit(*c)) {
            digits.push(c);
            self.advance();
        }
        if digits.is_empty() {
            return Err(self.fail("Formula parse error."));
        }
        digits
            .parse::<i64>()
            .map_err(|_| self.fail_at("Formula coefficient is out of range.", start))
    }

    fn signed(&self, value: i64, sign: i64) -> ParseResult<i64> {
        value
            .checked_mul(sign)
            .ok_or_else(|| self.fail("Formula coefficient is out of range."))
    }

    /// `An+B`, `even` or `odd`. Returns `(a, b)`.
    fn parse_formula(&mut self) -> ParseResult<(i64, i64)> {
        if self.is('e') || self.is('o') {
            let saved = self.pos;
            match self.parse_identifier()?.as_deref() {
                Some("even") => {
                    self.skip_whitespace();
                    return Ok((2, 0));
                }
                Some("odd") => {
                    self.skip_whitespace();
                    return Ok((2, 1));
                }
                _ => return Err(self.fail_at("Formula parse error.", saved)),
            }
        }

        let mut sign = 1;
        if self.is('-') {
            self.advance();
            sign = -1;
        }
        if self.is('+') {
            self.advance();
        }

        let mut coefficient = None;
        if self.current_is(is_digit) {
            let number = self.parse_number()?;
            if !self.is('\\') && !self.is('n') {
                return Ok((0, self.signed(number, sign)?));
            }
            coefficient = Some(number);
        }
        let a = self.signed(coefficient.unwrap_or(1), sign)?;

        let variable = if self.is('\\') {
            self.advance();
            if self.current_is(is_hex) {
                Some(self.parse_hex())
            } else {
                self.read()
            }
        } else {
            self.read()
        };
        if variable != Some('n') {
            return Err(self.fail("Formula parse error: expected \"n\"."));
        }

        self.skip_whitespace();
        let sign = match self.current() {
            Some('+') => 1,
            Some('-') => -1,
            _ => return Ok((a, 0)),
        };
        self.advance();
        self.skip_whitespace();
        let b = self.parse_number()?;
        Ok((a, self.signed(b, sign)?))
    }
}
