//! Depth-first traversal over the AST.
//!
//! Every node is entered, then its children are visited in field order,
//! then it is exited. Returning [`Flow::SkipChildren`] (or `false`) from
//! `enter` skips the children; `exit` is still called for that node.
//!
//! Child order per node:
//!
//! | Node | Children (key) |
//! |---|---|
//! | Selector | `rules` (indexed) |
//! | Rule | `items` (indexed), then `nestedRule` |
//! | TagName, WildcardTag | `namespace` |
//! | Attribute | `namespace`, then `value` |
//! | PseudoClass, PseudoElement | `argument` |
//! | FormulaOfSelector | `selector` |
//!
//! All other nodes are leaves.
//!
//! # Examples
//!
//! ```rust
//! use cssel::traverse::traverse_fn;
//!
//! let selector = cssel::parse("div.a > span#b").unwrap();
//! let mut kinds = Vec::new();
//! traverse_fn(&selector, |node, _| kinds.push(node.kind()));
//! assert_eq!(kinds, ["Selector", "Rule", "TagName", "ClassName", "Rule", "TagName", "Id"]);
//! ```

use std::marker::PhantomData;

use crate::ast::AstEntity;

// ============================================================================
// VISITOR
// ============================================================================

/// Result of an `enter` hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    #[default]
    Continue,
    SkipChildren,
}

impl From<()> for Flow {
    fn from(_: ()) -> Self {
        Flow::Continue
    }
}

impl From<bool> for Flow {
    fn from(descend: bool) -> Self {
        if descend {
            Flow::Continue
        } else {
            Flow::SkipChildren
        }
    }
}

/// Position of the current node in the tree.
#[derive(Debug, Clone)]
pub struct TraversalContext<'a> {
    pub node: AstEntity<'a>,
    pub parent: Option<AstEntity<'a>>,
    /// Ancestors from the root down to the direct parent.
    pub parents: Vec<AstEntity<'a>>,
    /// Field of the parent holding this node.
    pub key: Option<&'static str>,
    /// Index within that field, for list fields.
    pub index: Option<usize>,
}

pub trait Visitor<'a> {
    fn enter(&mut self, _node: AstEntity<'a>, _context: &TraversalContext<'a>) -> Flow {
        Flow::Continue
    }

    fn exit(&mut self, _node: AstEntity<'a>, _context: &TraversalContext<'a>) {}
}

/// Visitor built from an `enter` closure alone. See [`traverse_fn`].
pub struct EnterFn<F, R> {
    enter: F,
    _result: PhantomData<fn() -> R>,
}

impl<'a, F, R> Visitor<'a> for EnterFn<F, R>
where
    F: FnMut(AstEntity<'a>, &TraversalContext<'a>) -> R,
    R: Into<Flow>,
{
    fn enter(&mut self, node: AstEntity<'a>, context: &TraversalContext<'a>) -> Flow {
        (self.enter)(node, context).into()
    }
}

/// Visitor built from an `enter` and an `exit` closure. See [`hooks`].
pub struct Hooks<E, X, R> {
    enter: E,
    exit: X,
    _result: PhantomData<fn() -> R>,
}

/// Pairs an `enter` and an `exit` closure into a [`Visitor`].
pub fn hooks<'a, E, X, R>(enter: E, exit: X) -> Hooks<E, X, R>
where
    E: FnMut(AstEntity<'a>, &TraversalContext<'a>) -> R,
    X: FnMut(AstEntity<'a>, &TraversalContext<'a>),
    R: Into<Flow>,
{
    Hooks {
        enter,
        exit,
        _result: PhantomData,
    }
}

impl<'a, E, X, R> Visitor<'a> for Hooks<E, X, R>
where
    E: FnMut(AstEntity<'a>, &TraversalContext<'a>) -> R,
    X: FnMut(AstEntity<'a>, &TraversalContext<'a>),
    R: Into<Flow>,
{
    fn enter(&mut self, node: AstEntity<'a>, context: &TraversalContext<'a>) -> Flow {
        (self.enter)(node, context).into()
    }

    fn exit(&mut self, node: AstEntity<'a>, context: &TraversalContext<'a>) {
        (self.exit)(node, context)
    }
}

// ============================================================================
// TRAVERSAL
// ============================================================================

/// Walks `node` and its descendants with `visitor`.
pub fn traverse<'a, V>(node: impl Into<AstEntity<'a>>, visitor: &mut V)
where
    V: Visitor<'a> + ?Sized,
{
    let mut walker = Walker {
        visitor,
        parents: Vec::new(),
    };
    walker.visit(node.into(), None, None);
}

/// Walks with a single `enter` closure. The closure may return `()`, a
/// `bool` (`false` skips children) or a [`Flow`].
pub fn traverse_fn<'a, F, R>(node: impl Into<AstEntity<'a>>, enter: F)
where
    F: FnMut(AstEntity<'a>, &TraversalContext<'a>) -> R,
    R: Into<Flow>,
{
    let mut visitor = EnterFn {
        enter,
        _result: PhantomData,
    };
    traverse(node, &mut visitor);
}

struct Walker<'a, 'v, V: ?Sized> {
    visitor: &'v mut V,
    parents: Vec<AstEntity<'a>>,
}

impl<'a, 'v, V> Walker<'a, 'v, V>
where
    V: Visitor<'a> + ?Sized,
{
    fn visit(&mut self, node: AstEntity<'a>, key: Option<&'static str>, index: Option<usize>) {
        let context = TraversalContext {
            node,
            parent: self.parents.last().copied(),
            parents: self.parents.clone(),
            key,
            index,
        };

        if self.visitor.enter(node, &context) == Flow::Continue {
            self.parents.push(node);
            self.visit_children(node);
            self.parents.pop();
        }

        self.visitor.exit(node, &context);
    }

    fn visit_children(&mut self, node: AstEntity<'a>) {
        match node {
            AstEntity::Selector(selector) => {
                for (i, rule) in selector.rules.iter().enumerate() {
                    self.visit(rule.into(), Some("rules"), Some(i));
                }
            }
            AstEntity::Rule(rule) => {
                for (i, item) in rule.items.iter().enumerate() {
                    self.visit(item.into(), Some("items"), Some(i));
                }
                if let Some(nested) = rule.nested_rule.as_deref() {
                    self.visit(nested.into(), Some("nestedRule"), None);
                }
            }
            AstEntity::TagName(tag) => {
                if let Some(namespace) = &tag.namespace {
                    self.visit(namespace.into(), Some("namespace"), None);
                }
            }
            AstEntity::WildcardTag(tag) => {
                if let Some(namespace) = &tag.namespace {
                    self.visit(namespace.into(), Some("namespace"), None);
                }
            }
            AstEntity::Attribute(attribute) => {
                if let Some(namespace) = &attribute.namespace {
                    self.visit(namespace.into(), Some("namespace"), None);
                }
                if let Some(value) = &attribute.value {
                    self.visit(value.into(), Some("value"), None);
                }
            }
            AstEntity::PseudoClass(pseudo) => {
                if let Some(argument) = &pseudo.argument {
                    self.visit(argument.into(), Some("argument"), None);
                }
            }
            AstEntity::PseudoElement(pseudo) => {
                if let Some(argument) = &pseudo.argument {
                    self.visit(argument.into(), Some("argument"), None);
                }
            }
            AstEntity::FormulaOfSelector(formula) => {
                self.visit((&formula.selector).into(), Some("selector"), None);
            }
            AstEntity::Id(_)
            | AstEntity::ClassName(_)
            | AstEntity::NamespaceName(_)
            | AstEntity::WildcardNamespace
            | AstEntity::NoNamespace
            | AstEntity::NestingSelector
            | AstEntity::String(_)
            | AstEntity::Formula(_)
            | AstEntity::Substitution(_) => {}
        }
    }
}
