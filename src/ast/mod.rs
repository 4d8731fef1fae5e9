//! Module-surface syntax tree.
//!
//! Only the constructs the structural analysis looks at get their own node:
//! imports, exports, function declarations, call expressions and `try`
//! statements. Everything else is kept as nested blocks so calls inside
//! arbitrary expressions are still reachable by a visitor.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ASTNode {
    Program(Vec<ASTNode>),
    Import {
        source: String,
        position: usize,
    },
    Export {
        declaration: Option<Box<ASTNode>>,
        is_default: bool,
    },
    Function(Function),
    Variable {
        names: Vec<String>,
    },
    Call {
        callee: Callee,
        args: Vec<ASTNode>,
        position: usize,
    },
    Try {
        block: Vec<ASTNode>,
        handler: Option<Vec<ASTNode>>,
        finalizer: Option<Vec<ASTNode>>,
    },
    Block(Vec<ASTNode>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Option<String>,
    pub params: Vec<Parameter>,
    pub is_async: bool,
    /// Statement-level `function` declarations, as opposed to function
    /// expressions and class/object methods.
    pub is_declaration: bool,
    /// Code that runs in the parameter list: default values and decorators.
    pub defaults: Vec<ASTNode>,
    pub body: Vec<ASTNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
    Named(String),
    /// Destructuring patterns and other forms without a simple name.
    Pattern,
}

impl Parameter {
    pub fn name(&self) -> &str {
        match self {
            Parameter::Named(name) => name,
            Parameter::Pattern => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Callee {
    Identifier(String),
    Member { object: Option<String>, property: String },
    Expression,
}

impl Callee {
    /// Bare identifier callees only; member calls such as `db.query()` have
    /// no simple name.
    pub fn name(&self) -> Option<&str> {
        match self {
            Callee::Identifier(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Callee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callee::Identifier(name) => write!(f, "{}", name),
            Callee::Member {
                object: Some(object),
                property,
            } => write!(f, "{}.{}", object, property),
            Callee::Member {
                object: None,
                property,
            } => write!(f, "<expr>.{}", property),
            Callee::Expression => write!(f, "<expr>"),
        }
    }
}

impl ASTNode {
    pub fn children(&self) -> &[ASTNode] {
        match self {
            ASTNode::Program(nodes) | ASTNode::Block(nodes) => nodes,
            ASTNode::Function(function) => &function.body,
            ASTNode::Call { args, .. } => args,
            _ => &[],
        }
    }
}
