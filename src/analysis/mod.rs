//! Structural analysis of a single source file.
//!
//! Capability detection is name-based: a call to any callee named like a
//! keyword in [`CAPABILITY_KEYWORDS`] sets the flag, whether or not the name
//! is bound to an import.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::ast::{ASTNode, Callee, Function};
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::visitor::{Visitable, Visitor};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Authentication,
    Validation,
    Database,
    Caching,
    RateLimit,
}

pub const CAPABILITY_KEYWORDS: &[(Capability, &[&str])] = &[
    (
        Capability::Authentication,
        &["authenticate", "requireAuth", "isAuthenticated"],
    ),
    (Capability::Validation, &["validate", "validateInput", "schema"]),
    (
        Capability::Database,
        &["query", "findOne", "findMany", "create", "update", "delete"],
    ),
    (Capability::Caching, &["cache", "getCache", "setCache"]),
    (Capability::RateLimit, &["rateLimit", "throttle"]),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityFlags {
    pub authentication: bool,
    pub validation: bool,
    pub database: bool,
    pub caching: bool,
    pub rate_limit: bool,
    pub error_handling: bool,
}

impl CapabilityFlags {
    /// Flags only ever go from false to true within one walk.
    pub fn set(&mut self, capability: Capability) {
        let flag = match capability {
            Capability::Authentication => &mut self.authentication,
            Capability::Validation => &mut self.validation,
            Capability::Database => &mut self.database,
            Capability::Caching => &mut self.caching,
            Capability::RateLimit => &mut self.rate_limit,
        };
        *flag = true;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionSignature {
    pub name: String,
    pub params: Vec<String>,
    pub is_async: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralFacts {
    pub imports: Vec<String>,
    pub exports: Vec<String>,
    pub dependencies: Vec<String>,
    pub functions: Vec<FunctionSignature>,
    pub capabilities: CapabilityFlags,
}

#[derive(Debug, Default)]
pub struct StructuralAnalyzer {
    facts: StructuralFacts,
}

impl StructuralAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `source` as a module and collects its facts. Fails with a
    /// parse error when the text is not a well-formed module.
    pub fn analyze_source(source: &str) -> Result<StructuralFacts> {
        let tokens = Lexer::new(source).tokenize()?;
        let ast = Parser::new(tokens).parse()?;
        let facts = Self::new().analyze(&ast)?;
        debug!(
            "Structural analysis: {} imports, {} exports, {} functions",
            facts.imports.len(),
            facts.exports.len(),
            facts.functions.len()
        );
        Ok(facts)
    }

    pub fn analyze(mut self, ast: &ASTNode) -> Result<StructuralFacts> {
        ast.accept(&mut self)?;
        Ok(self.facts)
    }
}

impl Visitor for StructuralAnalyzer {
    fn visit_import(&mut self, source: &str) -> Result<()> {
        self.facts.imports.push(source.to_string());
        self.facts.dependencies.push(source.to_string());
        Ok(())
    }

    fn visit_export(&mut self, declaration: Option<&ASTNode>, is_default: bool) -> Result<()> {
        if is_default {
            return Ok(());
        }
        if let Some(ASTNode::Function(Function {
            name: Some(name), ..
        })) = declaration
        {
            self.facts.exports.push(name.clone());
        }
        Ok(())
    }

    fn visit_function(&mut self, function: &Function) -> Result<()> {
        if !function.is_declaration {
            return Ok(());
        }
        if let Some(name) = &function.name {
            self.facts.functions.push(FunctionSignature {
                name: name.clone(),
                params: function.params.iter().map(|p| p.name().to_string()).collect(),
                is_async: function.is_async,
            });
        }
        Ok(())
    }

    fn visit_call(&mut self, callee: &Callee, _arguments: &[ASTNode]) -> Result<()> {
        if let Some(name) = callee.name() {
            for (capability, keywords) in CAPABILITY_KEYWORDS {
                if keywords.contains(&name) {
                    self.facts.capabilities.set(*capability);
                }
            }
        }
        Ok(())
    }

    fn visit_try(
        &mut self,
        _block: &[ASTNode],
        _handler: Option<&[ASTNode]>,
        _finalizer: Option<&[ASTNode]>,
    ) -> Result<()> {
        self.facts.capabilities.error_handling = true;
        Ok(())
    }
}
