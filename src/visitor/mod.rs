use crate::ast::{ASTNode, Callee, Function};
use crate::Result;

/// Hooks invoked by [`Visitable::accept`] in pre-order. Every hook defaults
/// to a no-op so analyzers only implement what they collect.
pub trait Visitor {
    fn visit_import(&mut self, _source: &str) -> Result<()> {
        Ok(())
    }

    fn visit_export(&mut self, _declaration: Option<&ASTNode>, _is_default: bool) -> Result<()> {
        Ok(())
    }

    fn visit_function(&mut self, _function: &Function) -> Result<()> {
        Ok(())
    }

    fn visit_call(&mut self, _callee: &Callee, _arguments: &[ASTNode]) -> Result<()> {
        Ok(())
    }

    fn visit_try(
        &mut self,
        _block: &[ASTNode],
        _handler: Option<&[ASTNode]>,
        _finalizer: Option<&[ASTNode]>,
    ) -> Result<()> {
        Ok(())
    }
}

pub trait Visitable {
    fn accept(&self, visitor: &mut dyn Visitor) -> Result<()>;
}

impl Visitable for ASTNode {
    fn accept(&self, visitor: &mut dyn Visitor) -> Result<()> {
        match self {
            ASTNode::Import { source, .. } => visitor.visit_import(source),
            ASTNode::Export {
                declaration,
                is_default,
            } => {
                visitor.visit_export(declaration.as_deref(), *is_default)?;
                match declaration {
                    Some(declaration) => declaration.accept(visitor),
                    None => Ok(()),
                }
            }
            ASTNode::Function(function) => {
                visitor.visit_function(function)?;
                function.defaults.accept(visitor)?;
                function.body.accept(visitor)
            }
            ASTNode::Call { callee, args, .. } => {
                visitor.visit_call(callee, args)?;
                args.accept(visitor)
            }
            ASTNode::Try {
                block,
                handler,
                finalizer,
            } => {
                visitor.visit_try(block, handler.as_deref(), finalizer.as_deref())?;
                block.accept(visitor)?;
                if let Some(handler) = handler {
                    handler.accept(visitor)?;
                }
                if let Some(finalizer) = finalizer {
                    finalizer.accept(visitor)?;
                }
                Ok(())
            }
            ASTNode::Program(nodes) | ASTNode::Block(nodes) => nodes.accept(visitor),
            ASTNode::Variable { .. } => Ok(()),
        }
    }
}

impl Visitable for [ASTNode] {
    fn accept(&self, visitor: &mut dyn Visitor) -> Result<()> {
        for node in self {
            node.accept(visitor)?;
        }
        Ok(())
    }
}

impl Visitable for Vec<ASTNode> {
    fn accept(&self, visitor: &mut dyn Visitor) -> Result<()> {
        self.as_slice().accept(visitor)
    }
}
