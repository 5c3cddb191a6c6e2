//! Tree builder with id allocation
//!
//! Variables and labels must carry tree-unique ids. `ExprBuilder` hands them
//! out so callers never have to track counters by hand.

use super::expression::{LabelId, LabelTarget, VarId, Variable};
use crate::types::TypeRef;

/// Allocates variable and label ids for one tree
#[derive(Debug, Default)]
pub struct ExprBuilder {
    next_var: u32,
    next_label: u32,
}

impl ExprBuilder {
    /// Create a builder starting at id 0
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_var(&mut self) -> VarId {
        let id = VarId(self.next_var);
        self.next_var += 1;
        id
    }

    /// Named variable
    pub fn variable(&mut self, name: &str, ty: TypeRef) -> Variable {
        Variable {
            id: self.fresh_var(),
            name: Some(name.to_owned()),
            ty,
            by_ref: false,
        }
    }

    /// Variable without a source name
    pub fn unnamed(&mut self, ty: TypeRef) -> Variable {
        Variable {
            id: self.fresh_var(),
            name: None,
            ty,
            by_ref: false,
        }
    }

    /// By-reference lambda parameter
    pub fn by_ref_parameter(&mut self, name: &str, ty: TypeRef) -> Variable {
        Variable {
            by_ref: true,
            ..self.variable(name, ty)
        }
    }

    /// Named label
    pub fn label(&mut self, name: &str, ty: TypeRef) -> LabelTarget {
        let id = LabelId(self.next_label);
        self.next_label += 1;
        LabelTarget {
            id,
            name: Some(name.to_owned()),
            ty,
        }
    }

    /// Label without a source name
    pub fn unnamed_label(&mut self, ty: TypeRef) -> LabelTarget {
        let id = LabelId(self.next_label);
        self.next_label += 1;
        LabelTarget { id, name: None, ty }
    }
}
