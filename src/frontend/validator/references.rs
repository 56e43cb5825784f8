//! Block ids and `#name` references

use crate::frontend::core::parser::ast::{NodeKind, Program};
use crate::frontend::core::parser::walk::for_each_program_node;
use crate::util::diagnostic::codes::ErrorCodeDefinition;
use crate::util::diagnostic::Diagnostic;
use crate::util::span::Span;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Names a program declares and uses, in traversal order
#[derive(Debug, Default)]
pub struct SymbolTable<'a> {
    /// First declaration of every block id
    pub ids: IndexMap<&'a str, Span>,
    /// Later declarations of an id already in `ids`
    pub duplicates: Vec<(&'a str, Span)>,
    pub components: HashSet<&'a str>,
    pub references: Vec<(&'a str, Span)>,
    pub blocks: usize,
}

impl<'a> SymbolTable<'a> {
    pub fn collect(program: &'a Program) -> Self {
        let mut table = Self::default();
        for_each_program_node(program, &mut |node| {
            if node.is_block() {
                table.blocks += 1;
            }
            if let Some(id) = node.block_id() {
                if table.ids.contains_key(id) {
                    table.duplicates.push((id, node.span));
                } else {
                    table.ids.insert(id, node.span);
                }
            }
            match &node.kind {
                NodeKind::ComponentDef { name, .. } => {
                    table.components.insert(name.as_str());
                }
                NodeKind::BlockReference { name } => {
                    table.references.push((name.as_str(), node.span));
                }
                _ => {}
            }
        });
        table
    }

    pub fn is_declared(
        &self,
        name: &str,
    ) -> bool {
        self.ids.contains_key(name) || self.components.contains(name)
    }

    /// One `DUPLICATE_ID` per occurrence after the first
    pub fn duplicate_diagnostics(&self) -> Vec<Diagnostic> {
        self.duplicates
            .iter()
            .map(|(id, span)| ErrorCodeDefinition::duplicate_id(id).at(*span).build())
            .collect()
    }

    pub fn undefined_diagnostics(&self) -> Vec<Diagnostic> {
        self.references
            .iter()
            .filter(|(name, _)| !self.is_declared(name))
            .map(|(name, span)| {
                ErrorCodeDefinition::undefined_reference(name)
                    .at(*span)
                    .build()
            })
            .collect()
    }

    pub fn unused_diagnostics(&self) -> Vec<Diagnostic> {
        let used: HashSet<&str> = self.references.iter().map(|(name, _)| *name).collect();
        self.ids
            .iter()
            .filter(|(id, _)| !used.contains(*id))
            .map(|(id, span)| ErrorCodeDefinition::unused_block(id).at(*span).build())
            .collect()
    }
}
