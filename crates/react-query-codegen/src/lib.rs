//! Generates typed [react-query](https://tanstack.com/query) hooks from GraphQL operations.
//!
//! Every query and mutation of the given documents becomes an exported `use<Name>` hook calling
//! the configured fetcher, next to a constant holding the operation document. Result and
//! variables types are expected to be generated by a companion types generator and are only
//! referenced by name.

mod config;
mod diagnostics;
mod documents;
mod error;
mod fetcher;
mod keys;
mod mapper;
mod naming;
mod output;
mod visitor;

use std::path::Path;

pub use self::{
    config::{ExternalFragment, FetcherConfig, HookMethod, HookMethodMap, PluginConfig, RawPluginConfig},
    diagnostics::{Diagnostic, DiagnosticKind, Diagnostics},
    documents::{DocumentFile, OperationKind},
    error::CodegenError,
    mapper::MapperReference,
    naming::NamingConvention,
    output::PluginOutput,
};
use self::{
    documents::Fragments,
    fetcher::Fetcher,
    visitor::{BindingsVisitor, CompilationState},
};

/// Generates the hooks for every query and mutation in `documents`.
///
/// Fragments may be defined in any of the documents. Problems that do not prevent generation,
/// like skipped subscriptions, are reported in [`PluginOutput::diagnostics`].
pub fn plugin(documents: &[DocumentFile], config: &PluginConfig) -> Result<PluginOutput, CodegenError> {
    let mut state = CompilationState::default();
    let fragments = Fragments::collect(documents, config, state.diagnostics_mut());
    let fetcher = Fetcher::new(&config.fetcher);

    tracing::debug!(?fetcher, documents = documents.len(), "generating react-query hooks");

    let mut visitor = BindingsVisitor::new(config, &fetcher, &fragments, &mut state);

    for file in documents {
        visitor::walk_document(file.document(), &mut visitor)?;
    }

    Ok(output::assemble(state, &fetcher, &fragments, config))
}

/// Checks that the generated module is written to a TypeScript file.
pub fn validate(output_file: impl AsRef<Path>) -> Result<(), CodegenError> {
    let output_file = output_file.as_ref();

    match output_file.extension().and_then(|extension| extension.to_str()) {
        Some("ts" | "tsx") => Ok(()),
        _ => Err(CodegenError::InvalidExtension(output_file.display().to_string())),
    }
}
