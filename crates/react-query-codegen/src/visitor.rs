use cynic_parser::{
    executable::{ExecutableDefinition, OperationDefinition},
    ExecutableDocument,
};
use indexmap::IndexSet;

use crate::{
    config::PluginConfig,
    diagnostics::{DiagnosticKind, Diagnostics},
    documents::{self, Fragments, OperationDescriptor, OperationKind, PrintedOperation},
    fetcher::{Fetcher, FetcherRenderer, OperationBinding, RenderContext},
    keys, naming, CodegenError,
};

#[allow(unused_variables)]
pub(crate) trait Visitor<'a> {
    fn enter_operation(&mut self, operation: OperationDefinition<'a>) -> Result<(), CodegenError> {
        Ok(())
    }

    fn exit_operation(&mut self, operation: OperationDefinition<'a>) -> Result<(), CodegenError> {
        Ok(())
    }
}

/// Walks the operations of a document in definition order.
pub(crate) fn walk_document<'a>(
    document: &'a ExecutableDocument,
    visitor: &mut impl Visitor<'a>,
) -> Result<(), CodegenError> {
    for definition in document.definitions() {
        let ExecutableDefinition::Operation(operation) = definition else {
            continue;
        };

        visitor.enter_operation(operation)?;
        visitor.exit_operation(operation)?;
    }

    Ok(())
}

/// Everything one run accumulates before the output is assembled.
#[derive(Debug, Default)]
pub(crate) struct CompilationState {
    identifiers_in_use: IndexSet<String>,
    imports: IndexSet<String>,
    operations: Vec<String>,
    diagnostics: Diagnostics,
}

impl CompilationState {
    pub(crate) fn use_identifier(&mut self, identifier: &str) {
        if !self.identifiers_in_use.contains(identifier) {
            self.identifiers_in_use.insert(identifier.to_owned());
        }
    }

    pub(crate) fn add_import(&mut self, statement: &str) {
        if !self.imports.contains(statement) {
            self.imports.insert(statement.to_owned());
        }
    }

    pub(crate) fn identifiers_in_use(&self) -> impl Iterator<Item = &str> + '_ {
        self.identifiers_in_use.iter().map(String::as_str)
    }

    pub(crate) fn imports(&self) -> impl Iterator<Item = &str> + '_ {
        self.imports.iter().map(String::as_str)
    }

    pub(crate) fn operations(&self) -> &[String] {
        &self.operations
    }

    pub(crate) fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    pub(crate) fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }
}

/// Turns every query and mutation into its document constant and hook.
pub(crate) struct BindingsVisitor<'a, 's> {
    config: &'a PluginConfig,
    fetcher: &'a Fetcher,
    fragments: &'a Fragments<'a>,
    state: &'s mut CompilationState,
    /// `Namespace.` in front of result and variables types, or empty.
    external_prefix: String,
    current: Option<OperationDescriptor<'a>>,
}

impl<'a, 's> BindingsVisitor<'a, 's> {
    pub(crate) fn new(
        config: &'a PluginConfig,
        fetcher: &'a Fetcher,
        fragments: &'a Fragments<'a>,
        state: &'s mut CompilationState,
    ) -> Self {
        BindingsVisitor {
            config,
            fetcher,
            fragments,
            state,
            external_prefix: config.external_import_prefix(),
            current: None,
        }
    }

    fn compile(
        &mut self,
        operation: OperationDefinition<'a>,
        descriptor: &OperationDescriptor<'a>,
    ) -> Result<(), CodegenError> {
        let printed = PrintedOperation(operation).to_string();
        let document = documents::document_constant(descriptor, &printed, self.config);

        for fragment in &descriptor.fragments {
            if let Some(source) = self.fragments.external_source(fragment) {
                let import = format!(
                    "import {{ {} }} from '{source}';",
                    naming::fragment_variable(fragment, self.config)
                );
                self.state.add_import(&import);
            }
        }

        let names = &descriptor.names;
        let result_type = format!("{}{}", self.external_prefix, names.result_type);
        let variables_type = format!("{}{}", self.external_prefix, names.variables_type);

        let binding = OperationBinding {
            operation_name: descriptor.name.unwrap_or_default(),
            binding_name: &names.binding,
            document_variable: &names.document_variable,
            result_type: &result_type,
            variables_type: &variables_type,
            has_required_variables: descriptor.has_required_variables,
        };

        tracing::debug!(
            "generating {} binding use{}",
            descriptor.kind.keyword(),
            binding.binding_name
        );

        let mut ctx = RenderContext::new(&self.config.hooks, self.state);

        let hook = match descriptor.kind {
            OperationKind::Query => {
                let mut hook = self.fetcher.query_binding(&binding, &mut ctx)?;

                if self.config.expose_query_keys {
                    hook.push_str(&keys::query_key_maker(
                        binding.operation_name,
                        binding.binding_name,
                        binding.variables_type,
                        binding.has_required_variables,
                    ));
                }

                hook
            }
            OperationKind::Mutation => self.fetcher.mutation_binding(&binding, &mut ctx)?,
            OperationKind::Subscription => return Ok(()),
        };

        self.state.operations.push(format!("{document}\n{hook}"));

        Ok(())
    }
}

impl<'a> Visitor<'a> for BindingsVisitor<'a, '_> {
    fn enter_operation(&mut self, operation: OperationDefinition<'a>) -> Result<(), CodegenError> {
        let kind = OperationKind::from(operation.operation_type());
        let name = operation.name();

        if kind == OperationKind::Subscription {
            self.state.diagnostics.push_warning(
                DiagnosticKind::UnsupportedSubscription,
                format!(
                    "Plugin \"typescript-react-query\" does not support GraphQL Subscriptions at the moment! \
                     Ignoring \"{}\"...",
                    name.unwrap_or_default()
                ),
            );
            return Ok(());
        }

        if name.is_none() {
            self.state.diagnostics.push_warning(
                DiagnosticKind::AnonymousOperation,
                format!("An anonymous {} is compiled without a name", kind.keyword()),
            );
        }

        self.current = Some(OperationDescriptor::new(
            operation,
            self.fragments,
            self.config,
            &mut self.state.diagnostics,
        ));

        Ok(())
    }

    fn exit_operation(&mut self, operation: OperationDefinition<'a>) -> Result<(), CodegenError> {
        match self.current.take() {
            Some(descriptor) => self.compile(operation, &descriptor),
            None => Ok(()),
        }
    }
}
