use std::fmt;

use super::{eager_mutation_fn, FetcherRenderer, MutationHook, OperationBinding, QueryHook, RenderContext};
use crate::mapper::MapperReference;

/// Calls a user supplied function, `fn<TData, TVariables>(document, variables?)`, returning the
/// function react-query invokes.
#[derive(Debug, Clone)]
pub(crate) struct CustomMapperFetcher {
    mapper: MapperReference,
    /// Mutations hand the mapper only the document, react-query passes the variables later.
    lazy_variables: bool,
}

impl CustomMapperFetcher {
    pub(crate) fn new(mapper: MapperReference, lazy_variables: bool) -> Self {
        CustomMapperFetcher { mapper, lazy_variables }
    }

    fn typed_fetcher(&self, operation: &OperationBinding<'_>) -> String {
        format!(
            "{}<{}, {}>",
            self.mapper.symbol(),
            operation.result_type,
            operation.variables_type
        )
    }
}

impl FetcherRenderer for CustomMapperFetcher {
    /// The mapper import, or nothing when the mapper is already in scope.
    fn runtime_helper(&self) -> Option<String> {
        self.mapper.import_statement()
    }

    fn query_binding(
        &self,
        operation: &OperationBinding<'_>,
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, fmt::Error> {
        QueryHook {
            operation,
            hook: ctx.use_query_hook(),
            parameters: &[],
            query_fn: format!(
                "{}({}, variables)",
                self.typed_fetcher(operation),
                operation.document_variable
            ),
        }
        .render()
    }

    fn mutation_binding(
        &self,
        operation: &OperationBinding<'_>,
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, fmt::Error> {
        let typed_fetcher = self.typed_fetcher(operation);
        let document = operation.document_variable;

        let mutation_fn = if self.lazy_variables {
            format!("{typed_fetcher}({document})")
        } else {
            eager_mutation_fn(operation, &format!("{typed_fetcher}({document}, variables)"))
        };

        MutationHook {
            operation,
            hook: ctx.use_mutation_hook(),
            parameters: &[],
            mutation_fn,
        }
        .render()
    }
}
