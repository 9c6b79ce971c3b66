use std::fmt;

use super::{
    eager_mutation_fn, FetcherRenderer, MutationHook, OperationBinding, QueryHook, RenderContext, RESPONSE_HANDLING,
};

const DATA_SOURCE: &str = "dataSource: { endpoint: string, fetchParams?: RequestInit }";

/// Calls `fetch` with an endpoint and request options handed to every hook.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FetchFetcher;

impl FetchFetcher {
    fn fetcher_call(operation: &OperationBinding<'_>) -> String {
        let OperationBinding {
            document_variable,
            result_type,
            variables_type,
            ..
        } = operation;

        format!(
            "fetcher<{result_type}, {variables_type}>(dataSource.endpoint, dataSource.fetchParams || {{}}, \
             {document_variable}, variables)"
        )
    }
}

impl FetcherRenderer for FetchFetcher {
    fn runtime_helper(&self) -> Option<String> {
        Some(format!(
            r#"
function fetcher<TData, TVariables>(endpoint: string, requestInit: RequestInit, query: string, variables?: TVariables) {{
  return async (): Promise<TData> => {{
    const res = await fetch(endpoint, {{
      method: 'POST',
      ...requestInit,
      body: JSON.stringify({{ query, variables }}),
    }});

{RESPONSE_HANDLING}
  }};
}}"#
        ))
    }

    fn query_binding(
        &self,
        operation: &OperationBinding<'_>,
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, fmt::Error> {
        QueryHook {
            operation,
            hook: ctx.use_query_hook(),
            parameters: &[DATA_SOURCE],
            query_fn: Self::fetcher_call(operation),
        }
        .render()
    }

    fn mutation_binding(
        &self,
        operation: &OperationBinding<'_>,
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, fmt::Error> {
        MutationHook {
            operation,
            hook: ctx.use_mutation_hook(),
            parameters: &[DATA_SOURCE],
            mutation_fn: eager_mutation_fn(operation, &Self::fetcher_call(operation)),
        }
        .render()
    }
}
