use std::fmt;

use serde_json::{Map, Value};

use super::{
    eager_mutation_fn, FetcherRenderer, MutationHook, OperationBinding, QueryHook, RenderContext, RESPONSE_HANDLING,
};

/// Calls `fetch` against an endpoint and with request options fixed at generation time.
#[derive(Debug, Clone)]
pub(crate) struct HardcodedFetchFetcher {
    endpoint: String,
    fetch_params: Map<String, Value>,
}

impl HardcodedFetchFetcher {
    pub(crate) fn new(endpoint: String, fetch_params: Map<String, Value>) -> Self {
        HardcodedFetchFetcher { endpoint, fetch_params }
    }

    /// An absolute URL becomes a string literal, anything else is taken as a TypeScript expression
    /// such as `process.env.API_URL`.
    pub(crate) fn endpoint(&self) -> String {
        match url::Url::parse(&self.endpoint) {
            Ok(_) => Value::String(self.endpoint.clone()).to_string(),
            Err(error) => {
                tracing::debug!("endpoint '{}' is not a URL ({error}), using it as an expression", self.endpoint);
                format!("{} as string", self.endpoint)
            }
        }
    }

    /// One `key: <json>,` line per request option, `method` always first.
    pub(crate) fn fetch_params(&self) -> String {
        let mut params = Map::new();
        params.insert(String::from("method"), Value::String(String::from("POST")));

        for (key, value) in &self.fetch_params {
            params.insert(key.clone(), value.clone());
        }

        params
            .iter()
            .map(|(key, value)| format!("      {key}: {value},"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn fetcher_call(operation: &OperationBinding<'_>) -> String {
        let OperationBinding {
            document_variable,
            result_type,
            variables_type,
            ..
        } = operation;

        format!("fetcher<{result_type}, {variables_type}>({document_variable}, variables)")
    }
}

impl FetcherRenderer for HardcodedFetchFetcher {
    fn runtime_helper(&self) -> Option<String> {
        Some(format!(
            r#"
function fetcher<TData, TVariables>(query: string, variables?: TVariables) {{
  return async (): Promise<TData> => {{
    const res = await fetch({endpoint}, {{
{fetch_params}
      body: JSON.stringify({{ query, variables }}),
    }});

{RESPONSE_HANDLING}
  }};
}}"#,
            endpoint = self.endpoint(),
            fetch_params = self.fetch_params(),
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
            parameters: &[],
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
            parameters: &[],
            mutation_fn: eager_mutation_fn(operation, &Self::fetcher_call(operation)),
        }
        .render()
    }
}
