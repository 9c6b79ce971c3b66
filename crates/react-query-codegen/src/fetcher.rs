//! The strategies deciding how generated hooks reach the GraphQL API.
//!
//! Every strategy renders the same three things: the runtime `fetcher` helper injected once per
//! generated module, a query hook and a mutation hook. The hooks share one shape and only differ
//! in the extra parameters they take and in how they call the helper, which is what
//! [`QueryHook`] and [`MutationHook`] capture.

mod custom_mapper;
mod fetch;
mod graphql_request;
mod hardcoded;

use std::fmt::{self, Write};

pub(crate) use self::{
    custom_mapper::CustomMapperFetcher, fetch::FetchFetcher, graphql_request::GraphQLRequestFetcher,
    hardcoded::HardcodedFetchFetcher,
};
use crate::{
    config::{FetcherConfig, HookMethod, HookMethodMap},
    keys,
    visitor::CompilationState,
};

const INDENT: &str = "  ";
const DOUBLE_INDENT: &str = "    ";

/// Everything a strategy needs to render the hook of one operation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OperationBinding<'a> {
    /// Declared GraphQL name, used in the query key.
    pub operation_name: &'a str,
    /// Exported name without the `use` prefix.
    pub binding_name: &'a str,
    pub document_variable: &'a str,
    pub result_type: &'a str,
    pub variables_type: &'a str,
    pub has_required_variables: bool,
}

/// Gives strategies access to the configured hooks while recording what the generated module
/// will have to import.
pub(crate) struct RenderContext<'a> {
    hooks: &'a HookMethodMap,
    state: &'a mut CompilationState,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn new(hooks: &'a HookMethodMap, state: &'a mut CompilationState) -> Self {
        RenderContext { hooks, state }
    }

    pub(crate) fn use_query_hook(&mut self) -> &'a HookMethod {
        let hook = &self.hooks.query;
        self.state.use_identifier(&hook.hook);
        self.state.use_identifier(&hook.options);
        hook
    }

    pub(crate) fn use_mutation_hook(&mut self) -> &'a HookMethod {
        let hook = &self.hooks.mutation;
        self.state.use_identifier(&hook.hook);
        self.state.use_identifier(&hook.options);
        hook
    }

    pub(crate) fn add_import(&mut self, statement: &str) {
        self.state.add_import(statement);
    }
}

pub(crate) trait FetcherRenderer {
    /// The helper performing requests, or `None` when nothing has to be injected.
    fn runtime_helper(&self) -> Option<String>;

    fn query_binding(
        &self,
        operation: &OperationBinding<'_>,
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, fmt::Error>;

    fn mutation_binding(
        &self,
        operation: &OperationBinding<'_>,
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, fmt::Error>;
}

/// The one strategy active during a run.
#[derive(Debug)]
pub(crate) enum Fetcher {
    Fetch(FetchFetcher),
    Hardcoded(HardcodedFetchFetcher),
    GraphQLRequest(GraphQLRequestFetcher),
    CustomMapper(CustomMapperFetcher),
}

impl Fetcher {
    pub(crate) fn new(config: &FetcherConfig) -> Self {
        match config {
            FetcherConfig::Fetch => Fetcher::Fetch(FetchFetcher),
            FetcherConfig::Hardcoded { endpoint, fetch_params } => {
                Fetcher::Hardcoded(HardcodedFetchFetcher::new(endpoint.clone(), fetch_params.clone()))
            }
            FetcherConfig::GraphQLRequest => Fetcher::GraphQLRequest(GraphQLRequestFetcher),
            FetcherConfig::CustomMapper { mapper, lazy_variables } => {
                Fetcher::CustomMapper(CustomMapperFetcher::new(mapper.clone(), *lazy_variables))
            }
        }
    }

    fn renderer(&self) -> &dyn FetcherRenderer {
        match self {
            Fetcher::Fetch(fetcher) => fetcher,
            Fetcher::Hardcoded(fetcher) => fetcher,
            Fetcher::GraphQLRequest(fetcher) => fetcher,
            Fetcher::CustomMapper(fetcher) => fetcher,
        }
    }
}

impl FetcherRenderer for Fetcher {
    fn runtime_helper(&self) -> Option<String> {
        self.renderer().runtime_helper()
    }

    fn query_binding(
        &self,
        operation: &OperationBinding<'_>,
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, fmt::Error> {
        self.renderer().query_binding(operation, ctx)
    }

    fn mutation_binding(
        &self,
        operation: &OperationBinding<'_>,
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, fmt::Error> {
        self.renderer().mutation_binding(operation, ctx)
    }
}

/// `export const use<Name> = <TData, TError>(...) => useQuery(key, fetcher, options);`
pub(crate) struct QueryHook<'a> {
    pub operation: &'a OperationBinding<'a>,
    pub hook: &'a HookMethod,
    /// Strategy specific parameters, placed before `variables`.
    pub parameters: &'a [&'a str],
    /// The expression producing the query function.
    pub query_fn: String,
}

impl QueryHook<'_> {
    pub(crate) fn render(&self) -> Result<String, fmt::Error> {
        let OperationBinding {
            operation_name,
            binding_name,
            result_type,
            variables_type,
            has_required_variables,
            ..
        } = *self.operation;

        let HookMethod { hook, options } = self.hook;

        let variables = keys::query_variables_signature(has_required_variables, variables_type);
        let options_parameter = format!("options?: {options}<{result_type}, TError, TData>");

        let mut out = String::new();

        writeln!(out, "export const use{binding_name} = <")?;
        writeln!(out, "{INDENT}TData = {result_type},")?;
        writeln!(out, "{INDENT}TError = unknown")?;
        writeln!(out, ">(")?;
        write_parameters(&mut out, self.parameters, &[&variables, &options_parameter])?;
        writeln!(out, ") =>")?;
        writeln!(out, "{INDENT}{hook}<{result_type}, TError, TData>(")?;
        writeln!(out, "{DOUBLE_INDENT}{},", keys::query_key(operation_name))?;
        writeln!(out, "{DOUBLE_INDENT}{},", self.query_fn)?;
        writeln!(out, "{DOUBLE_INDENT}options")?;
        write!(out, "{INDENT});")?;

        Ok(out)
    }
}

/// `export const use<Name> = <TError, TContext>(...) => useMutation(mutationFn, options);`
pub(crate) struct MutationHook<'a> {
    pub operation: &'a OperationBinding<'a>,
    pub hook: &'a HookMethod,
    pub parameters: &'a [&'a str],
    /// The expression producing the mutation function, receiving the variables.
    pub mutation_fn: String,
}

impl MutationHook<'_> {
    pub(crate) fn render(&self) -> Result<String, fmt::Error> {
        let OperationBinding {
            binding_name,
            result_type,
            variables_type,
            ..
        } = *self.operation;

        let HookMethod { hook, options } = self.hook;

        let options_parameter = format!("options?: {options}<{result_type}, TError, {variables_type}, TContext>");

        let mut out = String::new();

        writeln!(out, "export const use{binding_name} = <")?;
        writeln!(out, "{INDENT}TError = unknown,")?;
        writeln!(out, "{INDENT}TContext = unknown")?;
        writeln!(out, ">(")?;
        write_parameters(&mut out, self.parameters, &[&options_parameter])?;
        writeln!(out, ") =>")?;
        writeln!(out, "{INDENT}{hook}<{result_type}, TError, {variables_type}, TContext>(")?;
        writeln!(out, "{DOUBLE_INDENT}{},", self.mutation_fn)?;
        writeln!(out, "{DOUBLE_INDENT}options")?;
        write!(out, "{INDENT});")?;

        Ok(out)
    }
}

/// `(variables?: V) => <call>()`, the mutation function wrapping a helper call.
pub(crate) fn eager_mutation_fn(operation: &OperationBinding<'_>, fetcher_call: &str) -> String {
    format!(
        "({}) => {fetcher_call}()",
        keys::mutation_variables_signature(operation.variables_type)
    )
}

fn write_parameters(out: &mut String, leading: &[&str], trailing: &[&String]) -> fmt::Result {
    let parameters = leading.iter().copied().chain(trailing.iter().map(|parameter| parameter.as_str()));

    let mut first = true;
    for parameter in parameters {
        if !first {
            out.write_str(",\n")?;
        }
        first = false;
        write!(out, "{INDENT}{parameter}")?;
    }

    out.write_char('\n')
}

/// The response handling shared by the `fetch` based helpers.
pub(crate) const RESPONSE_HANDLING: &str = r#"    const json = await res.json();

    if (json.errors) {
      const { message } = json.errors[0];

      throw new Error(message);
    }

    return json.data;"#;


#[cfg(test)]
mod tests {
    use super::{test_support::*, *};

    #[test]
    fn query_hook_shape() {
        let hook = HookMethodMap::default().query;
        let rendered = QueryHook {
            operation: &GET_USER,
            hook: &hook,
            parameters: &["client: GraphQLClient"],
            query_fn: String::from("fetcher()"),
        }
        .render()
        .unwrap();

        insta::assert_snapshot!(rendered, @r###"
        export const useGetUserQuery = <
          TData = GetUserQuery,
          TError = unknown
        >(
          client: GraphQLClient,
          variables: GetUserQueryVariables,
          options?: UseQueryOptions<GetUserQuery, TError, TData>
        ) =>
          useQuery<GetUserQuery, TError, TData>(
            ['GetUser', variables],
            fetcher(),
            options
          );
        "###);
    }

    #[test]
    fn mutation_hook_shape() {
        let hook = HookMethodMap::default().mutation;
        let rendered = MutationHook {
            operation: &ADD_TODO,
            hook: &hook,
            parameters: &[],
            mutation_fn: eager_mutation_fn(&ADD_TODO, "fetcher(AddTodoDocument, variables)"),
        }
        .render()
        .unwrap();

        insta::assert_snapshot!(rendered, @r###"
        export const useAddTodoMutation = <
          TError = unknown,
          TContext = unknown
        >(
          options?: UseMutationOptions<AddTodoMutation, TError, AddTodoMutationVariables, TContext>
        ) =>
          useMutation<AddTodoMutation, TError, AddTodoMutationVariables, TContext>(
            (variables?: AddTodoMutationVariables) => fetcher(AddTodoDocument, variables)(),
            options
          );
        "###);
    }

    #[test]
    fn every_strategy_records_the_configured_identifiers() {
        let hooks = HookMethodMap {
            query: HookMethod {
                hook: "useSuspenseQuery".into(),
                options: "SuspenseOptions".into(),
            },
            ..Default::default()
        };

        let fetchers = [
            Fetcher::new(&FetcherConfig::Fetch),
            Fetcher::new(&FetcherConfig::Hardcoded {
                endpoint: "https://api.example.com/graphql".into(),
                fetch_params: Default::default(),
            }),
            Fetcher::new(&FetcherConfig::GraphQLRequest),
            Fetcher::new(&FetcherConfig::CustomMapper {
                mapper: crate::mapper::MapperReference::parse("myFetcher").unwrap(),
                lazy_variables: false,
            }),
        ];

        for fetcher in &fetchers {
            let mut state = CompilationState::default();
            let mut ctx = RenderContext::new(&hooks, &mut state);

            let query = fetcher.query_binding(&GET_USER, &mut ctx).unwrap();
            let mutation = fetcher.mutation_binding(&ADD_TODO, &mut ctx).unwrap();

            assert!(query.contains("useSuspenseQuery<GetUserQuery, TError, TData>("), "{fetcher:?}");
            assert!(query.contains("options?: SuspenseOptions<"), "{fetcher:?}");
            assert!(!query.contains("useQuery"), "{fetcher:?}");
            assert!(mutation.contains("useMutation<AddTodoMutation"), "{fetcher:?}");
            assert_eq!(
                state.identifiers_in_use().collect::<Vec<_>>(),
                ["useSuspenseQuery", "SuspenseOptions", "useMutation", "UseMutationOptions"],
                "{fetcher:?}"
            );
        }
    }
}
