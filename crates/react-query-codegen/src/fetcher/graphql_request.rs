use std::fmt;

use super::{eager_mutation_fn, FetcherRenderer, MutationHook, OperationBinding, QueryHook, RenderContext};

const CLIENT: &str = "client: GraphQLClient";
const CLIENT_IMPORT: &str = "import { GraphQLClient } from 'graphql-request';";

/// Delegates requests to a `graphql-request` client handed to every hook.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct GraphQLRequestFetcher;

impl GraphQLRequestFetcher {
    fn fetcher_call(operation: &OperationBinding<'_>) -> String {
        let OperationBinding {
            document_variable,
            result_type,
            variables_type,
            ..
        } = operation;

        format!("fetcher<{result_type}, {variables_type}>(client, {document_variable}, variables)")
    }
}

impl FetcherRenderer for GraphQLRequestFetcher {
    fn runtime_helper(&self) -> Option<String> {
        Some(String::from(
            r#"
function fetcher<TData, TVariables>(client: GraphQLClient, query: string, variables?: TVariables) {
  return async (): Promise<TData> => client.request<TData, TVariables>(query, variables);
}"#,
        ))
    }

    fn query_binding(
        &self,
        operation: &OperationBinding<'_>,
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, fmt::Error> {
        ctx.add_import(CLIENT_IMPORT);

        QueryHook {
            operation,
            hook: ctx.use_query_hook(),
            parameters: &[CLIENT],
            query_fn: Self::fetcher_call(operation),
        }
        .render()
    }

    fn mutation_binding(
        &self,
        operation: &OperationBinding<'_>,
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, fmt::Error> {
        ctx.add_import(CLIENT_IMPORT);

        MutationHook {
            operation,
            hook: ctx.use_mutation_hook(),
            parameters: &[CLIENT],
            mutation_fn: eager_mutation_fn(operation, &Self::fetcher_call(operation)),
        }
        .render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::HookMethodMap,
        fetcher::test_support::*,
        visitor::CompilationState,
    };

    #[test]
    fn bindings_take_a_client() {
        let (query, _) = render(&GraphQLRequestFetcher, &GET_USER, false);
        let (mutation, _) = render(&GraphQLRequestFetcher, &ADD_TODO, true);

        assert!(query.contains(">(\n  client: GraphQLClient,\n  variables: GetUserQueryVariables,\n"));
        assert!(query.contains("fetcher<GetUserQuery, GetUserQueryVariables>(client, GetUserDocument, variables),"));
        assert!(mutation.contains(">(\n  client: GraphQLClient,\n  options?: UseMutationOptions<"));
        assert!(mutation.contains(
            "(variables?: AddTodoMutationVariables) => \
             fetcher<AddTodoMutation, AddTodoMutationVariables>(client, AddTodoDocument, variables)(),"
        ));
    }

    #[test]
    fn client_import_is_requested_once() {
        let hooks = HookMethodMap::default();
        let mut state = CompilationState::default();
        let mut ctx = RenderContext::new(&hooks, &mut state);

        GraphQLRequestFetcher.query_binding(&GET_USER, &mut ctx).unwrap();
        GraphQLRequestFetcher.mutation_binding(&ADD_TODO, &mut ctx).unwrap();

        assert_eq!(state.imports().collect::<Vec<_>>(), [CLIENT_IMPORT]);
    }

    #[test]
    fn helper_delegates_to_the_client() {
        let helper = GraphQLRequestFetcher.runtime_helper().unwrap();

        assert!(helper.contains("client.request<TData, TVariables>(query, variables)"));
    }
}
