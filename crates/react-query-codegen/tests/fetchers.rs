#![allow(unused_crate_dependencies)]

use react_query_codegen::{plugin, DocumentFile, PluginConfig, PluginOutput};
use rstest::rstest;
use serde_json::json;

const OPERATIONS: &str = r#"
    query GetUser($id: ID!) { user(id: $id) { id name } }
    mutation AddTodo($title: String!) { addTodo(title: $title) { id } }
"#;

fn generate(fetcher: serde_json::Value) -> PluginOutput {
    let documents = [DocumentFile::parse("operations.graphql", OPERATIONS).unwrap()];
    let config = PluginConfig::from_json(json!({ "fetcher": fetcher })).unwrap();

    plugin(&documents, &config).unwrap()
}

fn helper(output: &PluginOutput) -> &str {
    output.prepend.last().map(String::as_str).unwrap_or_default()
}

#[rstest]
#[case::absolute_url("https://api.example.com/graphql", r#"await fetch("https://api.example.com/graphql", {"#)]
#[case::expression("API_URL", "await fetch(API_URL as string, {")]
fn hardcoded_endpoint(#[case] endpoint: &str, #[case] expected: &str) {
    let output = generate(json!({ "endpoint": endpoint }));

    assert!(helper(&output).contains(expected), "{}", helper(&output));
    assert!(output.content.contains(
        "fetcher<GetUserQuery, GetUserQueryVariables>(GetUserDocument, variables),"
    ));
    assert!(!output.content.contains("dataSource"));
}

#[test]
fn hardcoded_fetch_params() {
    let output = generate(json!({
        "endpoint": "https://api.example.com/graphql",
        "fetchParams": { "headers": { "apikey": "secret" }, "credentials": "include" },
    }));

    insta::assert_snapshot!(helper(&output).trim_start(), @r###"
    function fetcher<TData, TVariables>(query: string, variables?: TVariables) {
      return async (): Promise<TData> => {
        const res = await fetch("https://api.example.com/graphql", {
          method: "POST",
          headers: {"apikey":"secret"},
          credentials: "include",
          body: JSON.stringify({ query, variables }),
        });

        const json = await res.json();

        if (json.errors) {
          const { message } = json.errors[0];

          throw new Error(message);
        }

        return json.data;
      };
    }
    "###);
}

#[test]
fn graphql_request_client() {
    let output = generate(json!("graphql-request"));

    assert_eq!(output.prepend[0], "import { GraphQLClient } from 'graphql-request';");
    assert!(helper(&output).contains("client.request<TData, TVariables>(query, variables)"));
    assert!(output.content.contains("  client: GraphQLClient,\n  variables: GetUserQueryVariables,\n"));
    assert!(output
        .content
        .contains("fetcher<AddTodoMutation, AddTodoMutationVariables>(client, AddTodoDocument, variables)(),"));
}

#[test]
fn lazy_custom_mapper() {
    let output = generate(json!({ "func": "./mappers#myFetcher", "lazyVariables": true }));

    assert!(output.prepend.contains(&"import { myFetcher } from './mappers';".to_owned()));
    assert!(output
        .content
        .contains("    myFetcher<AddTodoMutation, AddTodoMutationVariables>(AddTodoDocument),\n"));
    assert!(!output.content.contains("(variables?: AddTodoMutationVariables) =>"));
    assert!(output
        .content
        .contains("myFetcher<GetUserQuery, GetUserQueryVariables>(GetUserDocument, variables),"));
}

#[test]
fn eager_custom_mapper() {
    let output = generate(json!("./mappers#default as fetchGraphQL"));

    assert_eq!(helper(&output), "import fetchGraphQL from './mappers';");
    assert!(output.content.contains(
        "(variables?: AddTodoMutationVariables) => \
         fetchGraphQL<AddTodoMutation, AddTodoMutationVariables>(AddTodoDocument, variables)(),"
    ));
}

#[test]
fn local_custom_mapper_injects_nothing() {
    let output = generate(json!("useFetchData"));

    assert_eq!(
        output.prepend,
        ["import { useQuery, UseQueryOptions, useMutation, UseMutationOptions } from 'react-query';"]
    );
    assert!(output
        .content
        .contains("useFetchData<GetUserQuery, GetUserQueryVariables>(GetUserDocument, variables),"));
}

#[test]
fn every_fetcher_threads_the_same_types() {
    for fetcher in [
        json!("fetch"),
        json!({ "endpoint": "API_URL" }),
        json!("graphql-request"),
        json!("myFetcher"),
    ] {
        let output = generate(fetcher.clone());

        assert!(output.content.contains("  TData = GetUserQuery,\n"), "{fetcher}");
        assert!(output.content.contains("  options?: UseQueryOptions<GetUserQuery, TError, TData>\n"), "{fetcher}");
        assert!(output.content.contains("  useQuery<GetUserQuery, TError, TData>(\n"), "{fetcher}");
        assert!(output.content.contains("    ['GetUser', variables],\n"), "{fetcher}");
        assert!(
            output.content.contains(
                "  useMutation<AddTodoMutation, TError, AddTodoMutationVariables, TContext>(\n"
            ),
            "{fetcher}"
        );
    }
}
