//! Plugin configuration, decoded once from the host supplied JSON.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{mapper::MapperReference, naming::NamingConvention, CodegenError};

const DEFAULT_FETCHER: &str = "fetch";
const GRAPHQL_REQUEST_FETCHER: &str = "graphql-request";

/// Validated configuration of one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginConfig {
    pub fetcher: FetcherConfig,
    /// Attach a `.getKey(variables)` helper to every query hook.
    pub expose_query_keys: bool,
    pub omit_operation_suffix: bool,
    pub dedupe_operation_suffix: bool,
    /// Namespace the result and variables types are imported under.
    pub import_operation_types_from: Option<String>,
    pub naming_convention: NamingConvention,
    pub types_prefix: String,
    pub types_suffix: String,
    pub document_variable_prefix: String,
    pub document_variable_suffix: String,
    pub fragment_variable_prefix: String,
    pub fragment_variable_suffix: String,
    pub external_fragments: Vec<ExternalFragment>,
    pub hooks: HookMethodMap,
}

impl Default for PluginConfig {
    fn default() -> Self {
        PluginConfig {
            fetcher: FetcherConfig::Fetch,
            expose_query_keys: false,
            omit_operation_suffix: false,
            dedupe_operation_suffix: false,
            import_operation_types_from: None,
            naming_convention: NamingConvention::default(),
            types_prefix: String::new(),
            types_suffix: String::new(),
            document_variable_prefix: String::new(),
            document_variable_suffix: String::from("Document"),
            fragment_variable_prefix: String::new(),
            fragment_variable_suffix: String::from("FragmentDoc"),
            external_fragments: Vec::new(),
            hooks: HookMethodMap::default(),
        }
    }
}

impl PluginConfig {
    pub fn from_json(value: Value) -> Result<Self, CodegenError> {
        let raw: RawPluginConfig =
            serde_json::from_value(value).map_err(|error| CodegenError::invalid_config(error.to_string()))?;

        raw.try_into()
    }

    /// The `Namespace.` prefix applied to operation type references, if any.
    pub(crate) fn external_import_prefix(&self) -> String {
        self.import_operation_types_from
            .as_deref()
            .filter(|namespace| !namespace.is_empty())
            .map(|namespace| format!("{namespace}."))
            .unwrap_or_default()
    }
}

/// How the generated hooks perform their network calls.
#[derive(Debug, Clone, PartialEq)]
pub enum FetcherConfig {
    /// `fetch` against an endpoint passed by the caller.
    Fetch,
    /// `fetch` against an endpoint known at generation time.
    Hardcoded {
        endpoint: String,
        fetch_params: Map<String, Value>,
    },
    /// A `GraphQLClient` from `graphql-request` passed by the caller.
    GraphQLRequest,
    CustomMapper {
        mapper: MapperReference,
        lazy_variables: bool,
    },
}

impl FetcherConfig {
    fn from_raw(raw: Option<Value>) -> Result<Self, CodegenError> {
        let raw = match raw {
            None | Some(Value::Null) => return Ok(FetcherConfig::Fetch),
            Some(raw) => raw,
        };

        match raw {
            Value::String(name) => match name.as_str() {
                DEFAULT_FETCHER => Ok(FetcherConfig::Fetch),
                GRAPHQL_REQUEST_FETCHER => Ok(FetcherConfig::GraphQLRequest),
                func => Self::custom(RawCustomFetcher {
                    func: func.to_owned(),
                    lazy_variables: false,
                }),
            },
            Value::Object(object) if object.contains_key("endpoint") => {
                let RawEndpointFetcher { endpoint, fetch_params } = serde_json::from_value(Value::Object(object))
                    .map_err(|error| CodegenError::invalid_config(format!("invalid `fetcher` endpoint: {error}")))?;

                Ok(FetcherConfig::Hardcoded {
                    endpoint,
                    fetch_params: fetch_params.unwrap_or_default(),
                })
            }
            Value::Object(object) if object.contains_key("func") => {
                let custom = serde_json::from_value(Value::Object(object)).map_err(|error| {
                    CodegenError::invalid_config(format!("invalid custom `fetcher`: {error}"))
                })?;

                Self::custom(custom)
            }
            other => Err(CodegenError::invalid_config(format!(
                "`fetcher` must be \"fetch\", \"graphql-request\", a function reference, \
                 {{ endpoint, fetchParams? }} or {{ func, lazyVariables? }}, got {other}"
            ))),
        }
    }

    fn custom(raw: RawCustomFetcher) -> Result<Self, CodegenError> {
        Ok(FetcherConfig::CustomMapper {
            mapper: MapperReference::parse(&raw.func)?,
            lazy_variables: raw.lazy_variables,
        })
    }
}

/// The react-query identifiers bindings are generated against.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HookMethodMap {
    pub query: HookMethod,
    pub mutation: HookMethod,
    /// Module every hook and options type is imported from.
    pub module: String,
}

impl Default for HookMethodMap {
    fn default() -> Self {
        HookMethodMap {
            query: HookMethod {
                hook: String::from("useQuery"),
                options: String::from("UseQueryOptions"),
            },
            mutation: HookMethod {
                hook: String::from("useMutation"),
                options: String::from("UseMutationOptions"),
            },
            module: String::from("react-query"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HookMethod {
    pub hook: String,
    pub options: String,
}

/// A fragment defined outside of the documents handed to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExternalFragment {
    pub name: String,
    /// Module exporting the fragment document constant.
    pub import_from: String,
}

/// The configuration as written by the user.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawPluginConfig {
    pub fetcher: Option<Value>,
    pub expose_query_keys: bool,
    pub omit_operation_suffix: bool,
    pub dedupe_operation_suffix: bool,
    pub import_operation_types_from: Option<String>,
    pub naming_convention: Option<NamingConvention>,
    pub types_prefix: Option<String>,
    pub types_suffix: Option<String>,
    pub document_variable_prefix: Option<String>,
    pub document_variable_suffix: Option<String>,
    pub fragment_variable_prefix: Option<String>,
    pub fragment_variable_suffix: Option<String>,
    pub external_fragments: Vec<ExternalFragment>,
    pub hooks: Option<HookMethodMap>,
}

impl TryFrom<RawPluginConfig> for PluginConfig {
    type Error = CodegenError;

    fn try_from(raw: RawPluginConfig) -> Result<Self, Self::Error> {
        let defaults = PluginConfig::default();

        Ok(PluginConfig {
            fetcher: FetcherConfig::from_raw(raw.fetcher)?,
            expose_query_keys: raw.expose_query_keys,
            omit_operation_suffix: raw.omit_operation_suffix,
            dedupe_operation_suffix: raw.dedupe_operation_suffix,
            import_operation_types_from: raw.import_operation_types_from,
            naming_convention: raw.naming_convention.unwrap_or(defaults.naming_convention),
            types_prefix: raw.types_prefix.unwrap_or(defaults.types_prefix),
            types_suffix: raw.types_suffix.unwrap_or(defaults.types_suffix),
            document_variable_prefix: raw.document_variable_prefix.unwrap_or(defaults.document_variable_prefix),
            document_variable_suffix: raw.document_variable_suffix.unwrap_or(defaults.document_variable_suffix),
            fragment_variable_prefix: raw.fragment_variable_prefix.unwrap_or(defaults.fragment_variable_prefix),
            fragment_variable_suffix: raw.fragment_variable_suffix.unwrap_or(defaults.fragment_variable_suffix),
            external_fragments: raw.external_fragments,
            hooks: raw.hooks.unwrap_or(defaults.hooks),
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawEndpointFetcher {
    endpoint: String,
    #[serde(default)]
    fetch_params: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawCustomFetcher {
    func: String,
    #[serde(default)]
    lazy_variables: bool,
}
