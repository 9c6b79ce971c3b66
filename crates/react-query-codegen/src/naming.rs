use heck::ToUpperCamelCase;
use serde::Deserialize;

use crate::{config::PluginConfig, documents::OperationKind};

/// How GraphQL names are turned into TypeScript identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NamingConvention {
    #[default]
    PascalCase,
    Keep,
}

impl NamingConvention {
    pub fn convert(self, name: &str) -> String {
        match self {
            // underscores are kept, each segment is cased on its own
            NamingConvention::PascalCase => name
                .split('_')
                .map(|segment| segment.to_upper_camel_case())
                .collect::<Vec<_>>()
                .join("_"),
            NamingConvention::Keep => name.to_owned(),
        }
    }
}

/// Every identifier derived from one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OperationNames {
    /// Base of the exported binding, `use` is prepended by the strategies.
    pub binding: String,
    pub document_variable: String,
    pub result_type: String,
    pub variables_type: String,
}

impl OperationNames {
    pub(crate) fn new(name: Option<&str>, kind: OperationKind, config: &PluginConfig) -> Self {
        let converted = config.naming_convention.convert(name.unwrap_or_default());
        let suffix = operation_suffix(&converted, kind, config);

        let types_prefix = config.types_prefix.as_str();
        let types_suffix = config.types_suffix.as_str();

        OperationNames {
            binding: format!("{converted}{suffix}"),
            document_variable: format!(
                "{}{converted}{}",
                config.document_variable_prefix, config.document_variable_suffix
            ),
            result_type: format!("{types_prefix}{converted}{suffix}{types_suffix}"),
            variables_type: format!("{types_prefix}{converted}{suffix}Variables{types_suffix}"),
        }
    }
}

fn operation_suffix(converted: &str, kind: OperationKind, config: &PluginConfig) -> &'static str {
    let suffix = kind.as_pascal_case();

    if config.omit_operation_suffix {
        return "";
    }

    let already_suffixed = converted.len() >= suffix.len()
        && converted.is_char_boundary(converted.len() - suffix.len())
        && converted[converted.len() - suffix.len()..].eq_ignore_ascii_case(suffix);

    if config.dedupe_operation_suffix && already_suffixed {
        ""
    } else {
        suffix
    }
}

pub(crate) fn fragment_variable(name: &str, config: &PluginConfig) -> String {
    format!(
        "{}{}{}",
        config.fragment_variable_prefix,
        config.naming_convention.convert(name),
        config.fragment_variable_suffix
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("getUser", "GetUser")]
    #[case("GetUser", "GetUser")]
    #[case("get_user", "Get_User")]
    #[case("getUser_v2", "GetUser_V2")]
    #[case("_private", "_Private")]
    #[case("", "")]
    fn pascal_case(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(NamingConvention::PascalCase.convert(input), expected);
    }

    #[test]
    fn keep_leaves_names_alone() {
        assert_eq!(NamingConvention::Keep.convert("get_user"), "get_user");
    }

    #[test]
    fn query_names() {
        let names = OperationNames::new(Some("getUser"), OperationKind::Query, &PluginConfig::default());

        assert_eq!(
            names,
            OperationNames {
                binding: "GetUserQuery".into(),
                document_variable: "GetUserDocument".into(),
                result_type: "GetUserQuery".into(),
                variables_type: "GetUserQueryVariables".into(),
            }
        );
    }

    #[test]
    fn underscored_names() {
        let names = OperationNames::new(Some("get_user"), OperationKind::Query, &PluginConfig::default());

        assert_eq!(names.binding, "Get_UserQuery");
        assert_eq!(names.result_type, "Get_UserQuery");
        assert_eq!(names.variables_type, "Get_UserQueryVariables");
        assert_eq!(names.document_variable, "Get_UserDocument");
    }

    #[test]
    fn omitted_suffix() {
        let config = PluginConfig {
            omit_operation_suffix: true,
            ..Default::default()
        };

        let names = OperationNames::new(Some("AddTodo"), OperationKind::Mutation, &config);

        assert_eq!(names.binding, "AddTodo");
        assert_eq!(names.result_type, "AddTodo");
        assert_eq!(names.variables_type, "AddTodoVariables");
    }

    #[rstest]
    #[case(false, "GetUserQueryQuery")]
    #[case(true, "GetUserQuery")]
    fn deduped_suffix(#[case] dedupe: bool, #[case] expected: &str) {
        let config = PluginConfig {
            dedupe_operation_suffix: dedupe,
            ..Default::default()
        };

        let names = OperationNames::new(Some("GetUserQuery"), OperationKind::Query, &config);

        assert_eq!(names.binding, expected);
    }

    #[test]
    fn type_affixes_and_document_affixes() {
        let config = PluginConfig {
            types_prefix: "I".into(),
            types_suffix: "Type".into(),
            document_variable_prefix: "Gql".into(),
            document_variable_suffix: "Doc".into(),
            ..Default::default()
        };

        let names = OperationNames::new(Some("feed"), OperationKind::Query, &config);

        assert_eq!(names.binding, "FeedQuery");
        assert_eq!(names.result_type, "IFeedQueryType");
        assert_eq!(names.variables_type, "IFeedQueryVariablesType");
        assert_eq!(names.document_variable, "GqlFeedDoc");
    }

    #[test]
    fn anonymous_operation() {
        let names = OperationNames::new(None, OperationKind::Query, &PluginConfig::default());

        assert_eq!(names.binding, "Query");
        assert_eq!(names.document_variable, "Document");
    }

    #[test]
    fn fragment_variable_name() {
        assert_eq!(
            fragment_variable("userFields", &PluginConfig::default()),
            "UserFieldsFragmentDoc"
        );
    }
}
