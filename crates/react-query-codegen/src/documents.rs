//! The GraphQL side of generation: parsed documents, fragments and the per-operation facts the
//! bindings are built from.

mod printer;

use std::fmt;

use cynic_parser::{
    common::{OperationType, WrappingType},
    executable::{iter::Iter, ExecutableDefinition, FragmentDefinition, OperationDefinition, Selection},
    ExecutableDocument,
};
use indexmap::{IndexMap, IndexSet};

use crate::{
    config::PluginConfig,
    diagnostics::{DiagnosticKind, Diagnostics},
    naming::{self, OperationNames},
    CodegenError,
};

pub(crate) use printer::{escape_template_literal, PrintedFragment, PrintedOperation};

/// One parsed operations document handed over by the host.
pub struct DocumentFile {
    location: String,
    document: ExecutableDocument,
}

impl DocumentFile {
    pub fn parse(location: impl Into<String>, source: &str) -> Result<Self, CodegenError> {
        let location = location.into();

        match cynic_parser::parse_executable_document(source) {
            Ok(document) => Ok(DocumentFile { location, document }),
            Err(error) => Err(CodegenError::Parse { location, error }),
        }
    }

    /// Wraps a document the host already parsed.
    pub fn new(location: impl Into<String>, document: ExecutableDocument) -> Self {
        DocumentFile {
            location: location.into(),
            document,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn document(&self) -> &ExecutableDocument {
        &self.document
    }
}

impl fmt::Debug for DocumentFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentFile")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub fn as_pascal_case(self) -> &'static str {
        match self {
            OperationKind::Query => "Query",
            OperationKind::Mutation => "Mutation",
            OperationKind::Subscription => "Subscription",
        }
    }

    pub(crate) fn keyword(self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }
}

impl From<OperationType> for OperationKind {
    fn from(value: OperationType) -> Self {
        match value {
            OperationType::Query => OperationKind::Query,
            OperationType::Mutation => OperationKind::Mutation,
            OperationType::Subscription => OperationKind::Subscription,
        }
    }
}

/// What the bindings need to know about one operation definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OperationDescriptor<'a> {
    pub name: Option<&'a str>,
    pub kind: OperationKind,
    pub names: OperationNames,
    pub has_required_variables: bool,
    /// Every fragment the operation spreads, directly or through other fragments.
    pub fragments: IndexSet<&'a str>,
}

impl<'a> OperationDescriptor<'a> {
    pub(crate) fn new(
        operation: OperationDefinition<'a>,
        fragments: &Fragments<'a>,
        config: &PluginConfig,
        diagnostics: &mut Diagnostics,
    ) -> Self {
        let kind = OperationKind::from(operation.operation_type());
        let name = operation.name();

        OperationDescriptor {
            name,
            kind,
            names: OperationNames::new(name, kind, config),
            has_required_variables: has_required_variables(operation),
            fragments: fragments.used_by(operation.selection_set(), diagnostics),
        }
    }
}

/// A variable is required when it is non-null and has no default value.
pub(crate) fn has_required_variables(operation: OperationDefinition<'_>) -> bool {
    operation.variable_definitions().any(|variable| {
        matches!(variable.ty().wrappers().next(), Some(WrappingType::NonNull)) && variable.default_value().is_none()
    })
}

/// All fragments known to a run: those defined in the documents, and those the configuration
/// declares as defined elsewhere.
pub(crate) struct Fragments<'a> {
    local: IndexMap<&'a str, FragmentDefinition<'a>>,
    external: IndexMap<&'a str, &'a str>,
}

impl<'a> Fragments<'a> {
    pub(crate) fn collect(documents: &'a [DocumentFile], config: &'a PluginConfig, diagnostics: &mut Diagnostics) -> Self {
        let mut local = IndexMap::new();

        for file in documents {
            for definition in file.document.definitions() {
                let ExecutableDefinition::Fragment(fragment) = definition else {
                    continue;
                };

                if local.contains_key(fragment.name()) {
                    diagnostics.push_warning(
                        DiagnosticKind::DuplicateFragment,
                        format!(
                            "Fragment \"{}\" in '{}' is already defined, the first definition is used",
                            fragment.name(),
                            file.location
                        ),
                    );
                    continue;
                }

                local.insert(fragment.name(), fragment);
            }
        }

        let external = config
            .external_fragments
            .iter()
            .filter(|fragment| !local.contains_key(fragment.name.as_str()))
            .map(|fragment| (fragment.name.as_str(), fragment.import_from.as_str()))
            .collect();

        Fragments { local, external }
    }

    pub(crate) fn iter_local(&self) -> impl Iterator<Item = FragmentDefinition<'a>> + '_ {
        self.local.values().copied()
    }

    /// The module an external fragment is imported from.
    pub(crate) fn external_source(&self, name: &str) -> Option<&'a str> {
        self.external.get(name).copied()
    }

    /// Fragments spread by `selections`, transitively, in first-use order.
    pub(crate) fn used_by(&self, selections: Iter<'a, Selection<'a>>, diagnostics: &mut Diagnostics) -> IndexSet<&'a str> {
        let mut used = IndexSet::new();
        self.collect_spreads(selections, &mut used, diagnostics);
        used
    }

    fn collect_spreads(
        &self,
        selections: Iter<'a, Selection<'a>>,
        used: &mut IndexSet<&'a str>,
        diagnostics: &mut Diagnostics,
    ) {
        for selection in selections {
            match selection {
                Selection::Field(field) => self.collect_spreads(field.selection_set(), used, diagnostics),
                Selection::InlineFragment(fragment) => {
                    self.collect_spreads(fragment.selection_set(), used, diagnostics)
                }
                Selection::FragmentSpread(spread) => {
                    let name = spread.fragment_name();

                    if used.contains(name) {
                        continue;
                    }

                    if let Some(fragment) = self.local.get(name) {
                        used.insert(name);
                        self.collect_spreads(fragment.selection_set(), used, diagnostics);
                    } else if self.external.contains_key(name) {
                        used.insert(name);
                    } else {
                        diagnostics.push_warning(
                            DiagnosticKind::UnknownFragment,
                            format!("Fragment \"{name}\" is not defined in any document nor declared external, ignoring it"),
                        );
                    }
                }
            }
        }
    }
}

/// ``export const <Name>Document = `...`;``, interpolating the documents of every used fragment.
pub(crate) fn document_constant(
    descriptor: &OperationDescriptor<'_>,
    printed: &str,
    config: &PluginConfig,
) -> String {
    let mut constant = format!(
        "export const {} = `\n{}\n",
        descriptor.names.document_variable,
        escape_template_literal(printed)
    );

    for fragment in &descriptor.fragments {
        constant.push_str("${");
        constant.push_str(&naming::fragment_variable(fragment, config));
        constant.push_str("}\n");
    }

    // drop the trailing newline so the template literal closes right after the last line
    constant.pop();
    constant.push_str("`;");
    constant
}

/// ``export const <Name>FragmentDoc = `...`;``
pub(crate) fn fragment_constant(fragment: FragmentDefinition<'_>, config: &PluginConfig) -> String {
    format!(
        "export const {} = `\n{}`;",
        naming::fragment_variable(fragment.name(), config),
        escape_template_literal(&PrintedFragment(fragment).to_string())
    )
}
