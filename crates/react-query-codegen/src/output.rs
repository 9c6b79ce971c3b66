use indexmap::IndexSet;

use crate::{
    config::PluginConfig,
    diagnostics::Diagnostics,
    documents::{self, Fragments},
    fetcher::{Fetcher, FetcherRenderer},
    visitor::CompilationState,
};

/// What the host writes to the generated module: `prepend` goes to the top of the file, once,
/// `content` follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginOutput {
    pub prepend: Vec<String>,
    pub content: String,
    pub diagnostics: Diagnostics,
}

pub(crate) fn assemble(
    state: CompilationState,
    fetcher: &Fetcher,
    fragments: &Fragments<'_>,
    config: &PluginConfig,
) -> PluginOutput {
    let mut prepend = state.imports().map(str::to_owned).collect::<IndexSet<_>>();

    // only hooks record identifiers, so a subscription-only document imports nothing
    let identifiers = state.identifiers_in_use().collect::<Vec<_>>();

    if !identifiers.is_empty() {
        prepend.insert(format!(
            "import {{ {} }} from '{}';",
            identifiers.join(", "),
            config.hooks.module
        ));
    }

    if let Some(helper) = fetcher.runtime_helper() {
        prepend.insert(helper);
    }

    let content = fragments
        .iter_local()
        .map(|fragment| documents::fragment_constant(fragment, config))
        .chain(state.operations().iter().cloned())
        .collect::<Vec<_>>()
        .join("\n");

    PluginOutput {
        prepend: prepend.into_iter().collect(),
        content,
        diagnostics: state.into_diagnostics(),
    }
}
