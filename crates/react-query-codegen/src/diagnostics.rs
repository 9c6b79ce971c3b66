/// Non-fatal warnings produced while generating bindings.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    /// Is there any warning
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over all diagnostic messages.
    pub fn iter_messages(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|diagnostic| diagnostic.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    pub(crate) fn push_warning(&mut self, kind: DiagnosticKind, message: String) {
        tracing::warn!("{message}");
        self.0.push(Diagnostic { kind, message });
    }
}

/// A single generation warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    message: String,
}

impl Diagnostic {
    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A subscription was skipped, no binding is generated for it.
    UnsupportedSubscription,
    AnonymousOperation,
    /// A fragment spread names a fragment that is neither defined nor declared external.
    UnknownFragment,
    DuplicateFragment,
}
