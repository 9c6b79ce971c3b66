use std::fmt;

use cynic_parser::executable::{iter::Iter, FragmentDefinition, OperationDefinition, Selection};

use super::OperationKind;

macro_rules! write_indent {
    ($f:expr, $level:expr) => {
        write!($f, "{:indent$}", "", indent = $level * 2)
    };
}

/// Prints an operation definition back to GraphQL.
pub(crate) struct PrintedOperation<'a>(pub OperationDefinition<'a>);

impl fmt::Display for PrintedOperation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operation = self.0;

        f.write_str(OperationKind::from(operation.operation_type()).keyword())?;

        if let Some(name) = operation.name() {
            write!(f, " {name}")?;
        }

        let variables = operation.variable_definitions();

        if variables.len() != 0 {
            f.write_str("(")?;
            for (index, variable) in variables.enumerate() {
                let prefix = if index != 0 { ", " } else { "" };
                write!(f, "{prefix}{variable}")?;
            }
            f.write_str(")")?;
        }

        write!(
            f,
            "{} {}",
            operation.directives(),
            SelectionSet::new(operation.selection_set(), 0)
        )
    }
}

/// Prints a fragment definition back to GraphQL.
pub(crate) struct PrintedFragment<'a>(pub FragmentDefinition<'a>);

impl fmt::Display for PrintedFragment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fragment = self.0;

        write!(
            f,
            "fragment {} on {}{} {}",
            fragment.name(),
            fragment.type_condition(),
            fragment.directives(),
            SelectionSet::new(fragment.selection_set(), 0)
        )
    }
}

struct SelectionSet<'a> {
    selections: Iter<'a, Selection<'a>>,
    indent_level: usize,
}

impl<'a> SelectionSet<'a> {
    fn new(selections: Iter<'a, Selection<'a>>, indent_level: usize) -> Self {
        SelectionSet {
            selections,
            indent_level,
        }
    }
}

impl fmt::Display for SelectionSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.selections.len() == 0 {
            return Ok(());
        }

        writeln!(f, "{{")?;

        for selection in self.selections.clone() {
            let selection = PrintedSelection {
                selection,
                indent_level: self.indent_level + 1,
            };

            writeln!(f, "{selection}")?;
        }

        write_indent!(f, self.indent_level)?;
        write!(f, "}}")
    }
}

struct PrintedSelection<'a> {
    selection: Selection<'a>,
    indent_level: usize,
}

impl fmt::Display for PrintedSelection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_indent!(f, self.indent_level)?;

        match self.selection {
            Selection::Field(field) => {
                if let Some(alias) = field.alias() {
                    write!(f, "{alias}: ")?;
                }

                let space = if field.selection_set().len() != 0 { " " } else { "" };

                write!(
                    f,
                    "{}{}{}{space}{}",
                    field.name(),
                    field.arguments(),
                    field.directives(),
                    SelectionSet::new(field.selection_set(), self.indent_level)
                )
            }
            Selection::InlineFragment(fragment) => {
                f.write_str("...")?;

                if let Some(on_type) = fragment.type_condition() {
                    write!(f, " on {on_type}")?;
                }

                write!(
                    f,
                    "{} {}",
                    fragment.directives(),
                    SelectionSet::new(fragment.selection_set(), self.indent_level)
                )
            }
            Selection::FragmentSpread(spread) => write!(f, "{spread}"),
        }
    }
}

/// Escapes text so it can be embedded verbatim in a TypeScript template literal.
pub(crate) fn escape_template_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '`' => escaped.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => escaped.push_str("\\$"),
            c => escaped.push(c),
        }
    }

    escaped
}
