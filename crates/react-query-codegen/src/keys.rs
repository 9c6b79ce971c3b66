//! Cache keys and variable signatures shared by every fetcher strategy.

/// `variables: T` when the operation has a required variable, `variables?: T` otherwise.
pub(crate) fn query_variables_signature(has_required_variables: bool, variables_type: &str) -> String {
    let optional = if has_required_variables { "" } else { "?" };
    format!("variables{optional}: {variables_type}")
}

/// Mutation variables are always optional at the hook boundary.
pub(crate) fn mutation_variables_signature(variables_type: &str) -> String {
    format!("variables?: {variables_type}")
}

/// The query key literal. `variables` is the hook argument, so the key follows each call.
pub(crate) fn query_key(operation_name: &str) -> String {
    format!("['{operation_name}', variables]")
}

/// `use<Name>.getKey = (variables) => [...]`, for manual invalidation of a query.
pub(crate) fn query_key_maker(
    operation_name: &str,
    binding_name: &str,
    variables_type: &str,
    has_required_variables: bool,
) -> String {
    let signature = query_variables_signature(has_required_variables, variables_type);
    let key = query_key(operation_name);

    format!("\nuse{binding_name}.getKey = ({signature}) => {key};\n")
}
