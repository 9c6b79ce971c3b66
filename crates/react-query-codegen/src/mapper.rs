use crate::CodegenError;

/// A user supplied fetcher function, either already in scope of the generated module or imported
/// from another module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapperReference {
    Local {
        symbol: String,
    },
    External {
        /// The name the generated code calls.
        symbol: String,
        /// The exported name, when it differs from `symbol` (`name as alias`).
        import_name: Option<String>,
        module_path: String,
        is_default_export: bool,
    },
}

impl MapperReference {
    /// Parses `symbol`, `module#symbol`, `module#symbol as alias` or `module#default as alias`.
    pub fn parse(raw: &str) -> Result<Self, CodegenError> {
        let raw = raw.trim();

        let Some((module_path, identifier)) = raw.rsplit_once('#') else {
            if raw.is_empty() {
                return Err(CodegenError::invalid_config("the custom fetcher function name is empty"));
            }

            return Ok(MapperReference::Local {
                symbol: raw.to_owned(),
            });
        };

        let module_path = module_path.trim();
        let identifier = identifier.trim();

        if module_path.is_empty() || identifier.is_empty() {
            return Err(CodegenError::invalid_config(format!(
                "the custom fetcher '{raw}' must have the form `module#function`"
            )));
        }

        let (name, alias) = match identifier.split_whitespace().collect::<Vec<_>>().as_slice() {
            [name] => (*name, None),
            [name, "as", alias] => (*name, Some(*alias)),
            _ => {
                return Err(CodegenError::invalid_config(format!(
                    "the custom fetcher '{raw}' must name a single export, optionally as `export as alias`"
                )))
            }
        };

        let reference = match (name, alias) {
            ("default", Some(alias)) => MapperReference::External {
                symbol: alias.to_owned(),
                import_name: None,
                module_path: module_path.to_owned(),
                is_default_export: true,
            },
            ("default", None) => {
                return Err(CodegenError::invalid_config(format!(
                    "the default export in '{raw}' needs a local name, use `{module_path}#default as myFetcher`"
                )))
            }
            (name, Some(alias)) => MapperReference::External {
                symbol: alias.to_owned(),
                import_name: Some(name.to_owned()),
                module_path: module_path.to_owned(),
                is_default_export: false,
            },
            (name, None) => MapperReference::External {
                symbol: name.to_owned(),
                import_name: None,
                module_path: module_path.to_owned(),
                is_default_export: false,
            },
        };

        Ok(reference)
    }

    /// The identifier generated code calls.
    pub fn symbol(&self) -> &str {
        match self {
            MapperReference::Local { symbol } | MapperReference::External { symbol, .. } => symbol,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, MapperReference::External { .. })
    }

    /// The import statement bringing the mapper in scope, if it lives in another module.
    pub fn import_statement(&self) -> Option<String> {
        let MapperReference::External {
            symbol,
            import_name,
            module_path,
            is_default_export,
        } = self
        else {
            return None;
        };

        let statement = match (is_default_export, import_name) {
            (true, _) => format!("import {symbol} from '{module_path}';"),
            (false, Some(import_name)) => format!("import {{ {import_name} as {symbol} }} from '{module_path}';"),
            (false, None) => format!("import {{ {symbol} }} from '{module_path}';"),
        };

        Some(statement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_symbol() {
        let mapper = MapperReference::parse("myFetcher").unwrap();

        assert_eq!(
            mapper,
            MapperReference::Local {
                symbol: "myFetcher".into()
            }
        );
        assert_eq!(mapper.import_statement(), None);
    }

    #[test]
    fn named_export() {
        let mapper = MapperReference::parse("./mappers#myFetcher").unwrap();

        assert_eq!(mapper.symbol(), "myFetcher");
        assert!(mapper.is_external());
        assert_eq!(
            mapper.import_statement().as_deref(),
            Some("import { myFetcher } from './mappers';")
        );
    }

    #[test]
    fn aliased_named_export() {
        let mapper = MapperReference::parse("../lib/fetch#fetchData as fetcher").unwrap();

        assert_eq!(mapper.symbol(), "fetcher");
        assert_eq!(
            mapper.import_statement().as_deref(),
            Some("import { fetchData as fetcher } from '../lib/fetch';")
        );
    }

    #[test]
    fn default_export() {
        let mapper = MapperReference::parse("@acme/fetch#default as acmeFetch").unwrap();

        assert_eq!(mapper.symbol(), "acmeFetch");
        assert_eq!(
            mapper.import_statement().as_deref(),
            Some("import acmeFetch from '@acme/fetch';")
        );
    }

    #[test]
    fn module_path_with_hash_splits_at_the_last_one() {
        let mapper = MapperReference::parse("./weird#dir/fetch#run").unwrap();

        assert_eq!(
            mapper.import_statement().as_deref(),
            Some("import { run } from './weird#dir/fetch';")
        );
    }

    #[test]
    fn rejects_malformed_references() {
        for raw in ["", "   ", "#fetcher", "./mappers#", "./mappers#default", "./mappers#fetch as "] {
            let error = MapperReference::parse(raw).unwrap_err();
            assert!(matches!(error, CodegenError::InvalidConfig(_)), "{raw}: {error}");
        }
    }
}
