use miette::Result;
use std::path::Path;
use tracing::debug;
use tree_sitter::{Language, Parser as TsParser, Tree};

/// JavaScript/JSX source code parser using tree-sitter
pub struct JsParser {
    parser: TsParser,
}

impl JsParser {
    pub fn new() -> Self {
        let mut parser = TsParser::new();
        let language: Language = tree_sitter_javascript::LANGUAGE.into();
        parser
            .set_language(&language)
            .expect("Failed to load JavaScript grammar");
        Self { parser }
    }

    /// Parse JavaScript/JSX source code into a syntax tree
    pub fn parse(&mut self, path: &Path, contents: &str) -> Result<Tree> {
        let tree = self
            .parser
            .parse(contents, None)
            .ok_or_else(|| miette::miette!("Failed to parse {}", path.display()))?;

        debug!(
            "Parsed {}: {} bytes, root kind {}",
            path.display(),
            contents.len(),
            tree.root_node().kind()
        );

        Ok(tree)
    }
}

impl Default for JsParser {
    fn default() -> Self {
        Self::new()
    }
}
