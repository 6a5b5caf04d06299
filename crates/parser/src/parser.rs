//! TreeSitterParser implementation

use std::{collections::HashMap, path::Path};
use tree_sitter::{Language as TsLanguage, Node, Parser, Point, Tree};

use symlen_core::{Language, ParseCause, StatsRecord};

/// Tree-sitter based source parser
///
/// Lazily loads one parser per language as needed. Not `Sync`: each unit of
/// work creates its own instance.
pub struct TreeSitterParser {
  parsers: HashMap<Language, Parser>,
}

impl TreeSitterParser {
  /// Create a new TreeSitterParser
  pub fn new() -> Self {
    Self {
      parsers: HashMap::new(),
    }
  }

  /// Parse `content` into a syntax tree. Returns `None` if the grammar is
  /// unavailable or tree-sitter gave up.
  pub fn parse(&mut self, content: &str, lang: Language) -> Option<Tree> {
    self.ensure_loaded(lang);
    let parser = self.parsers.get_mut(&lang)?;
    parser.parse(content, None)
  }

  /// Parse one file and fold every identifier into `record`.
  ///
  /// A file with ERROR or MISSING nodes fails as a whole, nothing from it is
  /// added to `record` in that case.
  pub fn count_identifiers(
    &mut self,
    path: &Path,
    content: &str,
    lang: Language,
    record: &mut StatsRecord,
  ) -> Result<(), ParseCause> {
    let Some(tree) = self.parse(content, lang) else {
      return Err(ParseCause::Grammar { language: lang });
    };

    if let Some(point) = first_error_position(&tree) {
      return Err(ParseCause::Syntax {
        path: path.to_path_buf(),
        line: point.row + 1,
        column: point.column + 1,
      });
    }

    for_each_identifier(&tree, content, lang, |ident| record.observe(ident));
    Ok(())
  }

  fn ensure_loaded(&mut self, lang: Language) {
    if self.parsers.contains_key(&lang) {
      return;
    }

    if let Some(grammar) = self.get_grammar(lang) {
      let mut parser = Parser::new();
      if parser.set_language(&grammar).is_ok() {
        self.parsers.insert(lang, parser);
      }
    }
  }

  fn get_grammar(&self, lang: Language) -> Option<TsLanguage> {
    match lang {
      Language::Rust => Some(tree_sitter_rust::LANGUAGE.into()),
      Language::Python => Some(tree_sitter_python::LANGUAGE.into()),
      Language::JavaScript | Language::Jsx => Some(tree_sitter_javascript::LANGUAGE.into()),
      Language::TypeScript => Some(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
      Language::Tsx => Some(tree_sitter_typescript::LANGUAGE_TSX.into()),
      Language::Go => Some(tree_sitter_go::LANGUAGE.into()),
      Language::Java => Some(tree_sitter_java::LANGUAGE.into()),
      Language::C => Some(tree_sitter_c::LANGUAGE.into()),
      Language::Cpp => Some(tree_sitter_cpp::LANGUAGE.into()),
    }
  }
}

impl Default for TreeSitterParser {
  fn default() -> Self {
    Self::new()
  }
}

/// Go leaves that `go/ast` treats as identifiers but tree-sitter-go gives
/// their own kinds.
const GO_NAMED_LEAVES: &[&str] = &["label_name", "nil", "true", "false", "iota"];

/// Identifier-like token: a named leaf whose kind ends in `identifier`.
///
/// Covers `identifier`, `type_identifier`, `field_identifier`,
/// `package_identifier`, `property_identifier` and friends across grammars,
/// while skipping composite nodes such as `scoped_identifier`. Go labels and
/// predeclared names (`nil`, `true`, `false`, `iota`) count as well.
pub fn is_identifier(node: &Node<'_>, lang: Language) -> bool {
  if !node.is_named() || node.child_count() != 0 {
    return false;
  }
  let kind = node.kind();
  kind.ends_with("identifier") || (lang == Language::Go && GO_NAMED_LEAVES.contains(&kind))
}

/// Visit every identifier of `tree` in pre-order (source order).
pub fn for_each_identifier<F>(tree: &Tree, source: &str, lang: Language, mut f: F)
where
  F: FnMut(&str),
{
  let bytes = source.as_bytes();
  let mut cursor = tree.walk();

  loop {
    let node = cursor.node();
    if is_identifier(&node, lang)
      && let Ok(text) = node.utf8_text(bytes)
    {
      f(text);
    }

    if cursor.goto_first_child() {
      continue;
    }

    loop {
      if cursor.goto_next_sibling() {
        break;
      }
      if !cursor.goto_parent() {
        return;
      }
    }
  }
}

/// Start of the first ERROR or MISSING node, if the tree has any.
fn first_error_position(tree: &Tree) -> Option<Point> {
  let root = tree.root_node();
  if !root.has_error() {
    return None;
  }

  let mut cursor = root.walk();
  loop {
    let node = cursor.node();
    if node.is_error() || node.is_missing() {
      return Some(node.start_position());
    }

    // Only descend into subtrees that contain the error
    if node.has_error() && cursor.goto_first_child() {
      continue;
    }

    loop {
      if cursor.goto_next_sibling() {
        break;
      }
      if !cursor.goto_parent() {
        return Some(root.start_position());
      }
    }
  }
}
