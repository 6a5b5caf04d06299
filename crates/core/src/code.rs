use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Source languages with a compiled tree-sitter grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
  TypeScript,
  JavaScript,
  Tsx,
  Jsx,
  Rust,
  Python,
  Go,
  Java,
  Cpp,
  C,
}

impl Language {
  pub const ALL: &'static [Language] = &[
    Language::TypeScript,
    Language::JavaScript,
    Language::Tsx,
    Language::Jsx,
    Language::Rust,
    Language::Python,
    Language::Go,
    Language::Java,
    Language::Cpp,
    Language::C,
  ];

  pub fn from_extension(ext: &str) -> Option<Self> {
    match ext.to_lowercase().as_str() {
      "ts" | "mts" | "cts" => Some(Language::TypeScript),
      "js" | "mjs" | "cjs" => Some(Language::JavaScript),
      "tsx" => Some(Language::Tsx),
      "jsx" => Some(Language::Jsx),
      "rs" => Some(Language::Rust),
      "py" | "pyi" | "pyw" => Some(Language::Python),
      "go" => Some(Language::Go),
      "java" => Some(Language::Java),
      // `.h` goes to C++, which also accepts nearly all C headers
      "cpp" | "cc" | "cxx" | "hpp" | "hxx" | "hh" | "h" => Some(Language::Cpp),
      "c" => Some(Language::C),
      _ => None,
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      Language::TypeScript => "typescript",
      Language::JavaScript => "javascript",
      Language::Tsx => "tsx",
      Language::Jsx => "jsx",
      Language::Rust => "rust",
      Language::Python => "python",
      Language::Go => "go",
      Language::Java => "java",
      Language::Cpp => "cpp",
      Language::C => "c",
    }
  }
}

impl fmt::Display for Language {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Language {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "typescript" | "ts" => Ok(Language::TypeScript),
      "javascript" | "js" => Ok(Language::JavaScript),
      "tsx" => Ok(Language::Tsx),
      "jsx" => Ok(Language::Jsx),
      "rust" | "rs" => Ok(Language::Rust),
      "python" | "py" => Ok(Language::Python),
      "go" | "golang" => Ok(Language::Go),
      "java" => Ok(Language::Java),
      "cpp" | "c++" | "cxx" => Ok(Language::Cpp),
      "c" => Ok(Language::C),
      other => Err(format!(
        "unknown language '{other}' (expected one of: {})",
        Language::ALL.iter().map(|l| l.name()).collect::<Vec<_>>().join(", ")
      )),
    }
  }
}
