//! Per-language detection rules
//!
//! Every pattern is compiled in multi-line CRLF-aware mode, so `^` and `$`
//! anchor at line boundaries for both `\n` and `\r\n` text. Matching is
//! case-sensitive. Table order is significant:
//! when two languages tie on score, the one declared first wins.

use crate::error::CodeshotError;
use regex::Regex;

/// Source form of one language's rule set
#[derive(Debug, Clone, Copy)]
pub struct LanguageRules {
    pub tag: &'static str,
    pub weight: u32,
    pub patterns: &'static [&'static str],
}

/// Built-in rules, highest-specificity languages first
///
/// TSX/JSX precede HTML and plain JavaScript so that React sources win ties.
pub const LANGUAGE_RULES: &[LanguageRules] = &[
    LanguageRules {
        tag: "typescriptreact",
        weight: 4,
        patterns: &[
            r#"import\s+.*from\s+['"]react['"]"#,
            r"import\s+\{.*useState.*\}",
            r"import\s+\{.*useEffect.*\}",
            r"<\w+\s+className=",
            r":\s*React\.(FC|Component)",
            r"useState<\w+>",
            r"useCallback|useMemo|useRef|useContext",
            r"return\s*\(\s*<",
            r"export\s+(default\s+)?function\s+\w+",
        ],
    },
    LanguageRules {
        tag: "javascriptreact",
        weight: 3,
        patterns: &[
            r"import\s+React",
            r#"from\s+['"]react['"]"#,
            r"<\w+\s+className=",
            r"React\.createElement",
            r"const\s+\[\w+,\s*set\w+\]\s*=\s*useState",
        ],
    },
    LanguageRules {
        tag: "typescript",
        weight: 2,
        patterns: &[
            r":\s*(string|number|boolean|any|void|never|unknown)\b",
            r"interface\s+\w+\s*\{",
            r"type\s+\w+\s*=",
            r"<\w+>\s*\(",
            r"as\s+(string|number|boolean|const)",
            r":\s*\w+\[\]",
            r"enum\s+\w+",
        ],
    },
    LanguageRules {
        tag: "python",
        weight: 2,
        patterns: &[
            r"^(import|from)\s+\w+",
            r"def\s+\w+\s*\([^)]*\)\s*:",
            r"class\s+\w+.*:",
            r"print\s*\(",
            r"self\.\w+",
            r"__init__|__name__",
            r#"if\s+__name__\s*==\s*['"]__main__['"]"#,
        ],
    },
    LanguageRules {
        tag: "javascript",
        weight: 1,
        patterns: &[
            r"\bconst\s+\w+\s*=",
            r"\blet\s+\w+\s*=",
            r"\bvar\s+\w+\s*=",
            r"=>\s*[{(]",
            r"function\s+\w+\s*\(",
            r"\bconsole\.(log|error|warn)",
            r"require\s*\(",
            r"module\.exports",
            r"export\s+(default\s+)?",
        ],
    },
    LanguageRules {
        tag: "java",
        weight: 2,
        patterns: &[
            r"public\s+(class|static|void)",
            r"private\s+\w+",
            r"System\.out\.print",
            r"new\s+\w+\(",
            r"extends\s+\w+",
            r"implements\s+\w+",
            r"@Override",
        ],
    },
    LanguageRules {
        tag: "cpp",
        weight: 2,
        patterns: &[
            r"#include\s*<\w+>",
            r"std::",
            r"cout\s*<<",
            r"cin\s*>>",
            r"int\s+main\s*\(",
            r"nullptr",
            r"using\s+namespace",
        ],
    },
    LanguageRules {
        tag: "c",
        weight: 2,
        patterns: &[
            r"#include\s*<\w+\.h>",
            r"printf\s*\(",
            r"scanf\s*\(",
            r"int\s+main\s*\(",
            r"malloc\s*\(",
            r"free\s*\(",
        ],
    },
    LanguageRules {
        tag: "csharp",
        weight: 2,
        patterns: &[
            r"using\s+System",
            r"namespace\s+\w+",
            r"public\s+class\s+\w+",
            r"Console\.(WriteLine|ReadLine)",
            r"async\s+Task",
        ],
    },
    LanguageRules {
        tag: "rust",
        weight: 2,
        patterns: &[
            r"fn\s+\w+",
            r"let\s+(mut\s+)?\w+",
            r"impl\s+\w+",
            r"pub\s+(fn|struct|enum)",
            r"println!\s*\(",
            r"use\s+\w+::",
        ],
    },
    LanguageRules {
        tag: "go",
        weight: 2,
        patterns: &[
            r"package\s+\w+",
            r"func\s+\w+",
            r"import\s+\(",
            r"fmt\.(Print|Println)",
            r":=\s*",
        ],
    },
    LanguageRules {
        tag: "html",
        // Lower weight so TSX/JSX are preferred
        weight: 1,
        patterns: &[
            r"<!DOCTYPE\s+html",
            r"<html\b",
            r"<head\b",
            r"<body\b",
            r#"class="[^"]*""#,
        ],
    },
    LanguageRules {
        tag: "css",
        weight: 2,
        patterns: &[
            r"\.\w+\s*\{",
            r"#\w+\s*\{",
            r":\s*(flex|grid|block|none)",
            r"(margin|padding|border|background)\s*:",
            r"@media\s+",
        ],
    },
    LanguageRules {
        tag: "sql",
        weight: 2,
        patterns: &[
            r"\b(SELECT|INSERT|UPDATE|DELETE)\s+",
            r"\bFROM\s+\w+",
            r"\bWHERE\s+",
            r"CREATE\s+(TABLE|INDEX|DATABASE)",
        ],
    },
    LanguageRules {
        tag: "json",
        weight: 1,
        patterns: &[r#"^\s*\{[\s\S]*"[^"]+"\s*:"#, r"^\s*\["],
    },
    LanguageRules {
        tag: "yaml",
        weight: 1,
        patterns: &[r"^\w+:\s*$", r"^\s+-\s+\w+"],
    },
    LanguageRules {
        tag: "ruby",
        weight: 2,
        patterns: &[r"def\s+\w+", r"\bend$", r"puts\s+", r"\.each\s+do"],
    },
    LanguageRules {
        tag: "php",
        weight: 2,
        patterns: &[r"<\?php", r"\$\w+\s*=", r"echo\s+"],
    },
    LanguageRules {
        tag: "swift",
        weight: 2,
        patterns: &[
            r"func\s+\w+\s*\(",
            r"var\s+\w+:\s*\w+",
            r"let\s+\w+:\s*\w+",
            r"import\s+(Foundation|UIKit|SwiftUI)",
        ],
    },
    LanguageRules {
        tag: "kotlin",
        weight: 2,
        patterns: &[r"fun\s+\w+", r"val\s+\w+", r"var\s+\w+\s*:"],
    },
    LanguageRules {
        tag: "shell",
        weight: 2,
        patterns: &[r"^#!", r"\becho\s+", r"\$\([^)]+\)", r"fi$"],
    },
    LanguageRules {
        tag: "markdown",
        weight: 1,
        patterns: &[r"^#{1,6}\s+\w+", r"\*\*[^*]+\*\*", r"\[.*\]\(.*\)", r"```\w*"],
    },
    LanguageRules {
        tag: "dockerfile",
        weight: 2,
        patterns: &[
            r"^FROM\s+\w+",
            r"^RUN\s+",
            r"^CMD\s+",
            r"^EXPOSE\s+\d+",
            r"^WORKDIR\s+",
        ],
    },
    LanguageRules {
        tag: "scala",
        weight: 2,
        patterns: &[
            r"def\s+\w+\s*\[",
            r"val\s+\w+\s*:",
            r"object\s+\w+",
            r"case\s+class",
            r"trait\s+\w+",
        ],
    },
    LanguageRules {
        tag: "haskell",
        weight: 2,
        patterns: &[
            r"::\s*\w+(\s*->\s*\w+)+",
            r"\w+\s*=\s*do\s*$",
            r"import\s+qualified",
            r"module\s+\w+",
            r"where$",
        ],
    },
    LanguageRules {
        tag: "dart",
        weight: 2,
        patterns: &[
            r"void\s+main\s*\(\)",
            r"@override",
            r"Widget\s+build",
            r#"import\s+['"]package:"#,
            r"class\s+\w+\s+extends\s+(State)?less?Widget",
        ],
    },
    LanguageRules {
        tag: "vue",
        weight: 3,
        patterns: &[
            r"<template>",
            r"<script\s+setup",
            r"defineComponent",
            r"ref\s*\(",
            r"computed\s*\(",
        ],
    },
    LanguageRules {
        tag: "svelte",
        weight: 3,
        patterns: &[
            r#"<script\s+(lang="ts")?\s*>"#,
            r"\$:\s*\{",
            r"<style\s+lang=",
            r"export\s+let\s+\w+",
            r"on:\w+",
        ],
    },
    LanguageRules {
        tag: "lua",
        weight: 2,
        patterns: &[
            r"function\s+\w+\s*\(",
            r"local\s+\w+\s*=",
            r"end$",
            r#"require\s*\(['"]"#,
            r"nil\b",
        ],
    },
    LanguageRules {
        tag: "r",
        weight: 2,
        patterns: &[
            r"<-\s*",
            r"library\s*\(",
            r"function\s*\([^)]*\)\s*\{",
            r"data\.frame",
            r"ggplot\s*\(",
        ],
    },
    LanguageRules {
        tag: "perl",
        weight: 2,
        patterns: &[
            r"^use\s+strict",
            r"\$\w+\s*=",
            r"my\s+\$",
            r"sub\s+\w+\s*\{",
            r"=~\s*[sm]?/",
        ],
    },
    LanguageRules {
        tag: "elixir",
        weight: 2,
        patterns: &[
            r"defmodule\s+\w+",
            r"def\s+\w+\s*do",
            r"\|>\s*\w+",
            r"@spec\s+\w+",
            r"fn\s+\w+\s*->",
        ],
    },
    LanguageRules {
        tag: "clojure",
        weight: 2,
        patterns: &[
            r"\(defn?\s+\w+",
            r"\(ns\s+\w+",
            r"\(let\s+\[",
            r"\(if\s+",
            r"\(fn\s+\[",
        ],
    },
];

/// One language's compiled rules
#[derive(Debug, Clone)]
pub struct CompiledLanguage {
    pub tag: &'static str,
    pub weight: u32,
    pub patterns: Vec<Regex>,
}

impl CompiledLanguage {
    /// Total non-overlapping matches of every pattern in `text`
    pub fn match_count(&self, text: &str) -> u32 {
        self.patterns
            .iter()
            .map(|re| re.find_iter(text).count() as u32)
            .sum()
    }
}

/// Compiled, read-only language table
#[derive(Debug, Clone)]
pub struct PatternTable {
    languages: Vec<CompiledLanguage>,
}

impl PatternTable {
    /// Compile `rules`, failing on the first malformed pattern or bad entry
    pub fn new(rules: &[LanguageRules]) -> Result<Self, CodeshotError> {
        let mut languages = Vec::with_capacity(rules.len());

        for rule in rules {
            if rule.weight == 0 {
                return Err(CodeshotError::Configuration(format!(
                    "language '{}' has zero weight",
                    rule.tag
                )));
            }
            if languages.iter().any(|l: &CompiledLanguage| l.tag == rule.tag) {
                return Err(CodeshotError::Configuration(format!(
                    "language '{}' is declared twice",
                    rule.tag
                )));
            }

            let patterns = rule
                .patterns
                .iter()
                .map(|source| {
                    Regex::new(&format!("(?mR){}", source)).map_err(|e| {
                        CodeshotError::Configuration(format!(
                            "invalid pattern for '{}': {}",
                            rule.tag, e
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            languages.push(CompiledLanguage {
                tag: rule.tag,
                weight: rule.weight,
                patterns,
            });
        }

        Ok(Self { languages })
    }

    /// Compile the built-in [`LANGUAGE_RULES`]
    pub fn builtin() -> Result<Self, CodeshotError> {
        Self::new(LANGUAGE_RULES)
    }

    /// Languages in declaration order
    pub fn languages(&self) -> &[CompiledLanguage] {
        &self.languages
    }

    pub fn get(&self, tag: &str) -> Option<&CompiledLanguage> {
        self.languages.iter().find(|l| l.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_compiles() {
        let table = PatternTable::builtin().unwrap();
        assert_eq!(table.len(), LANGUAGE_RULES.len());
        assert_eq!(table.languages()[0].tag, "typescriptreact");
    }

    #[test]
    fn test_bad_regex_is_configuration_error() {
        let rules = [LanguageRules {
            tag: "broken",
            weight: 1,
            patterns: &[r"(unclosed"],
        }];

        let err = PatternTable::new(&rules).unwrap_err();
        assert!(matches!(err, CodeshotError::Configuration(_)));
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_duplicate_tag_rejected() {
        let rules = [
            LanguageRules { tag: "x", weight: 1, patterns: &["a"] },
            LanguageRules { tag: "x", weight: 2, patterns: &["b"] },
        ];
        assert!(PatternTable::new(&rules).is_err());
    }

    #[test]
    fn test_counts_every_occurrence() {
        let table = PatternTable::builtin().unwrap();
        let js = table.get("javascript").unwrap();

        assert_eq!(js.match_count("console.log(1)"), 1);
        assert_eq!(js.match_count("console.log(1)\nconsole.warn(2)\nconsole.error(3)"), 3);
    }

    #[test]
    fn test_anchors_are_line_based() {
        let table = PatternTable::builtin().unwrap();
        let docker = table.get("dockerfile").unwrap();

        let text = "FROM rust\nRUN cargo build\nRUN strip target\nCMD [\"app\"]";
        // FROM, RUN x2, CMD
        assert_eq!(docker.match_count(text), 4);
    }

    #[test]
    fn test_patterns_are_case_sensitive() {
        let table = PatternTable::builtin().unwrap();
        let sql = table.get("sql").unwrap();
        assert_eq!(sql.match_count("select name from users"), 0);
        assert_eq!(sql.match_count("SELECT name FROM users"), 2);
    }
}
