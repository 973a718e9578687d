//! Editor-facing language tags and their display names

/// Tag returned when nothing in the text looks like code
pub const PLAINTEXT: &str = "plaintext";

/// Every tag an editor may be switched to, detected or not
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "plaintext", "python", "javascript", "typescript", "typescriptreact", "javascriptreact",
    "java", "cpp", "c", "csharp", "rust", "go", "swift", "kotlin",
    "html", "css", "scss", "less", "sql", "json", "yaml", "xml", "markdown",
    "ruby", "php", "perl", "lua", "r", "shell", "powershell", "dockerfile",
    "scala", "haskell", "clojure", "elixir", "dart", "groovy",
    "vue", "svelte", "graphql", "toml", "ini", "makefile",
];

/// Labels that are not just the capitalized tag
const DISPLAY_NAMES: &[(&str, &str)] = &[
    ("plaintext", "Plain Text"),
    ("typescriptreact", "TSX"),
    ("javascriptreact", "JSX"),
    ("typescript", "TypeScript"),
    ("javascript", "JavaScript"),
    ("python", "Python"),
    ("cpp", "C++"),
    ("csharp", "C#"),
    ("dockerfile", "Dockerfile"),
    ("powershell", "PowerShell"),
    ("vue", "Vue"),
    ("svelte", "Svelte"),
    ("graphql", "GraphQL"),
    ("toml", "TOML"),
    ("makefile", "Makefile"),
    ("objectivec", "Objective-C"),
    ("scss", "SCSS"),
    ("less", "LESS"),
    ("ini", "INI"),
];

/// Human-readable name for a language tag
///
/// Unknown tags get their first letter upper-cased (`rust` -> `Rust`).
pub fn language_name(tag: &str) -> String {
    if let Some((_, name)) = DISPLAY_NAMES.iter().find(|(t, _)| *t == tag) {
        return (*name).to_string();
    }

    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn is_supported(tag: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&tag)
}
