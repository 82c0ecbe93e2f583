//! Entry script generation
//!
//! An entry script imports the emitted binding shim, initialises it with the
//! URL of the content-hashed module, then runs the entry source. Imports of
//! the binding specifier inside the entry source are pointed at the emitted
//! shim, so the source can keep importing `../pkg` the way it does during
//! development.

/// Names the generated files an entry script refers to
#[derive(Debug, Clone, Copy)]
pub struct EntryLinks<'a> {
    /// Output-relative path of the entry script itself
    pub entry_file: &'a str,
    pub shim_file: &'a str,
    pub module_file: &'a str,
    pub binding_specifier: &'a str,
    pub out_name: &'a str,
}

const HEADER: &str = "// Generated by wasmpak. Do not edit.\n";

/// Render the entry script for an entry source
pub fn render(source: &str, links: &EntryLinks<'_>) -> String {
    let shim_url = relative_url(links.entry_file, links.shim_file);
    let module_url = relative_url(links.entry_file, links.module_file);
    let body = rewrite_binding_imports(
        source,
        links.binding_specifier,
        links.out_name,
        &shim_url,
    );

    let mut script = String::with_capacity(HEADER.len() + body.len() + 160);
    script.push_str(HEADER);
    script.push_str(&format!("import __wasmpak_init from \"{shim_url}\";\n"));
    script.push_str(&format!(
        "await __wasmpak_init(new URL(\"{module_url}\", import.meta.url));\n\n"
    ));
    script.push_str(&body);
    if !script.ends_with('\n') {
        script.push('\n');
    }
    script
}

/// Replace quoted specifiers naming the compiled module with `replacement`.
///
/// Recognises `<specifier>` and `<specifier>/<out_name>.js` in single, double
/// or backtick quotes. This is a lexical pass: other string contents, comments
/// and code are copied unchanged.
pub fn rewrite_binding_imports(
    source: &str,
    specifier: &str,
    out_name: &str,
    replacement: &str,
) -> String {
    let specifier = specifier.trim_end_matches('/');
    let with_file = format!("{specifier}/{out_name}.js");

    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(open) = rest.find(['"', '\'', '`']) {
        out.push_str(&rest[..open]);
        let quote = &rest[open..open + 1];
        let after = &rest[open + 1..];

        let close = find_closing_quote(after, quote);
        match close {
            Some(close) => {
                let literal = &after[..close];
                out.push_str(quote);
                if literal == specifier || literal == with_file {
                    out.push_str(replacement);
                } else {
                    out.push_str(literal);
                }
                out.push_str(quote);
                rest = &after[close + 1..];
            }
            // A lone quote, e.g. an apostrophe in a comment
            None => {
                out.push_str(quote);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Byte offset of the closing quote, honouring backslash escapes and
/// stopping at a line break for non-template strings
fn find_closing_quote(text: &str, quote: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '\n' if quote != "`" => return None,
            c if quote.starts_with(c) => return Some(i),
            _ => {}
        }
    }
    None
}

/// Relative URL from the file `from` to the file `to`, both relative to the
/// output directory
pub fn relative_url(from: &str, to: &str) -> String {
    let from_dirs: Vec<&str> = from.split('/').collect();
    let from_dirs = &from_dirs[..from_dirs.len().saturating_sub(1)];
    let to_parts: Vec<&str> = to.split('/').collect();

    let common = from_dirs
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let ups = from_dirs.len() - common;
    let mut url = if ups == 0 {
        "./".to_string()
    } else {
        "../".repeat(ups)
    };
    url.push_str(&to_parts[common..].join("/"));
    url
}
