//! Extension and file-name tables for binary detection.

/// Extensions that are always text. Checked before the binary table.
pub const TEXT_EXTENSIONS: &[&str] = &[
    // Docs and data
    "md", "markdown", "mdx", "txt", "rst", "adoc", "csv", "tsv", "json", "jsonc", "json5",
    "yaml", "yml", "toml", "ini", "cfg", "conf", "env", "xml", "svg", "graphql", "gql",
    "proto", "sql", "lock",
    // Web
    "html", "htm", "css", "scss", "sass", "less", "vue", "svelte", "astro",
    // Scripting and systems languages
    "ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs", "py", "pyi", "rb", "php", "pl",
    "lua", "sh", "bash", "zsh", "fish", "ps1", "rs", "go", "java", "kt", "kts", "scala",
    "swift", "c", "h", "cc", "cpp", "hpp", "cs", "fs", "ex", "exs", "erl", "hs", "ml",
    "clj", "dart", "r", "jl", "zig", "nim", "tf", "hcl", "gradle",
];

/// Exact file names that are always text, whatever their extension says.
pub const TEXT_FILENAMES: &[&str] = &[
    "Makefile",
    "Dockerfile",
    "Containerfile",
    "Jenkinsfile",
    "Procfile",
    "Gemfile",
    "Rakefile",
    "Vagrantfile",
    "LICENSE",
    "README",
    "CHANGELOG",
    "CODEOWNERS",
    ".gitignore",
    ".gitattributes",
    ".koduignore",
    ".dockerignore",
    ".editorconfig",
    ".npmrc",
    ".nvmrc",
    ".env",
    ".env.example",
    ".env.sample",
];

/// Extensions that are always binary.
pub const BINARY_EXTENSIONS: &[&str] = &[
    // Images
    "png", "jpg", "jpeg", "gif", "bmp", "ico", "icns", "webp", "tif", "tiff", "psd", "avif",
    "heic",
    // Archives
    "zip", "tar", "gz", "tgz", "bz2", "xz", "zst", "7z", "rar", "jar", "war",
    // Executables and objects
    "exe", "dll", "so", "dylib", "bin", "o", "a", "lib", "obj", "class", "wasm", "pyc",
    "pyo", "node",
    // Documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "ods",
    // Media
    "mp3", "mp4", "m4a", "avi", "mov", "mkv", "webm", "wav", "flac", "ogg",
    // Fonts
    "ttf", "otf", "woff", "woff2", "eot",
    // Databases
    "sqlite", "sqlite3", "db",
];

/// Exact file names skipped outright: lockfiles and OS droppings.
pub const EXCLUDED_FILENAMES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "bun.lockb",
    ".DS_Store",
    "Thumbs.db",
];

/// Magic numbers of common binary formats.
pub const BINARY_SIGNATURES: &[&[u8]] = &[
    &[0x89, 0x50, 0x4e, 0x47], // PNG
    &[0xff, 0xd8, 0xff],       // JPEG
    &[0x47, 0x49, 0x46, 0x38], // GIF
    &[0x25, 0x50, 0x44, 0x46], // PDF
    &[0x50, 0x4b, 0x03, 0x04], // ZIP
    &[0x52, 0x61, 0x72, 0x21], // RAR
    &[0x42, 0x5a, 0x68],       // BZip2
    &[0x1f, 0x8b, 0x08],       // GZip
    &[0x7f, 0x45, 0x4c, 0x46], // ELF
];

fn contains_ignore_case(table: &[&str], ext: &str) -> bool {
    table.iter().any(|known| known.eq_ignore_ascii_case(ext))
}

pub fn is_text_extension(ext: &str) -> bool {
    contains_ignore_case(TEXT_EXTENSIONS, ext)
}

pub fn is_text_filename(name: &str) -> bool {
    TEXT_FILENAMES.contains(&name)
}

pub fn is_binary_extension(ext: &str) -> bool {
    contains_ignore_case(BINARY_EXTENSIONS, ext)
}

pub fn is_excluded_filename(name: &str) -> bool {
    EXCLUDED_FILENAMES.contains(&name)
}

/// Whether `prefix` starts with a known binary signature.
pub fn has_binary_signature(prefix: &[u8]) -> bool {
    BINARY_SIGNATURES.iter().any(|sig| prefix.starts_with(sig))
}
