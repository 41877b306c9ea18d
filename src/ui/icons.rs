//! Nerd Font icons for nicels.
//!
//! Icons are looked up by special file name, special directory name and extension,
//! with generic fallbacks per kind. The lookup also tells the scanner whether the
//! name was recognized, which drives the recognized/unrecognized file colors.

use crate::core::{Entry, EntryKind};
use crate::utils::with_lowered_stack;

use phf::phf_map;

/// File extension to icon mapping
/// This map associates common file extensions with their corresponding
/// Nerd Font icons.
/// For example, "rs" maps to the Rust icon "оһЁ".
static EXT_ICON_MAP: phf::Map<&'static str, &'static str> = phf_map! {
    "rs" => "оһЁ",
    "py" => "оҳҶ",
    "js" => "оқҺ",
    "md" => "п’Ҡ",
    "html" => "оң¶",
    "css" => "оқү",
    "json" => "оҳӢ",
    "xml" => "пҖ“",
    "sh" => "оһ•",
    "go" => "у°ҹ“",
    "java" => "оңё",
    "c" => "оҳһ",
    "cpp" => "оҳқ",
    "h" => "пғҪ",
    "hpp" => "пғҪ",
    "php" => "оңҪ",
    "rb" => "оһ‘",
    "swift" => "оқ•",
    "kt" => "оқҙ",
    "lua" => "оҳ ",
    "ts" => "оқҰ",
    "tsx" => "оһә",
    "jsx" => "оһә",
    "vue" => "оҡЎ",
    "sql" => "оңҶ",
    "lock" => "пҖЈ",
    "exe" => "оңҸ",
    "zip" => "пҮҶ",
    "tar" => "пҮҶ",
    "gz" => "пҮҶ",
    "mp3" => "пҖҒ",
    "mp4" => "пҖҲ",
    "png" => "пҖҫ",
    "jpg" => "пҖҫ",
    "jpeg" => "пҖҫ",
    "gif" => "пҖҫ",
    "svg" => "пҖҫ",
    "pdf" => "пҮҒ",
    "doc" => "пҮӮ",
    "docx" => "пҮӮ",
    "xls" => "пҮғ",
    "xlsx" => "пҮғ",
    "ppt" => "пҮ„",
    "pptx" => "пҮ„",
    "txt" => "пғ¶",
    "log" => "пҮӘ",
    "cfg" => "пӮ…",
    "config" => "пҖ“",
    "ini" => "пҖ“",
    "bat" => "оһ•",
    "ps1" => "у°ЁҠ",
    "cmd" => "оһ•",
    "dll" => "оңҸ",
    "yml" => "пҖ“",
    "yaml" => "пҖ“",
    "toml" => "пҖ“",
    "deb" => "пҢҶ",
    "rpm" => "пҢ–",
    "dmg" => "п”ҹ",
    "appimage" => "оҜҶ",
    "snap" => "пҶҶ",
    "flatpak" => "п‘Ә",
    "msi" => "оңҸ",
    "iso" => "у°—®",
    "img" => "у°—®",
    "vhd" => "п…ә",
    "cab" => "оңҸ",
    "psd" => "оһё",
    "patch" => "оңҘ",
    "diff" => "оңҘ",
    "ebuild" => "пҢҚ",
    "spec" => "пҢ–",
    "cc" => "\u{e61d}",
    "cxx" => "\u{e61d}",
    "7z" => "\u{f1c6}",
    "xz" => "\u{f1c6}",
    "bz2" => "\u{f1c6}",
    "zst" => "\u{f1c6}",
    "hs" => "\u{e777}",
    "zig" => "\u{e6a9}",
    "nix" => "\u{f313}",
    "scss" => "\u{e603}",
    "less" => "\u{e758}",
    "wasm" => "\u{e6a1}",
    "csv" => "\u{f1c3}",
    "webp" => "\u{f1c5}",
    "ico" => "\u{f1c5}",
    "flac" => "\u{f001}",
    "wav" => "\u{f001}",
    "mkv" => "\u{f008}",
    "webm" => "\u{f008}",
    "zsh" => "\u{f489}",
    "fish" => "\u{f489}",
    "vim" => "\u{e7c5}",
    "tex" => "\u{e69b}",
    "proto" => "\u{f1c9}",
};

/// Special file names
/// This map associates specific filenames with their corresponding
/// Nerd Font icons.
/// For example, "Cargo.toml" maps to the icon "оһЁ".
static SPECIAL_FILE_ICON_MAP: phf::Map<&'static str, &'static str> = phf_map! {
    "README.md" => "п’Ҡ",
    "LICENSE" => "пҖӯ",
    "LICENSE-MIT" => "пҖӯ",
    "LICENSE-APACHE" => "пҖӯ",
    "COPYING" => "пҖӯ",
    "LICENSE.txt" => "пҖӯ",
    "Makefile" => "оқ№",
    ".gitignore" => "оңӮ",
    ".gitconfig" => "оңӮ",
    "Cargo.toml" => "оһЁ",
    "Dockerfile" => "оһ°",
    "package.json" => "оңҳ",
    "tsconfig.json" => "оңҳ",
    "webpack.config.js" => "оңҳ",
    "Pipfile" => "оңј",
    "requirements.txt" => "оңј",
    "setup.py" => "оңј",
    "config.yaml" => "пҖ“",
    "config.yml" => "пҖ“",
    ".env" => "п‘ў",
    ".env.local" => "п‘ў",
    ".env.production" => "п‘ў",
    ".env.development" => "п‘ў",
    "README" => "п’Ҡ",
    "TODO" => "пҒҖ",
    "Dockerfile.dev" => "оһ°",
    "Dockerfile.prod" => "оһ°",
    "Cargo.lock" => "пҖЈ",
    "CMakeLists.txt" => "оһ”",
    "PKGBUILD" => "у°ЈҮ",
    ".bashrc" => "уұҶғ",
    ".vimrc" => "оҹ…",
    "go.mod" => "\u{e627}",
    "go.sum" => "\u{e627}",
    "justfile" => "\u{e779}",
    "flake.nix" => "\u{f313}",
    "flake.lock" => "\u{f023}",
    ".editorconfig" => "\u{e615}",
    ".gitattributes" => "\u{e702}",
    ".gitmodules" => "\u{e702}",
    "nicels.toml" => "\u{e615}",
    "CHANGELOG.md" => "\u{f48a}",
};

/// Special directory names
/// This map associates specific directory names with their corresponding
/// Nerd Font icons.
/// For example, "node_modules" maps to the icon "о—ә".
static SPECIAL_DIR_ICON_MAP: phf::Map<&'static str, &'static str> = phf_map! {
    "bin" => "п‘ұ",
    "lib" => "п’Ү",
    "node_modules" => "о—ә",
    ".git" => "о—»",
    ".github" => "о—Ҫ",
    ".config" => "о—ј",
    "nvim" => "пҚҜ",
    "src" => "\u{f121}",
    "target" => "\u{f487}",
    "tests" => "\u{f0668}",
    "docs" => "\u{f02d}",
    ".cargo" => "\u{e7a8}",
    ".vscode" => "\u{e70c}",
};

/// Fallback glyphs
const DIR_ICON: &str = "\u{e5ff}";
const FILE_ICON: &str = "\u{f0f6}";
const LINK_DIR_ICON: &str = "\u{f482}";
const LINK_FILE_ICON: &str = "\u{f481}";
const EXEC_ICON: &str = "\u{f489}";

/// Outcome of an icon lookup by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconResult {
    pub icon: &'static str,
    /// A specific icon was found for the name rather than a fallback.
    pub recognized: bool,
}

/// Look up the icon for a name.
/// Directories consult the special directory map, everything else the special
/// file map and then the extension map (case-insensitive).
pub fn lookup(name: &str, is_dir: bool) -> IconResult {
    let found = if is_dir {
        SPECIAL_DIR_ICON_MAP
            .get(name)
            .copied()
            .or_else(|| with_lowered_stack(name, |s| SPECIAL_DIR_ICON_MAP.get(s).copied()))
    } else {
        SPECIAL_FILE_ICON_MAP
            .get(name)
            .copied()
            .or_else(|| extension_icon(name))
    };

    match found {
        Some(icon) => IconResult {
            icon,
            recognized: true,
        },
        None => IconResult {
            icon: if is_dir { DIR_ICON } else { FILE_ICON },
            recognized: false,
        },
    }
}

fn extension_icon(name: &str) -> Option<&'static str> {
    let dot_idx = name.rfind('.')?;
    if dot_idx == 0 || dot_idx == name.len() - 1 {
        return None;
    }
    let ext = &name[dot_idx + 1..];
    EXT_ICON_MAP
        .get(ext)
        .copied()
        .or_else(|| with_lowered_stack(ext, |s| EXT_ICON_MAP.get(s).copied()))
}

/// Get the Nerd Font icon for a given entry.
/// Symlinks and executables without a specific icon get their own glyphs.
pub fn nerd_font_icon(entry: &Entry) -> &'static str {
    if entry.is_symlink() {
        let to_dir = entry.kind() == EntryKind::Directory
            || entry.symlink_target().is_some_and(|t| t.ends_with('/'));
        return if to_dir { LINK_DIR_ICON } else { LINK_FILE_ICON };
    }

    let result = lookup(entry.name(), entry.is_dir());
    if !result.recognized && entry.is_executable() && !entry.is_dir() {
        return EXEC_ICON;
    }
    result.icon
}
