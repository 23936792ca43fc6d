//! Bundled language table. Identifiers follow the Piston runtime names.

use super::LanguageEntry;

const fn lang(
    name: &'static str,
    id: &'static str,
    variants: &'static [&'static str],
) -> LanguageEntry {
    LanguageEntry { name, id, variants }
}

// Where a display name appears twice, the first row is the default variant.
pub(super) static LANGUAGES: &[LanguageEntry] = &[
    lang("AWK", "awk", &["gawk"]),
    lang("Bash", "bash", &["bash"]),
    lang("Befunge-93", "befunge93", &[]),
    lang("BQN", "bqn", &["cbqn"]),
    lang("Brachylog", "brachylog", &[]),
    lang("Brainfuck", "brainfuck", &[]),
    lang("C", "c", &["gcc"]),
    lang("C++", "c++", &["gcc"]),
    lang("C#", "csharp.net", &["dotnet"]),
    lang("C#", "csharp", &["mono"]),
    lang("CJam", "cjam", &[]),
    lang("Clojure", "clojure", &[]),
    lang("COBOL", "cobol", &["gnucobol"]),
    lang("CoffeeScript", "coffeescript", &["node"]),
    lang("COW", "cow", &[]),
    lang("Crystal", "crystal", &[]),
    lang("D", "d", &["gdc"]),
    lang("Dart", "dart", &[]),
    lang("Dash", "dash", &[]),
    lang("Elixir", "elixir", &[]),
    lang("Emacs Lisp", "emacs", &[]),
    lang("Emojicode", "emojicode", &[]),
    lang("Erlang", "erlang", &[]),
    lang("F#", "fsharp.net", &["dotnet"]),
    lang("F# Interactive", "fsi", &["dotnet"]),
    lang("Forth", "forth", &["gforth"]),
    lang("Fortran", "fortran", &["gfortran"]),
    lang("FreeBASIC", "freebasic", &[]),
    lang("Go", "go", &[]),
    lang("GolfScript", "golfscript", &[]),
    lang("Groovy", "groovy", &[]),
    lang("Haskell", "haskell", &["ghc"]),
    lang("Husk", "husk", &[]),
    lang("Java", "java", &["openjdk"]),
    lang("JavaScript", "javascript", &["node"]),
    lang("JavaScript", "deno", &["deno"]),
    lang("Jelly", "jelly", &[]),
    lang("Julia", "julia", &[]),
    lang("Kotlin", "kotlin", &[]),
    lang("Lisp", "lisp", &["sbcl"]),
    lang("LLVM IR", "llvm_ir", &["llc"]),
    lang("LOLCODE", "lolcode", &[]),
    lang("Lua", "lua", &[]),
    lang("MATL", "matl", &[]),
    lang("NASM", "nasm", &["nasm"]),
    lang("NASM (x64)", "nasm64", &["nasm"]),
    lang("Nim", "nim", &[]),
    lang("OCaml", "ocaml", &[]),
    lang("Octave", "octave", &[]),
    lang("Pascal", "pascal", &["fpc"]),
    lang("Perl", "perl", &[]),
    lang("PHP", "php", &[]),
    lang("Pony", "ponylang", &[]),
    lang("PowerShell", "powershell", &["pwsh"]),
    lang("Prolog", "prolog", &["swipl"]),
    lang("Pure", "pure", &[]),
    lang("Pyth", "pyth", &[]),
    lang("Python", "python", &["cpython"]),
    lang("Python 2", "python2", &["cpython"]),
    lang("R", "rscript", &[]),
    lang("Racket", "racket", &[]),
    lang("Raku", "raku", &["rakudo"]),
    lang("Retina", "retina", &[]),
    lang("Rockstar", "rockstar", &[]),
    lang("Ruby", "ruby", &[]),
    lang("Rust", "rust", &["rustc"]),
    lang("Scala", "scala", &[]),
    lang("Smalltalk", "smalltalk", &["gst"]),
    lang("SQLite", "sqlite3", &[]),
    lang("Swift", "swift", &[]),
    lang("TypeScript", "typescript", &["node"]),
    lang("TypeScript", "deno-ts", &["deno"]),
    lang("V", "vlang", &[]),
    lang("Vyxal", "vyxal", &[]),
    lang("Zig", "zig", &[]),
];

/// Short names that map straight to an identifier.
pub(super) static ALIASES: &[(&str, &str)] = &[
    ("c#", "csharp.net"),
    ("cs", "csharp.net"),
    ("cpp", "c++"),
    ("f#", "fsharp.net"),
    ("fs", "fsharp.net"),
    ("js", "javascript"),
    ("node", "javascript"),
    ("ts", "typescript"),
    ("py", "python"),
    ("py3", "python"),
    ("python3", "python"),
    ("py2", "python2"),
    ("rb", "ruby"),
    ("rs", "rust"),
    ("kt", "kotlin"),
    ("golang", "go"),
    ("sh", "bash"),
    ("r", "rscript"),
    ("pl", "perl"),
    ("hs", "haskell"),
    ("ml", "ocaml"),
    ("jl", "julia"),
    ("bf", "brainfuck"),
];
