//! Programming languages and their native ecosystems.

use crate::stack::signature::TechSignature;

pub const SIGNATURES: &[TechSignature] = &[
    // Rust ecosystem
    TechSignature::language("Rust").files(&["Cargo.toml", "Cargo.lock"]).extensions(&[".rs"]),
    TechSignature::framework("Tauri").files(&["tauri.conf.json", "src-tauri/tauri.conf.json"]),
    TechSignature::framework("Axum").dependencies(&["axum"]),
    TechSignature::framework("Leptos").dependencies(&["leptos"]),
    TechSignature::tool("Tokio").dependencies(&["tokio"]),
    TechSignature::tool("Serde").dependencies(&["serde"]),
    TechSignature::tool("SQLx").files(&[".sqlx-data.json"]),

    // Systems and scripting
    TechSignature::language("Go").files(&["go.mod"]).extensions(&[".go"]),
    TechSignature::language("Zig").files(&["build.zig", "build.zig.zon"]).extensions(&[".zig"]),
    TechSignature::language("Lua").extensions(&[".lua"]),
    TechSignature::tool("Neovim").files(&["init.lua"]),
    TechSignature::tool("Lazy.nvim").files(&["lazy-lock.json"]),

    // General purpose
    TechSignature::language("Java").files(&["pom.xml", "build.gradle"]).extensions(&[".java"]),
    TechSignature::language("Kotlin").extensions(&[".kt", ".kts"]),
    TechSignature::language("Swift").files(&["Package.swift"]).extensions(&[".swift"]),
    TechSignature::language("Dart").files(&["pubspec.yaml"]).extensions(&[".dart"]),
    TechSignature::language("C").files(&["Makefile"]).extensions(&[".c", ".h"]),
    TechSignature::language("C++").extensions(&[".cpp", ".hpp", ".cc"]),
    TechSignature::language("C#").files(&[".csproj", ".sln"]).extensions(&[".cs"]),
    TechSignature::language("Haskell").files(&["stack.yaml", ".cabal"]).extensions(&[".hs"]),
    TechSignature::language("Scala").files(&["build.sbt"]).extensions(&[".scala"]),
    TechSignature::language("Julia").extensions(&[".jl"]),
    TechSignature::language("Elixir").files(&["mix.exs"]).extensions(&[".ex", ".exs"]),
    TechSignature::language("PHP").files(&["composer.json"]).extensions(&[".php"]),

    // Backend frameworks
    TechSignature::framework("Laravel").files(&["artisan", "composer.json"]),
    TechSignature::framework("Symfony").files(&["composer.json", "symfony.lock"]),
    TechSignature::framework("Spring Boot").files(&["pom.xml", "build.gradle"]),
    TechSignature::framework("Flask").dependencies(&["flask"]),
    TechSignature::tool("Streamlit").files(&["streamlit_app.py"]),
    TechSignature::tool("Gradio").dependencies(&["gradio"]),
    TechSignature::language("Solidity").extensions(&[".sol"]),
];
