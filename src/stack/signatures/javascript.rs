//! JavaScript and TypeScript tooling: package managers, monorepo tools, compilers,
//! bundlers, linters and test runners.

use crate::stack::signature::TechSignature;

pub const SIGNATURES: &[TechSignature] = &[
    // Package managers
    TechSignature::tool("pnpm").files(&["pnpm-lock.yaml", "pnpm-workspace.yaml", ".pnpmfile.cjs"]),
    TechSignature::tool("npm").files(&["package-lock.json", ".npmrc"]),
    TechSignature::tool("Yarn").files(&["yarn.lock", ".yarnrc", ".yarnrc.yml"]),
    TechSignature::tool("Bun").files(&["bun.lockb", "bun.lock", "bunfig.toml"]),

    // Monorepo tools
    TechSignature::tool("Changesets").files(&[".changeset"]).dependencies(&["@changesets/cli"]),
    TechSignature::tool("Lerna").files(&["lerna.json"]).dependencies(&["lerna"]),
    TechSignature::tool("Rush").files(&["rush.json"]).dependencies(&["@microsoft/rush"]),

    // TypeScript tooling
    TechSignature::language("TypeScript")
        .files(&["tsconfig.json", "tsconfig.build.json"])
        .extensions(&[".ts", ".tsx", ".mts", ".cts"])
        .dependencies(&["typescript"]),
    TechSignature::tool("tsx").dependencies(&["tsx"]),
    TechSignature::tool("ts-node").dependencies(&["ts-node"]),
    TechSignature::tool("tsup").files(&["tsup.config.ts"]).dependencies(&["tsup"]),
    TechSignature::tool("tstyche").dependencies(&["tstyche"]),

    // Code quality and analysis
    TechSignature::tool("Madge").dependencies(&["madge"]),
    TechSignature::tool("jscodeshift").dependencies(&["jscodeshift"]),

    // Vite ecosystem
    TechSignature::tool("Vite")
        .files(&["vite.config.ts", "vite.config.js", "vite.config.mts"])
        .dependencies(&["vite"]),
    TechSignature::tool("Vitest")
        .files(&["vitest.config.ts", "vitest.workspace.ts"])
        .dependencies(&["vitest"]),
    TechSignature::tool("Vitest Browser").dependencies(&["@vitest/browser"]),
    TechSignature::tool("Vitest Coverage")
        .dependencies(&["@vitest/coverage-v8", "@vitest/coverage-istanbul"]),

    // UnJS
    TechSignature::framework("Nuxt")
        .files(&["nuxt.config.ts", "nuxt.config.js"])
        .dependencies(&["nuxt"]),
    TechSignature::framework("Nitro").files(&["nitro.config.ts"]).dependencies(&["nitropack"]),
    TechSignature::framework("h3").dependencies(&["h3"]),
    TechSignature::tool("Ofetch").dependencies(&["ofetch"]),
    TechSignature::tool("UnoCSS")
        .files(&["uno.config.ts", "unocss.config.ts"])
        .dependencies(&["unocss"]),
    TechSignature::tool("Unplugin").dependencies(&["unplugin"]),
    TechSignature::tool("Consola").dependencies(&["consola"]),
    TechSignature::tool("Defu").dependencies(&["defu"]),
    TechSignature::tool("Jiti").dependencies(&["jiti"]),
    TechSignature::tool("Citty").dependencies(&["citty"]),

    // Rust-based tooling
    TechSignature::tool("Oxc").files(&["oxc.json"]).dependencies(&["oxc", "@oxc-project/types"]),
    TechSignature::tool("Ruff").files(&["ruff.toml", ".ruff.toml"]),
    TechSignature::tool("Rolldown").dependencies(&["@rolldown/node"]),
    TechSignature::tool("Uv").files(&["uv.lock"]),
    TechSignature::tool("Rspack")
        .files(&["rspack.config.ts", "rspack.config.js"])
        .dependencies(&["@rspack/core"]),
    TechSignature::tool("Rsbuild").files(&["rsbuild.config.ts"]).dependencies(&["@rsbuild/core"]),
    TechSignature::tool("Swc").files(&[".swcrc"]).dependencies(&["@swc/core"]),
    TechSignature::tool("Lightning CSS").dependencies(&["lightningcss"]),
    TechSignature::tool("Turborepo").files(&["turbo.json"]),
    TechSignature::tool("Biome").files(&["biome.json"]).dependencies(&["@biomejs/biome"]),

    // Build tools and bundlers
    TechSignature::tool("Webpack").files(&["webpack.config.js"]).dependencies(&["webpack"]),
    TechSignature::tool("Rollup").files(&["rollup.config.js"]).dependencies(&["rollup"]),
    TechSignature::tool("Parcel").files(&[".parcelrc"]).dependencies(&["parcel"]),
    TechSignature::tool("Esbuild").dependencies(&["esbuild"]),
    TechSignature::tool("Babel")
        .files(&["babel.config.js", ".babelrc"])
        .dependencies(&["@babel/core"]),
    TechSignature::tool("Turbopack").dependencies(&["turbopack"]),

    // Testing
    TechSignature::tool("Jest").files(&["jest.config.js"]).dependencies(&["jest"]),
    TechSignature::tool("Cypress")
        .files(&["cypress.json", "cypress.config.ts"])
        .dependencies(&["cypress"]),
    TechSignature::tool("Playwright")
        .files(&["playwright.config.ts"])
        .dependencies(&["@playwright/test"]),
    TechSignature::tool("Storybook").files(&[".storybook"]).dependencies(&["storybook"]),
];
