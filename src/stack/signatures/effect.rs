//! Effect ecosystem packages.

use crate::stack::signature::TechSignature;

pub const SIGNATURES: &[TechSignature] = &[
    TechSignature::framework("Effect").dependencies(&["effect"]),
    TechSignature::tool("Effect Schema").dependencies(&["@effect/schema"]),
    TechSignature::tool("Effect Platform").dependencies(&["@effect/platform"]),
    TechSignature::tool("Effect Platform Node")
        .dependencies(&["@effect/platform-node", "@effect/platform-node-shared"]),
    TechSignature::tool("Effect Platform Browser").dependencies(&["@effect/platform-browser"]),
    TechSignature::tool("Effect Platform Bun").dependencies(&["@effect/platform-bun"]),
    TechSignature::tool("Effect SQL").dependencies(&["@effect/sql"]),
    TechSignature::tool("Effect SQL PostgreSQL").dependencies(&["@effect/sql-pg"]),
    TechSignature::tool("Effect SQL MySQL").dependencies(&["@effect/sql-mysql2"]),
    TechSignature::tool("Effect SQL SQLite Node").dependencies(&["@effect/sql-sqlite-node"]),
    TechSignature::tool("Effect SQL SQLite Bun").dependencies(&["@effect/sql-sqlite-bun"]),
    TechSignature::tool("Effect SQL SQLite WASM").dependencies(&["@effect/sql-sqlite-wasm"]),
    TechSignature::tool("Effect SQL SQLite React Native")
        .dependencies(&["@effect/sql-sqlite-react-native"]),
    TechSignature::tool("Effect SQL ClickHouse").dependencies(&["@effect/sql-clickhouse"]),
    TechSignature::tool("Effect SQL MSSQL").dependencies(&["@effect/sql-mssql"]),
    TechSignature::tool("Effect SQL LibSQL").dependencies(&["@effect/sql-libsql"]),
    TechSignature::tool("Effect SQL Cloudflare D1").dependencies(&["@effect/sql-d1"]),
    TechSignature::tool("Effect SQL Cloudflare DO").dependencies(&["@effect/sql-sqlite-do"]),
    TechSignature::tool("Effect SQL Drizzle").dependencies(&["@effect/sql-drizzle"]),
    TechSignature::tool("Effect SQL Kysely").dependencies(&["@effect/sql-kysely"]),
    TechSignature::tool("Effect RPC").dependencies(&["@effect/rpc", "@effect/rpc-http"]),
    TechSignature::tool("Effect AI").dependencies(&["@effect/ai"]),
    TechSignature::tool("Effect AI OpenAI").dependencies(&["@effect/ai-openai"]),
    TechSignature::tool("Effect AI Anthropic").dependencies(&["@effect/ai-anthropic"]),
    TechSignature::tool("Effect AI Google").dependencies(&["@effect/ai-google"]),
    TechSignature::tool("Effect AI Amazon Bedrock").dependencies(&["@effect/ai-amazon-bedrock"]),
    TechSignature::tool("Effect Cluster").dependencies(&["@effect/cluster"]),
    TechSignature::tool("Effect Cluster Node").dependencies(&["@effect/cluster-node"]),
    TechSignature::tool("Effect Cluster Browser").dependencies(&["@effect/cluster-browser"]),
    TechSignature::tool("Effect Cluster Workflow").dependencies(&["@effect/cluster-workflow"]),
    TechSignature::tool("Effect CLI").dependencies(&["@effect/cli"]),
    TechSignature::tool("Effect Vitest").dependencies(&["@effect/vitest"]),
    TechSignature::tool("Effect OpenTelemetry").dependencies(&["@effect/opentelemetry"]),
    TechSignature::tool("Effect Printer").dependencies(&["@effect/printer"]),
    TechSignature::tool("Effect Printer ANSI").dependencies(&["@effect/printer-ansi"]),
    TechSignature::tool("Effect Experimental").dependencies(&["@effect/experimental"]),
    TechSignature::tool("Effect Typeclass").dependencies(&["@effect/typeclass"]),
    TechSignature::tool("Effect Build Utils").dependencies(&["@effect/build-utils"]),
    TechSignature::tool("Effect Docgen").dependencies(&["@effect/docgen"]),
    TechSignature::tool("Effect ESLint Plugin").dependencies(&["@effect/eslint-plugin"]),
    TechSignature::tool("Effect Language Service").dependencies(&["@effect/language-service"]),
    TechSignature::tool("Effect STM").dependencies(&["@effect/stm"]),
    TechSignature::tool("Effect Stream").dependencies(&["@effect/stream"]),
    TechSignature::tool("Effect Match").dependencies(&["@effect/match"]),
];
