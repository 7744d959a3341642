//! Databases, ORMs, validation, search and backend-as-a-service platforms.

use crate::stack::signature::TechSignature;

pub const SIGNATURES: &[TechSignature] = &[
    // Data and validation
    TechSignature::tool("Prisma").files(&["prisma/schema.prisma"]).dependencies(&["prisma"]),
    TechSignature::tool("Drizzle ORM").files(&["drizzle.config.ts"]).dependencies(&["drizzle-orm"]),
    TechSignature::tool("Kysely").dependencies(&["kysely"]),
    TechSignature::tool("Zod").dependencies(&["zod"]),
    TechSignature::tool("Valibot").dependencies(&["valibot"]),
    TechSignature::tool("ArkType").dependencies(&["arktype"]),
    TechSignature::tool("TanStack Query").dependencies(&["@tanstack/react-query"]),

    // Databases and BaaS
    TechSignature::tool("PostgreSQL").dependencies(&["pg", "postgres"]),
    TechSignature::tool("MySQL").dependencies(&["mysql2", "mysql"]),
    TechSignature::tool("MongoDB").dependencies(&["mongodb", "mongoose"]),
    TechSignature::tool("Redis").dependencies(&["redis", "ioredis"]),
    TechSignature::tool("SQLite").dependencies(&["sqlite3", "better-sqlite3"]),
    TechSignature::tool("Firebase").files(&["firebase.json"]).dependencies(&["firebase"]),
    TechSignature::tool("Supabase").dependencies(&["@supabase/supabase-js"]),
    TechSignature::tool("PlanetScale").dependencies(&["@planetscale/database"]),
    TechSignature::tool("Neon").dependencies(&["@neondatabase/serverless"]),
    TechSignature::tool("Convex").dependencies(&["convex"]),
    TechSignature::tool("PocketBase").dependencies(&["pocketbase"]),
    TechSignature::tool("SurrealDB").dependencies(&["surrealdb.js"]),
    TechSignature::tool("Appwrite").dependencies(&["appwrite"]),

    // Search
    TechSignature::tool("Algolia").dependencies(&["algoliasearch"]),
    TechSignature::tool("Meilisearch").dependencies(&["meilisearch"]),
    TechSignature::tool("Elasticsearch").dependencies(&["@elastic/elasticsearch"]),
];
