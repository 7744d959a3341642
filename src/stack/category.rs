//! Display categories for detected technologies
//!
//! Categorization is a total function over names: known names are looked up in fixed
//! lists checked in a fixed precedence, everything else lands in [`Category::Other`].
//! Category order is the declaration order of the enum.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Effect,
    Framework,
    Language,
    #[serde(rename = "Styling & UI")]
    StylingUi,
    #[serde(rename = "Database & ORM")]
    Database,
    #[serde(rename = "API & Backend")]
    ApiBackend,
    Authentication,
    #[serde(rename = "State Management")]
    StateManagement,
    Testing,
    #[serde(rename = "Build Tools")]
    BuildTools,
    #[serde(rename = "AI & ML")]
    AiMl,
    #[serde(rename = "Animation & 3D")]
    Animation,
    #[serde(rename = "DevOps & Infra")]
    DevOps,
    #[serde(rename = "CMS")]
    Cms,
    Documentation,
    #[serde(rename = "Package Manager")]
    PackageManager,
    Other,
}

/// Display order of categories
pub const CATEGORY_ORDER: &[Category] = &[
    Category::Effect,
    Category::Framework,
    Category::Language,
    Category::StylingUi,
    Category::Database,
    Category::ApiBackend,
    Category::Authentication,
    Category::StateManagement,
    Category::Testing,
    Category::BuildTools,
    Category::AiMl,
    Category::Animation,
    Category::DevOps,
    Category::Cms,
    Category::Documentation,
    Category::PackageManager,
    Category::Other,
];

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Effect => "Effect",
            Category::Framework => "Framework",
            Category::Language => "Language",
            Category::StylingUi => "Styling & UI",
            Category::Database => "Database & ORM",
            Category::ApiBackend => "API & Backend",
            Category::Authentication => "Authentication",
            Category::StateManagement => "State Management",
            Category::Testing => "Testing",
            Category::BuildTools => "Build Tools",
            Category::AiMl => "AI & ML",
            Category::Animation => "Animation & 3D",
            Category::DevOps => "DevOps & Infra",
            Category::Cms => "CMS",
            Category::Documentation => "Documentation",
            Category::PackageManager => "Package Manager",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const PACKAGE_MANAGERS: &[&str] = &["pnpm", "npm", "Yarn", "Bun", "Deno"];

const LANGUAGES: &[&str] = &[
    "TypeScript", "JavaScript", "Python", "Rust", "Go", "Java", "Kotlin", "Swift", "Dart", "C",
    "C++", "C#", "PHP", "Ruby", "Elixir", "Scala", "Haskell", "Lua", "Zig", "Solidity", "Mojo",
    "Julia", "HTML", "Shell", "PowerShell", "Perl", "YAML", "JSON", "TOML", "XML",
];

const FRAMEWORKS: &[&str] = &[
    "React", "Vue", "Svelte", "Angular", "Next.js", "Nuxt", "Astro", "Remix", "SvelteKit",
    "SolidJS", "Qwik", "Preact", "Ember.js", "Express.js", "Fastify", "NestJS", "Hono", "Elysia",
    "Django", "FastAPI", "Flask", "Laravel", "Spring Boot", "TanStack Start",
];

const STYLING: &[&str] = &[
    "Tailwind CSS v4", "Tailwind CSS v3", "shadcn/ui", "daisyUI", "Radix UI", "Mantine",
    "Panda CSS", "UnoCSS", "Bootstrap", "Chakra UI", "Material UI", "Headless UI", "Ant Design",
    "HeroUI (NextUI)", "Ark UI", "Magic UI", "Flowbite", "CSS", "SCSS", "SASS", "Less", "Stylus",
];

const DATABASES: &[&str] = &[
    "Prisma", "Drizzle ORM", "Kysely", "PostgreSQL", "MySQL", "MongoDB", "Redis", "SQLite",
    "Firebase", "Supabase", "PlanetScale", "Neon", "Convex", "PocketBase", "SurrealDB",
    "Appwrite", "SQLx",
];

const TESTING: &[&str] = &[
    "Jest", "Vitest", "Cypress", "Playwright", "Storybook", "Vitest Browser", "Vitest Coverage",
];

const BUILD_TOOLS: &[&str] = &[
    "Vite", "Webpack", "Rollup", "Parcel", "Esbuild", "Babel", "Turbopack", "Rspack", "Rsbuild",
    "Swc", "Biome", "ESLint", "Prettier", "Turborepo", "Nx", "Changesets", "Lerna", "Rush", "tsx",
    "ts-node", "tsup", "tstyche", "Madge", "jscodeshift", "Oxc", "Rolldown", "Lightning CSS",
    "Husky", "lint-staged", "commitlint", "Semantic Release", "Lefthook", "Pre-commit",
];

const STATE_MANAGEMENT: &[&str] = &[
    "Redux", "XState", "Recoil", "MobX", "Zustand", "Jotai", "TanStack Query",
];

const AUTHENTICATION: &[&str] = &[
    "NextAuth.js / Auth.js", "Lucia Auth", "Clerk", "Kinde", "Auth0", "Better Auth", "Passport",
];

const AI_ML: &[&str] = &[
    "OpenAI", "Anthropic", "LangChain", "LlamaIndex", "PyTorch", "TensorFlow", "Hugging Face",
    "Mistral AI", "Ollama", "Groq", "Cohere", "DeepSeek", "Replicate", "Stability AI",
    "Pinecone", "ONNX", "JAX", "Keras", "Scikit-learn", "Cursor", "CodeRabbit", "GitHub Copilot",
    "Codeium", "Windsurf", "Aider",
];

const DEVOPS: &[&str] = &[
    "Docker", "Terraform", "Pulumi", "GitHub Actions", "Vercel", "Netlify", "Cloudflare", "AWS",
    "Google Cloud", "Azure", "Heroku", "Fly.io", "Railway", "Nginx", "Zeabur", "Coolify", "Nix",
    "OpenTofu", "Sentry", "Datadog", "PostHog", "Ansible", "Kubernetes", "Helm", "Jenkins",
    "CircleCI", "Travis CI", "GitLab CI", "Blacksmith", "Vagrant", "Packer", "Renovate",
    "Dependabot",
];

const ANIMATION: &[&str] = &[
    "Framer Motion", "Motion", "Three.js", "React Three Fiber", "GSAP", "Lottie", "PixiJS",
    "Anime.js", "React Spring",
];

const CMS: &[&str] = &[
    "Strapi", "Sanity", "Payload CMS", "Storyblok", "WordPress", "Directus", "Ghost", "Keystone",
];

const API_BACKEND: &[&str] = &["GraphQL", "Apollo", "tRPC", "Socket.IO", "UploadThing", "Resend"];

const DOCUMENTATION: &[&str] = &[
    "VitePress", "Docusaurus", "Nextra", "GitBook", "MkDocs", "Sphinx", "Markdown",
];

/// Named lists in precedence order. The first list containing a name decides its category.
const PRECEDENCE: &[(Category, &[&str])] = &[
    (Category::PackageManager, PACKAGE_MANAGERS),
    (Category::Language, LANGUAGES),
    (Category::Framework, FRAMEWORKS),
    (Category::StylingUi, STYLING),
    (Category::Database, DATABASES),
    (Category::Testing, TESTING),
    (Category::BuildTools, BUILD_TOOLS),
    (Category::StateManagement, STATE_MANAGEMENT),
    (Category::Authentication, AUTHENTICATION),
    (Category::AiMl, AI_ML),
    (Category::DevOps, DEVOPS),
    (Category::Animation, ANIMATION),
    (Category::Cms, CMS),
    (Category::ApiBackend, API_BACKEND),
    (Category::Documentation, DOCUMENTATION),
];

/// Assigns a technology name to its display category
pub fn categorize(name: &str) -> Category {
    if name.starts_with("Effect") {
        return Category::Effect;
    }

    PRECEDENCE
        .iter()
        .find(|(_, names)| names.contains(&name))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

/// Technologies of one category, in detection order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub category: Category,
    pub technologies: Vec<String>,
}

/// Groups names by category. Groups follow [`CATEGORY_ORDER`]; names keep their input order.
pub fn group_by_category<S: AsRef<str>>(names: &[S]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();

    for name in names {
        let name = name.as_ref();
        let category = categorize(name);
        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.technologies.push(name.to_string()),
            None => groups.push(CategoryGroup {
                category,
                technologies: vec![name.to_string()],
            }),
        }
    }

    groups.sort_by_key(|g| g.category);
    groups
}
