//! Deployment targets, infrastructure-as-code and hosted services.

use crate::stack::signature::TechSignature;

pub const SIGNATURES: &[TechSignature] = &[
    // Infrastructure and ops
    TechSignature::infrastructure("Terraform").files(&[".terraform.lock.hcl"]).extensions(&[".tf"]),
    TechSignature::infrastructure("OpenTofu").files(&[".opentofu.lock.hcl"]),
    TechSignature::infrastructure("Pulumi").files(&["Pulumi.yaml"]),
    TechSignature::infrastructure("Docker").files(&["Dockerfile", "docker-compose.yml"]),
    TechSignature::infrastructure("Nix").files(&["flake.nix", "shell.nix"]),
    TechSignature::infrastructure("GitHub Actions").files(&[".github/workflows"]),

    // Cloud, analytics and monitoring
    TechSignature::tool("Sentry")
        .files(&["sentry.properties", "sentry.client.config.js", "sentry.server.config.js"])
        .dependencies(&["@sentry/browser", "@sentry/node", "@sentry/react", "@sentry/nextjs"]),
    TechSignature::infrastructure("Cloudflare")
        .files(&["wrangler.toml", "_worker.js"])
        .dependencies(&["@cloudflare/workers-types"]),
    TechSignature::infrastructure("Vercel")
        .files(&["vercel.json"])
        .dependencies(&["vercel", "@vercel/analytics", "@vercel/speed-insights"]),
    TechSignature::infrastructure("Netlify")
        .files(&["netlify.toml"])
        .dependencies(&["netlify-cli"]),
    TechSignature::infrastructure("AWS")
        .dependencies(&["aws-sdk", "@aws-sdk/client-s3", "@aws-sdk/client-dynamodb"]),
    TechSignature::infrastructure("Google Cloud")
        .dependencies(&["googleapis", "@google-cloud/storage"]),
    TechSignature::infrastructure("Azure").dependencies(&["@azure/storage-blob", "@azure/cosmos"]),
    TechSignature::tool("Datadog").dependencies(&["dd-trace", "@datadog/browser-logs"]),
    TechSignature::tool("PostHog").dependencies(&["posthog-js", "posthog-node"]),
    TechSignature::tool("Mixpanel").dependencies(&["mixpanel-browser"]),
    TechSignature::tool("Segment").dependencies(&["@segment/analytics-next"]),
    TechSignature::tool("Resend").dependencies(&["resend"]),
    TechSignature::tool("LogRocket").dependencies(&["logrocket"]),

    // Headless CMS
    TechSignature::tool("Strapi").dependencies(&["@strapi/strapi", "strapi"]),
    TechSignature::tool("Sanity")
        .files(&["sanity.config.ts", "sanity.cli.ts"])
        .dependencies(&["sanity", "@sanity/client"]),
    TechSignature::tool("Payload CMS").files(&["payload.config.ts"]).dependencies(&["payload"]),
    TechSignature::tool("Storyblok").dependencies(&["@storyblok/react", "storyblok-js-client"]),
    TechSignature::framework("WordPress")
        .files(&["wp-config.php", "style.css"])
        .dependencies(&["@wordpress/scripts"]),
    TechSignature::tool("Directus").dependencies(&["@directus/sdk"]),
    TechSignature::framework("Ghost").dependencies(&["ghost", "@tryghost/admin-api"]),
    TechSignature::framework("Keystone").dependencies(&["@keystone-6/core"]),

    // Payments
    TechSignature::tool("Stripe").dependencies(&["stripe", "@stripe/stripe-js"]),
    TechSignature::tool("Lemon Squeezy").dependencies(&["@lemonsqueezy/lemonsqueezy.js"]),
    TechSignature::tool("Paddle").dependencies(&["@paddle/paddle-node-sdk"]),

    // Hosting
    TechSignature::infrastructure("Heroku").files(&["Procfile"]),
    TechSignature::infrastructure("Fly.io").files(&["fly.toml"]),
    TechSignature::infrastructure("Railway").files(&["railway.toml", "railway.json"]),
    TechSignature::infrastructure("Nginx").files(&["nginx.conf"]),
    TechSignature::infrastructure("Zeabur").files(&["zeabur.json", "zeabur.toml"]),
    TechSignature::infrastructure("Coolify").files(&["coolify.yaml"]),
];
