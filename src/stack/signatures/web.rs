//! Web frameworks, UI kits, state management and client libraries.

use crate::stack::signature::TechSignature;

pub const SIGNATURES: &[TechSignature] = &[
    // Typesafe full-stack
    TechSignature::tool("tRPC")
        .dependencies(&["@trpc/server", "@trpc/client", "@trpc/react-query", "@trpc/next"]),
    TechSignature::tool("NextAuth.js / Auth.js")
        .dependencies(&["next-auth", "@auth/core", "@auth/prisma-adapter"]),
    TechSignature::tool("Lucia Auth").dependencies(&["lucia"]),
    TechSignature::tool("UploadThing").dependencies(&["uploadthing", "@uploadthing/react"]),
    TechSignature::tool("Clerk").dependencies(&["@clerk/nextjs", "@clerk/clerk-sdk-node"]),
    TechSignature::tool("Kinde").dependencies(&["@kinde-oss/kinde-auth-nextjs"]),

    // Styling
    TechSignature::tool("Tailwind CSS v4")
        .files(&["tailwind.css"])
        .dependencies(&["@tailwindcss/vite", "@tailwindcss/postcss"]),
    TechSignature::tool("Tailwind CSS v3")
        .files(&["tailwind.config.js", "tailwind.config.ts", "tailwind.config.cjs"]),
    TechSignature::tool("shadcn/ui").files(&["components.json"]),
    TechSignature::tool("daisyUI").dependencies(&["daisyui"]),
    TechSignature::tool("Radix UI")
        .dependencies(&["@radix-ui/react-primitive", "@radix-ui/react-slot"]),
    TechSignature::framework("Mantine").dependencies(&["@mantine/core"]),
    TechSignature::tool("Panda CSS").files(&["panda.config.ts"]).dependencies(&["@pandacss/dev"]),

    // Meta-frameworks and runtimes
    TechSignature::framework("Next.js")
        .files(&["next.config.js", "next.config.ts", "next.config.mjs"])
        .dependencies(&["next"]),
    TechSignature::framework("Remix")
        .files(&["remix.config.js", "vite.config.ts"])
        .dependencies(&["@remix-run/react"]),
    TechSignature::framework("Astro")
        .files(&["astro.config.mjs", "astro.config.ts"])
        .dependencies(&["astro"]),
    TechSignature::framework("SvelteKit")
        .files(&["svelte.config.js"])
        .dependencies(&["@sveltejs/kit"]),
    TechSignature::framework("Hono").dependencies(&["hono"]),
    TechSignature::framework("Elysia").dependencies(&["elysia"]),
    TechSignature::framework("TanStack Start").dependencies(&["@tanstack/start"]),
    TechSignature::tool("Deno").files(&["deno.json", "deno.jsonc"]),

    // UI frameworks
    TechSignature::framework("React").dependencies(&["react"]),
    TechSignature::framework("Vue").dependencies(&["vue"]),
    TechSignature::framework("Svelte").dependencies(&["svelte"]),
    TechSignature::framework("Preact").dependencies(&["preact"]),
    TechSignature::framework("SolidJS").dependencies(&["solid-js"]),
    TechSignature::framework("Qwik").dependencies(&["@builder.io/qwik"]),
    TechSignature::framework("Angular").dependencies(&["@angular/core"]),
    TechSignature::framework("Ember.js").dependencies(&["ember-source"]),
    TechSignature::framework("Bootstrap").dependencies(&["bootstrap"]),
    TechSignature::tool("Chakra UI").dependencies(&["@chakra-ui/react"]),
    TechSignature::tool("Material UI").dependencies(&["@mui/material"]),
    TechSignature::tool("Headless UI").dependencies(&["@headlessui/react", "@headlessui/vue"]),
    TechSignature::tool("Flowbite").dependencies(&["flowbite", "flowbite-react"]),
    TechSignature::tool("Ant Design").dependencies(&["antd"]),
    TechSignature::tool("HeroUI (NextUI)").dependencies(&["@heroui/react", "@nextui-org/react"]),
    TechSignature::tool("Ark UI").dependencies(&["@ark-ui/react", "@ark-ui/vue"]),
    TechSignature::tool("Magic UI").dependencies(&["magic-ui"]),
    TechSignature::tool("Framer Motion").dependencies(&["framer-motion"]),

    // State management
    TechSignature::tool("Redux").dependencies(&["redux", "@reduxjs/toolkit"]),
    TechSignature::tool("XState").dependencies(&["xstate"]),
    TechSignature::tool("Recoil").dependencies(&["recoil"]),
    TechSignature::tool("MobX").dependencies(&["mobx"]),
    TechSignature::tool("Zustand").dependencies(&["zustand"]),
    TechSignature::tool("Jotai").dependencies(&["jotai"]),

    // Backend and API
    TechSignature::framework("Express.js").dependencies(&["express"]),
    TechSignature::framework("Fastify").dependencies(&["fastify"]),
    TechSignature::framework("NestJS").dependencies(&["@nestjs/core"]),
    TechSignature::tool("GraphQL").extensions(&[".graphql", ".gql"]).dependencies(&["graphql"]),
    TechSignature::tool("Apollo").dependencies(&["@apollo/client", "apollo-server"]),
    TechSignature::tool("Socket.IO").dependencies(&["socket.io", "socket.io-client"]),
    TechSignature::framework("AdonisJS").dependencies(&["@adonisjs/core"]),

    // Animation and 3D
    TechSignature::tool("Three.js").dependencies(&["three"]),
    TechSignature::tool("React Three Fiber").dependencies(&["@react-three/fiber"]),
    TechSignature::tool("GSAP").dependencies(&["gsap"]),
    TechSignature::tool("Lottie").dependencies(&["lottie-web", "lottie-react"]),
    TechSignature::tool("PixiJS").dependencies(&["pixi.js"]),
    TechSignature::tool("Anime.js").dependencies(&["animejs"]),
    TechSignature::tool("React Spring").dependencies(&["react-spring", "@react-spring/web"]),
    TechSignature::tool("Motion").dependencies(&["framer-motion", "motion"]),

    // Authentication
    TechSignature::tool("Auth0").dependencies(&["auth0", "@auth0/auth0-react"]),
    TechSignature::tool("Better Auth").dependencies(&["better-auth"]),
    TechSignature::tool("Passport").dependencies(&["passport"]),

    // Mobile and desktop
    TechSignature::framework("Expo").files(&["app.json"]).dependencies(&["expo"]),
    TechSignature::framework("React Native").dependencies(&["react-native"]),
    TechSignature::framework("Flutter").files(&["pubspec.yaml"]).extensions(&[".dart"]),
    TechSignature::framework("Electron").dependencies(&["electron"]),
    TechSignature::framework("Ionic")
        .dependencies(&["@ionic/core", "@ionic/react", "@ionic/vue", "@ionic/angular"]),
    TechSignature::tool("Capacitor")
        .files(&["capacitor.config.ts", "capacitor.config.json"])
        .dependencies(&["@capacitor/core"]),

    // Misc
    TechSignature::tool("RxJS").dependencies(&["rxjs"]),
    TechSignature::tool("Chart.js").dependencies(&["chart.js"]),
    TechSignature::tool("D3.js").dependencies(&["d3"]),
    TechSignature::tool("Cloudinary").dependencies(&["cloudinary"]),
    TechSignature::tool("Discord.js").dependencies(&["discord.js"]),
    TechSignature::tool("ESLint")
        .files(&[
            ".eslintrc",
            ".eslintrc.js",
            ".eslintrc.json",
            "eslint.config.js",
            "eslint.config.mjs",
        ])
        .dependencies(&["eslint"]),
    TechSignature::tool("Prettier")
        .files(&[".prettierrc", ".prettierrc.json", "prettier.config.js"])
        .dependencies(&["prettier"]),
    TechSignature::tool("Nx").files(&["nx.json"]).dependencies(&["nx"]),
];
