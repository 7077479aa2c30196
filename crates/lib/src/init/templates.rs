//! Template content for `extforge init`.

/// Template for `extforge.toml`.
pub const CONFIG_TEMPLATE: &str = r#"# extforge project configuration
manifest = "manifest.json"
out_dir = "dist"
sourcemap = false
minify = true

[options]
componentCompilerTarget = "vue3"
iconCompiler = "vue3"
"#;

/// Template for `manifest.json`.
/// Contains a {name} placeholder for substitution.
pub const MANIFEST_TEMPLATE: &str = r#"{
  "manifest_version": 3,
  "name": "{name}",
  "version": "0.1.0",
  "description": "A browser extension",
  "permissions": ["storage"],
  "background": {
    "service_worker": "src/background.ts",
    "type": "module"
  },
  "action": {
    "default_popup": "src/popup.vue"
  }
}
"#;

pub const BACKGROUND_TEMPLATE: &str = r#"chrome.runtime.onInstalled.addListener(() => {
  console.log('installed')
})
"#;

pub const POPUP_TEMPLATE: &str = r#"<script setup lang="ts">
import IconHome from '~icons/mdi/home'
</script>

<template>
  <main>
    <IconHome />
    <h1>Hello from the popup</h1>
  </main>
</template>
"#;
