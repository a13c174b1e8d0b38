//! # Templates
//!
//! Exposes the scaffolding templates from `templates/` directory.
//! Placeholders are `{{NAME}}`, `{{NAME_LOWER}}` and `{{APP_NAME}}`.

pub const REACT_COMPONENT: &str = include_str!("../../templates/react_component.jsx");
pub const VUE_COMPONENT: &str = include_str!("../../templates/vue_component.vue");
pub const EXPRESS_API: &str = include_str!("../../templates/express_api.js");
pub const FASTAPI_API: &str = include_str!("../../templates/fastapi_api.py");
pub const JEST_TEST: &str = include_str!("../../templates/jest_test.js");
pub const MOCHA_TEST: &str = include_str!("../../templates/mocha_test.js");

pub const NODE_DOCKERFILE: &str = include_str!("../../templates/Dockerfile.node");
pub const DOCKER_COMPOSE: &str = include_str!("../../templates/docker-compose.yml");
