//! Headless-CMS wiring
//!
//! Typed configuration for wiring the database into a headless CMS. The
//! structures here are static declarations consumed by the external
//! framework at startup; this module models, resolves, and validates them,
//! and emits the framework's camelCase JSON shape. The framework's ORM and
//! admin layer stay external.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::config::Environment;

/// Default CMS server URL.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Default database URL for the CMS adapter.
pub const DEFAULT_DATABASE_URI: &str = "http://localhost:8080";

/// Development placeholder secret, rejected in production.
pub const DEV_SECRET_PLACEHOLDER: &str = "your-secret-key-here";

const ENV_SERVER_URL: &str = "PAYLOAD_PUBLIC_SERVER_URL";
const ENV_SECRET: &str = "PAYLOAD_SECRET";
const ENV_DATABASE_URI: &str = "DATABASE_URI";
const ENV_DATABASE_AUTH_TOKEN: &str = "DATABASE_AUTH_TOKEN";

/// Field types supported by the content schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Text,
    RichText,
    Date,
}

/// A single field declaration within a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
}

impl Field {
    pub fn text(name: impl Into<String>) -> Self {
        Field {
            name: name.into(),
            field_type: FieldType::Text,
            required: false,
        }
    }

    pub fn rich_text(name: impl Into<String>) -> Self {
        Field {
            name: name.into(),
            field_type: FieldType::RichText,
            required: false,
        }
    }

    pub fn date(name: impl Into<String>) -> Self {
        Field {
            name: name.into(),
            field_type: FieldType::Date,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A collection declaration (content type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub slug: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub auth: bool,
    pub fields: Vec<Field>,
}

impl Collection {
    pub fn new(slug: impl Into<String>) -> Self {
        Collection {
            slug: slug.into(),
            auth: false,
            fields: vec![],
        }
    }

    /// Enable authentication for this collection
    pub fn auth(mut self) -> Self {
        self.auth = true;
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
}

/// Database adapter client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterClient {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

/// Database adapter settings for the CMS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterSettings {
    pub client: AdapterClient,
    /// Push schema changes automatically (development only)
    #[serde(default, skip_serializing_if = "is_false")]
    pub push: bool,
}

/// Admin panel settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminSettings {
    /// Slug of the auth-enabled collection backing admin users
    pub user: String,
}

/// TypeScript output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypescriptSettings {
    pub output_file: String,
}

/// GraphQL schema output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlSettings {
    pub schema_output_file: String,
}

/// Full CMS configuration, serialized in the consuming framework's shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmsConfig {
    #[serde(rename = "serverURL")]
    pub server_url: String,
    pub secret: String,
    pub db: AdapterSettings,
    pub admin: AdminSettings,
    pub collections: Vec<Collection>,
    pub typescript: TypescriptSettings,
    #[serde(rename = "graphQL")]
    pub graphql: GraphQlSettings,
}

/// The default content schema: auth-enabled `users` plus `posts`.
pub fn default_collections() -> Vec<Collection> {
    vec![
        Collection::new("users")
            .auth()
            .field(Field::text("name").required()),
        Collection::new("posts")
            .field(Field::text("title").required())
            .field(Field::rich_text("content"))
            .field(Field::date("publishedDate")),
    ]
}

impl CmsConfig {
    /// Resolve the configuration from the environment
    ///
    /// Reads `PAYLOAD_PUBLIC_SERVER_URL`, `PAYLOAD_SECRET`, `DATABASE_URI`
    /// and `DATABASE_AUTH_TOKEN`, falling back to local-development
    /// defaults. Schema push is enabled in development only.
    pub fn from_env(env: &Environment) -> Self {
        Self::from_lookup(env, |key| std::env::var(key).ok())
    }

    /// Resolve the configuration using the given variable lookup
    pub fn from_lookup<F>(env: &Environment, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        CmsConfig {
            server_url: lookup(ENV_SERVER_URL).unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            secret: lookup(ENV_SECRET).unwrap_or_else(|| DEV_SECRET_PLACEHOLDER.to_string()),
            db: AdapterSettings {
                client: AdapterClient {
                    url: lookup(ENV_DATABASE_URI)
                        .unwrap_or_else(|| DEFAULT_DATABASE_URI.to_string()),
                    auth_token: lookup(ENV_DATABASE_AUTH_TOKEN),
                },
                push: env.is_development(),
            },
            admin: AdminSettings {
                user: "users".to_string(),
            },
            collections: default_collections(),
            typescript: TypescriptSettings {
                output_file: "./payload-types.ts".to_string(),
            },
            graphql: GraphQlSettings {
                schema_output_file: "./generated-schema.graphql".to_string(),
            },
        }
    }

    /// Validate the configuration's structure
    ///
    /// Checked here because the consuming framework only fails at startup,
    /// long after this config was generated.
    pub fn validate(&self, env: &Environment) -> Result<()> {
        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            return Err(anyhow!(
                "server URL '{}' must be an http(s) URL",
                self.server_url
            ));
        }
        if self.secret.is_empty() {
            return Err(anyhow!("secret must not be empty"));
        }
        if !env.is_development() && self.secret == DEV_SECRET_PLACEHOLDER {
            return Err(anyhow!(
                "the placeholder secret is not allowed in production; set {}",
                ENV_SECRET
            ));
        }
        if self.db.client.url.is_empty() {
            return Err(anyhow!("database URL must not be empty"));
        }
        if self.collections.is_empty() {
            return Err(anyhow!("at least one collection is required"));
        }

        let mut slugs = std::collections::HashSet::new();
        for collection in &self.collections {
            if collection.slug.is_empty() {
                return Err(anyhow!("collection slug must not be empty"));
            }
            if !slugs.insert(collection.slug.as_str()) {
                return Err(anyhow!("duplicate collection slug '{}'", collection.slug));
            }

            let mut names = std::collections::HashSet::new();
            for field in &collection.fields {
                if field.name.is_empty() {
                    return Err(anyhow!(
                        "collection '{}' has a field with an empty name",
                        collection.slug
                    ));
                }
                if !names.insert(field.name.as_str()) {
                    return Err(anyhow!(
                        "duplicate field '{}' in collection '{}'",
                        field.name,
                        collection.slug
                    ));
                }
            }
        }

        let admin_collection = self
            .collections
            .iter()
            .find(|c| c.slug == self.admin.user)
            .ok_or_else(|| {
                anyhow!(
                    "admin user collection '{}' is not declared",
                    self.admin.user
                )
            })?;
        if !admin_collection.auth {
            return Err(anyhow!(
                "admin user collection '{}' must have auth enabled",
                self.admin.user
            ));
        }

        Ok(())
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
