//! Domain value objects: cardinalities, rule names, field types, option names,
//! and the enumerated application/deployment settings.
//!
//! # Design
//!
//! These are `Copy` value types compared by value.
//! Each has an `as_str` canonical JDL spelling, a `Display` that writes it,
//! and a `FromStr` that accepts the canonical spelling plus common aliases.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. If it carries rules (allowed validations, allowed option values) add them
//!    to the matching table method here

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! display_via_as_str {
    ($($ty:ty),+ $(,)?) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })+
    };
}

// ── RelationshipType ──────────────────────────────────────────────────────────

/// Cardinality of a relationship between two entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RelationshipType {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl RelationshipType {
    /// Declaration order used when rendering grouped relationship blocks.
    pub const ALL: [RelationshipType; 4] = [
        Self::OneToOne,
        Self::OneToMany,
        Self::ManyToOne,
        Self::ManyToMany,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneToOne => "OneToOne",
            Self::OneToMany => "OneToMany",
            Self::ManyToOne => "ManyToOne",
            Self::ManyToMany => "ManyToMany",
        }
    }

    /// Human spelling used in diagnostics ("One-to-Many").
    pub const fn label(&self) -> &'static str {
        match self {
            Self::OneToOne => "One-to-One",
            Self::OneToMany => "One-to-Many",
            Self::ManyToOne => "Many-to-One",
            Self::ManyToMany => "Many-to-Many",
        }
    }
}

impl FromStr for RelationshipType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match folded.as_str() {
            "onetoone" => Ok(Self::OneToOne),
            "onetomany" => Ok(Self::OneToMany),
            "manytoone" => Ok(Self::ManyToOne),
            "manytomany" => Ok(Self::ManyToMany),
            _ => Err(DomainError::UnknownValue {
                kind: "relationship type",
                value: s.to_string(),
            }),
        }
    }
}

// ── ValidationRuleName ────────────────────────────────────────────────────────

/// Name of a field validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationRuleName {
    #[default]
    Required,
    Unique,
    Min,
    Max,
    MinLength,
    MaxLength,
    Pattern,
    MinBytes,
    MaxBytes,
}

impl ValidationRuleName {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Unique => "unique",
            Self::Min => "min",
            Self::Max => "max",
            Self::MinLength => "minlength",
            Self::MaxLength => "maxlength",
            Self::Pattern => "pattern",
            Self::MinBytes => "minbytes",
            Self::MaxBytes => "maxbytes",
        }
    }

    /// Whether the rule is meaningless without a value.
    pub const fn requires_value(self) -> bool {
        !matches!(self, Self::Required | Self::Unique)
    }
}

impl FromStr for ValidationRuleName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "required" => Ok(Self::Required),
            "unique" => Ok(Self::Unique),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "minlength" => Ok(Self::MinLength),
            "maxlength" => Ok(Self::MaxLength),
            "pattern" => Ok(Self::Pattern),
            "minbytes" => Ok(Self::MinBytes),
            "maxbytes" => Ok(Self::MaxBytes),
            other => Err(DomainError::UnknownValue {
                kind: "validation",
                value: other.to_string(),
            }),
        }
    }
}

// ── FieldType ─────────────────────────────────────────────────────────────────

/// Built-in JDL field types. Any other type name is an enum reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Integer,
    Long,
    BigDecimal,
    Float,
    Double,
    Boolean,
    LocalDate,
    ZonedDateTime,
    Instant,
    Duration,
    Uuid,
    Blob,
    AnyBlob,
    ImageBlob,
    TextBlob,
}

impl FieldType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Integer => "Integer",
            Self::Long => "Long",
            Self::BigDecimal => "BigDecimal",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::Boolean => "Boolean",
            Self::LocalDate => "LocalDate",
            Self::ZonedDateTime => "ZonedDateTime",
            Self::Instant => "Instant",
            Self::Duration => "Duration",
            Self::Uuid => "UUID",
            Self::Blob => "Blob",
            Self::AnyBlob => "AnyBlob",
            Self::ImageBlob => "ImageBlob",
            Self::TextBlob => "TextBlob",
        }
    }

    /// Look up a primitive type by its exact JDL spelling.
    ///
    /// Returns `None` for enum references; type names are case-sensitive.
    pub fn primitive(name: &str) -> Option<Self> {
        let ty = match name {
            "String" => Self::String,
            "Integer" => Self::Integer,
            "Long" => Self::Long,
            "BigDecimal" => Self::BigDecimal,
            "Float" => Self::Float,
            "Double" => Self::Double,
            "Boolean" => Self::Boolean,
            "LocalDate" => Self::LocalDate,
            "ZonedDateTime" => Self::ZonedDateTime,
            "Instant" => Self::Instant,
            "Duration" => Self::Duration,
            "UUID" => Self::Uuid,
            "Blob" => Self::Blob,
            "AnyBlob" => Self::AnyBlob,
            "ImageBlob" => Self::ImageBlob,
            "TextBlob" => Self::TextBlob,
            _ => return None,
        };
        Some(ty)
    }

    /// Validation rules the generator accepts for this type.
    pub fn allowed_validations(self) -> &'static [ValidationRuleName] {
        use ValidationRuleName::*;
        match self {
            Self::String => &[Required, Unique, MinLength, MaxLength, Pattern],
            Self::Integer | Self::Long | Self::BigDecimal | Self::Float | Self::Double => {
                &[Required, Unique, Min, Max]
            }
            Self::Blob | Self::AnyBlob | Self::ImageBlob => &[Required, Unique, MinBytes, MaxBytes],
            _ => &[Required, Unique],
        }
    }
}

// ── ApplicationType ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationType {
    #[default]
    Monolith,
    Microservice,
    Gateway,
    Uaa,
}

impl ApplicationType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Monolith => "monolith",
            Self::Microservice => "microservice",
            Self::Gateway => "gateway",
            Self::Uaa => "uaa",
        }
    }

    /// Application types that never ship a client.
    pub const fn is_server_only(self) -> bool {
        matches!(self, Self::Microservice | Self::Uaa)
    }
}

impl FromStr for ApplicationType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "monolith" => Ok(Self::Monolith),
            "microservice" => Ok(Self::Microservice),
            "gateway" => Ok(Self::Gateway),
            "uaa" => Ok(Self::Uaa),
            other => Err(DomainError::UnknownValue {
                kind: "application type",
                value: other.to_string(),
            }),
        }
    }
}

// ── AuthenticationType ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthenticationType {
    #[default]
    Jwt,
    Session,
    Oauth2,
    Uaa,
}

impl AuthenticationType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Jwt => "jwt",
            Self::Session => "session",
            Self::Oauth2 => "oauth2",
            Self::Uaa => "uaa",
        }
    }
}

impl FromStr for AuthenticationType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jwt" => Ok(Self::Jwt),
            "session" => Ok(Self::Session),
            "oauth2" => Ok(Self::Oauth2),
            "uaa" => Ok(Self::Uaa),
            other => Err(DomainError::UnknownValue {
                kind: "authentication type",
                value: other.to_string(),
            }),
        }
    }
}

// ── DeploymentType ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeploymentType {
    #[default]
    DockerCompose,
    Kubernetes,
    Openshift,
    RancherCompose,
}

impl DeploymentType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DockerCompose => "docker-compose",
            Self::Kubernetes => "kubernetes",
            Self::Openshift => "openshift",
            Self::RancherCompose => "rancher-compose",
        }
    }
}

impl FromStr for DeploymentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "docker-compose" | "compose" => Ok(Self::DockerCompose),
            "kubernetes" | "k8s" => Ok(Self::Kubernetes),
            "openshift" => Ok(Self::Openshift),
            "rancher-compose" | "rancher" => Ok(Self::RancherCompose),
            other => Err(DomainError::UnknownValue {
                kind: "deployment type",
                value: other.to_string(),
            }),
        }
    }
}

// ── Option names ──────────────────────────────────────────────────────────────

/// Options that carry no value (`skipClient A, B`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnaryOptionName {
    SkipClient,
    SkipServer,
    NoFluentMethod,
    Filter,
    ReadOnly,
}

impl UnaryOptionName {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SkipClient => "skipClient",
            Self::SkipServer => "skipServer",
            Self::NoFluentMethod => "noFluentMethod",
            Self::Filter => "filter",
            Self::ReadOnly => "readOnly",
        }
    }
}

impl FromStr for UnaryOptionName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skipClient" => Ok(Self::SkipClient),
            "skipServer" => Ok(Self::SkipServer),
            "noFluentMethod" => Ok(Self::NoFluentMethod),
            "filter" => Ok(Self::Filter),
            "readOnly" => Ok(Self::ReadOnly),
            other => Err(DomainError::UnknownOption {
                name: other.to_string(),
            }),
        }
    }
}

/// Options that carry a value (`dto * with mapstruct`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BinaryOptionName {
    Dto,
    Service,
    Paginate,
    Microservice,
    Search,
    AngularSuffix,
    ClientRootFolder,
}

impl BinaryOptionName {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dto => "dto",
            Self::Service => "service",
            Self::Paginate => "paginate",
            Self::Microservice => "microservice",
            Self::Search => "search",
            Self::AngularSuffix => "angularSuffix",
            Self::ClientRootFolder => "clientRootFolder",
        }
    }

    /// Accepted values, or `None` when the value is free-form.
    pub const fn allowed_values(self) -> Option<&'static [&'static str]> {
        match self {
            Self::Dto => Some(&["mapstruct", "no"]),
            Self::Service => Some(&["serviceClass", "serviceImpl", "no"]),
            Self::Paginate => Some(&["pager", "pagination", "infinite-scroll", "no"]),
            Self::Search => Some(&["elasticsearch", "no"]),
            Self::Microservice | Self::AngularSuffix | Self::ClientRootFolder => None,
        }
    }
}

impl FromStr for BinaryOptionName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dto" => Ok(Self::Dto),
            "service" => Ok(Self::Service),
            "paginate" | "pagination" => Ok(Self::Paginate),
            "microservice" => Ok(Self::Microservice),
            "search" => Ok(Self::Search),
            "angularSuffix" => Ok(Self::AngularSuffix),
            "clientRootFolder" => Ok(Self::ClientRootFolder),
            other => Err(DomainError::UnknownOption {
                name: other.to_string(),
            }),
        }
    }
}

display_via_as_str!(
    RelationshipType,
    ValidationRuleName,
    FieldType,
    ApplicationType,
    AuthenticationType,
    DeploymentType,
    UnaryOptionName,
    BinaryOptionName,
);
