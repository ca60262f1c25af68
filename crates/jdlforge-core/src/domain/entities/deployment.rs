use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{validation::ValidationIssue, value_objects::DeploymentType};

/// Caller-supplied deployment settings. Every `None` falls back to a default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeploymentOverrides {
    pub deployment_type: Option<DeploymentType>,
    pub directory_path: Option<String>,
    pub apps_folders: Option<Vec<String>>,
    pub docker_repository_name: Option<String>,
    pub docker_push_command: Option<String>,
    pub gateway_type: Option<String>,
    pub monitoring: Option<String>,
    pub service_discovery_type: Option<String>,
    pub kubernetes_namespace: Option<String>,
    pub kubernetes_service_type: Option<String>,
    pub ingress_domain: Option<String>,
    pub istio: Option<bool>,
    pub openshift_namespace: Option<String>,
    pub storage_type: Option<String>,
}

/// Topology of a multi-application deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfig {
    pub deployment_type: DeploymentType,
    pub directory_path: String,
    pub apps_folders: Vec<String>,
    pub docker_repository_name: String,
    pub docker_push_command: String,
    pub gateway_type: String,
    pub monitoring: String,
    pub service_discovery_type: String,
    pub kubernetes_namespace: String,
    pub kubernetes_service_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress_domain: Option<String>,
    pub istio: bool,
    pub openshift_namespace: String,
    pub storage_type: String,
}

impl DeploymentConfig {
    pub fn new(o: DeploymentOverrides) -> Self {
        Self {
            deployment_type: o.deployment_type.unwrap_or_default(),
            directory_path: o.directory_path.unwrap_or_else(|| "../".into()),
            apps_folders: o.apps_folders.unwrap_or_default(),
            docker_repository_name: o.docker_repository_name.unwrap_or_default(),
            docker_push_command: o.docker_push_command.unwrap_or_else(|| "docker push".into()),
            gateway_type: o.gateway_type.unwrap_or_else(|| "zuul".into()),
            monitoring: o.monitoring.unwrap_or_else(|| "no".into()),
            service_discovery_type: o.service_discovery_type.unwrap_or_else(|| "eureka".into()),
            kubernetes_namespace: o.kubernetes_namespace.unwrap_or_else(|| "default".into()),
            kubernetes_service_type: o
                .kubernetes_service_type
                .unwrap_or_else(|| "LoadBalancer".into()),
            ingress_domain: o.ingress_domain,
            istio: o.istio.unwrap_or(false),
            openshift_namespace: o.openshift_namespace.unwrap_or_else(|| "default".into()),
            storage_type: o.storage_type.unwrap_or_else(|| "ephemeral".into()),
        }
    }

    pub fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if self.apps_folders.iter().all(|f| f.trim().is_empty()) {
            issues.push(ValidationIssue::NoAppsFolders);
        }
        if self.docker_repository_name.trim().is_empty() {
            issues.push(ValidationIssue::NoDockerRepositoryName);
        }
        issues
    }

    pub fn is_valid(&self) -> bool {
        self.issues().is_empty()
    }
}

impl fmt::Display for DeploymentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("deployment {\n")?;
        writeln!(f, "  deploymentType {}", self.deployment_type)?;
        writeln!(f, "  directoryPath \"{}\"", self.directory_path)?;
        writeln!(f, "  appsFolders [{}]", self.apps_folders.join(", "))?;
        writeln!(f, "  dockerRepositoryName \"{}\"", self.docker_repository_name)?;
        writeln!(f, "  dockerPushCommand \"{}\"", self.docker_push_command)?;
        writeln!(f, "  gatewayType {}", self.gateway_type)?;
        writeln!(f, "  monitoring {}", self.monitoring)?;
        writeln!(f, "  serviceDiscoveryType {}", self.service_discovery_type)?;
        match self.deployment_type {
            DeploymentType::Kubernetes => {
                writeln!(f, "  kubernetesNamespace {}", self.kubernetes_namespace)?;
                writeln!(f, "  kubernetesServiceType {}", self.kubernetes_service_type)?;
                if let Some(domain) = &self.ingress_domain {
                    writeln!(f, "  ingressDomain \"{domain}\"")?;
                }
                writeln!(f, "  istio {}", self.istio)?;
            }
            DeploymentType::Openshift => {
                writeln!(f, "  openshiftNamespace {}", self.openshift_namespace)?;
                writeln!(f, "  storageType {}", self.storage_type)?;
            }
            DeploymentType::DockerCompose | DeploymentType::RancherCompose => {}
        }
        f.write_str("}")
    }
}
