//! Privilege management on an Ambari cluster.
//!
//! A privilege grants a permission (e.g. `CLUSTER.USER`) to a user or a group.
//! Ambari reassigns the id and label of a privilege when it is updated, so
//! create and update always re-read the privilege by
//! (permission, principal name, principal type).

use crate::api::client::{decode, expect_found, expect_success, AmbariClient};
use crate::error::{AmbariError, Result};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PRINCIPAL_TYPE_USER: &str = "USER";
pub const PRINCIPAL_TYPE_GROUP: &str = "GROUP";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Privilege {
    #[serde(default, skip_serializing)]
    pub href: Option<String>,

    #[serde(rename = "PrivilegeInfo")]
    pub privilege_info: PrivilegeInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrivilegeInfo {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub privilege_id: i64,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub permission_label: String,

    pub permission_name: String,
    pub principal_name: String,
    pub principal_type: String,
}

/// Metadata Ambari attaches to every collection response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrivilegesResponse {
    #[serde(flatten)]
    pub response: Response,

    #[serde(default)]
    pub items: Vec<Privilege>,
}

fn is_zero(id: &i64) -> bool {
    *id == 0
}

impl Privilege {
    pub fn new(permission_name: &str, principal_name: &str, principal_type: &str) -> Self {
        Self {
            href: None,
            privilege_info: PrivilegeInfo {
                permission_name: permission_name.to_string(),
                principal_name: principal_name.to_string(),
                principal_type: principal_type.to_string(),
                ..PrivilegeInfo::default()
            },
        }
    }

    pub fn id(&self) -> i64 {
        self.privilege_info.privilege_id
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl AmbariClient {
    /// Fetch a privilege by id.
    ///
    /// Returns `Ok(None)` when Ambari answers 404.
    pub fn privilege(&self, cluster_name: &str, id: i64) -> Result<Option<Privilege>> {
        assert!(!cluster_name.is_empty(), "ClusterName can't be empty");
        tracing::debug!(target: "ambari", cluster_name, id, "Get privilege");

        let id = id.to_string();
        let response = self
            .request(Method::GET, &["clusters", cluster_name, "privileges", id.as_str()])
            .send()?;

        let Some(response) = expect_found(response)? else {
            return Ok(None);
        };
        let privilege: Privilege = decode(response)?;
        tracing::debug!(target: "ambari", "Privilege: {}", privilege);

        Ok(Some(privilege))
    }

    /// Create a privilege and return it as stored by Ambari.
    pub fn create_privilege(&self, cluster_name: &str, privilege: &Privilege) -> Result<Privilege> {
        assert!(!cluster_name.is_empty(), "ClusterName can't be empty");
        tracing::debug!(target: "ambari", cluster_name, "Create privilege {}", privilege);

        let response = self
            .request(Method::POST, &["clusters", cluster_name, "privileges"])
            .json(privilege)
            .send()?;
        expect_success(response)?;

        // The POST body does not describe the new privilege
        self.search_privilege_info(cluster_name, &privilege.privilege_info)?
            .ok_or_else(|| AmbariError::api(500, "Can't get privilege that just created"))
    }

    /// Update a privilege, addressed by its current id.
    pub fn update_privilege(&self, cluster_name: &str, privilege: &Privilege) -> Result<Privilege> {
        assert!(!cluster_name.is_empty(), "ClusterName can't be empty");
        tracing::debug!(target: "ambari", cluster_name, "Update privilege {}", privilege);

        let id = privilege.id().to_string();
        let response = self
            .request(Method::PUT, &["clusters", cluster_name, "privileges", id.as_str()])
            .json(privilege)
            .send()?;
        expect_success(response)?;

        // Id and permission label change after an update
        self.search_privilege_info(cluster_name, &privilege.privilege_info)?
            .ok_or_else(|| AmbariError::api(500, "Can't get privilege that just updated"))
    }

    pub fn delete_privilege(&self, cluster_name: &str, id: i64) -> Result<()> {
        assert!(!cluster_name.is_empty(), "ClusterName can't be empty");
        tracing::debug!(target: "ambari", cluster_name, id, "Delete privilege");

        let id = id.to_string();
        let response = self
            .request(Method::DELETE, &["clusters", cluster_name, "privileges", id.as_str()])
            .send()?;
        expect_success(response)?;

        Ok(())
    }

    /// Look up a privilege by permission and principal.
    ///
    /// The first matching item wins; Ambari is expected to hold at most one.
    pub fn search_privilege(
        &self,
        cluster_name: &str,
        permission_name: &str,
        principal_name: &str,
        principal_type: &str,
    ) -> Result<Option<Privilege>> {
        assert!(!cluster_name.is_empty(), "ClusterName can't be empty");
        assert!(!permission_name.is_empty(), "PermissionName can't be empty");
        assert!(!principal_name.is_empty(), "PrincipalName can't be empty");
        assert!(!principal_type.is_empty(), "PrincipalType can't be empty");
        tracing::debug!(
            target: "ambari",
            cluster_name,
            permission_name,
            principal_name,
            principal_type,
            "Search privilege"
        );

        let response = self
            .request(Method::GET, &["clusters", cluster_name, "privileges"])
            .query(&[
                ("PrivilegeInfo/permission_name", permission_name),
                ("PrivilegeInfo/principal_name", principal_name),
                ("PrivilegeInfo/principal_type", principal_type),
            ])
            .send()?;

        let Some(response) = expect_found(response)? else {
            return Ok(None);
        };
        let privileges: PrivilegesResponse = decode(response)?;
        tracing::debug!(target: "ambari", count = privileges.items.len(), "Privileges found");

        Ok(privileges.items.into_iter().next())
    }

    fn search_privilege_info(
        &self,
        cluster_name: &str,
        info: &PrivilegeInfo,
    ) -> Result<Option<Privilege>> {
        self.search_privilege(
            cluster_name,
            &info.permission_name,
            &info.principal_name,
            &info.principal_type,
        )
    }
}
