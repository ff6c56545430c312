//! Document tree walkthrough
//!
//! Builds a small workspace → folder → document tree in the in-memory repositories
//! and runs role, resource and by-id checks against it.
//!
//! Run with `RUST_LOG=warden_authz=debug` to see each decision.

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use warden_authz::{
    AccessControlStrategy, AccessController, Ace, Acl, InMemoryResourceRepository,
    InMemoryRoleRepository, PermissionMask, Principal, Resource, Role, RoleRepository,
    SecureResource, SecureResourceRepository, StrategyConfig,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,warden_authz=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("warden-authz v{}", warden_authz::VERSION);

    let roles = Arc::new(InMemoryRoleRepository::new());
    roles.create_role(Role::new("author", PermissionMask::CREATE | PermissionMask::READ))?;
    roles.create_role(Role::admin("operator", PermissionMask::EMPTY))?;

    let resources = Arc::new(InMemoryResourceRepository::new());
    let workspace: Arc<dyn SecureResource> = Arc::new(
        Resource::new("workspace:acme")
            .with_acl(Acl::from_aces([Ace::new("sid-team", PermissionMask::READ)])?),
    );
    let folder: Arc<dyn SecureResource> = Arc::new(
        Resource::new("folder:reports")
            .with_owner("sid-carol")
            .with_parent(&workspace)
            .inherit_parent_acl(true),
    );
    let report: Arc<dyn SecureResource> = Arc::new(
        Resource::new("document:q3-report")
            .with_acl(Acl::from_aces([Ace::new("sid-bob", PermissionMask::UPDATE)])?)
            .with_parent(&folder)
            .inherit_parent_acl(true),
    );
    resources.create_resource(workspace)?;
    resources.create_resource(folder)?;
    resources.create_resource(report)?;

    let config = StrategyConfig::default().with_admin_access(true);
    let strategy = AccessController::with_config(resources, roles, config);

    let alice = Principal::new("user:alice", "sid-team").with_role("author");
    let bob = Principal::new("user:bob", "sid-bob");
    let carol = Principal::new("user:carol", "sid-carol");
    let dave = Principal::new("user:dave", "sid-dave").with_role("operator");

    let checks = [
        ("alice creates content", strategy.verify_role_access(&alice, PermissionMask::CREATE)),
        ("alice deletes content", strategy.verify_role_access(&alice, PermissionMask::DELETE)),
        ("alice reads report (inherited)", strategy.verify_resource_access_by_id(&alice, PermissionMask::READ, "document:q3-report")),
        ("bob updates report", strategy.verify_resource_access_by_id(&bob, PermissionMask::UPDATE, "document:q3-report")),
        ("bob reads report", strategy.verify_resource_access_by_id(&bob, PermissionMask::READ, "document:q3-report")),
        ("carol deletes folder (owner)", strategy.verify_resource_access_by_id(&carol, PermissionMask::DELETE, "folder:reports")),
        ("carol deletes report", strategy.verify_resource_access_by_id(&carol, PermissionMask::DELETE, "document:q3-report")),
        ("dave deletes report (admin)", strategy.verify_resource_access_by_id(&dave, PermissionMask::DELETE, "document:q3-report")),
        ("dave reads missing doc", strategy.verify_resource_access_by_id(&dave, PermissionMask::READ, "document:missing")),
    ];

    for (label, outcome) in checks {
        match outcome {
            Ok(()) => info!("{:<32} granted", label),
            Err(e) => info!("{:<32} {:?}: {}", label, e.kind(), e),
        }
    }

    Ok(())
}
